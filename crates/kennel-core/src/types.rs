//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated dog identifier.
    DogId, "dog ID"
);

define_string_id!(
    /// A validated litter identifier.
    LitterId, "litter ID"
);

define_string_id!(
    /// A validated stud job identifier.
    StudJobId, "stud job ID"
);

define_string_id!(
    /// A validated heat cycle identifier.
    ///
    /// Heat cycles are owned by a dog; the ID only needs to be unique within
    /// that dog's history.
    HeatCycleId, "heat cycle ID"
);

/// Biological sex of a dog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Lifecycle of a litter from planning to the last puppy going home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LitterStatus {
    Planned,
    Pregnant,
    Born,
    Weaning,
    Ready,
    Completed,
    #[serde(other)]
    Other,
}

/// Lifecycle of a stud service engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudJobStatus {
    Inquiry,
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    #[serde(other)]
    Other,
}

impl StudJobStatus {
    /// String representation matching the serialized form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inquiry => "inquiry",
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other => "other",
        }
    }
}

/// Status of a single breeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreedingStatus {
    Scheduled,
    Completed,
    Cancelled,
    #[serde(other)]
    Other,
}

impl BreedingStatus {
    /// String representation matching the serialized form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other => "other",
        }
    }

    /// Parenthetical title suffix, if the status has one.
    #[must_use]
    pub const fn title_suffix(&self) -> Option<&'static str> {
        match self {
            Self::Completed => Some("(Done)"),
            Self::Scheduled => Some("(Scheduled)"),
            Self::Cancelled => Some("(Cancelled)"),
            Self::Other => None,
        }
    }
}

/// How a breeding was performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreedingMethod {
    Natural,
    Ai,
    SurgicalAi,
    #[serde(other)]
    Other,
}

impl BreedingMethod {
    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Natural => "Natural",
            Self::Ai => "AI",
            Self::SurgicalAi => "Surgical AI",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for BreedingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

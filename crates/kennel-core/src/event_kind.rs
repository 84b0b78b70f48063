//! Event kind enum as the single source of truth for event kind strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical kinds of timeline events.
///
/// The set is closed: a derivation rule may only emit a kind listed here, so
/// every sort, filter and color match stays exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    HeatStarted,
    ExpectedHeat,
    Breeding,
    DueDate,
    PuppiesReady,
    StudService,
    StudBreeding,
    PregnancyCheck,
    LitterSizeCheck,
}

/// Display color bucket for calendar renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventColor {
    Pink,
    Purple,
    Blue,
    Green,
    Indigo,
    Amber,
}

impl EventColor {
    /// Lowercase color name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pink => "pink",
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Indigo => "indigo",
            Self::Amber => "amber",
        }
    }
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::HeatStarted,
        Self::ExpectedHeat,
        Self::Breeding,
        Self::DueDate,
        Self::PuppiesReady,
        Self::StudService,
        Self::StudBreeding,
        Self::PregnancyCheck,
        Self::LitterSizeCheck,
    ];

    /// Stable snake_case name used in JSON and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HeatStarted => "heat_started",
            Self::ExpectedHeat => "expected_heat",
            Self::Breeding => "breeding",
            Self::DueDate => "due_date",
            Self::PuppiesReady => "puppies_ready",
            Self::StudService => "stud_service",
            Self::StudBreeding => "stud_breeding",
            Self::PregnancyCheck => "pregnancy_check",
            Self::LitterSizeCheck => "litter_size_check",
        }
    }

    /// Human label used as the undecorated event title.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::HeatStarted => "Heat Started",
            Self::ExpectedHeat => "Expected Heat",
            Self::Breeding => "Breeding",
            Self::DueDate => "Due Date",
            Self::PuppiesReady => "Puppies Ready",
            Self::StudService => "Stud Service",
            Self::StudBreeding => "Stud Breeding",
            Self::PregnancyCheck => "Pregnancy Check",
            Self::LitterSizeCheck => "Litter Size Check",
        }
    }

    /// Color bucket for this kind.
    #[must_use]
    pub const fn color(&self) -> EventColor {
        match self {
            Self::HeatStarted | Self::ExpectedHeat => EventColor::Pink,
            Self::Breeding => EventColor::Purple,
            Self::DueDate => EventColor::Blue,
            Self::PuppiesReady => EventColor::Green,
            Self::StudService | Self::StudBreeding => EventColor::Indigo,
            Self::PregnancyCheck | Self::LitterSizeCheck => EventColor::Amber,
        }
    }

    /// Whether the event is a projection rather than a recorded fact.
    #[must_use]
    pub const fn is_predicted(&self) -> bool {
        matches!(self, Self::ExpectedHeat)
    }

    /// Whether the event belongs to a dog's heat-cycle history.
    #[must_use]
    pub const fn is_heat_related(&self) -> bool {
        matches!(self, Self::HeatStarted | Self::ExpectedHeat | Self::Breeding)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}

impl Serialize for EventKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown event kind strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event kind: {0}")]
pub struct UnknownEventKind(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_variants() {
        for variant in EventKind::ALL {
            let s = variant.to_string();
            let parsed: EventKind = s.parse().expect("should parse");
            assert_eq!(parsed, variant, "roundtrip failed for {variant:?}");
        }
    }

    #[test]
    fn unknown_kind_errors() {
        let result: Result<EventKind, _> = "vet_visit".parse();
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "unknown event kind: vet_visit");
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&EventKind::LitterSizeCheck).unwrap();
        assert_eq!(json, "\"litter_size_check\"");
        let parsed: EventKind = serde_json::from_str("\"due_date\"").unwrap();
        assert_eq!(parsed, EventKind::DueDate);
    }

    #[test]
    fn only_expected_heat_is_predicted() {
        let predicted: Vec<_> = EventKind::ALL
            .into_iter()
            .filter(EventKind::is_predicted)
            .collect();
        assert_eq!(predicted, vec![EventKind::ExpectedHeat]);
    }

    #[test]
    fn heat_related_kinds() {
        assert!(EventKind::HeatStarted.is_heat_related());
        assert!(EventKind::ExpectedHeat.is_heat_related());
        assert!(EventKind::Breeding.is_heat_related());
        assert!(!EventKind::StudBreeding.is_heat_related());
        assert!(!EventKind::DueDate.is_heat_related());
    }

    #[test]
    fn heat_kinds_share_a_color() {
        assert_eq!(EventKind::HeatStarted.color(), EventKind::ExpectedHeat.color());
        assert_eq!(EventKind::PregnancyCheck.color().as_str(), "amber");
    }
}

//! Canonical timeline events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::event_kind::EventKind;
use crate::types::{
    BreedingMethod, BreedingStatus, DogId, HeatCycleId, LitterId, StudJobId, StudJobStatus,
};

/// The dog an event is about (the dam for litter events, the stud for stud jobs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectDog {
    pub id: DogId,
    pub name: String,
}

/// Kind-specific data carried by an event.
///
/// The variant is the event kind; back-references only exist on the variants
/// they apply to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventPayload {
    HeatStarted {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        heat_cycle_id: Option<HeatCycleId>,
        bred: bool,
    },
    ExpectedHeat {
        cycle_length_days: i64,
    },
    Breeding {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        heat_cycle_id: Option<HeatCycleId>,
    },
    DueDate {
        litter_id: LitterId,
    },
    PuppiesReady {
        litter_id: LitterId,
    },
    StudService {
        stud_job_id: StudJobId,
        status: StudJobStatus,
    },
    StudBreeding {
        stud_job_id: StudJobId,
        /// 1-based position of the breeding within its stud job.
        breeding_number: usize,
        method: BreedingMethod,
        status: BreedingStatus,
    },
    PregnancyCheck {
        stud_job_id: StudJobId,
        days_post_breeding: i64,
    },
    LitterSizeCheck {
        stud_job_id: StudJobId,
        days_post_breeding: i64,
    },
}

impl EventPayload {
    /// The event kind this payload represents.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::HeatStarted { .. } => EventKind::HeatStarted,
            Self::ExpectedHeat { .. } => EventKind::ExpectedHeat,
            Self::Breeding { .. } => EventKind::Breeding,
            Self::DueDate { .. } => EventKind::DueDate,
            Self::PuppiesReady { .. } => EventKind::PuppiesReady,
            Self::StudService { .. } => EventKind::StudService,
            Self::StudBreeding { .. } => EventKind::StudBreeding,
            Self::PregnancyCheck { .. } => EventKind::PregnancyCheck,
            Self::LitterSizeCheck { .. } => EventKind::LitterSizeCheck,
        }
    }
}

/// A normalized, typed timeline event.
///
/// Events are derived on every read from upstream records and have no
/// identity of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    /// Calendar date of the event.
    pub date: NaiveDate,
    /// Kind label, possibly decorated with a sub-status.
    pub title: String,
    /// The dog the event is about.
    pub subject: SubjectDog,
    /// Optional free-text context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Kind and kind-specific references.
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl CanonicalEvent {
    /// Creates an event titled with the kind's default label.
    pub fn new(date: NaiveDate, subject: SubjectDog, payload: EventPayload) -> Self {
        Self {
            date,
            title: payload.kind().label().to_string(),
            subject,
            detail: None,
            payload,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub const fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    pub const fn subject_dog_id(&self) -> &DogId {
        &self.subject.id
    }

    pub fn subject_dog_name(&self) -> &str {
        &self.subject.name
    }

    /// Litter back-reference, if the event carries one.
    pub const fn litter_id(&self) -> Option<&LitterId> {
        match &self.payload {
            EventPayload::DueDate { litter_id } | EventPayload::PuppiesReady { litter_id } => {
                Some(litter_id)
            }
            _ => None,
        }
    }

    /// Stud job back-reference, if the event carries one.
    pub const fn stud_job_id(&self) -> Option<&StudJobId> {
        match &self.payload {
            EventPayload::StudService { stud_job_id, .. }
            | EventPayload::StudBreeding { stud_job_id, .. }
            | EventPayload::PregnancyCheck { stud_job_id, .. }
            | EventPayload::LitterSizeCheck { stud_job_id, .. } => Some(stud_job_id),
            _ => None,
        }
    }

    /// Heat cycle back-reference, if the event carries one.
    pub const fn heat_cycle_id(&self) -> Option<&HeatCycleId> {
        match &self.payload {
            EventPayload::HeatStarted { heat_cycle_id, .. }
            | EventPayload::Breeding { heat_cycle_id } => heat_cycle_id.as_ref(),
            _ => None,
        }
    }

    /// Lifecycle status copied from the source record.
    pub const fn status(&self) -> Option<&'static str> {
        match &self.payload {
            EventPayload::StudBreeding { status, .. } => Some(status.as_str()),
            EventPayload::StudService { status, .. } => Some(status.as_str()),
            _ => None,
        }
    }
}

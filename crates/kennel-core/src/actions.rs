//! Follow-up actions offered for a selected event.

use serde::Serialize;

use crate::event::CanonicalEvent;
use crate::types::{DogId, LitterId, StudJobId};

/// A navigable action from an event's detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    ViewDog { dog_id: DogId },
    ViewStudJob { stud_job_id: StudJobId },
    ViewLitter { litter_id: LitterId },
    ViewHeatCycles { dog_id: DogId },
}

impl Action {
    /// Button label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ViewDog { .. } => "View Dog",
            Self::ViewStudJob { .. } => "View/Edit Stud Job",
            Self::ViewLitter { .. } => "View Litter",
            Self::ViewHeatCycles { .. } => "View Heat Cycles",
        }
    }

    /// ID of the record the action navigates to.
    pub fn target_id(&self) -> &str {
        match self {
            Self::ViewDog { dog_id } | Self::ViewHeatCycles { dog_id } => dog_id.as_str(),
            Self::ViewStudJob { stud_job_id } => stud_job_id.as_str(),
            Self::ViewLitter { litter_id } => litter_id.as_str(),
        }
    }
}

/// Actions available for `event`, in display order.
///
/// Always offers the subject dog. Stud job and litter actions follow the
/// references the event carries; heat cycles are offered for heat and
/// breeding events.
pub fn resolve_actions(event: &CanonicalEvent) -> Vec<Action> {
    let mut actions = vec![Action::ViewDog {
        dog_id: event.subject_dog_id().clone(),
    }];

    if let Some(stud_job_id) = event.stud_job_id() {
        actions.push(Action::ViewStudJob {
            stud_job_id: stud_job_id.clone(),
        });
    }
    if let Some(litter_id) = event.litter_id() {
        actions.push(Action::ViewLitter {
            litter_id: litter_id.clone(),
        });
    }
    if event.kind().is_heat_related() {
        actions.push(Action::ViewHeatCycles {
            dog_id: event.subject_dog_id().clone(),
        });
    }

    actions
}

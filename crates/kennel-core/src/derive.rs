//! Event derivation rules.
//!
//! Each rule maps one upstream record to zero or more canonical events. Rules
//! are pure: a record missing the date a rule needs, or whose follow-up date
//! falls outside the calendar, contributes nothing rather than failing.

use chrono::{NaiveDate, TimeDelta};

use crate::event::{CanonicalEvent, EventPayload, SubjectDog};
use crate::records::{Dog, Litter, StudBreedingRecord, StudJob};
use crate::types::{BreedingStatus, LitterStatus, StudJobStatus};

/// Days after a completed breeding when pregnancy should be confirmed.
pub const PREGNANCY_CHECK_DAYS: i64 = 30;

/// Days after a completed breeding when litter size should be counted (x-ray).
pub const LITTER_SIZE_CHECK_DAYS: i64 = 65;

pub(crate) fn subject_of(dog: &Dog) -> SubjectDog {
    SubjectDog {
        id: dog.id.clone(),
        name: dog.name.clone(),
    }
}

/// Heat-started and breeding events from a female's heat-cycle history.
pub fn heat_cycle_events(dog: &Dog) -> Vec<CanonicalEvent> {
    if !dog.is_female() {
        return Vec::new();
    }

    let mut events = Vec::new();
    for cycle in &dog.heat_cycles {
        let started = CanonicalEvent::new(
            cycle.start_date,
            subject_of(dog),
            EventPayload::HeatStarted {
                heat_cycle_id: cycle.id.clone(),
                bred: cycle.bred,
            },
        );
        events.push(if cycle.bred {
            started.with_detail("Bred")
        } else {
            started
        });

        for &date in &cycle.breeding_dates {
            events.push(CanonicalEvent::new(
                date,
                subject_of(dog),
                EventPayload::Breeding {
                    heat_cycle_id: cycle.id.clone(),
                },
            ));
        }
    }
    events
}

/// Due-date and puppies-ready events for a litter, attributed to its dam.
pub fn litter_events(litter: &Litter, dam: &Dog) -> Vec<CanonicalEvent> {
    let mut events = Vec::new();

    if litter.status == LitterStatus::Pregnant {
        if let Some(due) = litter.expected_date_of_birth {
            let event = CanonicalEvent::new(
                due,
                subject_of(dam),
                EventPayload::DueDate {
                    litter_id: litter.id.clone(),
                },
            );
            events.push(match &litter.litter_name {
                Some(name) => event.with_detail(name.clone()),
                None => event,
            });
        }
    }

    if let Some(ready) = litter.pickup_ready_date {
        events.push(CanonicalEvent::new(
            ready,
            subject_of(dam),
            EventPayload::PuppiesReady {
                litter_id: litter.id.clone(),
            },
        ));
    }

    events
}

/// Breeding, follow-up check and service events for a stud job, attributed to the stud.
///
/// Jobs with recorded breedings produce one event per dated breeding, plus
/// pregnancy and litter-size checks for completed ones. Jobs without any
/// breeding records fall back to a single service event on the scheduled date.
pub fn stud_job_events(job: &StudJob, stud: &Dog) -> Vec<CanonicalEvent> {
    if job.breedings.is_empty() {
        return job
            .scheduled_date
            .map(|date| vec![stud_service_event(job, stud, date)])
            .unwrap_or_default();
    }

    let mut events = Vec::new();
    for (index, breeding) in job.breedings.iter().enumerate() {
        let Some(date) = breeding.date else {
            continue;
        };
        events.push(stud_breeding_event(job, stud, breeding, index + 1, date));

        if breeding.status == BreedingStatus::Completed {
            events.extend(follow_up_check(job, stud, date, FollowUp::Pregnancy));
            events.extend(follow_up_check(job, stud, date, FollowUp::LitterSize));
        }
    }
    events
}

fn stud_breeding_event(
    job: &StudJob,
    stud: &Dog,
    breeding: &StudBreedingRecord,
    breeding_number: usize,
    date: NaiveDate,
) -> CanonicalEvent {
    let mut title = format!("Stud Breeding #{breeding_number}");
    if let Some(suffix) = breeding.status.title_suffix() {
        title.push(' ');
        title.push_str(suffix);
    }

    CanonicalEvent::new(
        date,
        subject_of(stud),
        EventPayload::StudBreeding {
            stud_job_id: job.id.clone(),
            breeding_number,
            method: breeding.method,
            status: breeding.status,
        },
    )
    .with_title(title)
    .with_detail(format!(
        "{} - {}",
        job.female_dog_name,
        breeding.method.label()
    ))
}

/// Checks scheduled relative to a completed breeding.
#[derive(Debug, Clone, Copy)]
enum FollowUp {
    Pregnancy,
    LitterSize,
}

impl FollowUp {
    const fn days(self) -> i64 {
        match self {
            Self::Pregnancy => PREGNANCY_CHECK_DAYS,
            Self::LitterSize => LITTER_SIZE_CHECK_DAYS,
        }
    }
}

fn follow_up_check(
    job: &StudJob,
    stud: &Dog,
    bred_on: NaiveDate,
    follow_up: FollowUp,
) -> Option<CanonicalEvent> {
    let days = follow_up.days();
    let Some(due) = TimeDelta::try_days(days).and_then(|delta| bred_on.checked_add_signed(delta))
    else {
        tracing::warn!(
            stud_job_id = %job.id,
            %bred_on,
            days,
            "skipping follow-up check: date out of range"
        );
        return None;
    };
    let stud_job_id = job.id.clone();
    let payload = match follow_up {
        FollowUp::Pregnancy => EventPayload::PregnancyCheck {
            stud_job_id,
            days_post_breeding: days,
        },
        FollowUp::LitterSize => EventPayload::LitterSizeCheck {
            stud_job_id,
            days_post_breeding: days,
        },
    };

    Some(
        CanonicalEvent::new(due, subject_of(stud), payload).with_detail(format!(
            "{} - {days} days post-breeding",
            job.female_dog_name
        )),
    )
}

fn stud_service_event(job: &StudJob, stud: &Dog, date: NaiveDate) -> CanonicalEvent {
    let suffix = match job.status {
        StudJobStatus::Pending => Some("(Pending)"),
        StudJobStatus::Confirmed => Some("(Confirmed)"),
        _ => None,
    };
    let event = CanonicalEvent::new(
        date,
        subject_of(stud),
        EventPayload::StudService {
            stud_job_id: job.id.clone(),
            status: job.status,
        },
    )
    .with_detail(job.female_dog_name.clone());

    match suffix {
        Some(suffix) => {
            let title = format!("{} {suffix}", event.title);
            event.with_title(title)
        }
        None => event,
    }
}

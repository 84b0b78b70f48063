//! Breeding-event timeline for kennel records.
//!
//! This crate turns read-only snapshots of dogs, litters and stud jobs into a
//! queryable event stream:
//! - Derivation: heat cycles, breedings, due dates, pickups and stud-service
//!   follow-up checks as canonical events
//! - Prediction: next expected heat from a female's cycle history
//! - Timeline: range, lookahead and day queries in date order
//! - Actions: navigable follow-ups for a selected event
//!
//! Everything here is pure and synchronous; events are recomputed on every read.

pub mod actions;
mod derive;
pub mod event;
pub mod event_kind;
pub mod predict;
pub mod records;
pub mod timeline;
pub mod types;

pub use actions::{Action, resolve_actions};
pub use derive::{
    LITTER_SIZE_CHECK_DAYS, PREGNANCY_CHECK_DAYS, heat_cycle_events, litter_events,
    stud_job_events,
};
pub use event::{CanonicalEvent, EventPayload, SubjectDog};
pub use event_kind::{EventColor, EventKind, UnknownEventKind};
pub use predict::{
    DEFAULT_CYCLE_LENGTH_DAYS, HeatPrediction, PredictionBasis, PredictionConfig,
    predict_for_dog, predict_next_heat,
};
pub use records::{
    Dog, HeatCycle, KennelSnapshot, KennelSource, Litter, StudBreedingRecord, StudJob,
};
pub use timeline::{
    DEFAULT_LOOKAHEAD_DAYS, DaySummary, Derivation, DerivationReport, RelevanceWindow, Timeline,
    derive_events, derive_events_with, query_day, query_lookahead, query_range,
};
pub use types::{
    BreedingMethod, BreedingStatus, DogId, HeatCycleId, LitterId, LitterStatus, Sex, StudJobId,
    StudJobStatus, ValidationError,
};

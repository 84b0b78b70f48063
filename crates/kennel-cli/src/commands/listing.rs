//! Shared event rendering for listing commands.

use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use kennel_core::{
    CanonicalEvent, DerivationReport, EventColor, EventKind, KennelSnapshot, RelevanceWindow,
    Timeline,
};
use serde::Serialize;

use crate::Config;

/// Builds the timeline for display: derived events with stale predictions
/// and unselected kinds hidden.
pub fn display_timeline(
    snapshot: &KennelSnapshot,
    config: &Config,
    today: NaiveDate,
    kinds: &[EventKind],
) -> Timeline {
    let mut timeline = Timeline::from_records(
        &snapshot.dogs,
        &snapshot.litters,
        &snapshot.stud_jobs,
        &config.prediction_config(),
    );
    let window: RelevanceWindow = config.relevance_window();
    timeline.surface_predictions(today, &window);
    timeline.retain_kinds(|kind| config.shows_kind(kinds, kind));
    timeline
}

/// "Wed, Jan 1, 2025"
pub fn format_day(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// One event as a fixed-width line: date, title, dog, detail.
pub fn format_event_line(event: &CanonicalEvent) -> String {
    let line = format!(
        "{}  {:<26} {:<10} {}",
        event.date,
        event.title,
        event.subject_dog_name(),
        event.detail.as_deref().unwrap_or("")
    );
    line.trim_end().to_string()
}

/// Footer noting records dropped for an unknown subject dog.
pub fn format_report_note(report: &DerivationReport) -> Option<String> {
    if report.is_clean() {
        return None;
    }
    let mut note = format!(
        "Note: {} record(s) skipped because their dog is missing from the snapshot.",
        report.skipped()
    );
    for (litter_id, dam_id) in &report.orphan_litters {
        write!(note, "\n  litter {litter_id} (dam {dam_id})").unwrap();
    }
    for (job_id, stud_id) in &report.orphan_stud_jobs {
        write!(note, "\n  stud job {job_id} (stud {stud_id})").unwrap();
    }
    Some(note)
}

/// JSON shape of a listed event.
#[derive(Debug, Serialize)]
pub struct JsonEvent<'a> {
    #[serde(flatten)]
    pub event: &'a CanonicalEvent,
    pub color: EventColor,
}

impl<'a> From<&'a CanonicalEvent> for JsonEvent<'a> {
    fn from(event: &'a CanonicalEvent) -> Self {
        Self {
            event,
            color: event.kind().color(),
        }
    }
}

/// Serializes events as a pretty JSON array.
pub fn events_json<'a>(events: impl IntoIterator<Item = &'a CanonicalEvent>) -> Result<String> {
    let events: Vec<JsonEvent<'a>> = events.into_iter().map(JsonEvent::from).collect();
    Ok(serde_json::to_string_pretty(&events)?)
}

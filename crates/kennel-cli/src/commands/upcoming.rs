//! Upcoming command: events from today through the lookahead horizon.

use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use kennel_core::{CanonicalEvent, DerivationReport, EventKind, KennelSnapshot};

use super::listing::{
    display_timeline, events_json, format_day, format_event_line, format_report_note,
};
use crate::Config;

/// Formats the human-readable upcoming list.
pub fn format_upcoming(
    today: NaiveDate,
    days: u32,
    events: &[CanonicalEvent],
    report: &DerivationReport,
) -> String {
    let mut output = String::new();
    writeln!(output, "UPCOMING: {} + {days} days", format_day(today)).unwrap();
    writeln!(output).unwrap();

    if events.is_empty() {
        writeln!(output, "No events in the next {days} days.").unwrap();
    } else {
        for event in events {
            writeln!(output, "{}", format_event_line(event)).unwrap();
        }
        writeln!(output).unwrap();
        let noun = if events.len() == 1 { "event" } else { "events" };
        writeln!(output, "{} {noun}", events.len()).unwrap();
    }

    if let Some(note) = format_report_note(report) {
        writeln!(output).unwrap();
        writeln!(output, "{note}").unwrap();
    }

    output
}

/// Runs the upcoming command.
pub fn run(
    snapshot: &KennelSnapshot,
    config: &Config,
    today: NaiveDate,
    kinds: &[EventKind],
    days: Option<u32>,
    json: bool,
) -> Result<()> {
    let days = days.unwrap_or(config.lookahead_days);
    let timeline = display_timeline(snapshot, config, today, kinds);
    let events = timeline.lookahead(today, days);

    if json {
        println!("{}", events_json(events)?);
    } else {
        print!("{}", format_upcoming(today, days, events, timeline.report()));
    }

    Ok(())
}

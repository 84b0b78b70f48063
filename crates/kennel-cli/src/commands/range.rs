//! Range command: events between two dates, grouped by day.

use std::collections::BTreeMap;
use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use kennel_core::{CanonicalEvent, DerivationReport, EventKind, KennelSnapshot};

use super::listing::{
    display_timeline, events_json, format_day, format_event_line, format_report_note,
};
use crate::Config;

/// Formats events grouped under a heading per day.
pub fn format_range(
    start: NaiveDate,
    end: NaiveDate,
    by_day: &BTreeMap<NaiveDate, Vec<&CanonicalEvent>>,
    report: &DerivationReport,
) -> String {
    let mut output = String::new();
    writeln!(output, "EVENTS: {} to {}", format_day(start), format_day(end)).unwrap();

    if by_day.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "No events in this range.").unwrap();
    }

    for (day, events) in by_day {
        writeln!(output).unwrap();
        writeln!(output, "{}", format_day(*day)).unwrap();
        for event in events {
            writeln!(output, "  {}", format_event_line(event)).unwrap();
        }
    }

    if let Some(note) = format_report_note(report) {
        writeln!(output).unwrap();
        writeln!(output, "{note}").unwrap();
    }

    output
}

/// Runs the range command.
pub fn run(
    snapshot: &KennelSnapshot,
    config: &Config,
    today: NaiveDate,
    kinds: &[EventKind],
    start: NaiveDate,
    end: NaiveDate,
    json: bool,
) -> Result<()> {
    if start > end {
        anyhow::bail!("range start {start} is after end {end}");
    }

    let timeline = display_timeline(snapshot, config, today, kinds);

    if json {
        println!("{}", events_json(timeline.range(start, end))?);
    } else {
        let grouped = timeline.by_day(start, end);
        print!("{}", format_range(start, end, &grouped, timeline.report()));
    }

    Ok(())
}

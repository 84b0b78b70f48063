//! Day command: one calendar cell, capped with an overflow count.

use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use kennel_core::{DaySummary, EventKind, KennelSnapshot};
use serde::Serialize;

use super::listing::{JsonEvent, display_timeline, format_day, format_event_line};
use crate::Config;

/// Formats a single day's events.
pub fn format_day_summary(summary: &DaySummary<'_>) -> String {
    let mut output = String::new();
    writeln!(output, "{}", format_day(summary.date)).unwrap();

    if summary.shown.is_empty() {
        writeln!(output, "  No events.").unwrap();
        return output;
    }

    for event in &summary.shown {
        writeln!(output, "  {}", format_event_line(event)).unwrap();
    }
    if summary.overflow > 0 {
        writeln!(output, "  +{} more (use --limit to show all)", summary.overflow).unwrap();
    }

    output
}

/// JSON day summary.
#[derive(Debug, Serialize)]
pub struct JsonDay<'a> {
    pub date: String,
    pub events: Vec<JsonEvent<'a>>,
    pub overflow: usize,
}

/// Runs the day command.
pub fn run(
    snapshot: &KennelSnapshot,
    config: &Config,
    today: NaiveDate,
    kinds: &[EventKind],
    day: NaiveDate,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let timeline = display_timeline(snapshot, config, today, kinds);
    let summary = timeline.day_summary(day, limit.unwrap_or(config.day_cell_limit));

    if json {
        let out = JsonDay {
            date: summary.date.format("%Y-%m-%d").to_string(),
            events: summary.shown.iter().copied().map(JsonEvent::from).collect(),
            overflow: summary.overflow,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", format_day_summary(&summary));
    }

    Ok(())
}

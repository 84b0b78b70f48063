//! Actions command: follow-up actions for one event.

use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use kennel_core::{Action, CanonicalEvent, EventKind, KennelSnapshot, resolve_actions};
use serde::Serialize;

use super::listing::{JsonEvent, display_timeline, format_day, format_event_line};
use crate::Config;

/// Formats an event followed by its numbered actions.
pub fn format_actions(event: &CanonicalEvent, actions: &[Action]) -> String {
    let mut output = String::new();
    writeln!(output, "{}", format_event_line(event)).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Actions:").unwrap();
    for (i, action) in actions.iter().enumerate() {
        writeln!(
            output,
            "  {}. {} ({})",
            i + 1,
            action.label(),
            action.target_id()
        )
        .unwrap();
    }
    output
}

#[derive(Debug, Serialize)]
struct JsonActions<'a> {
    event: JsonEvent<'a>,
    actions: &'a [Action],
}

/// Runs the actions command.
///
/// `index` is 1-based within the events on `day`.
pub fn run(
    snapshot: &KennelSnapshot,
    config: &Config,
    today: NaiveDate,
    kinds: &[EventKind],
    day: NaiveDate,
    index: usize,
    json: bool,
) -> Result<()> {
    let timeline = display_timeline(snapshot, config, today, kinds);
    let events = timeline.day(day);

    let Some(event) = index.checked_sub(1).and_then(|i| events.get(i)) else {
        anyhow::bail!(
            "no event #{index} on {} ({} event(s) that day)",
            format_day(day),
            events.len()
        );
    };

    let actions = resolve_actions(event);
    if json {
        let out = JsonActions {
            event: JsonEvent::from(event),
            actions: &actions,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", format_actions(event, &actions));
    }

    Ok(())
}

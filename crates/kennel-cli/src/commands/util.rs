//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{Days, NaiveDate};
use regex::Regex;

/// Pre-compiled regex for past relative dates ("3 days ago").
static AGO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(day|week)s?\s+ago$").unwrap());

/// Pre-compiled regex for future relative dates ("in 3 days").
static IN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^in\s+(\d+)\s+(day|week)s?$").unwrap());

/// Conservative bound for relative dates (~1000 years in days).
const MAX_RELATIVE_DAYS: u64 = 1000 * 365;

/// Parse a date as `YYYY-MM-DD`, a keyword, or a relative offset from `today`.
///
/// Supports:
/// - ISO dates: "2025-03-10"
/// - Keywords: "today", "tomorrow", "yesterday"
/// - Relative: "3 days ago", "2 weeks ago", "in 10 days", "in 1 week"
pub fn parse_date(s: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    match s {
        "today" => return Ok(today),
        "tomorrow" => return offset(today, 1, true),
        "yesterday" => return offset(today, 1, false),
        _ => {}
    }

    let (caps, forward) = if let Some(caps) = AGO_RE.captures(s) {
        (caps, false)
    } else if let Some(caps) = IN_RE.captures(s) {
        (caps, true)
    } else {
        anyhow::bail!(
            "Invalid date: {s}. Use YYYY-MM-DD (e.g., 2025-03-10) or relative (e.g., '3 days ago', 'in 2 weeks')"
        );
    };

    let n: u64 = caps[1]
        .parse()
        .context("failed to parse number in relative date")?;
    let days = match &caps[2] {
        "day" => n,
        "week" => n.saturating_mul(7),
        unit => anyhow::bail!("Unknown date unit: {unit}"),
    };

    if days > MAX_RELATIVE_DAYS {
        anyhow::bail!("Relative date too far away: {s}");
    }

    offset(today, days, forward)
}

fn offset(today: NaiveDate, days: u64, forward: bool) -> anyhow::Result<NaiveDate> {
    let shifted = if forward {
        today.checked_add_days(Days::new(days))
    } else {
        today.checked_sub_days(Days::new(days))
    };
    shifted.with_context(|| format!("date out of range: {days} days from {today}"))
}

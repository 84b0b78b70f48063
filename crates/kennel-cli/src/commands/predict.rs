//! Predict command: projected next heat for every female.

use std::fmt::Write;

use anyhow::Result;
use chrono::NaiveDate;
use kennel_core::{
    HeatPrediction, KennelSnapshot, PredictionBasis, PredictionConfig, RelevanceWindow,
    predict_next_heat,
};
use serde::Serialize;

use crate::Config;

/// Prediction status for one female.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionRow {
    pub dog_id: String,
    pub dog_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_heat: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_length_days: Option<i64>,
    /// Number of recorded intervals averaged; 0 when the default was used.
    pub intervals_used: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_date: Option<NaiveDate>,
    /// Whether the prediction falls inside the display window around today.
    pub shown_on_calendar: bool,
}

/// Computes a row per female in the snapshot, in snapshot order.
pub fn prediction_rows(
    snapshot: &KennelSnapshot,
    config: &PredictionConfig,
    window: &RelevanceWindow,
    today: NaiveDate,
) -> Vec<PredictionRow> {
    snapshot
        .dogs
        .iter()
        .filter(|dog| dog.is_female())
        .map(|dog| {
            let prediction = predict_next_heat(&dog.heat_cycles, config);
            let intervals_used = match &prediction {
                Some(HeatPrediction {
                    basis: PredictionBasis::History { intervals },
                    ..
                }) => intervals.len(),
                _ => 0,
            };
            PredictionRow {
                dog_id: dog.id.to_string(),
                dog_name: dog.name.clone(),
                last_heat: prediction.as_ref().map(|p| p.last_heat),
                cycle_length_days: prediction.as_ref().map(|p| p.cycle_length_days),
                intervals_used,
                expected_date: prediction.as_ref().map(|p| p.expected_date),
                shown_on_calendar: prediction
                    .as_ref()
                    .is_some_and(|p| window.contains(today, p.expected_date)),
            }
        })
        .collect()
}

/// Formats the human-readable prediction table.
pub fn format_predictions(today: NaiveDate, rows: &[PredictionRow]) -> String {
    let mut output = String::new();
    writeln!(output, "HEAT PREDICTIONS (as of {today})").unwrap();
    writeln!(output).unwrap();

    if rows.is_empty() {
        writeln!(output, "No females in the snapshot.").unwrap();
        return output;
    }

    for row in rows {
        let (Some(last), Some(cycle), Some(expected)) =
            (row.last_heat, row.cycle_length_days, row.expected_date)
        else {
            writeln!(output, "{:<10} no heat cycles recorded", row.dog_name).unwrap();
            continue;
        };

        let basis = match row.intervals_used {
            0 => "default".to_string(),
            1 => "1 interval".to_string(),
            n => format!("{n} intervals"),
        };
        let visibility = if row.shown_on_calendar { "" } else { "  (hidden)" };
        writeln!(
            output,
            "{:<10} last {last}  cycle {cycle}d ({basis})  expected {expected}{visibility}",
            row.dog_name
        )
        .unwrap();
    }

    output
}

/// Runs the predict command.
pub fn run(
    snapshot: &KennelSnapshot,
    config: &Config,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let rows = prediction_rows(
        snapshot,
        &config.prediction_config(),
        &config.relevance_window(),
        today,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", format_predictions(today, &rows));
    }

    Ok(())
}

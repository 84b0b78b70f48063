//! Heat-cycle prediction.
//!
//! Projects the next heat onset for a female from her recorded cycles.
//!
//! # Algorithm Summary
//!
//! 1. No recorded cycles: no prediction
//! 2. Sort cycles by start date, most recent first
//! 3. Two or more cycles: cycle length is the mean of adjacent start-date
//!    intervals, rounded to the nearest day
//! 4. Fewer than two: fall back to the configured default cycle length
//! 5. Expected heat = most recent start + cycle length; no prediction when
//!    that date falls outside the calendar
//!
//! The projection is not bounded in time; deciding whether a prediction is
//! still worth showing belongs to the timeline.

use chrono::{NaiveDate, TimeDelta};

use crate::derive::subject_of;
use crate::event::{CanonicalEvent, EventPayload};
use crate::records::{Dog, HeatCycle};

/// Typical inter-heat interval for dogs, in days.
pub const DEFAULT_CYCLE_LENGTH_DAYS: i64 = 197;

/// Configuration for heat-cycle prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionConfig {
    /// Cycle length used when fewer than two cycles are recorded.
    /// Default: 197 days.
    pub default_cycle_length_days: i64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            default_cycle_length_days: DEFAULT_CYCLE_LENGTH_DAYS,
        }
    }
}

/// Where a prediction's cycle length came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionBasis {
    /// Averaged from recorded intervals, most recent first.
    History { intervals: Vec<i64> },
    /// Not enough history; the configured default was used.
    Default,
}

/// A projected next heat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatPrediction {
    /// Start date of the most recent recorded cycle.
    pub last_heat: NaiveDate,
    /// Cycle length applied, in days.
    pub cycle_length_days: i64,
    pub basis: PredictionBasis,
    /// `last_heat + cycle_length_days`.
    pub expected_date: NaiveDate,
}

impl HeatPrediction {
    /// Converts the prediction into an `ExpectedHeat` event for `dog`.
    pub fn to_event(&self, dog: &Dog) -> CanonicalEvent {
        let event = CanonicalEvent::new(
            self.expected_date,
            subject_of(dog),
            EventPayload::ExpectedHeat {
                cycle_length_days: self.cycle_length_days,
            },
        );
        match self.basis {
            PredictionBasis::History { .. } => {
                event.with_detail(format!("Avg cycle: {} days", self.cycle_length_days))
            }
            PredictionBasis::Default => event.with_detail(format!(
                "Default cycle: {} days",
                self.cycle_length_days
            )),
        }
    }
}

/// Predicts the next heat from a cycle history.
///
/// Returns `None` when there is no history to project from or the projected
/// date is not representable. The input slice is not reordered.
pub fn predict_next_heat(
    cycles: &[HeatCycle],
    config: &PredictionConfig,
) -> Option<HeatPrediction> {
    let mut starts: Vec<NaiveDate> = cycles.iter().map(|c| c.start_date).collect();
    starts.sort_unstable_by(|a, b| b.cmp(a));

    let last_heat = *starts.first()?;

    let (cycle_length_days, basis) = if starts.len() >= 2 {
        let intervals: Vec<i64> = starts
            .windows(2)
            .map(|pair| (pair[0] - pair[1]).num_days())
            .collect();
        (mean_rounded(&intervals), PredictionBasis::History { intervals })
    } else {
        (config.default_cycle_length_days, PredictionBasis::Default)
    };

    let expected_date = TimeDelta::try_days(cycle_length_days)
        .and_then(|delta| last_heat.checked_add_signed(delta))?;

    Some(HeatPrediction {
        last_heat,
        cycle_length_days,
        basis,
        expected_date,
    })
}

/// Predicts the next heat for a dog, emitting an `ExpectedHeat` event.
///
/// Males never get a prediction.
pub fn predict_for_dog(dog: &Dog, config: &PredictionConfig) -> Option<CanonicalEvent> {
    if !dog.is_female() {
        return None;
    }
    predict_next_heat(&dog.heat_cycles, config).map(|prediction| prediction.to_event(dog))
}

/// Arithmetic mean rounded half away from zero.
#[allow(clippy::cast_possible_wrap)]
fn mean_rounded(values: &[i64]) -> i64 {
    let n = values.len() as i64;
    let sum: i64 = values.iter().sum();
    let half = n / 2;
    if sum >= 0 {
        (sum + half) / n
    } else {
        (sum - half) / n
    }
}

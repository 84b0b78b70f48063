//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kennel_core::EventKind;

/// Breeding calendar for kennel records.
///
/// Derives heat cycles, breedings, due dates, pickups and stud-service
/// follow-ups from a snapshot of kennel records, and predicts upcoming heats.
#[derive(Debug, Parser)]
#[command(name = "kennel", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the records snapshot (overrides config).
    #[arg(short, long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Treat this date as today (YYYY-MM-DD or relative, e.g. "3 days ago").
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Only list events of this kind (repeatable, e.g. `--kind due_date`).
    #[arg(long = "kind", value_name = "KIND", global = true)]
    pub kinds: Vec<EventKind>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show events from today through the lookahead horizon.
    Upcoming {
        /// Days to look ahead (defaults to config, 30).
        #[arg(long)]
        days: Option<u32>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show events between two dates, inclusive.
    Range {
        /// First day of the range.
        start: String,

        /// Last day of the range.
        end: String,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show events on a single day.
    Day {
        /// The day to show.
        date: String,

        /// Maximum events to list before summarizing the rest.
        #[arg(long)]
        limit: Option<usize>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the predicted next heat for every female.
    Predict {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the follow-up actions for one event.
    Actions {
        /// The day the event falls on.
        date: String,

        /// 1-based position of the event within that day.
        #[arg(default_value_t = 1)]
        index: usize,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

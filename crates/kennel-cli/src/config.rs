//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use kennel_core::{
    DEFAULT_CYCLE_LENGTH_DAYS, DEFAULT_LOOKAHEAD_DAYS, EventKind, PredictionConfig,
    RelevanceWindow,
};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the JSON snapshot of dogs, litters and stud jobs.
    pub snapshot_path: PathBuf,

    /// Horizon for `kennel upcoming`, in days.
    pub lookahead_days: u32,

    /// Cycle length used for dogs with fewer than two recorded heats.
    pub default_cycle_length_days: i64,

    /// Predicted heats older than this many days are hidden.
    pub prediction_window_back_days: u32,

    /// Predicted heats further out than this many days are hidden.
    pub prediction_window_ahead_days: u32,

    /// Events shown per day before collapsing into "+N more".
    pub day_cell_limit: usize,

    /// Event kinds left out of listings unless asked for with `--kind`.
    pub hidden_kinds: Vec<EventKind>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        let window = RelevanceWindow::default();
        Self {
            snapshot_path: data_dir.join("snapshot.json"),
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
            default_cycle_length_days: DEFAULT_CYCLE_LENGTH_DAYS,
            prediction_window_back_days: window.days_back,
            prediction_window_ahead_days: window.days_ahead,
            day_cell_limit: 3,
            hidden_kinds: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (KENNEL_*)
        figment = figment.merge(Env::prefixed("KENNEL_"));

        figment.extract()
    }

    pub const fn prediction_config(&self) -> PredictionConfig {
        PredictionConfig {
            default_cycle_length_days: self.default_cycle_length_days,
        }
    }

    /// Whether a listing shows `kind`.
    ///
    /// An explicit `--kind` selection wins over `hidden_kinds`.
    pub fn shows_kind(&self, selected: &[EventKind], kind: EventKind) -> bool {
        if selected.is_empty() {
            !self.hidden_kinds.contains(&kind)
        } else {
            selected.contains(&kind)
        }
    }

    pub const fn relevance_window(&self) -> RelevanceWindow {
        RelevanceWindow {
            days_back: self.prediction_window_back_days,
            days_ahead: self.prediction_window_ahead_days,
        }
    }
}

/// Returns the platform-specific config directory for kennel.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("kennel"))
}

/// Returns the platform-specific data directory for kennel.
///
/// On Linux: `~/.local/share/kennel`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("kennel"))
}

//! CLI subcommand implementations.

pub mod actions;
pub mod day;
pub mod listing;
pub mod predict;
pub mod range;
pub mod upcoming;
pub mod util;

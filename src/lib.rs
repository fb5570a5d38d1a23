//! Prayer times in the terminal.
//!
//! The `schedule` module is the clock-driven core: it resolves the current
//! and next prayer from a day's six slots, formats the countdown and decides
//! when restricted-time advisories open. Everything else feeds it (offline
//! calculation, cache, config) or presents it (CLI, TUI).

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod i18n;
pub mod models;
pub mod prayer_times;
pub mod schedule;
pub mod tui;
pub mod utils;

pub use error::ScheduleError;

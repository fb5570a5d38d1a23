use thiserror::Error;

/// Failures of the schedule core. Everything above the core uses `anyhow`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("invalid prayer schedule: {0}")]
    InvalidSchedule(String),

    /// The countdown target resolved to an instant in the past. Indicates a
    /// bug in next-prayer resolution, never bad user input.
    #[error("countdown target {target} is before now ({now})")]
    ElapsedTarget {
        target: chrono::NaiveDateTime,
        now: chrono::NaiveDateTime,
    },
}

impl ScheduleError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ScheduleError::InvalidSchedule(msg.into())
    }
}

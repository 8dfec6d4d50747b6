//! Error types for schedule generation and planning.
//!
//! Every failure is deterministic: calling again with the same input
//! reproduces the same error. Translating errors into user-facing
//! responses is the caller's job.

use serde::{Deserialize, Serialize};

/// Result alias used throughout the crate.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Failures raised by the schedule generator and the round-robin planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ScheduleError {
    /// Boat class is absent from the strict seat registry.
    #[error("Unknown boat class: {0}")]
    UnknownBoatClass(String),

    /// Roster cannot fill two boats of the requested class.
    #[error("Need at least {required} athletes for {boat_class} matrix racing (got {actual})")]
    InsufficientAthletes {
        boat_class: String,
        required: usize,
        actual: usize,
    },

    /// Roster too small for the round-robin planner.
    #[error("Minimum {required} athletes required for seat racing (got {actual})")]
    InvalidRosterSize { required: usize, actual: usize },

    /// Boat class cannot host a two-athlete comparison.
    #[error("{0} not supported for seat racing - use time trials instead")]
    UnsupportedBoatClass(String),

    /// An explicit piece count of zero was requested.
    #[error("Piece count must be at least 1")]
    InvalidPieceCount,

    /// The same athlete id appears twice in the roster.
    #[error("Athlete '{0}' appears more than once in the roster")]
    DuplicateAthlete(String),
}

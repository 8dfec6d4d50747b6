//! Seat-racing schedule generation and quality evaluation.
//!
//! # Algorithm
//!
//! `MatrixScheduler` builds a rotating multi-boat schedule: a baseline
//! lineup followed by pieces derived through greedy, priority-driven
//! athlete swaps that split the least-compared pairs. It is not optimal,
//! but it is deterministic and fast for realistic squads (≤ ~60).
//!
//! # Quality
//!
//! `calculate_schedule_quality` computes coverage (fraction of pairs
//! compared) and balance (how evenly comparisons are spread).

mod kpi;
mod matrix;
mod priority;

pub use kpi::{calculate_schedule_quality, quality_warnings, MIN_BALANCE, MIN_COVERAGE};
pub use matrix::{generate_swap_schedule, MatrixScheduler, SwapScheduleRequest, MIN_DEFAULT_PIECES};

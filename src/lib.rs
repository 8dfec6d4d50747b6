//! Seat-racing comparison scheduler for rowing squads.
//!
//! Given a roster and a boat class, produces a sequence of pieces that
//! seats every athlete in a boat so that as many distinct athlete pairs
//! as possible are compared, with few pieces and an even spread of
//! comparisons.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Athlete`, `BoatClass`, `PairKey`,
//!   `ComparisonCount`, `Boat`, `Piece`, `SwapSchedule`
//! - **`scheduler`**: Matrix schedule generator and quality metrics
//! - **`validation`**: Duplicate-assignment checks for any schedule
//! - **`planner`**: One-pair-per-session round-robin planning
//! - **`error`**: `ScheduleError`
//!
//! # Comparison rule
//!
//! Two athletes are compared in a piece when they row in different
//! boats of that piece.
//!
//! All computation is synchronous and pure: no I/O and no state shared
//! between calls.

pub mod error;
pub mod models;
pub mod planner;
pub mod scheduler;
pub mod validation;

pub use error::{ScheduleError, ScheduleResult};

//! Seat-racing domain models.
//!
//! Provides the data types shared by the schedule generator, the
//! quality evaluator, the validator and the round-robin planner.
//!
//! # Domain Mappings
//!
//! | seatrace | Generic scheduling |
//! |----------|--------------------|
//! | Athlete | Job |
//! | Boat | Resource (capacity = seats) |
//! | Piece | Time slot |
//! | SwapSchedule | Schedule |

mod athlete;
mod boat_class;
mod pair;
mod schedule;

pub use athlete::{Athlete, AthleteRef};
pub use boat_class::{registry_seats, rowing_seats, BoatClass, SeatSide, DEFAULT_ROWING_SEATS};
pub use pair::{generate_all_pairs, get_pair_key, pair_count, ComparisonCount, PairKey};
pub use schedule::{
    Boat, Piece, ScheduleStatistics, SeatAssignment, SwapSchedule, INITIAL_LINEUP,
};

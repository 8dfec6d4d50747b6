//! Round-robin seat-race planning.
//!
//! A simpler alternative to the rotating matrix schedule: one explicit
//! "boat A vs boat B, swap this pair between two pieces" session per
//! comparison. Uses the rowing-seat convention (coxswain excluded) and
//! is permissive about unknown boat classes.

mod round_robin;

pub use round_robin::{
    fill_remaining_seats, generate_efficient_schedule, generate_plan, generate_plan_at,
    generate_round_robin, get_seats_per_boat, BoatPieces, EfficientSchedule, PlanOptions,
    SeatRacePlan, SeatRaceSession, SessionBoats, DEFAULT_PLAN_BOAT_CLASS, MIN_PLAN_ATHLETES,
};

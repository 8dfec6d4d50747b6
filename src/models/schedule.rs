//! Swap schedule (solution) model.
//!
//! A schedule is an ordered list of pieces. Each piece partitions the
//! full roster across a fixed number of boats. All types are plain
//! serializable data.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Athlete, SeatSide};

/// Swap description of the first piece.
pub const INITIAL_LINEUP: &str = "Initial lineup";

/// One seat in a boat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatAssignment {
    /// 1-based seat number.
    pub seat_number: usize,
    /// Athlete in the seat.
    pub athlete_id: String,
    /// Default rigging side.
    pub side: SeatSide,
}

/// A boat crewed for one piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boat {
    /// Boat label (`"A"`, `"B"`, ...).
    pub boat_name: String,
    /// Athletes in seat order.
    pub athlete_ids: Vec<String>,
    /// Per-seat detail.
    #[serde(default)]
    pub seat_assignments: Vec<SeatAssignment>,
}

impl Boat {
    /// Creates a boat without seat detail.
    pub fn new(boat_name: impl Into<String>, athlete_ids: Vec<String>) -> Self {
        Self {
            boat_name: boat_name.into(),
            athlete_ids,
            seat_assignments: Vec::new(),
        }
    }

    /// Fills `seat_assignments` from `athlete_ids` using default sides.
    ///
    /// `capacity` is the registry seat count of the class.
    pub fn with_default_seats(mut self, capacity: usize, coxed: bool) -> Self {
        self.seat_assignments = self
            .athlete_ids
            .iter()
            .enumerate()
            .map(|(idx, id)| SeatAssignment {
                seat_number: idx + 1,
                athlete_id: id.clone(),
                side: SeatSide::default_for(idx, capacity, coxed),
            })
            .collect();
        self
    }

    /// Whether the athlete rows in this boat.
    pub fn contains(&self, athlete_id: &str) -> bool {
        self.athlete_ids.iter().any(|id| id == athlete_id)
    }

    /// Label for the `idx`-th boat: `A`..`Z`, then `A2`, `B2`, ...
    pub fn label_for(idx: usize) -> String {
        let letter = char::from(b'A' + (idx % 26) as u8);
        match idx / 26 {
            0 => letter.to_string(),
            round => format!("{letter}{}", round + 1),
        }
    }
}

/// One on-water segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// 1-based sequence number.
    pub piece_number: usize,
    /// Boats rowing this piece.
    pub boats: Vec<Boat>,
    /// What changed since the previous piece.
    #[serde(default)]
    pub swap_description: String,
}

impl Piece {
    /// All athlete ids across boats, in boat then seat order.
    pub fn all_athletes(&self) -> impl Iterator<Item = &str> {
        self.boats
            .iter()
            .flat_map(|b| b.athlete_ids.iter().map(String::as_str))
    }

    /// Whether no athlete appears in more than one boat.
    pub fn is_partition(&self) -> bool {
        let mut seen = HashSet::new();
        self.all_athletes().all(|id| seen.insert(id))
    }

    /// Index of the boat holding `athlete_id`.
    pub fn boat_of(&self, athlete_id: &str) -> Option<usize> {
        self.boats.iter().position(|b| b.contains(athlete_id))
    }

    /// Athlete lists per boat.
    pub fn lineups(&self) -> Vec<Vec<String>> {
        self.boats.iter().map(|b| b.athlete_ids.clone()).collect()
    }
}

/// Coverage and balance metrics of a schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStatistics {
    /// Pairs compared at least once.
    pub comparisons_covered: usize,
    /// `C(n, 2)`.
    pub total_possible_comparisons: usize,
    /// `comparisons_covered / total_possible_comparisons` (0 when empty).
    pub coverage: f64,
    /// Population variance of per-pair counts, absent pairs as 0.
    pub variance_in_comparisons: f64,
    /// `1 / (1 + variance)`.
    pub balance: f64,
    /// Mean count per possible pair.
    pub mean_comparisons_per_pair: f64,
    /// Full coverage with variance below 1.
    pub is_optimal: bool,
}

/// A generated seat-racing schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapSchedule {
    /// Roster, in input order. Callers enrich with names.
    pub athletes: Vec<Athlete>,
    /// Boat class label.
    pub boat_class: String,
    /// Boats per piece (constant, at least 2).
    pub boat_count: usize,
    /// Number of pieces.
    pub piece_count: usize,
    /// Pieces in rowing order.
    pub pieces: Vec<Piece>,
    /// Coverage and balance of the whole schedule.
    pub statistics: ScheduleStatistics,
    /// Human-readable quality warnings.
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl SwapSchedule {
    /// Roster ids in input order.
    pub fn athlete_ids(&self) -> Vec<&str> {
        self.athletes.iter().map(|a| a.id.as_str()).collect()
    }
}

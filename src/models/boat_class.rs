//! Boat classes and seat-count lookups.
//!
//! Two seat conventions exist and stay separate:
//!
//! | Class | Registry (incl. cox) | Rowing seats |
//! |-------|---------------------|--------------|
//! | `8+`  | 9                   | 8            |
//! | `4+`  | 5                   | 4            |
//! | `4-`  | 4                   | 4            |
//! | `4x`  | (none)              | 4            |
//! | `2-`  | 2                   | 2            |
//! | `2x`  | 2                   | 2            |
//! | `1x`  | 1                   | 1            |
//!
//! The registry is strict: classes it does not list return `None`.
//! The rowing-seat lookup is permissive and defaults to 4.

use serde::{Deserialize, Serialize};

/// Rowing-seat count used for unrecognized classes.
pub const DEFAULT_ROWING_SEATS: usize = 4;

/// A crew configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoatClass {
    /// `8+`: eight rowers and a coxswain.
    #[serde(rename = "8+")]
    Eight,
    /// `4+`: four rowers and a coxswain.
    #[serde(rename = "4+")]
    CoxedFour,
    /// `4-`: coxless four.
    #[serde(rename = "4-")]
    Four,
    /// `4x`: quadruple scull.
    #[serde(rename = "4x")]
    Quad,
    /// `2-`: coxless pair.
    #[serde(rename = "2-")]
    Pair,
    /// `2x`: double scull.
    #[serde(rename = "2x")]
    Double,
    /// `1x`: single scull.
    #[serde(rename = "1x")]
    Single,
}

impl BoatClass {
    /// All known classes.
    pub const ALL: [BoatClass; 7] = [
        BoatClass::Eight,
        BoatClass::CoxedFour,
        BoatClass::Four,
        BoatClass::Quad,
        BoatClass::Pair,
        BoatClass::Double,
        BoatClass::Single,
    ];

    /// Parses a class label such as `"8+"`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Canonical label.
    pub fn label(self) -> &'static str {
        match self {
            BoatClass::Eight => "8+",
            BoatClass::CoxedFour => "4+",
            BoatClass::Four => "4-",
            BoatClass::Quad => "4x",
            BoatClass::Pair => "2-",
            BoatClass::Double => "2x",
            BoatClass::Single => "1x",
        }
    }

    /// Whether the class carries a coxswain.
    pub fn is_coxed(self) -> bool {
        matches!(self, BoatClass::Eight | BoatClass::CoxedFour)
    }

    /// Rowers only, coxswain excluded.
    pub fn rowing_seats(self) -> usize {
        match self {
            BoatClass::Eight => 8,
            BoatClass::CoxedFour | BoatClass::Four | BoatClass::Quad => 4,
            BoatClass::Pair | BoatClass::Double => 2,
            BoatClass::Single => 1,
        }
    }

    /// Occupied seats in the strict registry (rowers plus coxswain).
    ///
    /// `None` for classes the registry does not list.
    pub fn registry_seats(self) -> Option<usize> {
        match self {
            BoatClass::Eight => Some(9),
            BoatClass::CoxedFour => Some(5),
            BoatClass::Four => Some(4),
            BoatClass::Pair | BoatClass::Double => Some(2),
            BoatClass::Single => Some(1),
            BoatClass::Quad => None,
        }
    }
}

impl std::fmt::Display for BoatClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Strict registry lookup by label.
///
/// Returns `None` for unknown labels so callers can raise
/// [`ScheduleError::UnknownBoatClass`](crate::error::ScheduleError::UnknownBoatClass).
pub fn registry_seats(label: &str) -> Option<usize> {
    BoatClass::from_label(label).and_then(BoatClass::registry_seats)
}

/// Permissive rowing-seat lookup by label; unknown labels get
/// [`DEFAULT_ROWING_SEATS`].
pub fn rowing_seats(label: &str) -> usize {
    BoatClass::from_label(label)
        .map(BoatClass::rowing_seats)
        .unwrap_or(DEFAULT_ROWING_SEATS)
}

/// Side of a seat within a boat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatSide {
    Port,
    Starboard,
    Coxswain,
}

impl SeatSide {
    /// Default side for a 0-based seat index in a boat of `seats` occupied
    /// seats. Rowers alternate port/starboard; the last seat of a coxed
    /// class is the coxswain.
    pub fn default_for(seat_idx: usize, seats: usize, coxed: bool) -> Self {
        if coxed && seat_idx + 1 == seats {
            SeatSide::Coxswain
        } else if seat_idx % 2 == 0 {
            SeatSide::Port
        } else {
            SeatSide::Starboard
        }
    }
}

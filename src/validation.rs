//! Consistency checks for seat-racing schedules.
//!
//! Works on any schedule, generated here or built by hand. Detects
//! athletes assigned more than once within a single piece, and
//! recomputes coverage statistics from the pieces as given.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::models::{Athlete, ComparisonCount, Piece, ScheduleStatistics, SwapSchedule};
use crate::scheduler::calculate_schedule_quality;

/// A schedule to validate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleInput {
    /// Roster.
    pub athletes: Vec<Athlete>,
    /// Pieces in rowing order.
    pub pieces: Vec<Piece>,
}

impl From<&SwapSchedule> for ScheduleInput {
    fn from(schedule: &SwapSchedule) -> Self {
        Self {
            athletes: schedule.athletes.clone(),
            pieces: schedule.pieces.clone(),
        }
    }
}

/// A duplicate assignment within one piece.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Piece containing the duplicate.
    pub piece_number: usize,
    /// Athlete assigned more than once.
    pub athlete_id: String,
    /// Boats the athlete appears in, in boat order.
    pub boats: Vec<String>,
    /// Human-readable description.
    pub description: String,
}

/// Outcome of [`validate_schedule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `true` iff there are no issues.
    pub valid: bool,
    /// Every detected duplicate assignment.
    pub issues: Vec<ValidationIssue>,
    /// Coverage recomputed from the pieces.
    pub statistics: ScheduleStatistics,
}

/// Validates a schedule.
///
/// Each athlete id occurring more than once in a piece yields one issue
/// for that piece.
///
/// # Example
///
/// ```
/// use seatrace_schedule::models::{Athlete, Boat, Piece};
/// use seatrace_schedule::validation::{validate_schedule, ScheduleInput};
///
/// let input = ScheduleInput {
///     athletes: vec![Athlete::new("a"), Athlete::new("b"), Athlete::new("c")],
///     pieces: vec![Piece {
///         piece_number: 1,
///         boats: vec![
///             Boat::new("A", vec!["a".into(), "b".into()]),
///             Boat::new("B", vec!["b".into(), "c".into()]),
///         ],
///         swap_description: String::new(),
///     }],
/// };
/// let result = validate_schedule(&input);
/// assert!(!result.valid);
/// assert_eq!(result.issues[0].athlete_id, "b");
/// ```
pub fn validate_schedule(schedule: &ScheduleInput) -> ValidationResult {
    let mut issues = Vec::new();
    let mut comparison_count = ComparisonCount::new();

    for piece in &schedule.pieces {
        issues.extend(duplicate_issues(piece));
        comparison_count.record_piece(&piece.lineups());
    }

    let athlete_ids: Vec<&str> = schedule.athletes.iter().map(|a| a.id.as_str()).collect();
    let statistics = calculate_schedule_quality(&comparison_count, &athlete_ids, &schedule.pieces);

    debug!(
        pieces = schedule.pieces.len(),
        issues = issues.len(),
        "schedule validated"
    );

    ValidationResult {
        valid: issues.is_empty(),
        issues,
        statistics,
    }
}

fn duplicate_issues(piece: &Piece) -> Vec<ValidationIssue> {
    // athlete → (occurrences, boats in first-seen order)
    let mut seen: HashMap<&str, (usize, Vec<&str>)> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for boat in &piece.boats {
        for id in &boat.athlete_ids {
            let entry = seen.entry(id.as_str()).or_insert_with(|| {
                order.push(id.as_str());
                (0, Vec::new())
            });
            entry.0 += 1;
            if !entry.1.contains(&boat.boat_name.as_str()) {
                entry.1.push(boat.boat_name.as_str());
            }
        }
    }

    order
        .into_iter()
        .filter_map(|id| {
            let (occurrences, boats) = seen.remove(id)?;
            if occurrences < 2 {
                return None;
            }
            let description = if boats.len() > 1 {
                format!(
                    "Piece {}: Athlete '{id}' assigned to multiple boats ({})",
                    piece.piece_number,
                    boats.join(", ")
                )
            } else {
                format!(
                    "Piece {}: Athlete '{id}' assigned to multiple seats in boat {}",
                    piece.piece_number,
                    boats.join(", ")
                )
            };
            Some(ValidationIssue {
                piece_number: piece.piece_number,
                athlete_id: id.to_string(),
                boats: boats.into_iter().map(String::from).collect(),
                description,
            })
        })
        .collect()
}

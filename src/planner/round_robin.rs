//! One-pair-per-session seat-race planning.
//!
//! Each session races two boats over two pieces. The pair under
//! comparison starts in opposite boats and swaps between pieces while
//! the remaining seats keep the same fillers.
//!
//! Boat capacity here counts rowers only (see [`rowing_seats`]); unknown
//! classes default to 4 seats.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::error::{ScheduleError, ScheduleResult};
use crate::models::{generate_all_pairs, get_pair_key, pair_count, rowing_seats, Athlete, AthleteRef};

/// Fewest athletes the planner accepts.
pub const MIN_PLAN_ATHLETES: usize = 4;
/// Boat class used when none is given.
pub const DEFAULT_PLAN_BOAT_CLASS: &str = "4+";

/// Lineups of one boat across a session's two pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoatPieces {
    pub piece1: Vec<Athlete>,
    pub piece2: Vec<Athlete>,
}

/// The two boats of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionBoats {
    pub boat_a: BoatPieces,
    pub boat_b: BoatPieces,
}

/// A two-piece session comparing one pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRaceSession {
    /// 1-based session number.
    pub session_number: usize,
    /// The pair being compared.
    pub comparing: (Athlete, Athlete),
    pub boats: SessionBoats,
    /// Coach-facing instruction.
    pub instructions: String,
}

/// Sessions plus coverage bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficientSchedule {
    pub schedule: Vec<SeatRaceSession>,
    pub total_sessions: usize,
    pub comparisons_needed: usize,
    pub comparisons_scheduled: usize,
    /// `round(scheduled / needed * 100)`.
    pub coverage_percent: u32,
}

/// Planner options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOptions {
    pub athletes: Vec<Athlete>,
    #[serde(default = "default_boat_class")]
    pub boat_class: String,
    /// Session cap. `None` or `Some(0)` plans the full round-robin.
    #[serde(default)]
    pub max_sessions: Option<usize>,
}

fn default_boat_class() -> String {
    DEFAULT_PLAN_BOAT_CLASS.to_string()
}

impl PlanOptions {
    /// Options for a roster with the default boat class and no cap.
    pub fn new<I, A>(athletes: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Athlete>,
    {
        Self {
            athletes: athletes.into_iter().map(Into::into).collect(),
            boat_class: default_boat_class(),
            max_sessions: None,
        }
    }

    pub fn with_boat_class(mut self, boat_class: impl Into<String>) -> Self {
        self.boat_class = boat_class.into();
        self
    }

    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = Some(max_sessions);
        self
    }
}

/// A generated seat-racing plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatRacePlan {
    pub team_id: String,
    pub boat_class: String,
    pub athlete_count: usize,
    pub seats_per_boat: usize,
    pub schedule: Vec<SeatRaceSession>,
    pub total_sessions: usize,
    pub comparisons_needed: usize,
    pub comparisons_scheduled: usize,
    pub coverage_percent: u32,
    pub generated_at: DateTime<Utc>,
}

/// Rowing seats for a class label; 4 for unrecognized classes.
pub fn get_seats_per_boat(boat_class: &str) -> usize {
    rowing_seats(boat_class)
}

/// First `seats_needed` athletes not in `exclude`, in roster order.
pub fn fill_remaining_seats<T, E>(athletes: &[T], exclude: &[E], seats_needed: usize) -> Vec<T>
where
    T: AthleteRef + Clone,
    E: AthleteRef,
{
    let excluded: HashSet<&str> = exclude.iter().map(AthleteRef::athlete_id).collect();
    athletes
        .iter()
        .filter(|a| !excluded.contains(a.athlete_id()))
        .take(seats_needed)
        .cloned()
        .collect()
}

/// Builds the session comparing `first` and `second`.
///
/// When the roster cannot supply a full second set of fillers, boat B
/// reuses boat A's fillers.
fn build_session(
    session_number: usize,
    athletes: &[Athlete],
    first: &Athlete,
    second: &Athlete,
    seats_per_boat: usize,
) -> SeatRaceSession {
    let remaining = seats_per_boat.saturating_sub(1);
    let pair = [first, second];
    let fillers = fill_remaining_seats(athletes, &pair, remaining * 2);

    let boat_a_fillers = &fillers[..remaining.min(fillers.len())];
    let boat_b_fillers = if fillers.len() >= remaining * 2 {
        &fillers[remaining..]
    } else {
        boat_a_fillers
    };

    let crew = |lead: &Athlete, fillers: &[Athlete]| {
        let mut seats = Vec::with_capacity(fillers.len() + 1);
        seats.push(lead.clone());
        seats.extend_from_slice(fillers);
        seats
    };

    SeatRaceSession {
        session_number,
        comparing: (first.clone(), second.clone()),
        boats: SessionBoats {
            boat_a: BoatPieces {
                piece1: crew(first, boat_a_fillers),
                piece2: crew(second, boat_a_fillers),
            },
            boat_b: BoatPieces {
                piece1: crew(second, boat_b_fillers),
                piece2: crew(first, boat_b_fillers),
            },
        },
        instructions: format!(
            "Swap {} and {} between pieces",
            first.label(),
            second.label()
        ),
    }
}

/// One session per pair, in [`generate_all_pairs`] order.
pub fn generate_round_robin(athletes: &[Athlete], boat_class: &str) -> Vec<SeatRaceSession> {
    let seats_per_boat = get_seats_per_boat(boat_class);
    generate_all_pairs(athletes)
        .iter()
        .enumerate()
        .map(|(idx, (a, b))| build_session(idx + 1, athletes, a, b, seats_per_boat))
        .collect()
}

/// Like [`generate_round_robin`] but capped at `max_sessions`, skipping
/// pairs already covered.
pub fn generate_efficient_schedule(
    athletes: &[Athlete],
    boat_class: &str,
    max_sessions: usize,
) -> EfficientSchedule {
    let seats_per_boat = get_seats_per_boat(boat_class);
    let all_pairs = generate_all_pairs(athletes);
    let comparisons_needed = all_pairs.len();
    let mut compared = HashSet::new();
    let mut schedule = Vec::new();

    for (a, b) in &all_pairs {
        if schedule.len() >= max_sessions {
            break;
        }
        if compared.insert(get_pair_key(a, b)) {
            schedule.push(build_session(schedule.len() + 1, athletes, a, b, seats_per_boat));
        }
    }

    EfficientSchedule {
        total_sessions: schedule.len(),
        schedule,
        comparisons_needed,
        comparisons_scheduled: compared.len(),
        coverage_percent: percent(compared.len(), comparisons_needed),
    }
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        0
    } else {
        (part as f64 / whole as f64 * 100.0).round() as u32
    }
}

/// Plans a seat-racing block for a team, stamped with the current time.
///
/// # Errors
/// - [`ScheduleError::InvalidRosterSize`] for fewer than 4 athletes.
/// - [`ScheduleError::UnsupportedBoatClass`] for `1x`.
///
/// # Example
///
/// ```
/// use seatrace_schedule::planner::{generate_plan, PlanOptions};
///
/// let plan = generate_plan("team-1", &PlanOptions::new(["a", "b", "c", "d"])).unwrap();
/// assert_eq!(plan.total_sessions, 6);
/// assert_eq!(plan.coverage_percent, 100);
/// ```
pub fn generate_plan(team_id: &str, options: &PlanOptions) -> ScheduleResult<SeatRacePlan> {
    generate_plan_at(team_id, options, Utc::now())
}

/// [`generate_plan`] with an explicit timestamp.
pub fn generate_plan_at(
    team_id: &str,
    options: &PlanOptions,
    generated_at: DateTime<Utc>,
) -> ScheduleResult<SeatRacePlan> {
    let athletes = &options.athletes;
    if athletes.len() < MIN_PLAN_ATHLETES {
        return Err(ScheduleError::InvalidRosterSize {
            required: MIN_PLAN_ATHLETES,
            actual: athletes.len(),
        });
    }

    let seats_per_boat = get_seats_per_boat(&options.boat_class);
    if seats_per_boat == 1 {
        return Err(ScheduleError::UnsupportedBoatClass(options.boat_class.clone()));
    }

    let result = match options.max_sessions.filter(|&m| m > 0) {
        Some(max_sessions) => {
            debug!(team_id, max_sessions, "planning capped seat-race schedule");
            generate_efficient_schedule(athletes, &options.boat_class, max_sessions)
        }
        None => {
            debug!(team_id, "planning full round-robin");
            let total = pair_count(athletes.len());
            EfficientSchedule {
                schedule: generate_round_robin(athletes, &options.boat_class),
                total_sessions: total,
                comparisons_needed: total,
                comparisons_scheduled: total,
                coverage_percent: 100,
            }
        }
    };

    Ok(SeatRacePlan {
        team_id: team_id.to_string(),
        boat_class: options.boat_class.clone(),
        athlete_count: athletes.len(),
        seats_per_boat,
        schedule: result.schedule,
        total_sessions: result.total_sessions,
        comparisons_needed: result.comparisons_needed,
        comparisons_scheduled: result.comparisons_scheduled,
        coverage_percent: result.coverage_percent,
        generated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squad(n: usize) -> Vec<Athlete> {
        (0..n)
            .map(|i| Athlete::new(format!("a{i}")).with_name(format!("Rower {i}")))
            .collect()
    }

    fn ids(crew: &[Athlete]) -> Vec<&str> {
        crew.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_seats_per_boat() {
        assert_eq!(get_seats_per_boat("8+"), 8);
        assert_eq!(get_seats_per_boat("4x"), 4);
        assert_eq!(get_seats_per_boat("2-"), 2);
        assert_eq!(get_seats_per_boat("1x"), 1);
        assert_eq!(get_seats_per_boat("bogus"), 4);
    }

    #[test]
    fn test_fill_remaining_seats() {
        let roster = ["a", "b", "c", "d", "e"];
        assert_eq!(fill_remaining_seats(&roster, &["b", "d"], 2), vec!["a", "c"]);
        assert_eq!(fill_remaining_seats(&roster, &["a"], 10), vec!["b", "c", "d", "e"]);

        let records = squad(3);
        let filled = fill_remaining_seats(&records, &["a0"], 1);
        assert_eq!(ids(&filled), vec!["a1"]);
    }

    #[test]
    fn test_round_robin_session_shape() {
        let athletes = squad(10);
        let sessions = generate_round_robin(&athletes, "4-");
        assert_eq!(sessions.len(), 45);

        let first = &sessions[0];
        assert_eq!(first.session_number, 1);
        assert_eq!(first.comparing.0.id, "a0");
        assert_eq!(first.comparing.1.id, "a1");
        assert_eq!(ids(&first.boats.boat_a.piece1), vec!["a0", "a2", "a3", "a4"]);
        assert_eq!(ids(&first.boats.boat_a.piece2), vec!["a1", "a2", "a3", "a4"]);
        assert_eq!(ids(&first.boats.boat_b.piece1), vec!["a1", "a5", "a6", "a7"]);
        assert_eq!(ids(&first.boats.boat_b.piece2), vec!["a0", "a5", "a6", "a7"]);
        assert_eq!(first.instructions, "Swap Rower 0 and Rower 1 between pieces");
    }

    #[test]
    fn test_filler_reuse_on_small_roster() {
        // 4+ needs 3 fillers per boat; a roster of 5 has only 3 fillers total
        let athletes = squad(5);
        let sessions = generate_round_robin(&athletes, "4+");
        let boats = &sessions[0].boats;
        assert_eq!(ids(&boats.boat_a.piece1), vec!["a0", "a2", "a3", "a4"]);
        assert_eq!(ids(&boats.boat_b.piece1), vec!["a1", "a2", "a3", "a4"]);
    }

    #[test]
    fn test_efficient_schedule_capped() {
        let athletes = squad(6);
        let result = generate_efficient_schedule(&athletes, "2x", 5);
        assert_eq!(result.total_sessions, 5);
        assert_eq!(result.comparisons_needed, 15);
        assert_eq!(result.comparisons_scheduled, 5);
        assert_eq!(result.coverage_percent, 33);
        assert_eq!(result.schedule[4].session_number, 5);
    }

    #[test]
    fn test_efficient_schedule_skips_repeated_pairs() {
        // duplicate record produces a repeated key which is skipped
        let mut athletes = squad(3);
        athletes.push(Athlete::new("a0"));
        let result = generate_efficient_schedule(&athletes, "2-", 100);
        assert_eq!(result.comparisons_needed, 6);
        assert!(result.total_sessions < 6);
        assert_eq!(result.total_sessions, result.comparisons_scheduled);
    }

    #[test]
    fn test_plan_full_round_robin() {
        let plan = generate_plan("team", &PlanOptions::new(["a", "b", "c", "d"])).unwrap();
        assert_eq!(plan.boat_class, "4+");
        assert_eq!(plan.seats_per_boat, 4);
        assert_eq!(plan.athlete_count, 4);
        assert_eq!(plan.total_sessions, 6);
        assert_eq!(plan.schedule.len(), 6);
        assert_eq!(plan.comparisons_needed, 6);
        assert_eq!(plan.coverage_percent, 100);
    }

    #[test]
    fn test_plan_with_cap() {
        let options = PlanOptions::new(squad(8)).with_boat_class("2-").with_max_sessions(7);
        let plan = generate_plan("team", &options).unwrap();
        assert_eq!(plan.total_sessions, 7);
        assert_eq!(plan.comparisons_needed, 28);
        assert_eq!(plan.coverage_percent, 25);
    }

    #[test]
    fn test_plan_zero_cap_is_full() {
        let options = PlanOptions::new(squad(5)).with_max_sessions(0);
        let plan = generate_plan("team", &options).unwrap();
        assert_eq!(plan.total_sessions, 10);
    }

    #[test]
    fn test_plan_rejects_small_roster() {
        let err = generate_plan("team", &PlanOptions::new(["a", "b", "c"])).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidRosterSize {
                required: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_plan_rejects_single_scull() {
        let options = PlanOptions::new(squad(6)).with_boat_class("1x");
        let err = generate_plan("team", &options).unwrap_err();
        assert_eq!(err, ScheduleError::UnsupportedBoatClass("1x".into()));
    }

    #[test]
    fn test_plan_unknown_class_defaults_to_four() {
        let options = PlanOptions::new(squad(6)).with_boat_class("6+");
        let plan = generate_plan("team", &options).unwrap();
        assert_eq!(plan.seats_per_boat, 4);
    }

    #[test]
    fn test_plan_timestamp_and_json() {
        let at = DateTime::parse_from_rfc3339("2026-03-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let plan = generate_plan_at("t1", &PlanOptions::new(squad(4)), at).unwrap();
        assert_eq!(plan.generated_at, at);

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["team_id"], "t1");
        assert_eq!(json["schedule"][0]["comparing"][0]["id"], "a0");
    }

    #[test]
    fn test_options_deserialize_defaults() {
        let options: PlanOptions =
            serde_json::from_str(r#"{"athletes": [{"id": "a"}, {"id": "b"}]}"#).unwrap();
        assert_eq!(options.boat_class, "4+");
        assert_eq!(options.max_sessions, None);
    }
}

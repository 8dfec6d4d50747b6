//! Matrix seat-racing schedule generator.
//!
//! # Algorithm
//!
//! 1. Resolve the registry seat count `s` and `boat_count = ceil(n / s)`.
//! 2. Piece 1: seat the roster in order (or seeded-shuffled order) into
//!    boats filled to capacity; the last boat holds the remainder.
//! 3. Every later piece starts from the previous lineup and applies
//!    athlete swaps between boats. Same-boat pairs are pulled from a
//!    priority queue, least-covered first; for each, the best swap that
//!    moves one of its members out is applied if it lowers the lineup
//!    cost. Repeats until no improving swap exists.
//! 4. After each piece, every cross-boat pair's count is incremented.
//!
//! Lineup cost is the sum over same-boat pairs of `1 / (1 + count)^2`,
//! doubled for pairs touching a prioritized athlete. Never-compared pairs
//! dominate, so they are split first.
//!
//! Piece `k` depends only on pieces `1..k`, so a longer schedule always
//! extends a shorter one and coverage never drops as pieces are added.
//!
//! # Complexity
//! O(P * W * Q * n * s) where P = pieces, W = swaps per piece,
//! Q = same-boat pairs, n = roster size, s = seats per boat.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

use super::kpi::{calculate_schedule_quality, quality_warnings};
use super::priority::{PairEntry, PairQueue};
use crate::error::{ScheduleError, ScheduleResult};
use crate::models::{
    registry_seats, Athlete, Boat, BoatClass, ComparisonCount, PairKey, Piece, SwapSchedule,
    INITIAL_LINEUP,
};

/// Minimum pieces chosen when no piece count is requested.
pub const MIN_DEFAULT_PIECES: usize = 3;

const PRIORITY_WEIGHT: f64 = 2.0;
const EPSILON: f64 = 1e-12;

/// Input for schedule generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapScheduleRequest {
    /// Roster ids. Order is the baseline seating order.
    pub athlete_ids: Vec<String>,
    /// Boat class label (`"8+"`, `"4-"`, ...).
    pub boat_class: String,
    /// Exact number of pieces; chosen automatically when `None`.
    #[serde(default)]
    pub piece_count: Option<usize>,
    /// Athletes whose comparisons are favored.
    #[serde(default)]
    pub prioritize_athletes: Vec<String>,
    /// Shuffles the baseline lineup deterministically.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SwapScheduleRequest {
    /// Creates a request.
    pub fn new<I, S>(athlete_ids: I, boat_class: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            athlete_ids: athlete_ids.into_iter().map(Into::into).collect(),
            boat_class: boat_class.into(),
            piece_count: None,
            prioritize_athletes: Vec::new(),
            seed: None,
        }
    }

    /// Requests an exact number of pieces.
    pub fn with_piece_count(mut self, piece_count: usize) -> Self {
        self.piece_count = Some(piece_count);
        self
    }

    /// Favors comparisons involving these athletes.
    pub fn with_prioritized<I, S>(mut self, athlete_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prioritize_athletes = athlete_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Shuffles the baseline lineup with a seeded RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Rotating multi-boat seat-racing scheduler.
///
/// # Example
///
/// ```
/// use seatrace_schedule::scheduler::{MatrixScheduler, SwapScheduleRequest};
///
/// let request = SwapScheduleRequest::new(["a", "b", "c", "d"], "2-").with_piece_count(3);
/// let schedule = MatrixScheduler::new().generate(&request).unwrap();
///
/// assert_eq!(schedule.boat_count, 2);
/// assert_eq!(schedule.pieces.len(), 3);
/// assert_eq!(schedule.pieces[0].swap_description, "Initial lineup");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MatrixScheduler {
    max_swaps_per_piece: Option<usize>,
}

impl MatrixScheduler {
    /// Creates a scheduler with no per-piece swap limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of swaps applied between consecutive pieces.
    pub fn with_max_swaps(mut self, max_swaps: usize) -> Self {
        self.max_swaps_per_piece = Some(max_swaps);
        self
    }

    /// Generates a schedule.
    ///
    /// # Errors
    /// - [`ScheduleError::UnknownBoatClass`] if the class is not in the
    ///   strict registry.
    /// - [`ScheduleError::InsufficientAthletes`] if the roster cannot fill
    ///   two boats.
    /// - [`ScheduleError::InvalidPieceCount`] for an explicit count of 0.
    /// - [`ScheduleError::DuplicateAthlete`] for a repeated roster id.
    pub fn generate(&self, request: &SwapScheduleRequest) -> ScheduleResult<SwapSchedule> {
        let seats = registry_seats(&request.boat_class)
            .ok_or_else(|| ScheduleError::UnknownBoatClass(request.boat_class.clone()))?;

        let n = request.athlete_ids.len();
        if n < seats * 2 {
            return Err(ScheduleError::InsufficientAthletes {
                boat_class: request.boat_class.clone(),
                required: seats * 2,
                actual: n,
            });
        }
        if request.piece_count == Some(0) {
            return Err(ScheduleError::InvalidPieceCount);
        }

        let mut seen = HashSet::with_capacity(n);
        for id in &request.athlete_ids {
            if !seen.insert(id.as_str()) {
                return Err(ScheduleError::DuplicateAthlete(id.clone()));
            }
        }

        let boat_count = n.div_ceil(seats);
        let piece_count = request
            .piece_count
            .unwrap_or_else(|| default_piece_count(n, boat_count));
        let coxed = BoatClass::from_label(&request.boat_class).is_some_and(BoatClass::is_coxed);

        debug!(
            athletes = n,
            boat_class = %request.boat_class,
            boat_count,
            piece_count,
            "generating swap schedule"
        );

        let prioritized: Vec<bool> = request
            .athlete_ids
            .iter()
            .map(|id| request.prioritize_athletes.contains(id))
            .collect();

        let mut state = MatrixState::new(n, prioritized);
        let mut lineup = baseline_lineup(n, seats, boat_count, request.seed);
        let mut pieces: Vec<Piece> = Vec::with_capacity(piece_count);

        for piece_idx in 0..piece_count {
            let swap_description = if piece_idx == 0 {
                INITIAL_LINEUP.to_string()
            } else {
                let previous = lineup.clone();
                let swaps = state.rebalance(&mut lineup, self.max_swaps_per_piece);
                trace!(piece = piece_idx + 1, swaps, "lineup rebalanced");
                describe_changes(&previous, &lineup, &request.athlete_ids)
            };

            state.record(&lineup);

            let boats = lineup
                .iter()
                .enumerate()
                .map(|(boat_idx, members)| {
                    let ids = members
                        .iter()
                        .map(|&i| request.athlete_ids[i].clone())
                        .collect();
                    Boat::new(Boat::label_for(boat_idx), ids).with_default_seats(seats, coxed)
                })
                .collect();

            pieces.push(Piece {
                piece_number: piece_idx + 1,
                boats,
                swap_description,
            });
        }

        let comparison_count = state.to_comparison_count(&request.athlete_ids);
        let statistics =
            calculate_schedule_quality(&comparison_count, &request.athlete_ids, &pieces);
        let warnings = quality_warnings(&statistics);

        debug!(
            coverage = statistics.coverage,
            balance = statistics.balance,
            warnings = warnings.len(),
            "swap schedule generated"
        );

        Ok(SwapSchedule {
            athletes: request.athlete_ids.iter().map(Athlete::new).collect(),
            boat_class: request.boat_class.clone(),
            boat_count,
            piece_count,
            pieces,
            statistics,
            warnings,
        })
    }
}

/// Generates a schedule with the default scheduler.
pub fn generate_swap_schedule(request: &SwapScheduleRequest) -> ScheduleResult<SwapSchedule> {
    MatrixScheduler::new().generate(request)
}

/// `max(3, ceil((n - 1) / (boat_count - 1)))`.
fn default_piece_count(n: usize, boat_count: usize) -> usize {
    let spread = boat_count.saturating_sub(1).max(1);
    MIN_DEFAULT_PIECES.max((n.saturating_sub(1)).div_ceil(spread))
}

/// Roster indices per boat for piece 1.
fn baseline_lineup(n: usize, seats: usize, boat_count: usize, seed: Option<u64>) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..n).collect();
    if let Some(seed) = seed {
        let mut rng = SmallRng::seed_from_u64(seed);
        order.shuffle(&mut rng);
    }

    let mut boats: Vec<Vec<usize>> = order.chunks(seats).map(<[usize]>::to_vec).collect();
    boats.resize_with(boat_count, Vec::new);
    boats
}

/// "b A->B, c B->A" style summary of athletes that changed boats.
fn describe_changes(previous: &[Vec<usize>], current: &[Vec<usize>], ids: &[String]) -> String {
    let boat_of = |lineup: &[Vec<usize>], athlete: usize| {
        lineup.iter().position(|boat| boat.contains(&athlete))
    };

    let mut moves = Vec::new();
    for (boat_idx, members) in current.iter().enumerate() {
        for &athlete in members {
            if let Some(from) = boat_of(previous, athlete).filter(|&from| from != boat_idx) {
                moves.push(format!(
                    "{} {}->{}",
                    ids[athlete],
                    Boat::label_for(from),
                    Boat::label_for(boat_idx)
                ));
            }
        }
    }

    if moves.is_empty() {
        "No changes".to_string()
    } else {
        moves.join(", ")
    }
}

/// Running comparison tally over roster indices.
struct MatrixState {
    n: usize,
    counts: Vec<u32>,
    prioritized: Vec<bool>,
}

impl MatrixState {
    fn new(n: usize, prioritized: Vec<bool>) -> Self {
        Self {
            n,
            counts: vec![0; n * n],
            prioritized,
        }
    }

    #[inline]
    fn count(&self, a: usize, b: usize) -> u32 {
        self.counts[a * self.n + b]
    }

    /// Cost of `a` and `b` sharing a boat.
    #[inline]
    fn weight(&self, a: usize, b: usize) -> f64 {
        let base = 1.0 / (1.0 + self.count(a, b) as f64).powi(2);
        if self.prioritized[a] || self.prioritized[b] {
            base * PRIORITY_WEIGHT
        } else {
            base
        }
    }

    /// Cost `athlete` would carry in `boat`, ignoring `skip`.
    fn boat_cost(&self, athlete: usize, boat: &[usize], skip: usize) -> f64 {
        boat.iter()
            .filter(|&&other| other != athlete && other != skip)
            .map(|&other| self.weight(athlete, other))
            .sum()
    }

    /// Cost change of swapping `x` (in boat `p`) with `y` (in boat `q`).
    fn swap_delta(&self, lineup: &[Vec<usize>], x: usize, p: usize, y: usize, q: usize) -> f64 {
        let before = self.boat_cost(x, &lineup[p], x) + self.boat_cost(y, &lineup[q], y);
        let after = self.boat_cost(x, &lineup[q], y) + self.boat_cost(y, &lineup[p], x);
        after - before
    }

    /// Applies improving swaps to `lineup`; returns how many were applied.
    fn rebalance(&self, lineup: &mut [Vec<usize>], max_swaps: Option<usize>) -> usize {
        let limit = max_swaps.unwrap_or(usize::MAX);
        let mut swaps = 0;

        while swaps < limit {
            let mut queue = PairQueue::new();
            for boat in lineup.iter() {
                for (i, &a) in boat.iter().enumerate() {
                    for &b in &boat[i + 1..] {
                        queue.push(PairEntry {
                            count: self.count(a, b),
                            prioritized: self.prioritized[a] || self.prioritized[b],
                            a: a.min(b),
                            b: a.max(b),
                        });
                    }
                }
            }
            if queue.is_empty() {
                break;
            }
            trace!(same_boat_pairs = queue.len(), "searching for swap");

            let mut applied = false;
            while let Some(entry) = queue.pop() {
                if let Some((x, p, y, q)) = self.best_swap(lineup, &[entry.a, entry.b]) {
                    if let (Some(xi), Some(yi)) = (
                        lineup[p].iter().position(|&m| m == x),
                        lineup[q].iter().position(|&m| m == y),
                    ) {
                        lineup[p][xi] = y;
                        lineup[q][yi] = x;
                        applied = true;
                        break;
                    }
                }
            }

            if !applied {
                break;
            }
            swaps += 1;
        }

        swaps
    }

    /// Best improving swap moving one of `candidates` to another boat.
    ///
    /// Returns `(x, boat_of_x, y, boat_of_y)`.
    fn best_swap(
        &self,
        lineup: &[Vec<usize>],
        candidates: &[usize],
    ) -> Option<(usize, usize, usize, usize)> {
        let mut best: Option<(f64, (usize, usize, usize, usize))> = None;

        for &x in candidates {
            let Some(p) = lineup.iter().position(|boat| boat.contains(&x)) else {
                continue;
            };
            for (q, boat) in lineup.iter().enumerate() {
                if q == p {
                    continue;
                }
                for &y in boat {
                    let delta = self.swap_delta(lineup, x, p, y, q);
                    if delta < -EPSILON && best.map_or(true, |(d, _)| delta < d - EPSILON) {
                        best = Some((delta, (x, p, y, q)));
                    }
                }
            }
        }

        best.map(|(_, swap)| swap)
    }

    /// Counts every cross-boat pair of a piece.
    fn record(&mut self, lineup: &[Vec<usize>]) {
        for (p, boat_a) in lineup.iter().enumerate() {
            for boat_b in &lineup[p + 1..] {
                for &a in boat_a {
                    for &b in boat_b {
                        self.counts[a * self.n + b] += 1;
                        self.counts[b * self.n + a] += 1;
                    }
                }
            }
        }
    }

    fn to_comparison_count(&self, ids: &[String]) -> ComparisonCount {
        let mut out = ComparisonCount::new();
        for a in 0..self.n {
            for b in a + 1..self.n {
                let count = self.count(a, b);
                if count > 0 {
                    out.set(PairKey::new(&ids[a], &ids[b]), count);
                }
            }
        }
        out
    }
}

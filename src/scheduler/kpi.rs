//! Schedule quality metrics.
//!
//! Computes coverage and balance from a pair → count tally.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Coverage | Pairs with count > 0 / C(n,2) |
//! | Variance | Population variance over all C(n,2) counts, absent = 0 |
//! | Balance | 1 / (1 + variance) |
//! | Mean | Sum of counts / C(n,2) |
//!
//! Only pairs drawn from the roster are counted; stray keys in the tally
//! are ignored.

use crate::models::{pair_count, ComparisonCount, Piece, ScheduleStatistics};

/// Coverage below which a schedule is flagged.
pub const MIN_COVERAGE: f64 = 0.8;
/// Balance below which a schedule is flagged.
pub const MIN_BALANCE: f64 = 0.5;

/// Computes coverage and balance statistics.
///
/// `pieces` is accepted for context weighting but does not affect the
/// coverage or variance arithmetic.
///
/// # Example
///
/// ```
/// use seatrace_schedule::models::ComparisonCount;
/// use seatrace_schedule::scheduler::calculate_schedule_quality;
///
/// let counts = ComparisonCount::new().with("a-b", 1).with("a-c", 1);
/// let stats = calculate_schedule_quality(&counts, &["a", "b", "c"], &[]);
/// assert_eq!(stats.comparisons_covered, 2);
/// assert!((stats.coverage - 2.0 / 3.0).abs() < 1e-10);
/// ```
pub fn calculate_schedule_quality<S: AsRef<str>>(
    comparison_count: &ComparisonCount,
    athlete_ids: &[S],
    _pieces: &[Piece],
) -> ScheduleStatistics {
    let total = pair_count(athlete_ids.len());
    if total == 0 {
        return ScheduleStatistics {
            balance: 1.0,
            ..ScheduleStatistics::default()
        };
    }

    let mut counts = Vec::with_capacity(total);
    for (i, a) in athlete_ids.iter().enumerate() {
        for b in &athlete_ids[i + 1..] {
            counts.push(comparison_count.get_pair(a.as_ref(), b.as_ref()) as f64);
        }
    }

    let covered = counts.iter().filter(|&&c| c > 0.0).count();
    let n = counts.len() as f64;
    let mean = counts.iter().sum::<f64>() / n;
    let variance = counts.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;

    ScheduleStatistics {
        comparisons_covered: covered,
        total_possible_comparisons: total,
        coverage: covered as f64 / total as f64,
        variance_in_comparisons: variance,
        balance: 1.0 / (1.0 + variance),
        mean_comparisons_per_pair: mean,
        is_optimal: covered == total && variance < 1.0,
    }
}

/// Human-readable warnings for a weak schedule.
pub fn quality_warnings(stats: &ScheduleStatistics) -> Vec<String> {
    let mut warnings = Vec::new();

    if stats.coverage < MIN_COVERAGE {
        warnings.push(format!(
            "Incomplete comparison coverage ({:.0}%) - add more pieces",
            stats.coverage * 100.0
        ));
    }

    if stats.balance < MIN_BALANCE {
        warnings.push(
            "Unbalanced comparisons - some pairs compared much more than others".to_string(),
        );
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABC: [&str; 3] = ["a", "b", "c"];

    #[test]
    fn test_full_coverage() {
        let counts = ComparisonCount::new()
            .with("a-b", 1)
            .with("a-c", 1)
            .with("b-c", 1);
        let stats = calculate_schedule_quality(&counts, &ABC, &[]);
        assert_eq!(stats.comparisons_covered, 3);
        assert_eq!(stats.total_possible_comparisons, 3);
        assert!((stats.coverage - 1.0).abs() < 1e-10);
        assert!(stats.is_optimal);
    }

    #[test]
    fn test_partial_coverage() {
        let counts = ComparisonCount::new().with("a-b", 1).with("a-c", 1);
        let stats = calculate_schedule_quality(&counts, &ABC, &[]);
        assert_eq!(stats.comparisons_covered, 2);
        assert!((stats.coverage - 2.0 / 3.0).abs() < 1e-3);
        assert!(!stats.is_optimal);
    }

    #[test]
    fn test_absent_pairs_count_toward_variance() {
        // counts [1, 1, 0]: mean 2/3, variance 2/9
        let counts = ComparisonCount::new().with("a-b", 1).with("a-c", 1);
        let stats = calculate_schedule_quality(&counts, &ABC, &[]);
        assert!((stats.variance_in_comparisons - 2.0 / 9.0).abs() < 1e-10);
        assert!((stats.mean_comparisons_per_pair - 2.0 / 3.0).abs() < 1e-10);
        assert!(stats.balance < 1.0);
    }

    #[test]
    fn test_even_counts_balanced() {
        let counts = ComparisonCount::new()
            .with("a-b", 2)
            .with("a-c", 2)
            .with("b-c", 2);
        let stats = calculate_schedule_quality(&counts, &ABC, &[]);
        assert!(stats.balance > 0.9);
        assert!(stats.variance_in_comparisons < 0.1);
    }

    #[test]
    fn test_coverage_ratio_exact() {
        let ids = ["a", "b", "c", "d", "e"];
        let counts = ComparisonCount::new()
            .with("a-b", 3)
            .with("c-e", 1)
            .with("b-d", 2);
        let stats = calculate_schedule_quality(&counts, &ids, &[]);
        assert_eq!(
            stats.coverage,
            stats.comparisons_covered as f64 / stats.total_possible_comparisons as f64
        );
        assert_eq!(stats.total_possible_comparisons, 10);
    }

    #[test]
    fn test_foreign_keys_ignored() {
        let counts = ComparisonCount::new().with("a-b", 1).with("x-y", 5);
        let stats = calculate_schedule_quality(&counts, &ABC, &[]);
        assert_eq!(stats.comparisons_covered, 1);
    }

    #[test]
    fn test_explicit_zero_not_covered() {
        let counts = ComparisonCount::new().with("a-b", 0).with("b-c", 1);
        let stats = calculate_schedule_quality(&counts, &ABC, &[]);
        assert_eq!(stats.comparisons_covered, 1);
    }

    #[test]
    fn test_small_roster_guarded() {
        let stats = calculate_schedule_quality(&ComparisonCount::new(), &["solo"], &[]);
        assert_eq!(stats.total_possible_comparisons, 0);
        assert_eq!(stats.coverage, 0.0);

        let empty: [&str; 0] = [];
        let stats = calculate_schedule_quality(&ComparisonCount::new(), &empty, &[]);
        assert_eq!(stats.comparisons_covered, 0);
    }

    #[test]
    fn test_warnings() {
        let low = ScheduleStatistics {
            coverage: 0.5,
            balance: 0.3,
            ..ScheduleStatistics::default()
        };
        let warnings = quality_warnings(&low);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("(50%)"));

        let good = ScheduleStatistics {
            coverage: 0.95,
            balance: 0.8,
            ..ScheduleStatistics::default()
        };
        assert!(quality_warnings(&good).is_empty());
    }
}

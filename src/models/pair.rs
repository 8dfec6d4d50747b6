//! Athlete pairs and comparison tallies.
//!
//! A pair is unordered: its canonical [`PairKey`] is the two ids sorted
//! lexicographically and joined by `-`, so `key(a, b) == key(b, a)`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::AthleteRef;

/// Canonical key of an unordered athlete pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairKey(String);

impl PairKey {
    /// Builds the key for two athlete ids.
    pub fn new(a: &str, b: &str) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Self(format!("{lo}-{hi}"))
    }

    /// Key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PairKey {
    /// Wraps an already-canonical key such as `"a-b"`.
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// Pair key for two athletes given as bare ids or records carrying one.
pub fn get_pair_key<A, B>(a: &A, b: &B) -> PairKey
where
    A: AthleteRef + ?Sized,
    B: AthleteRef + ?Sized,
{
    PairKey::new(a.athlete_id(), b.athlete_id())
}

/// All `n(n-1)/2` unordered pairs, in `(i, j)` order with `i < j`.
pub fn generate_all_pairs<T: Clone>(athletes: &[T]) -> Vec<(T, T)> {
    let mut pairs = Vec::with_capacity(athletes.len() * athletes.len().saturating_sub(1) / 2);
    for (i, a) in athletes.iter().enumerate() {
        for b in &athletes[i + 1..] {
            pairs.push((a.clone(), b.clone()));
        }
    }
    pairs
}

/// `C(n, 2)`, zero when `n < 2`.
#[inline]
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// How many times each pair has been compared.
///
/// Absent keys count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonCount {
    counts: BTreeMap<PairKey, u32>,
}

impl ComparisonCount {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for a pair key.
    pub fn get(&self, key: &PairKey) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Count for two athlete ids.
    pub fn get_pair(&self, a: &str, b: &str) -> u32 {
        self.get(&PairKey::new(a, b))
    }

    /// Records one comparison between `a` and `b`.
    pub fn increment(&mut self, a: &str, b: &str) {
        *self.counts.entry(PairKey::new(a, b)).or_insert(0) += 1;
    }

    /// Sets a pair's count directly.
    pub fn set(&mut self, key: PairKey, count: u32) {
        self.counts.insert(key, count);
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<PairKey>, count: u32) -> Self {
        self.set(key.into(), count);
        self
    }

    /// Number of keys stored (including zero entries set explicitly).
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no pair has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates stored `(key, count)` entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, u32)> {
        self.counts.iter().map(|(k, &v)| (k, v))
    }

    /// Records every cross-boat pair of one piece.
    ///
    /// Two athletes are compared when they row in different boats of the
    /// same piece.
    pub fn record_piece<S: AsRef<str>>(&mut self, boats: &[Vec<S>]) {
        for (i, boat_a) in boats.iter().enumerate() {
            for boat_b in &boats[i + 1..] {
                for a in boat_a {
                    for b in boat_b {
                        let (a, b) = (a.as_ref(), b.as_ref());
                        if a != b {
                            self.increment(a, b);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Athlete;

    #[test]
    fn test_pair_key_symmetric() {
        assert_eq!(PairKey::new("b", "a"), PairKey::new("a", "b"));
        assert_eq!(PairKey::new("b", "a").as_str(), "a-b");
    }

    #[test]
    fn test_get_pair_key_mixed_inputs() {
        let rec = Athlete::new("zed").with_name("Zed");
        assert_eq!(get_pair_key("amy", &rec).as_str(), "amy-zed");
        assert_eq!(get_pair_key(&rec, "amy"), get_pair_key("amy", "zed"));
    }

    #[test]
    fn test_generate_all_pairs_order() {
        let pairs = generate_all_pairs(&["a", "b", "c"]);
        assert_eq!(pairs, vec![("a", "b"), ("a", "c"), ("b", "c")]);
        assert!(generate_all_pairs::<&str>(&[]).is_empty());
        assert!(generate_all_pairs(&["solo"]).is_empty());
    }

    #[test]
    fn test_generate_all_pairs_count() {
        let ids: Vec<String> = (0..12).map(|i| format!("x{i}")).collect();
        assert_eq!(generate_all_pairs(&ids).len(), pair_count(12));
        assert_eq!(pair_count(12), 66);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(0), 0);
    }

    #[test]
    fn test_record_piece_counts_cross_boat_only() {
        let mut counts = ComparisonCount::new();
        counts.record_piece(&[vec!["a", "b"], vec!["c", "d"]]);

        assert_eq!(counts.len(), 4);
        assert_eq!(counts.get_pair("a", "c"), 1);
        assert_eq!(counts.get_pair("d", "b"), 1);
        assert_eq!(counts.get_pair("a", "b"), 0);
        assert_eq!(counts.get_pair("c", "d"), 0);
    }

    #[test]
    fn test_serde_transparent_map() {
        let counts = ComparisonCount::new().with("a-b", 2).with("a-c", 1);
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"a-b":2,"a-c":1}"#);
    }
}

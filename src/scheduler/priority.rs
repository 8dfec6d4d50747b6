//! Priority queue over same-boat pairs.
//!
//! Pairs sharing a boat are not compared in that piece. The queue hands
//! them out most-urgent first so the generator tries to split the
//! least-covered pairs before anything else.
//!
//! # Ordering
//! 1. Lower comparison count first.
//! 2. Pairs touching a prioritized athlete first.
//! 3. Lower athlete indices first (roster order).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A pair of roster indices sharing a boat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PairEntry {
    pub count: u32,
    pub prioritized: bool,
    pub a: usize,
    pub b: usize,
}

impl Ord for PairEntry {
    /// Greater = more urgent, so `BinaryHeap::pop` returns the next pair
    /// to split.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then(self.prioritized.cmp(&other.prioritized))
            .then(other.a.cmp(&self.a))
            .then(other.b.cmp(&self.b))
    }
}

impl PartialOrd for PairEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Max-heap of [`PairEntry`] by urgency.
#[derive(Debug, Default)]
pub(crate) struct PairQueue {
    heap: BinaryHeap<PairEntry>,
}

impl PairQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: PairEntry) {
        self.heap.push(entry);
    }

    pub fn pop(&mut self) -> Option<PairEntry> {
        self.heap.pop()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl FromIterator<PairEntry> for PairQueue {
    fn from_iter<I: IntoIterator<Item = PairEntry>>(iter: I) -> Self {
        Self {
            heap: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(count: u32, prioritized: bool, a: usize, b: usize) -> PairEntry {
        PairEntry {
            count,
            prioritized,
            a,
            b,
        }
    }

    #[test]
    fn test_lowest_count_first() {
        let mut q: PairQueue = [entry(3, false, 0, 1), entry(0, false, 4, 5), entry(1, false, 2, 3)]
            .into_iter()
            .collect();
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop().map(|e| e.count), Some(0));
        assert_eq!(q.pop().map(|e| e.count), Some(1));
        assert_eq!(q.pop().map(|e| e.count), Some(3));
        assert!(q.is_empty());
    }

    #[test]
    fn test_prioritized_breaks_count_ties() {
        let mut q = PairQueue::new();
        q.push(entry(1, false, 0, 1));
        q.push(entry(1, true, 6, 7));
        assert_eq!(q.pop().map(|e| e.a), Some(6));
    }

    #[test]
    fn test_roster_order_breaks_remaining_ties() {
        let mut q = PairQueue::new();
        q.push(entry(0, false, 2, 3));
        q.push(entry(0, false, 0, 5));
        q.push(entry(0, false, 0, 4));
        assert_eq!(q.pop().map(|e| (e.a, e.b)), Some((0, 4)));
        assert_eq!(q.pop().map(|e| (e.a, e.b)), Some((0, 5)));
        assert_eq!(q.pop().map(|e| (e.a, e.b)), Some((2, 3)));
    }
}

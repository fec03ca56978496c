//! Bounded heap for tracking the K largest posting lists.
//!
//! Holds at most K candidates, so selecting over N lists costs O(N log K)
//! time and O(K) memory.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::base::TermId;

/// A posting list reduced to its size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSize {
    pub term: TermId,
    pub size: u32,
}

impl std::fmt::Display for ListSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.term, self.size)
    }
}

/// Heap entry ordered by size, then by reverse arrival order
///
/// The minimum is the smallest size and, among equal sizes, the candidate
/// that arrived last.
#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    size: u32,
    arrival: Reverse<u64>,
    term: TermId,
}

/// A bounded min-heap that keeps track of the top-K largest lists.
///
/// Earlier candidates win ties: an equal-sized candidate never evicts a
/// held one.
pub struct TopKHeap {
    /// Min-heap storing the candidates (using Reverse for min-heap behavior)
    heap: BinaryHeap<Reverse<Candidate>>,
    /// Maximum size of the heap
    max_size: usize,
    /// Number of candidates pushed so far
    arrivals: u64,
    /// Largest number of candidates held at once
    peak: usize,
}

impl TopKHeap {
    /// Creates a new TopKHeap with a specific capacity.
    pub fn with_capacity(max_size: usize) -> Self {
        Self::new(max_size, max_size)
    }

    /// Creates a heap holding up to `max_size` candidates, with room
    /// reserved for `capacity` of them
    pub fn new(max_size: usize, capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity.min(max_size)),
            max_size,
            arrivals: 0,
            peak: 0,
        }
    }

    /// Pushes a candidate into the heap, returns true if it is kept
    ///
    /// If the heap is at capacity, only keeps the candidate if it's larger
    /// than the current minimum.
    #[inline]
    pub fn push(&mut self, term: TermId, size: u32) -> bool {
        let candidate = Candidate {
            size,
            arrival: Reverse(self.arrivals),
            term,
        };
        self.arrivals += 1;

        let kept = if self.heap.len() < self.max_size {
            self.heap.push(Reverse(candidate));
            true
        } else if let Some(Reverse(min)) = self.heap.peek() {
            if size > min.size {
                self.heap.pop();
                self.heap.push(Reverse(candidate));
                true
            } else {
                false
            }
        } else {
            false
        };

        self.peak = self.peak.max(self.heap.len());
        kept
    }

    /// Smallest size held, if any
    pub fn min_size(&self) -> Option<u32> {
        self.heap.peek().map(|r| r.0.size)
    }

    /// Returns the number of candidates currently in the heap.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest number of candidates held since creation
    pub fn peak(&self) -> usize {
        self.peak
    }

    /// Returns the candidates by descending size, then arrival order
    pub fn into_sorted_vec(self) -> Vec<ListSize> {
        // Ascending order of Reverse<Candidate> is descending candidates
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(c)| ListSize {
                term: c.term,
                size: c.size,
            })
            .collect()
    }
}

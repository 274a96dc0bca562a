//! Tour representation and the result of an optimization run.

use crate::matrix::DistanceMatrix;
use serde::Serialize;

/// A cyclic route visiting every location exactly once.
///
/// The successor of the last position wraps around to the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tour(Vec<usize>);

impl Tour {
    /// The identity tour `[0, 1, ..., n-1]`.
    pub fn identity(n: usize) -> Self {
        Tour((0..n).collect())
    }

    /// Wrap an existing visiting order. The order is not validated;
    /// see [`Tour::is_permutation`].
    pub fn from_vec(order: Vec<usize>) -> Self {
        Tour(order)
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }

    /// Location visited at position `pos`.
    #[inline]
    pub fn at(&self, pos: usize) -> usize {
        self.0[pos]
    }

    /// Check that every location `0..len` appears exactly once.
    pub fn is_permutation(&self) -> bool {
        let n = self.0.len();
        let mut seen = vec![false; n];
        for &location in &self.0 {
            if location >= n || seen[location] {
                return false;
            }
            seen[location] = true;
        }
        true
    }

    /// Reverse positions `start..=end` in place.
    pub fn reverse_segment(&mut self, start: usize, end: usize) {
        debug_assert!(end < self.0.len());
        let (mut lo, mut hi) = (start, end);
        while lo < hi {
            self.0.swap(lo, hi);
            lo += 1;
            hi -= 1;
        }
    }

    /// Total length of the closed tour.
    pub fn length(&self, matrix: &DistanceMatrix) -> f64 {
        matrix.tour_length(&self.0)
    }
}

impl std::fmt::Display for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, location) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", location)?;
        }
        Ok(())
    }
}

/// Outcome of one optimization run.
///
/// Converged and capped runs produce the same shape; the caller cannot tell
/// them apart from the result alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    /// Final tour
    pub tour: Tour,
    /// Sum of all applied move deltas (zero or negative)
    pub total_improvement: f64,
    /// Number of improving moves applied
    pub iterations: usize,
}

impl RunResult {
    /// Distance saved by the run, reported as a positive number.
    pub fn distance_saved(&self) -> f64 {
        // Subtraction keeps a run without moves at +0.0 instead of -0.0.
        0.0 - self.total_improvement
    }
}

impl std::fmt::Display for RunResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Optimized tour: {}", self.tour)?;
        writeln!(f, "Total improvement: {:.6}", self.distance_saved())?;
        write!(f, "Iterations: {}", self.iterations)
    }
}

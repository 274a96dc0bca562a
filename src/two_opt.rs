//! First-improvement 2-opt local search.
//!
//! A 2-opt move removes the edges `(t[i], t[i+1])` and `(t[j], t[j+1])` and
//! reconnects the tour as `(t[i], t[j])` and `(t[i+1], t[j+1])`, which
//! amounts to reversing positions `i+1..=j`:
//!
//! ```text
//! delta = d(t[i], t[j]) + d(t[i+1], t[j+1]) - d(t[i], t[i+1]) - d(t[j], t[j+1])
//! ```
//!
//! Candidate pairs are scanned by increasing `i`, then increasing `j`, and
//! the first move with `delta < -IMPROVEMENT_EPSILON` is applied at once.
//! The optimization loop repeats this from the identity tour until no
//! improving move remains or [`MAX_ITERATIONS`] moves have been applied.

use crate::matrix::DistanceMatrix;
use crate::tour::{RunResult, Tour};

/// A move is accepted only if it shortens the tour by more than this.
pub const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// Upper bound on the number of moves applied in one run.
pub const MAX_ITERATIONS: usize = 10_000;

/// Find and apply the first improving 2-opt move.
///
/// Returns the (negative) length change of the applied move, or exactly
/// `0.0` if the tour is already 2-opt optimal, in which case the tour is left
/// untouched.
///
/// `matrix` must cover every location in `tour`.
pub fn two_opt_move(tour: &mut Tour, matrix: &DistanceMatrix) -> f64 {
    let n = tour.len();
    debug_assert!(n <= matrix.size(), "tour longer than the distance matrix");

    for i in 0..n.saturating_sub(1) {
        let a = tour.at(i);
        let b = tour.at(i + 1);
        let d_ab = matrix.distance(a, b);

        for j in i + 2..n {
            let c = tour.at(j);
            let d = tour.at((j + 1) % n);

            let change = -d_ab - matrix.distance(c, d) + matrix.distance(a, c) + matrix.distance(b, d);

            if change < -IMPROVEMENT_EPSILON {
                tour.reverse_segment(i + 1, j);
                log::trace!("2-opt move i={} j={} delta={:.6}", i, j, change);
                return change;
            }
        }
    }

    0.0
}

/// Run 2-opt from the identity tour until convergence or [`MAX_ITERATIONS`].
pub fn optimize_tour(matrix: &DistanceMatrix) -> RunResult {
    optimize_tour_until(matrix, |_| false)
}

/// Same as [`optimize_tour`], but `should_stop` is consulted before every
/// move evaluation with the number of moves applied so far. Returning `true`
/// ends the run with the tour as it stands.
pub fn optimize_tour_until<F>(matrix: &DistanceMatrix, mut should_stop: F) -> RunResult
where
    F: FnMut(usize) -> bool,
{
    let mut tour = Tour::identity(matrix.size());
    let mut total_improvement = 0.0;
    let mut iterations = 0;

    while iterations < MAX_ITERATIONS {
        if should_stop(iterations) {
            log::debug!("2-opt stopped by caller after {} iterations", iterations);
            break;
        }

        let delta = two_opt_move(&mut tour, matrix);
        if delta >= 0.0 {
            log::debug!(
                "2-opt converged after {} iterations (improvement {:.6})",
                iterations,
                -total_improvement
            );
            break;
        }

        total_improvement += delta;
        iterations += 1;
    }

    if iterations == MAX_ITERATIONS {
        log::warn!("2-opt reached the iteration cap of {}", MAX_ITERATIONS);
    }

    RunResult {
        tour,
        total_improvement,
        iterations,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn random_matrix() -> impl Strategy<Value = DistanceMatrix> {
        (2usize..12).prop_flat_map(|n| {
            prop::collection::vec((0.0f64..100.0, 0.0f64..100.0), n)
                .prop_map(|points| DistanceMatrix::from_points(&points))
        })
    }

    proptest! {
        /// Property: every applied move keeps the tour a permutation and
        /// returns a strictly negative delta that matches the length change.
        #[test]
        fn prop_moves_preserve_permutation(matrix in random_matrix()) {
            let mut tour = Tour::identity(matrix.size());
            let mut length = tour.length(&matrix);

            for _ in 0..MAX_ITERATIONS {
                let delta = two_opt_move(&mut tour, &matrix);
                prop_assert!(tour.is_permutation());
                prop_assert_eq!(tour.len(), matrix.size());
                if delta == 0.0 {
                    break;
                }
                prop_assert!(delta < -IMPROVEMENT_EPSILON);

                let new_length = tour.length(&matrix);
                prop_assert!((length + delta - new_length).abs() < 1e-6);
                length = new_length;
            }
        }

        /// Property: the loop result is a permutation, never worse than the
        /// identity tour, and locally optimal when it converged.
        #[test]
        fn prop_optimize_converges_to_local_optimum(matrix in random_matrix()) {
            let identity_length = matrix.tour_length(&Tour::identity(matrix.size()).into_vec());
            let mut result = optimize_tour(&matrix);

            prop_assert!(result.tour.is_permutation());
            prop_assert!(result.total_improvement <= 0.0);
            prop_assert_eq!(result.total_improvement == 0.0, result.iterations == 0);
            prop_assert!(
                (identity_length - result.tour.length(&matrix) - result.distance_saved()).abs() < 1e-6
            );

            if result.iterations < MAX_ITERATIONS {
                prop_assert_eq!(two_opt_move(&mut result.tour, &matrix), 0.0);
            }
        }

        /// Property: identical inputs give identical results.
        #[test]
        fn prop_deterministic(matrix in random_matrix()) {
            prop_assert_eq!(optimize_tour(&matrix), optimize_tour(&matrix));
        }
    }
}

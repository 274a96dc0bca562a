//! Random Euclidean instances for experiments.
//!
//! Points are drawn uniformly from the square [0, 100) x [0, 100) with a
//! seeded ChaCha8 generator, so the same seed always yields the same matrix.

use crate::matrix::DistanceMatrix;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Side length of the square the points are drawn from.
pub const COORDINATE_RANGE: f64 = 100.0;

/// Draw `n` random points.
pub fn generate_points(n: usize, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let x = rng.gen_range(0.0..COORDINATE_RANGE);
            let y = rng.gen_range(0.0..COORDINATE_RANGE);
            (x, y)
        })
        .collect()
}

/// Euclidean distance matrix over `n` random points.
pub fn generate_matrix(n: usize, seed: u64) -> DistanceMatrix {
    let points = generate_points(n, seed);
    log::debug!("Generated {} random points (seed {})", n, seed);
    DistanceMatrix::from_points(&points)
}

//! 2-opt TSP Library
//!
//! Approximate solutions to the symmetric Traveling Salesman Problem with
//! first-improvement 2-opt local search over a dense distance matrix.
//!
//! # Features
//!
//! - Plain-text distance matrix loader and writer
//! - First-improvement 2-opt with in-place segment reversal
//! - Benchmark harness with sequential or parallel repetitions
//! - Seeded random Euclidean instance generator
//!
//! # Example
//!
//! ```no_run
//! use two_opt_tsp::matrix::DistanceMatrix;
//! use two_opt_tsp::two_opt::optimize_tour;
//!
//! let matrix = DistanceMatrix::from_file("distances.txt").unwrap();
//! let result = optimize_tour(&matrix);
//!
//! println!("{}", result);
//! ```

pub mod error;
pub mod matrix;
pub mod tour;
pub mod two_opt;
pub mod benchmark;
pub mod generator;

pub use error::{Result, TspError};
pub use matrix::DistanceMatrix;
pub use tour::{RunResult, Tour};
pub use two_opt::{optimize_tour, two_opt_move};

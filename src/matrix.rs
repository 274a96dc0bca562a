//! Dense distance matrices and their plain-text format.
//!
//! The text format is the one produced by the instance generator: the first
//! line holds the number of locations `n`, followed by `n` lines of `n`
//! whitespace-separated real numbers.
//!
//! ```text
//! 3
//! 0 2.5 4
//! 2.5 0 1
//! 4 1 0
//! ```

use crate::error::{Result, TspError};
use serde::Serialize;
use std::path::Path;
use std::str::FromStr;

/// A dense n×n distance matrix stored in row-major order.
///
/// Symmetry is expected but never enforced: lookups always go in the
/// direction the caller asks for.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Build a matrix from explicit rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(TspError::InvalidDimension { value: "0".to_string() });
        }

        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(TspError::RowLength {
                    row,
                    expected: size,
                    found: values.len(),
                });
            }
            for (column, value) in values.into_iter().enumerate() {
                check_distance(row, column, value)?;
                data.push(value);
            }
        }

        Ok(DistanceMatrix { data, size })
    }

    /// Compute a Euclidean distance matrix from 2D coordinates.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let mut data = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let dx = points[i].0 - points[j].0;
                    let dy = points[i].1 - points[j].1;
                    data[i * n + j] = (dx * dx + dy * dy).sqrt();
                }
            }
        }

        DistanceMatrix { data, size: n }
    }

    /// Load a matrix from a text file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TspError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let matrix: DistanceMatrix = text.parse()?;
        log::info!("Loaded {}x{} distance matrix from {:?}", matrix.size, matrix.size, path);
        Ok(matrix)
    }

    /// Number of locations.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from location `from` to location `to`.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Distances leaving location `from`.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Returns `true` if the matrix is symmetric within `tolerance`.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        for i in 0..self.size {
            for j in i + 1..self.size {
                if (self.distance(i, j) - self.distance(j, i)).abs() > tolerance {
                    return false;
                }
            }
        }
        true
    }

    /// Length of the closed cycle visiting `tour` in order and returning to its start.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        if tour.len() < 2 {
            return 0.0;
        }

        let mut length = 0.0;
        for i in 0..tour.len() - 1 {
            length += self.distance(tour[i], tour[i + 1]);
        }

        length += self.distance(tour[tour.len() - 1], tour[0]);

        length
    }

    /// Render the matrix in the text format accepted by [`DistanceMatrix::from_str`].
    pub fn to_text(&self) -> String {
        let mut text = format!("{}\n", self.size);
        for i in 0..self.size {
            let row: Vec<String> = self.row(i).iter().map(|d| d.to_string()).collect();
            text.push_str(&row.join(" "));
            text.push('\n');
        }
        text
    }

    /// Write the matrix to `path` in the text format.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_text())?;
        Ok(())
    }

    /// Summary statistics over the off-diagonal entries.
    pub fn statistics(&self) -> MatrixStatistics {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min_distance = f64::INFINITY;
        let mut max_distance = 0.0f64;

        for i in 0..self.size {
            for j in 0..self.size {
                if i == j {
                    continue;
                }
                let d = self.distance(i, j);
                count += 1;
                sum += d;
                min_distance = min_distance.min(d);
                max_distance = max_distance.max(d);
            }
        }

        if count == 0 {
            min_distance = 0.0;
        }

        MatrixStatistics {
            size: self.size,
            symmetric: self.is_symmetric(1e-9),
            min_distance,
            avg_distance: if count == 0 { 0.0 } else { sum / count as f64 },
            max_distance,
        }
    }
}

impl FromStr for DistanceMatrix {
    type Err = TspError;

    fn from_str(text: &str) -> Result<Self> {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

        let header = lines.next().ok_or(TspError::EmptyInput)?;
        let size = header
            .parse::<usize>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| TspError::InvalidDimension { value: header.to_string() })?;

        let mut data = Vec::with_capacity(size * size);

        for row in 0..size {
            let line = lines
                .next()
                .ok_or(TspError::MissingRow { row, expected: size })?;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != size {
                return Err(TspError::RowLength {
                    row,
                    expected: size,
                    found: tokens.len(),
                });
            }

            for (column, token) in tokens.into_iter().enumerate() {
                let value: f64 = token.parse().map_err(|_| TspError::InvalidNumber {
                    row,
                    column,
                    value: token.to_string(),
                })?;
                check_distance(row, column, value)?;
                data.push(value);
            }
        }

        Ok(DistanceMatrix { data, size })
    }
}

fn check_distance(row: usize, column: usize, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TspError::InvalidDistance { row, column, value })
    }
}

/// Statistics about a distance matrix
#[derive(Debug, Clone, Serialize)]
pub struct MatrixStatistics {
    pub size: usize,
    pub symmetric: bool,
    pub min_distance: f64,
    pub avg_distance: f64,
    pub max_distance: f64,
}

impl std::fmt::Display for MatrixStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Distance matrix: {}x{}", self.size, self.size)?;
        writeln!(f, "  Symmetric: {}", self.symmetric)?;
        writeln!(f, "  Min distance: {:.2}", self.min_distance)?;
        writeln!(f, "  Avg distance: {:.2}", self.avg_distance)?;
        write!(f, "  Max distance: {:.2}", self.max_distance)
    }
}

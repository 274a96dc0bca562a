//! Benchmark harness around the 2-opt optimizer.
//!
//! Runs the optimization loop repeatedly against one distance matrix,
//! measures the wall-clock time of every run and reports the average.
//! The algorithm is deterministic, so only the first run's result is kept
//! for reporting.

use crate::error::Result;
use crate::matrix::{DistanceMatrix, MatrixStatistics};
use crate::tour::RunResult;
use crate::two_opt::optimize_tour;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::path::Path;
use std::time::Instant;

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Number of optimization runs (at least one is always performed)
    pub num_runs: usize,
    /// Run the repetitions on the rayon thread pool
    pub parallel: bool,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        BenchmarkConfig {
            num_runs: 10,
            parallel: false,
            show_progress: false,
        }
    }
}

/// Timing of a single run
#[derive(Debug, Clone, Serialize)]
pub struct RunTiming {
    /// Run index, starting at 0
    pub run: usize,
    /// Wall-clock duration in seconds
    pub seconds: f64,
    /// Moves applied during the run
    pub iterations: usize,
    /// Distance saved by the run
    pub distance_saved: f64,
}

/// Aggregated timing statistics
#[derive(Debug, Clone, Serialize)]
pub struct TimingStatistics {
    pub runs: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Everything a benchmark produced
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    /// Local start time (RFC 3339)
    pub started_at: String,
    pub matrix_size: usize,
    /// Summary of the distances the runs were performed on
    pub matrix: MatrixStatistics,
    pub parallel: bool,
    /// Result of the first run
    pub first: RunResult,
    pub timings: Vec<RunTiming>,
}

/// Benchmarking engine
pub struct Benchmark {
    config: BenchmarkConfig,
}

impl Benchmark {
    pub fn new(config: BenchmarkConfig) -> Self {
        Benchmark { config }
    }

    /// Run the optimizer `num_runs` times on `matrix`.
    pub fn run(&self, matrix: &DistanceMatrix) -> BenchmarkReport {
        let num_runs = self.config.num_runs.max(1);
        let started_at = chrono::Local::now().to_rfc3339();
        log::info!(
            "Running {} optimization runs on a {}x{} matrix{}",
            num_runs,
            matrix.size(),
            matrix.size(),
            if self.config.parallel { " in parallel" } else { "" }
        );

        let progress = self.progress_bar(num_runs);

        // Indexed parallel iterators collect in run order.
        let outcomes: Vec<(RunTiming, RunResult)> = if self.config.parallel {
            (0..num_runs)
                .into_par_iter()
                .map(|run| {
                    let outcome = timed_run(matrix, run);
                    progress.inc(1);
                    outcome
                })
                .collect()
        } else {
            (0..num_runs)
                .map(|run| {
                    let outcome = timed_run(matrix, run);
                    progress.inc(1);
                    outcome
                })
                .collect()
        };

        progress.finish_and_clear();

        let (timings, mut results): (Vec<RunTiming>, Vec<RunResult>) = outcomes.into_iter().unzip();
        let first = results.swap_remove(0);

        BenchmarkReport {
            started_at,
            matrix_size: matrix.size(),
            matrix: matrix.statistics(),
            parallel: self.config.parallel,
            first,
            timings,
        }
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(len as u64);
        let style = ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} runs")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar
    }
}

fn timed_run(matrix: &DistanceMatrix, run: usize) -> (RunTiming, RunResult) {
    let start = Instant::now();
    let result = optimize_tour(matrix);
    let seconds = start.elapsed().as_secs_f64();

    log::debug!("Run {} finished in {:.6}s ({} iterations)", run, seconds, result.iterations);

    let timing = RunTiming {
        run,
        seconds,
        iterations: result.iterations,
        distance_saved: result.distance_saved(),
    };
    (timing, result)
}

impl BenchmarkReport {
    /// Mean wall-clock time per run, in seconds.
    pub fn average_time(&self) -> f64 {
        if self.timings.is_empty() {
            return 0.0;
        }
        self.timings.iter().map(|t| t.seconds).sum::<f64>() / self.timings.len() as f64
    }

    pub fn timing_statistics(&self) -> TimingStatistics {
        let seconds: Vec<f64> = self.timings.iter().map(|t| t.seconds).collect();

        if seconds.is_empty() {
            return TimingStatistics { runs: 0, mean: 0.0, std_dev: 0.0, min: 0.0, max: 0.0 };
        }

        let std_dev = if seconds.len() < 2 { 0.0 } else { seconds.iter().std_dev() };

        TimingStatistics {
            runs: seconds.len(),
            mean: seconds.iter().mean(),
            std_dev,
            min: seconds.iter().cloned().fold(f64::INFINITY, f64::min),
            max: seconds.iter().cloned().fold(0.0, f64::max),
        }
    }

    /// Human-readable summary of the timings.
    pub fn summary(&self) -> String {
        let stats = self.timing_statistics();
        let mut summary = String::new();

        summary.push_str(&format!("Benchmark started at {}\n", self.started_at));
        summary.push_str(&format!(
            "Runs: {} ({})\n",
            stats.runs,
            if self.parallel { "parallel" } else { "sequential" }
        ));
        summary.push_str(&format!(
            "Time per run: mean {:.6}s, std-dev {:.6}s, min {:.6}s, max {:.6}s",
            stats.mean, stats.std_dev, stats.min, stats.max
        ));

        summary
    }

    /// Export one CSV row per run.
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;

        for timing in &self.timings {
            writer.serialize(timing)?;
        }

        writer.flush()?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_matrix;
    use crate::tour::Tour;

    fn report_with_times(times: &[f64]) -> BenchmarkReport {
        BenchmarkReport {
            started_at: "2024-01-01T00:00:00+00:00".to_string(),
            matrix_size: 2,
            matrix: DistanceMatrix::from_rows(vec![vec![0.0, 5.0], vec![5.0, 0.0]])
                .unwrap()
                .statistics(),
            parallel: false,
            first: RunResult {
                tour: Tour::identity(2),
                total_improvement: 0.0,
                iterations: 0,
            },
            timings: times
                .iter()
                .enumerate()
                .map(|(run, &seconds)| RunTiming { run, seconds, iterations: 0, distance_saved: 0.0 })
                .collect(),
        }
    }

    #[test]
    fn test_benchmark_config() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.num_runs, 10);
        assert!(!config.parallel);
    }

    #[test]
    fn test_sequential_runs() {
        let matrix = generate_matrix(25, 5);
        let benchmark = Benchmark::new(BenchmarkConfig { num_runs: 3, ..Default::default() });

        let report = benchmark.run(&matrix);

        assert_eq!(report.matrix_size, 25);
        assert!(report.matrix.symmetric);
        assert_eq!(report.matrix.size, 25);
        assert_eq!(report.timings.len(), 3);
        assert_eq!(report.first, optimize_tour(&matrix));
        let runs: Vec<usize> = report.timings.iter().map(|t| t.run).collect();
        assert_eq!(runs, vec![0, 1, 2]);
        assert!(report
            .timings
            .iter()
            .all(|t| t.iterations == report.first.iterations && t.seconds >= 0.0));
    }

    #[test]
    fn test_parallel_runs_match_sequential() {
        let matrix = generate_matrix(25, 9);
        let config = BenchmarkConfig { num_runs: 4, parallel: true, ..Default::default() };

        let report = Benchmark::new(config).run(&matrix);

        assert!(report.parallel);
        assert_eq!(report.timings.len(), 4);
        assert_eq!(report.first, optimize_tour(&matrix));
        let runs: Vec<usize> = report.timings.iter().map(|t| t.run).collect();
        assert_eq!(runs, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_zero_runs_still_runs_once() {
        let matrix = generate_matrix(5, 1);
        let report = Benchmark::new(BenchmarkConfig { num_runs: 0, ..Default::default() }).run(&matrix);
        assert_eq!(report.timings.len(), 1);
    }

    #[test]
    fn test_timing_statistics() {
        let report = report_with_times(&[1.0, 2.0, 3.0]);
        let stats = report.timing_statistics();

        assert_eq!(stats.runs, 3);
        assert!((stats.mean - 2.0).abs() < 1e-12);
        assert!((stats.std_dev - 1.0).abs() < 1e-12);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert!((report.average_time() - 2.0).abs() < 1e-12);

        let single = report_with_times(&[0.5]).timing_statistics();
        assert_eq!(single.std_dev, 0.0);
        assert!(report.summary().contains("Runs: 3 (sequential)"));
    }

    #[test]
    fn test_export_to_csv() {
        let report = report_with_times(&[0.25, 0.5]);
        let path = std::env::temp_dir().join(format!("two-opt-bench-{}.csv", std::process::id()));

        report.export_to_csv(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("run,seconds,iterations,distance_saved"));
        assert_eq!(lines.next(), Some("0,0.25,0,0.0"));
        assert_eq!(lines.next(), Some("1,0.5,0,0.0"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_to_json() {
        let json = report_with_times(&[0.1]).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["matrix_size"], 2);
        assert_eq!(value["matrix"]["symmetric"], true);
        assert_eq!(value["matrix"]["max_distance"], 5.0);
        assert_eq!(value["first"]["tour"], serde_json::json!([0, 1]));
        assert_eq!(value["timings"].as_array().map(|t| t.len()), Some(1));
    }
}

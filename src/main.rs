//! 2-opt TSP - Command Line Interface
//!
//! Loads a distance matrix, runs the 2-opt optimizer several times and
//! reports the first run together with the average running time.

use clap::Parser;
use two_opt_tsp::benchmark::{Benchmark, BenchmarkConfig, BenchmarkReport};
use two_opt_tsp::matrix::DistanceMatrix;

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "two-opt-tsp")]
#[command(author = "M2 AI2D Student")]
#[command(version = "1.0")]
#[command(about = "Improve a TSP tour with first-improvement 2-opt local search")]
struct Cli {
    /// Distance matrix file: the number of locations n on the first line,
    /// then n lines of n space-separated distances
    #[arg(value_name = "FILENAME")]
    filename: PathBuf,

    /// Number of timed optimization runs
    #[arg(short, long, default_value = "10")]
    runs: usize,

    /// Spread the runs over all cores
    #[arg(long)]
    parallel: bool,

    /// Show a progress bar
    #[arg(long)]
    progress: bool,

    /// Write per-run timings to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the full report to a JSON file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let matrix = match DistanceMatrix::from_file(&cli.filename) {
        Ok(matrix) => matrix,
        Err(e) => {
            eprintln!("Error loading distance matrix: {}", e);
            std::process::exit(1);
        }
    };

    if cli.verbose {
        println!("{}\n", matrix.statistics());
    }

    if !matrix.is_symmetric(1e-9) {
        log::warn!("Distance matrix is not symmetric; 2-opt deltas assume symmetric distances");
    }

    let config = BenchmarkConfig {
        num_runs: cli.runs,
        parallel: cli.parallel,
        show_progress: cli.progress,
    };

    let report = Benchmark::new(config).run(&matrix);

    println!("{}", render(&report));

    if cli.verbose {
        println!("\n{}", report.summary());
    }

    if let Err(e) = export(&report, cli.csv, cli.json) {
        eprintln!("Export failed: {}", e);
        std::process::exit(1);
    }
}

/// First run followed by the average running time.
fn render(report: &BenchmarkReport) -> String {
    format!("{}\nAverage time spent: {:.6} seconds", report.first, report.average_time())
}

fn export(
    report: &BenchmarkReport,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
) -> two_opt_tsp::Result<()> {
    if let Some(path) = csv {
        report.export_to_csv(&path)?;
        println!("Timings exported to {:?}", path);
    }

    if let Some(path) = json {
        std::fs::write(&path, report.to_json()?)?;
        println!("Report saved to {:?}", path);
    }

    Ok(())
}

use clap::Parser;
use std::path::PathBuf;
use two_opt_tsp::generator::generate_matrix;

/// Generate a random Euclidean distance matrix for the 2-opt solver
#[derive(Parser)]
#[command(name = "generate_matrix")]
#[command(version = "1.0")]
struct Args {
    /// Number of locations (at least 2)
    #[arg(value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(2..))]
    nodes: usize,

    /// Output file
    output: PathBuf,

    /// Random seed (drawn at random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Generating {} locations with seed {}", args.nodes, seed);

    let matrix = generate_matrix(args.nodes, seed);
    if let Err(e) = matrix.write_to_file(&args.output) {
        eprintln!("Failed to write {:?}: {}", args.output, e);
        std::process::exit(1);
    }

    println!("Wrote {}x{} distance matrix to {:?} (seed {})", args.nodes, args.nodes, args.output, seed);
}

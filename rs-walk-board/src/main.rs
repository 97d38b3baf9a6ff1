mod board;

use std::error::Error;

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_walk_core::chain::markov_chain::MarkovChain;

use crate::board::{CellOps, fill_chain};

/// Maximum number of cells printed for one walk.
const MAX_GENERATION_LENGTH: usize = 60;

#[derive(Parser, Debug)]
#[command(name = "rs-walk-board")]
#[command(about = "Random walks over a snakes-and-ladders board")]
struct Cli {
	/// Seed for the random generator.
	seed: u64,
	/// Number of walks to run.
	walk_count: usize,
}

fn main() -> Result<(), Box<dyn Error>> {
	env_logger::init();
	let cli = Cli::parse();

	let mut chain = MarkovChain::new(CellOps);
	let start = fill_chain(&mut chain)?;
	info!("board graph ready, {} cells", chain.len());

	let mut rng = StdRng::seed_from_u64(cli.seed);
	for i in 1..=cli.walk_count {
		print!("Random Walk {i}: ");
		// The start cell counts toward the cap, hence one fewer advance.
		chain.generate_sequence(Some(start), MAX_GENERATION_LENGTH - 1, &mut rng)?;
		println!();
	}

	Ok(())
}

mod corpus;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_walk_core::chain::error::ChainError;
use rs_walk_core::chain::markov_chain::MarkovChain;

use crate::corpus::{TokenOps, fill_chain, read_file};

/// Maximum number of words in one generated tweet.
const MAX_WORDS_IN_TWEET: usize = 20;

#[derive(Parser, Debug)]
#[command(name = "rs-walk-tweets")]
#[command(about = "Generate tweets by random-walking a word-transition graph")]
struct Cli {
	/// Seed for the random generator.
	seed: u64,
	/// Number of tweets to generate.
	tweet_count: usize,
	/// Path of the corpus file.
	corpus: PathBuf,
	/// Number of words to read from the corpus (all of them if omitted).
	words_to_read: Option<usize>,
}

fn main() -> Result<(), Box<dyn Error>> {
	env_logger::init();
	let cli = Cli::parse();

	let lines = read_file(&cli.corpus)
		.map_err(|e| format!("cannot read {}: {e}", cli.corpus.display()))?;

	let mut chain = MarkovChain::new(TokenOps);
	let read = fill_chain(&lines, cli.words_to_read, &mut chain)?;
	info!("read {} words, {} distinct", read, chain.len());

	let mut rng = StdRng::seed_from_u64(cli.seed);
	write_tweets(&chain, cli.tweet_count, &mut rng)?;

	Ok(())
}

/// Writes `count` tweets to stdout.
///
/// Each tweet starts from a uniformly drawn non-terminal word and walks the
/// graph until a terminal word or the word cap. A word with no recorded
/// follower ends the tweet early.
fn write_tweets<R: Rng>(
	chain: &MarkovChain<TokenOps>,
	count: usize,
	rng: &mut R,
) -> Result<(), Box<dyn Error>> {
	let has_start = (0..chain.len())
		.filter_map(|ordinal| chain.node_at(ordinal))
		.any(|id| !chain.is_terminal(id));
	if !has_start {
		return Err("corpus has no non-terminal word to start from".into());
	}

	for i in 1..=count {
		// Terminal words never start a tweet; reject and redraw.
		let mut word = chain.pick_uniform(rng)?;
		while chain.is_terminal(word) {
			word = chain.pick_uniform(rng)?;
		}

		print!("Tweet {i}: {}", chain.item(word));
		let mut written = 1;
		while !chain.is_terminal(word) && written < MAX_WORDS_IN_TWEET {
			word = match chain.advance(word, rng) {
				Ok(next) => next,
				Err(ChainError::DeadEnd) => break,
				Err(e) => return Err(e.into()),
			};
			print!(" {}", chain.item(word));
			written += 1;
		}
		println!();
	}

	Ok(())
}

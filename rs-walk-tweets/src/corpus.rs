use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::io;

use rs_walk_core::chain::error::ChainError;
use rs_walk_core::chain::item_ops::ItemOps;
use rs_walk_core::chain::markov_chain::MarkovChain;
use rs_walk_core::chain::node::NodeId;

/// Capability set for whitespace-delimited corpus tokens.
///
/// Equality is exact text match; a token is terminal when its last
/// character is `.` (end of sentence).
pub struct TokenOps;

impl ItemOps for TokenOps {
	type Item = String;

	fn equal(&self, a: &String, b: &String) -> bool {
		a == b
	}

	fn duplicate(&self, value: &String) -> Result<String, ChainError> {
		Ok(value.clone())
	}

	fn destroy(&self, value: String) {
		drop(value);
	}

	fn emit(&self, value: &String) {
		println!("{value}");
	}

	fn is_terminal(&self, value: &String) -> bool {
		value.ends_with('.')
	}
}

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Feeds corpus lines into the chain.
///
/// Every whitespace-delimited token is registered, and a transition from
/// the previous token to the current one is recorded. No transition is
/// recorded across a terminal token (sentences do not chain into each
/// other) or before the first token, where there is no previous token yet.
///
/// Ingestion stops once `word_budget` tokens have been read, if a budget
/// is given.
///
/// # Returns
/// The number of tokens read.
///
/// # Errors
/// Propagates allocation failures from the chain; the build is expected to
/// abort on the first one.
pub fn fill_chain(
	lines: &[String],
	word_budget: Option<usize>,
	chain: &mut MarkovChain<TokenOps>,
) -> Result<usize, ChainError> {
	let mut prev: Option<NodeId> = None;
	let mut read = 0usize;

	'lines: for line in lines {
		for token in line.split_whitespace() {
			let current = chain.add_or_get(&token.to_owned())?;
			if let Some(previous) = prev {
				if !chain.is_terminal(previous) {
					chain.record_transition(previous, current)?;
				}
			}
			prev = Some(current);
			read += 1;

			if let Some(budget) = word_budget {
				if read >= budget {
					break 'lines;
				}
			}
		}
	}

	Ok(read)
}

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_walk_core::chain::error::ChainError;
use rs_walk_core::chain::item_ops::ItemOps;
use rs_walk_core::chain::markov_chain::MarkovChain;

// ─── Instrumented capability set ────────────────────────────────────────────

/// Word capability set that records every destroy and emit, and can be
/// switched to fail duplication.
struct ProbeOps {
	destroyed: Rc<Cell<usize>>,
	emitted: Rc<RefCell<Vec<String>>>,
	fail_duplicate: Rc<Cell<bool>>,
}

struct Probes {
	destroyed: Rc<Cell<usize>>,
	emitted: Rc<RefCell<Vec<String>>>,
	fail_duplicate: Rc<Cell<bool>>,
}

fn probe_ops() -> (ProbeOps, Probes) {
	let destroyed = Rc::new(Cell::new(0));
	let emitted = Rc::new(RefCell::new(Vec::new()));
	let fail_duplicate = Rc::new(Cell::new(false));
	let ops = ProbeOps {
		destroyed: destroyed.clone(),
		emitted: emitted.clone(),
		fail_duplicate: fail_duplicate.clone(),
	};
	(ops, Probes { destroyed, emitted, fail_duplicate })
}

impl ItemOps for ProbeOps {
	type Item = String;

	fn equal(&self, a: &String, b: &String) -> bool {
		a == b
	}

	fn duplicate(&self, value: &String) -> Result<String, ChainError> {
		if self.fail_duplicate.get() {
			return Err(ChainError::Allocation);
		}
		Ok(value.clone())
	}

	fn destroy(&self, value: String) {
		self.destroyed.set(self.destroyed.get() + 1);
		drop(value);
	}

	fn emit(&self, value: &String) {
		self.emitted.borrow_mut().push(value.clone());
	}

	fn is_terminal(&self, value: &String) -> bool {
		value.ends_with('.')
	}
}

// ─── Properties ─────────────────────────────────────────────────────────────

#[test]
fn dedup_counts_pairwise_distinct_values() {
	let (ops, _probes) = probe_ops();
	let mut chain = MarkovChain::new(ops);

	for word in ["the", "cat", "the", "dog", "cat", "the"] {
		chain.add_or_get(&word.to_owned()).unwrap();
	}

	assert_eq!(chain.len(), 3);
}

#[test]
fn redundant_registration_destroys_the_discarded_duplicate() {
	let (ops, probes) = probe_ops();
	let mut chain = MarkovChain::new(ops);

	chain.add_or_get(&"one".to_owned()).unwrap();
	assert_eq!(probes.destroyed.get(), 0);

	chain.add_or_get(&"one".to_owned()).unwrap();
	chain.add_or_get(&"one".to_owned()).unwrap();
	assert_eq!(probes.destroyed.get(), 2);
}

#[test]
fn duplication_failure_leaves_the_chain_untouched() {
	let (ops, probes) = probe_ops();
	let mut chain = MarkovChain::new(ops);
	chain.add_or_get(&"kept".to_owned()).unwrap();

	probes.fail_duplicate.set(true);
	let result = chain.add_or_get(&"lost".to_owned());

	assert_eq!(result, Err(ChainError::Allocation));
	assert_eq!(chain.len(), 1);
	assert_eq!(chain.find(&"lost".to_owned()), None);
	// The failed duplication produced nothing, so nothing is destroyed.
	assert_eq!(probes.destroyed.get(), 0);
}

#[test]
fn teardown_destroys_each_owned_item_exactly_once() {
	let (ops, probes) = probe_ops();
	let mut chain = MarkovChain::new(ops);

	for word in ["a", "b", "c", "a", "b"] {
		chain.add_or_get(&word.to_owned()).unwrap();
	}
	// Two redundant registrations already destroyed their duplicates.
	assert_eq!(probes.destroyed.get(), 2);

	chain.teardown();
	assert_eq!(probes.destroyed.get(), 5);

	// Second teardown is a no-op.
	chain.teardown();
	assert_eq!(probes.destroyed.get(), 5);

	// Dropping after an explicit teardown does not destroy again.
	drop(chain);
	assert_eq!(probes.destroyed.get(), 5);
}

#[test]
fn dropping_without_teardown_runs_the_same_cascade() {
	let (ops, probes) = probe_ops();
	let mut chain = MarkovChain::new(ops);

	let a = chain.add_or_get(&"a".to_owned()).unwrap();
	let b = chain.add_or_get(&"b".to_owned()).unwrap();
	// Edges are non-owning, two references to `b` must not double-destroy.
	chain.record_transition(a, b).unwrap();
	chain.record_transition(b, b).unwrap();

	drop(chain);
	assert_eq!(probes.destroyed.get(), 2);
}

#[test]
fn weighted_draw_follows_recorded_frequencies() {
	let (ops, _probes) = probe_ops();
	let mut chain = MarkovChain::new(ops);

	let a = chain.add_or_get(&"a".to_owned()).unwrap();
	let b = chain.add_or_get(&"b".to_owned()).unwrap();
	let c = chain.add_or_get(&"c".to_owned()).unwrap();
	for _ in 0..3 {
		chain.record_transition(a, b).unwrap();
	}
	chain.record_transition(a, c).unwrap();

	let mut rng = StdRng::seed_from_u64(42);
	let trials = 10_000;
	let mut picked_b = 0;
	for _ in 0..trials {
		if chain.advance(a, &mut rng).unwrap() == b {
			picked_b += 1;
		}
	}

	// Frequency 3 out of 4: around three quarters of the draws.
	let ratio = picked_b as f64 / trials as f64;
	assert!(
		(0.70..=0.80).contains(&ratio),
		"edge with 3/4 of the weight picked {ratio} of the time"
	);
}

#[test]
fn generation_is_bounded_on_a_cyclic_graph() {
	let (ops, probes) = probe_ops();
	let mut chain = MarkovChain::new(ops);

	let a = chain.add_or_get(&"tick".to_owned()).unwrap();
	let b = chain.add_or_get(&"tock".to_owned()).unwrap();
	chain.record_transition(a, b).unwrap();
	chain.record_transition(b, a).unwrap();

	let mut rng = StdRng::seed_from_u64(3);
	chain.generate_sequence(Some(a), 10, &mut rng).unwrap();

	// Start plus at most ten advances, even though the cycle never ends.
	assert_eq!(probes.emitted.borrow().len(), 11);
	assert_eq!(probes.emitted.borrow()[0], "tick");
}

#[test]
fn generation_stops_cleanly_at_a_dead_end() {
	let (ops, probes) = probe_ops();
	let mut chain = MarkovChain::new(ops);

	let a = chain.add_or_get(&"one".to_owned()).unwrap();
	let b = chain.add_or_get(&"two".to_owned()).unwrap();
	let end = chain.add_or_get(&"end.".to_owned()).unwrap();
	chain.record_transition(a, b).unwrap();
	chain.record_transition(b, end).unwrap();

	let mut rng = StdRng::seed_from_u64(5);
	chain.generate_sequence(Some(a), 50, &mut rng).unwrap();

	assert_eq!(*probes.emitted.borrow(), ["one", "two", "end."]);
}

#[test]
fn generation_draws_a_start_when_none_is_given() {
	let (ops, probes) = probe_ops();
	let mut chain = MarkovChain::new(ops);
	chain.add_or_get(&"only".to_owned()).unwrap();

	let mut rng = StdRng::seed_from_u64(8);
	chain.generate_sequence(None, 4, &mut rng).unwrap();

	assert_eq!(*probes.emitted.borrow(), ["only"]);
}

#[test]
fn generation_from_an_empty_chain_is_an_error() {
	let (ops, _probes) = probe_ops();
	let chain = MarkovChain::new(ops);

	let mut rng = StdRng::seed_from_u64(8);
	assert_eq!(
		chain.generate_sequence(None, 4, &mut rng),
		Err(ChainError::EmptyChain)
	);
}

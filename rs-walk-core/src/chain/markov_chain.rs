use rand::Rng;

use crate::chain::error::ChainError;
use crate::chain::item_ops::ItemOps;
use crate::chain::node::{Node, NodeId};

/// A frequency-weighted random-walk chain over caller-defined items.
///
/// ## Responsibilities
/// - Own every distinct item ever registered (deduplicated registry)
/// - Record observed transitions as weighted edges between nodes
/// - Select nodes uniformly or proportionally to observed frequencies
/// - Generate sequences by walking the graph and emitting visited items
/// - Tear the whole graph down, destroying each owned item exactly once
///
/// ## Invariants
/// - No two nodes hold mutually `equal` items
/// - Insertion order is preserved and observable through `node_at`
/// - Edges are non-owning back-references into the registry arena, so the
///   ownership tree has no cycle and teardown is a single cascade
pub struct MarkovChain<O: ItemOps> {
	ops: O,
	nodes: Vec<Node<O::Item>>,
}

impl<O: ItemOps> MarkovChain<O> {
	/// Creates an empty chain around the given capability set.
	pub fn new(ops: O) -> Self {
		Self { ops, nodes: Vec::new() }
	}

	/// Registers `value`, or fetches the node already holding an equal item.
	///
	/// The value is duplicated first through `ItemOps::duplicate`. On a
	/// registry hit the duplicate is destroyed again so ownership stays
	/// balanced, and the existing id is returned; registering an equal item
	/// twice never creates a second node.
	///
	/// Lookup is a linear scan in insertion order, a deliberate
	/// simplicity/scale trade-off.
	///
	/// # Errors
	/// Returns `ChainError::Allocation` if duplication or arena growth
	/// fails; no mutation is observable in that case.
	pub fn add_or_get(&mut self, value: &O::Item) -> Result<NodeId, ChainError> {
		let duplicate = self.ops.duplicate(value)?;

		for (index, node) in self.nodes.iter().enumerate() {
			if self.ops.equal(&node.item, &duplicate) {
				self.ops.destroy(duplicate);
				return Ok(NodeId(index));
			}
		}

		if self.nodes.try_reserve(1).is_err() {
			self.ops.destroy(duplicate);
			return Err(ChainError::Allocation);
		}
		self.nodes.push(Node::new(duplicate));
		Ok(NodeId(self.nodes.len() - 1))
	}

	/// Finds the node holding an item equal to `value`.
	///
	/// Same linear scan as `add_or_get`, without any mutation.
	pub fn find(&self, value: &O::Item) -> Option<NodeId> {
		self.nodes
			.iter()
			.position(|node| self.ops.equal(&node.item, value))
			.map(NodeId)
	}

	/// Number of registered nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Returns true if no item was ever registered.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Returns the id of the node at `ordinal` in insertion order.
	pub fn node_at(&self, ordinal: usize) -> Option<NodeId> {
		if ordinal < self.nodes.len() {
			Some(NodeId(ordinal))
		} else {
			None
		}
	}

	/// The item held by `id`.
	pub fn item(&self, id: NodeId) -> &O::Item {
		&self.nodes[id.0].item
	}

	/// Whether the item held by `id` is terminal in the caller's domain.
	pub fn is_terminal(&self, id: NodeId) -> bool {
		self.ops.is_terminal(&self.nodes[id.0].item)
	}

	/// Emits the item held by `id` through the caller-supplied callback.
	pub fn emit(&self, id: NodeId) {
		self.ops.emit(&self.nodes[id.0].item);
	}

	/// Number of distinct outgoing transitions of `id`.
	pub fn edge_count(&self, id: NodeId) -> usize {
		self.nodes[id.0].edges.len()
	}

	/// Sum of all outgoing transition frequencies of `id`.
	pub fn total_frequency(&self, id: NodeId) -> usize {
		self.nodes[id.0].total
	}

	/// Recorded frequency of the transition `from` -> `to`, if observed.
	pub fn edge_frequency(&self, from: NodeId, to: NodeId) -> Option<usize> {
		self.nodes[from.0].frequency_of(to)
	}

	/// Records one observation of the transition `from` -> `to`.
	///
	/// An already-known target gets its frequency incremented; a new target
	/// is appended with frequency 1. Both paths keep the cached frequency
	/// sum consistent. The registry deduplicates items, so comparing target
	/// ids is the same as comparing target items.
	///
	/// # Errors
	/// Returns `ChainError::Allocation` if the edge list cannot grow; the
	/// record is left exactly as it was before the call.
	pub fn record_transition(&mut self, from: NodeId, to: NodeId) -> Result<(), ChainError> {
		self.nodes[from.0].add_transition(to)
	}

	/// Picks any registered node, each equally likely.
	///
	/// Terminal items are as likely as any other; a caller needing a
	/// non-terminal start rejects and redraws at the call site.
	///
	/// # Errors
	/// Returns `ChainError::EmptyChain` if nothing was registered yet.
	pub fn pick_uniform<R: Rng>(&self, rng: &mut R) -> Result<NodeId, ChainError> {
		if self.nodes.is_empty() {
			return Err(ChainError::EmptyChain);
		}
		Ok(NodeId(rng.random_range(0..self.nodes.len())))
	}

	/// Advances from `from` along one weighted random transition.
	///
	/// The probability of reaching a given target is its recorded frequency
	/// divided by the node's frequency sum.
	///
	/// # Errors
	/// Returns `ChainError::DeadEnd` if `from` has no outgoing transitions.
	pub fn advance<R: Rng>(&self, from: NodeId, rng: &mut R) -> Result<NodeId, ChainError> {
		self.nodes[from.0].pick_next(rng).ok_or(ChainError::DeadEnd)
	}

	/// Generates one sequence, emitting every visited item.
	///
	/// Starts from `start`, or from a uniform draw when `start` is `None`.
	/// The start item is emitted, then the walk advances and emits up to
	/// `max_steps` times, so at most `max_steps + 1` items are emitted. A
	/// node with no outgoing transitions ends the walk cleanly.
	///
	/// This layer is item-agnostic: terminal-item stopping rules belong to
	/// the caller, which checks `is_terminal` around its own loop instead.
	///
	/// # Errors
	/// Returns `ChainError::EmptyChain` if a start must be drawn from an
	/// empty chain.
	pub fn generate_sequence<R: Rng>(
		&self,
		start: Option<NodeId>,
		max_steps: usize,
		rng: &mut R,
	) -> Result<(), ChainError> {
		let mut current = match start {
			Some(id) => id,
			None => self.pick_uniform(rng)?,
		};
		self.ops.emit(&self.nodes[current.0].item);

		for _ in 0..max_steps {
			if self.nodes[current.0].total == 0 {
				// Dead end, nothing left to walk.
				break;
			}
			current = self.advance(current, rng)?;
			self.ops.emit(&self.nodes[current.0].item);
		}
		Ok(())
	}

	/// Destroys every owned item and releases all backing storage.
	///
	/// The registry is the single owner of item lifetimes, so this is the
	/// only place items are freed; edges free nothing. The arena is moved
	/// out before the pass, which makes a repeated call a no-op. Dropping
	/// the chain runs the same pass.
	pub fn teardown(&mut self) {
		for node in std::mem::take(&mut self.nodes) {
			self.ops.destroy(node.item);
		}
	}
}

impl<O: ItemOps> Drop for MarkovChain<O> {
	fn drop(&mut self) {
		self.teardown();
	}
}

use rand::Rng;

use crate::chain::error::ChainError;

/// Stable identifier of a node inside one chain.
///
/// An index into the chain's backing arena. Nodes are never removed before
/// teardown, so an id stays valid for the whole chain lifetime even while
/// the arena grows. An id never owns the item it points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// A weighted transition toward another node.
///
/// Non-owning: the registry is the single owner of item lifetimes, an edge
/// is a structural back-reference plus an observation count.
#[derive(Clone, Debug)]
pub(crate) struct Edge {
	pub(crate) target: NodeId,
	pub(crate) frequency: usize,
}

/// One registered item with its outgoing transitions.
///
/// Conceptually a node in a Markov chain where outgoing edges are weighted
/// by their number of observations.
///
/// ## Invariants
/// - Edges never share a target
/// - Each edge frequency is strictly positive
/// - `total` equals the sum of all edge frequencies
#[derive(Debug)]
pub(crate) struct Node<T> {
	/// Owned duplicate of the registered item.
	pub(crate) item: T,
	/// Outgoing transitions, in first-observed order.
	pub(crate) edges: Vec<Edge>,
	/// Cached sum of all edge frequencies.
	pub(crate) total: usize,
}

impl<T> Node<T> {
	/// Creates a node with no outgoing transitions.
	pub(crate) fn new(item: T) -> Self {
		Self { item, edges: Vec::new(), total: 0 }
	}

	/// Records one observation of a transition toward `target`.
	///
	/// - If the edge already exists, its frequency and the cached sum are
	///   increased.
	/// - Otherwise a new edge is appended with an initial frequency of 1.
	///
	/// # Errors
	/// Returns `ChainError::Allocation` if the edge list cannot grow; the
	/// node is left exactly as it was before the call.
	pub(crate) fn add_transition(&mut self, target: NodeId) -> Result<(), ChainError> {
		for edge in &mut self.edges {
			if edge.target == target {
				edge.frequency += 1;
				self.total += 1;
				return Ok(());
			}
		}

		self.edges.try_reserve(1).map_err(|_| ChainError::Allocation)?;
		self.edges.push(Edge { target, frequency: 1 });
		self.total += 1;
		Ok(())
	}

	/// Picks the next node using weighted random sampling.
	///
	/// The probability of selecting an edge is proportional to its
	/// observation count: an edge of frequency `f` owns a sub-range of
	/// width `f` in `[0, total)`.
	///
	/// Returns `None` if the node has no transitions.
	pub(crate) fn pick_next<R: Rng>(&self, rng: &mut R) -> Option<NodeId> {
		if self.total == 0 {
			return None;
		}

		let mut remaining = rng.random_range(0..self.total);

		let mut fallback = None;
		for edge in &self.edges {
			if remaining < edge.frequency {
				return Some(edge.target);
			}
			remaining -= edge.frequency;
			fallback = Some(edge.target);
		}

		// Fallback: should not happen while `total` matches the edges,
		// but kept for safety.
		fallback
	}

	/// Returns the recorded frequency toward `target`, if any.
	pub(crate) fn frequency_of(&self, target: NodeId) -> Option<usize> {
		self.edges
			.iter()
			.find(|edge| edge.target == target)
			.map(|edge| edge.frequency)
	}
}

use thiserror::Error;

/// Error type shared by all fallible chain operations.
///
/// Only two kinds of failure exist in this system:
/// - **Allocation failures**: duplicating an item or growing backing
///   storage failed. Reported synchronously to the immediate caller and
///   never retried; a build is expected to abort on the first one.
/// - **Contract violations**: an operation was invoked against a chain
///   state it does not support. These fail loudly instead of reaching
///   undefined arithmetic.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainError {
	/// Duplicating an item or growing backing storage failed.
	#[error("allocation failure")]
	Allocation,

	/// Weighted advance was requested on a node with no outgoing edges.
	#[error("node has no outgoing transitions")]
	DeadEnd,

	/// Random selection was requested on a chain with no nodes.
	#[error("chain is empty")]
	EmptyChain,
}

use crate::chain::error::ChainError;

/// Caller-supplied capability set for one item type.
///
/// A `MarkovChain` holds exactly one `ItemOps` instance for its whole
/// lifetime and routes every item operation through it. The engine never
/// branches on item shape itself; words, board cells or anything else flow
/// through these five operations.
///
/// ## Responsibilities
/// - Compare two items (registry dedup, transition dedup)
/// - Duplicate an item into an owned value the chain will keep
/// - Destroy an owned value when the chain releases it
/// - Emit an item (side-effecting print)
/// - Report whether an item is terminal in the caller's domain
///
/// ## Invariants
/// - `equal` behaves as an equivalence relation over the items handled by
///   one chain
/// - Every value returned by `duplicate` is passed to `destroy` exactly
///   once: at teardown, or immediately when the registry already holds an
///   equal item
pub trait ItemOps {
	/// The item type managed through this capability set.
	type Item;

	/// Returns true if `a` and `b` are the same item.
	fn equal(&self, a: &Self::Item, b: &Self::Item) -> bool;

	/// Produces an owned copy of `value`.
	///
	/// # Errors
	/// Returns `ChainError::Allocation` if the copy cannot be created. The
	/// chain performs no mutation in that case.
	fn duplicate(&self, value: &Self::Item) -> Result<Self::Item, ChainError>;

	/// Releases an owned value.
	fn destroy(&self, value: Self::Item);

	/// Prints `value`; where and how is the caller's decision.
	fn emit(&self, value: &Self::Item);

	/// Returns true if `value` ends a sequence in the caller's domain.
	fn is_terminal(&self, value: &Self::Item) -> bool;
}

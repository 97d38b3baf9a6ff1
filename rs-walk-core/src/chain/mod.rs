//! Top-level module for the random-walk chain.
//!
//! This module groups the whole engine:
//! - The caller-supplied item capability set (`ItemOps`)
//! - Node identifiers and weighted transition storage (`NodeId`)
//! - The chain itself (`MarkovChain`)
//! - The error type shared by all fallible operations (`ChainError`)

/// Error type shared by all fallible chain operations.
///
/// Distinguishes allocation failures from contract violations.
pub mod error;

/// Caller-supplied item capability set.
///
/// The five operations every item type must provide; the only polymorphism
/// boundary of the engine.
pub mod item_ops;

/// The weighted random-walk chain.
///
/// Registry of deduplicated items, transition recording, random selection,
/// sequence generation and teardown.
pub mod markov_chain;

/// Node identifiers and per-node transition storage.
///
/// Tracks outgoing edges and supports weighted random sampling. Only
/// `NodeId` is exposed publicly.
pub mod node;

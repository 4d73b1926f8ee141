//! Minimal acyclic byte automaton.
//!
//! This crate builds, stores and walks deterministic acyclic automata over
//! bytes. Dictionaries pack each entry into one accepted byte sequence and
//! rely on the automaton to share common prefixes and suffixes.
//!
//! # Architecture
//!
//! - [`transition`] -- Packed arc records and state references
//! - [`fsa`] -- The immutable automaton and its traversal primitives
//! - [`config`] -- Traversal configuration (explicit DFS stack)
//! - [`builder`] -- Minimal construction from sorted input
//! - [`format`] -- Binary header parsing and validation

pub mod builder;
pub mod config;
pub mod format;
pub mod fsa;
pub mod transition;

pub use builder::FsaBuilder;
pub use config::TraversalConfig;
pub use fsa::{Completions, Fsa, FsaStats, PrefixMatch};
pub use transition::{StateId, Transition};

/// Error type for automaton construction and loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FsaError {
    #[error("input not sorted: {current:?} follows {previous:?}")]
    Unsorted { previous: Vec<u8>, current: Vec<u8> },
    #[error("duplicate input sequence: {0:?}")]
    Duplicate(Vec<u8>),
    #[error("empty input sequence")]
    EmptySequence,
    #[error("automaton too large: more than {0} arcs")]
    TooLarge(usize),
    #[error("invalid magic number in automaton header")]
    InvalidMagic,
    #[error("data too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("corrupt automaton: {0}")]
    Corrupt(String),
}

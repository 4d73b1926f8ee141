//! Shared types for morfa dictionaries.
//!
//! - [`charset`] -- Byte encodings supported by dictionaries
//! - [`conversion`] -- Character-substitution tables applied around lookups
//! - [`word_data`] -- Decoded `(word, stem, tag)` views and snapshots

pub mod charset;
pub mod conversion;
pub mod word_data;

/// Error type for the shared dictionary types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("unknown charset: {0}")]
    UnknownCharset(String),
    #[error("character {ch:?} is not representable in {charset}")]
    Unmappable { ch: char, charset: &'static str },
    #[error("invalid conversion table: {0}")]
    InvalidConversion(String),
    #[error("invalid usage: {0}")]
    InvalidUsage(&'static str),
}

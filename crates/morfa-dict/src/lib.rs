//! Morphological dictionaries over affix-compressed automata.
//!
//! A dictionary is a minimal acyclic automaton ([`morfa_fsa::Fsa`]) whose
//! accepted sequences are `word SEP stem-code SEP tag` entries, together with
//! [`DictionaryMetadata`] describing how to read them.
//!
//! - [`codec`] -- Stem compression codecs (suffix, prefix, infix)
//! - [`separator`] -- Entry segment layout
//! - [`metadata`] -- Dictionary metadata and its builder
//! - [`encoder`] -- Turning `(word, stem, tag)` triples into automaton input
//! - [`dictionary`] -- An automaton paired with its metadata
//! - [`lookup`] -- Word lookup engine
//! - [`iter`] -- Enumeration of all entries
//!
//! ```
//! use morfa_dict::{Dictionary, DictionaryMetadata};
//!
//! let dict = Dictionary::build(
//!     [("lamps", Some("lamp"), Some("NN2"))],
//!     DictionaryMetadata::default(),
//! )
//! .unwrap();
//! let found = dict.lookup("lamps").unwrap();
//! assert_eq!(found[0].stem(), Some("lamp"));
//! assert_eq!(found[0].tag(), Some("NN2"));
//! ```

pub mod codec;
pub mod dictionary;
pub mod encoder;
pub mod iter;
pub mod lookup;
pub mod metadata;
pub mod separator;

pub use codec::Codec;
pub use dictionary::Dictionary;
pub use encoder::EntryEncoder;
pub use iter::{DictionaryIterator, Entries};
pub use lookup::DictionaryLookup;
pub use metadata::{DictionaryMetadata, DictionaryMetadataBuilder};
pub use morfa_core::word_data::{AsEntryKey, EntryKey, WordData, WordDataRef};
pub use separator::Separator;

use morfa_core::CoreError;
use morfa_fsa::FsaError;

/// Error type for dictionary construction and lookup.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    /// The automaton input or binary image was rejected.
    #[error("malformed input: {0}")]
    MalformedInput(#[from] FsaError),

    /// An entry cannot be stored with the dictionary's codec or separator.
    #[error("entry not representable with the {codec} codec: {reason}")]
    UnsupportedCodecInput { codec: Codec, reason: String },

    /// Text contains a character the dictionary charset cannot encode.
    #[error("character {ch:?} is not representable in {charset}")]
    EncodingMismatch { ch: char, charset: &'static str },

    /// An operation was called on a value that does not support it.
    #[error("invalid usage: {0}")]
    InvalidUsage(&'static str),

    /// The metadata does not describe a usable dictionary.
    #[error("invalid dictionary metadata: {0}")]
    InvalidMetadata(String),
}

impl From<CoreError> for DictError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Unmappable { ch, charset } => DictError::EncodingMismatch { ch, charset },
            CoreError::InvalidUsage(what) => DictError::InvalidUsage(what),
            CoreError::UnknownCharset(_) | CoreError::InvalidConversion(_) => {
                DictError::InvalidMetadata(err.to_string())
            }
        }
    }
}

/// Something that maps an inflected word to its `(stem, tag)` readings.
pub trait Stemmer {
    /// All readings of `word`, in dictionary order. Unknown words give an
    /// empty vector.
    fn lookup(&mut self, word: &str) -> Result<Vec<WordData>, DictError>;
}

// Decoded dictionary entries
//
// An entry is a `(word, stem, tag)` triple. Stem and tag are optional:
// a missing segment is `None`, which is distinct from an empty string.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A detached dictionary entry that owns its text.
///
/// Safe to retain, compare and hash. Produced by lookups directly and by
/// [`WordDataRef::detach`] during iteration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WordData {
    pub word: String,
    pub stem: Option<String>,
    pub tag: Option<String>,
}

impl WordData {
    pub fn new(word: impl Into<String>, stem: Option<String>, tag: Option<String>) -> Self {
        Self {
            word: word.into(),
            stem,
            tag,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn stem(&self) -> Option<&str> {
        self.stem.as_deref()
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Borrow this entry as a view.
    pub fn as_view(&self) -> WordDataRef<'_> {
        WordDataRef {
            word: &self.word,
            stem: self.stem.as_deref(),
            tag: self.tag.as_deref(),
        }
    }
}

/// Formats as `"word stem tag"`, printing `null` for missing segments.
impl fmt::Display for WordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_view(), f)
    }
}

/// A borrowed view of an entry, aliasing buffers owned by an iteration cursor.
///
/// The cursor overwrites those buffers on every step, so the borrow checker
/// ends the view's life before the next step. The view does not
/// implement `PartialEq` or `Hash`; call [`detach`](Self::detach) to keep or
/// key an entry.
#[derive(Debug, Clone, Copy)]
pub struct WordDataRef<'a> {
    word: &'a str,
    stem: Option<&'a str>,
    tag: Option<&'a str>,
}

impl<'a> WordDataRef<'a> {
    pub fn new(word: &'a str, stem: Option<&'a str>, tag: Option<&'a str>) -> Self {
        Self { word, stem, tag }
    }

    pub fn word(&self) -> &'a str {
        self.word
    }

    pub fn stem(&self) -> Option<&'a str> {
        self.stem
    }

    pub fn tag(&self) -> Option<&'a str> {
        self.tag
    }

    /// Copy the view into an owned snapshot.
    pub fn detach(&self) -> WordData {
        WordData {
            word: self.word.to_string(),
            stem: self.stem.map(str::to_string),
            tag: self.tag.map(str::to_string),
        }
    }
}

impl fmt::Display for WordDataRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.word,
            self.stem.unwrap_or("null"),
            self.tag.unwrap_or("null")
        )
    }
}

/// Value identity of an entry, usable as a map or set key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey<'a> {
    pub word: &'a str,
    pub stem: Option<&'a str>,
    pub tag: Option<&'a str>,
}

/// Access to an entry's value identity.
///
/// Only detached entries have a stable identity; asking a live iteration
/// view for one is a usage error.
pub trait AsEntryKey {
    fn entry_key(&self) -> Result<EntryKey<'_>, CoreError>;
}

impl AsEntryKey for WordData {
    fn entry_key(&self) -> Result<EntryKey<'_>, CoreError> {
        Ok(EntryKey {
            word: &self.word,
            stem: self.stem.as_deref(),
            tag: self.tag.as_deref(),
        })
    }
}

impl AsEntryKey for WordDataRef<'_> {
    fn entry_key(&self) -> Result<EntryKey<'_>, CoreError> {
        Err(CoreError::InvalidUsage(
            "iteration views cannot be compared or hashed; detach() them first",
        ))
    }
}

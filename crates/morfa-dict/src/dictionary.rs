// Dictionary: an automaton paired with the metadata needed to read it.

use log::debug;
use morfa_core::charset::Charset;
use morfa_core::conversion::ConversionTable;
use morfa_core::word_data::WordData;
use morfa_fsa::Fsa;

use crate::DictError;
use crate::codec::Codec;
use crate::encoder::EntryEncoder;
use crate::iter::{DictionaryIterator, Entries};
use crate::lookup::DictionaryLookup;
use crate::metadata::{DictionaryMetadata, Settings};
use crate::separator::Separator;

/// An immutable morphological dictionary.
///
/// Cheap to share between threads: lookups and iterations borrow it and keep
/// their own buffers.
#[derive(Debug, Clone)]
pub struct Dictionary {
    fsa: Fsa,
    metadata: DictionaryMetadata,
    settings: Settings,
}

impl Dictionary {
    /// Pair an automaton with its metadata.
    ///
    /// Fails with [`DictError::InvalidMetadata`] if the charset is unknown,
    /// the separator does not fit in one byte, or a conversion table is
    /// malformed.
    pub fn new(fsa: Fsa, metadata: DictionaryMetadata) -> Result<Self, DictError> {
        let settings = metadata.resolve()?;
        debug!(
            "dictionary: {} arcs, {} codec, {} charset, separator {:?}",
            fsa.arc_count(),
            settings.codec,
            settings.charset,
            metadata.separator
        );
        Ok(Self {
            fsa,
            metadata,
            settings,
        })
    }

    /// Load the binary automaton image and pair it with `metadata`.
    pub fn from_bytes(data: &[u8], metadata: DictionaryMetadata) -> Result<Self, DictError> {
        let fsa = Fsa::from_bytes(data)?;
        Self::new(fsa, metadata)
    }

    /// Build a dictionary from `(word, stem, tag)` entries in any order.
    ///
    /// Duplicate entries are stored once.
    pub fn build<I, W, S, T>(
        entries: I,
        metadata: DictionaryMetadata,
    ) -> Result<Self, DictError>
    where
        I: IntoIterator<Item = (W, Option<S>, Option<T>)>,
        W: AsRef<str>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let settings = metadata.resolve()?;
        let mut encoder = EntryEncoder::with_settings(&settings);
        for (word, stem, tag) in entries {
            encoder.add(
                word.as_ref(),
                stem.as_ref().map(|s| s.as_ref()),
                tag.as_ref().map(|t| t.as_ref()),
            )?;
        }
        Self::new(encoder.finish()?, metadata)
    }

    pub fn fsa(&self) -> &Fsa {
        &self.fsa
    }

    pub fn metadata(&self) -> &DictionaryMetadata {
        &self.metadata
    }

    /// The segment separator as declared in the metadata.
    pub fn separator_char(&self) -> char {
        self.metadata.separator
    }

    pub fn separator(&self) -> Separator {
        self.settings.separator
    }

    pub fn codec(&self) -> Codec {
        self.settings.codec
    }

    pub fn charset(&self) -> Charset {
        self.settings.charset
    }

    pub fn input_conversion(&self) -> &ConversionTable {
        &self.settings.input
    }

    pub fn output_conversion(&self) -> &ConversionTable {
        &self.settings.output
    }

    /// All readings of `word`.
    ///
    /// Allocates fresh buffers; use [`lookup_engine`](Self::lookup_engine)
    /// for repeated lookups.
    pub fn lookup(&self, word: &str) -> Result<Vec<WordData>, DictError> {
        DictionaryLookup::new(self).lookup(word)
    }

    /// A reusable lookup engine over this dictionary.
    pub fn lookup_engine(&self) -> DictionaryLookup<'_> {
        DictionaryLookup::new(self)
    }

    /// Cursor over all entries, yielding borrowed views.
    pub fn cursor(&self) -> DictionaryIterator<'_> {
        DictionaryIterator::new(self)
    }

    /// Iterator over all entries, yielding detached values.
    pub fn iter(&self) -> Entries<'_> {
        Entries::new(self)
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl<'d> IntoIterator for &'d Dictionary {
    type Item = WordData;
    type IntoIter = Entries<'d>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Dictionary lookup engine.
//
// A lookup walks `word SEP` from the root, then enumerates every completion
// below the reached state. Each completion is a `stem-code SEP tag` payload
// decoded against the query word.

use std::borrow::Cow;

use log::trace;
use morfa_core::charset::Charset;
use morfa_core::conversion::ConversionTable;
use morfa_core::word_data::WordData;
use morfa_fsa::TraversalConfig;

use crate::dictionary::Dictionary;
use crate::{DictError, Stemmer};

/// Reusable lookup state over one dictionary.
///
/// Holds the traversal stack and scratch buffers so that repeated lookups do
/// not reallocate. Create one per thread; the dictionary itself is shared.
#[derive(Debug, Clone)]
pub struct DictionaryLookup<'d> {
    dictionary: &'d Dictionary,
    config: TraversalConfig,
    query: Vec<u8>,
    stem: Vec<u8>,
}

impl<'d> DictionaryLookup<'d> {
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self {
            dictionary,
            config: TraversalConfig::with_capacity(64),
            query: Vec::with_capacity(64),
            stem: Vec::with_capacity(64),
        }
    }

    /// The separator declared by the underlying dictionary.
    pub fn separator_char(&self) -> char {
        self.dictionary.separator_char()
    }

    /// All readings of `word`, in dictionary order.
    ///
    /// The input conversion is applied to `word` first; stems and tags pass
    /// through the output conversion. A word that is empty, contains the
    /// separator, or is not in the dictionary yields no readings.
    ///
    /// # Errors
    ///
    /// [`DictError::EncodingMismatch`] if the converted word has characters
    /// outside the dictionary charset.
    pub fn lookup(&mut self, word: &str) -> Result<Vec<WordData>, DictError> {
        let dict = self.dictionary;
        let settings = dict.settings();
        let sep = settings.separator.byte();

        let converted = settings.input.apply(word);
        self.query.clear();
        settings.charset.encode_into(&converted, &mut self.query)?;
        if self.query.is_empty() || self.query.contains(&sep) {
            return Ok(Vec::new());
        }

        self.query.push(sep);
        let reached = dict.fsa().lookup_prefix(&self.query);
        self.query.pop();
        let Some(reached) = reached else {
            trace!("lookup {word:?}: not found");
            return Ok(Vec::new());
        };

        let mut readings = Vec::new();
        self.config.reset(reached.state);
        while let Some(payload) = self.config.advance(dict.fsa()) {
            let (stem_code, tag) = settings.separator.split_payload(payload);
            let stem = stem_code.map(|code| {
                self.stem.clear();
                settings.codec.decode_into(&self.query, code, &mut self.stem);
                decode_text(settings.charset, &settings.output, &self.stem)
            });
            let tag = tag.map(|tag| decode_text(settings.charset, &settings.output, tag));
            readings.push(WordData::new(word, stem, tag));
        }
        trace!("lookup {word:?}: {} readings", readings.len());
        Ok(readings)
    }
}

impl Stemmer for DictionaryLookup<'_> {
    fn lookup(&mut self, word: &str) -> Result<Vec<WordData>, DictError> {
        DictionaryLookup::lookup(self, word)
    }
}

/// Decode stored bytes to text and apply the output conversion.
pub(crate) fn decode_text(charset: Charset, output: &ConversionTable, bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    charset.decode_into(bytes, &mut text);
    convert_in_place(output, &mut text);
    text
}

/// Apply `table` to `text`, replacing it only when something matched.
pub(crate) fn convert_in_place(table: &ConversionTable, text: &mut String) {
    let converted = match table.apply(text) {
        Cow::Owned(converted) => converted,
        Cow::Borrowed(_) => return,
    };
    *text = converted;
}

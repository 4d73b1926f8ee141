// Enumeration of all dictionary entries.
//
// `DictionaryIterator` is a cursor: each step overwrites the previous entry
// in its own buffers and hands out a borrowed view. `Entries` wraps it as a
// std iterator of detached values.

use morfa_core::word_data::{WordData, WordDataRef};
use morfa_fsa::TraversalConfig;

use crate::dictionary::Dictionary;
use crate::lookup::convert_in_place;

/// Cursor over every entry of a dictionary, in byte order of the stored
/// sequences.
///
/// The view returned by [`advance`](Self::advance) borrows the cursor, so
/// it must be dropped (or [detached](WordDataRef::detach)) before the next
/// step:
///
/// ```
/// use morfa_dict::{Dictionary, DictionaryMetadata};
///
/// let dict = Dictionary::build(
///     [("cats", Some("cat"), Some("NN2")), ("cat", Some("cat"), Some("NN1"))],
///     DictionaryMetadata::default(),
/// )
/// .unwrap();
/// let mut cursor = dict.cursor();
/// let mut seen = Vec::new();
/// while let Some(entry) = cursor.advance() {
///     seen.push(entry.detach());
/// }
/// assert_eq!(seen[0].to_string(), "cat cat NN1");
/// assert_eq!(seen[1].to_string(), "cats cat NN2");
/// ```
#[derive(Debug, Clone)]
pub struct DictionaryIterator<'d> {
    dictionary: &'d Dictionary,
    config: TraversalConfig,
    stem_bytes: Vec<u8>,
    word: String,
    stem: String,
    tag: String,
}

impl<'d> DictionaryIterator<'d> {
    pub fn new(dictionary: &'d Dictionary) -> Self {
        let mut config = TraversalConfig::with_capacity(64);
        config.reset(dictionary.fsa().root());
        Self {
            dictionary,
            config,
            stem_bytes: Vec::new(),
            word: String::new(),
            stem: String::new(),
            tag: String::new(),
        }
    }

    /// Start over from the first entry.
    pub fn rewind(&mut self) {
        self.config.reset(self.dictionary.fsa().root());
    }

    /// Decode the next entry. Returns `None` once all entries were visited.
    pub fn advance(&mut self) -> Option<WordDataRef<'_>> {
        let dict = self.dictionary;
        let settings = dict.settings();
        let sequence = self.config.advance(dict.fsa())?;
        let entry = settings.separator.split_entry(sequence);

        self.word.clear();
        settings.charset.decode_into(entry.word, &mut self.word);

        let has_stem = match entry.stem_code {
            Some(code) => {
                self.stem_bytes.clear();
                settings
                    .codec
                    .decode_into(entry.word, code, &mut self.stem_bytes);
                self.stem.clear();
                settings.charset.decode_into(&self.stem_bytes, &mut self.stem);
                convert_in_place(&settings.output, &mut self.stem);
                true
            }
            None => false,
        };

        let has_tag = match entry.tag {
            Some(tag) => {
                self.tag.clear();
                settings.charset.decode_into(tag, &mut self.tag);
                convert_in_place(&settings.output, &mut self.tag);
                true
            }
            None => false,
        };

        Some(WordDataRef::new(
            &self.word,
            has_stem.then_some(self.stem.as_str()),
            has_tag.then_some(self.tag.as_str()),
        ))
    }
}

/// Iterator over detached entries of a dictionary.
#[derive(Debug, Clone)]
pub struct Entries<'d> {
    cursor: DictionaryIterator<'d>,
}

impl<'d> Entries<'d> {
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self {
            cursor: DictionaryIterator::new(dictionary),
        }
    }
}

impl Iterator for Entries<'_> {
    type Item = WordData;

    fn next(&mut self) -> Option<WordData> {
        self.cursor.advance().map(|entry| entry.detach())
    }
}

impl std::iter::FusedIterator for Entries<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::DictionaryMetadata;
    use morfa_core::word_data::AsEntryKey;
    use morfa_fsa::FsaBuilder;

    fn sample() -> Dictionary {
        // "token1" carries no payload at all; only a raw automaton can hold it.
        let fsa = FsaBuilder::build(["token1", "token2+A", "token3+B2++"]).unwrap();
        Dictionary::new(fsa, DictionaryMetadata::default()).unwrap()
    }

    #[test]
    fn cursor_visits_every_entry() {
        let dict = sample();
        let mut cursor = dict.cursor();
        let mut lines = Vec::new();
        while let Some(entry) = cursor.advance() {
            lines.push(entry.to_string());
        }
        assert_eq!(
            lines,
            ["token1 null null", "token2 token2 null", "token3 token2 +"]
        );
        assert!(cursor.advance().is_none());
    }

    #[test]
    fn rewind_restarts() {
        let dict = sample();
        let mut cursor = dict.cursor();
        while cursor.advance().is_some() {}
        cursor.rewind();
        assert_eq!(cursor.advance().map(|e| e.word()), Some("token1"));
    }

    #[test]
    fn views_have_no_identity_until_detached() {
        let dict = sample();
        let mut cursor = dict.cursor();
        let view = cursor.advance().unwrap();
        assert!(view.entry_key().is_err());
        let owned = view.detach();
        assert_eq!(owned.entry_key().unwrap().word, "token1");
    }

    #[test]
    fn entries_iterator_matches_cursor() {
        let dict = sample();
        let from_iter: Vec<WordData> = dict.iter().collect();
        let mut from_cursor = Vec::new();
        let mut cursor = dict.cursor();
        while let Some(entry) = cursor.advance() {
            from_cursor.push(entry.detach());
        }
        assert_eq!(from_iter, from_cursor);
        assert_eq!((&dict).into_iter().count(), 3);
    }

    #[test]
    fn empty_dictionary_yields_nothing() {
        let dict = Dictionary::build(
            Vec::<(&str, Option<&str>, Option<&str>)>::new(),
            DictionaryMetadata::default(),
        )
        .unwrap();
        assert_eq!(dict.iter().count(), 0);
    }
}

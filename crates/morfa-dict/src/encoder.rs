// Entry encoding
//
// Turns `(word, stem, tag)` triples into the byte sequences a dictionary
// automaton accepts. Entries may arrive in any order; they are sorted and
// deduplicated before the automaton is built.
//
// Text is taken as stored: conversion tables are not applied here.

use log::debug;
use morfa_core::charset::Charset;
use morfa_fsa::{Fsa, FsaBuilder};

use crate::DictError;
use crate::codec::Codec;
use crate::metadata::{DictionaryMetadata, Settings};
use crate::separator::Separator;

/// Collects dictionary entries and builds the automaton for them.
#[derive(Debug)]
pub struct EntryEncoder {
    charset: Charset,
    separator: Separator,
    codec: Codec,
    sequences: Vec<Vec<u8>>,
    word: Vec<u8>,
    stem: Vec<u8>,
    code: Vec<u8>,
    tag: Vec<u8>,
}

impl EntryEncoder {
    pub fn new(metadata: &DictionaryMetadata) -> Result<Self, DictError> {
        Ok(Self::with_settings(&metadata.resolve()?))
    }

    pub(crate) fn with_settings(settings: &Settings) -> Self {
        Self {
            charset: settings.charset,
            separator: settings.separator,
            codec: settings.codec,
            sequences: Vec::new(),
            word: Vec::new(),
            stem: Vec::new(),
            code: Vec::new(),
            tag: Vec::new(),
        }
    }

    /// Number of entries added so far, duplicates included.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Encode one entry into its stored byte form.
    ///
    /// An empty tag is stored as absent. An entry needs a stem or a tag:
    /// lookups only report what follows `word SEP`.
    ///
    /// # Errors
    ///
    /// - [`DictError::EncodingMismatch`] if any text is outside the charset
    /// - [`DictError::UnsupportedCodecInput`] if the word is empty, contains
    ///   the separator, has neither stem nor tag, or the stem cannot be coded
    pub fn encode(
        &mut self,
        word: &str,
        stem: Option<&str>,
        tag: Option<&str>,
    ) -> Result<Vec<u8>, DictError> {
        self.word.clear();
        self.charset.encode_into(word, &mut self.word)?;

        let code = match stem {
            Some(stem) => {
                self.stem.clear();
                self.charset.encode_into(stem, &mut self.stem)?;
                self.code.clear();
                self.codec.encode_into_avoiding(
                    &self.word,
                    &self.stem,
                    self.separator.byte(),
                    &mut self.code,
                )?;
                Some(&self.code[..])
            }
            None => None,
        };

        self.tag.clear();
        if let Some(tag) = tag {
            self.charset.encode_into(tag, &mut self.tag)?;
        }
        if code.is_none() && self.tag.is_empty() {
            return Err(DictError::UnsupportedCodecInput {
                codec: self.codec,
                reason: format!("entry {word:?} has neither stem nor tag"),
            });
        }

        let capacity = self.word.len() + code.map_or(0, <[u8]>::len) + self.tag.len() + 2;
        let mut out = Vec::with_capacity(capacity);
        self.separator
            .pack(&self.word, code, Some(&self.tag[..]), &mut out)
            .map_err(|e| DictError::UnsupportedCodecInput {
                codec: self.codec,
                reason: e.to_string(),
            })?;
        Ok(out)
    }

    /// Encode and collect one entry.
    pub fn add(
        &mut self,
        word: &str,
        stem: Option<&str>,
        tag: Option<&str>,
    ) -> Result<(), DictError> {
        let sequence = self.encode(word, stem, tag)?;
        self.sequences.push(sequence);
        Ok(())
    }

    /// Build the automaton over every collected entry.
    pub fn finish(mut self) -> Result<Fsa, DictError> {
        self.sequences.sort_unstable();
        let added = self.sequences.len();
        self.sequences.dedup();
        if self.sequences.len() < added {
            debug!("dropped {} duplicate entries", added - self.sequences.len());
        }
        Ok(FsaBuilder::build(&self.sequences)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> EntryEncoder {
        EntryEncoder::new(&DictionaryMetadata::default()).unwrap()
    }

    fn stored(word: &str, stem: Option<&str>, tag: Option<&str>) -> String {
        String::from_utf8(encoder().encode(word, stem, tag).unwrap()).unwrap()
    }

    #[test]
    fn separator_layouts() {
        assert_eq!(stored("token3", None, Some("+")), "token3+++");
        assert_eq!(stored("token4", Some("token2"), None), "token4+B2");
        assert_eq!(stored("token6", Some("token2"), Some("+")), "token6+B2++");
        assert_eq!(
            stored("token8", Some("token2"), Some("token3++")),
            "token8+B2+token3++"
        );
    }

    #[test]
    fn empty_tag_is_absent() {
        assert_eq!(
            stored("w", Some("w"), Some("")),
            stored("w", Some("w"), None)
        );
    }

    #[test]
    fn reused_encoder_drops_previous_code() {
        let mut encoder = encoder();
        let first = encoder.encode("token8", Some("token2"), Some("x")).unwrap();
        assert_eq!(first, b"token8+B2+x");
        let second = encoder.encode("token3", None, Some("+")).unwrap();
        assert_eq!(second, b"token3+++");
    }

    #[test]
    fn bare_word_rejected() {
        let mut encoder = encoder();
        for tag in [None, Some("")] {
            let err = encoder.encode("kot", None, tag).unwrap_err();
            assert!(matches!(err, DictError::UnsupportedCodecInput { .. }));
        }
        assert!(encoder.encode("kot", None, Some("subst")).is_ok());
        assert!(encoder.encode("kot", Some("kot"), None).is_ok());
    }

    #[test]
    fn infix_count_steers_clear_of_separator() {
        // Dropping the 234 leading bytes would store the count as '+'.
        let mut word = "q".repeat(234);
        word.push_str("abc");
        word.push_str(&"z".repeat(10));
        let metadata = DictionaryMetadata::builder().encoder(Codec::Infix).build();
        let mut encoder = EntryEncoder::new(&metadata).unwrap();
        let stored = encoder.encode(&word, Some("abc"), None).unwrap();
        let entry = Separator::DEFAULT.split_entry(&stored);
        let code = entry.stem_code.unwrap();
        assert!(!code.contains(&b'+'));
        assert_eq!(Codec::Infix.decode(word.as_bytes(), code), b"abc");
    }

    #[test]
    fn word_with_separator_rejected() {
        let err = encoder().encode("l+A", Some("l"), None).unwrap_err();
        assert!(matches!(err, DictError::UnsupportedCodecInput { .. }));
    }

    #[test]
    fn stem_code_with_separator_rejected() {
        // The suffix literal would be "+x".
        let err = encoder().encode("ab", Some("a+x"), None).unwrap_err();
        assert!(matches!(err, DictError::UnsupportedCodecInput { .. }));
    }

    #[test]
    fn charset_mismatch() {
        let metadata = DictionaryMetadata::builder().encoding("US-ASCII").build();
        let mut encoder = EntryEncoder::new(&metadata).unwrap();
        let err = encoder.encode("żółw", None, None).unwrap_err();
        assert!(matches!(
            err,
            DictError::EncodingMismatch {
                ch: 'ż',
                charset: "US-ASCII"
            }
        ));
    }

    #[test]
    fn finish_sorts_and_deduplicates() {
        let mut encoder = encoder();
        encoder.add("b", Some("b"), Some("x")).unwrap();
        encoder.add("a", Some("a"), Some("y")).unwrap();
        encoder.add("b", Some("b"), Some("x")).unwrap();
        assert_eq!(encoder.len(), 3);
        let fsa = encoder.finish().unwrap();
        let stored: Vec<Vec<u8>> = fsa.sequences().collect();
        assert_eq!(stored, vec![b"a+A+y".to_vec(), b"b+A+x".to_vec()]);
    }

    #[test]
    fn empty_encoder_builds_empty_automaton() {
        let fsa = encoder().finish().unwrap();
        assert_eq!(fsa.arc_count(), 0);
    }
}

// Entry layout inside the automaton.
//
// Every accepted sequence is `word SEP [stem-code] [SEP tag]`:
// - the word ends at the first separator and never contains one,
// - the stem code ends at the second separator and never contains one,
// - everything after the second separator is the tag, verbatim, so tags may
//   contain the separator freely.
// An empty stem code or tag reads back as null.

/// Why an entry cannot be laid out with a given separator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackError {
    #[error("empty word")]
    EmptyWord,
    #[error("word contains the separator byte {0:#04x}")]
    SeparatorInWord(u8),
    #[error("stem code contains the separator byte {0:#04x}")]
    SeparatorInStemCode(u8),
}

/// A stored entry split into its segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntrySegments<'a> {
    pub word: &'a [u8],
    pub stem_code: Option<&'a [u8]>,
    pub tag: Option<&'a [u8]>,
}

/// The single byte that separates entry segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Separator(u8);

impl Default for Separator {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Separator {
    pub const DEFAULT: Separator = Separator(b'+');

    pub fn new(byte: u8) -> Self {
        Self(byte)
    }

    pub fn byte(self) -> u8 {
        self.0
    }

    /// Split a whole accepted sequence.
    pub fn split_entry(self, sequence: &[u8]) -> EntrySegments<'_> {
        match self.position(sequence) {
            None => EntrySegments {
                word: sequence,
                stem_code: None,
                tag: None,
            },
            Some(at) => {
                let (stem_code, tag) = self.split_payload(&sequence[at + 1..]);
                EntrySegments {
                    word: &sequence[..at],
                    stem_code,
                    tag,
                }
            }
        }
    }

    /// Split what follows `word SEP` into stem code and tag.
    pub fn split_payload(self, payload: &[u8]) -> (Option<&[u8]>, Option<&[u8]>) {
        match self.position(payload) {
            None => (non_empty(payload), None),
            Some(at) => (non_empty(&payload[..at]), non_empty(&payload[at + 1..])),
        }
    }

    /// Append the stored form of an entry to `out`.
    ///
    /// Empty stem codes and tags are written as absent. On error `out` is
    /// left as it was.
    pub fn pack(
        self,
        word: &[u8],
        stem_code: Option<&[u8]>,
        tag: Option<&[u8]>,
        out: &mut Vec<u8>,
    ) -> Result<(), PackError> {
        if word.is_empty() {
            return Err(PackError::EmptyWord);
        }
        if self.position(word).is_some() {
            return Err(PackError::SeparatorInWord(self.0));
        }
        let stem_code = stem_code.and_then(non_empty);
        if stem_code.is_some_and(|code| self.position(code).is_some()) {
            return Err(PackError::SeparatorInStemCode(self.0));
        }
        let tag = tag.and_then(non_empty);

        out.extend_from_slice(word);
        out.push(self.0);
        if let Some(code) = stem_code {
            out.extend_from_slice(code);
        }
        if let Some(tag) = tag {
            out.push(self.0);
            out.extend_from_slice(tag);
        }
        Ok(())
    }

    #[inline]
    fn position(self, bytes: &[u8]) -> Option<usize> {
        bytes.iter().position(|&b| b == self.0)
    }
}

fn non_empty(bytes: &[u8]) -> Option<&[u8]> {
    (!bytes.is_empty()).then_some(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEP: Separator = Separator::DEFAULT;

    fn split(seq: &str) -> (String, Option<String>, Option<String>) {
        let text = |b: &[u8]| String::from_utf8(b.to_vec()).unwrap();
        let e = SEP.split_entry(seq.as_bytes());
        (text(e.word), e.stem_code.map(text), e.tag.map(text))
    }

    fn owned(
        word: &str,
        code: Option<&str>,
        tag: Option<&str>,
    ) -> (String, Option<String>, Option<String>) {
        (word.into(), code.map(Into::into), tag.map(Into::into))
    }

    #[test]
    fn split_layouts() {
        assert_eq!(split("token1"), owned("token1", None, None));
        assert_eq!(split("token2+"), owned("token2", None, None));
        assert_eq!(split("token3+++"), owned("token3", None, Some("+")));
        assert_eq!(split("token4+B2"), owned("token4", Some("B2"), None));
        assert_eq!(split("token5+B2+"), owned("token5", Some("B2"), None));
        assert_eq!(split("token6+B2++"), owned("token6", Some("B2"), Some("+")));
        assert_eq!(
            split("token7+B2+token3+"),
            owned("token7", Some("B2"), Some("token3+"))
        );
        assert_eq!(
            split("token8+B2+token3++"),
            owned("token8", Some("B2"), Some("token3++"))
        );
    }

    #[test]
    fn split_payload_alone() {
        assert_eq!(
            SEP.split_payload(b"A+NN1d"),
            (Some(&b"A"[..]), Some(&b"NN1d"[..]))
        );
        assert_eq!(SEP.split_payload(b""), (None, None));
        assert_eq!(SEP.split_payload(b"+tag"), (None, Some(&b"tag"[..])));
    }

    #[test]
    fn pack_then_split() {
        let cases: [(&[u8], Option<&[u8]>, Option<&[u8]>); 5] = [
            (b"w", None, None),
            (b"w", None, Some(&b"t+a+g"[..])),
            (b"w", Some(&b"Bx"[..]), None),
            (b"w", Some(&b"Bx"[..]), Some(&b"+"[..])),
            (b"w", Some(&b"A"[..]), Some(&b"subst:sg"[..])),
        ];
        for (word, code, tag) in cases {
            let mut out = Vec::new();
            SEP.pack(word, code, tag, &mut out).unwrap();
            let e = SEP.split_entry(&out);
            assert_eq!((e.word, e.stem_code, e.tag), (word, code, tag));
        }
    }

    #[test]
    fn pack_layouts() {
        let pack = |code: Option<&[u8]>, tag: Option<&[u8]>| {
            let mut out = Vec::new();
            SEP.pack(b"w", code, tag, &mut out).unwrap();
            String::from_utf8(out).unwrap()
        };
        assert_eq!(pack(None, None), "w+");
        assert_eq!(pack(None, Some(&b"t"[..])), "w++t");
        assert_eq!(pack(Some(&b"A"[..]), None), "w+A");
        assert_eq!(pack(Some(&b"A"[..]), Some(&b"t"[..])), "w+A+t");
        assert_eq!(pack(Some(&b""[..]), Some(&b""[..])), "w+");
    }

    #[test]
    fn pack_rejects_ambiguous_segments() {
        let mut out = b"keep".to_vec();
        assert_eq!(
            SEP.pack(b"a+b", None, None, &mut out),
            Err(PackError::SeparatorInWord(b'+'))
        );
        assert_eq!(
            SEP.pack(b"ab", Some(&b"B+"[..]), None, &mut out),
            Err(PackError::SeparatorInStemCode(b'+'))
        );
        assert_eq!(
            SEP.pack(b"", None, None, &mut out),
            Err(PackError::EmptyWord)
        );
        assert_eq!(out, b"keep");
    }

    #[test]
    fn other_separator_byte() {
        let sep = Separator::new(b'|');
        let e = sep.split_entry(b"a+b|A|x|y");
        assert_eq!(e.word, b"a+b");
        assert_eq!(e.stem_code, Some(&b"A"[..]));
        assert_eq!(e.tag, Some(&b"x|y"[..]));
    }
}

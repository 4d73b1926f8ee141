// Affix-compression codecs for stems.
//
// A stem is stored as a short edit against its inflected word so that
// related inflections share automaton suffixes. All codecs work on raw
// bytes; word and stem must use the same charset.

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::DictError;

/// Largest drop count a single count byte can hold.
pub const MAX_COUNT: usize = 255;

/// Count bytes are stored relative to this base, wrapping, so small counts
/// become printable letters (`A` = 0, `B` = 1, ...).
const COUNT_BASE: u8 = b'A';

/// The stem compression scheme of a dictionary.
///
/// Chosen once in the dictionary metadata and used for every entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Codec {
    /// `count ++ literal`: drop `count` bytes from the end of the word, append `literal`.
    #[default]
    Suffix,
    /// `count ++ literal`: drop `count` bytes from the start of the word, prepend `literal`.
    Prefix,
    /// `front ++ back ++ literal`: drop `front` bytes from the start and
    /// `back` bytes from the end of the word, append `literal`.
    Infix,
}

impl Codec {
    /// Metadata name of the codec.
    pub fn name(self) -> &'static str {
        match self {
            Codec::Suffix => "SUFFIX",
            Codec::Prefix => "PREFIX",
            Codec::Infix => "INFIX",
        }
    }

    /// Resolve a codec from its metadata name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        [Codec::Suffix, Codec::Prefix, Codec::Infix]
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Encode `stem` relative to `word`.
    pub fn encode(self, word: &[u8], stem: &[u8]) -> Result<Vec<u8>, DictError> {
        let mut out = Vec::with_capacity(stem.len() + 2);
        self.encode_into(word, stem, &mut out)?;
        Ok(out)
    }

    /// Encode `stem` relative to `word`, appending the code to `out`.
    ///
    /// Fails with [`DictError::UnsupportedCodecInput`] when a drop count
    /// would exceed [`MAX_COUNT`]; `out` is untouched in that case.
    pub fn encode_into(self, word: &[u8], stem: &[u8], out: &mut Vec<u8>) -> Result<(), DictError> {
        self.encode_checked(word, stem, None, out)
    }

    /// Like [`encode_into`](Self::encode_into), but keeps `reserved` out of
    /// the code where the codec has a choice.
    ///
    /// Only the infix codec can pick among several splits. Suffix and prefix
    /// codes are fully determined by the pair, so they may still contain
    /// `reserved`.
    pub fn encode_into_avoiding(
        self,
        word: &[u8],
        stem: &[u8],
        reserved: u8,
        out: &mut Vec<u8>,
    ) -> Result<(), DictError> {
        self.encode_checked(word, stem, Some(reserved), out)
    }

    fn encode_checked(
        self,
        word: &[u8],
        stem: &[u8],
        reserved: Option<u8>,
        out: &mut Vec<u8>,
    ) -> Result<(), DictError> {
        match self {
            Codec::Suffix => {
                let keep = common_prefix(word, stem);
                let drop = self.check_count(word.len() - keep)?;
                out.push(drop);
                out.extend_from_slice(&stem[keep..]);
            }
            Codec::Prefix => {
                let keep = common_suffix(word, stem);
                let drop = self.check_count(word.len() - keep)?;
                out.push(drop);
                out.extend_from_slice(&stem[..stem.len() - keep]);
            }
            Codec::Infix => {
                // (front, back, kept): pick the split that keeps the most of the word.
                let mut best: Option<(usize, usize, usize)> = None;
                for front in 0..=word.len().min(MAX_COUNT) {
                    let kept = common_prefix(&word[front..], stem);
                    let back = word.len() - front - kept;
                    if back > MAX_COUNT {
                        continue;
                    }
                    if let Some(r) = reserved {
                        let clashes = count_byte(front) == r
                            || count_byte(back) == r
                            || stem[kept..].contains(&r);
                        if clashes {
                            continue;
                        }
                    }
                    if best.is_none_or(|(_, _, k)| kept > k) {
                        best = Some((front, back, kept));
                    }
                }
                let (front, back, kept) = best.ok_or_else(|| DictError::UnsupportedCodecInput {
                    codec: self,
                    reason: format!("no split of a {}-byte word fits the code", word.len()),
                })?;
                out.push(count_byte(front));
                out.push(count_byte(back));
                out.extend_from_slice(&stem[kept..]);
            }
        }
        Ok(())
    }

    /// Reconstruct the stem of `word` from `code`.
    pub fn decode(self, word: &[u8], code: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(word.len() + code.len());
        self.decode_into(word, code, &mut out);
        out
    }

    /// Reconstruct the stem of `word` from `code`, appending it to `out`.
    ///
    /// Never fails: missing count bytes read as zero and counts larger than
    /// the word are clamped, so a damaged entry decodes as far as possible.
    pub fn decode_into(self, word: &[u8], code: &[u8], out: &mut Vec<u8>) {
        let header = match self {
            Codec::Suffix | Codec::Prefix => 1,
            Codec::Infix => 2,
        };
        let count_at = |i: usize| code.get(i).map_or(0, |&b| count_value(b));
        let literal = code.get(header..).unwrap_or_default();

        match self {
            Codec::Suffix => {
                let drop = clamp(count_at(0), word.len());
                out.extend_from_slice(&word[..word.len() - drop]);
                out.extend_from_slice(literal);
            }
            Codec::Prefix => {
                let drop = clamp(count_at(0), word.len());
                out.extend_from_slice(literal);
                out.extend_from_slice(&word[drop..]);
            }
            Codec::Infix => {
                let front = clamp(count_at(0), word.len());
                let back = clamp(count_at(1), word.len() - front);
                out.extend_from_slice(&word[front..word.len() - back]);
                out.extend_from_slice(literal);
            }
        }
    }

    fn check_count(self, count: usize) -> Result<u8, DictError> {
        if count > MAX_COUNT {
            return Err(self.unsupported(count));
        }
        Ok(count_byte(count))
    }

    fn unsupported(self, count: usize) -> DictError {
        DictError::UnsupportedCodecInput {
            codec: self,
            reason: format!("drop count {count} exceeds {MAX_COUNT}"),
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[inline]
fn count_byte(count: usize) -> u8 {
    debug_assert!(count <= MAX_COUNT);
    (count as u8).wrapping_add(COUNT_BASE)
}

#[inline]
fn count_value(byte: u8) -> usize {
    byte.wrapping_sub(COUNT_BASE) as usize
}

fn clamp(count: usize, available: usize) -> usize {
    if count > available {
        warn!("stem code drops {count} bytes from a {available}-byte word; clamping");
        available
    } else {
        count
    }
}

fn common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[u8], b: &[u8]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Codec; 3] = [Codec::Suffix, Codec::Prefix, Codec::Infix];

    /// Word/stem pairs covering suffix, prefix and interior edits.
    const PAIRS: &[(&str, &str)] = &[
        ("token4", "token2"),
        ("Rzeczypospolitej", "Rzeczpospolita"),
        ("Rzecząpospolitą", "Rzeczpospolita"),
        ("Rzeczyccy", "Rzeczycki"),
        ("mergeam", "merge"),
        ("merseserăm", "merge"),
        ("gesagt", "sagen"),
        ("najlepszy", "dobry"),
        ("abc", "abc"),
        ("abc", ""),
        ("", "abc"),
        ("unhappy", "happy"),
    ];

    #[test]
    fn round_trip_all_codecs() {
        for codec in ALL {
            for (word, stem) in PAIRS {
                let code = codec.encode(word.as_bytes(), stem.as_bytes()).unwrap();
                let decoded = codec.decode(word.as_bytes(), &code);
                assert_eq!(
                    decoded,
                    stem.as_bytes(),
                    "{codec} failed for {word:?} -> {stem:?}"
                );
            }
        }
    }

    #[test]
    fn suffix_code_layout() {
        let code = Codec::Suffix.encode(b"token4", b"token2").unwrap();
        assert_eq!(code, b"B2");
    }

    #[test]
    fn prefix_code_layout() {
        let code = Codec::Prefix.encode(b"unhappy", b"happy").unwrap();
        assert_eq!(code, b"C");
        let code = Codec::Prefix.encode(b"happy", b"unhappy").unwrap();
        assert_eq!(code, b"Aun");
    }

    #[test]
    fn infix_handles_front_and_back() {
        // Drop "ge" in front and "t" at the back, append "en".
        let code = Codec::Infix.encode(b"gesagt", b"sagen").unwrap();
        assert_eq!(code, b"CBen");
        assert_eq!(Codec::Infix.decode(b"gesagt", &code), b"sagen");
    }

    #[test]
    fn identity_codes() {
        assert_eq!(Codec::Suffix.encode(b"abc", b"abc").unwrap(), b"A");
        assert_eq!(Codec::Prefix.encode(b"abc", b"abc").unwrap(), b"A");
        assert_eq!(Codec::Infix.encode(b"abc", b"abc").unwrap(), b"AA");
    }

    #[test]
    fn large_drop_is_unsupported() {
        let word = vec![b'x'; 300];
        let err = Codec::Suffix.encode(&word, b"y").unwrap_err();
        assert!(matches!(
            err,
            DictError::UnsupportedCodecInput {
                codec: Codec::Suffix,
                ..
            }
        ));
        let err = Codec::Prefix.encode(&word, b"y").unwrap_err();
        assert!(matches!(err, DictError::UnsupportedCodecInput { .. }));
    }

    #[test]
    fn infix_fails_when_no_split_fits() {
        // Any split must drop more than 255 bytes on one side.
        let word = vec![b'x'; 600];
        let err = Codec::Infix.encode(&word, b"y").unwrap_err();
        assert!(matches!(err, DictError::UnsupportedCodecInput { .. }));
    }

    #[test]
    fn infix_reaches_further_than_suffix() {
        // 300 bytes, stem equal to the last 100: suffix/prefix drops are too
        // large on one side, but infix can split them.
        let mut word = vec![b'a'; 200];
        word.extend(std::iter::repeat_n(b'b', 100));
        let stem = vec![b'b'; 100];
        assert!(Codec::Suffix.encode(&word, &stem).is_err());
        let code = Codec::Infix.encode(&word, &stem).unwrap();
        assert_eq!(Codec::Infix.decode(&word, &code), stem);
    }

    #[test]
    fn infix_split_avoids_reserved_byte() {
        // The best split drops 234 leading bytes, whose count byte is '+'.
        let mut word = vec![b'q'; 234];
        word.extend_from_slice(b"abc");
        word.extend_from_slice(&[b'z'; 10]);

        let best = Codec::Infix.encode(&word, b"abc").unwrap();
        assert_eq!(best[0], b'+');

        let mut code = Vec::new();
        Codec::Infix
            .encode_into_avoiding(&word, b"abc", b'+', &mut code)
            .unwrap();
        assert!(!code.contains(&b'+'));
        assert_eq!(code[0], b'A');
        assert_eq!(Codec::Infix.decode(&word, &code), b"abc");
    }

    #[test]
    fn decode_clamps_oversized_counts() {
        // Drop count 'Z' (25) from a 3-byte word.
        assert_eq!(Codec::Suffix.decode(b"abc", b"Zx"), b"x");
        assert_eq!(Codec::Prefix.decode(b"abc", b"Zx"), b"x");
        assert_eq!(Codec::Infix.decode(b"abc", b"BZx"), b"x");
    }

    #[test]
    fn decode_tolerates_truncated_code() {
        assert_eq!(Codec::Suffix.decode(b"abc", b""), b"abc");
        assert_eq!(Codec::Infix.decode(b"abc", b"B"), b"bc");
    }

    #[test]
    fn names_round_trip() {
        for codec in ALL {
            assert_eq!(Codec::from_name(codec.name()), Some(codec));
        }
        assert_eq!(Codec::from_name("infix"), Some(Codec::Infix));
        assert_eq!(Codec::from_name("none"), None);
    }
}

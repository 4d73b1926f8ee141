// Byte encodings for dictionary text.
//
// Dictionaries store words, stems and tags as raw bytes. The charset decides
// how query text becomes bytes and how decoded bytes become text again.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Character set of a dictionary's byte sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    /// UTF-8 (multi-byte characters span several automaton arcs).
    #[default]
    Utf8,
    /// ISO-8859-1: one byte per character, code points U+0000..=U+00FF.
    Latin1,
    /// US-ASCII: one byte per character, code points below U+0080.
    Ascii,
}

impl Charset {
    /// Resolve a charset from its name.
    ///
    /// Matching ignores case, `-` and `_`, so `UTF-8`, `utf8`, `ISO-8859-1`,
    /// `iso8859-1` and `latin1` are all accepted.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "utf8" => Ok(Charset::Utf8),
            "iso88591" | "latin1" | "l1" | "cp819" => Ok(Charset::Latin1),
            "usascii" | "ascii" => Ok(Charset::Ascii),
            _ => Err(CoreError::UnknownCharset(name.to_string())),
        }
    }

    /// Canonical name of this charset.
    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Latin1 => "ISO-8859-1",
            Charset::Ascii => "US-ASCII",
        }
    }

    /// Encode `text`, appending the bytes to `out`.
    ///
    /// On error `out` may hold a partial encoding; callers clear it before reuse.
    pub fn encode_into(self, text: &str, out: &mut Vec<u8>) -> Result<(), CoreError> {
        match self {
            Charset::Utf8 => {
                out.extend_from_slice(text.as_bytes());
                Ok(())
            }
            Charset::Latin1 | Charset::Ascii => {
                for ch in text.chars() {
                    out.push(self.single_byte(ch).ok_or(CoreError::Unmappable {
                        ch,
                        charset: self.name(),
                    })?);
                }
                Ok(())
            }
        }
    }

    /// Encode `text` into a fresh buffer.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, CoreError> {
        let mut out = Vec::with_capacity(text.len());
        self.encode_into(text, &mut out)?;
        Ok(out)
    }

    /// Decode `bytes`, appending the text to `out`.
    ///
    /// Decoding never fails: invalid sequences become U+FFFD.
    pub fn decode_into(self, bytes: &[u8], out: &mut String) {
        match self {
            Charset::Utf8 => out.push_str(&String::from_utf8_lossy(bytes)),
            Charset::Latin1 => out.extend(bytes.iter().map(|&b| b as char)),
            Charset::Ascii => out.extend(bytes.iter().map(|&b| {
                if b.is_ascii() {
                    b as char
                } else {
                    char::REPLACEMENT_CHARACTER
                }
            })),
        }
    }

    /// Decode `bytes` into a fresh string.
    pub fn decode(self, bytes: &[u8]) -> String {
        let mut out = String::with_capacity(bytes.len());
        self.decode_into(bytes, &mut out);
        out
    }

    /// The single byte encoding `ch`, if there is one.
    ///
    /// Used to validate separator characters, which must occupy exactly one byte.
    pub fn single_byte(self, ch: char) -> Option<u8> {
        let cp = ch as u32;
        let limit = match self {
            Charset::Utf8 | Charset::Ascii => 0x80,
            Charset::Latin1 => 0x100,
        };
        (cp < limit).then_some(cp as u8)
    }
}

impl FromStr for Charset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Charset::from_name(s)
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

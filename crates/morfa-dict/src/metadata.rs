// Dictionary metadata
//
// Describes how the byte sequences of a dictionary automaton are laid out
// and how they map to text. Metadata is plain data (serializable with
// serde); it is checked and resolved into `Settings` when a dictionary is
// opened or built.

use morfa_core::charset::Charset;
use morfa_core::conversion::ConversionTable;
use serde::{Deserialize, Serialize};

use crate::DictError;
use crate::codec::Codec;
use crate::separator::Separator;

/// Declared properties of a dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DictionaryMetadata {
    /// Segment separator. Must encode to a single byte in `encoding`.
    pub separator: char,
    /// Stem compression codec.
    pub encoder: Codec,
    /// Charset name of words, stems and tags.
    pub encoding: String,
    /// Replacements applied to query words before lookup.
    pub input_conversion: Vec<(String, String)>,
    /// Replacements applied to decoded stems and tags.
    pub output_conversion: Vec<(String, String)>,
}

impl Default for DictionaryMetadata {
    fn default() -> Self {
        Self {
            separator: '+',
            encoder: Codec::Suffix,
            encoding: Charset::Utf8.name().to_string(),
            input_conversion: Vec::new(),
            output_conversion: Vec::new(),
        }
    }
}

impl DictionaryMetadata {
    pub fn builder() -> DictionaryMetadataBuilder {
        DictionaryMetadataBuilder::default()
    }

    /// Check the metadata and resolve it into runtime settings.
    pub(crate) fn resolve(&self) -> Result<Settings, DictError> {
        let charset = Charset::from_name(&self.encoding)?;
        let separator = charset.single_byte(self.separator).ok_or_else(|| {
            DictError::InvalidMetadata(format!(
                "separator {:?} is not a single byte in {charset}",
                self.separator
            ))
        })?;
        Ok(Settings {
            charset,
            separator: Separator::new(separator),
            codec: self.encoder,
            input: table(&self.input_conversion, "input")?,
            output: table(&self.output_conversion, "output")?,
        })
    }
}

fn table(pairs: &[(String, String)], which: &str) -> Result<ConversionTable, DictError> {
    ConversionTable::from_pairs(pairs.iter().cloned())
        .map_err(|e| DictError::InvalidMetadata(format!("{which} conversion: {e}")))
}

/// Builder for [`DictionaryMetadata`].
///
/// ```
/// use morfa_dict::{Codec, DictionaryMetadata};
///
/// let metadata = DictionaryMetadata::builder()
///     .encoder(Codec::Prefix)
///     .input_conversion("\\a", "ą")
///     .build();
/// assert_eq!(metadata.separator, '+');
/// assert_eq!(metadata.input_conversion.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DictionaryMetadataBuilder {
    metadata: DictionaryMetadata,
}

impl DictionaryMetadataBuilder {
    pub fn separator(mut self, separator: char) -> Self {
        self.metadata.separator = separator;
        self
    }

    pub fn encoder(mut self, codec: Codec) -> Self {
        self.metadata.encoder = codec;
        self
    }

    pub fn encoding(mut self, name: impl Into<String>) -> Self {
        self.metadata.encoding = name.into();
        self
    }

    /// Append an input replacement pair.
    pub fn input_conversion(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.metadata
            .input_conversion
            .push((from.into(), to.into()));
        self
    }

    /// Append an output replacement pair.
    pub fn output_conversion(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.metadata
            .output_conversion
            .push((from.into(), to.into()));
        self
    }

    pub fn build(self) -> DictionaryMetadata {
        self.metadata
    }
}

/// Metadata resolved for use at runtime.
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub charset: Charset,
    pub separator: Separator,
    pub codec: Codec,
    pub input: ConversionTable,
    pub output: ConversionTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = DictionaryMetadata::default().resolve().unwrap();
        assert_eq!(settings.charset, Charset::Utf8);
        assert_eq!(settings.separator.byte(), b'+');
        assert_eq!(settings.codec, Codec::Suffix);
        assert!(settings.input.is_empty());
        assert!(settings.output.is_empty());
    }

    #[test]
    fn latin1_separator_above_ascii() {
        let settings = DictionaryMetadata::builder()
            .encoding("ISO-8859-1")
            .separator('§')
            .build()
            .resolve()
            .unwrap();
        assert_eq!(settings.separator.byte(), 0xA7);
    }

    #[test]
    fn multibyte_separator_rejected() {
        let err = DictionaryMetadata::builder()
            .separator('§')
            .build()
            .resolve()
            .unwrap_err();
        assert!(matches!(err, DictError::InvalidMetadata(_)));
    }

    #[test]
    fn unknown_charset_rejected() {
        let err = DictionaryMetadata::builder()
            .encoding("EBCDIC")
            .build()
            .resolve()
            .unwrap_err();
        assert!(matches!(err, DictError::InvalidMetadata(_)));
    }

    #[test]
    fn duplicate_conversion_key_rejected() {
        let err = DictionaryMetadata::builder()
            .output_conversion("a", "b")
            .output_conversion("a", "c")
            .build()
            .resolve()
            .unwrap_err();
        match err {
            DictError::InvalidMetadata(msg) => assert!(msg.starts_with("output conversion")),
            other => panic!("expected InvalidMetadata, got {other:?}"),
        }
    }

    #[test]
    fn json_round_trip() {
        let metadata = DictionaryMetadata::builder()
            .encoder(Codec::Infix)
            .input_conversion("\\a", "ą")
            .build();
        let json = serde_json::to_string(&metadata).unwrap();
        assert!(json.contains("\"encoder\":\"INFIX\""));
        assert!(json.contains("\"input-conversion\""));
        let back: DictionaryMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metadata);
    }

    #[test]
    fn json_fills_missing_fields() {
        let metadata: DictionaryMetadata =
            serde_json::from_str(r#"{"encoder": "PREFIX"}"#).unwrap();
        assert_eq!(metadata.encoder, Codec::Prefix);
        assert_eq!(metadata.separator, '+');
        assert_eq!(metadata.encoding, "UTF-8");
    }
}

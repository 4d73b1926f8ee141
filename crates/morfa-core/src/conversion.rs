// Character-substitution tables
//
// Dictionaries may declare an input table (applied to query words before
// encoding) and an output table (applied to decoded stems and tags). Both
// are plain ordered `(from, to)` pairs supplied by the caller.

use std::borrow::Cow;

use hashbrown::HashMap;

use crate::CoreError;

/// An ordered set of string substitutions.
///
/// Replacement is a single left-to-right pass: at each position the longest
/// matching `from` key is replaced and scanning resumes after it. Replaced
/// text is never rescanned, so tables cannot cascade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionTable {
    /// Candidate pairs grouped by the first character of `from`, longest key first.
    by_first_char: HashMap<char, Vec<(String, String)>>,
    len: usize,
}

impl ConversionTable {
    /// Create an empty table (identity conversion).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(from, to)` pairs.
    ///
    /// Fails on an empty `from` key or a key listed twice.
    pub fn from_pairs<I, F, T>(pairs: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (F, T)>,
        F: Into<String>,
        T: Into<String>,
    {
        let mut by_first_char: HashMap<char, Vec<(String, String)>> = HashMap::new();
        let mut len = 0;
        for (from, to) in pairs {
            let from = from.into();
            let Some(first) = from.chars().next() else {
                return Err(CoreError::InvalidConversion(
                    "empty replacement key".to_string(),
                ));
            };
            let bucket = by_first_char.entry(first).or_default();
            if bucket.iter().any(|(existing, _)| *existing == from) {
                return Err(CoreError::InvalidConversion(format!(
                    "duplicate replacement key {from:?}"
                )));
            }
            bucket.push((from, to.into()));
            len += 1;
        }
        for bucket in by_first_char.values_mut() {
            // Stable: equal-length keys keep their declaration order.
            bucket.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        }
        Ok(Self { by_first_char, len })
    }

    /// Number of substitution pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table performs no substitutions.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Apply the substitutions to `input`.
    ///
    /// Borrows the input unchanged when nothing matches.
    pub fn apply<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if self.is_empty() {
            return Cow::Borrowed(input);
        }

        let mut output: Option<String> = None;
        let mut copied_until = 0;
        let mut pos = 0;
        while pos < input.len() {
            let rest = &input[pos..];
            let Some(first) = rest.chars().next() else {
                break;
            };
            let hit = self.by_first_char.get(&first).and_then(|bucket| {
                bucket
                    .iter()
                    .find(|(from, _)| rest.starts_with(from.as_str()))
            });
            match hit {
                Some((from, to)) => {
                    let out = output.get_or_insert_with(|| String::with_capacity(input.len()));
                    out.push_str(&input[copied_until..pos]);
                    out.push_str(to);
                    pos += from.len();
                    copied_until = pos;
                }
                None => pos += first.len_utf8(),
            }
        }

        match output {
            Some(mut out) => {
                out.push_str(&input[copied_until..]);
                Cow::Owned(out)
            }
            None => Cow::Borrowed(input),
        }
    }
}

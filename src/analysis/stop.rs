//! Stop filter for address words.
//!
//! Removes generic words ("город", "улица", ...) that appear in nearly every
//! address and would otherwise swamp the match expression.
//!
//! # Examples
//!
//! ```
//! use address_resolver::analysis::stop::StopFilter;
//!
//! let filter = StopFilter::new();
//! let words = filter.filter_words(["город", "москва", "улица", "арбат"]);
//! assert_eq!(words, vec!["москва", "арбат"]);
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use crate::error::{ResolverError, Result};

/// Generic Russian address words.
const DEFAULT_RUSSIAN_STOP_WORDS: &[&str] = &[
    "россия",
    "российская",
    "федерация",
    "республика",
    "область",
    "край",
    "округ",
    "район",
    "город",
    "поселок",
    "посёлок",
    "деревня",
    "село",
    "улица",
    "проспект",
    "переулок",
    "проезд",
    "шоссе",
    "бульвар",
    "набережная",
    "площадь",
    "тупик",
    "аллея",
    "микрорайон",
    "дом",
    "корпус",
    "строение",
    "литера",
    "квартира",
    "офис",
];

/// Default Russian stop words as a HashSet.
pub static DEFAULT_RUSSIAN_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_RUSSIAN_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// A filter that removes stop words.
///
/// Matching is exact: a word is removed only if the set holds it in the same
/// case.
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: Arc<HashSet<String>>,
}

impl StopFilter {
    /// Create a new stop filter with the default Russian stop words.
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_RUSSIAN_STOP_WORDS_SET.clone())
    }

    /// Create a new stop filter with custom stop words.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Create a new stop filter from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stop_words = words.into_iter().map(|s| s.into()).collect();
        Self::with_stop_words(stop_words)
    }

    /// Load stop words from a JSON array of strings.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            ResolverError::analysis(format!(
                "Failed to open stop words file {}: {e}",
                path.display()
            ))
        })?;
        let words: Vec<String> = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self::from_words(words))
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Keep the words that are not stop words, in order.
    pub fn filter_words<I, S>(&self, words: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        words
            .into_iter()
            .map(Into::into)
            .filter(|word| !self.is_stop_word(word))
            .collect()
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

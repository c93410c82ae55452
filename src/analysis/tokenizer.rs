//! Tokenizers for address lines.

use std::sync::Arc;

use regex::Regex;

use crate::error::{ResolverError, Result};

/// Letter runs, digit runs, and runs of everything else except whitespace.
pub const ADDRESS_TOKEN_PATTERN: &str = r"[а-яА-ЯёЁa-zA-Z]+|\d+|[^а-яА-ЯёЁa-zA-Z0-9\s]+";

/// Default minimum token length; shorter or equal tokens are dropped.
pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 3;

/// Splits an address line into letter, digit and symbol runs and keeps the
/// ones longer than `min_length` chars.
#[derive(Clone, Debug)]
pub struct AddressTokenizer {
    pattern: Arc<Regex>,
    min_length: usize,
}

impl AddressTokenizer {
    /// Create a tokenizer with the default pattern and minimum length.
    pub fn new() -> Result<Self> {
        Self::with_pattern(ADDRESS_TOKEN_PATTERN, DEFAULT_MIN_TOKEN_LENGTH)
    }

    /// Create a tokenizer with the default pattern and a custom minimum length.
    pub fn with_min_length(min_length: usize) -> Result<Self> {
        Self::with_pattern(ADDRESS_TOKEN_PATTERN, min_length)
    }

    /// Create a tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str, min_length: usize) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| ResolverError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(AddressTokenizer {
            pattern: Arc::new(regex),
            min_length,
        })
    }

    /// Split `text` into the token texts kept by this tokenizer, in order.
    pub fn words(&self, text: &str) -> Vec<String> {
        self.pattern
            .find_iter(text)
            .map(|mat| mat.as_str())
            .filter(|token| token.chars().count() > self.min_length)
            .map(str::to_string)
            .collect()
    }
}

impl Default for AddressTokenizer {
    fn default() -> Self {
        Self::new().expect("Default address pattern should be valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_tokenizer() {
        let tokenizer = AddressTokenizer::new().unwrap();
        assert_eq!(
            tokenizer.words("Москва, ул. Маршала Жукова 123456"),
            vec!["Москва", "Маршала", "Жукова", "123456"]
        );
    }

    #[test]
    fn test_splits_mixed_runs() {
        let tokenizer = AddressTokenizer::with_min_length(0).unwrap();
        assert_eq!(
            tokenizer.words("дом12корп,,,3"),
            vec!["дом", "12", "корп", ",,,", "3"]
        );
    }

    #[test]
    fn test_min_length_counts_chars() {
        let tokenizer = AddressTokenizer::new().unwrap();
        assert_eq!(tokenizer.words("обл улица ул 1234 !!!!"), vec!["улица", "1234", "!!!!"]);
        assert!(tokenizer.words("").is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(AddressTokenizer::with_pattern("(", 3).is_err());
    }

    #[test]
    fn test_custom_pattern() {
        let tokenizer = AddressTokenizer::with_pattern(r"\d+", 0).unwrap();
        assert_eq!(tokenizer.words("дом 12 корп 3"), vec!["12", "3"]);
    }
}

//! Word frequency dictionary for address spelling correction.
//!
//! The dictionary maps normalized (lowercased) address words to the number of
//! times they occur in a reference address corpus. It is loaded once and is
//! read-only afterwards, so a single instance can be shared behind an `Arc`
//! by any number of concurrent correctors.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use tracing::warn;

use crate::error::{ResolverError, Result};

/// Lookup capability used by the corrector to score words.
pub trait WordFrequencies: Send + Sync {
    /// Frequency of `word`, or `None` when the word is not in the dictionary.
    fn lookup(&self, word: &str) -> Option<u32>;
}

impl<T: WordFrequencies + ?Sized> WordFrequencies for Arc<T> {
    fn lookup(&self, word: &str) -> Option<u32> {
        (**self).lookup(word)
    }
}

impl WordFrequencies for HashMap<String, u32> {
    fn lookup(&self, word: &str) -> Option<u32> {
        self.get(word).copied()
    }
}

/// A dictionary that stores words and their frequencies.
#[derive(Debug, Clone, Default)]
pub struct SpellingDictionary {
    /// Words and their frequencies
    words: AHashMap<String, u32>,
    /// Total word count
    total_count: u64,
}

impl SpellingDictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from `(word, frequency)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut dictionary = SpellingDictionary::new();
        for (word, frequency) in pairs {
            dictionary.add_word(word, frequency);
        }
        dictionary
    }

    /// Add a word with the given frequency, replacing any previous value.
    pub fn add_word<S: Into<String>>(&mut self, word: S, frequency: u32) {
        let normalized = word.into().to_lowercase();

        let old_freq = self.words.insert(normalized, frequency).unwrap_or(0);
        self.total_count = self.total_count - old_freq as u64 + frequency as u64;
    }

    /// Increment the frequency of a word by 1.
    pub fn increment_word(&mut self, word: &str) {
        let current = self.frequency(word);
        self.add_word(word, current + 1);
    }

    /// Check if a word exists in the dictionary.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(&word.to_lowercase())
    }

    /// Get the frequency of a word, 0 when absent.
    pub fn frequency(&self, word: &str) -> u32 {
        self.lookup(word).unwrap_or(0)
    }

    /// Iterate over all words and their frequencies.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.words.iter().map(|(word, freq)| (word.as_str(), *freq))
    }

    /// Get the total number of unique words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Get the total frequency count.
    pub fn total_frequency(&self) -> u64 {
        self.total_count
    }

    /// Check if the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Load a plain word list, one word per line. Repeated words accumulate
    /// frequency.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut dictionary = SpellingDictionary::new();
        let reader = BufReader::new(File::open(path)?);

        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() && word.chars().all(|c| c.is_alphabetic()) {
                dictionary.increment_word(word);
            }
        }

        Ok(dictionary)
    }

    /// Load a frequency file with "word frequency" per line.
    pub fn load_from_frequency_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut dictionary = SpellingDictionary::new();
        let reader = BufReader::new(File::open(path)?);

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 2 {
                continue;
            }

            match parts[1].parse::<u32>() {
                Ok(frequency) if parts[0].chars().all(|c| c.is_alphabetic()) => {
                    dictionary.add_word(parts[0], frequency);
                }
                Ok(_) => {}
                Err(e) => warn!("skipping line {}: bad frequency: {e}", line_num + 1),
            }
        }

        Ok(dictionary)
    }

    /// Load a frequency table, picking the format from the extension:
    /// `.json` files hold a JSON object, anything else "word frequency"
    /// lines.
    pub fn load_frequencies<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::load_from_json_file(path)
        } else {
            Self::load_from_frequency_file(path)
        }
    }

    /// Load a JSON object mapping words to frequencies.
    pub fn load_from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let counted: HashMap<String, u32> = serde_json::from_reader(reader)?;
        Self::from_json_map(counted)
    }

    /// Parse a JSON object mapping words to frequencies.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let counted: HashMap<String, u32> = serde_json::from_str(json)?;
        Self::from_json_map(counted)
    }

    fn from_json_map(counted: HashMap<String, u32>) -> Result<Self> {
        if counted.keys().any(|word| word.is_empty()) {
            return Err(ResolverError::dictionary("empty word in frequency table"));
        }
        Ok(Self::from_pairs(counted))
    }

    /// Merge another dictionary into this one, summing frequencies.
    pub fn merge(&mut self, other: &SpellingDictionary) {
        for (word, frequency) in other.iter() {
            let current = self.frequency(word);
            self.add_word(word, current.saturating_add(frequency));
        }
    }
}

impl WordFrequencies for SpellingDictionary {
    fn lookup(&self, word: &str) -> Option<u32> {
        self.words.get(&word.to_lowercase()).copied()
    }
}

/// Built-in dictionaries.
pub struct BuiltinDictionary;

impl BuiltinDictionary {
    /// A small table of common address words, used when no frequency
    /// dictionary is configured.
    pub fn address_terms() -> SpellingDictionary {
        SpellingDictionary::from_pairs([
            ("россия", 5000),
            ("москва", 4000),
            ("московская", 2500),
            ("область", 3000),
            ("обл", 2000),
            ("город", 3500),
            ("край", 900),
            ("район", 2800),
            ("улица", 4500),
            ("ул", 3000),
            ("проспект", 1200),
            ("пр", 800),
            ("переулок", 1100),
            ("пер", 700),
            ("шоссе", 600),
            ("бульвар", 500),
            ("набережная", 450),
            ("площадь", 400),
            ("проезд", 650),
            ("поселок", 1500),
            ("село", 1400),
            ("деревня", 1300),
            ("микрорайон", 300),
            ("дом", 2000),
            ("корпус", 900),
            ("строение", 700),
            ("квартира", 1000),
            ("ленина", 1800),
            ("мира", 900),
            ("советская", 1000),
            ("центральная", 800),
            ("садовая", 600),
            ("лесная", 550),
            ("маршала", 300),
            ("жукова", 250),
            ("гагарина", 700),
            ("пушкина", 650),
            ("комсомольская", 600),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_dictionary_basic_operations() {
        let mut dict = SpellingDictionary::new();

        assert!(!dict.contains("москва"));
        assert_eq!(dict.lookup("москва"), None);
        assert_eq!(dict.word_count(), 0);

        dict.add_word("москва", 5);
        assert!(dict.contains("москва"));
        assert_eq!(dict.lookup("москва"), Some(5));
        assert_eq!(dict.total_frequency(), 5);

        dict.increment_word("москва");
        assert_eq!(dict.frequency("москва"), 6);
        assert_eq!(dict.total_frequency(), 6);

        dict.add_word("обл", 3);
        assert_eq!(dict.word_count(), 2);
        assert_eq!(dict.total_frequency(), 9);
    }

    #[test]
    fn test_dictionary_case_insensitive() {
        let mut dict = SpellingDictionary::new();

        dict.add_word("Москва", 5);
        assert!(dict.contains("москва"));
        assert!(dict.contains("МОСКВА"));
        assert_eq!(dict.lookup("МоСкВа"), Some(5));
    }

    #[test]
    fn test_zero_frequency_is_present() {
        let dict = SpellingDictionary::from_pairs([("тупик", 0)]);
        assert_eq!(dict.lookup("тупик"), Some(0));
        assert_eq!(dict.lookup("тупики"), None);
    }

    #[test]
    fn test_merge_dictionaries() {
        let mut dict1 = SpellingDictionary::from_pairs([("улица", 5), ("дом", 3)]);
        let dict2 = SpellingDictionary::from_pairs([("улица", 2), ("корпус", 4)]);

        dict1.merge(&dict2);

        assert_eq!(dict1.frequency("улица"), 7);
        assert_eq!(dict1.frequency("дом"), 3);
        assert_eq!(dict1.frequency("корпус"), 4);
        assert_eq!(dict1.word_count(), 3);
    }

    #[test]
    fn test_load_from_simple_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "москва").unwrap();
        writeln!(temp_file, "обл").unwrap();
        writeln!(temp_file, "москва").unwrap();
        writeln!(temp_file, "123").unwrap();
        temp_file.flush().unwrap();

        let dict = SpellingDictionary::load_from_file(temp_file.path()).unwrap();
        assert_eq!(dict.frequency("москва"), 2);
        assert_eq!(dict.frequency("обл"), 1);
        assert_eq!(dict.word_count(), 2);
    }

    #[test]
    fn test_load_from_frequency_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "москва 500").unwrap();
        writeln!(temp_file, "жукова 50").unwrap();
        writeln!(temp_file, "broken").unwrap();
        writeln!(temp_file, "маршала many").unwrap();
        temp_file.flush().unwrap();

        let dict = SpellingDictionary::load_from_frequency_file(temp_file.path()).unwrap();
        assert_eq!(dict.lookup("москва"), Some(500));
        assert_eq!(dict.lookup("жукова"), Some(50));
        assert_eq!(dict.lookup("маршала"), None);
        assert_eq!(dict.word_count(), 2);
    }

    #[test]
    fn test_load_from_json_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, r#"{{"москва": 500, "виноградный": 70}}"#).unwrap();
        temp_file.flush().unwrap();

        let dict = SpellingDictionary::load_from_json_file(temp_file.path()).unwrap();
        assert_eq!(dict.lookup("москва"), Some(500));
        assert_eq!(dict.lookup("виноградный"), Some(70));
    }

    #[test]
    fn test_load_frequencies_by_extension() {
        let dir = tempfile::TempDir::new().unwrap();

        let json_path = dir.path().join("counted.json");
        std::fs::write(&json_path, r#"{"арбат": 40}"#).unwrap();
        let dict = SpellingDictionary::load_frequencies(&json_path).unwrap();
        assert_eq!(dict.lookup("арбат"), Some(40));

        let text_path = dir.path().join("counted.txt");
        std::fs::write(&text_path, "арбат 40\nтверская 30\n").unwrap();
        let dict = SpellingDictionary::load_frequencies(&text_path).unwrap();
        assert_eq!(dict.lookup("тверская"), Some(30));
        assert_eq!(dict.word_count(), 2);
    }

    #[test]
    fn test_json_rejects_bad_input() {
        assert!(SpellingDictionary::from_json_str(r#"{"москва": -1}"#).is_err());
        assert!(SpellingDictionary::from_json_str(r#"{"": 1}"#).is_err());
        assert!(SpellingDictionary::from_json_str("[]").is_err());
    }

    #[test]
    fn test_builtin_dictionary() {
        let dict = BuiltinDictionary::address_terms();
        assert!(dict.contains("москва"));
        assert!(dict.contains("улица"));
        assert!(dict.word_count() > 30);
    }
}

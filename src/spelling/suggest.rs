//! Fuzzy spelling suggestions over a frequency dictionary.
//!
//! The corrector only depends on the [`SuggestionSource`] capability; the
//! [`SuggestionEngine`] here is the in-crate implementation, a bounded
//! edit-distance search with keyboard-aware scoring.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::spelling::dictionary::{SpellingDictionary, WordFrequencies};
use crate::spelling::levenshtein::LevenshteinMatcher;
use crate::spelling::typo_patterns::{CYRILLIC_LETTERS, LATIN_LETTERS, TypoPatterns, is_cyrillic};

/// Suggestion capability used by the corrector.
///
/// Returns candidate corrections in the engine's own order; no frequency
/// ordering is implied.
pub trait SuggestionSource: Send + Sync {
    /// Candidate corrections for `word`.
    fn suggest(&self, word: &str) -> Vec<String>;
}

impl<T: SuggestionSource + ?Sized> SuggestionSource for Arc<T> {
    fn suggest(&self, word: &str) -> Vec<String> {
        (**self).suggest(word)
    }
}

/// Fixed suggestion table, mainly for tests and tooling.
impl SuggestionSource for HashMap<String, Vec<String>> {
    fn suggest(&self, word: &str) -> Vec<String> {
        self.get(word).cloned().unwrap_or_default()
    }
}

/// A spelling suggestion with a score indicating confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The suggested word.
    pub word: String,
    /// Confidence score (higher is better, 0.0 to 1.0).
    pub score: f64,
    /// Edit distance from the original word.
    pub distance: usize,
    /// Frequency of the suggested word in the dictionary.
    pub frequency: u32,
}

impl Suggestion {
    /// Create a new suggestion.
    pub fn new(word: String, score: f64, distance: usize, frequency: u32) -> Self {
        Suggestion {
            word,
            score,
            distance,
            frequency,
        }
    }
}

impl Eq for Suggestion {}

impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        // Best first: higher score, then smaller distance, then the word
        // itself so equal-scored candidates come out in a stable order.
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.distance.cmp(&other.distance))
            .then_with(|| self.word.cmp(&other.word))
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Configuration for spelling suggestion generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Maximum edit distance to consider.
    pub max_distance: usize,
    /// Maximum number of suggestions to return.
    pub max_suggestions: usize,
    /// Minimum frequency threshold for suggestions.
    pub min_frequency: u32,
    /// Only return candidates at the smallest edit distance found.
    pub closest_only: bool,
    /// Weight for edit distance in scoring (0.0 to 1.0).
    pub distance_weight: f64,
    /// Weight for word frequency in scoring (0.0 to 1.0).
    pub frequency_weight: f64,
    /// Whether to use keyboard distance for better typo detection.
    pub use_keyboard_distance: bool,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        SuggestionConfig {
            max_distance: 2,
            max_suggestions: 5,
            min_frequency: 0,
            closest_only: true,
            distance_weight: 0.6,
            frequency_weight: 0.4,
            use_keyboard_distance: true,
        }
    }
}

/// Edit-distance suggestion engine over a shared dictionary.
pub struct SuggestionEngine {
    dictionary: Arc<SpellingDictionary>,
    config: SuggestionConfig,
}

impl SuggestionEngine {
    /// Create a new suggestion engine with the given dictionary.
    pub fn new(dictionary: Arc<SpellingDictionary>) -> Self {
        Self::with_config(dictionary, SuggestionConfig::default())
    }

    /// Create a new suggestion engine with custom configuration.
    pub fn with_config(dictionary: Arc<SpellingDictionary>, config: SuggestionConfig) -> Self {
        SuggestionEngine { dictionary, config }
    }

    /// The engine configuration.
    pub fn config(&self) -> &SuggestionConfig {
        &self.config
    }

    /// Get scored suggestions for a potentially misspelled word, best first.
    pub fn suggest_scored(&self, word: &str) -> Vec<Suggestion> {
        let word_lower = word.to_lowercase();
        if word_lower.is_empty() {
            return Vec::new();
        }

        if let Some(frequency) = self.dictionary.lookup(&word_lower) {
            return vec![Suggestion::new(word_lower, 1.0, 0, frequency)];
        }

        let matcher = LevenshteinMatcher::new(&word_lower);
        let mut suggestions: Vec<Suggestion> = self
            .generate_candidates(&word_lower, matcher.len())
            .into_iter()
            .filter_map(|candidate| {
                let distance = matcher.distance_threshold(&candidate, self.config.max_distance)?;
                let frequency = self.dictionary.frequency(&candidate);
                if frequency < self.config.min_frequency {
                    return None;
                }
                let score = self.calculate_score(&word_lower, &candidate, distance, frequency);
                Some(Suggestion::new(candidate, score, distance, frequency))
            })
            .collect();

        if self.config.closest_only {
            if let Some(closest) = suggestions.iter().map(|s| s.distance).min() {
                suggestions.retain(|s| s.distance == closest);
            }
        }

        suggestions.sort();
        suggestions.truncate(self.config.max_suggestions);
        suggestions
    }

    /// Dictionary words that may lie within `max_distance` of `word`.
    fn generate_candidates(&self, word: &str, word_len: usize) -> AHashSet<String> {
        let mut candidates: AHashSet<String> = self
            .generate_edits(word)
            .into_iter()
            .filter(|edit| self.dictionary.contains(edit))
            .collect();

        // Beyond one edit the edit set explodes, so scan the dictionary
        // for words in the reachable length window instead.
        if self.config.max_distance >= 2 {
            candidates.extend(
                self.dictionary
                    .iter()
                    .filter(|(entry, _)| {
                        entry.chars().count().abs_diff(word_len) <= self.config.max_distance
                    })
                    .map(|(entry, _)| entry.to_string()),
            );
        }

        candidates
    }

    /// Generate all single edits of a word over the alphabet(s) it uses.
    fn generate_edits(&self, word: &str) -> AHashSet<String> {
        let chars: Vec<char> = word.chars().collect();
        let len = chars.len();
        let alphabet = Self::alphabet_for(&chars);
        let mut edits = AHashSet::new();

        // Deletions
        for i in 0..len {
            let mut new_word = chars.clone();
            new_word.remove(i);
            edits.insert(new_word.into_iter().collect());
        }

        // Transpositions
        for i in 0..len.saturating_sub(1) {
            let mut new_word = chars.clone();
            new_word.swap(i, i + 1);
            edits.insert(new_word.into_iter().collect());
        }

        // Replacements
        for i in 0..len {
            for &ch in &alphabet {
                if ch != chars[i] {
                    let mut new_word = chars.clone();
                    new_word[i] = ch;
                    edits.insert(new_word.into_iter().collect());
                }
            }
        }

        // Insertions
        for i in 0..=len {
            for &ch in &alphabet {
                let mut new_word = chars.clone();
                new_word.insert(i, ch);
                edits.insert(new_word.into_iter().collect());
            }
        }

        edits
    }

    /// Cyrillic letters for Cyrillic words, Latin for Latin words, both for
    /// mixed-script words (a Latin letter typed on the wrong layout).
    fn alphabet_for(chars: &[char]) -> Vec<char> {
        let has_cyrillic = chars.iter().any(|&c| is_cyrillic(c));
        let has_latin = chars.iter().any(|c| c.is_ascii_alphabetic());

        let mut alphabet = Vec::new();
        if has_cyrillic || !has_latin {
            alphabet.extend(CYRILLIC_LETTERS.chars());
        }
        if has_latin || !has_cyrillic {
            alphabet.extend(LATIN_LETTERS.chars());
        }
        alphabet
    }

    /// Calculate a confidence score for a suggestion.
    fn calculate_score(
        &self,
        original: &str,
        candidate: &str,
        distance: usize,
        frequency: u32,
    ) -> f64 {
        let distance_score = 1.0 / (1.0 + distance as f64);

        // Logarithmic so very common words do not dominate.
        let total = self.dictionary.total_frequency() as f64;
        let frequency_score = if frequency <= 1 || total <= 1.0 {
            0.0
        } else {
            ((frequency as f64).ln() / total.ln()).min(1.0)
        };

        let length_penalty = if original.chars().count() == candidate.chars().count() {
            1.0
        } else {
            0.9
        };

        let prefix_bonus = Self::calculate_prefix_bonus(original, candidate);

        let keyboard_bonus = if self.config.use_keyboard_distance
            && TypoPatterns::keyboard_distance(original, candidate) < distance as f64
        {
            1.1
        } else {
            1.0
        };

        let base_score = distance_score * self.config.distance_weight
            + frequency_score * self.config.frequency_weight;

        (base_score * length_penalty * prefix_bonus * keyboard_bonus).min(1.0)
    }

    /// Bonus in `[1.0, 1.2]` for a shared prefix.
    fn calculate_prefix_bonus(original: &str, candidate: &str) -> f64 {
        let common_prefix_len = original
            .chars()
            .zip(candidate.chars())
            .take_while(|(a, b)| a == b)
            .count();

        let max_len = original.chars().count().max(candidate.chars().count());
        if max_len == 0 {
            return 1.0;
        }

        1.0 + (common_prefix_len as f64 / max_len as f64) * 0.2
    }
}

impl SuggestionSource for SuggestionEngine {
    fn suggest(&self, word: &str) -> Vec<String> {
        self.suggest_scored(word)
            .into_iter()
            .map(|suggestion| suggestion.word)
            .collect()
    }
}

//! Dictionary-driven word corrector for address tokens.
//!
//! [`SpellChecker::check_words`] walks the token sequence with one token of
//! lookahead and applies, in priority order:
//!
//! 1. pairwise merge of two tokens that form one dictionary word,
//! 2. pairwise re-split of two tokens whose boundary is misplaced,
//! 3. split of a single token that holds two words run together,
//! 4. plain correction of a single token.
//!
//! Tokens that cannot be read as words, or that have no usable correction,
//! are dropped silently. The corrector never fails on input.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::spelling::dictionary::WordFrequencies;
use crate::spelling::suggest::SuggestionSource;
use crate::spelling::typo_patterns::is_supported_letter;

/// Outcome of checking a single word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// The word is in the dictionary as typed.
    Good,
    /// The word was replaced by a fuzzy suggestion.
    Misspelling,
    /// The word looks like a word but has no usable correction.
    NotFound,
    /// The input is absent, empty, or has chars outside the two alphabets.
    NotWord,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckStatus::Good => "good",
            CheckStatus::Misspelling => "misspelling",
            CheckStatus::NotFound => "not found",
            CheckStatus::NotWord => "not word",
        };
        f.write_str(name)
    }
}

/// The result of checking one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// How the word was classified.
    pub status: CheckStatus,
    /// The word to emit, if any.
    pub corrected_word: Option<String>,
    /// The word as it was checked.
    pub original_word: Option<String>,
    /// Dictionary frequency of `corrected_word`, 0 if none.
    pub score: u32,
}

impl CheckResult {
    /// Create a new check result.
    pub fn new(
        status: CheckStatus,
        corrected_word: Option<String>,
        original_word: Option<String>,
        score: u32,
    ) -> Self {
        CheckResult {
            status,
            corrected_word,
            original_word,
            score,
        }
    }

    /// A dictionary word, kept as typed.
    pub fn good<S: Into<String>>(word: S, score: u32) -> Self {
        let word = word.into();
        CheckResult::new(CheckStatus::Good, Some(word.clone()), Some(word), score)
    }

    /// A word with no usable correction.
    pub fn not_found(original: Option<&str>) -> Self {
        CheckResult::new(CheckStatus::NotFound, None, original.map(str::to_string), 0)
    }

    /// Input that is not a word.
    pub fn not_word(original: Option<&str>) -> Self {
        CheckResult::new(CheckStatus::NotWord, None, original.map(str::to_string), 0)
    }

    /// Whether the word was found as typed.
    pub fn is_good(&self) -> bool {
        self.status == CheckStatus::Good
    }

    /// Whether the word was replaced by a suggestion.
    pub fn is_misspelling(&self) -> bool {
        self.status == CheckStatus::Misspelling
    }

    /// Whether the input could be read as a word at all.
    pub fn is_word(&self) -> bool {
        self.status != CheckStatus::NotWord
    }

    fn original(&self) -> &str {
        self.original_word.as_deref().unwrap_or_default()
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {} - {}",
            self.status,
            self.corrected_word.as_deref().unwrap_or("-"),
            self.original_word.as_deref().unwrap_or("-"),
            self.score
        )
    }
}

/// Highest score among `results`, 0 when there are none.
pub fn max_score<'a, I>(results: I) -> u32
where
    I: IntoIterator<Item = &'a CheckResult>,
{
    results
        .into_iter()
        .map(|result| result.score)
        .max()
        .unwrap_or(0)
}

/// Configuration for the word corrector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// Words shorter than this (in chars) never get fuzzy suggestions.
    pub min_length_for_fuzzy: usize,
    /// Whether the current token in `check_words` gets fuzzy suggestions.
    pub fuzzy_for_tokens: bool,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig {
            min_length_for_fuzzy: 2,
            fuzzy_for_tokens: true,
        }
    }
}

/// A split of one string into two dictionary words.
pub type ShuffleResult = (Option<[CheckResult; 2]>, u32);

/// Word corrector over a frequency table and a suggestion source.
pub struct SpellChecker<F, S> {
    frequencies: F,
    suggestions: S,
    config: CorrectorConfig,
}

impl<F, S> SpellChecker<F, S>
where
    F: WordFrequencies,
    S: SuggestionSource,
{
    /// Create a corrector with the default configuration.
    pub fn new(frequencies: F, suggestions: S) -> Self {
        Self::with_config(frequencies, suggestions, CorrectorConfig::default())
    }

    /// Create a corrector with a custom configuration.
    pub fn with_config(frequencies: F, suggestions: S, config: CorrectorConfig) -> Self {
        SpellChecker {
            frequencies,
            suggestions,
            config,
        }
    }

    /// The corrector configuration.
    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    /// Check a single word using the configured minimum fuzzy length.
    pub fn check_word(&self, word: Option<&str>, allow_fuzzy: bool) -> CheckResult {
        self.check_word_with_min_length(word, allow_fuzzy, self.config.min_length_for_fuzzy)
    }

    /// Check a single word.
    ///
    /// Exact dictionary hits are `Good`. Otherwise, when `allow_fuzzy` is set
    /// and the word has at least `min_length_for_fuzzy` chars, the suggestion
    /// with the highest dictionary frequency wins (first one on ties).
    pub fn check_word_with_min_length(
        &self,
        word: Option<&str>,
        allow_fuzzy: bool,
        min_length_for_fuzzy: usize,
    ) -> CheckResult {
        let Some(word) = word.filter(|w| !w.is_empty() && w.chars().all(is_supported_letter))
        else {
            return CheckResult::not_word(word);
        };

        if let Some(score) = self.frequencies.lookup(word) {
            return CheckResult::good(word, score);
        }

        if allow_fuzzy && word.chars().count() >= min_length_for_fuzzy {
            let mut best: Option<(String, u32)> = None;
            for candidate in self.suggestions.suggest(word) {
                let score = self.frequencies.lookup(&candidate).unwrap_or(0);
                if best.as_ref().is_none_or(|(_, best_score)| score > *best_score) {
                    best = Some((candidate, score));
                }
            }

            if let Some((corrected, score)) = best {
                return CheckResult::new(
                    CheckStatus::Misspelling,
                    Some(corrected),
                    Some(word.to_string()),
                    score,
                );
            }
        }

        CheckResult::not_found(Some(word))
    }

    /// Correct a token sequence, returning the words to keep.
    pub fn check_words<T: AsRef<str>>(&self, tokens: &[T]) -> Vec<String> {
        let mut corrected = Vec::with_capacity(tokens.len());
        let mut index = 0;

        while index < tokens.len() {
            let first = self.check_token(tokens[index].as_ref());

            if let Some(next) = tokens.get(index + 1) {
                // The lookahead token is only scored, never corrected here.
                let second = self.check_word(Some(next.as_ref()), false);
                if let Some(words) = self.repair_pair(&first, &second) {
                    debug!(
                        "repaired pair {:?} + {:?} -> {:?}",
                        first.original_word, second.original_word, words
                    );
                    corrected.extend(words);
                    index += 2;
                    continue;
                }
            }

            if first.is_word() && !first.is_good() {
                if let (Some(pair), score) = self.shuffle_symbols(first.original(), None) {
                    if score >= first.score {
                        debug!("split {:?} at score {score}", first.original_word);
                        corrected.extend(pair.into_iter().filter_map(|cw| cw.corrected_word));
                        index += 1;
                        continue;
                    }
                }
            }

            if first.is_good() || first.is_misspelling() {
                corrected.extend(first.corrected_word);
            } else {
                debug!("dropped token {:?} ({})", first.original_word, first.status);
            }
            index += 1;
        }

        corrected
    }

    fn check_token(&self, token: &str) -> CheckResult {
        self.check_word(Some(token), self.config.fuzzy_for_tokens)
    }

    /// Merge or re-split two adjacent tokens. Returns the words to emit
    /// when either repair is accepted.
    fn repair_pair(&self, first: &CheckResult, second: &CheckResult) -> Option<Vec<String>> {
        if !first.is_word() || !second.is_word() {
            return None;
        }

        let best_single = max_score([first, second]);

        // Only a `Good` merge is accepted, so suggestions could never change
        // the outcome here.
        let joined = format!("{}{}", first.original(), second.original());
        let merged = self.check_word(Some(&joined), false);
        if merged.is_good()
            && (merged.score > best_single
                || merged.corrected_word == first.corrected_word
                || merged.corrected_word == second.corrected_word)
        {
            return merged.corrected_word.map(|word| vec![word]);
        }

        if !first.is_good() || !second.is_good() {
            if let (Some(pair), score) =
                self.shuffle_symbols(first.original(), Some(second.original()))
            {
                if score > best_single {
                    return Some(pair.into_iter().filter_map(|cw| cw.corrected_word).collect());
                }
            }
        }

        None
    }

    /// Find the split of `word1 + word2` into two dictionary words with the
    /// highest score.
    ///
    /// Every split point leaving both halves non-empty is tried in ascending
    /// order; ties keep the first split found. Returns `(None, 0)` when no
    /// split yields two `Good` halves.
    pub fn shuffle_symbols(&self, word1: &str, word2: Option<&str>) -> ShuffleResult {
        let combined = format!("{word1}{}", word2.unwrap_or_default());
        let mut best: ShuffleResult = (None, 0);

        for (split, _) in combined.char_indices().skip(1) {
            let (head, tail) = combined.split_at(split);

            // Only `Good` halves count; suggestions cannot produce one.
            let head = self.check_word(Some(head), false);
            if !head.is_good() {
                continue;
            }
            let tail = self.check_word(Some(tail), false);
            if !tail.is_good() {
                continue;
            }

            let score = max_score([&head, &tail]);
            if best.0.is_none() || score > best.1 {
                best = (Some([head, tail]), score);
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn counted_dict() -> HashMap<String, u32> {
        [
            ("москва", 500),
            ("маршала", 100),
            ("жукова", 50),
            ("моск", 10),
            ("ва", 10),
            ("моква", 50),
            ("виноградный", 70),
            ("виногрыдный", 1),
            ("московская", 10),
            ("обл", 20),
            ("aaabbb", 10),
            ("aaa", 100),
            ("bbb", 100),
        ]
        .into_iter()
        .map(|(word, score)| (word.to_string(), score))
        .collect()
    }

    fn suggestion_table() -> HashMap<String, Vec<String>> {
        [
            ("виногрXдный", vec!["виногрыдный", "виноградный"]),
            ("винXгрыдный", vec!["виногрыдный"]),
            ("жукXва", vec!["жукова"]),
            ("жуко", vec!["жукова"]),
            ("москвавX", vec!["москва"]),
            ("москвава", vec!["москва"]),
        ]
        .into_iter()
        .map(|(word, candidates)| {
            (
                word.to_string(),
                candidates.into_iter().map(str::to_string).collect(),
            )
        })
        .collect()
    }

    fn checker() -> SpellChecker<HashMap<String, u32>, HashMap<String, Vec<String>>> {
        SpellChecker::new(counted_dict(), suggestion_table())
    }

    fn misspelling(corrected: &str, original: &str, score: u32) -> CheckResult {
        CheckResult::new(
            CheckStatus::Misspelling,
            Some(corrected.to_string()),
            Some(original.to_string()),
            score,
        )
    }

    #[test]
    fn test_check_word() {
        let sc = checker();

        assert_eq!(
            sc.check_word(Some("виногрXдный"), true),
            misspelling("виноградный", "виногрXдный", 70)
        );
        assert_eq!(
            sc.check_word(Some("виноградный"), true),
            CheckResult::good("виноградный", 70)
        );
        assert_eq!(
            sc.check_word(Some("виногрыдный"), true),
            CheckResult::good("виногрыдный", 1)
        );
        assert_eq!(
            sc.check_word(Some("винXгрыдный"), true),
            misspelling("виногрыдный", "винXгрыдный", 1)
        );
        assert_eq!(
            sc.check_word(Some("testtesttest"), true),
            CheckResult::not_found(Some("testtesttest"))
        );
        assert_eq!(sc.check_word(Some("a"), true), CheckResult::not_found(Some("a")));
    }

    #[test]
    fn test_check_word_not_word() {
        let sc = checker();

        for input in ["123", "+++", "виногр999адный", "виноградный.", "виноградный ", ""] {
            assert_eq!(
                sc.check_word(Some(input), true),
                CheckResult::not_word(Some(input)),
                "input {input:?}"
            );
        }
        assert_eq!(sc.check_word(None, true), CheckResult::not_word(None));
    }

    #[test]
    fn test_check_word_without_fuzzy() {
        let sc = checker();

        assert_eq!(
            sc.check_word(Some("жукXва"), false),
            CheckResult::not_found(Some("жукXва"))
        );
        assert_eq!(
            sc.check_word_with_min_length(Some("жукXва"), true, 7),
            CheckResult::not_found(Some("жукXва"))
        );
        assert_eq!(
            sc.check_word_with_min_length(Some("жукXва"), true, 6),
            misspelling("жукова", "жукXва", 50)
        );
    }

    #[test]
    fn test_suggestion_outside_dictionary_scores_zero() {
        let mut table = suggestion_table();
        table.insert("улиXа".to_string(), vec!["улица".to_string()]);
        let sc = SpellChecker::new(counted_dict(), table);

        assert_eq!(
            sc.check_word(Some("улиXа"), true),
            misspelling("улица", "улиXа", 0)
        );
    }

    #[test]
    fn test_suggestion_ties_keep_first() {
        let mut table = HashMap::new();
        table.insert(
            "мXсква".to_string(),
            vec!["моск".to_string(), "ва".to_string()],
        );
        let sc = SpellChecker::new(counted_dict(), table);

        assert_eq!(
            sc.check_word(Some("мXсква"), true),
            misspelling("моск", "мXсква", 10)
        );
    }

    #[test]
    fn test_dictionary_words_are_good() {
        let sc = checker();
        for (word, score) in counted_dict() {
            assert_eq!(sc.check_word(Some(word.as_str()), true), CheckResult::good(&word, score));
            assert_eq!(sc.check_word(Some(word.as_str()), false), CheckResult::good(&word, score));
        }
    }

    #[test]
    fn test_shuffle_splitted_word() {
        assert_eq!(checker().shuffle_symbols("виноград", Some("ный")), (None, 0));
    }

    #[test]
    fn test_shuffle_two_words() {
        assert_eq!(
            checker().shuffle_symbols("марш", Some("алажукова")),
            (
                Some([
                    CheckResult::good("маршала", 100),
                    CheckResult::good("жукова", 50)
                ]),
                100
            )
        );
    }

    #[test]
    fn test_shuffle_min_len() {
        assert_eq!(checker().shuffle_symbols("aa", Some("a")), (None, 0));
    }

    #[test]
    fn test_shuffle_wrong_spelling() {
        let sc = checker();
        assert_eq!(sc.shuffle_symbols("марш", Some("алажуковаX")), (None, 0));
        assert_eq!(sc.shuffle_symbols("маршала", Some("жукова3")), (None, 0));
    }

    #[test]
    fn test_shuffle_single_word() {
        assert_eq!(
            checker().shuffle_symbols("aaabbb", None),
            (
                Some([CheckResult::good("aaa", 100), CheckResult::good("bbb", 100)]),
                100
            )
        );
        assert_eq!(checker().shuffle_symbols("", None), (None, 0));
    }

    #[test]
    fn test_shuffle_zero_score_split() {
        let dict: HashMap<String, u32> = [("ул".to_string(), 0), ("ица".to_string(), 0)]
            .into_iter()
            .collect();
        let sc = SpellChecker::new(dict, HashMap::<String, Vec<String>>::new());

        assert_eq!(
            sc.shuffle_symbols("улица", None),
            (
                Some([CheckResult::good("ул", 0), CheckResult::good("ица", 0)]),
                0
            )
        );
        assert_eq!(sc.check_words(&["улица"]), vec!["ул", "ица"]);
    }

    #[test]
    fn test_max_score() {
        let none: [&CheckResult; 0] = [];
        assert_eq!(max_score(none), 0);
        assert_eq!(max_score([&CheckResult::good("test", 10)]), 10);
        assert_eq!(
            max_score(&[CheckResult::good("test", 10), CheckResult::good("test", 7)]),
            10
        );
        assert_eq!(
            max_score(&[CheckResult::not_word(Some("1")), CheckResult::good("test", 3)]),
            3
        );
    }

    #[test]
    fn test_check_text_single_word() {
        assert_eq!(checker().check_words(&["виногрXдный"]), vec!["виноградный"]);
    }

    #[test]
    fn test_check_text_two_words() {
        assert_eq!(
            checker().check_words(&["виногрXдный", "москва"]),
            vec!["виноградный", "москва"]
        );
    }

    #[test]
    fn test_check_text_three_words() {
        assert_eq!(
            checker().check_words(&["виногрXдный", "москва", "жукXва"]),
            vec!["виноградный", "москва", "жукова"]
        );
    }

    #[test]
    fn test_check_text_without_words() {
        let empty: [&str; 0] = [];
        assert!(checker().check_words(&empty).is_empty());
    }

    #[test]
    fn test_check_text_merges_split_words() {
        let sc = checker();
        assert_eq!(sc.check_words(&["виногра", "дный"]), vec!["виноградный"]);
        assert_eq!(
            sc.check_words(&["виногра", "дный", "москва", "жуко", "ва"]),
            vec!["виноградный", "москва", "жукова"]
        );
        assert_eq!(
            sc.check_words(&["виногра", "дный", "моск", "ва", "жуко", "ва"]),
            vec!["виноградный", "москва", "жукова"]
        );
    }

    #[test]
    fn test_check_text_splits_stuck_words() {
        let sc = checker();
        assert_eq!(
            sc.check_words(&["виноградныймосква"]),
            vec!["виноградный", "москва"]
        );
        assert_eq!(
            sc.check_words(&["виноградныймосква", "жуковамосква"]),
            vec!["виноградный", "москва", "жукова", "москва"]
        );
    }

    #[test]
    fn test_check_text_reshuffles_boundary() {
        assert_eq!(
            checker().check_words(&["марш", "алажукова"]),
            vec!["маршала", "жукова"]
        );
    }

    #[test]
    fn test_check_text_reshuffles_after_good_word() {
        let mut dict = counted_dict();
        dict.insert("марша".to_string(), 5);
        let sc = SpellChecker::new(dict, suggestion_table());

        assert_eq!(
            sc.check_words(&["марша", "лажукова"]),
            vec!["маршала", "жукова"]
        );
    }

    #[test]
    fn test_check_text_keeps_stronger_correction_over_split() {
        let dict: HashMap<String, u32> = [("ул", 1), ("ица", 1), ("улицы", 90)]
            .into_iter()
            .map(|(word, score)| (word.to_string(), score))
            .collect();
        let table: HashMap<String, Vec<String>> =
            [("улица".to_string(), vec!["улицы".to_string()])]
                .into_iter()
                .collect();
        let sc = SpellChecker::new(dict, table);

        assert_eq!(sc.shuffle_symbols("улица", None).1, 1);
        assert_eq!(sc.check_words(&["улица"]), vec!["улицы"]);
    }

    #[test]
    fn test_check_text_lookahead_is_not_corrected() {
        let mut dict = counted_dict();
        dict.insert("марша".to_string(), 5);
        let mut table = suggestion_table();
        table.insert("лажукова".to_string(), vec!["москва".to_string()]);
        let sc = SpellChecker::new(dict, table);

        // Corrected, the second token would outscore the re-split pair.
        assert_eq!(
            sc.check_words(&["марша", "лажукова"]),
            vec!["маршала", "жукова"]
        );
        assert_eq!(sc.check_words(&["лажукова"]), vec!["москва"]);
    }

    #[test]
    fn test_check_text_long_short() {
        let sc = checker();
        assert_eq!(sc.check_words(&["москвава"]), vec!["москва", "ва"]);
        assert_eq!(sc.check_words(&["москва", "ва"]), vec!["москва", "ва"]);
        assert_eq!(sc.check_words(&["москвавX"]), vec!["москва"]);
    }

    #[test]
    fn test_check_text_good_words_unchanged() {
        assert_eq!(
            checker().check_words(&["московская", "обл", "жукова"]),
            vec!["московская", "обл", "жукова"]
        );
    }

    #[test]
    fn test_check_text_not_split() {
        assert_eq!(checker().check_words(&["aaabbb"]), vec!["aaabbb"]);
    }

    #[test]
    fn test_check_text_drops_unknown_tokens() {
        assert_eq!(
            checker().check_words(&["12", "москва", "testtesttest", "--"]),
            vec!["москва"]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CheckStatus::NotFound.to_string(), "not found");
        assert_eq!(
            CheckResult::good("обл", 20).to_string(),
            "good - обл - обл - 20"
        );
    }
}

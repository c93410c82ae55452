//! Spelling correction for address words.
//!
//! This module repairs noisy address tokens: misspellings are corrected via
//! fuzzy suggestions, words split across a token boundary are merged, and
//! words run together are split apart. Competing repairs are ranked by how
//! often each word occurs in a reference address corpus.

pub mod corrector;
pub mod dictionary;
pub mod levenshtein;
pub mod suggest;
pub mod typo_patterns;

pub use corrector::{CheckResult, CheckStatus, CorrectorConfig, SpellChecker, max_score};
pub use dictionary::{BuiltinDictionary, SpellingDictionary, WordFrequencies};
pub use suggest::{Suggestion, SuggestionConfig, SuggestionEngine, SuggestionSource};

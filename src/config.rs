//! Resolver configuration.
//!
//! Stored on disk as JSON. Every field has a default, so a config file only
//! needs to name what it changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::DEFAULT_MIN_TOKEN_LENGTH;
use crate::error::{ResolverError, Result};
use crate::query::QueryConfig;
use crate::spelling::{CorrectorConfig, SuggestionConfig};

/// Configuration for an address resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Word list feeding the suggestion engine, one word per line.
    pub spelling_dictionary: Option<PathBuf>,

    /// Word frequencies used to rank corrections: a JSON object when the
    /// file ends in `.json`, "word frequency" lines otherwise.
    pub frequency_dictionary: Option<PathBuf>,

    /// JSON array of stop words.
    pub stop_words: Option<PathBuf>,

    /// Log failed query executions at error level.
    pub error_log: bool,

    /// Address tokens must be longer than this many chars.
    pub min_token_length: usize,

    /// Word corrector settings.
    pub corrector: CorrectorConfig,

    /// Suggestion engine settings.
    pub suggestion: SuggestionConfig,

    /// Query synthesis settings.
    pub query: QueryConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            spelling_dictionary: None,
            frequency_dictionary: None,
            stop_words: None,
            error_log: false,
            min_token_length: DEFAULT_MIN_TOKEN_LENGTH,
            corrector: CorrectorConfig::default(),
            suggestion: SuggestionConfig::default(),
            query: QueryConfig::default(),
        }
    }
}

impl ResolverConfig {
    /// Load and validate a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ResolverError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let config = Self::from_json_str(&contents)?;

        // Relative dictionary paths are taken from the config file's directory.
        Ok(match path.parent() {
            Some(base) => config.resolve_paths(base),
            None => config,
        })
    }

    /// Parse and validate a configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ResolverConfig = serde_json::from_str(json)
            .map_err(|e| ResolverError::config(format!("Invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values that can never work.
    pub fn validate(&self) -> Result<()> {
        self.query.validate()?;

        if self.suggestion.max_suggestions == 0 {
            return Err(ResolverError::config("suggestion.max_suggestions must be at least 1"));
        }
        if self.suggestion.distance_weight < 0.0 || self.suggestion.frequency_weight < 0.0 {
            return Err(ResolverError::config("suggestion weights must not be negative"));
        }
        Ok(())
    }

    fn resolve_paths(mut self, base: &Path) -> Self {
        for path in [
            &mut self.spelling_dictionary,
            &mut self.frequency_dictionary,
            &mut self.stop_words,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_token_length, 3);
        assert_eq!(config.query.hierarchy_depth, 2);
        assert_eq!(config.corrector.min_length_for_fuzzy, 2);
        assert!(!config.error_log);
    }

    #[test]
    fn test_partial_json() {
        let config = ResolverConfig::from_json_str(
            r#"{"error_log": true, "query": {"result_limit": 10}}"#,
        )
        .unwrap();
        assert!(config.error_log);
        assert_eq!(config.query.result_limit, 10);
        assert_eq!(config.query.name_field, "biggestword");
        assert!(config.stop_words.is_none());
    }

    #[test]
    fn test_invalid_config() {
        assert!(ResolverConfig::from_json_str(r#"{"query": {"hierarchy_depth": 0}}"#).is_err());
        assert!(ResolverConfig::from_json_str(r#"{"suggestion": {"max_suggestions": 0}}"#).is_err());
        assert!(ResolverConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resolver.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"stop_words": "stop.json", "frequency_dictionary": "/abs/counted.json"}}"#
        )
        .unwrap();

        let config = ResolverConfig::load(&path).unwrap();
        assert_eq!(config.stop_words, Some(dir.path().join("stop.json")));
        assert_eq!(config.frequency_dictionary, Some(PathBuf::from("/abs/counted.json")));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(ResolverConfig::load("/nonexistent/resolver.json").is_err());
    }
}

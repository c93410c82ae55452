//! The address resolution pipeline.
//!
//! ```text
//! text -> tokens -> corrected words -> stop-filtered words -> query -> rows -> addresses
//! ```
//!
//! House numbers and postal codes are extracted from the raw text alongside
//! the word tokens. A failed query execution never aborts resolution: it is
//! logged and treated as "nothing found".

pub mod assemble;
pub mod executor;

use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::address::Address;
use crate::analysis::{
    AddressTokenizer, StopFilter, extract_house_numbers, extract_postal_codes,
};
use crate::config::ResolverConfig;
use crate::error::Result;
use crate::query::{CypherQuery, QueryBuilder};
use crate::spelling::{
    BuiltinDictionary, SpellChecker, SpellingDictionary, SuggestionEngine, SuggestionSource,
    WordFrequencies,
};

pub use assemble::{Row, assemble_address, assemble_addresses};
pub use executor::{InMemoryExecutor, QueryExecutor};

/// Per-call resolution switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Match address objects only, ignoring house numbers.
    pub addrobj_only: bool,
    /// Run the word corrector over the address tokens.
    pub check_grammar: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions {
            addrobj_only: true,
            check_grammar: false,
        }
    }
}

/// What was read out of an address line before querying.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAddress {
    /// Words to match against address objects.
    pub address_tokens: Vec<String>,
    /// House numbers, empty for address-object-only lookups.
    pub house_tokens: Vec<String>,
    /// Six-digit postal codes.
    pub postal_codes: Vec<String>,
}

/// A resolver backed by a frequency dictionary and the built-in suggestion
/// engine.
pub type DictionaryResolver<E> = AddressResolver<Arc<SpellingDictionary>, SuggestionEngine, E>;

/// Resolves free-form address lines to registry addresses.
pub struct AddressResolver<F, S, E> {
    checker: SpellChecker<F, S>,
    tokenizer: AddressTokenizer,
    stop_filter: StopFilter,
    builder: QueryBuilder,
    executor: E,
    log_errors: bool,
}

impl<F, S, E> AddressResolver<F, S, E>
where
    F: WordFrequencies,
    S: SuggestionSource,
    E: QueryExecutor,
{
    /// Create a resolver with default analysis and query settings.
    pub fn new(checker: SpellChecker<F, S>, executor: E) -> Self {
        AddressResolver {
            checker,
            tokenizer: AddressTokenizer::default(),
            stop_filter: StopFilter::default(),
            builder: QueryBuilder::default(),
            executor,
            log_errors: false,
        }
    }

    /// Replace the tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: AddressTokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Replace the stop filter.
    pub fn with_stop_filter(mut self, stop_filter: StopFilter) -> Self {
        self.stop_filter = stop_filter;
        self
    }

    /// Replace the query builder.
    pub fn with_query_builder(mut self, builder: QueryBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Log failed query executions at error level.
    pub fn with_error_log(mut self, log_errors: bool) -> Self {
        self.log_errors = log_errors;
        self
    }

    /// The word corrector.
    pub fn checker(&self) -> &SpellChecker<F, S> {
        &self.checker
    }

    /// The query builder.
    pub fn query_builder(&self) -> &QueryBuilder {
        &self.builder
    }

    /// Tokenize and correct an address line.
    pub fn correct(&self, text: &str) -> Vec<String> {
        self.checker.check_words(&self.tokenizer.words(text))
    }

    /// Split an address line into the parts the query is built from.
    pub fn parse(&self, text: &str, options: ResolveOptions) -> ParsedAddress {
        let mut words = self.tokenizer.words(text);
        let postal_codes = extract_postal_codes(text);
        let house_tokens = if options.addrobj_only {
            Vec::new()
        } else {
            extract_house_numbers(text).into_iter().collect()
        };

        if options.check_grammar {
            words = self.checker.check_words(&words);
            debug!("corrected words: {words:?}");
        }
        let address_tokens = self.stop_filter.filter_words(words);

        debug!(
            "parsed {text:?}: words {address_tokens:?}, houses {house_tokens:?}, postal codes {postal_codes:?}"
        );
        ParsedAddress {
            address_tokens,
            house_tokens,
            postal_codes,
        }
    }

    /// Build the lookup query for an address line, if there is enough to
    /// search for.
    pub fn build_query(&self, text: &str, options: ResolveOptions) -> Option<CypherQuery> {
        let parsed = self.parse(text, options);
        self.builder.compose_full_query(
            &parsed.address_tokens,
            &parsed.house_tokens,
            &parsed.postal_codes,
        )
    }

    /// Run a query. An empty query is not sent; a failed one yields no rows.
    pub fn execute(&self, query: &str) -> Vec<Row> {
        if query.is_empty() {
            return Vec::new();
        }

        match self.executor.execute(query) {
            Ok(rows) => rows,
            Err(e) => {
                if self.log_errors {
                    error!("An error occurred while processing query: {e}\n{query}");
                } else {
                    debug!("query execution failed: {e}");
                }
                Vec::new()
            }
        }
    }

    /// Resolve one address line.
    pub fn resolve(&self, text: &str, options: ResolveOptions) -> Vec<Address> {
        let Some(query) = self.build_query(text, options) else {
            debug!("no query for {text:?}");
            return Vec::new();
        };

        let rows = self.execute(&query.text);
        let addresses = assemble_addresses(&rows);
        debug!("{} rows, {} addresses for {text:?}", rows.len(), addresses.len());
        addresses
    }

    /// Resolve independent address lines in parallel, keeping input order.
    pub fn resolve_batch<T>(&self, texts: &[T], options: ResolveOptions) -> Vec<Vec<Address>>
    where
        T: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.resolve(text.as_ref(), options))
            .collect()
    }
}

impl<E: QueryExecutor> DictionaryResolver<E> {
    /// Build a resolver from configuration, loading the configured
    /// dictionaries and stop words.
    pub fn from_config(config: &ResolverConfig, executor: E) -> Result<Self> {
        config.validate()?;

        let frequencies = match &config.frequency_dictionary {
            Some(path) => SpellingDictionary::load_frequencies(path)?,
            None => BuiltinDictionary::address_terms(),
        };
        let frequencies = Arc::new(frequencies);

        let suggestion_words = match &config.spelling_dictionary {
            Some(path) => {
                let mut words = SpellingDictionary::load_from_file(path)?;
                words.merge(&frequencies);
                Arc::new(words)
            }
            None => Arc::clone(&frequencies),
        };
        debug!(
            "loaded {} frequency words, {} suggestion words",
            frequencies.word_count(),
            suggestion_words.word_count()
        );

        let suggestions = SuggestionEngine::with_config(suggestion_words, config.suggestion.clone());
        let checker = SpellChecker::with_config(frequencies, suggestions, config.corrector.clone());

        let stop_filter = match &config.stop_words {
            Some(path) => StopFilter::from_json_file(path)?,
            None => StopFilter::default(),
        };
        if stop_filter.is_empty() {
            warn!("stop word list is empty, no words will be filtered");
        } else {
            debug!("loaded {} stop words", stop_filter.len());
        }

        Ok(AddressResolver::new(checker, executor)
            .with_tokenizer(AddressTokenizer::with_min_length(config.min_token_length)?)
            .with_stop_filter(stop_filter)
            .with_query_builder(QueryBuilder::new(config.query.clone())?)
            .with_error_log(config.error_log))
    }
}

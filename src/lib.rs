//! # Address Resolver
//!
//! Resolves free-form, noisy postal addresses against a hierarchical address
//! registry stored in a graph database.
//!
//! ## Features
//!
//! - Frequency-ranked spelling correction that also merges split words and
//!   splits words run together
//! - House-number and postal-code extraction
//! - Permutation-based Cypher query synthesis over the registry hierarchy
//! - Assembly of query rows into structured addresses
//! - Pluggable query execution

pub mod address;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod query;
pub mod resolver;
pub mod spelling;

pub mod prelude {
    pub use crate::address::{AddrObject, Address};
    pub use crate::config::ResolverConfig;
    pub use crate::error::{ResolverError, Result};
    pub use crate::query::{CypherQuery, QueryBuilder, QueryConfig};
    pub use crate::resolver::{
        AddressResolver, DictionaryResolver, InMemoryExecutor, QueryExecutor, ResolveOptions, Row,
    };
    pub use crate::spelling::{CheckResult, CheckStatus, SpellChecker};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

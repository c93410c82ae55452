//! Cypher query synthesis for address lookup.
//!
//! Address words are matched against the `Addrobj` nodes of an address
//! registry graph. Since the input gives no hint which word names which
//! level of the hierarchy, the match expression tries every ordered choice
//! of words for the levels, and the registry structure sorts out which
//! assignment is real.

pub mod builder;
pub mod columns;
pub mod constraints;
pub mod match_expr;

pub use builder::{CypherQuery, QueryBuilder, QueryConfig, compose_full_query};
pub use constraints::{
    house_numbers, synthesize_house_constraint, synthesize_house_interval_constraint,
    synthesize_postal_constraint,
};
pub use match_expr::{escape_literal, synthesize_match};

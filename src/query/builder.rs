//! Full query composition.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ResolverError, Result};
use crate::query::columns::{ADDRESS_PROPERTIES, HOUSES, HOUSES_INT};
use crate::query::constraints::{
    house_numbers, synthesize_house_constraint, synthesize_house_interval_constraint,
    synthesize_postal_constraint,
};
use crate::query::match_expr::synthesize_match;

/// Configuration for query synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Number of `Addrobj` levels each match must fill.
    pub hierarchy_depth: usize,
    /// Maximum number of rows returned.
    pub result_limit: usize,
    /// Prefix of the node variables (`a0`, `a1`, ...).
    pub node_var_prefix: String,
    /// Node property compared with address words.
    pub name_field: String,
    /// Split the match expression over several lines.
    pub show_tabs: bool,
    /// Upper bound accepted for `hierarchy_depth`.
    pub max_hierarchy_depth: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            hierarchy_depth: 2,
            result_limit: 100,
            node_var_prefix: "a".to_string(),
            name_field: "biggestword".to_string(),
            show_tabs: false,
            max_hierarchy_depth: 4,
        }
    }
}

impl QueryConfig {
    /// Check that the configuration can produce a query.
    ///
    /// The match expression grows factorially with the depth, so depths past
    /// `max_hierarchy_depth` are rejected rather than attempted.
    pub fn validate(&self) -> Result<()> {
        if self.hierarchy_depth == 0 {
            return Err(ResolverError::query("hierarchy_depth must be at least 1"));
        }
        if self.hierarchy_depth > self.max_hierarchy_depth {
            return Err(ResolverError::query(format!(
                "hierarchy_depth {} exceeds the maximum of {}",
                self.hierarchy_depth, self.max_hierarchy_depth
            )));
        }
        if self.result_limit == 0 {
            return Err(ResolverError::query("result_limit must be at least 1"));
        }
        let is_identifier = |value: &str| {
            value.chars().next().is_some_and(|ch| ch.is_ascii_alphabetic())
                && value.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        };
        if !is_identifier(&self.node_var_prefix) {
            return Err(ResolverError::query(format!(
                "node_var_prefix {:?} is not an identifier",
                self.node_var_prefix
            )));
        }
        if !is_identifier(&self.name_field) {
            return Err(ResolverError::query(format!(
                "name_field {:?} is not an identifier",
                self.name_field
            )));
        }
        Ok(())
    }
}

/// A synthesized query and the columns its rows carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CypherQuery {
    /// The query text.
    pub text: String,
    /// Names of the returned columns, in order.
    pub columns: Vec<&'static str>,
}

impl fmt::Display for CypherQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Builds address lookup queries from a validated [`QueryConfig`].
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    config: QueryConfig,
}

impl QueryBuilder {
    /// Create a builder, rejecting an invalid configuration.
    pub fn new(config: QueryConfig) -> Result<Self> {
        config.validate()?;
        Ok(QueryBuilder { config })
    }

    /// The builder configuration.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    fn deepest_node(&self) -> usize {
        self.config.hierarchy_depth - 1
    }

    /// The match expression for `tokens`.
    pub fn synthesize_match<T: AsRef<str>>(&self, tokens: &[T]) -> String {
        synthesize_match(
            tokens,
            self.config.hierarchy_depth,
            &self.config.node_var_prefix,
            &self.config.name_field,
            self.config.show_tabs,
        )
    }

    /// The postal constraint on the deepest node.
    pub fn postal_constraint<T: AsRef<str>>(&self, postal_codes: &[T]) -> String {
        synthesize_postal_constraint(
            postal_codes,
            &self.config.node_var_prefix,
            self.deepest_node(),
        )
    }

    /// The house constraint under the deepest node.
    pub fn house_constraint<H, P>(&self, house_tokens: &[H], postal_codes: &[P]) -> String
    where
        H: AsRef<str>,
        P: AsRef<str>,
    {
        synthesize_house_constraint(
            house_tokens,
            postal_codes,
            &self.config.node_var_prefix,
            self.deepest_node(),
        )
    }

    /// The house-interval constraint under the deepest node.
    pub fn house_interval_constraint<H, P>(
        &self,
        house_tokens: &[H],
        postal_codes: &[P],
    ) -> String
    where
        H: AsRef<str>,
        P: AsRef<str>,
    {
        synthesize_house_interval_constraint(
            house_tokens,
            postal_codes,
            &self.config.node_var_prefix,
            self.deepest_node(),
        )
    }

    /// Compose the full lookup query.
    ///
    /// Returns `None` when there are no address tokens or too few of them to
    /// fill every hierarchy level.
    pub fn compose_full_query<A, H, P>(
        &self,
        address_tokens: &[A],
        house_tokens: &[H],
        postal_codes: &[P],
    ) -> Option<CypherQuery>
    where
        A: AsRef<str>,
        H: AsRef<str>,
        P: AsRef<str>,
    {
        if address_tokens.is_empty() {
            return None;
        }
        let match_expr = self.synthesize_match(address_tokens);
        if match_expr.is_empty() {
            return None;
        }

        let prefix = &self.config.node_var_prefix;
        let depth = self.config.hierarchy_depth;
        let deepest = self.deepest_node();

        let mut text = String::from("MATCH (r:Root)");
        for index in 0..depth {
            text.push_str(&format!(", ({prefix}{index}:Addrobj)"));
        }
        text.push_str(", rel = (r)");
        for index in 0..depth {
            text.push_str(&format!("<-[*..2]-({prefix}{index})"));
        }

        text.push_str("\nWHERE");
        text.push_str(&match_expr);
        text.push_str(&self.postal_constraint(postal_codes));
        text.push_str(&format!("\nWITH rel, {prefix}{deepest}"));

        text.push_str(&self.house_constraint(house_tokens, postal_codes));
        text.push_str(&self.house_interval_constraint(house_tokens, postal_codes));

        let mut columns = Vec::with_capacity(6);
        text.push_str("\nRETURN");
        for (index, (property, column)) in ADDRESS_PROPERTIES.iter().enumerate() {
            let separator = if index + 1 < ADDRESS_PROPERTIES.len() { "," } else { "" };
            text.push_str(&format!(
                "\n\t[n in nodes(rel) where n:Addrobj | n.{property}] as {column}{separator}"
            ));
            columns.push(*column);
        }

        // Without a usable number neither `h` nor `hi` is bound.
        if !house_numbers(house_tokens).is_empty() {
            text.push_str(&format!(", h as {HOUSES}, hi as {HOUSES_INT}"));
            columns.extend([HOUSES, HOUSES_INT]);
        }

        text.push_str(&format!("\nLIMIT {}", self.config.result_limit));

        Some(CypherQuery { text, columns })
    }

    /// The full query text, or an empty string when no query can be built.
    pub fn compose_query_text<A, H, P>(
        &self,
        address_tokens: &[A],
        house_tokens: &[H],
        postal_codes: &[P],
    ) -> String
    where
        A: AsRef<str>,
        H: AsRef<str>,
        P: AsRef<str>,
    {
        self.compose_full_query(address_tokens, house_tokens, postal_codes)
            .map(|query| query.text)
            .unwrap_or_default()
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        QueryBuilder {
            config: QueryConfig::default(),
        }
    }
}

/// Compose a lookup query with the default node prefix and name field.
pub fn compose_full_query<A, H, P>(
    address_tokens: &[A],
    house_tokens: &[H],
    postal_codes: &[P],
    hierarchy_depth: usize,
    result_limit: usize,
) -> Result<Option<CypherQuery>>
where
    A: AsRef<str>,
    H: AsRef<str>,
    P: AsRef<str>,
{
    let builder = QueryBuilder::new(QueryConfig {
        hierarchy_depth,
        result_limit,
        ..QueryConfig::default()
    })?;
    Ok(builder.compose_full_query(address_tokens, house_tokens, postal_codes))
}

//! Permutation match expressions.
//!
//! For hierarchy depth `d` the expression is a disjunction over every
//! injective assignment of `d` tokens to the levels `0..d`:
//!
//! ```text
//! (a0.f = 'x' AND (a1.f = 'y') OR a0.f = 'y' AND (a1.f = 'x'))
//! ```
//!
//! The clause count grows as `n! / (n - d)!`, so callers keep `d` small.

/// Escape a value for use inside a single-quoted Cypher string.
pub fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '\'') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Build the match expression over `tokens` for `depth` hierarchy levels.
///
/// Returns an empty string when there are not enough tokens to fill every
/// level. With `show_tabs` the top level is split over lines; nested levels
/// are always rendered inline.
pub fn synthesize_match<T: AsRef<str>>(
    tokens: &[T],
    depth: usize,
    node_prefix: &str,
    field: &str,
    show_tabs: bool,
) -> String {
    let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
    synthesize_level(&tokens, depth, 0, node_prefix, field, show_tabs)
}

fn synthesize_level(
    tokens: &[&str],
    depth: usize,
    level: usize,
    node_prefix: &str,
    field: &str,
    show_tabs: bool,
) -> String {
    if tokens.is_empty() || depth == 0 || depth - level > tokens.len() {
        return String::new();
    }

    let mut expr = String::new();
    for (index, token) in tokens.iter().enumerate() {
        if index > 0 {
            if show_tabs {
                expr.push('\n');
                expr.push_str(&"\t".repeat(level + 1));
            }
            expr.push_str(" OR ");
        }

        expr.push_str(&format!(
            "{node_prefix}{level}.{field} = '{}'",
            escape_literal(token)
        ));

        if level + 1 < depth {
            let remaining: Vec<&str> = tokens
                .iter()
                .enumerate()
                .filter(|&(other, _)| other != index)
                .map(|(_, token)| *token)
                .collect();
            let sub_expr =
                synthesize_level(&remaining, depth, level + 1, node_prefix, field, false);

            if show_tabs {
                expr.push('\n');
                expr.push_str(&"\t".repeat(level + 2));
                expr.push_str("AND ");
            } else {
                expr.push_str(" AND ");
            }
            expr.push_str(&sub_expr);
        }
    }

    format!("({expr})")
}

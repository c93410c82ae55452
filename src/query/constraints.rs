//! Postal-code and house-number constraints appended to the match query.

use crate::query::match_expr::escape_literal;

/// The numeric part of each house token: its first run of digits.
///
/// Tokens without digits, or whose digits overflow a `u64`, are skipped.
/// Repeated numbers are kept once, in first-seen order.
pub fn house_numbers<T: AsRef<str>>(house_tokens: &[T]) -> Vec<String> {
    let mut numbers: Vec<String> = Vec::new();
    for token in house_tokens {
        let digits = token
            .as_ref()
            .split(|ch: char| !ch.is_ascii_digit())
            .find(|run| !run.is_empty())
            .filter(|run| run.parse::<u64>().is_ok());
        if let Some(digits) = digits {
            if !numbers.iter().any(|known| known == digits) {
                numbers.push(digits.to_string());
            }
        }
    }
    numbers
}

fn postal_alternation<T: AsRef<str>>(postal_codes: &[T]) -> String {
    let codes: Vec<String> = postal_codes
        .iter()
        .map(|code| escape_literal(code.as_ref()))
        .collect();
    format!("^({})$", codes.join("|"))
}

/// Restrict the node `{node_prefix}{node_index}` to the postal regions of
/// `postal_codes`.
///
/// Only the first three digits of each code are kept, so neighbouring
/// offices of one region still match. Codes of three chars or fewer carry no
/// usable region and are ignored.
pub fn synthesize_postal_constraint<T: AsRef<str>>(
    postal_codes: &[T],
    node_prefix: &str,
    node_index: usize,
) -> String {
    let prefixes: Vec<String> = postal_codes
        .iter()
        .map(AsRef::as_ref)
        .filter(|code| code.chars().count() > 3)
        .map(|code| {
            let region: String = code.chars().take(3).collect();
            format!("{}[0-9]{{3,}}", escape_literal(&region))
        })
        .collect();

    if prefixes.is_empty() {
        return String::new();
    }

    format!(
        "\n\tAND {node_prefix}{node_index}.postalcode =~ '^({})$'",
        prefixes.join("|")
    )
}

/// Optionally match a `House` under the deepest node whose `complexnum`
/// starts with one of the house numbers.
///
/// A number must not run on into further digits, so `1` never matches `10`.
pub fn synthesize_house_constraint<H, P>(
    house_tokens: &[H],
    postal_codes: &[P],
    node_prefix: &str,
    node_index: usize,
) -> String
where
    H: AsRef<str>,
    P: AsRef<str>,
{
    let numbers = house_numbers(house_tokens);
    if numbers.is_empty() {
        return String::new();
    }

    let mut constraint = format!(
        "\nOPTIONAL MATCH ({node_prefix}{node_index})<-[*1]-(h:House)\nWHERE\n\th.complexnum =~ '^({})([^0-9]|$)'",
        numbers.join("|")
    );
    if !postal_codes.is_empty() {
        constraint.push_str(&format!(
            "\n\tAND h.postalcode =~ '{}'",
            postal_alternation(postal_codes)
        ));
    }
    constraint
}

/// Optionally match a `HouseInt` range under the deepest node that contains
/// one of the house numbers.
pub fn synthesize_house_interval_constraint<H, P>(
    house_tokens: &[H],
    postal_codes: &[P],
    node_prefix: &str,
    node_index: usize,
) -> String
where
    H: AsRef<str>,
    P: AsRef<str>,
{
    let ranges: Vec<String> = house_numbers(house_tokens)
        .iter()
        .filter_map(|number| number.parse::<u64>().ok())
        .map(|number| format!("(hi.intstart <= {number} AND {number} <= hi.intend)"))
        .collect();
    if ranges.is_empty() {
        return String::new();
    }

    let mut constraint = format!(
        "\nOPTIONAL MATCH ({node_prefix}{node_index})<-[*1]-(hi:HouseInt)\nWHERE\n\t({})",
        ranges.join("\n\tOR ")
    );
    if !postal_codes.is_empty() {
        constraint.push_str(&format!(
            "\n\tAND hi.postalcode =~ '{}'",
            postal_alternation(postal_codes)
        ));
    }
    constraint
}

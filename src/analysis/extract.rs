//! House-number and postal-code extraction.
//!
//! A house number is a main number of one to three digits, optionally
//! followed by further numbers or a single letter:
//!
//! ```text
//! n-n-n   n-n-l   n-l-n
//! n-n     n-l
//! n
//! ```
//!
//! Numbers are joined by one or more of `/ \ - :`; a letter may be glued to
//! the number or preceded by a single space or separator.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

const MAIN_NUMBER: &str = r"[0-9]{1,3}";
const ADD_NUMBER: &str = r"[/\\\-:]+[0-9]{1,3}";
const ADD_LETTER: &str = r"[ /\\\-:]?[a-zа-яё]";

/// House-number patterns, longest shapes first.
static HOUSE_NUMBER_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        [MAIN_NUMBER, ADD_NUMBER, ADD_NUMBER].concat(),
        [MAIN_NUMBER, ADD_NUMBER, ADD_LETTER].concat(),
        [MAIN_NUMBER, ADD_LETTER, ADD_NUMBER].concat(),
        [MAIN_NUMBER, ADD_NUMBER].concat(),
        [MAIN_NUMBER, ADD_LETTER].concat(),
        MAIN_NUMBER.to_string(),
    ]
    .iter()
    .filter_map(|body| Regex::new(&format!(r"\b(?:{body})\b")).ok())
    .collect()
});

static POSTAL_CODE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\d{6}").ok());

/// Find the house numbers in `text`.
///
/// The text is lowercased and each pattern is applied in turn; every match
/// is blanked out before the next, shorter, pattern runs, so `1-2-3` never
/// also yields `1-2` or `1`.
pub fn extract_house_numbers(text: &str) -> BTreeSet<String> {
    let mut text = text.to_lowercase();
    let mut numbers = BTreeSet::new();

    for pattern in HOUSE_NUMBER_PATTERNS.iter() {
        numbers.extend(pattern.find_iter(&text).map(|mat| mat.as_str().to_string()));
        text = pattern.replace_all(&text, " ").into_owned();
    }

    numbers
}

/// Every run of six digits in `text`, in order of appearance.
///
/// Longer digit runs are consumed six digits at a time.
pub fn extract_postal_codes(text: &str) -> Vec<String> {
    POSTAL_CODE_PATTERN
        .as_ref()
        .map(|pattern| {
            pattern
                .find_iter(text)
                .map(|mat| mat.as_str().to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_patterns_compile() {
        assert_eq!(HOUSE_NUMBER_PATTERNS.len(), 6);
        assert!(POSTAL_CODE_PATTERN.is_some());
    }

    #[test]
    fn test_three_pieces() {
        assert_eq!(
            extract_house_numbers("test 1-2-3, 1-2-a, 1-a-3"),
            set(&["1-2-3", "1-2-a", "1-a-3"])
        );
    }

    #[test]
    fn test_two_pieces() {
        assert_eq!(
            extract_house_numbers("test 1-2, test!!! 1-a"),
            set(&["1-2", "1-a"])
        );
    }

    #[test]
    fn test_one_piece() {
        assert_eq!(extract_house_numbers("test 1, 12, 1234"), set(&["1", "12"]));
    }

    #[test]
    fn test_max_element_size() {
        assert_eq!(
            extract_house_numbers("123-123 234-2345 34-a-3456 456-aa 567-aa-567"),
            set(&["123-123", "234", "34-a", "456", "567"])
        );
    }

    #[test]
    fn test_split_symbols() {
        assert_eq!(
            extract_house_numbers(r"1/1 2\2 3-3 4:4 5.6 7,8 11 q 12w 13 ee"),
            set(&[
                "1/1", r"2\2", "3-3", "4:4", "5", "6", "7", "8", "11 q", "12w", "13"
            ])
        );
    }

    #[test]
    fn test_real_address() {
        assert_eq!(
            extract_house_numbers(
                "Россия, Набережные Челны, Комсомольская набережная, 30, кв 204"
            ),
            set(&["30", "204"])
        );
    }

    #[test]
    fn test_cyrillic_letter_is_lowercased() {
        assert_eq!(extract_house_numbers("дом 12Б"), set(&["12б"]));
    }

    #[test]
    fn test_no_house_numbers() {
        assert!(extract_house_numbers("").is_empty());
        assert!(extract_house_numbers("Москва, Арбат").is_empty());
    }

    #[test]
    fn test_postal_codes() {
        assert_eq!(
            extract_postal_codes("123456, Москва, 654321"),
            vec!["123456", "654321"]
        );
        assert_eq!(extract_postal_codes("1234567"), vec!["123456"]);
        assert!(extract_postal_codes("12345 Москва").is_empty());
    }
}

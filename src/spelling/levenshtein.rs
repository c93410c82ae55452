//! Levenshtein distance calculation for spelling suggestions.
//!
//! All distances are computed over `char`s, not bytes, so Cyrillic words
//! are measured in letters.

use std::cmp::min;

/// Two-row Levenshtein over char slices with early exit once every cell of a
/// row exceeds `threshold`.
fn distance_chars(s1: &[char], s2: &[char], threshold: usize) -> Option<usize> {
    let (len1, len2) = (s1.len(), s2.len());

    if len1.abs_diff(len2) > threshold {
        return None;
    }
    if len1 == 0 || len2 == 0 {
        let distance = len1.max(len2);
        return (distance <= threshold).then_some(distance);
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for i in 1..=len1 {
        curr_row[0] = i;
        let mut min_in_row = i;

        for j in 1..=len2 {
            let cost = usize::from(s1[i - 1] != s2[j - 1]);

            curr_row[j] = min(
                min(
                    prev_row[j] + 1,     // deletion
                    curr_row[j - 1] + 1, // insertion
                ),
                prev_row[j - 1] + cost, // substitution
            );

            min_in_row = min(min_in_row, curr_row[j]);
        }

        if min_in_row > threshold {
            return None;
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[len2];
    (distance <= threshold).then_some(distance)
}

/// Measures one query word against many candidates, decoding the query
/// into chars once.
pub struct LevenshteinMatcher {
    query_chars: Vec<char>,
}

impl LevenshteinMatcher {
    /// Create a new matcher for the given query string.
    pub fn new(query: &str) -> Self {
        LevenshteinMatcher {
            query_chars: query.chars().collect(),
        }
    }

    /// Query length in chars.
    pub fn len(&self) -> usize {
        self.query_chars.len()
    }

    /// Whether the query is empty.
    pub fn is_empty(&self) -> bool {
        self.query_chars.is_empty()
    }

    /// Distance to `candidate`, or `None` when it exceeds `threshold`.
    pub fn distance_threshold(&self, candidate: &str, threshold: usize) -> Option<usize> {
        let candidate_chars: Vec<char> = candidate.chars().collect();
        distance_chars(&self.query_chars, &candidate_chars, threshold)
    }
}

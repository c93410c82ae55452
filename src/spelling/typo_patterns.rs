//! Alphabets and keyboard-aware typo patterns.
//!
//! Addresses are typed on either a Russian ЙЦУКЕН or a Latin QWERTY layout,
//! so both layouts feed the nearby-key tables used to weight substitutions.

/// Lowercase Latin letters.
pub const LATIN_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Lowercase Cyrillic letters of the Russian alphabet.
pub const CYRILLIC_LETTERS: &str = "абвгдеёжзийклмнопрстуфхцчшщъыьэюя";

const QWERTY_ROWS: [&str; 3] = ["qwertyuiop", "asdfghjkl", "zxcvbnm"];
const JCUKEN_ROWS: [&str; 3] = ["йцукенгшщзхъ", "фывапролджэ", "ячсмитьбю"];

/// Whether `ch` belongs to one of the two supported alphabets.
pub fn is_supported_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || matches!(ch, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё')
}

/// Whether the character is Cyrillic.
pub fn is_cyrillic(ch: char) -> bool {
    matches!(ch, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё')
}

/// Common typo patterns for keyboard-based errors.
pub struct TypoPatterns;

impl TypoPatterns {
    /// Letters adjacent to `ch` on its keyboard layout: left and right in
    /// the same row, the two keys above and the two keys below.
    pub fn nearby_keys(ch: char) -> Vec<char> {
        let lower = ch.to_lowercase().next().unwrap_or(ch);
        let lower = if lower == 'ё' { 'е' } else { lower };
        let rows = if is_cyrillic(lower) {
            &JCUKEN_ROWS
        } else {
            &QWERTY_ROWS
        };

        let rows: Vec<Vec<char>> = rows.iter().map(|row| row.chars().collect()).collect();
        let Some((row, col)) = rows
            .iter()
            .enumerate()
            .find_map(|(r, keys)| keys.iter().position(|&k| k == lower).map(|c| (r, c)))
        else {
            return Vec::new();
        };

        let mut nearby = Vec::new();
        let mut push = |r: usize, c: Option<usize>| {
            if let Some(&key) = c.and_then(|c| rows.get(r).and_then(|keys| keys.get(c))) {
                nearby.push(key);
            }
        };

        push(row, col.checked_sub(1));
        push(row, Some(col + 1));
        if row > 0 {
            push(row - 1, Some(col));
            push(row - 1, Some(col + 1));
        }
        push(row + 1, col.checked_sub(1));
        push(row + 1, Some(col));

        nearby
    }

    /// Calculate keyboard distance-weighted edit distance.
    /// Substitutions between nearby keys have lower cost.
    #[allow(clippy::needless_range_loop)]
    pub fn keyboard_distance(s1: &str, s2: &str) -> f64 {
        let s1_chars: Vec<char> = s1.chars().collect();
        let s2_chars: Vec<char> = s2.chars().collect();
        let (len1, len2) = (s1_chars.len(), s2_chars.len());

        if len1 == 0 {
            return len2 as f64;
        }
        if len2 == 0 {
            return len1 as f64;
        }

        let mut matrix = vec![vec![0.0; len2 + 1]; len1 + 1];
        for i in 0..=len1 {
            matrix[i][0] = i as f64;
        }
        for j in 0..=len2 {
            matrix[0][j] = j as f64;
        }

        for i in 1..=len1 {
            for j in 1..=len2 {
                let ch1 = s1_chars[i - 1];
                let ch2 = s2_chars[j - 1];

                let substitution_cost = if ch1 == ch2 {
                    0.0
                } else if Self::nearby_keys(ch1).contains(&ch2) {
                    0.5
                } else {
                    1.0
                };

                matrix[i][j] = (matrix[i - 1][j] + 1.0) // deletion
                    .min(matrix[i][j - 1] + 1.0) // insertion
                    .min(matrix[i - 1][j - 1] + substitution_cost); // substitution
            }
        }

        matrix[len1][len2]
    }
}

use std::collections::HashMap;

/// Score returned by [`phonetic_similarity`] when the phonetic keys agree.
pub const PHONETIC_MATCH_SCORE: f64 = 0.7;

const PHONETIC_KEY_LEN: usize = 3;

/// Case-insensitive Sørensen–Dice coefficient over character bigrams.
///
/// Returns a value in `0.0..=1.0`. Strings shorter than two characters never
/// match. Repeated bigrams are counted as a multiset.
pub fn dice_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    if a.len() < 2 || b.len() < 2 {
        return 0.0;
    }

    let mut bigrams: HashMap<(char, char), usize> = HashMap::new();
    for pair in a.windows(2) {
        *bigrams.entry((pair[0], pair[1])).or_insert(0) += 1;
    }

    let mut matches = 0usize;
    for pair in b.windows(2) {
        if let Some(count) = bigrams.get_mut(&(pair[0], pair[1])) {
            if *count > 0 {
                *count -= 1;
                matches += 1;
            }
        }
    }

    (2 * matches) as f64 / (a.len() + b.len() - 2) as f64
}

/// Crude consonant-skeleton comparison.
///
/// Both strings are lower-cased, stripped of the vowels `aeiou` and of anything
/// outside `a-z`, and cut to their first three letters. Equal non-empty keys
/// score [`PHONETIC_MATCH_SCORE`]; anything else scores 0.
pub fn phonetic_similarity(a: &str, b: &str) -> f64 {
    let key_a = phonetic_key(a);
    if !key_a.is_empty() && key_a == phonetic_key(b) {
        PHONETIC_MATCH_SCORE
    } else {
        0.0
    }
}

fn phonetic_key(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() && !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
        .take(PHONETIC_KEY_LEN)
        .collect()
}

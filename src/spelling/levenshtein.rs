//! Levenshtein distance calculation for spelling correction.
//!
//! Distances are counted in characters, not bytes, so Cyrillic and extended
//! Latin letters cost the same as ASCII ones.

use std::cmp::min;

/// Calculate the Levenshtein distance between two strings.
/// This is the minimum number of single-character edits (insertions, deletions, or substitutions)
/// required to change one word into another.
pub fn levenshtein_distance(s1: &str, s2: &str) -> u32 {
    let len = s1.chars().count().max(s2.chars().count());
    let max = u32::try_from(len).unwrap_or(u32::MAX - 1);
    distance(s1, s2, max)
}

/// Bounded Levenshtein distance.
///
/// Returns the exact distance when it is at most `max`, and `max + 1` as soon
/// as it is known to exceed `max`: immediately when the lengths differ by more
/// than `max`, or when every cell of a matrix row is already above `max`
/// (costs never decrease along a path, so no later row can come back).
///
/// Only two rows over the shorter string are kept.
pub fn distance(a: &str, b: &str, max: u32) -> u32 {
    let over = max.saturating_add(1);

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    // Columns run over the shorter string.
    let (long, short) = if a_chars.len() >= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };

    let len_diff = long.len() - short.len();
    if u32::try_from(len_diff).map_or(true, |diff| diff > max) {
        return over;
    }
    if short.is_empty() {
        // len_diff <= max here
        return len_diff as u32;
    }

    let mut prev_row: Vec<u32> = (0..=short.len() as u32).collect();
    let mut curr_row = vec![0u32; short.len() + 1];

    for (i, &lc) in long.iter().enumerate() {
        curr_row[0] = i as u32 + 1;
        let mut min_in_row = curr_row[0];

        for (j, &sc) in short.iter().enumerate() {
            let cost = if lc == sc { 0 } else { 1 };

            curr_row[j + 1] = min(
                min(
                    prev_row[j + 1] + 1, // deletion
                    curr_row[j] + 1,     // insertion
                ),
                prev_row[j] + cost, // substitution
            );

            min_in_row = min(min_in_row, curr_row[j + 1]);
        }

        if min_in_row > max {
            return over;
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let result = prev_row[short.len()];
    if result <= max { result } else { over }
}

/// Calculate Levenshtein distance with a threshold, returning None if the
/// distance exceeds it.
pub fn distance_within(a: &str, b: &str, max: u32) -> Option<u32> {
    let d = distance(a, b, max);
    (d <= max).then_some(d)
}

/// Calculate a similarity ratio between 0.0 (completely different) and 1.0
/// (identical).
pub fn similarity_ratio(s1: &str, s2: &str) -> f64 {
    let max_len = s1.chars().count().max(s2.chars().count());

    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(s1, s2);
    1.0 - (distance as f64 / max_len as f64)
}

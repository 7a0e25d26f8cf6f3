//! Weighted string similarity on a 0–100 scale.
//!
//! [`weighted_ratio`] combines several scorers the way sequence-matching
//! libraries usually do: plain InDel ratio for strings of similar length,
//! token-sort and token-set ratios for reordered or partial word overlap, and
//! partial (substring) ratios, scaled down, for strings of very unequal length.

use std::collections::BTreeSet;

use ahash::AHashSet;

use crate::util::levenshtein::lcs_length;

const UNBASE_SCALE: f64 = 0.95;

/// Lowercase, turn every non-alphanumeric char into a space, and trim.
pub fn default_process(text: &str) -> String {
    let mapped: String = text
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .flat_map(char::to_lowercase)
        .collect();
    mapped.trim().to_string()
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    100.0 * 2.0 * lcs_length(a, b) as f64 / total as f64
}

/// Normalized InDel similarity.
pub fn ratio(s1: &str, s2: &str) -> f64 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    ratio_chars(&a, &b)
}

/// Best [`ratio`] of the shorter string against any same-length window of the
/// longer one, including windows clipped at either end.
pub fn partial_ratio(s1: &str, s2: &str) -> f64 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let m = short.len();
    let n = long.len();
    let alphabet: AHashSet<char> = short.iter().copied().collect();
    let mut best = 0.0f64;

    // Clipped windows at the start and end of the longer string.
    for k in 1..m {
        if alphabet.contains(&long[k - 1]) {
            best = best.max(ratio_chars(&short, &long[..k]));
        }
        if alphabet.contains(&long[n - k]) {
            best = best.max(ratio_chars(&short, &long[n - k..]));
        }
        if best >= 100.0 {
            return 100.0;
        }
    }

    for start in 0..=(n - m) {
        let window = &long[start..start + m];
        if !alphabet.contains(&window[0]) && !alphabet.contains(&window[m - 1]) {
            continue;
        }
        best = best.max(ratio_chars(&short, window));
        if best >= 100.0 {
            return 100.0;
        }
    }

    best
}

fn sorted_tokens(text: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

/// [`ratio`] after sorting the words of both strings.
pub fn token_sort_ratio(s1: &str, s2: &str) -> f64 {
    ratio(&sorted_tokens(s1).join(" "), &sorted_tokens(s2).join(" "))
}

/// Compare the shared words and the leftover words of both strings.
///
/// Returns 100 when one word set contains the other.
pub fn token_set_ratio(s1: &str, s2: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = s1.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = s2.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let sect = intersection.join(" ");
    let join_with_sect = |diff: &[&str]| {
        if sect.is_empty() {
            diff.join(" ")
        } else {
            format!("{sect} {}", diff.join(" "))
        }
    };
    let combined_ab = join_with_sect(&diff_ab);
    let combined_ba = join_with_sect(&diff_ba);

    let mut best = ratio(&combined_ab, &combined_ba);
    if !sect.is_empty() {
        best = best
            .max(ratio(&sect, &combined_ab))
            .max(ratio(&sect, &combined_ba));
    }
    best
}

/// Best of [`token_sort_ratio`] and [`token_set_ratio`].
pub fn token_ratio(s1: &str, s2: &str) -> f64 {
    token_sort_ratio(s1, s2).max(token_set_ratio(s1, s2))
}

/// Partial ratio over sorted words; 100 as soon as one word is shared.
pub fn partial_token_ratio(s1: &str, s2: &str) -> f64 {
    let split_a: Vec<&str> = s1.split_whitespace().collect();
    let split_b: Vec<&str> = s2.split_whitespace().collect();
    let tokens_a: BTreeSet<&str> = split_a.iter().copied().collect();
    let tokens_b: BTreeSet<&str> = split_b.iter().copied().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }
    if tokens_a.intersection(&tokens_b).next().is_some() {
        return 100.0;
    }

    let best = partial_ratio(&sorted_tokens(s1).join(" "), &sorted_tokens(s2).join(" "));

    // Without duplicates the word sets are the sorted strings already compared.
    if split_a.len() == tokens_a.len() && split_b.len() == tokens_b.len() {
        return best;
    }

    let diff_ab: Vec<&str> = tokens_a.iter().copied().collect();
    let diff_ba: Vec<&str> = tokens_b.iter().copied().collect();
    best.max(partial_ratio(&diff_ab.join(" "), &diff_ba.join(" ")))
}

/// Weighted similarity of two raw strings, 0–100.
///
/// Both strings go through [`default_process`]; an empty result scores 0.
pub fn weighted_ratio(s1: &str, s2: &str) -> f64 {
    let p1 = default_process(s1);
    let p2 = default_process(s2);
    weighted_ratio_processed(&p1, &p2)
}

/// [`weighted_ratio`] on strings that already went through [`default_process`].
pub fn weighted_ratio_processed(p1: &str, p2: &str) -> f64 {
    if p1.is_empty() || p2.is_empty() {
        return 0.0;
    }

    let len1 = p1.chars().count() as f64;
    let len2 = p2.chars().count() as f64;
    let len_ratio = len1.max(len2) / len1.min(len2);

    let end_ratio = ratio(p1, p2);

    if len_ratio < 1.5 {
        return end_ratio.max(token_ratio(p1, p2) * UNBASE_SCALE);
    }

    let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
    let end_ratio = end_ratio.max(partial_ratio(p1, p2) * partial_scale);

    end_ratio.max(partial_token_ratio(p1, p2) * UNBASE_SCALE * partial_scale)
}

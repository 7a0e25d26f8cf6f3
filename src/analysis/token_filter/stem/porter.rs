//! Porter stemming algorithm implementation.
//!
//! The vocabulary of the intent model is made of Porter stems, so user words go
//! through the same reduction before they are projected onto it. The rule set is
//! Martin Porter's original five steps, with the step 1c variant that only turns
//! a final `y` into `i` after a consonant ("holidays" → "holiday", "happy" → "happi").
//!
//! # Examples
//!
//! ```
//! use unibot::analysis::token_filter::stem::Stemmer;
//! use unibot::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("flies"), "fli");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use crate::analysis::token_filter::stem::Stemmer;

const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
];

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

// "ement" and "ment" must be tried before "ent".
const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Porter stemming algorithm implementation.
///
/// Only ASCII alphabetic words are stemmed. Anything else (digits, accented
/// letters, apostrophes) is lowercased and returned as is, so the stemmer can
/// never index into the middle of a multi-byte character.
#[derive(Debug, Clone, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }

    /// Check if the byte at `pos` acts as a consonant.
    fn is_consonant(word: &[u8], pos: usize) -> bool {
        match word[pos] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => pos == 0 || !Self::is_consonant(word, pos - 1),
            _ => true,
        }
    }

    /// Calculate the measure of a word (number of VC sequences).
    fn measure(word: &[u8]) -> usize {
        let len = word.len();
        let mut i = 0;

        while i < len && Self::is_consonant(word, i) {
            i += 1;
        }

        let mut m = 0;
        loop {
            while i < len && !Self::is_consonant(word, i) {
                i += 1;
            }
            if i >= len {
                return m;
            }
            while i < len && Self::is_consonant(word, i) {
                i += 1;
            }
            m += 1;
        }
    }

    fn contains_vowel(word: &[u8]) -> bool {
        (0..word.len()).any(|i| !Self::is_consonant(word, i))
    }

    fn ends_with_double_consonant(word: &[u8]) -> bool {
        let len = word.len();
        len >= 2 && word[len - 1] == word[len - 2] && Self::is_consonant(word, len - 1)
    }

    /// Check if word ends with consonant-vowel-consonant, last not w, x or y.
    fn ends_cvc(word: &[u8]) -> bool {
        let len = word.len();
        len >= 3
            && Self::is_consonant(word, len - 3)
            && !Self::is_consonant(word, len - 2)
            && Self::is_consonant(word, len - 1)
            && !matches!(word[len - 1], b'w' | b'x' | b'y')
    }

    fn replace_suffix(word: &mut Vec<u8>, suffix_len: usize, replacement: &str) {
        word.truncate(word.len() - suffix_len);
        word.extend_from_slice(replacement.as_bytes());
    }

    /// Step 1a: plurals.
    fn step1a(word: &mut Vec<u8>) {
        if word.ends_with(b"sses") || word.ends_with(b"ies") {
            word.truncate(word.len() - 2);
        } else if word.ends_with(b"ss") {
        } else if word.ends_with(b"s") {
            word.pop();
        }
    }

    /// Step 1b: -eed, -ed and -ing.
    fn step1b(word: &mut Vec<u8>) {
        if word.ends_with(b"eed") {
            if Self::measure(&word[..word.len() - 3]) > 0 {
                word.pop();
            }
            return;
        }

        let suffix_len = if word.ends_with(b"ed") {
            2
        } else if word.ends_with(b"ing") {
            3
        } else {
            return;
        };

        if !Self::contains_vowel(&word[..word.len() - suffix_len]) {
            return;
        }
        word.truncate(word.len() - suffix_len);

        if word.ends_with(b"at") || word.ends_with(b"bl") || word.ends_with(b"iz") {
            word.push(b'e');
        } else if Self::ends_with_double_consonant(word)
            && !matches!(word.last(), Some(b'l') | Some(b's') | Some(b'z'))
        {
            word.pop();
        } else if Self::measure(word) == 1 && Self::ends_cvc(word) {
            word.push(b'e');
        }
    }

    /// Step 1c: terminal y after a consonant becomes i.
    fn step1c(word: &mut [u8]) {
        let len = word.len();
        if len > 2 && word[len - 1] == b'y' && Self::is_consonant(word, len - 2) {
            word[len - 1] = b'i';
        }
    }

    /// Apply the first rule whose suffix matches, if the stem measure exceeds `min_measure`.
    fn apply_rules(word: &mut Vec<u8>, rules: &[(&str, &str)], min_measure: usize) {
        for (suffix, replacement) in rules {
            if word.ends_with(suffix.as_bytes()) {
                if Self::measure(&word[..word.len() - suffix.len()]) > min_measure {
                    Self::replace_suffix(word, suffix.len(), replacement);
                }
                return;
            }
        }
    }

    /// Step 4: strip -ance, -ment, -ion, ... from long stems.
    fn step4(word: &mut Vec<u8>) {
        for suffix in STEP4_SUFFIXES {
            if !word.ends_with(suffix.as_bytes()) {
                continue;
            }
            let stem = &word[..word.len() - suffix.len()];
            if *suffix == "ion" && !matches!(stem.last(), Some(b's') | Some(b't')) {
                continue;
            }
            if Self::measure(stem) > 1 {
                word.truncate(stem.len());
            }
            return;
        }
    }

    /// Step 5: final -e and -ll.
    fn step5(word: &mut Vec<u8>) {
        if word.ends_with(b"e") {
            let stem = &word[..word.len() - 1];
            let m = Self::measure(stem);
            if m > 1 || (m == 1 && !Self::ends_cvc(stem)) {
                word.pop();
            }
        }

        if word.ends_with(b"ll") && Self::measure(word) > 1 {
            word.pop();
        }
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let lowered = word.to_lowercase();
        if lowered.len() <= 2 || !lowered.bytes().all(|b| b.is_ascii_lowercase()) {
            return lowered;
        }

        let mut bytes = lowered.into_bytes();
        Self::step1a(&mut bytes);
        Self::step1b(&mut bytes);
        Self::step1c(&mut bytes);
        Self::apply_rules(&mut bytes, STEP2_RULES, 0);
        Self::apply_rules(&mut bytes, STEP3_RULES, 0);
        Self::step4(&mut bytes);
        Self::step5(&mut bytes);

        // Only ASCII bytes were ever written.
        String::from_utf8(bytes).unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

//! Dictionary management for spelling correction.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;

use crate::error::Result;

/// Frequency given to domain words (catalog patterns, vocabulary) by default.
pub const DOMAIN_WORD_FREQUENCY: u32 = 5_000;

/// A dictionary that stores words and their frequencies for spelling correction.
///
/// Words are stored lowercased. Only purely alphabetic words are accepted by the
/// bulk loaders, so numbers and identifiers never become correction targets.
#[derive(Debug, Clone, Default)]
pub struct SpellingDictionary {
    /// Words and their frequencies
    words: AHashMap<String, u32>,
    /// Total word count for probability calculations
    total_count: u64,
    /// Highest single frequency, used to normalize frequency scores
    max_frequency: u32,
}

impl SpellingDictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a word with the given frequency, replacing any previous frequency.
    pub fn add_word(&mut self, word: String, frequency: u32) {
        let normalized = word.to_lowercase();

        let old_freq = self.words.insert(normalized, frequency).unwrap_or(0);
        self.total_count = self.total_count - old_freq as u64 + frequency as u64;
        self.max_frequency = self.max_frequency.max(frequency);
    }

    /// Increment the frequency of a word by 1.
    pub fn increment_word(&mut self, word: &str) {
        let current = self.frequency(word);
        self.add_word(word.to_string(), current + 1);
    }

    /// Add every alphabetic word of `text`, raising each to at least `frequency`.
    ///
    /// Words already more frequent than `frequency` keep their count.
    pub fn add_text(&mut self, text: &str, frequency: u32) {
        for word in Self::alphabetic_words(text) {
            if self.frequency(&word) < frequency {
                self.add_word(word, frequency);
            }
        }
    }

    /// Check if a word exists in the dictionary.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(&word.to_lowercase())
    }

    /// Get the frequency of a word.
    pub fn frequency(&self, word: &str) -> u32 {
        self.words.get(&word.to_lowercase()).copied().unwrap_or(0)
    }

    /// Get the probability of a word (frequency / total_count).
    pub fn probability(&self, word: &str) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.frequency(word) as f64 / self.total_count as f64
    }

    /// Get the total number of unique words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Get the total frequency count.
    pub fn total_frequency(&self) -> u64 {
        self.total_count
    }

    /// Get the highest frequency of any word.
    pub fn max_frequency(&self) -> u32 {
        self.max_frequency
    }

    /// Load extra words from a text file with one word per line.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut dictionary = SpellingDictionary::new();
        let reader = BufReader::new(File::open(path)?);

        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() && word.chars().all(|c| c.is_alphabetic()) {
                dictionary.increment_word(word);
            }
        }

        Ok(dictionary)
    }

    /// Create a dictionary from a corpus of text, counting occurrences.
    pub fn from_corpus(text: &str) -> Self {
        let mut dictionary = SpellingDictionary::new();

        for word in Self::alphabetic_words(text) {
            dictionary.increment_word(&word);
        }

        dictionary
    }

    /// Get words that start with the given prefix.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let prefix_lower = prefix.to_lowercase();
        self.words
            .keys()
            .filter(|word| word.starts_with(&prefix_lower))
            .cloned()
            .collect()
    }

    /// Get words whose char length is within `slack` of `len`.
    pub fn words_near_length(&self, len: usize, slack: usize) -> impl Iterator<Item = &str> {
        self.words
            .keys()
            .filter(move |word| word.chars().count().abs_diff(len) <= slack)
            .map(String::as_str)
    }

    /// Merge another dictionary into this one, summing frequencies.
    pub fn merge(&mut self, other: &SpellingDictionary) {
        for (word, frequency) in &other.words {
            let current = self.frequency(word);
            self.add_word(word.clone(), current + frequency);
        }
    }

    fn alphabetic_words(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphabetic())
            .filter(|word| word.chars().count() > 1)
            .map(|word| word.to_lowercase())
    }
}

// Ordered by rough frequency; rank r gets frequency 1_000_000 / (r + 1).
const COMMON_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what", "so", "up", "out", "if", "about", "who", "get", "which", "go", "me", "when",
    "make", "can", "like", "time", "no", "just", "him", "know", "take", "is", "are", "was",
    "were", "been", "has", "had", "did", "does", "am", "people", "into", "year", "your",
    "good", "some", "could", "them", "see", "other", "than", "then", "now", "look", "only",
    "come", "its", "over", "think", "also", "back", "after", "use", "two", "how", "our",
    "work", "first", "well", "way", "even", "new", "want", "because", "any", "these", "give",
    "day", "most", "us", "where", "why", "please", "tell", "show", "list", "find", "need",
    "help", "many", "much", "more", "each", "every", "whose", "here", "there", "should",
    "may", "next", "last", "hi", "hello", "hey", "thanks", "thank", "bye", "goodbye", "yes",
    "okay", "sure", "name", "names", "number", "information", "details", "detail", "about",
    "available", "offered", "offer", "university", "college", "campus", "student", "students",
    "teacher", "teachers", "faculty", "professor", "professors", "staff", "department",
    "departments", "course", "courses", "syllabus", "subject", "subjects", "holiday",
    "holidays", "leave", "calendar", "exam", "exams", "examination", "result", "results",
    "marks", "grade", "grades", "semester", "admission", "admissions", "fee", "fees",
    "hostel", "library", "timetable", "schedule", "contact", "address", "location", "phone",
    "email", "principal", "office", "degree", "engineering", "science", "computer",
    "technology", "electronics", "electrical", "mechanical", "communication", "business",
    "systems", "artificial", "intelligence", "machine", "learning", "data", "download",
    "file", "files", "duration", "program", "programs", "morning", "evening", "afternoon",
    "night", "today", "tomorrow", "week", "month", "open", "closed", "who", "doing",
    "going", "fine", "great", "nice", "bot", "chatbot", "question", "answer",
];

/// Builtin dictionaries.
pub struct BuiltinDictionary;

impl BuiltinDictionary {
    /// Common English words plus general university vocabulary.
    pub fn english() -> SpellingDictionary {
        let mut dict = SpellingDictionary::new();

        for (rank, word) in COMMON_WORDS.iter().enumerate() {
            if !dict.contains(word) {
                dict.add_word(word.to_string(), 1_000_000 / (rank as u32 + 1));
            }
        }

        dict
    }

    /// Create a minimal dictionary for testing.
    pub fn minimal() -> SpellingDictionary {
        let mut dict = SpellingDictionary::new();

        let words = [
            "hello", "world", "show", "list", "all", "student", "students", "faculty",
            "course", "courses", "holiday", "holidays", "syllabus", "department", "result",
            "details", "of", "the", "what", "are",
        ];

        for word in words {
            dict.add_word(word.to_string(), 100);
        }

        dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_dictionary_basic_operations() {
        let mut dict = SpellingDictionary::new();

        assert!(!dict.contains("hello"));
        assert_eq!(dict.frequency("hello"), 0);
        assert_eq!(dict.word_count(), 0);

        dict.add_word("hello".to_string(), 5);
        assert!(dict.contains("hello"));
        assert_eq!(dict.frequency("hello"), 5);
        assert_eq!(dict.total_frequency(), 5);

        dict.increment_word("hello");
        assert_eq!(dict.frequency("hello"), 6);
        assert_eq!(dict.total_frequency(), 6);

        dict.add_word("world".to_string(), 3);
        assert_eq!(dict.word_count(), 2);
        assert_eq!(dict.total_frequency(), 9);
        assert_eq!(dict.max_frequency(), 6);
    }

    #[test]
    fn test_dictionary_case_insensitive() {
        let mut dict = SpellingDictionary::new();

        dict.add_word("Hello".to_string(), 5);
        assert!(dict.contains("hello"));
        assert!(dict.contains("HELLO"));

        dict.increment_word("HELLO");
        assert_eq!(dict.frequency("hello"), 6);
    }

    #[test]
    fn test_dictionary_probability() {
        let mut dict = SpellingDictionary::new();

        dict.add_word("hello".to_string(), 6);
        dict.add_word("world".to_string(), 4);

        assert!((dict.probability("hello") - 0.6).abs() < 1e-6);
        assert_eq!(dict.probability("nonexistent"), 0.0);
    }

    #[test]
    fn test_add_text_raises_frequency() {
        let mut dict = BuiltinDictionary::english();
        let the_freq = dict.frequency("the");

        dict.add_text("Student details of CSBS, AIML; 2024!", 500);

        assert_eq!(dict.frequency("the"), the_freq);
        assert_eq!(dict.frequency("csbs"), 500);
        assert!(dict.contains("aiml"));
        assert!(!dict.contains("2024"));
    }

    #[test]
    fn test_from_corpus() {
        let dict = SpellingDictionary::from_corpus("The dog saw the other dog. The end.");

        assert_eq!(dict.frequency("the"), 3);
        assert_eq!(dict.frequency("dog"), 2);
        assert_eq!(dict.frequency("end"), 1);
    }

    #[test]
    fn test_words_with_prefix_and_length() {
        let mut dict = SpellingDictionary::new();
        dict.add_word("holiday".to_string(), 1);
        dict.add_word("holidays".to_string(), 1);
        dict.add_word("hostel".to_string(), 1);

        assert_eq!(dict.words_with_prefix("holi").len(), 2);
        assert_eq!(dict.words_with_prefix("ho").len(), 3);

        let near: Vec<&str> = dict.words_near_length(6, 0).collect();
        assert_eq!(near, vec!["hostel"]);
    }

    #[test]
    fn test_merge_dictionaries() {
        let mut dict1 = SpellingDictionary::new();
        dict1.add_word("hello".to_string(), 5);

        let mut dict2 = SpellingDictionary::new();
        dict2.add_word("hello".to_string(), 2);
        dict2.add_word("campus".to_string(), 1);

        dict1.merge(&dict2);
        assert_eq!(dict1.frequency("hello"), 7);
        assert_eq!(dict1.frequency("campus"), 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "syllabus").unwrap();
        writeln!(file, "cgpa").unwrap();
        writeln!(file, "not a word 42").unwrap();
        writeln!(file, "syllabus").unwrap();

        let dict = SpellingDictionary::load_from_file(file.path()).unwrap();
        assert_eq!(dict.word_count(), 2);
        assert_eq!(dict.frequency("syllabus"), 2);
    }

    #[test]
    fn test_builtin_dictionaries() {
        let english = BuiltinDictionary::english();
        assert!(english.contains("the"));
        assert!(english.contains("holidays"));
        assert_eq!(english.frequency("the"), 1_000_000);
        assert_eq!(english.max_frequency(), 1_000_000);

        let minimal = BuiltinDictionary::minimal();
        assert_eq!(minimal.frequency("faculty"), 100);
    }
}

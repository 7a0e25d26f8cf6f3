//! End-to-end behavior of the intent-resolution pipeline.

mod common;

use std::sync::Arc;

use common::*;
use unibot::catalog::{Intent, IntentCatalog};
use unibot::chat::engine::{DATA_ERROR_RESPONSE, FALLBACK_RESPONSE};
use unibot::store::MemoryStore;

#[test]
fn test_exact_pattern_returns_canned_response() {
    let catalog = IntentCatalog::from_intents(vec![Intent::new(
        "courses",
        vec!["what courses are offered".into()],
        vec!["We offer B.E., B.Tech and MBA programmes.".into()],
    )])
    .unwrap();
    let engine = engine_with(catalog, FixedClassifier::new("courses", 0.1), Arc::new(store()));

    let reply = engine.get_bot_response("what courses are offered");
    assert_eq!(reply.tag, "courses");
    assert_eq!(reply.response, "We offer B.E., B.Tech and MBA programmes.");
}

#[test]
fn test_misspelled_greeting_matches_fuzzily() {
    let catalog = IntentCatalog::from_intents(vec![
        Intent::new(
            "greeting",
            vec!["how are you".into()],
            vec!["Hello! How can I help?".into()],
        ),
        Intent::new(
            "holidays",
            vec!["List of holidays".into()],
            vec!["See the holiday calendar.".into()],
        ),
    ])
    .unwrap();
    let engine = engine_with(catalog, FixedClassifier::new("greeting", 0.2), Arc::new(store()));

    let reply = engine.get_bot_response("hw are u");
    assert_eq!(reply.tag, "greeting");
    assert_eq!(reply.response, "Hello! How can I help?");
}

#[test]
fn test_unmatched_query_falls_back() {
    let reply = engine().get_bot_response("xyzzyplugh");
    assert_eq!(reply.tag, "unknown");
    assert_eq!(reply.response, FALLBACK_RESPONSE);
}

#[test]
fn test_confident_holidays_with_empty_store() {
    let engine = engine_with(
        catalog(),
        FixedClassifier::new("holidays", 0.95),
        Arc::new(MemoryStore::new()),
    );

    let reply = engine.get_bot_response("when are the holidays");
    assert_eq!(reply.tag, "holidays");
    assert_eq!(reply.response, "No holiday records available.");
}

#[test]
fn test_neural_classifier_routes_to_data() {
    let engine = engine();

    let reply = engine.get_bot_response("What COURSES are offered?");
    assert_eq!(reply.tag, "courses");
    assert_eq!(reply.response, "1. *Computer Science* (4 years)\n2. *MBA* (2 years)");

    let reply = engine.get_bot_response("cse faculty");
    assert_eq!(reply.tag, "faculty");
    assert_eq!(reply.response, "📌 *Faculty details of CSE:*\n1. *Ada Lovelace*");
}

#[test]
fn test_misspelling_is_corrected_before_classification() {
    let diagnosis = engine().diagnose("list of holidyas");

    assert_eq!(diagnosis.utterance.corrected, "list of holidays");
    assert_eq!(diagnosis.active_words, vec!["holiday".to_string()]);
    assert!(diagnosis.confident);
}

#[test]
fn test_branches_are_mutually_exclusive() {
    // Confident: the data answer wins even though "hello" is an exact pattern.
    let confident = engine_with(catalog(), FixedClassifier::new("courses", 0.95), Arc::new(store()));
    let reply = confident.get_bot_response("hello");
    assert_eq!(reply.tag, "courses");
    assert!(reply.response.starts_with("1. *Computer Science*"));

    // At the threshold the classifier is not trusted.
    let borderline = engine_with(catalog(), FixedClassifier::new("courses", 0.80), Arc::new(store()));
    assert_eq!(borderline.get_bot_response("hello").tag, "greeting");

    // Confident on a tag without a data answer: catalog response for the input.
    let canned = engine_with(catalog(), FixedClassifier::new("greeting", 0.99), Arc::new(store()));
    assert_eq!(canned.get_bot_response("all faculty").tag, "faculty");
}

#[test]
fn test_low_confidence_never_consults_the_store() {
    let engine = engine_with(catalog(), FixedClassifier::new("students", 0.5), Arc::new(BrokenStore));

    let reply = engine.get_bot_response("all students");
    assert_eq!(reply.tag, "students");
    assert_eq!(reply.response, "Ask for the students of a course.");
}

#[test]
fn test_store_failure_keeps_classifier_tag() {
    let engine = engine_with(catalog(), FixedClassifier::new("students", 0.9), Arc::new(BrokenStore));

    let reply = engine.get_bot_response("all students");
    assert_eq!(reply.tag, "students");
    assert_eq!(reply.response, DATA_ERROR_RESPONSE);
}

#[test]
fn test_classifier_failure_degrades_to_fuzzy_matching() {
    let engine = engine_with(catalog(), Arc::new(FailingClassifier), Arc::new(store()));

    assert_eq!(engine.get_bot_response("Hello").tag, "greeting");
    assert!(engine.get_bot_response("xyzzyplugh").is_fallback());
}

#[test]
fn test_never_fails_on_odd_input() {
    let engine = engine();
    let inputs = [
        String::new(),
        "   ".to_string(),
        "?!...;;".to_string(),
        "日本語のテキスト".to_string(),
        "Café naïve résumé".to_string(),
        "\u{0}\u{7f}".to_string(),
        "a".repeat(100_000),
        "holiday ".repeat(5_000),
        "é".repeat(20_000),
    ];

    for input in &inputs {
        let reply = engine.get_bot_response(input);
        assert!(!reply.response.is_empty());
        assert!(!reply.tag.is_empty());
    }
}

#[test]
fn test_bundled_data() {
    let engine = bundled_engine();

    let reply = engine.get_bot_response("list of holidays");
    assert_eq!(reply.tag, "holidays");
    assert_eq!(
        reply.response,
        "📅 2024: holidays_2024.pdf\n🔗 Download: http://127.0.0.1:5000/download/holiday/1\n\
         📅 2025: holidays_2025.pdf\n🔗 Download: http://127.0.0.1:5000/download/holiday/2"
    );

    let reply = engine.get_bot_response("course syllabus");
    assert_eq!(reply.tag, "course_syllabus");
    assert_eq!(reply.response.lines().count(), 6);

    let reply = engine.get_bot_response("student details of information");
    assert_eq!(
        reply.response,
        "📌 *Student details of Information Technology:*\n1. *Priya Nair* (ID: 434121020005) - CGPA: 9.1"
    );

    assert_eq!(engine.get_bot_response("Good morning").tag, "greeting");
    assert_eq!(engine.lookup_result("434121010021"), "Result of 434121010021 is 8.7");
}

//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use unibot::catalog::{Intent, IntentCatalog};
use unibot::chat::{BotContext, ChatEngine};
use unibot::config::BotConfig;
use unibot::error::{Result, UnibotError};
use unibot::ml::backend::ComputeBackend;
use unibot::ml::intent_classifier::{ClassificationResult, IntentClassifier, NeuralIntentClassifier};
use unibot::ml::model::{ModelBundle, ModelState};
use unibot::responder::FirstSelector;
use unibot::store::{Course, Holiday, MemoryStore, Student, Teacher, UniversityStore};

/// Path of a file under `data/`.
pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

/// A network where each listed stem votes for its tag.
pub fn keyword_bundle(spec: &[(&str, &[&str])]) -> ModelBundle {
    let mut words: Vec<String> = spec
        .iter()
        .flat_map(|(_, stems)| stems.iter().map(|s| s.to_string()))
        .collect();
    words.sort();
    words.dedup();

    let tags: Vec<String> = spec.iter().map(|(tag, _)| tag.to_string()).collect();
    let mut state = ModelState::zeros(words.len(), tags.len(), tags.len());
    for (h, (_, stems)) in spec.iter().enumerate() {
        for stem in stems.iter() {
            let w = words.iter().position(|word| word == stem).unwrap();
            state.l1_weight[h][w] = 3.0;
        }
        state.l2_weight[h][h] = 1.0;
        state.l3_weight[h][h] = 2.0;
    }

    let hidden = tags.len();
    ModelBundle::new(words, tags, hidden, state).unwrap()
}

pub fn neural_classifier() -> Arc<dyn IntentClassifier> {
    let bundle = keyword_bundle(&[
        ("greeting", &["hello", "hi"][..]),
        ("courses", &["cours"][..]),
        ("holidays", &["holiday"][..]),
        ("students", &["student"][..]),
        ("faculty", &["faculti"][..]),
    ]);
    Arc::new(NeuralIntentClassifier::new(bundle, ComputeBackend::Simd).unwrap())
}

pub fn catalog() -> IntentCatalog {
    IntentCatalog::from_intents(vec![
        Intent::new(
            "greeting",
            vec!["Hi".into(), "Hello".into(), "How are you".into()],
            vec!["Hello! How can I help?".into(), "Hi there!".into()],
        ),
        Intent::new(
            "courses",
            vec!["What courses are offered".into()],
            vec!["We offer many courses.".into()],
        ),
        Intent::new(
            "holidays",
            vec!["List of holidays".into()],
            vec!["See the holiday calendar.".into()],
        ),
        Intent::new(
            "students",
            vec!["All students".into()],
            vec!["Ask for the students of a course.".into()],
        ),
        Intent::new(
            "faculty",
            vec!["All faculty".into()],
            vec!["Ask for a department.".into()],
        ),
    ])
    .unwrap()
}

pub fn store() -> MemoryStore {
    let store = MemoryStore::new();
    store.insert_course(Course::new(1, "Computer Science", "4 years", true));
    store.insert_course(Course::new(2, "MBA", "2 years", false));
    store.insert_student(Student::new("434121010021", "Asha", Some(8.5), 1));
    store.insert_teacher(Teacher::new(1, "Ada", "Lovelace", "CSE"));
    store.insert_holiday(Holiday::new(1, 2025, "holidays_2025.pdf"));
    store
}

/// Engine with deterministic response selection.
pub fn engine_with(
    catalog: IntentCatalog,
    classifier: Arc<dyn IntentClassifier>,
    store: Arc<dyn UniversityStore>,
) -> ChatEngine {
    let context = BotContext::new(BotConfig::default(), catalog, classifier, store)
        .unwrap()
        .with_selector(Arc::new(FirstSelector));
    ChatEngine::new(context)
}

pub fn engine() -> ChatEngine {
    engine_with(catalog(), neural_classifier(), Arc::new(store()))
}

/// Engine over the bundled `data/` files.
pub fn bundled_engine() -> ChatEngine {
    let context = BotContext::load(
        BotConfig::default(),
        data_path("intents.json"),
        data_path("model.json"),
        Some(data_path("university.json")),
    )
    .unwrap()
    .with_selector(Arc::new(FirstSelector));
    ChatEngine::new(context)
}

/// Always returns the same classification.
#[derive(Debug)]
pub struct FixedClassifier {
    pub tag: String,
    pub confidence: f32,
    tags: Vec<String>,
}

impl FixedClassifier {
    pub fn new(tag: &str, confidence: f32) -> Arc<dyn IntentClassifier> {
        Arc::new(FixedClassifier {
            tag: tag.to_string(),
            confidence,
            tags: vec![tag.to_string()],
        })
    }
}

impl IntentClassifier for FixedClassifier {
    fn classify(&self, _features: &[f32]) -> Result<ClassificationResult> {
        Ok(ClassificationResult {
            tag: self.tag.clone(),
            confidence: self.confidence,
            index: 0,
        })
    }

    fn vocabulary(&self) -> &[String] {
        &[]
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Fails every classification.
#[derive(Debug)]
pub struct FailingClassifier;

impl IntentClassifier for FailingClassifier {
    fn classify(&self, _features: &[f32]) -> Result<ClassificationResult> {
        Err(UnibotError::model("weights unavailable"))
    }

    fn vocabulary(&self) -> &[String] {
        &[]
    }

    fn tags(&self) -> &[String] {
        &[]
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Fails every query.
#[derive(Debug)]
pub struct BrokenStore;

fn unavailable<T>() -> Result<T> {
    Err(UnibotError::store("database is down"))
}

impl UniversityStore for BrokenStore {
    fn list_courses(&self) -> Result<Vec<Course>> {
        unavailable()
    }
    fn find_course(&self, _: u32) -> Result<Option<Course>> {
        unavailable()
    }
    fn find_course_by_name(&self, _: &str) -> Result<Option<Course>> {
        unavailable()
    }
    fn list_courses_with_syllabus(&self) -> Result<Vec<Course>> {
        unavailable()
    }
    fn list_teachers(&self) -> Result<Vec<Teacher>> {
        unavailable()
    }
    fn list_teachers_by_department(&self, _: &str) -> Result<Vec<Teacher>> {
        unavailable()
    }
    fn list_students(&self) -> Result<Vec<Student>> {
        unavailable()
    }
    fn list_students_by_course(&self, _: u32) -> Result<Vec<Student>> {
        unavailable()
    }
    fn find_student(&self, _: &str) -> Result<Option<Student>> {
        unavailable()
    }
    fn list_holidays(&self) -> Result<Vec<Holiday>> {
        unavailable()
    }
}

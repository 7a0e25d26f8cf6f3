//! In-memory store backed by a JSON snapshot.

use std::fs;
use std::path::Path;

use log::info;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::traits::UniversityStore;
use crate::store::types::{Course, Holiday, Student, Teacher};

/// Serialized form of a [`MemoryStore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSnapshot {
    pub courses: Vec<Course>,
    pub students: Vec<Student>,
    pub teachers: Vec<Teacher>,
    pub holidays: Vec<Holiday>,
}

/// A [`UniversityStore`] that keeps every record in memory.
///
/// Reads take a shared lock, so writers outside the chat pipeline
/// (`insert_*`) never block concurrent queries for long.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<StoreSnapshot>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `snapshot`.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        MemoryStore {
            data: RwLock::new(snapshot),
        }
    }

    /// Parse a snapshot from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let snapshot: StoreSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Load a snapshot from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let store = Self::from_json_str(&json)?;

        {
            let data = store.data.read();
            info!(
                "Loaded store from {}: {} courses, {} students, {} teachers, {} holidays",
                path.display(),
                data.courses.len(),
                data.students.len(),
                data.teachers.len(),
                data.holidays.len()
            );
        }

        Ok(store)
    }

    /// Copy of the current records.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.data.read().clone()
    }

    /// Serialize the current records as pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&*self.data.read())?)
    }

    /// Add a course, or replace the one with the same id.
    pub fn insert_course(&self, course: Course) {
        let mut data = self.data.write();
        match data.courses.iter_mut().find(|c| c.course_id == course.course_id) {
            Some(existing) => *existing = course,
            None => data.courses.push(course),
        }
    }

    /// Add a student, or replace the one with the same id.
    pub fn insert_student(&self, student: Student) {
        let mut data = self.data.write();
        match data.students.iter_mut().find(|s| s.id == student.id) {
            Some(existing) => *existing = student,
            None => data.students.push(student),
        }
    }

    /// Add a teacher, or replace the one with the same id.
    pub fn insert_teacher(&self, teacher: Teacher) {
        let mut data = self.data.write();
        match data.teachers.iter_mut().find(|t| t.id == teacher.id) {
            Some(existing) => *existing = teacher,
            None => data.teachers.push(teacher),
        }
    }

    /// Add a holiday list, or replace the one with the same id.
    pub fn insert_holiday(&self, holiday: Holiday) {
        let mut data = self.data.write();
        match data.holidays.iter_mut().find(|h| h.id == holiday.id) {
            Some(existing) => *existing = holiday,
            None => data.holidays.push(holiday),
        }
    }

    /// Remove a student by id. Returns whether a record was removed.
    pub fn remove_student(&self, id: &str) -> bool {
        let mut data = self.data.write();
        let before = data.students.len();
        data.students.retain(|s| s.id != id);
        data.students.len() != before
    }
}

impl UniversityStore for MemoryStore {
    fn list_courses(&self) -> Result<Vec<Course>> {
        Ok(self.data.read().courses.clone())
    }

    fn find_course(&self, course_id: u32) -> Result<Option<Course>> {
        Ok(self
            .data
            .read()
            .courses
            .iter()
            .find(|c| c.course_id == course_id)
            .cloned())
    }

    fn find_course_by_name(&self, name: &str) -> Result<Option<Course>> {
        let needle = name.to_lowercase();
        Ok(self
            .data
            .read()
            .courses
            .iter()
            .find(|c| c.name.to_lowercase().contains(&needle))
            .cloned())
    }

    fn list_courses_with_syllabus(&self) -> Result<Vec<Course>> {
        Ok(self
            .data
            .read()
            .courses
            .iter()
            .filter(|c| c.has_syllabus)
            .cloned()
            .collect())
    }

    fn list_teachers(&self) -> Result<Vec<Teacher>> {
        Ok(self.data.read().teachers.clone())
    }

    fn list_teachers_by_department(&self, department: &str) -> Result<Vec<Teacher>> {
        Ok(self
            .data
            .read()
            .teachers
            .iter()
            .filter(|t| t.department == department)
            .cloned()
            .collect())
    }

    fn list_students(&self) -> Result<Vec<Student>> {
        Ok(self.data.read().students.clone())
    }

    fn list_students_by_course(&self, course_id: u32) -> Result<Vec<Student>> {
        Ok(self
            .data
            .read()
            .students
            .iter()
            .filter(|s| s.course_id == course_id)
            .cloned()
            .collect())
    }

    fn find_student(&self, id: &str) -> Result<Option<Student>> {
        Ok(self.data.read().students.iter().find(|s| s.id == id).cloned())
    }

    fn list_holidays(&self) -> Result<Vec<Holiday>> {
        let mut holidays = self.data.read().holidays.clone();
        holidays.sort_by_key(|h| (h.year, h.id));
        Ok(holidays)
    }
}

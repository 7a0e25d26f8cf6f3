//! The data collaborator interface.

use crate::error::Result;
use crate::store::types::{Course, Holiday, Student, Teacher};

/// Read-only queries the chat pipeline runs against university records.
///
/// Implementations report backend failures as
/// [`UnibotError::Store`](crate::error::UnibotError::Store); the pipeline turns
/// those into an apology rather than an error.
pub trait UniversityStore: Send + Sync + std::fmt::Debug {
    /// All courses in store order.
    fn list_courses(&self) -> Result<Vec<Course>>;

    /// Course by id.
    fn find_course(&self, course_id: u32) -> Result<Option<Course>>;

    /// First course whose name contains `name`, ignoring case.
    fn find_course_by_name(&self, name: &str) -> Result<Option<Course>>;

    /// Courses with a downloadable syllabus.
    fn list_courses_with_syllabus(&self) -> Result<Vec<Course>>;

    /// All teachers in store order.
    fn list_teachers(&self) -> Result<Vec<Teacher>>;

    /// Teachers whose department code equals `department`.
    fn list_teachers_by_department(&self, department: &str) -> Result<Vec<Teacher>>;

    /// All students in store order.
    fn list_students(&self) -> Result<Vec<Student>>;

    /// Students enrolled in a course.
    fn list_students_by_course(&self, course_id: u32) -> Result<Vec<Student>>;

    /// Student by registration number.
    fn find_student(&self, id: &str) -> Result<Option<Student>>;

    /// Holiday lists ordered by year, then id.
    fn list_holidays(&self) -> Result<Vec<Holiday>>;
}

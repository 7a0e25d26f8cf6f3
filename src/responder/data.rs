//! Answers that are built from store records rather than canned text.

use std::sync::Arc;

use ahash::AHashMap;
use log::debug;

use crate::error::Result;
use crate::responder::response::BotResponse;
use crate::store::{Course, Student, UniversityStore};

/// Department codes recognised in faculty queries, in matching order.
pub const DEPARTMENTS: [&str; 8] = ["CSBS", "IT", "CSE", "ECE", "EEE", "MECH", "AIDS", "AIML"];

const STUDENT_DETAILS_PHRASE: &str = "student details of";
const STUDENT_USAGE: &str = "➡ Type: *Student details of [course name]*";

/// Builds tag-specific answers from a [`UniversityStore`].
#[derive(Debug, Clone)]
pub struct DataResponder {
    store: Arc<dyn UniversityStore>,
    base_url: String,
}

impl DataResponder {
    /// Tags with a data-backed answer.
    pub const TAGS: [&'static str; 5] = ["students", "holidays", "faculty", "courses", "course_syllabus"];

    /// Create a responder. Download links are built under `base_url`.
    pub fn new<S: Into<String>>(store: Arc<dyn UniversityStore>, base_url: S) -> Self {
        let base_url: String = base_url.into();
        DataResponder {
            store,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn UniversityStore> {
        &self.store
    }

    /// Whether `tag` has a data-backed answer.
    pub fn handles(tag: &str) -> bool {
        Self::TAGS.contains(&tag)
    }

    /// Answer `raw` for `tag`, or `None` when the tag has no data-backed answer.
    ///
    /// Store failures are returned as errors for the caller to recover from.
    pub fn respond_for_tag(&self, tag: &str, raw: &str) -> Result<Option<BotResponse>> {
        let body = match tag {
            "students" => self.students(raw)?,
            "holidays" => self.holidays()?,
            "faculty" => self.faculty(raw)?,
            "courses" => self.courses()?,
            "course_syllabus" => self.course_syllabus()?,
            _ => return Ok(None),
        };

        debug!("Data response for tag '{}' ({} bytes)", tag, body.len());
        Ok(Some(BotResponse::plain(body)))
    }

    fn students(&self, raw: &str) -> Result<String> {
        let query = raw.trim().to_lowercase();

        if query == "all students" {
            return self.all_students();
        }

        if query.contains(STUDENT_DETAILS_PHRASE) {
            let course_name = query.replace(STUDENT_DETAILS_PHRASE, "");
            let course_name = course_name.trim();

            return match self.store.find_course_by_name(course_name)? {
                Some(course) => self.students_of(&course),
                None => Ok(format!(
                    "⚠ *Course '{}' not found.*\n\n📚 Available courses:\n{}\n\n{}",
                    course_name,
                    self.course_names()?,
                    STUDENT_USAGE
                )),
            };
        }

        Ok(format!(
            "Please specify a course.\n📚 Available Courses: {}\n\n{}",
            self.course_names()?,
            STUDENT_USAGE
        ))
    }

    /// Every student with the name of their course, looked up once per course id.
    fn all_students(&self) -> Result<String> {
        let mut course_names: AHashMap<u32, Option<String>> = AHashMap::new();
        let mut lines = Vec::new();

        for (i, student) in self.store.list_students()?.iter().enumerate() {
            let course = match course_names.get(&student.course_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self.store.find_course(student.course_id)?.map(|c| c.name);
                    course_names.insert(student.course_id, name.clone());
                    name
                }
            };
            lines.push(format!(
                "{}. *{}* ({})",
                i + 1,
                student.name,
                course.as_deref().unwrap_or("No Course")
            ));
        }

        Ok(or_else(lines, "No students found."))
    }

    fn students_of(&self, course: &Course) -> Result<String> {
        let students = self.store.list_students_by_course(course.course_id)?;
        if students.is_empty() {
            return Ok(format!("❌ No students found for *{}*.", course.name));
        }

        Ok(format!(
            "📌 *Student details of {}:*\n{}",
            course.name,
            numbered_students(&students)
        ))
    }

    fn course_names(&self) -> Result<String> {
        Ok(self
            .store
            .list_courses()?
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", "))
    }

    fn holidays(&self) -> Result<String> {
        let lines: Vec<String> = self
            .store
            .list_holidays()?
            .iter()
            .map(|h| {
                format!(
                    "📅 {}: {}\n🔗 Download: {}/download/holiday/{}",
                    h.year, h.file_name, self.base_url, h.id
                )
            })
            .collect();
        Ok(or_else(lines, "No holiday records available."))
    }

    fn faculty(&self, raw: &str) -> Result<String> {
        let query = raw.to_lowercase();

        if query.contains("all faculty") {
            let lines: Vec<String> = self
                .store
                .list_teachers()?
                .iter()
                .enumerate()
                .map(|(i, t)| format!("{}. *{}* ({})", i + 1, t.full_name(), t.department))
                .collect();
            return Ok(or_else(lines, "No faculty found."));
        }

        let Some(department) = DEPARTMENTS
            .iter()
            .find(|dept| query.contains(&dept.to_lowercase()))
        else {
            return Ok(format!(
                "Which department's faculty list do you want?\n👤 Available Departments: {}\n\n➡ Type: *[Department Name] faculty*",
                DEPARTMENTS.join(", ")
            ));
        };

        let teachers = self.store.list_teachers_by_department(department)?;
        if teachers.is_empty() {
            return Ok(format!("❌ No faculty found for *{department}* department."));
        }

        let names: Vec<String> = teachers
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{}. *{}*", i + 1, t.full_name()))
            .collect();
        Ok(format!("📌 *Faculty details of {}:*\n{}", department, names.join("\n")))
    }

    fn courses(&self) -> Result<String> {
        let lines: Vec<String> = self
            .store
            .list_courses()?
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}. *{}* ({})", i + 1, c.name, c.duration))
            .collect();
        Ok(or_else(lines, "No courses available."))
    }

    fn course_syllabus(&self) -> Result<String> {
        let lines: Vec<String> = self
            .store
            .list_courses_with_syllabus()?
            .iter()
            .map(|c| {
                format!(
                    "📚 *{}* ({})\n🔗 Download: {}/download/syllabus/{}",
                    c.name, c.duration, self.base_url, c.course_id
                )
            })
            .collect();
        Ok(or_else(lines, "No syllabus files available."))
    }
}

fn numbered_students(students: &[Student]) -> String {
    students
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. *{}* (ID: {}) - CGPA: {}", i + 1, s.name, s.id, s.cgpa_display()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn or_else(lines: Vec<String>, empty: &str) -> String {
    if lines.is_empty() {
        empty.to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnibotError;
    use crate::store::{Holiday, MemoryStore, Teacher};

    fn responder() -> DataResponder {
        let store = MemoryStore::new();
        store.insert_course(Course::new(1, "Computer Science", "4 years", true));
        store.insert_course(Course::new(2, "Mechanical", "4 years", false));
        store.insert_student(Student::new("101", "Asha", Some(8.5), 1));
        store.insert_student(Student::new("102", "Ravi", None, 1));
        store.insert_student(Student::new("103", "Meena", Some(7.0), 9));
        store.insert_teacher(Teacher::new(1, "Ada", "Lovelace", "CSE"));
        store.insert_teacher(Teacher::new(2, "Alan", "Turing", "IT"));
        store.insert_holiday(Holiday::new(4, 2025, "h2025.pdf"));
        DataResponder::new(Arc::new(store), "http://127.0.0.1:5000/")
    }

    fn body(responder: &DataResponder, tag: &str, raw: &str) -> String {
        responder.respond_for_tag(tag, raw).unwrap().unwrap().into_string()
    }

    #[test]
    fn test_all_students() {
        assert_eq!(
            body(&responder(), "students", "  All Students "),
            "1. *Asha* (Computer Science)\n2. *Ravi* (Computer Science)\n3. *Meena* (No Course)"
        );
    }

    #[test]
    fn test_student_details_of_course() {
        let text = body(&responder(), "students", "Student details of computer");
        assert_eq!(
            text,
            "📌 *Student details of Computer Science:*\n\
             1. *Asha* (ID: 101) - CGPA: 8.5\n\
             2. *Ravi* (ID: 102) - CGPA: N/A"
        );

        assert_eq!(
            body(&responder(), "students", "student details of mechanical"),
            "❌ No students found for *Mechanical*."
        );
    }

    #[test]
    fn test_student_details_unknown_course() {
        let text = body(&responder(), "students", "student details of astronomy");
        assert!(text.starts_with("⚠ *Course 'astronomy' not found.*"));
        assert!(text.contains("Computer Science, Mechanical"));
        assert!(text.ends_with("*Student details of [course name]*"));
    }

    #[test]
    fn test_students_without_course_prompts() {
        let text = body(&responder(), "students", "show students");
        assert!(text.starts_with("Please specify a course."));
    }

    #[test]
    fn test_faculty() {
        let responder = responder();

        assert_eq!(
            body(&responder, "faculty", "list all faculty"),
            "1. *Ada Lovelace* (CSE)\n2. *Alan Turing* (IT)"
        );
        assert_eq!(
            body(&responder, "faculty", "cse faculty"),
            "📌 *Faculty details of CSE:*\n1. *Ada Lovelace*"
        );
        assert_eq!(
            body(&responder, "faculty", "ece faculty"),
            "❌ No faculty found for *ECE* department."
        );
        assert!(body(&responder, "faculty", "faculty please").starts_with("Which department's"));
    }

    #[test]
    fn test_faculty_department_order() {
        // "IT" is checked before "CSE", and "it" occurs in "with".
        assert!(body(&responder(), "faculty", "cse faculty with phd").contains("Alan Turing"));
    }

    #[test]
    fn test_holidays_courses_and_syllabus() {
        let responder = responder();

        assert_eq!(
            body(&responder, "holidays", "holidays"),
            "📅 2025: h2025.pdf\n🔗 Download: http://127.0.0.1:5000/download/holiday/4"
        );
        assert_eq!(
            body(&responder, "courses", "courses"),
            "1. *Computer Science* (4 years)\n2. *Mechanical* (4 years)"
        );
        assert_eq!(
            body(&responder, "course_syllabus", "syllabus"),
            "📚 *Computer Science* (4 years)\n🔗 Download: http://127.0.0.1:5000/download/syllabus/1"
        );
    }

    #[test]
    fn test_empty_store() {
        let responder = DataResponder::new(Arc::new(MemoryStore::new()), "http://localhost");

        assert_eq!(body(&responder, "students", "all students"), "No students found.");
        assert_eq!(body(&responder, "holidays", ""), "No holiday records available.");
        assert_eq!(body(&responder, "faculty", "all faculty"), "No faculty found.");
        assert_eq!(body(&responder, "courses", ""), "No courses available.");
        assert_eq!(body(&responder, "course_syllabus", ""), "No syllabus files available.");
    }

    #[test]
    fn test_other_tags_have_no_data_answer() {
        assert!(responder().respond_for_tag("greeting", "hi").unwrap().is_none());
        assert!(!DataResponder::handles("greeting"));
        assert!(DataResponder::handles("course_syllabus"));
    }

    #[derive(Debug)]
    struct BrokenStore;

    impl UniversityStore for BrokenStore {
        fn list_courses(&self) -> Result<Vec<Course>> {
            Err(UnibotError::store("connection refused"))
        }
        fn find_course(&self, _: u32) -> Result<Option<Course>> {
            Err(UnibotError::store("connection refused"))
        }
        fn find_course_by_name(&self, _: &str) -> Result<Option<Course>> {
            Err(UnibotError::store("connection refused"))
        }
        fn list_courses_with_syllabus(&self) -> Result<Vec<Course>> {
            Err(UnibotError::store("connection refused"))
        }
        fn list_teachers(&self) -> Result<Vec<Teacher>> {
            Err(UnibotError::store("connection refused"))
        }
        fn list_teachers_by_department(&self, _: &str) -> Result<Vec<Teacher>> {
            Err(UnibotError::store("connection refused"))
        }
        fn list_students(&self) -> Result<Vec<Student>> {
            Err(UnibotError::store("connection refused"))
        }
        fn list_students_by_course(&self, _: u32) -> Result<Vec<Student>> {
            Err(UnibotError::store("connection refused"))
        }
        fn find_student(&self, _: &str) -> Result<Option<Student>> {
            Err(UnibotError::store("connection refused"))
        }
        fn list_holidays(&self) -> Result<Vec<Holiday>> {
            Err(UnibotError::store("connection refused"))
        }
    }

    /// Serves records from a [`MemoryStore`] but cannot list courses.
    #[derive(Debug)]
    struct NoCourseListing(MemoryStore);

    impl UniversityStore for NoCourseListing {
        fn list_courses(&self) -> Result<Vec<Course>> {
            Err(UnibotError::store("course listing disabled"))
        }
        fn find_course(&self, course_id: u32) -> Result<Option<Course>> {
            self.0.find_course(course_id)
        }
        fn find_course_by_name(&self, name: &str) -> Result<Option<Course>> {
            self.0.find_course_by_name(name)
        }
        fn list_courses_with_syllabus(&self) -> Result<Vec<Course>> {
            self.0.list_courses_with_syllabus()
        }
        fn list_teachers(&self) -> Result<Vec<Teacher>> {
            self.0.list_teachers()
        }
        fn list_teachers_by_department(&self, department: &str) -> Result<Vec<Teacher>> {
            self.0.list_teachers_by_department(department)
        }
        fn list_students(&self) -> Result<Vec<Student>> {
            self.0.list_students()
        }
        fn list_students_by_course(&self, course_id: u32) -> Result<Vec<Student>> {
            self.0.list_students_by_course(course_id)
        }
        fn find_student(&self, id: &str) -> Result<Option<Student>> {
            self.0.find_student(id)
        }
        fn list_holidays(&self) -> Result<Vec<Holiday>> {
            self.0.list_holidays()
        }
    }

    #[test]
    fn test_all_students_resolves_courses_by_id() {
        let store = MemoryStore::new();
        store.insert_course(Course::new(1, "Computer Science", "4 years", true));
        store.insert_student(Student::new("101", "Asha", Some(8.5), 1));
        store.insert_student(Student::new("103", "Meena", Some(7.0), 9));
        let responder = DataResponder::new(Arc::new(NoCourseListing(store)), "http://localhost");

        assert_eq!(
            body(&responder, "students", "all students"),
            "1. *Asha* (Computer Science)\n2. *Meena* (No Course)"
        );

        // Store failures propagate.
        let broken = DataResponder::new(Arc::new(BrokenStore), "http://localhost");
        assert!(broken.respond_for_tag("students", "all students").unwrap_err().is_data_unavailable());
    }

    #[test]
    fn test_store_failure_is_an_error() {
        let responder = DataResponder::new(Arc::new(BrokenStore), "http://localhost");

        let err = responder.respond_for_tag("courses", "courses").unwrap_err();
        assert!(err.is_data_unavailable());
        // Tags without data answers never touch the store.
        assert!(responder.respond_for_tag("greeting", "hi").unwrap().is_none());
    }
}

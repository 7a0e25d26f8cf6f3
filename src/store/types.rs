//! Record types served by a [`UniversityStore`](super::UniversityStore).

use std::fmt;

use serde::{Deserialize, Serialize};

/// An enrolled student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Registration number, e.g. `434121010021`.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cgpa: Option<f64>,
    pub course_id: u32,
}

impl Student {
    pub fn new<S: Into<String>>(id: S, name: S, cgpa: Option<f64>, course_id: u32) -> Self {
        Student {
            id: id.into(),
            name: name.into(),
            cgpa,
            course_id,
        }
    }

    /// CGPA for display; missing or zero values read as `N/A`.
    pub fn cgpa_display(&self) -> String {
        match self.cgpa {
            Some(cgpa) if cgpa != 0.0 => format_grade(cgpa),
            _ => "N/A".to_string(),
        }
    }
}

/// A faculty member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    /// Department code such as `CSE`.
    pub department: String,
}

impl Teacher {
    pub fn new<S: Into<String>>(id: u32, first_name: S, last_name: S, department: S) -> Self {
        Teacher {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            department: department.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A degree programme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub course_id: u32,
    pub name: String,
    /// Free-form duration, e.g. `4 years`.
    pub duration: String,
    /// Whether a syllabus file is available for download.
    #[serde(default)]
    pub has_syllabus: bool,
}

impl Course {
    pub fn new<S: Into<String>>(course_id: u32, name: S, duration: S, has_syllabus: bool) -> Self {
        Course {
            course_id,
            name: name.into(),
            duration: duration.into(),
            has_syllabus,
        }
    }
}

/// A published holiday list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: u32,
    pub year: i32,
    pub file_name: String,
}

impl Holiday {
    pub fn new<S: Into<String>>(id: u32, year: i32, file_name: S) -> Self {
        Holiday {
            id,
            year,
            file_name: file_name.into(),
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.duration)
    }
}

/// Format a grade so whole numbers keep one decimal place (`9.0`, `8.25`).
pub fn format_grade(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

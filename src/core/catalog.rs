use crate::domain::model::Course;
use crate::utils::error::{CurriculumError, Result};
use std::collections::HashMap;

/// Read-only course collection indexed by code.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    by_code: HashMap<String, usize>,
}

impl Catalog {
    /// 建立 catalog；course code 必須唯一且不能為空
    pub fn new(courses: Vec<Course>) -> Result<Self> {
        let mut by_code = HashMap::with_capacity(courses.len());

        for (index, course) in courses.iter().enumerate() {
            if course.code.trim().is_empty() {
                return Err(CurriculumError::CatalogError {
                    message: format!("course with id '{}' has an empty code", course.id),
                });
            }
            if by_code.insert(course.code.clone(), index).is_some() {
                return Err(CurriculumError::DuplicateCourseCode {
                    code: course.code.clone(),
                });
            }
        }

        Ok(Self { courses, by_code })
    }

    pub fn get(&self, code: &str) -> Option<&Course> {
        self.by_code.get(code).map(|&index| &self.courses[index])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CourseCategory;

    fn course(code: &str) -> Course {
        Course {
            id: format!("id-{}", code),
            code: code.to_string(),
            name: code.to_string(),
            prerequisite: None,
            corequisite: None,
            category: CourseCategory::Elective,
            department: "MATH".to_string(),
            units: 2,
            year: 1,
            semester: 1,
        }
    }

    #[test]
    fn test_lookup_by_code() {
        let catalog = Catalog::new(vec![course("M1"), course("M2")]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("M2").map(|c| c.id.as_str()), Some("id-M2"));
        assert!(catalog.get("M3").is_none());
        assert!(catalog.contains("M1"));
    }

    #[test]
    fn test_rejects_duplicate_codes() {
        let err = Catalog::new(vec![course("M1"), course("M1")]).unwrap_err();
        assert!(matches!(err, CurriculumError::DuplicateCourseCode { code } if code == "M1"));
    }

    #[test]
    fn test_rejects_empty_code() {
        assert!(Catalog::new(vec![course("  ")]).is_err());
    }
}

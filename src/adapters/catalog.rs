use crate::domain::model::{Course, CourseCategory, CourseRef};
use crate::domain::ports::{CatalogSource, Storage};
use crate::utils::error::{CurriculumError, Result};
use serde::{Deserialize, Serialize};

/// 一列 CSV；先修 / 同修拆成 code 與 name 兩欄
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRow {
    pub id: String,
    pub code: String,
    pub name: String,
    pub category: CourseCategory,
    pub department: String,
    pub units: u32,
    pub year: u32,
    pub semester: u32,
    #[serde(default)]
    pub prerequisite_code: Option<String>,
    #[serde(default)]
    pub prerequisite_name: Option<String>,
    #[serde(default)]
    pub corequisite_code: Option<String>,
    #[serde(default)]
    pub corequisite_name: Option<String>,
}

fn course_ref(code: Option<String>, name: Option<String>) -> Option<CourseRef> {
    let code = code.filter(|c| !c.trim().is_empty())?;
    let name = name.unwrap_or_else(|| code.clone());
    Some(CourseRef { code, name })
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            prerequisite: course_ref(row.prerequisite_code, row.prerequisite_name),
            corequisite: course_ref(row.corequisite_code, row.corequisite_name),
            id: row.id,
            code: row.code,
            name: row.name,
            category: row.category,
            department: row.department,
            units: row.units,
            year: row.year,
            semester: row.semester,
        }
    }
}

impl From<&Course> for CourseRow {
    fn from(course: &Course) -> Self {
        CourseRow {
            id: course.id.clone(),
            code: course.code.clone(),
            name: course.name.clone(),
            category: course.category.clone(),
            department: course.department.clone(),
            units: course.units,
            year: course.year,
            semester: course.semester,
            prerequisite_code: course.prerequisite.as_ref().map(|r| r.code.clone()),
            prerequisite_name: course.prerequisite.as_ref().map(|r| r.name.clone()),
            corequisite_code: course.corequisite.as_ref().map(|r| r.code.clone()),
            corequisite_name: course.corequisite.as_ref().map(|r| r.name.clone()),
        }
    }
}

fn check_placement(course: &Course, line: usize) -> Result<()> {
    if course.year == 0 || course.semester == 0 {
        return Err(CurriculumError::CatalogError {
            message: format!(
                "course {} (entry {}) has year {} / semester {}; both start at 1",
                course.code, line, course.year, course.semester
            ),
        });
    }
    Ok(())
}

pub struct CsvCatalog<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> CsvCatalog<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

impl<S: Storage> CatalogSource for CsvCatalog<S> {
    fn load_courses(&self) -> Result<Vec<Course>> {
        let data = self.storage.read_file(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_slice());

        let mut courses = Vec::new();
        for (index, row) in reader.deserialize::<CourseRow>().enumerate() {
            let course = Course::from(row?);
            check_placement(&course, index + 1)?;
            courses.push(course);
        }

        tracing::debug!("Read {} courses from {}", courses.len(), self.path);
        Ok(courses)
    }
}

pub struct JsonCatalog<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> JsonCatalog<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

impl<S: Storage> CatalogSource for JsonCatalog<S> {
    fn load_courses(&self) -> Result<Vec<Course>> {
        let data = self.storage.read_file(&self.path)?;
        let courses: Vec<Course> = serde_json::from_slice(&data)?;

        for (index, course) in courses.iter().enumerate() {
            check_placement(course, index + 1)?;
        }

        tracing::debug!("Read {} courses from {}", courses.len(), self.path);
        Ok(courses)
    }
}

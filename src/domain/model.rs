use crate::utils::error::CurriculumError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 課程類別；未知的字串會保留為 `Other`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CourseCategory {
    Core,
    Elective,
    General,
    Major,
    Specialization,
    Other(String),
}

impl From<String> for CourseCategory {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "core" => CourseCategory::Core,
            "elective" => CourseCategory::Elective,
            "general" => CourseCategory::General,
            "major" => CourseCategory::Major,
            "specialization" => CourseCategory::Specialization,
            _ => CourseCategory::Other(value),
        }
    }
}

impl From<CourseCategory> for String {
    fn from(value: CourseCategory) -> Self {
        value.to_string()
    }
}

impl fmt::Display for CourseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseCategory::Core => f.write_str("Core"),
            CourseCategory::Elective => f.write_str("Elective"),
            CourseCategory::General => f.write_str("General"),
            CourseCategory::Major => f.write_str("Major"),
            CourseCategory::Specialization => f.write_str("Specialization"),
            CourseCategory::Other(other) => f.write_str(other),
        }
    }
}

/// 先修 / 同修課程的參照 (code + name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRef {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisite: Option<CourseRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corequisite: Option<CourseRef>,
    pub category: CourseCategory,
    pub department: String,
    pub units: u32,
    pub year: u32,
    pub semester: u32,
}

impl Course {
    pub fn slot_key(&self) -> SlotKey {
        SlotKey::new(self.year, self.semester)
    }
}

/// One `(year, semester)` cell, written as `"<year>-<semester>"`.
///
/// Ordering is by year, then semester, which is also the display order of
/// every projection built on top of a slot map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    pub year: u32,
    pub semester: u32,
}

impl SlotKey {
    pub const fn new(year: u32, semester: u32) -> Self {
        Self { year, semester }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.semester)
    }
}

impl FromStr for SlotKey {
    type Err = CurriculumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CurriculumError::InvalidSlotKey {
            key: s.to_string(),
            reason: reason.to_string(),
        };

        let (year, semester) = s
            .split_once('-')
            .ok_or_else(|| invalid("expected \"<year>-<semester>\""))?;
        let year: u32 = year
            .parse()
            .map_err(|_| invalid("year is not a number"))?;
        let semester: u32 = semester
            .parse()
            .map_err(|_| invalid("semester is not a number"))?;

        if year == 0 || semester == 0 {
            return Err(invalid("year and semester start at 1"));
        }

        Ok(SlotKey::new(year, semester))
    }
}

impl Serialize for SlotKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// 年度大綱：某一年目前有哪些學期
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearStructure {
    pub year: u32,
    pub semesters: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSummary {
    pub semester: u32,
    pub course_count: usize,
    pub units: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: u32,
    pub semesters: Vec<SlotSummary>,
    pub course_count: usize,
    pub units: u64,
}

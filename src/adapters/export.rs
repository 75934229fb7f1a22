use crate::adapters::catalog::CourseRow;
use crate::core::builder::{CurriculumBuilder, Snapshot};
use crate::domain::ports::Storage;
use crate::utils::error::{CurriculumError, Result};

pub const SNAPSHOT_FILE: &str = "curriculum.json";
pub const COURSES_FILE: &str = "courses.csv";

pub struct Exporter<S: Storage> {
    storage: S,
}

impl<S: Storage> Exporter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// 依序寫出每種格式，回傳寫出的檔名
    pub fn export(
        &self,
        builder: &CurriculumBuilder,
        curriculum: &str,
        formats: &[String],
    ) -> Result<Vec<String>> {
        let unresolved = builder.unresolved_codes();
        if !unresolved.is_empty() {
            tracing::warn!(
                "⚠️ {} placed course(s) are not in the catalog and will be left out of the course list: {}",
                unresolved.len(),
                unresolved.join(", ")
            );
        }

        let mut written = Vec::new();
        for format in formats {
            let file = match format.as_str() {
                "json" => self.write_snapshot(&builder.snapshot(curriculum))?,
                "csv" => self.write_courses(builder)?,
                other => {
                    return Err(CurriculumError::InvalidConfigValueError {
                        field: "output.formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported format".to_string(),
                    })
                }
            };
            written.push(file);
        }
        Ok(written)
    }

    pub fn write_snapshot(&self, snapshot: &Snapshot) -> Result<String> {
        let json = serde_json::to_string_pretty(snapshot)?;
        tracing::debug!("Writing snapshot ({} bytes)", json.len());
        self.storage.write_file(SNAPSHOT_FILE, json.as_bytes())?;
        Ok(SNAPSHOT_FILE.to_string())
    }

    /// 扁平課程清單，year/semester 取自目前的格子
    pub fn write_courses(&self, builder: &CurriculumBuilder) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for course in builder.flatten() {
            writer.serialize(CourseRow::from(&course))?;
        }

        let data = writer.into_inner().map_err(|e| CurriculumError::IoError(e.into_error()))?;
        self.storage.write_file(COURSES_FILE, &data)?;
        Ok(COURSES_FILE.to_string())
    }
}

use crate::domain::model::Course;
use crate::utils::error::Result;
use std::path::Path;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

/// 提供扁平的課程清單 (catalog)
pub trait CatalogSource {
    fn load_courses(&self) -> Result<Vec<Course>>;
}

pub trait ConfigProvider {
    fn curriculum_name(&self) -> &str;
    fn catalog_path(&self) -> Option<&str>;
    fn catalog_format(&self) -> Option<String> {
        self.catalog_path().and_then(extension_of)
    }
    fn script_path(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn seed_years(&self) -> u32;
    fn seed_semesters(&self) -> u32;
    fn seed_from_catalog(&self) -> bool;
}

pub fn extension_of(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

use crate::domain::ports::{extension_of, ConfigProvider};
use crate::utils::error::{CurriculumError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const OUTPUT_FORMATS: [&str; 2] = ["json", "csv"];
pub const CATALOG_EXTENSIONS: [&str; 2] = ["csv", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderConfig {
    pub curriculum: CurriculumInfo,
    pub catalog: Option<CatalogConfig>,
    #[serde(default)]
    pub seed: SeedConfig,
    pub script: Option<ScriptConfig>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurriculumInfo {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub path: String,
    pub format: Option<String>, // "csv" / "json"，預設看副檔名
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMode {
    #[default]
    Empty,
    Catalog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub mode: SeedMode,
    pub years: Option<u32>,
    pub semesters: Option<u32>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            mode: SeedMode::Empty,
            years: None,
            semesters: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

fn default_formats() -> Vec<String> {
    vec!["json".to_string()]
}

impl BuilderConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CurriculumError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CurriculumError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CurriculumError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("curriculum.name", &self.curriculum.name)?;

        if let Some(catalog) = &self.catalog {
            validation::validate_path("catalog.path", &catalog.path)?;
            match &catalog.format {
                Some(format) if !CATALOG_EXTENSIONS.contains(&format.as_str()) => {
                    return Err(CurriculumError::InvalidConfigValueError {
                        field: "catalog.format".to_string(),
                        value: format.clone(),
                        reason: format!("Valid formats: {}", CATALOG_EXTENSIONS.join(", ")),
                    });
                }
                Some(_) => {}
                None => validation::validate_file_extension(
                    "catalog.path",
                    &catalog.path,
                    &CATALOG_EXTENSIONS,
                )?,
            }
        }

        if self.seed.mode == SeedMode::Catalog {
            validation::validate_required_field("catalog", &self.catalog)?;
        }
        if let Some(years) = self.seed.years {
            validation::validate_positive_number("seed.years", years, 1)?;
        }
        if let Some(semesters) = self.seed.semesters {
            validation::validate_range("seed.semesters", semesters, 1, 3)?;
        }

        if let Some(script) = &self.script {
            validation::validate_path("script.path", &script.path)?;
        }

        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_formats("output.formats", &self.output.formats, &OUTPUT_FORMATS)?;

        Ok(())
    }
}

impl ConfigProvider for BuilderConfig {
    fn curriculum_name(&self) -> &str {
        &self.curriculum.name
    }

    fn catalog_path(&self) -> Option<&str> {
        self.catalog.as_ref().map(|c| c.path.as_str())
    }

    /// 明確指定的格式優先，否則看副檔名
    fn catalog_format(&self) -> Option<String> {
        let catalog = self.catalog.as_ref()?;
        catalog
            .format
            .clone()
            .or_else(|| extension_of(&catalog.path))
    }

    fn script_path(&self) -> Option<&str> {
        self.script.as_ref().map(|s| s.path.as_str())
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn seed_years(&self) -> u32 {
        self.seed.years.unwrap_or(4)
    }

    fn seed_semesters(&self) -> u32 {
        self.seed.semesters.unwrap_or(3)
    }

    fn seed_from_catalog(&self) -> bool {
        self.seed.mode == SeedMode::Catalog
    }
}

impl Validate for BuilderConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[curriculum]
name = "BS Computer Science"
version = "2026"

[catalog]
path = "courses.csv"

[seed]
mode = "catalog"

[output]
path = "./out"
formats = ["json", "csv"]
"#;

        let config = BuilderConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.curriculum_name(), "BS Computer Science");
        assert!(config.seed_from_catalog());
        assert_eq!(config.catalog_format().as_deref(), Some("csv"));
        assert_eq!(config.seed_years(), 4);
        assert_eq!(config.seed_semesters(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_seed_and_formats_omitted() {
        let toml_content = r#"
[curriculum]
name = "blank"

[output]
path = "./out"
"#;

        let config = BuilderConfig::from_toml_str(toml_content).unwrap();
        assert!(!config.seed_from_catalog());
        assert_eq!(config.output_formats(), &["json".to_string()]);
        assert!(config.catalog_path().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CURRICULUM_TEST_OUT", "/tmp/curriculum-out");

        let toml_content = r#"
[curriculum]
name = "env"

[output]
path = "${CURRICULUM_TEST_OUT}"
"#;

        let config = BuilderConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_path(), "/tmp/curriculum-out");

        std::env::remove_var("CURRICULUM_TEST_OUT");
    }

    #[test]
    fn test_config_validation() {
        let catalog_seed_without_catalog = r#"
[curriculum]
name = "bad"

[seed]
mode = "catalog"

[output]
path = "./out"
"#;
        let config = BuilderConfig::from_toml_str(catalog_seed_without_catalog).unwrap();
        assert!(matches!(
            config.validate(),
            Err(CurriculumError::MissingConfigError { .. })
        ));

        let bad_format = r#"
[curriculum]
name = "bad"

[output]
path = "./out"
formats = ["xlsx"]
"#;
        let config = BuilderConfig::from_toml_str(bad_format).unwrap();
        assert!(config.validate().is_err());

        let too_many_semesters = r#"
[curriculum]
name = "bad"

[seed]
semesters = 4

[output]
path = "./out"
"#;
        let config = BuilderConfig::from_toml_str(too_many_semesters).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[curriculum]
name = "file-test"

[output]
path = "./out"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = BuilderConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.curriculum.name, "file-test");
    }
}

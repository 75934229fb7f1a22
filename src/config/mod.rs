pub mod action_script;
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "curriculum-builder")]
#[command(about = "Assign courses to year/semester slots and export the curriculum structure")]
pub struct CliConfig {
    /// Path to a TOML configuration file; other flags are ignored when set
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = "curriculum")]
    pub name: String,

    /// Course catalog (.csv or .json)
    #[arg(long)]
    pub catalog: Option<String>,

    /// Action script (.toml or .json)
    #[arg(long)]
    pub actions: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "json")]
    pub formats: Vec<String>,

    #[arg(long, default_value = "4")]
    pub years: u32,

    #[arg(long, default_value = "3")]
    pub semesters: u32,

    /// Seed slots from each course's own year/semester instead of an empty grid
    #[arg(long)]
    pub seed_from_catalog: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit JSON log lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn curriculum_name(&self) -> &str {
        &self.name
    }

    fn catalog_path(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    fn script_path(&self) -> Option<&str> {
        self.actions.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn seed_years(&self) -> u32 {
        self.years
    }

    fn seed_semesters(&self) -> u32 {
        self.semesters
    }

    fn seed_from_catalog(&self) -> bool {
        self.seed_from_catalog
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("name", &self.name)?;
        if let Some(catalog) = &self.catalog {
            validation::validate_file_extension(
                "catalog",
                catalog,
                &toml_config::CATALOG_EXTENSIONS,
            )?;
        }
        if self.seed_from_catalog {
            validation::validate_required_field("catalog", &self.catalog)?;
        }
        validation::validate_positive_number("years", self.years, 1)?;
        validation::validate_range("semesters", self.semesters, 1, 3)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_formats("formats", &self.formats, &toml_config::OUTPUT_FORMATS)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_flags() {
        let config = CliConfig::parse_from([
            "curriculum-builder",
            "--catalog",
            "courses.csv",
            "--formats",
            "json,csv",
            "--seed-from-catalog",
        ]);

        assert_eq!(config.catalog_path(), Some("courses.csv"));
        assert_eq!(config.output_formats().len(), 2);
        assert_eq!(config.seed_years(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_seed_from_catalog_requires_catalog() {
        let config = CliConfig::parse_from(["curriculum-builder", "--seed-from-catalog"]);
        assert!(config.validate().is_err());
    }
}

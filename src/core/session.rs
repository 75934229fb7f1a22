use crate::adapters::catalog::{CsvCatalog, JsonCatalog};
use crate::adapters::export::Exporter;
use crate::config::action_script::ActionScript;
use crate::config::cli::LocalStorage;
use crate::core::builder::CurriculumBuilder;
use crate::core::catalog::Catalog;
use crate::domain::model::{YearStructure, YearSummary};
use crate::domain::ports::{CatalogSource, ConfigProvider, Storage};
use crate::utils::error::{CurriculumError, Result};

/// 一次執行的結果摘要
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub output_path: String,
    pub written: Vec<String>,
    pub actions_applied: usize,
    pub structure: Vec<YearStructure>,
    pub summary: Vec<YearSummary>,
    pub unresolved: Vec<String>,
}

/// Load catalog -> seed slots -> replay actions -> export.
pub struct BuildSession<C: ConfigProvider, S: Storage + Clone> {
    config: C,
    input: S,
    output: S,
}

impl<C: ConfigProvider> BuildSession<C, LocalStorage> {
    /// 讀取相對於工作目錄的路徑，輸出到 `output_path`
    pub fn local(config: C) -> Self {
        let output = LocalStorage::new(config.output_path().to_string());
        Self::new(config, LocalStorage::new(String::new()), output)
    }
}

impl<C: ConfigProvider, S: Storage + Clone> BuildSession<C, S> {
    pub fn new(config: C, input: S, output: S) -> Self {
        Self {
            config,
            input,
            output,
        }
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        let Some(path) = self.config.catalog_path() else {
            tracing::info!("No catalog configured, starting with an empty catalog");
            return Ok(Catalog::default());
        };

        let courses = match self.config.catalog_format().as_deref() {
            Some("csv") => CsvCatalog::new(self.input.clone(), path).load_courses()?,
            Some("json") => JsonCatalog::new(self.input.clone(), path).load_courses()?,
            other => {
                return Err(CurriculumError::InvalidConfigValueError {
                    field: "catalog.format".to_string(),
                    value: other.unwrap_or_default().to_string(),
                    reason: "Catalog must be csv or json".to_string(),
                })
            }
        };

        let catalog = Catalog::new(courses)?;
        tracing::info!("📚 Loaded {} courses from {}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn seed(&self, catalog: Catalog) -> CurriculumBuilder {
        if self.config.seed_from_catalog() {
            tracing::info!("🌱 Seeding slots from catalog placements");
            CurriculumBuilder::from_catalog(catalog)
        } else {
            let (years, semesters) = (self.config.seed_years(), self.config.seed_semesters());
            tracing::info!("🌱 Seeding empty grid: {} years × {} semesters", years, semesters);
            CurriculumBuilder::with_empty_grid(catalog, years, semesters)
        }
    }

    pub fn replay(&self, builder: &mut CurriculumBuilder) -> Result<()> {
        let Some(path) = self.config.script_path() else {
            return Ok(());
        };

        let content = self.input.read_file(path)?;
        let content = String::from_utf8(content).map_err(|e| CurriculumError::ConfigError {
            message: format!("action script {} is not valid UTF-8: {}", path, e),
        })?;
        let script = ActionScript::parse(path, &content)?;

        tracing::info!("🔁 Replaying {} actions from {}", script.len(), path);
        for action in script.into_actions() {
            builder.dispatch(action);
        }
        Ok(())
    }

    pub fn run(&self) -> Result<SessionReport> {
        let catalog = self.load_catalog()?;
        let mut builder = self.seed(catalog);
        self.replay(&mut builder)?;

        let gaps = builder.slots().semester_gaps();
        if !gaps.is_empty() {
            tracing::warn!("⚠️ Years with non-contiguous semesters: {:?}", gaps);
        }

        let written = Exporter::new(self.output.clone()).export(
            &builder,
            self.config.curriculum_name(),
            self.config.output_formats(),
        )?;
        tracing::info!("📁 Wrote {} file(s) to {}", written.len(), self.config.output_path());

        Ok(SessionReport {
            output_path: self.config.output_path().to_string(),
            written,
            actions_applied: builder.actions_applied(),
            structure: builder.year_structure(),
            summary: builder.summary(),
            unresolved: builder.unresolved_codes(),
        })
    }
}

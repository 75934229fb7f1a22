pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::BuilderConfig};

pub use self::core::{
    builder::CurriculumBuilder,
    catalog::Catalog,
    derive::{project_courses, project_year_structure, summarize},
    session::BuildSession,
    slot_map::SlotMap,
    transition::{apply, Action},
};
pub use domain::model::{Course, CourseCategory, CourseRef, SlotKey, YearStructure};
pub use utils::error::{CurriculumError, Result};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CurriculumError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid slot key '{key}': {reason}")]
    InvalidSlotKey { key: String, reason: String },

    #[error("Duplicate course code in catalog: {code}")]
    DuplicateCourseCode { code: String },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },

    #[error("Action #{index} is invalid: {message}")]
    ScriptError { index: usize, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Catalog,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CurriculumError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CurriculumError::IoError(_) => ErrorCategory::Io,
            CurriculumError::CsvError(_) | CurriculumError::SerializationError(_) => {
                ErrorCategory::Data
            }
            CurriculumError::ConfigError { .. }
            | CurriculumError::ConfigValidationError { .. }
            | CurriculumError::InvalidConfigValueError { .. }
            | CurriculumError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CurriculumError::InvalidSlotKey { .. } | CurriculumError::ScriptError { .. } => {
                ErrorCategory::Script
            }
            CurriculumError::DuplicateCourseCode { .. } | CurriculumError::CatalogError { .. } => {
                ErrorCategory::Catalog
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Data | ErrorCategory::Catalog | ErrorCategory::Script => {
                ErrorSeverity::Medium
            }
        }
    }

    /// 程序結束碼，失敗一律非零
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2, // 資料錯誤
            ErrorSeverity::High => 1,   // 設定錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CurriculumError::IoError(_) => "Check that the file exists and the output directory is writable",
            CurriculumError::CsvError(_) => {
                "Check the catalog CSV header: id,code,name,category,department,units,year,semester"
            }
            CurriculumError::SerializationError(_) => "Check that the JSON file is well formed",
            CurriculumError::ConfigError { .. }
            | CurriculumError::ConfigValidationError { .. }
            | CurriculumError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
            CurriculumError::MissingConfigError { .. } => {
                "Provide the missing option on the command line or in the TOML config"
            }
            CurriculumError::InvalidSlotKey { .. } => {
                "Slot keys look like \"<year>-<semester>\", e.g. \"2-1\""
            }
            CurriculumError::DuplicateCourseCode { .. } => {
                "Every course code in the catalog must be unique"
            }
            CurriculumError::CatalogError { .. } => "Check the catalog file contents",
            CurriculumError::ScriptError { .. } => "Fix the listed action in the action script",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CurriculumError::IoError(e) => format!("Could not read or write a file: {}", e),
            CurriculumError::MissingConfigError { field } => {
                format!("Missing setting '{}'", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CurriculumError>;

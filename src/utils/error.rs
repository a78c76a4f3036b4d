use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpportunityError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    HttpStatusError { status: u16, body: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Filesystem,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl OpportunityError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::HttpStatusError { .. } => ErrorCategory::Network,
            Self::IoError(_) => ErrorCategory::Filesystem,
            Self::SerializationError(_) => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    /// 嚴重程度決定 CLI 的退出碼
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Filesystem => ErrorSeverity::Critical,
        }
    }

    /// 非零退出碼：設定/資料 1、網路 2、檔案系統 3
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ApiError(_) => {
                "Check network connectivity and that the API endpoint is reachable".to_string()
            }
            Self::HttpStatusError { status: 401 | 403, .. } => {
                "Check that SAM_API_KEY holds a valid, active API key".to_string()
            }
            Self::HttpStatusError { status: 429, .. } => {
                "The API rate limit was reached; wait before running again".to_string()
            }
            Self::HttpStatusError { .. } => {
                "Inspect the logged response body and the request parameters".to_string()
            }
            Self::IoError(_) => {
                "Make sure the output directory exists and is writable".to_string()
            }
            Self::SerializationError(_) => {
                "The data could not be converted to JSON; rerun with --verbose".to_string()
            }
            Self::MissingConfigError { field } => {
                format!("Provide '{}' on the command line, in the environment or in the config file", field)
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration value and try again (see --help)".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not query the opportunity search API: {}", self),
            ErrorCategory::Filesystem => format!("Could not write the result files: {}", self),
            ErrorCategory::Data => format!("Could not process opportunity data: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, OpportunityError>;

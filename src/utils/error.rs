use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

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
    Configuration,
    Network,
    Output,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ProbeError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpClientError(_) => ErrorCategory::Network,
            Self::IoError(_) | Self::CsvError(_) => ErrorCategory::Output,
            Self::SerializationError(_) => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpClientError(e) => format!("Could not set up the HTTP client: {}", e),
            Self::CsvError(e) => format!("Failed to write the CSV report: {}", e),
            Self::IoError(e) => format!("File operation failed: {}", e),
            Self::SerializationError(e) => format!("Failed to write the JSON report: {}", e),
            Self::ConfigError { message } => message.clone(),
            Self::ConfigValidationError { field, message } => {
                format!("Invalid configuration in '{}': {}", field, message)
            }
            Self::MissingConfigError { field } => format!("Missing required option: {}", field),
            Self::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' is not a valid value for {}: {}", value, field, reason),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::HttpClientError(_) => "Check the TLS setup and the configured user agent",
            Self::CsvError(_) | Self::SerializationError(_) => {
                "Try the other output format or a different output path"
            }
            Self::IoError(_) => "Check that the input file exists and the output path is writable",
            Self::MissingConfigError { .. } => "Pass --username or --input (see --help)",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => {
                "Review the command line flags and the platform config file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;

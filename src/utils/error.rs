use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid IP address in '{field}': '{value}'")]
    AddressFormatError { field: String, value: String },

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

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Io,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AnalyzerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalyzerError::IoError(_) => ErrorCategory::Io,
            AnalyzerError::CsvError(_)
            | AnalyzerError::SerializationError(_)
            | AnalyzerError::ProcessingError { .. } => ErrorCategory::Data,
            AnalyzerError::AddressFormatError { .. }
            | AnalyzerError::ConfigError { .. }
            | AnalyzerError::ConfigValidationError { .. }
            | AnalyzerError::InvalidConfigValueError { .. }
            | AnalyzerError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AnalyzerError::IoError(_) => "Check that the input file exists and the output directory is writable",
            AnalyzerError::CsvError(_) => {
                "Make sure the CSV input has a header row matching the log record fields"
            }
            AnalyzerError::SerializationError(_) => "Make sure the JSON input is an array of log records",
            AnalyzerError::AddressFormatError { .. } => {
                "Use dotted (192.168.0.0) or colon (2001:db8::) notation for addresses and masks"
            }
            AnalyzerError::ConfigError { .. } | AnalyzerError::ConfigValidationError { .. } => {
                "Check the configuration file for syntax errors"
            }
            AnalyzerError::InvalidConfigValueError { .. } => "Correct the highlighted configuration value",
            AnalyzerError::MissingConfigError { .. } => {
                "Provide the missing value in the config file or on the command line"
            }
            AnalyzerError::ProcessingError { .. } => "Inspect the input records for out-of-range values",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Io => format!("File access problem: {}", self),
            ErrorCategory::Data => format!("Could not process log records: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_errors_are_configuration_errors() {
        let err = AnalyzerError::AddressFormatError {
            field: "filter.address_mask".to_string(),
            value: "255.255.x.0".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("255.255.x.0"));
        assert!(err.user_friendly_message().starts_with("Configuration problem"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = AnalyzerError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}

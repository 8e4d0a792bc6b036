use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure taxonomy of the offer-intake subsystem. Both variants that a
/// parse can raise are terminal for that invocation; the caller is expected
/// to surface the message to the operator and request a corrected file
/// rather than retry automatically.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum OfferError {
    /// Every available backend failed to open or read the file.
    #[error("File parsing error: {message}")]
    FileParsing { message: String },

    /// Structural-shape violation or business-rule insufficiency of the
    /// extracted data.
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl OfferError {
    pub fn file_parsing(message: impl Into<String>) -> Self {
        Self::FileParsing {
            message: message.into(),
        }
    }

    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FileParsing { .. } => "FILE_PARSING_ERROR",
            Self::DataValidation { .. } => "DATA_VALIDATION_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
        }
    }
}

pub type OfferResult<T> = Result<T, OfferError>;

// Conversion from common error types
impl From<config::ConfigError> for OfferError {
    fn from(error: config::ConfigError) -> Self {
        Self::configuration(error.to_string())
    }
}

impl From<validator::ValidationErrors> for OfferError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::data_validation(crate::validation::format_validation_errors(&errors))
    }
}

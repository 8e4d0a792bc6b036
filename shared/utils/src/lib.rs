pub mod config;
pub mod error;
pub mod logging;
pub mod offer;
pub mod validation;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use offer::*;
pub use validation::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.parser.max_file_size, 16 * 1024 * 1024);
        assert!(!config.parser.strict_validation);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_error_codes() {
        let error = OfferError::file_parsing("unreadable");
        assert_eq!(error.error_code(), "FILE_PARSING_ERROR");

        let error = OfferError::data_validation("bad shape");
        assert_eq!(error.error_code(), "DATA_VALIDATION_ERROR");
        assert_eq!(error.to_string(), "Data validation error: bad shape");
    }
}

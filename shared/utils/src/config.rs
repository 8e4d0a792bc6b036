use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::OfferResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub parser: ParserConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Largest spreadsheet accepted, in bytes.
    pub max_file_size: u64,
    /// Run business validation as part of intake instead of leaving it to
    /// an explicit call.
    pub strict_validation: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> OfferResult<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Start with default values
            .add_source(File::with_name("config/default").required(false))
            // Add environment-specific config
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with POLICYFLOW prefix
            .add_source(Environment::with_prefix("POLICYFLOW").separator("__"));

        Ok(config.build()?.try_deserialize()?)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_file_size: 16 * 1024 * 1024, // 16MB
            strict_validation: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
            file_path: None,
        }
    }
}

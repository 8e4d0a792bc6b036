//! Offer intake: submitted spreadsheet → validated `ParsedOffer`.
//!
//! Submitted files follow a fixed external template (company name in a
//! column-A region over rows 3–5, pricing rows at fixed columns) but arrive
//! with inconsistent formats and locales. Loading falls back across two
//! reader backends, field-level problems degrade to nulls on the result's
//! warning channel, and every parse ends with a structural gate; the
//! business gate is an explicit second call.

pub mod extractor;
pub mod loader;
pub mod normalize;
pub mod source;
pub mod validator;

pub use extractor::OfferExtractor;
pub use loader::{load_workbook, load_workbook_bytes, SpreadsheetFormat};
pub use normalize::{parse_amount, YearMatcher};
pub use source::{CellValue, GridSheet, MergedRegion, MergedSheet, SheetSource};
pub use validator::{BusinessValidator, StructuralValidator};

use std::path::Path;

use tracing::{info, warn};

use crate::config::ParserConfig;
use crate::error::OfferResult;
use crate::validation::validate_file_size;
use policyflow_models::ParsedOffer;

/// The intake pipeline with its operating limits.
pub struct OfferIntake {
    config: ParserConfig,
    extractor: OfferExtractor,
}

impl Default for OfferIntake {
    fn default() -> Self {
        Self::with_config(ParserConfig::default())
    }
}

impl OfferIntake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            extractor: OfferExtractor::new(),
        }
    }

    /// Parses the offer spreadsheet at `path`.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> OfferResult<ParsedOffer> {
        let path = path.as_ref();
        if let Ok(metadata) = std::fs::metadata(path) {
            validate_file_size(metadata.len(), self.config.max_file_size)?;
        }

        let mut warnings = Vec::new();
        if SpreadsheetFormat::from_extension(path).is_none() {
            warnings.push(format!(
                "unrecognized file extension on '{}'",
                path.display()
            ));
        }

        let source = loader::load_workbook(path)?;
        self.extract(source, path.display().to_string(), warnings)
    }

    /// Parses an offer spreadsheet received as a byte buffer (uploads).
    pub fn parse_bytes(&self, filename: &str, data: &[u8]) -> OfferResult<ParsedOffer> {
        validate_file_size(data.len() as u64, self.config.max_file_size)?;

        let mut warnings = Vec::new();
        if SpreadsheetFormat::from_extension(Path::new(filename)).is_none() {
            warnings.push(format!("unrecognized file extension on '{filename}'"));
        }

        let source = loader::load_workbook_bytes(filename, data)?;
        self.extract(source, filename.to_string(), warnings)
    }

    fn extract(
        &self,
        source: SheetSource,
        origin: String,
        mut warnings: Vec<String>,
    ) -> OfferResult<ParsedOffer> {
        let company_name = self.extractor.extract_company_name(&source);
        let years = self.extractor.extract_years(&source, &mut warnings);
        if years.is_empty() {
            warnings.push("no year rows with usable data".to_string());
        }

        let offer = ParsedOffer {
            source: origin,
            company_name,
            years,
            warnings,
        };

        // unconditional, always the last step of a parse
        StructuralValidator::new().validate(&offer)?;

        info!(
            source = %offer.source,
            backend = source.backend_name(),
            company = %offer.company_name,
            years = offer.years.len(),
            "offer parsed"
        );

        if self.config.strict_validation {
            return validate_offer_data(offer);
        }
        Ok(offer)
    }
}

/// Parses the offer spreadsheet at `path` with default limits.
///
/// Fails with [`crate::OfferError::FileParsing`] when no backend can open
/// the file and [`crate::OfferError::DataValidation`] when the extracted
/// shape violates the structural contract.
pub fn parse_offer(path: impl AsRef<Path>) -> OfferResult<ParsedOffer> {
    OfferIntake::new().parse_file(path)
}

/// Byte-buffer variant of [`parse_offer`].
pub fn parse_offer_bytes(filename: &str, data: &[u8]) -> OfferResult<ParsedOffer> {
    OfferIntake::new().parse_bytes(filename, data)
}

/// Business-rule gate, called explicitly after a successful parse.
///
/// Returns the offer unchanged on success; advisory pricing anomalies are
/// logged for downstream human review, never raised.
pub fn validate_offer_data(offer: ParsedOffer) -> OfferResult<ParsedOffer> {
    let anomalies = BusinessValidator::new().validate(&offer)?;
    for anomaly in &anomalies {
        warn!(source = %offer.source, %anomaly, "offer pricing anomaly");
    }
    Ok(offer)
}

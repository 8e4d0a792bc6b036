//! Structural and business validation of extracted offers.

use rust_decimal::Decimal;

use crate::error::{OfferError, OfferResult};
use crate::validation::validate_model;
use policyflow_models::{ParsedOffer, MAX_OFFER_YEARS};

/// Shape contract of an extracted offer, checked unconditionally as the
/// last step of every parse. A violation means the extractor broke its own
/// contract and the parse is aborted.
pub struct StructuralValidator {
    max_years: usize,
}

impl Default for StructuralValidator {
    fn default() -> Self {
        Self {
            max_years: MAX_OFFER_YEARS,
        }
    }
}

impl StructuralValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field presence and typing are carried by the type definitions; this
    /// enforces the runtime-checkable residue of the shape contract.
    pub fn validate(&self, offer: &ParsedOffer) -> OfferResult<()> {
        validate_model(offer)?;

        if offer.years.len() > self.max_years {
            return Err(OfferError::data_validation(format!(
                "extracted {} year entries, template allows at most {}",
                offer.years.len(),
                self.max_years
            )));
        }

        Ok(())
    }
}

/// Domain sanity of an extracted offer, called explicitly by the caller
/// after structural validation. Hard rules abort; anomaly checks are
/// advisory signals for downstream human review and never abort.
pub struct BusinessValidator {
    require_company: bool,
}

impl Default for BusinessValidator {
    fn default() -> Self {
        Self {
            require_company: true,
        }
    }
}

impl BusinessValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company_required(mut self, required: bool) -> Self {
        self.require_company = required;
        self
    }

    /// Hard rules; `Ok` carries the advisory anomalies found.
    pub fn validate(&self, offer: &ParsedOffer) -> OfferResult<Vec<String>> {
        if self.require_company && !offer.is_company_resolved() {
            return Err(OfferError::data_validation(format!(
                "'{}' does not name the offering company",
                offer.source
            )));
        }

        if offer.years.is_empty() {
            return Err(OfferError::data_validation(format!(
                "'{}' contains no year rows with usable data",
                offer.source
            )));
        }

        if !offer.has_pricing_data() {
            return Err(OfferError::data_validation(format!(
                "no year in '{}' carries an insurance sum or premium",
                offer.source
            )));
        }

        Ok(self.check_anomalies(offer))
    }

    /// Advisory pricing sanity checks: franchise pricing should normally be
    /// lower, and a premium above twice the sum insured suggests a
    /// data-entry error.
    pub fn check_anomalies(&self, offer: &ParsedOffer) -> Vec<String> {
        let mut anomalies = Vec::new();

        for year in &offer.years {
            if let (Some(with), Some(without)) =
                (year.premium_with_franchise, year.premium_without_franchise)
            {
                if with > without {
                    anomalies.push(format!(
                        "{}: premium with franchise {} exceeds premium without franchise {}",
                        year.year_label, with, without
                    ));
                }
            }

            if let Some(sum) = year.insurance_sum {
                let ceiling = sum * Decimal::from(2);
                let premiums = [
                    ("premium with franchise", year.premium_with_franchise),
                    ("premium without franchise", year.premium_without_franchise),
                ];
                for (name, premium) in premiums {
                    if let Some(premium) = premium {
                        if premium > ceiling {
                            anomalies.push(format!(
                                "{}: {} {} exceeds twice the insurance sum {}",
                                year.year_label, name, premium, sum
                            ));
                        }
                    }
                }
            }
        }

        anomalies
    }
}

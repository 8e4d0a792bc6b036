//! Offer domain models for the PolicyFlow intake system.
//!
//! This module defines the structured result of parsing one submitted offer
//! spreadsheet: the resolved company identity plus up to three insurance
//! years of pricing terms. Both values are created fresh per parse and live
//! only in memory; downstream persistence consumes them as plain values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Placeholder substituted when no company name can be resolved from the
/// source file. `company_name` is never an empty string.
pub const COMPANY_UNSPECIFIED: &str = "company unspecified";

/// Canonical year labels, in template row order.
pub const YEAR_LABELS: [&str; 3] = ["year 1", "year 2", "year 3"];

/// Maximum number of insurance years one offer template carries.
pub const MAX_OFFER_YEARS: usize = 3;

/// One company's offer for one request, as extracted from its spreadsheet.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ParsedOffer {
    /// Name of the originating file.
    pub source: String,
    #[validate(length(min = 1, message = "Company name must not be empty"))]
    pub company_name: String,
    /// Year entries in source row order (row 3 first).
    #[validate]
    pub years: Vec<YearOffer>,
    /// Field-level degradations and other non-fatal findings from the parse.
    pub warnings: Vec<String>,
}

/// One insurance year's terms. Numeric fields are `None` when the source
/// cell was empty or unusable; an explicit zero is a meaningful value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct YearOffer {
    #[validate(length(min = 1, message = "Year label must not be empty"))]
    pub year_label: String,
    pub insurance_sum: Option<Decimal>,
    pub premium_with_franchise: Option<Decimal>,
    pub franchise_variant1: Option<Decimal>,
    pub premium_without_franchise: Option<Decimal>,
    pub franchise_variant2: Option<Decimal>,
}

impl YearOffer {
    /// True when the year carries at least one of the amounts that make an
    /// offer usable: the insurance sum or either premium. Franchise amounts
    /// alone do not count.
    pub fn has_pricing_data(&self) -> bool {
        self.insurance_sum.is_some()
            || self.premium_with_franchise.is_some()
            || self.premium_without_franchise.is_some()
    }
}

impl ParsedOffer {
    /// True when the source file named the offering company.
    pub fn is_company_resolved(&self) -> bool {
        self.company_name != COMPANY_UNSPECIFIED
    }

    /// True when at least one year carries usable pricing data.
    pub fn has_pricing_data(&self) -> bool {
        self.years.iter().any(YearOffer::has_pricing_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn year(label: &str) -> YearOffer {
        YearOffer {
            year_label: label.to_string(),
            insurance_sum: None,
            premium_with_franchise: None,
            franchise_variant1: None,
            premium_without_franchise: None,
            franchise_variant2: None,
        }
    }

    #[test]
    fn test_pricing_data_ignores_franchise_fields() {
        let mut y = year("year 1");
        assert!(!y.has_pricing_data());

        y.franchise_variant1 = Some(Decimal::from(50_000));
        y.franchise_variant2 = Some(Decimal::ZERO);
        assert!(!y.has_pricing_data());

        y.insurance_sum = Some(Decimal::ZERO);
        assert!(y.has_pricing_data());
    }

    #[test]
    fn test_company_resolution_flag() {
        let offer = ParsedOffer {
            source: "offer.xlsx".to_string(),
            company_name: COMPANY_UNSPECIFIED.to_string(),
            years: vec![],
            warnings: vec![],
        };
        assert!(!offer.is_company_resolved());
        assert!(!offer.has_pricing_data());
    }

    #[test]
    fn test_empty_labels_fail_validation() {
        let offer = ParsedOffer {
            source: "offer.xlsx".to_string(),
            company_name: String::new(),
            years: vec![year("")],
            warnings: vec![],
        };
        assert!(offer.validate().is_err());
    }

    #[test]
    fn test_zero_amount_survives_serialization() {
        let mut y = year("year 1");
        y.franchise_variant2 = Some(Decimal::ZERO);

        let json = serde_json::to_string(&y).unwrap();
        let back: YearOffer = serde_json::from_str(&json).unwrap();
        assert_eq!(back.franchise_variant2, Some(Decimal::ZERO));
        assert_eq!(back, y);
    }

    prop_compose! {
        fn arb_amount()(mantissa in -1_000_000_000_000i64..1_000_000_000_000i64, scale in 0u32..=4) -> Decimal {
            Decimal::new(mantissa, scale)
        }
    }

    proptest! {
        /// Serialization round-trip preserves exact decimal values.
        #[test]
        fn prop_year_offer_roundtrip(
            label in "[a-z 0-9]{1,12}",
            sum in proptest::option::of(arb_amount()),
            premium in proptest::option::of(arb_amount()),
        ) {
            let offer = YearOffer {
                year_label: label,
                insurance_sum: sum,
                premium_with_franchise: premium,
                franchise_variant1: None,
                premium_without_franchise: None,
                franchise_variant2: None,
            };
            let json = serde_json::to_string(&offer).unwrap();
            let back: YearOffer = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, offer);
        }
    }
}

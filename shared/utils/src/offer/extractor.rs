//! Fixed-position extraction of company identity and year pricing rows.

use tracing::debug;

use super::normalize::{parse_amount, YearMatcher};
use super::source::{CellValue, SheetSource};
use policyflow_models::{YearOffer, COMPANY_UNSPECIFIED};

/// Column and row layout of the external offer template, 1-based.
/// Columns D and G are intentional spacers.
mod layout {
    pub const COMPANY_COL: u32 = 1; // A
    pub const YEAR_LABEL_COL: u32 = 2; // B
    pub const INSURANCE_SUM_COL: u32 = 3; // C
    pub const PREMIUM_WITH_COL: u32 = 5; // E
    pub const FRANCHISE1_COL: u32 = 6; // F
    pub const PREMIUM_WITHOUT_COL: u32 = 8; // H
    pub const FRANCHISE2_COL: u32 = 9; // I
    pub const FIRST_DATA_ROW: u32 = 3;
    pub const LAST_DATA_ROW: u32 = 5;
}

/// Reads one offer's cells out of a [`SheetSource`] at the template's fixed
/// positions. Field-level problems degrade to nulls and a warning; neither
/// extraction entry point fails.
pub struct OfferExtractor {
    matcher: YearMatcher,
    data_rows: std::ops::RangeInclusive<u32>,
}

impl Default for OfferExtractor {
    fn default() -> Self {
        Self {
            matcher: YearMatcher::new(),
            data_rows: layout::FIRST_DATA_ROW..=layout::LAST_DATA_ROW,
        }
    }
}

impl OfferExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the offering company's name.
    ///
    /// The template keeps the name in a column-A cell merged across the data
    /// rows, but producers regularly break the merge; plain cells in the
    /// same rows are accepted too. Falls back to the sentinel, never fails.
    pub fn extract_company_name(&self, source: &SheetSource) -> String {
        if let Some(regions) = source.merged_regions() {
            for region in regions {
                if region.anchored_at_column(layout::COMPANY_COL)
                    && region.spans_row(layout::FIRST_DATA_ROW)
                {
                    if let Some(name) = source.cell(region.first_row, region.first_col).as_text() {
                        return name;
                    }
                }
            }
        }

        for row in self.data_rows.clone() {
            if let Some(name) = source.cell(row, layout::COMPANY_COL).as_text() {
                return name;
            }
        }

        debug!("no company name found in the column-A region");
        COMPANY_UNSPECIFIED.to_string()
    }

    /// Reads the template's data rows in order.
    ///
    /// A row contributes a [`YearOffer`] only when its label, insurance sum
    /// or one of the premiums is present in the source; franchise fields
    /// alone never include a row.
    pub fn extract_years(&self, source: &SheetSource, warnings: &mut Vec<String>) -> Vec<YearOffer> {
        let mut years = Vec::new();
        for row in self.data_rows.clone() {
            if let Some(year) = self.extract_year_row(source, row, warnings) {
                years.push(year);
            }
        }
        years
    }

    fn extract_year_row(
        &self,
        source: &SheetSource,
        row: u32,
        warnings: &mut Vec<String>,
    ) -> Option<YearOffer> {
        let label = self.read_cell(source, row, layout::YEAR_LABEL_COL, warnings);
        let insurance_sum = self.read_cell(source, row, layout::INSURANCE_SUM_COL, warnings);
        let premium_with = self.read_cell(source, row, layout::PREMIUM_WITH_COL, warnings);
        let franchise1 = self.read_cell(source, row, layout::FRANCHISE1_COL, warnings);
        let premium_without = self.read_cell(source, row, layout::PREMIUM_WITHOUT_COL, warnings);
        let franchise2 = self.read_cell(source, row, layout::FRANCHISE2_COL, warnings);

        if label.is_blank()
            && insurance_sum.is_blank()
            && premium_with.is_blank()
            && premium_without.is_blank()
        {
            debug!(row, "row skipped: no label, insurance sum or premium");
            return None;
        }

        Some(YearOffer {
            year_label: self.matcher.normalize(label.as_text().as_deref(), row),
            insurance_sum: parse_amount(&insurance_sum),
            premium_with_franchise: parse_amount(&premium_with),
            franchise_variant1: parse_amount(&franchise1),
            premium_without_franchise: parse_amount(&premium_without),
            franchise_variant2: parse_amount(&franchise2),
        })
    }

    /// Reads one position, degrading cached error markers to empty with a
    /// warning; a bad cell costs one field, not the row or the file.
    fn read_cell(
        &self,
        source: &SheetSource,
        row: u32,
        col: u32,
        warnings: &mut Vec<String>,
    ) -> CellValue {
        let value = source.cell(row, col);
        if let CellValue::Error(marker) = &value {
            debug!(row, col, marker = %marker, "error value treated as empty");
            warnings.push(format!(
                "row {row}, column {col}: error value '{marker}' treated as empty"
            ));
        }
        value
    }
}

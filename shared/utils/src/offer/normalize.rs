//! Locale-tolerant numeric parsing and year-label canonicalization.
//!
//! Both functions are total: malformed input degrades to `None` or to a
//! row-position fallback, never to an error. Amounts originate from
//! uncontrolled external spreadsheets; a bad cell should cost one field,
//! not the whole offer.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::source::CellValue;
use policyflow_models::YEAR_LABELS;

/// Converts an arbitrary cell value into an exact decimal amount.
///
/// Empty and error cells yield `None`; numbers convert exactly through
/// their decimal rendering; text is cleaned of locale separators, currency
/// symbols and stray characters before parsing. Zero is preserved as a
/// meaningful value.
pub fn parse_amount(value: &CellValue) -> Option<Decimal> {
    match value {
        CellValue::Empty | CellValue::Error(_) => None,
        CellValue::Integer(i) => Some(Decimal::from(*i)),
        CellValue::Number(f) => decimal_from_float(*f),
        CellValue::Text(s) => decimal_from_text(s),
        // Anything else goes through the text path once.
        CellValue::Bool(b) => decimal_from_text(&b.to_string()),
        CellValue::Other(s) => decimal_from_text(s),
    }
}

/// Exact conversion through the float's shortest decimal rendering, so a
/// cell shown as `45000.5` stays `45000.5` rather than a binary artifact.
fn decimal_from_float(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    let rendered = value.to_string();
    Decimal::from_str(&rendered)
        .or_else(|_| Decimal::from_scientific(&rendered))
        .ok()
}

/// Comma is normalized to a period before stripping, which also means a
/// comma used as a thousands separator turns the text unparseable and the
/// field degrades to `None`.
fn decimal_from_text(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() || cleaned == "-" || cleaned == "." {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// Keyword tables mapping free-form year labels onto canonical labels.
///
/// Submitted files label years inconsistently ("1 год", "Первый год",
/// "year 1"); matching is ordered substring membership over the lowercased
/// label, first rule wins. A label matching no rule falls back to the
/// template's row positions.
pub struct YearMatcher {
    rules: Vec<(&'static str, Vec<&'static str>)>,
}

impl Default for YearMatcher {
    fn default() -> Self {
        Self {
            rules: vec![
                (YEAR_LABELS[0], vec!["1", "первый", "один"]),
                (YEAR_LABELS[1], vec!["2", "второй", "два"]),
                (YEAR_LABELS[2], vec!["3", "третий", "три"]),
            ],
        }
    }
}

impl YearMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical label for `raw` read at 1-based `row`; never fails.
    pub fn normalize(&self, raw: Option<&str>, row: u32) -> String {
        if let Some(raw) = raw {
            let label = raw.trim().to_lowercase();
            if !label.is_empty() {
                for (canonical, keywords) in &self.rules {
                    if keywords.iter().any(|keyword| label.contains(keyword)) {
                        return (*canonical).to_string();
                    }
                }
            }
        }
        self.label_for_row(row)
    }

    /// Template rows 3..=5 map onto years 1..=3; anything else derives a
    /// label from the row position.
    fn label_for_row(&self, row: u32) -> String {
        match row {
            3..=5 => YEAR_LABELS[(row - 3) as usize].to_string(),
            _ => format!("year {}", row.saturating_sub(2)),
        }
    }
}

//! Workbook loading with ordered backend fallback.

use std::path::Path;

use tracing::debug;

use super::source::{GridSheet, MergedSheet, SheetSource};
use crate::error::{OfferError, OfferResult};

/// Spreadsheet formats the intake recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    Xlsx,
    Xls,
    Xlsb,
    Ods,
}

impl SpreadsheetFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            "xlsb" => Some(Self::Xlsb),
            "ods" => Some(Self::Ods),
            _ => None,
        }
    }

    /// Detect format from content type header
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => Some(Self::Xlsx),
            "application/vnd.ms-excel" => Some(Self::Xls),
            "application/vnd.ms-excel.sheet.binary.macroenabled.12" => Some(Self::Xlsb),
            "application/vnd.oasis.opendocument.spreadsheet" => Some(Self::Ods),
            _ => None,
        }
    }
}

/// Opens the first sheet of `path`, trying the merged-region-aware xlsx
/// reader first and the format-autodetecting reader second. One pass, no
/// retries; fails only when both backends fail, with a message carrying
/// both failure reasons.
pub fn load_workbook(path: &Path) -> OfferResult<SheetSource> {
    let primary = match MergedSheet::open(path) {
        Ok(sheet) => {
            debug!(backend = "xlsx", path = %path.display(), "workbook loaded");
            return Ok(SheetSource::Merged(sheet));
        }
        Err(error) => error,
    };

    match GridSheet::open(path) {
        Ok(sheet) => {
            debug!(backend = "auto", path = %path.display(), "workbook loaded via fallback");
            Ok(SheetSource::Grid(sheet))
        }
        Err(fallback) => Err(OfferError::file_parsing(format!(
            "unable to open '{}': xlsx backend: {primary:#}; auto backend: {fallback:#}",
            path.display()
        ))),
    }
}

/// Byte-buffer variant of [`load_workbook`] for uploads.
pub fn load_workbook_bytes(filename: &str, data: &[u8]) -> OfferResult<SheetSource> {
    let primary = match MergedSheet::from_bytes(data) {
        Ok(sheet) => {
            debug!(backend = "xlsx", filename, "workbook loaded");
            return Ok(SheetSource::Merged(sheet));
        }
        Err(error) => error,
    };

    match GridSheet::from_bytes(data) {
        Ok(sheet) => {
            debug!(backend = "auto", filename, "workbook loaded via fallback");
            Ok(SheetSource::Grid(sheet))
        }
        Err(fallback) => Err(OfferError::file_parsing(format!(
            "unable to open '{filename}': xlsx backend: {primary:#}; auto backend: {fallback:#}",
        ))),
    }
}

//! Position-addressed read-only views over a workbook's first sheet.
//!
//! Two backends sit behind the single [`SheetSource`] surface. The xlsx
//! reader loads cached computed values and the sheet's merged regions; the
//! format-autodetecting reader accepts xls/xlsb/ods as well but exposes the
//! sheet as a bare grid. Coordinates on this surface are 1-based, as printed
//! in spreadsheet UIs.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use anyhow::{Context, Result};
use calamine::{
    open_workbook, open_workbook_auto, open_workbook_auto_from_rs, open_workbook_from_rs, Data,
    Dimensions, Range, Reader, Sheets, Xlsx,
};

/// A single cell value, decoupled from the backing reader.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
    /// Error marker (`#DIV/0!`, `#REF!`, ...) cached in the cell.
    Error(String),
    /// Remaining scalar kinds (dates, durations), carried as display text.
    Other(String),
}

impl CellValue {
    fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty => Self::Empty,
            Data::String(s) => Self::Text(s.clone()),
            Data::Int(i) => Self::Integer(*i),
            Data::Float(f) => Self::Number(*f),
            Data::Bool(b) => Self::Bool(*b),
            Data::Error(e) => Self::Error(e.to_string()),
            other => Self::Other(other.to_string()),
        }
    }

    /// True when the cell carries no usable content: genuinely empty,
    /// whitespace-only text, or an error marker.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty | Self::Error(_) => true,
            Self::Text(s) | Self::Other(s) => s.trim().is_empty(),
            Self::Integer(_) | Self::Number(_) | Self::Bool(_) => false,
        }
    }

    /// Trimmed display text of the cell; `None` for blank cells.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Empty | Self::Error(_) => None,
            Self::Text(s) | Self::Other(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Self::Integer(i) => Some(i.to_string()),
            Self::Number(f) => Some(f.to_string()),
            Self::Bool(b) => Some(b.to_string()),
        }
    }
}

/// A merged cell region, 1-based inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergedRegion {
    pub first_row: u32,
    pub last_row: u32,
    pub first_col: u32,
    pub last_col: u32,
}

impl MergedRegion {
    // calamine Dimensions use 0-based coordinates
    fn from_dimensions(dimensions: &Dimensions) -> Self {
        Self {
            first_row: dimensions.start.0 + 1,
            last_row: dimensions.end.0 + 1,
            first_col: dimensions.start.1 + 1,
            last_col: dimensions.end.1 + 1,
        }
    }

    pub fn anchored_at_column(&self, col: u32) -> bool {
        self.first_col == col
    }

    pub fn spans_row(&self, row: u32) -> bool {
        self.first_row <= row && row <= self.last_row
    }
}

/// Read-only view of a workbook's first sheet, from whichever backend
/// managed to open the file.
#[derive(Debug)]
pub enum SheetSource {
    Merged(MergedSheet),
    Grid(GridSheet),
}

impl SheetSource {
    /// Value at 1-based `(row, col)`; `Empty` for out-of-range positions.
    pub fn cell(&self, row: u32, col: u32) -> CellValue {
        if row == 0 || col == 0 {
            return CellValue::Empty;
        }
        let cells = match self {
            Self::Merged(sheet) => &sheet.cells,
            Self::Grid(sheet) => &sheet.cells,
        };
        cells
            .get_value((row - 1, col - 1))
            .map(CellValue::from_data)
            .unwrap_or(CellValue::Empty)
    }

    /// Merged regions of the sheet, when the backend knows them.
    pub fn merged_regions(&self) -> Option<&[MergedRegion]> {
        match self {
            Self::Merged(sheet) => Some(&sheet.regions),
            Self::Grid(_) => None,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Merged(_) => "xlsx",
            Self::Grid(_) => "auto",
        }
    }
}

/// First sheet as read by the xlsx backend: cached computed values plus
/// merged-region metadata.
#[derive(Debug)]
pub struct MergedSheet {
    cells: Range<Data>,
    regions: Vec<MergedRegion>,
}

impl MergedSheet {
    pub fn open(path: &Path) -> Result<Self> {
        let workbook: Xlsx<_> =
            open_workbook(path).context("xlsx reader could not open the workbook")?;
        Self::from_xlsx(workbook)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(data))
            .context("xlsx reader could not open the buffer")?;
        Self::from_xlsx(workbook)
    }

    fn from_xlsx<RS: Read + Seek>(mut workbook: Xlsx<RS>) -> Result<Self> {
        workbook
            .load_merged_regions()
            .context("failed to load merged regions")?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .context("workbook has no sheets")?;

        let cells = workbook
            .worksheet_range(&sheet_name)
            .with_context(|| format!("failed to read sheet '{sheet_name}'"))?;

        let regions = workbook
            .worksheet_merge_cells(&sheet_name)
            .unwrap_or(Ok(Vec::new()))
            .unwrap_or_default()
            .iter()
            .map(MergedRegion::from_dimensions)
            .collect();

        Ok(Self { cells, regions })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(cells: Range<Data>, regions: Vec<MergedRegion>) -> Self {
        Self { cells, regions }
    }
}

/// First sheet as read by the format-autodetecting backend: a bare
/// position-indexed grid, no merged-cell awareness.
#[derive(Debug)]
pub struct GridSheet {
    cells: Range<Data>,
}

impl GridSheet {
    pub fn open(path: &Path) -> Result<Self> {
        let mut workbook =
            open_workbook_auto(path).context("auto-detecting reader could not open the workbook")?;
        Self::from_sheets(&mut workbook)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(data))
            .context("auto-detecting reader could not open the buffer")?;
        Self::from_sheets(&mut workbook)
    }

    fn from_sheets<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> Result<Self> {
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .context("workbook has no sheets")?;

        let cells = workbook
            .worksheet_range(&sheet_name)
            .with_context(|| format!("failed to read sheet '{sheet_name}'"))?;

        Ok(Self { cells })
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: Range<Data>) -> Self {
        Self { cells }
    }
}

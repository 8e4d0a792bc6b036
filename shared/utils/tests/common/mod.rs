//! Minimal workbook writer for intake test fixtures.
//!
//! Emits just enough of an xlsx package for the intake readers: a single
//! sheet with inline strings, numeric cells and optional merged regions.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Offer" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

enum Cell {
    Text(String),
    /// Numeric literal written into the cell verbatim.
    Number(String),
}

#[derive(Default)]
pub struct WorkbookFixture {
    cells: Vec<(String, Cell)>,
    merged: Vec<String>,
}

impl WorkbookFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, cell_ref: &str, value: &str) -> Self {
        self.cells
            .push((cell_ref.to_string(), Cell::Text(value.to_string())));
        self
    }

    pub fn number(mut self, cell_ref: &str, literal: &str) -> Self {
        self.cells
            .push((cell_ref.to_string(), Cell::Number(literal.to_string())));
        self
    }

    pub fn merge(mut self, range: &str) -> Self {
        self.merged.push(range.to_string());
        self
    }

    pub fn write_to(&self, path: &Path) {
        let file = File::create(path).expect("create fixture workbook");
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default();

        let entries = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", ROOT_RELS.to_string()),
            ("xl/workbook.xml", WORKBOOK.to_string()),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
            ("xl/worksheets/sheet1.xml", self.sheet_xml()),
        ];
        for (name, content) in entries {
            zip.start_file(name, options).expect("start zip entry");
            zip.write_all(content.as_bytes()).expect("write zip entry");
        }
        zip.finish().expect("finish fixture workbook");
    }

    fn sheet_xml(&self) -> String {
        let mut rows: BTreeMap<u32, Vec<&(String, Cell)>> = BTreeMap::new();
        for entry in &self.cells {
            rows.entry(row_of(&entry.0)).or_default().push(entry);
        }

        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
        );
        for (row, cells) in rows {
            xml.push_str(&format!(r#"<row r="{row}">"#));
            for (cell_ref, cell) in cells {
                match cell {
                    Cell::Text(value) => xml.push_str(&format!(
                        r#"<c r="{cell_ref}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                        escape(value)
                    )),
                    Cell::Number(literal) => {
                        xml.push_str(&format!(r#"<c r="{cell_ref}"><v>{literal}</v></c>"#))
                    }
                }
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData>");

        if !self.merged.is_empty() {
            xml.push_str(&format!(r#"<mergeCells count="{}">"#, self.merged.len()));
            for range in &self.merged {
                xml.push_str(&format!(r#"<mergeCell ref="{range}"/>"#));
            }
            xml.push_str("</mergeCells>");
        }

        xml.push_str("</worksheet>");
        xml
    }
}

fn row_of(cell_ref: &str) -> u32 {
    cell_ref
        .trim_start_matches(|c: char| c.is_ascii_alphabetic())
        .parse()
        .expect("cell reference must end in a row number")
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

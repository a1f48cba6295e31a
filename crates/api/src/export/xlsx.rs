//! Minimal single-sheet XLSX (Office Open XML) writer.
//!
//! A workbook is a zip archive of XML parts. Cells are written as inline
//! strings, numbers or booleans, so no shared-string table is needed. Style
//! index 1 is a bold font, used for the header row.

use std::io::{Cursor, Write};

use staffhub_core::export::{Cell, Table};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/></cellXfs></styleSheet>"#;

const BOLD_STYLE: u8 = 1;

#[derive(Debug, thiserror::Error)]
pub enum XlsxError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render `table` as an XLSX workbook with one sheet named after it.
pub fn write_workbook(table: &Table) -> Result<Vec<u8>, XlsxError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
        ("_rels/.rels", ROOT_RELS_XML.to_string()),
        ("xl/workbook.xml", workbook_xml(&table.name)),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML.to_string()),
        ("xl/styles.xml", STYLES_XML.to_string()),
        ("xl/worksheets/sheet1.xml", sheet_xml(table)),
    ];
    for (name, body) in parts {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape_xml(&sheet_title(sheet_name))
    )
}

fn sheet_xml(table: &Table) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    let header: Vec<Cell> = table.headers.iter().map(|h| Cell::Text(h.clone())).collect();
    push_row(&mut xml, 1, &header, Some(BOLD_STYLE));
    for (i, row) in table.rows.iter().enumerate() {
        push_row(&mut xml, i + 2, row, None);
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn push_row(xml: &mut String, row_number: usize, cells: &[Cell], style: Option<u8>) {
    xml.push_str(&format!(r#"<row r="{row_number}">"#));
    for (col, cell) in cells.iter().enumerate() {
        let reference = format!("{}{row_number}", column_letters(col));
        let style = style.map(|s| format!(r#" s="{s}""#)).unwrap_or_default();
        match cell {
            Cell::Text(text) => xml.push_str(&format!(
                r#"<c r="{reference}"{style} t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                escape_xml(text)
            )),
            Cell::Number(n) if n.is_finite() => {
                xml.push_str(&format!(r#"<c r="{reference}"{style}><v>{n}</v></c>"#))
            }
            Cell::Bool(b) => xml.push_str(&format!(
                r#"<c r="{reference}"{style} t="b"><v>{}</v></c>"#,
                u8::from(*b)
            )),
            Cell::Number(_) | Cell::Empty => {}
        }
    }
    xml.push_str("</row>");
}

/// Zero-based column index to spreadsheet letters: 0 -> A, 25 -> Z, 26 -> AA.
fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Sheet names are limited to 31 characters and may not contain `[]:*?/\`.
fn sheet_title(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect();
    if cleaned.is_empty() {
        "Sheet1".to_string()
    } else {
        cleaned
    }
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    out
}

/// The XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters_wrap() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(27), "AB");
        assert_eq!(column_letters(701), "ZZ");
        assert_eq!(column_letters(702), "AAA");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(escape_xml("bell\u{7}"), "bell");
        assert_eq!(escape_xml("a\u{0}b\u{1b}c\u{FFFE}\u{FFFF}d"), "abcd");
        assert_eq!(escape_xml("tab\there\u{85}é😀"), "tab\there\u{85}é😀");
    }

    #[test]
    fn sheet_title_is_sanitised() {
        assert_eq!(sheet_title("Q1/Q2 [draft]"), "Q1Q2 draft");
        assert_eq!(sheet_title("???"), "Sheet1");
        assert_eq!(sheet_title(&"x".repeat(40)).len(), 31);
    }

    #[test]
    fn header_row_is_bold_and_cells_are_typed() {
        let mut table = Table::new("Employees", &["Name", "Salary"]);
        table.push_row(vec!["Ana & Co".into(), Cell::Number(1500.5)]);
        table.push_row(vec![Cell::Empty, true.into()]);

        let xml = sheet_xml(&table);
        assert!(xml.contains(r#"<c r="A1" s="1" t="inlineStr"><is><t xml:space="preserve">Name</t></is></c>"#));
        assert!(xml.contains(r#"<t xml:space="preserve">Ana &amp; Co</t>"#));
        assert!(xml.contains(r#"<c r="B2"><v>1500.5</v></c>"#));
        assert!(xml.contains(r#"<c r="B3" t="b"><v>1</v></c>"#));
        assert!(!xml.contains(r#"r="A3""#));
    }

    #[test]
    fn workbook_is_a_zip_archive() {
        let table = Table::new("Projects", &["ID"]);
        let bytes = write_workbook(&table).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::ooxml::{open_package, read_optional_part, read_part, Package};
use super::types::{SheetCsv, SpreadsheetConverter};
use super::ParseError;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Zero-based index of column XFD, the last one a worksheet can have.
const MAX_COLUMN: usize = 16_383;

/// XLSX to CSV, one entry per worksheet in workbook order.
///
/// Cell values are taken as stored (no number formatting). Blank rows are
/// skipped; gaps between cells in a row become empty fields.
pub struct OoxmlSpreadsheetConverter;

impl SpreadsheetConverter for OoxmlSpreadsheetConverter {
    fn convert_to_csv(&self, xlsx_bytes: &[u8]) -> Result<Vec<SheetCsv>, ParseError> {
        let mut package = open_package(xlsx_bytes)?;

        let shared = match read_optional_part(&mut package, SHARED_STRINGS_PART)? {
            Some(xml) => parse_shared_strings(&xml)?,
            None => Vec::new(),
        };
        let sheets = parse_workbook_sheets(&read_part(&mut package, WORKBOOK_PART)?)?;
        let targets = parse_relationships(&read_part(&mut package, WORKBOOK_RELS_PART)?)?;

        let mut out = Vec::new();
        for (name, rel_id) in sheets {
            let Some(target) = targets.get(&rel_id) else {
                tracing::warn!(sheet = %name, rel_id = %rel_id, "Sheet has no relationship target, skipping");
                continue;
            };
            let rows = read_sheet_rows(&mut package, &resolve_target(target), &shared)?;
            out.push(SheetCsv {
                name,
                csv_text: rows_to_csv(&rows)?,
            });
        }
        Ok(out)
    }
}

fn attr_value(e: &BytesStart<'_>, local: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == local)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// Relationship targets are relative to `xl/` unless absolute.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{target}"),
    }
}

fn parse_shared_strings(xml: &str) -> Result<Vec<String>, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    let mut phonetic_depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => current.clear(),
                b"t" => in_text = phonetic_depth == 0,
                b"rPh" => phonetic_depth += 1,
                _ => {}
            },
            Event::Text(t) if in_text => current.push_str(&t.unescape()?),
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => strings.push(std::mem::take(&mut current)),
                b"t" => in_text = false,
                b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(strings)
}

/// `(sheet name, relationship id)` in workbook order.
fn parse_workbook_sheets(xml: &str) -> Result<Vec<(String, String)>, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut sheets = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                if let (Some(name), Some(id)) = (attr_value(&e, b"name"), attr_value(&e, b"id")) {
                    sheets.push((name, id));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(sheets)
}

fn parse_relationships(xml: &str) -> Result<HashMap<String, String>, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut targets = HashMap::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                if let (Some(id), Some(target)) = (attr_value(&e, b"Id"), attr_value(&e, b"Target")) {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(targets)
}

/// Zero-based column index from a cell reference such as `C7` or `AA12`.
///
/// `Ok(None)` when the reference has no column letters. Columns past XFD
/// are rejected.
fn column_index(cell_ref: &str) -> Result<Option<usize>, ParseError> {
    let letters = cell_ref.bytes().take_while(u8::is_ascii_alphabetic);
    let mut n = 0usize;
    let mut seen = false;
    for b in letters {
        seen = true;
        n = n
            .checked_mul(26)
            .and_then(|v| v.checked_add(usize::from(b.to_ascii_uppercase() - b'A' + 1)))
            .filter(|v| *v <= MAX_COLUMN + 1)
            .ok_or_else(|| ParseError::CellReference(cell_ref.to_string()))?;
    }
    Ok(seen.then(|| n - 1))
}

#[derive(Default)]
struct Cell {
    column: Option<usize>,
    kind: Option<String>,
    raw: String,
}

impl Cell {
    fn value(&self, shared: &[String]) -> String {
        match self.kind.as_deref() {
            Some("s") => self
                .raw
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|i| shared.get(i).cloned())
                .unwrap_or_default(),
            Some("b") => match self.raw.trim() {
                "1" => "TRUE".into(),
                "0" => "FALSE".into(),
                other => other.into(),
            },
            _ => self.raw.clone(),
        }
    }
}

fn read_sheet_rows(
    package: &mut Package<'_>,
    part: &str,
    shared: &[String],
) -> Result<Vec<Vec<String>>, ParseError> {
    let xml = read_part(package, part)?;
    parse_sheet_rows(&xml, shared)
}

fn parse_sheet_rows(xml: &str, shared: &[String]) -> Result<Vec<Vec<String>>, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell: Option<Cell> = None;
    let mut in_value = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => row.clear(),
                b"c" => {
                    let column = match attr_value(&e, b"r") {
                        Some(cell_ref) => column_index(&cell_ref)?,
                        None => None,
                    };
                    cell = Some(Cell {
                        column,
                        kind: attr_value(&e, b"t"),
                        raw: String::new(),
                    })
                }
                b"v" | b"t" => in_value = cell.is_some(),
                _ => {}
            },
            Event::Text(t) if in_value => {
                if let Some(c) = cell.as_mut() {
                    c.raw.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"v" | b"t" => in_value = false,
                b"c" => {
                    if let Some(c) = cell.take() {
                        let column = c.column.unwrap_or(row.len());
                        if column > MAX_COLUMN {
                            return Err(ParseError::CellReference(format!("column {}", column + 1)));
                        }
                        if row.len() <= column {
                            row.resize(column + 1, String::new());
                        }
                        row[column] = c.value(shared);
                    }
                }
                b"row" => {
                    if row.iter().any(|v| !v.trim().is_empty()) {
                        rows.push(std::mem::take(&mut row));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(rows)
}

fn rows_to_csv(rows: &[Vec<String>]) -> Result<String, ParseError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ParseError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::super::ooxml::test_support::build_package;
    use super::*;

    const WORKBOOK: &str = r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
        xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
      <sheets>
        <sheet name="Offers" sheetId="1" r:id="rId1"/>
        <sheet name="Notes" sheetId="2" r:id="rId2"/>
      </sheets>
    </workbook>"#;

    const RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
      <Relationship Id="rId1" Type="worksheet" Target="worksheets/sheet1.xml"/>
      <Relationship Id="rId2" Type="worksheet" Target="/xl/worksheets/sheet2.xml"/>
    </Relationships>"#;

    const SHARED: &str = r#"<sst><si><t>Benefit</t></si><si><r><t>Lower</t></r><r><t xml:space="preserve"> cost, faster</t></r></si></sst>"#;

    const SHEET1: &str = r#"<worksheet><sheetData>
      <row r="1"><c r="A1" t="s"><v>0</v></c><c r="C1"><v>42</v></c></row>
      <row r="2"><c r="A2"/></row>
      <row r="3"><c r="B3" t="s"><v>1</v></c><c r="C3" t="b"><v>1</v></c></row>
    </sheetData></worksheet>"#;

    const SHEET2: &str = r#"<worksheet><sheetData>
      <row r="1"><c r="A1" t="inlineStr"><is><t>Inline &amp; text</t></is></c></row>
    </sheetData></worksheet>"#;

    fn workbook_bytes() -> Vec<u8> {
        build_package(&[
            ("xl/workbook.xml", WORKBOOK),
            ("xl/_rels/workbook.xml.rels", RELS),
            ("xl/sharedStrings.xml", SHARED),
            ("xl/worksheets/sheet1.xml", SHEET1),
            ("xl/worksheets/sheet2.xml", SHEET2),
        ])
    }

    #[test]
    fn converts_each_sheet_in_order() {
        let sheets = OoxmlSpreadsheetConverter.convert_to_csv(&workbook_bytes()).unwrap();

        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].name, "Offers");
        assert_eq!(sheets[0].csv_text, "Benefit,,42\n,\"Lower cost, faster\",TRUE\n");
        assert_eq!(sheets[1].name, "Notes");
        assert_eq!(sheets[1].csv_text, "Inline & text\n");
    }

    #[test]
    fn column_letters() {
        assert_eq!(column_index("A1").unwrap(), Some(0));
        assert_eq!(column_index("c7").unwrap(), Some(2));
        assert_eq!(column_index("Z3").unwrap(), Some(25));
        assert_eq!(column_index("AA12").unwrap(), Some(26));
        assert_eq!(column_index("XFD1").unwrap(), Some(MAX_COLUMN));
        assert_eq!(column_index("12").unwrap(), None);
    }

    #[test]
    fn columns_past_xfd_are_rejected() {
        assert!(matches!(column_index("XFE1"), Err(ParseError::CellReference(_))));
        assert!(matches!(column_index("ZZZZZZZZZZZZZZZ1"), Err(ParseError::CellReference(_))));
    }

    #[test]
    fn oversized_cell_reference_fails_the_sheet() {
        let xml = r#"<worksheet><sheetData><row r="1"><c r="ZZZZZZZZZZZZZZZ1"><v>1</v></c></row></sheetData></worksheet>"#;
        let err = parse_sheet_rows(xml, &[]).unwrap_err();
        assert!(matches!(err, ParseError::CellReference(ref r) if r == "ZZZZZZZZZZZZZZZ1"));
    }

    #[test]
    fn oversized_cell_reference_in_workbook_fails_conversion() {
        let sheet = r#"<worksheet><sheetData><row r="1"><c r="AAAAAAA1"><v>1</v></c></row></sheetData></worksheet>"#;
        let bytes = build_package(&[
            ("xl/workbook.xml", WORKBOOK),
            ("xl/_rels/workbook.xml.rels", RELS),
            ("xl/worksheets/sheet1.xml", sheet),
            ("xl/worksheets/sheet2.xml", SHEET2),
        ]);
        let err = OoxmlSpreadsheetConverter.convert_to_csv(&bytes).unwrap_err();
        assert!(matches!(err, ParseError::CellReference(_)));
    }

    #[test]
    fn relationship_targets_resolve_under_xl() {
        assert_eq!(resolve_target("worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(resolve_target("/xl/worksheets/sheet2.xml"), "xl/worksheets/sheet2.xml");
    }

    #[test]
    fn missing_workbook_part_fails() {
        let bytes = build_package(&[("xl/sharedStrings.xml", SHARED)]);
        let err = OoxmlSpreadsheetConverter.convert_to_csv(&bytes).unwrap_err();
        assert!(matches!(err, ParseError::MissingPart(ref p) if p == WORKBOOK_PART));
    }
}

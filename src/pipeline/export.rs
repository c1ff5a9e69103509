//! CSV export of CVP records.
//!
//! One row per record under a fixed header. Classification fields are
//! written as their display labels; anything unset is an empty field.
//! Quoting is minimal: only fields holding a comma, quote or line break are
//! wrapped, with embedded quotes doubled.

use std::io::Write;
use std::path::Path;

use crate::models::CvpRecord;

pub const CSV_HEADER: [&str; 5] = ["Extracted Text", "Source", "Page", "Classification", "PoP/PoD"];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

fn record_row(record: &CvpRecord) -> [String; 5] {
    [
        record.text.clone(),
        record.source.clone(),
        record.page_label(),
        record.resource_class.map(|c| c.label()).unwrap_or_default().to_string(),
        record.pop.map(|p| p.label()).unwrap_or_default().to_string(),
    ]
}

/// Write the header and one row per record to `out`.
pub fn write_csv<W: Write>(records: &[CvpRecord], out: W) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record(record_row(record))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv_string(records: &[CvpRecord]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(records, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Export to a file, replacing it if present.
pub fn export_csv(records: &[CvpRecord], path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(records, std::io::BufWriter::new(file))?;

    tracing::info!(path = %path.display(), rows = records.len(), "CVP records exported");
    Ok(())
}

//! Shared access to Office Open XML packages (DOCX, XLSX).

use std::io::{Cursor, Read};

use zip::result::ZipError;
use zip::ZipArchive;

use super::ParseError;

pub(crate) type Package<'a> = ZipArchive<Cursor<&'a [u8]>>;

pub(crate) fn open_package(bytes: &[u8]) -> Result<Package<'_>, ParseError> {
    Ok(ZipArchive::new(Cursor::new(bytes))?)
}

/// Read one part of the package as UTF-8 text.
pub(crate) fn read_part(package: &mut Package<'_>, name: &str) -> Result<String, ParseError> {
    let mut entry = match package.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Err(ParseError::MissingPart(name.to_string())),
        Err(e) => return Err(e.into()),
    };
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Like [`read_part`], but a missing part is `None`.
pub(crate) fn read_optional_part(
    package: &mut Package<'_>,
    name: &str,
) -> Result<Option<String>, ParseError> {
    match read_part(package, name) {
        Ok(xml) => Ok(Some(xml)),
        Err(ParseError::MissingPart(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

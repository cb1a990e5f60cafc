//! Shared line handling for the `;`-delimited exports.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{ReadError, Result};

pub(crate) const DELIMITER: char = ';';

/// Reads a text file, decoding invalid UTF-8 lossily and dropping a BOM.
/// A missing file yields `Ok(None)`.
pub(crate) fn read_text(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => {
            let decoded = String::from_utf8_lossy(&bytes);
            let text = decoded.strip_prefix('\u{FEFF}').unwrap_or(&decoded);
            Ok(Some(text.to_string()))
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::debug!("{} not found, treating as empty", path.display());
            Ok(None)
        }
        Err(err) => Err(ReadError::file(path, err)),
    }
}

/// Non-blank lines after the header, paired with their 1-based line number.
/// Fields are split on `;` with empty fields kept in place.
pub(crate) fn data_rows(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> + '_ {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .skip(1)
        .map(|(i, line)| (i + 1, line.split(DELIMITER).collect()))
}

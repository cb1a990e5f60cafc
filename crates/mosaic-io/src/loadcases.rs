//! Optional load-case dictionary (`LC;Name`).
//!
//! Used only for labels and ordering; the numeric pipeline never depends on it.

use std::fs;
use std::path::{Path, PathBuf};

use mosaic_model::LoadCaseItem;

use crate::error::{ReadError, Result};
use crate::numeric::first_integer;
use crate::rows::read_text;

pub const DICTIONARY_FILE: &str = "loadcases.csv";

/// Finds the dictionary in `folder`: `loadcases.csv`, else the first `.csv`
/// (by name) whose name contains `loadcase`.
pub fn find_dictionary(folder: impl AsRef<Path>) -> Result<Option<PathBuf>> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        return Ok(None);
    }

    let exact = folder.join(DICTIONARY_FILE);
    if exact.is_file() {
        return Ok(Some(exact));
    }

    let entries = fs::read_dir(folder).map_err(|err| ReadError::scan(folder, err))?;
    let mut candidates = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| ReadError::scan(folder, err))?.path();
        let is_candidate = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_ascii_lowercase)
            .is_some_and(|n| n.ends_with(".csv") && n.contains("loadcase"));
        if is_candidate && path.is_file() {
            candidates.push(path);
        }
    }
    candidates.sort();
    Ok(candidates.into_iter().next())
}

/// Reads the folder's dictionary, ordered by LC. No dictionary yields an empty list.
pub fn read_folder(folder: impl AsRef<Path>) -> Result<Vec<LoadCaseItem>> {
    let Some(path) = find_dictionary(folder)? else {
        return Ok(Vec::new());
    };
    let Some(text) = read_text(&path)? else {
        return Ok(Vec::new());
    };
    let items = parse_load_cases(&text);
    log::info!("{}: {} load case(s)", path.display(), items.len());
    Ok(items)
}

/// Parses dictionary text. The delimiter is taken from the header line:
/// `;` if present, else `,`, else tab.
pub fn parse_load_cases(text: &str) -> Vec<LoadCaseItem> {
    let mut lines = text.lines();
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let delimiter = detect_delimiter(header);

    let mut items: Vec<LoadCaseItem> = lines
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let mut parts = line.split(delimiter);
            let lc = first_integer(parts.next()?.trim())?;
            let name = parts.next()?.trim();
            let name = if name.is_empty() {
                format!("LC={lc}")
            } else {
                name.to_string()
            };
            Some(LoadCaseItem { lc, name })
        })
        .collect();

    items.sort_by_key(|item| item.lc);
    items
}

fn detect_delimiter(header: &str) -> char {
    if header.contains(';') {
        ';'
    } else if header.contains(',') {
        ','
    } else {
        '\t'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_semicolon_dictionary_sorted_by_lc() {
        let items = parse_load_cases("LC;Name\nLC=3;Wind\n1;Dead load\n2; \n");
        assert_eq!(
            items,
            vec![
                LoadCaseItem::new(1, "Dead load"),
                LoadCaseItem::new(2, "LC=2"),
                LoadCaseItem::new(3, "Wind"),
            ]
        );
    }

    #[test]
    fn detects_comma_and_tab_delimiters() {
        assert_eq!(parse_load_cases("LC,Name\n4,Snow")[0], LoadCaseItem::new(4, "Snow"));
        assert_eq!(parse_load_cases("LC\tName\n5\tIce")[0], LoadCaseItem::new(5, "Ice"));
    }

    #[test]
    fn skips_rows_without_number_or_name_column() {
        let items = parse_load_cases("LC;Name\nsnow;x\n7\n");
        assert!(items.is_empty());
    }

    #[test]
    fn prefers_exact_dictionary_name() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("a_loadcases_old.csv"), "LC;Name\n1;Old").expect("write");
        fs::write(dir.path().join(DICTIONARY_FILE), "LC;Name\n1;New").expect("write");
        let items = read_folder(dir.path()).expect("read");
        assert_eq!(items, vec![LoadCaseItem::new(1, "New")]);
    }

    #[test]
    fn falls_back_to_pattern_match() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("Project_LoadCases.csv"), "LC,Name\n2,Live").expect("write");
        let items = read_folder(dir.path()).expect("read");
        assert_eq!(items, vec![LoadCaseItem::new(2, "Live")]);
    }

    #[test]
    fn missing_dictionary_is_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(read_folder(dir.path()).expect("read").is_empty());
        assert!(read_folder(dir.path().join("nope")).expect("read").is_empty());
    }
}

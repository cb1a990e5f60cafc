//! Plate moments export reader.
//!
//! Row layout: `Element;CS;LC;Shape;History;Mx;My;Mxy`.

use std::path::Path;

use mosaic_model::{MomentValues, MomentsTable};

use crate::error::Result;
use crate::numeric::{parse_float, parse_int};
use crate::rows::{data_rows, read_text};

const MIN_FIELDS: usize = 8;

/// Reads one moments file. A missing file yields an empty table.
pub fn read_table(path: impl AsRef<Path>) -> Result<MomentsTable> {
    read_tables([path])
}

/// Reads several moments files (one per load case, or a legacy single file)
/// into one table. Missing files are skipped; later rows win.
pub fn read_tables<I, P>(paths: I) -> Result<MomentsTable>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut table = MomentsTable::new();
    for path in paths {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            continue;
        }
        if let Some(text) = read_text(path)? {
            let rows = parse_into(&mut table, &text);
            log::debug!("{}: {rows} moment row(s)", path.display());
        }
    }
    Ok(table)
}

/// Parses moment rows into `table` and returns the number of rows accepted.
pub fn parse_into(table: &mut MomentsTable, text: &str) -> usize {
    let mut accepted = 0usize;
    for (_, fields) in data_rows(text) {
        if let Some((element, lc, values)) = parse_row(&fields) {
            table.add(element, lc, values);
            accepted += 1;
        }
    }
    accepted
}

pub fn parse_table(text: &str) -> MomentsTable {
    let mut table = MomentsTable::new();
    parse_into(&mut table, text);
    table
}

fn parse_row(fields: &[&str]) -> Option<(i32, i32, MomentValues)> {
    if fields.len() < MIN_FIELDS {
        return None;
    }
    let element = parse_int(fields[0])?;
    let lc = parse_int(fields[2])?;
    let values = MomentValues {
        mx: parse_float(fields[5])?,
        my: parse_float(fields[6])?,
        mxy: parse_float(fields[7])?,
    };
    Some((element, lc, values))
}

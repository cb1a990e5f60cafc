//! Nodal displacements export reader.
//!
//! Row layout: `Node;RSN;RSN_Table;Ux;Uy;Uz`.

use std::path::Path;

use mosaic_model::{DisplacementValues, DisplacementsTable};

use crate::error::Result;
use crate::numeric::{parse_float, parse_int};
use crate::rows::{data_rows, read_text};

const MIN_FIELDS: usize = 6;

/// Reads one displacements file. A missing file yields an empty table.
pub fn read_table(path: impl AsRef<Path>) -> Result<DisplacementsTable> {
    read_tables([path])
}

/// Merges several displacement files (typically one per RSN) into one table.
pub fn read_tables<I, P>(paths: I) -> Result<DisplacementsTable>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut table = DisplacementsTable::new();
    for path in paths {
        let path = path.as_ref();
        if let Some(text) = read_text(path)? {
            let rows = parse_into(&mut table, &text);
            log::debug!("{}: {rows} displacement row(s)", path.display());
        }
    }
    Ok(table)
}

pub fn parse_into(table: &mut DisplacementsTable, text: &str) -> usize {
    let mut accepted = 0usize;
    for (_, fields) in data_rows(text) {
        if let Some((node, rsn, values)) = parse_row(&fields) {
            table.add(node, rsn, values);
            accepted += 1;
        }
    }
    accepted
}

pub fn parse_table(text: &str) -> DisplacementsTable {
    let mut table = DisplacementsTable::new();
    parse_into(&mut table, text);
    table
}

fn parse_row(fields: &[&str]) -> Option<(i32, i32, DisplacementValues)> {
    if fields.len() < MIN_FIELDS {
        return None;
    }
    let node = parse_int(fields[0])?;
    let rsn = parse_int(fields[1])?;
    let values = DisplacementValues {
        ux: parse_float(fields[3])?,
        uy: parse_float(fields[4])?,
        uz: parse_float(fields[5])?,
    };
    Some((node, rsn, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_model::DisplacementField;

    #[test]
    fn parses_and_merges_rows() {
        let text = "Node;RSN;RSN_Table;Ux;Uy;Uz\n\
                    1;3;1;0,1;0,2;-1,5\n\
                    2;3;1;0;0;-2\n\
                    2;3;1;0;0;-4\n\
                    bad;3;1;0;0;0\n\
                    5;3;1;0;0\n";
        let table = parse_table(text);
        assert_eq!(table.values_by_node(3, DisplacementField::Uz).len(), 2);
        assert_eq!(table.value(2, 3, DisplacementField::Uz), Some(-4.0));
        assert_eq!(table.value(1, 3, DisplacementField::Ux), Some(0.1));
    }
}

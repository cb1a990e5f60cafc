//! Plate geometry export reader.
//!
//! Row layout (`;`-delimited, header skipped, empty fields significant):
//!
//! ```text
//! 0: Element | 1: - | 2: NodesCount | 3..6: - | 7: Node1 | 8: X1 | 9: Y1 | 10: Z1 | 11: Node2 | ...
//! ```
//!
//! Each node occupies four columns starting at column 7; Z is ignored.

use std::path::Path;

use mosaic_model::{Element2D, ElementMap, NodeId, Point2};

use crate::error::Result;
use crate::numeric::{parse_float, parse_int};
use crate::rows::{data_rows, read_text};

const ELEMENT_COL: usize = 0;
const NODE_COUNT_COL: usize = 2;
const FIRST_NODE_COL: usize = 7;
const NODE_STRIDE: usize = 4;

pub const MIN_NODES: i32 = 3;
pub const MAX_NODES: i32 = 8;

/// Reads a geometry file. A missing file yields an empty map.
pub fn read_elements(path: impl AsRef<Path>) -> Result<ElementMap> {
    let path = path.as_ref();
    let Some(text) = read_text(path)? else {
        return Ok(ElementMap::new());
    };
    let elements = parse_elements(&text);
    log::debug!("{}: {} element(s)", path.display(), elements.len());
    Ok(elements)
}

/// Parses geometry rows; malformed rows are skipped and a later row with the
/// same element id replaces the earlier one.
pub fn parse_elements(text: &str) -> ElementMap {
    let mut elements = ElementMap::new();
    let mut skipped = 0usize;

    for (line_no, fields) in data_rows(text) {
        match parse_row(&fields) {
            Some(element) => {
                elements.insert(element.id(), element);
            }
            None => {
                skipped += 1;
                log::trace!("geometry line {line_no} skipped");
            }
        }
    }

    if skipped > 0 {
        log::debug!("skipped {skipped} malformed geometry row(s)");
    }
    elements
}

fn parse_row(fields: &[&str]) -> Option<Element2D> {
    let id = parse_int(fields.get(ELEMENT_COL)?)?;
    let node_count = parse_int(fields.get(NODE_COUNT_COL)?)?;
    if !(MIN_NODES..=MAX_NODES).contains(&node_count) {
        return None;
    }

    let mut points = Vec::with_capacity(node_count as usize);
    let mut node_ids: Vec<NodeId> = Vec::with_capacity(node_count as usize);

    for i in 0..node_count as usize {
        let base = FIRST_NODE_COL + i * NODE_STRIDE;
        let (Some(x), Some(y)) = (fields.get(base + 1), fields.get(base + 2)) else {
            break;
        };
        let (Some(x), Some(y)) = (parse_float(x), parse_float(y)) else {
            break;
        };
        points.push(Point2::new(x, y));
        node_ids.push(fields.get(base).and_then(|s| parse_int(s)).unwrap_or(0));
    }

    if points.len() < MIN_NODES as usize {
        return None;
    }
    Some(Element2D::new(id, points, node_ids))
}

//! Readers for plate result exports.
//!
//! This crate provides:
//! - **Numeric parsing** tolerant of decimal commas and digit-group spaces
//! - **File pairing**: classifies a results folder into plates
//! - **Geometry** reader producing angle-ordered element polygons
//! - **Moments** and **displacements** table readers (single or multi-file)
//! - **Load-case dictionary** reader
//!
//! Malformed rows are skipped silently and missing result files read as
//! empty tables; only operational I/O failures surface as [`ReadError`].

pub mod displacements;
pub mod error;
pub mod geometry;
pub mod loadcases;
pub mod moments;
pub mod numeric;
pub mod pairing;
mod rows;

pub use error::{ReadError, Result};
pub use geometry::{parse_elements, read_elements};
pub use loadcases::{find_dictionary, parse_load_cases};
pub use numeric::{first_integer, parse_float, parse_int};
pub use pairing::{FileKind, classify, find_pairs, pair_files};

//! Domain model for plate result mosaics.
//!
//! Everything here is plain data: element geometry, result tables, plates
//! discovered in a results folder, legends, scenes and export recipes.
//! Values are built once by the readers/builders and not mutated afterwards.

pub mod fields;
pub mod geometry;
pub mod legend;
pub mod plate;
pub mod scene;
pub mod sheet;
pub mod tables;

pub use fields::{DisplacementField, LoadCase, MomentField, ResultSelection, Rsn, UnknownField};
pub use geometry::{Bounds, Element2D, ElementId, ElementMap, NodeId, Point2};
pub use legend::{LegendModel, Rgb};
pub use plate::{LoadCaseItem, Plate};
pub use scene::MosaicScene;
pub use sheet::{ExportSheetItem, NO_DATA_TEXT, ReportPage};
pub use tables::{DisplacementValues, DisplacementsTable, MomentValues, MomentsTable};

//! Turns plate geometry and result tables into colour-binned mosaic scenes.
//!
//! - [`palette`]: the blue-to-yellow legend ramp
//! - [`legend`]: outlier-aware binning and percentage labels
//! - [`builder`]: geometry/value join and scene assembly

pub mod builder;
pub mod legend;
pub mod palette;

pub use builder::{
    LEGEND_BINS, SceneTitles, build_displacement_scene, build_moment_scene, build_scene,
    build_scene_from_nodes, node_values_to_elements,
};
pub use legend::{bin_index, build_legend, quantile_sorted};
pub use palette::{color_at, discrete_colors};

//! Joins element geometry with result values into a [`MosaicScene`].
//!
//! Elements without a value, with fewer than three vertices or with a
//! non-finite vertex are left out of the scene. When nothing qualifies the
//! builders return `None`.

use std::collections::BTreeMap;

use mosaic_model::{
    Bounds, DisplacementField, DisplacementsTable, Element2D, ElementId, ElementMap, LoadCase,
    MomentField, MomentsTable, MosaicScene, NodeId, Rsn,
};

use crate::legend::{bin_index, build_legend};

pub const LEGEND_BINS: usize = 12;

/// Left/right caption pair carried by a scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneTitles {
    pub left: String,
    pub right: String,
}

impl SceneTitles {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn moments(plate: &str, lc: LoadCase, field: MomentField) -> Self {
        Self::new(plate, format!("Mosaic of {field} | LC={lc}"))
    }

    pub fn displacements(plate: &str, rsn: Rsn, field: DisplacementField) -> Self {
        Self::new(plate, format!("Displacements {field}, mm | RSN={rsn}"))
    }
}

/// Builds a scene from values indexed by element id.
pub fn build_scene(
    geometry: &ElementMap,
    values_by_element: &BTreeMap<ElementId, f64>,
    titles: SceneTitles,
) -> Option<MosaicScene> {
    let mut elements = Vec::new();
    let mut values = Vec::new();
    let mut bounds: Option<Bounds> = None;

    for (id, element) in geometry {
        let Some(&value) = values_by_element.get(id).filter(|v| v.is_finite()) else {
            continue;
        };
        if element.vertex_count() < 3 || !element.has_finite_points() {
            continue;
        }
        let Some(el_bounds) = element.bounds() else {
            continue;
        };

        bounds = Some(match bounds {
            Some(b) => b.union(&el_bounds),
            None => el_bounds,
        });
        elements.push(element.clone());
        values.push(value);
    }

    let bounds = bounds?;

    let legend = build_legend(&values, LEGEND_BINS);
    let element_to_bin = elements
        .iter()
        .zip(&values)
        .map(|(el, &v)| (el.id(), bin_index(v, legend.min, legend.max, legend.bin_count)))
        .collect();

    log::debug!(
        "scene '{}': {} of {} element(s) rendered",
        titles.right,
        elements.len(),
        geometry.len()
    );

    Some(MosaicScene {
        title_left: titles.left,
        title_right: titles.right,
        elements,
        element_to_bin,
        bounds,
        legend,
    })
}

/// Averages nodal values onto elements.
///
/// Node id 0 marks an absent node. Each element with at least three recorded
/// node ids gets the mean of the values of those nodes that are present in
/// `values_by_node`. Elements with no matching node are absent from the result.
pub fn node_values_to_elements(
    geometry: &ElementMap,
    values_by_node: &BTreeMap<NodeId, f64>,
) -> BTreeMap<ElementId, f64> {
    geometry
        .iter()
        .filter(|(_, el)| recorded_nodes(el).count() >= 3)
        .filter_map(|(&id, el)| {
            let (sum, count) = recorded_nodes(el)
                .filter_map(|node| values_by_node.get(node))
                .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
            (count > 0).then(|| (id, sum / count as f64))
        })
        .collect()
}

fn recorded_nodes(element: &Element2D) -> impl Iterator<Item = &NodeId> {
    element.node_ids().iter().filter(|&&node| node != 0)
}

/// Builds a scene from values indexed by node id.
pub fn build_scene_from_nodes(
    geometry: &ElementMap,
    values_by_node: &BTreeMap<NodeId, f64>,
    titles: SceneTitles,
) -> Option<MosaicScene> {
    let by_element = node_values_to_elements(geometry, values_by_node);
    build_scene(geometry, &by_element, titles)
}

/// Moment mosaic for one load case and component.
pub fn build_moment_scene(
    plate: &str,
    geometry: &ElementMap,
    table: &MomentsTable,
    lc: LoadCase,
    field: MomentField,
) -> Option<MosaicScene> {
    if !table.contains_lc(lc) {
        return None;
    }
    let values = table.values_by_element(lc, field);
    build_scene(geometry, &values, SceneTitles::moments(plate, lc, field))
}

/// Displacement mosaic for one result set and component.
pub fn build_displacement_scene(
    plate: &str,
    geometry: &ElementMap,
    table: &DisplacementsTable,
    rsn: Rsn,
    field: DisplacementField,
) -> Option<MosaicScene> {
    if !table.contains_rsn(rsn) {
        return None;
    }
    let values = table.values_by_node(rsn, field);
    build_scene_from_nodes(
        geometry,
        &values,
        SceneTitles::displacements(plate, rsn, field),
    )
}

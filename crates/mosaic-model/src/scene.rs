use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Element2D, ElementId};
use crate::legend::{LegendModel, Rgb};

/// A paintable mosaic: the elements that had both valid geometry and a value,
/// each assigned to a legend bin.
///
/// A scene always holds at least one element; "nothing to show" is modelled
/// as `Option<MosaicScene>::None` by the builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MosaicScene {
    pub title_left: String,
    pub title_right: String,
    pub elements: Vec<Element2D>,
    pub element_to_bin: BTreeMap<ElementId, usize>,
    pub bounds: Bounds,
    pub legend: LegendModel,
}

impl MosaicScene {
    pub fn rendered_element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn bin_of(&self, element: ElementId) -> Option<usize> {
        self.element_to_bin.get(&element).copied()
    }

    pub fn color_of(&self, element: ElementId) -> Option<Rgb> {
        self.bin_of(element)
            .and_then(|bin| self.legend.colors.get(bin).copied())
    }

    /// Number of rendered elements per legend bin.
    pub fn bin_histogram(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.legend.bin_count];
        for &bin in self.element_to_bin.values() {
            if let Some(c) = counts.get_mut(bin) {
                *c += 1;
            }
        }
        counts
    }
}

//! Result tables keyed by load case / result set.
//!
//! Both tables merge rows incrementally; a later row for the same
//! (load case, entity) pair replaces the earlier one without notice.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::fields::{DisplacementField, LoadCase, MomentField, Rsn};
use crate::geometry::{ElementId, NodeId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MomentValues {
    pub mx: f64,
    pub my: f64,
    pub mxy: f64,
}

impl MomentValues {
    pub fn get(&self, field: MomentField) -> f64 {
        match field {
            MomentField::Mx => self.mx,
            MomentField::My => self.my,
            MomentField::Mxy => self.mxy,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplacementValues {
    pub ux: f64,
    pub uy: f64,
    pub uz: f64,
}

impl DisplacementValues {
    pub fn get(&self, field: DisplacementField) -> f64 {
        match field {
            DisplacementField::Ux => self.ux,
            DisplacementField::Uy => self.uy,
            DisplacementField::Uz => self.uz,
        }
    }
}

/// LC → element → (Mx, My, Mxy).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MomentsTable {
    data: BTreeMap<LoadCase, BTreeMap<ElementId, MomentValues>>,
    load_cases: BTreeSet<LoadCase>,
}

impl MomentsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, element: ElementId, lc: LoadCase, values: MomentValues) {
        self.load_cases.insert(lc);
        self.data.entry(lc).or_default().insert(element, values);
    }

    pub fn available_lcs(&self) -> &BTreeSet<LoadCase> {
        &self.load_cases
    }

    pub fn contains_lc(&self, lc: LoadCase) -> bool {
        self.load_cases.contains(&lc)
    }

    pub fn first_lc(&self) -> Option<LoadCase> {
        self.load_cases.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.load_cases.is_empty()
    }

    pub fn value(&self, element: ElementId, lc: LoadCase) -> Option<MomentValues> {
        self.data.get(&lc)?.get(&element).copied()
    }

    /// Number of elements with a row for `lc`.
    pub fn element_count(&self, lc: LoadCase) -> usize {
        self.data.get(&lc).map_or(0, BTreeMap::len)
    }

    /// Flat element → value map for one load case and component.
    pub fn values_by_element(&self, lc: LoadCase, field: MomentField) -> BTreeMap<ElementId, f64> {
        self.data
            .get(&lc)
            .map(|by_elem| {
                by_elem
                    .iter()
                    .map(|(&id, v)| (id, v.get(field)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// RSN → node → (Ux, Uy, Uz).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplacementsTable {
    data: BTreeMap<Rsn, BTreeMap<NodeId, DisplacementValues>>,
    rsns: BTreeSet<Rsn>,
}

impl DisplacementsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: NodeId, rsn: Rsn, values: DisplacementValues) {
        self.rsns.insert(rsn);
        self.data.entry(rsn).or_default().insert(node, values);
    }

    pub fn available_rsns(&self) -> &BTreeSet<Rsn> {
        &self.rsns
    }

    pub fn contains_rsn(&self, rsn: Rsn) -> bool {
        self.rsns.contains(&rsn)
    }

    pub fn is_empty(&self) -> bool {
        self.rsns.is_empty()
    }

    pub fn value(&self, node: NodeId, rsn: Rsn, field: DisplacementField) -> Option<f64> {
        self.data
            .get(&rsn)?
            .get(&node)
            .map(|v| v.get(field))
    }

    pub fn values_by_node(&self, rsn: Rsn, field: DisplacementField) -> BTreeMap<NodeId, f64> {
        self.data
            .get(&rsn)
            .map(|by_node| {
                by_node
                    .iter()
                    .map(|(&id, v)| (id, v.get(field)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

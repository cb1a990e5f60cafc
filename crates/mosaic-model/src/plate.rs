use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::fields::{LoadCase, Rsn};

/// One logical plate: a geometry file plus whatever result files share its key.
///
/// A plate always has geometry. Empty result maps mean "no data", not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plate {
    /// Base-name key derived from the file names, e.g. `Z=-6.15`.
    pub key: String,
    pub geometry_path: PathBuf,
    pub moments_by_lc: BTreeMap<LoadCase, PathBuf>,
    pub displacements_by_rsn: BTreeMap<Rsn, PathBuf>,
}

impl Plate {
    pub fn new(key: impl Into<String>, geometry_path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            geometry_path: geometry_path.into(),
            moments_by_lc: BTreeMap::new(),
            displacements_by_rsn: BTreeMap::new(),
        }
    }

    pub fn available_lcs(&self) -> impl Iterator<Item = LoadCase> + '_ {
        self.moments_by_lc.keys().copied()
    }

    pub fn available_rsns(&self) -> impl Iterator<Item = Rsn> + '_ {
        self.displacements_by_rsn.keys().copied()
    }

    pub fn moments_path(&self, lc: LoadCase) -> Option<&Path> {
        self.moments_by_lc.get(&lc).map(PathBuf::as_path)
    }

    pub fn displacements_path(&self, rsn: Rsn) -> Option<&Path> {
        self.displacements_by_rsn.get(&rsn).map(PathBuf::as_path)
    }

    /// Moments files in load-case order.
    pub fn moments_paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.moments_by_lc.values().map(PathBuf::as_path)
    }

    pub fn displacements_paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.displacements_by_rsn.values().map(PathBuf::as_path)
    }

    pub fn has_results(&self) -> bool {
        !self.moments_by_lc.is_empty() || !self.displacements_by_rsn.is_empty()
    }

    /// Cache key for per-plate tables; plate keys compare case-insensitively.
    pub fn cache_key(&self) -> String {
        self.key.to_lowercase()
    }
}

/// Entry of the load-case dictionary (`loadcases.csv`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadCaseItem {
    pub lc: LoadCase,
    pub name: String,
}

impl LoadCaseItem {
    pub fn new(lc: LoadCase, name: impl Into<String>) -> Self {
        Self {
            lc,
            name: name.into(),
        }
    }

    pub fn display(&self) -> String {
        format!("{} - {}", self.lc, self.name)
    }
}

//! Groups the files of a results folder into plates.
//!
//! Recognised names (extension `.csv`, matched case-insensitively):
//!
//! | Kind          | Current form                      | Legacy form               |
//! | ------------- | --------------------------------- | ------------------------- |
//! | geometry      | `geom_<key>`                      | `<key>_geom`              |
//! | moments       | `moments_<key>_LC=<n>`            | `<key>_moments_lc` (LC 1) |
//! | displacements | `plates_<key>_displacements_rsn<n>` |                         |
//!
//! Only keys with a geometry file become plates. Result files for a key
//! without geometry are dropped.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use mosaic_model::{LoadCase, Plate, Rsn};

use crate::error::{ReadError, Result};
use crate::numeric::parse_int;

const GEOMETRY_PREFIX: &str = "geom_";
const GEOMETRY_SUFFIX: &str = "_geom";
const MOMENTS_PREFIX: &str = "moments_";
const MOMENTS_LC_MARK: &str = "_lc=";
const LEGACY_MOMENTS_SUFFIX: &str = "_moments_lc";
const DISPLACEMENTS_PREFIX: &str = "plates_";
const DISPLACEMENTS_MARK: &str = "_displacements_rsn";

/// Classification of a single file stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    Geometry { key: String },
    Moments { key: String, lc: LoadCase },
    Displacements { key: String, rsn: Rsn },
}

impl FileKind {
    pub fn key(&self) -> &str {
        match self {
            FileKind::Geometry { key }
            | FileKind::Moments { key, .. }
            | FileKind::Displacements { key, .. } => key,
        }
    }
}

/// Classifies a file name without extension. Returns `None` for unrelated
/// files and for names whose LC/RSN suffix is not an integer.
pub fn classify(stem: &str) -> Option<FileKind> {
    let lower = stem.to_ascii_lowercase();

    if lower.starts_with(GEOMETRY_PREFIX) {
        let key = &stem[GEOMETRY_PREFIX.len()..];
        return non_blank(key).map(|key| FileKind::Geometry { key });
    }

    if lower.ends_with(GEOMETRY_SUFFIX) {
        let key = &stem[..stem.len() - GEOMETRY_SUFFIX.len()];
        return non_blank(key).map(|key| FileKind::Geometry { key });
    }

    if lower.starts_with(MOMENTS_PREFIX) {
        let rest = &stem[MOMENTS_PREFIX.len()..];
        let idx = rest.to_ascii_lowercase().find(MOMENTS_LC_MARK)?;
        if idx == 0 {
            return None;
        }
        let lc = parse_int(&rest[idx + MOMENTS_LC_MARK.len()..])?;
        return Some(FileKind::Moments {
            key: rest[..idx].to_string(),
            lc,
        });
    }

    if lower.ends_with(LEGACY_MOMENTS_SUFFIX) {
        let key = &stem[..stem.len() - LEGACY_MOMENTS_SUFFIX.len()];
        return non_blank(key).map(|key| FileKind::Moments { key, lc: 1 });
    }

    if lower.starts_with(DISPLACEMENTS_PREFIX) {
        let rest = &stem[DISPLACEMENTS_PREFIX.len()..];
        let idx = rest.to_ascii_lowercase().find(DISPLACEMENTS_MARK)?;
        if idx == 0 {
            return None;
        }
        let rsn = parse_int(&rest[idx + DISPLACEMENTS_MARK.len()..])?;
        return Some(FileKind::Displacements {
            key: rest[..idx].to_string(),
            rsn,
        });
    }

    None
}

fn non_blank(key: &str) -> Option<String> {
    (!key.trim().is_empty()).then(|| key.to_string())
}

/// Scans `folder` once and returns every plate that has a geometry file,
/// ordered by key (case-insensitive). A missing folder yields no plates.
pub fn find_pairs(folder: impl AsRef<Path>) -> Result<Vec<Plate>> {
    let folder = folder.as_ref();
    if !folder.is_dir() {
        log::info!("results folder {} does not exist", folder.display());
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(folder).map_err(|err| ReadError::scan(folder, err))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| ReadError::scan(folder, err))?;
        files.push(entry.path());
    }
    files.sort();

    Ok(pair_files(files))
}

/// Groups already-listed paths into plates. Non-`.csv` paths are ignored.
pub fn pair_files(files: impl IntoIterator<Item = PathBuf>) -> Vec<Plate> {
    // keys are compared case-insensitively; the geometry file's spelling wins
    let mut geometry: HashMap<String, (String, PathBuf)> = HashMap::new();
    let mut moments: HashMap<String, BTreeMap<LoadCase, PathBuf>> = HashMap::new();
    let mut displacements: HashMap<String, BTreeMap<Rsn, PathBuf>> = HashMap::new();

    for path in files {
        if !has_csv_extension(&path) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let Some(kind) = classify(stem) else {
            log::debug!("ignoring {}", path.display());
            continue;
        };

        let folded = kind.key().to_lowercase();
        match kind {
            FileKind::Geometry { key } => {
                geometry.insert(folded, (key, path));
            }
            FileKind::Moments { lc, .. } => {
                moments.entry(folded).or_default().insert(lc, path);
            }
            FileKind::Displacements { rsn, .. } => {
                displacements.entry(folded).or_default().insert(rsn, path);
            }
        }
    }

    let mut plates: Vec<Plate> = geometry
        .into_iter()
        .map(|(folded, (key, geometry_path))| Plate {
            key,
            geometry_path,
            moments_by_lc: moments.remove(&folded).unwrap_or_default(),
            displacements_by_rsn: displacements.remove(&folded).unwrap_or_default(),
        })
        .collect();
    plates.sort_by(|a, b| a.key.to_lowercase().cmp(&b.key.to_lowercase()));

    for key in moments.keys().chain(displacements.keys()) {
        log::debug!("results for '{key}' have no geometry file, skipped");
    }
    log::info!("paired {} plate(s)", plates.len());

    plates
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

//! Collision-free output paths.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Numbered suffixes tried before falling back to a random one.
pub const MAX_NUMBERED_ATTEMPTS: u32 = 9_999;

/// Returns `desired` if nothing exists there, else the first free
/// `<name>_001.<ext>`, `<name>_002.<ext>`, ... and finally
/// `<name>_<uuid>.<ext>`.
pub fn ensure_unique_path(desired: impl AsRef<Path>) -> PathBuf {
    unique_path_with(desired.as_ref(), |p| p.exists())
}

/// Tracks paths handed out during one export so that two sheets never share
/// a target, even before either file has been written.
#[derive(Debug, Default)]
pub struct UniquePaths {
    reserved: HashSet<PathBuf>,
}

impl UniquePaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserve(&mut self, desired: impl AsRef<Path>) -> PathBuf {
        let path = unique_path_with(desired.as_ref(), |p| {
            self.reserved.contains(p) || p.exists()
        });
        self.reserved.insert(path.clone());
        path
    }

    pub fn is_reserved(&self, path: &Path) -> bool {
        self.reserved.contains(path)
    }
}

fn unique_path_with(desired: &Path, taken: impl Fn(&Path) -> bool) -> PathBuf {
    if !taken(desired) {
        return desired.to_path_buf();
    }

    let stem = desired
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = desired
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    for i in 1..=MAX_NUMBERED_ATTEMPTS {
        let candidate = desired.with_file_name(format!("{stem}_{i:03}{ext}"));
        if !taken(&candidate) {
            return candidate;
        }
    }

    let fallback = desired.with_file_name(format!("{stem}_{}{ext}", Uuid::new_v4().simple()));
    log::warn!(
        "{} numbered names taken for {}, using {}",
        MAX_NUMBERED_ATTEMPTS,
        desired.display(),
        fallback.display()
    );
    fallback
}

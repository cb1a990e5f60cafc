//! Per-session caches of parsed files and sheet preparation on top of them.

use std::collections::HashMap;
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mosaic_io::{ReadError, displacements, moments, read_elements};
use mosaic_model::{
    DisplacementsTable, ElementMap, ExportSheetItem, MomentsTable, MosaicScene, NO_DATA_TEXT,
    Plate, ReportPage, ResultSelection,
};
use mosaic_scene::{build_displacement_scene, build_moment_scene};

type Slot<V> = Arc<Mutex<Option<Arc<V>>>>;

/// Read-through cache with one initialization lock per key.
///
/// The map lock is only held to look up or create a key's slot. Loading
/// happens under the slot lock, so the first caller for a key populates it
/// and concurrent callers for the same key wait and reuse the value, while
/// other keys resolve independently. A failed load leaves the slot empty.
pub struct KeyedCache<K, V> {
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> Default for KeyedCache<K, V> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash + Clone, V> KeyedCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_try_insert_with<E>(
        &self,
        key: &K,
        load: impl FnOnce() -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        let slot = Arc::clone(lock(&self.slots).entry(key.clone()).or_default());
        let mut value = lock(&slot);
        if let Some(cached) = value.as_ref() {
            return Ok(Arc::clone(cached));
        }
        let loaded = Arc::new(load()?);
        *value = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let slot = lock(&self.slots).get(key).cloned()?;
        let value = lock(&slot);
        value.clone()
    }

    /// Replaces the entry for `key`, e.g. after the source file changed.
    pub fn insert(&self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        let slot = Arc::new(Mutex::new(Some(Arc::clone(&value))));
        lock(&self.slots).insert(key, slot);
        value
    }

    pub fn invalidate(&self, key: &K) -> bool {
        lock(&self.slots).remove(key).is_some()
    }

    pub fn len(&self) -> usize {
        lock(&self.slots).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Parsed files of one viewing session.
///
/// Geometry is keyed by geometry path; result tables by plate key, compared
/// case-insensitively.
#[derive(Default)]
pub struct SessionCaches {
    geometry: KeyedCache<PathBuf, ElementMap>,
    moments: KeyedCache<String, MomentsTable>,
    displacements: KeyedCache<String, DisplacementsTable>,
}

impl SessionCaches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geometry(&self, plate: &Plate) -> Result<Arc<ElementMap>, ReadError> {
        self.geometry
            .get_or_try_insert_with(&plate.geometry_path, || read_elements(&plate.geometry_path))
    }

    pub fn moments(&self, plate: &Plate) -> Result<Arc<MomentsTable>, ReadError> {
        self.moments.get_or_try_insert_with(&plate.cache_key(), || {
            moments::read_tables(plate.moments_paths())
        })
    }

    pub fn displacements(&self, plate: &Plate) -> Result<Arc<DisplacementsTable>, ReadError> {
        self.displacements.get_or_try_insert_with(&plate.cache_key(), || {
            displacements::read_tables(plate.displacements_paths())
        })
    }

    /// Builds the scene for one plate and selection from cached tables.
    /// `Ok(None)` means there is nothing to draw.
    pub fn scene(
        &self,
        plate: &Plate,
        selection: &ResultSelection,
    ) -> Result<Option<MosaicScene>, ReadError> {
        let geometry = self.geometry(plate)?;
        let scene = match *selection {
            ResultSelection::Moments { lc, field } => {
                let table = self.moments(plate)?;
                build_moment_scene(&plate.key, &geometry, &table, lc, field)
            }
            ResultSelection::Displacements { rsn, field } => {
                let table = self.displacements(plate)?;
                build_displacement_scene(&plate.key, &geometry, &table, rsn, field)
            }
        };
        Ok(scene)
    }
}

/// Everything a page renderer needs for one sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetContent {
    pub page: ReportPage,
    pub scene: Option<MosaicScene>,
    pub show_mesh: bool,
}

/// Rebuilds queued sheets at export time.
#[derive(Clone, Default)]
pub struct SheetPreparer {
    caches: Arc<SessionCaches>,
}

impl SheetPreparer {
    pub fn new(caches: Arc<SessionCaches>) -> Self {
        Self { caches }
    }

    /// Captions come from the queued page with the sheet number replaced.
    /// Without a scene the page carries a no-data text; with one it is cleared.
    pub fn prepare(&self, item: &ExportSheetItem, sheet: u32) -> Result<SheetContent, ReadError> {
        let scene = self.caches.scene(&item.plate, &item.selection)?;

        let mut page = item.page.with_sheet_number(sheet);
        match &scene {
            Some(_) => page.no_data_text.clear(),
            None if !page.has_no_data() => page.no_data_text = NO_DATA_TEXT.to_string(),
            None => {}
        }
        if scene.is_none() {
            log::debug!("sheet {sheet}: {}", page.no_data_text);
        }

        Ok(SheetContent {
            page,
            scene,
            show_mesh: item.show_mesh,
        })
    }
}

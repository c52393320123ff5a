use std::fs;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::errors::StoreError;
use crate::fx::AnimatorController;

/// The persistent-asset seam the generator writes through: path-addressed
/// controller assets, folder management, dirty marking for deferred
/// persistence, and a batch-editing mode that brackets a whole run.
pub trait AssetStore {
    fn ensure_folder(&mut self, path: &str) -> Result<(), StoreError>;

    /// Deleting a missing asset is not an error; returns whether anything
    /// was deleted.
    fn delete_controller(&mut self, path: &str) -> bool;

    fn put_controller(&mut self, path: &str, asset: AnimatorController) -> Result<(), StoreError>;

    fn mark_dirty(&mut self, path: &str);

    fn begin_batch_edit(&mut self);

    fn end_batch_edit(&mut self);
}

/// Scoped acquisition of the store's batch-editing mode. Entered at the
/// start of a generation run and guaranteed to be released on every exit
/// path, including failures.
pub struct BatchEditScope<'a, S: AssetStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: AssetStore + ?Sized> BatchEditScope<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        store.begin_batch_edit();
        BatchEditScope { store }
    }
}

impl<S: AssetStore + ?Sized> Deref for BatchEditScope<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.store
    }
}

impl<S: AssetStore + ?Sized> DerefMut for BatchEditScope<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.store
    }
}

impl<S: AssetStore + ?Sized> Drop for BatchEditScope<'_, S> {
    fn drop(&mut self) {
        self.store.end_batch_edit();
    }
}

/// In-memory store, used by tests and by hosts that manage persistence
/// themselves.
#[derive(Debug, Default)]
pub struct MemoryAssetStore {
    folders: IndexSet<String>,
    controllers: IndexMap<String, AnimatorController>,
    dirty: IndexSet<String>,
    batch_depth: usize,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controller(&self, path: &str) -> Option<&AnimatorController> {
        self.controllers.get(path)
    }

    pub fn folder_exists(&self, path: &str) -> bool {
        self.folders.contains(path)
    }

    pub fn dirty_paths(&self) -> impl Iterator<Item = &str> {
        self.dirty.iter().map(String::as_str)
    }

    pub fn batch_depth(&self) -> usize {
        self.batch_depth
    }
}

impl AssetStore for MemoryAssetStore {
    fn ensure_folder(&mut self, path: &str) -> Result<(), StoreError> {
        if path.is_empty() {
            return Err(StoreError::InvalidFolder(path.to_string()));
        }
        self.folders.insert(path.to_string());
        Ok(())
    }

    fn delete_controller(&mut self, path: &str) -> bool {
        self.controllers.shift_remove(path).is_some()
    }

    fn put_controller(&mut self, path: &str, asset: AnimatorController) -> Result<(), StoreError> {
        self.controllers.insert(path.to_string(), asset);
        Ok(())
    }

    fn mark_dirty(&mut self, path: &str) {
        self.dirty.insert(path.to_string());
    }

    fn begin_batch_edit(&mut self) {
        self.batch_depth += 1;
    }

    fn end_batch_edit(&mut self) {
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 {
            debug!("batch edit finished, {} assets dirty", self.dirty.len());
        }
    }
}

/// Filesystem store persisting controllers as RON under a root directory.
#[derive(Debug)]
pub struct FsAssetStore {
    root: PathBuf,
    batch_depth: usize,
}

impl FsAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsAssetStore {
            root: root.into(),
            batch_depth: 0,
        }
    }

    fn asset_path(&self, path: &str) -> PathBuf {
        self.root.join(format!("{path}.ron"))
    }

    pub fn load_controller(&self, path: &str) -> Result<AnimatorController, StoreError> {
        let file = self.asset_path(path);
        if !file.exists() {
            return Err(StoreError::MissingAsset(path.to_string()));
        }
        let contents = fs::read_to_string(file)?;
        ron::from_str(&contents).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl AssetStore for FsAssetStore {
    fn ensure_folder(&mut self, path: &str) -> Result<(), StoreError> {
        if path.is_empty() || Path::new(path).is_absolute() {
            return Err(StoreError::InvalidFolder(path.to_string()));
        }
        fs::create_dir_all(self.root.join(path))?;
        Ok(())
    }

    fn delete_controller(&mut self, path: &str) -> bool {
        fs::remove_file(self.asset_path(path)).is_ok()
    }

    fn put_controller(&mut self, path: &str, asset: AnimatorController) -> Result<(), StoreError> {
        let file = self.asset_path(path);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialized = ron::ser::to_string_pretty(&asset, ron::ser::PrettyConfig::default())
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(file, serialized)?;
        Ok(())
    }

    fn mark_dirty(&mut self, _path: &str) {
        // Writes go straight to disk; there is no deferred import step to
        // notify.
    }

    fn begin_batch_edit(&mut self) {
        self.batch_depth += 1;
    }

    fn end_batch_edit(&mut self) {
        self.batch_depth = self.batch_depth.saturating_sub(1);
    }
}

//! services/portal/src/adapters/file_store.rs
//!
//! File-backed implementation of the `SlotStore` port: one JSON file per
//! slot, replaced wholesale on every write.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use vetportal_core::ports::{Slot, SlotStore, StoreError, StoreResult};

/// Stores each slot as `<key>.json` inside a single directory.
///
/// Writes land in a temporary file first and are renamed into place, so a
/// reader never observes a partially written value.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (or create) the store in the platform-appropriate data
    /// directory:
    /// - Linux:   `~/.local/share/vetportal/`
    /// - macOS:   `~/Library/Application Support/com.vetportal.vetportal/`
    /// - Windows: `{FOLDERID_RoamingAppData}\vetportal\vetportal\data\`
    pub fn new() -> StoreResult<Self> {
        let project_dirs =
            ProjectDirs::from("com", "vetportal", "vetportal").ok_or(StoreError::NoDataDir)?;
        Self::open_at(project_dirs.data_dir())
    }

    /// Open (or create) the store at an explicit directory.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(dir: &Path) -> StoreResult<Self> {
        fs::create_dir_all(dir)?;
        tracing::info!(dir = %dir.display(), "opening slot store");
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn path(&self, slot: Slot) -> PathBuf {
        self.dir.join(format!("{}.json", slot.key()))
    }
}

impl SlotStore for FileStore {
    fn read(&self, slot: Slot) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path(slot)) {
            Ok(json) => Ok(Some(json)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, slot: Slot, json: &str) -> StoreResult<()> {
        let target = self.path(slot);
        let staged = target.with_extension("json.tmp");
        fs::write(&staged, json).map_err(map_write_err)?;
        fs::rename(&staged, &target).map_err(map_write_err)?;
        Ok(())
    }

    fn clear(&self, slot: Slot) -> StoreResult<()> {
        match fs::remove_file(self.path(slot)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// A full filesystem is the quota condition; everything else stays a plain
/// I/O error.
fn map_write_err(err: io::Error) -> StoreError {
    if err.kind() == io::ErrorKind::StorageFull {
        StoreError::QuotaExceeded
    } else {
        StoreError::Io(err)
    }
}

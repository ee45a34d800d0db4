use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SyncError;

/// The staging areas a stored file moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    /// Awaiting transfer (export source) or just imported.
    New,
    /// Transfer completed.
    Cur,
    /// In-flight ingestion, not yet visible to consumers.
    Tmp,
}

impl Area {
    fn as_str(self) -> &'static str {
        match self {
            Area::New => "new",
            Area::Cur => "cur",
            Area::Tmp => "tmp",
        }
    }
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maildir-style staging store.
///
/// A member resides in exactly one area at any instant; area transitions
/// are single renames, so there are never shadow copies across areas.
/// Members are never deleted here.
#[derive(Debug, Clone)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    /// Create a store handle rooted at `base`. Call `prepare` before use.
    pub fn open(base: impl AsRef<Path>) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
        }
    }

    /// Idempotently create the `new`/`cur`/`tmp` area directories.
    pub fn prepare(&self) -> Result<(), SyncError> {
        for area in [Area::New, Area::Cur, Area::Tmp] {
            let dir = self.area_dir(area);
            fs::create_dir_all(&dir).map_err(|e| {
                SyncError::LocalIo(format!("failed to create area dir {}: {}", dir.display(), e))
            })?;
        }
        debug!("prepared staging store at {}", self.base.display());
        Ok(())
    }

    fn area_dir(&self, area: Area) -> PathBuf {
        self.base.join(area.as_str())
    }

    /// Path of a member within an area. The member need not exist.
    pub fn path(&self, area: Area, name: &str) -> PathBuf {
        self.area_dir(area).join(name)
    }

    /// List member names in an area, lexically sorted.
    pub fn list(&self, area: Area) -> Result<Vec<String>, SyncError> {
        let dir = self.area_dir(area);
        let entries = fs::read_dir(&dir).map_err(|e| {
            SyncError::LocalIo(format!("failed to list area {}: {}", dir.display(), e))
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SyncError::LocalIo(format!("failed to read entry in {}: {}", dir.display(), e))
            })?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    /// Move a member between areas with a single rename.
    pub fn move_entry(&self, name: &str, from: Area, to: Area) -> Result<(), SyncError> {
        let src = self.path(from, name);
        let dst = self.path(to, name);
        fs::rename(&src, &dst).map_err(|e| {
            SyncError::LocalIo(format!(
                "failed to move {} from '{}' to '{}': {}",
                name, from, to, e
            ))
        })?;
        debug!("moved {} from '{}' to '{}'", name, from, to);
        Ok(())
    }

    /// Open a member in `tmp` for writing, truncating any copy left behind
    /// by a prior partial run.
    pub fn open_for_write(&self, name: &str) -> Result<File, SyncError> {
        let path = self.path(Area::Tmp, name);
        File::create(&path).map_err(|e| {
            SyncError::LocalIo(format!("failed to open {} for write: {}", path.display(), e))
        })
    }
}

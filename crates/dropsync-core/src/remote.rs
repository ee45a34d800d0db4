use std::path::Path;

use crate::error::SyncError;

/// A live session against the remote drop directory.
///
/// Implementations classify their failures: every method here reports
/// `SyncError::Transport`. Paths are remote paths; `list` returns bare
/// entry names, not paths.
pub trait RemoteFs {
    /// Check whether a remote path exists.
    fn exists(&mut self, path: &str) -> Result<bool, SyncError>;

    /// List the entry names in a remote directory.
    fn list(&mut self, dir: &str) -> Result<Vec<String>, SyncError>;

    /// Upload a local file to a remote path (binary mode).
    fn upload(&mut self, local: &Path, remote: &str) -> Result<(), SyncError>;

    /// Download a remote path into a local file (binary mode).
    fn download(&mut self, remote: &str, local: &Path) -> Result<(), SyncError>;

    /// Write raw bytes to a remote path. Used for lock-marker creation.
    fn put_bytes(&mut self, remote: &str, bytes: &[u8]) -> Result<(), SyncError>;

    /// Remove a remote entry.
    fn remove(&mut self, remote: &str) -> Result<(), SyncError>;

    /// Tear down the connection.
    fn close(&mut self) -> Result<(), SyncError>;
}

/// Factory for `RemoteFs` sessions.
///
/// Connection failures classify as `SyncError::Connect`; nothing remote
/// has been touched when `connect` fails, so there is nothing to clean up.
pub trait Connect {
    type Remote: RemoteFs;

    fn connect(&self) -> Result<Self::Remote, SyncError>;
}

/// Join an entry name onto a remote directory path.
pub(crate) fn remote_path(dir: &str, name: &str) -> String {
    format!("{}/{}", dir.trim_end_matches('/'), name)
}

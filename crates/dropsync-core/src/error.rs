use thiserror::Error;

/// Errors that can occur during a synchronization run.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The remote session could not be established (network or auth).
    #[error("connect failure: {0}")]
    Connect(String),

    /// A mid-session remote operation failed (upload, download, remove,
    /// list, or lock-marker write).
    #[error("transport error: {0}")]
    Transport(String),

    /// A local store or temp-file operation failed.
    #[error("local I/O failure: {0}")]
    LocalIo(String),
}

//! Core protocol for dropsync staging/remote synchronization.
//!
//! This crate defines the abstractions shared between transports and the
//! pipelines built on top of them:
//! - `RemoteFs` / `Connect`: the remote drop-directory seam
//! - `FileStore`: the maildir-style local staging store (`new`/`cur`/`tmp`)
//! - `Session`: lock-marker session guard with guaranteed release
//! - `export` / `import`: the two transfer pipelines

mod error;
mod export;
mod import;
mod outcome;
mod remote;
mod session;
mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use error::SyncError;
pub use export::export;
pub use import::import;
pub use outcome::Outcome;
pub use remote::{Connect, RemoteFs};
pub use session::{LockKind, Session, SessionStart, LOCK_MARKER_NAMES};
pub use store::{Area, FileStore};

use tracing::{debug, info, warn};

use crate::error::SyncError;
use crate::outcome::Outcome;
use crate::remote::{remote_path, RemoteFs};

/// Reserved entry names at the root of the remote drop directory.
///
/// Their existence, not their content, signals an in-progress session.
/// Distinctive names rather than bare `write`/`read` so a content file
/// with one of those names can still round-trip.
pub const LOCK_MARKER_NAMES: [&str; 2] = ["write.lock", "read.lock"];

const LOCK_MARKER_CONTENT: &[u8] = b"dropsync lock marker\n";

/// Which lock marker a session claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockKind {
    /// Export session.
    Write,
    /// Import session.
    Read,
}

impl LockKind {
    /// The marker name this session kind writes.
    pub fn marker_name(self) -> &'static str {
        match self {
            LockKind::Write => LOCK_MARKER_NAMES[0],
            LockKind::Read => LOCK_MARKER_NAMES[1],
        }
    }
}

/// Result of a session acquisition attempt.
///
/// A marker held by another session is expected contention, so it is a
/// variant here rather than an error.
pub enum SessionStart<R: RemoteFs> {
    /// Connected, no marker present, our marker created.
    Locked(Session<R>),
    /// Another session's marker exists; the connection has been closed.
    Busy,
}

/// A locked session against the remote drop directory.
///
/// Holds the connection and the lock marker it created. `release` removes
/// the marker and closes the connection; a `Drop` backstop does the same
/// best-effort for abandoned sessions, so no path leaves a marker behind
/// once one was created.
pub struct Session<R: RemoteFs> {
    remote: R,
    marker_path: String,
    released: bool,
}

impl<R: RemoteFs> Session<R> {
    /// Claim the drop directory with an already-connected remote session.
    ///
    /// Checks both marker names first; if either exists the connection is
    /// closed and `Busy` is returned. The existence check and the marker
    /// write are two separate remote operations, so this is cooperative
    /// exclusion only, not an atomic test-and-set.
    pub fn acquire(
        mut remote: R,
        remote_dir: &str,
        kind: LockKind,
    ) -> Result<SessionStart<R>, SyncError> {
        for name in LOCK_MARKER_NAMES {
            let path = remote_path(remote_dir, name);
            match remote.exists(&path) {
                Ok(true) => {
                    info!("lock marker '{}' exists, drop directory is busy", name);
                    close_quietly(&mut remote);
                    return Ok(SessionStart::Busy);
                }
                Ok(false) => {}
                Err(e) => {
                    close_quietly(&mut remote);
                    return Err(e);
                }
            }
        }

        let marker_path = remote_path(remote_dir, kind.marker_name());
        if let Err(e) = remote.put_bytes(&marker_path, LOCK_MARKER_CONTENT) {
            close_quietly(&mut remote);
            return Err(e);
        }
        debug!("created lock marker {}", marker_path);

        Ok(SessionStart::Locked(Session {
            remote,
            marker_path,
            released: false,
        }))
    }

    /// The underlying remote session, for transfers performed in the body.
    pub fn remote_mut(&mut self) -> &mut R {
        &mut self.remote
    }

    /// Remove the lock marker and close the connection.
    ///
    /// Both steps are always attempted; the marker-removal error wins if
    /// both fail.
    pub fn release(mut self) -> Result<(), SyncError> {
        self.released = true;
        let removed = self.remote.remove(&self.marker_path);
        if removed.is_ok() {
            debug!("removed lock marker {}", self.marker_path);
        }
        let closed = self.remote.close();
        removed?;
        closed?;
        Ok(())
    }

    /// Release the session and fold a body result into the run outcome.
    ///
    /// A release failure never masks a body failure, but it does turn a
    /// successful body into a failed run: leaving a stale marker behind is
    /// itself reportable.
    pub fn finish(self, body: Result<(), SyncError>) -> Outcome {
        match (body, self.release()) {
            (Ok(()), Ok(())) => Outcome::Completed,
            (Ok(()), Err(release_err)) => Outcome::Failed(release_err),
            (Err(body_err), Ok(())) => Outcome::Failed(body_err),
            (Err(body_err), Err(release_err)) => {
                warn!("session release failed after body error: {}", release_err);
                Outcome::Failed(body_err)
            }
        }
    }
}

impl<R: RemoteFs> Drop for Session<R> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.remote.remove(&self.marker_path) {
            warn!(
                "failed to remove lock marker {} during cleanup: {}",
                self.marker_path, e
            );
        }
        close_quietly(&mut self.remote);
    }
}

fn close_quietly<R: RemoteFs>(remote: &mut R) {
    if let Err(e) = remote.close() {
        warn!("failed to close remote session: {}", e);
    }
}

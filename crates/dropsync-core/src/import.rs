use std::fs::File;
use std::io;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::SyncError;
use crate::outcome::Outcome;
use crate::remote::{remote_path, Connect, RemoteFs};
use crate::session::{LockKind, Session, SessionStart, LOCK_MARKER_NAMES};
use crate::store::{Area, FileStore};

/// Ingest the remote drop directory into the store's `new` area.
///
/// Each entry is downloaded into a temp file, copied into `tmp` under its
/// original name, removed remotely, and only then promoted to `new`. An
/// entry is therefore never visible in `new` while its remote source still
/// exists, which is what makes a re-run after a partial failure safe: the
/// stranded `tmp` copy is simply overwritten by the next download.
pub fn import<C: Connect>(store: &FileStore, connector: &C, remote_dir: &str) -> Outcome {
    let remote = match connector.connect() {
        Ok(r) => r,
        Err(e) => return Outcome::Failed(e),
    };
    let mut session = match Session::acquire(remote, remote_dir, LockKind::Read) {
        Ok(SessionStart::Locked(s)) => s,
        Ok(SessionStart::Busy) => return Outcome::NoOp,
        Err(e) => return Outcome::Failed(e),
    };

    let entries = match session.remote_mut().list(remote_dir) {
        Ok(names) => {
            let mut names: Vec<String> = names
                .into_iter()
                .filter(|n| !LOCK_MARKER_NAMES.contains(&n.as_str()))
                .collect();
            names.sort();
            names
        }
        Err(e) => return session.finish(Err(e)),
    };

    if entries.is_empty() {
        info!("no remote entries to import");
        return match session.release() {
            Ok(()) => Outcome::NoOp,
            Err(e) => Outcome::Failed(e),
        };
    }

    let body = ingest_all(store, &mut session, remote_dir, &entries);
    session.finish(body)
}

fn ingest_all<R: RemoteFs>(
    store: &FileStore,
    session: &mut Session<R>,
    remote_dir: &str,
    names: &[String],
) -> Result<(), SyncError> {
    for name in names {
        let source = remote_path(remote_dir, name);
        info!("importing {}", name);

        let staging = NamedTempFile::new()
            .map_err(|e| SyncError::LocalIo(format!("failed to create temp file: {}", e)))?;
        session.remote_mut().download(&source, staging.path())?;

        let mut downloaded = File::open(staging.path()).map_err(|e| {
            SyncError::LocalIo(format!(
                "failed to reopen {}: {}",
                staging.path().display(),
                e
            ))
        })?;
        let mut sink = store.open_for_write(name)?;
        io::copy(&mut downloaded, &mut sink)
            .map_err(|e| SyncError::LocalIo(format!("failed to stage {}: {}", name, e)))?;
        drop(sink);
        // Deletes the local temp copy.
        drop(staging);

        // Remote removal must precede promotion to 'new', otherwise a
        // re-run would import the same entry twice.
        session.remote_mut().remove(&source)?;
        store.move_entry(name, Area::Tmp, Area::New)?;
    }
    Ok(())
}

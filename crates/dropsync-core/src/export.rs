use tracing::info;

use crate::error::SyncError;
use crate::outcome::Outcome;
use crate::remote::{remote_path, Connect, RemoteFs};
use crate::session::{LockKind, Session, SessionStart};
use crate::store::{Area, FileStore};

/// Drain the store's `new` area into the remote drop directory.
///
/// Members are uploaded in lexical order; each one moves to `cur` only
/// after its upload succeeded. The first failure aborts the remaining
/// batch, so a re-run resumes with exactly the members still in `new`.
pub fn export<C: Connect>(store: &FileStore, connector: &C, remote_dir: &str) -> Outcome {
    let pending = match store.list(Area::New) {
        Ok(names) => names,
        Err(e) => return Outcome::Failed(e),
    };
    // Checked before connecting so an idle schedule never contends for
    // the remote lock.
    if pending.is_empty() {
        info!("no new files to export");
        return Outcome::NoOp;
    }

    let remote = match connector.connect() {
        Ok(r) => r,
        Err(e) => return Outcome::Failed(e),
    };
    let mut session = match Session::acquire(remote, remote_dir, LockKind::Write) {
        Ok(SessionStart::Locked(s)) => s,
        Ok(SessionStart::Busy) => return Outcome::NoOp,
        Err(e) => return Outcome::Failed(e),
    };

    let body = upload_all(store, &mut session, remote_dir, &pending);
    session.finish(body)
}

fn upload_all<R: RemoteFs>(
    store: &FileStore,
    session: &mut Session<R>,
    remote_dir: &str,
    names: &[String],
) -> Result<(), SyncError> {
    for name in names {
        let local = store.path(Area::New, name);
        let target = remote_path(remote_dir, name);
        info!("uploading {}", name);
        session.remote_mut().upload(&local, &target)?;
        store.move_entry(name, Area::New, Area::Cur)?;
    }
    Ok(())
}

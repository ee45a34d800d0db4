//! In-memory remote test double with failure injection.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::error::SyncError;
use crate::remote::{Connect, RemoteFs};

/// Shared state behind a mock remote drop directory.
#[derive(Default)]
pub struct RemoteState {
    /// Remote path -> content.
    pub files: BTreeMap<String, Vec<u8>>,
    /// Remote paths in upload order.
    pub uploads: Vec<String>,
    /// Fail the upload targeting exactly this remote path.
    pub fail_upload_to: Option<String>,
    /// Fail the removal of exactly this remote path.
    pub fail_remove_of: Option<String>,
    /// Fail all marker writes.
    pub fail_put_bytes: bool,
    /// Number of times the connection was closed.
    pub closed: u32,
}

/// Connector handing out `MockRemote` sessions over shared state.
pub struct MockConnector {
    pub state: Rc<RefCell<RemoteState>>,
    pub fail_connect: bool,
    pub connects: Cell<u32>,
}

impl MockConnector {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(RemoteState::default())),
            fail_connect: false,
            connects: Cell::new(0),
        }
    }

    /// Place an entry in the mock remote directory.
    pub fn seed(&self, path: &str, content: &[u8]) {
        self.state
            .borrow_mut()
            .files
            .insert(path.to_string(), content.to_vec());
    }
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connect for MockConnector {
    type Remote = MockRemote;

    fn connect(&self) -> Result<MockRemote, SyncError> {
        self.connects.set(self.connects.get() + 1);
        if self.fail_connect {
            return Err(SyncError::Connect("mock connect refused".into()));
        }
        Ok(MockRemote {
            state: Rc::clone(&self.state),
        })
    }
}

pub struct MockRemote {
    state: Rc<RefCell<RemoteState>>,
}

impl RemoteFs for MockRemote {
    fn exists(&mut self, path: &str) -> Result<bool, SyncError> {
        Ok(self.state.borrow().files.contains_key(path))
    }

    fn list(&mut self, dir: &str) -> Result<Vec<String>, SyncError> {
        let prefix = format!("{}/", dir.trim_end_matches('/'));
        Ok(self
            .state
            .borrow()
            .files
            .keys()
            .filter_map(|k| k.strip_prefix(&prefix))
            .map(str::to_string)
            .collect())
    }

    fn upload(&mut self, local: &Path, remote: &str) -> Result<(), SyncError> {
        let mut state = self.state.borrow_mut();
        if state.fail_upload_to.as_deref() == Some(remote) {
            return Err(SyncError::Transport(format!(
                "mock upload to {} refused",
                remote
            )));
        }
        let bytes = fs::read(local)
            .map_err(|e| SyncError::Transport(format!("mock upload read failed: {}", e)))?;
        state.files.insert(remote.to_string(), bytes);
        state.uploads.push(remote.to_string());
        Ok(())
    }

    fn download(&mut self, remote: &str, local: &Path) -> Result<(), SyncError> {
        let state = self.state.borrow();
        let bytes = state
            .files
            .get(remote)
            .ok_or_else(|| SyncError::Transport(format!("mock: no such entry {}", remote)))?;
        fs::write(local, bytes)
            .map_err(|e| SyncError::Transport(format!("mock download write failed: {}", e)))
    }

    fn put_bytes(&mut self, remote: &str, bytes: &[u8]) -> Result<(), SyncError> {
        let mut state = self.state.borrow_mut();
        if state.fail_put_bytes {
            return Err(SyncError::Transport(format!(
                "mock write to {} refused",
                remote
            )));
        }
        state.files.insert(remote.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&mut self, remote: &str) -> Result<(), SyncError> {
        let mut state = self.state.borrow_mut();
        if state.fail_remove_of.as_deref() == Some(remote) {
            return Err(SyncError::Transport(format!(
                "mock removal of {} refused",
                remote
            )));
        }
        state
            .files
            .remove(remote)
            .ok_or_else(|| SyncError::Transport(format!("mock: no such entry {}", remote)))?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), SyncError> {
        self.state.borrow_mut().closed += 1;
        Ok(())
    }
}

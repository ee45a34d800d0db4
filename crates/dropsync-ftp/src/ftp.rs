use std::fs::{self, File};
use std::io::Cursor;
use std::path::Path;

use dropsync_core::{Connect, RemoteFs, SyncError};
use suppaftp::types::FileType;
use suppaftp::FtpStream;
use tracing::{debug, info};

/// Connection parameters for the remote FTP drop directory.
#[derive(Debug, Clone)]
pub struct FtpConnector {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

impl Connect for FtpConnector {
    type Remote = FtpRemote;

    fn connect(&self) -> Result<FtpRemote, SyncError> {
        info!(
            "connecting to ftp server {}:{} as {}",
            self.host, self.port, self.user
        );
        let mut stream = FtpStream::connect((self.host.as_str(), self.port)).map_err(|e| {
            SyncError::Connect(format!(
                "could not connect to {}:{}: {}",
                self.host, self.port, e
            ))
        })?;
        stream
            .login(&self.user, &self.password)
            .map_err(|e| SyncError::Connect(format!("login as {} failed: {}", self.user, e)))?;
        stream
            .transfer_type(FileType::Binary)
            .map_err(|e| SyncError::Connect(format!("could not enter binary mode: {}", e)))?;
        Ok(FtpRemote { stream })
    }
}

/// A live FTP session.
///
/// Listing and existence checks go through `NLST`; some servers return
/// full paths from it, so comparisons are by basename.
pub struct FtpRemote {
    stream: FtpStream,
}

impl RemoteFs for FtpRemote {
    fn exists(&mut self, path: &str) -> Result<bool, SyncError> {
        let (dir, name) = match path.rsplit_once('/') {
            Some((dir, name)) => (Some(dir), name),
            None => (None, path),
        };
        let entries = self
            .stream
            .nlst(dir)
            .map_err(|e| SyncError::Transport(format!("listing for {} failed: {}", path, e)))?;
        Ok(entries.iter().any(|entry| basename(entry) == name))
    }

    fn list(&mut self, dir: &str) -> Result<Vec<String>, SyncError> {
        let entries = self
            .stream
            .nlst(Some(dir))
            .map_err(|e| SyncError::Transport(format!("listing {} failed: {}", dir, e)))?;
        Ok(entries
            .iter()
            .map(|entry| basename(entry).to_string())
            .collect())
    }

    fn upload(&mut self, local: &Path, remote: &str) -> Result<(), SyncError> {
        let mut file = File::open(local)
            .map_err(|e| SyncError::LocalIo(format!("could not open {}: {}", local.display(), e)))?;
        let bytes = self
            .stream
            .put_file(remote, &mut file)
            .map_err(|e| SyncError::Transport(format!("upload to {} failed: {}", remote, e)))?;
        debug!("uploaded {} bytes to {}", bytes, remote);
        Ok(())
    }

    fn download(&mut self, remote: &str, local: &Path) -> Result<(), SyncError> {
        let buffer = self
            .stream
            .retr_as_buffer(remote)
            .map_err(|e| SyncError::Transport(format!("download of {} failed: {}", remote, e)))?;
        fs::write(local, buffer.into_inner()).map_err(|e| {
            SyncError::LocalIo(format!("could not write {}: {}", local.display(), e))
        })?;
        debug!("downloaded {} to {}", remote, local.display());
        Ok(())
    }

    fn put_bytes(&mut self, remote: &str, bytes: &[u8]) -> Result<(), SyncError> {
        self.stream
            .put_file(remote, &mut Cursor::new(bytes))
            .map_err(|e| SyncError::Transport(format!("write to {} failed: {}", remote, e)))?;
        Ok(())
    }

    fn remove(&mut self, remote: &str) -> Result<(), SyncError> {
        self.stream
            .rm(remote)
            .map_err(|e| SyncError::Transport(format!("removal of {} failed: {}", remote, e)))
    }

    fn close(&mut self) -> Result<(), SyncError> {
        self.stream
            .quit()
            .map_err(|e| SyncError::Transport(format!("disconnect failed: {}", e)))
    }
}

fn basename(entry: &str) -> &str {
    entry.rsplit('/').next().unwrap_or(entry)
}

//! Append-only log file shared by all requests

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Serialized append-only writer for the sink's log file
///
/// Every append holds the lock for the full write and flush, so lines
/// from concurrent requests never interleave. The handle is opened
/// lazily on the first append and reopened after a failed write.
pub struct LogFile {
    path: PathBuf,
    handle: Mutex<Option<File>>,
}

impl LogFile {
    /// Create a writer for `path` without touching the filesystem
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            handle: Mutex::new(None),
        }
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file left over from a previous run
    ///
    /// A missing file is not an error.
    pub async fn reset(&self) -> io::Result<()> {
        // Drop any open handle so the next append recreates the file
        self.handle.lock().await.take();

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Removed previous log file {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No previous log file at {:?}", self.path);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Append one complete line
    pub async fn append(&self, line: &str) -> io::Result<()> {
        let mut guard = self.handle.lock().await;

        let mut file = match guard.take() {
            Some(file) => file,
            None => Self::open(&self.path).await?,
        };

        let result: io::Result<()> = async {
            file.write_all(line.as_bytes()).await?;
            file.flush().await
        }
        .await;

        match &result {
            Ok(()) => *guard = Some(file),
            Err(e) => warn!("Write to {:?} failed, reopening on next append: {}", self.path, e),
        }

        result
    }

    async fn open(path: &Path) -> io::Result<File> {
        debug!("Opening log file {:?}", path);
        OpenOptions::new().create(true).append(true).open(path).await
    }
}

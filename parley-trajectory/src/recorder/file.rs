//! JSON-lines trajectory recorder

use crate::{TrajectoryError, TrajectoryEvent, TrajectoryRecorder, TrajectoryResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

/// Appends one JSON object per event to a file
///
/// The parent directory is created on construction; the file itself is
/// created on the first event.
#[derive(Debug)]
pub struct FileRecorder {
    path: PathBuf,
    // Serializes appends so lines never interleave
    write_lock: Mutex<()>,
}

impl FileRecorder {
    /// Create a recorder writing to `path`
    pub fn new(path: impl AsRef<Path>) -> TrajectoryResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                TrajectoryError::Backend(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        debug!("Initialized trajectory file at: {:?}", path);
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// The file events are written to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every event recorded so far
    ///
    /// Blank lines are skipped; a line that does not parse is an error.
    pub async fn read_all(&self) -> TrajectoryResult<Vec<TrajectoryEvent>> {
        let text = match fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str(line).map_err(|e| {
                    warn!("Unreadable trajectory line {} in {:?}: {}", n + 1, self.path, e);
                    TrajectoryError::Serialization(e)
                })
            })
            .collect()
    }
}

#[async_trait]
impl TrajectoryRecorder for FileRecorder {
    async fn record(&self, event: &TrajectoryEvent) -> TrajectoryResult<()> {
        let mut line = serde_json::to_string(event)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        trace!(provider = event.provider(), "Appending trajectory event to {:?}", self.path);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

//! Scratch storage for rendered PNGs offered as downloads.
//!
//! Files live in a private temporary directory that is removed when the
//! store is dropped. Only the most recent `max_entries` renders are kept;
//! older files are deleted first-in-first-out.

use chrono::{DateTime, Utc};
use qr_common::{QrError, QrResult};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

/// A stored render.
#[derive(Debug, Clone)]
struct StoredFile {
    id: Uuid,
    size: usize,
    created_at: DateTime<Utc>,
}

pub struct DownloadStore {
    dir: TempDir,
    max_entries: usize,
    entries: Mutex<VecDeque<StoredFile>>,
}

impl DownloadStore {
    /// Create the scratch directory, inside `parent` when given.
    pub fn new(parent: Option<&Path>, max_entries: usize) -> QrResult<Self> {
        if max_entries == 0 {
            return Err(QrError::invalid("max_downloads", "must be at least 1"));
        }

        let mut builder = tempfile::Builder::new();
        builder.prefix("qr-web-");
        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };

        debug!(path = %dir.path().display(), max_entries, "Created download directory");

        Ok(Self {
            dir,
            max_entries,
            entries: Mutex::new(VecDeque::with_capacity(max_entries)),
        })
    }

    /// Download file name for `id`.
    pub fn file_name(id: &Uuid) -> String {
        format!("qr_code_{}.png", id.simple())
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    fn path_for(&self, id: &Uuid) -> PathBuf {
        self.dir.path().join(Self::file_name(id))
    }

    /// Write `png` under a fresh id, evicting the oldest files over capacity.
    pub async fn save(&self, png: &[u8]) -> QrResult<Uuid> {
        let id = Uuid::new_v4();
        tokio::fs::write(self.path_for(&id), png).await?;

        let mut entries = self.entries.lock().await;
        entries.push_back(StoredFile {
            id,
            size: png.len(),
            created_at: Utc::now(),
        });

        while entries.len() > self.max_entries {
            let Some(evicted) = entries.pop_front() else {
                break;
            };
            if let Err(e) = tokio::fs::remove_file(self.path_for(&evicted.id)).await {
                warn!(id = %evicted.id, error = %e, "Failed to delete evicted download");
            } else {
                debug!(
                    id = %evicted.id,
                    size = evicted.size,
                    age_ms = (Utc::now() - evicted.created_at).num_milliseconds(),
                    "Evicted download"
                );
            }
        }

        Ok(id)
    }

    /// Read a stored PNG by its id string (hyphenated or simple form).
    pub async fn open(&self, id: &str) -> QrResult<(Uuid, Vec<u8>)> {
        let not_found = || QrError::NotFound(format!("download '{}'", id));

        let id = Uuid::parse_str(id.trim_end_matches(".png")).map_err(|_| not_found())?;
        {
            let entries = self.entries.lock().await;
            if !entries.iter().any(|e| e.id == id) {
                return Err(not_found());
            }
        }

        match tokio::fs::read(self.path_for(&id)).await {
            Ok(bytes) => Ok((id, bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }

    /// Number of files currently retained.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }
}

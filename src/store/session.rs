use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::fs;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::Session;

/// JSON snapshot of the session on disk. Writes go through a temp file and a
/// rename so a crash never leaves a half-written snapshot behind.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when no snapshot was ever written.
    pub async fn load(&self) -> Result<Option<Session>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    pub async fn save(&self, session: &Session) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).await?;
            }
        }
        let payload = serde_json::to_vec_pretty(session)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// Process-wide holder of the current session. Every mutation replaces the
/// whole value.
#[derive(Debug, Clone)]
pub struct SessionStore {
    current: Arc<RwLock<Option<Session>>>,
    snapshot: SnapshotFile,
}

impl SessionStore {
    pub fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            snapshot: SnapshotFile::new(snapshot_path),
        }
    }

    pub async fn get(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|s| s.token.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Adopts `session` and writes the snapshot. The in-memory value is
    /// replaced even if the write fails.
    pub async fn set(&self, session: Session) -> Result<(), StoreError> {
        *self.current.write().await = Some(session.clone());
        tracing::info!(user_id = session.user_id, "Session established");
        self.snapshot.save(&session).await
    }

    /// Reads the snapshot left by an earlier run and adopts it. Unreadable or
    /// incomplete snapshots count as logged out.
    pub async fn restore(&self) -> Option<Session> {
        let session = match self.snapshot.load().await {
            Ok(Some(session)) if session.is_complete() => session,
            Ok(Some(_)) => {
                tracing::warn!(path = %self.snapshot.path().display(), "Ignoring incomplete session snapshot");
                return None;
            }
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, path = %self.snapshot.path().display(), "Failed to read session snapshot");
                return None;
            }
        };

        *self.current.write().await = Some(session.clone());
        tracing::info!(user_id = session.user_id, "Session restored");
        Some(session)
    }
}

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid file name: {0:?}")]
    InvalidName(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Ephemeral upload storage: one file per name, last write wins.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `bytes` under the final component of `filename` and return the
    /// stored name. Any directory part of the client-supplied name is dropped.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let name = stored_name(filename)?;
        let path = self.dir.join(&name);
        tokio::fs::write(&path, bytes).await?;
        debug!("Stored {} bytes at {}", bytes.len(), path.display());
        Ok(name)
    }
}

fn stored_name(filename: &str) -> Result<String, StorageError> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    if name.is_empty() || name == "." || name == ".." {
        return Err(StorageError::InvalidName(filename.to_string()));
    }
    Ok(name.to_string())
}

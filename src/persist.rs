use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::state::CatalogEntry;

pub const CATALOG_SLOT: &str = "catalog.json";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("catalog slot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog slot corrupted: {0}")]
    Format(#[from] serde_json::Error),
}

/// The single named slot holding the last fetched catalog.
#[derive(Clone, Debug)]
pub struct CatalogSlot {
    path: PathBuf,
}

impl CatalogSlot {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(CATALOG_SLOT),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when nothing has been stored yet.
    pub async fn load(&self) -> Result<Option<Vec<CatalogEntry>>, Error> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    pub async fn store(&self, entries: &[CatalogEntry]) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string(entries)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

//! Optional snapshot persistence behind a `load`/`save` pair.
//!
//! The store knows nothing about this module; `ShopSystem` restores from a repository on
//! startup and writes back on shutdown.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, ShopError};
use crate::store::StoreSnapshot;

/// Storage for a whole-store snapshot.
pub trait SnapshotRepository: Send + Sync {
    /// Returns `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<StoreSnapshot>>;

    fn save(&self, snapshot: &StoreSnapshot) -> Result<()>;
}

/// Keeps the snapshot as a pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotRepository for JsonFileRepository {
    fn load(&self) -> Result<Option<StoreSnapshot>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No snapshot on disk");
                return Ok(None);
            }
            Err(e) => return Err(persistence_error(&self.path, e)),
        };
        let snapshot: StoreSnapshot = serde_json::from_str(&raw).map_err(|e| persistence_error(&self.path, e))?;
        info!(
            path = %self.path.display(),
            products = snapshot.products.len(),
            sales = snapshot.sales.len(),
            appointments = snapshot.appointments.len(),
            "Snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &StoreSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot).map_err(|e| persistence_error(&self.path, e))?;
        // the target is only ever replaced by a complete file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| persistence_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| persistence_error(&self.path, e))?;
        info!(path = %self.path.display(), "Snapshot saved");
        Ok(())
    }
}

fn persistence_error(path: &Path, err: impl std::fmt::Display) -> ShopError {
    ShopError::Persistence(format!("{}: {}", path.display(), err))
}

use super::{ContactPersistence, JsonFilePersistence, SyncMode, VolatilePersistence};
use std::path::PathBuf;

/// Persistence strategy selected at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceBackend {
    /// Neither `--memory` nor `--http`: changes are lost on exit.
    Volatile,
    /// `--memory`: the whole collection is rewritten to `path` after each mutation.
    JsonFile { path: PathBuf, sync_mode: SyncMode },
}

impl PersistenceBackend {
    pub fn new_json_file<P: Into<PathBuf>>(path: P, sync_mode: SyncMode) -> Self {
        PersistenceBackend::JsonFile {
            path: path.into(),
            sync_mode,
        }
    }

    pub fn create(&self) -> Box<dyn ContactPersistence> {
        match self {
            PersistenceBackend::Volatile => Box::new(VolatilePersistence),
            PersistenceBackend::JsonFile { path, sync_mode } => {
                Box::new(JsonFilePersistence::new(path, *sync_mode))
            }
        }
    }
}

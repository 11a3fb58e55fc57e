use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, trace};

use super::ContactPersistence;
use crate::Contact;
use crate::error::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Leave flushing to the OS.
    None,
    /// `fsync` after every write.
    Immediate,
}

/// Read the whole collection from a JSON array file.
///
/// A missing, unreadable or malformed file is an error; callers treat it as
/// fatal at startup.
pub fn load_contacts<P: AsRef<Path>>(path: P) -> Result<Vec<Contact>, StorageError> {
    let path = path.as_ref();
    let context = path.display().to_string();

    let contents =
        std::fs::read_to_string(path).map_err(|e| StorageError::from_read_error(e, &context))?;
    let contacts: Vec<Contact> = serde_json::from_str(&contents)
        .map_err(|e| StorageError::from_serialization_error(e, &context))?;

    trace!("Read {} contacts from {context}", contacts.len());
    Ok(contacts)
}

/// Overwrites the configured file with the full collection on every mutation.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    file_path: PathBuf,
    sync_mode: SyncMode,
}

impl JsonFilePersistence {
    pub fn new<P: AsRef<Path>>(file_path: P, sync_mode: SyncMode) -> Self {
        JsonFilePersistence {
            file_path: file_path.as_ref().to_path_buf(),
            sync_mode,
        }
    }
}

impl ContactPersistence for JsonFilePersistence {
    #[tracing::instrument(
        level = "debug",
        skip(self, contacts),
        fields(path = %self.file_path.display(), count = contacts.len())
    )]
    fn persist(&self, contacts: &[Contact]) -> Result<(), StorageError> {
        let context = self.file_path.display().to_string();

        let json_data = serde_json::to_string_pretty(contacts)
            .map_err(|e| StorageError::from_serialization_error(e, &context))?;

        let mut file_handle = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.file_path)
            .map_err(|e| StorageError::from_io_error(e, &context))?;
        file_handle
            .write_all(json_data.as_bytes())
            .map_err(|e| StorageError::from_io_error(e, &context))?;

        if self.sync_mode == SyncMode::Immediate {
            file_handle
                .sync_all()
                .map_err(|e| StorageError::from_io_error(e, &context))?;
        }

        debug!("Persisted {} contacts to {context}", contacts.len());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json file {}", self.file_path.display())
    }
}

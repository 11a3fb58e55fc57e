use super::ContactPersistence;
use crate::Contact;
use crate::error::StorageError;

/// Keeps mutations in process memory only; nothing survives exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct VolatilePersistence;

impl ContactPersistence for VolatilePersistence {
    fn persist(&self, _contacts: &[Contact]) -> Result<(), StorageError> {
        Ok(())
    }

    fn describe(&self) -> String {
        "volatile".to_string()
    }
}

use crate::Contact;
use crate::error::StorageError;

/// Side effect applied by `ContactStore` after each successful mutation.
///
/// Implementations receive the whole collection and must write it as one
/// snapshot; there is no incremental append.
pub trait ContactPersistence: Send + Sync {
    fn persist(&self, contacts: &[Contact]) -> Result<(), StorageError>;

    /// Short label used in logs.
    fn describe(&self) -> String {
        "custom".to_string()
    }
}

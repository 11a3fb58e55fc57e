pub mod backend;
pub mod file;
pub mod memory;
pub mod r#trait;

// Re-exports for ergonomics
pub use backend::PersistenceBackend;
pub use file::{JsonFilePersistence, SyncMode, load_contacts};
pub use memory::VolatilePersistence;
pub use r#trait::ContactPersistence;

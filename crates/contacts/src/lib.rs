use rand::Rng;
use storage::{ContactPersistence, PersistenceBackend};

pub mod error;
pub mod storage;
pub mod telemetry;

pub use error::{ContactsError, StorageError};

// Re-export logging macros for consistent usage across the crate
pub use log::{debug, error, info, trace, warn};

// =============================================================================
// CORE DATA STRUCTURES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Contact {
    pub fn new(id: String, first_name: String, last_name: String) -> Self {
        Self {
            id,
            first_name,
            last_name,
        }
    }

    /// `LASTNAME Firstname`, as printed by the `list` command.
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.last_name.to_uppercase(),
            capitalize_first_letter(&self.first_name)
        )
    }
}

pub fn capitalize_first_letter(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// IDENTIFIERS & VALIDATION
// =============================================================================

pub const ID_LENGTH: usize = 9;
const ID_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_-";

pub const MAX_NAME_LENGTH: usize = 255;

/// Short, URL-safe random identifier.
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

pub fn validate_name(field: &str, value: &str) -> Result<(), ContactsError> {
    if value.trim().is_empty() {
        return Err(ContactsError::invalid_name(field, "must not be empty"));
    }
    let length = value.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(ContactsError::invalid_name(
            field,
            format!("must be at most {MAX_NAME_LENGTH} characters (got {length})"),
        ));
    }
    Ok(())
}

pub fn validate_names(first_name: &str, last_name: &str) -> Result<(), ContactsError> {
    validate_name("firstName", first_name)?;
    validate_name("lastName", last_name)
}

// =============================================================================
// CONTACT STORE
// =============================================================================

/// Ordered contact collection with persistence applied after every mutation.
///
/// A failed write never rolls back the in-memory change: the mutation is kept
/// and the storage error is returned to the caller.
pub struct ContactStore {
    contacts: Vec<Contact>,
    persistence: Box<dyn ContactPersistence>,
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::new(Vec::new(), PersistenceBackend::Volatile.create())
    }
}

impl ContactStore {
    pub fn new(contacts: Vec<Contact>, persistence: Box<dyn ContactPersistence>) -> Self {
        ContactStore {
            contacts,
            persistence,
        }
    }

    /// Load the collection from `path` and persist through `backend`.
    pub fn load<P: AsRef<std::path::Path>>(
        path: P,
        backend: &PersistenceBackend,
    ) -> Result<Self, ContactsError> {
        let contacts = storage::file::load_contacts(path)?;
        let persistence = backend.create();
        info!(
            "Loaded {} contacts, persisting to {}",
            contacts.len(),
            persistence.describe()
        );
        Ok(Self::new(contacts, persistence))
    }

    pub fn list(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn add(&mut self, first_name: &str, last_name: &str) -> Result<Contact, ContactsError> {
        validate_names(first_name, last_name)?;

        let contact = Contact::new(
            self.unique_id(),
            first_name.to_string(),
            last_name.to_string(),
        );
        self.contacts.push(contact.clone());
        debug!("Added contact {}", contact.id);

        self.persist("add")?;
        Ok(contact)
    }

    /// Returns the removed contact, or `None` when no contact had this id.
    pub fn remove(&mut self, id: &str) -> Result<Option<Contact>, ContactsError> {
        let Some(index) = self.contacts.iter().position(|c| c.id == id) else {
            trace!("Remove of unknown contact {id} ignored");
            return Ok(None);
        };
        let removed = self.contacts.remove(index);
        debug!("Removed contact {id}");

        self.persist("remove")?;
        Ok(Some(removed))
    }

    /// Overwrites the names of an existing contact; the id never changes.
    pub fn update(
        &mut self,
        id: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Contact>, ContactsError> {
        validate_names(first_name, last_name)?;

        let Some(contact) = self.contacts.iter_mut().find(|c| c.id == id) else {
            trace!("Update of unknown contact {id} ignored");
            return Ok(None);
        };
        contact.first_name = first_name.to_string();
        contact.last_name = last_name.to_string();
        let updated = contact.clone();
        debug!("Updated contact {id}");

        self.persist("update")?;
        Ok(Some(updated))
    }

    fn unique_id(&self) -> String {
        loop {
            let id = generate_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&self, operation: &str) -> Result<(), ContactsError> {
        self.persistence.persist(&self.contacts).map_err(|e| {
            error!("Failed to persist contacts after {operation}: {e}");
            ContactsError::from(e)
        })
    }
}

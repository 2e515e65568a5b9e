// # Memory Contact Store
//
// In-process implementation of ContactStore.
//
// ## Purpose
//
// Behaves like the remote collection (assigns ids on create, 404s on
// unknown ids) without any network. Used for offline demos of the terminal
// front end and as the authoritative side in tests.
//
// ## Id assignment
//
// Ids are decimal strings counting up from the largest numeric id in the
// seed, the same shape mock REST backends hand out.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::Error;
use crate::config::StoreConfig;
use crate::contact::{Contact, ContactFields, ContactPatch};
use crate::traits::{ContactStore, ContactStoreFactory};

/// In-memory contact store implementation
///
/// Clones share the same collection, so a test can keep a handle while the
/// sync hook owns another.
///
/// # Example
///
/// ```rust,no_run
/// use contacts_core::store::MemoryContactStore;
/// use contacts_core::traits::ContactStore;
/// use contacts_core::ContactFields;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemoryContactStore::new();
///
///     store.create(&ContactFields::default()).await?;
///     assert_eq!(store.list().await?.len(), 1);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryContactStore {
    inner: Arc<RwLock<Vec<Contact>>>,
    next_id: Arc<AtomicU64>,
    endpoint: String,
}

impl MemoryContactStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::with_contacts(Vec::new())
    }

    /// Create a memory store holding the given records
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let last_id = contacts
            .iter()
            .filter_map(|c| c.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        Self {
            inner: Arc::new(RwLock::new(contacts)),
            next_id: Arc::new(AtomicU64::new(last_id + 1)),
            endpoint: "memory://contacts".to_string(),
        }
    }

    /// Use a different endpoint name (lets tests model a retargeted hook)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Current contents of the collection
    pub async fn contacts(&self) -> Vec<Contact> {
        self.inner.read().await.clone()
    }

    /// Get the number of records in the store
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

impl Default for MemoryContactStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn list(&self) -> Result<Vec<Contact>, Error> {
        Ok(self.inner.read().await.clone())
    }

    async fn create(&self, fields: &ContactFields) -> Result<(), Error> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let mut guard = self.inner.write().await;
        guard.push(Contact::from_fields(id, fields.clone()));
        Ok(())
    }

    async fn update(&self, id: &str, patch: &ContactPatch) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        let contact = guard
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::not_found(format!("contact {}", id)))?;
        contact.apply(patch);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        let index = guard
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Error::not_found(format!("contact {}", id)))?;
        guard.remove(index);
        Ok(())
    }

    fn endpoint(&self) -> String {
        self.endpoint.clone()
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}

/// Factory for creating memory stores
pub struct MemoryContactStoreFactory;

impl ContactStoreFactory for MemoryContactStoreFactory {
    fn create(&self, config: &StoreConfig) -> Result<Box<dyn ContactStore>, Error> {
        match config {
            StoreConfig::Memory { seed } => {
                Ok(Box::new(MemoryContactStore::with_contacts(seed.clone())))
            }
            _ => Err(Error::config("Invalid config for memory store")),
        }
    }
}

// # Contact Store Trait
//
// Defines the interface to the remote contact collection.
//
// ## Implementations
//
// - REST over HTTP: `contacts-store-http` crate
// - In-process: `MemoryContactStore` (demos and tests)
//
// ## Usage
//
// ```rust,ignore
// use contacts_core::ContactStore;
//
// #[tokio::main]
// async fn main() -> contacts_core::Result<()> {
//     let store = /* ContactStore implementation */;
//
//     let contacts = store.list().await?;
//     store.delete(&contacts[0].id).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::contact::{Contact, ContactFields, ContactPatch};

/// Trait for contact store implementations
///
/// One method per remote operation. Each call maps to exactly one request
/// against the store.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Boundaries
///
/// Stores are thin request/response adapters:
///
/// - ✅ Perform the single API call for the operation
/// - ✅ Decode the store's response format
/// - ✅ Report any non-success status as an error
/// - ❌ Keep a copy of the collection (owned by `ContactSync`)
/// - ❌ Retry, back off, or re-order calls
/// - ❌ Emit user-facing notifications (owned by `ContactSync`)
/// - ❌ Distinguish failure causes for the caller: every failure is just an `Err`
///
/// The sync hook re-reads the collection after each mutation, so mutation
/// methods do not return the changed record.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Read the whole collection, in store order
    async fn list(&self) -> Result<Vec<Contact>, crate::Error>;

    /// Create a record; the store assigns its identifier
    async fn create(&self, fields: &ContactFields) -> Result<(), crate::Error>;

    /// Partially update the record with the given identifier
    async fn update(&self, id: &str, patch: &ContactPatch) -> Result<(), crate::Error>;

    /// Delete the record with the given identifier
    async fn delete(&self, id: &str) -> Result<(), crate::Error>;

    /// Address of the collection this store talks to
    ///
    /// The sync hook re-runs its initial fetch when this changes.
    fn endpoint(&self) -> String;

    /// Get the store name (for logging/debugging)
    fn store_name(&self) -> &'static str;
}

/// Helper trait for constructing contact stores from configuration
pub trait ContactStoreFactory: Send + Sync {
    /// Create a ContactStore instance from configuration
    ///
    /// # Parameters
    ///
    /// - `config`: Store configuration
    ///
    /// # Returns
    ///
    /// A boxed ContactStore trait object
    fn create(
        &self,
        config: &crate::config::StoreConfig,
    ) -> Result<Box<dyn ContactStore>, crate::Error>;
}

//! Plugin-based store registry
//!
//! The registry lets contact store backends be registered at runtime, so the
//! front end builds its store from configuration without if-else chains on
//! store types.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contacts_core::registry::StoreRegistry;
//! use contacts_core::config::StoreConfig;
//!
//! let registry = StoreRegistry::with_builtin();
//! contacts_store_http::register(&registry);
//!
//! let config = StoreConfig::Http { base_url: "https://api.example.com/contacts".into(), timeout_secs: 30 };
//! let store = registry.create_store(&config)?;
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::store::MemoryContactStoreFactory;
use crate::traits::{ContactStore, ContactStoreFactory};

/// Store registry for plugin-based contact store creation
///
/// Maps store type names to factory objects.
///
/// ## Thread Safety
///
/// The registry uses interior mutability with RwLock, allowing concurrent
/// reads and exclusive writes.
#[derive(Default)]
pub struct StoreRegistry {
    stores: RwLock<HashMap<String, Box<dyn ContactStoreFactory>>>,
}

impl StoreRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the in-process stores already registered
    pub fn with_builtin() -> Self {
        let registry = Self::new();
        registry.register_store("memory", Box::new(MemoryContactStoreFactory));
        registry
    }

    /// Register a contact store factory
    ///
    /// # Parameters
    ///
    /// - `name`: Store type name (e.g., "http", "memory")
    /// - `factory`: Factory object for creating store instances
    pub fn register_store(&self, name: impl Into<String>, factory: Box<dyn ContactStoreFactory>) {
        let name = name.into();
        let mut stores = self.stores.write().unwrap_or_else(PoisonError::into_inner);
        stores.insert(name, factory);
    }

    /// Create a contact store from configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Box<dyn ContactStore>)`: Created store instance
    /// - `Err(Error)`: If the store type is not registered or creation fails
    pub fn create_store(&self, config: &StoreConfig) -> Result<Box<dyn ContactStore>> {
        config.validate()?;

        let store_type = config.type_name();
        let stores = self.stores.read().unwrap_or_else(PoisonError::into_inner);

        let factory = stores
            .get(store_type)
            .ok_or_else(|| Error::config(format!("Unknown store type: {}", store_type)))?;

        factory.create(config)
    }

    /// List all registered store types
    pub fn list_stores(&self) -> Vec<String> {
        let stores = self.stores.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = stores.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a store type is registered
    pub fn has_store(&self, name: &str) -> bool {
        let stores = self.stores.read().unwrap_or_else(PoisonError::into_inner);
        stores.contains_key(name)
    }
}

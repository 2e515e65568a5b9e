// # contacts-core
//
// Core library for the contacts client.
//
// ## Architecture Overview
//
// - **ContactStore**: Trait for the remote contact collection (list/create/update/delete)
// - **ContactSync**: The sync hook; owns the local list and the busy flag,
//   refreshes the whole list after every mutation, reports via notifications
// - **ContactForm**: Add/edit dialog state with client-side validation
// - **ContactTable**: Client-side pagination and delete confirmation
// - **ContactShell**: Composes table and dialogs around one sync hook
// - **StoreRegistry**: Plugin-based registry for contact store backends
//
// ## Design Principles
//
// 1. **Server truth**: the local list is only ever replaced by a fresh read, never patched
// 2. **One way in**: all network I/O goes through `ContactSync`
// 3. **Failures are messages**: sync operations never return errors to the UI
// 4. **Plugin-Based**: Stores are registered dynamically, no hard-coded if-else
// 5. **Library-First**: The terminal front end is a thin layer over this crate

pub mod config;
pub mod contact;
pub mod error;
pub mod form;
pub mod registry;
pub mod shell;
pub mod store;
pub mod sync;
pub mod table;
pub mod traits;

// Re-export core types for convenience
pub use config::{ContactsConfig, FormConfig, StoreConfig, SyncConfig, TableConfig};
pub use contact::{Contact, ContactFields, ContactPatch};
pub use error::{Error, Result};
pub use form::{ContactForm, Field, FieldErrors, FormMode, SubmitOutcome};
pub use registry::StoreRegistry;
pub use shell::{ContactShell, Modal};
pub use store::MemoryContactStore;
pub use sync::{ContactSync, Notification, NotificationLevel, SyncOutcome};
pub use table::{ContactTable, DeleteOutcome, TableRow};
pub use traits::{ContactStore, ContactStoreFactory};

//! Core traits for the contacts client
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`ContactStore`]: The remote contact collection (list/create/update/delete)
//! - [`ContactStoreFactory`]: Builds stores from configuration

pub mod contact_store;

pub use contact_store::{ContactStore, ContactStoreFactory};

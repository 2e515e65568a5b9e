// # Contact Store Implementations
//
// In-process implementations of the ContactStore trait. The HTTP store
// lives in its own crate (`contacts-store-http`).

pub mod memory;

pub use memory::{MemoryContactStore, MemoryContactStoreFactory};

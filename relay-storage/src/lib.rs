//! Storage crate: the persisted relay config and repository abstractions.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – RelayConfig (channel, tracked accounts, last-seen post ids)
//! - [`repository`] – ConfigRepository trait
//! - [`json_store`] – JsonConfigStore (pretty JSON file, atomic replace)
//! - [`memory_store`] – InMemoryConfigStore (tests, dry runs)

mod error;
mod json_store;
mod memory_store;
mod models;
mod repository;

pub use error::StorageError;
pub use json_store::JsonConfigStore;
pub use memory_store::InMemoryConfigStore;
pub use models::RelayConfig;
pub use repository::ConfigRepository;

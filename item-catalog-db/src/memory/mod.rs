//! In-process store used by tests and by embedders without a database

pub mod store;

pub use store::InMemoryItemStore;

//! Inventory store.
//!
//! An insertion-ordered catalog of products keyed by product ID, with stock
//! mutations, search, valuation, expiry pruning and whole-catalog JSON
//! persistence.

pub mod inventory;
pub mod shared;
pub mod storage;

pub use inventory::Inventory;
pub use shared::SharedInventory;
pub use storage::{
    CatalogDocument, CatalogStorage, InMemoryCatalogStorage, JsonFileStorage, StorageError,
};

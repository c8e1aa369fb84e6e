//! Lock-guarded inventory handle for multi-threaded callers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use stockroom_core::DomainResult;
use stockroom_products::Product;

use crate::inventory::Inventory;

/// Cloneable handle to one [`Inventory`] behind a single mutex.
///
/// Each call takes the lock for the duration of one inventory operation; there
/// is no finer-grained locking.
#[derive(Debug, Clone, Default)]
pub struct SharedInventory {
    inner: Arc<Mutex<Inventory>>,
}

impl SharedInventory {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inner: Arc::new(Mutex::new(inventory)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inventory> {
        // Inventory methods never panic midway through a mutation, and `with`
        // closures must not either; under that contract a poisoned store is
        // still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the inventory.
    ///
    /// `f` must not panic after it has started mutating the inventory. The
    /// lock is recovered after a panic, and a half-applied change would be
    /// visible to every later caller.
    pub fn with<R>(&self, f: impl FnOnce(&mut Inventory) -> R) -> R {
        f(&mut *self.lock())
    }

    pub fn add_product(&self, product: Product) -> DomainResult<()> {
        self.lock().add_product(product)
    }

    pub fn sell_product(&self, product_id: &str, quantity: i64) -> DomainResult<()> {
        self.lock().sell_product(product_id, quantity)
    }

    pub fn restock_product(&self, product_id: &str, quantity: i64) -> DomainResult<()> {
        self.lock().restock_product(product_id, quantity)
    }

    pub fn total_value(&self) -> f64 {
        self.lock().total_value()
    }

    /// Clone of the current catalog.
    pub fn snapshot(&self) -> Inventory {
        self.lock().clone()
    }
}

impl From<Inventory> for SharedInventory {
    fn from(inventory: Inventory) -> Self {
        Self::new(inventory)
    }
}

use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use stockroom_core::{DomainError, DomainResult};
use stockroom_products::{Product, ProductKind, today};

use crate::storage::{CatalogDocument, CatalogStorage, JsonFileStorage, StorageError};

/// In-memory product catalog.
///
/// Products are owned exclusively by the inventory and kept in insertion
/// order, which is the order used for listing, search results and saved
/// documents. Product IDs are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    products: Vec<Product>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store by adding each product in order. Fails with
    /// `DuplicateProduct` on the first clashing ID.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> DomainResult<Self> {
        let mut inventory = Self::new();
        for product in products {
            inventory.add_product(product)?;
        }
        Ok(inventory)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.position(product_id).is_some()
    }

    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.product_id().as_str() == product_id)
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.products
            .iter()
            .position(|p| p.product_id().as_str() == product_id)
    }

    fn get_mut(&mut self, product_id: &str) -> DomainResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.product_id().as_str() == product_id)
            .ok_or_else(|| DomainError::not_found(product_id))
    }

    pub fn add_product(&mut self, product: Product) -> DomainResult<()> {
        if self.contains(product.product_id().as_str()) {
            return Err(DomainError::duplicate(product.product_id()));
        }
        info!(product_id = %product.product_id(), kind = %product.kind(), "product added");
        self.products.push(product);
        Ok(())
    }

    /// Remove and return the product stored under `product_id`.
    pub fn remove_product(&mut self, product_id: &str) -> DomainResult<Product> {
        let idx = self
            .position(product_id)
            .ok_or_else(|| DomainError::not_found(product_id))?;
        info!(product_id, "product removed");
        Ok(self.products.remove(idx))
    }

    pub fn sell_product(&mut self, product_id: &str, quantity: i64) -> DomainResult<()> {
        let product = self.get_mut(product_id)?;
        product.sell(quantity)?;
        debug!(
            product_id,
            quantity,
            remaining = product.quantity_in_stock(),
            "sale recorded"
        );
        Ok(())
    }

    pub fn restock_product(&mut self, product_id: &str, quantity: i64) -> DomainResult<()> {
        let product = self.get_mut(product_id)?;
        product.restock(quantity)?;
        debug!(
            product_id,
            quantity,
            stock = product.quantity_in_stock(),
            "product restocked"
        );
        Ok(())
    }

    pub fn set_price(&mut self, product_id: &str, new_price: f64) -> DomainResult<()> {
        self.get_mut(product_id)?.set_price(new_price)?;
        debug!(product_id, new_price, "price updated");
        Ok(())
    }

    /// Case-insensitive substring match on product names.
    pub fn search_by_name(&self, needle: &str) -> Vec<&Product> {
        let needle = needle.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.name().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn search_by_type(&self, kind: ProductKind) -> Vec<&Product> {
        self.products.iter().filter(|p| p.kind() == kind).collect()
    }

    pub fn list_all(&self) -> &[Product] {
        &self.products
    }

    /// Sum of price × stock over every product; `0.0` when empty.
    pub fn total_value(&self) -> f64 {
        self.products.iter().map(Product::total_value).sum()
    }

    /// Remove every grocery whose expiry date is before `today` and return the
    /// removed products in storage order. Other variants are never touched.
    pub fn remove_expired_as_of(&mut self, today: NaiveDate) -> Vec<Product> {
        let (expired, kept): (Vec<Product>, Vec<Product>) = std::mem::take(&mut self.products)
            .into_iter()
            .partition(|p| p.is_expired_on(today));
        self.products = kept;

        if !expired.is_empty() {
            info!(count = expired.len(), %today, "expired groceries pruned");
        }
        expired
    }

    pub fn remove_expired_products(&mut self) -> Vec<Product> {
        self.remove_expired_as_of(today())
    }

    /// Snapshot of the catalog as a persistence document.
    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            products: self
                .products
                .iter()
                .map(|p| p.serialize().to_json())
                .collect(),
        }
    }

    pub fn save(&self, storage: &impl CatalogStorage) -> Result<(), StorageError> {
        storage.write_document(&self.to_document())?;
        info!(count = self.products.len(), "inventory saved");
        Ok(())
    }

    /// Replace the contents of the store with the catalog held by `storage`.
    ///
    /// The document is read and parsed first; if that fails the store is left
    /// as it was. Once parsing succeeds the store is cleared and each record is
    /// decoded and added in order. A bad record or a duplicate ID aborts the
    /// load and leaves the store empty; the previous contents are not restored.
    pub fn load(&mut self, storage: &impl CatalogStorage) -> Result<(), StorageError> {
        let document = storage.read_document()?;

        self.products.clear();
        for (index, record) in document.products.into_iter().enumerate() {
            let decoded = Product::deserialize(record).and_then(|p| self.add_product(p));
            if let Err(err) = decoded {
                warn!(index, error = %err, "catalog load aborted");
                self.products.clear();
                return Err(err.into());
            }
        }

        info!(count = self.products.len(), "inventory loaded");
        Ok(())
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        self.save(&JsonFileStorage::new(path.as_ref()))
    }

    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        self.load(&JsonFileStorage::new(path.as_ref()))
    }
}

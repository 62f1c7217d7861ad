//! In-memory product store.
//!
//! # Responsibilities
//! - Own the ordered product collection
//! - Serialize list/append/find/replace against each other
//! - Offer a combined find-and-replace so edits never act on a stale index
//!
//! # Design Decisions
//! - `RwLock<Vec<Product>>`: listing is the hot path and may run concurrently
//! - Lookup is a linear scan; the catalog is small and order matters more
//! - Poisoned locks are recovered, every mutation is a single push or assignment

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use thiserror::Error;

use crate::catalog::product::{seed_products, Product};

/// Errors returned by store mutations.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    /// No product carries the requested identifier.
    #[error("product {0} not found")]
    NotFound(i64),

    /// A product with this identifier already exists.
    #[error("product {0} already exists")]
    DuplicateId(i64),

    /// The index does not address an element of the collection.
    #[error("index {index} out of range for {len} products")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Thread-safe owner of the product collection.
#[derive(Debug, Default)]
pub struct ProductStore {
    products: RwLock<Vec<Product>>,
}

impl ProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the two default entries.
    pub fn seeded() -> Self {
        Self::from_products(seed_products())
    }

    /// Create a store from an existing collection, keeping its order.
    pub fn from_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Product>> {
        self.products.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
        self.products.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the collection in insertion order.
    pub fn list(&self) -> Vec<Product> {
        self.read().clone()
    }

    /// Run `f` against a read-locked view of the collection.
    ///
    /// Writers wait until `f` returns, so `f` sees one consistent collection.
    /// Keep `f` short and never await inside it.
    pub fn view<R>(&self, f: impl FnOnce(&[Product]) -> R) -> R {
        let products = self.read();
        f(&products)
    }

    /// Number of stored products.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Add a product at the end. Identifiers are not checked for uniqueness.
    pub fn append(&self, product: Product) {
        self.write().push(product);
    }

    /// Add a product at the end unless its identifier is already taken.
    pub fn append_unique(&self, product: Product) -> Result<(), StoreError> {
        let mut products = self.write();
        if products.iter().any(|p| p.id == product.id) {
            return Err(StoreError::DuplicateId(product.id));
        }
        products.push(product);
        Ok(())
    }

    /// Position of the first product with `id`, scanning in insertion order.
    pub fn find_index_by_id(&self, id: i64) -> Option<usize> {
        position_of(&self.read(), id)
    }

    /// Overwrite the product at `index`, returning the previous entry.
    ///
    /// The index is not re-validated against an identifier; use [`update`]
    /// when the caller starts from an id.
    ///
    /// [`update`]: ProductStore::update
    pub fn replace_at(&self, index: usize, product: Product) -> Result<Product, StoreError> {
        let mut products = self.write();
        let len = products.len();
        let slot = products
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, product))
    }

    /// Replace the first product whose id matches `product.id`.
    ///
    /// Lookup and replacement happen under one write lock. The stored entry
    /// keeps its original `created_on`; `modified_on` is set to now.
    /// Returns the product as stored.
    pub fn update(&self, mut product: Product) -> Result<Product, StoreError> {
        let mut products = self.write();
        let index = position_of(&products, product.id).ok_or(StoreError::NotFound(product.id))?;

        product.created_on = products[index].created_on;
        product.modified_on = Utc::now();
        products[index] = product.clone();
        Ok(product)
    }
}

fn position_of(products: &[Product], id: i64) -> Option<usize> {
    products.iter().position(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn cappuccino() -> Product {
        Product::new(3, "Cappuccino", "Italian Coffee with Foam", 11.99, "cap001")
    }

    #[test]
    fn seeded_store_holds_defaults_in_order() {
        let store = ProductStore::seeded();
        let products = store.list();

        assert_eq!(products.len(), 2);
        let espresso = Product::new(1, "Espresso", "Bitter Coffee", 9.99, "esp001");
        let latte = Product::new(2, "Latte", "Frothy Coffee", 12.99, "lat001");
        assert!(products[0].same_content(&espresso));
        assert!(products[1].same_content(&latte));
    }

    #[test]
    fn append_keeps_insertion_order_and_allows_duplicates() {
        let store = ProductStore::seeded();
        store.append(cappuccino());
        store.append(Product::new(1, "Espresso Again", "Duplicate", 1.0, "dup"));

        let ids: Vec<i64> = store.list().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 1]);
        // First match wins.
        assert_eq!(store.find_index_by_id(1), Some(0));
    }

    #[test]
    fn append_unique_rejects_taken_id() {
        let store = ProductStore::seeded();
        assert_eq!(store.append_unique(cappuccino()), Ok(()));
        assert_eq!(
            store.append_unique(Product::new(2, "Mocha", "", 1.0, "m")),
            Err(StoreError::DuplicateId(2))
        );
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn find_index_reports_missing_id() {
        let store = ProductStore::seeded();
        assert_eq!(store.find_index_by_id(2), Some(1));
        assert_eq!(store.find_index_by_id(42), None);
        assert!(ProductStore::new().find_index_by_id(1).is_none());
    }

    #[test]
    fn replace_at_overwrites_single_slot() {
        let store = ProductStore::seeded();
        let previous = store
            .replace_at(0, Product::new(1, "Ristretto", "Short", 8.5, "ris001"))
            .unwrap();

        assert_eq!(previous.name, "Espresso");
        let products = store.list();
        assert_eq!(products[0].name, "Ristretto");
        assert_eq!(products[1].name, "Latte");
    }

    #[test]
    fn replace_at_out_of_range() {
        let store = ProductStore::seeded();
        let err = store.replace_at(5, cappuccino()).unwrap_err();
        assert_eq!(err, StoreError::IndexOutOfRange { index: 5, len: 2 });
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn update_preserves_created_on_and_position() {
        let store = ProductStore::seeded();
        let original = store.list()[0].clone();
        let original_latte = store.list()[1].clone();

        let replacement = Product::new(1, "Espresso Updated", "Strong", 10.99, "esp001");
        let stored = store.update(replacement.clone()).unwrap();
        assert!(stored.same_content(&replacement));

        assert_eq!(stored.created_on, original.created_on);
        assert!(stored.modified_on >= original.modified_on);

        let products = store.list();
        assert_eq!(products.len(), 2);
        assert!(products[0].same_content(&replacement));
        assert!(products[1].same_content(&original_latte));
    }

    #[test]
    fn update_unknown_id_leaves_store_untouched() {
        let store = ProductStore::seeded();
        let before = store.list();

        let err = store.update(Product::new(99, "Ghost", "", 0.0, "")).unwrap_err();

        assert_eq!(err, StoreError::NotFound(99));
        assert_eq!(store.list(), before);
    }

    #[test]
    fn view_sees_whole_collection() {
        let store = ProductStore::seeded();
        let names = store.view(|products| {
            products.iter().map(|p| p.name.clone()).collect::<Vec<_>>()
        });
        assert_eq!(names, vec!["Espresso", "Latte"]);
    }

    #[test]
    fn concurrent_appends_are_not_lost() {
        let store = Arc::new(ProductStore::seeded());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        let id = 1000 + t * 100 + i;
                        store.append(Product::new(id, "p", "d", 1.0, "s"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut ids: Vec<i64> = store.list().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 802);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 802);
    }
}

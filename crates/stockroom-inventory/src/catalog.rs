//! The product catalog.
//!
//! Products are keyed by ID and iterate in insertion order. Deleting a
//! product keeps the relative order of the rest.

use indexmap::IndexMap;
use indexmap::map::Entry;
use stockroom_core::Product;

use crate::error::InventoryError;

/// Mapping from product ID to product record.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    products: IndexMap<String, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product under its ID.
    pub fn insert(&mut self, product: Product) -> Result<(), InventoryError> {
        match self.products.entry(product.product_id.clone()) {
            Entry::Occupied(entry) => Err(InventoryError::duplicate_product(entry.key())),
            Entry::Vacant(entry) => {
                entry.insert(product);
                Ok(())
            }
        }
    }

    pub fn get(&self, product_id: &str) -> Option<&Product> {
        self.products.get(product_id)
    }

    pub fn get_mut(&mut self, product_id: &str) -> Option<&mut Product> {
        self.products.get_mut(product_id)
    }

    /// Remove a product, returning it.
    pub fn remove(&mut self, product_id: &str) -> Result<Product, InventoryError> {
        self.products
            .shift_remove(product_id)
            .ok_or_else(|| InventoryError::not_found(product_id))
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.products.contains_key(product_id)
    }

    /// All products in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Products whose name or category contains `keyword`, ignoring case.
    ///
    /// The results borrow the catalog only, not `keyword`.
    pub fn search<'a>(&'a self, keyword: &str) -> impl Iterator<Item = &'a Product> + use<'a> {
        let needle = keyword.to_lowercase();
        self.products
            .values()
            .filter(move |p| p.matches_lowercase(&needle))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

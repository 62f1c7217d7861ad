//! Product entity and the startup seed data.

use chrono::{DateTime, Utc};

/// A catalog entry as held by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Caller-supplied identifier.
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub sku: String,
    /// When the entry was first stored.
    pub created_on: DateTime<Utc>,
    /// When the entry was last written.
    pub modified_on: DateTime<Utc>,
}

impl Product {
    /// Create a product stamped with the current time.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        sku: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            description: description.into(),
            price,
            sku: sku.into(),
            created_on: now,
            modified_on: now,
        }
    }

    /// True when the caller-visible fields match, ignoring timestamps.
    pub fn same_content(&self, other: &Product) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.description == other.description
            && self.price == other.price
            && self.sku == other.sku
    }
}

/// The two entries every fresh catalog starts with.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::new(1, "Espresso", "Bitter Coffee", 9.99, "esp001"),
        Product::new(2, "Latte", "Frothy Coffee", 12.99, "lat001"),
    ]
}

//! Product records and typed update requests.
//!
//! Updates name their targets through [`ProductField`]; there is no dynamic
//! attribute dispatch, so a field name that is not listed here can never
//! reach a product.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique key within the catalog.
    pub product_id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock_quantity: u64,
}

impl Product {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        stock_quantity: u64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            category: category.into(),
            price,
            stock_quantity,
        }
    }

    /// Case-insensitive substring match against name or category.
    ///
    /// `needle` must already be lowercase. An empty needle matches every
    /// product.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }

    /// Whether the stock is at or below `threshold`.
    pub fn is_low_stock(&self, threshold: u64) -> bool {
        self.stock_quantity <= threshold
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Category: {}, Price: ${:.2}, Stock: {}",
            self.product_id, self.name, self.category, self.price, self.stock_quantity
        )
    }
}

/// Error produced when a field name does not name an updatable attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown product field '{0}' (expected one of: name, category, price, stock_quantity)")]
pub struct FieldError(pub String);

/// Attributes an admin may change through an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Name,
    Category,
    Price,
    StockQuantity,
}

impl ProductField {
    pub const ALL: [ProductField; 4] = [
        ProductField::Name,
        ProductField::Category,
        ProductField::Price,
        ProductField::StockQuantity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Name => "name",
            ProductField::Category => "category",
            ProductField::Price => "price",
            ProductField::StockQuantity => "stock_quantity",
        }
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ProductField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FieldError(s.to_string()))
    }
}

/// A partial update to a product. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u64>,
}

impl ProductUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn stock_quantity(mut self, quantity: u64) -> Self {
        self.stock_quantity = Some(quantity);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.stock_quantity.is_none()
    }

    /// Fields carried by this update, in declaration order.
    pub fn fields(&self) -> Vec<ProductField> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push(ProductField::Name);
        }
        if self.category.is_some() {
            fields.push(ProductField::Category);
        }
        if self.price.is_some() {
            fields.push(ProductField::Price);
        }
        if self.stock_quantity.is_some() {
            fields.push(ProductField::StockQuantity);
        }
        fields
    }

    /// Write every present field onto `product`.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(ref name) = self.name {
            product.name = name.clone();
        }
        if let Some(ref category) = self.category {
            product.category = category.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(quantity) = self.stock_quantity {
            product.stock_quantity = quantity;
        }
    }
}

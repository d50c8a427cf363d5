//! Product records.

use serde::{Deserialize, Serialize};

use super::ProductId;
use crate::store::Record;

/// Name given to a product created without one.
pub const DEFAULT_PRODUCT_NAME: &str = "新产品";

/// A product in the mock store.
///
/// `price` is a plain float; the fixture never does arithmetic on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

impl Product {
    /// Create a product with every field given.
    #[must_use]
    pub fn new(id: i64, name: &str, price: f64, stock: i64) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.to_string(),
            price,
            stock,
        }
    }
}

/// Client-supplied product fields for create (POST) and merge (PUT).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductFields {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

impl Record for Product {
    type Id = ProductId;
    type Fields = ProductFields;

    fn id(&self) -> ProductId {
        self.id
    }

    fn create(id: ProductId, fields: ProductFields) -> Self {
        Self {
            id,
            name: fields
                .name
                .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string()),
            price: fields.price.unwrap_or(0.0),
            stock: fields.stock.unwrap_or(0),
        }
    }

    fn merge(&mut self, fields: ProductFields) {
        if let Some(name) = fields.name {
            self.name = name;
        }
        if let Some(price) = fields.price {
            self.price = price;
        }
        if let Some(stock) = fields.stock {
            self.stock = stock;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_applies_defaults() {
        let product = Product::create(ProductId::new(3), ProductFields::default());
        assert_eq!(product, Product::new(3, DEFAULT_PRODUCT_NAME, 0.0, 0));
    }

    #[test]
    fn test_integer_price_is_accepted() {
        let fields: ProductFields = serde_json::from_str(r#"{"price": 10}"#).unwrap();
        assert_eq!(fields.price, Some(10.0));
    }

    #[test]
    fn test_fractional_stock_is_rejected() {
        assert!(serde_json::from_str::<ProductFields>(r#"{"stock": 1.5}"#).is_err());
    }

    #[test]
    fn test_merge_keeps_id() {
        let mut product = Product::new(2, "产品B", 199.99, 50);
        product.merge(ProductFields {
            name: Some("Renamed".to_string()),
            stock: Some(0),
            ..ProductFields::default()
        });
        assert_eq!(product, Product::new(2, "Renamed", 199.99, 0));
    }
}

//! Product value type as delivered by the catalog API.
//!
//! Products are immutable once received. The store keeps copies in `items`,
//! `searchResults` and `selected`; none of them own a canonical entry.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Ids arrive as strings or as integers depending on the backend.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// Type-safe identifier for Products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(#[serde(deserialize_with = "string_or_number")] pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a top-level category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(#[serde(deserialize_with = "string_or_number")] pub String);

impl CategoryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CategoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Identifier of a subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubcategoryId(#[serde(deserialize_with = "string_or_number")] pub String);

impl SubcategoryId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SubcategoryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A product in the catalog.
///
/// Field names follow the server's wire format (`product_name`, `stock_qty`,
/// `category_id`, `sub_category_id`, `status`); the short names are accepted as
/// aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "product_name", alias = "name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(rename = "stock_qty", alias = "stock", default)]
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "category_id", alias = "category", default)]
    pub category: Option<CategoryId>,
    #[serde(rename = "sub_category_id", alias = "subcategory", default)]
    pub subcategory: Option<SubcategoryId>,
    #[serde(rename = "status", alias = "is_active", default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

impl Product {
    /// Creates an active, uncategorized product.
    ///
    /// # Arguments
    /// * `id` - Unique identifier
    /// * `name` - Display name
    /// * `price` - Unit price
    /// * `stock` - Units available
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            price,
            stock,
            image_url: None,
            category: None,
            subcategory: None,
            is_active: true,
        }
    }

    pub fn in_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn in_subcategory(mut self, subcategory: impl Into<SubcategoryId>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// Checks the value constraints the wire format cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!("product {} has invalid price {}", self.id, self.price));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_server_wire_format() {
        let product: Product = serde_json::from_value(json!({
            "id": "4f1c",
            "product_name": "Velvet Lipstick",
            "description": null,
            "price": 12.5,
            "stock_qty": 40,
            "image_url": "https://img/lip.png",
            "category_id": "makeup",
            "sub_category_id": "lips",
            "status": true
        }))
        .unwrap();

        assert_eq!(product.id, ProductId::from("4f1c"));
        assert_eq!(product.name, "Velvet Lipstick");
        assert_eq!(product.stock, 40);
        assert_eq!(product.category, Some(CategoryId::from("makeup")));
        assert_eq!(product.subcategory, Some(SubcategoryId::from("lips")));
        assert!(product.is_active);
    }

    #[test]
    fn test_decodes_short_names_and_defaults() {
        let product: Product = serde_json::from_value(json!({
            "id": "1",
            "name": "Lipstick"
        }))
        .unwrap();

        assert_eq!(product.name, "Lipstick");
        assert_eq!(product.stock, 0);
        assert!(product.is_active);
        assert!(product.category.is_none());
    }

    #[test]
    fn test_numeric_ids_are_accepted() {
        let product: Product = serde_json::from_value(json!({
            "id": 1,
            "name": "Lipstick",
            "category_id": 3
        }))
        .unwrap();

        assert_eq!(product.id, ProductId::from(1));
        assert_eq!(product.category, Some(CategoryId::from("3")));
    }

    #[test]
    fn test_negative_stock_is_rejected_by_decoder() {
        let result = serde_json::from_value::<Product>(json!({
            "id": "1",
            "product_name": "Broken",
            "stock_qty": -3
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(Product::new(1, "Blush", 9.99, 3).validate().is_ok());
        assert!(Product::new(1, "Blush", 0.0, 3).validate().is_ok());
        assert!(Product::new(1, "Blush", -0.01, 3).validate().is_err());
        assert!(Product::new(1, "Blush", f64::NAN, 3).validate().is_err());
    }
}

//! Domain models for the storefront.
//!
//! [`Product`] mirrors a catalog API record. Catalog records are parsed
//! leniently: a field with a missing or malformed value is dropped on its own
//! (rendered as absent) instead of failing the whole record. Only the `id` is
//! mandatory, since nothing can be added to a cart without one.

use fakestore_core::{Category, Price, ProductId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A product as published by the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Empty when the record has no usable title.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<Price>,
    /// Empty when the record has no usable description.
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    /// `None` for missing or unrecognised categories.
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub rating: Option<Rating>,
}

/// Aggregate customer rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

/// A cart line entry, keyed by product id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: Option<String>,
    /// Always at least 1 while the item is in a cart.
    pub qty: u32,
}

impl CartItem {
    /// Build a cart line for `product` with the given quantity.
    ///
    /// A product without a price is carried at zero.
    #[must_use]
    pub fn from_product(product: &Product, qty: u32) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price.unwrap_or_default(),
            image: product.image.clone(),
            qty,
        }
    }

    /// Price of this line (`price * qty`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price * self.qty
    }
}

impl From<&Product> for CartItem {
    fn from(product: &Product) -> Self {
        Self::from_product(product, 1)
    }
}

/// Deserialize any value, keeping it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    lenient::<D, String>(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_complete_record() {
        let product: Product = serde_json::from_value(json!({
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 109.95,
            "description": "Your perfect pack",
            "category": "men's clothing",
            "image": "https://example.com/1.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }))
        .unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.title, "Fjallraven Backpack");
        assert_eq!(product.price, Some(Price::from_cents(10995)));
        assert_eq!(product.category, Some(Category::MensClothing));
        assert_eq!(product.rating.unwrap().count, 120);
    }

    #[test]
    fn test_parse_degrades_per_field() {
        let product: Product = serde_json::from_value(json!({
            "id": 2,
            "title": 42,
            "price": "not a number",
            "category": "furniture",
            "image": null
        }))
        .unwrap();

        assert_eq!(product.id, ProductId::new(2));
        assert!(product.title.is_empty());
        assert!(product.description.is_empty());
        assert_eq!(product.price, None);
        assert_eq!(product.category, None);
        assert_eq!(product.image, None);
        assert_eq!(product.rating, None);
    }

    #[test]
    fn test_parse_requires_id() {
        let result = serde_json::from_value::<Product>(json!({ "title": "No id" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_cart_item_from_product() {
        let product: Product = serde_json::from_value(json!({
            "id": 4, "title": "Ring", "price": 250, "image": "ring.jpg"
        }))
        .unwrap();

        let item = CartItem::from(&product);
        assert_eq!(item.id, ProductId::new(4));
        assert_eq!(item.qty, 1);
        assert_eq!(item.price, Price::from_dollars(250));
        assert_eq!(item.image.as_deref(), Some("ring.jpg"));

        let item = CartItem::from_product(&product, 3);
        assert_eq!(item.line_total(), Price::from_dollars(750));
    }
}

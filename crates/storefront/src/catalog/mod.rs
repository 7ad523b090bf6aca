//! Product catalog: API client and the view models fed by it.
//!
//! # Architecture
//!
//! - [`CatalogClient`] issues plain `GET` requests against the catalog API
//!   (`/products` and `/products/{id}`)
//! - [`CatalogViewModel`] holds the full listing and its load status, shared
//!   by every visitor
//! - [`CategorySelection`] is one visitor's category filter over that listing
//! - [`ProductDetailViewModel`] holds fetched products keyed by route id
//!
//! Both view models follow `Idle -> Loading -> Loaded` (per id for details).
//! A fetch is started with `begin_load`, which hands out a [`LoadTicket`];
//! the result is only accepted by `finish_load` when that ticket is still
//! current, so a stale response can never overwrite newer state.

mod client;
mod detail;
mod listing;

pub use client::CatalogClient;
pub use detail::ProductDetailViewModel;
pub use listing::{CatalogViewModel, CategorySelection};

use fakestore_core::ProductId;
use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("catalog API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API has no product with this id.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// The configured base URL cannot be joined with an API path.
    #[error("Invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Load status shared by the catalog view models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight (or failed; there is no retry).
    Loading,
    /// Data is available.
    Loaded,
}

/// Proof that a fetch was started by a view model.
///
/// Tickets are only created by `begin_load`; a ticket whose generation no
/// longer matches the view model is stale and its result is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    product_id: Option<ProductId>,
}

impl LoadTicket {
    const fn new(generation: u64, product_id: Option<ProductId>) -> Self {
        Self {
            generation,
            product_id,
        }
    }

    /// Product this load is for, when keyed by id.
    #[must_use]
    pub const fn product_id(&self) -> Option<ProductId> {
        self.product_id
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use fakestore_core::{Category, Price, ProductId};

    use crate::models::Product;

    /// One product per category, ids 1..=4.
    pub fn products() -> Vec<Product> {
        Category::ALL
            .into_iter()
            .zip(1..)
            .map(|(category, id)| product(id, category))
            .collect()
    }

    pub fn product(id: i32, category: Category) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Test Product {id}"),
            price: Some(Price::from_dollars(50 + i64::from(id) * 50)),
            description: format!("Description {id}"),
            category: Some(category),
            image: Some(format!("image{id}.jpg")),
            rating: None,
        }
    }
}

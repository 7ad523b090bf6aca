//! Catalog API client implementation.
//!
//! Uses `reqwest` for HTTP and parses listings record by record so that one
//! malformed product cannot take down the whole page.

use std::sync::Arc;

use fakestore_core::ProductId;
use serde_json::Value;
use tracing::{instrument, warn};
use url::Url;

use super::CatalogError;
use crate::models::Product;

/// Maximum number of response body characters kept in logs and errors.
const BODY_PREVIEW_CHARS: usize = 200;

/// Client for the public catalog API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a client for the API rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Fetch the full product listing.
    ///
    /// Records that cannot be read as a product (no usable `id`) are skipped
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a
    /// non-success status, or the body is not a JSON array.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let body = self.get("products").await?;
        let records: Vec<Value> = serde_json::from_str(&body)?;

        let total = records.len();
        let products: Vec<Product> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!(index, error = %e, "Skipping malformed catalog record");
                    None
                }
            })
            .collect();

        tracing::debug!(total, kept = products.len(), "Fetched product listing");
        Ok(products)
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the API has no such product
    /// (a 404 or an empty body), or another error if the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let body = match self.get(&format!("products/{id}")).await {
            Err(CatalogError::Status { status: 404, .. }) => {
                return Err(CatalogError::NotFound(id));
            }
            other => other?,
        };

        // The public API answers unknown ids with `200` and an empty body.
        if body.trim().is_empty() || body.trim() == "null" {
            return Err(CatalogError::NotFound(id));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// `GET` a path relative to the base URL and return the body text.
    async fn get(&self, path: &str) -> Result<String, CatalogError> {
        let url = join(&self.inner.base_url, path)?;
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            let preview = preview(&body);
            tracing::error!(
                status = %status,
                body = %preview,
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: preview,
            });
        }

        Ok(body)
    }
}

/// Join `path` onto `base`, keeping any path prefix the base already has.
fn join(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    if base.path().ends_with('/') {
        base.join(path)
    } else {
        Url::parse(&format!("{}/", base.as_str()))?.join(path)
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_join_bare_host() {
        let base = Url::parse("https://fakestoreapi.com").unwrap();
        assert_eq!(
            join(&base, "products").unwrap().as_str(),
            "https://fakestoreapi.com/products"
        );
    }

    #[test]
    fn test_join_keeps_path_prefix() {
        let base = Url::parse("http://127.0.0.1:8080/api").unwrap();
        assert_eq!(
            join(&base, "products/3").unwrap().as_str(),
            "http://127.0.0.1:8080/api/products/3"
        );

        let base = Url::parse("http://127.0.0.1:8080/api/").unwrap();
        assert_eq!(
            join(&base, "products").unwrap().as_str(),
            "http://127.0.0.1:8080/api/products"
        );
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(500);
        assert_eq!(preview(&long).len(), BODY_PREVIEW_CHARS);
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn test_debug_shows_base_url() {
        let client = CatalogClient::new(Url::parse("https://fakestoreapi.com").unwrap());
        assert!(format!("{client:?}").contains("fakestoreapi.com"));
    }
}

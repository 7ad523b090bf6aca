//! Application state shared across handlers.
//!
//! Both catalog view models are created once at start-up and shared by every
//! visitor through [`AppState`]. Each sits behind its own async mutex, so
//! every intent runs to completion before the next one on the same model is
//! applied. Carts are per visitor and live in the session store instead.

use std::sync::Arc;

use fakestore_core::ProductId;
use tokio::sync::Mutex;
use tower_sessions::MemoryStore;

use crate::catalog::{CatalogClient, CatalogViewModel, ProductDetailViewModel};
use crate::config::StorefrontConfig;
use crate::models::Product;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog_client: CatalogClient,
    session_store: MemoryStore,
    catalog: Mutex<CatalogViewModel>,
    product_detail: Mutex<ProductDetailViewModel>,
}

impl AppState {
    /// Create a new application state with no sessions and an idle catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog_client = CatalogClient::new(config.catalog_api_url.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog_client,
                session_store: MemoryStore::default(),
                catalog: Mutex::new(CatalogViewModel::new()),
                product_detail: Mutex::new(ProductDetailViewModel::new()),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog_client(&self) -> &CatalogClient {
        &self.inner.catalog_client
    }

    /// Store holding every visitor's session.
    #[must_use]
    pub fn session_store(&self) -> &MemoryStore {
        &self.inner.session_store
    }

    /// The product listing view model.
    #[must_use]
    pub fn catalog(&self) -> &Mutex<CatalogViewModel> {
        &self.inner.catalog
    }

    /// The product detail view model.
    #[must_use]
    pub fn product_detail(&self) -> &Mutex<ProductDetailViewModel> {
        &self.inner.product_detail
    }

    /// Mount the product listing.
    ///
    /// The first call starts the one and only listing fetch in the background;
    /// later calls do nothing. Failures are logged and recorded on the view
    /// model, which stays in `Loading`.
    pub async fn mount_catalog(&self) {
        let Some(ticket) = self.inner.catalog.lock().await.begin_load() else {
            return;
        };

        let state = self.clone();
        tokio::spawn(async move {
            let result = state.catalog_client().fetch_products().await;
            let mut catalog = state.catalog().lock().await;
            match result {
                Ok(products) => {
                    catalog.finish_load(ticket, products);
                }
                Err(e) => {
                    catalog.fail_load(ticket, e.to_string());
                }
            }
        });
    }

    /// Mount the detail view for `id`, fetching it in the background unless
    /// it is already loading or loaded.
    pub async fn mount_product(&self, id: ProductId) {
        let Some(ticket) = self.inner.product_detail.lock().await.begin_load(id) else {
            return;
        };

        let state = self.clone();
        tokio::spawn(async move {
            let result = state.catalog_client().fetch_product(id).await;
            let mut detail = state.product_detail().lock().await;
            match result {
                Ok(product) => {
                    detail.finish_load(ticket, product);
                }
                Err(e) => {
                    detail.fail_load(ticket, e.to_string());
                }
            }
        });
    }

    /// Look up a fetched product in either view model.
    pub async fn find_product(&self, id: ProductId) -> Option<Product> {
        if let Some(product) = self.inner.product_detail.lock().await.product(id) {
            return Some(product.clone());
        }
        self.inner.catalog.lock().await.find(id).cloned()
    }
}

//! Single-product view model.

use std::collections::HashMap;

use fakestore_core::ProductId;
use tracing::{debug, error, warn};

use super::{LoadStatus, LoadTicket};
use crate::models::Product;

/// Most product ids tracked at once.
const MAX_ENTRIES: usize = 256;

#[derive(Debug, Clone, Default)]
struct DetailEntry {
    product: Option<Product>,
    status: LoadStatus,
    generation: u64,
    last_error: Option<String>,
}

/// State of the product detail view, one entry per product id.
///
/// Each id is fetched at most once while its entry is loading or loaded, so
/// visitors opening different products never cancel each other's fetches.
#[derive(Debug, Clone, Default)]
pub struct ProductDetailViewModel {
    entries: HashMap<ProductId, DetailEntry>,
    generation: u64,
}

impl ProductDetailViewModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount the view for `id`.
    ///
    /// Returns the ticket for a new fetch, or `None` when `id` is already
    /// loading or loaded.
    pub fn begin_load(&mut self, id: ProductId) -> Option<LoadTicket> {
        if self
            .entries
            .get(&id)
            .is_some_and(|entry| entry.status != LoadStatus::Idle)
        {
            return None;
        }
        if !self.entries.contains_key(&id) && self.entries.len() >= MAX_ENTRIES {
            self.evict();
        }

        self.generation += 1;
        self.entries.insert(
            id,
            DetailEntry {
                product: None,
                status: LoadStatus::Loading,
                generation: self.generation,
                last_error: None,
            },
        );
        debug!(product_id = %id, generation = self.generation, "Product load started");
        Some(LoadTicket::new(self.generation, Some(id)))
    }

    /// Drop entries that are not loaded, or everything if that frees nothing.
    fn evict(&mut self) {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.status == LoadStatus::Loaded);
        if self.entries.len() >= MAX_ENTRIES {
            self.entries.clear();
        }
        warn!(
            evicted = before - self.entries.len(),
            "Product detail cache full"
        );
    }

    /// Store the fetched product. Returns `false` for a stale ticket.
    pub fn finish_load(&mut self, ticket: LoadTicket, product: Product) -> bool {
        let Some(entry) = self.current_entry(ticket) else {
            debug!(
                product_id = ?ticket.product_id,
                "Ignoring product from superseded request"
            );
            return false;
        };
        entry.product = Some(product);
        entry.status = LoadStatus::Loaded;
        true
    }

    /// Record a failed fetch; the entry stays in `Loading`.
    pub fn fail_load(&mut self, ticket: LoadTicket, message: impl Into<String>) -> bool {
        let Some(entry) = self.current_entry(ticket) else {
            return false;
        };
        let message = message.into();
        error!(product_id = ?ticket.product_id, error = %message, "Failed to load product");
        entry.last_error = Some(message);
        true
    }

    fn current_entry(&mut self, ticket: LoadTicket) -> Option<&mut DetailEntry> {
        let id = ticket.product_id?;
        self.entries.get_mut(&id).filter(|entry| {
            entry.generation == ticket.generation && entry.status == LoadStatus::Loading
        })
    }

    /// Status of the view for `id`; `Idle` until it is first mounted.
    #[must_use]
    pub fn status(&self, id: ProductId) -> LoadStatus {
        self.entries
            .get(&id)
            .map_or(LoadStatus::Idle, |entry| entry.status)
    }

    /// Whether the view is loading `id`.
    #[must_use]
    pub fn is_loading(&self, id: ProductId) -> bool {
        self.status(id) == LoadStatus::Loading
    }

    /// The loaded product for `id`.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.entries.get(&id).and_then(|entry| entry.product.as_ref())
    }

    /// Message of the last failed fetch for `id`.
    #[must_use]
    pub fn last_error(&self, id: ProductId) -> Option<&str> {
        self.entries
            .get(&id)
            .and_then(|entry| entry.last_error.as_deref())
    }
}

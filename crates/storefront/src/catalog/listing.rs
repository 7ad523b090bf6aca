//! Product listing view model.

use fakestore_core::{CategoryFilter, ProductId};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{LoadStatus, LoadTicket};
use crate::models::Product;

/// Listing state shared by every visitor: fetched products and load status.
///
/// The product list is fetched once and never cleared. Which category a
/// visitor is looking at lives in their own [`CategorySelection`].
#[derive(Debug, Clone, Default)]
pub struct CatalogViewModel {
    products: Vec<Product>,
    status: LoadStatus,
    generation: u64,
    last_error: Option<String>,
}

impl CatalogViewModel {
    /// Create an idle listing with no products.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount the listing.
    ///
    /// The first call moves `Idle -> Loading` and returns the ticket for the
    /// single fetch to issue. Later calls return `None`: the listing is either
    /// already loading or loaded.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.status != LoadStatus::Idle {
            return None;
        }
        self.generation += 1;
        self.status = LoadStatus::Loading;
        debug!(generation = self.generation, "Product listing load started");
        Some(LoadTicket::new(self.generation, None))
    }

    /// Store the fetched products and move to `Loaded`.
    ///
    /// Returns `false` (and changes nothing) for a stale ticket.
    pub fn finish_load(&mut self, ticket: LoadTicket, products: Vec<Product>) -> bool {
        if !self.is_current(ticket) {
            debug!(generation = ticket.generation, "Ignoring stale product listing");
            return false;
        }
        info!(count = products.len(), "Product listing loaded");
        self.products = products;
        self.status = LoadStatus::Loaded;
        self.last_error = None;
        true
    }

    /// Record a failed fetch.
    ///
    /// The listing stays in `Loading`; the message is kept so views can show
    /// that loading is stuck. Returns `false` for a stale ticket.
    pub fn fail_load(&mut self, ticket: LoadTicket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let message = message.into();
        error!(error = %message, "Failed to load product listing");
        self.last_error = Some(message);
        true
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.generation == self.generation && self.status == LoadStatus::Loading
    }

    #[must_use]
    pub const fn status(&self) -> LoadStatus {
        self.status
    }

    /// Whether skeletons should be shown instead of products.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Message of the last failed fetch, while still loading.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Every fetched product, in API order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products passing `filter`, in API order.
    #[must_use]
    pub fn products_in(&self, filter: CategoryFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| filter.matches(product.category))
            .collect()
    }

    /// Product with the given id, if loaded.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }
}

/// One visitor's category selection over the shared listing.
///
/// Kept in the visitor's session; starts at `All`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySelection {
    selected: CategoryFilter,
}

impl CategorySelection {
    /// Select a category. Never triggers a fetch.
    pub fn set_category(&mut self, filter: CategoryFilter) {
        self.selected = filter;
    }

    #[must_use]
    pub const fn selected(&self) -> CategoryFilter {
        self.selected
    }

    /// Products of `catalog` passing the selected filter, in API order.
    #[must_use]
    pub fn filtered_products<'a>(&self, catalog: &'a CatalogViewModel) -> Vec<&'a Product> {
        catalog.products_in(self.selected)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fakestore_core::Category;

    use super::*;
    use crate::catalog::fixtures;

    fn loaded() -> CatalogViewModel {
        let mut vm = CatalogViewModel::new();
        let ticket = vm.begin_load().unwrap();
        assert!(vm.finish_load(ticket, fixtures::products()));
        vm
    }

    fn titles(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.title.clone()).collect()
    }

    #[test]
    fn test_starts_idle() {
        let vm = CatalogViewModel::new();
        assert_eq!(vm.status(), LoadStatus::Idle);
        assert!(!vm.is_loading());
        assert!(vm.products().is_empty());
        assert_eq!(CategorySelection::default().selected(), CategoryFilter::All);
    }

    #[test]
    fn test_begin_load_issues_one_fetch() {
        let mut vm = CatalogViewModel::new();
        assert!(vm.begin_load().is_some());
        assert!(vm.is_loading());
        assert!(vm.begin_load().is_none());
    }

    #[test]
    fn test_finish_load() {
        let vm = loaded();
        assert_eq!(vm.status(), LoadStatus::Loaded);
        assert!(!vm.is_loading());
        assert_eq!(vm.products().len(), 4);
    }

    #[test]
    fn test_mount_after_loaded_does_not_refetch() {
        let mut vm = loaded();
        assert!(vm.begin_load().is_none());
        assert_eq!(vm.status(), LoadStatus::Loaded);
    }

    #[test]
    fn test_failed_load_stays_loading_with_error() {
        let mut vm = CatalogViewModel::new();
        let ticket = vm.begin_load().unwrap();
        assert!(vm.fail_load(ticket, "connection refused"));

        assert!(vm.is_loading());
        assert_eq!(vm.last_error(), Some("connection refused"));
        assert!(vm.begin_load().is_none());
    }

    #[test]
    fn test_result_after_loaded_is_ignored() {
        let mut vm = CatalogViewModel::new();
        let ticket = vm.begin_load().unwrap();
        assert!(vm.finish_load(ticket, fixtures::products()));

        assert!(!vm.finish_load(ticket, Vec::new()));
        assert!(!vm.fail_load(ticket, "late failure"));
        assert_eq!(vm.products().len(), 4);
        assert_eq!(vm.last_error(), None);
    }

    #[test]
    fn test_all_filter_returns_everything_in_order() {
        let vm = loaded();
        assert_eq!(
            titles(&CategorySelection::default().filtered_products(&vm)),
            vec!["Test Product 1", "Test Product 2", "Test Product 3", "Test Product 4"]
        );
    }

    #[test]
    fn test_category_filter() {
        let vm = loaded();
        let mut selection = CategorySelection::default();
        selection.set_category(CategoryFilter::Only(Category::Electronics));

        assert_eq!(titles(&selection.filtered_products(&vm)), vec!["Test Product 4"]);
        // The source list is untouched.
        assert_eq!(vm.products().len(), 4);
        assert_eq!(vm.status(), LoadStatus::Loaded);
    }

    #[test]
    fn test_each_category_filter_only_contains_that_category() {
        let mut products = fixtures::products();
        products.push(fixtures::product(5, Category::Jewelery));
        let mut vm = CatalogViewModel::new();
        let ticket = vm.begin_load().unwrap();
        vm.finish_load(ticket, products);

        let mut selection = CategorySelection::default();
        for category in Category::ALL {
            selection.set_category(category.into());
            let filtered = selection.filtered_products(&vm);
            assert!(!filtered.is_empty());
            assert!(filtered.iter().all(|p| p.category == Some(category)));
        }
        selection.set_category(Category::Jewelery.into());
        assert_eq!(selection.filtered_products(&vm).len(), 2);
    }

    #[test]
    fn test_set_category_while_loading_does_not_refetch() {
        let mut vm = CatalogViewModel::new();
        let ticket = vm.begin_load().unwrap();
        let mut selection = CategorySelection::default();
        selection.set_category(Category::MensClothing.into());
        assert!(vm.is_loading());
        assert!(selection.filtered_products(&vm).is_empty());

        assert!(vm.finish_load(ticket, fixtures::products()));
        assert_eq!(titles(&selection.filtered_products(&vm)), vec!["Test Product 1"]);
    }

    #[test]
    fn test_uncategorised_products_only_show_under_all() {
        let mut product = fixtures::product(9, Category::Electronics);
        product.category = None;
        let mut vm = CatalogViewModel::new();
        let ticket = vm.begin_load().unwrap();
        vm.finish_load(ticket, vec![product]);

        assert_eq!(vm.products_in(CategoryFilter::All).len(), 1);
        for category in Category::ALL {
            assert!(vm.products_in(category.into()).is_empty());
        }
    }

    #[test]
    fn test_find() {
        let vm = loaded();
        assert_eq!(vm.find(ProductId::new(2)).unwrap().title, "Test Product 2");
        assert!(vm.find(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_selections_are_independent() {
        let vm = loaded();
        let mut first = CategorySelection::default();
        let second = CategorySelection::default();
        first.set_category(Category::Electronics.into());

        assert_eq!(first.filtered_products(&vm).len(), 1);
        assert_eq!(second.filtered_products(&vm).len(), 4);
    }
}

//! Display data for templates.
//!
//! Templates only see plain strings and numbers; everything that needs a
//! decision (truncation, price formatting, absent fields) happens here.

use fakestore_core::CategoryFilter;

use crate::cart::CartStore;
use crate::catalog::{CatalogViewModel, CategorySelection};
use crate::models::{CartItem, Product};

/// Characters of a product title shown on a listing card.
pub const TITLE_PREVIEW_CHARS: usize = 20;

/// Characters of a product description shown on a listing card.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 90;

/// Skeleton cards shown while the listing loads.
pub const LOADING_SKELETON_COUNT: usize = 6;

/// Keep the first `max_chars` characters of `text` and append `...`.
///
/// The marker is appended even when nothing was cut, so
/// `"Test Product 1"` previews as `"Test Product 1..."`.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let mut preview: String = text.chars().take(max_chars).collect();
    preview.push_str("...");
    preview
}

/// Product card on the listing page.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: String,
    /// Full title, used as the image alt text.
    pub title: String,
    pub title_preview: Option<String>,
    pub description_preview: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            title_preview: non_empty(&product.title)
                .map(|title| truncate_with_ellipsis(title, TITLE_PREVIEW_CHARS)),
            description_preview: non_empty(&product.description)
                .map(|text| truncate_with_ellipsis(text, DESCRIPTION_PREVIEW_CHARS)),
            price: product.price.map(|price| price.to_string()),
            image: product.image.clone(),
        }
    }
}

/// Product detail page data.
#[derive(Debug, Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    pub rating: Option<String>,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            description: non_empty(&product.description).map(str::to_string),
            category: product.category.map(|category| category.label().to_string()),
            price: product.price.map(|price| price.to_string()),
            image: product.image.clone(),
            rating: product
                .rating
                .map(|rating| format!("Rating {:.1} ({} reviews)", rating.rate, rating.count)),
        }
    }
}

/// Category filter button.
#[derive(Debug, Clone)]
pub struct FilterOptionView {
    pub label: &'static str,
    pub slug: &'static str,
    pub selected: bool,
}

impl FilterOptionView {
    /// One button per filter, marking `selected`.
    #[must_use]
    pub fn all(selected: CategoryFilter) -> Vec<Self> {
        CategoryFilter::options()
            .into_iter()
            .map(|filter| Self {
                label: filter.label(),
                slug: filter.slug(),
                selected: filter == selected,
            })
            .collect()
    }
}

/// Filterable product listing, shown on the home page and `/product`.
#[derive(Debug, Clone)]
pub struct ListingView {
    pub loading: bool,
    pub load_failed: bool,
    pub skeletons: Vec<usize>,
    pub filters: Vec<FilterOptionView>,
    pub products: Vec<ProductCardView>,
    /// Page the filter buttons link to.
    pub path: &'static str,
    /// Where "Add to Cart" returns to.
    pub return_to: String,
}

impl ListingView {
    /// Project the shared listing through one visitor's selection.
    #[must_use]
    pub fn new(
        catalog: &CatalogViewModel,
        selection: CategorySelection,
        path: &'static str,
    ) -> Self {
        let selected = selection.selected();
        Self {
            loading: catalog.is_loading(),
            load_failed: catalog.last_error().is_some(),
            skeletons: (0..LOADING_SKELETON_COUNT).collect(),
            filters: FilterOptionView::all(selected),
            products: selection
                .filtered_products(catalog)
                .into_iter()
                .map(ProductCardView::from)
                .collect(),
            path,
            return_to: format!("{path}?category={}", selected.slug()),
        }
    }
}

/// Cart line on the cart page.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub image: Option<String>,
    pub qty: u32,
    pub price: String,
    pub line_total: String,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title.clone(),
            image: item.image.clone(),
            qty: item.qty,
            price: item.price.to_string(),
            line_total: item.line_total().to_string(),
        }
    }
}

/// Cart contents and order summary.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: usize,
    pub total_quantity: u32,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
}

impl CartView {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&CartStore> for CartView {
    fn from(cart: &CartStore) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal().to_string(),
            shipping: cart.shipping_fee().to_string(),
            total: cart.total().to_string(),
        }
    }
}

fn non_empty(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(text)
}

//! Product route handlers.
//!
//! Both pages mount their view model on every request. Only the first mount
//! starts a fetch; while it is in flight the page renders loading skeletons
//! and refreshes itself until the data arrives. The category filter is each
//! visitor's own, kept in their session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use fakestore_core::{CategoryFilter, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::session::{cart_count, load_selection, save_selection};
use crate::routes::cart::MAX_QUANTITY_PER_ADD;
use crate::state::AppState;
use crate::views::{ListingView, ProductDetailView};

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub category: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub cart_count: usize,
    pub listing: ListingView,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub cart_count: usize,
    pub load_failed: bool,
    pub product: Option<ProductDetailView>,
    pub return_to: String,
    /// Upper bound of the quantity input.
    pub max_quantity: u32,
}

/// Mount the catalog and build the visitor's listing for the page at `path`.
///
/// A recognised `category` parameter updates the visitor's selected filter;
/// an unrecognised one is ignored.
pub(crate) async fn visitor_listing(
    state: &AppState,
    session: &Session,
    category: Option<&str>,
    path: &'static str,
) -> ListingView {
    state.mount_catalog().await;

    let mut selection = load_selection(session).await;
    if let Some(raw) = category {
        match raw.parse::<CategoryFilter>() {
            Ok(filter) => {
                selection.set_category(filter);
                save_selection(session, selection).await;
            }
            Err(e) => tracing::debug!(error = %e, "Ignoring category filter"),
        }
    }

    let catalog = state.catalog().lock().await;
    ListingView::new(&catalog, selection, path)
}

/// Display the product listing.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    let listing = visitor_listing(&state, &session, query.category.as_deref(), "/product").await;
    ProductsIndexTemplate {
        cart_count: cart_count(&session).await,
        listing,
    }
}

/// Display the product detail page.
///
/// # Errors
///
/// Returns 404 if the id segment is not a product id.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse> {
    let id: ProductId = raw_id
        .parse()
        .map_err(|_| AppError::NotFound(format!("product {raw_id}")))?;

    state.mount_product(id).await;
    let cart_count = cart_count(&session).await;

    let detail = state.product_detail().lock().await;
    Ok(ProductShowTemplate {
        cart_count,
        load_failed: detail.is_loading(id) && detail.last_error(id).is_some(),
        product: detail.product(id).map(ProductDetailView::from),
        return_to: format!("/product/{id}"),
        max_quantity: MAX_QUANTITY_PER_ADD,
    })
}

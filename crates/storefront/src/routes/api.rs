//! JSON API handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use fakestore_core::CategoryFilter;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::CartSummary;
use crate::error::{AppError, Result};
use crate::middleware::session::load_cart;
use crate::models::Product;
use crate::routes::products::ListingQuery;
use crate::state::AppState;

/// The visitor's cart contents and totals.
#[instrument(skip(session))]
pub async fn cart(session: Session) -> Json<CartSummary> {
    Json(load_cart(&session).await.summary())
}

/// Loaded products, optionally restricted to one category.
///
/// Unlike the listing page this does not change the visitor's selected filter.
///
/// # Errors
///
/// Returns 400 for an unknown category and 503 while the catalog is loading.
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<Vec<Product>>> {
    let filter = match query.category.as_deref() {
        Some(raw) => raw
            .parse::<CategoryFilter>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?,
        None => CategoryFilter::All,
    };

    state.mount_catalog().await;
    let catalog = state.catalog().lock().await;
    if catalog.is_loading() {
        return Err(AppError::CatalogUnavailable {
            last_error: catalog.last_error().map(ToString::to_string),
        });
    }

    Ok(Json(
        catalog.products_in(filter).into_iter().cloned().collect(),
    ))
}

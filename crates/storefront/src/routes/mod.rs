//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page with the product listing (?category=...)
//! GET  /about                  - About page
//! GET  /contact                - Contact page
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /product                - Product listing (?category=all|men|women|jewelery|electronics)
//! GET  /product/{id}           - Product detail
//!
//! # Cart (form posts, redirect back)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add a product (product_id, quantity, return_to)
//! POST /cart/increment         - Increase a line by one (id)
//! POST /cart/decrement         - Decrease a line by one, removing it at zero (id)
//! POST /cart/remove            - Remove a line (id)
//!
//! # Checkout
//! GET  /checkout               - Checkout form with order summary
//! POST /checkout               - Validate the checkout form
//!
//! # JSON API
//! GET  /api/cart               - Cart summary
//! GET  /api/products           - Loaded products (?category=...)
//!
//! *                            - Not found page
//! ```

pub mod api;
pub mod cart;
pub mod checkout;
pub mod pages;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::create_session_layer;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/increment", post(cart::increment))
        .route("/decrement", post(cart::decrement))
        .route("/remove", post(cart::remove))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(api::cart))
        .route("/products", get(api::products))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Static pages
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/contact", get(pages::contact))
        // Product routes
        .nest("/product", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", get(checkout::show).post(checkout::submit))
        // JSON API
        .nest("/api", api_routes())
        .fallback(pages::not_found)
}

/// Build the complete application router with shared state.
///
/// Routers built from clones of the same state share one session store.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.session_store().clone(), state.config());
    let static_files = ServeDir::new(&state.config().static_dir);

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", static_files)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

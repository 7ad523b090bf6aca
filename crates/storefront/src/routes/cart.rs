//! Cart route handlers.
//!
//! Cart operations are plain form posts that redirect back to a page.
//! Quantity buttons only send the line's product id; the handler looks up the
//! full line in the store so every dispatched intent carries the whole record.
//! Each visitor's cart is loaded from their session and saved back after
//! every change.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use fakestore_core::ProductId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::CartStore;
use crate::error::add_breadcrumb;
use crate::middleware::session::{load_cart, save_cart};
use crate::models::CartItem;
use crate::state::AppState;
use crate::views::CartView;

/// Default page to return to after adding to the cart.
const DEFAULT_RETURN_TO: &str = "/product";

/// Largest quantity a single add-to-cart request may add.
pub const MAX_QUANTITY_PER_ADD: u32 = 99;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
    pub return_to: Option<String>,
}

/// Form data naming a cart line.
#[derive(Debug, Deserialize)]
pub struct CartLineForm {
    pub id: ProductId,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart_count: usize,
    pub cart: CartView,
}

/// Display the cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CartShowTemplate {
        cart_count: cart.item_count(),
        cart: CartView::from(&cart),
    }
}

/// Add a product to the cart.
///
/// The product must already have been fetched by the listing or a detail
/// page; unknown ids are ignored. The quantity defaults to 1 and is capped
/// at [`MAX_QUANTITY_PER_ADD`].
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> impl IntoResponse {
    let quantity = form.quantity.unwrap_or(1).min(MAX_QUANTITY_PER_ADD);

    match state.find_product(form.product_id).await {
        Some(product) => {
            let mut cart = load_cart(&session).await;
            cart.add_item(&product, quantity);
            save_cart(&session, cart).await;

            let product_id = form.product_id.to_string();
            let quantity = quantity.to_string();
            add_breadcrumb(
                "cart",
                "Added to cart",
                Some(&[
                    ("product_id", product_id.as_str()),
                    ("quantity", quantity.as_str()),
                ]),
            );
        }
        None => {
            tracing::warn!(product_id = %form.product_id, "Add to cart for unknown product");
        }
    }

    Redirect::to(safe_return_path(form.return_to.as_deref()))
}

/// Apply `change` to the visitor's line for `id`, if they have one.
async fn update_line(
    session: &Session,
    id: ProductId,
    change: impl FnOnce(&mut CartStore, &CartItem),
) -> bool {
    let mut cart = load_cart(session).await;
    let Some(item) = cart.get(id).cloned() else {
        return false;
    };
    change(&mut cart, &item);
    save_cart(session, cart).await;
    true
}

/// Increase a cart line by one.
#[instrument(skip(session))]
pub async fn increment(session: Session, Form(form): Form<CartLineForm>) -> impl IntoResponse {
    update_line(&session, form.id, CartStore::increment).await;
    Redirect::to("/cart")
}

/// Decrease a cart line by one, removing it at zero.
#[instrument(skip(session))]
pub async fn decrement(session: Session, Form(form): Form<CartLineForm>) -> impl IntoResponse {
    update_line(&session, form.id, CartStore::decrement).await;
    Redirect::to("/cart")
}

/// Remove a cart line whatever its quantity.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<CartLineForm>) -> impl IntoResponse {
    if update_line(&session, form.id, CartStore::delete).await {
        let product_id = form.id.to_string();
        add_breadcrumb(
            "cart",
            "Removed from cart",
            Some(&[("product_id", product_id.as_str())]),
        );
    }
    Redirect::to("/cart")
}

/// Only allow redirects to local paths.
fn safe_return_path(requested: Option<&str>) -> &str {
    match requested {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => DEFAULT_RETURN_TO,
    }
}

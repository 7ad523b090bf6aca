//! Session middleware configuration.
//!
//! Each visitor gets a session cookie; their cart and category selection are
//! stored in the session, so no two visitors ever share either one. Sessions
//! live in an in-memory store and are lost on restart.

use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::cart::{CartState, CartStore};
use crate::catalog::CategorySelection;
use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "fakestore_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Session keys for per-visitor storefront state.
pub mod keys {
    /// Key for the visitor's cart lines.
    pub const CART: &str = "cart";

    /// Key for the visitor's selected category filter.
    pub const CATEGORY: &str = "category";
}

/// Create the session layer over `store`.
///
/// # Arguments
///
/// * `store` - In-memory session store shared by every router built from the
///   same application state
/// * `config` - Storefront configuration (for the `Secure` cookie flag)
#[must_use]
pub fn create_session_layer(
    store: MemoryStore,
    config: &StorefrontConfig,
) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the visitor's cart, or an empty one for a new visitor.
///
/// Stored lines are normalized on the way in, so a tampered or outdated
/// session can never yield duplicate or zero-quantity lines.
pub async fn load_cart(session: &Session) -> CartStore {
    match session.get::<CartState>(keys::CART).await {
        Ok(Some(state)) => CartStore::with_state(state),
        Ok(None) => CartStore::new(),
        Err(e) => {
            tracing::warn!("Discarding unreadable cart from session: {e}");
            CartStore::new()
        }
    }
}

/// Save the visitor's cart. Failures are logged; the request still succeeds.
pub async fn save_cart(session: &Session, cart: CartStore) {
    if let Err(e) = session.insert(keys::CART, cart.into_state()).await {
        tracing::error!("Failed to save cart to session: {e}");
    }
}

/// Number of distinct lines in the visitor's cart, for the navbar badge.
pub async fn cart_count(session: &Session) -> usize {
    load_cart(session).await.item_count()
}

/// Load the visitor's category selection, `All` for a new visitor.
pub async fn load_selection(session: &Session) -> CategorySelection {
    session
        .get::<CategorySelection>(keys::CATEGORY)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Save the visitor's category selection.
pub async fn save_selection(session: &Session, selection: CategorySelection) {
    if let Err(e) = session.insert(keys::CATEGORY, selection).await {
        tracing::error!("Failed to save category selection to session: {e}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use fakestore_core::{Category, Price, ProductId};

    use super::*;
    use crate::cart::CartAction;
    use crate::models::CartItem;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn item(id: i32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_dollars(10),
            image: None,
            qty: 1,
        }
    }

    #[tokio::test]
    async fn test_new_visitor_has_empty_state() {
        let session = session();
        assert!(load_cart(&session).await.is_empty());
        assert_eq!(cart_count(&session).await, 0);
        assert_eq!(
            load_selection(&session).await,
            CategorySelection::default()
        );
    }

    #[tokio::test]
    async fn test_cart_survives_save_and_load() {
        let session = session();
        let mut cart = load_cart(&session).await;
        cart.dispatch(CartAction::AddItem {
            item: item(1),
            quantity: 2,
        });
        cart.dispatch(CartAction::AddItem {
            item: item(2),
            quantity: 1,
        });
        save_cart(&session, cart).await;

        let cart = load_cart(&session).await;
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart_count(&session).await, 2);
    }

    #[tokio::test]
    async fn test_unreadable_cart_is_discarded() {
        let session = session();
        session.insert(keys::CART, "not a cart").await.unwrap();
        assert!(load_cart(&session).await.is_empty());
    }

    #[tokio::test]
    async fn test_selection_survives_save_and_load() {
        let session = session();
        let mut selection = load_selection(&session).await;
        selection.set_category(Category::Jewelery.into());
        save_selection(&session, selection).await;

        assert_eq!(
            load_selection(&session).await.selected(),
            Category::Jewelery.into()
        );
    }
}

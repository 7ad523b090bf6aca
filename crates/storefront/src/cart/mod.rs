//! Cart store: line items, quantity intents and derived totals.
//!
//! The cart is an ordered list of [`CartItem`]s with at most one entry per
//! product id. It changes only through [`CartAction`]s, applied by the pure
//! [`reduce`] function; [`CartStore`] owns the current [`CartState`] and
//! dispatches actions into it. Totals are recomputed from the items on every
//! read, so they can never go stale.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut cart = CartStore::new();
//! cart.add_item(&product, 2);
//! cart.decrement(&cart.items()[0].clone());
//! assert_eq!(cart.total(), product_price + SHIPPING_FEE);
//! ```

use fakestore_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{CartItem, Product};

/// Flat shipping fee charged on any non-empty cart, in dollars.
pub const SHIPPING_FEE_DOLLARS: i64 = 30;

/// Intents understood by the cart reducer.
///
/// Each intent carries the full item record, not just its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add `quantity` of the item, creating the line if needed (`ADDITEM`).
    AddItem { item: CartItem, quantity: u32 },
    /// Decrement the line by one, removing it at zero (`DELITEM`).
    DelItem(CartItem),
    /// Remove the line regardless of quantity.
    DeleteItem(CartItem),
}

impl CartAction {
    /// Product the action targets.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        match self {
            Self::AddItem { item, .. } | Self::DelItem(item) | Self::DeleteItem(item) => item.id,
        }
    }
}

/// Ordered cart contents.
///
/// Serialized as a plain list of lines. Deserializing goes through
/// [`CartState::from_items`], so a stored cart can never break the
/// one-line-per-id invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct CartState {
    items: Vec<CartItem>,
}

impl CartState {
    /// Build a state from existing lines.
    ///
    /// Lines with `qty == 0` are dropped and repeated ids are merged into the
    /// first occurrence so the one-line-per-id invariant holds.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        items.into_iter().fold(Self::default(), |state, item| {
            let quantity = item.qty;
            reduce(state, &CartAction::AddItem { item, quantity })
        })
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

impl From<Vec<CartItem>> for CartState {
    fn from(items: Vec<CartItem>) -> Self {
        Self::from_items(items)
    }
}

impl From<CartState> for Vec<CartItem> {
    fn from(state: CartState) -> Self {
        state.items
    }
}

/// Apply `action` to `state`, returning the new state.
///
/// Total over all inputs: actions naming an absent product are no-ops, and an
/// `AddItem` with a zero quantity never creates an empty line.
#[must_use]
pub fn reduce(mut state: CartState, action: &CartAction) -> CartState {
    match action {
        CartAction::AddItem { item, quantity } => {
            if *quantity == 0 {
                return state;
            }
            match state.position(item.id) {
                Some(index) => {
                    if let Some(existing) = state.items.get_mut(index) {
                        existing.qty = existing.qty.saturating_add(*quantity);
                    }
                }
                None => state.items.push(CartItem {
                    qty: *quantity,
                    ..item.clone()
                }),
            }
        }
        CartAction::DelItem(item) => {
            if let Some(index) = state.position(item.id) {
                let remaining = state
                    .items
                    .get(index)
                    .map_or(0, |existing| existing.qty.saturating_sub(1));
                if remaining == 0 {
                    state.items.remove(index);
                } else if let Some(existing) = state.items.get_mut(index) {
                    existing.qty = remaining;
                }
            }
        }
        CartAction::DeleteItem(item) => {
            state.items.retain(|existing| existing.id != item.id);
        }
    }
    state
}

/// Owner of the current cart state.
///
/// Handlers build one from the visitor's session, dispatch intents and save
/// its state back.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    state: CartState,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `state`.
    #[must_use]
    pub const fn with_state(state: CartState) -> Self {
        Self { state }
    }

    /// Apply an intent to the cart.
    pub fn dispatch(&mut self, action: CartAction) {
        debug!(product_id = %action.product_id(), ?action, "cart action");
        self.state = reduce(std::mem::take(&mut self.state), &action);
    }

    /// Add `quantity` of `product` to the cart.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        self.dispatch(CartAction::AddItem {
            item: CartItem::from_product(product, quantity),
            quantity,
        });
    }

    /// Increase the item's quantity by one. No-op if it is not in the cart.
    pub fn increment(&mut self, item: &CartItem) {
        if self.get(item.id).is_some() {
            self.dispatch(CartAction::AddItem {
                item: item.clone(),
                quantity: 1,
            });
        }
    }

    /// Decrease the item's quantity by one, removing it at zero.
    pub fn decrement(&mut self, item: &CartItem) {
        self.dispatch(CartAction::DelItem(item.clone()));
    }

    /// Remove the item whatever its quantity.
    pub fn delete(&mut self, item: &CartItem) {
        self.dispatch(CartAction::DeleteItem(item.clone()));
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Give up the store, keeping its state.
    #[must_use]
    pub fn into_state(self) -> CartState {
        self.state
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        self.state.items()
    }

    /// Line for `id`, if present.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items().iter().find(|item| item.id == id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Number of distinct lines (the navbar badge).
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items().len()
    }

    /// Sum of all line quantities, saturating at `u32::MAX`.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.items()
            .iter()
            .fold(0, |total, item| total.saturating_add(item.qty))
    }

    /// Sum of `price * qty` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items().iter().map(CartItem::line_total).sum()
    }

    /// Flat fee for a non-empty cart, zero otherwise.
    #[must_use]
    pub fn shipping_fee(&self) -> Price {
        if self.is_empty() {
            Price::ZERO
        } else {
            Price::from_dollars(SHIPPING_FEE_DOLLARS)
        }
    }

    /// Subtotal plus shipping.
    #[must_use]
    pub fn total(&self) -> Price {
        self.subtotal() + self.shipping_fee()
    }

    /// Snapshot of the cart and its derived values.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            items: self.items().to_vec(),
            item_count: self.item_count(),
            total_quantity: self.total_quantity(),
            subtotal: self.subtotal(),
            shipping_fee: self.shipping_fee(),
            total: self.total(),
        }
    }
}

/// Serializable cart snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub item_count: usize,
    pub total_quantity: u32,
    pub subtotal: Price,
    pub shipping_fee: Price,
    pub total: Price,
}

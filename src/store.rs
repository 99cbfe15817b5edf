//! Cart Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity over the cart.

use leptos::prelude::*;
use reactive_stores::Store;
use storefront_state::cart::{Cart, LineChange, UpdateRequest};
use storefront_state::inflight::InFlight;
use storefront_state::models::{CartLine, CartUpdateResponse};

/// Cart page state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct CartState {
    /// Rendered cart lines
    pub cart: Cart,
    /// Products with a mutation outstanding
    pub pending: InFlight<u64>,
    /// Anonymous users cannot check out
    pub logged_in: bool,
}

impl CartState {
    pub fn new(lines: Vec<CartLine>, logged_in: bool) -> Self {
        Self {
            cart: Cart::new(lines),
            pending: InFlight::new(),
            logged_in,
        }
    }
}

/// Type alias for the store
pub type CartStore = Store<CartState>;

/// Get the cart store from context
pub fn use_cart_store() -> CartStore {
    expect_context::<CartStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Mark a product busy. Returns `false` when a request is already running.
pub fn store_begin(store: &CartStore, product_id: u64) -> bool {
    store.pending().write().try_begin(product_id)
}

pub fn store_finish(store: &CartStore, product_id: u64) {
    store.pending().write().finish(&product_id);
}

pub fn store_is_busy(store: &CartStore, product_id: u64) -> bool {
    store.pending().read().is_busy(&product_id)
}

/// Fold a confirmed quantity change into the cart
pub fn store_apply_update(store: &CartStore, req: &UpdateRequest, resp: &CartUpdateResponse) -> LineChange {
    store.cart().write().apply_update(req, resp)
}

/// Remove a line by product ID
pub fn store_remove_line(store: &CartStore, product_id: u64) -> LineChange {
    store.cart().write().remove(product_id)
}

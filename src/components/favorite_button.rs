//! Favorite Heart Button
//!
//! Toggles a product's favorite flag. In favorites-only mode an
//! un-favorited card leaves the grid.

use leptos::html::Button;
use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront_state::catalog::{resolve_favorite, should_remove_card, FilterState};
use storefront_state::{text, ApiError, Notice};

use crate::api;
use crate::context::use_app_context;
use crate::dom;

/// # Arguments
/// * `on_removed` - Owner of the card; without one the server-rendered
///   `.product-card` around the button is removed from the DOM
#[component]
pub fn FavoriteButton(
    product_id: u64,
    active: bool,
    #[prop(optional)] on_removed: Option<Callback<u64>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let favorite = RwSignal::new(active);
    let busy = RwSignal::new(false);
    let button = NodeRef::<Button>::new();

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        spawn_local(async move {
            let ep = ctx.endpoints();
            match api::toggle_favorite(&ep, product_id).await {
                Ok(toggle) => {
                    let now = resolve_favorite(favorite.get_untracked(), toggle.active);
                    log::debug!("[Favorites] product {} -> {}", product_id, now);
                    favorite.set(now);
                    let filters = FilterState::from_query(&dom::location_search());
                    if should_remove_card(&filters, now) {
                        match on_removed {
                            Some(cb) => cb.run(product_id),
                            None => {
                                if let Some(el) = button.get_untracked() {
                                    dom::remove_closest(&el, ".product-card");
                                }
                            }
                        }
                    }
                }
                Err(ApiError::Unauthorized { .. }) => {
                    ctx.notify(&Notice::LoginPrompt(text::FAVORITES_LOGIN_REQUIRED.to_string()));
                }
                Err(err) => {
                    log::error!("[Favorites] toggle of product {} failed: {}", product_id, err);
                    ctx.report(&err, text::FAVORITE_FAILED);
                }
            }
            busy.set(false);
        });
    };

    view! {
        <button
            node_ref=button
            class=move || if favorite.get() { "favorite-btn active" } else { "favorite-btn" }
            title=move || if favorite.get() { "Убрать из избранного" } else { "В избранное" }
            disabled=move || busy.get()
            on:click=on_click
        >
            {move || if favorite.get() { "♥" } else { "♡" }}
        </button>
    }
}

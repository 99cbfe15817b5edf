//! Add To Cart Button

use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront_state::cart::AddRequest;
use storefront_state::text;

use crate::api;
use crate::context::use_app_context;
use crate::models::ProductRef;

#[component]
pub fn AddToCartButton(product: ProductRef) -> impl IntoView {
    let ctx = use_app_context();
    let (busy, set_busy) = signal(false);
    let in_stock = product.in_stock.unwrap_or(true);
    let product_id = product.product_id;

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            let ep = ctx.endpoints();
            let req = AddRequest { product_id, count: 1 };
            match api::add_to_cart(&ep, &req).await {
                Ok(()) => {
                    log::info!("[Cart] product {} added", product_id);
                    ctx.show_toast(text::CART_ADDED);
                }
                Err(err) => {
                    log::error!("[Cart] adding product {} failed: {}", product_id, err);
                    ctx.report(&err, text::CART_ADD_FAILED);
                }
            }
            set_busy.set(false);
        });
    };

    view! {
        <button
            class="add-to-cart-btn"
            disabled=move || !in_stock || busy.get()
            on:click=on_click
        >
            {if in_stock { "В корзину" } else { "Нет в наличии" }}
        </button>
    }
}

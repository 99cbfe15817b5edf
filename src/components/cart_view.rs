//! Cart Page Component
//!
//! Quantity controls, line removal, clearing and the checkout gate. Every
//! mutation waits for the server before the page changes.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use storefront_state::cart::{checkout, checkout_disabled, CheckoutDecision, LineChange, UpdateRequest};
use storefront_state::models::{format_price, CartLine};
use storefront_state::orders::created_order_target;
use storefront_state::{text, Notice};

use crate::api;
use crate::components::ConfirmButton;
use crate::context::use_app_context;
use crate::dom;
use crate::models::CartProps;
use crate::store::{
    store_apply_update, store_begin, store_finish, store_is_busy, store_remove_line, use_cart_store, CartState,
    CartStateStoreFields,
};

#[component]
fn CartLineRow(line: CartLine) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_cart_store();
    let product_id = line.product_id;

    let quantity = move || {
        store
            .cart()
            .read()
            .line(product_id)
            .map(|l| l.quantity)
            .unwrap_or_default()
    };
    let line_total = move || {
        store
            .cart()
            .read()
            .line(product_id)
            .map(|l| format_price(l.line_total()))
            .unwrap_or_default()
    };
    let busy = Signal::derive(move || store_is_busy(&store, product_id));

    let change = move |req: UpdateRequest| {
        if !store_begin(&store, product_id) {
            return;
        }
        spawn_local(async move {
            let ep = ctx.endpoints();
            match api::update_cart(&ep, &req).await {
                Ok(resp) => {
                    let change = store_apply_update(&store, &req, &resp);
                    log::debug!("[Cart] product {} -> {:?}", product_id, change);
                    if change == LineChange::Removed {
                        ctx.show_toast(text::CART_LINE_REMOVED);
                    }
                }
                Err(err) => {
                    log::error!("[Cart] update of product {} failed: {}", product_id, err);
                    ctx.report(&err, text::CART_UPDATE_FAILED);
                }
            }
            store_finish(&store, product_id);
        });
    };

    let remove = move |_| {
        if !store_begin(&store, product_id) {
            return;
        }
        spawn_local(async move {
            let ep = ctx.endpoints();
            match api::remove_from_cart(&ep, product_id).await {
                Ok(()) => {
                    store_remove_line(&store, product_id);
                    ctx.show_toast(text::CART_LINE_REMOVED);
                }
                Err(err) => {
                    log::error!("[Cart] removing product {} failed: {}", product_id, err);
                    ctx.report(&err, text::CART_REMOVE_FAILED);
                }
            }
            store_finish(&store, product_id);
        });
    };

    let image = line
        .image_url
        .clone()
        .unwrap_or_else(|| text::DEFAULT_PRODUCT_IMAGE.to_string());

    view! {
        <div class="cart-item" data-product-id=product_id>
            <img class="cart-item-image" src=image alt=line.name.clone() />
            <div class="cart-item-info">
                <div class="cart-item-name">{line.name.clone()}</div>
                <div class="cart-item-price">{format_price(line.unit_price)}</div>
            </div>
            <div class="quantity-controls">
                <button
                    class="quantity-btn minus"
                    disabled=move || busy.get()
                    on:click=move |_| change(UpdateRequest::decrement(product_id))
                >
                    "−"
                </button>
                <span class="quantity">{quantity}</span>
                <button
                    class="quantity-btn plus"
                    disabled=move || busy.get()
                    on:click=move |_| change(UpdateRequest::increment(product_id))
                >
                    "+"
                </button>
            </div>
            <div class="cart-item-total">{line_total}</div>
            <button class="remove-btn" title="Удалить" disabled=move || busy.get() on:click=remove>
                "×"
            </button>
        </div>
    }
}

#[component]
pub fn CartView(props: CartProps) -> impl IntoView {
    let ctx = use_app_context();
    let store = Store::new(CartState::new(props.lines, props.logged_in));
    provide_context(store);

    let (clearing, set_clearing) = signal(false);
    let disabled = move || checkout_disabled(store.logged_in().get(), &store.cart().read());

    let clear = move |_| {
        set_clearing.set(true);
        spawn_local(async move {
            let ep = ctx.endpoints();
            match api::clear_cart(&ep).await {
                Ok(()) => {
                    log::info!("[Cart] cleared");
                    store.cart().write().clear();
                    dom::reload();
                }
                Err(err) => {
                    log::error!("[Cart] clear failed: {}", err);
                    ctx.report(&err, text::CART_CLEAR_FAILED);
                    set_clearing.set(false);
                }
            }
        });
    };

    let (placing, set_placing) = signal(false);
    let place_order = move || {
        if placing.get_untracked() {
            return;
        }
        set_placing.set(true);
        spawn_local(async move {
            let ep = ctx.endpoints();
            match api::create_order(&ep).await {
                Ok(created) => {
                    log::info!("[Cart] order {:?} created: {:?}", created.order_id, created.message);
                    let target = ctx.config.with_value(|c| created_order_target(&created, &c.orders));
                    dom::navigate(&target);
                }
                Err(err) => {
                    log::error!("[Cart] order creation failed: {}", err);
                    ctx.report(&err, text::ORDER_CREATE_FAILED);
                    set_placing.set(false);
                }
            }
        });
    };

    let on_checkout = move |_| {
        let decision = ctx.config.with_value(|c| checkout(disabled(), &c.cart));
        match decision {
            CheckoutDecision::Navigate(url) => dom::navigate(&url),
            CheckoutDecision::PlaceOrder => place_order(),
            CheckoutDecision::LoginPrompt(message) => ctx.notify(&Notice::LoginPrompt(message)),
        }
    };

    view! {
        <Show
            when=move || !store.cart().read().is_empty()
            fallback=|| view! { <div class="cart-empty">{text::CART_EMPTY}</div> }
        >
            <div class="cart-items">
                <For
                    each=move || store.cart().read().lines().to_vec()
                    key=|line| line.product_id
                    children=|line: CartLine| view! { <CartLineRow line=line /> }
                />
            </div>
            <div class="cart-summary">
                <span class="cart-total-label">"Итого:"</span>
                <span class="cart-total">{move || format_price(store.cart().read().total())}</span>
            </div>
            <div class="cart-actions">
                <ConfirmButton
                    label="Очистить корзину"
                    prompt=text::CART_CLEAR_CONFIRM
                    button_class="clear-cart-btn"
                    disabled=clearing
                    on_confirm=clear
                />
            </div>
        </Show>
        <button
            class=move || if disabled() { "checkout-btn disabled" } else { "checkout-btn" }
            aria-disabled=move || disabled().to_string()
            aria-busy=move || placing.get().to_string()
            on:click=on_checkout
        >
            "Оформить заказ"
        </button>
    }
}

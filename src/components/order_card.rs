//! Order Card Components
//!
//! Status badge, confirm-gated cancel and the expandable product list. The
//! card reads its order from a shared [`OrderBoard`] so cancel and status
//! changes patch it in place.

use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront_state::models::{format_local, format_price, OrderProduct};
use storefront_state::orders::OrderBoard;
use storefront_state::text;

use crate::api;
use crate::components::ConfirmButton;
use crate::context::use_app_context;
use crate::dom;
use crate::models::OrderProps;

#[component]
fn OrderProductRow(product: OrderProduct) -> impl IntoView {
    let image = product
        .image_url
        .clone()
        .unwrap_or_else(|| text::DEFAULT_PRODUCT_IMAGE.to_string());

    view! {
        <div class="order-product">
            <img class="order-product-image" src=image alt=product.name.clone() />
            <span class="order-product-name">{product.name.clone()}</span>
            <span class="order-product-count">{format!("× {}", product.count)}</span>
            <span class="order-product-total">{format_price(product.item_total())}</span>
        </div>
    }
}

#[component]
pub fn OrderCardView(order_id: u64, board: RwSignal<OrderBoard>) -> impl IntoView {
    let ctx = use_app_context();
    let (cancelling, set_cancelling) = signal(false);
    let offset = dom::timezone_offset_minutes();
    let url = ctx.config.with_value(|c| c.orders.order_url(order_id));

    let Some(order) = board.with_untracked(|b| b.get(order_id).cloned()) else {
        return ().into_any();
    };
    let created = order.created_at.as_ref().map(|ts| format_local(ts, offset));
    let products = StoredValue::new(order.products.clone());

    let status = move || board.with(|b| b.get(order_id).map(|o| o.status.clone()));
    let expanded = move || board.with(|b| b.is_expanded(order_id));

    let cancel = move |_| {
        set_cancelling.set(true);
        spawn_local(async move {
            let ep = ctx.endpoints();
            match api::cancel_order(&ep, order_id).await {
                Ok(()) => {
                    log::info!("[Orders] order {} cancelled", order_id);
                    board.update(|b| {
                        b.apply_cancelled(order_id);
                    });
                    ctx.show_toast(text::ORDER_CANCEL_SUCCESS);
                }
                Err(err) => {
                    log::error!("[Orders] cancelling order {} failed: {}", order_id, err);
                    ctx.report(&err, text::ORDER_CANCEL_FAILED);
                }
            }
            set_cancelling.set(false);
        });
    };

    view! {
        <div class="order-card" data-order-id=order_id>
            <div class="order-header">
                <a class="order-number" href=url>{format!("Заказ №{}", order_id)}</a>
                {created.map(|d| view! { <span class="order-date">{d}</span> })}
                <span class=move || {
                    format!("order-status {}", status().map(|s| s.css_class()).unwrap_or_default())
                }>
                    {move || status().map(|s| s.label().to_string()).unwrap_or_default()}
                </span>
            </div>
            <div class="order-summary">
                <span class="order-total">{format!("Итого: {}", format_price(order.total))}</span>
                <button
                    type="button"
                    class="order-toggle-products"
                    on:click=move |_| {
                        board.update(|b| {
                            b.toggle_expanded(order_id);
                        });
                    }
                >
                    {move || if expanded() { "Скрыть товары ▲" } else { "Показать товары ▼" }}
                </button>
                <Show when=move || board.with(|b| b.can_cancel(order_id))>
                    <ConfirmButton
                        label="Отменить заказ"
                        prompt=text::ORDER_CANCEL_CONFIRM
                        button_class="cancel-order-btn"
                        disabled=cancelling
                        on_confirm=cancel
                    />
                </Show>
            </div>
            <Show when=expanded>
                <div class="order-products">
                    {move || {
                        products.with_value(|items| {
                            if items.is_empty() {
                                view! { <div class="order-products-empty">{text::ORDER_NO_PRODUCTS}</div> }.into_any()
                            } else {
                                items
                                    .iter()
                                    .cloned()
                                    .map(|product| view! { <OrderProductRow product=product /> })
                                    .collect_view()
                                    .into_any()
                            }
                        })
                    }}
                </div>
            </Show>
        </div>
    }
    .into_any()
}

/// Single order page
#[component]
pub fn OrderPage(props: OrderProps) -> impl IntoView {
    let order_id = props.order.id;
    let board = RwSignal::new(OrderBoard::new(vec![props.order]));
    board.update(|b| {
        b.toggle_expanded(order_id);
    });

    view! { <OrderCardView order_id=order_id board=board /> }
}

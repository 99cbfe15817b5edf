//! Account Orders List
//!
//! Server-rendered first page plus "load more orders" until the backend
//! reports no next page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront_state::orders::{OrderBoard, OrdersPager};
use storefront_state::text;

use crate::api;
use crate::components::OrderCardView;
use crate::context::use_app_context;
use crate::models::OrderHistoryProps;

#[component]
pub fn OrdersList(props: OrderHistoryProps) -> impl IntoView {
    let ctx = use_app_context();
    let per_page = ctx.config.with_value(|c| c.orders.per_page);
    let user_id = ctx.user_id.unwrap_or(props.user_id);
    let board = RwSignal::new(OrderBoard::new(props.orders));
    let pager = RwSignal::new(OrdersPager::new(user_id, per_page, props.has_next));

    let load_more = move |_| {
        let Some(req) = pager.try_update(|p| p.begin()).flatten() else {
            return;
        };
        spawn_local(async move {
            let ep = ctx.endpoints();
            match api::user_orders(&ep, req).await {
                Ok(page) => {
                    pager.update(|p| p.apply(req, &page));
                    let added = board.try_update(|b| b.append(page.orders)).unwrap_or_default();
                    log::debug!("[Orders] page {}: {} new orders", req.page, added);
                }
                Err(err) => {
                    log::error!("[Orders] page {} failed: {}", req.page, err);
                    pager.update(|p| p.fail());
                    ctx.report(&err, text::ORDERS_LOAD_FAILED);
                }
            }
        });
    };

    view! {
        <div class="orders-list">
            <Show
                when=move || board.with(|b| !b.orders().is_empty())
                fallback=|| view! { <div class="orders-empty">"У вас пока нет заказов"</div> }
            >
                <For
                    each=move || board.with(|b| b.orders().iter().map(|o| o.id).collect::<Vec<_>>())
                    key=|id| *id
                    children=move |order_id| view! { <OrderCardView order_id=order_id board=board /> }
                />
            </Show>
        </div>
        <Show when=move || pager.with(|p| p.has_next())>
            <button
                class="load-more-orders"
                disabled=move || pager.with(|p| p.is_loading())
                on:click=load_more
            >
                {move || if pager.with(|p| p.is_loading()) { text::LOADING } else { "Показать ещё" }}
            </button>
        </Show>
    }
}

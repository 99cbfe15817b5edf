//! Back-Office Order Status Select

use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront_state::orders::{ChangeStatusRequest, OrderStatus};
use storefront_state::text;

use crate::api;
use crate::context::use_app_context;
use crate::models::OrderStatusProps;

#[component]
pub fn OrderStatusSelect(props: OrderStatusProps) -> impl IntoView {
    let ctx = use_app_context();
    let order_id = props.order_id;
    let status = RwSignal::new(props.status);
    let selected = RwSignal::new(status.get_untracked());
    let (saving, set_saving) = signal(false);

    let save = move |_| {
        let new_status = selected.get_untracked();
        if new_status == status.get_untracked() {
            return;
        }
        set_saving.set(true);
        spawn_local(async move {
            let ep = ctx.endpoints();
            let body = ChangeStatusRequest {
                new_status: new_status.clone(),
            };
            match api::change_order_status(&ep, order_id, &body).await {
                Ok(()) => {
                    log::info!("[Orders] order {} -> {}", order_id, new_status.as_str());
                    status.set(new_status);
                    ctx.show_toast(text::ORDER_STATUS_UPDATED);
                }
                Err(err) => {
                    log::error!("[Orders] status change of order {} failed: {}", order_id, err);
                    ctx.report(&err, text::ORDER_STATUS_FAILED);
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="order-status-control">
            <span class=move || format!("order-status {}", status.with(OrderStatus::css_class))>
                {move || status.with(|s| s.label().to_string())}
            </span>
            <select
                class="order-status-select"
                on:change=move |ev| selected.set(OrderStatus::parse(&event_target_value(&ev)))
            >
                {OrderStatus::SELECTABLE
                    .iter()
                    .map(|s| {
                        let value = s.as_str().to_string();
                        let is_current = selected.with_untracked(|cur| cur == s);
                        view! { <option value=value selected=is_current>{s.label().to_string()}</option> }
                    })
                    .collect_view()}
            </select>
            <button
                class="change-status-btn"
                disabled=move || saving.get() || selected.with(|s| status.with(|cur| s == cur))
                on:click=save
            >
                {move || if saving.get() { text::SAVING } else { "Изменить статус" }}
            </button>
        </div>
    }
}

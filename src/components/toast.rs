//! Toast Component
//!
//! Transient notification driven by `AppContext::show_toast`.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn Toast() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        {move || ctx.toast.get().map(|text| view! {
            <div class="toast-notification" role="status">{text}</div>
        })}
    }
}

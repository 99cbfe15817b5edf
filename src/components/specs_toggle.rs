//! Specs Toggle
//!
//! Shows or hides the server-rendered specifications panel.

use leptos::prelude::*;

use crate::dom;
use crate::models::SpecsProps;

#[component]
pub fn SpecsToggle(props: SpecsProps) -> impl IntoView {
    let open = RwSignal::new(props.open);
    let target = StoredValue::new(props.target);
    target.with_value(|id| dom::set_element_visible(id, props.open));

    let toggle = move |_| {
        let now = !open.get_untracked();
        open.set(now);
        target.with_value(|id| dom::set_element_visible(id, now));
    };

    view! {
        <button type="button" class="specs-toggle" on:click=toggle>
            "Характеристики "
            <span class="specs-arrow">{move || if open.get() { "▲" } else { "▼" }}</span>
        </button>
    }
}

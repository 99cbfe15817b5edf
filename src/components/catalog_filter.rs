//! Catalog Filter Panel
//!
//! Dropdown multi-selects for category, color and memory plus the
//! favorites-only switch. The URL is the source of truth: every change is
//! pushed to the query string and the page reloads, or the filtered listing
//! opens when the catalog is configured that way.

use leptos::ev;
use leptos::prelude::*;
use storefront_state::catalog::{option_matches, toggle_dropdown, FilterKind, FilterState, FilterTarget};

use crate::context::{use_app_context, AppContext};
use crate::dom;
use crate::models::{CatalogFilterProps as CatalogFilterData, FilterOption};

/// Put the new filters into the URL and let the server re-render.
fn commit(filters: &FilterState, ctx: AppContext) {
    let target = ctx
        .config
        .with_value(|c| filters.target(&dom::location_search(), &c.catalog, &c.endpoints));
    match target {
        FilterTarget::Reload(query) => {
            log::info!("[Filter] applying ?{}", query);
            dom::push_query(&query);
            dom::reload();
        }
        FilterTarget::Navigate(url) => {
            log::info!("[Filter] opening {}", url);
            dom::navigate(&url);
        }
    }
}

#[component]
fn FilterDropdown(
    kind: FilterKind,
    title: &'static str,
    options: Vec<FilterOption>,
    filters: RwSignal<FilterState>,
    open: RwSignal<Option<FilterKind>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let search = RwSignal::new(String::new());
    let is_open = move || open.get() == Some(kind);
    let options = StoredValue::new(options);

    let header = move || {
        let count = filters.with(|f| f.selected_count(kind));
        if count == 0 {
            title.to_string()
        } else {
            format!("{} ({})", title, count)
        }
    };

    view! {
        <div class="filter-dropdown" class:open=is_open on:click=|ev| ev.stop_propagation()>
            <button
                type="button"
                class="filter-dropdown-toggle"
                on:click=move |_| open.update(|o| *o = toggle_dropdown(*o, kind))
            >
                {header}
            </button>
            <Show when=is_open>
                <div class="filter-dropdown-menu">
                    <input
                        type="text"
                        class="filter-search"
                        placeholder="Поиск..."
                        prop:value=move || search.get()
                        on:input=move |ev| search.set(event_target_value(&ev))
                    />
                    <For
                        each=move || options.get_value()
                        key=|opt| opt.value.clone()
                        children=move |opt: FilterOption| {
                            let value = opt.value.clone();
                            let attr_value = value.clone();
                            let label = opt.label.clone();
                            let visible = move || search.with(|needle| option_matches(&label, needle));
                            let checked = {
                                let value = value.clone();
                                move || filters.with(|f| f.is_selected(kind, &value))
                            };
                            view! {
                                <label class="filter-option" class:hidden=move || !visible()>
                                    <input
                                        type="checkbox"
                                        value=attr_value
                                        prop:checked=checked
                                        on:change=move |ev| {
                                            let on = event_target_checked(&ev);
                                            let changed = filters
                                                .try_update(|f| f.toggle(kind, &value, on))
                                                .unwrap_or(false);
                                            if changed {
                                                filters.with_untracked(|f| commit(f, ctx));
                                            }
                                        }
                                    />
                                    <span>{opt.label.clone()}</span>
                                </label>
                            }
                        }
                    />
                </div>
            </Show>
        </div>
    }
}

#[component]
pub fn CatalogFilter(props: CatalogFilterData) -> impl IntoView {
    let ctx = use_app_context();
    let filters = RwSignal::new(FilterState::from_query(&dom::location_search()));
    let open = RwSignal::new(None::<FilterKind>);

    // Outside click closes the open dropdown
    let handle = window_event_listener(ev::click, move |_| {
        if open.get_untracked().is_some() {
            open.set(None);
        }
    });
    on_cleanup(move || handle.remove());

    let reset = move |_| {
        filters.set(FilterState::default());
        filters.with_untracked(|f| commit(f, ctx));
    };

    view! {
        <div class="catalog-filters">
            <FilterDropdown
                kind=FilterKind::Category
                title="Категории"
                options=props.categories
                filters=filters
                open=open
            />
            <FilterDropdown
                kind=FilterKind::Color
                title="Цвет"
                options=props.colors
                filters=filters
                open=open
            />
            <FilterDropdown
                kind=FilterKind::Memory
                title="Встроенная память"
                options=props.memory
                filters=filters
                open=open
            />
            {props.logged_in.then(|| view! {
                <label class="filter-favorites">
                    <input
                        type="checkbox"
                        prop:checked=move || filters.with(|f| f.favorites_only)
                        on:change=move |ev| {
                            let on = event_target_checked(&ev);
                            filters.update(|f| f.favorites_only = on);
                            filters.with_untracked(|f| commit(f, ctx));
                        }
                    />
                    <span>"Только избранное"</span>
                </label>
            })}
            <Show when=move || !filters.with(FilterState::is_empty)>
                <button type="button" class="filter-reset" on:click=reset>
                    "Сбросить"
                </button>
            </Show>
        </div>
    }
}

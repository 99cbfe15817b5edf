//! Category Load-More Block
//!
//! Cards fetched after the server-rendered first screen of a category, plus
//! the "show more" and "collapse" controls.

use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront_state::catalog::{CategoryPager, FilterState, LoadOutcome};
use storefront_state::config::LoadSource;
use storefront_state::models::{format_price, ProductCard};
use storefront_state::text;

use crate::api;
use crate::components::{AddToCartButton, FavoriteButton};
use crate::context::use_app_context;
use crate::dom;
use crate::models::{CategoryProps, ProductRef};

#[component]
fn LoadedCard(card: ProductCard, url: String, on_removed: Callback<u64>) -> impl IntoView {
    let ctx = use_app_context();
    let favorite = card.favorite_shown(FilterState::from_query(&dom::location_search()).favorites_only);
    let image = card
        .cover_image()
        .unwrap_or(text::DEFAULT_PRODUCT_IMAGE)
        .to_string();
    let price = card
        .price
        .map(format_price)
        .unwrap_or_else(|| text::PRICE_MISSING.to_string());
    let product = ProductRef {
        product_id: card.id,
        in_stock: Some(card.in_stock()),
    };

    view! {
        <div class="product-card loaded" data-product-id=card.id>
            <a class="product-link" href=url>
                <img class="product-image" src=image alt=card.name.clone() loading="lazy" />
                <div class="product-name">{card.name.clone()}</div>
            </a>
            <div class="product-price">{price}</div>
            <div class="product-actions">
                <AddToCartButton product=product />
                {ctx.is_logged_in().then(|| view! {
                    <FavoriteButton product_id=card.id active=favorite on_removed=on_removed />
                })}
            </div>
        </div>
    }
}

#[component]
pub fn CategoryProducts(props: CategoryProps) -> impl IntoView {
    let ctx = use_app_context();
    let catalog = ctx.config.with_value(|c| c.catalog.clone());
    let pager = RwSignal::new(CategoryPager::new(
        props.category_id,
        props.initial_ids,
        catalog.initial_visible,
        catalog.page_size,
    ));
    let (message, set_message) = signal(None::<&'static str>);
    let load_rest = catalog.load_source == LoadSource::Rest;
    let catalog = StoredValue::new(catalog);

    let load_more = move |_| {
        let begin = if load_rest { CategoryPager::begin_load_rest } else { CategoryPager::begin_load };
        let Some(req) = pager.try_update(begin).flatten() else {
            return;
        };
        set_message.set(None);
        spawn_local(async move {
            let ep = ctx.endpoints();
            let filters = FilterState::from_query(&dom::location_search());
            match api::load_more_products(&ep, req, &filters).await {
                Ok(items) => {
                    let outcome = pager.try_update(|p| p.apply(req, items));
                    log::debug!("[Catalog] category {} skip {}: {:?}", req.category_id, req.skip, outcome);
                    if outcome == Some(LoadOutcome::NoMore) {
                        set_message.set(Some(text::NO_MORE_PRODUCTS));
                    }
                }
                Err(err) => {
                    log::error!("[Catalog] load more for category {} failed: {}", req.category_id, err);
                    pager.update(|p| p.fail());
                    ctx.report(&err, text::LOAD_MORE_FAILED);
                }
            }
        });
    };

    let collapse = move |_| {
        pager.update(|p| p.collapse());
        set_message.set(None);
    };

    let on_removed = Callback::new(move |product_id: u64| pager.update(|p| p.remove(product_id)));

    view! {
        <div class="loaded-products">
            <For
                each=move || pager.with(|p| p.appended().to_vec())
                key=|card| card.id
                children=move |card: ProductCard| {
                    let url = catalog.with_value(|c| c.product_url(card.id));
                    view! { <LoadedCard card=card url=url on_removed=on_removed /> }
                }
            />
        </div>
        {move || message.get().map(|m| view! { <div class="load-more-message">{m}</div> })}
        <div class="load-more-controls">
            <Show when=move || pager.with(|p| p.can_load_more() || p.is_loading())>
                <button
                    class="load-more-btn"
                    disabled=move || pager.with(|p| p.is_loading())
                    on:click=load_more
                >
                    {move || if pager.with(|p| p.is_loading()) { text::LOADING } else { "Показать ещё" }}
                </button>
            </Show>
            <Show when=move || pager.with(|p| p.can_collapse())>
                <button class="collapse-btn" on:click=collapse>
                    "Свернуть"
                </button>
            </Show>
        </div>
    }
}

//! Widget Mounting
//!
//! Server-rendered pages mark widget hosts with `data-widget="<name>"`. Each
//! host may carry `data-props` (initial data) and `data-config` (overrides
//! of the page config from `<script id="storefront-config">`). Every host
//! gets its own reactive root with an [`AppContext`] and a toast outlet.

use leptos::mount::mount_to;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use storefront_state::config::{layered_config, SiteConfig};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::components::*;
use crate::context::AppContext;
use crate::dom;
use crate::models::*;

const PAGE_CONFIG_ID: &str = "storefront-config";

type Render = Box<dyn FnOnce() -> AnyView>;

fn page_config() -> Option<String> {
    dom::document()?
        .get_element_by_id(PAGE_CONFIG_ID)?
        .text_content()
}

fn parse_props<P: DeserializeOwned>(widget: &str, raw: Option<&str>) -> Option<P> {
    match serde_json::from_str(raw.unwrap_or("{}")) {
        Ok(props) => Some(props),
        Err(e) => {
            log::error!("[Mount] bad data-props for '{}': {}", widget, e);
            None
        }
    }
}

/// Pick the component for a widget name; `None` when the name is unknown
/// or its props do not parse.
fn renderer(widget: &str, props: Option<&str>) -> Option<Render> {
    let render: Render = match widget {
        "cart" => {
            let props: CartProps = parse_props(widget, props)?;
            Box::new(move || view! { <CartView props=props /> }.into_any())
        }
        "add-to-cart" => {
            let product: ProductRef = parse_props(widget, props)?;
            Box::new(move || view! { <AddToCartButton product=product /> }.into_any())
        }
        "favorite" => {
            let props: FavoriteProps = parse_props(widget, props)?;
            Box::new(move || view! { <FavoriteButton product_id=props.product_id active=props.active /> }.into_any())
        }
        "catalog-filter" => {
            let props: CatalogFilterProps = parse_props(widget, props)?;
            Box::new(move || view! { <CatalogFilter props=props /> }.into_any())
        }
        "category-products" => {
            let props: CategoryProps = parse_props(widget, props)?;
            Box::new(move || view! { <CategoryProducts props=props /> }.into_any())
        }
        "product-gallery" => {
            let props: GalleryProps = parse_props(widget, props)?;
            Box::new(move || view! { <ProductGallery props=props /> }.into_any())
        }
        "specs-toggle" => {
            let props: SpecsProps = parse_props(widget, props)?;
            Box::new(move || view! { <SpecsToggle props=props /> }.into_any())
        }
        "review-form" => {
            let props: ReviewFormProps = parse_props(widget, props)?;
            Box::new(move || view! { <ReviewForm props=props /> }.into_any())
        }
        "reviews" => {
            let props: ReviewsProps = parse_props(widget, props)?;
            Box::new(move || view! { <ReviewsSection props=props /> }.into_any())
        }
        "support-chat" => Box::new(|| view! { <ChatWidget /> }.into_any()),
        "orders-list" => {
            let props: OrderHistoryProps = parse_props(widget, props)?;
            Box::new(move || view! { <OrdersList props=props /> }.into_any())
        }
        "order" => {
            let props: OrderProps = parse_props(widget, props)?;
            Box::new(move || view! { <OrderPage props=props /> }.into_any())
        }
        "order-status" => {
            let props: OrderStatusProps = parse_props(widget, props)?;
            Box::new(move || view! { <OrderStatusSelect props=props /> }.into_any())
        }
        "auth" => {
            let props: AuthProps = parse_props(widget, props)?;
            Box::new(move || view! { <AuthForms props=props /> }.into_any())
        }
        "account-tabs" => Box::new(|| view! { <AccountTabs /> }.into_any()),
        "profile-form" => {
            let props: ProfileProps = parse_props(widget, props)?;
            Box::new(move || view! { <ProfileForm props=props /> }.into_any())
        }
        "password-form" => Box::new(|| view! { <PasswordForm /> }.into_any()),
        "delete-account" => Box::new(|| view! { <DeleteAccount /> }.into_any()),
        "support-chat-close" => {
            let props: SupportChatProps = parse_props(widget, props)?;
            Box::new(move || view! { <SupportChatClose props=props /> }.into_any())
        }
        other => {
            log::warn!("[Mount] unknown widget '{}'", other);
            return None;
        }
    };
    Some(render)
}

fn mount_host(host: Element, page_config: Option<&str>, user_id: Option<u64>) -> bool {
    let Some(widget) = host.get_attribute("data-widget") else {
        return false;
    };
    let props = host.get_attribute("data-props");
    let overrides = host.get_attribute("data-config");
    let Some(render) = renderer(&widget, props.as_deref()) else {
        return false;
    };
    let Ok(host) = host.dyn_into::<HtmlElement>() else {
        log::warn!("[Mount] host of '{}' is not an HTML element", widget);
        return false;
    };

    let config: SiteConfig = layered_config(&[page_config, overrides.as_deref()]);
    mount_to(host, move || {
        provide_context(AppContext::new(user_id, config, signal(None)));
        view! {
            {render()}
            <Toast />
        }
    })
    .forget();
    log::debug!("[Mount] '{}' mounted", widget);
    true
}

/// Mount every widget host on the page. Returns how many were mounted.
pub fn mount_widgets() -> usize {
    let Some(document) = dom::document() else {
        return 0;
    };
    let Ok(hosts) = document.query_selector_all("[data-widget]") else {
        return 0;
    };
    let page_config = page_config();
    let user_id = dom::current_user_id();

    let mut mounted = 0;
    for i in 0..hosts.length() {
        let Some(host) = hosts.item(i).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        if mount_host(host, page_config.as_deref(), user_id) {
            mounted += 1;
        }
    }
    log::info!("[Mount] {} of {} widgets mounted (user: {:?})", mounted, hosts.length(), user_id);
    mounted
}

//! Widget Configuration
//!
//! Page size, endpoint paths and navigation targets for every widget. Each
//! struct deserializes from a partial JSON object over its defaults, so a host
//! element only needs to carry the fields it overrides.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::form_urlencoded;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid widget config: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Parse a JSON config blob. `None` or a blank string yields the defaults.
pub fn parse_config<T>(raw: Option<&str>) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Default,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(json) => Ok(serde_json::from_str(json)?),
    }
}

/// Like [`parse_config`], but falls back to the defaults on malformed input.
pub fn load_or_default<T>(raw: Option<&str>) -> T
where
    T: DeserializeOwned + Default,
{
    parse_config(raw).unwrap_or_else(|e| {
        log::warn!("[Config] {}, using defaults", e);
        T::default()
    })
}

/// Deep-merge JSON config layers, later layers winning, then deserialize.
///
/// Used to apply a widget's `data-config` over the page-wide config. Layers
/// that are blank are skipped; malformed ones are logged and skipped.
pub fn layered_config<T>(layers: &[Option<&str>]) -> T
where
    T: DeserializeOwned + Default,
{
    let mut merged = Value::Object(Default::default());
    for raw in layers.iter().flatten() {
        if raw.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(layer) => merge_json(&mut merged, layer),
            Err(e) => log::warn!("[Config] skipping layer: {}", e),
        }
    }
    serde_json::from_value(merged).unwrap_or_else(|e| {
        log::warn!("[Config] {}, using defaults", e);
        T::default()
    })
}

fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                merge_json(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Site-wide configuration, usually embedded as
/// `<script id="storefront-config" type="application/json">`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub endpoints: Endpoints,
    pub chat: ChatConfig,
    pub catalog: CatalogConfig,
    pub cart: CartConfig,
    pub orders: OrdersConfig,
    pub review: ReviewConfig,
}

/// Backend paths. Dynamic segments are appended by the helper methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub login: String,
    pub register: String,
    pub update_password: String,
    pub update_profile: String,
    pub delete_account: String,
    pub cart_add: String,
    pub cart_update: String,
    pub cart_clear: String,
    pub cart_base: String,
    pub products_load_more: String,
    pub products_by_category: String,
    pub products_filtered: String,
    pub favorites_toggle: String,
    pub chats_create: String,
    pub chats_my: String,
    pub chats_close: String,
    pub messages_create: String,
    pub messages_by_chat: String,
    pub orders_create: String,
    pub orders_cancel: String,
    pub orders_by_user: String,
    pub support_change_status: String,
    pub reviews_create: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "/auth/login".into(),
            register: "/auth/register".into(),
            update_password: "/auth/update/password".into(),
            update_profile: "/auth/update".into(),
            delete_account: "/auth/delete".into(),
            cart_add: "/cart/add".into(),
            cart_update: "/cart/update".into(),
            cart_clear: "/cart/clear".into(),
            cart_base: "/cart".into(),
            products_load_more: "/products/load-more/".into(),
            products_by_category: "/products/by_category/".into(),
            products_filtered: "/products/filtered".into(),
            favorites_toggle: "/favorites/toggle".into(),
            chats_create: "/chats/create".into(),
            chats_my: "/chats/my".into(),
            chats_close: "/chats/close".into(),
            messages_create: "/messages/create".into(),
            messages_by_chat: "/messages/by_chat".into(),
            orders_create: "/orders/create".into(),
            orders_cancel: "/orders/cancel_order".into(),
            orders_by_user: "/orders/user".into(),
            support_change_status: "/support/change_status".into(),
            reviews_create: "/reviews/create_by".into(),
        }
    }
}

fn join(base: &str, segment: impl std::fmt::Display) -> String {
    format!("{}/{}", base.trim_end_matches('/'), segment)
}

fn with_query<'a, I>(path: &str, params: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, &value);
    }
    let query = serializer.finish();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

impl Endpoints {
    pub fn cart_remove(&self, product_id: u64) -> String {
        join(&self.cart_base, product_id)
    }

    pub fn favorite_toggle(&self, product_id: u64) -> String {
        join(&self.favorites_toggle, product_id)
    }

    pub fn chat_close(&self, chat_id: u64) -> String {
        with_query(&self.chats_close, [("chat_id", chat_id.to_string())])
    }

    pub fn chat_messages(&self, chat_id: u64, page: u32, limit: u32) -> String {
        with_query(
            &join(&self.messages_by_chat, chat_id),
            [("page", page.to_string()), ("limit", limit.to_string())],
        )
    }

    pub fn order_cancel(&self, order_id: u64) -> String {
        join(&self.orders_cancel, order_id)
    }

    pub fn user_orders(&self, user_id: u64, page: u32, per_page: u32) -> String {
        with_query(
            &join(&self.orders_by_user, user_id),
            [("page", page.to_string()), ("per_page", per_page.to_string())],
        )
    }

    pub fn order_status(&self, order_id: u64) -> String {
        join(&self.support_change_status, order_id)
    }

    pub fn review_create(&self, product_id: u64) -> String {
        join(&self.reviews_create, product_id)
    }

    /// `GET /products/load-more/?category_id=&skip=&limit=&<filters>`
    pub fn load_more(
        &self,
        category_id: u64,
        skip: usize,
        limit: usize,
        filters: Vec<(&'static str, String)>,
    ) -> String {
        let mut params = vec![
            ("category_id", category_id.to_string()),
            ("skip", skip.to_string()),
            ("limit", limit.to_string()),
        ];
        params.extend(filters);
        with_query(&self.products_load_more, params)
    }

    /// `GET /products/by_category/?categoryId=&skip=`, everything after `skip`
    pub fn by_category(&self, category_id: u64, skip: usize) -> String {
        with_query(
            &self.products_by_category,
            [("categoryId", category_id.to_string()), ("skip", skip.to_string())],
        )
    }

    /// `GET /products/filtered?<query>`, `query` already encoded
    pub fn filtered(&self, query: &str) -> String {
        if query.is_empty() {
            self.products_filtered.clone()
        } else {
            format!("{}?{}", self.products_filtered, query)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Messages per history page
    pub page_size: u32,
    /// Topic sent when a chat is created by the first message
    pub default_topic: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            page_size: 15,
            default_topic: crate::text::CHAT_DEFAULT_TOPIC.into(),
        }
    }
}

/// How "load more" fetches the next cards of a category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadSource {
    /// `page_size` cards per click from `/products/load-more/`, filters applied
    #[default]
    Paged,
    /// All remaining cards at once from `/products/by_category/`
    Rest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Items requested per "load more" click
    pub page_size: usize,
    /// Items the server renders per category before any load-more
    pub initial_visible: usize,
    pub product_url_prefix: String,
    pub load_source: LoadSource,
    /// Apply filters by opening `/products/filtered` instead of reloading
    /// the current page
    pub filtered_page: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: 6,
            initial_visible: 6,
            product_url_prefix: "/products".into(),
            load_source: LoadSource::Paged,
            filtered_page: false,
        }
    }
}

impl CatalogConfig {
    pub fn product_url(&self, product_id: u64) -> String {
        join(&self.product_url_prefix, product_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    pub checkout_url: String,
    /// Checkout posts the order right away instead of opening `checkout_url`
    pub place_order: bool,
    /// Auth entry point used by every login prompt
    pub login_url: String,
    /// Toast lifetime in milliseconds
    pub toast_ms: u32,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            checkout_url: "/orders/checkout".into(),
            place_order: false,
            login_url: "/auth/create".into(),
            toast_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrdersConfig {
    pub per_page: u32,
    pub order_url_prefix: String,
    /// Order history page
    pub list_url: String,
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            per_page: 5,
            order_url_prefix: "/orders/order".into(),
            list_url: "/orders".into(),
        }
    }
}

impl OrdersConfig {
    pub fn order_url(&self, order_id: u64) -> String {
        join(&self.order_url_prefix, order_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    pub max_photos: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            max_photos: crate::review::MAX_PHOTOS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let cfg: SiteConfig =
            parse_config(Some(r#"{"chat":{"page_size":10},"endpoints":{"cart_add":"/api/cart/add"}}"#))
                .unwrap();
        assert_eq!(cfg.chat.page_size, 10);
        assert_eq!(cfg.chat.default_topic, crate::text::CHAT_DEFAULT_TOPIC);
        assert_eq!(cfg.endpoints.cart_add, "/api/cart/add");
        assert_eq!(cfg.endpoints.cart_clear, "/cart/clear");
    }

    #[test]
    fn test_blank_is_default() {
        let cfg: ChatConfig = parse_config(Some("   ")).unwrap();
        assert_eq!(cfg, ChatConfig::default());
        let cfg: ChatConfig = parse_config(None).unwrap();
        assert_eq!(cfg.page_size, 15);
    }

    #[test]
    fn test_malformed_falls_back() {
        assert!(parse_config::<CatalogConfig>(Some("{page_size:")).is_err());
        let cfg: CatalogConfig = load_or_default(Some("{page_size:"));
        assert_eq!(cfg, CatalogConfig::default());
    }

    #[test]
    fn test_layers_merge_deeply() {
        let site = r#"{"endpoints":{"cart_add":"/api/cart/add"},"chat":{"page_size":20}}"#;
        let widget = r#"{"chat":{"default_topic":"Заказ"}}"#;
        let cfg: SiteConfig = layered_config(&[Some(site), None, Some(widget)]);
        assert_eq!(cfg.endpoints.cart_add, "/api/cart/add");
        assert_eq!(cfg.chat.page_size, 20);
        assert_eq!(cfg.chat.default_topic, "Заказ");
    }

    #[test]
    fn test_bad_layer_is_skipped() {
        let cfg: SiteConfig = layered_config(&[Some(r#"{"orders":{"per_page":8}}"#), Some("{oops")]);
        assert_eq!(cfg.orders.per_page, 8);
    }

    #[test]
    fn test_endpoint_paths() {
        let ep = Endpoints::default();
        assert_eq!(ep.cart_remove(12), "/cart/12");
        assert_eq!(ep.chat_close(4), "/chats/close?chat_id=4");
        assert_eq!(ep.chat_messages(4, 2, 15), "/messages/by_chat/4?page=2&limit=15");
        assert_eq!(ep.user_orders(9, 3, 5), "/orders/user/9?page=3&per_page=5");
        assert_eq!(ep.review_create(77), "/reviews/create_by/77");
        assert_eq!(ep.orders_create, "/orders/create");
        assert_eq!(ep.by_category(2, 6), "/products/by_category/?categoryId=2&skip=6");
        assert_eq!(ep.filtered(""), "/products/filtered");
        assert_eq!(ep.filtered("colors=red&page=1"), "/products/filtered?colors=red&page=1");
    }

    #[test]
    fn test_catalog_modes_from_json() {
        let cfg: SiteConfig = parse_config(Some(
            r#"{"catalog":{"load_source":"rest","filtered_page":true},"cart":{"place_order":true}}"#,
        ))
        .unwrap();
        assert_eq!(cfg.catalog.load_source, LoadSource::Rest);
        assert!(cfg.catalog.filtered_page);
        assert!(cfg.cart.place_order);
        assert_eq!(SiteConfig::default().catalog.load_source, LoadSource::Paged);
    }

    #[test]
    fn test_load_more_url_encodes_filters() {
        let ep = Endpoints::default();
        let url = ep.load_more(3, 6, 6, vec![("built_in_memory", "256 GB".into())]);
        assert_eq!(
            url,
            "/products/load-more/?category_id=3&skip=6&limit=6&built_in_memory=256+GB"
        );
    }
}

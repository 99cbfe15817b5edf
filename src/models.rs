//! Widget Props
//!
//! Initial data the server embeds in a host element's `data-props` attribute.
//! Every field has a default so a bare host still mounts.

use serde::Deserialize;
use storefront_state::models::{CartLine, OrderCard, Review};
use storefront_state::orders::OrderStatus;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CartProps {
    pub lines: Vec<CartLine>,
    pub logged_in: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductRef {
    pub product_id: u64,
    pub in_stock: Option<bool>,
}

/// One option of a filter dropdown
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogFilterProps {
    pub categories: Vec<FilterOption>,
    pub colors: Vec<FilterOption>,
    pub memory: Vec<FilterOption>,
    pub logged_in: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CategoryProps {
    pub category_id: u64,
    /// Cards the server already rendered in this block
    pub initial_ids: Vec<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FavoriteProps {
    pub product_id: u64,
    pub active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GalleryProps {
    pub images: Vec<String>,
    pub alt: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpecsProps {
    /// Id of the server-rendered specs panel
    pub target: String,
    pub open: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewFormProps {
    pub product_id: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReviewsProps {
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderHistoryProps {
    pub user_id: u64,
    pub orders: Vec<OrderCard>,
    pub has_next: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderProps {
    pub order: OrderCard,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatusProps {
    pub order_id: u64,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthProps {
    pub tab: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileProps {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SupportChatProps {
    pub chat_id: u64,
    pub active: bool,
}

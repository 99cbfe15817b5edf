//! Orders
//!
//! Order status vocabulary, the account page's "load more" pager and the
//! in-place order board that cancel / status changes patch.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::auth::same_site_path;
use crate::config::OrdersConfig;
use crate::models::{OrderCard, OrderCreated, OrdersPage};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    /// Status this client does not know about; shown verbatim
    Other(String),
}

impl OrderStatus {
    /// Statuses offered by the back-office select
    pub const SELECTABLE: [OrderStatus; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Other(s) => s,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Ожидает подтверждения",
            Self::Processing => "В обработке",
            Self::Shipped => "Отправлен",
            Self::Delivered => "Доставлен",
            Self::Cancelled => "Отменён",
            Self::Other(s) => s,
        }
    }

    /// Badge class, e.g. `status-processing`
    pub fn css_class(&self) -> String {
        match self {
            Self::Other(_) => "status-unknown".to_string(),
            known => format!("status-{}", known.as_str()),
        }
    }

    pub fn is_cancellable(&self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Body of `PATCH /support/change_status/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeStatusRequest {
    pub new_status: OrderStatus,
}

/// Page to open after `POST /orders/create`: the same-site `redirect_url`,
/// else the new order's page, else the orders list.
pub fn created_order_target(resp: &OrderCreated, cfg: &OrdersConfig) -> String {
    if let Some(path) = resp.redirect_url.as_deref().and_then(same_site_path) {
        return path.to_string();
    }
    match resp.order_id {
        Some(id) => cfg.order_url(id),
        None => cfg.list_url.clone(),
    }
}

/// Parameters of one `GET /orders/user/{id}` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdersRequest {
    pub user_id: u64,
    pub page: u32,
    pub per_page: u32,
}

/// "Load more orders" pager. The server renders page 1.
#[derive(Debug, Clone)]
pub struct OrdersPager {
    user_id: u64,
    loaded_page: u32,
    per_page: u32,
    has_next: bool,
    loading: bool,
}

impl OrdersPager {
    pub fn new(user_id: u64, per_page: u32, has_next: bool) -> Self {
        Self {
            user_id,
            loaded_page: 1,
            per_page: per_page.max(1),
            has_next,
            loading: false,
        }
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin(&mut self) -> Option<OrdersRequest> {
        if self.loading || !self.has_next {
            return None;
        }
        self.loading = true;
        Some(OrdersRequest {
            user_id: self.user_id,
            page: self.loaded_page + 1,
            per_page: self.per_page,
        })
    }

    pub fn apply(&mut self, req: OrdersRequest, page: &OrdersPage) {
        self.loading = false;
        self.loaded_page = req.page;
        self.has_next = page.pagination.has_next && !page.orders.is_empty();
    }

    pub fn fail(&mut self) {
        self.loading = false;
    }
}

/// Rendered order cards plus their expand state
#[derive(Debug, Clone, Default)]
pub struct OrderBoard {
    orders: Vec<OrderCard>,
    expanded: HashSet<u64>,
}

impl OrderBoard {
    pub fn new(orders: Vec<OrderCard>) -> Self {
        Self {
            orders,
            expanded: HashSet::new(),
        }
    }

    pub fn orders(&self) -> &[OrderCard] {
        &self.orders
    }

    pub fn get(&self, order_id: u64) -> Option<&OrderCard> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// Append a fetched page, skipping orders already on the board.
    pub fn append(&mut self, orders: Vec<OrderCard>) -> usize {
        let before = self.orders.len();
        for order in orders {
            if self.get(order.id).is_none() {
                self.orders.push(order);
            }
        }
        self.orders.len() - before
    }

    pub fn can_cancel(&self, order_id: u64) -> bool {
        self.get(order_id).is_some_and(|o| o.status.is_cancellable())
    }

    pub fn set_status(&mut self, order_id: u64, status: OrderStatus) -> bool {
        match self.orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.status = status;
                true
            }
            None => false,
        }
    }

    pub fn apply_cancelled(&mut self, order_id: u64) -> bool {
        self.set_status(order_id, OrderStatus::Cancelled)
    }

    pub fn is_expanded(&self, order_id: u64) -> bool {
        self.expanded.contains(&order_id)
    }

    pub fn toggle_expanded(&mut self, order_id: u64) -> bool {
        if !self.expanded.remove(&order_id) {
            self.expanded.insert(order_id);
        }
        self.is_expanded(order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pagination;
    use rust_decimal::Decimal;

    fn order(id: u64, status: OrderStatus) -> OrderCard {
        OrderCard {
            id,
            status,
            total: Decimal::from(100),
            created_at: None,
            products: vec![],
        }
    }

    #[test]
    fn test_created_order_target() {
        let cfg = OrdersConfig::default();
        let resp: OrderCreated = serde_json::from_str(
            r#"{"message":"Заказ оформлен!","order_id":14,"redirect_url":"/orders/14"}"#,
        )
        .unwrap();
        assert_eq!(created_order_target(&resp, &cfg), "/orders/14");

        let foreign = OrderCreated {
            redirect_url: Some("https://evil.example/x".into()),
            ..resp.clone()
        };
        assert_eq!(created_order_target(&foreign, &cfg), "/orders/order/14");
        assert_eq!(created_order_target(&OrderCreated::default(), &cfg), "/orders");
    }

    #[test]
    fn test_status_wire_form() {
        let s: OrderStatus = serde_json::from_str(r#""Processing""#).unwrap();
        assert_eq!(s, OrderStatus::Processing);
        let s: OrderStatus = serde_json::from_str(r#""on_hold""#).unwrap();
        assert_eq!(s, OrderStatus::Other("on_hold".into()));
        assert_eq!(serde_json::to_string(&OrderStatus::Cancelled).unwrap(), r#""cancelled""#);
        let body = ChangeStatusRequest { new_status: OrderStatus::Shipped };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"new_status":"shipped"}"#);
    }

    #[test]
    fn test_only_open_orders_cancellable() {
        assert!(OrderStatus::Pending.is_cancellable());
        assert!(OrderStatus::Processing.is_cancellable());
        assert!(!OrderStatus::Shipped.is_cancellable());
        assert!(!OrderStatus::Cancelled.is_cancellable());
    }

    #[test]
    fn test_cancel_patches_in_place() {
        let mut board = OrderBoard::new(vec![order(1, OrderStatus::Pending), order(2, OrderStatus::Delivered)]);
        assert!(board.can_cancel(1));
        assert!(board.apply_cancelled(1));
        assert_eq!(board.get(1).map(|o| o.status.clone()), Some(OrderStatus::Cancelled));
        assert!(!board.can_cancel(1));
        assert!(!board.apply_cancelled(9));
    }

    #[test]
    fn test_expand_toggle() {
        let mut board = OrderBoard::new(vec![order(1, OrderStatus::Pending)]);
        assert!(board.toggle_expanded(1));
        assert!(!board.toggle_expanded(1));
    }

    #[test]
    fn test_pager_stops_at_last_page() {
        let mut pager = OrdersPager::new(4, 5, true);
        let req = pager.begin().unwrap();
        assert_eq!(req.page, 2);
        assert!(pager.begin().is_none());
        let page = OrdersPage {
            orders: vec![order(6, OrderStatus::Pending)],
            pagination: Pagination { page: 2, has_next: false },
        };
        pager.apply(req, &page);
        assert!(!pager.has_next());
        assert!(pager.begin().is_none());
    }

    #[test]
    fn test_append_skips_known() {
        let mut board = OrderBoard::new(vec![order(1, OrderStatus::Pending)]);
        assert_eq!(board.append(vec![order(1, OrderStatus::Pending), order(2, OrderStatus::Shipped)]), 1);
    }
}

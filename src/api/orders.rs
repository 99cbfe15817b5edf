//! Order Endpoints

use storefront_state::config::Endpoints;
use storefront_state::models::{OrderCreated, OrdersPage};
use storefront_state::orders::{ChangeStatusRequest, OrdersRequest};
use storefront_state::ApiError;

use super::{fetch_empty, fetch_json, get, patch, post, read_optional_json, send, with_json, without_body};

/// Turn the current cart into an order.
pub async fn create_order(ep: &Endpoints) -> Result<OrderCreated, ApiError> {
    let response = send(without_body(post(&ep.orders_create))?).await?;
    Ok(read_optional_json(response).await.unwrap_or_default())
}

pub async fn cancel_order(ep: &Endpoints, order_id: u64) -> Result<(), ApiError> {
    fetch_empty(without_body(patch(&ep.order_cancel(order_id)))?).await
}

pub async fn user_orders(ep: &Endpoints, req: OrdersRequest) -> Result<OrdersPage, ApiError> {
    fetch_json(without_body(get(&ep.user_orders(req.user_id, req.page, req.per_page)))?).await
}

pub async fn change_order_status(ep: &Endpoints, order_id: u64, body: &ChangeStatusRequest) -> Result<(), ApiError> {
    fetch_empty(with_json(patch(&ep.order_status(order_id)), body)?).await
}

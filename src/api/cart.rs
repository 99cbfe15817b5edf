//! Cart Endpoints

use storefront_state::cart::{AddRequest, UpdateRequest};
use storefront_state::config::Endpoints;
use storefront_state::models::CartUpdateResponse;
use storefront_state::ApiError;

use super::{delete, fetch_empty, patch, post, read_optional_json, send, with_json, without_body};

pub async fn add_to_cart(ep: &Endpoints, req: &AddRequest) -> Result<(), ApiError> {
    fetch_empty(with_json(post(&ep.cart_add), req)?).await
}

/// Servers that answer without a body are treated as "applied as requested".
pub async fn update_cart(ep: &Endpoints, req: &UpdateRequest) -> Result<CartUpdateResponse, ApiError> {
    let response = send(with_json(patch(&ep.cart_update), req)?).await?;
    Ok(read_optional_json(response).await.unwrap_or_default())
}

pub async fn remove_from_cart(ep: &Endpoints, product_id: u64) -> Result<(), ApiError> {
    fetch_empty(without_body(delete(&ep.cart_remove(product_id)))?).await
}

pub async fn clear_cart(ep: &Endpoints) -> Result<(), ApiError> {
    fetch_empty(without_body(delete(&ep.cart_clear))?).await
}

//! Review Endpoints

use storefront_state::config::Endpoints;
use storefront_state::review::ReviewPayload;
use storefront_state::ApiError;

use super::{fetch_empty, post, with_json};

pub async fn create_review(ep: &Endpoints, product_id: u64, payload: &ReviewPayload) -> Result<(), ApiError> {
    fetch_empty(with_json(post(&ep.review_create(product_id)), payload)?).await
}

//! Catalog Endpoints
//!
//! Per-category load-more and favorite toggling.

use storefront_state::catalog::{FilterState, LoadRequest};
use storefront_state::config::Endpoints;
use storefront_state::models::{FavoriteToggle, ProductCard};
use storefront_state::ApiError;

use super::{fetch_json, get, post, read_optional_json, send, without_body};

pub async fn load_more_products(
    ep: &Endpoints,
    req: LoadRequest,
    filters: &FilterState,
) -> Result<Vec<ProductCard>, ApiError> {
    let url = match req.limit {
        Some(limit) => ep.load_more(req.category_id, req.skip, limit, filters.filter_params()),
        None => ep.by_category(req.category_id, req.skip),
    };
    fetch_json(without_body(get(&url))?).await
}

pub async fn toggle_favorite(ep: &Endpoints, product_id: u64) -> Result<FavoriteToggle, ApiError> {
    let response = send(without_body(post(&ep.favorite_toggle(product_id)))?).await?;
    Ok(read_optional_json(response).await.unwrap_or_default())
}

//! Backend HTTP Bindings
//!
//! Frontend bindings to the storefront REST endpoints, organized by domain.
//! Every call goes through [`send`], which applies the common headers and
//! classifies the response into `Result<_, ApiError>`.

mod auth;
mod cart;
mod catalog;
mod chat;
mod orders;
mod reviews;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use storefront_state::ApiError;
use web_sys::RequestCredentials;

// Re-export all public items
pub use auth::*;
pub use cart::*;
pub use catalog::*;
pub use chat::*;
pub use orders::*;
pub use reviews::*;

// ========================
// Request Plumbing
// ========================

fn with_defaults(builder: RequestBuilder) -> RequestBuilder {
    builder
        .credentials(RequestCredentials::Include)
        .header("Accept", "application/json")
        .header("X-Requested-With", "XMLHttpRequest")
}

fn get(url: &str) -> RequestBuilder {
    with_defaults(Request::get(url))
}

fn post(url: &str) -> RequestBuilder {
    with_defaults(Request::post(url))
}

fn patch(url: &str) -> RequestBuilder {
    with_defaults(Request::patch(url))
}

fn put(url: &str) -> RequestBuilder {
    with_defaults(Request::put(url))
}

fn delete(url: &str) -> RequestBuilder {
    with_defaults(Request::delete(url))
}

/// Attach a JSON body (sets `Content-Type`).
fn with_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Request, ApiError> {
    builder
        .json(body)
        .map_err(|e| ApiError::Decode(format!("request body: {}", e)))
}

fn without_body(builder: RequestBuilder) -> Result<Request, ApiError> {
    builder
        .header("Content-Type", "application/json")
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))
}

/// Send a request; any non-2xx status becomes an error.
async fn send(request: Request) -> Result<Response, ApiError> {
    let method = request.method();
    let url = request.url();
    let response = request.send().await.map_err(|e| {
        log::error!("[API] {:?} {} failed: {}", method, url, e);
        ApiError::Network(e.to_string())
    })?;

    if response.ok() {
        log::debug!("[API] {:?} {} -> {}", method, url, response.status());
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let err = ApiError::from_response(status, &body);
    log::warn!("[API] {:?} {} -> {}", method, url, err);
    Err(err)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Body that may be empty (204, redirects) or not JSON at all.
async fn read_optional_json<T: DeserializeOwned>(response: Response) -> Option<T> {
    let text = response.text().await.ok()?;
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    serde_json::from_str(text).ok()
}

async fn fetch_json<T: DeserializeOwned>(request: Request) -> Result<T, ApiError> {
    read_json(send(request).await?).await
}

async fn fetch_empty(request: Request) -> Result<(), ApiError> {
    send(request).await.map(|_| ())
}

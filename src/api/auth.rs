//! Auth Endpoints
//!
//! Login, registration and account management.

use storefront_state::auth::{LoginForm, PasswordChange, ProfileUpdate, RegisterForm};
use storefront_state::config::Endpoints;
use storefront_state::models::AuthResponse;
use storefront_state::ApiError;

use super::{delete, fetch_empty, patch, post, put, read_optional_json, send, with_json, without_body};

// ========================
// Commands
// ========================

/// A successful login may answer with an empty body or a redirect.
pub async fn login(ep: &Endpoints, form: &LoginForm) -> Result<Option<AuthResponse>, ApiError> {
    let response = send(with_json(post(&ep.login), form)?).await?;
    Ok(read_optional_json(response).await)
}

pub async fn register(ep: &Endpoints, form: &RegisterForm) -> Result<Option<AuthResponse>, ApiError> {
    let response = send(with_json(post(&ep.register), form)?).await?;
    Ok(read_optional_json(response).await)
}

pub async fn update_password(ep: &Endpoints, change: &PasswordChange) -> Result<(), ApiError> {
    fetch_empty(with_json(patch(&ep.update_password), change)?).await
}

pub async fn update_profile(ep: &Endpoints, update: &ProfileUpdate) -> Result<(), ApiError> {
    fetch_empty(with_json(put(&ep.update_profile), update)?).await
}

pub async fn delete_account(ep: &Endpoints) -> Result<(), ApiError> {
    fetch_empty(without_body(delete(&ep.delete_account))?).await
}

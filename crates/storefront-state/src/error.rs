//! Error Taxonomy
//!
//! Every backend failure ends up as an [`ApiError`]; every client-side check
//! that blocks a request ends up as a [`ValidationError`]. Widgets never act on
//! either directly, they turn them into a [`Notice`].

use serde_json::Value;
use thiserror::Error;

use crate::text;

/// Failure of a single backend round-trip
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (offline, CORS, aborted)
    #[error("network error: {0}")]
    Network(String),

    /// HTTP 401: the session cookie is missing or expired, or the
    /// credentials were rejected (`detail` says which)
    #[error("unauthorized: {}", .detail.as_deref().unwrap_or("<no detail>"))]
    Unauthorized { detail: Option<String> },

    /// Any other non-2xx status
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("<no detail>"))]
    Http { status: u16, detail: Option<String> },

    /// 2xx response whose body did not match the expected shape
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-2xx response from its status code and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        if status == 401 {
            return Self::Unauthorized { detail };
        }
        Self::Http { status, detail }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text shown to the user: the server's `detail` when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Http { detail: Some(detail), .. } | Self::Unauthorized { detail: Some(detail) } => {
                detail.clone()
            }
            _ => fallback.to_string(),
        }
    }

    /// Like [`ApiError::user_message`], but a lost connection says so.
    pub fn inline_message(&self, fallback: &str) -> String {
        match self {
            Self::Network(_) => text::NETWORK_FAILURE.to_string(),
            other => other.user_message(fallback),
        }
    }
}

/// Pull a human readable `detail` out of a FastAPI style error body.
///
/// Plain strings are returned as-is. Validation error lists
/// (`[{"loc": [...], "msg": "..."}]`) are joined by `"; "`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let detail = value.get("detail")?;
    let text = match detail {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Client-side check that blocks a request before it is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Пароли не совпадают")]
    PasswordMismatch,

    #[error("Заполните поле «{0}»")]
    MissingField(&'static str),

    #[error("Максимальное количество изображений - {max}")]
    TooManyPhotos { max: usize },

    #[error("Добавьте хотя бы одно изображение")]
    NoPhotos,

    #[error("Оценка должна быть от 1 до 5")]
    GradeOutOfRange,

    #[error("Сообщение не может быть пустым")]
    EmptyMessage,

    #[error("Чат ещё не готов, попробуйте позже")]
    ChatUnavailable,
}

/// What the user gets told after a failed action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Ask to re-authenticate; the payload is the prompt text
    LoginPrompt(String),
    /// Blocking alert with the given text
    Alert(String),
}

impl Notice {
    /// Map a failure to a notice. 401 always becomes a login prompt.
    pub fn from_error(err: &ApiError, fallback: &str) -> Self {
        match err {
            ApiError::Unauthorized { .. } => Self::LoginPrompt(text::LOGIN_REQUIRED.to_string()),
            ApiError::Network(_) => Self::Alert(text::NETWORK_FAILURE.to_string()),
            other => Self::Alert(other.user_message(fallback)),
        }
    }

    /// Same as [`Notice::from_error`], but 401 uses the "session expired" prompt.
    pub fn from_session_error(err: &ApiError, fallback: &str) -> Self {
        match err {
            ApiError::Unauthorized { .. } => Self::LoginPrompt(text::SESSION_EXPIRED.to_string()),
            other => Self::from_error(other, fallback),
        }
    }

    pub fn is_login_prompt(&self) -> bool {
        matches!(self, Self::LoginPrompt(_))
    }

    /// Full text for the `confirm()`/`alert()` dialog
    pub fn dialog_text(&self) -> String {
        match self {
            Self::LoginPrompt(msg) => format!("{}. {}", msg.trim_end_matches('.'), text::GO_TO_LOGIN),
            Self::Alert(msg) => msg.clone(),
        }
    }
}

impl From<ValidationError> for Notice {
    fn from(err: ValidationError) -> Self {
        Self::Alert(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_is_distinct() {
        let err = ApiError::from_response(401, r#"{"detail":"Not authenticated"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
        assert_eq!(Notice::from_error(&err, "x"), Notice::LoginPrompt(text::LOGIN_REQUIRED.to_string()));
    }

    #[test]
    fn test_detail_string() {
        let err = ApiError::from_response(400, r#"{"detail":"Недостаточно товара"}"#);
        assert_eq!(err.user_message("fallback"), "Недостаточно товара");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_detail_fallback_on_non_json() {
        let err = ApiError::from_response(500, "Internal Server Error");
        assert_eq!(err, ApiError::Http { status: 500, detail: None });
        assert_eq!(err.user_message("Ошибка"), "Ошибка");
    }

    #[test]
    fn test_detail_validation_list() {
        let body = r#"{"detail":[{"loc":["body","count"],"msg":"field required"},{"loc":["body","id"],"msg":"value is not a valid integer"}]}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("field required; value is not a valid integer")
        );
    }

    #[test]
    fn test_inline_message() {
        let offline = ApiError::Network("Failed to fetch".into());
        assert_eq!(offline.inline_message("Ошибка входа"), text::NETWORK_FAILURE);
        let bare = ApiError::Unauthorized { detail: None };
        assert_eq!(bare.inline_message("Ошибка входа"), "Ошибка входа");
        let err = ApiError::from_response(400, r#"{"detail":"Неверный пароль"}"#);
        assert_eq!(err.inline_message("Ошибка входа"), "Неверный пароль");
    }

    #[test]
    fn test_rejected_login_shows_server_detail() {
        let err = ApiError::from_response(401, r#"{"detail":"Неверный пароль"}"#);
        assert_eq!(err.inline_message("Ошибка входа"), "Неверный пароль");
        assert_eq!(err.user_message("Ошибка входа"), "Неверный пароль");
        // Widgets acting on a session still get the login prompt
        assert_eq!(
            Notice::from_session_error(&err, "x"),
            Notice::LoginPrompt(text::SESSION_EXPIRED.to_string())
        );
    }

    #[test]
    fn test_blank_detail_is_none() {
        assert_eq!(extract_detail(r#"{"detail":"  "}"#), None);
        assert_eq!(extract_detail(r#"{"detail":null}"#), None);
        assert_eq!(extract_detail(r#"{"message":"x"}"#), None);
    }

    #[test]
    fn test_network_notice_uses_connection_text() {
        let notice = Notice::from_error(&ApiError::Network("TypeError".into()), "fallback");
        assert_eq!(notice, Notice::Alert(text::NETWORK_FAILURE.to_string()));
    }

    #[test]
    fn test_login_prompt_dialog_text() {
        let notice = Notice::LoginPrompt(text::LOGIN_REQUIRED.to_string());
        assert_eq!(
            notice.dialog_text(),
            "Необходимо авторизоваться. Перейти на страницу входа?"
        );
    }
}

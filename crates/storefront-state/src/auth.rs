//! Auth and Account Forms
//!
//! Request bodies of the login, registration, profile and password forms,
//! with the checks that must pass before anything is sent.

use serde::Serialize;

use crate::error::ValidationError;
use crate::models::AuthResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthTab {
    #[default]
    Login,
    Register,
}

impl AuthTab {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "register" => Self::Register,
            _ => Self::Login,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.email, "Email")?;
        require(&self.password, "Пароль")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.email, "Email")?;
        require(&self.password, "Пароль")?;
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Body of `PATCH /auth/update/password`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub new_password_one_more_time: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.old_password, "Текущий пароль")?;
        require(&self.new_password, "Новый пароль")?;
        if self.new_password != self.new_password_one_more_time {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Body of `PUT /auth/update`; blank fields are left out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProfileUpdate {
    pub fn from_fields(first_name: &str, last_name: &str, email: &str) -> Self {
        let keep = |v: &str| Some(v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            first_name: keep(first_name),
            last_name: keep(last_name),
            email: keep(email),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }

    /// At least one field has to be filled in for the update to mean anything.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::MissingField("Имя"));
        }
        Ok(())
    }
}

/// Where to go after a successful login or registration.
///
/// Only same-site paths from the response are honoured.
pub fn redirect_target(resp: Option<&AuthResponse>) -> String {
    resp.and_then(|r| same_site_path(r.redirect_url.as_deref()?))
        .unwrap_or("/")
        .to_string()
}

/// `url` trimmed, if it is a path on this site (`/...` but not `//...`).
pub fn same_site_path(url: &str) -> Option<&str> {
    Some(url.trim()).filter(|url| url.starts_with('/') && !url.starts_with("//"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_password_mismatch() {
        let form = RegisterForm {
            email: "a@b.c".into(),
            password: "secret1".into(),
            confirm_password: "secret2".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn test_login_requires_fields() {
        let form = LoginForm { email: " ".into(), password: "x".into() };
        assert_eq!(form.validate(), Err(ValidationError::MissingField("Email")));
    }

    #[test]
    fn test_password_change_body() {
        let change = PasswordChange {
            old_password: "a".into(),
            new_password: "b".into(),
            new_password_one_more_time: "b".into(),
        };
        assert!(change.validate().is_ok());
        let body = serde_json::to_string(&change).unwrap();
        assert!(body.contains(r#""new_password_one_more_time":"b""#));
    }

    #[test]
    fn test_profile_update_skips_blank() {
        let update = ProfileUpdate::from_fields("Иван", " ", "");
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"first_name":"Иван"}"#);
        assert!(ProfileUpdate::from_fields("", "", "").is_empty());
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_blank_profile_update_is_rejected() {
        let update = ProfileUpdate::from_fields(" ", "", "  ");
        assert_eq!(update.validate(), Err(ValidationError::MissingField("Имя")));
    }

    #[test]
    fn test_redirect_target() {
        assert_eq!(redirect_target(None), "/");
        let resp = AuthResponse { redirect_url: Some("/account".into()) };
        assert_eq!(redirect_target(Some(&resp)), "/account");
        let resp = AuthResponse { redirect_url: Some("//evil.example".into()) };
        assert_eq!(redirect_target(Some(&resp)), "/");
    }

    #[test]
    fn test_tab_parse() {
        assert_eq!(AuthTab::parse("register"), AuthTab::Register);
        assert_eq!(AuthTab::parse("other"), AuthTab::Login);
    }
}

//! Widget Context
//!
//! Page-level values shared by every component of a mounted widget, provided
//! via the Leptos Context API.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront_state::config::{Endpoints, SiteConfig};
use storefront_state::{ApiError, Notice};

use crate::dom;

#[derive(Clone, Copy)]
pub struct AppContext {
    /// Logged-in user from `<meta name="user-id">`
    pub user_id: Option<u64>,
    /// Page config with this widget's overrides applied
    pub config: StoredValue<SiteConfig>,
    /// Transient toast text - read
    pub toast: ReadSignal<Option<String>>,
    /// Transient toast text - write
    set_toast: WriteSignal<Option<String>>,
    /// Bumped on every toast so an older timer does not hide a newer toast
    toast_seq: StoredValue<u32>,
}

impl AppContext {
    pub fn new(
        user_id: Option<u64>,
        config: SiteConfig,
        toast: (ReadSignal<Option<String>>, WriteSignal<Option<String>>),
    ) -> Self {
        Self {
            user_id,
            config: StoredValue::new(config),
            toast: toast.0,
            set_toast: toast.1,
            toast_seq: StoredValue::new(0),
        }
    }

    pub fn endpoints(&self) -> Endpoints {
        self.config.with_value(|c| c.endpoints.clone())
    }

    pub fn login_url(&self) -> String {
        self.config.with_value(|c| c.cart.login_url.clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.user_id.is_some()
    }

    /// Show `message` for the configured toast lifetime.
    pub fn show_toast(&self, message: impl Into<String>) {
        let seq = self.toast_seq.get_value().wrapping_add(1);
        self.toast_seq.set_value(seq);
        self.set_toast.set(Some(message.into()));

        let ms = self.config.with_value(|c| c.cart.toast_ms);
        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(ms).await;
            if ctx.toast_seq.get_value() == seq {
                ctx.set_toast.set(None);
            }
        });
    }

    pub fn notify(&self, notice: &Notice) {
        dom::show_notice(notice, &self.login_url());
    }

    /// Report a failed call: 401 prompts for login, anything else alerts.
    pub fn report(&self, err: &ApiError, fallback: &str) {
        self.notify(&Notice::from_error(err, fallback));
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}

//! Browser Helpers
//!
//! Thin wrappers over `window`, `document`, `location` and `history`. Missing
//! browser objects are treated as "nothing to do" rather than errors.

use storefront_state::Notice;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlMetaElement, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn alert(message: &str) {
    if let Some(w) = window() {
        let _ = w.alert_with_message(message);
    }
}

pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn navigate(url: &str) {
    if let Some(w) = window() {
        let _ = w.location().set_href(url);
    }
}

pub fn reload() {
    if let Some(w) = window() {
        let _ = w.location().reload();
    }
}

/// `location.search` including the leading `?`, or empty.
pub fn location_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

fn location_pathname() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn url_with_query(query: &str) -> String {
    let path = location_pathname();
    if query.is_empty() {
        path
    } else {
        format!("{}?{}", path, query)
    }
}

/// Push a new query string onto the history stack.
pub fn push_query(query: &str) {
    if let Some(history) = window().and_then(|w| w.history().ok()) {
        let _ = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url_with_query(query)));
    }
}

/// Replace the current query string without a new history entry.
pub fn replace_query(query: &str) {
    if let Some(history) = window().and_then(|w| w.history().ok()) {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url_with_query(query)));
    }
}

/// Content of `<meta name="...">`
pub fn meta_content(name: &str) -> Option<String> {
    let selector = format!("meta[name=\"{}\"]", name);
    let meta = document()?.query_selector(&selector).ok()??;
    let content = meta.dyn_into::<HtmlMetaElement>().ok()?.content();
    let content = content.trim();
    (!content.is_empty()).then(|| content.to_string())
}

/// Id of the logged-in user from `<meta name="user-id">`
pub fn current_user_id() -> Option<u64> {
    meta_content("user-id")?.parse().ok()
}

/// Minutes to add to local time to get UTC, as `Date.getTimezoneOffset()`.
pub fn timezone_offset_minutes() -> i32 {
    js_sys::Date::new_0().get_timezone_offset() as i32
}

pub fn set_body_scroll_locked(locked: bool) {
    let Some(body) = document().and_then(|d| d.body()) else {
        return;
    };
    let value = if locked { "hidden" } else { "auto" };
    let _ = body.style().set_property("overflow", value);
}

/// Show or hide a server-rendered element by id.
pub fn set_element_visible(id: &str, visible: bool) {
    let Some(el) = document().and_then(|d| d.get_element_by_id(id)) else {
        return;
    };
    if let Ok(el) = el.dyn_into::<HtmlElement>() {
        let value = if visible { "block" } else { "none" };
        let _ = el.style().set_property("display", value);
    }
}

/// Remove the closest ancestor of `el` matching `selector`.
pub fn remove_closest(el: &Element, selector: &str) {
    if let Ok(Some(container)) = el.closest(selector) {
        container.remove();
    }
}

/// Present a notice: login prompts ask first and redirect, alerts just show.
pub fn show_notice(notice: &Notice, login_url: &str) {
    match notice {
        Notice::LoginPrompt(_) => {
            if confirm(&notice.dialog_text()) {
                navigate(login_url);
            }
        }
        Notice::Alert(text) => alert(text),
    }
}

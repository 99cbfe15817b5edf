//! Storefront Frontend Entry Point

mod api;
mod components;
mod context;
mod dom;
mod models;
mod mount;
mod store;

fn main() {
    console_error_panic_hook::set_once();

    let level = dom::meta_content("log-level").unwrap_or_else(|| "info".to_string());
    if let Err(e) = rolling_logger::init_logger(&level, rolling_logger::DEFAULT_CAPACITY) {
        web_sys::console::warn_1(&format!("logger already installed: {}", e).into());
    }

    mount::mount_widgets();
}

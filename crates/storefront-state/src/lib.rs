//! Storefront widget state
//!
//! Platform-independent core of the storefront widgets: wire models, widget
//! state machines, validation and the error taxonomy. The wasm UI crate only
//! renders these and performs the HTTP calls they describe.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod gallery;
pub mod inflight;
pub mod models;
pub mod orders;
pub mod profile;
pub mod review;
pub mod text;

pub use error::{ApiError, Notice, ValidationError};

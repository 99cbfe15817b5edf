//! UI Components
//!
//! Leptos widgets mounted onto server-rendered pages.

mod account;
mod add_to_cart_button;
mod auth_forms;
mod cart_view;
mod catalog_filter;
mod category_products;
mod chat_widget;
mod confirm_button;
mod favorite_button;
mod order_card;
mod order_status_select;
mod orders_list;
mod product_gallery;
mod review_form;
mod reviews_section;
mod specs_toggle;
mod support_chat_close;
mod toast;

pub use account::{AccountTabs, DeleteAccount, PasswordForm, ProfileForm};
pub use add_to_cart_button::AddToCartButton;
pub use auth_forms::AuthForms;
pub(crate) use auth_forms::Field;
pub use cart_view::CartView;
pub use catalog_filter::CatalogFilter;
pub use category_products::CategoryProducts;
pub use chat_widget::ChatWidget;
pub use confirm_button::ConfirmButton;
pub use favorite_button::FavoriteButton;
pub use order_card::{OrderCardView, OrderPage};
pub use order_status_select::OrderStatusSelect;
pub use orders_list::OrdersList;
pub use product_gallery::{MiniGallery, ProductGallery};
pub use review_form::ReviewForm;
pub use reviews_section::ReviewsSection;
pub use specs_toggle::SpecsToggle;
pub use support_chat_close::SupportChatClose;
pub use toast::Toast;

//! Cart State
//!
//! In-place projection of the server cart. Every mutation is confirmed by the
//! backend first; the local lines are only patched from its answer.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::CartConfig;
use crate::models::{CartLine, CartUpdateResponse};
use crate::text;

/// `POST /cart/add`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddRequest {
    pub product_id: u64,
    pub count: u32,
}

/// `PATCH /cart/update`: `add` increments, otherwise decrements by `count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateRequest {
    pub product_id: u64,
    pub add: bool,
    pub count: u32,
}

impl UpdateRequest {
    pub fn increment(product_id: u64) -> Self {
        Self { product_id, add: true, count: 1 }
    }

    pub fn decrement(product_id: u64) -> Self {
        Self { product_id, add: false, count: 1 }
    }

    fn delta(&self) -> i64 {
        let count = i64::from(self.count.max(1));
        if self.add {
            count
        } else {
            -count
        }
    }
}

/// Effect of a mutation on one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    Quantity(u32),
    Removed,
    /// No line for that product is rendered
    Missing,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: u64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Add `delta` to a line's quantity. Dropping to zero or below removes it.
    pub fn apply_delta(&mut self, product_id: u64, delta: i64) -> LineChange {
        let Some(pos) = self.lines.iter().position(|l| l.product_id == product_id) else {
            return LineChange::Missing;
        };
        let next = i64::from(self.lines[pos].quantity) + delta;
        if next <= 0 {
            self.lines.remove(pos);
            return LineChange::Removed;
        }
        let quantity = u32::try_from(next).unwrap_or(u32::MAX);
        self.lines[pos].quantity = quantity;
        LineChange::Quantity(quantity)
    }

    /// Fold a successful `PATCH /cart/update` answer into the cart.
    ///
    /// `removed` wins; an explicit quantity from the server wins over the
    /// locally computed one.
    pub fn apply_update(&mut self, req: &UpdateRequest, resp: &CartUpdateResponse) -> LineChange {
        if resp.removed {
            return self.remove(req.product_id);
        }
        match resp.quantity {
            Some(0) => self.remove(req.product_id),
            Some(quantity) => match self.lines.iter_mut().find(|l| l.product_id == req.product_id) {
                Some(line) => {
                    line.quantity = quantity;
                    LineChange::Quantity(quantity)
                }
                None => LineChange::Missing,
            },
            None => self.apply_delta(req.product_id, req.delta()),
        }
    }

    pub fn remove(&mut self, product_id: u64) -> LineChange {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() < before {
            LineChange::Removed
        } else {
            LineChange::Missing
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Result of clicking the checkout button
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutDecision {
    Navigate(String),
    /// Post the order (`POST /orders/create`) from the cart page
    PlaceOrder,
    /// Button is disabled: ask to log in, never send anything
    LoginPrompt(String),
}

pub fn checkout(disabled: bool, cfg: &CartConfig) -> CheckoutDecision {
    if disabled {
        CheckoutDecision::LoginPrompt(text::CHECKOUT_LOGIN_REQUIRED.to_string())
    } else if cfg.place_order {
        CheckoutDecision::PlaceOrder
    } else {
        CheckoutDecision::Navigate(cfg.checkout_url.clone())
    }
}

/// Checkout is disabled for anonymous users and empty carts.
pub fn checkout_disabled(logged_in: bool, cart: &Cart) -> bool {
    !logged_in || cart.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: u64, quantity: u32, price: i64) -> CartLine {
        CartLine {
            product_id,
            name: format!("p{}", product_id),
            quantity,
            unit_price: Decimal::from(price),
            image_url: None,
        }
    }

    #[test]
    fn test_increment_then_decrement_is_identity() {
        let mut cart = Cart::new(vec![line(1, 2, 100)]);
        cart.apply_delta(1, 1);
        cart.apply_delta(1, -1);
        assert_eq!(cart.line(1).map(|l| l.quantity), Some(2));
    }

    #[test]
    fn test_decrement_to_zero_removes() {
        let mut cart = Cart::new(vec![line(1, 1, 100), line(2, 3, 50)]);
        assert_eq!(cart.apply_delta(1, -1), LineChange::Removed);
        assert!(cart.line(1).is_none());
        assert_eq!(cart.total(), Decimal::from(150));
    }

    #[test]
    fn test_removed_flag_wins() {
        let mut cart = Cart::new(vec![line(1, 5, 100)]);
        let req = UpdateRequest::decrement(1);
        let resp = CartUpdateResponse { removed: true, quantity: Some(4) };
        assert_eq!(cart.apply_update(&req, &resp), LineChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_server_quantity_wins() {
        let mut cart = Cart::new(vec![line(1, 5, 100)]);
        let req = UpdateRequest::increment(1);
        let resp = CartUpdateResponse { removed: false, quantity: Some(9) };
        assert_eq!(cart.apply_update(&req, &resp), LineChange::Quantity(9));
        let resp = CartUpdateResponse::default();
        assert_eq!(cart.apply_update(&req, &resp), LineChange::Quantity(10));
    }

    #[test]
    fn test_unknown_product_is_missing() {
        let mut cart = Cart::default();
        assert_eq!(cart.apply_delta(3, 1), LineChange::Missing);
        assert_eq!(cart.remove(3), LineChange::Missing);
    }

    #[test]
    fn test_checkout_gating() {
        let cfg = CartConfig::default();
        assert_eq!(
            checkout(true, &cfg),
            CheckoutDecision::LoginPrompt(text::CHECKOUT_LOGIN_REQUIRED.to_string())
        );
        assert_eq!(checkout(false, &cfg), CheckoutDecision::Navigate("/orders/checkout".into()));
        assert!(checkout_disabled(false, &Cart::new(vec![line(1, 1, 1)])));
        assert!(checkout_disabled(true, &Cart::default()));

        let direct = CartConfig { place_order: true, ..CartConfig::default() };
        assert_eq!(checkout(false, &direct), CheckoutDecision::PlaceOrder);
        assert!(matches!(checkout(true, &direct), CheckoutDecision::LoginPrompt(_)));
    }

    #[test]
    fn test_request_bodies() {
        let body = serde_json::to_string(&UpdateRequest::decrement(7)).unwrap();
        assert_eq!(body, r#"{"product_id":7,"add":false,"count":1}"#);
    }
}

//! End-to-end widget scenarios driven through the public API with a fake
//! backend in place of the HTTP layer.

use chrono::{Duration, TimeZone, Utc};
use storefront_state::cart::{checkout, Cart, CheckoutDecision, LineChange};
use storefront_state::catalog::{FilterKind, FilterState};
use storefront_state::chat::{ChatPhase, ChatWidgetState, PageOutcome};
use storefront_state::config::CartConfig;
use storefront_state::gallery::Gallery;
use storefront_state::models::{CartLine, ChatMessage, ChatSummary};
use storefront_state::review::{build_payload, MAX_PHOTOS};
use storefront_state::{ApiError, Notice, ValidationError};

/// Chat backend holding `total` messages, served newest first in pages.
struct FakeChatServer {
    messages: Vec<ChatMessage>,
    fetches: usize,
}

impl FakeChatServer {
    fn new(total: usize) -> Self {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let messages = (0..total as u64)
            .map(|i| ChatMessage {
                id: i + 1,
                sender_id: if i % 2 == 0 { 1 } else { 2 },
                sender_name: None,
                message: format!("message {}", i),
                // Consecutive pairs share a timestamp so ties are broken by id
                created_at: base + Duration::seconds((i / 2) as i64),
            })
            .collect();
        Self { messages, fetches: 0 }
    }

    fn page(&mut self, page: u32, limit: u32) -> Vec<ChatMessage> {
        self.fetches += 1;
        let mut newest_first = self.messages.clone();
        newest_first.reverse();
        newest_first
            .into_iter()
            .skip(((page - 1) * limit) as usize)
            .take(limit as usize)
            .collect()
    }
}

fn drain_history(total: usize, page_size: u32) -> (ChatWidgetState, FakeChatServer) {
    let mut server = FakeChatServer::new(total);
    let mut state = ChatWidgetState::new(1, page_size, "topic");
    state.open();
    let mut req = state
        .bootstrap_succeeded(&[ChatSummary { id: 5, topic: None, active: true }])
        .expect("active chat");

    loop {
        let page = server.page(req.page, req.limit);
        state.history.apply_page(req, page);

        let created: Vec<_> = state.history.entries().iter().map(|e| e.message.created_at).collect();
        assert!(created.windows(2).all(|w| w[0] <= w[1]), "history out of order");

        match state.on_scroll(0) {
            Some(next) => req = next,
            None => break,
        }
    }
    (state, server)
}

#[test]
fn chat_pagination_fetch_count() {
    for (total, page_size) in [(0, 15), (7, 15), (15, 15), (31, 15), (45, 15), (10, 3)] {
        let (state, server) = drain_history(total, page_size);
        let expected = total / page_size as usize + 1;
        assert_eq!(server.fetches, expected, "N={} P={}", total, page_size);
        assert_eq!(state.history.entries().len(), total);
        assert!(!state.history.has_more());
    }
}

#[test]
fn chat_no_fetch_after_end_of_history() {
    let (mut state, _) = drain_history(20, 15);
    assert!(state.on_scroll(0).is_none());
    assert!(state.on_scroll(0).is_none());
    assert_eq!(state.phase(), ChatPhase::Active(5));
}

#[test]
fn chat_empty_history_shows_notice() {
    let mut server = FakeChatServer::new(0);
    let mut state = ChatWidgetState::new(1, 15, "topic");
    state.open();
    let req = state
        .bootstrap_succeeded(&[ChatSummary { id: 5, topic: None, active: true }])
        .expect("active chat");
    let page = server.page(req.page, req.limit);
    assert_eq!(state.history.apply_page(req, page), PageOutcome::Empty);
}

#[test]
fn cart_increment_decrement_round_trip() {
    let mut cart = Cart::new(vec![CartLine {
        product_id: 3,
        name: "Наушники".into(),
        quantity: 1,
        unit_price: rust_decimal::Decimal::from(2990),
        image_url: None,
    }]);
    assert_eq!(cart.apply_delta(3, 1), LineChange::Quantity(2));
    assert_eq!(cart.apply_delta(3, -1), LineChange::Quantity(1));
    assert_eq!(cart.apply_delta(3, -1), LineChange::Removed);
    assert!(cart.is_empty());
}

#[test]
fn disabled_checkout_only_prompts() {
    let direct = CartConfig { place_order: true, ..CartConfig::default() };
    let mut requests = 0;
    for cfg in [CartConfig::default(), direct] {
        match checkout(true, &cfg) {
            CheckoutDecision::Navigate(_) | CheckoutDecision::PlaceOrder => requests += 1,
            CheckoutDecision::LoginPrompt(text) => assert!(!text.is_empty()),
        }
    }
    assert_eq!(requests, 0);
}

#[test]
fn unauthorized_add_to_cart_prompts_login() {
    let err = ApiError::from_response(401, r#"{"detail":"Not authenticated"}"#);
    let notice = Notice::from_error(&err, storefront_state::text::CART_ADD_FAILED);
    assert!(notice.is_login_prompt());

    let err = ApiError::from_response(400, r#"{"detail":"Недостаточно товара на складе"}"#);
    let notice = Notice::from_error(&err, storefront_state::text::CART_ADD_FAILED);
    assert_eq!(notice, Notice::Alert("Недостаточно товара на складе".into()));
}

#[test]
fn review_with_six_urls_never_posts() {
    let urls: Vec<String> = (0..6).map(|i| format!("https://cdn.example/{}.jpg", i)).collect();
    assert_eq!(
        build_payload("", Some(5), &urls, MAX_PHOTOS),
        Err(ValidationError::TooManyPhotos { max: MAX_PHOTOS })
    );
}

#[test]
fn gallery_wraps_both_ways() {
    let mut gallery = Gallery::new(vec!["a".into(), "b".into(), "c".into()]);
    for _ in 0..gallery.len() {
        gallery.next();
    }
    assert_eq!(gallery.index(), 0);
    gallery.prev();
    assert_eq!(gallery.index(), gallery.len() - 1);
}

#[test]
fn filter_state_survives_url_round_trip() {
    let mut filters = FilterState::default();
    filters.toggle(FilterKind::Category, "12", true);
    filters.toggle(FilterKind::Category, "4", true);
    filters.toggle(FilterKind::Color, "Синий", true);
    filters.toggle(FilterKind::Memory, "256 GB", true);
    filters.favorites_only = true;

    let url = filters.merge_into_query("?sort_by=price&sort_order=asc");
    assert_eq!(FilterState::from_query(&url), filters);
    assert!(url.starts_with("sort_by=price&sort_order=asc&"));
}

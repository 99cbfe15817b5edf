//! Support Chat State
//!
//! Session bootstrap and backward-paginated message history for the chat
//! widget. The widget owns one [`ChatWidgetState`]; every network step is
//! split into a `begin_*` call that hands out a request description and a
//! matching `*_succeeded` / `*_failed` call that folds the result back in.
//!
//! Session creation is lazy: opening the widget only looks for an already
//! active chat. A new chat is created by the first message sent.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::models::{ChatMessage, ChatSummary};

/// Coarse widget state as seen from outside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPhase {
    /// Modal hidden
    Closed,
    /// Opened, no lookup of existing chats finished yet
    Uninitialized,
    /// A page request is in flight
    Loading,
    /// Attached to a chat that accepts messages
    Active(u64),
    /// Opened, the user has no active chat; one is created on first send
    Idle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Session {
    Uninitialized,
    Bootstrapping,
    NoChat,
    Creating,
    Active(u64),
    Ending(u64),
}

/// Description of one history fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub chat_id: u64,
    pub page: u32,
    pub limit: u32,
    generation: u64,
}

impl PageRequest {
    pub fn is_initial(&self) -> bool {
        self.page == 1
    }
}

/// Result of folding a fetched page into the history
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// First page: list replaced, scroll to bottom
    Replaced { count: usize },
    /// Older page prepended, keep the visual anchor
    Prepended { count: usize },
    /// First page came back empty
    Empty,
    /// Response belongs to a reset history, ignored
    Stale,
}

/// What to do with the list after a failed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFailure {
    /// Initial load failed: replace the list with an inline error
    ReplaceWithError,
    /// Pagination failed: keep what is shown, retry on next scroll-to-top
    KeepExisting,
    Stale,
}

/// Delivery state of a rendered message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delivery {
    Delivered,
    Sending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub message: ChatMessage,
    pub delivery: Delivery,
}

/// Ascending message list with page-counter pagination towards the past
#[derive(Debug, Clone)]
pub struct MessageHistory {
    entries: Vec<HistoryEntry>,
    seen: HashSet<u64>,
    chat_id: Option<u64>,
    next_page: u32,
    page_size: u32,
    has_more: bool,
    loading: bool,
    generation: u64,
    next_local_id: u64,
}

impl MessageHistory {
    pub fn new(page_size: u32) -> Self {
        Self {
            entries: Vec::new(),
            seen: HashSet::new(),
            chat_id: None,
            next_page: 1,
            page_size: page_size.max(1),
            has_more: false,
            loading: false,
            generation: 0,
            next_local_id: u64::MAX,
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Drop everything and request the newest page of `chat_id`.
    ///
    /// Local echoes still in flight for the same chat survive, so their
    /// delivery can be confirmed after the reload. Responses to requests
    /// issued before the reset are reported as stale.
    pub fn reset(&mut self, chat_id: u64) -> PageRequest {
        let pending: Vec<HistoryEntry> = if self.chat_id == Some(chat_id) {
            self.entries
                .drain(..)
                .filter(|e| e.delivery == Delivery::Sending)
                .collect()
        } else {
            Vec::new()
        };
        self.clear();
        self.entries = pending;
        self.chat_id = Some(chat_id);
        self.has_more = true;
        self.loading = true;
        self.request()
    }

    /// Empty history with nothing to page through (new or ended chat)
    pub fn clear(&mut self) {
        self.entries.clear();
        self.seen.clear();
        self.chat_id = None;
        self.next_page = 1;
        self.has_more = false;
        self.loading = false;
        self.generation += 1;
    }

    /// Attach to a freshly created chat: nothing older exists.
    pub fn start_fresh(&mut self, chat_id: u64) {
        self.chat_id = Some(chat_id);
        self.has_more = false;
        self.next_page = 2;
    }

    /// Request the next older page, unless one is in flight or history is complete.
    pub fn begin_older(&mut self) -> Option<PageRequest> {
        if self.loading || !self.has_more || self.chat_id.is_none() {
            return None;
        }
        self.loading = true;
        Some(self.request())
    }

    fn request(&self) -> PageRequest {
        PageRequest {
            chat_id: self.chat_id.unwrap_or_default(),
            page: self.next_page,
            limit: self.page_size,
            generation: self.generation,
        }
    }

    pub fn apply_page(&mut self, req: PageRequest, mut page: Vec<ChatMessage>) -> PageOutcome {
        if req.generation != self.generation {
            return PageOutcome::Stale;
        }
        self.loading = false;

        let received = page.len();
        if received < req.limit as usize {
            self.has_more = false;
        } else {
            self.next_page = req.page + 1;
        }

        if received == 0 && req.is_initial() {
            return PageOutcome::Empty;
        }

        sort_chronologically(&mut page);
        let fresh: Vec<HistoryEntry> = page
            .into_iter()
            .filter(|msg| self.seen.insert(msg.id))
            .map(|message| HistoryEntry { message, delivery: Delivery::Delivered })
            .collect();
        let count = fresh.len();

        if req.is_initial() {
            // Keep local echoes that were sent while the first page was loading
            let pending: Vec<HistoryEntry> = self
                .entries
                .drain(..)
                .filter(|e| e.delivery == Delivery::Sending)
                .collect();
            self.entries = fresh;
            self.entries.extend(pending);
            PageOutcome::Replaced { count }
        } else {
            self.entries.splice(0..0, fresh);
            PageOutcome::Prepended { count }
        }
    }

    pub fn fail_page(&mut self, req: PageRequest) -> PageFailure {
        if req.generation != self.generation {
            return PageFailure::Stale;
        }
        self.loading = false;
        if req.is_initial() {
            self.entries.retain(|e| e.delivery == Delivery::Sending);
            PageFailure::ReplaceWithError
        } else {
            PageFailure::KeepExisting
        }
    }

    /// Append an optimistic copy of an outgoing message, returns its local id.
    pub fn push_local(&mut self, sender_id: u64, text: &str, now: DateTime<Utc>) -> u64 {
        let local_id = self.next_local_id;
        self.next_local_id -= 1;
        self.entries.push(HistoryEntry {
            message: ChatMessage {
                id: local_id,
                sender_id,
                sender_name: None,
                message: text.to_string(),
                created_at: now,
            },
            delivery: Delivery::Sending,
        });
        local_id
    }

    /// Mark a local echo delivered, replacing it with the server copy when given.
    pub fn confirm_local(&mut self, local_id: u64, server: Option<ChatMessage>) {
        let Some(pos) = self.entries.iter().position(|e| e.message.id == local_id) else {
            return;
        };
        match server {
            Some(msg) if self.seen.insert(msg.id) => {
                self.entries[pos] = HistoryEntry { message: msg, delivery: Delivery::Delivered };
            }
            // Already arrived through a page fetch
            Some(_) => {
                self.entries.remove(pos);
            }
            None => self.entries[pos].delivery = Delivery::Delivered,
        }
    }

    pub fn discard_local(&mut self, local_id: u64) -> Option<String> {
        let pos = self.entries.iter().position(|e| e.message.id == local_id)?;
        Some(self.entries.remove(pos).message.message)
    }
}

/// Sort by creation time, ties broken by id, regardless of server order.
pub fn sort_chronologically(messages: &mut [ChatMessage]) {
    messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}

/// Scroll offset that keeps the previously topmost message in place after
/// older content was inserted above it.
pub fn anchored_scroll_top(old_scroll_height: i32, new_scroll_height: i32) -> i32 {
    (new_scroll_height - old_scroll_height).max(0)
}

/// The chat the widget should attach to, if the user has one open.
pub fn find_active(chats: &[ChatSummary]) -> Option<u64> {
    chats.iter().find(|c| c.active).map(|c| c.id)
}

/// Next step after the user opened the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAction {
    /// Look up existing chats (`GET /chats/my`)
    Bootstrap,
    /// Reload the newest page of the active chat
    Load(PageRequest),
    Nothing,
}

/// How an outgoing message reaches the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendPlan {
    /// Chat exists: post the message
    Post { chat_id: u64, text: String, local_id: u64 },
    /// No chat yet: create one with `topic`, look up its id, then post
    CreateThenPost { topic: String, text: String, local_id: u64 },
}

impl SendPlan {
    pub fn local_id(&self) -> u64 {
        match self {
            Self::Post { local_id, .. } | Self::CreateThenPost { local_id, .. } => *local_id,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Post { text, .. } | Self::CreateThenPost { text, .. } => text,
        }
    }
}

/// Full state of one chat widget
#[derive(Debug, Clone)]
pub struct ChatWidgetState {
    visible: bool,
    minimized: bool,
    session: Session,
    user_id: u64,
    topic: String,
    pub history: MessageHistory,
}

impl ChatWidgetState {
    pub fn new(user_id: u64, page_size: u32, topic: impl Into<String>) -> Self {
        Self {
            visible: false,
            minimized: false,
            session: Session::Uninitialized,
            user_id,
            topic: topic.into(),
            history: MessageHistory::new(page_size),
        }
    }

    pub fn phase(&self) -> ChatPhase {
        if !self.visible {
            return ChatPhase::Closed;
        }
        match self.session {
            Session::Uninitialized | Session::Bootstrapping => ChatPhase::Uninitialized,
            _ if self.history.is_loading() => ChatPhase::Loading,
            Session::Active(id) | Session::Ending(id) => ChatPhase::Active(id),
            Session::NoChat | Session::Creating => ChatPhase::Idle,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// A chat lookup or a page fetch is in flight.
    pub fn is_busy(&self) -> bool {
        self.session == Session::Bootstrapping || self.history.is_loading()
    }

    /// The chat lookup has not answered yet; nothing can be sent.
    pub fn awaiting_session(&self) -> bool {
        self.session == Session::Bootstrapping
    }

    pub fn chat_id(&self) -> Option<u64> {
        match self.session {
            Session::Active(id) | Session::Ending(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_own(&self, msg: &ChatMessage) -> bool {
        msg.sender_id == self.user_id
    }

    pub fn open(&mut self) -> OpenAction {
        self.visible = true;
        match self.session {
            // Without an attached chat, look again: one may have been opened elsewhere
            Session::Uninitialized | Session::NoChat => {
                self.session = Session::Bootstrapping;
                OpenAction::Bootstrap
            }
            Session::Active(id) => OpenAction::Load(self.history.reset(id)),
            _ => OpenAction::Nothing,
        }
    }

    /// Hide the modal; the chat itself stays open on the server.
    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
    }

    pub fn bootstrap_succeeded(&mut self, chats: &[ChatSummary]) -> Option<PageRequest> {
        if self.session != Session::Bootstrapping {
            return None;
        }
        match find_active(chats) {
            Some(id) => {
                self.session = Session::Active(id);
                Some(self.history.reset(id))
            }
            None => {
                self.session = Session::NoChat;
                self.history.clear();
                None
            }
        }
    }

    /// Lookup failed; the next open retries it.
    pub fn bootstrap_failed(&mut self) {
        if self.session == Session::Bootstrapping {
            self.session = Session::Uninitialized;
        }
    }

    pub fn prepare_send(&mut self, raw: &str, now: DateTime<Utc>) -> Result<SendPlan, ValidationError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        let plan = match self.session {
            Session::Active(chat_id) => SendPlan::Post {
                chat_id,
                text: text.to_string(),
                local_id: 0,
            },
            Session::NoChat => {
                self.session = Session::Creating;
                SendPlan::CreateThenPost {
                    topic: self.topic.clone(),
                    text: text.to_string(),
                    local_id: 0,
                }
            }
            _ => return Err(ValidationError::ChatUnavailable),
        };
        let local_id = self.history.push_local(self.user_id, text, now);
        Ok(match plan {
            SendPlan::Post { chat_id, text, .. } => SendPlan::Post { chat_id, text, local_id },
            SendPlan::CreateThenPost { topic, text, .. } => {
                SendPlan::CreateThenPost { topic, text, local_id }
            }
        })
    }

    /// Chat list fetched after creation. Returns the id to post to.
    pub fn chat_created(&mut self, chats: &[ChatSummary]) -> Option<u64> {
        if self.session != Session::Creating {
            return self.chat_id();
        }
        let id = find_active(chats)?;
        self.session = Session::Active(id);
        self.history.start_fresh(id);
        Some(id)
    }

    pub fn send_succeeded(&mut self, local_id: u64, server: Option<ChatMessage>) {
        self.history.confirm_local(local_id, server);
    }

    /// Drop the echo; returns the text so it can go back into the input.
    pub fn send_failed(&mut self, local_id: u64) -> Option<String> {
        if self.session == Session::Creating {
            self.session = Session::NoChat;
        }
        self.history.discard_local(local_id)
    }

    /// Start ending the chat. `None` when there is nothing to end.
    pub fn begin_end(&mut self) -> Option<u64> {
        match self.session {
            Session::Active(id) => {
                self.session = Session::Ending(id);
                Some(id)
            }
            _ => None,
        }
    }

    /// Chat closed on the server: the modal is hidden and the next message
    /// starts a new chat.
    pub fn end_succeeded(&mut self) {
        self.session = Session::NoChat;
        self.history.clear();
        self.visible = false;
        self.minimized = false;
    }

    pub fn end_failed(&mut self) {
        if let Session::Ending(id) = self.session {
            self.session = Session::Active(id);
        }
    }

    /// Older-page request for a scroll event at `scroll_top`.
    pub fn on_scroll(&mut self, scroll_top: i32) -> Option<PageRequest> {
        if scroll_top > 0 || !matches!(self.session, Session::Active(_)) {
            return None;
        }
        self.history.begin_older()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn msg(id: u64, minutes: i64) -> ChatMessage {
        ChatMessage {
            id,
            sender_id: if id % 2 == 0 { 1 } else { 99 },
            sender_name: None,
            message: format!("m{}", id),
            created_at: base() + Duration::minutes(minutes),
        }
    }

    fn active_state() -> (ChatWidgetState, PageRequest) {
        let mut state = ChatWidgetState::new(1, 3, "topic");
        assert_eq!(state.open(), OpenAction::Bootstrap);
        let req = state
            .bootstrap_succeeded(&[ChatSummary { id: 8, topic: None, active: true }])
            .unwrap();
        (state, req)
    }

    #[test]
    fn test_closed_until_opened() {
        let state = ChatWidgetState::new(1, 15, "t");
        assert_eq!(state.phase(), ChatPhase::Closed);
    }

    #[test]
    fn test_bootstrap_reuses_active_chat() {
        let (state, req) = active_state();
        assert_eq!(req.chat_id, 8);
        assert_eq!(req.page, 1);
        assert_eq!(state.phase(), ChatPhase::Loading);
    }

    #[test]
    fn test_bootstrap_without_active_chat_is_idle() {
        let mut state = ChatWidgetState::new(1, 15, "t");
        state.open();
        let chats = [ChatSummary { id: 2, topic: None, active: false }];
        assert_eq!(state.bootstrap_succeeded(&chats), None);
        assert_eq!(state.phase(), ChatPhase::Idle);
        assert!(!state.history.has_more());
    }

    #[test]
    fn test_bootstrap_failure_retries_on_next_open() {
        let mut state = ChatWidgetState::new(1, 15, "t");
        state.open();
        state.bootstrap_failed();
        state.close();
        assert_eq!(state.open(), OpenAction::Bootstrap);
    }

    #[test]
    fn test_page_sorted_before_insert() {
        let (mut state, req) = active_state();
        let outcome = state.history.apply_page(req, vec![msg(3, 3), msg(1, 1), msg(2, 2)]);
        assert_eq!(outcome, PageOutcome::Replaced { count: 3 });
        let ids: Vec<u64> = state.history.entries().iter().map(|e| e.message.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_short_page_ends_history() {
        let (mut state, req) = active_state();
        state.history.apply_page(req, vec![msg(1, 1), msg(2, 2)]);
        assert!(!state.history.has_more());
        assert_eq!(state.on_scroll(0), None);
    }

    #[test]
    fn test_one_request_in_flight() {
        let (mut state, req) = active_state();
        state.history.apply_page(req, vec![msg(7, 7), msg(8, 8), msg(9, 9)]);
        let first = state.on_scroll(0);
        assert!(first.is_some());
        assert_eq!(state.on_scroll(0), None);
    }

    #[test]
    fn test_scroll_not_at_top_does_nothing() {
        let (mut state, req) = active_state();
        state.history.apply_page(req, vec![msg(7, 7), msg(8, 8), msg(9, 9)]);
        assert_eq!(state.on_scroll(40), None);
    }

    #[test]
    fn test_older_page_prepended_and_deduplicated() {
        let (mut state, req) = active_state();
        state.history.apply_page(req, vec![msg(7, 7), msg(8, 8), msg(9, 9)]);
        let older = state.on_scroll(0).unwrap();
        assert_eq!(older.page, 2);
        // id 7 shifted into page 2 because a message was inserted meanwhile
        let outcome = state.history.apply_page(older, vec![msg(5, 5), msg(6, 6), msg(7, 7)]);
        assert_eq!(outcome, PageOutcome::Prepended { count: 2 });
        let ids: Vec<u64> = state.history.entries().iter().map(|e| e.message.id).collect();
        assert_eq!(ids, vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_initial_failure_replaces_list() {
        let (mut state, req) = active_state();
        assert_eq!(state.history.fail_page(req), PageFailure::ReplaceWithError);
        assert!(!state.history.is_loading());
    }

    #[test]
    fn test_pagination_failure_keeps_messages_and_retries() {
        let (mut state, req) = active_state();
        state.history.apply_page(req, vec![msg(7, 7), msg(8, 8), msg(9, 9)]);
        let older = state.on_scroll(0).unwrap();
        assert_eq!(state.history.fail_page(older), PageFailure::KeepExisting);
        assert_eq!(state.history.entries().len(), 3);
        assert_eq!(state.on_scroll(0).map(|r| r.page), Some(2));
    }

    #[test]
    fn test_stale_response_after_reset() {
        let (mut state, req) = active_state();
        state.close();
        let fresh = match state.open() {
            OpenAction::Load(r) => r,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(state.history.apply_page(req, vec![msg(1, 1)]), PageOutcome::Stale);
        assert!(state.history.is_loading());
        assert_eq!(
            state.history.apply_page(fresh, vec![msg(2, 2)]),
            PageOutcome::Replaced { count: 1 }
        );
    }

    #[test]
    fn test_empty_first_page() {
        let (mut state, req) = active_state();
        assert_eq!(state.history.apply_page(req, vec![]), PageOutcome::Empty);
        assert!(!state.history.has_more());
    }

    #[test]
    fn test_send_to_active_chat_echoes() {
        let (mut state, req) = active_state();
        state.history.apply_page(req, vec![msg(1, 1)]);
        let plan = state.prepare_send("  hello ", base()).unwrap();
        match &plan {
            SendPlan::Post { chat_id, text, .. } => {
                assert_eq!(*chat_id, 8);
                assert_eq!(text, "hello");
            }
            other => panic!("unexpected {:?}", other),
        }
        let last = state.history.entries().last().unwrap();
        assert_eq!(last.delivery, Delivery::Sending);
        assert!(state.is_own(&last.message));

        state.send_succeeded(plan.local_id(), Some(msg(40, 60)));
        let last = state.history.entries().last().unwrap();
        assert_eq!(last.message.id, 40);
        assert_eq!(last.delivery, Delivery::Delivered);
    }

    #[test]
    fn test_empty_message_rejected() {
        let (mut state, _) = active_state();
        assert_eq!(state.prepare_send("   ", base()), Err(ValidationError::EmptyMessage));
        assert!(state.history.entries().is_empty());
    }

    #[test]
    fn test_lazy_create_on_first_send() {
        let mut state = ChatWidgetState::new(1, 15, "Общая поддержка");
        state.open();
        state.bootstrap_succeeded(&[]);
        let plan = state.prepare_send("hi", base()).unwrap();
        assert!(matches!(plan, SendPlan::CreateThenPost { ref topic, .. } if topic == "Общая поддержка"));
        // A second send while creating must not create another chat
        assert_eq!(state.prepare_send("again", base()), Err(ValidationError::ChatUnavailable));

        let id = state.chat_created(&[ChatSummary { id: 31, topic: None, active: true }]);
        assert_eq!(id, Some(31));
        assert_eq!(state.phase(), ChatPhase::Active(31));
        assert!(!state.history.has_more());
    }

    #[test]
    fn test_failed_send_restores_text() {
        let mut state = ChatWidgetState::new(1, 15, "t");
        state.open();
        state.bootstrap_succeeded(&[]);
        let plan = state.prepare_send("draft", base()).unwrap();
        assert_eq!(state.send_failed(plan.local_id()).as_deref(), Some("draft"));
        assert_eq!(state.phase(), ChatPhase::Idle);
        assert!(state.history.entries().is_empty());
    }

    #[test]
    fn test_end_chat_requires_success() {
        let (mut state, req) = active_state();
        state.history.apply_page(req, vec![msg(1, 1)]);
        assert_eq!(state.begin_end(), Some(8));
        state.end_failed();
        assert_eq!(state.phase(), ChatPhase::Active(8));
        assert_eq!(state.history.entries().len(), 1);

        assert_eq!(state.begin_end(), Some(8));
        state.end_succeeded();
        assert_eq!(state.phase(), ChatPhase::Closed);
        assert!(!state.is_visible());
        assert!(state.history.entries().is_empty());

        assert_eq!(state.open(), OpenAction::Bootstrap);
        state.bootstrap_succeeded(&[ChatSummary { id: 8, topic: None, active: false }]);
        assert!(matches!(
            state.prepare_send("new question", base()),
            Ok(SendPlan::CreateThenPost { .. })
        ));
    }

    #[test]
    fn test_pending_echo_survives_reopen() {
        let (mut state, req) = active_state();
        state.history.apply_page(req, vec![msg(1, 1)]);
        let plan = state.prepare_send("still sending", base()).unwrap();
        state.close();

        let reload = match state.open() {
            OpenAction::Load(r) => r,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(state.history.entries().len(), 1);
        assert_eq!(state.history.entries()[0].delivery, Delivery::Sending);

        state.history.apply_page(reload, vec![msg(1, 1)]);
        assert_eq!(state.history.entries().len(), 2);
        state.send_succeeded(plan.local_id(), Some(msg(40, 60)));
        let ids: Vec<u64> = state.history.entries().iter().map(|e| e.message.id).collect();
        assert_eq!(ids, vec![1, 40]);
        assert_eq!(state.history.entries()[1].delivery, Delivery::Delivered);
    }

    #[test]
    fn test_failed_lookup_is_not_busy() {
        let mut state = ChatWidgetState::new(1, 15, "t");
        state.open();
        assert!(state.is_busy());
        assert!(state.awaiting_session());
        state.bootstrap_failed();
        assert!(!state.is_busy());
        assert!(!state.awaiting_session());
        assert_eq!(state.prepare_send("hi", base()), Err(ValidationError::ChatUnavailable));
    }

    #[test]
    fn test_anchor_keeps_position() {
        assert_eq!(anchored_scroll_top(800, 1400), 600);
        assert_eq!(anchored_scroll_top(800, 800), 0);
    }
}

//! Support Chat Widget
//!
//! Floating support chat: session bootstrap, upward infinite scroll over the
//! message history, optimistic sending and ending the chat.

use chrono::Utc;
use gloo_timers::future::TimeoutFuture;
use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront_state::chat::{
    anchored_scroll_top, ChatPhase, ChatWidgetState, Delivery, HistoryEntry, OpenAction, PageFailure,
    PageOutcome, PageRequest, SendPlan,
};
use storefront_state::models::{format_local, ChatMessage};
use storefront_state::{text, ApiError, Notice, ValidationError};

use crate::api;
use crate::components::ConfirmButton;
use crate::context::{use_app_context, AppContext};
use crate::dom;

/// Yield once so pending DOM updates land before the list is measured.
async fn next_frame() {
    TimeoutFuture::new(0).await;
}

/// Everything the async handlers need; all fields are arena handles.
#[derive(Clone, Copy)]
struct ChatHandle {
    ctx: AppContext,
    state: RwSignal<ChatWidgetState>,
    list: NodeRef<Div>,
    /// Inline error replacing the message list
    error: RwSignal<Option<String>>,
    /// System line under the messages ("no messages yet", "chat ended")
    notice: RwSignal<Option<&'static str>>,
}

impl ChatHandle {
    fn scroll_to_bottom(self) {
        if let Some(el) = self.list.get_untracked() {
            el.set_scroll_top(el.scroll_height());
        }
    }

    /// Visible, but the chat lookup failed and is not being retried.
    fn lookup_failed(self) -> bool {
        self.state
            .with_untracked(|s| s.phase() == ChatPhase::Uninitialized && !s.awaiting_session())
    }

    fn open(self) {
        if !self.ctx.is_logged_in() {
            self.ctx.notify(&Notice::LoginPrompt(text::LOGIN_REQUIRED.to_string()));
            return;
        }
        self.error.set(None);
        match self.state.try_update(|s| s.open()) {
            Some(OpenAction::Bootstrap) => self.bootstrap(),
            Some(OpenAction::Load(req)) => self.load(req),
            _ => {}
        }
    }

    fn bootstrap(self) {
        spawn_local(async move {
            let ep = self.ctx.endpoints();
            match api::my_chats(&ep).await {
                Ok(chats) => {
                    log::debug!("[Chat] {} chats found", chats.len());
                    if let Some(req) = self.state.try_update(|s| s.bootstrap_succeeded(&chats)).flatten() {
                        self.notice.set(None);
                        self.load(req);
                    } else if self.state.with_untracked(|s| s.phase() == ChatPhase::Idle)
                        && self.notice.get_untracked().is_none()
                    {
                        self.notice.set(Some(text::CHAT_NO_MESSAGES));
                    }
                }
                Err(err) => {
                    log::error!("[Chat] bootstrap failed: {}", err);
                    self.state.update(|s| s.bootstrap_failed());
                    if err.is_unauthorized() {
                        self.ctx.notify(&Notice::from_session_error(&err, text::CHAT_INIT_FAILED));
                    }
                    self.error.set(Some(err.inline_message(text::CHAT_INIT_FAILED)));
                }
            }
        });
    }

    fn load(self, req: PageRequest) {
        let old_height = self.list.get_untracked().map(|el| el.scroll_height()).unwrap_or(0);
        spawn_local(async move {
            let ep = self.ctx.endpoints();
            match api::chat_messages(&ep, req).await {
                Ok(page) => {
                    let Some(outcome) = self.state.try_update(|s| s.history.apply_page(req, page)) else {
                        return;
                    };
                    log::debug!("[Chat] page {} of chat {}: {:?}", req.page, req.chat_id, outcome);
                    match outcome {
                        PageOutcome::Replaced { .. } => {
                            self.error.set(None);
                            next_frame().await;
                            self.scroll_to_bottom();
                        }
                        PageOutcome::Empty => {
                            self.error.set(None);
                            self.notice.set(Some(text::CHAT_NO_MESSAGES));
                        }
                        PageOutcome::Prepended { .. } => {
                            next_frame().await;
                            if let Some(el) = self.list.get_untracked() {
                                el.set_scroll_top(anchored_scroll_top(old_height, el.scroll_height()));
                            }
                        }
                        PageOutcome::Stale => {}
                    }
                }
                Err(err) => {
                    log::warn!("[Chat] page {} of chat {} failed: {}", req.page, req.chat_id, err);
                    let failure = self.state.try_update(|s| s.history.fail_page(req));
                    if err.is_unauthorized() {
                        self.ctx.notify(&Notice::from_session_error(&err, text::CHAT_LOAD_FAILED));
                    }
                    if failure == Some(PageFailure::ReplaceWithError) {
                        self.error.set(Some(err.inline_message(text::CHAT_LOAD_FAILED)));
                    }
                }
            }
        });
    }

    fn on_scroll(self) {
        let Some(el) = self.list.get_untracked() else {
            return;
        };
        let top = el.scroll_top();
        let ready = self.state.with_untracked(|s| s.history.has_more() && !s.history.is_loading());
        if top > 0 || !ready {
            return;
        }
        if let Some(req) = self.state.try_update(|s| s.on_scroll(top)).flatten() {
            self.load(req);
        }
    }

    fn send(self, draft: RwSignal<String>) {
        let raw = draft.get_untracked();
        let plan = match self.state.try_update(|s| s.prepare_send(&raw, Utc::now())) {
            Some(Ok(plan)) => plan,
            Some(Err(ValidationError::EmptyMessage)) | None => return,
            Some(Err(ValidationError::ChatUnavailable)) if self.lookup_failed() => {
                dom::alert(&ValidationError::ChatUnavailable.to_string());
                self.open();
                return;
            }
            Some(Err(e)) => {
                dom::alert(&e.to_string());
                return;
            }
        };
        draft.set(String::new());
        self.notice.set(None);

        spawn_local(async move {
            next_frame().await;
            self.scroll_to_bottom();

            let local_id = plan.local_id();
            match self.deliver(plan).await {
                Ok(server) => self.state.update(|s| s.send_succeeded(local_id, server)),
                Err((err, fallback)) => {
                    log::error!("[Chat] {}: {}", fallback, err);
                    if let Some(restored) = self.state.try_update(|s| s.send_failed(local_id)).flatten() {
                        draft.set(restored);
                    }
                    self.ctx.notify(&Notice::from_session_error(&err, fallback));
                }
            }
        });
    }

    /// Post the message, creating the chat first when there is none.
    async fn deliver(self, plan: SendPlan) -> Result<Option<ChatMessage>, (ApiError, &'static str)> {
        let ep = self.ctx.endpoints();
        let (chat_id, body) = match plan {
            SendPlan::Post { chat_id, text: body, .. } => (chat_id, body),
            SendPlan::CreateThenPost { topic, text: body, .. } => {
                let failed = |err: ApiError| (err, text::CHAT_CREATE_FAILED);
                api::create_chat(&ep, &topic).await.map_err(failed)?;
                let chats = api::my_chats(&ep).await.map_err(failed)?;
                let chat_id = self
                    .state
                    .try_update(|s| s.chat_created(&chats))
                    .flatten()
                    .ok_or_else(|| failed(ApiError::Decode("created chat is not listed".into())))?;
                log::info!("[Chat] created chat {}", chat_id);
                (chat_id, body)
            }
        };
        api::send_message(&ep, chat_id, &body)
            .await
            .map_err(|err| (err, text::CHAT_SEND_FAILED))
    }

    fn end(self) {
        let Some(chat_id) = self.state.try_update(|s| s.begin_end()).flatten() else {
            return;
        };
        spawn_local(async move {
            let ep = self.ctx.endpoints();
            match api::close_chat(&ep, chat_id).await {
                Ok(()) => {
                    log::info!("[Chat] chat {} closed", chat_id);
                    self.state.update(|s| s.end_succeeded());
                    self.error.set(None);
                    // Shown on the next open, until a new chat is attached
                    self.notice.set(Some(text::CHAT_ENDED));
                }
                Err(err) => {
                    log::error!("[Chat] closing chat {} failed: {}", chat_id, err);
                    self.state.update(|s| s.end_failed());
                    self.ctx.notify(&Notice::from_session_error(&err, text::CHAT_END_FAILED));
                }
            }
        });
    }
}

#[component]
fn MessageBubble(entry: HistoryEntry, own: bool, offset: i32) -> impl IntoView {
    let pending = entry.delivery == Delivery::Sending;
    let class = match (own, pending) {
        (true, true) => "message message-user message-pending",
        (true, false) => "message message-user",
        (false, _) => "message message-support",
    };
    let sender = (!own).then(|| {
        let name = entry
            .message
            .sender_name
            .clone()
            .unwrap_or_else(|| text::CHAT_SUPPORT_NAME.to_string());
        format!("{}: {}", text::CHAT_OPERATOR_PREFIX, name)
    });
    let time = format_local(&entry.message.created_at, offset);

    view! {
        <div class=class>
            {sender.map(|name| view! { <div class="sender-name">{name}</div> })}
            <div class="message-text">{entry.message.message}</div>
            <div class="message-info">{time}</div>
        </div>
    }
}

#[component]
pub fn ChatWidget() -> impl IntoView {
    let ctx = use_app_context();
    let chat_cfg = ctx.config.with_value(|c| c.chat.clone());
    let state = RwSignal::new(ChatWidgetState::new(
        ctx.user_id.unwrap_or_default(),
        chat_cfg.page_size,
        chat_cfg.default_topic,
    ));
    let handle = ChatHandle {
        ctx,
        state,
        list: NodeRef::new(),
        error: RwSignal::new(None),
        notice: RwSignal::new(None),
    };
    let draft = RwSignal::new(String::new());
    let offset = dom::timezone_offset_minutes();

    let phase = move || state.with(|s| s.phase());
    let can_end = move || matches!(phase(), ChatPhase::Active(_));
    let busy = move || state.with(|s| s.is_busy());
    let input_blocked = move || state.with(|s| s.awaiting_session());

    view! {
        <button
            id="chatButton"
            class="chat-button"
            title="Чат с поддержкой"
            on:click=move |_| handle.open()
        >
            "💬"
        </button>
        <Show when=move || state.with(|s| s.is_visible())>
            <div
                id="chatModal"
                class=move || if state.with(|s| s.is_minimized()) { "chat-modal minimized" } else { "chat-modal" }
            >
                <div class="chat-header">
                    <span class="chat-title">{text::CHAT_SUPPORT_NAME}</span>
                    <div class="chat-controls">
                        <Show when=can_end>
                            <ConfirmButton
                                label="Завершить чат"
                                prompt=text::CHAT_END_CONFIRM
                                button_class="end-chat-btn"
                                on_confirm=move |_| handle.end()
                            />
                        </Show>
                        <button class="minimize-btn" on:click=move |_| state.update(|s| s.toggle_minimized())>
                            "_"
                        </button>
                        <button class="close-btn" on:click=move |_| state.update(|s| s.close())>
                            "×"
                        </button>
                    </div>
                </div>

                <div id="chatMessages" class="chat-messages" node_ref=handle.list on:scroll=move |_| handle.on_scroll()>
                    <Show when=busy>
                        <div class="message-system">{text::LOADING}</div>
                    </Show>
                    <Show
                        when=move || handle.error.with(Option::is_none)
                        fallback=move || view! {
                            <div class="message-system message-error">{move || handle.error.get()}</div>
                        }
                    >
                        <For
                            each=move || state.with(|s| s.history.entries().to_vec())
                            key=|entry| (entry.message.id, entry.delivery)
                            children=move |entry: HistoryEntry| {
                                let own = state.with_untracked(|s| s.is_own(&entry.message));
                                view! { <MessageBubble entry=entry own=own offset=offset /> }
                            }
                        />
                        {move || handle.notice.get().map(|line| view! {
                            <div class="message-system">{line}</div>
                        })}
                    </Show>
                </div>

                <div class="chat-input">
                    <input
                        id="messageInput"
                        type="text"
                        placeholder="Введите сообщение..."
                        disabled=input_blocked
                        prop:value=move || draft.get()
                        on:input=move |ev| draft.set(event_target_value(&ev))
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Enter" && !ev.shift_key() {
                                ev.prevent_default();
                                handle.send(draft);
                            }
                        }
                    />
                    <button id="sendMessage" disabled=input_blocked on:click=move |_| handle.send(draft)>
                        "Отправить"
                    </button>
                </div>
            </div>
        </Show>
    }
}

//! Back-Office Chat Close Control

use leptos::prelude::*;
use leptos::task::spawn_local;
use storefront_state::text;

use crate::api;
use crate::components::ConfirmButton;
use crate::context::use_app_context;
use crate::dom;
use crate::models::SupportChatProps;

#[component]
pub fn SupportChatClose(props: SupportChatProps) -> impl IntoView {
    let ctx = use_app_context();
    let chat_id = props.chat_id;
    let active = RwSignal::new(props.active);
    let (closing, set_closing) = signal(false);

    let close = move |_| {
        set_closing.set(true);
        spawn_local(async move {
            let ep = ctx.endpoints();
            match api::close_chat(&ep, chat_id).await {
                Ok(()) => {
                    log::info!("[Support] chat {} closed", chat_id);
                    active.set(false);
                    dom::alert(text::CHAT_END_SUCCESS);
                }
                Err(err) => {
                    log::error!("[Support] closing chat {} failed: {}", chat_id, err);
                    ctx.report(&err, text::CHAT_END_FAILED);
                }
            }
            set_closing.set(false);
        });
    };

    view! {
        <span class=move || if active.get() { "chat-status active" } else { "chat-status closed" }>
            {move || if active.get() { "Активен" } else { "Закрыт" }}
        </span>
        <Show when=move || active.get()>
            <ConfirmButton
                label="Закрыть чат"
                prompt=text::CHAT_END_CONFIRM
                button_class="close-chat-btn"
                disabled=closing
                on_confirm=close
            />
        </Show>
    }
}

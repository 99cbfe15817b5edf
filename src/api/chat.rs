//! Chat Endpoints

use serde::Serialize;
use storefront_state::chat::PageRequest;
use storefront_state::config::Endpoints;
use storefront_state::models::{ChatMessage, ChatSummary};
use storefront_state::ApiError;

use super::{fetch_empty, fetch_json, get, patch, post, read_optional_json, send, with_json, without_body};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct CreateChatArgs<'a> {
    topic: &'a str,
}

#[derive(Serialize)]
struct CreateMessageArgs<'a> {
    chat_id: u64,
    message: &'a str,
}

// ========================
// Commands
// ========================

pub async fn my_chats(ep: &Endpoints) -> Result<Vec<ChatSummary>, ApiError> {
    fetch_json(without_body(get(&ep.chats_my))?).await
}

pub async fn create_chat(ep: &Endpoints, topic: &str) -> Result<(), ApiError> {
    fetch_empty(with_json(post(&ep.chats_create), &CreateChatArgs { topic })?).await
}

pub async fn close_chat(ep: &Endpoints, chat_id: u64) -> Result<(), ApiError> {
    fetch_empty(without_body(patch(&ep.chat_close(chat_id)))?).await
}

pub async fn chat_messages(ep: &Endpoints, req: PageRequest) -> Result<Vec<ChatMessage>, ApiError> {
    fetch_json(without_body(get(&ep.chat_messages(req.chat_id, req.page, req.limit)))?).await
}

/// Returns the stored message when the server echoes it back.
pub async fn send_message(ep: &Endpoints, chat_id: u64, message: &str) -> Result<Option<ChatMessage>, ApiError> {
    let args = CreateMessageArgs { chat_id, message };
    let response = send(with_json(post(&ep.messages_create), &args)?).await?;
    Ok(read_optional_json(response).await)
}

//! Message Handler module for routing webhook requests and text commands

use tracing::debug;

use crate::card::ChatResponse;
use crate::chat_event::{resolve_owner, ChatRequest};
use crate::command::parse_command;
use crate::errors::StoreError;
use crate::store::TaskStore;

use super::callback_handler::handle_card_action;
use super::task_manager::execute_intent;
use super::ui_builder::{render, RenderMode};

/// Handle a plain-text command from `owner`
pub async fn handle_text_message(
    store: &dyn TaskStore,
    owner: &str,
    text: &str,
    mode: RenderMode,
) -> Result<ChatResponse, StoreError> {
    debug!(user_id = %owner, message_length = text.len(), "Received text message from user");

    let intent = parse_command(text);
    let outcome = execute_intent(store, owner, intent).await?;

    Ok(render(&outcome, mode))
}

/// Entry point for `/chat`: button actions and text commands share the endpoint
pub async fn handle_chat_request(
    store: &dyn TaskStore,
    request: &ChatRequest,
    mode: RenderMode,
) -> Result<ChatResponse, StoreError> {
    if request.action.is_some() {
        return handle_card_action(store, request, mode).await;
    }

    let owner = resolve_owner(&request.message.sender);
    handle_text_message(store, &owner, &request.message.text, mode).await
}

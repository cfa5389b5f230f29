//! Inbound webhook payloads and sender identity resolution.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Owner used when the sender carries neither an email nor a name
pub const DEFAULT_OWNER: &str = "default";

/// Body posted by the chat platform to `/chat` and `/card-action`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: ChatMessage,
    /// Present when the request comes from a card button click
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<CardActionEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub sender: Sender,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sender {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardActionEvent {
    #[serde(default)]
    pub action_method_name: String,
    #[serde(default)]
    pub parameters: Vec<ActionParameter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionParameter {
    pub key: String,
    pub value: String,
}

impl CardActionEvent {
    /// Parameters as a map; a repeated key keeps its last value.
    pub fn parameter_map(&self) -> HashMap<String, String> {
        self.parameters
            .iter()
            .map(|p| (p.key.clone(), p.value.clone()))
            .collect()
    }
}

/// Owner identifier of the sender: email, then name, then [`DEFAULT_OWNER`].
pub fn resolve_owner(sender: &Sender) -> String {
    [sender.email.trim(), sender.name.trim()]
        .into_iter()
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(DEFAULT_OWNER)
        .to_string()
}

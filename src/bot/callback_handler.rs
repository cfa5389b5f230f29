//! Callback Handler module for processing card button actions

use tracing::{debug, warn};

use crate::chat_event::{resolve_owner, CardActionEvent, ChatRequest};
use crate::card::ChatResponse;
use crate::command::Intent;
use crate::errors::StoreError;
use crate::store::TaskStore;

use super::task_manager::{execute_intent, Outcome};
use super::ui_builder::{render, RenderMode};

/// Parameter carrying the id of the task a button acts on
pub const TASK_ID_PARAM: &str = "taskId";
/// Parameter carrying submitted content from the edit form
pub const CONTENT_PARAM: &str = "content";

/// Button actions understood by the bot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    MarkDone,
    DeleteTask,
    EditTask,
    List,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::MarkDone,
        ActionKind::DeleteTask,
        ActionKind::EditTask,
        ActionKind::List,
    ];

    /// Wire name used in `actionMethodName`
    pub fn method_name(self) -> &'static str {
        match self {
            ActionKind::MarkDone => "markDone",
            ActionKind::DeleteTask => "deleteTask",
            ActionKind::EditTask => "editTask",
            ActionKind::List => "list",
        }
    }

    pub fn from_method_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.method_name() == name)
    }
}

/// Why a button action was refused before reaching the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRejection {
    /// The request carried no action at all
    MissingAction,
    UnknownAction,
    InvalidTaskId,
}

impl From<ActionRejection> for Outcome {
    fn from(rejection: ActionRejection) -> Self {
        match rejection {
            ActionRejection::MissingAction => Outcome::InvalidAction,
            ActionRejection::UnknownAction => Outcome::UnknownAction,
            ActionRejection::InvalidTaskId => Outcome::InvalidTaskId,
        }
    }
}

/// Map a button action to an intent without touching the store
pub fn dispatch_action(action: &CardActionEvent) -> Result<Intent, ActionRejection> {
    let kind = ActionKind::from_method_name(&action.action_method_name)
        .ok_or(ActionRejection::UnknownAction)?;

    if kind == ActionKind::List {
        return Ok(Intent::List);
    }

    let params = action.parameter_map();
    let id: i64 = params
        .get(TASK_ID_PARAM)
        .map(String::as_str)
        .unwrap_or_default()
        .parse()
        .map_err(|_| ActionRejection::InvalidTaskId)?;

    let intent = match kind {
        ActionKind::MarkDone => Intent::Done { id },
        ActionKind::DeleteTask => Intent::Delete { id },
        ActionKind::EditTask => match params
            .get(CONTENT_PARAM)
            .map(|content| content.trim())
            .filter(|content| !content.is_empty())
        {
            Some(content) => Intent::Edit {
                id,
                content: content.to_string(),
            },
            None => Intent::ShowEditForm { id },
        },
        ActionKind::List => Intent::List,
    };

    Ok(intent)
}

/// Handle a button click from a card
pub async fn handle_card_action(
    store: &dyn TaskStore,
    request: &ChatRequest,
    mode: RenderMode,
) -> Result<ChatResponse, StoreError> {
    let owner = resolve_owner(&request.message.sender);

    let dispatched = match &request.action {
        Some(action) => {
            debug!(user_id = %owner, action = %action.action_method_name, "Received card action");
            dispatch_action(action)
        }
        None => Err(ActionRejection::MissingAction),
    };

    let outcome = match dispatched {
        Ok(intent) => execute_intent(store, &owner, intent).await?,
        Err(rejection) => {
            warn!(user_id = %owner, rejection = ?rejection, "Rejected card action");
            Outcome::from(rejection)
        }
    };

    Ok(render(&outcome, mode))
}

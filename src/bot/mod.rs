//! Bot module for handling chat webhook interactions
//!
//! This module is split into several submodules for better organization:
//! - `message_handler`: Routes inbound requests and handles text commands
//! - `callback_handler`: Handles card button actions
//! - `task_manager`: Applies intents to the task store
//! - `ui_builder`: Renders outcomes as text or cards

pub mod callback_handler;
pub mod message_handler;
pub mod task_manager;
pub mod ui_builder;

// Re-export main handler functions for use by the web server
pub use callback_handler::handle_card_action;
pub use message_handler::{handle_chat_request, handle_text_message};

pub use callback_handler::{dispatch_action, ActionKind, ActionRejection};
pub use task_manager::{execute_intent, Outcome};
pub use ui_builder::{render, RenderMode};

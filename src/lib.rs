//! # Chat Tasks
//!
//! A chat webhook that keeps a per-user task list. Text commands
//! (`add`, `list`, `done`, `edit`, `delete`) and card button clicks are
//! applied to a task store, and replies come back as plain text or cards.

pub mod bot;
pub mod card;
pub mod chat_event;
pub mod command;
pub mod config;
pub mod db;
pub mod errors;
pub mod localization;
pub mod server;
pub mod store;

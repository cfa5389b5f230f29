//! # Command Parsing Module
//!
//! Classifies chat message text into an [`Intent`] using a fixed, ordered
//! list of regex patterns. The first pattern that matches wins; anything
//! that matches nothing is a request for help.
//!
//! ## Grammar
//!
//! - `add <content>`
//! - `list`
//! - `done <id>`
//! - `edit <id> <content>`
//! - `delete <id>`

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

/// What a text command or button click asks the bot to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add { content: String },
    List,
    Done { id: i64 },
    Edit { id: i64, content: String },
    Delete { id: i64 },
    /// Card-only: show the inline edit form for a task
    ShowEditForm { id: i64 },
    Help,
}

lazy_static! {
    static ref ADD_PATTERN: Regex =
        Regex::new(r"(?s)^add\s+(.+)$").expect("add pattern should be valid");
    static ref LIST_PATTERN: Regex = Regex::new(r"^list$").expect("list pattern should be valid");
    static ref DONE_PATTERN: Regex =
        Regex::new(r"^done\s+(\d+)$").expect("done pattern should be valid");
    // Content is optional so that `edit 3` reaches the empty-content check
    static ref EDIT_PATTERN: Regex =
        Regex::new(r"(?s)^edit\s+(\d+)(?:\s+(.*))?$").expect("edit pattern should be valid");
    static ref DELETE_PATTERN: Regex =
        Regex::new(r"^delete\s+(\d+)$").expect("delete pattern should be valid");
}

/// Classify a chat message. Surrounding whitespace is ignored.
pub fn parse_command(text: &str) -> Intent {
    let text = text.trim();
    trace!(text = %text, "Parsing command");

    if let Some(caps) = ADD_PATTERN.captures(text) {
        return Intent::Add {
            content: caps[1].trim().to_string(),
        };
    }

    if LIST_PATTERN.is_match(text) {
        return Intent::List;
    }

    if let Some(id) = DONE_PATTERN.captures(text).and_then(|caps| parse_id(&caps[1])) {
        return Intent::Done { id };
    }

    if let Some(caps) = EDIT_PATTERN.captures(text) {
        if let Some(id) = parse_id(&caps[1]) {
            let content = caps.get(2).map_or("", |m| m.as_str()).trim().to_string();
            return Intent::Edit { id, content };
        }
    }

    if let Some(id) = DELETE_PATTERN.captures(text).and_then(|caps| parse_id(&caps[1])) {
        return Intent::Delete { id };
    }

    Intent::Help
}

/// Digit runs that overflow an id are treated as no match.
fn parse_id(digits: &str) -> Option<i64> {
    digits.parse().ok()
}

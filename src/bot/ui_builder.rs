//! UI Builder module for rendering outcomes as text replies or cards

use serde::Deserialize;
use std::collections::HashMap;

use crate::card::{
    Button, Card, CardAction, CardHeader, CardSection, ChatResponse, OnClick, TextButton,
    TextInput, Widget,
};
use crate::localization::{t, t_args};
use crate::store::Task;

use super::callback_handler::{ActionKind, CONTENT_PARAM, TASK_ID_PARAM};
use super::task_manager::Outcome;

const DONE_GLYPH: &str = "✅";
const OPEN_GLYPH: &str = "❌";

/// How replies are presented to the chat client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// One card per task, with action buttons
    #[default]
    Cards,
    /// A single plain-text message
    Text,
}

/// Render an outcome in the requested mode
pub fn render(outcome: &Outcome, mode: RenderMode) -> ChatResponse {
    match outcome {
        Outcome::Added { id, content } => match mode {
            RenderMode::Cards => ChatResponse::cards(vec![create_added_card(*id, content)]),
            RenderMode::Text => ChatResponse::text(t_args(
                "task-added-text",
                &[("id", &id.to_string()), ("content", content)],
            )),
        },
        Outcome::Tasks(tasks) if tasks.is_empty() => ChatResponse::text(t("no-tasks")),
        Outcome::Tasks(tasks) => match mode {
            RenderMode::Cards => ChatResponse::cards(tasks.iter().map(create_task_card).collect()),
            RenderMode::Text => ChatResponse::text(format_task_list(tasks)),
        },
        Outcome::EditForm { id, content } => match mode {
            RenderMode::Cards => ChatResponse::cards(vec![create_edit_form_card(*id, content)]),
            RenderMode::Text => ChatResponse::text(t_args(
                "edit-form-text",
                &[("id", &id.to_string()), ("content", content)],
            )),
        },
        Outcome::NotFound { id } => {
            ChatResponse::text(t_args("task-not-found", &[("id", &id.to_string())]))
        }
        Outcome::EmptyContent => ChatResponse::text(t("empty-content")),
        Outcome::InvalidTaskId => ChatResponse::text(t("invalid-task-id")),
        Outcome::UnknownAction => ChatResponse::text(t("unknown-action")),
        Outcome::InvalidAction => ChatResponse::text(t("invalid-action")),
        Outcome::Help => ChatResponse::text(t("help-message")),
    }
}

fn status_glyph(done: bool) -> &'static str {
    if done {
        DONE_GLYPH
    } else {
        OPEN_GLYPH
    }
}

/// Format tasks as a simple numbered list
pub fn format_task_list(tasks: &[Task]) -> String {
    let mut result = t("task-list-title");

    for (i, task) in tasks.iter().enumerate() {
        result.push('\n');
        result.push_str(&t_args(
            "task-list-line",
            &[
                ("index", &(i + 1).to_string()),
                ("status", status_glyph(task.done)),
                ("content", &task.content),
                ("id", &task.id.to_string()),
            ],
        ));
    }

    result
}

fn action_button(label: String, kind: ActionKind, parameters: HashMap<String, String>) -> Button {
    Button {
        text_button: TextButton {
            text: label,
            on_click: on_click(kind, parameters),
        },
    }
}

fn on_click(kind: ActionKind, parameters: HashMap<String, String>) -> OnClick {
    OnClick {
        action: CardAction {
            action_method_name: kind.method_name().to_string(),
            parameters,
        },
    }
}

fn task_params(task_id: i64) -> HashMap<String, String> {
    HashMap::from([(TASK_ID_PARAM.to_string(), task_id.to_string())])
}

/// Buttons for a task: Mark as Done (only while open), Edit and Delete
pub fn create_task_buttons(task_id: i64, done: bool) -> Vec<Button> {
    let mut buttons = Vec::new();

    if !done {
        buttons.push(action_button(
            t("button-mark-done"),
            ActionKind::MarkDone,
            task_params(task_id),
        ));
    }
    buttons.push(action_button(
        t("button-edit"),
        ActionKind::EditTask,
        task_params(task_id),
    ));
    buttons.push(action_button(
        t("button-delete"),
        ActionKind::DeleteTask,
        task_params(task_id),
    ));

    buttons
}

fn task_body(content: &str, buttons: Vec<Button>) -> Vec<CardSection> {
    vec![CardSection {
        widgets: vec![
            Widget::paragraph(content),
            Widget::divider(),
            Widget::buttons(buttons),
        ],
    }]
}

/// Card for one task of a list
pub fn create_task_card(task: &Task) -> Card {
    Card {
        header: Some(CardHeader {
            title: t_args(
                "task-title",
                &[("status", status_glyph(task.done)), ("id", &task.id.to_string())],
            ),
            subtitle: None,
        }),
        sections: task_body(&task.content, create_task_buttons(task.id, task.done)),
    }
}

/// Card confirming a freshly added task
pub fn create_added_card(task_id: i64, content: &str) -> Card {
    Card {
        header: Some(CardHeader {
            title: t("task-added-title"),
            subtitle: Some(t_args("task-added-subtitle", &[("id", &task_id.to_string())])),
        }),
        sections: task_body(content, create_task_buttons(task_id, false)),
    }
}

/// Inline edit form prefilled with the current content
pub fn create_edit_form_card(task_id: i64, content: &str) -> Card {
    let input = TextInput {
        name: CONTENT_PARAM.to_string(),
        label: t("edit-form-label"),
        input_type: "SINGLE_LINE".to_string(),
        value: content.to_string(),
        on_change_action: on_click(ActionKind::EditTask, task_params(task_id)),
    };

    let buttons = vec![
        action_button(t("button-save"), ActionKind::EditTask, task_params(task_id)),
        action_button(t("button-cancel"), ActionKind::List, HashMap::new()),
    ];

    Card {
        header: Some(CardHeader {
            title: t_args("edit-form-title", &[("id", &task_id.to_string())]),
            subtitle: None,
        }),
        sections: vec![CardSection {
            widgets: vec![Widget::input(input), Widget::divider(), Widget::buttons(buttons)],
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, content: &str, done: bool) -> Task {
        Task {
            id,
            content: content.to_string(),
            done,
            user_id: "alice".to_string(),
        }
    }

    fn button_labels(buttons: &[Button]) -> Vec<&str> {
        buttons.iter().map(|b| b.text_button.text.as_str()).collect()
    }

    #[test]
    fn test_open_task_has_all_buttons() {
        let buttons = create_task_buttons(3, false);
        assert_eq!(button_labels(&buttons), vec!["Mark as Done", "Edit", "Delete"]);

        let methods: Vec<&str> = buttons
            .iter()
            .map(|b| b.text_button.on_click.action.action_method_name.as_str())
            .collect();
        assert_eq!(methods, vec!["markDone", "editTask", "deleteTask"]);
        for button in &buttons {
            assert_eq!(
                button.text_button.on_click.action.parameters.get("taskId"),
                Some(&"3".to_string())
            );
        }
    }

    #[test]
    fn test_done_task_omits_mark_done() {
        let buttons = create_task_buttons(3, true);
        assert_eq!(button_labels(&buttons), vec!["Edit", "Delete"]);
    }

    #[test]
    fn test_list_renders_one_card_per_task() {
        let outcome = Outcome::Tasks(vec![task(1, "Buy milk", false), task(2, "Walk dog", true)]);
        let response = render(&outcome, RenderMode::Cards);

        assert!(response.text.is_none());
        assert_eq!(response.cards.len(), 2);
        let titles: Vec<&str> = response
            .cards
            .iter()
            .map(|c| c.header.as_ref().unwrap().title.as_str())
            .collect();
        assert_eq!(titles, vec!["❌ Task #1", "✅ Task #2"]);

        let widgets = &response.cards[0].sections[0].widgets;
        assert_eq!(widgets[0].text_paragraph.as_ref().unwrap().text, "Buy milk");
        assert!(widgets[1].divider.is_some());
        assert_eq!(widgets[2].button_list.as_ref().unwrap().buttons.len(), 3);
    }

    #[test]
    fn test_list_renders_numbered_text() {
        let outcome = Outcome::Tasks(vec![task(4, "Buy milk", false), task(7, "Walk dog", true)]);
        let response = render(&outcome, RenderMode::Text);

        assert_eq!(
            response.text.as_deref(),
            Some("📋 Your tasks:\n1. ❌ Buy milk (#4)\n2. ✅ Walk dog (#7)")
        );
        assert!(response.cards.is_empty());
    }

    #[test]
    fn test_empty_list_is_text_in_both_modes() {
        for mode in [RenderMode::Cards, RenderMode::Text] {
            let response = render(&Outcome::Tasks(vec![]), mode);
            assert_eq!(
                response.text.as_deref(),
                Some("📝 No tasks found. Use 'add <task>' to create your first task!")
            );
        }
    }

    #[test]
    fn test_added_card() {
        let outcome = Outcome::Added {
            id: 5,
            content: "Buy milk".to_string(),
        };
        let response = render(&outcome, RenderMode::Cards);
        let card = &response.cards[0];
        let header = card.header.as_ref().unwrap();

        assert_eq!(header.title, "✅ Task Added");
        assert_eq!(header.subtitle.as_deref(), Some("Task ID: 5"));
        let widgets = &card.sections[0].widgets;
        assert_eq!(widgets[0].text_paragraph.as_ref().unwrap().text, "Buy milk");
        assert_eq!(
            button_labels(&widgets[2].button_list.as_ref().unwrap().buttons),
            vec!["Mark as Done", "Edit", "Delete"]
        );
    }

    #[test]
    fn test_added_text() {
        let outcome = Outcome::Added {
            id: 5,
            content: "Buy milk".to_string(),
        };
        let response = render(&outcome, RenderMode::Text);
        assert_eq!(response.text.as_deref(), Some("✅ Task added (ID: 5): Buy milk"));
    }

    #[test]
    fn test_edit_form_card() {
        let card = create_edit_form_card(8, "Old text");
        assert_eq!(card.header.as_ref().unwrap().title, "✏️ Edit Task #8");

        let widgets = &card.sections[0].widgets;
        let input = widgets[0].text_input.as_ref().unwrap();
        assert_eq!(input.name, "content");
        assert_eq!(input.label, "Task content:");
        assert_eq!(input.input_type, "SINGLE_LINE");
        assert_eq!(input.value, "Old text");
        assert_eq!(input.on_change_action.action.action_method_name, "editTask");
        assert!(widgets[1].divider.is_some());

        let buttons = &widgets[2].button_list.as_ref().unwrap().buttons;
        assert_eq!(button_labels(buttons), vec!["Save", "Cancel"]);
        assert_eq!(buttons[0].text_button.on_click.action.action_method_name, "editTask");
        assert_eq!(
            buttons[0].text_button.on_click.action.parameters.get("taskId"),
            Some(&"8".to_string())
        );
        assert_eq!(buttons[1].text_button.on_click.action.action_method_name, "list");
        assert!(buttons[1].text_button.on_click.action.parameters.is_empty());
    }

    #[test]
    fn test_error_replies() {
        let cases = [
            (
                Outcome::NotFound { id: 42 },
                "❌ Task with ID 42 not found or doesn't belong to you",
            ),
            (Outcome::EmptyContent, "❌ Task content cannot be empty"),
            (Outcome::InvalidTaskId, "❌ Invalid task ID"),
            (Outcome::UnknownAction, "❌ Unknown action"),
            (Outcome::InvalidAction, "❌ Invalid action"),
        ];
        for (outcome, expected) in cases {
            assert_eq!(render(&outcome, RenderMode::Cards).text.as_deref(), Some(expected));
        }
    }
}

//! # Card Model
//!
//! Outbound reply payload: either a plain `text` reply or a list of cards.
//! A card is a header plus sections of widgets. Absent fields are left out
//! of the JSON entirely, which is what chat clients expect.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Reply returned to the chat platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<Card>,
}

impl ChatResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            cards: Vec::new(),
        }
    }

    pub fn cards(cards: Vec<Card>) -> Self {
        Self { text: None, cards }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<CardHeader>,
    pub sections: Vec<CardSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardHeader {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSection {
    pub widgets: Vec<Widget>,
}

/// Exactly one of the fields is set on a widget built by this crate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_paragraph: Option<TextParagraph>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_list: Option<ButtonList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divider: Option<Divider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_input: Option<TextInput>,
}

impl Widget {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            text_paragraph: Some(TextParagraph { text: text.into() }),
            ..Default::default()
        }
    }

    pub fn buttons(buttons: Vec<Button>) -> Self {
        Self {
            button_list: Some(ButtonList { buttons }),
            ..Default::default()
        }
    }

    pub fn divider() -> Self {
        Self {
            divider: Some(Divider {}),
            ..Default::default()
        }
    }

    pub fn input(input: TextInput) -> Self {
        Self {
            text_input: Some(input),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextParagraph {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonList {
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub text_button: TextButton,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextButton {
    pub text: String,
    pub on_click: OnClick,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnClick {
    pub action: CardAction,
}

/// Action sent back to the webhook when a button is clicked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAction {
    pub action_method_name: String,
    pub parameters: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divider {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInput {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub input_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    pub on_change_action: OnClick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_response_omits_cards() {
        let json = serde_json::to_value(ChatResponse::text("hi")).unwrap();
        assert_eq!(json, serde_json::json!({ "text": "hi" }));
    }

    #[test]
    fn test_widget_field_names() {
        let card = Card {
            header: Some(CardHeader {
                title: "T".to_string(),
                subtitle: None,
            }),
            sections: vec![CardSection {
                widgets: vec![
                    Widget::paragraph("body"),
                    Widget::divider(),
                    Widget::buttons(vec![Button {
                        text_button: TextButton {
                            text: "Go".to_string(),
                            on_click: OnClick {
                                action: CardAction {
                                    action_method_name: "list".to_string(),
                                    parameters: HashMap::new(),
                                },
                            },
                        },
                    }]),
                ],
            }],
        };

        let json = serde_json::to_value(ChatResponse::cards(vec![card])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "cards": [{
                    "header": { "title": "T" },
                    "sections": [{
                        "widgets": [
                            { "textParagraph": { "text": "body" } },
                            { "divider": {} },
                            { "buttonList": { "buttons": [{
                                "textButton": {
                                    "text": "Go",
                                    "onClick": { "action": {
                                        "actionMethodName": "list",
                                        "parameters": {}
                                    } }
                                }
                            }] } }
                        ]
                    }]
                }]
            })
        );
    }
}

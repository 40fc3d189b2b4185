//! Component - Interactive message components (action rows, buttons, selects)

use serde::{Deserialize, Serialize};

use super::{nullable, Emoji};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Component {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Emoji>,
    #[serde(default, deserialize_with = "nullable::flag")]
    pub disabled: bool,
    /// Children of an action row
    #[serde(
        default,
        deserialize_with = "nullable::vec",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub components: Vec<Component>,
}

impl Component {
    pub const ACTION_ROW: u8 = 1;
    pub const BUTTON: u8 = 2;
    pub const STRING_SELECT: u8 = 3;

    pub fn action_row(components: Vec<Component>) -> Self {
        Self {
            kind: Self::ACTION_ROW,
            components,
            ..Default::default()
        }
    }

    pub fn button(custom_id: impl Into<String>, label: impl Into<String>, style: u8) -> Self {
        Self {
            kind: Self::BUTTON,
            custom_id: Some(custom_id.into()),
            label: Some(label.into()),
            style: Some(style),
            ..Default::default()
        }
    }

    /// Depth-first iteration over this component and its children
    pub fn walk(&self) -> Vec<&Component> {
        let mut out = vec![self];
        for child in &self.components {
            out.extend(child.walk());
        }
        out
    }
}

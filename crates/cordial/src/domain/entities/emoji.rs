//! Emoji and Reaction

use serde::{Deserialize, Serialize};

use super::nullable;

/// Unicode or custom emoji
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Emoji {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable::flag")]
    pub animated: bool,
}

impl Emoji {
    pub fn unicode(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            animated: false,
        }
    }

    pub fn custom(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            animated: false,
        }
    }

    /// Identifier used in reaction routes: `name:id` for custom emoji, the character otherwise
    pub fn reaction_key(&self) -> String {
        match (&self.name, &self.id) {
            (Some(name), Some(id)) => format!("{name}:{id}"),
            (Some(name), None) => name.clone(),
            (None, Some(id)) => format!("_:{id}"),
            (None, None) => String::new(),
        }
    }
}

/// Aggregated reaction on a message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reaction {
    #[serde(default)]
    pub count: u32,
    #[serde(default, deserialize_with = "nullable::flag")]
    pub me: bool,
    pub emoji: Emoji,
}

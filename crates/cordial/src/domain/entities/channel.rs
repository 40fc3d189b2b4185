//! Channel - Text, voice or thread channel

use serde::{Deserialize, Serialize};

use super::{nullable, Mentionable};
use crate::domain::value_objects::ChannelType;

/// A channel record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: ChannelType,
    pub guild_id: Option<String>,
    pub name: Option<String>,
    pub topic: Option<String>,
    pub parent_id: Option<String>,
    pub position: Option<i32>,
    #[serde(default, deserialize_with = "nullable::flag")]
    pub nsfw: bool,
    pub last_message_id: Option<String>,
}

impl Channel {
    pub fn new(id: impl Into<String>, kind: ChannelType) -> Self {
        Self {
            id: id.into(),
            kind,
            guild_id: None,
            name: None,
            topic: None,
            parent_id: None,
            position: None,
            nsfw: false,
            last_message_id: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Mentionable for Channel {
    fn mention(&self) -> String {
        format!("<#{}>", self.id)
    }
}

/// Channel summary carried in `mention_channels`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelMention {
    pub id: String,
    pub guild_id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ChannelType,
    #[serde(default)]
    pub name: String,
}

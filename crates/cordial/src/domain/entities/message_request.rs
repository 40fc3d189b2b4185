//! Request bodies for creating and editing messages

use serde::{Deserialize, Serialize};

use super::{Component, Embed, MessageReference};
use crate::domain::value_objects::MessageFlags;

/// Body of a create-message request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub tts: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_reference: Option<MessageReference>,
}

impl CreateMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn tts(mut self, tts: bool) -> Self {
        self.tts = tts;
        self
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    pub fn reference(mut self, reference: MessageReference) -> Self {
        self.message_reference = Some(reference);
        self
    }
}

/// Body of an edit-message request; only set fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EditMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Embed>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Component>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<MessageFlags>,
}

impl EditMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn embeds(mut self, embeds: Vec<Embed>) -> Self {
        self.embeds = Some(embeds);
        self
    }

    pub fn components(mut self, components: Vec<Component>) -> Self {
        self.components = Some(components);
        self
    }

    pub fn flags(mut self, flags: MessageFlags) -> Self {
        self.flags = Some(flags);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_only_sends_set_fields() {
        let body = serde_json::to_value(EditMessage::new().content("fixed")).unwrap();
        assert_eq!(body, serde_json::json!({ "content": "fixed" }));
    }

    #[test]
    fn test_create_omits_defaults() {
        let body = serde_json::to_value(CreateMessage::new().content("hi")).unwrap();
        assert_eq!(body, serde_json::json!({ "content": "hi" }));

        let body = serde_json::to_value(CreateMessage::new().content("hi").tts(true)).unwrap();
        assert_eq!(body, serde_json::json!({ "content": "hi", "tts": true }));
    }
}

//! Attachment - File uploaded with a message

use serde::{Deserialize, Serialize};

use super::nullable;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    pub id: String,
    #[serde(default)]
    pub filename: String,
    pub description: Option<String>,
    pub content_type: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub url: String,
    pub proxy_url: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "nullable::flag")]
    pub ephemeral: bool,
}

impl Attachment {
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"))
    }
}

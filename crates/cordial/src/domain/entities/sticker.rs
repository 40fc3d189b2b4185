//! Sticker records

use serde::{Deserialize, Serialize};

/// Minimal sticker reference carried in `sticker_items`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StickerItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub format_type: u8,
}

/// Full sticker object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sticker {
    pub id: String,
    pub pack_id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: String,
    #[serde(rename = "type", default)]
    pub kind: u8,
    #[serde(default)]
    pub format_type: u8,
    pub guild_id: Option<String>,
}

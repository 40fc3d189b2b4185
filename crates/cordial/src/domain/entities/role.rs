//! Role - Guild permission group

use serde::{Deserialize, Serialize};

use super::{nullable, Mentionable};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: u32,
    #[serde(default)]
    pub position: i32,
    /// Permission bit set, serialized as a decimal string by the platform
    #[serde(default)]
    pub permissions: String,
    #[serde(default, deserialize_with = "nullable::flag")]
    pub hoist: bool,
    #[serde(default, deserialize_with = "nullable::flag")]
    pub managed: bool,
    #[serde(default, deserialize_with = "nullable::flag")]
    pub mentionable: bool,
}

impl Mentionable for Role {
    fn mention(&self) -> String {
        format!("<@&{}>", self.id)
    }
}

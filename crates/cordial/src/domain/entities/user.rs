//! User - Platform account

use serde::{Deserialize, Serialize};

use super::{nullable, Mentionable};

/// A platform user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: String,
    pub discriminator: Option<String>,
    pub global_name: Option<String>,
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "nullable::flag")]
    pub bot: bool,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            discriminator: None,
            global_name: None,
            avatar: None,
            bot: false,
        }
    }

    /// Global display name if set, otherwise the username
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }
}

impl Mentionable for User {
    fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

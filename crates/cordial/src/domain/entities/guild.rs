//! Guild - Community container owning channels and roles

use serde::{Deserialize, Serialize};

use super::{nullable, Channel, Role};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Guild {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub icon: Option<String>,
    pub owner_id: Option<String>,
    #[serde(default, deserialize_with = "nullable::vec")]
    pub channels: Vec<Channel>,
    #[serde(default, deserialize_with = "nullable::vec")]
    pub roles: Vec<Role>,
}

impl Guild {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
            owner_id: None,
            channels: Vec::new(),
            roles: Vec::new(),
        }
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channels.push(channel);
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    pub fn channel(&self, channel_id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == channel_id)
    }

    pub fn role(&self, role_id: &str) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == role_id)
    }

    pub fn has_channel(&self, channel_id: &str) -> bool {
        self.channel(channel_id).is_some()
    }
}

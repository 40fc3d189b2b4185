//! Interaction - Command invocation that produced a message

use serde::{Deserialize, Serialize};

use super::PartialMember;
use super::User;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: u8,
    #[serde(default)]
    pub name: String,
    pub user: Option<User>,
    pub member: Option<PartialMember>,
}

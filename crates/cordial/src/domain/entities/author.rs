//! Author - Who wrote a message

use serde::{Deserialize, Serialize};

use super::{Member, User};

/// Something that can be mentioned in message content
pub trait Mentionable {
    fn mention(&self) -> String;
}

/// Message author: a guild member when member context is present, otherwise a plain user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Author {
    Member(Member),
    User(User),
}

impl Author {
    pub fn user(&self) -> &User {
        match self {
            Author::Member(member) => &member.user,
            Author::User(user) => user,
        }
    }

    pub fn id(&self) -> &str {
        &self.user().id
    }

    pub fn display_name(&self) -> &str {
        match self {
            Author::Member(member) => member.display_name(),
            Author::User(user) => user.display_name(),
        }
    }

    pub fn as_member(&self) -> Option<&Member> {
        match self {
            Author::Member(member) => Some(member),
            Author::User(_) => None,
        }
    }

    pub fn is_member(&self) -> bool {
        matches!(self, Author::Member(_))
    }
}

impl Mentionable for Author {
    fn mention(&self) -> String {
        self.user().mention()
    }
}

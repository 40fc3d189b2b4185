//! Member - A user's membership in a guild

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{nullable, Mentionable, User};

/// Guild member record as embedded in other payloads; the user may be absent
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PartialMember {
    pub user: Option<User>,
    pub nick: Option<String>,
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "nullable::vec")]
    pub roles: Vec<String>,
    pub joined_at: Option<DateTime<Utc>>,
}

/// A user bound to a guild
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub user: User,
    pub guild_id: Option<String>,
    pub nick: Option<String>,
    pub avatar: Option<String>,
    pub roles: Vec<String>,
    pub joined_at: Option<DateTime<Utc>>,
}

impl Member {
    /// Bind a partial member to its user and guild
    ///
    /// Uses the member's own user record, falling back to `user`.
    /// Returns `None` when neither is available.
    pub fn from_partial(
        partial: PartialMember,
        user: Option<User>,
        guild_id: Option<String>,
    ) -> Option<Self> {
        let user = partial.user.or(user)?;
        Some(Self {
            user,
            guild_id,
            nick: partial.nick,
            avatar: partial.avatar,
            roles: partial.roles,
            joined_at: partial.joined_at,
        })
    }

    /// Guild nickname if set, otherwise the user's display name
    pub fn display_name(&self) -> &str {
        self.nick
            .as_deref()
            .unwrap_or_else(|| self.user.display_name())
    }

    pub fn has_role(&self, role_id: &str) -> bool {
        self.roles.iter().any(|r| r == role_id)
    }
}

impl Mentionable for Member {
    fn mention(&self) -> String {
        self.user.mention()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_partial_prefers_embedded_user() {
        let partial = PartialMember {
            user: Some(User::new("1", "embedded")),
            nick: Some("nick".into()),
            ..Default::default()
        };
        let member =
            Member::from_partial(partial, Some(User::new("2", "fallback")), Some("g".into()))
                .unwrap();

        assert_eq!(member.user.id, "1");
        assert_eq!(member.display_name(), "nick");
        assert_eq!(member.guild_id.as_deref(), Some("g"));
    }

    #[test]
    fn test_from_partial_without_any_user() {
        assert!(Member::from_partial(PartialMember::default(), None, None).is_none());
    }
}

//! Route - REST endpoints used by message actions
//!
//! Each variant owns its path template and HTTP verb, so callers never
//! interpolate paths by hand.

use super::HttpMethod;

/// A REST endpoint with its path parameters filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    GetMessage {
        channel_id: &'a str,
        message_id: &'a str,
    },
    CreateMessage {
        channel_id: &'a str,
    },
    EditMessage {
        channel_id: &'a str,
        message_id: &'a str,
    },
    DeleteMessage {
        channel_id: &'a str,
        message_id: &'a str,
    },
    CrosspostMessage {
        channel_id: &'a str,
        message_id: &'a str,
    },
    CreateReaction {
        channel_id: &'a str,
        message_id: &'a str,
        emoji: &'a str,
    },
    DeleteOwnReaction {
        channel_id: &'a str,
        message_id: &'a str,
        emoji: &'a str,
    },
    DeleteUserReaction {
        channel_id: &'a str,
        message_id: &'a str,
        emoji: &'a str,
        user_id: &'a str,
    },
    GetReactions {
        channel_id: &'a str,
        message_id: &'a str,
        emoji: &'a str,
    },
    PinMessage {
        channel_id: &'a str,
        message_id: &'a str,
    },
    UnpinMessage {
        channel_id: &'a str,
        message_id: &'a str,
    },
    StartThreadFromMessage {
        channel_id: &'a str,
        message_id: &'a str,
    },
}

impl Route<'_> {
    pub fn method(&self) -> HttpMethod {
        match self {
            Route::GetMessage { .. } | Route::GetReactions { .. } => HttpMethod::Get,
            Route::CreateMessage { .. }
            | Route::CrosspostMessage { .. }
            | Route::StartThreadFromMessage { .. } => HttpMethod::Post,
            Route::CreateReaction { .. } | Route::PinMessage { .. } => HttpMethod::Put,
            Route::EditMessage { .. } => HttpMethod::Patch,
            Route::DeleteMessage { .. }
            | Route::DeleteOwnReaction { .. }
            | Route::DeleteUserReaction { .. }
            | Route::UnpinMessage { .. } => HttpMethod::Delete,
        }
    }

    /// Path relative to the API base URL, with emoji segments percent-encoded
    pub fn path(&self) -> String {
        match self {
            Route::GetMessage {
                channel_id,
                message_id,
            }
            | Route::EditMessage {
                channel_id,
                message_id,
            }
            | Route::DeleteMessage {
                channel_id,
                message_id,
            } => format!("/channels/{channel_id}/messages/{message_id}"),
            Route::CreateMessage { channel_id } => format!("/channels/{channel_id}/messages"),
            Route::CrosspostMessage {
                channel_id,
                message_id,
            } => format!("/channels/{channel_id}/messages/{message_id}/crosspost"),
            Route::CreateReaction {
                channel_id,
                message_id,
                emoji,
            }
            | Route::DeleteOwnReaction {
                channel_id,
                message_id,
                emoji,
            } => format!(
                "/channels/{channel_id}/messages/{message_id}/reactions/{}/@me",
                urlencoding::encode(emoji)
            ),
            Route::DeleteUserReaction {
                channel_id,
                message_id,
                emoji,
                user_id,
            } => format!(
                "/channels/{channel_id}/messages/{message_id}/reactions/{}/{user_id}",
                urlencoding::encode(emoji)
            ),
            Route::GetReactions {
                channel_id,
                message_id,
                emoji,
            } => format!(
                "/channels/{channel_id}/messages/{message_id}/reactions/{}",
                urlencoding::encode(emoji)
            ),
            Route::PinMessage {
                channel_id,
                message_id,
            }
            | Route::UnpinMessage {
                channel_id,
                message_id,
            } => format!("/channels/{channel_id}/pins/{message_id}"),
            Route::StartThreadFromMessage {
                channel_id,
                message_id,
            } => format!("/channels/{channel_id}/messages/{message_id}/threads"),
        }
    }
}

impl std::fmt::Display for Route<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_routes_encode_emoji() {
        let route = Route::CreateReaction {
            channel_id: "9",
            message_id: "1",
            emoji: "🔥",
        };
        assert_eq!(route.method(), HttpMethod::Put);
        assert_eq!(
            route.path(),
            "/channels/9/messages/1/reactions/%F0%9F%94%A5/@me"
        );

        let route = Route::DeleteUserReaction {
            channel_id: "9",
            message_id: "1",
            emoji: "blob:42",
            user_id: "userA",
        };
        assert_eq!(route.method(), HttpMethod::Delete);
        assert_eq!(
            route.path(),
            "/channels/9/messages/1/reactions/blob%3A42/userA"
        );
    }

    #[test]
    fn test_pin_routes_share_path() {
        let pin = Route::PinMessage {
            channel_id: "9",
            message_id: "1",
        };
        let unpin = Route::UnpinMessage {
            channel_id: "9",
            message_id: "1",
        };
        assert_eq!(pin.path(), unpin.path());
        assert_eq!(pin.to_string(), "PUT /channels/9/pins/1");
        assert_eq!(unpin.to_string(), "DELETE /channels/9/pins/1");
    }
}

//! Message Entity
//!
//! A chat message mapped from a platform payload, plus the REST actions
//! that can be taken on it (react, edit, reply, pin, ...).
//!
//! The guild and channel a message lives in are never stored: they are
//! looked up in the client's registry on demand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{
    nullable, Application, Attachment, Author, Channel, ChannelMention, Component, CreateMessage,
    EditMessage, Embed, Guild, Interaction, Member, PartialMember, Reaction, Role, Sticker,
    StickerItem, User,
};
use crate::client::{Client, ClientRef};
use crate::domain::errors::{ConstructionError, DomainError, RestError};
use crate::domain::value_objects::{MessageFlags, MessageType, Route};

/// Payload keys that must hold a sequence when present
const SEQUENCE_FIELDS: [&str; 9] = [
    "mentions",
    "mention_roles",
    "mention_channels",
    "attachments",
    "embeds",
    "reactions",
    "components",
    "sticker_items",
    "stickers",
];

/// Cross-reference to the message a reply or crosspost points at
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_if_not_exists: Option<bool>,
}

/// Client-side nonce, sent either as a string or an integer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Nonce {
    Integer(i64),
    String(String),
}

/// Rich presence activity attached to a message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageActivity {
    #[serde(rename = "type")]
    pub kind: u8,
    pub party_id: Option<String>,
}

/// Role subscription purchase details
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoleSubscriptionData {
    pub role_subscription_listing_id: String,
    pub tier_name: String,
    pub total_months_subscribed: u32,
    pub is_renewal: bool,
}

/// Wire shape of a message payload
#[derive(Deserialize)]
struct MessagePayload {
    id: String,
    channel_id: String,
    guild_id: Option<String>,
    author: Option<User>,
    member: Option<PartialMember>,
    content: Option<String>,
    timestamp: Option<DateTime<Utc>>,
    edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable::flag")]
    tts: bool,
    #[serde(default, deserialize_with = "nullable::flag")]
    mention_everyone: bool,
    #[serde(default, deserialize_with = "nullable::vec")]
    mentions: Vec<User>,
    #[serde(default, deserialize_with = "nullable::vec")]
    mention_roles: Vec<String>,
    #[serde(default, deserialize_with = "nullable::vec")]
    mention_channels: Vec<ChannelMention>,
    #[serde(default, deserialize_with = "nullable::vec")]
    attachments: Vec<Attachment>,
    #[serde(default, deserialize_with = "nullable::vec")]
    embeds: Vec<Embed>,
    #[serde(default, deserialize_with = "nullable::vec")]
    reactions: Vec<Reaction>,
    nonce: Option<Nonce>,
    #[serde(default, deserialize_with = "nullable::flag")]
    pinned: bool,
    webhook_id: Option<String>,
    #[serde(rename = "type")]
    kind: Option<MessageType>,
    activity: Option<MessageActivity>,
    application: Option<Application>,
    application_id: Option<String>,
    message_reference: Option<MessageReference>,
    flags: Option<MessageFlags>,
    referenced_message: Option<serde_json::Value>,
    interaction: Option<Interaction>,
    thread: Option<Channel>,
    #[serde(default, deserialize_with = "nullable::vec")]
    components: Vec<Component>,
    #[serde(default, deserialize_with = "nullable::vec")]
    sticker_items: Vec<StickerItem>,
    #[serde(default, deserialize_with = "nullable::vec")]
    stickers: Vec<Sticker>,
    position: Option<u64>,
    role_subscription_data: Option<RoleSubscriptionData>,
}

/// Partial payload of a MESSAGE_UPDATE event; absent keys leave fields untouched
#[derive(Deserialize)]
struct MessageUpdatePayload {
    id: String,
    content: Option<String>,
    edited_timestamp: Option<DateTime<Utc>>,
    pinned: Option<bool>,
    flags: Option<MessageFlags>,
    mention_everyone: Option<bool>,
    mentions: Option<Vec<User>>,
    mention_roles: Option<Vec<String>>,
    attachments: Option<Vec<Attachment>>,
    embeds: Option<Vec<Embed>>,
    components: Option<Vec<Component>>,
}

/// A chat message
#[derive(Debug, Clone)]
pub struct Message {
    id: String,
    channel_id: String,
    guild_id: Option<String>,
    pub author: Author,
    /// Text body; empty for embed-only messages
    pub content: String,
    pub sent_at: Option<DateTime<Utc>>,
    pub edited_at: Option<DateTime<Utc>>,
    pub is_tts: bool,
    pub has_everyone_mention: bool,
    pub mentions: Vec<User>,
    /// IDs of mentioned roles
    pub role_mentions: Vec<String>,
    pub channel_mentions: Vec<ChannelMention>,
    pub attachments: Vec<Attachment>,
    pub embeds: Vec<Embed>,
    pub reactions: Vec<Reaction>,
    pub nonce: Option<Nonce>,
    pub is_pinned: bool,
    pub webhook_id: Option<String>,
    pub kind: MessageType,
    pub activity: Option<MessageActivity>,
    pub application: Option<Application>,
    pub application_id: Option<String>,
    /// Always populated; points at this message when the payload carries none
    pub message_reference: MessageReference,
    pub flags: Option<MessageFlags>,
    pub referenced_message: Option<Box<Message>>,
    pub interaction: Option<Interaction>,
    pub thread: Option<Channel>,
    pub components: Vec<Component>,
    pub sticker_items: Vec<StickerItem>,
    pub stickers: Vec<Sticker>,
    pub position: Option<u64>,
    pub boost_role_data: Option<RoleSubscriptionData>,
    client: ClientRef,
}

impl Message {
    /// Build a message from a raw payload
    ///
    /// `id` and `channel_id` are required, and every sequence field must be
    /// an array, `null` or absent. Absent sequences become empty.
    pub fn from_payload(
        client: &Client,
        payload: serde_json::Value,
    ) -> Result<Self, ConstructionError> {
        validate_payload(&payload)?;
        let raw: MessagePayload = serde_json::from_value(payload)?;
        Self::from_raw(client, raw)
    }

    fn from_raw(client: &Client, raw: MessagePayload) -> Result<Self, ConstructionError> {
        let context_guild_id = raw
            .guild_id
            .clone()
            .or_else(|| {
                raw.message_reference
                    .as_ref()
                    .and_then(|r| r.guild_id.clone())
            })
            .or_else(|| {
                client
                    .guilds()
                    .find_by_channel(&raw.channel_id)
                    .map(|g| g.id)
            });

        let author = resolve_author(
            raw.interaction.as_ref(),
            raw.author,
            raw.member,
            context_guild_id.clone(),
        )?;

        let message_reference = raw.message_reference.unwrap_or_else(|| MessageReference {
            message_id: Some(raw.id.clone()),
            channel_id: Some(raw.channel_id.clone()),
            guild_id: context_guild_id.clone(),
            fail_if_not_exists: None,
        });

        let referenced_message = raw
            .referenced_message
            .map(|nested| Self::from_payload(client, nested).map(Box::new))
            .transpose()?;

        Ok(Self {
            id: raw.id,
            channel_id: raw.channel_id,
            guild_id: context_guild_id,
            author,
            content: raw.content.unwrap_or_default(),
            sent_at: raw.timestamp,
            edited_at: raw.edited_timestamp,
            is_tts: raw.tts,
            has_everyone_mention: raw.mention_everyone,
            mentions: raw.mentions,
            role_mentions: raw.mention_roles,
            channel_mentions: raw.mention_channels,
            attachments: raw.attachments,
            embeds: raw.embeds,
            reactions: raw.reactions,
            nonce: raw.nonce,
            is_pinned: raw.pinned,
            webhook_id: raw.webhook_id,
            kind: raw.kind.unwrap_or_default(),
            activity: raw.activity,
            application: raw.application,
            application_id: raw.application_id,
            message_reference,
            flags: raw.flags,
            referenced_message,
            interaction: raw.interaction,
            thread: raw.thread,
            components: raw.components,
            sticker_items: raw.sticker_items,
            stickers: raw.stickers,
            position: raw.position,
            boost_role_data: raw.role_subscription_data,
            client: client.downgrade(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Channel ID exactly as received in the payload
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// Guild the message was sent in, as resolved at construction
    ///
    /// Taken from the payload's `guild_id`, then the reference's guild, then the
    /// registry guild owning the channel.
    pub fn guild_id(&self) -> Option<&str> {
        self.guild_id.as_deref()
    }

    pub fn client(&self) -> Option<Client> {
        self.client.upgrade()
    }

    /// Guild this message belongs to
    ///
    /// Looks up the reference's guild ID first, then scans known guilds (in ID
    /// order) for one owning the message's channel. Never mutates the registry.
    pub fn guild(&self) -> Option<Guild> {
        let client = self.client.upgrade()?;
        let registry = client.guilds();

        if let Some(guild) = self
            .message_reference
            .guild_id
            .as_deref()
            .and_then(|id| registry.get(id))
        {
            return Some(guild);
        }

        debug!(
            message_id = %self.id,
            channel_id = %self.channel_id,
            "Guild not resolved by reference, scanning registry"
        );
        registry.find_by_channel(&self.channel_id)
    }

    /// Channel this message was sent in, looked up in the resolved guild
    pub fn channel(&self) -> Option<Channel> {
        self.guild()?
            .channels
            .into_iter()
            .find(|c| c.id == self.channel_id)
    }

    /// Mentioned roles that the resolved guild knows about, in mention order
    pub fn mentioned_roles(&self) -> Vec<Role> {
        let Some(guild) = self.guild() else {
            return Vec::new();
        };

        self.role_mentions
            .iter()
            .filter_map(|id| guild.role(id).cloned())
            .collect()
    }

    /// Reference pointing at this message, as sent with a reply
    pub fn reference_to_self(&self) -> MessageReference {
        MessageReference {
            message_id: Some(self.id.clone()),
            channel_id: Some(self.channel_id.clone()),
            guild_id: self.guild_id.clone(),
            fail_if_not_exists: None,
        }
    }

    /// Patch fields carried by a MESSAGE_UPDATE payload
    ///
    /// The identifier is never reassigned: an update for another message is rejected.
    pub fn apply_update(&mut self, payload: serde_json::Value) -> Result<(), DomainError> {
        validate_payload_shape(&payload)?;
        let update: MessageUpdatePayload =
            serde_json::from_value(payload).map_err(ConstructionError::from)?;

        if update.id != self.id {
            return Err(DomainError::IdMismatch {
                expected: self.id.clone(),
                actual: update.id,
            });
        }

        if let Some(content) = update.content {
            self.content = content;
        }
        if update.edited_timestamp.is_some() {
            self.edited_at = update.edited_timestamp;
        }
        if let Some(pinned) = update.pinned {
            self.is_pinned = pinned;
        }
        if update.flags.is_some() {
            self.flags = update.flags;
        }
        if let Some(mention_everyone) = update.mention_everyone {
            self.has_everyone_mention = mention_everyone;
        }
        if let Some(mentions) = update.mentions {
            self.mentions = mentions;
        }
        if let Some(mention_roles) = update.mention_roles {
            self.role_mentions = mention_roles;
        }
        if let Some(attachments) = update.attachments {
            self.attachments = attachments;
        }
        if let Some(embeds) = update.embeds {
            self.embeds = embeds;
        }
        if let Some(components) = update.components {
            self.components = components;
        }

        Ok(())
    }

    // ============================================
    // REST actions
    // ============================================

    async fn send(
        &self,
        route: Route<'_>,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, DomainError> {
        let client = self.client.upgrade().ok_or_else(|| {
            warn!(message_id = %self.id, "Client dropped before message action");
            DomainError::ClientDropped
        })?;

        Ok(client.request(route, body).await?)
    }

    fn build_from_response(&self, payload: serde_json::Value) -> Result<Message, DomainError> {
        let client = self.client.upgrade().ok_or(DomainError::ClientDropped)?;
        Ok(Message::from_payload(&client, payload)?)
    }

    /// Publish this announcement-channel message to following channels
    pub async fn crosspost(&self) -> Result<(), DomainError> {
        self.send(
            Route::CrosspostMessage {
                channel_id: &self.channel_id,
                message_id: &self.id,
            },
            None,
        )
        .await?;
        Ok(())
    }

    /// Add the current user's reaction
    ///
    /// `emoji` is a unicode character or `name:id` for custom emoji.
    pub async fn react(&self, emoji: &str) -> Result<(), DomainError> {
        self.send(
            Route::CreateReaction {
                channel_id: &self.channel_id,
                message_id: &self.id,
                emoji,
            },
            None,
        )
        .await?;
        Ok(())
    }

    /// Remove a reaction
    ///
    /// With `user_id`, removes only that user's reaction; without, removes the
    /// current user's. Exactly one request is issued either way.
    pub async fn remove_reaction(
        &self,
        emoji: &str,
        user_id: Option<&str>,
    ) -> Result<(), DomainError> {
        let route = match user_id {
            Some(user_id) => Route::DeleteUserReaction {
                channel_id: &self.channel_id,
                message_id: &self.id,
                emoji,
                user_id,
            },
            None => Route::DeleteOwnReaction {
                channel_id: &self.channel_id,
                message_id: &self.id,
                emoji,
            },
        };

        self.send(route, None).await?;
        Ok(())
    }

    /// Users who reacted with `emoji`
    pub async fn get_reactions(&self, emoji: &str) -> Result<Vec<User>, DomainError> {
        let response = self
            .send(
                Route::GetReactions {
                    channel_id: &self.channel_id,
                    message_id: &self.id,
                    emoji,
                },
                None,
            )
            .await?;

        if response.is_null() {
            return Ok(Vec::new());
        }

        serde_json::from_value(response)
            .map_err(|e| RestError::Decode(format!("reaction users: {e}")).into())
    }

    /// Edit this message, returning the updated message
    pub async fn edit(&self, edit: EditMessage) -> Result<Message, DomainError> {
        let body = serde_json::to_value(&edit).map_err(ConstructionError::from)?;
        let response = self
            .send(
                Route::EditMessage {
                    channel_id: &self.channel_id,
                    message_id: &self.id,
                },
                Some(body),
            )
            .await?;

        self.build_from_response(response)
    }

    /// Reply to this message in the same channel, returning the new message
    ///
    /// Any reference already set on `reply` is replaced by one pointing at this message.
    pub async fn reply(&self, reply: CreateMessage) -> Result<Message, DomainError> {
        let reply = reply.reference(self.reference_to_self());
        let body = serde_json::to_value(&reply).map_err(ConstructionError::from)?;
        let response = self
            .send(
                Route::CreateMessage {
                    channel_id: &self.channel_id,
                },
                Some(body),
            )
            .await?;

        self.build_from_response(response)
    }

    pub async fn delete(&self) -> Result<(), DomainError> {
        self.send(
            Route::DeleteMessage {
                channel_id: &self.channel_id,
                message_id: &self.id,
            },
            None,
        )
        .await?;
        Ok(())
    }

    pub async fn pin(&self) -> Result<(), DomainError> {
        self.send(
            Route::PinMessage {
                channel_id: &self.channel_id,
                message_id: &self.id,
            },
            None,
        )
        .await?;
        Ok(())
    }

    pub async fn unpin(&self) -> Result<(), DomainError> {
        self.send(
            Route::UnpinMessage {
                channel_id: &self.channel_id,
                message_id: &self.id,
            },
            None,
        )
        .await?;
        Ok(())
    }

    /// Start a thread from this message, returning the thread channel
    pub async fn start_thread(&self, name: &str) -> Result<Channel, DomainError> {
        let response = self
            .send(
                Route::StartThreadFromMessage {
                    channel_id: &self.channel_id,
                    message_id: &self.id,
                },
                Some(serde_json::json!({ "name": name })),
            )
            .await?;

        serde_json::from_value(response)
            .map_err(|e| RestError::Decode(format!("thread channel: {e}")).into())
    }
}

/// Pick the author from interaction context first, then the conventional `author` field
fn resolve_author(
    interaction: Option<&Interaction>,
    author: Option<User>,
    member: Option<PartialMember>,
    guild_id: Option<String>,
) -> Result<Author, ConstructionError> {
    if let Some(interaction) = interaction {
        let invoking_member = interaction
            .member
            .clone()
            .and_then(|m| Member::from_partial(m, None, guild_id.clone()));
        if let Some(member) = invoking_member {
            return Ok(Author::Member(member));
        }
        if let Some(user) = &interaction.user {
            return Ok(Author::User(user.clone()));
        }
    }

    let user = author.ok_or_else(|| ConstructionError::missing("author"))?;
    let member =
        member.and_then(|partial| Member::from_partial(partial, Some(user.clone()), guild_id));
    match member {
        Some(member) => Ok(Author::Member(member)),
        None => Ok(Author::User(user)),
    }
}

/// Payload must be an object with a string `id` and `channel_id`
fn validate_payload(payload: &serde_json::Value) -> Result<(), ConstructionError> {
    validate_payload_shape(payload)?;
    require_string(payload, "channel_id")
}

/// Payload must be an object with a string `id`, and sequence fields must be arrays
fn validate_payload_shape(payload: &serde_json::Value) -> Result<(), ConstructionError> {
    let object = payload
        .as_object()
        .ok_or_else(|| ConstructionError::invalid("message", "a JSON object"))?;

    require_string(payload, "id")?;

    for field in SEQUENCE_FIELDS {
        match object.get(field) {
            None | Some(serde_json::Value::Null) | Some(serde_json::Value::Array(_)) => {}
            Some(_) => return Err(ConstructionError::invalid(field, "an array")),
        }
    }

    Ok(())
}

fn require_string(payload: &serde_json::Value, field: &'static str) -> Result<(), ConstructionError> {
    match payload.get(field) {
        None | Some(serde_json::Value::Null) => Err(ConstructionError::missing(field)),
        Some(serde_json::Value::String(_)) => Ok(()),
        Some(_) => Err(ConstructionError::invalid(field, "a string")),
    }
}

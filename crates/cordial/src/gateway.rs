//! Gateway dispatch handling
//!
//! Maps dispatch events into entities and keeps the client's guild registry current.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::client::Client;
use crate::domain::{Channel, ConstructionError, DomainError, Guild, Message};

/// Events surfaced to higher layers
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    MessageCreate(Box<Message>),

    /// Partial update; apply with [`Message::apply_update`]
    MessageUpdate {
        id: String,
        channel_id: String,
        payload: serde_json::Value,
    },

    MessageDelete {
        id: String,
        channel_id: String,
        guild_id: Option<String>,
    },

    GuildAvailable {
        guild_id: String,
    },

    GuildRemoved {
        guild_id: String,
    },

    /// A channel was created or updated
    ChannelChanged(Channel),

    ChannelRemoved {
        channel_id: String,
        guild_id: Option<String>,
    },
}

impl GatewayEvent {
    /// Get the channel ID if available
    pub fn channel_id(&self) -> Option<&str> {
        match self {
            Self::MessageCreate(message) => Some(message.channel_id()),
            Self::MessageUpdate { channel_id, .. } => Some(channel_id),
            Self::MessageDelete { channel_id, .. } => Some(channel_id),
            Self::ChannelChanged(channel) => Some(&channel.id),
            Self::ChannelRemoved { channel_id, .. } => Some(channel_id),
            Self::GuildAvailable { .. } | Self::GuildRemoved { .. } => None,
        }
    }
}

#[derive(Deserialize)]
struct MessageIds {
    id: String,
    channel_id: String,
    guild_id: Option<String>,
}

#[derive(Deserialize)]
struct UnavailableGuild {
    id: String,
}

/// Dispatches gateway events against a client
pub struct GatewayDispatcher {
    client: Client,
}

impl GatewayDispatcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Handle one dispatch event
    ///
    /// Returns `None` for events this crate does not track.
    pub fn dispatch(
        &self,
        event_type: &str,
        data: serde_json::Value,
    ) -> Result<Option<GatewayEvent>, DomainError> {
        match event_type {
            "MESSAGE_CREATE" => {
                let message = self.client.message(data)?;
                Ok(Some(GatewayEvent::MessageCreate(Box::new(message))))
            }
            "MESSAGE_UPDATE" => {
                let ids: MessageIds = decode(&data)?;
                Ok(Some(GatewayEvent::MessageUpdate {
                    id: ids.id,
                    channel_id: ids.channel_id,
                    payload: data,
                }))
            }
            "MESSAGE_DELETE" => {
                let ids: MessageIds = decode(&data)?;
                Ok(Some(GatewayEvent::MessageDelete {
                    id: ids.id,
                    channel_id: ids.channel_id,
                    guild_id: ids.guild_id,
                }))
            }
            "GUILD_CREATE" | "GUILD_UPDATE" => {
                let guild = self.store_guild(decode(&data)?);
                Ok(Some(GatewayEvent::GuildAvailable { guild_id: guild }))
            }
            "GUILD_DELETE" => {
                let guild: UnavailableGuild = decode(&data)?;
                self.client.guilds().remove(&guild.id);
                Ok(Some(GatewayEvent::GuildRemoved { guild_id: guild.id }))
            }
            "CHANNEL_CREATE" | "CHANNEL_UPDATE" => {
                let channel: Channel = decode(&data)?;
                if let Some(guild_id) = channel.guild_id.as_deref() {
                    if !self.client.guilds().upsert_channel(guild_id, channel.clone()) {
                        debug!(guild_id = %guild_id, channel_id = %channel.id, "Channel event for unknown guild");
                    }
                }
                Ok(Some(GatewayEvent::ChannelChanged(channel)))
            }
            "CHANNEL_DELETE" => {
                let channel: Channel = decode(&data)?;
                if let Some(guild_id) = channel.guild_id.as_deref() {
                    self.client.guilds().remove_channel(guild_id, &channel.id);
                }
                Ok(Some(GatewayEvent::ChannelRemoved {
                    channel_id: channel.id,
                    guild_id: channel.guild_id,
                }))
            }
            _ => {
                debug!(event_type = %event_type, "Ignoring gateway event");
                Ok(None)
            }
        }
    }

    /// Insert a guild, stamping its channels with the guild ID
    ///
    /// GUILD_UPDATE carries no channel list, so known channels are kept.
    fn store_guild(&self, mut guild: Guild) -> String {
        if guild.channels.is_empty() {
            if let Some(existing) = self.client.guilds().get(&guild.id) {
                guild.channels = existing.channels;
            }
        }
        for channel in &mut guild.channels {
            channel.guild_id.get_or_insert_with(|| guild.id.clone());
        }

        let guild_id = guild.id.clone();
        self.client.guilds().insert(guild);
        guild_id
    }
}

fn decode<T: DeserializeOwned>(data: &serde_json::Value) -> Result<T, ConstructionError> {
    Ok(T::deserialize(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingRest;

    fn dispatcher() -> GatewayDispatcher {
        GatewayDispatcher::new(Client::new(RecordingRest::default()))
    }

    fn guild_create() -> serde_json::Value {
        serde_json::json!({
            "id": "g1",
            "name": "Home",
            "channels": [
                { "id": "9", "type": 0, "name": "general" },
                { "id": "10", "type": 2, "name": "voice" }
            ],
            "roles": [{ "id": "g1", "name": "@everyone", "permissions": "0" }]
        })
    }

    #[test]
    fn test_guild_create_populates_registry() {
        let dispatcher = dispatcher();

        let event = dispatcher.dispatch("GUILD_CREATE", guild_create()).unwrap();

        assert!(matches!(event, Some(GatewayEvent::GuildAvailable { ref guild_id }) if guild_id == "g1"));
        let guild = dispatcher.client().guilds().get("g1").unwrap();
        assert_eq!(guild.channels.len(), 2);
        assert!(guild
            .channels
            .iter()
            .all(|c| c.guild_id.as_deref() == Some("g1")));
    }

    #[test]
    fn test_guild_update_keeps_channels() {
        let dispatcher = dispatcher();
        dispatcher.dispatch("GUILD_CREATE", guild_create()).unwrap();

        dispatcher
            .dispatch(
                "GUILD_UPDATE",
                serde_json::json!({ "id": "g1", "name": "Renamed", "roles": [] }),
            )
            .unwrap();

        let guild = dispatcher.client().guilds().get("g1").unwrap();
        assert_eq!(guild.name, "Renamed");
        assert_eq!(guild.channels.len(), 2);
    }

    #[test]
    fn test_message_create_resolves_guild_from_registry() {
        let dispatcher = dispatcher();
        dispatcher.dispatch("GUILD_CREATE", guild_create()).unwrap();

        let event = dispatcher
            .dispatch(
                "MESSAGE_CREATE",
                serde_json::json!({
                    "id": "1",
                    "channel_id": "9",
                    "content": "hello",
                    "author": { "id": "u1", "username": "sakura" }
                }),
            )
            .unwrap();

        let Some(GatewayEvent::MessageCreate(message)) = event else {
            panic!("Expected MessageCreate event");
        };
        assert_eq!(message.guild().unwrap().id, "g1");
        assert_eq!(message.channel().unwrap().name.as_deref(), Some("general"));
    }

    #[test]
    fn test_message_update_carries_partial_payload() {
        let dispatcher = dispatcher();
        let client = dispatcher.client().clone();
        let mut message = client
            .message(serde_json::json!({
                "id": "1",
                "channel_id": "9",
                "content": "before",
                "author": { "id": "u1", "username": "sakura" }
            }))
            .unwrap();

        let event = dispatcher
            .dispatch(
                "MESSAGE_UPDATE",
                serde_json::json!({ "id": "1", "channel_id": "9", "content": "after" }),
            )
            .unwrap();

        let Some(GatewayEvent::MessageUpdate { id, payload, .. }) = event else {
            panic!("Expected MessageUpdate event");
        };
        assert_eq!(id, "1");
        message.apply_update(payload).unwrap();
        assert_eq!(message.content, "after");
    }

    #[test]
    fn test_channel_lifecycle_updates_registry() {
        let dispatcher = dispatcher();
        dispatcher.dispatch("GUILD_CREATE", guild_create()).unwrap();

        dispatcher
            .dispatch(
                "CHANNEL_CREATE",
                serde_json::json!({ "id": "11", "type": 0, "guild_id": "g1", "name": "new" }),
            )
            .unwrap();
        assert!(dispatcher.client().guilds().get("g1").unwrap().has_channel("11"));

        let event = dispatcher
            .dispatch(
                "CHANNEL_DELETE",
                serde_json::json!({ "id": "11", "type": 0, "guild_id": "g1" }),
            )
            .unwrap()
            .unwrap();
        assert_eq!(event.channel_id(), Some("11"));
        assert!(!dispatcher.client().guilds().get("g1").unwrap().has_channel("11"));
    }

    #[test]
    fn test_guild_delete_and_message_delete() {
        let dispatcher = dispatcher();
        dispatcher.dispatch("GUILD_CREATE", guild_create()).unwrap();

        dispatcher
            .dispatch("GUILD_DELETE", serde_json::json!({ "id": "g1", "unavailable": false }))
            .unwrap();
        assert!(dispatcher.client().guilds().is_empty());

        let event = dispatcher
            .dispatch(
                "MESSAGE_DELETE",
                serde_json::json!({ "id": "1", "channel_id": "9", "guild_id": "g1" }),
            )
            .unwrap();
        assert!(matches!(
            event,
            Some(GatewayEvent::MessageDelete { ref guild_id, .. }) if guild_id.as_deref() == Some("g1")
        ));
    }

    #[test]
    fn test_unknown_event_is_ignored() {
        let dispatcher = dispatcher();
        let event = dispatcher
            .dispatch("TYPING_START", serde_json::json!({ "channel_id": "9" }))
            .unwrap();
        assert!(event.is_none());
    }

    #[test]
    fn test_invalid_message_create_is_construction_error() {
        let dispatcher = dispatcher();
        let err = dispatcher
            .dispatch("MESSAGE_CREATE", serde_json::json!({ "channel_id": "9" }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Construction(_)));
    }
}

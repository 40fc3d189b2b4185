//! Client handle and guild registry
//!
//! `Client` is the shared owner of the REST port and the guild registry.
//! Entities keep a `ClientRef` (a weak handle) so a message never keeps the
//! client alive and no ownership cycle forms between messages, channels and guilds.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use tracing::debug;

use crate::domain::{
    Channel, ConstructionError, DomainError, Guild, Message, RestError, Route,
};
use crate::ports::RestClient;

/// Shared client handle
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    rest: Arc<dyn RestClient>,
    guilds: GuildRegistry,
}

impl Client {
    /// Create a client around a REST implementation
    pub fn new(rest: impl RestClient + 'static) -> Self {
        Self::from_arc(Arc::new(rest))
    }

    /// Create a client around a shared REST implementation
    pub fn from_arc(rest: Arc<dyn RestClient>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                rest,
                guilds: GuildRegistry::default(),
            }),
        }
    }

    pub fn guilds(&self) -> &GuildRegistry {
        &self.inner.guilds
    }

    pub fn rest(&self) -> &Arc<dyn RestClient> {
        &self.inner.rest
    }

    /// Non-owning handle for entities
    pub fn downgrade(&self) -> ClientRef {
        ClientRef(Arc::downgrade(&self.inner))
    }

    /// Build a message from a raw payload
    pub fn message(&self, payload: serde_json::Value) -> Result<Message, ConstructionError> {
        Message::from_payload(self, payload)
    }

    /// Issue a request for a route
    pub async fn request(
        &self,
        route: Route<'_>,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, RestError> {
        let method = route.method();
        let path = route.path();
        debug!(method = %method, path = %path, has_body = body.is_some(), "Issuing REST request");

        self.inner.rest.request(method, &path, body).await
    }

    /// Fetch a single message by ID
    pub async fn fetch_message(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> Result<Message, DomainError> {
        let payload = self
            .request(
                Route::GetMessage {
                    channel_id,
                    message_id,
                },
                None,
            )
            .await?;

        Ok(self.message(payload)?)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("guilds", &self.inner.guilds.len())
            .finish_non_exhaustive()
    }
}

/// Weak handle to a `Client`
#[derive(Clone, Default)]
pub struct ClientRef(Weak<ClientInner>);

impl ClientRef {
    pub fn upgrade(&self) -> Option<Client> {
        self.0.upgrade().map(|inner| Client { inner })
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl std::fmt::Debug for ClientRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ClientRef").field(&self.is_alive()).finish()
    }
}

/// In-memory registry of known guilds, keyed and iterated by guild ID
///
/// Reads hand out clones so no lock is held by callers.
#[derive(Debug, Default)]
pub struct GuildRegistry {
    guilds: RwLock<BTreeMap<String, Guild>>,
}

impl GuildRegistry {
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Guild>> {
        self.guilds.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Guild>> {
        self.guilds.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, guild_id: &str) -> Option<Guild> {
        self.read().get(guild_id).cloned()
    }

    /// First guild, in ID order, matching the predicate
    pub fn find(&self, predicate: impl Fn(&Guild) -> bool) -> Option<Guild> {
        self.read().values().find(|g| predicate(g)).cloned()
    }

    /// First guild, in ID order, owning the given channel
    pub fn find_by_channel(&self, channel_id: &str) -> Option<Guild> {
        self.find(|g| g.has_channel(channel_id))
    }

    /// Insert or replace a guild, returning the previous entry
    pub fn insert(&self, guild: Guild) -> Option<Guild> {
        self.write().insert(guild.id.clone(), guild)
    }

    pub fn remove(&self, guild_id: &str) -> Option<Guild> {
        self.write().remove(guild_id)
    }

    /// Insert or replace a channel inside its guild
    ///
    /// Returns `false` when the guild is unknown.
    pub fn upsert_channel(&self, guild_id: &str, channel: Channel) -> bool {
        let mut guilds = self.write();
        let Some(guild) = guilds.get_mut(guild_id) else {
            return false;
        };

        match guild.channels.iter_mut().find(|c| c.id == channel.id) {
            Some(existing) => *existing = channel,
            None => guild.channels.push(channel),
        }
        true
    }

    pub fn remove_channel(&self, guild_id: &str, channel_id: &str) -> Option<Channel> {
        let mut guilds = self.write();
        let guild = guilds.get_mut(guild_id)?;
        let index = guild.channels.iter().position(|c| c.id == channel_id)?;
        Some(guild.channels.remove(index))
    }

    pub fn ids(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChannelType;
    use crate::testing::RecordingRest;

    fn text(id: &str) -> Channel {
        Channel::new(id, ChannelType::GuildText)
    }

    #[test]
    fn test_find_by_channel_is_ordered_by_guild_id() {
        let registry = GuildRegistry::default();
        registry.insert(Guild::new("b", "Second").with_channel(text("shared")));
        registry.insert(Guild::new("a", "First").with_channel(text("shared")));

        assert_eq!(registry.find_by_channel("shared").unwrap().id, "a");
        assert!(registry.find_by_channel("missing").is_none());
    }

    #[test]
    fn test_upsert_and_remove_channel() {
        let registry = GuildRegistry::default();
        assert!(!registry.upsert_channel("g", text("c")));

        registry.insert(Guild::new("g", "Guild"));
        assert!(registry.upsert_channel("g", text("c")));
        assert!(registry.upsert_channel("g", text("c").with_name("renamed")));

        let guild = registry.get("g").unwrap();
        assert_eq!(guild.channels.len(), 1);
        assert_eq!(guild.channels[0].name.as_deref(), Some("renamed"));

        assert_eq!(registry.remove_channel("g", "c").unwrap().id, "c");
        assert!(registry.remove_channel("g", "c").is_none());
    }

    #[test]
    fn test_client_ref_does_not_keep_client_alive() {
        let client = Client::new(RecordingRest::default());
        let handle = client.downgrade();
        assert!(handle.upgrade().is_some());

        drop(client);
        assert!(!handle.is_alive());
        assert!(handle.upgrade().is_none());
    }

    #[tokio::test]
    async fn test_fetch_message_builds_entity() {
        let rest = Arc::new(RecordingRest::default());
        rest.respond(serde_json::json!({
            "id": "1",
            "channel_id": "9",
            "content": "fetched",
            "author": { "id": "u1", "username": "sakura" }
        }));
        let client = Client::from_arc(rest.clone());

        let message = client.fetch_message("9", "1").await.unwrap();

        assert_eq!(message.id(), "1");
        assert_eq!(message.content, "fetched");
        assert_eq!(rest.calls()[0].to_string(), "GET /channels/9/messages/1");
    }
}

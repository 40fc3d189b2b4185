//! Cordial Domain Library
//!
//! Typed entities and REST-backed actions for a chat platform's message API.
//!
//! # Architecture
//!
//! The crate keeps the same layering as the rest of the workspace:
//!
//! - **Domain Layer** (`domain/`): entities and value types
//!   - `entities/`: Message and the nested records it carries (User, Member, Guild, ...)
//!   - `value_objects/`: wire enums, flags and REST routes
//!   - `errors/`: construction and request error types
//!
//! - **Ports** (`ports/`): the REST collaborator trait implemented by
//!   `cordial-rest` (or by a test double)
//!
//! - **Client** (`client`): shared handle holding the REST port and the guild registry
//!
//! - **Gateway** (`gateway`): maps dispatch events into entities and keeps the registry current
//!
//! # Usage
//!
//! ```rust,ignore
//! use cordial::{Client, Message};
//!
//! let client = Client::new(rest);
//! let message = client.message(payload)?;
//! message.react("🔥").await?;
//! ```

pub mod client;
pub mod domain;
pub mod gateway;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use client::{Client, ClientRef, GuildRegistry};
pub use domain::{
    Application, Attachment, Author, Channel, ChannelMention, ChannelType, Component,
    ConstructionError, CreateMessage, DomainError, EditMessage, Embed, Emoji, Guild, HttpMethod,
    Interaction, Member, Mentionable, Message, MessageActivity, MessageFlags, MessageReference,
    MessageType, Nonce, PartialMember, Reaction, RestError, Role, RoleSubscriptionData, Route,
    Sticker, StickerItem, User,
};
pub use gateway::{GatewayDispatcher, GatewayEvent};
pub use ports::RestClient;

//! Domain Entities
//!
//! Records mapped from platform payloads.
//! - Message: a chat message and the actions that can be taken on it
//! - Author/User/Member: who wrote it
//! - Guild/Channel/Role: lookup targets held in the client registry
//! - Attachment/Embed/Component/Sticker/Emoji/Interaction/Application: nested records

mod application;
mod attachment;
mod author;
mod channel;
mod component;
mod embed;
mod emoji;
mod guild;
mod interaction;
mod member;
mod message;
mod message_request;
mod nullable;
mod role;
mod sticker;
mod user;

pub use application::*;
pub use attachment::*;
pub use author::*;
pub use channel::*;
pub use component::*;
pub use embed::*;
pub use emoji::*;
pub use guild::*;
pub use interaction::*;
pub use member::*;
pub use message::*;
pub use message_request::*;
pub use role::*;
pub use sticker::*;
pub use user::*;

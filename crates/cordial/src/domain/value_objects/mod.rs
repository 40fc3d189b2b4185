//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod channel_type;
mod http_method;
mod message_flags;
mod message_type;
mod route;

pub use channel_type::*;
pub use http_method::*;
pub use message_flags::*;
pub use message_type::*;
pub use route::*;

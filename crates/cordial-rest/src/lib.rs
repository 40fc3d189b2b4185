//! REST transport for Cordial
//!
//! This crate implements the `RestClient` port with `reqwest`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cordial::Client;
//! use cordial_rest::{HttpRestClient, RestConfig};
//!
//! let rest = HttpRestClient::new(RestConfig::new("your-bot-token"))?;
//! let client = Client::new(rest);
//! let message = client.fetch_message("channel-id", "message-id").await?;
//! ```

mod client;
mod config;

pub use client::HttpRestClient;
pub use config::RestConfig;

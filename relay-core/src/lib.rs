//! # relay-core
//!
//! Core types and traits for the tweet relay bot: [`Bot`] (outbound Telegram messages),
//! [`PostFetcher`] (content retrieval), [`Handler`] (command pipeline), message and post types,
//! the error taxonomy, and tracing initialization. Transport-agnostic; used by relay-telegram,
//! twitter-client and tweet-relay.

pub mod bot;
pub mod error;
pub mod fetcher;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{FetchError, RelayBotError, RelayError, Result, UsageError};
pub use fetcher::PostFetcher;
pub use logger::init_tracing;
pub use types::{
    format_relay_text, is_valid_account, normalize_account, strip_links, ChannelRef, Chat, Handler,
    HandlerResponse, Message, Post, ToCoreMessage, ToCoreUser, User,
};

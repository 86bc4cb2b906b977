//! # twirc
//!
//! A client library for Twitch's IRCv3-dialect chat service (TMI).
//!
//! The library keeps one long-lived plaintext TCP connection to a Twitch
//! chat server, performs the capability-negotiation and login handshake,
//! parses the tagged IRC wire protocol incrementally as bytes arrive,
//! and delivers structured [`Event`]s to an application-supplied
//! handler. The full outbound command surface (join/part, messages,
//! moderation directives, capability requests, heartbeat replies) is
//! exposed on [`Connection`].
//!
//! ## Model
//!
//! Single-threaded and cooperative: the client performs no threading and
//! no timers of its own. The application drives it by calling
//! [`Client::poll_once`] in a loop; handlers run synchronously on the
//! caller's thread, inside the `poll_once` call that produced them.
//! Readiness notification uses epoll/kqueue through `mio`.
//!
//! ## Quick start
//!
//! ```no_run
//! use twirc::{Client, ClientConfig, EventKind};
//!
//! let config = ClientConfig::new("justinfan12345", "blah");
//! let mut client = Client::new(config, |conn, event| {
//!     if event.kind == EventKind::Privmsg {
//!         println!(
//!             "{} {}: {}",
//!             event.channel.unwrap_or(""),
//!             event.origin.unwrap_or(""),
//!             event.message.unwrap_or(""),
//!         );
//!     }
//!     if event.kind == EventKind::GlobalUserState {
//!         conn.join("#somechannel").ok();
//!     }
//! })
//! .expect("readiness queue");
//!
//! client.connect().expect("connect");
//! loop {
//!     if client.poll_once(None).is_err() {
//!         break; // inspect client.conn().last_error(), reconnect, …
//!     }
//! }
//! ```
//!
//! TLS, reconnection policy, and rate limiting are the embedding
//! application's concern.

#![deny(clippy::all)]

pub mod caps;
pub mod client;
pub mod command;
pub mod conn;
pub mod error;
pub mod event;
pub mod message;

pub use self::caps::{CapRequest, Capability};
pub use self::client::Client;
pub use self::command::{ChatCommand, Command};
pub use self::conn::{
    ClientConfig, Connection, Login, Status, READ_BUFFER_SIZE, TIMEOUT_INTERVAL,
};
pub use self::error::{ClientError, ErrorKind, MessageParseError, Result};
pub use self::event::{Event, EventKind};
pub use self::message::{find_tag, tag_value, MessageRef, Tag};

/// Default chat host (plaintext endpoint).
pub const DEFAULT_HOST: &str = "irc.chat.twitch.tv";

/// Default chat port.
pub const DEFAULT_PORT: u16 = 6667;

//! Minimal echo bot.
//!
//! Connects, joins one channel, and repeats every message it sees
//! prefixed with the sender's name.
//!
//! ```text
//! TWITCH_NICK=mybot TWITCH_PASS=oauth:… cargo run --example echo_bot '#somechannel'
//! ```
//!
//! For read-only experiments use a `justinfan` nickname with any
//! password; Twitch accepts those anonymously.

use std::time::Duration;

use anyhow::Context as _;
use twirc::{Client, ClientConfig, ErrorKind, EventKind};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let channel = std::env::args()
        .nth(1)
        .context("usage: echo_bot <#channel>")?;
    let nick = std::env::var("TWITCH_NICK").unwrap_or_else(|_| "justinfan9000".to_string());
    let pass = std::env::var("TWITCH_PASS").unwrap_or_else(|_| "blah".to_string());

    let join_target = channel.clone();
    let mut client = Client::new(ClientConfig::new(nick, pass), move |conn, event| {
        match event.kind {
            EventKind::GlobalUserState => {
                println!(
                    "logged in as {}",
                    conn.login().display_name.as_deref().unwrap_or("?")
                );
                conn.join(&join_target).ok();
            }
            EventKind::Privmsg => {
                let who = event.origin.unwrap_or("?");
                let text = event.message.unwrap_or("");
                println!("{} {who}: {text}", event.channel.unwrap_or(""));
                if who != conn.login().nickname {
                    let reply = format!("{who} said: {text}");
                    conn.privmsg(&join_target, &reply).ok();
                }
            }
            EventKind::Reconnect => println!("server asked us to reconnect"),
            _ => {}
        }
    })?;

    client.connect()?;
    loop {
        if let Err(err) = client.poll_once(Some(Duration::from_millis(250))) {
            match err.kind() {
                ErrorKind::Timeout | ErrorKind::ConnClosed | ErrorKind::ConnHangup => {
                    eprintln!("connection lost ({err}), reconnecting");
                    client.connect()?;
                }
                _ => return Err(err.into()),
            }
        }
    }
}

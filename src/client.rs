//! The event-driven client: one connection plus the application's event
//! handler.
//!
//! The embedding application calls [`Client::poll_once`] in a loop.
//! Inbound lines are parsed, classified, auto-reacted to (PONG replies,
//! login bookkeeping), and handed to the handler synchronously, in exact
//! wire order. The handler receives `&mut Connection`, so it can send
//! commands but has no path back into `poll_once`; re-entrancy is ruled
//! out by construction.

use std::time::Duration;

use tracing::warn;

use crate::conn::{ClientConfig, Connection};
use crate::error::{ClientError, Result};
use crate::event::{Event, EventKind};
use crate::message::{tag_value, MessageRef};

/// A Twitch chat client.
///
/// Generic over the handler closure; state the handler needs lives in
/// its captures.
pub struct Client<H> {
    conn: Connection,
    handler: H,
}

impl<H> Client<H>
where
    H: FnMut(&mut Connection, &Event<'_>),
{
    /// Create a client with its event handler. One-time setup; the
    /// readiness queue is created here.
    pub fn new(config: ClientConfig, handler: H) -> Result<Self> {
        Ok(Self {
            conn: Connection::new(config)?,
            handler,
        })
    }

    /// Initiate the connection. Completion and login are driven by
    /// subsequent [`poll_once`](Self::poll_once) calls.
    pub fn connect(&mut self) -> Result<()> {
        self.conn.connect()
    }

    /// Run one iteration of the event loop: wait up to `timeout` for
    /// readiness (`None` waits indefinitely, `Some(Duration::ZERO)` is a
    /// non-blocking poll), perform the pending I/O, and deliver every
    /// complete inbound line to the handler.
    ///
    /// On failure the connection's
    /// [`last_error`](Connection::last_error) records the
    /// classification; the caller decides whether to reconnect.
    pub fn poll_once(&mut self, timeout: Option<Duration>) -> Result<()> {
        let mut lines = Vec::new();
        let io_result = self.conn.pump(timeout, &mut lines);

        // Lines framed before an I/O failure still get delivered; the
        // failure is surfaced after them.
        for line in &lines {
            Self::dispatch(&mut self.conn, &mut self.handler, line)?;
        }

        io_result
    }

    fn dispatch(conn: &mut Connection, handler: &mut H, line: &str) -> Result<()> {
        let msg = match MessageRef::parse(line) {
            Ok(msg) => msg,
            Err(cause) => {
                warn!("dropping unparseable line: {line:?} ({cause})");
                return Err(conn.fail(ClientError::InvalidMessage {
                    line: line.to_string(),
                    cause,
                }));
            }
        };

        let event = Event::classify(msg);

        match event.kind {
            // Answer before the handler runs, so a slow handler cannot
            // delay the reply past the server's patience.
            EventKind::Ping => {
                // The connection may already be gone if the peer closed
                // right after the PING; the event is still delivered.
                if conn.is_connected() {
                    let param = event.msg.trailing.or_else(|| event.msg.arg(0));
                    conn.pong(param)?;
                }
            }
            EventKind::Authenticated => conn.note_authenticated(),
            EventKind::GlobalUserState => {
                conn.note_authenticated();
                let display_name = tag_value(&event.msg.tags, "display-name");
                let user_id = tag_value(&event.msg.tags, "user-id");
                let login = conn.login_mut();
                if let Some(name) = display_name {
                    login.display_name = Some(name.to_string());
                }
                if let Some(id) = user_id {
                    login.user_id = Some(id.to_string());
                }
            }
            _ => {}
        }

        handler(conn, &event);
        Ok(())
    }

    /// Send `QUIT` and tear the connection down.
    pub fn quit_and_disconnect(&mut self) -> Result<()> {
        self.conn.quit_and_disconnect()
    }

    /// Tear the connection down. Idempotent.
    pub fn disconnect(&mut self) {
        self.conn.disconnect()
    }

    /// The connection, for status queries and sending commands outside
    /// the handler.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Mutable access to the connection.
    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

impl<H> std::fmt::Debug for Client<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").field("conn", &self.conn).finish()
    }
}

//! Connection lifecycle: non-blocking socket setup, the status state
//! machine, the login handshake, and the receive path feeding the line
//! framer.
//!
//! All I/O is readiness-driven and runs on the caller's thread; the
//! connection suspends only inside the OS wait in
//! [`Client::poll_once`](crate::client::Client::poll_once).

mod commands;
mod login;
mod poller;
mod ring;
mod status;

pub use self::login::{ClientConfig, Login};
pub use self::ring::READ_BUFFER_SIZE;
pub use self::status::Status;

use std::io::{self, Read, Write};
use std::net::ToSocketAddrs;
use std::time::{Duration, Instant};

use mio::net::TcpStream;
use tracing::{debug, trace};

use crate::command::Command;
use crate::error::{ClientError, ErrorKind, Result};

use self::login::redact;
use self::poller::Poller;
use self::ring::LineRing;

/// Liveness deadline: slightly above Twitch's five-minute PING interval,
/// so scheduling jitter does not trip it but a dead link that never
/// signals EOF (a machine resumed from sleep) still does.
pub const TIMEOUT_INTERVAL: Duration = Duration::from_secs(5 * 60 + 15);

/// One Twitch chat connection.
///
/// Owns the socket, the readiness queue, the fixed read buffer, the
/// status flags, and the login. Created through
/// [`Client::new`](crate::client::Client::new); the application receives
/// `&mut Connection` inside its event callback and may send commands
/// from there.
#[derive(Debug)]
pub struct Connection {
    config: ClientConfig,
    socket: Option<TcpStream>,
    poller: Poller,
    ring: LineRing,
    status: Status,
    last_message: Instant,
    login: Login,
    last_error: Option<ErrorKind>,
}

impl Connection {
    pub(crate) fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            config,
            socket: None,
            poller: Poller::new()?,
            ring: LineRing::new(),
            status: Status::default(),
            last_message: Instant::now(),
            login: Login::default(),
            last_error: None,
        })
    }

    /// Resolve the configured endpoint and initiate a non-blocking
    /// connect. Completion is signalled by the first write readiness,
    /// which triggers the login handshake.
    pub fn connect(&mut self) -> Result<()> {
        if !self.status.is_disconnected() {
            self.disconnect();
        }

        let host = self.config.host.clone();
        let port = self.config.port;
        let addr = (host.as_str(), port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| ClientError::Resolve { host, port })
            .map_err(|e| self.fail(e))?;

        let mut stream =
            TcpStream::connect(addr).map_err(|e| self.fail(ClientError::SocketConnect(e)))?;

        if let Err(err) = self.poller.register(&mut stream) {
            // Tear down the partial attempt before surfacing the error.
            drop(stream);
            return Err(self.fail(err));
        }

        self.login
            .start_session(&self.config.nickname, &self.config.password);
        self.socket = Some(stream);
        self.ring.clear();
        self.status.begin_connect();
        self.last_error = None;
        self.last_message = Instant::now();
        debug!(%addr, "connecting");
        Ok(())
    }

    /// Wait for readiness, drive the handshake and receive paths, and
    /// collect complete inbound lines. Returns after at most one wait.
    pub(crate) fn pump(
        &mut self,
        timeout: Option<Duration>,
        lines: &mut Vec<String>,
    ) -> Result<()> {
        if self.socket.is_none() {
            return Err(self.fail(ClientError::NotConnected));
        }

        let ready = match self.poller.wait(timeout) {
            Ok(ready) => ready,
            Err(err) => return Err(self.fail(err)),
        };

        if ready.error {
            let err = self
                .socket
                .as_ref()
                .and_then(|s| s.take_error().ok())
                .flatten()
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "socket error event"));
            self.disconnect();
            return Err(self.fail(ClientError::ConnSocket(err)));
        }

        if ready.writable && self.status.is_connecting() {
            self.complete_connect()?;
        }

        if ready.readable || ready.read_closed {
            self.receive(lines)?;
        }

        if ready.read_closed {
            // Peer hangup that the read path did not already surface as a
            // clean zero-byte close.
            self.disconnect();
            return Err(self.fail(ClientError::ConnHangup));
        }

        if self.last_message.elapsed() > TIMEOUT_INTERVAL {
            return Err(self.fail(ClientError::Timeout(TIMEOUT_INTERVAL)));
        }

        Ok(())
    }

    /// First write readiness after `connect`: the TCP handshake is done.
    /// Request capabilities, authenticate, and drop write interest.
    fn complete_connect(&mut self) -> Result<()> {
        if let Some(socket) = self.socket.as_ref() {
            // A failed connect parks its errno on SO_ERROR and still
            // reports the socket writable.
            match socket.take_error() {
                Ok(Some(err)) | Err(err) => {
                    self.disconnect();
                    return Err(self.fail(ClientError::SocketConnect(err)));
                }
                Ok(None) => {}
            }
        }

        self.status.mark_connected();
        debug!(host = %self.config.host, nick = %self.login.nickname, "connected, logging in");

        if let Err(err) = self.send_login() {
            self.disconnect();
            return Err(err);
        }

        if let Some(socket) = self.socket.as_mut() {
            if let Err(err) = self.poller.rearm_readable(socket) {
                self.disconnect();
                return Err(self.fail(err));
            }
        }
        Ok(())
    }

    /// Capability request first, then credentials, per the login order
    /// Twitch expects.
    fn send_login(&mut self) -> Result<()> {
        self.cap_req_all()?;
        let password = self.login.password.clone();
        self.send_command(Command::Pass(&password))?;
        let nickname = self.login.nickname.clone();
        self.send_command(Command::Nick(&nickname))?;
        self.status.mark_authenticating();
        Ok(())
    }

    /// Drain the socket into the read ring until it would block, framing
    /// complete lines after every successful read.
    fn receive(&mut self, lines: &mut Vec<String>) -> Result<()> {
        let mut got_data = false;
        loop {
            if self.ring.is_full() {
                // Already framed everything possible; a full ring with no
                // terminator is an oversized line and no forward progress
                // can be made.
                return Err(self.fail(ClientError::LineOverflow(READ_BUFFER_SIZE)));
            }

            let socket = match self.socket.as_mut() {
                Some(socket) => socket,
                None => break,
            };
            match socket.read(self.ring.vacant_mut()) {
                Ok(0) => {
                    if got_data {
                        self.last_message = Instant::now();
                    }
                    self.disconnect();
                    return Err(self.fail(ClientError::ConnClosed));
                }
                Ok(n) => {
                    self.ring.commit(n);
                    got_data = true;
                    while let Some(line) = self.ring.next_line() {
                        trace!("<- {line}");
                        lines.push(line);
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.disconnect();
                    return Err(self.fail(ClientError::SocketRecv(e)));
                }
            }
        }

        if got_data {
            self.last_message = Instant::now();
        }
        Ok(())
    }

    /// Serialize and send one command.
    pub fn send_command(&mut self, command: Command<'_>) -> Result<()> {
        self.send_line(&command.to_string())
    }

    /// Send a raw line; the CR-LF terminator is appended (and stripped
    /// first if the caller already included it).
    pub fn send_raw(&mut self, line: &str) -> Result<()> {
        self.send_line(line.trim_end_matches(['\r', '\n']))
    }

    /// Write the full line, looping over partial writes. A kernel buffer
    /// that will not take more bytes fails the send; there is no
    /// outbound queue.
    fn send_line(&mut self, line: &str) -> Result<()> {
        if self.socket.is_none() {
            return Err(self.fail(ClientError::NotConnected));
        }

        trace!("-> {}", redact(line, &self.login.password));

        let mut wire = String::with_capacity(line.len() + 2);
        wire.push_str(line);
        wire.push_str("\r\n");
        let mut remaining = wire.as_bytes();

        let result = loop {
            let socket = self
                .socket
                .as_mut()
                .expect("socket checked above and sends cannot drop it");
            match socket.write(remaining) {
                Ok(n) if n == remaining.len() => break Ok(()),
                Ok(0) => {
                    break Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "socket accepted no bytes",
                    ))
                }
                Ok(n) => remaining = &remaining[n..],
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => break Err(e),
            }
        };

        result.map_err(|e| self.fail(ClientError::SocketSend(e)))
    }

    /// Send `QUIT`, then tear the connection down.
    pub fn quit_and_disconnect(&mut self) -> Result<()> {
        let result = self.send_command(Command::Quit);
        self.disconnect();
        result
    }

    /// Tear down the connection: deregister and close the socket, clear
    /// the status flags, the read ring, and the session identity.
    /// Idempotent; safe to call on an already-disconnected instance.
    pub fn disconnect(&mut self) {
        if let Some(mut socket) = self.socket.take() {
            if let Err(err) = self.poller.deregister(&mut socket) {
                trace!("deregister on disconnect failed: {err}");
            }
            debug!("disconnected");
        }
        self.status.clear();
        self.ring.clear();
        self.login.reset_session();
    }

    pub(crate) fn fail(&mut self, err: ClientError) -> ClientError {
        self.last_error = Some(err.kind());
        err
    }

    /// Current status flag set.
    pub fn status(&self) -> Status {
        self.status
    }

    /// TCP connect initiated but not yet completed.
    pub fn is_connecting(&self) -> bool {
        self.status.is_connecting()
    }

    /// TCP connection established.
    pub fn is_connected(&self) -> bool {
        self.status.is_connected()
    }

    /// Credentials sent, server verdict pending.
    pub fn is_logging_in(&self) -> bool {
        self.status.is_authenticating()
    }

    /// Login accepted by the server.
    pub fn is_logged_in(&self) -> bool {
        self.status.is_authenticated()
    }

    /// Classification of the most recent failure, if any.
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.last_error
    }

    /// Login identity for this connection.
    pub fn login(&self) -> &Login {
        &self.login
    }

    /// Endpoint and credentials this connection was created with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn note_authenticated(&mut self) {
        if !self.status.is_authenticated() {
            debug!(nick = %self.login.nickname, "logged in");
        }
        self.status.mark_authenticated();
    }

    pub(crate) fn login_mut(&mut self) -> &mut Login {
        &mut self.login
    }

    #[cfg(test)]
    pub(crate) fn force_connected_for_tests(&mut self) {
        self.status.begin_connect();
        self.status.mark_connected();
        self.status.mark_authenticating();
    }
}

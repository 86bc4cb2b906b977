//! Connection status as a set of flags.
//!
//! The lifecycle flags compose (an authenticated connection is also
//! connected), so status is a bitset rather than a plain enum. The empty
//! set means disconnected. Each flag is set at most once between connect
//! and disconnect.

/// Status flag set for one connection attempt.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Status(u8);

impl Status {
    const CONNECTING: u8 = 1 << 0;
    const CONNECTED: u8 = 1 << 1;
    const AUTHENTICATING: u8 = 1 << 2;
    const AUTHENTICATED: u8 = 1 << 3;

    /// No flags set: no connection attempt is in flight.
    pub fn is_disconnected(self) -> bool {
        self.0 == 0
    }

    /// TCP connect initiated, handshake not yet completed.
    pub fn is_connecting(self) -> bool {
        self.0 & Self::CONNECTING != 0
    }

    /// TCP handshake completed.
    pub fn is_connected(self) -> bool {
        self.0 & Self::CONNECTED != 0
    }

    /// Login credentials sent, waiting for the server verdict.
    pub fn is_authenticating(self) -> bool {
        self.0 & Self::AUTHENTICATING != 0
    }

    /// Login accepted.
    pub fn is_authenticated(self) -> bool {
        self.0 & Self::AUTHENTICATED != 0
    }

    pub(crate) fn begin_connect(&mut self) {
        self.0 = Self::CONNECTING;
    }

    /// CONNECTING and CONNECTED are disjoint in time: reaching connected
    /// clears the connecting flag.
    pub(crate) fn mark_connected(&mut self) {
        self.0 = (self.0 & !Self::CONNECTING) | Self::CONNECTED;
    }

    pub(crate) fn mark_authenticating(&mut self) {
        self.0 |= Self::AUTHENTICATING;
    }

    pub(crate) fn mark_authenticated(&mut self) {
        debug_assert!(self.is_connected());
        self.0 |= Self::AUTHENTICATED;
    }

    pub(crate) fn clear(&mut self) {
        self.0 = 0;
    }
}

impl std::fmt::Debug for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_disconnected() {
            return f.write_str("disconnected");
        }
        let mut parts = Vec::with_capacity(4);
        if self.is_connecting() {
            parts.push("connecting");
        }
        if self.is_connected() {
            parts.push("connected");
        }
        if self.is_authenticating() {
            parts.push("authenticating");
        }
        if self.is_authenticated() {
            parts.push("authenticated");
        }
        f.write_str(&parts.join("|"))
    }
}

//! Twitch capability negotiation support.
//!
//! Twitch gates its protocol extensions behind three IRCv3 capabilities;
//! the login handshake requests all of them in one `CAP REQ` line.
//!
//! # Reference
//! - IRCv3 Capability Negotiation: <https://ircv3.net/specs/extensions/capability-negotiation>
//! - Twitch capabilities: <https://dev.twitch.tv/docs/chat/irc/#twitch-specific-irc-capabilities>

/// The capabilities Twitch chat offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Message tags on PRIVMSG, NOTICE, and the Twitch-specific commands.
    Tags,
    /// The Twitch-specific commands (CLEARCHAT, ROOMSTATE, USERNOTICE, …).
    Commands,
    /// JOIN/PART/NAMES membership messages.
    Membership,
}

impl AsRef<str> for Capability {
    fn as_ref(&self) -> &str {
        match self {
            Self::Tags => "twitch.tv/tags",
            Self::Commands => "twitch.tv/commands",
            Self::Membership => "twitch.tv/membership",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// A set of capabilities to request in a single `CAP REQ` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapRequest<'a>(pub &'a [Capability]);

impl CapRequest<'static> {
    /// All three Twitch capabilities, the set requested on login.
    pub const ALL: Self = CapRequest(&[
        Capability::Tags,
        Capability::Commands,
        Capability::Membership,
    ]);
}

impl std::fmt::Display for CapRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CAP REQ :")?;
        for (i, cap) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(cap.as_ref())?;
        }
        Ok(())
    }
}

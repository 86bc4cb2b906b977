//! Outbound command types.
//!
//! [`Command`] covers every line this client sends; its `Display` impl
//! (in `serialize.rs`) produces the wire form without the CR-LF
//! terminator, which the send path appends.

use crate::caps::CapRequest;

/// An outbound line, ready to be serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Command<'a> {
    /// `PASS <pass>` — the oauth token, sent before NICK.
    Pass(&'a str),
    /// `NICK <nick>`.
    Nick(&'a str),
    /// `JOIN <channel>`.
    Join(&'a str),
    /// `PART <channel>`.
    Part(&'a str),
    /// `QUIT`.
    Quit,
    /// `PRIVMSG <channel> :<text>`.
    Privmsg {
        /// Channel to send to.
        channel: &'a str,
        /// Message text.
        text: &'a str,
    },
    /// A `/me` message: `PRIVMSG <channel> :\x01ACTION <text>\x01`.
    Action {
        /// Channel to send to.
        channel: &'a str,
        /// Action text.
        text: &'a str,
    },
    /// A whisper, routed through our own channel:
    /// `PRIVMSG #<self-nick> :/w <target> <text>`.
    Whisper {
        /// Our own nickname (the channel the `/w` rides on).
        self_nick: &'a str,
        /// Recipient nickname.
        target: &'a str,
        /// Whisper text.
        text: &'a str,
    },
    /// `PONG` reply; the parameter gets a leading `:` iff it does not
    /// already carry one.
    Pong(Option<&'a str>),
    /// `PING`, optionally with a bare parameter (no colon).
    Ping(Option<&'a str>),
    /// `CAP REQ :<capabilities…>`.
    CapReq(CapRequest<'a>),
    /// A slash command Twitch interprets server-side, carried as
    /// `PRIVMSG <channel> :/<verb> <args…>`.
    Chat {
        /// Channel the directive applies to.
        channel: &'a str,
        /// The directive itself.
        action: ChatCommand<'a>,
    },
}

/// The moderation and channel-mode directives Twitch accepts as
/// leading-slash chat messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChatCommand<'a> {
    /// `/timeout <user> [seconds]`.
    Timeout {
        /// User to time out.
        user: &'a str,
        /// Duration in seconds; Twitch defaults to 600 when omitted.
        seconds: Option<u32>,
    },
    /// `/untimeout <user>`.
    Untimeout(&'a str),
    /// `/ban <user>`.
    Ban(&'a str),
    /// `/unban <user>`.
    Unban(&'a str),
    /// `/slow [seconds]`.
    Slow(Option<u32>),
    /// `/slowoff`.
    SlowOff,
    /// `/followers [duration]`, e.g. `30m` or `1w`.
    Followers(Option<&'a str>),
    /// `/followersoff`.
    FollowersOff,
    /// `/subscribers`.
    Subscribers,
    /// `/subscribersoff`.
    SubscribersOff,
    /// `/clear`.
    Clear,
    /// `/r9kbeta` (unique-chat mode).
    R9kBeta,
    /// `/r9kbetaoff`.
    R9kBetaOff,
    /// `/emoteonly`.
    EmoteOnly,
    /// `/emoteonlyoff`.
    EmoteOnlyOff,
    /// `/commercial [seconds]`.
    Commercial(Option<u32>),
    /// `/host <target>`.
    Host(&'a str),
    /// `/unhost`.
    Unhost,
    /// `/mod <user>`.
    Mod(&'a str),
    /// `/unmod <user>`.
    Unmod(&'a str),
    /// `/vip <user>`.
    Vip(&'a str),
    /// `/unvip <user>`.
    Unvip(&'a str),
    /// `/delete <message-id>` — the id comes from the `id` tag of the
    /// message being deleted.
    Delete(&'a str),
    /// `/mods`.
    Mods,
    /// `/vips`.
    Vips,
    /// `/color <color>`.
    Color(&'a str),
    /// `/marker [comment]`.
    Marker(Option<&'a str>),
}

//! Semantic interpretation of parsed lines.
//!
//! Every inbound line becomes one [`Event`]: the syntactic
//! [`MessageRef`] plus the derived fields applications actually dispatch
//! on (kind, origin, channel, target, message). Classification is a pure
//! function of the parsed message.

use crate::message::MessageRef;

/// The closed set of event classifications the Twitch dialect produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EventKind {
    /// Anything the classifier does not recognize, including CTCP
    /// commands other than ACTION.
    Unknown,
    /// Capability negotiation reply (`CAP * ACK`, …).
    Cap,
    /// Numeric 001 (RPL_WELCOME): login accepted.
    Authenticated,
    /// `GLOBALUSERSTATE`: login accepted, global user tags attached.
    GlobalUserState,
    /// A user joined a channel.
    Join,
    /// A user left a channel.
    Part,
    /// `CLEARCHAT`: a timeout, ban, or full chat clear.
    ClearChat,
    /// `ROOMSTATE`: channel mode tags (slow, followers-only, …).
    RoomState,
    /// `USERSTATE`: our own per-channel user tags.
    UserState,
    /// `MODE`: moderator privileges granted or revoked.
    Moderator,
    /// `HOSTTARGET`: channel started or stopped hosting.
    HostTarget,
    /// A chat message.
    Privmsg,
    /// `CLEARMSG`: a single message was deleted.
    ClearMsg,
    /// Server notice.
    Notice,
    /// `USERNOTICE`: sub, resub, raid, ritual, …
    UserNotice,
    /// A whisper (direct message).
    Whisper,
    /// Server liveness probe; the client answers automatically.
    Ping,
    /// Numeric 353 (RPL_NAMREPLY): channel member list chunk.
    Names,
    /// Numeric 366 (RPL_ENDOFNAMES).
    EndOfNames,
    /// `RECONNECT`: the server is about to terminate this connection.
    Reconnect,
    /// Numeric 421 (ERR_UNKNOWNCOMMAND).
    InvalidCommand,
    /// A `/me` message (CTCP ACTION).
    CtcpAction,
}

/// One inbound line with semantic fields derived from the parse.
///
/// Borrows from the line text; valid only during the callback that
/// receives it.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<'a> {
    /// The parsed message (tags, prefix, command, args, trailing, ctcp).
    pub msg: MessageRef<'a>,
    /// Classification of the line.
    pub kind: EventKind,
    /// Nick the line originated from, when the prefix carries one.
    pub origin: Option<&'a str>,
    /// Channel the line is scoped to.
    pub channel: Option<&'a str>,
    /// Secondary target (the hosted channel for HOSTTARGET).
    pub target: Option<&'a str>,
    /// Message text for chat-bearing lines.
    pub message: Option<&'a str>,
}

impl<'a> Event<'a> {
    /// Derive the semantic event for a parsed line.
    pub fn classify(msg: MessageRef<'a>) -> Self {
        let mut event = Event {
            kind: EventKind::Unknown,
            origin: msg.nick,
            channel: None,
            target: None,
            message: None,
            msg,
        };

        // CTCP lines do not dispatch on the IRC command: ACTION is the
        // only envelope Twitch emits, everything else stays Unknown.
        if let Some(ctcp) = event.msg.ctcp {
            if ctcp == "ACTION" {
                event.kind = EventKind::CtcpAction;
                event.channel = event.msg.arg(0);
                event.message = event.msg.trailing;
            }
            return event;
        }

        match event.msg.command {
            "CAP" => event.kind = EventKind::Cap,
            "001" => event.kind = EventKind::Authenticated,
            "GLOBALUSERSTATE" => event.kind = EventKind::GlobalUserState,
            "JOIN" => {
                event.kind = EventKind::Join;
                event.channel = event.msg.arg(0);
            }
            "PART" => {
                event.kind = EventKind::Part;
                event.channel = event.msg.arg(0);
            }
            "CLEARCHAT" => {
                event.kind = EventKind::ClearChat;
                event.channel = event.msg.arg(0);
            }
            "ROOMSTATE" => {
                event.kind = EventKind::RoomState;
                event.channel = event.msg.arg(0);
            }
            "USERSTATE" => {
                event.kind = EventKind::UserState;
                event.channel = event.msg.arg(0);
            }
            "MODE" => {
                event.kind = EventKind::Moderator;
                event.channel = event.msg.arg(0);
            }
            "HOSTTARGET" => {
                event.kind = EventKind::HostTarget;
                event.channel = event.msg.arg(0);
                event.target = event
                    .msg
                    .trailing
                    .and_then(|t| t.split_whitespace().next());
            }
            "PRIVMSG" => {
                event.kind = EventKind::Privmsg;
                event.channel = event.msg.arg(0);
                event.message = event.msg.trailing;
            }
            "CLEARMSG" => {
                event.kind = EventKind::ClearMsg;
                event.channel = event.msg.arg(0);
                event.message = event.msg.trailing;
            }
            "NOTICE" => {
                event.kind = EventKind::Notice;
                event.channel = event.msg.arg(0);
                event.message = event.msg.trailing;
            }
            "USERNOTICE" => {
                event.kind = EventKind::UserNotice;
                event.channel = event.msg.arg(0);
                event.message = event.msg.trailing;
            }
            "WHISPER" => {
                event.kind = EventKind::Whisper;
                event.channel = event.msg.arg(0);
                event.message = event.msg.trailing;
            }
            "PING" => event.kind = EventKind::Ping,
            "353" => {
                event.kind = EventKind::Names;
                event.channel = event.msg.arg(2);
            }
            "366" => {
                event.kind = EventKind::EndOfNames;
                event.channel = event.msg.arg(1);
            }
            "421" => event.kind = EventKind::InvalidCommand,
            "RECONNECT" => event.kind = EventKind::Reconnect,
            _ => {}
        }

        event
    }

    /// The raw line this event was parsed from.
    pub fn raw(&self) -> &'a str {
        self.msg.raw
    }
}

//! One outbound operation per Twitch chat directive.
//!
//! Thin wrappers that build a [`Command`] and hand it to the send path.
//! Moderation directives ride on `PRIVMSG` as leading-slash commands the
//! server interprets.

use crate::caps::{CapRequest, Capability};
use crate::command::{ChatCommand, Command};
use crate::error::Result;

use super::Connection;

impl Connection {
    /// Join a channel (`#name`, lowercase).
    pub fn join(&mut self, channel: &str) -> Result<()> {
        self.send_command(Command::Join(channel))
    }

    /// Leave a channel.
    pub fn part(&mut self, channel: &str) -> Result<()> {
        self.send_command(Command::Part(channel))
    }

    /// Send a chat message.
    pub fn privmsg(&mut self, channel: &str, text: &str) -> Result<()> {
        self.send_command(Command::Privmsg { channel, text })
    }

    /// Send a `/me` action message.
    pub fn action(&mut self, channel: &str, text: &str) -> Result<()> {
        self.send_command(Command::Action { channel, text })
    }

    /// Whisper a user. The `/w` rides on our own channel, so this uses
    /// the login nickname.
    pub fn whisper(&mut self, target: &str, text: &str) -> Result<()> {
        let self_nick = self.login().nickname.clone();
        self.send_command(Command::Whisper {
            self_nick: &self_nick,
            target,
            text,
        })
    }

    /// Reply to a server `PING`.
    pub fn pong(&mut self, param: Option<&str>) -> Result<()> {
        self.send_command(Command::Pong(param))
    }

    /// Probe the server.
    pub fn ping(&mut self, param: Option<&str>) -> Result<()> {
        self.send_command(Command::Ping(param))
    }

    /// Request a set of capabilities in one `CAP REQ` line.
    pub fn cap_req(&mut self, caps: &[Capability]) -> Result<()> {
        self.send_command(Command::CapReq(CapRequest(caps)))
    }

    /// Request all three Twitch capabilities; the login handshake does
    /// this automatically.
    pub fn cap_req_all(&mut self) -> Result<()> {
        self.send_command(Command::CapReq(CapRequest::ALL))
    }

    /// Time a user out. Twitch defaults to 600 seconds when none given.
    pub fn timeout(&mut self, channel: &str, user: &str, seconds: Option<u32>) -> Result<()> {
        self.chat(channel, ChatCommand::Timeout { user, seconds })
    }

    /// Lift a timeout.
    pub fn untimeout(&mut self, channel: &str, user: &str) -> Result<()> {
        self.chat(channel, ChatCommand::Untimeout(user))
    }

    /// Permanently ban a user from a channel.
    pub fn ban(&mut self, channel: &str, user: &str) -> Result<()> {
        self.chat(channel, ChatCommand::Ban(user))
    }

    /// Lift a ban.
    pub fn unban(&mut self, channel: &str, user: &str) -> Result<()> {
        self.chat(channel, ChatCommand::Unban(user))
    }

    /// Enable slow mode, optionally with a per-message delay in seconds.
    pub fn slow(&mut self, channel: &str, seconds: Option<u32>) -> Result<()> {
        self.chat(channel, ChatCommand::Slow(seconds))
    }

    /// Disable slow mode.
    pub fn slow_off(&mut self, channel: &str) -> Result<()> {
        self.chat(channel, ChatCommand::SlowOff)
    }

    /// Enable followers-only mode, optionally with a minimum follow age
    /// such as `30m` or `1w`.
    pub fn followers(&mut self, channel: &str, duration: Option<&str>) -> Result<()> {
        self.chat(channel, ChatCommand::Followers(duration))
    }

    /// Disable followers-only mode.
    pub fn followers_off(&mut self, channel: &str) -> Result<()> {
        self.chat(channel, ChatCommand::FollowersOff)
    }

    /// Enable subscribers-only mode.
    pub fn subscribers(&mut self, channel: &str) -> Result<()> {
        self.chat(channel, ChatCommand::Subscribers)
    }

    /// Disable subscribers-only mode.
    pub fn subscribers_off(&mut self, channel: &str) -> Result<()> {
        self.chat(channel, ChatCommand::SubscribersOff)
    }

    /// Clear the channel's chat history.
    pub fn clear(&mut self, channel: &str) -> Result<()> {
        self.chat(channel, ChatCommand::Clear)
    }

    /// Enable unique-chat (r9k) mode.
    pub fn r9k_beta(&mut self, channel: &str) -> Result<()> {
        self.chat(channel, ChatCommand::R9kBeta)
    }

    /// Disable unique-chat (r9k) mode.
    pub fn r9k_beta_off(&mut self, channel: &str) -> Result<()> {
        self.chat(channel, ChatCommand::R9kBetaOff)
    }

    /// Enable emote-only mode.
    pub fn emote_only(&mut self, channel: &str) -> Result<()> {
        self.chat(channel, ChatCommand::EmoteOnly)
    }

    /// Disable emote-only mode.
    pub fn emote_only_off(&mut self, channel: &str) -> Result<()> {
        self.chat(channel, ChatCommand::EmoteOnlyOff)
    }

    /// Run a commercial, optionally with a length in seconds.
    pub fn commercial(&mut self, channel: &str, seconds: Option<u32>) -> Result<()> {
        self.chat(channel, ChatCommand::Commercial(seconds))
    }

    /// Host another channel.
    pub fn host(&mut self, channel: &str, target: &str) -> Result<()> {
        self.chat(channel, ChatCommand::Host(target))
    }

    /// Stop hosting.
    pub fn unhost(&mut self, channel: &str) -> Result<()> {
        self.chat(channel, ChatCommand::Unhost)
    }

    /// Grant moderator status.
    pub fn mod_user(&mut self, channel: &str, user: &str) -> Result<()> {
        self.chat(channel, ChatCommand::Mod(user))
    }

    /// Revoke moderator status.
    pub fn unmod_user(&mut self, channel: &str, user: &str) -> Result<()> {
        self.chat(channel, ChatCommand::Unmod(user))
    }

    /// Grant VIP status.
    pub fn vip(&mut self, channel: &str, user: &str) -> Result<()> {
        self.chat(channel, ChatCommand::Vip(user))
    }

    /// Revoke VIP status.
    pub fn unvip(&mut self, channel: &str, user: &str) -> Result<()> {
        self.chat(channel, ChatCommand::Unvip(user))
    }

    /// Delete a single message by its `id` tag.
    pub fn delete_message(&mut self, channel: &str, msg_id: &str) -> Result<()> {
        self.chat(channel, ChatCommand::Delete(msg_id))
    }

    /// List the channel's moderators.
    pub fn mods(&mut self, channel: &str) -> Result<()> {
        self.chat(channel, ChatCommand::Mods)
    }

    /// List the channel's VIPs.
    pub fn vips(&mut self, channel: &str) -> Result<()> {
        self.chat(channel, ChatCommand::Vips)
    }

    /// Set our chat name color.
    pub fn color(&mut self, channel: &str, color: &str) -> Result<()> {
        self.chat(channel, ChatCommand::Color(color))
    }

    /// Add a stream marker, optionally with a comment.
    pub fn marker(&mut self, channel: &str, comment: Option<&str>) -> Result<()> {
        self.chat(channel, ChatCommand::Marker(comment))
    }

    fn chat(&mut self, channel: &str, action: ChatCommand<'_>) -> Result<()> {
        self.send_command(Command::Chat { channel, action })
    }
}

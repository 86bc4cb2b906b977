use std::fmt::{self, Write};

use super::types::{ChatCommand, Command};

/// Write a command with space-separated arguments and no trailing
/// parameter.
fn write_cmd(f: &mut fmt::Formatter<'_>, cmd: &str, args: &[&str]) -> fmt::Result {
    f.write_str(cmd)?;
    for arg in args {
        f.write_char(' ')?;
        f.write_str(arg)?;
    }
    Ok(())
}

/// Write a command whose final argument is a colon-prefixed trailing
/// parameter (freeform text, spaces allowed).
fn write_trailing(
    f: &mut fmt::Formatter<'_>,
    cmd: &str,
    args: &[&str],
    trailing: &str,
) -> fmt::Result {
    write_cmd(f, cmd, args)?;
    f.write_str(" :")?;
    f.write_str(trailing)
}

impl fmt::Display for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Pass(pass) => write_cmd(f, "PASS", &[pass]),
            Command::Nick(nick) => write_cmd(f, "NICK", &[nick]),
            Command::Join(channel) => write_cmd(f, "JOIN", &[channel]),
            Command::Part(channel) => write_cmd(f, "PART", &[channel]),
            Command::Quit => f.write_str("QUIT"),
            Command::Privmsg { channel, text } => write_trailing(f, "PRIVMSG", &[channel], text),
            Command::Action { channel, text } => {
                write_cmd(f, "PRIVMSG", &[channel])?;
                write!(f, " :\u{1}ACTION {text}\u{1}")
            }
            Command::Whisper {
                self_nick,
                target,
                text,
            } => write!(f, "PRIVMSG #{self_nick} :/w {target} {text}"),
            Command::Pong(param) => match param {
                None => f.write_str("PONG"),
                Some(p) if p.starts_with(':') => write!(f, "PONG {p}"),
                Some(p) => write!(f, "PONG :{p}"),
            },
            Command::Ping(param) => match param {
                None => f.write_str("PING"),
                Some(p) => write!(f, "PING {p}"),
            },
            Command::CapReq(req) => req.fmt(f),
            Command::Chat { channel, action } => {
                write_cmd(f, "PRIVMSG", &[channel])?;
                write!(f, " :{action}")
            }
        }
    }
}

impl fmt::Display for ChatCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatCommand::Timeout { user, seconds } => match seconds {
                Some(s) => write!(f, "/timeout {user} {s}"),
                None => write!(f, "/timeout {user}"),
            },
            ChatCommand::Untimeout(user) => write!(f, "/untimeout {user}"),
            ChatCommand::Ban(user) => write!(f, "/ban {user}"),
            ChatCommand::Unban(user) => write!(f, "/unban {user}"),
            ChatCommand::Slow(seconds) => match seconds {
                Some(s) => write!(f, "/slow {s}"),
                None => f.write_str("/slow"),
            },
            ChatCommand::SlowOff => f.write_str("/slowoff"),
            ChatCommand::Followers(duration) => match duration {
                Some(d) => write!(f, "/followers {d}"),
                None => f.write_str("/followers"),
            },
            ChatCommand::FollowersOff => f.write_str("/followersoff"),
            ChatCommand::Subscribers => f.write_str("/subscribers"),
            ChatCommand::SubscribersOff => f.write_str("/subscribersoff"),
            ChatCommand::Clear => f.write_str("/clear"),
            ChatCommand::R9kBeta => f.write_str("/r9kbeta"),
            ChatCommand::R9kBetaOff => f.write_str("/r9kbetaoff"),
            ChatCommand::EmoteOnly => f.write_str("/emoteonly"),
            ChatCommand::EmoteOnlyOff => f.write_str("/emoteonlyoff"),
            ChatCommand::Commercial(seconds) => match seconds {
                Some(s) => write!(f, "/commercial {s}"),
                None => f.write_str("/commercial"),
            },
            ChatCommand::Host(target) => write!(f, "/host {target}"),
            ChatCommand::Unhost => f.write_str("/unhost"),
            ChatCommand::Mod(user) => write!(f, "/mod {user}"),
            ChatCommand::Unmod(user) => write!(f, "/unmod {user}"),
            ChatCommand::Vip(user) => write!(f, "/vip {user}"),
            ChatCommand::Unvip(user) => write!(f, "/unvip {user}"),
            ChatCommand::Delete(msg_id) => write!(f, "/delete {msg_id}"),
            ChatCommand::Mods => f.write_str("/mods"),
            ChatCommand::Vips => f.write_str("/vips"),
            ChatCommand::Color(color) => write!(f, "/color {color}"),
            ChatCommand::Marker(comment) => match comment {
                Some(c) => write!(f, "/marker {c}"),
                None => f.write_str("/marker"),
            },
        }
    }
}

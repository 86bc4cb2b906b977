use crate::error::MessageParseError;

use super::nom_parser::ParsedLine;
use super::tags::{parse_tag_block, Tag};

/// A parsed inbound line, borrowing from the raw line text.
///
/// Views are valid only as long as the line they were parsed from; the
/// event dispatcher hands them to the application callback and discards
/// them when it returns.
#[derive(Clone, PartialEq, Debug)]
pub struct MessageRef<'a> {
    /// The original line, CR-LF terminator included if it was present.
    pub raw: &'a str,
    /// Decoded tags in wire order. Empty when the line carried no `@` block.
    pub tags: Vec<Tag<'a>>,
    /// Source prefix with the leading `:` stripped.
    pub prefix: Option<&'a str>,
    /// Nick portion of the prefix (text before the first `!`). Absent for
    /// server prefixes.
    pub nick: Option<&'a str>,
    /// The IRC command name or numeric reply code.
    pub command: &'a str,
    /// Space-delimited arguments, excluding the trailing parameter.
    pub args: Vec<&'a str>,
    /// Trailing parameter. For CTCP lines this is the payload after the
    /// CTCP command, with the `\x01` envelope stripped.
    pub trailing: Option<&'a str>,
    /// CTCP command name, when the trailing parameter carried a
    /// `\x01`-wrapped envelope.
    pub ctcp: Option<&'a str>,
}

impl<'a> MessageRef<'a> {
    /// Parse one complete line.
    ///
    /// The line may still carry its CR-LF terminator; it is ignored.
    pub fn parse(s: &'a str) -> Result<MessageRef<'a>, MessageParseError> {
        let trimmed = s.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            return Err(MessageParseError::EmptyMessage);
        }

        let parsed = ParsedLine::parse(trimmed)?;

        let tags = parsed.tags.map(parse_tag_block).unwrap_or_default();
        let nick = parsed
            .prefix
            .and_then(|p| p.split_once('!').map(|(nick, _)| nick));

        // A trailing parameter framed by 0x01 bytes is a CTCP envelope:
        // strip it and split once on space into the CTCP command and the
        // remaining payload.
        let (ctcp, trailing) = match parsed.trailing {
            Some(t) if t.len() >= 2 && t.starts_with('\u{1}') && t.ends_with('\u{1}') => {
                let inner = &t[1..t.len() - 1];
                let (cmd, rest) = inner
                    .split_once(' ')
                    .ok_or(MessageParseError::CtcpMissingSeparator)?;
                (Some(cmd), Some(rest))
            }
            other => (None, other),
        };

        Ok(MessageRef {
            raw: s,
            tags,
            prefix: parsed.prefix,
            nick,
            command: parsed.command,
            args: parsed.args,
            trailing,
            ctcp,
        })
    }

    /// Argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }
}

//! Nom-based parser for the tagged IRC line grammar.
//!
//! This module provides zero-copy parsing of a single Twitch chat line
//! using the nom parser combinator library:
//!
//! ```text
//! ['@' tags SP] [':' prefix SP] command (SP arg)* [SP ':' trailing]
//! ```

use nom::{
    bytes::complete::{take_until, take_while1},
    character::complete::{char, space0},
    combinator::opt,
    error::{context, VerboseError, VerboseErrorKind},
    sequence::preceded,
    IResult,
};

use crate::error::MessageParseError;

type ParseResult<I, O> = IResult<I, O, VerboseError<I>>;

/// Parse the IRCv3 tag block (the part after `@` and before the first
/// space), returned raw; token splitting and unescaping happen later.
fn parse_tags(input: &str) -> ParseResult<&str, &str> {
    context(
        "parsing message tags",
        preceded(char('@'), take_until(" ")),
    )(input)
}

/// Parse the message prefix (the part after `:` and before the first
/// space). The leading `:` is stripped from the reported prefix.
fn parse_prefix(input: &str) -> ParseResult<&str, &str> {
    context(
        "parsing message prefix",
        preceded(char(':'), take_while1(|c| c != ' ')),
    )(input)
}

/// Parse the command name: an alphabetic word or a numeric reply code.
fn parse_command(input: &str) -> ParseResult<&str, &str> {
    context(
        "parsing required command",
        take_while1(|c: char| c.is_alphanumeric()),
    )(input)
}

fn parse_line_inner(input: &str) -> ParseResult<&str, ParsedLine<'_>> {
    let (input, tags) = context("parsing optional tags", opt(parse_tags))(input)?;
    let (input, _) = space0(input)?;

    let (input, prefix) = context("parsing optional prefix", opt(parse_prefix))(input)?;
    let (input, _) = space0(input)?;

    let (input, command) = parse_command(input)?;

    // Arguments are space-delimited up to the first ` :`, which starts the
    // trailing parameter (the rest of the line, spaces included).
    let mut args: Vec<&str> = Vec::new();
    let mut trailing: Option<&str> = None;
    let mut rest = input;

    while let Some(stripped) = rest.strip_prefix(' ') {
        rest = stripped;
        if let Some(t) = rest.strip_prefix(':') {
            trailing = Some(t);
            rest = "";
            break;
        }
        let end = rest.find(' ').unwrap_or(rest.len());
        if end > 0 {
            args.push(&rest[..end]);
        }
        rest = &rest[end..];
    }

    Ok((
        rest,
        ParsedLine {
            tags,
            prefix,
            command,
            args,
            trailing,
        },
    ))
}

/// A parsed line with borrowed string slices.
///
/// This is the purely syntactic intermediate representation; tag decoding,
/// CTCP unwrapping, and nick extraction happen in
/// [`MessageRef::parse`](super::MessageRef::parse).
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ParsedLine<'a> {
    /// Raw tag block (without the leading `@`), if present.
    pub tags: Option<&'a str>,
    /// Prefix (without the leading `:`), if present.
    pub prefix: Option<&'a str>,
    /// The command name.
    pub command: &'a str,
    /// Space-delimited arguments, excluding the trailing parameter.
    pub args: Vec<&'a str>,
    /// The trailing parameter (text after the first ` :`), if present.
    pub trailing: Option<&'a str>,
}

impl<'a> ParsedLine<'a> {
    /// Parse a single CR-LF-stripped line.
    pub fn parse(input: &'a str) -> Result<Self, MessageParseError> {
        match parse_line_inner(input) {
            Ok((_remaining, line)) => Ok(line),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                // Report the innermost context label and its position.
                let mut ctx = "parsing message";
                let mut position = input.len();
                for (error_input, error_kind) in &e.errors {
                    position = input.len() - error_input.len();
                    if let VerboseErrorKind::Context(c) = error_kind {
                        ctx = c;
                    }
                }
                Err(MessageParseError::Syntax {
                    position,
                    context: ctx,
                })
            }
            Err(nom::Err::Incomplete(_)) => Err(MessageParseError::Syntax {
                position: input.len(),
                context: "incomplete input",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_command() {
        let line = ParsedLine::parse("PING").unwrap();
        assert_eq!(line.command, "PING");
        assert!(line.tags.is_none());
        assert!(line.prefix.is_none());
        assert!(line.args.is_empty());
        assert!(line.trailing.is_none());
    }

    #[test]
    fn test_parse_command_with_trailing() {
        let line = ParsedLine::parse("PRIVMSG #channel :Hello, world!").unwrap();
        assert_eq!(line.command, "PRIVMSG");
        assert_eq!(line.args, vec!["#channel"]);
        assert_eq!(line.trailing, Some("Hello, world!"));
    }

    #[test]
    fn test_parse_with_prefix() {
        let line = ParsedLine::parse(":nick!user@host PRIVMSG #channel :Hello").unwrap();
        assert_eq!(line.prefix, Some("nick!user@host"));
        assert_eq!(line.command, "PRIVMSG");
        assert_eq!(line.args, vec!["#channel"]);
        assert_eq!(line.trailing, Some("Hello"));
    }

    #[test]
    fn test_parse_with_tags() {
        let line =
            ParsedLine::parse("@badges=;color=#0000FF :nick JOIN #ch").unwrap();
        assert_eq!(line.tags, Some("badges=;color=#0000FF"));
        assert_eq!(line.prefix, Some("nick"));
        assert_eq!(line.command, "JOIN");
        assert_eq!(line.args, vec!["#ch"]);
    }

    #[test]
    fn test_parse_numeric_reply() {
        let line = ParsedLine::parse(":tmi.twitch.tv 001 nick :Welcome, GLHF!").unwrap();
        assert_eq!(line.prefix, Some("tmi.twitch.tv"));
        assert_eq!(line.command, "001");
        assert_eq!(line.args, vec!["nick"]);
        assert_eq!(line.trailing, Some("Welcome, GLHF!"));
    }

    #[test]
    fn test_parse_multiple_args() {
        let line = ParsedLine::parse(":tmi.twitch.tv 353 me = #chan :a b c").unwrap();
        assert_eq!(line.command, "353");
        assert_eq!(line.args, vec!["me", "=", "#chan"]);
        assert_eq!(line.trailing, Some("a b c"));
    }

    #[test]
    fn test_parse_empty_trailing() {
        let line = ParsedLine::parse("PRIVMSG #channel :").unwrap();
        assert_eq!(line.args, vec!["#channel"]);
        assert_eq!(line.trailing, Some(""));
    }

    #[test]
    fn test_parse_prefix_without_space_fails() {
        assert!(ParsedLine::parse(":loneprefix").is_err());
    }

    #[test]
    fn test_parse_error_carries_context() {
        let err = ParsedLine::parse(":prefix ").unwrap_err();
        assert!(matches!(err, MessageParseError::Syntax { .. }));
    }

    #[test]
    fn test_parse_collapses_repeated_spaces() {
        let line = ParsedLine::parse("PART  #chan").unwrap();
        assert_eq!(line.args, vec!["#chan"]);
    }
}

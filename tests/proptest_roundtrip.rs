//! Property-based tests for the wire codec.
//!
//! Uses proptest to verify that:
//! 1. Tag-value escaping round-trips for arbitrary values
//! 2. Escaped values never contain raw separators
//! 3. Wire-form escape sequences survive decode → re-encode
//! 4. The line parser never panics on arbitrary input
//!
//! Run with: `cargo test --test proptest_roundtrip`

use proptest::prelude::*;

use twirc::message::tags::{escape_tag_value, unescape_tag_value};
use twirc::MessageRef;

/// Wire-form tag values assembled only from valid escape sequences and
/// plain characters; the alphabet for which decode and encode are exact
/// inverses.
fn wire_value_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("\\:".to_string()),
            Just("\\s".to_string()),
            Just("\\\\".to_string()),
            Just("\\r".to_string()),
            Just("\\n".to_string()),
            prop::string::string_regex("[a-zA-Z0-9#/._-]{1,4}").expect("valid regex"),
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn escape_then_unescape_is_identity(value in any::<String>()) {
        let escaped = escape_tag_value(&value);
        let unescaped = unescape_tag_value(&escaped);
        prop_assert_eq!(unescaped.as_ref(), value.as_str());
    }

    #[test]
    fn escaped_values_carry_no_raw_separators(value in any::<String>()) {
        let escaped = escape_tag_value(&value);
        prop_assert!(!escaped.contains(';'));
        prop_assert!(!escaped.contains(' '));
        prop_assert!(!escaped.contains('\r'));
        prop_assert!(!escaped.contains('\n'));
    }

    #[test]
    fn unescape_then_escape_is_identity_on_wire_values(wire in wire_value_strategy()) {
        let decoded = unescape_tag_value(&wire);
        let re_escaped = escape_tag_value(&decoded);
        prop_assert_eq!(re_escaped.as_ref(), wire.as_str());
    }

    #[test]
    fn parser_never_panics(line in "[ -~]{0,200}") {
        let _ = MessageRef::parse(&line);
    }

    #[test]
    fn well_formed_privmsg_parses(
        nick in "[a-z][a-z0-9_]{0,8}",
        channel in "#[a-z0-9_]{1,20}",
        text in "[ -~]{0,100}",
    ) {
        let line = format!(":{nick}!{nick}@{nick}.tmi.twitch.tv PRIVMSG {channel} :{text}");
        let msg = MessageRef::parse(&line).unwrap();
        prop_assert_eq!(msg.command, "PRIVMSG");
        prop_assert_eq!(msg.nick, Some(nick.as_str()));
        prop_assert_eq!(msg.args, vec![channel.as_str()]);
        prop_assert_eq!(msg.trailing, Some(text.as_str()));
    }

    #[test]
    fn tag_block_parses_for_arbitrary_wire_values(
        key in "[a-z][a-z0-9-]{0,15}",
        value in wire_value_strategy(),
    ) {
        let line = format!("@{key}={value} PING :tmi.twitch.tv");
        let msg = MessageRef::parse(&line).unwrap();
        prop_assert_eq!(msg.tags.len(), 1);
        prop_assert_eq!(msg.tags[0].key, key.as_str());
    }
}

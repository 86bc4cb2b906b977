//! IRCv3 message tags: the `@key=value;key2=value2` block Twitch prefixes
//! to most lines, and the escape scheme its values are encoded with.

use std::borrow::Cow;

/// A single message tag in decoded form.
///
/// The value is empty for key-only tags. Tag order within a message is
/// preserved as parsed.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tag<'a> {
    /// Tag key, e.g. `display-name`.
    pub key: &'a str,
    /// Decoded tag value. Borrows the wire bytes when no escape sequences
    /// occur in the value.
    pub value: Cow<'a, str>,
}

/// Find a tag by key. Tag counts per message are small, so this is a
/// linear scan.
pub fn find_tag<'t, 'a>(tags: &'t [Tag<'a>], key: &str) -> Option<&'t Tag<'a>> {
    tags.iter().find(|t| t.key == key)
}

/// Look up a tag's decoded value by key.
pub fn tag_value<'t>(tags: &'t [Tag<'_>], key: &str) -> Option<&'t str> {
    find_tag(tags, key).map(|t| t.value.as_ref())
}

/// Split a raw tag block (without the leading `@`) into decoded tags.
///
/// Tokens are separated by `;`; each splits on the first `=`. A token
/// without `=` yields a key-only tag with an empty value.
pub(crate) fn parse_tag_block(block: &str) -> Vec<Tag<'_>> {
    block
        .split(';')
        .filter(|tok| !tok.is_empty())
        .map(|tok| match tok.split_once('=') {
            Some((key, value)) => Tag {
                key,
                value: unescape_tag_value(value),
            },
            None => Tag {
                key: tok,
                value: Cow::Borrowed(""),
            },
        })
        .collect()
}

/// Encode a tag value into wire form.
///
/// Inverse of [`unescape_tag_value`]: semicolons, spaces, backslashes,
/// and CR/LF become their backslash escapes. Values that need no
/// escaping are borrowed as-is.
pub fn escape_tag_value(value: &str) -> Cow<'_, str> {
    if !value.contains([';', ' ', '\\', '\r', '\n']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        match c {
            ';' => escaped.push_str("\\:"),
            ' ' => escaped.push_str("\\s"),
            '\\' => escaped.push_str("\\\\"),
            '\r' => escaped.push_str("\\r"),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Unescape a tag value from wire format.
///
/// Reverses the escaping applied by [`escape_tag_value`] in a single
/// left-to-right pass: `\:` becomes `;`, `\s` a space, `\\` a backslash,
/// `\r`/`\n` CR/LF, any other `\x` becomes `x`, and a trailing lone `\`
/// is dropped. The decoded value never exceeds the wire length, and
/// values without escapes are borrowed as-is.
pub fn unescape_tag_value(value: &str) -> Cow<'_, str> {
    if !value.contains('\\') {
        return Cow::Borrowed(value);
    }

    let mut unescaped = String::with_capacity(value.len());
    let mut iter = value.chars();
    while let Some(c) = iter.next() {
        let r = if c == '\\' {
            match iter.next() {
                Some(':') => ';',
                Some('s') => ' ',
                Some('\\') => '\\',
                Some('r') => '\r',
                Some('n') => '\n',
                Some(c) => c,
                None => break,
            }
        } else {
            c
        };
        unescaped.push(r);
    }
    Cow::Owned(unescaped)
}

//! String, regex, and character literal lexing.

use edn_util::error::ReadErrorKind;

use crate::cursor::{Cursor, Lookahead};
use crate::unicode::is_delimiter;

/// Reads the body of `"..."` (or, in regex mode, `#"..."`) up to and
/// including the closing quote. Escape handling is identical regardless of
/// which [`Value`] variant the caller ultimately wraps the result in.
pub fn read_string_body(cursor: &mut Cursor<'_>) -> Result<String, ReadErrorKind> {
    let mut out = String::new();
    loop {
        match cursor.get() {
            Lookahead::Eof => return Err(ReadErrorKind::UnterminatedString),
            Lookahead::Char('"') => return Ok(out),
            Lookahead::Char('\\') => match cursor.get() {
                Lookahead::Eof => return Err(ReadErrorKind::UnterminatedString),
                Lookahead::Char('n') => out.push('\n'),
                Lookahead::Char('t') => out.push('\t'),
                Lookahead::Char('r') => out.push('\r'),
                Lookahead::Char('b') => out.push('\u{8}'),
                Lookahead::Char('f') => out.push('\u{c}'),
                Lookahead::Char('"') => out.push('"'),
                Lookahead::Char('\\') => out.push('\\'),
                Lookahead::Char('u') => out.push(read_hex_escape(cursor)?),
                Lookahead::Char(c) => out.push(c),
            },
            Lookahead::Char(c) => out.push(c),
        }
    }
}

fn read_hex_escape(cursor: &mut Cursor<'_>) -> Result<char, ReadErrorKind> {
    let mut digits = String::new();
    for _ in 0..4 {
        match cursor.get() {
            Lookahead::Char(c) if c.is_ascii_hexdigit() => digits.push(c),
            _ => return Err(ReadErrorKind::InvalidUnicode(digits)),
        }
    }
    let code = u32::from_str_radix(&digits, 16).map_err(|_| ReadErrorKind::InvalidUnicode(digits.clone()))?;
    char::from_u32(code).ok_or(ReadErrorKind::InvalidUnicode(digits))
}

/// Named character literals, longest-match order enforced by
/// [`read_named_literal`] rather than by this table's order: every name
/// here starts with a distinct letter, so there is never more than one
/// candidate active at a time.
const NAMED_LITERALS: &[(&str, char)] = &[
    ("newline", '\n'),
    ("space", ' '),
    ("tab", '\t'),
    ("return", '\r'),
    ("backspace", '\u{8}'),
    ("formfeed", '\u{c}'),
];

/// Reads a character literal's body, `cursor` positioned just past the
/// leading `\`. Returns the code point, having already consumed and
/// validated the delimiter that must follow.
pub fn read_char_literal(cursor: &mut Cursor<'_>) -> Result<char, ReadErrorKind> {
    let first = match cursor.get() {
        Lookahead::Eof => return Err(ReadErrorKind::InvalidCharLiteral),
        Lookahead::Char(c) => c,
    };

    // Named literals and \uXXXX / \oNNN only apply when something else
    // follows; a single letter immediately before a delimiter is itself
    // the literal (e.g. `\a`).
    let more_follows = matches!(cursor.peek(), Lookahead::Char(c) if !is_delimiter(c));

    let result = if !more_follows {
        first
    } else if first == 'u' {
        read_unicode_char_escape(cursor)?
    } else if first == 'o' {
        read_octal_char_escape(cursor)?
    } else if first.is_alphabetic() {
        read_named_literal(cursor, first)?
    } else {
        first
    };

    match cursor.peek() {
        Lookahead::Eof => {}
        Lookahead::Char(c) if is_delimiter(c) => {}
        Lookahead::Char(c) => return Err(ReadErrorKind::UnexpectedChar(c)),
    }
    Ok(result)
}

/// Reads the four hex digits of a `\uXXXX` character-literal escape,
/// `cursor` positioned just past the leading `u`.
fn read_unicode_char_escape(cursor: &mut Cursor<'_>) -> Result<char, ReadErrorKind> {
    let mut digits = String::from("u");
    for _ in 0..4 {
        match cursor.get() {
            Lookahead::Char(c) if c.is_ascii_hexdigit() => digits.push(c),
            _ => return Err(ReadErrorKind::InvalidUnicode(digits)),
        }
    }
    let code = u32::from_str_radix(&digits[1..], 16).map_err(|_| ReadErrorKind::InvalidUnicode(digits.clone()))?;
    char::from_u32(code).ok_or(ReadErrorKind::InvalidUnicode(digits))
}

/// Reads the three octal digits of a `\oNNN` character-literal escape,
/// `cursor` positioned just past the leading `o`.
fn read_octal_char_escape(cursor: &mut Cursor<'_>) -> Result<char, ReadErrorKind> {
    let mut digits = String::from("o");
    for _ in 0..3 {
        match cursor.get() {
            Lookahead::Char(c) if ('0'..='7').contains(&c) => digits.push(c),
            _ => return Err(ReadErrorKind::InvalidUnicode(digits)),
        }
    }
    let code = u32::from_str_radix(&digits[1..], 8).map_err(|_| ReadErrorKind::InvalidUnicode(digits.clone()))?;
    char::from_u32(code).ok_or(ReadErrorKind::InvalidUnicode(digits))
}

/// Reads the remainder of a named literal (`newline`, `space`, `tab`,
/// `return`, `backspace`, `formfeed`), `cursor` positioned just past
/// `first`. Grows the candidate name one character at a time, only while
/// some table entry still extends it, so a complete match (`newline`)
/// stops growing right there instead of swallowing whatever non-delimiter
/// character follows — the `x` in `\newlinex` is left for the caller's
/// trailing-delimiter check rather than being absorbed into the name.
fn read_named_literal(cursor: &mut Cursor<'_>, first: char) -> Result<char, ReadErrorKind> {
    let mut name = String::new();
    name.push(first);
    loop {
        let Some((candidate, _)) = NAMED_LITERALS.iter().find(|(n, _)| n.len() > name.len() && n.starts_with(name.as_str())) else {
            break;
        };
        match cursor.peek() {
            Lookahead::Char(c) if !is_delimiter(c) && candidate.as_bytes()[name.len()] == c as u8 => {
                name.push(c);
                cursor.get();
            }
            _ => break,
        }
    }
    NAMED_LITERALS.iter().find(|(n, _)| *n == name).map(|(_, c)| *c).ok_or(ReadErrorKind::InvalidCharLiteral)
}

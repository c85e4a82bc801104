//! Symbol and keyword lexing.

use edn_util::error::ReadErrorKind;
use edn_util::{Ident, Value};

use crate::cursor::{Cursor, Lookahead};
use crate::unicode::is_symbol_rune;

/// Scans a symbol or keyword token, `cursor` positioned just past the
/// already-consumed first character `first`. Recognizes `nil`/`true`/
/// `false` as their own values, splits on the last `/` for a namespace,
/// and rejects `::` mid-token and a trailing `:`/`/`.
pub fn read_symbol_or_keyword(cursor: &mut Cursor<'_>, first: char) -> Result<Value, ReadErrorKind> {
    let mut text = String::new();
    text.push(first);
    loop {
        match cursor.peek() {
            Lookahead::Char(c) if is_symbol_rune(c) => {
                text.push(c);
                cursor.get();
            }
            _ => break,
        }
    }

    let is_keyword = text.starts_with(':');
    let body = if is_keyword { &text[1..] } else { &text[..] };

    if body.is_empty() {
        // A lone `:` with nothing after it.
        return Err(ReadErrorKind::InvalidSymbol(':'));
    }
    if body.ends_with(':') || (body.ends_with('/') && body != "/") {
        return Err(ReadErrorKind::InvalidSymbol(body.chars().last().unwrap()));
    }
    if body.len() > 1 && body.contains("::") {
        return Err(ReadErrorKind::InvalidSymbol(':'));
    }

    if !is_keyword {
        match body {
            "nil" => return Ok(Value::Nil),
            "true" => return Ok(Value::Bool(true)),
            "false" => return Ok(Value::Bool(false)),
            _ => {}
        }
    }

    let ident = if body == "/" {
        Ident::unqualified("/")
    } else if let Some(idx) = body.rfind('/') {
        if idx == 0 || idx == body.len() - 1 {
            Ident::unqualified(body)
        } else {
            Ident::new(Some(&body[..idx]), &body[idx + 1..])
        }
    } else {
        Ident::unqualified(body)
    };

    Ok(if is_keyword { Value::Keyword(ident) } else { Value::Symbol(ident) })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(src: &str) -> Value {
        let mut c = Cursor::new(&src[1..]);
        let first = src.chars().next().unwrap();
        read_symbol_or_keyword(&mut c, first).unwrap()
    }

    #[test]
    fn reserved_words() {
        assert_eq!(read("nil"), Value::Nil);
        assert_eq!(read("true"), Value::Bool(true));
        assert_eq!(read("false"), Value::Bool(false));
    }

    #[test]
    fn plain_symbol() {
        assert_eq!(read("foo"), Value::Symbol(Ident::unqualified("foo")));
    }

    #[test]
    fn namespaced_symbol() {
        assert_eq!(read("foo/bar"), Value::Symbol(Ident::new(Some("foo"), "bar")));
    }

    #[test]
    fn keyword() {
        assert_eq!(read(":foo"), Value::Keyword(Ident::unqualified("foo")));
        assert_eq!(read(":foo/bar"), Value::Keyword(Ident::new(Some("foo"), "bar")));
    }

    #[test]
    fn bare_slash_is_the_slash_symbol() {
        assert_eq!(read("/"), Value::Symbol(Ident::unqualified("/")));
    }

    #[test]
    fn double_colon_is_rejected() {
        let mut c = Cursor::new("oo::bar");
        assert!(read_symbol_or_keyword(&mut c, 'f').is_err());
    }

    #[test]
    fn trailing_colon_is_rejected() {
        let mut c = Cursor::new("oo:");
        assert!(read_symbol_or_keyword(&mut c, 'f').is_err());
    }
}

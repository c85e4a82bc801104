//! A minimal printer, used only by tests to exercise round-trip behavior —
//! it is not part of the reader's public API.

use std::fmt;

use crate::value::Value;

/// Escapes a single character the way string/char literals would need to
/// spell it back out.
pub fn escape_char(c: char) -> String {
    match c {
        ' ' => "\\space".to_string(),
        '\n' => "\\newline".to_string(),
        '\t' => "\\tab".to_string(),
        '\r' => "\\return".to_string(),
        '\u{8}' => "\\backspace".to_string(),
        '\u{c}' => "\\formfeed".to_string(),
        c => format!("\\{c}"),
    }
}

/// Escapes the contents of a string literal.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn write_value(f: &mut fmt::Formatter<'_>, v: &Value, _readably: bool) -> fmt::Result {
    match v {
        Value::Nil => write!(f, "nil"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Char(c) => write!(f, "{}", escape_char(*c)),
        Value::Int(i) => write!(f, "{i}"),
        Value::BigInt(b) => write!(f, "{b}N"),
        Value::Double(d) => write!(f, "{d}"),
        Value::BigFloat(b) => write!(f, "{b}M"),
        Value::Ratio(r) => write!(f, "{}/{}", r.numer(), r.denom()),
        Value::String(s) => write!(f, "{}", escape_string(s)),
        Value::Regex(s) => write!(f, "#{}", escape_string(s)),
        Value::Symbol(sym) => write!(f, "{sym}"),
        Value::Keyword(kw) => write!(f, ":{kw}"),
        Value::List(l) => write!(f, "{l}"),
        Value::Vector(v) => write!(f, "{v}"),
        Value::Map(m) => write!(f, "{m}"),
        Value::Set(s) => write!(f, "{s}"),
        Value::Seq(s) => write!(f, "{s}"),
    }
}

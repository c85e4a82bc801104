//! Numeric literal lexing.
//!
//! The scanner commits to a number on seeing a digit, or `-`/`+` followed
//! by a digit, then munches every following non-delimiter character in a
//! single maximal-munch scan before classifying and parsing the whole
//! token text in one pass: radix form, then ratio, then `N`/`M`-suffixed
//! exact/arbitrary-precision forms, then double, then plain integer with
//! overflow promotion to `BigInt`.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_rational::BigRational;
use std::str::FromStr;

use edn_util::error::ReadErrorKind;
use edn_util::Value;

use crate::cursor::{Cursor, Lookahead};
use crate::unicode::{is_delimiter, is_terminating_macro};

/// `true` if `c` could begin a numeric literal when the scanner has not
/// yet committed: a digit, or `-`/`+` immediately followed by a digit.
pub fn starts_number(c: char, next: Lookahead) -> bool {
    c.is_ascii_digit()
        || ((c == '-' || c == '+') && matches!(next, Lookahead::Char(d) if d.is_ascii_digit()))
}

/// Scans the raw token text of a numeric literal, given that the first
/// character has already been confirmed by [`starts_number`] but *not yet
/// consumed* from `cursor`.
pub fn scan_number_text(cursor: &mut Cursor<'_>) -> String {
    let mut text = String::new();
    loop {
        match cursor.get() {
            Lookahead::Eof => break,
            Lookahead::Char(c) => {
                if is_delimiter(c) || is_terminating_macro(c) {
                    cursor.unget();
                    break;
                }
                text.push(c);
            }
        }
    }
    text
}

/// Parses a fully-scanned numeric token into a [`Value`], trying each
/// numeric form in turn.
pub fn parse_number(text: &str) -> Result<Value, ReadErrorKind> {
    let bad = || ReadErrorKind::InvalidNumber(text.to_string());

    if let Some(v) = try_parse_radix(text)? {
        return Ok(v);
    }
    if let Some(v) = try_parse_ratio(text)? {
        return Ok(v);
    }
    if let Some(rest) = text.strip_suffix('N') {
        if rest.is_empty() || rest.contains(['.', 'e', 'E']) {
            return Err(bad());
        }
        return BigInt::from_str(rest).map(Value::BigInt).map_err(|_| bad());
    }
    if let Some(rest) = text.strip_suffix('M') {
        if rest.is_empty() {
            return Err(bad());
        }
        return BigDecimal::from_str(rest).map(Value::BigFloat).map_err(|_| bad());
    }
    if is_hex_literal(text) {
        return parse_hex_integer(text).ok_or_else(bad);
    }
    if looks_like_double(text) {
        return text.parse::<f64>().map(Value::Double).map_err(|_| bad());
    }
    parse_plain_integer(text).ok_or_else(bad)
}

fn is_hex_literal(text: &str) -> bool {
    let t = text.strip_prefix(['+', '-']).unwrap_or(text);
    t.len() > 2 && (t.starts_with("0x") || t.starts_with("0X"))
}

fn parse_hex_integer(text: &str) -> Option<Value> {
    let (sign, rest) = split_sign(text);
    let digits = rest.get(2..)?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    if let Ok(i) = i64::from_str_radix(digits, 16) {
        return Some(Value::Int(if sign { -i } else { i }));
    }
    let mut b = BigInt::from_str_radix(digits, 16).ok()?;
    if sign {
        b = -b;
    }
    Some(Value::BigInt(b))
}

fn looks_like_double(text: &str) -> bool {
    let t = text.strip_prefix(['+', '-']).unwrap_or(text);
    if t.contains('.') {
        return true;
    }
    // An exponent marker counts only when it is not the hex prefix's 'x'
    // and is followed by an optional sign and at least one digit.
    if let Some(idx) = t.find(['e', 'E']) {
        let (mantissa, exp) = t.split_at(idx);
        let exp = &exp[1..];
        let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        return !mantissa.is_empty()
            && mantissa.chars().all(|c| c.is_ascii_digit())
            && !exp.is_empty()
            && exp.chars().all(|c| c.is_ascii_digit());
    }
    false
}

fn parse_plain_integer(text: &str) -> Option<Value> {
    let (sign, rest) = split_sign(text);
    if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if let Ok(i) = text.parse::<i64>() {
        return Some(Value::Int(i));
    }
    let mut b = BigInt::from_str(rest).ok()?;
    if sign {
        b = -b;
    }
    Some(Value::BigInt(b))
}

/// Splits a leading `+`/`-` off `text`, returning whether it was a `-` and
/// the remaining text.
fn split_sign(text: &str) -> (bool, &str) {
    match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    }
}

/// `NrXXXX` radix-prefixed integer: the digit run before `r`/`R` (2..=36)
/// is the base, the remainder is the magnitude in that base. A trailing
/// `N` forces `BigInt` (already true for any radix literal that does not
/// fit `i64`, but accepted for symmetry with the decimal/hex forms).
fn try_parse_radix(text: &str) -> Result<Option<Value>, ReadErrorKind> {
    let (sign, rest) = split_sign(text);
    let Some(r_idx) = rest.find(['r', 'R']) else { return Ok(None) };
    let (base_text, tail) = rest.split_at(r_idx);
    if base_text.is_empty() || !base_text.chars().all(|c| c.is_ascii_digit()) {
        return Ok(None);
    }
    let mut magnitude = &tail[1..];
    let forced_big = magnitude.ends_with('N');
    if forced_big {
        magnitude = &magnitude[..magnitude.len() - 1];
    }
    let bad = || ReadErrorKind::InvalidNumber(text.to_string());
    let base: u32 = base_text.parse().map_err(|_| bad())?;
    if !(2..=36).contains(&base) || magnitude.is_empty() {
        return Err(bad());
    }
    if !magnitude.chars().all(|c| c.is_digit(base)) {
        return Err(bad());
    }
    let mut big = BigInt::from_str_radix(magnitude, base).map_err(|_| bad())?;
    if sign {
        big = -big;
    }
    if !forced_big {
        if let Some(i) = num_traits::ToPrimitive::to_i64(&big) {
            return Ok(Some(Value::Int(i)));
        }
    }
    Ok(Some(Value::BigInt(big)))
}

/// `num/denom` ratio: at most one `/`, optionally preceded by `-`.
fn try_parse_ratio(text: &str) -> Result<Option<Value>, ReadErrorKind> {
    if !text.contains('/') {
        return Ok(None);
    }
    let bad = || ReadErrorKind::InvalidNumber(text.to_string());
    let (sign, rest) = split_sign(text);
    let mut parts = rest.split('/');
    let (Some(num), Some(den), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(bad());
    };
    if num.is_empty() || den.is_empty() || !num.chars().all(|c| c.is_ascii_digit()) || !den.chars().all(|c| c.is_ascii_digit()) {
        return Err(bad());
    }
    let mut numer = BigInt::from_str(num).map_err(|_| bad())?;
    let denom = BigInt::from_str(den).map_err(|_| bad())?;
    if sign {
        numer = -numer;
    }
    Ok(Some(Value::Ratio(BigRational::new(numer, denom))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(text: &str) -> Value {
        parse_number(text).unwrap()
    }

    #[test]
    fn decimal_integer() {
        assert_eq!(num("42"), Value::Int(42));
        assert_eq!(num("-7"), Value::Int(-7));
    }

    #[test]
    fn overflowing_integer_promotes_to_bigint() {
        assert_eq!(num("9999999999999999999"), Value::BigInt(BigInt::from_str("9999999999999999999").unwrap()));
    }

    #[test]
    fn n_suffix_forces_bigint() {
        assert_eq!(num("9999999999999999999N"), Value::BigInt(BigInt::from_str("9999999999999999999").unwrap()));
        assert_eq!(num("3N"), Value::BigInt(BigInt::from(3)));
    }

    #[test]
    fn m_suffix_forces_bigfloat() {
        assert_eq!(num("1.0M"), Value::BigFloat(BigDecimal::from_str("1.0").unwrap()));
    }

    #[test]
    fn hex_integer() {
        assert_eq!(num("0x1F"), Value::Int(31));
        assert_eq!(parse_number("0x1F.0"), Err(ReadErrorKind::InvalidNumber("0x1F.0".into())));
    }

    #[test]
    fn double_with_exponent() {
        assert_eq!(num("1e2"), Value::Double(100.0));
    }

    #[test]
    fn radix_literals() {
        assert_eq!(num("36rZZ"), Value::Int(36 * 35 + 35));
        assert_eq!(num("-16rFF"), Value::Int(-255));
        assert_eq!(num("2r10"), Value::Int(2));
        assert!(parse_number("1rX").is_err());
        assert!(parse_number("37rZ").is_err());
    }

    #[test]
    fn ratios() {
        assert_eq!(num("1/2"), Value::Ratio(BigRational::new(BigInt::from(1), BigInt::from(2))));
        assert_eq!(num("-3/4"), Value::Ratio(BigRational::new(BigInt::from(-3), BigInt::from(4))));
        assert!(parse_number("1/2/3").is_err());
    }
}

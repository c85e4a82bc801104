//! The scanner: whitespace/comment skipping, delimiter classification
//! and dispatch to the character-, string-, number- and identifier-level
//! readers, producing the [`Token`] alphabet `edn-par` recurses over.
//!
//! Drives a `Cursor` through a `match` on the current character to a
//! per-character handler, the same dispatch shape a hand-written
//! recursive-descent lexer typically uses.

use edn_util::error::ReadErrorKind;
use edn_util::{Position, Value};

use crate::cursor::{Cursor, Lookahead};
use crate::lexer::identifier::read_symbol_or_keyword;
use crate::lexer::number::{parse_number, scan_number_text, starts_number};
use crate::lexer::string::{read_char_literal, read_string_body};
use crate::token::Token;
use crate::unicode::{is_symbol_initial, is_whitespace};

/// Scans one [`Token`] at a time from a source string, tracking the
/// line/column position each token started at.
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner { cursor: Cursor::new(source) }
    }

    /// The cursor's current position. Sampled by callers both before a
    /// token (to stamp a form's wrapper) and after a failed token (to
    /// stamp an error at the lexer head).
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Skips whitespace, `;` line comments, and `#!` shebang comments, then
    /// returns the next token along with the position its first character
    /// started at.
    pub fn next_token(&mut self) -> (Position, Result<Token, ReadErrorKind>) {
        self.skip_whitespace_and_comments();
        let pos = self.cursor.position();
        (pos, self.scan_token())
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.cursor.peek() {
                Lookahead::Char(c) if is_whitespace(c) => {
                    self.cursor.get();
                }
                Lookahead::Char(';') => {
                    self.cursor.get();
                    self.skip_to_eol();
                }
                Lookahead::Char('#') => {
                    self.cursor.get();
                    if matches!(self.cursor.peek(), Lookahead::Char('!')) {
                        self.cursor.get();
                        self.skip_to_eol();
                    } else {
                        self.cursor.unget();
                        return;
                    }
                }
                _ => return,
            }
        }
    }

    fn skip_to_eol(&mut self) {
        loop {
            match self.cursor.get() {
                Lookahead::Eof | Lookahead::Char('\n') => return,
                Lookahead::Char(_) => {}
            }
        }
    }

    /// Looks at the upcoming two code points without consuming either,
    /// used only to disambiguate `-`/`+` as a number or symbol start.
    fn peek2(&mut self) -> Lookahead {
        let first = self.cursor.get();
        if first.is_eof() {
            return Lookahead::Eof;
        }
        let second = self.cursor.peek();
        self.cursor.unget();
        second
    }

    fn scan_token(&mut self) -> Result<Token, ReadErrorKind> {
        let c = match self.cursor.peek() {
            Lookahead::Eof => return Ok(Token::Eof),
            Lookahead::Char(c) => c,
        };

        match c {
            '(' => { self.cursor.get(); Ok(Token::LParen) }
            ')' => { self.cursor.get(); Ok(Token::RParen) }
            '[' => { self.cursor.get(); Ok(Token::LBracket) }
            ']' => { self.cursor.get(); Ok(Token::RBracket) }
            '{' => { self.cursor.get(); Ok(Token::LBrace) }
            '}' => { self.cursor.get(); Ok(Token::RBrace) }
            '\'' => { self.cursor.get(); Ok(Token::Quote) }
            '`' => { self.cursor.get(); Ok(Token::SyntaxQuote) }
            '@' => { self.cursor.get(); Ok(Token::Deref) }
            '^' => { self.cursor.get(); Ok(Token::Meta) }
            '~' => {
                self.cursor.get();
                if matches!(self.cursor.peek(), Lookahead::Char('@')) {
                    self.cursor.get();
                    Ok(Token::UnquoteSplicing)
                } else {
                    Ok(Token::Unquote)
                }
            }
            '"' => {
                self.cursor.get();
                let s = read_string_body(&mut self.cursor)?;
                Ok(Token::Atom(Value::String(s.into())))
            }
            '\\' => {
                self.cursor.get();
                let ch = read_char_literal(&mut self.cursor)?;
                Ok(Token::Atom(Value::Char(ch)))
            }
            '#' => {
                self.cursor.get();
                self.scan_dispatch()
            }
            c if c.is_ascii_digit() => {
                let text = scan_number_text(&mut self.cursor);
                parse_number(&text).map(Token::Atom)
            }
            '-' | '+' => {
                let second = self.peek2();
                if starts_number(c, second) {
                    let text = scan_number_text(&mut self.cursor);
                    parse_number(&text).map(Token::Atom)
                } else {
                    self.cursor.get();
                    read_symbol_or_keyword(&mut self.cursor, c).map(Token::Atom)
                }
            }
            c if is_symbol_initial(c) => {
                self.cursor.get();
                read_symbol_or_keyword(&mut self.cursor, c).map(Token::Atom)
            }
            c => {
                self.cursor.get();
                Err(ReadErrorKind::UnexpectedChar(c))
            }
        }
    }

    /// Dispatch sub-forms following `#`: regex, var-quote, metadata,
    /// set-open, anon-fn-open, discard, or a tagged-literal symbol. `#!` is
    /// consumed as a comment by [`Self::skip_whitespace_and_comments`]
    /// before this is ever reached.
    fn scan_dispatch(&mut self) -> Result<Token, ReadErrorKind> {
        match self.cursor.peek() {
            Lookahead::Char('"') => {
                self.cursor.get();
                let s = read_string_body(&mut self.cursor)?;
                Ok(Token::Atom(Value::Regex(s.into())))
            }
            Lookahead::Char('\'') => { self.cursor.get(); Ok(Token::VarQuote) }
            Lookahead::Char('^') => { self.cursor.get(); Ok(Token::Meta) }
            Lookahead::Char('{') => { self.cursor.get(); Ok(Token::SetOpen) }
            Lookahead::Char('(') => { self.cursor.get(); Ok(Token::AnonFnOpen) }
            Lookahead::Char('_') => { self.cursor.get(); Ok(Token::Discard) }
            Lookahead::Char(c) if is_symbol_initial(c) => {
                self.cursor.get();
                match read_symbol_or_keyword(&mut self.cursor, c)? {
                    Value::Symbol(ident) => Ok(Token::Tag(ident)),
                    _ => Err(ReadErrorKind::TagNotSymbol),
                }
            }
            Lookahead::Eof => Err(ReadErrorKind::UnexpectedEof),
            Lookahead::Char(c) => Err(ReadErrorKind::UnexpectedChar(c)),
        }
    }
}

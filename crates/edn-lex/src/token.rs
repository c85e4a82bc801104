//! The token alphabet the scanner produces.
//!
//! Unlike a general-purpose language's lexer, most of what this one emits
//! is *atomic*: once a number, string, character, symbol or keyword has
//! been scanned there is nothing left to parse about it, so it travels as
//! an already-built [`Value`]. What remains are the structural and
//! reader-macro prefix characters that `edn-par` recurses on.

use edn_util::{Ident, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A fully-scanned atom: nil, bool, char, every numeric kind, string,
    /// regex, symbol, or keyword.
    Atom(Value),

    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    /// `#{`
    SetOpen,
    /// `#(`
    AnonFnOpen,

    /// `'`
    Quote,
    /// `` ` ``
    SyntaxQuote,
    /// `~`
    Unquote,
    /// `~@`
    UnquoteSplicing,
    /// `@`
    Deref,
    /// `^` or `#^`
    Meta,
    /// `#'`
    VarQuote,
    /// `#_`
    Discard,
    /// `#tag` — dispatch to the tagged-literal registry.
    Tag(Ident),

    Eof,
}

impl Token {
    pub fn is_eof(&self) -> bool {
        matches!(self, Token::Eof)
    }
}

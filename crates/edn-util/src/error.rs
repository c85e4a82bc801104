//! Reader error types.
//!
//! [`ReadErrorKind`] enumerates the failure modes the reader can surface;
//! [`ReadError`] pairs one with the [`Position`] of the lexer head at the
//! moment of failure. `Display` renders `"<origin>:<line>:<column>: <message>"`.

use std::fmt;

use thiserror::Error;

use crate::pos::Position;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),

    #[error("unexpected EOF")]
    UnexpectedEof,

    #[error("invalid number: '{0}'")]
    InvalidNumber(String),

    #[error("invalid unicode escape: '{0}'")]
    InvalidUnicode(String),

    #[error("invalid character literal")]
    InvalidCharLiteral,

    #[error("invalid symbol character '{0}'")]
    InvalidSymbol(char),

    #[error("unterminated string")]
    UnterminatedString,

    #[error("duplicate {kind} entry: {printed}")]
    DuplicateKey { kind: &'static str, printed: String },

    #[error("metadata must be a symbol, string, keyword or map")]
    BadMetadata,

    #[error("unquote-splicing (~@) not in list")]
    SpliceNotInList,

    #[error("arg literal must be %, %& or %integer")]
    BadArgLiteral,

    #[error("nested #(...) is not allowed")]
    NestedAnonFn,

    #[error("no reader function for tag {0}")]
    UnknownTag(String),

    #[error("reader tag must be a symbol")]
    TagNotSymbol,
}

/// A reader error at a specific source position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ReadError {
    pub pos: Position,
    pub kind: ReadErrorKind,
    /// Identifies the character source the error came from, e.g. a file
    /// path or `"<stdin>"`. Empty when the caller has not supplied one.
    pub origin: String,
}

impl ReadError {
    pub fn new(origin: impl Into<String>, pos: Position, kind: ReadErrorKind) -> Self {
        ReadError { pos, kind, origin: origin.into() }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.origin, self.pos, self.kind)
    }
}

pub type ReadResult<T> = Result<T, ReadError>;

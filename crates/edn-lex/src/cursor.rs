//! The character source: `get`/`peek`/`unget` over a Unicode code point
//! stream with an explicit EOF sentinel and line/column tracking.
//!
//! Tracks a `CharIndices` cursor plus line/column over a `&str`. Only one
//! level of push-back is ever needed, so rather than a snapshot/restore pair
//! this cursor keeps a single-slot `unget` buffer.

use edn_util::Position;

/// `get()`'s return type: either a code point or the EOF sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookahead {
    Char(char),
    Eof,
}

impl Lookahead {
    pub fn is_eof(self) -> bool {
        matches!(self, Lookahead::Eof)
    }

    pub fn into_char(self) -> Option<char> {
        match self {
            Lookahead::Char(c) => Some(c),
            Lookahead::Eof => None,
        }
    }
}

/// A pull-based, single-push-back Unicode character source.
pub struct Cursor<'a> {
    chars: std::str::CharIndices<'a>,
    source: &'a str,
    pos: Position,
    /// The last character returned by `get`/`peek`, and the position it
    /// was *read at* (i.e. the position to restore on `unget`).
    pending: Option<(char, Position)>,
    ungot: Option<(char, Position)>,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Cursor {
            chars: source.char_indices(),
            source,
            pos: Position::START,
            pending: None,
            ungot: None,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    fn raw_next(&mut self) -> Option<char> {
        self.chars.next().map(|(_, c)| c)
    }

    /// Pulls the next code point, collapsing `\r\n` and a lone `\r` into a
    /// single logical `\n` so line counting — and anything reading the
    /// normalized stream — never sees a bare carriage return.
    fn raw_next_normalized(&mut self) -> Option<char> {
        match self.raw_next()? {
            '\r' => {
                let saved = self.chars.clone();
                if !matches!(self.chars.next(), Some((_, '\n'))) {
                    self.chars = saved;
                }
                Some('\n')
            }
            c => Some(c),
        }
    }

    /// Pulls the next code point, advancing position, or returns `Eof`.
    pub fn get(&mut self) -> Lookahead {
        if let Some((c, read_at)) = self.ungot.take() {
            self.pending = Some((c, read_at));
            self.pos = read_at.advance(c);
            return Lookahead::Char(c);
        }
        let read_at = self.pos;
        match self.raw_next_normalized() {
            Some(c) => {
                self.pending = Some((c, read_at));
                self.pos = read_at.advance(c);
                Lookahead::Char(c)
            }
            None => Lookahead::Eof,
        }
    }

    /// Looks at the next code point without consuming it.
    pub fn peek(&mut self) -> Lookahead {
        let saved_chars = self.chars.clone();
        let saved_pos = self.pos;
        let saved_pending = self.pending;
        let saved_ungot = self.ungot;
        let la = self.get();
        self.chars = saved_chars;
        self.pos = saved_pos;
        self.pending = saved_pending;
        self.ungot = saved_ungot;
        la
    }

    /// Pushes the most recently read code point back onto the stream.
    /// Only one level of push-back is guaranteed; calling `unget` twice
    /// without an intervening `get` panics, since no lexer in this crate
    /// ever needs that.
    pub fn unget(&mut self) {
        let (c, read_at) = self.pending.take().expect("unget without a prior get");
        self.ungot = Some((c, read_at));
        self.pos = read_at;
    }
}

//! A small diagnostic type used by the CLI to render read errors against a
//! source snippet. Scaled down from a multi-file-source-map diagnostic
//! system to what a single-pass, single-file-at-a-time reader needs: one
//! level, one message, one position, no diagnostic-code registry.

use std::fmt;

use crate::error::ReadError;
use crate::pos::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Note => "note",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub pos: Position,
    pub origin: String,
}

impl Diagnostic {
    pub fn from_read_error(err: &ReadError) -> Self {
        Diagnostic {
            level: Level::Error,
            message: err.kind.to_string(),
            pos: err.pos,
            origin: err.origin.clone(),
        }
    }

    /// Renders the diagnostic with a `^` caret under the offending column
    /// of `source_line`, if the caller has one to show.
    pub fn render(&self, source_line: Option<&str>) -> String {
        let mut out = format!("{}: {}:{}: {}", self.level, self.origin, self.pos, self.message);
        if let Some(line) = source_line {
            out.push('\n');
            out.push_str(line);
            out.push('\n');
            out.push_str(&" ".repeat(self.pos.column as usize));
            out.push('^');
        }
        out
    }
}

/// Collects diagnostics emitted while driving the reader over more than one
/// form, e.g. the `ednr` CLI reading every top-level form in a file.
#[derive(Debug, Default)]
pub struct Handler {
    diagnostics: Vec<Diagnostic>,
}

impl Handler {
    pub fn new() -> Self {
        Handler::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == Level::Error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

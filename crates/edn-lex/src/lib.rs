//! Lexical front end for the reader: the character source and the lexical
//! scanner that turns it into the [`Token`] alphabet `edn-par`'s collection
//! parser and reader-macro layer recurse over.
//!
//! Split into a `cursor`, a `unicode` classification module, and per-category
//! lexer submodules; most of what the scanner emits is already a
//! fully-formed [`edn_util::Value`] by the time the parser sees it, so there
//! is little left for the parser layer to do beyond structural recursion.

pub mod cursor;
mod lexer;
pub mod token;
pub mod unicode;

pub use cursor::{Cursor, Lookahead};
pub use lexer::Scanner;
pub use token::Token;

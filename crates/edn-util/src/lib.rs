//! Shared types for the edn reader workspace.
//!
//! This crate holds everything `edn-lex` and `edn-par` both need: the
//! [`Position`]/[`Positioned`] wrapper every form carries, the [`Value`]
//! model and the persistent collections backing its `List`/`Vector`/
//! `Map`/`Set`/`Seq` variants, the reader's error and diagnostic types, and
//! a minimal printer used by tests.

pub mod collections;
pub mod diagnostic;
pub mod error;
pub mod pos;
pub mod print;
pub mod value;

pub use collections::{ListValue, MapValue, SeqValue, SetValue, VectorValue};
pub use diagnostic::{Diagnostic, Handler, Level};
pub use error::{ReadError, ReadErrorKind, ReadResult};
pub use pos::{Position, Positioned};
pub use value::{Ident, Value};

//! The reader front end: turns a character source into [`edn_util::Value`]
//! forms, with reader macros, a shareable tagged-literal registry, and
//! syntax-quote/anon-fn desugaring.
//!
//! `edn-par` exposes two free functions, [`read`] and [`try_read`]: one
//! entry point that treats EOF as an error, and one that surfaces it as a
//! plain signal to the caller.

mod anon_fn;
mod macros;
mod reader;
mod registry;
mod syntax_quote;

pub use reader::Reader;
pub use registry::{ReaderContext, TagHandler};

use edn_util::error::ReadResult;
use edn_util::{Positioned, Value};

/// Reads exactly one form from `source`. EOF (only whitespace/comments
/// remaining) is an error.
pub fn read(source: &str, origin: impl Into<String>, ctx: ReaderContext) -> ReadResult<Positioned<Value>> {
    let origin = origin.into();
    tracing::trace!(origin = %origin, "read");
    Reader::new(source, origin, ctx).read()
}

/// Reads exactly one form from `source`, or `None` at EOF.
pub fn try_read(
    source: &str,
    origin: impl Into<String>,
    ctx: ReaderContext,
) -> ReadResult<Option<Positioned<Value>>> {
    let origin = origin.into();
    tracing::trace!(origin = %origin, "try_read");
    Reader::new(source, origin, ctx).try_read()
}

#[cfg(test)]
mod tests {
    use super::*;
    use edn_util::Ident;

    #[test]
    fn read_consumes_exactly_one_form() {
        let ctx = ReaderContext::new();
        let v = read("1 2", "<test>", ctx).unwrap();
        assert_eq!(v.value, Value::Int(1));
    }

    #[test]
    fn try_read_reports_eof_as_none() {
        let ctx = ReaderContext::new();
        assert_eq!(try_read("  ", "<test>", ctx).unwrap(), None);
    }

    #[test]
    fn try_read_reports_a_real_form() {
        let ctx = ReaderContext::new();
        let v = try_read(":k", "<test>", ctx).unwrap().unwrap();
        assert_eq!(v.value, Value::Keyword(Ident::unqualified("k")));
    }
}

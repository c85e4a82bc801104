//! Metadata normalization shared by `^m x` and `#^m x` — both entry points
//! in `crate::reader` call this one function.

use edn_util::error::ReadErrorKind;
use edn_util::{Ident, MapValue, Value};

/// Normalizes a metadata operand `m` into the map `(with-meta x M)` should
/// carry: a map is used as-is, a symbol or string becomes `{:tag m}`, a
/// keyword becomes `{m true}`; anything else is [`ReadErrorKind::BadMetadata`].
pub fn normalize_metadata(m: Value) -> Result<Value, ReadErrorKind> {
    match m {
        Value::Map(_) => Ok(m),
        Value::Symbol(_) | Value::String(_) => {
            let mut map = MapValue::empty();
            map.add(Value::Keyword(Ident::unqualified("tag")), m);
            Ok(Value::Map(map))
        }
        Value::Keyword(_) => {
            let mut map = MapValue::empty();
            map.add(m, Value::Bool(true));
            Ok(Value::Map(map))
        }
        _ => Err(ReadErrorKind::BadMetadata),
    }
}

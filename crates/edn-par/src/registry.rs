//! Process-wide reader state: the tagged-literal registry and the gensym
//! counter, expressed as an explicit, cloneable `ReaderContext` rather than
//! hidden globals — this makes independent `Reader`s trivially shareable
//! across threads, should a caller want one registry serving several
//! character sources.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use edn_util::error::ReadErrorKind;
use edn_util::{Ident, Value};

/// A tagged-literal handler: given the form following `#tag`, produces the
/// value the reader surfaces in its place.
pub type TagHandler = Arc<dyn Fn(Value) -> Result<Value, ReadErrorKind> + Send + Sync>;

/// Shared state a [`crate::Reader`] consults: the `Symbol -> reader-function`
/// tag registry and the monotonic gensym counter. Cheap to clone — all
/// instances cloned from one `ReaderContext::new()` share the same
/// underlying counter and registry.
#[derive(Clone)]
pub struct ReaderContext {
    registry: Arc<RwLock<HashMap<Ident, TagHandler>>>,
    gensym_counter: Arc<AtomicU64>,
}

impl ReaderContext {
    /// A fresh context, seeded with the `inst` and `uuid` tags: both
    /// delegate to the generic reader rather than constructing domain
    /// values.
    pub fn new() -> Self {
        let ctx = ReaderContext {
            registry: Arc::new(RwLock::new(HashMap::new())),
            gensym_counter: Arc::new(AtomicU64::new(0)),
        };
        let identity: TagHandler = Arc::new(Ok);
        ctx.register_tag(Ident::unqualified("inst"), Arc::clone(&identity));
        ctx.register_tag(Ident::unqualified("uuid"), identity);
        ctx
    }

    /// Registers (or overwrites) the handler for `tag`. Callers sharing one
    /// context across threads are responsible for serializing registration
    /// themselves; this does not take an internal lock beyond the single
    /// write it performs.
    pub fn register_tag(&self, tag: Ident, handler: TagHandler) {
        self.registry.write().unwrap().insert(tag, handler);
    }

    /// Looks up the handler for `tag`, if any is registered.
    pub fn resolve_tag(&self, tag: &Ident) -> Option<TagHandler> {
        self.registry.read().unwrap().get(tag).cloned()
    }

    /// Mints a fresh, process-unique symbol `"<prefix>__<n>#"`.
    pub fn gensym(&self, prefix: &str) -> Ident {
        let n = self.gensym_counter.fetch_add(1, Ordering::SeqCst);
        Ident::unqualified(&format!("{prefix}__{n}#"))
    }
}

impl Default for ReaderContext {
    fn default() -> Self {
        ReaderContext::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gensym_is_monotonic_and_unique() {
        let ctx = ReaderContext::new();
        let a = ctx.gensym("p");
        let b = ctx.gensym("p");
        assert_ne!(a, b);
        assert!(a.name.ends_with('#'));
    }

    #[test]
    fn seeded_tags_delegate_to_generic_reader() {
        let ctx = ReaderContext::new();
        let handler = ctx.resolve_tag(&Ident::unqualified("inst")).unwrap();
        assert_eq!(handler(Value::Int(1)).unwrap(), Value::Int(1));
    }

    #[test]
    fn unregistered_tag_resolves_to_none() {
        let ctx = ReaderContext::new();
        assert!(ctx.resolve_tag(&Ident::unqualified("nope")).is_none());
    }

    #[test]
    fn cloned_contexts_share_the_counter() {
        let ctx = ReaderContext::new();
        let clone = ctx.clone();
        let a = ctx.gensym("p");
        let b = clone.gensym("p");
        assert_ne!(a, b);
    }
}

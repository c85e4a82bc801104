//! Insertion-ordered map, the `Map` collection.
//!
//! Backed by `indexmap::IndexMap` so iteration order matches literal
//! reading order (syntax-quote's `hash-map` expansion depends on this),
//! while `add` reports whether a key was already present so the collection
//! parser can raise `DuplicateKey`.

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;

use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct MapValue(IndexMap<Value, Value>);

impl MapValue {
    pub fn empty() -> Self {
        MapValue(IndexMap::new())
    }

    /// Inserts `key`/`value`; returns `false` if `key` was already present
    /// (and leaves the map unchanged).
    pub fn add(&mut self, key: Value, value: Value) -> bool {
        if self.0.contains_key(&key) {
            return false;
        }
        self.0.insert(key, value);
        true
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Value, Value> {
        self.0.iter()
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.0.get(key)
    }
}

impl PartialEq for MapValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self.0.iter().all(|(k, v)| other.0.get(k) == Some(v))
    }
}

impl Eq for MapValue {}

impl Hash for MapValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent: xor per-entry hashes together.
        let mut acc: u64 = 0;
        for (k, v) in self.0.iter() {
            let mut h = std::collections::hash_map::DefaultHasher::new();
            k.hash(&mut h);
            v.hash(&mut h);
            acc ^= h.finish();
        }
        state.write_u64(acc);
    }
}

impl fmt::Display for MapValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{k} {v}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_reports_duplicate_keys() {
        let mut m = MapValue::empty();
        assert!(m.add(Value::Int(1), Value::Int(2)));
        assert!(!m.add(Value::Int(1), Value::Int(3)));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let mut a = MapValue::empty();
        a.add(Value::Int(1), Value::Int(10));
        a.add(Value::Int(2), Value::Int(20));
        let mut b = MapValue::empty();
        b.add(Value::Int(2), Value::Int(20));
        b.add(Value::Int(1), Value::Int(10));
        assert_eq!(a, b);
    }
}

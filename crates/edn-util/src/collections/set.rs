//! Insertion-ordered set, the `Set` collection, with the same
//! duplicate-detecting `add` contract as [`super::map::MapValue`].

use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexSet;

use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct SetValue(IndexSet<Value>);

impl SetValue {
    pub fn empty() -> Self {
        SetValue(IndexSet::new())
    }

    /// Returns `false` if `elem` was already present.
    pub fn add(&mut self, elem: Value) -> bool {
        self.0.insert(elem)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn contains(&self, v: &Value) -> bool {
        self.0.contains(v)
    }
}

impl PartialEq for SetValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().all(|v| other.0.contains(v))
    }
}

impl Eq for SetValue {}

impl Hash for SetValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut acc: u64 = 0;
        for v in self.0.iter() {
            let mut h = std::collections::hash_map::DefaultHasher::new();
            v.hash(&mut h);
            acc ^= h.finish();
        }
        state.write_u64(acc);
    }
}

impl fmt::Display for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{{")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_reports_duplicate_elements() {
        let mut s = SetValue::empty();
        assert!(s.add(Value::Int(1)));
        assert!(!s.add(Value::Int(1)));
        assert_eq!(s.len(), 1);
    }
}

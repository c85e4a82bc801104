//! `Seq`, the abstract sequence view.
//!
//! `Seq` is purely an internal, intermediate collection used while expanding
//! `concat` during syntax-quote — it is never the final shape of a value
//! the reader hands back to its caller (syntax-quote's output is always a
//! `List`-shaped code form). The variant is kept in [`crate::value::Value`]
//! for completeness, but `edn-par`'s syntax-quote engine builds and consumes
//! `SeqValue` purely as scratch space.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct SeqValue(Vec<Value>);

impl SeqValue {
    pub fn empty() -> Self {
        SeqValue(Vec::new())
    }

    pub fn from_vec(items: Vec<Value>) -> Self {
        SeqValue(items)
    }

    pub fn first(&self) -> Option<&Value> {
        self.0.first()
    }

    pub fn rest(&self) -> SeqValue {
        SeqValue(self.0.iter().skip(1).cloned().collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }
}

impl PartialEq for SeqValue {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SeqValue {}

impl Hash for SeqValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in &self.0 {
            v.hash(state);
        }
    }
}

impl fmt::Display for SeqValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, ")")
    }
}

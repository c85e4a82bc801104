//! Persistent vector, the `Vector` collection, backed by `im`'s RRB tree so
//! `conj` (append) and structural sharing stay cheap even for the long
//! parameter vectors `#(...)` and syntax-quote can synthesize.

use std::fmt;
use std::hash::{Hash, Hasher};

use im::Vector as ImVector;

use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct VectorValue(ImVector<Value>);

impl VectorValue {
    pub fn empty() -> Self {
        VectorValue(ImVector::new())
    }

    pub fn push_back(&self, v: Value) -> Self {
        let mut new = self.0.clone();
        new.push_back(v);
        VectorValue(new)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> im::vector::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn get(&self, i: usize) -> Option<&Value> {
        self.0.get(i)
    }

    pub fn from_vec(items: Vec<Value>) -> Self {
        VectorValue(items.into_iter().collect())
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.0.iter().cloned().collect()
    }
}

impl PartialEq for VectorValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl Eq for VectorValue {}

impl Hash for VectorValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in self.0.iter() {
            v.hash(state);
        }
    }
}

impl fmt::Display for VectorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

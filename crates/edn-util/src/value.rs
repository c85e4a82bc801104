//! The reader's value model: a tagged union over every syntactic value kind,
//! plus the numeric cross-kind equality rules macro-dispatch and
//! collection-literal uniqueness checking depend on.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;

use crate::collections::{ListValue, MapValue, SeqValue, SetValue, VectorValue};

/// An identifier: `Symbol` (`foo`, `foo/bar`) or `Keyword` (`:foo`,
/// `:foo/bar`). The two share a representation; which one a token became is
/// recorded by the enclosing [`Value`] variant, not by this type, mirroring
/// how the leading `:` is purely a lexical marker rather than part of the
/// keyword's identity once read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub namespace: Option<Rc<str>>,
    pub name: Rc<str>,
}

impl Ident {
    pub fn new(namespace: Option<&str>, name: &str) -> Self {
        Ident { namespace: namespace.map(Into::into), name: name.into() }
    }

    pub fn unqualified(name: &str) -> Self {
        Ident { namespace: None, name: name.into() }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{ns}/{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The tagged union of every value the reader can produce.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Char(char),
    Int(i64),
    BigInt(BigInt),
    Double(f64),
    BigFloat(BigDecimal),
    Ratio(BigRational),
    String(Rc<str>),
    Regex(Rc<str>),
    Symbol(Ident),
    Keyword(Ident),
    List(ListValue),
    Vector(VectorValue),
    Map(MapValue),
    Set(SetValue),
    Seq(SeqValue),
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Whether this value evaluates to itself under syntax-quote: nil,
    /// booleans, every numeric kind, characters, keywords, strings, and the
    /// empty list.
    pub fn is_self_evaluating(&self) -> bool {
        match self {
            Value::Nil
            | Value::Bool(_)
            | Value::Char(_)
            | Value::Int(_)
            | Value::BigInt(_)
            | Value::Double(_)
            | Value::BigFloat(_)
            | Value::Ratio(_)
            | Value::Keyword(_)
            | Value::String(_) => true,
            Value::List(l) => l.is_empty(),
            _ => false,
        }
    }

    fn numeric_rank(&self) -> Option<u8> {
        match self {
            Value::Int(_) | Value::BigInt(_) | Value::Ratio(_) => Some(0),
            Value::Double(_) | Value::BigFloat(_) => Some(1),
            _ => None,
        }
    }

    fn as_exact_ratio(&self) -> Option<BigRational> {
        match self {
            Value::Int(i) => Some(BigRational::from_integer(BigInt::from(*i))),
            Value::BigInt(b) => Some(BigRational::from_integer(b.clone())),
            Value::Ratio(r) => Some(r.clone()),
            _ => None,
        }
    }

    fn as_inexact_decimal(&self) -> Option<BigDecimal> {
        match self {
            Value::Double(d) => BigDecimal::try_from(*d).ok(),
            Value::BigFloat(b) => Some(b.clone()),
            _ => None,
        }
    }
}

/// Structural equality, with numeric kinds compared cross-kind by widening
/// the narrower operand, but never across the exact/inexact boundary (`1`
/// and `1.0` are not equal).
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self.numeric_rank(), other.numeric_rank()) {
            (Some(0), Some(0)) => return self.as_exact_ratio() == other.as_exact_ratio(),
            (Some(1), Some(1)) => return self.as_inexact_decimal() == other.as_inexact_decimal(),
            (Some(_), Some(_)) => return false,
            _ => {}
        }
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Regex(a), Value::Regex(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Keyword(a), Value::Keyword(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Vector(a), Value::Vector(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.numeric_rank() {
            Some(0) => {
                state.write_u8(0);
                self.as_exact_ratio().unwrap().hash(state);
                return;
            }
            Some(1) => {
                state.write_u8(1);
                // BigDecimal's Hash impl normalizes scale, so 1.0 and 1.00
                // hash identically iff they compare equal.
                self.as_inexact_decimal().unwrap().hash(state);
                return;
            }
            None => {}
        }
        match self {
            Value::Nil => state.write_u8(2),
            Value::Bool(b) => {
                state.write_u8(3);
                b.hash(state);
            }
            Value::Char(c) => {
                state.write_u8(4);
                c.hash(state);
            }
            Value::String(s) => {
                state.write_u8(5);
                s.hash(state);
            }
            Value::Regex(s) => {
                state.write_u8(6);
                s.hash(state);
            }
            Value::Symbol(s) => {
                state.write_u8(7);
                s.hash(state);
            }
            Value::Keyword(s) => {
                state.write_u8(8);
                s.hash(state);
            }
            Value::List(l) => {
                state.write_u8(9);
                l.hash(state);
            }
            Value::Vector(v) => {
                state.write_u8(10);
                v.hash(state);
            }
            Value::Map(_) | Value::Set(_) | Value::Seq(_) => {
                // Maps/sets/seqs are valid map keys in EDN but the reader
                // never needs to hash one (they cannot recur as a *key of
                // themselves* in the collections this crate builds); fall
                // back to a fixed discriminant so Hash stays total.
                state.write_u8(11);
            }
            _ => unreachable!("numeric kinds handled above"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::print::write_value(f, self, false)
    }
}

pub fn double_to_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Double(d) => Some(*d),
        Value::Int(i) => Some(*i as f64),
        Value::BigInt(b) => b.to_f64(),
        Value::Ratio(r) => r.to_f64(),
        Value::BigFloat(b) => b.to_string().parse().ok(),
        _ => None,
    }
}

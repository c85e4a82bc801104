//! The syntax-quote engine: recursive template expansion of a `` `form ``
//! into `concat`/`seq`/`list`/`vector`/`hash-map`/`hash-set`/`apply` forms,
//! with auto-gensym hygiene for symbols ending in `#`.
//!
//! Works purely over [`Value`] — by the time a form reaches here its
//! children have already lost their individual positions (collections hold
//! `Value`, not `Positioned<Value>`); only the operand of the triggering
//! `` ` `` itself carries a position, which `crate::reader` forwards onto
//! the whole expansion.

use std::collections::HashMap;

use edn_util::error::ReadErrorKind;
use edn_util::{Ident, Value};

use crate::registry::ReaderContext;

/// Per-syntax-quote environment mapping an auto-gensym symbol's original
/// text to the gensym minted for it; fresh at every top-level `` ` ``,
/// threaded through the recursion, discarded on return.
struct Env {
    gensyms: HashMap<String, Ident>,
}

/// Expands `form` — the operand of a `` ` `` — into its template form.
pub fn expand(ctx: &ReaderContext, form: &Value) -> Result<Value, ReadErrorKind> {
    let mut env = Env { gensyms: HashMap::new() };
    expand_form(ctx, &mut env, form)
}

fn expand_form(ctx: &ReaderContext, env: &mut Env, v: &Value) -> Result<Value, ReadErrorKind> {
    if v.is_self_evaluating() {
        return Ok(v.clone());
    }
    if let Value::Symbol(ident) = v {
        return Ok(expand_symbol(ctx, env, ident));
    }
    if let Some(e) = as_tagged_unary(v, "unquote") {
        return Ok(e);
    }
    if as_tagged_unary(v, "unquote-splicing").is_some() {
        return Err(ReadErrorKind::SpliceNotInList);
    }
    match v {
        Value::List(l) => {
            let args = expand_sequence(ctx, env, &l.to_vec())?;
            Ok(seq_concat_form(args))
        }
        Value::Vector(vec) => {
            let args = expand_sequence(ctx, env, &vec.to_vec())?;
            Ok(apply_ctor_form("vector", args))
        }
        Value::Set(set) => {
            let items: Vec<Value> = set.iter().cloned().collect();
            let args = expand_sequence(ctx, env, &items)?;
            Ok(apply_ctor_form("hash-set", args))
        }
        Value::Map(map) => {
            let mut items = Vec::new();
            for (k, val) in map.iter() {
                items.push(k.clone());
                items.push(val.clone());
            }
            let args = expand_sequence(ctx, env, &items)?;
            Ok(apply_ctor_form("hash-map", args))
        }
        other => Ok(other.clone()),
    }
}

/// Rewrites a symbol: an auto-gensym symbol ending in `#` consistently maps
/// to one freshly minted gensym per syntax-quote environment; any other
/// symbol is simply quoted.
fn expand_symbol(ctx: &ReaderContext, env: &mut Env, ident: &Ident) -> Value {
    if ident.namespace.is_none() && ident.name.ends_with('#') {
        let prefix = ident.name[..ident.name.len() - 1].to_string();
        let gensym = env
            .gensyms
            .entry(ident.name.to_string())
            .or_insert_with(|| ctx.gensym(&prefix))
            .clone();
        quote_call(Value::Symbol(gensym))
    } else {
        quote_call(Value::Symbol(ident.clone()))
    }
}

/// Expands each child of a collection into the argument list `concat` will
/// receive: a splicing child contributes its unquoted expression directly,
/// everything else is wrapped `(list <expansion>)`.
fn expand_sequence(ctx: &ReaderContext, env: &mut Env, items: &[Value]) -> Result<Vec<Value>, ReadErrorKind> {
    let mut args = Vec::with_capacity(items.len());
    for item in items {
        if let Some(e) = as_tagged_unary(item, "unquote-splicing") {
            args.push(e);
        } else {
            let expanded = expand_form(ctx, env, item)?;
            args.push(list_call(vec![expanded]));
        }
    }
    Ok(args)
}

/// Matches `(tag e)` — a two-element list headed by the unqualified symbol
/// `tag` — returning `e` if it matches.
fn as_tagged_unary(v: &Value, tag: &str) -> Option<Value> {
    let Value::List(l) = v else { return None };
    let items = l.to_vec();
    if items.len() != 2 {
        return None;
    }
    match &items[0] {
        Value::Symbol(s) if s.namespace.is_none() && s.name.as_ref() == tag => Some(items[1].clone()),
        _ => None,
    }
}

fn call(head: &str, args: Vec<Value>) -> Value {
    let mut items = vec![Value::Symbol(Ident::unqualified(head))];
    items.extend(args);
    Value::List(edn_util::ListValue::from_vec(items))
}

fn quote_call(v: Value) -> Value {
    call("quote", vec![v])
}

fn list_call(args: Vec<Value>) -> Value {
    call("list", args)
}

fn seq_concat_form(args: Vec<Value>) -> Value {
    call("seq", vec![call("concat", args)])
}

fn apply_ctor_form(ctor: &str, args: Vec<Value>) -> Value {
    call("apply", vec![Value::Symbol(Ident::unqualified(ctor)), seq_concat_form(args)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use edn_util::collections::{ListValue, VectorValue};

    fn sym(name: &str) -> Value {
        Value::Symbol(Ident::unqualified(name))
    }

    fn list(items: Vec<Value>) -> Value {
        Value::List(ListValue::from_vec(items))
    }

    #[test]
    fn self_evaluating_values_pass_through() {
        let ctx = ReaderContext::new();
        assert_eq!(expand(&ctx, &Value::Int(1)).unwrap(), Value::Int(1));
        assert_eq!(expand(&ctx, &Value::Nil).unwrap(), Value::Nil);
    }

    #[test]
    fn plain_symbol_is_quoted() {
        let ctx = ReaderContext::new();
        assert_eq!(expand(&ctx, &sym("a")).unwrap(), quote_call(sym("a")));
    }

    #[test]
    fn unquote_yields_operand_verbatim() {
        let ctx = ReaderContext::new();
        let form = list(vec![sym("unquote"), sym("b")]);
        assert_eq!(expand(&ctx, &form).unwrap(), sym("b"));
    }

    #[test]
    fn top_level_splice_is_an_error() {
        let ctx = ReaderContext::new();
        let form = list(vec![sym("unquote-splicing"), sym("c")]);
        assert_eq!(expand(&ctx, &form), Err(ReadErrorKind::SpliceNotInList));
    }

    #[test]
    fn list_template_splices_and_quotes_its_children() {
        // `(a ~b ~@c d)
        let ctx = ReaderContext::new();
        let form = list(vec![
            sym("a"),
            list(vec![sym("unquote"), sym("b")]),
            list(vec![sym("unquote-splicing"), sym("c")]),
            sym("d"),
        ]);
        let expected = call("seq", vec![call("concat", vec![
            list_call(vec![quote_call(sym("a"))]),
            list_call(vec![sym("b")]),
            sym("c"),
            list_call(vec![quote_call(sym("d"))]),
        ])]);
        assert_eq!(expand(&ctx, &form).unwrap(), expected);
    }

    #[test]
    fn vector_template_uses_apply_vector() {
        let ctx = ReaderContext::new();
        let form = Value::Vector(VectorValue::from_vec(vec![sym("a")]));
        let expanded = expand(&ctx, &form).unwrap();
        match expanded {
            Value::List(l) => {
                let items = l.to_vec();
                assert_eq!(items[0], sym("apply"));
                assert_eq!(items[1], sym("vector"));
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn auto_gensym_is_consistent_within_one_syntax_quote() {
        let ctx = ReaderContext::new();
        let form = list(vec![sym("x#"), sym("x#")]);
        let expanded = expand(&ctx, &form).unwrap();
        let Value::List(outer) = expanded else { panic!() };
        let args = outer.to_vec();
        // args[0] is `(concat (list (quote G)) (list (quote G)))`
        let Value::List(concat_call) = &args[1] else { panic!() };
        let concat_args = concat_call.to_vec();
        assert_eq!(concat_args[1], concat_args[2]);
    }

    #[test]
    fn auto_gensym_is_fresh_across_separate_syntax_quotes() {
        let ctx = ReaderContext::new();
        let a = expand(&ctx, &sym("x#")).unwrap();
        let b = expand(&ctx, &sym("x#")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_list_is_self_evaluating() {
        let ctx = ReaderContext::new();
        let empty = Value::List(ListValue::empty());
        assert_eq!(expand(&ctx, &empty).unwrap(), empty);
    }
}

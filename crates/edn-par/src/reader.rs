//! The recursive-descent reader: turns the [`Token`] stream `edn-lex`'s
//! `Scanner` produces into [`Value`] forms, expanding every reader macro
//! along the way.
//!
//! Drives a `Scanner` through one `read_*` method per collection/macro,
//! dispatched from a single `match` in [`Reader::dispatch`].

use edn_util::collections::{ListValue, MapValue, SetValue, VectorValue};
use edn_util::error::{ReadError, ReadErrorKind, ReadResult};
use edn_util::{Ident, Position, Positioned, Value};

use edn_lex::{Scanner, Token};

use crate::anon_fn::AnonFnArgs;
use crate::macros::normalize_metadata;
use crate::registry::ReaderContext;
use crate::syntax_quote;

/// Reads forms out of one character source, sharing `ctx` across calls so
/// gensyms stay process-unique and tag registrations persist.
pub struct Reader<'a> {
    scanner: Scanner<'a>,
    ctx: ReaderContext,
    origin: String,
    /// `Some` only while reading the body of an enclosing `#(...)`;
    /// `None` everywhere else, including between top-level forms.
    anon_fn: Option<AnonFnArgs>,
}

impl<'a> Reader<'a> {
    pub fn new(source: &'a str, origin: impl Into<String>, ctx: ReaderContext) -> Self {
        Reader { scanner: Scanner::new(source), ctx, origin: origin.into(), anon_fn: None }
    }

    /// Reads the next top-level form, or `None` at end of input. An
    /// error mid-form is still an `Err`, never folded into `None`.
    pub fn try_read(&mut self) -> ReadResult<Option<Positioned<Value>>> {
        match self.next_form_token()? {
            Some((pos, tok)) => Ok(Some(self.dispatch(pos, tok)?)),
            None => Ok(None),
        }
    }

    /// Like [`Self::try_read`], but end of input is itself an error —
    /// for callers that know another form must be present (e.g. reading
    /// the operand of a reader macro).
    pub fn read(&mut self) -> ReadResult<Positioned<Value>> {
        self.try_read()?.ok_or_else(|| self.err_here(ReadErrorKind::UnexpectedEof))
    }

    fn err_here(&self, kind: ReadErrorKind) -> ReadError {
        ReadError::new(self.origin.clone(), self.scanner.position(), kind)
    }

    fn err_at(&self, pos: Position, kind: ReadErrorKind) -> ReadError {
        ReadError::new(self.origin.clone(), pos, kind)
    }

    fn next_token(&mut self) -> ReadResult<(Position, Token)> {
        let (pos, result) = self.scanner.next_token();
        result.map(|tok| (pos, tok)).map_err(|kind| self.err_here(kind))
    }

    /// The next token that is actually a form to dispatch on: `#_` is
    /// handled here, not in [`Self::dispatch`], since it can precede any
    /// number of further `#_`s before the form that finally counts. `#_`
    /// discards exactly the one form immediately following it, and is
    /// recursive only through that nesting, e.g. `#_ #_ x y z` discards `x`
    /// and `y`, leaving `z`.
    fn next_form_token(&mut self) -> ReadResult<Option<(Position, Token)>> {
        loop {
            let (pos, tok) = self.next_token()?;
            if tok == Token::Eof {
                return Ok(None);
            }
            if tok == Token::Discard {
                self.read()?;
                continue;
            }
            return Ok(Some((pos, tok)));
        }
    }

    /// Reads exactly one full form, used wherever a reader macro needs its
    /// operand rather than a whole new top-level read.
    fn read_value(&mut self) -> ReadResult<Positioned<Value>> {
        self.read()
    }

    fn dispatch(&mut self, pos: Position, tok: Token) -> ReadResult<Positioned<Value>> {
        match tok {
            Token::Atom(v) => self.dispatch_atom(pos, v),

            Token::LParen => self.read_list(pos),
            Token::LBracket => self.read_vector(pos),
            Token::LBrace => self.read_map(pos),
            Token::SetOpen => self.read_set(pos),
            Token::AnonFnOpen => self.read_anon_fn(pos),

            Token::Quote => {
                let operand = self.read_value()?;
                Ok(operand.derive(wrap1("quote", operand.value.clone())))
            }
            Token::Deref => {
                let operand = self.read_value()?;
                Ok(operand.derive(wrap1("deref", operand.value.clone())))
            }
            Token::Unquote => {
                let operand = self.read_value()?;
                Ok(operand.derive(wrap1("unquote", operand.value.clone())))
            }
            Token::UnquoteSplicing => {
                let operand = self.read_value()?;
                Ok(operand.derive(wrap1("unquote-splicing", operand.value.clone())))
            }
            Token::VarQuote => {
                let operand = self.read_value()?;
                Ok(operand.derive(wrap1("var", operand.value.clone())))
            }
            Token::SyntaxQuote => {
                let operand = self.read_value()?;
                let expanded = syntax_quote::expand(&self.ctx, &operand.value)
                    .map_err(|kind| self.err_at(operand.pos, kind))?;
                Ok(operand.derive(expanded))
            }
            Token::Meta => {
                let meta_form = self.read_value()?;
                let normalized = normalize_metadata(meta_form.value.clone())
                    .map_err(|kind| self.err_at(meta_form.pos, kind))?;
                let target = self.read_value()?;
                Ok(target.derive(wrap2("with-meta", target.value.clone(), normalized)))
            }

            Token::Tag(tag) => self.read_tagged(pos, tag),

            Token::Discard => unreachable!("consumed by next_form_token"),

            Token::RParen => Err(self.err_at(pos, ReadErrorKind::UnexpectedChar(')'))),
            Token::RBracket => Err(self.err_at(pos, ReadErrorKind::UnexpectedChar(']'))),
            Token::RBrace => Err(self.err_at(pos, ReadErrorKind::UnexpectedChar('}'))),
            Token::Eof => Err(self.err_at(pos, ReadErrorKind::UnexpectedEof)),
        }
    }

    /// Substitutes `%`/`%N`/`%&` for their registered parameter gensym while
    /// inside an active `#(...)`; every other atom passes through.
    fn dispatch_atom(&mut self, pos: Position, v: Value) -> ReadResult<Positioned<Value>> {
        if let Value::Symbol(ident) = &v {
            if self.anon_fn.is_some() && ident.namespace.is_none() && ident.name.starts_with('%') {
                let ctx = self.ctx.clone();
                let name = ident.name.clone();
                let state = self.anon_fn.as_mut().expect("checked above");
                let replaced = resolve_arg_symbol(state, &ctx, &name)
                    .ok_or_else(|| self.err_at(pos, ReadErrorKind::BadArgLiteral))?;
                return Ok(Positioned::new(pos, Value::Symbol(replaced)));
            }
        }
        Ok(Positioned::new(pos, v))
    }

    fn read_list(&mut self, pos: Position) -> ReadResult<Positioned<Value>> {
        let mut items = Vec::new();
        loop {
            match self.next_form_token()? {
                None => return Err(self.err_here(ReadErrorKind::UnexpectedEof)),
                Some((_, Token::RParen)) => break,
                Some((p, tok)) => items.push(self.dispatch(p, tok)?.value),
            }
        }
        Ok(Positioned::new(pos, Value::List(ListValue::from_vec(items))))
    }

    fn read_vector(&mut self, pos: Position) -> ReadResult<Positioned<Value>> {
        let mut items = VectorValue::empty();
        loop {
            match self.next_form_token()? {
                None => return Err(self.err_here(ReadErrorKind::UnexpectedEof)),
                Some((_, Token::RBracket)) => break,
                Some((p, tok)) => items = items.push_back(self.dispatch(p, tok)?.value),
            }
        }
        Ok(Positioned::new(pos, Value::Vector(items)))
    }

    fn read_set(&mut self, pos: Position) -> ReadResult<Positioned<Value>> {
        let mut set = SetValue::empty();
        loop {
            match self.next_form_token()? {
                None => return Err(self.err_here(ReadErrorKind::UnexpectedEof)),
                Some((_, Token::RBrace)) => break,
                Some((p, tok)) => {
                    let elem = self.dispatch(p, tok)?;
                    if !set.add(elem.value.clone()) {
                        return Err(self.err_at(
                            elem.pos,
                            ReadErrorKind::DuplicateKey { kind: "set", printed: elem.value.to_string() },
                        ));
                    }
                }
            }
        }
        Ok(Positioned::new(pos, Value::Set(set)))
    }

    fn read_map(&mut self, pos: Position) -> ReadResult<Positioned<Value>> {
        let mut map = MapValue::empty();
        loop {
            let key = match self.next_form_token()? {
                None => return Err(self.err_here(ReadErrorKind::UnexpectedEof)),
                Some((_, Token::RBrace)) => break,
                Some((p, tok)) => self.dispatch(p, tok)?,
            };
            let value = match self.next_form_token()? {
                None => return Err(self.err_here(ReadErrorKind::UnexpectedEof)),
                Some((_, Token::RBrace)) => return Err(self.err_at(key.pos, ReadErrorKind::UnexpectedChar('}'))),
                Some((p, tok)) => self.dispatch(p, tok)?,
            };
            if !map.add(key.value.clone(), value.value) {
                return Err(self.err_at(
                    key.pos,
                    ReadErrorKind::DuplicateKey { kind: "map", printed: key.value.to_string() },
                ));
            }
        }
        Ok(Positioned::new(pos, Value::Map(map)))
    }

    /// `#(...)`: the opening `(` is already consumed by the `AnonFnOpen`
    /// token, so its body is read exactly like [`Self::read_list`] would
    /// continue after its own `LParen`. Nesting is rejected outright since
    /// there is no sensible meaning for a `%` inside a nested `#(...)`.
    fn read_anon_fn(&mut self, pos: Position) -> ReadResult<Positioned<Value>> {
        if self.anon_fn.is_some() {
            return Err(self.err_at(pos, ReadErrorKind::NestedAnonFn));
        }
        self.anon_fn = Some(AnonFnArgs::new());
        let body = self.read_list(pos);
        let state = self.anon_fn.take().expect("installed above");
        let body = body?;

        let params: Vec<Value> = state.build_params(&self.ctx).into_iter().map(Value::Symbol).collect();
        let param_vec = Value::Vector(VectorValue::from_vec(params));
        Ok(body.derive(Value::List(ListValue::from_vec(vec![
            Value::Symbol(Ident::unqualified("fn")),
            param_vec,
            body.value.clone(),
        ]))))
    }

    /// `#tag form`: resolves `tag` in the shared registry and hands it the
    /// already-read operand.
    fn read_tagged(&mut self, pos: Position, tag: Ident) -> ReadResult<Positioned<Value>> {
        let operand = self.read_value()?;
        match self.ctx.resolve_tag(&tag) {
            Some(handler) => {
                let value = handler(operand.value.clone()).map_err(|kind| self.err_at(operand.pos, kind))?;
                Ok(Positioned::new(pos, value))
            }
            None => Err(self.err_at(pos, ReadErrorKind::UnknownTag(tag.to_string()))),
        }
    }
}

fn wrap1(head: &str, a: Value) -> Value {
    Value::List(ListValue::from_vec(vec![Value::Symbol(Ident::unqualified(head)), a]))
}

fn wrap2(head: &str, a: Value, b: Value) -> Value {
    Value::List(ListValue::from_vec(vec![Value::Symbol(Ident::unqualified(head)), a, b]))
}

/// Resolves a `%`/`%N`/`%&` symbol name against the active `#(...)`'s slot
/// map, minting a gensym on first use; `None` for any other shape (an arg
/// literal must be `%`, `%&`, or `%<integer>`).
fn resolve_arg_symbol(state: &mut AnonFnArgs, ctx: &ReaderContext, name: &str) -> Option<Ident> {
    if name == "%" {
        return Some(state.positional(ctx, 1));
    }
    if name == "%&" {
        return Some(state.rest(ctx));
    }
    let n: u32 = name.strip_prefix('%')?.parse().ok()?;
    if n == 0 {
        return None;
    }
    Some(state.positional(ctx, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_one(src: &str) -> Value {
        let ctx = ReaderContext::new();
        let mut r = Reader::new(src, "<test>", ctx);
        r.read().unwrap().value
    }

    fn try_read_one(src: &str) -> ReadResult<Option<Value>> {
        let ctx = ReaderContext::new();
        let mut r = Reader::new(src, "<test>", ctx);
        Ok(r.try_read()?.map(|p| p.value))
    }

    #[test]
    fn reads_plain_atoms() {
        assert_eq!(read_one("42"), Value::Int(42));
        assert_eq!(read_one(":kw"), Value::Keyword(Ident::unqualified("kw")));
    }

    #[test]
    fn eof_yields_none_from_try_read() {
        assert_eq!(try_read_one("   ; just a comment\n").unwrap(), None);
    }

    #[test]
    fn reads_nested_collections() {
        let v = read_one("[1 {:a 2} #{3}]");
        let Value::Vector(vec) = v else { panic!() };
        assert_eq!(vec.len(), 3);
    }

    #[test]
    fn duplicate_map_key_is_an_error() {
        let ctx = ReaderContext::new();
        let mut r = Reader::new("{:a 1 :a 2}", "<test>", ctx);
        let err = r.read().unwrap_err();
        assert_eq!(err.kind, ReadErrorKind::DuplicateKey { kind: "map", printed: ":a".into() });
    }

    #[test]
    fn duplicate_set_element_is_an_error() {
        let ctx = ReaderContext::new();
        let mut r = Reader::new("#{1 1}", "<test>", ctx);
        let err = r.read().unwrap_err();
        assert_eq!(err.kind, ReadErrorKind::DuplicateKey { kind: "set", printed: "1".into() });
    }

    #[test]
    fn quote_reads_as_quote_form() {
        assert_eq!(read_one("'a"), Value::List(ListValue::from_vec(vec![
            Value::Symbol(Ident::unqualified("quote")),
            Value::Symbol(Ident::unqualified("a")),
        ])));
    }

    #[test]
    fn discard_drops_exactly_one_following_form() {
        assert_eq!(read_one("#_1 2"), Value::Int(2));
    }

    #[test]
    fn chained_discard_drops_two_forms() {
        assert_eq!(read_one("#_ #_ 1 2 3"), Value::Int(3));
    }

    #[test]
    fn metadata_on_symbol_string_shorthand() {
        let v = read_one("^String x");
        let Value::List(l) = v else { panic!() };
        let items = l.to_vec();
        assert_eq!(items[0], Value::Symbol(Ident::unqualified("with-meta")));
        assert_eq!(items[1], Value::Symbol(Ident::unqualified("x")));
        let Value::Map(m) = &items[2] else { panic!() };
        assert_eq!(
            m.get(&Value::Keyword(Ident::unqualified("tag"))),
            Some(&Value::Symbol(Ident::unqualified("String")))
        );
    }

    #[test]
    fn anon_fn_desugars_to_fn_with_positional_params() {
        let v = read_one("#(+ % %2)");
        let Value::List(l) = v else { panic!() };
        let items = l.to_vec();
        assert_eq!(items[0], Value::Symbol(Ident::unqualified("fn")));
        let Value::Vector(params) = &items[1] else { panic!() };
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn nested_anon_fn_is_rejected() {
        let ctx = ReaderContext::new();
        let mut r = Reader::new("#(+ % #(* %1 %2))", "<test>", ctx);
        let err = r.read().unwrap_err();
        assert_eq!(err.kind, ReadErrorKind::NestedAnonFn);
    }

    #[test]
    fn bad_arg_literal_is_an_error() {
        let ctx = ReaderContext::new();
        let mut r = Reader::new("#(foo %bar)", "<test>", ctx);
        let err = r.read().unwrap_err();
        assert_eq!(err.kind, ReadErrorKind::BadArgLiteral);
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let ctx = ReaderContext::new();
        let mut r = Reader::new("#my/tag 1", "<test>", ctx);
        let err = r.read().unwrap_err();
        assert_eq!(err.kind, ReadErrorKind::UnknownTag("my/tag".into()));
    }

    #[test]
    fn registered_tag_invokes_handler() {
        let ctx = ReaderContext::new();
        ctx.register_tag(
            Ident::unqualified("double"),
            std::sync::Arc::new(|v| match v {
                Value::Int(n) => Ok(Value::Int(n * 2)),
                other => Ok(other),
            }),
        );
        let mut r = Reader::new("#double 21", "<test>", ctx);
        assert_eq!(r.read().unwrap().value, Value::Int(42));
    }

    #[test]
    fn syntax_quote_expands_through_the_reader() {
        let v = read_one("`(a ~b)");
        // Just confirm it routes through syntax_quote rather than quoting literally.
        assert_ne!(v, Value::List(ListValue::from_vec(vec![
            Value::Symbol(Ident::unqualified("quote")),
            Value::List(ListValue::from_vec(vec![
                Value::Symbol(Ident::unqualified("a")),
                Value::List(ListValue::from_vec(vec![
                    Value::Symbol(Ident::unqualified("unquote")),
                    Value::Symbol(Ident::unqualified("b")),
                ])),
            ])),
        ])));
    }

    #[test]
    fn quote_expansion_carries_the_operands_position_forward() {
        // A macro expansion's position is the operand's, not the macro
        // character's — `'a` reports where `a` starts, not `'`.
        let ctx = ReaderContext::new();
        let mut r = Reader::new("  'a", "<test>", ctx);
        let p = r.read().unwrap();
        assert_eq!(p.pos, Position::new(1, 3));
    }

    // ------------------------------------------------------------------------
    // PROPERTY-BASED TESTS
    // ------------------------------------------------------------------------

    #[test]
    fn property_arbitrary_plain_symbols_round_trip_through_the_reader() {
        use proptest::prelude::*;

        proptest!(|(name in "[a-zA-Z][a-zA-Z0-9*+!?-]{0,30}")| {
            // `nil`/`true`/`false` short-circuit to non-Symbol values.
            prop_assume!(!matches!(name.as_str(), "nil" | "true" | "false"));
            let v = read_one(&name);
            prop_assert_eq!(v, Value::Symbol(Ident::unqualified(&name)));
        });
    }

    #[test]
    fn property_distinct_int_keyed_maps_never_report_a_duplicate() {
        use proptest::prelude::*;

        proptest!(|(values in prop::collection::hash_set(0i64..1000, 1..10))| {
            let mut src = String::from("{");
            for v in &values {
                src.push_str(&format!(":k{v} {v} "));
            }
            src.push('}');
            let ctx = ReaderContext::new();
            let mut r = Reader::new(&src, "<test>", ctx);
            prop_assert!(r.read().is_ok());
        });
    }
}

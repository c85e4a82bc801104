//! Anonymous-function argument collection: the per-`#(...)` state a
//! [`crate::reader::Reader`] installs while reading the body, plus the
//! final parameter-vector synthesis.

use std::collections::HashMap;

use edn_util::Ident;

use crate::registry::ReaderContext;

/// The key `%&`'s rest-argument registers under.
const REST_KEY: i64 = -1;

/// Active only for the duration of one `#(...)` body: collects which
/// `%`/`%N`/`%&` slots were used and the gensym minted for each.
#[derive(Default)]
pub struct AnonFnArgs {
    slots: HashMap<i64, Ident>,
}

impl AnonFnArgs {
    pub fn new() -> Self {
        AnonFnArgs::default()
    }

    /// Registers (or returns the existing) gensym for positional arg `n`
    /// (`n >= 1`), minting `"p__<id>#"` on first encounter.
    pub fn positional(&mut self, ctx: &ReaderContext, n: u32) -> Ident {
        self.slots.entry(n as i64).or_insert_with(|| ctx.gensym("p")).clone()
    }

    /// Registers (or returns the existing) gensym for the `%&` rest arg.
    pub fn rest(&mut self, ctx: &ReaderContext) -> Ident {
        self.slots.entry(REST_KEY).or_insert_with(|| ctx.gensym("p")).clone()
    }

    fn max_positional(&self) -> u32 {
        self.slots.keys().filter(|&&k| k >= 1).copied().max().unwrap_or(0) as u32
    }

    fn has_rest(&self) -> bool {
        self.slots.contains_key(&REST_KEY)
    }

    /// Drains the collected slots into the final parameter vector: every
    /// slot from 1 through the observed maximum, in order (synthesizing a
    /// fresh placeholder gensym for any that was never referenced in the
    /// body), followed by `& <rest>` if `%&` was used.
    ///
    /// The slot *at* the observed maximum is always included, not just
    /// those strictly below it, so `#(vector %1 %3)` still synthesizes a
    /// placeholder for `%2`.
    pub fn build_params(mut self, ctx: &ReaderContext) -> Vec<Ident> {
        let max = self.max_positional();
        let mut params = Vec::with_capacity(max as usize + 2);
        for n in 1..=max {
            params.push(self.positional(ctx, n));
        }
        if self.has_rest() {
            params.push(Ident::unqualified("&"));
            params.push(self.rest(ctx));
        }
        params
    }
}

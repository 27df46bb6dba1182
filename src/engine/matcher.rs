/*!
 * The compiled, callable result of binding a combinator to rule content,
 * and the outcome protocol every behavior must satisfy.
 */

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::engine::block::Alternative;
use crate::engine::state::{LoopId, ParseState, Pos};
use crate::engine::table::{CombinatorDef, Param};
use crate::error::EngineError;
use crate::value::Value;

/// What a successful match synthesized.
#[derive(Clone, PartialEq, Debug)]
pub enum Synthesized {
    Value(Value),
    /// An explicit null result: a legitimate match product, distinct from a
    /// failed match.
    Null,
    /// The step contributed nothing observable (comments, elision).
    Invisible,
}

impl Synthesized {
    pub fn is_invisible(&self) -> bool {
        matches!(self, Synthesized::Invisible)
    }

    /// The synthesized result as a plain value, for handing to host code.
    pub fn into_value(self) -> Value {
        match self {
            Synthesized::Value(v) => v,
            Synthesized::Null | Synthesized::Invisible => Value::None,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum Outcome {
    NoMatch,
    Match(Synthesized, Pos),
}

/// Non-`Ok` control leaving a matcher: a structural error, an iteration
/// abandonment on its way to the owning loop combinator, or a host escape
/// that aborts the whole invocation.
#[derive(Debug)]
pub enum Signal {
    Error(EngineError),
    Break { scope: LoopId },
    Escape(Value),
}

impl From<EngineError> for Signal {
    fn from(err: EngineError) -> Self {
        Signal::Error(err)
    }
}

pub type Step = Result<Outcome, Signal>;

/// A bound argument slot, aligned with the definition's formal parameters.
#[derive(Clone, Debug)]
pub enum Arg {
    /// A rule element captured verbatim, or the dispatch-supplied literal.
    Literal(Value),
    /// An endable quoted parameter with nothing left to capture.
    Absent,
    /// A skippable or flag parameter that captured nothing.
    Unbound,
    /// A recursively compiled sub-rule.
    Sub(Matcher),
    /// A block literal's alternatives, compiled at binding time.
    Alternatives(Arc<[Alternative]>),
    /// Reserved slot, available through the invocation itself.
    Reserved,
}

/// A compiled matcher: a combinator definition closed over its bound
/// arguments. Reusable within one driver invocation.
#[derive(Clone, Debug)]
pub struct Matcher {
    def: Arc<CombinatorDef>,
    args: Arc<[Arg]>,
}

impl Matcher {
    pub(crate) fn bound(def: Arc<CombinatorDef>, args: Vec<Arg>) -> Self {
        debug_assert_eq!(def.params.len(), args.len());
        Matcher {
            def,
            args: args.into(),
        }
    }

    pub fn def(&self) -> &CombinatorDef {
        &self.def
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    /// The literal bound at parameter `index`, if one was captured.
    pub fn literal(&self, index: usize) -> Option<&Value> {
        match self.args.get(index) {
            Some(Arg::Literal(v)) => Some(v),
            _ => None,
        }
    }

    /// The sub-rule bound at parameter `index`. Panics if the definition did
    /// not declare one there; that is a combinator authoring bug, not an
    /// input-dependent condition.
    pub fn sub(&self, index: usize) -> &Matcher {
        match self.args.get(index) {
            Some(Arg::Sub(m)) => m,
            _ => panic!(
                "combinator `{}` has no sub-rule bound at parameter {index}",
                self.def.name
            ),
        }
    }

    /// The compiled block alternatives bound at parameter `index`. Panics
    /// like [`sub`](Self::sub) when the definition declares none there.
    pub fn alternatives(&self, index: usize) -> &[Alternative] {
        match self.args.get(index) {
            Some(Arg::Alternatives(alts)) => alts,
            _ => panic!(
                "combinator `{}` has no compiled block bound at parameter {index}",
                self.def.name
            ),
        }
    }

    /// Run the matcher at `pos`, enforcing the uniform outcome contract:
    /// every attempted position feeds the furthest tracker, and accumulation
    /// from a failed attempt is rolled back exactly.
    pub fn run(&self, pos: Pos, state: &mut ParseState<'_>) -> Step {
        state.note_position(pos);
        let mark = state.pending_len();
        let out = (self.def.behavior)(self, pos, state);
        match &out {
            Ok(Outcome::Match(_, end)) => state.note_position(*end),
            Ok(Outcome::NoMatch) => state.truncate_pending(mark),
            Err(_) => {}
        }
        out
    }

    /// Wrap a matcher in the advancement guard: success without strictly
    /// advancing the input position becomes no-match. Quantifiers over
    /// possibly-zero-width sub-rules apply this to guarantee termination.
    pub fn guarded(inner: Matcher) -> Matcher {
        Matcher::bound(guard_def(), vec![Arg::Sub(inner)])
    }
}

fn guard_behavior(m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    match m.sub(0).run(pos, state)? {
        Outcome::Match(_, end) if end <= pos => Ok(Outcome::NoMatch),
        out => Ok(out),
    }
}

static GUARD: Lazy<Arc<CombinatorDef>> = Lazy::new(|| {
    Arc::new(CombinatorDef::new(
        "further",
        vec![Param::sub_rule("rule")],
        Arc::new(guard_behavior),
    ))
});

/// The advancement-guard definition, also registered as the `further`
/// keyword in the standard table.
pub fn guard_def() -> Arc<CombinatorDef> {
    GUARD.clone()
}

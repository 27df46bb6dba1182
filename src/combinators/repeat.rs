//! Iteration combinators. Each registers an exitable scope so that a
//! nested `break` unwinds to the correct enclosing loop, and each stops
//! iterating when an iteration succeeds without advancing the input.

use crate::engine::matcher::{Matcher, Outcome, Signal, Step, Synthesized};
use crate::engine::state::{LoopId, ParseState, Pos};
use crate::error::EngineError;
use crate::value::Value;

fn bad_argument(m: &Matcher, param: &'static str, expected: &str) -> Signal {
    Signal::Error(EngineError::BadArgument {
        combinator: m.def().name.clone(),
        param,
        expected: expected.to_owned(),
    })
}

/// `some rule`: one or more repetitions.
pub(crate) fn some_rule(m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    iterate(m.sub(0), pos, state, 1, i64::MAX)
}

/// `repeat count rule` or `repeat count limit rule`: between `count` and
/// `limit` repetitions (exactly `count` when the optional limit is absent).
pub(crate) fn repeat_rule(m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    let min = match m.literal(0) {
        Some(&Value::Int(n)) => n.max(0),
        _ => return Err(bad_argument(m, "count", "an integer")),
    };
    let max = match m.literal(1) {
        Some(&Value::Int(n)) => n,
        _ => min,
    };
    if max < min {
        return Err(bad_argument(m, "limit", "an upper bound not below the count"));
    }
    iterate(m.sub(2), pos, state, min, max)
}

/// `break`: abandon the innermost iteration, making it succeed with what it
/// matched so far. Propagates as a signal through any intermediate
/// combinators; only the owning loop catches it.
pub(crate) fn break_rule(_m: &Matcher, _pos: Pos, state: &mut ParseState<'_>) -> Step {
    match state.current_loop() {
        Some(scope) => Err(Signal::Break { scope }),
        None => Err(Signal::Error(EngineError::BreakOutsideLoop)),
    }
}

fn iterate(rule: &Matcher, start: Pos, state: &mut ParseState<'_>, min: i64, max: i64) -> Step {
    let scope = state.enter_loop();
    let out = iterate_scoped(rule, start, state, min, max, scope);
    state.exit_loop(scope);
    out
}

fn iterate_scoped(
    rule: &Matcher,
    start: Pos,
    state: &mut ParseState<'_>,
    min: i64,
    max: i64,
    scope: LoopId,
) -> Step {
    let mut pos = start;
    let mut made: i64 = 0;
    let mut synth = Synthesized::Invisible;
    let mut broke = false;

    while made < max {
        let mark = state.pending_len();
        match rule.run(pos, state) {
            Ok(Outcome::Match(s, next)) => {
                made += 1;
                if !s.is_invisible() {
                    synth = s;
                }
                let advanced = next > pos;
                pos = next;
                if !advanced {
                    // Zero-width success: a further round could not make
                    // progress either, so cut the loop here.
                    break;
                }
            }
            Ok(Outcome::NoMatch) => break,
            Err(Signal::Break { scope: target }) if target == scope => {
                state.truncate_pending(mark);
                broke = true;
                break;
            }
            Err(other) => return Err(other),
        }
    }

    if broke || made >= min {
        Ok(Outcome::Match(synth, pos))
    } else {
        Ok(Outcome::NoMatch)
    }
}

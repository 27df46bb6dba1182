//! Gathering combinators over the pending-accumulation side channel.
//! Accumulation appended inside a failed attempt is rolled back by the
//! matcher invocation itself; these two only add and claim entries.

use crate::engine::matcher::{Matcher, Outcome, Step, Synthesized};
use crate::engine::state::{ParseState, Pos};
use crate::value::Value;

/// `collect rule`: claim everything the sub-rule accumulated and synthesize
/// it as a block.
pub(crate) fn collect_rule(m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    let mark = state.pending_len();
    match m.sub(0).run(pos, state)? {
        Outcome::Match(_, end) => {
            let items = state.drain_pending(mark);
            Ok(Outcome::Match(
                Synthesized::Value(Value::block(items)),
                end,
            ))
        }
        Outcome::NoMatch => Ok(Outcome::NoMatch),
    }
}

/// `keep rule`: append the sub-rule's synthesized value to the pending
/// buffer. A null result is kept as an explicit null; an invisible one
/// keeps nothing.
pub(crate) fn keep_rule(m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    match m.sub(0).run(pos, state)? {
        Outcome::Match(synth, end) => {
            match &synth {
                Synthesized::Value(v) => state.push_pending(v.clone()),
                Synthesized::Null => state.push_pending(Value::None),
                Synthesized::Invisible => {}
            }
            Ok(Outcome::Match(synth, end))
        }
        Outcome::NoMatch => Ok(Outcome::NoMatch),
    }
}

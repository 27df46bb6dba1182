//! Combinators dispatched by type tag: block execution, host-evaluated
//! groups, literal matching, the bare-symbol fallback, and the
//! ordinary-callable template.

use crate::engine::block::run_alternatives;
use crate::engine::compile::compile;
use crate::engine::cursor::RuleCursor;
use crate::engine::matcher::{Arg, Matcher, Outcome, Signal, Step, Synthesized};
use crate::engine::state::{ParseState, Pos};
use crate::error::EngineError;
use crate::host::HostExit;
use crate::value::Value;

/// A block's alternatives were compiled when the block literal was bound;
/// running one is pure execution.
pub(crate) fn block_rule(m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    run_alternatives(m.alternatives(0), pos, state)
}

/// Hand a parenthesized group to the host for evaluation. The result is
/// deliberately invisible: a group is a side-effect step, not a match.
pub(crate) fn group_rule(m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    let items = match m.literal(0) {
        Some(Value::Group(items)) => items.clone(),
        _ => panic!("group combinator bound without a group value"),
    };
    let Some(host) = state.host() else {
        return Err(Signal::Error(EngineError::NoHost));
    };
    match host.eval(&items) {
        Ok(_) => Ok(Outcome::Match(Synthesized::Invisible, pos)),
        Err(HostExit::Escape(value)) => Err(Signal::Escape(value)),
    }
}

pub(crate) fn text_rule(m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    let Some(Value::Text(lit)) = m.literal(0) else {
        panic!("text combinator bound without a text value");
    };
    match state.input().match_text(pos, lit, state.is_exact()) {
        Some(end) => Ok(Outcome::Match(
            Synthesized::Value(Value::Text(lit.clone())),
            end,
        )),
        None => Ok(Outcome::NoMatch),
    }
}

pub(crate) fn char_rule(m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    let Some(&Value::Char(lit)) = m.literal(0) else {
        panic!("char combinator bound without a char value");
    };
    match state.input().match_char(pos, lit, state.is_exact()) {
        Some(end) => Ok(Outcome::Match(Synthesized::Value(Value::Char(lit)), end)),
        None => Ok(Outcome::NoMatch),
    }
}

/// `true` matches zero-width; `false` never matches. Useful for rules
/// spliced together from host data.
pub(crate) fn logic_rule(m: &Matcher, pos: Pos, _state: &mut ParseState<'_>) -> Step {
    match m.literal(0) {
        Some(&Value::Logic(true)) => Ok(Outcome::Match(Synthesized::Invisible, pos)),
        Some(&Value::Logic(false)) => Ok(Outcome::NoMatch),
        _ => panic!("logic combinator bound without a logic value"),
    }
}

/// The bare-symbol fallback: a keyword resolved to a plain value matches as
/// if that value had appeared in the rules directly, by re-entering the
/// compiler with a synthetic single-element rule.
pub(crate) fn resolved_word_rule(m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    let value = m
        .literal(0)
        .cloned()
        .unwrap_or_else(|| panic!("word combinator bound without a resolved value"));
    let step = [value];
    let (rule, _) = compile(RuleCursor::new(&step), state).map_err(Signal::Error)?;
    rule.run(pos, state)
}

/// The ordinary-callable template. The compiler specializes its arity at
/// resolution time: one sub-rule argument per declared parameter, run in
/// sequence, with the callable applied to their synthesized results.
pub(crate) fn apply_rule(m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    let func = match m.literal(0) {
        Some(Value::Func(f)) => f.clone(),
        _ => panic!("function combinator bound without a callable"),
    };

    let mut pos = pos;
    let mut argv = Vec::with_capacity(func.arity());
    for arg in m.args().iter().skip(1) {
        let Arg::Sub(rule) = arg else { continue };
        match rule.run(pos, state)? {
            Outcome::Match(synth, next) => {
                argv.push(synth.into_value());
                pos = next;
            }
            Outcome::NoMatch => return Ok(Outcome::NoMatch),
        }
    }

    match func.call(&argv) {
        Ok(value) => Ok(Outcome::Match(Synthesized::Value(value), pos)),
        Err(HostExit::Escape(value)) => Err(Signal::Escape(value)),
    }
}

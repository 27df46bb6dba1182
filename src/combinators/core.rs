//! Single-step keyword combinators: element consumption, lookahead,
//! optionality, verbatim literals, and elision.

use crate::engine::matcher::{Matcher, Outcome, Step, Synthesized};
use crate::engine::state::{ParseState, Pos};

/// `<any>`: consume one input element, synthesizing it.
pub(crate) fn any_rule(_m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    match state.input().take(pos) {
        Some((value, next)) => Ok(Outcome::Match(Synthesized::Value(value), next)),
        None => Ok(Outcome::NoMatch),
    }
}

/// `<end>`: match only at the input's end, consuming nothing.
pub(crate) fn end_rule(_m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    if state.input().at_end(pos) {
        Ok(Outcome::Match(Synthesized::Invisible, pos))
    } else {
        Ok(Outcome::NoMatch)
    }
}

/// `opt rule`: a failed sub-rule becomes a zero-width null match.
pub(crate) fn opt_rule(m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    match m.sub(0).run(pos, state)? {
        Outcome::NoMatch => Ok(Outcome::Match(Synthesized::Null, pos)),
        out => Ok(out),
    }
}

/// `not rule`: succeeds zero-width exactly when the sub-rule fails.
pub(crate) fn not_rule(m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    match m.sub(0).run(pos, state)? {
        Outcome::Match(..) => Ok(Outcome::NoMatch),
        Outcome::NoMatch => Ok(Outcome::Match(Synthesized::Invisible, pos)),
    }
}

/// `ahead rule`: run the sub-rule but stay at the starting position.
pub(crate) fn ahead_rule(m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    match m.sub(0).run(pos, state)? {
        Outcome::Match(synth, _) => Ok(Outcome::Match(synth, pos)),
        Outcome::NoMatch => Ok(Outcome::NoMatch),
    }
}

/// `quote element`: match the next rule element verbatim against the input,
/// without compiling it. Lets keywords and delimiters be matched as data.
pub(crate) fn quote_rule(m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    let Some(lit) = m.literal(0) else {
        panic!("quote combinator bound without a quoted element");
    };
    match state.input().match_value(pos, lit, state.is_exact()) {
        Some(end) => Ok(Outcome::Match(Synthesized::Value(lit.clone()), end)),
        None => Ok(Outcome::NoMatch),
    }
}

/// `comment note`: ignore the quoted element, contribute nothing. The note
/// is endable, so a trailing bare `comment` is allowed.
pub(crate) fn comment_rule(_m: &Matcher, pos: Pos, _state: &mut ParseState<'_>) -> Step {
    Ok(Outcome::Match(Synthesized::Invisible, pos))
}

/// `elide rule`: match the sub-rule but make its result invisible.
pub(crate) fn elide_rule(m: &Matcher, pos: Pos, state: &mut ParseState<'_>) -> Step {
    match m.sub(0).run(pos, state)? {
        Outcome::Match(_, end) => Ok(Outcome::Match(Synthesized::Invisible, end)),
        Outcome::NoMatch => Ok(Outcome::NoMatch),
    }
}

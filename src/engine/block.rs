/*!
 * Block sequencing: alternatives split on the step delimiter, compiled
 * eagerly at binding time and executed with exact rollback per abandoned
 * alternative.
 */

use std::sync::Arc;

use crate::engine::compile::compile;
use crate::engine::cursor::RuleCursor;
use crate::engine::matcher::{Matcher, Outcome, Step, Synthesized};
use crate::engine::state::{ParseState, Pos};
use crate::error::EngineError;
use crate::value::Value;

/// One alternative of a block: the steps between delimiters, compiled in
/// order.
#[derive(Clone, Debug)]
pub struct Alternative {
    steps: Vec<Matcher>,
}

impl Alternative {
    pub fn steps(&self) -> &[Matcher] {
        &self.steps
    }
}

/// Compile every step of every alternative up front. Nested blocks bind
/// through this same path, so a structural error anywhere in the tree
/// surfaces before any step runs.
pub fn compile_block(
    items: &[Value],
    state: &ParseState<'_>,
) -> Result<Arc<[Alternative]>, EngineError> {
    let mut alternatives = Vec::new();
    let mut steps = Vec::new();
    let mut cur = RuleCursor::new(items);

    loop {
        if cur.at_end() {
            alternatives.push(Alternative { steps });
            return Ok(alternatives.into());
        }
        if cur.at_delimiter() {
            alternatives.push(Alternative {
                steps: std::mem::take(&mut steps),
            });
            cur = cur.advance();
            continue;
        }
        let (step, next) = compile(cur, state)?;
        steps.push(step);
        cur = next;
    }
}

/// Try each alternative from the same start position. A failed step abandons
/// its alternative, discarding whatever the alternative accumulated. The
/// block synthesizes the last non-invisible step result of the alternative
/// that succeeded; an empty alternative matches zero-width.
pub fn run_alternatives(
    alternatives: &[Alternative],
    start: Pos,
    state: &mut ParseState<'_>,
) -> Step {
    'alternatives: for alternative in alternatives {
        let mark = state.pending_len();
        let mut pos = start;
        let mut synth = Synthesized::Invisible;

        for step in &alternative.steps {
            match step.run(pos, state)? {
                Outcome::Match(s, p) => {
                    pos = p;
                    if !s.is_invisible() {
                        synth = s;
                    }
                }
                Outcome::NoMatch => {
                    state.truncate_pending(mark);
                    continue 'alternatives;
                }
            }
        }
        return Ok(Outcome::Match(synth, pos));
    }
    Ok(Outcome::NoMatch)
}

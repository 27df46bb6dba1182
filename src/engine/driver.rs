/*!
 * The top-level driver: set up a fresh parse state, wrap the caller's rule
 * sequence as one sequencing matcher, run it, and post-process the outcome
 * into the public contract.
 */

use crate::combinators;
use crate::engine::compile::compile;
use crate::engine::cursor::RuleCursor;
use crate::engine::matcher::{Outcome, Signal, Synthesized};
use crate::engine::state::{Input, ParseState, Pos};
use crate::engine::table::CombinatorTable;
use crate::error::EngineError;
use crate::host::Host;
use crate::value::Value;

/// Per-invocation knobs for [`run`].
#[derive(Clone, Copy, Default)]
pub struct Options<'o> {
    /// Combinator table override; the standard table when absent.
    pub table: Option<&'o CombinatorTable>,
    /// Lexical environment and group evaluator.
    pub host: Option<&'o dyn Host>,
    /// Literal text/char comparisons distinguish case. Off by default,
    /// matching the dialect family's convention.
    pub case_sensitive: bool,
    /// Require the final position to reach the input's end; a shorter match
    /// is demoted to no-match.
    pub full: bool,
    /// Track and report the furthest input position any attempt reached.
    pub track_furthest: bool,
    /// Surface the pending-accumulation buffer to the caller. Without this,
    /// a non-empty buffer at successful completion is a hard error.
    pub collect_pending: bool,
}

/// How a completed invocation turned out. `Null` is a successful match that
/// synthesized an explicit null; `None` is a successful match that
/// synthesized nothing observable. Neither is `NoMatch`.
#[derive(Clone, PartialEq, Debug)]
pub enum MatchOutcome {
    NoMatch,
    Value(Value),
    Null,
    None,
}

impl MatchOutcome {
    pub fn matched(&self) -> bool {
        !matches!(self, MatchOutcome::NoMatch)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct MatchReport {
    pub outcome: MatchOutcome,
    /// Only present when requested through [`Options::track_furthest`].
    pub furthest: Option<Pos>,
    /// Only present when requested through [`Options::collect_pending`].
    pub pending: Option<Vec<Value>>,
}

/// Run a rule sequence against input.
///
/// Structural errors terminate the invocation; a failed match is an
/// ordinary [`MatchOutcome::NoMatch`] report.
pub fn run(input: Input<'_>, rules: &[Value], opts: &Options<'_>) -> Result<MatchReport, EngineError> {
    let table = opts.table.unwrap_or_else(|| combinators::standard_table());
    let mut state = ParseState::new(
        input,
        table,
        opts.host,
        opts.case_sensitive,
        opts.track_furthest,
    );

    // The implicit top-level grouping: the whole sequence becomes one
    // sequencing matcher, so alternation and step delimiters scope
    // correctly.
    let wrapped = [Value::Block(rules.iter().cloned().collect())];
    let (matcher, _) = compile(RuleCursor::new(&wrapped), &state)?;

    let outcome = match matcher.run(Pos::START, &mut state) {
        Ok(outcome) => outcome,
        Err(Signal::Error(err)) => return Err(err),
        Err(Signal::Escape(value)) => return Err(EngineError::HostEscape(value)),
        Err(Signal::Break { .. }) => return Err(EngineError::BreakOutsideLoop),
    };

    debug_assert!(
        state.loops_balanced(),
        "iteration-control stack must unwind before the driver returns"
    );

    let furthest = state.furthest();

    let (synth, end) = match outcome {
        Outcome::Match(synth, end) => (synth, end),
        Outcome::NoMatch => {
            return Ok(MatchReport {
                outcome: MatchOutcome::NoMatch,
                furthest,
                pending: None,
            })
        }
    };

    if opts.full && !input.at_end(end) {
        return Ok(MatchReport {
            outcome: MatchOutcome::NoMatch,
            furthest,
            pending: None,
        });
    }

    let pending = if opts.collect_pending {
        Some(state.take_pending())
    } else if state.pending_len() > 0 {
        // Unclaimed accumulation signals a caller/combinator contract
        // mismatch, not an empty result.
        return Err(EngineError::ResidualPending(state.pending_len()));
    } else {
        None
    };

    let outcome = match synth {
        Synthesized::Value(v) => MatchOutcome::Value(v),
        Synthesized::Null => MatchOutcome::Null,
        // Parsing succeeded but produced nothing to report; never demote
        // this to no-match.
        Synthesized::Invisible => MatchOutcome::None,
    };

    Ok(MatchReport {
        outcome,
        furthest,
        pending,
    })
}

/// Full-consumption run that, on success, hands back the original input
/// rather than the synthesized value.
pub fn accepts<'i>(
    input: Input<'i>,
    rules: &[Value],
    opts: &Options<'_>,
) -> Result<Option<Input<'i>>, EngineError> {
    let opts = Options {
        full: true,
        ..*opts
    };
    let report = run(input, rules, &opts)?;
    Ok(report.outcome.matched().then_some(input))
}

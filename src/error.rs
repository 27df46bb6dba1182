use thiserror::Error;

use crate::value::{PathRef, Symbol, TypeTag, Value};

/// Structural failures raised while translating rule elements into matchers,
/// plus the few post-run contract violations. Fatal to the invocation and
/// never retried.
///
/// A failed match is *not* an error; it is reported as
/// [`MatchOutcome::NoMatch`](crate::MatchOutcome::NoMatch).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("step delimiter `|` is not allowed here")]
    MisplacedDelimiter,

    #[error("expected a rule element")]
    MissingElement,

    #[error("unknown dialect keyword `{0}`")]
    UnknownKeyword(Symbol),

    #[error("`{0}` names an ordinary function, not a combinator")]
    NotACombinator(Symbol),

    #[error("`{0}` has no value")]
    UnsetKeyword(Symbol),

    #[error("no combinator registered for values of type {0}")]
    NoTypeCombinator(TypeTag),

    #[error("too few parameters for combinator `{combinator}` (missing `{param}`)")]
    TooFewParameters {
        combinator: Symbol,
        param: &'static str,
    },

    #[error("combinator `{combinator}` expects {expected} for `{param}`")]
    BadArgument {
        combinator: Symbol,
        param: &'static str,
        expected: String,
    },

    #[error("path `{0}` does not resolve to a callable")]
    NotCallable(PathRef),

    #[error("path `{0}` does not resolve to a value")]
    UnknownPath(PathRef),

    #[error("rule groups require a host, but none was supplied")]
    NoHost,

    #[error("`break` used outside of an iteration combinator")]
    BreakOutsideLoop,

    #[error("{0} accumulated result(s) were never claimed")]
    ResidualPending(usize),

    #[error("host code escaped the parse with {0:?}")]
    HostEscape(Value),
}

/*!
 * A runtime-extensible pattern-matching dialect engine.
 *
 * Rule sequences of declarative elements are compiled into callable
 * matchers over ordered input (text, bytes, or value sequences), then run
 * with backtracking, result synthesis, and rollback-able side-effect
 * accumulation. The combinator table is the sole extension point: built-in
 * combinators are ordinary entries, and callers may override or extend any
 * of them per invocation.
 *
 * ```
 * use parlance::{run, Input, MatchOutcome, Options, Value};
 *
 * let rules = [Value::word("some"), Value::text("ab"), Value::word("<end>")];
 * let report = run(Input::Text("abab"), &rules, &Options::default()).unwrap();
 * assert_eq!(report.outcome, MatchOutcome::Value(Value::text("ab")));
 * ```
 */

pub mod combinators;
pub mod engine;
mod error;
mod host;
mod utils;
mod value;

// entry points
pub use engine::driver::{accepts, run};

// compilation surface, for combinator authors
pub use engine::block::{compile_block, run_alternatives, Alternative};
pub use engine::compile::{bind, compile};
pub use engine::cursor::RuleCursor;
pub use engine::matcher::{guard_def, Arg, Matcher, Outcome, Signal, Step, Synthesized};
pub use engine::state::{Input, LoopId, ParseState, Pos};
pub use engine::table::{
    Behavior, CombinatorDef, CombinatorTable, DispatchKey, Entry, Param, ParamKind,
};

// public data model
pub use engine::driver::{MatchOutcome, MatchReport, Options};
pub use error::EngineError;
pub use host::{Host, HostExit};
pub use value::{HostFn, PathRef, Symbol, TypeTag, Value, STEP_DELIMITER};

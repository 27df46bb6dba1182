/*!
 * Translation of rule elements into matchers.
 *
 * `compile` examines one rule element and decides dispatch: keyword
 * combinator, type-based combinator, variadic call-form, or literal-value
 * fallback. `bind` consumes subsequent rule elements as the chosen
 * definition's arguments. Both leave the caller's cursor untouched and
 * return an advanced copy.
 */

use std::sync::Arc;

use either::Either::{Left, Right};

use crate::engine::block;
use crate::engine::cursor::RuleCursor;
use crate::engine::matcher::{Arg, Matcher};
use crate::engine::state::ParseState;
use crate::engine::table::{CombinatorDef, Param, ParamKind};
use crate::error::EngineError;
use crate::value::{HostFn, PathRef, Symbol, TypeTag, Value};

type Compiled<'r> = Result<(Matcher, RuleCursor<'r>), EngineError>;

/// Compile the rule element under the cursor into a matcher, consuming as
/// many further elements as the dispatched combinator's parameters require.
///
/// A bare step delimiter is a contract violation here: delimiters only
/// separate steps at the sequencing level, never appear mid-argument.
pub fn compile<'r>(cur: RuleCursor<'r>, state: &ParseState<'_>) -> Compiled<'r> {
    let head = cur.head().ok_or(EngineError::MissingElement)?;
    if head.is_delimiter() {
        return Err(EngineError::MisplacedDelimiter);
    }

    match head {
        Value::Word(sym) => compile_word(sym, cur.advance(), state),
        Value::Path(path) => compile_path(path, cur.advance(), state),
        literal => dispatch_by_type(literal.clone(), cur.advance(), state),
    }
}

fn compile_word<'r>(sym: &Symbol, cur: RuleCursor<'r>, state: &ParseState<'_>) -> Compiled<'r> {
    match state.table().word(sym) {
        // A registered combinator consumes subsequent elements as arguments.
        Some(Left(def)) => bind(def.clone(), cur, state, None),
        // A keyword re-bound to plain data: dispatch by the value's type.
        // The word itself never reaches the handler.
        Some(Right(value)) => dispatch_by_type(value.clone(), cur, state),
        None => resolve_word(sym, cur, state),
    }
}

/// Fallback for a keyword with no table entry: resolve it as a variable in
/// the host's lexical environment.
fn resolve_word<'r>(sym: &Symbol, cur: RuleCursor<'r>, state: &ParseState<'_>) -> Compiled<'r> {
    let resolved = state
        .host()
        .and_then(|host| host.get(std::slice::from_ref(sym)));

    match resolved {
        Some(Value::Func(f)) if f.is_combinator() => {
            let def = specialize_callable(&f, state)?;
            bind(def, cur, state, Some(Value::Func(f)))
        }
        // Dialect keywords and plain callables are not interchangeable.
        Some(Value::Func(_)) => Err(EngineError::NotACombinator(sym.clone())),
        Some(Value::Unset) => Err(EngineError::UnsetKeyword(sym.clone())),
        // Any other fetched value goes through the bare-symbol combinator,
        // so a name can be re-bound to alternate behavior without being a
        // reserved word.
        Some(value) => match state.table().by_type(TypeTag::Word) {
            Some(Left(def)) => bind_value_only(def.clone(), cur, state, value),
            _ => Err(EngineError::NoTypeCombinator(TypeTag::Word)),
        },
        None => Err(EngineError::UnknownKeyword(sym.clone())),
    }
}

fn compile_path<'r>(path: &PathRef, cur: RuleCursor<'r>, state: &ParseState<'_>) -> Compiled<'r> {
    if path.call {
        // The one genuinely variadic construction point: arity follows the
        // resolved callable's declared parameters.
        let resolved = state.host().and_then(|host| host.get(&path.segments));
        return match resolved {
            Some(Value::Func(f)) => {
                let def = specialize_callable(&f, state)?;
                bind(def, cur, state, Some(Value::Func(f)))
            }
            Some(_) => Err(EngineError::NotCallable(path.clone())),
            None => Err(EngineError::UnknownPath(path.clone())),
        };
    }

    // Dispatch by the leading symbol, without the variable-resolution
    // fallback words get.
    let Some(leading) = path.leading() else {
        return Err(EngineError::UnknownPath(path.clone()));
    };
    match state.table().word(leading) {
        // Unlike plain word dispatch, the whole path is handed along as the
        // dispatch literal so a combinator can read its trailing segments as
        // refinements.
        Some(Left(def)) => bind(def.clone(), cur, state, Some(Value::Path(path.clone()))),
        Some(Right(value)) => dispatch_by_type(value.clone(), cur, state),
        None => {
            let resolved = state.host().and_then(|host| host.get(&path.segments));
            match resolved {
                Some(value) => dispatch_by_type(value, cur, state),
                None => Err(EngineError::UnknownPath(path.clone())),
            }
        }
    }
}

const NO_RULES: &[Value] = &[];

/// Dispatch a literal by its type tag, binding it as the definition's
/// `value` parameter. No further rule elements are consumed: the definition
/// is bound against an exhausted stream, so any stream-consuming parameter
/// it declares fails the usual way.
fn dispatch_by_type<'r>(
    value: Value,
    cur: RuleCursor<'r>,
    state: &ParseState<'_>,
) -> Compiled<'r> {
    let tag = value.tag();
    match state.table().by_type(tag) {
        Some(Left(def)) => bind_value_only(def.clone(), cur, state, value),
        _ => Err(EngineError::NoTypeCombinator(tag)),
    }
}

fn bind_value_only<'r>(
    def: Arc<CombinatorDef>,
    cur: RuleCursor<'r>,
    state: &ParseState<'_>,
    value: Value,
) -> Compiled<'r> {
    let (matcher, _) = bind(def, RuleCursor::new(NO_RULES), state, Some(value))?;
    Ok((matcher, cur))
}

/// Construct a definition for an ordinary callable on the fly: the
/// table's `function` template specialized to one sub-rule parameter per
/// declared argument.
fn specialize_callable(
    f: &HostFn,
    state: &ParseState<'_>,
) -> Result<Arc<CombinatorDef>, EngineError> {
    let template = match state.table().by_type(TypeTag::Func) {
        Some(Left(def)) => def,
        _ => return Err(EngineError::NoTypeCombinator(TypeTag::Func)),
    };

    let mut params = Vec::with_capacity(f.arity() + 1);
    params.push(Param::value("value"));
    params.extend((0..f.arity()).map(|_| Param::sub_rule("arg")));

    Ok(Arc::new(CombinatorDef::new(
        f.name().clone(),
        params,
        template.behavior.clone(),
    )))
}

fn expected_tags(tags: &[TypeTag]) -> String {
    let list = tags
        .iter()
        .map(TypeTag::to_string)
        .collect::<Vec<_>>()
        .join(" or ");
    format!("a value of type {list}")
}

/// Bind a definition's formal parameters against the rule stream, producing
/// a ready-to-run matcher and the cursor advanced past everything consumed.
pub fn bind<'r>(
    def: Arc<CombinatorDef>,
    mut cur: RuleCursor<'r>,
    state: &ParseState<'_>,
    literal: Option<Value>,
) -> Compiled<'r> {
    let mut args = Vec::with_capacity(def.params.len());

    for param in &def.params {
        match &param.kind {
            ParamKind::Value => args.push(match &literal {
                Some(v) => Arg::Literal(v.clone()),
                None => Arg::Unbound,
            }),
            ParamKind::Quoted { endable } => {
                if cur.at_step_end() {
                    if *endable {
                        args.push(Arg::Absent);
                    } else {
                        return Err(EngineError::TooFewParameters {
                            combinator: def.name.clone(),
                            param: param.name,
                        });
                    }
                } else {
                    let element = cur.head().expect("not at step end");
                    args.push(Arg::Literal(element.clone()));
                    cur = cur.advance();
                }
            }
            ParamKind::QuotedIf(tags) => match cur.head() {
                Some(element) if !cur.at_delimiter() && tags.contains(&element.tag()) => {
                    args.push(Arg::Literal(element.clone()));
                    cur = cur.advance();
                }
                _ => args.push(Arg::Unbound),
            },
            ParamKind::QuotedAs(tags) => {
                if cur.at_step_end() {
                    return Err(EngineError::TooFewParameters {
                        combinator: def.name.clone(),
                        param: param.name,
                    });
                }
                let element = cur.head().expect("not at step end");
                if !tags.contains(&element.tag()) {
                    return Err(EngineError::BadArgument {
                        combinator: def.name.clone(),
                        param: param.name,
                        expected: expected_tags(tags),
                    });
                }
                args.push(Arg::Literal(element.clone()));
                cur = cur.advance();
            }
            ParamKind::SubRule => {
                if cur.at_step_end() {
                    return Err(EngineError::TooFewParameters {
                        combinator: def.name.clone(),
                        param: param.name,
                    });
                }
                let (sub, next) = compile(cur, state)?;
                args.push(Arg::Sub(sub));
                cur = next;
            }
            ParamKind::Alternatives => match &literal {
                Some(Value::Block(items)) => {
                    args.push(Arg::Alternatives(block::compile_block(items, state)?))
                }
                _ => {
                    return Err(EngineError::BadArgument {
                        combinator: def.name.clone(),
                        param: param.name,
                        expected: "a block".to_owned(),
                    })
                }
            },
            ParamKind::Flag => args.push(Arg::Unbound),
            // Filled at call time by the matcher invocation, never here.
            ParamKind::State | ParamKind::Input | ParamKind::Remainder | ParamKind::Pending => {
                args.push(Arg::Reserved)
            }
        }
    }

    Ok((Matcher::bound(def, args), cur))
}

mod common;

use common::*;
use parlance::{
    combinators, compile, run, EngineError, Input, Options, ParseState, RuleCursor, Value,
};

#[test]
fn unknown_keyword_without_a_host() {
    let err = run(Input::Text(""), &[w("mystery")], &Options::default()).unwrap_err();
    assert!(matches!(err, EngineError::UnknownKeyword(_)));
}

#[test]
fn too_few_parameters_at_rule_end() {
    let err = run(Input::Text(""), &[w("some")], &Options::default()).unwrap_err();
    assert!(matches!(
        err,
        EngineError::TooFewParameters { param: "rule", .. }
    ));
}

#[test]
fn delimiter_cannot_stand_as_an_argument() {
    let rules = [w("opt"), Value::delimiter(), t("a")];
    let err = run(Input::Text("a"), &rules, &Options::default()).unwrap_err();
    assert!(matches!(err, EngineError::TooFewParameters { .. }));
}

#[test]
fn compile_rejects_a_bare_delimiter() {
    let table = combinators::standard();
    let state = ParseState::new(Input::Text(""), &table, None, false, false);

    let rules = [Value::delimiter()];
    let err = compile(RuleCursor::new(&rules), &state).unwrap_err();
    assert!(matches!(err, EngineError::MisplacedDelimiter));

    let err = compile(RuleCursor::new(&[]), &state).unwrap_err();
    assert!(matches!(err, EngineError::MissingElement));
}

#[test]
fn structural_errors_precede_any_matching() {
    let host = TestHost::new();
    let opts = Options {
        host: Some(&host),
        ..Options::default()
    };
    let rules = [Value::group([w("effect")]), w("no-such-keyword")];
    let err = run(Input::Text(""), &rules, &opts).unwrap_err();
    assert!(matches!(err, EngineError::UnknownKeyword(_)));
    assert!(host.evaluated.borrow().is_empty());
}

#[test]
fn structural_errors_in_nested_blocks_precede_any_matching() {
    let host = TestHost::new();
    let opts = Options {
        host: Some(&host),
        ..Options::default()
    };
    // the bad keyword sits two block levels down, after a side-effect step
    let rules = [
        Value::group([w("effect")]),
        blk([blk([w("no-such-keyword")])]),
    ];
    let err = run(Input::Text(""), &rules, &opts).unwrap_err();
    assert!(matches!(err, EngineError::UnknownKeyword(_)));
    assert!(host.evaluated.borrow().is_empty());
}

#[test]
fn empty_paths_are_structural_errors() {
    let rules = [Value::path(Vec::<&str>::new(), false)];
    let err = run(Input::Text(""), &rules, &Options::default()).unwrap_err();
    assert!(matches!(err, EngineError::UnknownPath(_)));
}

#[test]
fn structural_errors_hide_in_no_alternative() {
    // the error sits in a second alternative that would never run
    let host = TestHost::new();
    let opts = Options {
        host: Some(&host),
        ..Options::default()
    };
    let rules = [t("a"), Value::delimiter(), w("no-such-keyword")];
    let err = run(Input::Text("a"), &rules, &opts).unwrap_err();
    assert!(matches!(err, EngineError::UnknownKeyword(_)));
}

#[test]
fn groups_without_a_host_are_errors() {
    let rules = [Value::group([w("x")])];
    let err = run(Input::Text(""), &rules, &Options::default()).unwrap_err();
    assert!(matches!(err, EngineError::NoHost));
}

#[test]
fn host_escape_aborts_the_invocation() {
    let host = TestHost::new();
    let opts = Options {
        host: Some(&host),
        ..Options::default()
    };
    let rules = [t("a"), Value::group([w("escape"), Value::Int(9)])];
    let err = run(Input::Text("a"), &rules, &opts).unwrap_err();
    assert!(matches!(err, EngineError::HostEscape(Value::Int(9))));
}

#[test]
fn escape_is_not_swallowed_by_optionality() {
    let host = TestHost::new();
    let opts = Options {
        host: Some(&host),
        ..Options::default()
    };
    let rules = [w("opt"), Value::group([w("escape")])];
    let err = run(Input::Text(""), &rules, &opts).unwrap_err();
    assert!(matches!(err, EngineError::HostEscape(Value::None)));
}

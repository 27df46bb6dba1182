mod common;

use common::*;
use parlance::{run, EngineError, Input, MatchOutcome, Options, Value};
use pretty_assertions::assert_eq;

#[test]
fn abandoned_alternatives_roll_accumulation_back() {
    let rules = [
        w("collect"),
        blk([
            w("keep"),
            t("a"),
            w("keep"),
            t("x"),
            Value::delimiter(),
            w("keep"),
            t("ab"),
        ]),
    ];
    let report = parse(Input::Text("ab"), &rules);
    assert_eq!(report.outcome, MatchOutcome::Value(blk([t("ab")])));
}

#[test]
fn keep_records_null_as_explicit_none() {
    let rules = [
        w("collect"),
        blk([w("keep"), w("opt"), t("x"), w("keep"), t("a")]),
    ];
    let report = parse(Input::Text("a"), &rules);
    assert_eq!(
        report.outcome,
        MatchOutcome::Value(blk([Value::None, t("a")]))
    );
}

#[test]
fn keep_skips_invisible_results() {
    let rules = [
        w("collect"),
        blk([w("keep"), w("elide"), t("a"), w("keep"), t("b")]),
    ];
    let report = parse(Input::Text("ab"), &rules);
    assert_eq!(report.outcome, MatchOutcome::Value(blk([t("b")])));
}

#[test]
fn nested_collect_claims_only_its_own_span() {
    let rules = [
        w("collect"),
        blk([
            w("keep"),
            t("a"),
            w("keep"),
            w("collect"),
            blk([w("keep"), t("b")]),
        ]),
    ];
    let report = parse(Input::Text("ab"), &rules);
    assert_eq!(
        report.outcome,
        MatchOutcome::Value(blk([t("a"), blk([t("b")])]))
    );
}

#[test]
fn collect_over_a_failed_rule_does_not_match() {
    let rules = [w("collect"), blk([w("keep"), t("a")])];
    let report = parse(Input::Text("x"), &rules);
    assert_eq!(report.outcome, MatchOutcome::NoMatch);
    assert_eq!(report.pending, None);
}

#[test]
fn unclaimed_accumulation_is_an_error() {
    let rules = [w("keep"), t("a")];
    let err = run(Input::Text("a"), &rules, &Options::default()).unwrap_err();
    assert!(matches!(err, EngineError::ResidualPending(1)));
}

#[test]
fn collect_pending_surfaces_the_buffer() {
    let rules = [w("keep"), t("a"), w("keep"), t("b")];
    let opts = Options {
        collect_pending: true,
        ..Options::default()
    };
    let report = unwrap_display(run(Input::Text("ab"), &rules, &opts));
    assert_eq!(report.pending.as_deref(), Some(&[t("a"), t("b")][..]));
}

#[test]
fn no_match_leaves_no_residue() {
    let rules = [w("keep"), t("a")];
    let report = unwrap_display(run(Input::Text("x"), &rules, &Options::default()));
    assert_eq!(report.outcome, MatchOutcome::NoMatch);
    assert_eq!(report.pending, None);
}

#[test]
fn break_discards_the_broken_iterations_accumulation() {
    let rules = [
        w("collect"),
        blk([
            w("some"),
            blk([
                w("keep"),
                t("a"),
                Value::delimiter(),
                w("keep"),
                t("b"),
                w("break"),
            ]),
        ]),
    ];
    let report = parse(Input::Text("aab"), &rules);
    assert_eq!(report.outcome, MatchOutcome::Value(blk([t("a"), t("a")])));
}

#[test]
fn rolled_back_keeps_inside_lookahead_leave_nothing() {
    let rules = [
        w("collect"),
        blk([w("not"), blk([w("keep"), t("x")]), w("keep"), t("a")]),
    ];
    let report = parse(Input::Text("a"), &rules);
    assert_eq!(report.outcome, MatchOutcome::Value(blk([t("a")])));
}

mod common;

use policy_expression::{EvaluationError, ExpressionOutcome};

fn evaluate(src: &str) -> Result<ExpressionOutcome, EvaluationError> {
    common::unchecked_evaluator().evaluate_expression(src, &())
}

fn assert_satisfied(src: &str) {
    match evaluate(src) {
        Ok(outcome) => assert!(outcome.is_satisfied(), "'{src}' was not satisfied: {outcome}"),
        Err(e) => panic!("'{src}' failed: {e}"),
    }
}

fn assert_not_satisfied(src: &str, policy_name: &str) {
    match evaluate(src) {
        Ok(outcome) => assert_eq!(outcome.not_satisfied(),
                                  Some((policy_name, "Failed")),
                                  "unexpected outcome for '{src}'"),
        Err(e) => panic!("'{src}' failed: {e}"),
    }
}

fn assert_syntax_error(src: &str, position: usize) {
    match evaluate(src) {
        Err(EvaluationError::Syntax(e)) => {
            assert_eq!(e.position(), position, "wrong position for '{src}': {e}");
        },
        other => panic!("'{src}' was expected to be a syntax error, got {other:?}"),
    }
}

#[test]
fn single_policies() {
    assert_satisfied("True1");
    assert_not_satisfied("False1", "False1");
    assert_satisfied("NA1");
    assert_satisfied("(True1)");
    assert_not_satisfied("(False1)", "False1");
}

#[test]
fn and_binds_tighter_than_or() {
    assert_satisfied("True1 OR False2 AND True3");
    assert_satisfied("False1 AND True2 OR True3");
    assert_not_satisfied("True1 AND False2 OR False3 AND True4", "False2");
    assert_not_satisfied("False1 OR True2 AND False3", "False1");
}

#[test]
fn groups_are_evaluated_as_operands() {
    assert_not_satisfied("(True1 OR False2) AND False3", "False3");
    assert_satisfied("(False1 OR True2) AND (False3 OR True4)");
    assert_not_satisfied("True1 AND (False2 OR False3)", "False2");
}

#[test]
fn failing_and_reports_its_left_failure_first() {
    assert_not_satisfied("False1 AND False2", "False1");
    assert_not_satisfied("True1 AND False2 AND False3", "False2");
}

#[test]
fn failing_or_reports_its_left_failure() {
    assert_not_satisfied("False1 OR False2", "False1");
    assert_not_satisfied("(True1 AND False2) OR (False3 AND True4)", "False2");
}

#[test]
fn not_applicable_is_neutral() {
    assert_satisfied("NA1 AND NA2");
    assert_satisfied("NA1 OR NA2 AND NA3");
    assert_satisfied("NA1 AND True2");
    assert_not_satisfied("NA1 AND False2", "False2");
    assert_not_satisfied("False1 OR NA2", "False1");
    assert_satisfied("(NA1 OR NA2) AND True3");
}

#[test]
fn policy_names_are_case_insensitive_for_memoization() {
    assert_satisfied("TRUE1 AND true1");
    assert_not_satisfied("FALSE1 OR false1", "FALSE1");
}

#[test]
fn unknown_policies_are_syntax_errors() {
    assert_syntax_error("Blah AND True1", 0);
    assert_syntax_error("True1 AND Blah", 10);
    assert_syntax_error("InvalidPolicyName", 0);
}

#[test]
fn unknown_policies_after_a_passing_or_are_never_resolved() {
    assert_satisfied("True1 OR Blah");
    assert_satisfied("(True1 OR Blah) AND NA2");
    assert_syntax_error("False1 OR Blah", 10);
}

#[test]
fn operators_are_case_sensitive() {
    assert_syntax_error("True1 and False1", 6);
    assert_syntax_error("True1 Or False1", 6);
}

#[test]
fn malformed_expressions_are_syntax_errors() {
    assert_syntax_error("", 0);
    assert_syntax_error("   ", 0);
    assert_syntax_error("AND", 0);
    assert_syntax_error("True1 AND", 9);
    assert_syntax_error("True1 AND ", 10);
    assert_syntax_error("(True1 AND True2", 16);
    assert_syntax_error("True1)", 5);
    assert_syntax_error("True1 (False2)", 6);
    assert_syntax_error("(True1 AND (False2 OR True3))", 11);
    assert_syntax_error("True1 AND& False2", 6);
    assert_syntax_error("True1\tAND False2", 0);
}

#[test]
fn positions_count_characters_not_bytes() {
    assert_syntax_error("Ärger1 AND 1x", 11);
    assert_syntax_error("Ärger1 AND", 10);
}

#[test]
fn outcome_display() {
    let satisfied = evaluate("True1").unwrap();
    assert_eq!(satisfied.to_string(), "Passed");

    let failed = evaluate("True1 AND False2").unwrap();
    assert_eq!(failed.to_string(), "Policy False2 failed with message... Failed");
}

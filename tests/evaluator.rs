mod common;

use std::{
    cell::RefCell,
    collections::HashMap,
    error::Error,
    sync::{Arc, Mutex},
    thread,
};

use policy_expression::{
    EvaluationError, ExpressionOutcome, PolicyEvaluator, PolicyOutcome, evaluate_expression,
    error::ResolutionFailure, options::EvaluatorOptions,
};

/// Evaluates `src` with the scenario resolver and returns how many times each
/// policy (by lower-cased name) was resolved.
fn resolution_counts(src: &str) -> (ExpressionOutcome, HashMap<String, usize>) {
    let counts = RefCell::new(HashMap::new());
    let outcome = evaluate_expression(src, |name| {
                      *counts.borrow_mut().entry(name.to_lowercase()).or_insert(0) += 1;
                      common::scenario_outcome(name)
                  }).unwrap_or_else(|e| panic!("'{src}' failed: {e}"));
    (outcome, counts.into_inner())
}

/// Evaluates `src` with a logger attached and returns every snapshot it saw.
fn snapshots(src: &str) -> Vec<String> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let options = EvaluatorOptions::builder().log_with(move |snapshot| {
                                                 sink.lock().unwrap().push(snapshot.to_string());
                                             })
                                             .build();
    let evaluator = PolicyEvaluator::with_options(|name, _| common::scenario_outcome(name), options);

    evaluator.evaluate_expression(src, &())
             .unwrap_or_else(|e| panic!("'{src}' failed: {e}"));
    let seen = seen.lock().unwrap().clone();
    seen
}

#[test]
fn repeated_policies_are_resolved_once() {
    let (outcome, counts) = resolution_counts("True1 AND True1");
    assert!(outcome.is_satisfied());
    assert_eq!(counts["true1"], 1);

    let (outcome, counts) = resolution_counts("True1 AND False2 OR False2 AND True1");
    assert!(!outcome.is_satisfied());
    assert_eq!(counts["true1"], 1);
    assert_eq!(counts["false2"], 1);
}

#[test]
fn resolved_outcomes_are_shared_with_groups() {
    let (_, counts) = resolution_counts("(True1 AND False2) OR true1");
    assert_eq!(counts["true1"], 1);

    let (_, counts) = resolution_counts("False1 AND (False1 OR True2)");
    assert_eq!(counts["false1"], 1);
}

#[test]
fn or_does_not_resolve_its_right_operand_after_a_pass() {
    let (outcome, counts) = resolution_counts("True1 OR False2");
    assert!(outcome.is_satisfied());
    assert!(!counts.contains_key("false2"));

    let (_, counts) = resolution_counts("True1 OR (False2 AND False3) OR NA4");
    assert_eq!(counts.len(), 1);
}

#[test]
fn short_circuited_operands_may_fail_to_resolve() {
    let outcome = evaluate_expression("True1 OR Explode1", |name| {
                      assert!(!name.starts_with("Explode"), "{name} should not be resolved");
                      common::scenario_outcome(name)
                  }).unwrap();
    assert!(outcome.is_satisfied());
}

#[test]
fn and_is_folded_before_or_short_circuits() {
    let (_, counts) = resolution_counts("True1 OR False2 AND True3");
    assert_eq!(counts["false2"], 1);
    assert_eq!(counts["true3"], 1);
}

#[test]
fn logger_sees_each_fold() {
    assert_eq!(snapshots("True1 AND False2 OR NA3"), ["Fail OR NA3", "Fail"]);
    assert_eq!(snapshots("NA1 AND NA2 AND True3"), ["NotApplicable AND True3", "Pass"]);
}

#[test]
fn logger_sees_memoized_results_in_place() {
    assert_eq!(snapshots("True1 AND False2 OR True1"), ["Fail OR Pass"]);
}

#[test]
fn logger_sees_groups_reduced_on_their_own() {
    assert_eq!(snapshots("(True1 AND NA2) OR False3"), ["Pass"]);
    assert_eq!(snapshots("(False1 OR False2) AND True3"), ["Fail", "Fail"]);
}

#[test]
fn logger_sees_group_results_in_the_enclosing_level() {
    assert_eq!(snapshots("(True1 AND NA2) AND False3 OR True1"), ["Pass", "Fail OR Pass"]);
    assert_eq!(snapshots("(NA1 OR False2) AND False2 OR na1"), ["Fail", "Fail OR NotApplicable", "Fail"]);
}

#[test]
fn logger_is_silent_for_a_single_policy() {
    assert!(snapshots("False1").is_empty());
    assert!(snapshots("True1 OR False2").is_empty());
}

#[test]
fn missing_expression_is_reported() {
    let evaluator = common::unchecked_evaluator();
    let error = evaluator.evaluate_expression(None::<&str>, &()).unwrap_err();
    assert!(matches!(error, EvaluationError::MissingExpression));
    assert_eq!(error.to_string(), "An expression is required.");
}

#[test]
fn name_checker_runs_before_any_resolution() {
    let resolved = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&resolved);
    let evaluator = PolicyEvaluator::with_options(move |name: &str, _: &()| {
                                                      log.lock().unwrap().push(name.to_string());
                                                      common::scenario_outcome(name)
                                                  },
                                                  EvaluatorOptions::builder().check_policy_name(common::ends_with_digit)
                                                                             .build());

    let error = evaluator.evaluate_expression("True1 AND False2 OR Unknown", &()).unwrap_err();
    let error = error.as_syntax().unwrap();
    assert_eq!(error.position(), 20);
    assert_eq!(error.message(), "A policy named Unknown does not exist.");
    assert!(resolved.lock().unwrap().is_empty());
}

#[test]
fn name_checker_receives_caller_state() {
    struct Known(Vec<&'static str>);

    let evaluator =
        PolicyEvaluator::with_options(|_, _: &Known| PolicyOutcome::pass(),
                                      EvaluatorOptions::builder().check_policy_name_with(|name, known: &Known| {
                                                                     known.0.iter().any(|known| *known == name)
                                                                 })
                                                                 .build());

    let known = Known(vec!["BusinessHours", "JusticeLeagueMember"]);
    assert!(evaluator.evaluate_expression("BusinessHours AND JusticeLeagueMember", &known)
                     .unwrap()
                     .is_satisfied());

    let error = evaluator.evaluate_expression("BusinessHours OR Avenger", &known).unwrap_err();
    assert_eq!(error.as_syntax().map(|e| e.position()), Some(17));
}

#[test]
fn resolver_state_decides_outcomes() {
    struct Employee {
        age:    u32,
        hour:   u32,
        league: bool,
    }

    let evaluator = PolicyEvaluator::new(|name, employee: &Employee| match name {
                                             "BusinessHours" => (9..17).contains(&employee.hour).into(),
                                             "YoungEnoughToWorkMore" => {
                                                 if employee.age < 40 {
                                                     PolicyOutcome::pass()
                                                 } else {
                                                     PolicyOutcome::fail("Too old for overtime.")
                                                 }
                                             },
                                             "JusticeLeagueMember" => employee.league.into(),
                                             _ => PolicyOutcome::invalid_policy_name(name),
                                         });
    let expression = "(BusinessHours OR YoungEnoughToWorkMore) AND JusticeLeagueMember";

    let flash = Employee { age: 28, hour: 23, league: true };
    assert!(evaluator.evaluate_expression(expression, &flash).unwrap().is_satisfied());

    let alfred = Employee { age: 72, hour: 23, league: false };
    let outcome = evaluator.evaluate_expression(expression, &alfred).unwrap();
    assert_eq!(outcome.not_satisfied(), Some(("BusinessHours", "The policy failed, but no details are specified.")));
}

#[test]
fn resolver_errors_become_syntax_errors_with_a_source() {
    let error = evaluate_expression("True1 AND Database1", |name| {
                    if name == "Database1" {
                        PolicyOutcome::error("connection refused")
                    } else {
                        common::scenario_outcome(name)
                    }
                }).unwrap_err();

    let syntax = error.as_syntax().unwrap();
    assert_eq!(syntax.position(), 10);
    assert_eq!(syntax.message(), "Policy Database1 could not be evaluated.");

    let cause = error.source()
                     .and_then(|e| e.downcast_ref::<ResolutionFailure>())
                     .unwrap();
    assert_eq!(cause.policy_name, "Database1");
    assert_eq!(cause.details, "connection refused");
}

#[test]
fn resolver_panics_become_syntax_errors() {
    let error = evaluate_expression("(False1 OR Boom2) AND True3", |name| {
                    if name == "Boom2" {
                        panic!("lost connection");
                    }
                    common::scenario_outcome(name)
                }).unwrap_err();

    let syntax = error.as_syntax().unwrap();
    assert_eq!(syntax.position(), 11);

    let cause = syntax.source()
                      .and_then(|e| e.downcast_ref::<ResolutionFailure>())
                      .unwrap();
    assert_eq!(cause.details, "lost connection");
}

#[test]
fn invalid_policy_name_from_resolver_is_located() {
    let error = common::unchecked_evaluator().evaluate_expression("True1 OR NA2 AND Ghost3", &())
                                            .unwrap_err();
    let syntax = error.as_syntax().unwrap();
    assert_eq!(syntax.position(), 17);
    assert_eq!(syntax.message(), "A policy named Ghost3 does not exist.");
}

#[test]
fn syntax_errors_render_a_caret() {
    let expression = "True1 AND (False2";
    let error = common::unchecked_evaluator().evaluate_expression(expression, &())
                                            .unwrap_err();
    assert_eq!(error.as_syntax().unwrap().render(expression),
               format!("{expression}\n{}^\nNested expression is not closed.", " ".repeat(17)));
}

#[test]
fn evaluator_can_be_shared_between_threads() {
    let evaluator = common::checked_evaluator();
    let cases = [("True1 OR False2 AND True3", true),
                 ("True1 AND False2 OR False3 AND True4", false),
                 ("(False1 OR True2) AND (False3 OR True4)", true),
                 ("NA1 AND False2", false),
                 ("NA1 OR NA2", true)];

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                     for _ in 0..50 {
                         for (expression, satisfied) in cases {
                             let outcome = evaluator.evaluate_expression(expression, &()).unwrap();
                             assert_eq!(outcome.is_satisfied(), satisfied, "{expression}");
                         }
                     }
                 });
        }
    });
}

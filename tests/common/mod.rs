#![allow(dead_code)]

use policy_expression::{PolicyEvaluator, PolicyOutcome, options::EvaluatorOptions};

/// `True*` passes, `False*` fails, `NA*` does not apply, anything else is
/// unknown. Prefixes are matched case-insensitively.
pub fn scenario_outcome(name: &str) -> PolicyOutcome {
    let lower = name.to_lowercase();
    if lower.starts_with("true") {
        PolicyOutcome::pass()
    } else if lower.starts_with("false") {
        PolicyOutcome::fail("Failed")
    } else if lower.starts_with("na") {
        PolicyOutcome::not_applicable()
    } else {
        PolicyOutcome::invalid_policy_name(name)
    }
}

pub fn ends_with_digit(name: &str) -> bool {
    name.chars().last().is_some_and(|c| c.is_ascii_digit())
}

/// Scenario resolver plus a name checker that only accepts names ending in
/// a digit.
pub fn checked_evaluator() -> PolicyEvaluator {
    PolicyEvaluator::with_options(|name, _| scenario_outcome(name),
                                  EvaluatorOptions::builder().check_policy_name(ends_with_digit)
                                                             .build())
}

/// Scenario resolver without a name checker.
pub fn unchecked_evaluator() -> PolicyEvaluator {
    PolicyEvaluator::stateless(scenario_outcome)
}

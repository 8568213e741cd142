//! # policy-expression
//!
//! policy-expression evaluates boolean expressions of named policies, such as
//! `(BusinessHours OR YoungEnoughToWorkMore) AND JusticeLeagueMember`,
//! against caller-supplied logic that decides each policy.
//! Policies pass, fail, or do not apply; `AND` binds tighter than `OR`, each
//! policy is resolved at most once per evaluation, and `OR` stops at the first
//! pass.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the tokens and trees an expression is turned into.
///
/// This module declares the `Token` enum produced by the tokenizer, the
/// `ExpressionTree` built from those tokens, and the text rendering of a tree
/// that diagnostic loggers receive while it is being reduced.
///
/// # Responsibilities
/// - Attaches character offsets to tokens for error reporting.
/// - Holds parenthesized groups as nested trees.
/// - Supports in-place folding of operators into results.
pub mod ast;
/// Provides the error types of an evaluation.
///
/// Errors separate malformed input, which is always located by a character
/// offset, from engine invariant violations, which indicate a defect.
///
/// # Responsibilities
/// - Defines the located syntax error and its caret rendering.
/// - Defines the top-level evaluation error.
/// - Carries resolver failures as the source of a syntax error.
pub mod error;
/// Implements the expression engine.
///
/// This module ties together lexing, tokenizing, tree building, evaluation
/// and the outcome types that flow between them.
///
/// # Responsibilities
/// - Converts expression text into positional tokens and a tree.
/// - Reduces the tree to an outcome with precedence, memoization and
///   short-circuiting.
/// - Defines the outcome algebra.
pub mod engine;
/// Evaluator options and their builder.
///
/// Options attach an optional policy-name checker, run while tokenizing, and
/// an optional diagnostic logger, run after every fold.
pub mod options;
/// The public evaluator.
///
/// `PolicyEvaluator` owns a resolver and options and evaluates expressions
/// against caller state.
pub mod policy_evaluator;
/// General text helpers.
///
/// This module converts lexer byte spans into the character offsets reported
/// to callers and renders carets under error positions.
pub mod util;

pub use engine::value::outcome::{ExpressionOutcome, PolicyOutcome};
pub use error::{EvaluationError, SyntaxError};
pub use policy_evaluator::PolicyEvaluator;

/// Evaluates `expression` once with a resolver that needs no caller state.
///
/// This is a shortcut for a one-off evaluation without options. Unlike
/// [`PolicyEvaluator`], the resolver is only borrowed for the call and may
/// capture local references.
///
/// # Errors
/// Returns an error if the expression is malformed, names a policy the
/// resolver does not know, or the resolver fails.
///
/// # Examples
/// ```
/// use policy_expression::{PolicyOutcome, SyntaxError, evaluate_expression};
///
/// let resolve = |name: &str| {
///     if name.starts_with("True") {
///         PolicyOutcome::pass()
///     } else if name.starts_with("NA") {
///         PolicyOutcome::not_applicable()
///     } else {
///         PolicyOutcome::fail("Failed")
///     }
/// };
///
/// // AND binds tighter than OR.
/// let outcome = evaluate_expression("True1 OR False2 AND True3", resolve).unwrap();
/// assert!(outcome.is_satisfied());
///
/// // Not applicable policies do not count.
/// let outcome = evaluate_expression("NA1 AND False2", resolve).unwrap();
/// assert_eq!(outcome.not_satisfied(), Some(("False2", "Failed")));
///
/// // A dangling operator is reported at the end of the input.
/// let error = evaluate_expression("True1 AND", resolve).unwrap_err();
/// assert_eq!(error.as_syntax().map(SyntaxError::position), Some(9));
/// ```
pub fn evaluate_expression(expression: &str,
                           resolver: impl Fn(&str) -> PolicyOutcome)
                           -> Result<ExpressionOutcome, EvaluationError> {
    let resolve = |name: &str, _: &()| resolver(name);
    policy_evaluator::evaluate_with(expression, &resolve, &(), None, None)
}

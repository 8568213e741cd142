/// Syntax errors.
///
/// Defines the located error raised for malformed expressions, unknown policy
/// names, and resolver failures attributed to a policy name.
pub mod syntax_error;
/// Evaluation errors.
///
/// Contains the top-level error returned by an evaluation call, which
/// separates missing input, syntax errors, and engine invariant violations,
/// plus the cause type wrapped when a resolver fails.
pub mod evaluation_error;

pub use evaluation_error::{EvaluationError, ResolutionFailure};
pub use syntax_error::SyntaxError;

use thiserror::Error;

use crate::error::SyntaxError;

/// Represents every way a call to evaluate an expression can fail.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// No expression was supplied; reported before tokenization starts.
    #[error("An expression is required.")]
    MissingExpression,
    /// The expression text is malformed or names a policy that could not be
    /// resolved.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// The reduction reached a token shape that a tokenized expression cannot
    /// produce. This indicates a defect in the engine, not in the input.
    #[error("Could not evaluate the expression: {details}")]
    Internal {
        /// What the evaluator found.
        details: String,
    },
}

impl EvaluationError {
    /// Returns the syntax error, if this is one.
    #[must_use]
    pub const fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            Self::Syntax(error) => Some(error),
            _ => None,
        }
    }

    pub(crate) fn internal(details: impl Into<String>) -> Self {
        Self::Internal { details: details.into() }
    }
}

/// The cause attached to a [`SyntaxError`] when a resolver fails for a policy.
#[derive(Debug, Error)]
#[error("Resolving policy '{policy_name}' failed: {details}")]
pub struct ResolutionFailure {
    /// The policy whose resolution failed.
    pub policy_name: String,
    /// The resolver's error message, or the panic payload.
    pub details:     String,
}

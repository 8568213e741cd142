use thiserror::Error;

use crate::util::text::caret_line;

/// A malformed expression, located by character offset.
///
/// Syntax errors cover everything traceable to the expression text: grammar
/// violations, invalid identifier characters, unknown policy names (whether
/// rejected by the name checker or reported by the resolver), and resolver
/// failures attributed to the policy name that triggered them.
#[derive(Debug, Error)]
#[error("{message} (position {position})")]
pub struct SyntaxError {
    /// Zero-based character offset of the offending token, or the character
    /// count of the expression for end-of-input errors.
    position: usize,
    /// Human-readable description of the problem.
    message:  String,
    /// Underlying failure, present when a resolver error was converted.
    source:   Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SyntaxError {
    /// Creates a syntax error at `position`.
    ///
    /// # Example
    /// ```
    /// use policy_expression::error::SyntaxError;
    ///
    /// let error = SyntaxError::new(4, "Invalid place for an AND operator.");
    /// assert_eq!(error.position(), 4);
    /// assert_eq!(error.message(), "Invalid place for an AND operator.");
    /// ```
    #[must_use]
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self { position,
               message: message.into(),
               source: None }
    }

    /// Creates a syntax error at `position` that wraps an underlying cause.
    #[must_use]
    pub fn with_source(position: usize,
                       message: impl Into<String>,
                       source: impl Into<Box<dyn std::error::Error + Send + Sync>>)
                       -> Self {
        Self { position,
               message: message.into(),
               source: Some(source.into()) }
    }

    /// Zero-based character offset of the error.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The error message without position information.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Renders the expression with a caret under the error position, followed
    /// by the message.
    ///
    /// # Example
    /// ```
    /// use policy_expression::error::SyntaxError;
    ///
    /// let error = SyntaxError::new(6, "Invalid place for an OR operator.");
    /// assert_eq!(error.render("True1 OR OR False2"),
    ///            "True1 OR OR False2\n      ^\nInvalid place for an OR operator.");
    /// ```
    #[must_use]
    pub fn render(&self, expression: &str) -> String {
        format!("{}\n{}", caret_line(expression, self.position), self.message)
    }
}

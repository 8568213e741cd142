use std::fmt;

/// Message used for failures that were reported without details.
pub const DEFAULT_FAILURE_MESSAGE: &str = "The policy failed, but no details are specified.";

/// The result a resolver reports for one policy name.
///
/// This is the boundary type between the engine and caller code. Besides the
/// three values of the outcome algebra it carries two terminal signals,
/// [`PolicyOutcome::InvalidPolicyName`] and [`PolicyOutcome::Error`], which
/// the evaluator converts into syntax errors before any boolean combination
/// takes place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyOutcome {
    /// The policy passed.
    Pass,
    /// The policy failed.
    Fail {
        /// Why the policy failed.
        message: String,
    },
    /// The policy does not apply; neutral for both `AND` and `OR`.
    NotApplicable,
    /// No policy with this name exists.
    InvalidPolicyName {
        /// The name that was looked up.
        policy_name: String,
    },
    /// The resolver could not evaluate the policy.
    Error {
        /// Description of the resolver failure.
        message: String,
    },
}

impl PolicyOutcome {
    /// A passing outcome.
    #[must_use]
    pub const fn pass() -> Self {
        Self::Pass
    }

    /// A failing outcome with a message.
    ///
    /// # Example
    /// ```
    /// use policy_expression::PolicyOutcome;
    ///
    /// let outcome = PolicyOutcome::fail("Must be during business hours.");
    /// assert_eq!(outcome,
    ///            PolicyOutcome::Fail { message: "Must be during business hours.".to_string() });
    /// ```
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail { message: message.into() }
    }

    /// A failing outcome with [`DEFAULT_FAILURE_MESSAGE`].
    #[must_use]
    pub fn fail_default() -> Self {
        Self::fail(DEFAULT_FAILURE_MESSAGE)
    }

    /// An outcome for a policy that does not apply.
    #[must_use]
    pub const fn not_applicable() -> Self {
        Self::NotApplicable
    }

    /// Signals that `policy_name` does not exist.
    #[must_use]
    pub fn invalid_policy_name(policy_name: impl Into<String>) -> Self {
        Self::InvalidPolicyName { policy_name: policy_name.into() }
    }

    /// Signals that the resolver itself failed.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }
}

impl From<bool> for PolicyOutcome {
    fn from(passed: bool) -> Self {
        if passed { Self::Pass } else { Self::fail_default() }
    }
}

/// A failed policy together with the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Name of the policy as written in the expression.
    pub policy_name: String,
    /// The resolver's failure message.
    pub message:     String,
}

/// The three-valued result of a policy or sub-expression inside a reduction.
///
/// This type cannot represent the resolver's terminal signals; they are
/// turned into errors before an `Outcome` is ever built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Passed.
    Pass,
    /// Failed, with the failure that decided it.
    Fail(Failure),
    /// Not applicable.
    NotApplicable,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Pass`].
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "Pass"),
            Self::Fail(_) => write!(f, "Fail"),
            Self::NotApplicable => write!(f, "NotApplicable"),
        }
    }
}

/// The final verdict of an expression.
///
/// A final [`Outcome::NotApplicable`] counts as satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionOutcome {
    /// The expression holds.
    Satisfied,
    /// The expression does not hold.
    NotSatisfied {
        /// The policy whose failure decided the result.
        policy_name: String,
        /// The failure message of that policy.
        message:     String,
    },
}

impl ExpressionOutcome {
    /// Returns `true` if the expression holds.
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        matches!(self, Self::Satisfied)
    }

    /// Returns the failing policy name and message, if the expression does
    /// not hold.
    ///
    /// # Example
    /// ```
    /// use policy_expression::ExpressionOutcome;
    ///
    /// let outcome = ExpressionOutcome::NotSatisfied { policy_name: "BusinessHours".to_string(),
    ///                                                 message:     "Closed.".to_string(), };
    /// assert_eq!(outcome.not_satisfied(), Some(("BusinessHours", "Closed.")));
    /// assert_eq!(ExpressionOutcome::Satisfied.not_satisfied(), None);
    /// ```
    #[must_use]
    pub fn not_satisfied(&self) -> Option<(&str, &str)> {
        match self {
            Self::Satisfied => None,
            Self::NotSatisfied { policy_name, message } => Some((policy_name, message)),
        }
    }
}

impl From<Outcome> for ExpressionOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Pass | Outcome::NotApplicable => Self::Satisfied,
            Outcome::Fail(Failure { policy_name, message }) => Self::NotSatisfied { policy_name,
                                                                                    message },
        }
    }
}

impl fmt::Display for ExpressionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Satisfied => write!(f, "Passed"),
            Self::NotSatisfied { policy_name, message } => {
                write!(f, "Policy {policy_name} failed with message... {message}")
            },
        }
    }
}

use std::fmt;

use crate::{
    ast::{Node, Token},
    engine::value::outcome::Outcome,
};

/// A binary operator of the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `AND`, folded first.
    And,
    /// `OR`, folded after every `AND` of the same level.
    Or,
}

impl LogicalOperator {
    /// Returns `true` if `node` is this operator's token.
    #[must_use]
    pub const fn matches(self, node: &Node) -> bool {
        matches!((self, node),
                 (Self::And, Node::Token(Token::And { .. }))
                 | (Self::Or, Node::Token(Token::Or { .. })))
    }

    /// Returns `true` if `outcome` decides this operator regardless of the
    /// remaining operands. Only a passing `OR` operand does.
    #[must_use]
    pub const fn short_circuits(self, outcome: &Outcome) -> bool {
        matches!(self, Self::Or) && outcome.is_pass()
    }

    /// Combines two outcomes with this operator.
    ///
    /// # Example
    /// ```
    /// use policy_expression::engine::{evaluator::logic::LogicalOperator, value::outcome::Outcome};
    ///
    /// let outcome = LogicalOperator::Or.combine(Outcome::NotApplicable, Outcome::Pass);
    /// assert_eq!(outcome, Outcome::Pass);
    /// ```
    #[must_use]
    pub fn combine(self, left: Outcome, right: Outcome) -> Outcome {
        match self {
            Self::And => and(left, right),
            Self::Or => or(left, right),
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
        }
    }
}

/// Three-valued `AND`.
///
/// `NotApplicable` is neutral on either side. Otherwise any `Fail` wins, the
/// left one when both sides failed.
///
/// # Example
/// ```
/// use policy_expression::engine::{
///     evaluator::logic::and,
///     value::outcome::{Failure, Outcome},
/// };
///
/// let failed = Outcome::Fail(Failure { policy_name: "False1".to_string(),
///                                      message:     "Failed".to_string(), });
/// assert_eq!(and(Outcome::Pass, failed.clone()), failed);
/// assert_eq!(and(Outcome::NotApplicable, Outcome::Pass), Outcome::Pass);
/// ```
#[must_use]
pub fn and(left: Outcome, right: Outcome) -> Outcome {
    match (left, right) {
        (Outcome::NotApplicable, other) | (other, Outcome::NotApplicable) => other,
        (Outcome::Fail(failure), _) | (_, Outcome::Fail(failure)) => Outcome::Fail(failure),
        (Outcome::Pass, Outcome::Pass) => Outcome::Pass,
    }
}

/// Three-valued `OR`.
///
/// `NotApplicable` is neutral on either side. Otherwise any `Pass` wins; when
/// both sides failed the left failure is kept.
#[must_use]
pub fn or(left: Outcome, right: Outcome) -> Outcome {
    match (left, right) {
        (Outcome::NotApplicable, other) | (other, Outcome::NotApplicable) => other,
        (Outcome::Pass, _) | (_, Outcome::Pass) => Outcome::Pass,
        (Outcome::Fail(failure), Outcome::Fail(_)) => Outcome::Fail(failure),
    }
}

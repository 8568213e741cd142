use std::collections::HashMap;

use crate::{
    ast::{ExpressionTree, Node, Token},
    engine::{
        evaluator::logic::LogicalOperator,
        value::outcome::{Outcome, PolicyOutcome},
    },
    error::EvaluationError,
};

const LOG_TARGET: &str = "policy::reduce";

/// Result type used by the evaluator.
pub type EvalResult<T> = Result<T, EvaluationError>;

/// The state of one top-level evaluation.
///
/// A `Reduction` borrows the caller's resolver and state and remembers every
/// policy outcome it has resolved, keyed by lower-cased name, so a policy that
/// appears several times in an expression (including inside groups) is
/// resolved at most once. Create one per evaluation; it is not meant to be
/// reused across expressions.
///
/// # Example
/// ```
/// use policy_expression::{
///     PolicyOutcome,
///     engine::{
///         evaluator::core::Reduction,
///         parser::{tokenize::tokenize, tree::build},
///         value::outcome::Outcome,
///     },
/// };
///
/// let resolver = |name: &str, _: &()| {
///     if name.starts_with("True") { PolicyOutcome::pass() } else { PolicyOutcome::fail("Failed") }
/// };
///
/// let mut tree = build(tokenize("True1 OR False2 AND True3", None).unwrap());
/// let outcome = Reduction::new(&resolver, &()).evaluate(&mut tree).unwrap();
/// assert_eq!(outcome, Outcome::Pass);
/// ```
pub struct Reduction<'a, S: ?Sized> {
    pub(super) resolver: &'a dyn Fn(&str, &S) -> PolicyOutcome,
    pub(super) state:    &'a S,
    logger:              Option<&'a dyn Fn(&str)>,
    pub(super) resolved: HashMap<String, Outcome>,
}

impl<'a, S: ?Sized> Reduction<'a, S> {
    /// Starts a reduction that resolves policies with `resolver` and `state`.
    #[must_use]
    pub fn new(resolver: &'a dyn Fn(&str, &S) -> PolicyOutcome, state: &'a S) -> Self {
        Self { resolver,
               state,
               logger: None,
               resolved: HashMap::new() }
    }

    /// Sends a snapshot of the tokens to `logger` after every fold.
    #[must_use]
    pub fn with_logger(mut self, logger: Option<&'a dyn Fn(&str)>) -> Self {
        self.logger = logger;
        self
    }

    /// Number of distinct policies resolved so far.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    /// Reduces `tree` to a single outcome.
    ///
    /// A tree holding a single node is resolved directly. Otherwise every
    /// `AND` is folded left to right, then every `OR`, and both passes repeat
    /// until one result remains. An `OR` whose left operand or combined result
    /// passes ends the reduction of this level at once with
    /// [`Outcome::Pass`], so the operands to its right are never resolved.
    ///
    /// # Errors
    /// - A syntax error when the resolver rejects a policy name or fails.
    /// - [`EvaluationError::Internal`] when the tree has a shape the tokenizer
    ///   cannot produce, such as two adjacent operators.
    pub fn evaluate(&mut self, tree: &mut ExpressionTree) -> EvalResult<Outcome> {
        match tree.len() {
            0 => return Err(EvaluationError::internal("Cannot evaluate an empty expression.")),
            1 => return self.resolve_operand(tree, 0),
            _ => {},
        }

        loop {
            let before = tree.len();

            self.fold_pass(tree, LogicalOperator::And)?;
            if let Some(outcome) = self.fold_pass(tree, LogicalOperator::Or)? {
                return Ok(outcome);
            }

            if let [Node::Token(Token::Result(outcome))] = tree.nodes() {
                return Ok(outcome.clone());
            }
            if tree.len() == before {
                return Err(EvaluationError::internal(format!("No operator could be folded in '{tree}'.")));
            }
        }
    }

    /// Folds every occurrence of `operator` at this level, left to right.
    ///
    /// Returns the deciding outcome if the pass short-circuited.
    fn fold_pass(&mut self,
                 tree: &mut ExpressionTree,
                 operator: LogicalOperator)
                 -> EvalResult<Option<Outcome>> {
        let mut index = 1;
        while index < tree.len() {
            if !tree.nodes().get(index).is_some_and(|node| operator.matches(node)) {
                index += 1;
                continue;
            }

            let left = self.resolve_operand(tree, index - 1)?;
            if operator.short_circuits(&left) {
                return Ok(Some(left));
            }
            let right = self.resolve_operand(tree, index + 1)?;
            let outcome = operator.combine(left, right);
            if operator.short_circuits(&outcome) {
                return Ok(Some(outcome));
            }

            if !tree.fold(index, outcome) {
                return Err(EvaluationError::internal(format!("The {operator} operator at index {index} \
                                                              is missing an operand.")));
            }
            self.trace(tree);
        }
        Ok(None)
    }

    fn trace(&self, tree: &ExpressionTree) {
        if self.logger.is_none() && !log::log_enabled!(target: LOG_TARGET, log::Level::Trace) {
            return;
        }
        let snapshot = tree.to_string();
        log::trace!(target: LOG_TARGET, "{snapshot}");
        if let Some(logger) = self.logger {
            logger(&snapshot);
        }
    }
}

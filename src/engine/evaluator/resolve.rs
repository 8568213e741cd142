use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
};

use crate::{
    ast::{ExpressionTree, Node, Token},
    engine::{
        evaluator::core::{EvalResult, Reduction},
        value::outcome::{Failure, Outcome, PolicyOutcome},
    },
    error::{EvaluationError, ResolutionFailure, SyntaxError},
};

const LOG_TARGET: &str = "policy::resolve";

impl<S: ?Sized> Reduction<'_, S> {
    /// Resolves the operand at `index` of `tree`.
    ///
    /// - A group is reduced recursively, and every policy resolved so far is
    ///   then written into `tree` as well.
    /// - A result token yields its stored outcome.
    /// - A policy name is resolved through the caller's resolver (or taken
    ///   from the outcomes already resolved in this reduction), and every
    ///   occurrence of the same name in `tree` is replaced with the outcome.
    ///
    /// # Errors
    /// - A syntax error at the policy's position when the resolver reports
    ///   an unknown name, reports an error, or panics.
    /// - [`EvaluationError::Internal`] when the node at `index` is missing or
    ///   is an operator or parenthesis.
    pub(crate) fn resolve_operand(&mut self,
                                  tree: &mut ExpressionTree,
                                  index: usize)
                                  -> EvalResult<Outcome> {
        let Some(node) = tree.node_mut(index) else {
            return Err(EvaluationError::internal(format!("Expected an operand at index {index}.")));
        };

        match node {
            Node::Group(group) => {
                let outcome = self.evaluate(group)?;
                self.share_resolved(tree);
                Ok(outcome)
            },
            Node::Token(Token::Result(outcome)) => Ok(outcome.clone()),
            Node::Token(Token::PolicyName { name, position }) => {
                let name = name.clone();
                let position = *position;
                let outcome = self.resolve_policy(&name, position)?;
                tree.assign_result(&name, &outcome);
                Ok(outcome)
            },
            Node::Token(token) => {
                Err(EvaluationError::internal(format!("Invalid token '{token}' in operand \
                                                       position {index}.")))
            },
        }
    }

    /// Returns the outcome of the policy `name`, calling the resolver only the
    /// first time a name is seen in this reduction.
    fn resolve_policy(&mut self, name: &str, position: usize) -> EvalResult<Outcome> {
        let key = name.to_lowercase();
        if let Some(outcome) = self.resolved.get(&key) {
            return Ok(outcome.clone());
        }

        let resolver = self.resolver;
        let state = self.state;
        let reported = panic::catch_unwind(AssertUnwindSafe(|| resolver(name, state)));

        let outcome = match reported {
            Ok(PolicyOutcome::Pass) => Outcome::Pass,
            Ok(PolicyOutcome::Fail { message }) => {
                Outcome::Fail(Failure { policy_name: name.to_string(),
                                        message })
            },
            Ok(PolicyOutcome::NotApplicable) => Outcome::NotApplicable,
            Ok(PolicyOutcome::InvalidPolicyName { policy_name }) => {
                return Err(SyntaxError::new(position,
                                            format!("A policy named {policy_name} does not exist."))
                           .into());
            },
            Ok(PolicyOutcome::Error { message }) => {
                return Err(resolution_failed(name, position, message));
            },
            Err(payload) => {
                let details = panic_message(payload.as_ref());
                log::debug!(target: LOG_TARGET,
                            "Resolver panicked for '{name}'; the panic hook has already reported it");
                return Err(resolution_failed(name, position, details));
            },
        };

        self.resolved.insert(key, outcome.clone());
        Ok(outcome)
    }

    /// Replaces every policy name in `tree` that was already resolved with
    /// its outcome.
    fn share_resolved(&self, tree: &mut ExpressionTree) {
        for (key, outcome) in &self.resolved {
            tree.assign_result(key, outcome);
        }
    }
}

fn resolution_failed(name: &str, position: usize, details: String) -> EvaluationError {
    log::debug!(target: LOG_TARGET, "Resolving '{name}' at position {position} failed: {details}");
    let cause = ResolutionFailure { policy_name: name.to_string(),
                                    details };
    SyntaxError::with_source(position, format!("Policy {name} could not be evaluated."), cause).into()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "the resolver panicked".to_string()
    }
}

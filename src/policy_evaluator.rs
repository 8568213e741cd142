use std::fmt;

use crate::{
    engine::{
        evaluator::core::Reduction,
        parser::{tokenize::tokenize, tree::build},
        value::outcome::{ExpressionOutcome, PolicyOutcome},
    },
    error::EvaluationError,
    options::EvaluatorOptions,
};

const LOG_TARGET: &str = "policy";

/// Caller logic that decides the outcome of one named policy, given the
/// caller's state.
pub type Resolver<S> = dyn Fn(&str, &S) -> PolicyOutcome + Send + Sync;

/// Evaluates policy expressions against a caller-supplied resolver.
///
/// The evaluator holds no per-evaluation state: every call to
/// [`PolicyEvaluator::evaluate_expression`] tokenizes, builds and reduces its
/// own tree, so one evaluator can be shared between threads. Whatever state
/// the resolver needs is passed in per call as `&S`.
///
/// A panicking resolver does not unwind through the evaluator; the panic is
/// caught and returned as a syntax error at the policy's position. The
/// process panic hook still runs first, so the default hook prints the panic
/// message to stderr. Install a custom hook with [`std::panic::set_hook`] to
/// silence it.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use policy_expression::{PolicyEvaluator, PolicyOutcome, options::EvaluatorOptions};
///
/// struct Claims {
///     values: HashMap<&'static str, &'static str>,
/// }
///
/// let options =
///     EvaluatorOptions::builder().check_policy_name_with(|name, _: &Claims| {
///                                    matches!(name, "HasEmail" | "IsAdult")
///                                })
///                                .build();
///
/// let evaluator = PolicyEvaluator::with_options(|name, claims: &Claims| match name {
///                                                   "HasEmail" => claims.values.contains_key("email").into(),
///                                                   "IsAdult" => PolicyOutcome::fail("Too young."),
///                                                   _ => PolicyOutcome::invalid_policy_name(name),
///                                               },
///                                               options);
///
/// let claims = Claims { values: HashMap::from([("email", "flash@justice-league.com")]) };
/// let outcome = evaluator.evaluate_expression("HasEmail AND IsAdult", &claims).unwrap();
/// assert_eq!(outcome.not_satisfied(), Some(("IsAdult", "Too young.")));
///
/// let error = evaluator.evaluate_expression("HasEmail AND IsAdmin", &claims).unwrap_err();
/// assert_eq!(error.as_syntax().map(|e| e.position()), Some(13));
/// ```
pub struct PolicyEvaluator<S: ?Sized = ()> {
    resolver: Box<Resolver<S>>,
    options:  EvaluatorOptions<S>,
}

impl<S: ?Sized> PolicyEvaluator<S> {
    /// Creates an evaluator with default options.
    #[must_use]
    pub fn new(resolver: impl Fn(&str, &S) -> PolicyOutcome + Send + Sync + 'static) -> Self {
        Self::with_options(resolver, EvaluatorOptions::default())
    }

    /// Creates an evaluator with the given options.
    #[must_use]
    pub fn with_options(resolver: impl Fn(&str, &S) -> PolicyOutcome + Send + Sync + 'static,
                        options: EvaluatorOptions<S>)
                        -> Self {
        Self { resolver: Box::new(resolver),
               options }
    }

    /// The options this evaluator was built with.
    #[must_use]
    pub const fn options(&self) -> &EvaluatorOptions<S> {
        &self.options
    }

    /// Evaluates `expression` and reports whether it is satisfied.
    ///
    /// A final not-applicable outcome counts as satisfied. A failed
    /// expression reports the policy whose failure decided it.
    ///
    /// # Parameters
    /// - `expression`: The expression, or `None` when the caller has none.
    /// - `state`: Caller data handed to the resolver and the name checker.
    ///
    /// # Errors
    /// - [`EvaluationError::MissingExpression`] when `expression` is `None`.
    /// - [`EvaluationError::Syntax`] for malformed expressions, unknown policy
    ///   names and resolver failures.
    /// - [`EvaluationError::Internal`] if the engine reaches an inconsistent
    ///   state.
    pub fn evaluate_expression<'e>(&self,
                                   expression: impl Into<Option<&'e str>>,
                                   state: &S)
                                   -> Result<ExpressionOutcome, EvaluationError> {
        let expression = expression.into().ok_or(EvaluationError::MissingExpression)?;
        let name_checker = self.options.name_checker();
        let check_name = |name: &str| name_checker.is_none_or(|check| check(name, state));

        evaluate_with(expression,
                      self.resolver.as_ref(),
                      state,
                      name_checker.is_some().then_some(&check_name as &dyn Fn(&str) -> bool),
                      self.options.logger().map(|logger| logger as &dyn Fn(&str)))
    }
}

impl PolicyEvaluator {
    /// Creates an evaluator whose resolver does not need caller state.
    ///
    /// # Example
    /// ```
    /// use policy_expression::{PolicyEvaluator, PolicyOutcome};
    ///
    /// let evaluator = PolicyEvaluator::stateless(|name| (name == "Open").into());
    /// assert!(evaluator.evaluate_expression("Closed OR Open", &()).unwrap().is_satisfied());
    /// ```
    #[must_use]
    pub fn stateless(resolver: impl Fn(&str) -> PolicyOutcome + Send + Sync + 'static) -> Self {
        Self::new(move |name, _| resolver(name))
    }
}

impl<S: ?Sized> fmt::Debug for PolicyEvaluator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyEvaluator")
         .field("options", &self.options)
         .finish_non_exhaustive()
    }
}

/// Runs the tokenizer, the tree builder and the evaluator over `expression`.
pub(crate) fn evaluate_with<S: ?Sized>(expression: &str,
                                       resolver: &dyn Fn(&str, &S) -> PolicyOutcome,
                                       state: &S,
                                       name_is_valid: Option<&dyn Fn(&str) -> bool>,
                                       logger: Option<&dyn Fn(&str)>)
                                       -> Result<ExpressionOutcome, EvaluationError> {
    let tokens = tokenize(expression, name_is_valid)?;
    log::debug!(target: LOG_TARGET, "Evaluating '{expression}' ({} tokens)", tokens.len());

    let mut tree = build(tokens);
    let mut reduction = Reduction::new(resolver, state).with_logger(logger);
    let outcome = reduction.evaluate(&mut tree)?;

    log::debug!(target: LOG_TARGET,
                "'{expression}' evaluated to {outcome} after resolving {} policies",
                reduction.resolved_count());
    Ok(ExpressionOutcome::from(outcome))
}

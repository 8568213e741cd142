use std::fmt;

/// Checks at tokenize time whether a policy with the given name exists.
pub type NameChecker<S> = dyn Fn(&str, &S) -> bool + Send + Sync;

/// Receives a rendered snapshot of the expression after every fold.
pub type DiagnosticLogger = dyn Fn(&str) + Send + Sync;

/// Optional collaborators of a [`crate::PolicyEvaluator`].
///
/// Options are fixed once the evaluator is built. Both collaborators may be
/// called from several threads at once when the evaluator is shared.
pub struct EvaluatorOptions<S: ?Sized = ()> {
    name_checker: Option<Box<NameChecker<S>>>,
    logger:       Option<Box<DiagnosticLogger>>,
}

impl<S: ?Sized> EvaluatorOptions<S> {
    /// Starts building options.
    ///
    /// # Example
    /// ```
    /// use policy_expression::options::EvaluatorOptions;
    ///
    /// let options = EvaluatorOptions::<()>::builder().check_policy_name(|name| name.ends_with('1'))
    ///                                                 .log_with(|snapshot| println!("{snapshot}"))
    ///                                                 .build();
    /// assert!(options.name_checker().is_some());
    /// assert!(options.logger().is_some());
    /// ```
    #[must_use]
    pub fn builder() -> EvaluatorOptionsBuilder<S> {
        EvaluatorOptionsBuilder { options: Self::default() }
    }

    /// The policy-name checker, if one was configured.
    #[must_use]
    pub fn name_checker(&self) -> Option<&NameChecker<S>> {
        self.name_checker.as_deref()
    }

    /// The diagnostic logger, if one was configured.
    #[must_use]
    pub fn logger(&self) -> Option<&DiagnosticLogger> {
        self.logger.as_deref()
    }
}

impl<S: ?Sized> Default for EvaluatorOptions<S> {
    fn default() -> Self {
        Self { name_checker: None,
               logger:       None, }
    }
}

impl<S: ?Sized> fmt::Debug for EvaluatorOptions<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluatorOptions")
         .field("name_checker", &self.name_checker.is_some())
         .field("logger", &self.logger.is_some())
         .finish()
    }
}

/// Fluent builder for [`EvaluatorOptions`].
pub struct EvaluatorOptionsBuilder<S: ?Sized = ()> {
    options: EvaluatorOptions<S>,
}

impl<S: ?Sized> EvaluatorOptionsBuilder<S> {
    /// Validates every policy name while tokenizing, using the caller's state.
    ///
    /// A name for which `checker` returns `false` fails the evaluation with a
    /// syntax error before any policy is resolved.
    #[must_use]
    pub fn check_policy_name_with(mut self,
                                  checker: impl Fn(&str, &S) -> bool + Send + Sync + 'static)
                                  -> Self {
        self.options.name_checker = Some(Box::new(checker));
        self
    }

    /// Validates every policy name while tokenizing, ignoring the caller's
    /// state.
    #[must_use]
    pub fn check_policy_name(self, checker: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.check_policy_name_with(move |name, _| checker(name))
    }

    /// Sends a snapshot of the expression to `logger` after every fold.
    #[must_use]
    pub fn log_with(mut self, logger: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.options.logger = Some(Box::new(logger));
        self
    }

    /// Finishes building.
    #[must_use]
    pub fn build(self) -> EvaluatorOptions<S> {
        self.options
    }
}

impl<S: ?Sized> fmt::Debug for EvaluatorOptionsBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluatorOptionsBuilder")
         .field("options", &self.options)
         .finish()
    }
}

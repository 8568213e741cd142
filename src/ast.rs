use std::fmt;

use crate::engine::value::outcome::Outcome;

/// A lexical or reduced unit of a policy expression.
///
/// Every token produced by the tokenizer carries the zero-based character
/// offset at which it starts. [`Token::Result`] is only ever created by the
/// evaluator when it folds an operator with its operands, or when a resolved
/// policy's outcome is copied onto later occurrences of the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A reference to a policy, such as `BusinessHours`.
    PolicyName {
        /// The identifier as written.
        name:     String,
        /// Character offset in the source expression.
        position: usize,
    },
    /// `AND`
    And {
        /// Character offset in the source expression.
        position: usize,
    },
    /// `OR`
    Or {
        /// Character offset in the source expression.
        position: usize,
    },
    /// `(`
    Open {
        /// Character offset in the source expression.
        position: usize,
    },
    /// `)`
    Close {
        /// Character offset in the source expression.
        position: usize,
    },
    /// An outcome that has already been computed.
    Result(Outcome),
}

impl Token {
    /// Returns the source offset of the token, or `None` for a
    /// [`Token::Result`].
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::PolicyName { position, .. }
            | Self::And { position }
            | Self::Or { position }
            | Self::Open { position }
            | Self::Close { position } => Some(*position),
            Self::Result(_) => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PolicyName { name, .. } => write!(f, "{name}"),
            Self::And { .. } => write!(f, "AND"),
            Self::Or { .. } => write!(f, "OR"),
            Self::Open { .. } => write!(f, "("),
            Self::Close { .. } => write!(f, ")"),
            Self::Result(outcome) => write!(f, "{outcome}"),
        }
    }
}

/// One element of an [`ExpressionTree`]: either a token or a parenthesized
/// group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A single token.
    Token(Token),
    /// A parenthesized sub-expression.
    Group(ExpressionTree),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => write!(f, "{token}"),
            Self::Group(tree) => write!(f, "({tree})"),
        }
    }
}

/// The tokens of one nesting level, in source order.
///
/// Groups are stored inline as [`Node::Group`]. The tree is mutated during
/// evaluation: every fold replaces an operator and its two operands with a
/// single [`Token::Result`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionTree {
    nodes: Vec<Node>,
}

impl ExpressionTree {
    /// Creates a tree from the nodes of one level.
    #[must_use]
    pub const fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// The nodes at this level.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes at this level.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if this level holds no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    /// Replaces the operator at `operator` and both of its neighbours with a
    /// single result token.
    ///
    /// Returns `false`, leaving the tree untouched, when the operator has no
    /// left or right neighbour.
    pub(crate) fn fold(&mut self, operator: usize, outcome: Outcome) -> bool {
        let Some(left) = operator.checked_sub(1) else {
            return false;
        };
        if operator + 1 >= self.nodes.len() {
            return false;
        }
        self.nodes.drain(operator..=operator + 1);
        self.nodes[left] = Node::Token(Token::Result(outcome));
        true
    }

    /// Replaces every occurrence of `policy_name`, compared case-insensitively
    /// and including occurrences inside groups, with `outcome`.
    pub(crate) fn assign_result(&mut self, policy_name: &str, outcome: &Outcome) {
        let key = policy_name.to_lowercase();
        self.assign_result_by_key(&key, outcome);
    }

    fn assign_result_by_key(&mut self, key: &str, outcome: &Outcome) {
        for node in &mut self.nodes {
            match node {
                Node::Token(Token::PolicyName { name, .. }) if name.to_lowercase() == key => {
                    *node = Node::Token(Token::Result(outcome.clone()));
                },
                Node::Group(tree) => tree.assign_result_by_key(key, outcome),
                Node::Token(_) => {},
            }
        }
    }
}

impl fmt::Display for ExpressionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, node) in self.nodes.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

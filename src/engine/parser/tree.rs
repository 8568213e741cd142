use crate::ast::{ExpressionTree, Node, Token};

/// Groups a flat token sequence into an [`ExpressionTree`].
///
/// Tokens between an `Open` and its `Close` are collected into one
/// [`Node::Group`] that takes their place in the outer level. The parenthesis
/// tokens themselves are dropped. The tokenizer guarantees balanced
/// parentheses nested at most one level deep, so the result has at most one
/// level of groups.
///
/// # Example
/// ```
/// use policy_expression::engine::parser::{tokenize::tokenize, tree::build};
///
/// let tree = build(tokenize("(A OR B) AND C", None).unwrap());
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.to_string(), "(A OR B) AND C");
/// ```
#[must_use]
pub fn build(tokens: Vec<Token>) -> ExpressionTree {
    let mut outer = Vec::with_capacity(tokens.len());
    let mut group: Option<Vec<Node>> = None;

    for token in tokens {
        match token {
            Token::Open { .. } => group = Some(Vec::new()),
            Token::Close { .. } => {
                if let Some(nodes) = group.take() {
                    outer.push(Node::Group(ExpressionTree::new(nodes)));
                }
            },
            token => match group.as_mut() {
                Some(nodes) => nodes.push(Node::Token(token)),
                None => outer.push(Node::Token(token)),
            },
        }
    }

    ExpressionTree::new(outer)
}

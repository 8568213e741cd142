/// Tokenization.
///
/// Turns the expression text into positional tokens while enforcing the
/// grammar, identifier rules, and optional policy-name validation.
pub mod tokenize;

/// Tree building.
///
/// Groups the flat token sequence into one expression tree with parenthesized
/// groups as nested trees.
pub mod tree;

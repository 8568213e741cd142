/// The evaluator reduces expression trees to outcomes.
///
/// The evaluator folds `AND` operators before `OR` operators at every level,
/// resolves each policy name through the caller's resolver at most once per
/// evaluation, and stops reducing a level as soon as an `OR` passes.
///
/// # Responsibilities
/// - Applies operator precedence, memoization and short-circuiting.
/// - Combines outcomes with three-valued logic.
/// - Converts resolver failures into located syntax errors.
pub mod evaluator;
/// The lexer module splits expression text into raw lexemes.
///
/// The lexer recognizes parentheses, the `AND` / `OR` keywords and words,
/// skipping the spaces between them. It reports byte spans; the tokenizer
/// turns them into character offsets.
pub mod lexer;
/// The parser module turns lexemes into an expression tree.
///
/// # Responsibilities
/// - Enforces the grammar and the identifier rules, reporting errors with
///   their character offset.
/// - Optionally validates policy names while tokenizing.
/// - Groups parenthesized tokens into nested trees.
pub mod parser;
/// The value module defines the outcomes the engine works with.
pub mod value;

use logos::Logos;

/// A raw lexical unit of a policy expression.
///
/// The lexer only splits the input; deciding whether a word is a valid
/// identifier and whether a lexeme may appear where it does is left to the
/// tokenizer. Spaces separate lexemes and are skipped. Any other run of
/// characters that are not spaces or parentheses is a single
/// [`Lexeme::Word`], so `AND&` or `a\tb` reach the tokenizer whole.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
pub enum Lexeme {
    /// `(`
    #[token("(")]
    Open,
    /// `)`
    #[token(")")]
    Close,
    /// `AND` (case-sensitive).
    #[token("AND")]
    And,
    /// `OR` (case-sensitive).
    #[token("OR")]
    Or,
    /// Any other maximal run of characters other than space and parentheses.
    #[regex(r"[^ ()]+", |lex| lex.slice().to_string(), allow_greedy = true)]
    Word(String),
    /// Spaces.
    #[regex(r" +", logos::skip)]
    Ignored,
}

/// Splits `source` into lexemes paired with their byte spans.
///
/// # Example
/// ```
/// use policy_expression::engine::lexer::{Lexeme, lex};
///
/// let lexemes: Vec<_> = lex("(A OR B)").collect();
/// assert_eq!(lexemes[0], (Ok(Lexeme::Open), 0..1));
/// assert_eq!(lexemes[2], (Ok(Lexeme::Or), 3..5));
/// ```
pub fn lex(source: &str) -> impl Iterator<Item = (Result<Lexeme, ()>, std::ops::Range<usize>)> + '_ {
    Lexeme::lexer(source).spanned()
}

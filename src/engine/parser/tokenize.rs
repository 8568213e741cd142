use crate::{
    ast::Token,
    engine::lexer::{Lexeme, lex},
    error::SyntaxError,
    util::text::{char_offset, end_offset},
};

/// Result type used by the tokenizer.
pub type TokenizeResult<T> = Result<T, SyntaxError>;

/// The kind of token that came immediately before the one being read.
///
/// Every grammar rule of the expression language is decided from this alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Preceding {
    Start,
    PolicyName,
    Operator,
    Open,
    Close,
}

/// Tokenizes a policy expression.
///
/// Scans `expression` left to right and enforces the grammar token by token:
///
/// ```text
///     expr       := term (("AND" | "OR") term)*
///     term       := IDENTIFIER | "(" expr ")"
///     IDENTIFIER := letter (letter | digit | "_")*
/// ```
///
/// Parentheses nest at most one level deep. When `name_is_valid` is given,
/// every identifier is checked as soon as it is read, so an unknown policy is
/// reported here instead of during evaluation.
///
/// # Parameters
/// - `expression`: The expression text.
/// - `name_is_valid`: Optional check that a policy with a given name exists.
///
/// # Returns
/// The tokens in source order, including `Open` and `Close`.
///
/// # Errors
/// Returns a [`SyntaxError`] at the offending character offset, or at the end
/// of input for a dangling operator or an unclosed parenthesis. An empty or
/// blank expression fails at offset 0.
///
/// # Example
/// ```
/// use policy_expression::{ast::Token, engine::parser::tokenize::tokenize};
///
/// let tokens = tokenize("A OR (B)", None).unwrap();
/// assert_eq!(tokens[1], Token::Or { position: 2 });
/// assert_eq!(tokens[2], Token::Open { position: 5 });
///
/// let error = tokenize("A AND", None).unwrap_err();
/// assert_eq!(error.position(), 5);
/// ```
pub fn tokenize(expression: &str,
                name_is_valid: Option<&dyn Fn(&str) -> bool>)
                -> TokenizeResult<Vec<Token>> {
    if expression.is_empty() {
        return Err(SyntaxError::new(0, "Expression is empty."));
    }

    let mut tokens = Vec::new();
    let mut preceding = Preceding::Start;
    let mut nested = false;

    for (lexeme, span) in lex(expression) {
        let position = char_offset(expression, span.start);
        let lexeme = lexeme.map_err(|()| {
                               SyntaxError::new(position,
                                                "Unrecognized character in expression.")
                           })?;

        let token = match lexeme {
            Lexeme::Open => {
                if !matches!(preceding, Preceding::Start | Preceding::Operator) {
                    return Err(SyntaxError::new(position,
                                                "Invalid place for an opening parenthesis."));
                }
                if nested {
                    return Err(SyntaxError::new(position, "Cannot nest more than one level."));
                }
                nested = true;
                preceding = Preceding::Open;
                Token::Open { position }
            },
            Lexeme::Close => {
                if preceding != Preceding::PolicyName {
                    return Err(SyntaxError::new(position,
                                                "Invalid place for a closing parenthesis."));
                }
                if !nested {
                    return Err(SyntaxError::new(position,
                                                "Cannot close a parenthesis that was not opened."));
                }
                nested = false;
                preceding = Preceding::Close;
                Token::Close { position }
            },
            Lexeme::And => {
                expect_operand_before(preceding, position, "AND")?;
                preceding = Preceding::Operator;
                Token::And { position }
            },
            Lexeme::Or => {
                expect_operand_before(preceding, position, "OR")?;
                preceding = Preceding::Operator;
                Token::Or { position }
            },
            Lexeme::Word(name) => {
                read_policy_name(&name, position, preceding, name_is_valid)?;
                preceding = Preceding::PolicyName;
                Token::PolicyName { name, position }
            },
            Lexeme::Ignored => continue,
        };
        tokens.push(token);
    }

    if preceding == Preceding::Start {
        return Err(SyntaxError::new(0, "Expression is blank."));
    }

    let end = end_offset(expression);
    if !matches!(preceding, Preceding::PolicyName | Preceding::Close) {
        return Err(SyntaxError::new(end,
                                    "Expression should end with a policy name or a closing \
                                     parenthesis."));
    }
    if nested {
        return Err(SyntaxError::new(end, "Nested expression is not closed."));
    }

    Ok(tokens)
}

/// Returns `true` if `name` is a syntactically valid policy identifier: a
/// letter followed by letters, digits or underscores.
///
/// # Example
/// ```
/// use policy_expression::engine::parser::tokenize::is_valid_policy_name;
///
/// assert!(is_valid_policy_name("Young_Enough2"));
/// assert!(!is_valid_policy_name("2Young"));
/// assert!(!is_valid_policy_name("AND&"));
/// assert!(!is_valid_policy_name(""));
/// ```
#[must_use]
pub fn is_valid_policy_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(char::is_alphabetic)
    && chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn expect_operand_before(preceding: Preceding,
                         position: usize,
                         operator: &str)
                         -> TokenizeResult<()> {
    if matches!(preceding, Preceding::PolicyName | Preceding::Close) {
        Ok(())
    } else {
        Err(SyntaxError::new(position, format!("Invalid place for an {operator} operator.")))
    }
}

fn read_policy_name(name: &str,
                    position: usize,
                    preceding: Preceding,
                    name_is_valid: Option<&dyn Fn(&str) -> bool>)
                    -> TokenizeResult<()> {
    if !is_valid_policy_name(name) {
        return Err(SyntaxError::new(position,
                                    format!("Invalid policy name or unrecognized token in \
                                             expression: {name}.")));
    }
    if !matches!(preceding,
                 Preceding::Start | Preceding::Operator | Preceding::Open)
    {
        return Err(SyntaxError::new(position,
                                    format!("Invalid place for a policy name - {name}.")));
    }
    if let Some(check) = name_is_valid
       && !check(name)
    {
        return Err(SyntaxError::new(position,
                                    format!("A policy named {name} does not exist.")));
    }
    Ok(())
}

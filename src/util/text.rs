/// Converts a byte index into `source` to a zero-based character offset.
///
/// Lexer spans are byte ranges, while every position reported to callers is
/// counted in characters so that a caret can be placed under the offending
/// character of a non-ASCII expression.
///
/// # Parameters
/// - `source`: The full expression text.
/// - `byte_index`: A byte index on a character boundary of `source`.
///
/// # Returns
/// The number of characters that precede `byte_index`. Indices past the end
/// of `source` are clamped to its character count.
///
/// # Example
/// ```
/// use policy_expression::util::text::char_offset;
///
/// assert_eq!(char_offset("A AND B", 6), 6);
/// assert_eq!(char_offset("Ä AND B", 3), 2);
/// ```
#[must_use]
pub fn char_offset(source: &str, byte_index: usize) -> usize {
    source.char_indices()
          .take_while(|(index, _)| *index < byte_index)
          .count()
}

/// Returns the number of characters in `source`.
///
/// This is the position reported for errors detected at end of input.
#[must_use]
pub fn end_offset(source: &str) -> usize {
    source.chars().count()
}

/// Renders `expression` with a caret under the character at `position`.
///
/// The result has two lines: the expression itself and a line of spaces
/// ending in `^`. A position at end of input places the caret one column past
/// the last character.
///
/// # Example
/// ```
/// use policy_expression::util::text::caret_line;
///
/// assert_eq!(caret_line("True1 AND", 9), "True1 AND\n         ^");
/// ```
#[must_use]
pub fn caret_line(expression: &str, position: usize) -> String {
    let mut rendered = String::with_capacity(expression.len() + position + 2);
    rendered.push_str(expression);
    rendered.push('\n');
    rendered.extend(std::iter::repeat_n(' ', position));
    rendered.push('^');
    rendered
}

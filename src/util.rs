/// Text position helpers.
///
/// This module converts between the byte spans produced by the lexer and the
/// character offsets reported in errors, and renders a caret line under an
/// error position for display.
pub mod text;

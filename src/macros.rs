//! Token construction macros shared by the lexer's pattern table.

/// Builds a `Token` from a kind, its text and its span.
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Expands to a lexer handler for a token with fixed text.
///
/// The handler pushes one token of `$kind` covering `$value` and advances
/// past it; the matched regex is not consulted.
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^%=").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::PercentEquals, "%="),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| {
            let span = lexer.span($value.len());
            lexer.push(MK_TOKEN!($kind, String::from($value), span));
            lexer.advance_n($value.len());
        }
    };
}

//! Parameter type annotations.
//!
//! The only type keyword is `number`; it may be followed by any number of
//! dimension brackets, each holding an optional size expression:
//!
//! - `number` is a scalar
//! - `number[3]` is a vector of statically known length
//! - `number[n][]` is a matrix of runtime-determined shape

use crate::{
    ast::ast::Expr,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expr, lookups::BindingPower, parser::Parser};

/// Parses `number ("[" expr? "]")*` into its dimension list.
///
/// # Returns
///
/// One entry per bracket pair, `None` for an empty `[]`.
pub fn parse_dimensions(parser: &mut Parser) -> Result<Vec<Option<Expr>>, Error> {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected type 'number'"),
        },
        parser.get_position(),
    );
    parser.expect_error(TokenKind::NumberType, Some(error))?;

    let mut dimensions = vec![];
    while parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();

        if parser.current_token_kind() == TokenKind::CloseBracket {
            dimensions.push(None);
        } else {
            dimensions.push(Some(parse_expr(parser, BindingPower::Default)?));
        }

        parser.expect(TokenKind::CloseBracket)?;
    }

    Ok(dimensions)
}

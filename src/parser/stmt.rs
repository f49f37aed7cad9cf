use crate::{
    ast::{
        ast::{Stmt, StmtKind},
        expressions::CompoundOperator,
        statements::{FnDecl, Parameter, Target},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{parser::Parser, types::parse_dimensions};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = match parser.get_stmt_lookup().get(&parser.current_token_kind()) {
        Some(handler) => *handler,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("expected a statement"),
                },
                parser.get_position(),
            ))
        }
    };

    handler(parser)
}

/// Parses `{ stmt* }`.
pub fn parse_block(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut body = vec![];
    while parser.has_tokens() && parser.current_token_kind() != TokenKind::CloseCurly {
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(body)
}

/// A branch arm is either a block or a single statement.
fn parse_body(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    if parser.current_token_kind() == TokenKind::OpenCurly {
        parse_block(parser)
    } else {
        Ok(vec![parse_stmt(parser)?])
    }
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let pass = parse_body(parser)?;

    let fail = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(parse_body(parser)?)
    } else {
        None
    };

    Ok(Stmt::new(
        StmtKind::If {
            condition,
            pass,
            fail,
        },
        Span {
            start,
            end: parser.get_end_position(),
        },
    ))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::new(
        StmtKind::Return(value),
        Span {
            start,
            end: parser.get_end_position(),
        },
    ))
}

fn parse_target(parser: &mut Parser) -> Result<Target, Error> {
    let name_token = parser.expect(TokenKind::Identifier)?;

    let mut indices = vec![];
    while parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();
        indices.push(parse_expr(parser, BindingPower::Default)?);
        parser.expect(TokenKind::CloseBracket)?;
    }

    Ok(Target {
        name: name_token.value,
        indices,
        span: Span {
            start: name_token.span.start,
            end: parser.get_end_position(),
        },
    })
}

pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let target = parse_target(parser)?;
    let start = target.span.start.clone();

    let operator_token = parser.advance();
    let compound = match operator_token.kind {
        TokenKind::Assignment => None,
        kind => match CompoundOperator::from_token(kind) {
            Some(operator) => Some(operator),
            None => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: operator_token.value,
                        message: String::from("expected an assignment operator"),
                    },
                    operator_token.span.start,
                ))
            }
        },
    };

    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    let span = Span {
        start,
        end: parser.get_end_position(),
    };

    let kind = match compound {
        None => StmtKind::Assignment { target, value },
        Some(operator) => StmtKind::CompoundAssignment {
            operator,
            target,
            value,
        },
    };

    Ok(Stmt::new(kind, span))
}

fn parse_parameter(parser: &mut Parser) -> Result<Parameter, Error> {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected parameter name"),
        },
        parser.get_position(),
    );
    let name_token = parser.expect_error(TokenKind::Identifier, Some(error))?;

    parser.expect(TokenKind::Colon)?;
    let dimensions = parse_dimensions(parser)?;

    Ok(Parameter {
        name: name_token.value,
        dimensions,
        span: Span {
            start: name_token.span.start,
            end: parser.get_end_position(),
        },
    })
}

pub fn parse_fn_decl(parser: &mut Parser) -> Result<FnDecl, Error> {
    let start = parser.get_position();

    if parser.current_token_kind() == TokenKind::Fn {
        parser.advance();
    }

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected function name"),
        },
        parser.get_position(),
    );
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            parameters.push(parse_parameter(parser)?);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(FnDecl {
        name,
        parameters,
        body,
        span: Span {
            start,
            end: parser.get_end_position(),
        },
    })
}

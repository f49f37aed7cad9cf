use crate::{
    ast::{
        ast::{Expr, ExprKind},
        expressions::{BinaryOperator, PrefixOperator},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ))
        }
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);

        if token_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(parser.unexpected("expected an operator")),
        };

        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let token = parser.advance();
            match token.value.parse::<f64>() {
                Ok(value) => Ok(Expr::new(ExprKind::Number(value), token.span)),
                Err(_) => Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span.start,
                )),
            }
        }
        TokenKind::Identifier => {
            let token = parser.advance();
            Ok(Expr::new(
                ExprKind::Variable {
                    name: token.value,
                    indices: vec![],
                },
                token.span,
            ))
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = BinaryOperator::from_token(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value.clone(),
            },
            operator_token.span.start.clone(),
        )
    })?;

    let right = parse_expr(parser, bp)?;
    let span = Span {
        start: left.span.start.clone(),
        end: right.span.end.clone(),
    };

    Ok(Expr::new(
        ExprKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let operator = PrefixOperator::from_token(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.value.clone(),
            },
            operator_token.span.start.clone(),
        )
    })?;

    let operand = parse_expr(parser, BindingPower::Unary)?;
    let span = Span {
        start: operator_token.span.start,
        end: operand.span.end.clone(),
    };

    Ok(Expr::new(
        ExprKind::Prefix {
            operator,
            operand: Box::new(operand),
        },
        span,
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// Parses comma separated expressions up to and including `close`.
pub fn parse_expr_list(parser: &mut Parser, close: TokenKind) -> Result<Vec<Expr>, Error> {
    let mut exprs = vec![];

    if parser.current_token_kind() != close {
        loop {
            exprs.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }
    }

    parser.expect(close)?;

    Ok(exprs)
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let name = match left.kind {
        ExprKind::Variable { name, indices } if indices.is_empty() => name,
        _ => return Err(parser.unexpected("only named functions can be called")),
    };

    parser.advance();
    let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;

    Ok(Expr::new(
        ExprKind::Call { name, arguments },
        Span {
            start: left.span.start,
            end: parser.get_end_position(),
        },
    ))
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let (name, mut indices) = match left.kind {
        ExprKind::Variable { name, indices } => (name, indices),
        _ => return Err(parser.unexpected("only variables can be indexed")),
    };

    parser.advance();
    indices.push(parse_expr(parser, BindingPower::Default)?);
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::new(
        ExprKind::Variable { name, indices },
        Span {
            start: left.span.start,
            end: parser.get_end_position(),
        },
    ))
}

pub fn parse_list_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start;
    let elements = parse_expr_list(parser, TokenKind::CloseBracket)?;

    Ok(Expr::new(
        ExprKind::List { elements },
        Span {
            start,
            end: parser.get_end_position(),
        },
    ))
}

pub fn parse_new_array_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // new number[3][n]
    let start = parser.advance().span.start;
    parser.expect(TokenKind::NumberType)?;

    let mut dimensions = vec![];
    while parser.current_token_kind() == TokenKind::OpenBracket {
        parser.advance();
        dimensions.push(parse_expr(parser, BindingPower::Default)?);
        parser.expect(TokenKind::CloseBracket)?;
    }

    if dimensions.is_empty() {
        return Err(parser.unexpected("expected at least one array dimension"));
    }

    Ok(Expr::new(
        ExprKind::NewArray { dimensions },
        Span {
            start,
            end: parser.get_end_position(),
        },
    ))
}

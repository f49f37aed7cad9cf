//! Unit tests for the lexer module.
//!
//! Covers keywords, identifiers, numeric literals, operators,
//! comments, positions and the unrecognised-character error.

use std::rc::Rc;

use super::{lexer::tokenize, tokens::TokenKind};
use crate::errors::errors::ErrorImpl;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, Rc::new("test.arr".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("fn return if else new number"),
        vec![
            TokenKind::Fn,
            TokenKind::Return,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::New,
            TokenKind::NumberType,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo baz_123 _under numbers", Rc::new("test.arr".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "baz_123");
    assert_eq!(tokens[2].value, "_under");
    // A keyword prefix does not make a keyword.
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "numbers");
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 100.5", Rc::new("test.arr".to_string())).unwrap();

    let values: Vec<&str> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["42", "3.14", "0", "100.5", "EOF"]);
    assert!(tokens[..4].iter().all(|t| t.kind == TokenKind::Number));
}

#[test]
fn test_tokenize_compound_operators() {
    assert_eq!(
        kinds("+= -= *= /= %= == != <= >= && ||"),
        vec![
            TokenKind::PlusEquals,
            TokenKind::MinusEquals,
            TokenKind::StarEquals,
            TokenKind::SlashEquals,
            TokenKind::PercentEquals,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_single_operators() {
    assert_eq!(
        kinds("+ - * / % = ! < > ; : , [ ] { } ( )"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Assignment,
            TokenKind::Not,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    assert_eq!(
        kinds("x // the rest is ignored ;;\ny"),
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_token_positions() {
    let tokens = tokenize("a  +\n b", Rc::new("test.arr".to_string())).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[1].span.start.0, 3);
    assert_eq!(tokens[1].span.end.0, 4);
    assert_eq!(tokens[2].span.start.0, 6);
    assert_eq!(*tokens[2].span.start.1, "test.arr");
}

#[test]
fn test_tokenize_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
}

#[test]
fn test_unrecognised_token() {
    let error = tokenize("x = @;", Rc::new("test.arr".to_string())).unwrap_err();

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::UnrecognisedToken {
            token: "@".to_string()
        }
    );
    assert_eq!(error.get_position().0, 4);
    assert_eq!(error.headline(), "Lexical Error:");
}

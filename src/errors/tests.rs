//! Unit tests for error handling.
//!
//! This module contains tests for error classification and report formatting.

use crate::errors::errors::{Error, ErrorImpl, ErrorKind, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn position() -> Position {
    Position(0, Rc::new("test.arr".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(10, Rc::new("test.arr".to_string())),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 10);
    assert_eq!(error.get_kind(), ErrorKind::SyntaxError);
}

#[test]
fn test_lexical_headline() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        position(),
    );

    assert_eq!(error.report(), "Lexical Error:\n    Unrecognised token `@'.");
}

#[test]
fn test_plain_headline() {
    let error = Error::new(
        ErrorImpl::FunctionAlreadyDeclared {
            function: "f".to_string(),
        },
        position(),
    );

    assert_eq!(error.headline(), "Error:");
    assert_eq!(error.get_kind(), ErrorKind::DeclarationError);
}

#[test]
fn test_function_headline() {
    let error = Error::new(ErrorImpl::MultipleReturnTypes, position()).in_function("h");

    assert_eq!(
        error.report(),
        "Error in function 'h':\n    Multiple types of return values."
    );
    assert_eq!(error.get_kind(), ErrorKind::ControlFlowError);
}

#[test]
fn test_innermost_function_wins() {
    let error = Error::new(ErrorImpl::ExpectedNumber, position())
        .in_function("inner")
        .in_function("outer");

    assert_eq!(error.get_function(), Some("inner"));
}

#[test]
fn test_taxonomy() {
    let cases = [
        (
            ErrorImpl::TooManyIndices {
                variable: "a".to_string(),
                dimensions: 1,
            },
            ErrorKind::ShapeError,
        ),
        (
            ErrorImpl::UndeclaredFunction {
                function: "g".to_string(),
            },
            ErrorKind::ReferenceError,
        ),
        (
            ErrorImpl::ReturnTypeUnknown {
                function: "f".to_string(),
            },
            ErrorKind::RecursionError,
        ),
        (
            ErrorImpl::ArgumentCountMismatch {
                function: "max".to_string(),
                expected: 1,
                received: 0,
            },
            ErrorKind::ArityError,
        ),
        (ErrorImpl::ConditionNotNumber, ErrorKind::TypeError),
        (
            ErrorImpl::IndexOutOfBounds {
                index: 4,
                length: 2,
            },
            ErrorKind::RuntimeError,
        ),
    ];

    for (error_impl, kind) in cases {
        assert_eq!(error_impl.kind(), kind, "{}", error_impl);
    }
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(ErrorImpl::ConditionNotNumber, position());

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        position(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

//! Unit tests for the type system and AST helpers.

use super::{
    ast::{always_returns, Expr, ExprKind, Stmt, StmtKind},
    statements::Parameter,
    types::{compatible, Dim, FunctionType, Type},
};
use crate::Span;

fn number(value: f64) -> Expr {
    Expr::new(ExprKind::Number(value), Span::null())
}

fn ret() -> Stmt {
    Stmt::new(StmtKind::Return(number(1.0)), Span::null())
}

fn branch(pass: Vec<Stmt>, fail: Option<Vec<Stmt>>) -> Stmt {
    Stmt::new(
        StmtKind::If {
            condition: number(1.0),
            pass,
            fail,
        },
        Span::null(),
    )
}

#[test]
fn test_number_compatibility() {
    assert!(compatible(&Type::Number, &Type::Number));
    assert!(!compatible(&Type::Number, &Type::any_array()));
    assert!(!compatible(&Type::any_array(), &Type::Number));
}

#[test]
fn test_unconstrained_array_accepts_any_array() {
    let arrays = [
        Type::Array(vec![Dim::Fixed(3)]),
        Type::Array(vec![Dim::Fixed(2), Dim::Fixed(5)]),
        Type::dynamic_array(4),
        Type::any_array(),
    ];

    for array in arrays.iter() {
        assert!(compatible(array, &Type::any_array()), "{}", array);
    }
}

#[test]
fn test_identical_ranks_are_compatible() {
    let ranks = [
        vec![Dim::Fixed(1)],
        vec![Dim::Fixed(3), Dim::Fixed(3)],
        vec![Dim::Dynamic, Dim::Fixed(7)],
    ];

    for rank in ranks {
        let ty = Type::Array(rank);
        assert!(compatible(&ty, &ty.clone()));
    }
}

#[test]
fn test_fixed_sizes_must_agree() {
    let three = Type::Array(vec![Dim::Fixed(3)]);
    let two = Type::Array(vec![Dim::Fixed(2)]);

    assert!(!compatible(&three, &two));
    assert!(!compatible(&two, &three));
}

#[test]
fn test_rank_count_must_agree() {
    let vector = Type::Array(vec![Dim::Fixed(3)]);
    let matrix = Type::Array(vec![Dim::Fixed(3), Dim::Fixed(3)]);

    assert!(!compatible(&vector, &matrix));
    assert!(!compatible(&matrix, &vector));
    assert!(!compatible(&Type::any_array(), &vector));
}

#[test]
fn test_dynamic_dimension_compares_by_count() {
    let fixed = Type::Array(vec![Dim::Fixed(4), Dim::Fixed(2)]);
    let dynamic = Type::dynamic_array(2);

    assert!(compatible(&fixed, &dynamic));
    assert!(compatible(&dynamic, &fixed));
    assert!(!compatible(&Type::dynamic_array(1), &fixed));
}

#[test]
fn test_functions_are_never_compatible() {
    let function = Type::Function(Box::new(FunctionType::new(vec![Type::Number])));

    assert!(!compatible(&function, &function.clone()));
    assert!(!compatible(&Type::Number, &function));
}

#[test]
fn test_parameter_types() {
    let scalar = Parameter {
        name: "n".to_string(),
        dimensions: vec![],
        span: Span::null(),
    };
    let vector = Parameter {
        name: "a".to_string(),
        dimensions: vec![Some(number(3.0)), None],
        span: Span::null(),
    };
    let symbolic = Parameter {
        name: "b".to_string(),
        dimensions: vec![Some(Expr::new(
            ExprKind::Variable {
                name: "n".to_string(),
                indices: vec![],
            },
            Span::null(),
        ))],
        span: Span::null(),
    };

    assert_eq!(Type::from_parameter(&scalar), Type::Number);
    assert_eq!(
        Type::from_parameter(&vector),
        Type::Array(vec![Dim::Fixed(3), Dim::Dynamic])
    );
    assert_eq!(Type::from_parameter(&symbolic), Type::dynamic_array(1));
}

#[test]
fn test_type_display() {
    assert_eq!(Type::Number.to_string(), "number");
    assert_eq!(
        Type::Array(vec![Dim::Fixed(3), Dim::Dynamic]).to_string(),
        "number[3][]"
    );
    assert_eq!(Type::any_array().to_string(), "number[..]");
}

#[test]
fn test_always_returns() {
    assert!(always_returns(&[ret()]));
    assert!(!always_returns(&[]));
    assert!(!always_returns(&[branch(vec![ret()], None)]));
    assert!(always_returns(&[branch(vec![ret()], Some(vec![ret()]))]));
    assert!(!always_returns(&[branch(vec![ret()], Some(vec![]))]));
    assert!(always_returns(&[branch(vec![ret()], None), ret()]));
}

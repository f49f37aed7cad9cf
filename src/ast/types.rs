//! Type system definitions.
//!
//! The language has a single scalar kind, arrays described by a list of
//! per-dimension markers, and function signatures. The compatibility
//! predicate [`compatible`] is used for assignments, call arguments,
//! list literal homogeneity and return type unification.

use std::fmt::Display;

use super::{
    ast::{Expr, ExprKind},
    statements::Parameter,
};

/// Size marker for one array dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dim {
    /// Statically known size, e.g. from a list literal.
    Fixed(usize),
    /// Size computed at runtime; only the dimension's existence is known.
    Dynamic,
}

impl Dim {
    pub fn matches(&self, other: &Dim) -> bool {
        match (self, other) {
            (Dim::Fixed(a), Dim::Fixed(b)) => a == b,
            _ => true,
        }
    }
}

impl Display for Dim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dim::Fixed(size) => write!(f, "[{}]", size),
            Dim::Dynamic => write!(f, "[]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Number,
    /// An empty rank list matches any array.
    Array(Vec<Dim>),
    Function(Box<FunctionType>),
}

impl Type {
    /// Array with `rank` runtime-sized dimensions.
    pub fn dynamic_array(rank: usize) -> Self {
        Type::Array(vec![Dim::Dynamic; rank])
    }

    /// Any array, regardless of rank.
    pub fn any_array() -> Self {
        Type::Array(vec![])
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Type::Number)
    }

    /// The dimension list for arrays, empty for everything else.
    pub fn rank(&self) -> &[Dim] {
        match self {
            Type::Array(rank) => rank,
            _ => &[],
        }
    }

    /// Builds the type a parameter declaration stands for.
    ///
    /// A dimension written as a numeric literal is a fixed size; any other
    /// expression, or an empty `[]`, is a runtime-sized dimension.
    pub fn from_parameter(parameter: &Parameter) -> Self {
        if parameter.dimensions.is_empty() {
            return Type::Number;
        }

        Type::Array(
            parameter
                .dimensions
                .iter()
                .map(|dimension| match dimension {
                    Some(Expr {
                        kind: ExprKind::Number(size),
                        ..
                    }) if *size >= 0.0 && size.fract() == 0.0 => Dim::Fixed(*size as usize),
                    _ => Dim::Dynamic,
                })
                .collect(),
        )
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Number => write!(f, "number"),
            Type::Array(rank) if rank.is_empty() => write!(f, "number[..]"),
            Type::Array(rank) => {
                write!(f, "number")?;
                for dim in rank {
                    write!(f, "{}", dim)?;
                }
                Ok(())
            }
            Type::Function(function) => write!(f, "{}", function),
        }
    }
}

/// A function signature.
///
/// `result` stays `None` until the body's first return is analyzed, and
/// `complexity` until the whole body is.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub params: Vec<Type>,
    pub rest: Option<Type>,
    pub result: Option<Type>,
    pub complexity: Option<u64>,
}

impl FunctionType {
    pub fn new(params: Vec<Type>) -> Self {
        FunctionType {
            params,
            rest: None,
            result: None,
            complexity: None,
        }
    }
}

impl Display for FunctionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        if let Some(rest) = &self.rest {
            params.push(format!("...{}", rest));
        }

        write!(f, "({})", params.join(", "))?;
        match &self.result {
            Some(result) => write!(f, " -> {}", result),
            None => write!(f, " -> ?"),
        }
    }
}

/// Whether a value of type `actual` may be used where `expected` is required.
pub fn compatible(actual: &Type, expected: &Type) -> bool {
    match (actual, expected) {
        (Type::Number, Type::Number) => true,
        (Type::Array(_), Type::Array(expected)) if expected.is_empty() => true,
        (Type::Array(actual), Type::Array(expected)) => {
            actual.len() == expected.len()
                && actual.iter().zip(expected).all(|(a, e)| a.matches(e))
        }
        _ => false,
    }
}

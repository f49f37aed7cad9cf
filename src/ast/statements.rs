use crate::Span;

use super::ast::{Expr, Stmt};

/// A top-level function declaration.
#[derive(Debug, Clone)]
pub struct FnDecl {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// A parameter with its dimension list; an empty list is a scalar.
///
/// `None` stands for a dimension written as `[]`.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    pub dimensions: Vec<Option<Expr>>,
    pub span: Span,
}

/// Left-hand side of an assignment: a name with zero or more indices.
#[derive(Debug, Clone)]
pub struct Target {
    pub name: String,
    pub indices: Vec<Expr>,
    pub span: Span,
}

use crate::Span;

use super::{
    expressions::{BinaryOperator, CompoundOperator, PrefixOperator},
    statements::Target,
};

/// Expression node.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    /// Numeric literal.
    Number(f64),
    /// `new number[d0][d1]...`
    NewArray { dimensions: Vec<Expr> },
    /// `[e0, e1, ...]`
    List { elements: Vec<Expr> },
    /// A variable read, with zero or more indices.
    Variable { name: String, indices: Vec<Expr> },
    Call { name: String, arguments: Vec<Expr> },
    Prefix {
        operator: PrefixOperator,
        operand: Box<Expr>,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Statement node.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    If {
        condition: Expr,
        pass: Vec<Stmt>,
        fail: Option<Vec<Stmt>>,
    },
    Assignment {
        target: Target,
        value: Expr,
    },
    CompoundAssignment {
        operator: CompoundOperator,
        target: Target,
        value: Expr,
    },
    /// The terminal expression of a body.
    Return(Expr),
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

/// Whether every path through `body` ends in a return.
///
/// A body qualifies when its last statement is a return, or is an `if`
/// with an `else` where both arms qualify.
pub fn always_returns(body: &[Stmt]) -> bool {
    match body.last().map(|stmt| &stmt.kind) {
        Some(StmtKind::Return(_)) => true,
        Some(StmtKind::If {
            pass,
            fail: Some(fail),
            ..
        }) => always_returns(pass) && always_returns(fail),
        _ => false,
    }
}

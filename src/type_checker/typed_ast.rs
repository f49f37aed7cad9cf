//! Typed, slot-resolved intermediate representation.
//!
//! The analyzer emits this tree after validating a function body. It mirrors
//! the untyped AST with every name resolved ahead of time:
//!
//! - Locals and parameters are frame slot indices
//! - Call sites hold the builtin, the completed user function, or a self marker
//! - Compound assignments are already expanded into plain assignments
//!
//! The tree is consumed by the backend in `compiler`, which turns it into
//! closures.

use std::rc::Rc;

use crate::{
    ast::{
        expressions::{BinaryOperator, PrefixOperator},
        types::Type,
    },
    compiler::{compiler::Executable, stdlib::Native},
    type_checker::complexity::Complexity,
    Span,
};

/// Call target resolved at analysis time.
#[derive(Debug, Clone)]
pub enum Callee {
    Native(&'static Native),
    User(Rc<Executable>),
    /// The function currently being analyzed.
    Recursive,
}

#[derive(Debug, Clone)]
pub enum TypedExpr {
    Number(f64),
    NewArray {
        dimensions: Vec<TypedExpr>,
        span: Span,
    },
    List {
        elements: Vec<TypedExpr>,
    },
    Variable {
        slot: usize,
        name: String,
        indices: Vec<TypedExpr>,
        span: Span,
    },
    Call {
        name: String,
        callee: Callee,
        arguments: Vec<TypedExpr>,
        span: Span,
    },
    Prefix {
        operator: PrefixOperator,
        operand: Box<TypedExpr>,
        span: Span,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<TypedExpr>,
        right: Box<TypedExpr>,
        span: Span,
    },
}

#[derive(Debug, Clone)]
pub enum TypedStmt {
    If {
        condition: TypedExpr,
        pass: Vec<TypedStmt>,
        fail: Vec<TypedStmt>,
        span: Span,
    },
    Assign {
        slot: usize,
        name: String,
        indices: Vec<TypedExpr>,
        value: TypedExpr,
        span: Span,
    },
    Return(TypedExpr),
}

/// A fully analyzed function, ready for the backend.
#[derive(Debug, Clone)]
pub struct TypedFunction {
    pub name: String,
    pub params: Vec<Type>,
    /// Number of frame slots; parameters occupy the first `params.len()`.
    pub slots: usize,
    pub body: Vec<TypedStmt>,
    pub result: Type,
    pub complexity: Complexity,
    pub span: Span,
}

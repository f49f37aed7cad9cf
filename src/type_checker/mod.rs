//! Type checking and semantic analysis module.
//!
//! This module analyzes each function declaration in source order and
//! lowers it into the typed IR while:
//!
//! - Verifying that conditions, operands, indices and arguments are numbers
//!   or arrays of the right shape
//! - Resolving variables to frame slots and calls to their targets
//! - Inferring each function's return type from its first return
//! - Enforcing that calls only reach functions that are already complete
//! - Tracking cyclomatic complexity
//!
//! Completed functions are collected in the `Program` registry.

pub mod complexity;
pub mod environment;
pub mod expr;
pub mod program;
pub mod type_checker;
pub mod typed_ast;

#[cfg(test)]
mod tests;

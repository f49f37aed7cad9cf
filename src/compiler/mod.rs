//! Backend turning the typed IR into executables.
//!
//! Each analyzed function is lowered into a tree of boxed closures that
//! evaluate against a frame of slots. It handles:
//!
//! - Compilation of expressions and statements
//! - Calls to builtins, completed user functions and the function itself
//! - The runtime value model and the array allocator

pub mod compiler;
pub mod expr;
pub mod runtime;
pub mod stdlib;
pub mod stmt;

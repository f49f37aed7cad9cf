//! Parser module for building the Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into function declarations. It uses a Pratt parser for expressions
//! with operator precedence and handles:
//!
//! - Function declarations and their parameter dimension lists
//! - Statement parsing (branches, assignments, compound assignments, returns)
//! - Expression parsing (binary and prefix operators, calls, indexing, literals)
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

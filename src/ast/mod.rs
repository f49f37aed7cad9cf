/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Statement and expression nodes
/// - expressions: Operator tags carried by expression and statement nodes
/// - statements: Function declarations, parameters and assignment targets
/// - types: The value type system and its compatibility predicate
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;

#[cfg(test)]
mod tests;

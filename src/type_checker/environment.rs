//! Scopes and name resolution.
//!
//! A function body has a single flat scope: branches share it, and a name
//! is bound by its first assignment. The scope's parent is the program
//! registry, which resolves builtins and completed user functions.

use std::collections::HashMap;

use crate::ast::types::Type;

use super::program::Program;

/// What a name resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// A parameter or local, with its frame slot.
    Variable { ty: Type, slot: usize },
    /// A builtin or user function.
    Global(Type),
}

/// One link of the scope chain.
pub trait Scope {
    /// Looks a name up in this scope only.
    fn get_local(&self, name: &str) -> Option<Binding>;
    fn parent(&self) -> Option<&dyn Scope>;
}

/// Walks the scope chain outward until `name` is found.
pub fn resolve(scope: &dyn Scope, name: &str) -> Option<Binding> {
    let mut current = Some(scope);

    while let Some(scope) = current {
        if let Some(binding) = scope.get_local(name) {
            return Some(binding);
        }
        current = scope.parent();
    }

    None
}

/// The scope of the function under analysis.
#[derive(Debug)]
pub struct Environment<'p> {
    variables: HashMap<String, (Type, usize)>,
    slots: usize,
    parent: &'p Program,
}

impl<'p> Environment<'p> {
    pub fn new(parent: &'p Program) -> Self {
        Environment {
            variables: HashMap::new(),
            slots: 0,
            parent,
        }
    }

    /// Binds `name` in this scope and assigns it the next free slot.
    ///
    /// # Returns
    ///
    /// The slot index of the new binding.
    pub fn declare(&mut self, name: &str, ty: Type) -> usize {
        let slot = self.slots;
        self.slots += 1;

        tracing::trace!(variable = name, ty = %ty, slot, "declared variable");
        self.variables.insert(String::from(name), (ty, slot));

        slot
    }

    pub fn get_variable(&self, name: &str) -> Option<&(Type, usize)> {
        self.variables.get(name)
    }

    /// Number of slots a frame for this scope needs.
    pub fn slot_count(&self) -> usize {
        self.slots
    }

    pub fn resolve(&self, name: &str) -> Option<Binding> {
        resolve(self, name)
    }
}

impl Scope for Environment<'_> {
    fn get_local(&self, name: &str) -> Option<Binding> {
        self.variables.get(name).map(|(ty, slot)| Binding::Variable {
            ty: ty.clone(),
            slot: *slot,
        })
    }

    fn parent(&self) -> Option<&dyn Scope> {
        Some(self.parent)
    }
}

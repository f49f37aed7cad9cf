//! Main compiler module.
//!
//! This module turns a typed function into an `Executable`: a tree of boxed
//! closures that run against a `Frame` of slots. Every name was resolved by
//! the analyzer, so running a function never looks anything up by name.

use std::{
    fmt::Debug,
    rc::{Rc, Weak},
};

use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
    type_checker::typed_ast::TypedFunction,
    Position,
};

use super::{
    runtime::Value,
    stmt::{gen_statement, run_block, Flow},
};

/// Maximum nesting of user function calls before execution is aborted.
pub const MAX_CALL_DEPTH: usize = 256;

pub type CompiledExpr = Box<dyn Fn(&mut Frame) -> Result<Value, Error>>;
pub type CompiledStmt = Box<dyn Fn(&mut Frame) -> Result<Flow, Error>>;

/// Activation record of one call.
pub struct Frame {
    /// Parameters first, then locals in order of first assignment.
    pub slots: Vec<Option<Value>>,
    /// Number of user calls below the host entry point.
    pub depth: usize,
}

/// Code generation state for one function.
pub struct Compiler {
    /// The executable being built, for self calls.
    pub function: Weak<Executable>,
    pub name: String,
}

/// A lowered function, invocable with positional arguments.
pub struct Executable {
    name: String,
    parameters: Vec<Type>,
    slots: usize,
    body: Vec<CompiledStmt>,
    position: Position,
}

impl Debug for Executable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executable")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("slots", &self.slots)
            .finish()
    }
}

impl Executable {
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_parameters(&self) -> &[Type] {
        &self.parameters
    }

    /// Start of the function's declaration.
    pub fn get_position(&self) -> &Position {
        &self.position
    }

    /// Entry point for the host.
    ///
    /// Checks the argument count and that every argument has its parameter's
    /// shape, which the analyzer guarantees for calls made from lowered code.
    ///
    /// # Arguments
    ///
    /// * `arguments` - Positional argument values
    ///
    /// # Returns
    ///
    /// The function's return value, or the first runtime error.
    pub fn invoke(&self, arguments: Vec<Value>) -> Result<Value, Error> {
        tracing::debug!(function = %self.name, arguments = arguments.len(), "invoking executable");

        if arguments.len() != self.parameters.len() {
            return Err(Error::new(
                ErrorImpl::HostArgumentCount {
                    function: self.name.clone(),
                    expected: self.parameters.len(),
                    received: arguments.len(),
                },
                self.position.clone(),
            ));
        }

        for (index, (argument, parameter)) in arguments.iter().zip(&self.parameters).enumerate() {
            if !argument.conforms_to(parameter) {
                return Err(Error::new(
                    ErrorImpl::HostArgumentType {
                        function: self.name.clone(),
                        index,
                    },
                    self.position.clone(),
                ));
            }
        }

        self.call(arguments, 0)
    }

    /// Runs the body with already checked arguments.
    pub fn call(&self, arguments: Vec<Value>, depth: usize) -> Result<Value, Error> {
        if depth > MAX_CALL_DEPTH {
            return Err(Error::new(
                ErrorImpl::CallDepthExceeded {
                    function: self.name.clone(),
                    limit: MAX_CALL_DEPTH,
                },
                self.position.clone(),
            )
            .in_function(&self.name));
        }

        let mut slots: Vec<Option<Value>> = vec![None; self.slots];
        for (slot, argument) in slots.iter_mut().zip(arguments) {
            *slot = Some(argument);
        }

        let mut frame = Frame { slots, depth };
        match run_block(&self.body, &mut frame).map_err(|error| error.in_function(&self.name))? {
            Flow::Return(value) => Ok(value),
            Flow::Next => Err(
                Error::new(ErrorImpl::MissingReturn, self.position.clone()).in_function(&self.name),
            ),
        }
    }
}

/// Lowers an analyzed function.
///
/// Self calls inside the body hold a weak reference to the executable being
/// created, so the result can be shared by later callers without a cycle.
pub fn compile(function: &TypedFunction) -> Rc<Executable> {
    let executable = Rc::new_cyclic(|me: &Weak<Executable>| {
        let compiler = Compiler {
            function: Weak::clone(me),
            name: function.name.clone(),
        };

        Executable {
            name: function.name.clone(),
            parameters: function.params.clone(),
            slots: function.slots,
            body: function
                .body
                .iter()
                .map(|statement| gen_statement(&compiler, statement))
                .collect(),
            position: function.span.start.clone(),
        }
    });

    tracing::debug!(function = %function.name, slots = function.slots, "compiled function");
    executable
}

//! The program registry.
//!
//! Maps global names to builtins and to completed user functions. User
//! functions are appended in declaration order once their analysis and
//! lowering succeed, so a function can only see the ones declared above it.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::types::{FunctionType, Type},
    compiler::{
        compiler::Executable,
        runtime::Value,
        stdlib::{self, Native},
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    complexity::Complexity,
    environment::{Binding, Scope},
    typed_ast::TypedFunction,
};

/// A completed user function.
#[derive(Debug)]
pub struct UserFunction {
    pub name: String,
    pub signature: FunctionType,
    pub complexity: Complexity,
    pub executable: Rc<Executable>,
}

impl UserFunction {
    pub fn new(function: TypedFunction, executable: Rc<Executable>) -> Self {
        UserFunction {
            signature: FunctionType {
                params: function.params,
                rest: None,
                result: Some(function.result),
                complexity: Some(function.complexity.score()),
            },
            name: function.name,
            complexity: function.complexity,
            executable,
        }
    }
}

/// A registry entry.
#[derive(Debug, Clone, Copy)]
pub enum Descriptor<'a> {
    Native(&'static Native),
    User(&'a UserFunction),
}

impl Descriptor<'_> {
    pub fn signature(&self) -> FunctionType {
        match self {
            Descriptor::Native(native) => native.signature(),
            Descriptor::User(function) => function.signature.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Program {
    functions: Vec<UserFunction>,
    lookup: HashMap<String, usize>,
}

impl Program {
    pub fn new() -> Self {
        Program {
            functions: vec![],
            lookup: HashMap::new(),
        }
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        stdlib::lookup(name).is_some()
    }

    /// Whether a user function named `name` has been declared.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Descriptor<'_>> {
        if let Some(native) = stdlib::lookup(name) {
            return Some(Descriptor::Native(native));
        }

        self.get_function(name).map(Descriptor::User)
    }

    pub fn get_function(&self, name: &str) -> Option<&UserFunction> {
        self.lookup.get(name).map(|index| &self.functions[*index])
    }

    /// User functions in declaration order.
    pub fn functions(&self) -> &[UserFunction] {
        &self.functions
    }

    /// Appends a completed function.
    ///
    /// A name that is already registered is rejected and the registry is left
    /// unchanged.
    pub fn declare(&mut self, function: UserFunction) -> Result<(), Error> {
        if self.lookup.contains_key(&function.name) {
            return Err(Error::new(
                ErrorImpl::FunctionAlreadyDeclared {
                    function: function.name.clone(),
                },
                function.executable.get_position().clone(),
            ));
        }

        self.lookup
            .insert(function.name.clone(), self.functions.len());
        self.functions.push(function);
        Ok(())
    }

    /// One `Cyclomatic complexity of ...` line per user function.
    pub fn complexity_report(&self) -> String {
        self.functions()
            .iter()
            .map(|function| function.complexity.report(&function.name))
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// Calls a builtin or user function from the host.
    ///
    /// # Arguments
    ///
    /// * `name` - The function to call
    /// * `arguments` - Positional argument values
    ///
    /// # Returns
    ///
    /// The return value, or an error if the function does not exist, the
    /// arguments do not fit its signature, or execution fails.
    pub fn invoke(&self, name: &str, arguments: Vec<Value>) -> Result<Value, Error> {
        match self.get(name) {
            Some(Descriptor::User(function)) => function.executable.invoke(arguments),
            Some(Descriptor::Native(native)) => {
                check_host_arguments(name, &native.signature(), &arguments)?;
                native.call(&arguments, &Position::null())
            }
            None => Err(Error::new(
                ErrorImpl::UnknownFunction {
                    function: String::from(name),
                },
                Position::null(),
            )),
        }
    }
}

fn check_host_arguments(
    name: &str,
    signature: &FunctionType,
    arguments: &[Value],
) -> Result<(), Error> {
    let expected = signature.params.len();
    if arguments.len() < expected || (arguments.len() > expected && signature.rest.is_none()) {
        return Err(Error::new(
            ErrorImpl::HostArgumentCount {
                function: String::from(name),
                expected,
                received: arguments.len(),
            },
            Position::null(),
        ));
    }

    for (index, argument) in arguments.iter().enumerate() {
        let fits = signature
            .params
            .get(index)
            .or(signature.rest.as_ref())
            .is_some_and(|parameter| argument.conforms_to(parameter));

        if !fits {
            return Err(Error::new(
                ErrorImpl::HostArgumentType {
                    function: String::from(name),
                    index,
                },
                Position::null(),
            ));
        }
    }

    Ok(())
}

impl Scope for Program {
    fn get_local(&self, name: &str) -> Option<Binding> {
        self.get(name)
            .map(|descriptor| Binding::Global(Type::Function(Box::new(descriptor.signature()))))
    }

    fn parent(&self) -> Option<&dyn Scope> {
        None
    }
}

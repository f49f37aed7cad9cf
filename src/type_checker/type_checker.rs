//! Statement analysis and the per-function driver.
//!
//! Functions are analyzed one at a time in source order. Each one gets a
//! fresh `TypeChecker` whose environment chains to the registry of the
//! functions completed so far; once its body checks out it is lowered and
//! appended to the registry. The first error aborts the whole run.

use crate::{
    ast::{
        ast::{always_returns, Expr, ExprKind, Stmt, StmtKind},
        statements::{FnDecl, Target},
        types::{compatible, FunctionType, Type},
    },
    compiler::compiler::compile,
    errors::errors::{Error, ErrorImpl},
};

use super::{
    complexity::Complexity,
    environment::{Binding, Environment},
    expr::{check_indices, type_check_expr},
    program::{Program, UserFunction},
    typed_ast::{TypedFunction, TypedStmt},
};

/// Analysis state of a single function.
#[derive(Debug)]
pub struct TypeChecker<'p> {
    pub program: &'p Program,
    /// Name of the function under analysis
    pub name: String,
    pub params: Vec<Type>,
    pub environment: Environment<'p>,
    /// Set by the first return, fixed afterwards
    pub result: Option<Type>,
    pub complexity: Complexity,
}

impl<'p> TypeChecker<'p> {
    /// Creates a checker with the declaration's parameters in scope.
    ///
    /// # Arguments
    ///
    /// * `program` - Registry of the builtins and the functions declared so far
    /// * `declaration` - The function about to be analyzed
    pub fn new(program: &'p Program, declaration: &FnDecl) -> Result<Self, Error> {
        let mut environment = Environment::new(program);
        let mut params = vec![];

        for parameter in &declaration.parameters {
            if environment.get_variable(&parameter.name).is_some() {
                return Err(Error::new(
                    ErrorImpl::ParameterAlreadyDeclared {
                        parameter: parameter.name.clone(),
                    },
                    parameter.span.start.clone(),
                ));
            }

            let ty = Type::from_parameter(parameter);
            environment.declare(&parameter.name, ty.clone());
            params.push(ty);
        }

        Ok(TypeChecker {
            program,
            name: declaration.name.clone(),
            params,
            environment,
            result: None,
            complexity: Complexity::new(),
        })
    }

    /// The signature as known so far.
    pub fn signature(&self) -> FunctionType {
        FunctionType {
            params: self.params.clone(),
            rest: None,
            result: self.result.clone(),
            complexity: None,
        }
    }

    /// Resolves a name: locals first, then the function itself, then globals.
    pub fn resolve(&self, name: &str) -> Option<Binding> {
        if let Some((ty, slot)) = self.environment.get_variable(name) {
            return Some(Binding::Variable {
                ty: ty.clone(),
                slot: *slot,
            });
        }

        if name == self.name {
            return Some(Binding::Global(Type::Function(Box::new(self.signature()))));
        }

        self.environment.resolve(name)
    }

    /// Analyzes the whole body and produces the typed function.
    pub fn check(mut self, declaration: &FnDecl) -> Result<TypedFunction, Error> {
        let body = self.check_body(&declaration.body)?;

        let result = match self.result.take() {
            Some(result) if always_returns(&declaration.body) => result,
            _ => {
                return Err(Error::new(
                    ErrorImpl::MissingReturn,
                    declaration.span.end.clone(),
                ))
            }
        };

        Ok(TypedFunction {
            name: self.name,
            params: self.params,
            slots: self.environment.slot_count(),
            body,
            result,
            complexity: self.complexity,
            span: declaration.span.clone(),
        })
    }

    /// Checks a statement sequence in order.
    ///
    /// Branch arms are checked with this same function, so a return at the
    /// end of an arm is in terminal position.
    pub fn check_body(&mut self, body: &[Stmt]) -> Result<Vec<TypedStmt>, Error> {
        let mut typed = Vec::with_capacity(body.len());

        for (index, statement) in body.iter().enumerate() {
            let is_last = index + 1 == body.len();
            typed.push(self.check_statement(statement, is_last)?);
        }

        Ok(typed)
    }

    fn check_statement(&mut self, statement: &Stmt, is_last: bool) -> Result<TypedStmt, Error> {
        match &statement.kind {
            StmtKind::If {
                condition,
                pass,
                fail,
            } => {
                let (condition_type, condition) = type_check_expr(self, condition)?;
                if !condition_type.is_number() {
                    return Err(Error::new(
                        ErrorImpl::ConditionNotNumber,
                        statement.span.start.clone(),
                    ));
                }

                self.complexity
                    .add_branch()
                    .map_err(|error| Error::new(error, statement.span.start.clone()))?;

                let pass = self.check_body(pass)?;
                let fail = match fail {
                    Some(fail) => self.check_body(fail)?,
                    None => vec![],
                };

                Ok(TypedStmt::If {
                    condition,
                    pass,
                    fail,
                    span: statement.span.clone(),
                })
            }
            StmtKind::Assignment { target, value } => self.check_assignment(target, value),
            StmtKind::CompoundAssignment {
                operator,
                target,
                value,
            } => {
                // x op= e is checked and lowered as x = x op e
                let expanded = Expr::new(
                    ExprKind::Binary {
                        operator: operator.longhand(),
                        left: Box::new(Expr::new(
                            ExprKind::Variable {
                                name: target.name.clone(),
                                indices: target.indices.clone(),
                            },
                            target.span.clone(),
                        )),
                        right: Box::new(value.clone()),
                    },
                    statement.span.clone(),
                );

                self.check_assignment(target, &expanded)
            }
            StmtKind::Return(value) => {
                if !is_last {
                    return Err(Error::new(
                        ErrorImpl::ReturnBeforeEnd,
                        statement.span.start.clone(),
                    ));
                }

                let (ty, value) = type_check_expr(self, value)?;
                let consistent = self
                    .result
                    .as_ref()
                    .map_or(true, |result| compatible(&ty, result));
                if !consistent {
                    return Err(Error::new(
                        ErrorImpl::MultipleReturnTypes,
                        statement.span.start.clone(),
                    ));
                }
                if self.result.is_none() {
                    self.result = Some(ty);
                }

                Ok(TypedStmt::Return(value))
            }
        }
    }

    fn check_assignment(&mut self, target: &Target, value: &Expr) -> Result<TypedStmt, Error> {
        let (value_type, value) = type_check_expr(self, value)?;
        let name = &target.name;
        let position = target.span.start.clone();

        let (slot, indices) = match self.resolve(name) {
            None => {
                if !target.indices.is_empty() {
                    return Err(Error::new(
                        ErrorImpl::IndexingUndeclared {
                            variable: name.clone(),
                        },
                        position,
                    ));
                }

                return Ok(TypedStmt::Assign {
                    slot: self.environment.declare(name, value_type),
                    name: name.clone(),
                    indices: vec![],
                    value,
                    span: target.span.clone(),
                });
            }
            Some(Binding::Variable { ty, slot }) => match ty {
                Type::Array(rank) => {
                    let indices = check_indices(self, name, &target.indices)?;

                    if target.indices.len() > rank.len() {
                        return Err(Error::new(
                            ErrorImpl::TooManyIndices {
                                variable: name.clone(),
                                dimensions: rank.len(),
                            },
                            position,
                        ));
                    }

                    let remaining = &rank[target.indices.len()..];
                    if remaining.is_empty() && !value_type.is_number() {
                        return Err(Error::new(
                            ErrorImpl::AssignmentNotNumber {
                                variable: name.clone(),
                            },
                            position,
                        ));
                    }
                    if !remaining.is_empty()
                        && !compatible(&value_type, &Type::Array(remaining.to_vec()))
                    {
                        return Err(Error::new(
                            ErrorImpl::AssignmentShapeMismatch {
                                variable: name.clone(),
                                dimensions: remaining.len(),
                            },
                            position,
                        ));
                    }

                    (slot, indices)
                }
                Type::Number => {
                    if !target.indices.is_empty() {
                        return Err(Error::new(
                            ErrorImpl::NotAnArray {
                                variable: name.clone(),
                            },
                            position,
                        ));
                    }
                    if !value_type.is_number() {
                        return Err(Error::new(
                            ErrorImpl::VariableMustBeNumber {
                                variable: name.clone(),
                            },
                            position,
                        ));
                    }

                    (slot, vec![])
                }
                Type::Function(_) => {
                    return Err(Error::new(
                        ErrorImpl::FunctionNotValue {
                            function: name.clone(),
                        },
                        position,
                    ))
                }
            },
            Some(Binding::Global(_)) => {
                return Err(Error::new(
                    ErrorImpl::FunctionNotValue {
                        function: name.clone(),
                    },
                    position,
                ))
            }
        };

        Ok(TypedStmt::Assign {
            slot,
            name: name.clone(),
            indices,
            value,
            span: target.span.clone(),
        })
    }
}

/// Rejects a declaration whose name is already taken.
fn check_declaration(program: &Program, declaration: &FnDecl) -> Result<(), Error> {
    let name = &declaration.name;

    if program.is_builtin(name) {
        return Err(Error::new(
            ErrorImpl::BuiltinRedeclared {
                function: name.clone(),
            },
            declaration.span.start.clone(),
        ));
    }

    if program.contains(name) {
        return Err(Error::new(
            ErrorImpl::FunctionAlreadyDeclared {
                function: name.clone(),
            },
            declaration.span.start.clone(),
        ));
    }

    Ok(())
}

/// Analyzes one declaration against the functions completed so far.
///
/// # Returns
///
/// The typed function, or the first error attributed to the function.
pub fn type_check_function(program: &Program, declaration: &FnDecl) -> Result<TypedFunction, Error> {
    check_declaration(program, declaration)?;

    tracing::debug!(function = %declaration.name, "analyzing function");

    let function = TypeChecker::new(program, declaration)
        .and_then(|checker| checker.check(declaration))
        .map_err(|error| error.in_function(&declaration.name))?;

    tracing::debug!(
        function = %function.name,
        result = %function.result,
        complexity = function.complexity.score(),
        "analyzed function"
    );

    Ok(function)
}

/// Analyzes and lowers every declaration in source order.
///
/// # Arguments
///
/// * `declarations` - The parsed program
///
/// # Returns
///
/// The completed registry, or the first error encountered.
pub fn type_check(declarations: &[FnDecl]) -> Result<Program, Error> {
    let mut program = Program::new();

    for declaration in declarations {
        let function = type_check_function(&program, declaration)?;
        let executable = compile(&function);
        program.declare(UserFunction::new(function, executable))?;
    }

    Ok(program)
}

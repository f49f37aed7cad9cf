use std::rc::Rc;

use crate::{
    ast::{
        ast::{Expr, ExprKind},
        types::{compatible, Dim, Type},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    environment::Binding,
    program::Descriptor,
    type_checker::TypeChecker,
    typed_ast::{Callee, TypedExpr},
};

/// Type checks an expression and lowers it.
///
/// # Returns
///
/// The expression's type together with its typed IR node.
pub fn type_check_expr(
    checker: &mut TypeChecker,
    expression: &Expr,
) -> Result<(Type, TypedExpr), Error> {
    let position = expression.span.start.clone();

    match &expression.kind {
        ExprKind::Number(value) => Ok((Type::Number, TypedExpr::Number(*value))),
        ExprKind::NewArray { dimensions } => {
            let mut typed = Vec::with_capacity(dimensions.len());

            for (index, dimension) in dimensions.iter().enumerate() {
                let (ty, dimension) = type_check_expr(checker, dimension)?;
                if !ty.is_number() {
                    return Err(Error::new(
                        ErrorImpl::DimensionNotNumber { index },
                        position,
                    ));
                }
                typed.push(dimension);
            }

            Ok((
                Type::dynamic_array(typed.len()),
                TypedExpr::NewArray {
                    dimensions: typed,
                    span: expression.span.clone(),
                },
            ))
        }
        ExprKind::List { elements } => {
            let first = match elements.first() {
                Some(first) => first,
                None => return Err(Error::new(ErrorImpl::EmptyList, position)),
            };

            let (element_type, first) = type_check_expr(checker, first)?;
            let mut typed = vec![first];

            for (index, element) in elements.iter().enumerate().skip(1) {
                let (ty, element_ir) = type_check_expr(checker, element)?;
                if !compatible(&ty, &element_type) {
                    return Err(Error::new(
                        ErrorImpl::ElementTypeMatchError { index },
                        element.span.start.clone(),
                    ));
                }
                typed.push(element_ir);
            }

            let mut rank = vec![Dim::Fixed(elements.len())];
            rank.extend_from_slice(element_type.rank());

            Ok((Type::Array(rank), TypedExpr::List { elements: typed }))
        }
        ExprKind::Variable { name, indices } => {
            let (ty, slot) = match checker.resolve(name) {
                Some(Binding::Variable { ty, slot }) => (ty, slot),
                Some(Binding::Global(_)) => {
                    return Err(Error::new(
                        ErrorImpl::FunctionNotValue {
                            function: name.clone(),
                        },
                        position,
                    ))
                }
                None => {
                    return Err(Error::new(
                        ErrorImpl::VariableNotDeclared {
                            variable: name.clone(),
                        },
                        position,
                    ))
                }
            };

            let ty = match ty {
                Type::Array(rank) => {
                    let typed = check_indices(checker, name, indices)?;

                    if indices.len() > rank.len() {
                        return Err(Error::new(
                            ErrorImpl::TooManyIndices {
                                variable: name.clone(),
                                dimensions: rank.len(),
                            },
                            position,
                        ));
                    }

                    let remaining = &rank[indices.len()..];
                    let ty = if remaining.is_empty() {
                        Type::Number
                    } else {
                        Type::Array(remaining.to_vec())
                    };

                    return Ok((
                        ty,
                        TypedExpr::Variable {
                            slot,
                            name: name.clone(),
                            indices: typed,
                            span: expression.span.clone(),
                        },
                    ));
                }
                Type::Number if indices.is_empty() => Type::Number,
                Type::Number => {
                    return Err(Error::new(
                        ErrorImpl::NotAnArray {
                            variable: name.clone(),
                        },
                        position,
                    ))
                }
                Type::Function(_) => {
                    return Err(Error::new(
                        ErrorImpl::FunctionNotValue {
                            function: name.clone(),
                        },
                        position,
                    ))
                }
            };

            Ok((
                ty,
                TypedExpr::Variable {
                    slot,
                    name: name.clone(),
                    indices: vec![],
                    span: expression.span.clone(),
                },
            ))
        }
        ExprKind::Call { name, arguments } => type_check_call(checker, expression, name, arguments),
        ExprKind::Prefix { operator, operand } => {
            let (ty, operand) = type_check_expr(checker, operand)?;
            if !ty.is_number() {
                return Err(Error::new(
                    ErrorImpl::OperandNotNumber {
                        operation: operator.to_string(),
                    },
                    position,
                ));
            }

            Ok((
                Type::Number,
                TypedExpr::Prefix {
                    operator: *operator,
                    operand: Box::new(operand),
                    span: expression.span.clone(),
                },
            ))
        }
        ExprKind::Binary {
            operator,
            left,
            right,
        } => {
            let (left_type, left) = type_check_expr(checker, left)?;
            if !left_type.is_number() {
                return Err(Error::new(
                    ErrorImpl::LeftOperandNotNumber {
                        operation: operator.to_string(),
                    },
                    position,
                ));
            }

            let (right_type, right) = type_check_expr(checker, right)?;
            if !right_type.is_number() {
                return Err(Error::new(
                    ErrorImpl::RightOperandNotNumber {
                        operation: operator.to_string(),
                    },
                    position,
                ));
            }

            Ok((
                Type::Number,
                TypedExpr::Binary {
                    operator: *operator,
                    left: Box::new(left),
                    right: Box::new(right),
                    span: expression.span.clone(),
                },
            ))
        }
    }
}

/// Checks that every index expression is a number.
pub fn check_indices(
    checker: &mut TypeChecker,
    variable: &str,
    indices: &[Expr],
) -> Result<Vec<TypedExpr>, Error> {
    let mut typed = Vec::with_capacity(indices.len());

    for (index, expression) in indices.iter().enumerate() {
        let (ty, expression_ir) = type_check_expr(checker, expression)?;
        if !ty.is_number() {
            return Err(Error::new(
                ErrorImpl::IndexNotNumber {
                    variable: String::from(variable),
                    index,
                },
                expression.span.start.clone(),
            ));
        }
        typed.push(expression_ir);
    }

    Ok(typed)
}

fn type_check_call(
    checker: &mut TypeChecker,
    expression: &Expr,
    name: &str,
    arguments: &[Expr],
) -> Result<(Type, TypedExpr), Error> {
    let position = expression.span.start.clone();
    let program = checker.program;

    let (signature, callee) = if name == checker.name {
        if checker.result.is_none() {
            return Err(Error::new(
                ErrorImpl::ReturnTypeUnknown {
                    function: String::from(name),
                },
                position,
            ));
        }
        (checker.signature(), Callee::Recursive)
    } else {
        match program.get(name) {
            Some(Descriptor::Native(native)) => (native.signature(), Callee::Native(native)),
            Some(Descriptor::User(function)) => (
                function.signature.clone(),
                Callee::User(Rc::clone(&function.executable)),
            ),
            None if checker.environment.get_variable(name).is_some() => {
                return Err(Error::new(
                    ErrorImpl::NotAFunction {
                        name: String::from(name),
                    },
                    position,
                ))
            }
            None => {
                return Err(Error::new(
                    ErrorImpl::UndeclaredFunction {
                        function: String::from(name),
                    },
                    position,
                ))
            }
        }
    };

    let expected = signature.params.len();
    if arguments.len() < expected || (arguments.len() > expected && signature.rest.is_none()) {
        return Err(Error::new(
            ErrorImpl::ArgumentCountMismatch {
                function: String::from(name),
                expected,
                received: arguments.len(),
            },
            position,
        ));
    }

    let mut typed = Vec::with_capacity(arguments.len());
    for (index, argument) in arguments.iter().enumerate() {
        let (ty, argument_ir) = type_check_expr(checker, argument)?;

        let fits = match signature.params.get(index).or(signature.rest.as_ref()) {
            Some(parameter) => compatible(&ty, parameter),
            None => false,
        };
        if !fits {
            return Err(Error::new(
                ErrorImpl::ArgumentTypeMatchError {
                    function: String::from(name),
                    index,
                },
                argument.span.start.clone(),
            ));
        }

        typed.push(argument_ir);
    }

    if let Some(score) = signature.complexity {
        checker
            .complexity
            .add_call(name, score)
            .map_err(|error| Error::new(error, position.clone()))?;
    }

    tracing::trace!(caller = %checker.name, callee = name, "resolved call");

    let result = match signature.result {
        Some(result) => result,
        None => {
            return Err(Error::new(
                ErrorImpl::ReturnTypeUnknown {
                    function: String::from(name),
                },
                position,
            ))
        }
    };

    Ok((
        result,
        TypedExpr::Call {
            name: String::from(name),
            callee,
            arguments: typed,
            span: expression.span.clone(),
        },
    ))
}

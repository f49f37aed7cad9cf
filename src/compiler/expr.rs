use std::rc::Rc;

use crate::{
    ast::expressions::{BinaryOperator, PrefixOperator},
    errors::errors::{Error, ErrorImpl},
    type_checker::typed_ast::{Callee, TypedExpr},
    Position,
};

use super::{
    compiler::{CompiledExpr, Compiler, Frame},
    runtime::{allocate, from_bool, is_truthy, to_dimension, Value},
};

/// Generates a closure evaluating the given expression.
pub fn gen_expression(compiler: &Compiler, expression: &TypedExpr) -> CompiledExpr {
    match expression {
        TypedExpr::Number(value) => {
            let value = *value;
            Box::new(move |_frame: &mut Frame| Ok(Value::Number(value)))
        }
        TypedExpr::NewArray { dimensions, span } => {
            let dimensions = gen_expressions(compiler, dimensions);
            let position = span.start.clone();

            Box::new(move |frame: &mut Frame| {
                let mut sizes = Vec::with_capacity(dimensions.len());
                for dimension in &dimensions {
                    let size = dimension(frame)?.expect_number(&position)?;
                    sizes.push(to_dimension(size, &position)?);
                }
                Ok(allocate(&sizes))
            })
        }
        TypedExpr::List { elements } => {
            let elements = gen_expressions(compiler, elements);

            Box::new(move |frame: &mut Frame| {
                let mut values = Vec::with_capacity(elements.len());
                for element in &elements {
                    values.push(element(frame)?);
                }
                Ok(Value::array(values))
            })
        }
        TypedExpr::Variable {
            slot,
            name,
            indices,
            span,
        } => gen_variable(compiler, *slot, name, indices, span.start.clone()),
        TypedExpr::Call {
            name,
            callee,
            arguments,
            span,
        } => gen_call(compiler, name, callee, arguments, span.start.clone()),
        TypedExpr::Prefix {
            operator,
            operand,
            span,
        } => {
            let operand = gen_expression(compiler, operand);
            let position = span.start.clone();

            match operator {
                PrefixOperator::Negation => Box::new(move |frame: &mut Frame| {
                    let value = operand(frame)?.expect_number(&position)?;
                    Ok(Value::Number(-value))
                }),
                PrefixOperator::Inversion => Box::new(move |frame: &mut Frame| {
                    let value = operand(frame)?.expect_number(&position)?;
                    Ok(Value::Number(from_bool(!is_truthy(value))))
                }),
            }
        }
        TypedExpr::Binary {
            operator,
            left,
            right,
            span,
        } => gen_binary(
            *operator,
            gen_expression(compiler, left),
            gen_expression(compiler, right),
            span.start.clone(),
        ),
    }
}

pub fn gen_expressions(compiler: &Compiler, expressions: &[TypedExpr]) -> Vec<CompiledExpr> {
    expressions
        .iter()
        .map(|expression| gen_expression(compiler, expression))
        .collect()
}

/// Evaluates index expressions into numbers, left to right.
pub fn eval_indices(
    indices: &[CompiledExpr],
    frame: &mut Frame,
    position: &Position,
) -> Result<Vec<f64>, Error> {
    let mut values = Vec::with_capacity(indices.len());
    for index in indices {
        values.push(index(frame)?.expect_number(position)?);
    }
    Ok(values)
}

/// Reads a slot, failing when no path so far has assigned it.
pub fn read_slot(frame: &Frame, slot: usize, name: &str, position: &Position) -> Result<Value, Error> {
    match frame.slots.get(slot) {
        Some(Some(value)) => Ok(value.clone()),
        _ => Err(Error::new(
            ErrorImpl::UninitializedVariable {
                variable: String::from(name),
            },
            position.clone(),
        )),
    }
}

fn gen_variable(
    compiler: &Compiler,
    slot: usize,
    name: &str,
    indices: &[TypedExpr],
    position: Position,
) -> CompiledExpr {
    let indices = gen_expressions(compiler, indices);
    let name = String::from(name);

    Box::new(move |frame: &mut Frame| {
        let mut value = read_slot(frame, slot, &name, &position)?;
        for index in eval_indices(&indices, frame, &position)? {
            value = value.element(index, &position)?;
        }
        Ok(value)
    })
}

fn gen_call(
    compiler: &Compiler,
    name: &str,
    callee: &Callee,
    arguments: &[TypedExpr],
    position: Position,
) -> CompiledExpr {
    let arguments = gen_expressions(compiler, arguments);

    match callee {
        Callee::Native(native) => {
            let native = *native;
            Box::new(move |frame: &mut Frame| {
                let values = eval_arguments(&arguments, frame)?;
                native.call(&values, &position)
            })
        }
        Callee::User(executable) => {
            let executable = Rc::clone(executable);
            Box::new(move |frame: &mut Frame| {
                let values = eval_arguments(&arguments, frame)?;
                executable.call(values, frame.depth + 1)
            })
        }
        Callee::Recursive => {
            let function = compiler.function.clone();
            let name = String::from(name);
            Box::new(move |frame: &mut Frame| {
                let values = eval_arguments(&arguments, frame)?;
                match function.upgrade() {
                    Some(executable) => executable.call(values, frame.depth + 1),
                    None => Err(Error::new(
                        ErrorImpl::UnknownFunction {
                            function: name.clone(),
                        },
                        position.clone(),
                    )),
                }
            })
        }
    }
}

fn eval_arguments(arguments: &[CompiledExpr], frame: &mut Frame) -> Result<Vec<Value>, Error> {
    let mut values = Vec::with_capacity(arguments.len());
    for argument in arguments {
        values.push(argument(frame)?);
    }
    Ok(values)
}

fn gen_binary(
    operator: BinaryOperator,
    left: CompiledExpr,
    right: CompiledExpr,
    position: Position,
) -> CompiledExpr {
    match operator {
        BinaryOperator::Conjunction => Box::new(move |frame: &mut Frame| {
            if !is_truthy(left(frame)?.expect_number(&position)?) {
                return Ok(Value::Number(0.0));
            }
            let right = right(frame)?.expect_number(&position)?;
            Ok(Value::Number(from_bool(is_truthy(right))))
        }),
        BinaryOperator::Disjunction => Box::new(move |frame: &mut Frame| {
            if is_truthy(left(frame)?.expect_number(&position)?) {
                return Ok(Value::Number(1.0));
            }
            let right = right(frame)?.expect_number(&position)?;
            Ok(Value::Number(from_bool(is_truthy(right))))
        }),
        _ => {
            let apply = numeric_operation(operator);

            Box::new(move |frame: &mut Frame| {
                let left = left(frame)?.expect_number(&position)?;
                let right = right(frame)?.expect_number(&position)?;
                Ok(Value::Number(apply(left, right)))
            })
        }
    }
}

/// The eager form of every binary operator.
fn numeric_operation(operator: BinaryOperator) -> fn(f64, f64) -> f64 {
    match operator {
        BinaryOperator::Sum => |a, b| a + b,
        BinaryOperator::Difference => |a, b| a - b,
        BinaryOperator::Product => |a, b| a * b,
        BinaryOperator::Quotient => |a, b| a / b,
        BinaryOperator::Remainder => |a, b| a % b,
        BinaryOperator::Conjunction => |a, b| from_bool(is_truthy(a) && is_truthy(b)),
        BinaryOperator::Disjunction => |a, b| from_bool(is_truthy(a) || is_truthy(b)),
        BinaryOperator::Lesser => |a, b| from_bool(a < b),
        BinaryOperator::Greater => |a, b| from_bool(a > b),
        BinaryOperator::NoGreater => |a, b| from_bool(a <= b),
        BinaryOperator::NoLesser => |a, b| from_bool(a >= b),
        BinaryOperator::Equal => |a, b| from_bool(a == b),
        BinaryOperator::Inequal => |a, b| from_bool(a != b),
    }
}

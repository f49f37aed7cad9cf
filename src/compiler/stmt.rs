use crate::{errors::errors::Error, type_checker::typed_ast::TypedStmt};

use super::{
    compiler::{CompiledStmt, Compiler, Frame},
    expr::{eval_indices, gen_expression, gen_expressions, read_slot},
    runtime::{is_truthy, Value},
};

/// What a statement hands back to its enclosing body.
#[derive(Debug)]
pub enum Flow {
    Next,
    Return(Value),
}

/// Runs statements in order until one of them returns.
pub fn run_block(block: &[CompiledStmt], frame: &mut Frame) -> Result<Flow, Error> {
    for statement in block {
        if let Flow::Return(value) = statement(frame)? {
            return Ok(Flow::Return(value));
        }
    }

    Ok(Flow::Next)
}

pub fn gen_statement(compiler: &Compiler, statement: &TypedStmt) -> CompiledStmt {
    match statement {
        TypedStmt::If {
            condition,
            pass,
            fail,
            span,
        } => {
            let condition = gen_expression(compiler, condition);
            let position = span.start.clone();
            let pass: Vec<CompiledStmt> = pass.iter().map(|s| gen_statement(compiler, s)).collect();
            let fail: Vec<CompiledStmt> = fail.iter().map(|s| gen_statement(compiler, s)).collect();

            Box::new(move |frame: &mut Frame| {
                if is_truthy(condition(frame)?.expect_number(&position)?) {
                    run_block(&pass, frame)
                } else {
                    run_block(&fail, frame)
                }
            })
        }
        TypedStmt::Assign {
            slot,
            name,
            indices,
            value,
            span,
        } => {
            let slot = *slot;
            let name = name.clone();
            let indices = gen_expressions(compiler, indices);
            let value = gen_expression(compiler, value);
            let position = span.start.clone();

            if indices.is_empty() {
                return Box::new(move |frame: &mut Frame| {
                    let value = value(frame)?;
                    frame.slots[slot] = Some(value);
                    Ok(Flow::Next)
                });
            }

            Box::new(move |frame: &mut Frame| {
                let indices = eval_indices(&indices, frame, &position)?;
                let value = value(frame)?;

                let (last, path) = match indices.split_last() {
                    Some(split) => split,
                    None => return Ok(Flow::Next),
                };

                let mut container = read_slot(frame, slot, &name, &position)?;
                for index in path {
                    container = container.element(*index, &position)?;
                }
                container.set_element(*last, value, &position)?;

                Ok(Flow::Next)
            })
        }
        TypedStmt::Return(value) => {
            let value = gen_expression(compiler, value);
            Box::new(move |frame: &mut Frame| Ok(Flow::Return(value(frame)?)))
        }
    }
}

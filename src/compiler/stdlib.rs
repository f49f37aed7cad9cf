//! Builtin function table.
//!
//! Every builtin is a host math primitive over numbers, except `sizeof`,
//! which accepts an array of any rank. The table is registered before any
//! user declaration is analyzed, and builtin names cannot be redeclared.

use std::{collections::HashMap, fmt::Debug};

use lazy_static::lazy_static;

use crate::{
    ast::types::{FunctionType, Type},
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::runtime::Value;

#[derive(Clone, Copy)]
pub enum NativeKind {
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
    /// One number followed by any number of numbers, folded left to right.
    Fold(fn(f64, f64) -> f64),
    /// Length of the outermost dimension of an array.
    Size,
}

pub struct Native {
    pub name: &'static str,
    pub kind: NativeKind,
}

impl Debug for Native {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Native({})", self.name)
    }
}

impl Native {
    pub fn signature(&self) -> FunctionType {
        let (params, rest) = match self.kind {
            NativeKind::Unary(_) => (vec![Type::Number], None),
            NativeKind::Binary(_) => (vec![Type::Number, Type::Number], None),
            NativeKind::Fold(_) => (vec![Type::Number], Some(Type::Number)),
            NativeKind::Size => (vec![Type::any_array()], None),
        };

        FunctionType {
            params,
            rest,
            result: Some(Type::Number),
            complexity: None,
        }
    }

    /// Applies the builtin to already evaluated arguments.
    ///
    /// Arguments are expected to have passed analysis; a mismatching kind is
    /// still reported rather than trusted.
    pub fn call(&self, arguments: &[Value], position: &Position) -> Result<Value, Error> {
        let number = |index: usize| -> Result<f64, Error> {
            match arguments.get(index) {
                Some(value) => value.expect_number(position),
                None => Err(self.arity_error(arguments.len(), position)),
            }
        };

        let result = match self.kind {
            NativeKind::Unary(function) => function(number(0)?),
            NativeKind::Binary(function) => function(number(0)?, number(1)?),
            NativeKind::Fold(function) => {
                let mut accumulator = number(0)?;
                for index in 1..arguments.len() {
                    accumulator = function(accumulator, number(index)?);
                }
                accumulator
            }
            NativeKind::Size => match arguments.first().and_then(Value::len) {
                Some(length) => length as f64,
                None => return Err(Error::new(ErrorImpl::NotIndexable, position.clone())),
            },
        };

        Ok(Value::Number(result))
    }

    fn arity_error(&self, received: usize, position: &Position) -> Error {
        Error::new(
            ErrorImpl::HostArgumentCount {
                function: String::from(self.name),
                expected: self.signature().params.len(),
                received,
            },
            position.clone(),
        )
    }
}

fn round(value: f64) -> f64 {
    // Halves round toward positive infinity.
    (value + 0.5).floor()
}

fn maximum(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

fn minimum(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

macro_rules! native {
    ($name:expr, $kind:expr) => {
        (
            $name,
            Native {
                name: $name,
                kind: $kind,
            },
        )
    };
}

lazy_static! {
    pub static ref NATIVES: HashMap<&'static str, Native> = HashMap::from([
        native!("abs", NativeKind::Unary(f64::abs)),
        native!("acos", NativeKind::Unary(f64::acos)),
        native!("asin", NativeKind::Unary(f64::asin)),
        native!("atan", NativeKind::Unary(f64::atan)),
        native!("atan2", NativeKind::Binary(f64::atan2)),
        native!("ceil", NativeKind::Unary(f64::ceil)),
        native!("cos", NativeKind::Unary(f64::cos)),
        native!("exp", NativeKind::Unary(f64::exp)),
        native!("floor", NativeKind::Unary(f64::floor)),
        native!("log", NativeKind::Unary(f64::ln)),
        native!("max", NativeKind::Fold(maximum)),
        native!("min", NativeKind::Fold(minimum)),
        native!("pow", NativeKind::Binary(f64::powf)),
        native!("round", NativeKind::Unary(round)),
        native!("sin", NativeKind::Unary(f64::sin)),
        native!("sqrt", NativeKind::Unary(f64::sqrt)),
        native!("tan", NativeKind::Unary(f64::tan)),
        native!("sizeof", NativeKind::Size),
    ]);
}

pub fn lookup(name: &str) -> Option<&'static Native> {
    NATIVES.get(name)
}

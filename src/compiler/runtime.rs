//! Runtime values and array support.
//!
//! Lowered code only depends on the pieces in this module: the `Value`
//! representation, the array allocator behind `new number[..]`, and the
//! index and truthiness conversions the compiled closures share.

use std::{cell::RefCell, fmt::Display, rc::Rc};

use crate::{
    ast::types::{Dim, Type},
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// A runtime value.
///
/// Arrays are shared and mutable: assigning an array or passing it to a
/// function aliases it rather than copying it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Array(Rc<RefCell<Vec<Value>>>),
}

impl Value {
    pub fn array(elements: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(elements)))
    }

    /// Builds a flat array of numbers.
    pub fn numbers(values: &[f64]) -> Self {
        Value::array(values.iter().map(|value| Value::Number(*value)).collect())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(value) => Some(*value),
            Value::Array(_) => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Length of the outermost dimension, `None` for numbers.
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Array(elements) => Some(elements.borrow().len()),
            Value::Number(_) => None,
        }
    }

    /// Whether the value has the shape `ty` declares.
    ///
    /// Arrays must have exactly the declared depth, and each `Fixed` size must
    /// match at every level. An empty rank accepts any array.
    pub fn conforms_to(&self, ty: &Type) -> bool {
        match (self, ty) {
            (Value::Number(_), Type::Number) => true,
            (Value::Array(_), Type::Array(rank)) if rank.is_empty() => true,
            (Value::Array(_), Type::Array(rank)) => self.conforms_to_rank(rank),
            _ => false,
        }
    }

    fn conforms_to_rank(&self, rank: &[Dim]) -> bool {
        match (self, rank) {
            (Value::Number(_), []) => true,
            (Value::Array(elements), [dim, rest @ ..]) => {
                let elements = elements.borrow();
                Dim::Fixed(elements.len()).matches(dim)
                    && elements.iter().all(|element| element.conforms_to_rank(rest))
            }
            _ => false,
        }
    }

    /// Unwraps a number, failing with `ExpectedNumber` at `position`.
    pub fn expect_number(&self, position: &Position) -> Result<f64, Error> {
        self.as_number()
            .ok_or_else(|| Error::new(ErrorImpl::ExpectedNumber, position.clone()))
    }

    /// Reads the element at `index`.
    pub fn element(&self, index: f64, position: &Position) -> Result<Value, Error> {
        match self {
            Value::Array(elements) => {
                let elements = elements.borrow();
                let index = to_index(index, elements.len(), position)?;
                Ok(elements[index].clone())
            }
            Value::Number(_) => Err(Error::new(ErrorImpl::NotIndexable, position.clone())),
        }
    }

    /// Overwrites the element at `index`.
    pub fn set_element(&self, index: f64, value: Value, position: &Position) -> Result<(), Error> {
        match self {
            Value::Array(elements) => {
                let mut elements = elements.borrow_mut();
                let index = to_index(index, elements.len(), position)?;
                elements[index] = value;
                Ok(())
            }
            Value::Number(_) => Err(Error::new(ErrorImpl::NotIndexable, position.clone())),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(value) => write!(f, "{}", value),
            Value::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Allocates a zero-filled array with the given dimension sizes.
///
/// Each leading dimension holds independently allocated sub-arrays; the last
/// dimension holds zeros. No dimensions at all yields a single zero.
pub fn allocate(dimensions: &[usize]) -> Value {
    match dimensions {
        [] => Value::Number(0.0),
        [length] => Value::array(vec![Value::Number(0.0); *length]),
        [length, rest @ ..] => Value::array((0..*length).map(|_| allocate(rest)).collect()),
    }
}

/// Nonzero and not NaN.
pub fn is_truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

pub fn from_bool(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn is_whole(value: f64) -> bool {
    value >= 0.0 && value.fract() == 0.0 && value.is_finite()
}

/// Converts an index value, checking it against `length`.
pub fn to_index(value: f64, length: usize, position: &Position) -> Result<usize, Error> {
    if !is_whole(value) {
        return Err(Error::new(
            ErrorImpl::InvalidIndex { value },
            position.clone(),
        ));
    }

    let index = value as usize;
    if index >= length {
        return Err(Error::new(
            ErrorImpl::IndexOutOfBounds { index, length },
            position.clone(),
        ));
    }

    Ok(index)
}

/// Converts an array constructor dimension.
pub fn to_dimension(value: f64, position: &Position) -> Result<usize, Error> {
    if is_whole(value) {
        Ok(value as usize)
    } else {
        Err(Error::new(
            ErrorImpl::InvalidDimension { value },
            position.clone(),
        ))
    }
}

use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    function: Option<String>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
            function: None,
        }
    }

    /// Attributes the error to a function, unless an inner function already claimed it.
    pub fn in_function(mut self, function: &str) -> Self {
        if self.function.is_none() {
            self.function = Some(String::from(function));
        }
        self
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    pub fn get_error_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_kind(&self) -> ErrorKind {
        self.internal_error.kind()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::BuiltinRedeclared { .. } => "BuiltinRedeclared",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::ParameterAlreadyDeclared { .. } => "ParameterAlreadyDeclared",
            ErrorImpl::ConditionNotNumber => "ConditionNotNumber",
            ErrorImpl::DimensionNotNumber { .. } => "DimensionNotNumber",
            ErrorImpl::IndexNotNumber { .. } => "IndexNotNumber",
            ErrorImpl::ElementTypeMatchError { .. } => "ElementTypeMatchError",
            ErrorImpl::OperandNotNumber { .. } => "OperandNotNumber",
            ErrorImpl::LeftOperandNotNumber { .. } => "LeftOperandNotNumber",
            ErrorImpl::RightOperandNotNumber { .. } => "RightOperandNotNumber",
            ErrorImpl::AssignmentNotNumber { .. } => "AssignmentNotNumber",
            ErrorImpl::VariableMustBeNumber { .. } => "VariableMustBeNumber",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::TooManyIndices { .. } => "TooManyIndices",
            ErrorImpl::NotAnArray { .. } => "NotAnArray",
            ErrorImpl::AssignmentShapeMismatch { .. } => "AssignmentShapeMismatch",
            ErrorImpl::EmptyList => "EmptyList",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::IndexingUndeclared { .. } => "IndexingUndeclared",
            ErrorImpl::FunctionNotValue { .. } => "FunctionNotValue",
            ErrorImpl::UndeclaredFunction { .. } => "UndeclaredFunction",
            ErrorImpl::NotAFunction { .. } => "NotAFunction",
            ErrorImpl::ReturnTypeUnknown { .. } => "ReturnTypeUnknown",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::ReturnBeforeEnd => "ReturnBeforeEnd",
            ErrorImpl::MissingReturn => "MissingReturn",
            ErrorImpl::MultipleReturnTypes => "MultipleReturnTypes",
            ErrorImpl::ComplexityOverflow => "ComplexityOverflow",
            ErrorImpl::IndexOutOfBounds { .. } => "IndexOutOfBounds",
            ErrorImpl::InvalidIndex { .. } => "InvalidIndex",
            ErrorImpl::InvalidDimension { .. } => "InvalidDimension",
            ErrorImpl::NotIndexable => "NotIndexable",
            ErrorImpl::ExpectedNumber => "ExpectedNumber",
            ErrorImpl::UninitializedVariable { .. } => "UninitializedVariable",
            ErrorImpl::HostArgumentCount { .. } => "HostArgumentCount",
            ErrorImpl::HostArgumentType { .. } => "HostArgumentType",
            ErrorImpl::UnknownFunction { .. } => "UnknownFunction",
            ErrorImpl::CallDepthExceeded { .. } => "CallDepthExceeded",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => {
                ErrorTip::Suggestion(String::from("did you miss a semicolon?"))
            }
            ErrorImpl::ReturnTypeUnknown { function } => ErrorTip::Suggestion(format!(
                "return from `{}` on a base case before calling it again",
                function
            )),
            ErrorImpl::UndeclaredFunction { function } => ErrorTip::Suggestion(format!(
                "functions must be declared before use; move `{}` above its caller",
                function
            )),
            ErrorImpl::MissingReturn => {
                ErrorTip::Suggestion(String::from("end the function body with a `return`"))
            }
            ErrorImpl::ReturnBeforeEnd => ErrorTip::Suggestion(String::from(
                "wrap the early return in an `if` whose other path continues",
            )),
            ErrorImpl::ArgumentCountMismatch {
                expected, received, ..
            } => ErrorTip::Suggestion(format!(
                "expected {} arguments, received {}",
                expected, received
            )),
            _ => ErrorTip::None,
        }
    }

    /// The classification line printed above the detail line.
    pub fn headline(&self) -> String {
        if let ErrorImpl::UnrecognisedToken { .. } = self.internal_error {
            return String::from("Lexical Error:");
        }

        match &self.function {
            Some(function) => format!("Error in function '{}':", function),
            None => String::from("Error:"),
        }
    }

    /// Headline followed by the indented detail line.
    pub fn report(&self) -> String {
        format!("{}\n    {}", self.headline(), self.internal_error)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SyntaxError,
    DeclarationError,
    TypeError,
    ShapeError,
    ReferenceError,
    RecursionError,
    ArityError,
    ControlFlowError,
    RuntimeError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Unrecognised token `{token}'.")]
    UnrecognisedToken { token: String },
    #[error("Unexpected token `{token}'.")]
    UnexpectedToken { token: String },
    #[error("Unexpected token `{token}', {message}.")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("Invalid number `{token}'.")]
    NumberParseError { token: String },

    #[error("Redeclaration of builtin function `{function}'.")]
    BuiltinRedeclared { function: String },
    #[error("Multiple declarations of function `{function}'.")]
    FunctionAlreadyDeclared { function: String },
    #[error("Multiple declarations of parameter `{parameter}'.")]
    ParameterAlreadyDeclared { parameter: String },

    #[error("The condition must evaluate to a number.")]
    ConditionNotNumber,
    #[error("Dimension {index} of the new array must be a number.")]
    DimensionNotNumber { index: usize },
    #[error("Index {index} of variable `{variable}' must be a number.")]
    IndexNotNumber { variable: String, index: usize },
    #[error("Element {index} must be of the same type as the first.")]
    ElementTypeMatchError { index: usize },
    #[error("Expected a number as the operand of the operation `{operation}'.")]
    OperandNotNumber { operation: String },
    #[error("Expected a number on the left hand side of the operation `{operation}'.")]
    LeftOperandNotNumber { operation: String },
    #[error("Expected a number on the right hand side of the operation `{operation}'.")]
    RightOperandNotNumber { operation: String },
    #[error("The right hand side of the assignment to `{variable}' must be a number.")]
    AssignmentNotNumber { variable: String },
    #[error("The variable `{variable}' must be a number.")]
    VariableMustBeNumber { variable: String },
    #[error("Argument {index} of the function call to `{function}' is invalid.")]
    ArgumentTypeMatchError { function: String, index: usize },

    #[error("The array `{variable}' only has {dimensions} dimensions.")]
    TooManyIndices { variable: String, dimensions: usize },
    #[error("The variable `{variable}' is not an array.")]
    NotAnArray { variable: String },
    #[error("The right hand side of the assignment to `{variable}' must be an array of {dimensions} dimensions.")]
    AssignmentShapeMismatch { variable: String, dimensions: usize },
    #[error("An array literal must have at least one element.")]
    EmptyList,

    #[error("The variable `{variable}' is not defined.")]
    VariableNotDeclared { variable: String },
    #[error("Indexing a variable `{variable}' which is not defined.")]
    IndexingUndeclared { variable: String },
    #[error("The function `{function}' is not a value.")]
    FunctionNotValue { function: String },
    #[error("Calling undeclared function `{function}'.")]
    UndeclaredFunction { function: String },
    #[error("The global, `{name}', is not a function.")]
    NotAFunction { name: String },

    #[error("Recursively calling function `{function}' before determining its return type.")]
    ReturnTypeUnknown { function: String },

    #[error("The function `{function}' expects {expected} arguments.")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        received: usize,
    },

    #[error("The function returns before the end of its body.")]
    ReturnBeforeEnd,
    #[error("The function does not return a value on every path.")]
    MissingReturn,
    #[error("Multiple types of return values.")]
    MultipleReturnTypes,
    #[error("The cyclomatic complexity is too large to count.")]
    ComplexityOverflow,

    #[error("Index {index} is out of bounds for an array of length {length}.")]
    IndexOutOfBounds { index: usize, length: usize },
    #[error("Index {value} is not a non-negative integer.")]
    InvalidIndex { value: f64 },
    #[error("Array dimension {value} is not a non-negative integer.")]
    InvalidDimension { value: f64 },
    #[error("Indexing a value which is not an array.")]
    NotIndexable,
    #[error("Expected a number but found an array.")]
    ExpectedNumber,
    #[error("The variable `{variable}' is read before it is assigned.")]
    UninitializedVariable { variable: String },
    #[error("The function `{function}' expects {expected} arguments, received {received}.")]
    HostArgumentCount {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("Argument {index} passed to `{function}' has the wrong kind.")]
    HostArgumentType { function: String, index: usize },
    #[error("No function named `{function}' was declared.")]
    UnknownFunction { function: String },
    #[error("Call depth exceeded {limit} while calling `{function}'.")]
    CallDepthExceeded { function: String, limit: usize },
}

impl ErrorImpl {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::NumberParseError { .. } => ErrorKind::SyntaxError,

            ErrorImpl::BuiltinRedeclared { .. }
            | ErrorImpl::FunctionAlreadyDeclared { .. }
            | ErrorImpl::ParameterAlreadyDeclared { .. } => ErrorKind::DeclarationError,

            ErrorImpl::ConditionNotNumber
            | ErrorImpl::DimensionNotNumber { .. }
            | ErrorImpl::IndexNotNumber { .. }
            | ErrorImpl::ElementTypeMatchError { .. }
            | ErrorImpl::OperandNotNumber { .. }
            | ErrorImpl::LeftOperandNotNumber { .. }
            | ErrorImpl::RightOperandNotNumber { .. }
            | ErrorImpl::AssignmentNotNumber { .. }
            | ErrorImpl::VariableMustBeNumber { .. }
            | ErrorImpl::ArgumentTypeMatchError { .. } => ErrorKind::TypeError,

            ErrorImpl::TooManyIndices { .. }
            | ErrorImpl::NotAnArray { .. }
            | ErrorImpl::AssignmentShapeMismatch { .. }
            | ErrorImpl::EmptyList => ErrorKind::ShapeError,

            ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::IndexingUndeclared { .. }
            | ErrorImpl::FunctionNotValue { .. }
            | ErrorImpl::UndeclaredFunction { .. }
            | ErrorImpl::NotAFunction { .. }
            | ErrorImpl::UnknownFunction { .. } => ErrorKind::ReferenceError,

            ErrorImpl::ReturnTypeUnknown { .. } => ErrorKind::RecursionError,

            ErrorImpl::ArgumentCountMismatch { .. } => ErrorKind::ArityError,

            ErrorImpl::ReturnBeforeEnd
            | ErrorImpl::MissingReturn
            | ErrorImpl::MultipleReturnTypes
            | ErrorImpl::ComplexityOverflow => ErrorKind::ControlFlowError,

            ErrorImpl::IndexOutOfBounds { .. }
            | ErrorImpl::InvalidIndex { .. }
            | ErrorImpl::InvalidDimension { .. }
            | ErrorImpl::NotIndexable
            | ErrorImpl::ExpectedNumber
            | ErrorImpl::UninitializedVariable { .. }
            | ErrorImpl::HostArgumentCount { .. }
            | ErrorImpl::HostArgumentType { .. }
            | ErrorImpl::CallDepthExceeded { .. } => ErrorKind::RuntimeError,
        }
    }
}

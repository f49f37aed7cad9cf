//! Unit tests for the type checker.
//!
//! Programs are run through the whole front end, so each test reads as the
//! source text it is about.

use std::rc::Rc;

use super::{
    complexity::Complexity,
    environment::{Binding, Environment},
    program::{Program, UserFunction},
    type_checker::type_check_function,
};
use crate::{
    ast::types::{Dim, Type},
    compile_source,
    compiler::compiler::compile,
    errors::errors::{Error, ErrorImpl, ErrorKind},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

fn check(source: &str) -> Result<Program, Error> {
    compile_source(source, "test.arr")
}

fn error(source: &str) -> Error {
    check(source).unwrap_err()
}

fn result_type(program: &Program, name: &str) -> Type {
    program
        .get_function(name)
        .unwrap()
        .signature
        .result
        .clone()
        .unwrap()
}

#[test]
fn test_call_with_literal_list() {
    let program = check(
        "f(a: number[3]) { return a[0] + a[1]; }
         g(n: number) { return f([n, n, n]); }",
    )
    .unwrap();

    assert_eq!(result_type(&program, "g"), Type::Number);
    let f = program.get_function("f").unwrap();
    let g = program.get_function("g").unwrap();
    assert_eq!(g.complexity.score(), 1 + f.complexity.score());
    assert_eq!(g.signature.complexity, Some(2));
}

#[test]
fn test_dynamic_dimension_accepts_fixed_parameter() {
    assert!(check(
        "f(a: number[3]) { return a[0]; }
         g(n: number) { return f(new number[n]); }"
    )
    .is_ok());
}

#[test]
fn test_fixed_sizes_must_match_in_calls() {
    let error = error(
        "f(a: number[3]) { return a[0]; }
         g() { return f([1, 2]); }",
    );

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::ArgumentTypeMatchError {
            function: "f".to_string(),
            index: 0
        }
    );
    assert_eq!(error.get_kind(), ErrorKind::TypeError);
    assert_eq!(error.get_function(), Some("g"));
}

#[test]
fn test_multiple_return_types() {
    for source in [
        "h(x: number) { if (x) return 1; return [1, 2]; }",
        "h(x: number) { if (x) return [1, 2]; return 1; }",
    ] {
        let error = error(source);

        assert_eq!(error.get_error_impl(), &ErrorImpl::MultipleReturnTypes);
        assert_eq!(error.get_kind(), ErrorKind::ControlFlowError);
        assert_eq!(
            error.report(),
            "Error in function 'h':\n    Multiple types of return values."
        );
    }
}

#[test]
fn test_compatible_array_returns() {
    let program = check("f(x: number) { if (x) return [1, 2]; return [3, 4]; }").unwrap();

    assert_eq!(
        result_type(&program, "f"),
        Type::Array(vec![Dim::Fixed(2)])
    );
}

#[test]
fn test_recursion_before_return_type() {
    let error = error("fact(n: number) { return n * fact(n - 1); }");

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::ReturnTypeUnknown {
            function: "fact".to_string()
        }
    );
    assert_eq!(error.get_kind(), ErrorKind::RecursionError);
}

#[test]
fn test_recursion_after_base_case() {
    let program =
        check("fact(n: number) { if (n < 2) return 1; return n * fact(n - 1); }").unwrap();

    let fact = program.get_function("fact").unwrap();
    assert_eq!(fact.complexity.score(), 2);
    assert_eq!(fact.complexity.call_count("fact"), 0);
    assert_eq!(
        program.complexity_report(),
        "Cyclomatic complexity of fact: 2 (branch x 1)"
    );
}

#[test]
fn test_forward_reference() {
    let error = error("a() { return b(); } b() { return 1; }");

    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::UndeclaredFunction {
            function: "b".to_string()
        }
    );
    assert_eq!(error.get_kind(), ErrorKind::ReferenceError);
    assert_eq!(error.get_function(), Some("a"));
}

#[test]
fn test_redeclarations() {
    let builtin = error("sin(x: number) { return x; }");
    assert_eq!(
        builtin.get_error_impl(),
        &ErrorImpl::BuiltinRedeclared {
            function: "sin".to_string()
        }
    );
    assert_eq!(builtin.get_kind(), ErrorKind::DeclarationError);
    assert_eq!(builtin.headline(), "Error:");

    let twice = error("f() { return 1; } f() { return 2; }");
    assert_eq!(
        twice.get_error_impl(),
        &ErrorImpl::FunctionAlreadyDeclared {
            function: "f".to_string()
        }
    );

    let parameter = error("f(a: number, a: number) { return a; }");
    assert_eq!(
        parameter.get_error_impl(),
        &ErrorImpl::ParameterAlreadyDeclared {
            parameter: "a".to_string()
        }
    );
    assert_eq!(parameter.get_kind(), ErrorKind::DeclarationError);
}

#[test]
fn test_condition_must_be_number() {
    let error = error("f(a: number[]) { if (a) return 1; return 0; }");

    assert_eq!(error.get_error_impl(), &ErrorImpl::ConditionNotNumber);
}

#[test]
fn test_assignment_errors() {
    let cases = [
        (
            "f() { x[0] = 1; return 0; }",
            ErrorImpl::IndexingUndeclared {
                variable: "x".to_string(),
            },
        ),
        (
            "f(a: number[2]) { a[0][1] = 1; return 0; }",
            ErrorImpl::TooManyIndices {
                variable: "a".to_string(),
                dimensions: 1,
            },
        ),
        (
            "f(a: number[2][2]) { a[0][1] = [1]; return 0; }",
            ErrorImpl::AssignmentNotNumber {
                variable: "a".to_string(),
            },
        ),
        (
            "f(a: number[2][2]) { a[0] = 5; return 0; }",
            ErrorImpl::AssignmentShapeMismatch {
                variable: "a".to_string(),
                dimensions: 1,
            },
        ),
        (
            "f(a: number[2][2]) { a[0] = [1, 2, 3]; return 0; }",
            ErrorImpl::AssignmentShapeMismatch {
                variable: "a".to_string(),
                dimensions: 1,
            },
        ),
        (
            "f(a: number[]) { a[[1]] = 1; return 0; }",
            ErrorImpl::IndexNotNumber {
                variable: "a".to_string(),
                index: 0,
            },
        ),
        (
            "f(n: number) { n[0] = 1; return n; }",
            ErrorImpl::NotAnArray {
                variable: "n".to_string(),
            },
        ),
        (
            "f(n: number) { n = [1]; return n; }",
            ErrorImpl::VariableMustBeNumber {
                variable: "n".to_string(),
            },
        ),
        (
            "f() { abs = 1; return 0; }",
            ErrorImpl::FunctionNotValue {
                function: "abs".to_string(),
            },
        ),
    ];

    for (source, expected) in cases {
        assert_eq!(error(source).get_error_impl(), &expected, "{}", source);
    }
}

#[test]
fn test_valid_assignments() {
    let program = check(
        "f(a: number[2][2], x: number) {
            a[0] = [1, 2];
            a[1][0] = x;
            b = a;
            b[0][1] = 3;
            if (x) y = 1; else y = 2;
            y += x;
            return y;
        }",
    )
    .unwrap();

    assert_eq!(result_type(&program, "f"), Type::Number);
}

#[test]
fn test_expression_errors() {
    let cases = [
        (
            "f(a: number[]) { return new number[a]; }",
            ErrorImpl::DimensionNotNumber { index: 0 },
        ),
        ("f() { return []; }", ErrorImpl::EmptyList),
        (
            "f() { return [1, [2]]; }",
            ErrorImpl::ElementTypeMatchError { index: 1 },
        ),
        (
            "f() { return y; }",
            ErrorImpl::VariableNotDeclared {
                variable: "y".to_string(),
            },
        ),
        (
            "f() { return f; }",
            ErrorImpl::FunctionNotValue {
                function: "f".to_string(),
            },
        ),
        (
            "f(n: number) { return n(1); }",
            ErrorImpl::NotAFunction {
                name: "n".to_string(),
            },
        ),
        (
            "f(n: number) { return n[0]; }",
            ErrorImpl::NotAnArray {
                variable: "n".to_string(),
            },
        ),
        (
            "f(a: number[]) { return a[0][0]; }",
            ErrorImpl::TooManyIndices {
                variable: "a".to_string(),
                dimensions: 1,
            },
        ),
        (
            "f(a: number[]) { return -a; }",
            ErrorImpl::OperandNotNumber {
                operation: "negation".to_string(),
            },
        ),
        (
            "f(a: number[]) { return a + a; }",
            ErrorImpl::LeftOperandNotNumber {
                operation: "sum".to_string(),
            },
        ),
        (
            "f(a: number[]) { return 1 < a; }",
            ErrorImpl::RightOperandNotNumber {
                operation: "lesser".to_string(),
            },
        ),
        (
            "f(n: number) { n += [1]; return n; }",
            ErrorImpl::RightOperandNotNumber {
                operation: "sum".to_string(),
            },
        ),
    ];

    for (source, expected) in cases {
        assert_eq!(error(source).get_error_impl(), &expected, "{}", source);
    }
}

#[test]
fn test_list_rank() {
    let program = check("f() { return [[1, 2], [3, 4], [5, 6]]; }").unwrap();

    assert_eq!(
        result_type(&program, "f"),
        Type::Array(vec![Dim::Fixed(3), Dim::Fixed(2)])
    );
}

#[test]
fn test_partial_indexing() {
    let program = check("f(a: number[2][3]) { return a[1]; }").unwrap();

    assert_eq!(
        result_type(&program, "f"),
        Type::Array(vec![Dim::Fixed(3)])
    );
}

#[test]
fn test_variadic_builtins() {
    assert!(check("f() { return max(1, 2, 3); }").is_ok());
    assert!(check("f() { return min(4); }").is_ok());

    let error = error("f() { return max(); }");
    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::ArgumentCountMismatch {
            function: "max".to_string(),
            expected: 1,
            received: 0
        }
    );
    assert_eq!(error.get_kind(), ErrorKind::ArityError);
}

#[test]
fn test_fixed_arity_builtins() {
    let too_many = error("f() { return abs(1, 2); }");
    assert_eq!(too_many.get_kind(), ErrorKind::ArityError);

    let wrong_rest = error("f() { return max(1, [2]); }");
    assert_eq!(
        wrong_rest.get_error_impl(),
        &ErrorImpl::ArgumentTypeMatchError {
            function: "max".to_string(),
            index: 1
        }
    );

    let wrong_kind = error("f() { return abs([1]); }");
    assert_eq!(
        wrong_kind.get_error_impl(),
        &ErrorImpl::ArgumentTypeMatchError {
            function: "abs".to_string(),
            index: 0
        }
    );
}

#[test]
fn test_sizeof_accepts_any_rank() {
    let program = check(
        "f(a: number[][]) { return sizeof(a); }
         g() { return sizeof([[1, 2], [3, 4]]) + sizeof([1]); }",
    )
    .unwrap();

    assert_eq!(result_type(&program, "f"), Type::Number);
    assert_eq!(result_type(&program, "g"), Type::Number);

    let error = error("f() { return sizeof(1); }");
    assert_eq!(error.get_kind(), ErrorKind::TypeError);
}

#[test]
fn test_control_flow_errors() {
    let early = error("f() { return 1; x = 2; }");
    assert_eq!(early.get_error_impl(), &ErrorImpl::ReturnBeforeEnd);
    assert_eq!(early.get_kind(), ErrorKind::ControlFlowError);

    let falls_through = error("f(x: number) { if (x) return 1; }");
    assert_eq!(falls_through.get_error_impl(), &ErrorImpl::MissingReturn);

    let no_return = error("f() { x = 1; }");
    assert_eq!(no_return.get_error_impl(), &ErrorImpl::MissingReturn);

    assert!(check("f(x: number) { if (x) return 1; else return 2; }").is_ok());
}

#[test]
fn test_complexity_counts_callees_once() {
    let program = check(
        "a(x: number) { if (x) return 1; return 2; }
         b(x: number) { if (x) return a(x) + a(x); return a(1) + abs(x); }",
    )
    .unwrap();

    let b = program.get_function("b").unwrap();
    assert_eq!(b.complexity.score(), 1 + 1 + 2);
    assert_eq!(b.complexity.call_count("a"), 3);
    assert_eq!(b.complexity.call_count("abs"), 0);
    assert_eq!(
        program.complexity_report(),
        "Cyclomatic complexity of a: 2 (branch x 1)\n\
         Cyclomatic complexity of b: 4 (branch x 1, a x 3)"
    );
}

#[test]
fn test_error_position() {
    let error = error("f() { return y; }");

    assert_eq!(error.get_position().0, 13);
}

#[test]
fn test_registry_order() {
    let program = check("one() { return 1; } two() { return one() + 1; }").unwrap();

    let names: Vec<&str> = program
        .functions()
        .iter()
        .map(|function| function.name.as_str())
        .collect();
    assert_eq!(names, vec!["one", "two"]);
    assert!(program.is_builtin("sqrt"));
    assert!(!program.contains("sqrt"));
}

#[test]
fn test_scope_chain() {
    let program = check("sq(x: number) { return x * x; }").unwrap();
    let mut environment = Environment::new(&program);
    let slot = environment.declare("a", Type::Number);

    assert_eq!(
        environment.resolve("a"),
        Some(Binding::Variable {
            ty: Type::Number,
            slot
        })
    );
    assert!(matches!(
        environment.resolve("sq"),
        Some(Binding::Global(Type::Function(_)))
    ));
    assert!(matches!(
        environment.resolve("sqrt"),
        Some(Binding::Global(_))
    ));
    assert_eq!(environment.resolve("b"), None);
    assert_eq!(environment.slot_count(), 1);
}

#[test]
fn test_complexity_display() {
    let mut complexity = Complexity::new();
    assert_eq!(complexity.to_string(), "1");

    complexity.add_branch().unwrap();
    complexity.add_call("g", 4).unwrap();
    complexity.add_call("g", 4).unwrap();

    assert_eq!(complexity.score(), 6);
    assert_eq!(complexity.branches(), 1);
    assert_eq!(complexity.calls(), &[("g".to_string(), 2)]);
    assert_eq!(complexity.report("f"), "Cyclomatic complexity of f: 6 (branch x 1, g x 2)");
}

#[test]
fn test_complexity_overflow() {
    let mut complexity = Complexity::new();
    complexity.add_call("g", u64::MAX - 1).unwrap();

    assert_eq!(complexity.add_branch(), Err(ErrorImpl::ComplexityOverflow));
    assert_eq!(complexity.add_call("h", 1), Err(ErrorImpl::ComplexityOverflow));
    // A repeated callee adds nothing.
    assert_eq!(complexity.add_call("g", u64::MAX - 1), Ok(()));
    assert_eq!(complexity.score(), u64::MAX);
    assert_eq!(complexity.call_count("h"), 0);
}

/// `f0` returns its argument and every later `fk` returns the sum of all
/// earlier functions, so `fk` scores 2^k.
fn call_chain(length: usize) -> String {
    let mut source = String::from("f0(x: number) { return x; }\n");
    for k in 1..length {
        let calls: Vec<String> = (0..k).map(|j| format!("f{}(x)", j)).collect();
        source.push_str(&format!(
            "f{}(x: number) {{ return {}; }}\n",
            k,
            calls.join(" + ")
        ));
    }
    source
}

#[test]
fn test_complexity_of_deep_call_chain() {
    let program = check(&call_chain(64)).unwrap();
    let last = program.get_function("f63").unwrap();
    assert_eq!(last.complexity.score(), 1u64 << 63);
    assert_eq!(last.signature.complexity, Some(1u64 << 63));

    let error = error(&call_chain(65));
    assert_eq!(error.get_error_impl(), &ErrorImpl::ComplexityOverflow);
    assert_eq!(error.get_kind(), ErrorKind::ControlFlowError);
    assert_eq!(error.get_function(), Some("f64"));
}

#[test]
fn test_declare_rejects_duplicates() {
    let file = Rc::new("test.arr".to_string());
    let tokens = tokenize("f() { return 1; }", Rc::clone(&file)).unwrap();
    let declarations = parse(tokens, file).unwrap();
    let lower = |program: &Program| {
        let function = type_check_function(program, &declarations[0]).unwrap();
        let executable = compile(&function);
        UserFunction::new(function, executable)
    };

    let mut program = Program::new();
    let first = lower(&program);
    let second = lower(&program);
    program.declare(first).unwrap();

    let error = program.declare(second).unwrap_err();
    assert_eq!(
        error.get_error_impl(),
        &ErrorImpl::FunctionAlreadyDeclared {
            function: "f".to_string()
        }
    );
    assert_eq!(error.get_position().0, 0);
    assert_eq!(error.get_position().1.as_str(), "test.arr");
    assert_eq!(program.functions().len(), 1);
}

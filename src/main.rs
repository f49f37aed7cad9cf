use std::{fs::read_to_string, path::{Path, PathBuf}, process::ExitCode, rc::Rc};

use arraylang::{
    ast::{
        ast::{Expr, ExprKind},
        expressions::PrefixOperator,
    },
    compile_source,
    compiler::runtime::Value,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse_expression,
    render_excerpt,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arraylang")]
#[command(about = "Analyzer and evaluator for the array language")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "check", about = "check <file> | Analyze a program and print its complexity report")]
    Check { file: PathBuf },
    #[command(name = "run", about = "run <file> <function> [args...] | Call a function of a program")]
    Run {
        file: PathBuf,
        function: String,
        /// Numbers or list literals, e.g. `3`, `-2.5`, `[[1,2],[3,4]]`
        #[arg(allow_hyphen_values = true)]
        arguments: Vec<String>,
    },
}

fn main() -> ExitCode {
    if let Ok(filter) = EnvFilter::try_from_env("ARRAYLANG_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .without_time()
            .compact()
            .init();
    }

    let cli = Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Check { file } => check(&file),
        Commands::Run {
            file,
            function,
            arguments,
        } => run(&file, &function, &arguments),
    }
}

fn check(file: &Path) -> ExitCode {
    let Some(source) = read_source(file) else {
        return ExitCode::FAILURE;
    };

    match compile_source(&source, &file_name(file)) {
        Ok(program) => {
            let report = program.complexity_report();
            if !report.is_empty() {
                println!("{}", report);
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            display_error(&error, &source, file);
            ExitCode::FAILURE
        }
    }
}

fn run(file: &Path, function: &str, arguments: &[String]) -> ExitCode {
    let Some(source) = read_source(file) else {
        return ExitCode::FAILURE;
    };

    let program = match compile_source(&source, &file_name(file)) {
        Ok(program) => program,
        Err(error) => {
            display_error(&error, &source, file);
            return ExitCode::FAILURE;
        }
    };

    let mut values = Vec::with_capacity(arguments.len());
    for argument in arguments {
        match parse_argument(argument) {
            Ok(value) => values.push(value),
            Err(message) => {
                eprintln!("{} {}", "Invalid argument:".red().bold(), message);
                return ExitCode::FAILURE;
            }
        }
    }

    match program.invoke(function, values) {
        Ok(value) => {
            println!("{}", value);
            ExitCode::SUCCESS
        }
        Err(error) => {
            display_error(&error, &source, file);
            ExitCode::FAILURE
        }
    }
}

fn read_source(file: &Path) -> Option<String> {
    match read_to_string(file) {
        Ok(source) => Some(source),
        Err(error) => {
            eprintln!(
                "{} failed to read {}: {}",
                "Error:".red().bold(),
                file.display(),
                error
            );
            None
        }
    }
}

fn file_name(file: &Path) -> String {
    file.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string_lossy().into_owned())
}

/// Reads a command line argument written as a numeric or list literal.
fn parse_argument(argument: &str) -> Result<Value, String> {
    let file = Rc::new(String::from("<argument>"));
    let tokens = tokenize(argument, Rc::clone(&file)).map_err(|error| error.to_string())?;
    let expression = parse_expression(tokens, file).map_err(|error| error.to_string())?;

    literal_value(&expression).ok_or_else(|| format!("`{}' is not a literal", argument))
}

fn literal_value(expression: &Expr) -> Option<Value> {
    match &expression.kind {
        ExprKind::Number(value) => Some(Value::Number(*value)),
        ExprKind::Prefix {
            operator: PrefixOperator::Negation,
            operand,
        } => match literal_value(operand)? {
            Value::Number(value) => Some(Value::Number(-value)),
            Value::Array(_) => None,
        },
        ExprKind::List { elements } => elements
            .iter()
            .map(literal_value)
            .collect::<Option<Vec<Value>>>()
            .map(Value::array),
        _ => None,
    }
}

fn display_error(error: &Error, source: &str, file: &Path) {
    /*
        Error in function 'f':
            The variable `y' is not defined.
        -> file.arr
           |
        20 | return y;
           | -------^
    */

    tracing::debug!(error = error.get_error_name(), kind = %error.get_kind(), "reporting error");

    eprintln!("{}", error.headline().red().bold());
    match error.get_tip() {
        ErrorTip::None => eprintln!("    {}", error),
        tip => eprintln!("    {} ({})", error, tip.to_string().yellow()),
    }

    // Host-side errors carry no source position.
    if *error.get_position().1 != file_name(file) {
        return;
    }
    if let Some(excerpt) = render_excerpt(error, source, file) {
        eprintln!("{}", excerpt);
    }
}

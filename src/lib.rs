#![allow(clippy::module_inception)]

use std::{path::Path, rc::Rc};

use crate::{
    errors::errors::Error, lexer::lexer::tokenize, parser::parser::parse,
    type_checker::{program::Program, type_checker::type_check},
};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// Byte offset into a source file, plus the file's name.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }
}

/// Runs the whole pipeline (tokenize, parse, analyze and lower) over a source text.
///
/// # Arguments
///
/// * `source` - The program text
/// * `file` - Name used in positions and error excerpts
///
/// # Returns
///
/// The completed program registry, or the first error encountered.
pub fn compile_source(source: &str, file: &str) -> Result<Program, Error> {
    let file = Rc::new(String::from(file));
    let tokens = tokenize(source, Rc::clone(&file))?;
    let declarations = parse(tokens, file)?;

    type_check(&declarations)
}

/// Finds the line containing a byte offset.
///
/// Returns the 1-based line number, the line text and the offset of the
/// position within that line.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((line_number, line.to_string(), pos - start));
        }

        start = end;
        line_number += 1;
    }

    // Position sits at end of input.
    content
        .lines()
        .last()
        .map(|line| (line_number.saturating_sub(1).max(1), line.to_string(), line.len()))
}

/// Renders the source excerpt for an error:
///
/// ```text
/// -> file.arr
///    |
/// 20 | x = y + 1;
///    | ----^
/// ```
pub fn render_excerpt(error: &Error, source: &str, file: &Path) -> Option<String> {
    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0)?;

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    let mut excerpt = String::new();
    excerpt.push_str(&format!("-> {}\n", file.as_os_str().to_string_lossy()));
    excerpt.push_str(&format!("{:>padding$}\n", "|"));
    excerpt.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));
    excerpt.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));

    Some(excerpt)
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ' || *c == '\t').count();

    (String::from(&string[start..]), start)
}

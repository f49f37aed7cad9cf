//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the parsing entry points.
//! The parser uses a Pratt parser approach with NUD/LED handlers for
//! expression parsing and specialized functions for statement parsing.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{ast::Expr, statements::FnDecl},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    expr::parse_expr,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_fn_decl,
};

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and maintains lookup tables for
/// parsing statements and expressions. It tracks the current position
/// in the token stream and provides methods for token consumption.
pub struct Parser {
    /// The list of tokens to parse, always terminated by `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser instance with its lookup tables populated.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Vector of tokens to parse
    /// * `file` - Reference-counted string containing the source file name
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position(0, Rc::clone(&file)));
            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span {
                    start: end.clone(),
                    end
                }
            ));
        }

        let mut parser = Parser {
            tokens,
            pos: 0,
            file,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous token.
    ///
    /// The position never moves past the final `EOF` token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )),
            }
        } else {
            Ok(self.advance())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Builds an `UnexpectedTokenDetailed` error at the current token.
    pub fn unexpected(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current_token().value.clone(),
                message: String::from(message),
            },
            self.get_position(),
        )
    }

    /// Returns true while the current token is not EOF.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix handlers leave the token's infix binding power untouched, so a
    /// token such as `-` can be both a prefix and an infix operator.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the start position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// Returns the end position of the most recently consumed token.
    pub fn get_end_position(&self) -> Position {
        match self.pos.checked_sub(1) {
            Some(previous) => self.tokens[previous].span.end.clone(),
            None => Position(0, Rc::clone(&self.file)),
        }
    }
}

/// Parses a stream of tokens into function declarations.
///
/// This is the main entry point for parsing. It creates a parser instance
/// and parses declarations until EOF.
///
/// # Arguments
///
/// * `tokens` - Vector of tokens to parse
/// * `file` - Reference-counted string containing the source file name
///
/// # Returns
///
/// The declarations in source order, or the first syntax error.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Vec<FnDecl>, Error> {
    let mut parser = Parser::new(tokens, file);

    let mut declarations = vec![];
    while parser.has_tokens() {
        declarations.push(parse_fn_decl(&mut parser)?);
    }

    tracing::trace!(declarations = declarations.len(), "parsed program");
    Ok(declarations)
}

/// Parses a token stream holding a single expression.
pub fn parse_expression(tokens: Vec<Token>, file: Rc<String>) -> Result<Expr, Error> {
    let mut parser = Parser::new(tokens, file);

    let expr = parse_expr(&mut parser, BindingPower::Default)?;
    parser.expect(TokenKind::EOF)?;

    Ok(expr)
}

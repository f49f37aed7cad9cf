use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Order matters: longer operators must precede their prefixes.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^[0-9]+(\\.[0-9]+)?").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^\\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[") },
        RegexPattern { regex: Regex::new("^\\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]") },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^\\|\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
        RegexPattern { regex: Regex::new("^&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^\\+=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=") },
        RegexPattern { regex: Regex::new("^-=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=") },
        RegexPattern { regex: Regex::new("^\\*=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=") },
        RegexPattern { regex: Regex::new("^/=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::SlashEquals, "/=") },
        RegexPattern { regex: Regex::new("^%=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PercentEquals, "%=") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
    ];
}

pub struct Lexer<'s> {
    tokens: Vec<Token>,
    source: &'s str,
    pos: usize,
    file: Rc<String>,
}

impl<'s> Lexer<'s> {
    pub fn new(source: &'s str, file: Rc<String>) -> Self {
        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            file,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &'s str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// Span covering the next `len` bytes.
    pub fn span(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }
}

fn matched_text<'s>(lexer: &Lexer<'s>, regex: &Regex) -> &'s str {
    regex.find(lexer.remainder()).map_or("", |matched| matched.as_str())
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = matched_text(lexer, regex);

    let span = lexer.span(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Number, String::from(matched), span));
    lexer.advance_n(matched.len());
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = matched_text(lexer, regex);
    lexer.advance_n(matched.len());
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = matched_text(lexer, regex);
    let kind = RESERVED_LOOKUP
        .get(value)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    let span = lexer.span(value.len());
    lexer.push(MK_TOKEN!(kind, String::from(value), span));
    lexer.advance_n(value.len());
}

/// Splits source text into tokens, ending with an `EOF` token.
///
/// # Arguments
///
/// * `source` - The program text
/// * `file` - Name of the file, carried in every token position
///
/// # Returns
///
/// The token stream, or an `UnrecognisedToken` error at the first
/// character no pattern accepts.
pub fn tokenize(source: &str, file: Rc<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let remaining = lex.remainder();
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(remaining));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex),
            None => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken {
                        token: lex.at().to_string(),
                    },
                    lex.position(),
                ))
            }
        }
    }

    let span = lex.span(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));

    tracing::trace!(tokens = lex.tokens.len(), "tokenized source");
    Ok(lex.tokens)
}

use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOperator {
    Negation,
    Inversion,
}

impl PrefixOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Dash => Some(PrefixOperator::Negation),
            TokenKind::Not => Some(PrefixOperator::Inversion),
            _ => None,
        }
    }
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefixOperator::Negation => write!(f, "negation"),
            PrefixOperator::Inversion => write!(f, "inversion"),
        }
    }
}

/// Binary operators. Every one of them maps numbers to a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Sum,
    Difference,
    Product,
    Quotient,
    Remainder,
    Conjunction,
    Disjunction,
    Lesser,
    Greater,
    NoGreater,
    NoLesser,
    Equal,
    Inequal,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(BinaryOperator::Sum),
            TokenKind::Dash => Some(BinaryOperator::Difference),
            TokenKind::Star => Some(BinaryOperator::Product),
            TokenKind::Slash => Some(BinaryOperator::Quotient),
            TokenKind::Percent => Some(BinaryOperator::Remainder),
            TokenKind::And => Some(BinaryOperator::Conjunction),
            TokenKind::Or => Some(BinaryOperator::Disjunction),
            TokenKind::Less => Some(BinaryOperator::Lesser),
            TokenKind::Greater => Some(BinaryOperator::Greater),
            TokenKind::LessEquals => Some(BinaryOperator::NoGreater),
            TokenKind::GreaterEquals => Some(BinaryOperator::NoLesser),
            TokenKind::Equals => Some(BinaryOperator::Equal),
            TokenKind::NotEquals => Some(BinaryOperator::Inequal),
            _ => None,
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BinaryOperator::Sum => "sum",
            BinaryOperator::Difference => "difference",
            BinaryOperator::Product => "product",
            BinaryOperator::Quotient => "quotient",
            BinaryOperator::Remainder => "remainder",
            BinaryOperator::Conjunction => "conjunction",
            BinaryOperator::Disjunction => "disjunction",
            BinaryOperator::Lesser => "lesser",
            BinaryOperator::Greater => "greater",
            BinaryOperator::NoGreater => "nogreater",
            BinaryOperator::NoLesser => "nolesser",
            BinaryOperator::Equal => "equal",
            BinaryOperator::Inequal => "inequal",
        };
        write!(f, "{}", name)
    }
}

/// The operator of `x op= e`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundOperator {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
}

impl CompoundOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::PlusEquals => Some(CompoundOperator::Addition),
            TokenKind::MinusEquals => Some(CompoundOperator::Subtraction),
            TokenKind::StarEquals => Some(CompoundOperator::Multiplication),
            TokenKind::SlashEquals => Some(CompoundOperator::Division),
            TokenKind::PercentEquals => Some(CompoundOperator::Modulo),
            _ => None,
        }
    }

    /// The binary operator `x op= e` expands to.
    pub fn longhand(&self) -> BinaryOperator {
        match self {
            CompoundOperator::Addition => BinaryOperator::Sum,
            CompoundOperator::Subtraction => BinaryOperator::Difference,
            CompoundOperator::Multiplication => BinaryOperator::Product,
            CompoundOperator::Division => BinaryOperator::Quotient,
            CompoundOperator::Modulo => BinaryOperator::Remainder,
        }
    }
}

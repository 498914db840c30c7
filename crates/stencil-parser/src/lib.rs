//! Stencil Parser
//!
//! Validates token streams from `stencil-lexer` against an LL(1) grammar.
//! The parser is a recognizer: on success it hands back the flat list of
//! terminal tokens it matched, on failure every syntax error it found.
//!
//! The [`template`] module instantiates the generic machinery for the
//! placeholder language:
//!
//! ```text
//! 0: T -> CONTENT T
//! 1: T -> PLACEHOLDER_KEY T
//! 2: T -> OPEN_KEY T CLOSE_KEY T
//! 3: T -> ε
//! ```

pub mod grammar;
pub mod parser;
pub mod template;

pub use grammar::{Grammar, GrammarError, Symbol};
pub use parser::Parser;
pub use template::{parse, Outline, TEMPLATE_GRAMMAR};

use stencil_lexer::{Terminal, Token};

/// Echoed token values are cut to this many characters.
pub const VALUE_PREVIEW_LEN: usize = 20;

/// A syntax error found while parsing. Parsing collects these instead of
/// stopping at the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// The terminal on top of the stack does not match the lookahead.
    #[error(
        "Found token {found} at line {line}, column {column}.\n\
         Expected a token of type {expected}.\n\
         Value (truncated): \"{value}\""
    )]
    UnexpectedTerminal {
        found: &'static str,
        expected: &'static str,
        line: usize,
        column: usize,
        value: String,
    },

    /// The nonterminal on top of the stack has no production for the lookahead.
    #[error("Found token {found} at line {line}, column {column}!\nValue (truncated): \"{value}\"")]
    NoProduction {
        found: &'static str,
        line: usize,
        column: usize,
        value: String,
    },

    /// Input ran out before the symbol stack emptied.
    #[error("Premature end of input.")]
    PrematureEndOfInput,
}

impl SyntaxError {
    pub fn unexpected<K: Terminal>(found: &Token<K>, expected: K) -> Self {
        SyntaxError::UnexpectedTerminal {
            found: found.kind.name(),
            expected: expected.name(),
            line: found.line,
            column: found.column,
            value: found.truncated_text(VALUE_PREVIEW_LEN),
        }
    }

    pub fn no_production<K: Terminal>(found: &Token<K>) -> Self {
        SyntaxError::NoProduction {
            found: found.kind.name(),
            line: found.line,
            column: found.column,
            value: found.truncated_text(VALUE_PREVIEW_LEN),
        }
    }

    /// Line and column of the offending token, if there is one.
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            SyntaxError::UnexpectedTerminal { line, column, .. }
            | SyntaxError::NoProduction { line, column, .. } => Some((*line, *column)),
            SyntaxError::PrematureEndOfInput => None,
        }
    }
}

/// Every syntax error of a failed parse, as a single error value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_messages(.0))]
pub struct ParseFailure(pub Vec<SyntaxError>);

fn join_messages(errors: &[SyntaxError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl From<Vec<SyntaxError>> for ParseFailure {
    fn from(errors: Vec<SyntaxError>) -> Self {
        ParseFailure(errors)
    }
}

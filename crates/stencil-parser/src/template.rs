//! The placeholder-language grammar.
//!
//! ```text
//! 0: T -> CONTENT T
//! 1: T -> PLACEHOLDER_KEY T
//! 2: T -> OPEN_KEY T CLOSE_KEY T
//! 3: T -> ε
//! ```
//!
//! FOLLOW(T) is `{CLOSE_KEY, EOI}`, so both select the ε production.

use stencil_lexer::template::{open_key, placeholder_key};
use stencil_lexer::{Lexer, TemplateKind, TemplateToken};

use crate::grammar::{Grammar, Symbol};
use crate::parser::Parser;
use crate::SyntaxError;

const T: usize = 0;

const CONTENT: Symbol<TemplateKind> = Symbol::Terminal(TemplateKind::Content);
const PLACEHOLDER_KEY: Symbol<TemplateKind> = Symbol::Terminal(TemplateKind::PlaceholderKey);
const OPEN_KEY: Symbol<TemplateKind> = Symbol::Terminal(TemplateKind::OpenKey);
const CLOSE_KEY: Symbol<TemplateKind> = Symbol::Terminal(TemplateKind::CloseKey);
const NT_T: Symbol<TemplateKind> = Symbol::Nonterminal(T);

/// Number of parse table columns.
pub const TERMINAL_CLASSES: usize = 6;

fn terminal_class(kind: TemplateKind) -> usize {
    match kind {
        TemplateKind::Content => 0,
        TemplateKind::PlaceholderKey => 1,
        TemplateKind::OpenKey => 2,
        TemplateKind::CloseKey => 3,
        TemplateKind::Unrecognized => 4,
        TemplateKind::EndOfInput => 5,
    }
}

pub static TEMPLATE_GRAMMAR: Grammar<TemplateKind> = Grammar {
    nonterminals: &["T"],
    start: T,
    productions: &[
        &[CONTENT, NT_T],
        &[PLACEHOLDER_KEY, NT_T],
        &[OPEN_KEY, NT_T, CLOSE_KEY, NT_T],
        &[],
    ],
    //            CONTENT  PLACEHOLDER  OPEN     CLOSE    UNRECOGNIZED  EOI
    table: &[&[Some(0), Some(1), Some(2), Some(3), None, Some(3)]],
    terminal_class,
};

impl<'a> Parser<'a, TemplateKind> {
    /// Create a parser over template source.
    pub fn template(source: &'a str) -> Self {
        Parser::new(Lexer::template(source), &TEMPLATE_GRAMMAR)
    }
}

/// Parse template source.
///
/// On success returns the validated token sequence, `EOI` excluded. Every
/// `OPEN_KEY` in it is matched by a later `CLOSE_KEY` at the same depth.
pub fn parse(source: &str) -> Result<Vec<TemplateToken>, Vec<SyntaxError>> {
    Parser::template(source).parse()
}

/// Keys used by a parsed template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    /// Placeholder keys, in first-seen order, without duplicates.
    pub placeholders: Vec<String>,
    /// Tag ("button") keys, in first-seen order, without duplicates.
    pub tags: Vec<String>,
    /// Deepest tag nesting.
    pub max_depth: usize,
}

impl Outline {
    pub fn from_tokens(tokens: &[TemplateToken]) -> Self {
        let mut outline = Outline::default();
        let mut depth = 0usize;

        for token in tokens {
            match token.kind {
                TemplateKind::PlaceholderKey => {
                    if let Some(key) = placeholder_key(token) {
                        push_unique(&mut outline.placeholders, key);
                    }
                }
                TemplateKind::OpenKey => {
                    if let Some(key) = open_key(token) {
                        push_unique(&mut outline.tags, key);
                    }
                    depth += 1;
                    outline.max_depth = outline.max_depth.max(depth);
                }
                TemplateKind::CloseKey => depth = depth.saturating_sub(1),
                _ => {}
            }
        }

        outline
    }
}

fn push_unique(keys: &mut Vec<String>, key: &str) {
    if !keys.iter().any(|k| k == key) {
        keys.push(key.to_string());
    }
}

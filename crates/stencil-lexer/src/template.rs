//! The placeholder-language instance of the generic lexer.
//!
//! Every construct starts with the sigil `\@`:
//!
//! ```text
//! \@name          placeholder key
//! \@name{         opening tag ("button") key
//! \@}             closing tag
//! \\              escaped backslash inside content
//! ```
//!
//! Key names use ASCII letters, digits, `.`, `-` and `_`. Anything else is
//! content, and malformed `\@` sequences come out as `UNRECOGNIZED`.

use std::fmt;

use crate::automaton::{Action, Automaton};
use crate::scanner::Lexer;
use crate::token::{Terminal, Token};

/// Token kinds of the placeholder language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Content,
    PlaceholderKey,
    OpenKey,
    CloseKey,
    EndOfInput,
    Unrecognized,
}

impl Terminal for TemplateKind {
    const END_OF_INPUT: Self = TemplateKind::EndOfInput;
    const UNRECOGNIZED: Self = TemplateKind::Unrecognized;

    fn name(self) -> &'static str {
        match self {
            TemplateKind::Content => "CONTENT",
            TemplateKind::PlaceholderKey => "PLACEHOLDER_KEY",
            TemplateKind::OpenKey => "OPEN_KEY",
            TemplateKind::CloseKey => "CLOSE_KEY",
            TemplateKind::EndOfInput => "EOI",
            TemplateKind::Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token of the placeholder language.
pub type TemplateToken = Token<TemplateKind>;

/// Lexer over the placeholder language.
pub type TemplateLexer<'a> = Lexer<'a, TemplateKind>;

/// The sigil that introduces every key.
pub const SIGIL: &str = "\\@";

// Alphabet columns.
const COL_ESCAPE: usize = 0;
const COL_AT: usize = 1;
const COL_OPEN: usize = 2;
const COL_CLOSE: usize = 3;
const COL_KEY: usize = 4;
const COL_OTHER: usize = 5;
const COL_END: usize = 6;

/// Whether `byte` may appear in a key name.
pub fn is_key_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'-' | b'_')
}

fn classify(byte: Option<u8>) -> usize {
    match byte {
        None => COL_END,
        Some(b'\\') => COL_ESCAPE,
        Some(b'@') => COL_AT,
        Some(b'{') => COL_OPEN,
        Some(b'}') => COL_CLOSE,
        Some(b) if is_key_byte(b) => COL_KEY,
        Some(_) => COL_OTHER,
    }
}

const X: &[i16] = &[-1, -1, -1, -1, -1, -1, -1];

/// The placeholder-language automaton.
///
/// States 9..=15 accept. State 9 is reached after a content run consumed a
/// `\` that turned out to start a key: the `\` is handed back.
pub static TEMPLATE_AUTOMATON: Automaton<TemplateKind> = Automaton {
    columns: 7,
    transitions: &[
        //        \   @   {   }   C   Q   $
        /*  0 */ &[2, 3, 3, 3, 3, 3, 15],
        /*  1 */ &[3, 9, 9, 9, 9, 9, 13],
        /*  2 */ &[3, 4, 13, 13, 13, 13, 13],
        /*  3 */ &[1, 3, 3, 3, 3, 3, 14],
        /*  4 */ &[13, 8, 8, 6, 5, 8, 13],
        /*  5 */ &[11, 11, 7, 11, 5, 11, 11],
        /*  6 */ &[10, 10, 10, 10, 10, 10, 10],
        /*  7 */ &[12, 12, 12, 12, 12, 12, 12],
        /*  8 */ &[13, 8, 8, 8, 8, 8, 13],
        /*  9 */ X,
        /* 10 */ X,
        /* 11 */ X,
        /* 12 */ X,
        /* 13 */ X,
        /* 14 */ X,
        /* 15 */ X,
    ],
    actions: &[
        Action::Scan,
        Action::Scan,
        Action::Scan,
        Action::Scan,
        Action::Scan,
        Action::Scan,
        Action::Scan,
        Action::Scan,
        Action::Scan,
        Action::AcceptWithPushback(TemplateKind::Content),
        Action::Accept(TemplateKind::CloseKey),
        Action::Accept(TemplateKind::PlaceholderKey),
        Action::Accept(TemplateKind::OpenKey),
        Action::Accept(TemplateKind::Unrecognized),
        Action::Accept(TemplateKind::Content),
        Action::Accept(TemplateKind::EndOfInput),
    ],
    classify,
};

impl<'a> Lexer<'a, TemplateKind> {
    /// Create a lexer over template source.
    pub fn template(source: &'a str) -> Self {
        Lexer::new(source, &TEMPLATE_AUTOMATON)
    }
}

/// Tokenize template source. The last token is always `EOI`.
pub fn tokenize(source: &str) -> Vec<TemplateToken> {
    Lexer::tokenize(source, &TEMPLATE_AUTOMATON)
}

/// Content text with every `\\` turned into `\`.
pub fn unescape_content(text: &str) -> String {
    text.replace("\\\\", "\\")
}

/// The key name of a placeholder token (`\@name` gives `name`).
pub fn placeholder_key(token: &TemplateToken) -> Option<&str> {
    match token.kind {
        TemplateKind::PlaceholderKey => token.text.strip_prefix(SIGIL),
        _ => None,
    }
}

/// The key name of an opening tag token (`\@name{` gives `name`).
pub fn open_key(token: &TemplateToken) -> Option<&str> {
    match token.kind {
        TemplateKind::OpenKey => token.text.strip_prefix(SIGIL)?.strip_suffix('{'),
        _ => None,
    }
}

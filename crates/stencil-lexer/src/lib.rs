//! Stencil Lexer
//!
//! Table-driven tokenizer for the stencil placeholder language. A generic
//! [`Lexer`] runs any [`Automaton`] over a source string; the [`template`]
//! module supplies the automaton for `\@key`, `\@key{` and `\@}` markers
//! embedded in otherwise opaque HTML/JS text.
//!
//! # Example
//!
//! ```
//! use stencil_lexer::template::{tokenize, TemplateKind};
//!
//! let tokens = tokenize("Hi \\@name");
//! assert_eq!(tokens[1].kind, TemplateKind::PlaceholderKey);
//! assert_eq!(tokens.len(), 3); // CONTENT, PLACEHOLDER_KEY, EOI
//! ```

pub mod automaton;
pub mod scanner;
pub mod stack;
pub mod template;
pub mod token;

pub use automaton::{Action, Automaton, AutomatonError, NO_TRANSITION};
pub use scanner::Lexer;
pub use stack::Stack;
pub use template::{TemplateKind, TemplateLexer, TemplateToken, TEMPLATE_AUTOMATON};
pub use token::{LineWidths, Position, Terminal, Token};

//! Generic table-driven LL(1) parser.
//!
//! Pulls tokens from a [`Lexer`] on demand and matches them against a
//! [`Grammar`] with an explicit symbol stack seeded with
//! `[END_OF_INPUT, start]`.
//!
//! After the first error the parser keeps its stack and discards lookahead
//! tokens one by one, re-testing each against the same stack top, until end
//! of input. Accepted tokens are dropped and only error messages are
//! collected from then on.

use stencil_lexer::{Lexer, Stack, Terminal, Token};

use crate::grammar::{Grammar, Symbol};
use crate::SyntaxError;

/// LL(1) recognizer over a lexer and a grammar.
pub struct Parser<'a, K: Terminal> {
    lexer: Lexer<'a, K>,
    grammar: &'static Grammar<K>,
}

impl<'a, K: Terminal> Parser<'a, K> {
    /// Create a new parser reading tokens from `lexer`.
    pub fn new(lexer: Lexer<'a, K>, grammar: &'static Grammar<K>) -> Self {
        Self { lexer, grammar }
    }

    /// Run the parse.
    ///
    /// Returns the matched terminal tokens in input order (end of input
    /// excluded), or every syntax error found.
    pub fn parse(mut self) -> Result<Vec<Token<K>>, Vec<SyntaxError>> {
        let mut accepted = Vec::new();
        let mut errors = Vec::new();

        let mut stack: Stack<Symbol<K>> = [
            Symbol::Terminal(K::END_OF_INPUT),
            Symbol::Nonterminal(self.grammar.start),
        ]
        .into_iter()
        .collect();

        let mut lookahead: Option<Token<K>> = None;
        let mut last_kind = None;

        while let Some(&top) = stack.top() {
            match top {
                Symbol::Nonterminal(nonterminal) => {
                    let token = self.take_lookahead(&mut lookahead, &mut last_kind);

                    match self.grammar.production_for(nonterminal, token.kind) {
                        Some(rhs) => {
                            log::trace!(
                                "expand {} on {} with {} symbol(s)",
                                self.grammar.symbol_name(top),
                                token.kind.name(),
                                rhs.len()
                            );
                            stack.pop();
                            for symbol in rhs.iter().rev() {
                                stack.push(*symbol);
                            }
                            lookahead = Some(token);
                        }
                        None => {
                            let error = SyntaxError::no_production(&token);
                            log::debug!("{error}");
                            errors.push(error);
                        }
                    }
                }
                Symbol::Terminal(expected) => {
                    let token = self.take_lookahead(&mut lookahead, &mut last_kind);

                    if token.kind == expected {
                        stack.pop();
                        if expected != K::END_OF_INPUT && errors.is_empty() {
                            accepted.push(token);
                        }
                    } else {
                        let error = SyntaxError::unexpected(&token, expected);
                        log::debug!("{error}");
                        errors.push(error);

                        // Move on, or the same token would be re-tested forever.
                        let next = self.lexer.next_token();
                        last_kind = Some(next.kind);
                        lookahead = Some(next);
                    }
                }
            }

            let keep_going = if errors.is_empty() {
                !stack.is_empty()
            } else {
                last_kind != Some(K::END_OF_INPUT)
            };
            if !keep_going {
                break;
            }
        }

        if !stack.is_empty() {
            errors.push(SyntaxError::PrematureEndOfInput);
        }

        if errors.is_empty() {
            log::debug!("parse succeeded with {} token(s)", accepted.len());
            Ok(accepted)
        } else {
            log::debug!("parse failed with {} error(s)", errors.len());
            Err(errors)
        }
    }

    /// The pending lookahead, or a fresh token from the lexer.
    fn take_lookahead(
        &mut self,
        lookahead: &mut Option<Token<K>>,
        last_kind: &mut Option<K>,
    ) -> Token<K> {
        match lookahead.take() {
            Some(token) => token,
            None => {
                let token = self.lexer.next_token();
                *last_kind = Some(token.kind);
                token
            }
        }
    }
}

//! Static description of an LL(1) grammar.
//!
//! A grammar instance is plain data: productions, the predictive parse table
//! and a function folding token kinds onto table columns. The generic
//! [`Parser`](crate::Parser) interprets it.

use stencil_lexer::Terminal;

/// A grammar symbol: a terminal token kind or a nonterminal index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol<K> {
    Terminal(K),
    Nonterminal(usize),
}

/// Structural problem in a grammar's tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("start symbol {0} is not a nonterminal of the grammar")]
    UnknownStart(usize),
    #[error("parse table has {found} rows, expected one per nonterminal ({expected})")]
    RowCount { found: usize, expected: usize },
    #[error("parse table row {row} has {found} columns, expected {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("parse table row {row}, column {column} names missing production {production}")]
    UnknownProduction {
        row: usize,
        column: usize,
        production: usize,
    },
    #[error("production {production} refers to unknown nonterminal {nonterminal}")]
    UnknownNonterminal {
        production: usize,
        nonterminal: usize,
    },
}

/// An LL(1) grammar with its predictive parse table.
#[derive(Debug)]
pub struct Grammar<K: 'static> {
    /// Nonterminal names, indexed by nonterminal.
    pub nonterminals: &'static [&'static str],
    pub start: usize,
    /// Right-hand sides, indexed by production. An empty slice is ε.
    pub productions: &'static [&'static [Symbol<K>]],
    /// `nonterminal × terminal class → production`; `None` is a syntax error.
    pub table: &'static [&'static [Option<usize>]],
    /// Maps a token kind to its parse table column.
    pub terminal_class: fn(K) -> usize,
}

impl<K: Terminal> Grammar<K> {
    /// The production to expand `nonterminal` with when `lookahead` is next.
    pub fn production_for(&self, nonterminal: usize, lookahead: K) -> Option<&'static [Symbol<K>]> {
        let column = (self.terminal_class)(lookahead);
        let index = (*self.table.get(nonterminal)?.get(column)?)?;
        self.productions.get(index).copied()
    }

    /// Display name of a symbol.
    pub fn symbol_name(&self, symbol: Symbol<K>) -> &'static str {
        match symbol {
            Symbol::Terminal(kind) => kind.name(),
            Symbol::Nonterminal(index) => self.nonterminals.get(index).copied().unwrap_or("?"),
        }
    }

    /// Check that the table and productions reference each other consistently.
    /// `columns` is the number of terminal classes.
    pub fn validate(&self, columns: usize) -> Result<(), GrammarError> {
        if self.start >= self.nonterminals.len() {
            return Err(GrammarError::UnknownStart(self.start));
        }
        if self.table.len() != self.nonterminals.len() {
            return Err(GrammarError::RowCount {
                found: self.table.len(),
                expected: self.nonterminals.len(),
            });
        }

        for (row, cells) in self.table.iter().enumerate() {
            if cells.len() != columns {
                return Err(GrammarError::RowWidth {
                    row,
                    found: cells.len(),
                    expected: columns,
                });
            }
            for (column, cell) in cells.iter().enumerate() {
                if let Some(production) = *cell {
                    if production >= self.productions.len() {
                        return Err(GrammarError::UnknownProduction {
                            row,
                            column,
                            production,
                        });
                    }
                }
            }
        }

        for (production, rhs) in self.productions.iter().enumerate() {
            for symbol in rhs.iter() {
                if let Symbol::Nonterminal(nonterminal) = *symbol {
                    if nonterminal >= self.nonterminals.len() {
                        return Err(GrammarError::UnknownNonterminal {
                            production,
                            nonterminal,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

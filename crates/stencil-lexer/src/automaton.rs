//! Table-driven DFA description consumed by the generic [`Lexer`](crate::Lexer).
//!
//! A grammar instance supplies one static [`Automaton`]: a character
//! classifier, a `state × column` transition table and a per-state action.
//! State `0` is the start state.

use crate::token::Terminal;

/// Marks a missing transition in a transition table.
pub const NO_TRANSITION: i16 = -1;

/// What the lexer does when the automaton reaches a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<K> {
    /// Non-accepting: consume the character and keep scanning.
    Scan,
    /// Emit a token of this kind. The triggering character is not consumed.
    Accept(K),
    /// Step back one character, then emit a token of this kind.
    AcceptWithPushback(K),
}

impl<K> Action<K> {
    pub fn is_accepting(&self) -> bool {
        !matches!(self, Action::Scan)
    }
}

/// Structural problem in an automaton's tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
    #[error("transition table has {transitions} rows but action table has {actions}")]
    StateCountMismatch { transitions: usize, actions: usize },
    #[error("state {state} has {found} columns, expected {expected}")]
    RowWidth {
        state: usize,
        found: usize,
        expected: usize,
    },
    #[error("state {state}, column {column}: target {target} is out of range")]
    TargetOutOfRange {
        state: usize,
        column: usize,
        target: i16,
    },
    #[error("accepting state {state} has outgoing transitions")]
    AcceptingWithTransitions { state: usize },
    #[error("start state accepts on column {column} without consuming input")]
    EmptyAccept { column: usize },
    #[error("automaton has no states")]
    Empty,
}

/// A deterministic finite automaton over classified bytes.
#[derive(Debug)]
pub struct Automaton<K: 'static> {
    /// Number of alphabet columns, end of input included.
    pub columns: usize,
    /// One row per state; `NO_TRANSITION` where no move exists.
    pub transitions: &'static [&'static [i16]],
    pub actions: &'static [Action<K>],
    /// Maps a lookahead byte (`None` at end of input) to its column.
    pub classify: fn(Option<u8>) -> usize,
}

impl<K: Terminal> Automaton<K> {
    pub const START_STATE: usize = 0;

    /// The state reached from `state` on `column`, if any.
    pub fn next_state(&self, state: usize, column: usize) -> Option<usize> {
        let target = *self.transitions.get(state)?.get(column)?;
        usize::try_from(target).ok()
    }

    /// The action attached to `state`. Unknown states scan nothing and accept
    /// nothing, so they are treated as unrecognized input.
    pub fn action(&self, state: usize) -> Action<K> {
        self.actions
            .get(state)
            .copied()
            .unwrap_or(Action::Accept(K::UNRECOGNIZED))
    }

    /// Check the tables for shape errors.
    pub fn validate(&self) -> Result<(), AutomatonError> {
        if self.transitions.is_empty() {
            return Err(AutomatonError::Empty);
        }
        if self.transitions.len() != self.actions.len() {
            return Err(AutomatonError::StateCountMismatch {
                transitions: self.transitions.len(),
                actions: self.actions.len(),
            });
        }

        let states = self.transitions.len();
        for (state, row) in self.transitions.iter().enumerate() {
            if row.len() != self.columns {
                return Err(AutomatonError::RowWidth {
                    state,
                    found: row.len(),
                    expected: self.columns,
                });
            }

            let accepting = self.actions[state].is_accepting();
            for (column, &target) in row.iter().enumerate() {
                if accepting {
                    if target != NO_TRANSITION {
                        return Err(AutomatonError::AcceptingWithTransitions { state });
                    }
                    continue;
                }
                if target != NO_TRANSITION && (target < 0 || target as usize >= states) {
                    return Err(AutomatonError::TargetOutOfRange {
                        state,
                        column,
                        target,
                    });
                }
            }
        }

        // Only the end-of-input column may accept straight from the start.
        let end = (self.classify)(None);
        for (column, &target) in self.transitions[Self::START_STATE].iter().enumerate() {
            if column == end {
                continue;
            }
            let accepting = usize::try_from(target)
                .is_ok_and(|target| self.actions[target].is_accepting());
            if accepting {
                return Err(AutomatonError::EmptyAccept { column });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Digits,
        End,
        Junk,
    }

    impl Terminal for Kind {
        const END_OF_INPUT: Self = Kind::End;
        const UNRECOGNIZED: Self = Kind::Junk;

        fn name(self) -> &'static str {
            match self {
                Kind::Digits => "DIGITS",
                Kind::End => "END",
                Kind::Junk => "JUNK",
            }
        }
    }

    fn classify(byte: Option<u8>) -> usize {
        match byte {
            Some(b'0'..=b'9') => 0,
            Some(_) => 1,
            None => 2,
        }
    }

    static GOOD: Automaton<Kind> = Automaton {
        columns: 3,
        transitions: &[&[1, 2, -1], &[1, 3, 3], &[4, 4, 4], &[-1, -1, -1], &[-1, -1, -1]],
        actions: &[
            Action::Scan,
            Action::Scan,
            Action::Scan,
            Action::Accept(Kind::Digits),
            Action::Accept(Kind::Junk),
        ],
        classify,
    };

    #[test]
    fn test_next_state() {
        assert_eq!(GOOD.next_state(0, 0), Some(1));
        assert_eq!(GOOD.next_state(3, 0), None);
        assert_eq!(GOOD.next_state(99, 0), None);
    }

    #[test]
    fn test_action_lookup() {
        assert_eq!(GOOD.action(0), Action::Scan);
        assert_eq!(GOOD.action(3), Action::Accept(Kind::Digits));
        assert_eq!(GOOD.action(99), Action::Accept(Kind::Junk));
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(GOOD.validate(), Ok(()));
    }

    #[test]
    fn test_validate_row_width() {
        static BAD: Automaton<Kind> = Automaton {
            columns: 3,
            transitions: &[&[0, 0]],
            actions: &[Action::Scan],
            classify,
        };
        assert_eq!(
            BAD.validate(),
            Err(AutomatonError::RowWidth {
                state: 0,
                found: 2,
                expected: 3
            })
        );
    }

    #[test]
    fn test_validate_accepting_with_transitions() {
        static BAD: Automaton<Kind> = Automaton {
            columns: 1,
            transitions: &[&[1], &[0]],
            actions: &[Action::Scan, Action::Accept(Kind::Digits)],
            classify,
        };
        assert_eq!(
            BAD.validate(),
            Err(AutomatonError::AcceptingWithTransitions { state: 1 })
        );
    }

    #[test]
    fn test_validate_target_out_of_range() {
        static BAD: Automaton<Kind> = Automaton {
            columns: 1,
            transitions: &[&[7]],
            actions: &[Action::Scan],
            classify,
        };
        assert_eq!(
            BAD.validate(),
            Err(AutomatonError::TargetOutOfRange {
                state: 0,
                column: 0,
                target: 7
            })
        );
    }

    #[test]
    fn test_validate_empty_accept_from_start() {
        static BAD: Automaton<Kind> = Automaton {
            columns: 3,
            transitions: &[&[1, 2, -1], &[-1, -1, -1], &[-1, -1, -1]],
            actions: &[
                Action::Scan,
                Action::Accept(Kind::Digits),
                Action::Scan,
            ],
            classify,
        };
        assert_eq!(BAD.validate(), Err(AutomatonError::EmptyAccept { column: 0 }));
    }

    #[test]
    fn test_validate_start_may_accept_end_of_input() {
        static EOI: Automaton<Kind> = Automaton {
            columns: 3,
            transitions: &[&[1, 1, 2], &[-1, -1, -1], &[-1, -1, -1]],
            actions: &[Action::Scan, Action::Scan, Action::Accept(Kind::End)],
            classify,
        };
        assert_eq!(EOI.validate(), Ok(()));
    }

    #[test]
    fn test_validate_state_count_mismatch() {
        static BAD: Automaton<Kind> = Automaton {
            columns: 1,
            transitions: &[&[-1]],
            actions: &[],
            classify,
        };
        assert_eq!(
            BAD.validate(),
            Err(AutomatonError::StateCountMismatch {
                transitions: 1,
                actions: 0
            })
        );
    }
}

use std::collections::HashMap;
use std::fmt;

/// Column counts of completed lines, keyed by 1-based line number.
///
/// Only needed so that [`Position::retreat`] can step back over a newline.
pub type LineWidths = HashMap<usize, usize>;

/// A position in source text: byte offset plus 1-based line and column.
///
/// Columns count bytes; sources are expected to use single-byte characters
/// and `\n` line breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// The position of the first byte of any source.
    pub const START: Position = Position {
        offset: 0,
        line: 1,
        column: 1,
    };

    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The position right after `byte`, assuming `byte` sits at `self`.
    pub fn advance(self, byte: u8) -> Self {
        if byte == b'\n' {
            Self::new(self.offset + 1, self.line + 1, 1)
        } else {
            Self::new(self.offset + 1, self.line, self.column + 1)
        }
    }

    /// The position one byte back. Crossing a line boundary restores the
    /// column the newline was found at, as recorded in `widths`.
    pub fn retreat(self, widths: &LineWidths) -> Self {
        if self.offset == 0 {
            return self;
        }

        if self.column == 1 {
            let line = self.line.saturating_sub(1).max(1);
            let column = widths.get(&line).copied().unwrap_or(1);
            Self::new(self.offset - 1, line, column)
        } else {
            Self::new(self.offset - 1, self.line, self.column - 1)
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

/// A token kind belonging to some grammar instance.
///
/// Every instance reserves two kinds: end of input and unrecognized input.
pub trait Terminal: Copy + Eq + fmt::Debug + 'static {
    const END_OF_INPUT: Self;
    const UNRECOGNIZED: Self;

    /// Stable textual name, used in diagnostics.
    fn name(self) -> &'static str;
}

/// A token produced by the lexer. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<K> {
    pub kind: K,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl<K: Terminal> Token<K> {
    pub fn new(kind: K, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    pub fn is_end_of_input(&self) -> bool {
        self.kind == K::END_OF_INPUT
    }

    /// The token text cut to at most `max` characters, without any marker.
    pub fn truncated_text(&self, max: usize) -> String {
        self.text.chars().take(max).collect()
    }
}

impl<K: Terminal> fmt::Display for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}] \"{}\"",
            self.kind.name(),
            self.line,
            self.column,
            self.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Word,
        End,
        Junk,
    }

    impl Terminal for Kind {
        const END_OF_INPUT: Self = Kind::End;
        const UNRECOGNIZED: Self = Kind::Junk;

        fn name(self) -> &'static str {
            match self {
                Kind::Word => "WORD",
                Kind::End => "END",
                Kind::Junk => "JUNK",
            }
        }
    }

    // =========================================================================
    // Position arithmetic
    // =========================================================================

    #[test]
    fn test_advance_same_line() {
        let pos = Position::START.advance(b'a').advance(b'b');
        assert_eq!(pos, Position::new(2, 1, 3));
    }

    #[test]
    fn test_advance_newline() {
        let pos = Position::START.advance(b'a').advance(b'\n');
        assert_eq!(pos, Position::new(2, 2, 1));
    }

    #[test]
    fn test_retreat_same_line() {
        let pos = Position::new(2, 1, 3).retreat(&LineWidths::new());
        assert_eq!(pos, Position::new(1, 1, 2));
    }

    #[test]
    fn test_retreat_across_newline() {
        let mut widths = LineWidths::new();
        widths.insert(1, 4);
        let pos = Position::new(4, 2, 1).retreat(&widths);
        assert_eq!(pos, Position::new(3, 1, 4));
    }

    #[test]
    fn test_retreat_at_start_is_noop() {
        assert_eq!(Position::START.retreat(&LineWidths::new()), Position::START);
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    #[test]
    fn test_display() {
        let token = Token::new(Kind::Word, "hello", 3, 7);
        assert_eq!(token.to_string(), "[WORD, 3, 7] \"hello\"");
    }

    #[test]
    fn test_truncated_text() {
        let token = Token::new(Kind::Junk, "abcdefghijklmnopqrstuvwxyz", 1, 1);
        assert_eq!(token.truncated_text(20), "abcdefghijklmnopqrst");
        assert_eq!(Token::new(Kind::Word, "short", 1, 1).truncated_text(20), "short");
    }

    #[test]
    fn test_end_of_input() {
        assert!(Token::new(Kind::End, "", 1, 1).is_end_of_input());
        assert!(!Token::new(Kind::Word, "x", 1, 1).is_end_of_input());
    }
}

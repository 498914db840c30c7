use crate::automaton::{Action, Automaton};
use crate::token::{LineWidths, Position, Terminal, Token};

/// Generic DFA-driven lexer.
///
/// Produces one token per call to [`Lexer::next_token`], running the
/// supplied [`Automaton`] from its start state each time:
/// - Looks ahead one byte (or end of input) and moves the automaton
/// - Consumes the byte while the reached state only scans
/// - Emits the text scanned so far once an accepting state is reached,
///   leaving the triggering byte for the next token
///
/// The lexer never fails: input the automaton cannot classify comes out as
/// tokens of the `UNRECOGNIZED` kind.
pub struct Lexer<'a, K: Terminal> {
    source: &'a str,
    automaton: &'static Automaton<K>,
    pos: Position,
    token_start: Position,
    line_widths: LineWidths,
}

impl<'a, K: Terminal> Lexer<'a, K> {
    /// Create a new lexer for the given source.
    pub fn new(source: &'a str, automaton: &'static Automaton<K>) -> Self {
        Self {
            source,
            automaton,
            pos: Position::START,
            token_start: Position::START,
            line_widths: LineWidths::new(),
        }
    }

    /// Tokenize the entire source. The last token is always end of input.
    pub fn tokenize(source: &str, automaton: &'static Automaton<K>) -> Vec<Token<K>> {
        let mut lexer = Lexer::new(source, automaton);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = token.is_end_of_input();
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    /// Scan the next token.
    ///
    /// Once the input is exhausted every call returns an end-of-input token
    /// located where the last token ended.
    pub fn next_token(&mut self) -> Token<K> {
        if self.lookahead().is_none() {
            return self.empty_token(K::END_OF_INPUT);
        }

        let mut state = Automaton::<K>::START_STATE;
        loop {
            let byte = self.lookahead();
            let column = (self.automaton.classify)(byte);

            let Some(next) = self.automaton.next_state(state, column) else {
                return self.stuck(byte);
            };

            let action = self.automaton.action(next);
            if self.would_accept_empty(action) {
                return self.stuck(byte);
            }

            match action {
                Action::Scan => match byte {
                    Some(b) => {
                        self.advance(b);
                        state = next;
                    }
                    None => return self.stuck(None),
                },
                Action::Accept(kind) => return self.extract(kind),
                Action::AcceptWithPushback(kind) => {
                    self.retreat();
                    return self.extract(kind);
                }
            }
        }
    }

    /// The automaton has no move, or would accept an empty token: close the
    /// partial token as unrecognized, consuming the offending byte if nothing
    /// was consumed yet.
    fn stuck(&mut self, byte: Option<u8>) -> Token<K> {
        if self.pos == self.token_start {
            match byte {
                Some(b) => self.advance(b),
                None => return self.empty_token(K::END_OF_INPUT),
            }
        }
        self.extract(K::UNRECOGNIZED)
    }

    /// Build a token from the text between the token start and the cursor,
    /// then start the next token at the cursor.
    fn extract(&mut self, kind: K) -> Token<K> {
        let text = self
            .source
            .get(self.token_start.offset..self.pos.offset)
            .map(str::to_owned)
            .unwrap_or_else(|| {
                String::from_utf8_lossy(
                    &self.source.as_bytes()[self.token_start.offset..self.pos.offset],
                )
                .into_owned()
            });

        let token = Token::new(kind, text, self.token_start.line, self.token_start.column);
        log::trace!("lexed {token}");

        self.token_start = self.pos;
        token
    }

    /// Whether `action` would close a token with no text.
    fn would_accept_empty(&self, action: Action<K>) -> bool {
        let consumed = self.pos.offset - self.token_start.offset;
        match action {
            Action::Scan => false,
            Action::Accept(_) => consumed == 0,
            Action::AcceptWithPushback(_) => consumed <= 1,
        }
    }

    fn empty_token(&self, kind: K) -> Token<K> {
        Token::new(kind, "", self.token_start.line, self.token_start.column)
    }

    fn lookahead(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos.offset).copied()
    }

    fn advance(&mut self, byte: u8) {
        if byte == b'\n' {
            self.line_widths.insert(self.pos.line, self.pos.column);
        }
        self.pos = self.pos.advance(byte);
    }

    fn retreat(&mut self) {
        self.pos = self.pos.retreat(&self.line_widths);
    }
}

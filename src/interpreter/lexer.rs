use logos::Logos;

/// Raw tokens recognized by the logos state machine.
///
/// These carry no position information; [`Lexer`] attaches line and column to
/// every token it hands out.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t\r\x0B\x0C]+")]
enum RawToken {
    /// `repeat`, `if`, `def`, `true`, `false` or a plain identifier.
    #[regex(r"[a-zA-Z]+", classify_word)]
    Word(Word),
    /// A digit-led alphanumeric run, either `42` or `100s`.
    #[regex(r"[0-9][a-zA-Z0-9]*", classify_number)]
    Number(Number),
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// Moves the position to the next line. Never reaches the parser.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        lex.extras.line_start = lex.span().end;
    })]
    NewLine,
}

#[derive(Debug, PartialEq, Clone)]
enum Word {
    Repeat,
    If,
    Def,
    Bool(bool),
    Identifier(String),
}

#[derive(Debug, PartialEq, Clone, Copy)]
enum Number {
    Integer(i64),
    Duration(u64),
}

/// Position bookkeeping carried by the logos lexer.
pub struct LexerExtras {
    /// The current line number, starting at 1.
    pub line:       usize,
    /// Byte offset at which the current line starts.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

fn classify_word(lex: &logos::Lexer<RawToken>) -> Word {
    match lex.slice() {
        "repeat" => Word::Repeat,
        "if" => Word::If,
        "def" => Word::Def,
        "true" => Word::Bool(true),
        "false" => Word::Bool(false),
        other => Word::Identifier(other.to_string()),
    }
}

/// Classifies a digit-led run.
///
/// Returns `None`, which logos reports as an error, unless the run is all
/// digits or all digits followed by exactly one `s`.
fn classify_number(lex: &logos::Lexer<RawToken>) -> Option<Number> {
    let slice = lex.slice();
    if let Some(digits) = slice.strip_suffix('s')
       && digits.bytes().all(|b| b.is_ascii_digit())
    {
        return digits.parse().ok().map(Number::Duration);
    }
    if slice.bytes().all(|b| b.is_ascii_digit()) {
        return slice.parse().ok().map(Number::Integer);
    }
    None
}

/// The kind of a token together with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `repeat`
    Repeat,
    /// `if`
    If,
    /// `def`
    Def,
    /// A function or variable name.
    Identifier(String),
    /// An integer literal such as `42`.
    Integer(i64),
    /// A duration literal in seconds such as `100s`.
    Duration(u64),
    /// `true` or `false`.
    Bool(bool),
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// End of input.
    End,
    /// Input that does not form a valid token; holds the offending text.
    Error(String),
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repeat => write!(f, "'repeat'"),
            Self::If => write!(f, "'if'"),
            Self::Def => write!(f, "'def'"),
            Self::Identifier(name) => write!(f, "identifier '{name}'"),
            Self::Integer(n) => write!(f, "integer {n}"),
            Self::Duration(n) => write!(f, "duration {n}s"),
            Self::Bool(b) => write!(f, "'{b}'"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::LBrace => write!(f, "'{{'"),
            Self::RBrace => write!(f, "'}}'"),
            Self::Comma => write!(f, "','"),
            Self::End => write!(f, "end of input"),
            Self::Error(text) => write!(f, "'{text}'"),
        }
    }
}

/// A token with the line and column (both 1-based) where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What was recognized.
    pub kind:   TokenKind,
    /// Source line.
    pub line:   usize,
    /// Source column, counted in bytes.
    pub column: usize,
}

/// A lazily advancing token stream with exactly one token of lookahead.
///
/// # Example
/// ```
/// use autoscript::interpreter::lexer::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("pause(100s)");
/// assert_eq!(lexer.peek().kind, TokenKind::Identifier("pause".into()));
/// lexer.advance();
/// assert_eq!(lexer.peek().kind, TokenKind::LParen);
/// lexer.advance();
/// assert_eq!(lexer.peek().kind, TokenKind::Duration(100));
/// ```
pub struct Lexer<'src> {
    inner:     logos::Lexer<'src, RawToken>,
    lookahead: Token,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned at the first token of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut inner = RawToken::lexer(source);
        let lookahead = Self::next_token(&mut inner);
        Self { inner, lookahead }
    }

    /// Returns the current lookahead token without consuming it.
    #[must_use]
    pub const fn peek(&self) -> &Token {
        &self.lookahead
    }

    /// Discards the lookahead and scans the next token.
    ///
    /// Once the end of input is reached, further calls keep producing
    /// [`TokenKind::End`].
    pub fn advance(&mut self) {
        self.lookahead = Self::next_token(&mut self.inner);
    }

    fn next_token(inner: &mut logos::Lexer<'src, RawToken>) -> Token {
        let mut raw = inner.next();
        while raw == Some(Ok(RawToken::NewLine)) {
            raw = inner.next();
        }

        let line = inner.extras.line;
        let kind = match raw {
            None => {
                let column = inner.source().len() - inner.extras.line_start + 1;
                return Token { kind: TokenKind::End,
                               line,
                               column };
            },
            Some(Ok(RawToken::Word(Word::Repeat))) => TokenKind::Repeat,
            Some(Ok(RawToken::Word(Word::If))) => TokenKind::If,
            Some(Ok(RawToken::Word(Word::Def))) => TokenKind::Def,
            Some(Ok(RawToken::Word(Word::Bool(b)))) => TokenKind::Bool(b),
            Some(Ok(RawToken::Word(Word::Identifier(name)))) => TokenKind::Identifier(name),
            Some(Ok(RawToken::Number(Number::Integer(n)))) => TokenKind::Integer(n),
            Some(Ok(RawToken::Number(Number::Duration(n)))) => TokenKind::Duration(n),
            Some(Ok(RawToken::LParen)) => TokenKind::LParen,
            Some(Ok(RawToken::RParen)) => TokenKind::RParen,
            Some(Ok(RawToken::LBrace)) => TokenKind::LBrace,
            Some(Ok(RawToken::RBrace)) => TokenKind::RBrace,
            Some(Ok(RawToken::Comma)) => TokenKind::Comma,
            Some(Ok(RawToken::NewLine) | Err(())) => TokenKind::Error(inner.slice().to_string()),
        };
        let column = inner.span().start - inner.extras.line_start + 1;

        Token { kind, line, column }
    }
}

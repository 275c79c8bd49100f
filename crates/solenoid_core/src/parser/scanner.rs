//! Lexer (scanner) for the inline-assembly language.
//!
//! See [`Scanner`] for the main entry point.
//!
//! The scanner keeps a one-token cursor: [`Scanner::current`] is always the
//! next unconsumed token and [`Scanner::advance`] moves past it.  The parser
//! drives the cursor directly instead of pulling a token stream, so a single
//! token of lookahead is available at all times.
//!
//! Numeric literals are scanned as a maximal run of alphanumeric characters
//! and are **not** validated here; the parser decides whether `0x1g` is an
//! acceptable number.  Malformed input (bad escape sequences, unterminated
//! strings or comments, stray characters) surfaces as [`TokenKind::Illegal`]
//! tokens that the parser rejects with its own diagnostics, which keeps the
//! token interface itself infallible.

// ─────────────────────────────────────────────────────────────────────────────
// Position / Span
// ─────────────────────────────────────────────────────────────────────────────

/// A byte offset + line/column location in source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Byte offset from the beginning of the source string.
    pub offset: usize,
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number, measured in Unicode scalar values.
    pub column: u32,
}

/// A half-open `[start, end)` source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Inclusive start of the span.
    pub start: Position,
    /// Exclusive end of the span.
    pub end: Position,
}

impl Span {
    /// Returns `true` when `other` lies entirely within this span.
    pub fn contains(&self, other: Span) -> bool {
        self.start.offset <= other.start.offset && other.end.offset <= self.end.offset
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────────────

/// The syntactic category of an assembly lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // ── Punctuators ───────────────────────────────────────────────────────
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `:=`
    AssemblyAssign,
    /// `-` (the return-list arrow `->` is scanned as `-` then `>`)
    Sub,
    /// `>`
    GreaterThan,

    // ── Keywords ──────────────────────────────────────────────────────────
    /// `let`
    Let,
    /// `function`
    Function,
    /// `if`
    If,
    /// `switch`
    Switch,
    /// `case`
    Case,
    /// `default`
    Default,
    /// `for`
    For,
    /// `break`
    Break,
    /// `continue`
    Continue,

    // ── Soft-reserved words ───────────────────────────────────────────────
    // Reserved by the surrounding contract language but valid as assembly
    // identifiers; the parser treats them as identifier-class tokens.
    /// `return`
    Return,
    /// `byte`
    Byte,
    /// `bool`
    Bool,
    /// `address`
    Address,

    // ── Identifiers and literals ──────────────────────────────────────────
    /// An identifier that is not a reserved word.
    Identifier,
    /// String literal enclosed in `"`.
    StringLiteral,
    /// Numeric literal (validity is decided by the parser).
    Number,
    /// `true`
    TrueLiteral,
    /// `false`
    FalseLiteral,

    // ── Other ─────────────────────────────────────────────────────────────
    /// A malformed token (stray character, bad escape, unterminated string
    /// or comment).
    Illegal,
    /// End of source.
    Eos,
}

impl TokenKind {
    /// Stable display name used in `Expected token …` diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::AssemblyAssign => ":=",
            TokenKind::Sub => "-",
            TokenKind::GreaterThan => ">",
            TokenKind::Let => "let",
            TokenKind::Function => "function",
            TokenKind::If => "if",
            TokenKind::Switch => "switch",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            TokenKind::For => "for",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Return => "return",
            TokenKind::Byte => "byte",
            TokenKind::Bool => "bool",
            TokenKind::Address => "address",
            TokenKind::Identifier => "identifier",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Number => "number",
            TokenKind::TrueLiteral => "true",
            TokenKind::FalseLiteral => "false",
            TokenKind::Illegal => "illegal token",
            TokenKind::Eos => "end of source",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────────────

/// A single lexical token produced by the [`Scanner`].
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The syntactic category.
    pub kind: TokenKind,
    /// The token text: the raw word for identifiers, keywords, and numbers;
    /// the decoded content for string literals; empty for punctuators and
    /// end of source.
    pub lexeme: String,
    /// Source location of this token.
    pub span: Span,
}

// ─────────────────────────────────────────────────────────────────────────────
// Character-classification helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Returns `true` for characters that may *start* an assembly identifier.
fn is_identifier_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_ascii_alphabetic()
}

/// Returns `true` for characters that may *continue* an assembly identifier.
/// `period_allowed` reflects the scanner's period-in-identifier mode.
fn is_identifier_continue(c: char, period_allowed: bool) -> bool {
    c == '_' || c == '$' || c.is_ascii_alphanumeric() || (period_allowed && c == '.')
}

/// Map a scanned word to a keyword [`TokenKind`], or return `None` for plain
/// identifiers.  A word containing `.` never matches a keyword.
fn keyword_kind(s: &str) -> Option<TokenKind> {
    match s {
        "let" => Some(TokenKind::Let),
        "function" => Some(TokenKind::Function),
        "if" => Some(TokenKind::If),
        "switch" => Some(TokenKind::Switch),
        "case" => Some(TokenKind::Case),
        "default" => Some(TokenKind::Default),
        "for" => Some(TokenKind::For),
        "break" => Some(TokenKind::Break),
        "continue" => Some(TokenKind::Continue),
        "return" => Some(TokenKind::Return),
        "byte" => Some(TokenKind::Byte),
        "bool" => Some(TokenKind::Bool),
        "address" => Some(TokenKind::Address),
        "true" => Some(TokenKind::TrueLiteral),
        "false" => Some(TokenKind::FalseLiteral),
        _ => None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scanner
// ─────────────────────────────────────────────────────────────────────────────

/// Assembly-language lexer with a one-token cursor.
///
/// # Example
///
/// ```
/// use solenoid_core::parser::scanner::{Scanner, TokenKind};
///
/// let mut sc = Scanner::new("let x := 1");
/// assert_eq!(sc.current_token(), TokenKind::Let);
/// sc.advance();
/// assert_eq!(sc.current_literal(), "x");
/// ```
pub struct Scanner<'src> {
    /// The complete source string.
    source: &'src str,
    /// Current byte position within `source`.
    pos: usize,
    /// Current 1-based line number.
    line: u32,
    /// Current 1-based column number.
    column: u32,
    /// When set, `.` is accepted inside identifiers.  The parser switches
    /// this on for the duration of a parse (dotted names address object
    /// sub-resources in the surrounding contract language).
    period_in_identifier: bool,
    /// The token under the cursor.
    current: Token,
    /// End position of the most recently consumed token.  Used by the parser
    /// to close a node's location precisely.
    previous_end: Position,
}

impl<'src> Scanner<'src> {
    /// Create a new scanner for the given UTF-8 source string and scan the
    /// first token.
    pub fn new(source: &'src str) -> Self {
        let mut scanner = Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
            period_in_identifier: false,
            current: Token {
                kind: TokenKind::Eos,
                lexeme: String::new(),
                span: Span::default(),
            },
            previous_end: Position {
                offset: 0,
                line: 1,
                column: 1,
            },
        };
        scanner.current = scanner.scan_token();
        scanner
    }

    // ── Token interface ─────────────────────────────────────────────────────

    /// The token under the cursor (non-consuming).
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Kind of the token under the cursor (non-consuming).
    pub fn current_token(&self) -> TokenKind {
        self.current.kind
    }

    /// Lexeme of the token under the cursor.
    pub fn current_literal(&self) -> &str {
        &self.current.lexeme
    }

    /// Source span of the token under the cursor.
    pub fn location(&self) -> Span {
        self.current.span
    }

    /// End position of the most recently consumed token.
    pub fn end_position(&self) -> Position {
        self.previous_end
    }

    /// Consume the token under the cursor.  At end of source the cursor
    /// stays on [`TokenKind::Eos`].
    pub fn advance(&mut self) {
        self.previous_end = self.current.span.end;
        if self.current.kind != TokenKind::Eos {
            self.current = self.scan_token();
        }
    }

    /// Toggle acceptance of `.` inside identifiers.  Affects tokens scanned
    /// after the call; the token already under the cursor is unchanged.
    pub fn set_period_in_identifier(&mut self, on: bool) {
        self.period_in_identifier = on;
    }

    /// Tokenize an entire source string, including the final
    /// [`TokenKind::Eos`] token.  Convenience for tests and tools.
    pub fn tokenize_all(source: &'src str) -> Vec<Token> {
        let mut scanner = Scanner::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = scanner.current().clone();
            let done = token.kind == TokenKind::Eos;
            tokens.push(token);
            if done {
                break;
            }
            scanner.advance();
        }
        tokens
    }

    // ── Low-level character helpers ─────────────────────────────────────────

    fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// Advance past the current character and update line/column tracking.
    ///
    /// `\r\n` is treated as a single line terminator; the `\n` is consumed
    /// automatically so callers never see a stray `\r`.
    fn bump(&mut self) -> char {
        let ch = self.source[self.pos..]
            .chars()
            .next()
            .expect("bump called past end of input");
        self.pos += ch.len_utf8();
        match ch {
            '\r' => {
                if self.source[self.pos..].starts_with('\n') {
                    self.pos += 1;
                }
                self.line += 1;
                self.column = 1;
            }
            '\n' => {
                self.line += 1;
                self.column = 1;
            }
            _ => {
                self.column += 1;
            }
        }
        ch
    }

    fn current_pos(&self) -> Position {
        Position {
            offset: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_whitespace()) {
            self.bump();
        }
    }

    fn make_token(&self, kind: TokenKind, lexeme: String, start: Position) -> Token {
        Token {
            kind,
            lexeme,
            span: Span {
                start,
                end: self.current_pos(),
            },
        }
    }

    fn punctuator(&self, kind: TokenKind, start: Position) -> Token {
        self.make_token(kind, String::new(), start)
    }

    // ── Main scan loop ──────────────────────────────────────────────────────

    /// Scan the next token, skipping whitespace and comments.
    fn scan_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            if self.is_eof() {
                let here = self.current_pos();
                return Token {
                    kind: TokenKind::Eos,
                    lexeme: String::new(),
                    span: Span {
                        start: here,
                        end: here,
                    },
                };
            }

            let start = self.current_pos();
            let c = self.bump();

            match c {
                '/' => match self.peek() {
                    Some('/') => {
                        while matches!(self.peek(), Some(ch) if ch != '\n' && ch != '\r') {
                            self.bump();
                        }
                        continue;
                    }
                    Some('*') => {
                        self.bump();
                        match self.skip_block_comment() {
                            Ok(()) => continue,
                            Err(()) => {
                                let raw = self.source[start.offset..self.pos].to_string();
                                return self.make_token(TokenKind::Illegal, raw, start);
                            }
                        }
                    }
                    _ => return self.punctuator(TokenKind::Illegal, start),
                },
                '{' => return self.punctuator(TokenKind::LBrace, start),
                '}' => return self.punctuator(TokenKind::RBrace, start),
                '(' => return self.punctuator(TokenKind::LParen, start),
                ')' => return self.punctuator(TokenKind::RParen, start),
                ',' => return self.punctuator(TokenKind::Comma, start),
                '-' => return self.punctuator(TokenKind::Sub, start),
                '>' => return self.punctuator(TokenKind::GreaterThan, start),
                ':' => {
                    if self.peek() == Some('=') {
                        self.bump();
                        return self.punctuator(TokenKind::AssemblyAssign, start);
                    }
                    return self.punctuator(TokenKind::Colon, start);
                }
                '"' => return self.scan_string(start),
                c if c.is_ascii_digit() => return self.scan_number(start),
                c if is_identifier_start(c) => return self.scan_identifier(start),
                _ => {
                    let raw = self.source[start.offset..self.pos].to_string();
                    return self.make_token(TokenKind::Illegal, raw, start);
                }
            }
        }
    }

    /// Skip the body of a `/* … */` comment; the opening delimiter has been
    /// consumed.  `Err` means the comment ran off the end of the source.
    fn skip_block_comment(&mut self) -> Result<(), ()> {
        loop {
            match self.peek() {
                None => return Err(()),
                Some('*') => {
                    self.bump();
                    if self.peek() == Some('/') {
                        self.bump();
                        return Ok(());
                    }
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    // ── String literal ──────────────────────────────────────────────────────

    /// Scan a string literal; the opening `"` has been consumed.  The token
    /// lexeme is the decoded content.  Unterminated strings and bad escapes
    /// yield [`TokenKind::Illegal`].
    fn scan_string(&mut self, start: Position) -> Token {
        let mut content = String::new();
        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => {
                    let raw = self.source[start.offset..self.pos].to_string();
                    return self.make_token(TokenKind::Illegal, raw, start);
                }
                Some('"') => {
                    self.bump();
                    return self.make_token(TokenKind::StringLiteral, content, start);
                }
                Some('\\') => {
                    self.bump();
                    match self.scan_escape_sequence() {
                        Some(decoded) => content.push(decoded),
                        None => {
                            let raw = self.source[start.offset..self.pos].to_string();
                            return self.make_token(TokenKind::Illegal, raw, start);
                        }
                    }
                }
                Some(_) => {
                    content.push(self.bump());
                }
            }
        }
    }

    /// Decode one escape sequence after the leading `\`.
    fn scan_escape_sequence(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.bump();
        match c {
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            '0' => Some('\0'),
            '\\' => Some('\\'),
            '\'' => Some('\''),
            '"' => Some('"'),
            'x' => {
                let mut value: u32 = 0;
                for _ in 0..2 {
                    let digit = self.peek()?.to_digit(16)?;
                    self.bump();
                    value = value * 16 + digit;
                }
                char::from_u32(value)
            }
            _ => None,
        }
    }

    // ── Numeric literal ─────────────────────────────────────────────────────

    /// Scan a numeric literal as the maximal run of alphanumerics (plus `.`
    /// and `_`) after the already-consumed first digit.  Validity — base
    /// prefix, digit set, 256-bit range — is the parser's concern, so that
    /// a malformed number like `0x1g` is reported as one bad literal rather
    /// than two tokens.
    fn scan_number(&mut self, start: Position) -> Token {
        while matches!(
            self.peek(),
            Some(c) if c.is_ascii_alphanumeric() || c == '.' || c == '_'
        ) {
            self.bump();
        }
        let raw = self.source[start.offset..self.pos].to_string();
        self.make_token(TokenKind::Number, raw, start)
    }

    // ── Identifier / keyword ────────────────────────────────────────────────

    /// Scan an identifier or keyword; the first character has been consumed.
    fn scan_identifier(&mut self, start: Position) -> Token {
        while matches!(
            self.peek(),
            Some(c) if is_identifier_continue(c, self.period_in_identifier)
        ) {
            self.bump();
        }
        let word = self.source[start.offset..self.pos].to_string();
        let kind = keyword_kind(&word).unwrap_or(TokenKind::Identifier);
        self.make_token(kind, word, start)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

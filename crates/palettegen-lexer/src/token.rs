/// A position in source text, tracking line and column for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// Token classification for CSS source.
///
/// The scanner is structural: it only separates what the parser needs to find
/// rule boundaries. Everything else is a `Word` carrying its raw text, so the
/// parser can rebuild selectors and values exactly as written.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Spaces, tabs and newlines, kept verbatim.
    Whitespace(String),

    /// Identifiers, numbers, dimensions, hashes, custom property names.
    Word(String),

    /// `@media`, `@import`, ... (name without the `@`).
    AtKeyword(String),

    /// A quoted string, raw text including its quotes.
    String(String),

    /// Inner text of a `/* ... */` comment.
    Comment(String),

    // Punctuation
    Colon,
    Semicolon,
    Comma,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,

    /// Any other single character (`>`, `+`, `*`, `!`, `.`, ...).
    Delim(char),

    // End of input
    Eof,
}

impl TokenKind {
    /// The source text this token was scanned from.
    ///
    /// Comments are re-wrapped in `/* */`.
    pub fn text(&self) -> String {
        match self {
            TokenKind::Whitespace(s) | TokenKind::Word(s) | TokenKind::String(s) => s.clone(),
            TokenKind::AtKeyword(name) => format!("@{name}"),
            TokenKind::Comment(text) => format!("/*{text}*/"),
            TokenKind::Colon => ":".into(),
            TokenKind::Semicolon => ";".into(),
            TokenKind::Comma => ",".into(),
            TokenKind::LBrace => "{".into(),
            TokenKind::RBrace => "}".into(),
            TokenKind::LParen => "(".into(),
            TokenKind::RParen => ")".into(),
            TokenKind::LBracket => "[".into(),
            TokenKind::RBracket => "]".into(),
            TokenKind::Delim(c) => c.to_string(),
            TokenKind::Eof => String::new(),
        }
    }
}

/// A token produced by the CSS lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Characters that end a `Word` token.
pub const WORD_BREAKS: &[char] = &[
    ':', ';', ',', '{', '}', '(', ')', '[', ']', '"', '\'', '@', '>', '+', '~', '*', '!', '=',
];

/// Check if a character terminates a word.
pub fn is_word_break(c: char) -> bool {
    c.is_whitespace() || WORD_BREAKS.contains(&c)
}

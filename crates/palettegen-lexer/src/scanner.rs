use crate::token::{is_word_break, Span, Token, TokenKind};
use crate::LexerError;

/// CSS source scanner.
///
/// Tokenizes a stylesheet into a stream of tokens whose texts concatenate back
/// to the original source. Tracks line and column on every token.
///
/// Same layout as a classic hand-written scanner:
/// - `Vec<char>` source for index-based navigation
/// - Position tracking on every token
/// - One `scan_*` method per multi-character token
pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Scanner {
    /// Create a new scanner for the given source.
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source into a vector of tokens.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexerError> {
        let mut scanner = Scanner::new(source);
        scanner.scan_tokens()?;
        Ok(scanner.tokens)
    }

    /// Scan all tokens from the source.
    fn scan_tokens(&mut self) -> Result<(), LexerError> {
        while !self.is_at_end() {
            self.scan_token()?;
        }

        self.emit(TokenKind::Eof);
        Ok(())
    }

    /// Scan the next token.
    fn scan_token(&mut self) -> Result<(), LexerError> {
        let ch = self.peek();

        match ch {
            c if c.is_whitespace() => {
                self.scan_whitespace();
                Ok(())
            }

            // Comments
            '/' if self.peek_next() == '*' => self.scan_comment(),

            // Strings
            '"' | '\'' => self.scan_string(),

            '@' => {
                self.scan_at_keyword();
                Ok(())
            }

            // Punctuation
            ':' => self.single(TokenKind::Colon),
            ';' => self.single(TokenKind::Semicolon),
            ',' => self.single(TokenKind::Comma),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),

            c if is_word_break(c) => self.single(TokenKind::Delim(c)),

            _ => {
                self.scan_word();
                Ok(())
            }
        }
    }

    // --- Scanners ---

    fn scan_whitespace(&mut self) {
        let (start_pos, start_line, start_col) = (self.pos, self.line, self.column);

        let mut text = String::new();
        while !self.is_at_end() && self.peek().is_whitespace() {
            text.push(self.peek());
            self.advance();
        }

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::Whitespace(text), span));
    }

    /// Scan a `/* ... */` comment. Comments do not nest.
    fn scan_comment(&mut self) -> Result<(), LexerError> {
        let (start_pos, start_line, start_col) = (self.pos, self.line, self.column);

        // Skip `/*`
        self.advance();
        self.advance();

        let mut content = String::new();
        loop {
            if self.is_at_end() {
                return Err(LexerError {
                    message: "Unterminated comment".into(),
                    line: start_line,
                    column: start_col,
                });
            }
            if self.peek() == '*' && self.peek_next() == '/' {
                self.advance();
                self.advance();
                break;
            }
            content.push(self.peek());
            self.advance();
        }

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::Comment(content), span));
        Ok(())
    }

    /// Scan a quoted string. The token keeps the quotes and escapes untouched.
    fn scan_string(&mut self) -> Result<(), LexerError> {
        let quote = self.peek();
        let (start_pos, start_line, start_col) = (self.pos, self.line, self.column);

        let mut raw = String::new();
        raw.push(quote);
        self.advance(); // consume opening quote

        while !self.is_at_end() && self.peek() != quote {
            match self.peek() {
                '\\' => {
                    raw.push('\\');
                    self.advance();
                    if self.is_at_end() {
                        return Err(self.error("Unterminated escape sequence".into()));
                    }
                    raw.push(self.peek());
                    self.advance();
                }
                // An unescaped newline ends a CSS string (bad-string)
                '\n' => {
                    return Err(LexerError {
                        message: "Unterminated string".into(),
                        line: start_line,
                        column: start_col,
                    });
                }
                c => {
                    raw.push(c);
                    self.advance();
                }
            }
        }

        if self.is_at_end() {
            return Err(LexerError {
                message: "Unterminated string".into(),
                line: start_line,
                column: start_col,
            });
        }

        raw.push(quote);
        self.advance(); // consume closing quote

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::String(raw), span));
        Ok(())
    }

    /// Scan `@name`. A bare `@` becomes a delimiter.
    fn scan_at_keyword(&mut self) {
        let (start_pos, start_line, start_col) = (self.pos, self.line, self.column);
        self.advance(); // consume @

        let name = self.read_word();
        let kind = if name.is_empty() {
            TokenKind::Delim('@')
        } else {
            TokenKind::AtKeyword(name)
        };

        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(kind, span));
    }

    /// Scan a run of non-structural characters.
    fn scan_word(&mut self) {
        let (start_pos, start_line, start_col) = (self.pos, self.line, self.column);
        let word = self.read_word();
        let span = Span::new(start_pos, self.pos, start_line, start_col);
        self.tokens.push(Token::new(TokenKind::Word(word), span));
    }

    /// Read word characters. A backslash escapes the next character, so
    /// selectors like `.md\:flex` stay in one word.
    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while !self.is_at_end() {
            let c = self.peek();
            if c == '\\' {
                word.push(c);
                self.advance();
                if !self.is_at_end() {
                    word.push(self.peek());
                    self.advance();
                }
                continue;
            }
            if is_word_break(c) || (c == '/' && self.peek_next() == '*') {
                break;
            }
            word.push(c);
            self.advance();
        }
        word
    }

    // --- Helpers ---

    fn single(&mut self, kind: TokenKind) -> Result<(), LexerError> {
        let span = Span::new(self.pos, self.pos + 1, self.line, self.column);
        self.advance();
        self.tokens.push(Token::new(kind, span));
        Ok(())
    }

    fn emit(&mut self, kind: TokenKind) {
        let span = Span::new(self.pos, self.pos, self.line, self.column);
        self.tokens.push(Token::new(kind, span));
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.pos]
        }
    }

    fn peek_next(&self) -> char {
        if self.pos + 1 >= self.chars.len() {
            '\0'
        } else {
            self.chars[self.pos + 1]
        }
    }

    fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }
        if self.chars[self.pos] == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += 1;
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn error(&self, message: String) -> LexerError {
        LexerError {
            message,
            line: self.line,
            column: self.column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: tokenize and return token kinds (ignoring spans).
    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    /// Helper: tokenize and panic on error.
    fn tokens(source: &str) -> Vec<Token> {
        Scanner::tokenize(source).unwrap()
    }

    fn word(s: &str) -> TokenKind {
        TokenKind::Word(s.into())
    }

    fn ws(s: &str) -> TokenKind {
        TokenKind::Whitespace(s.into())
    }

    // =========================================================================
    // Structure: empty, whitespace, EOF
    // =========================================================================

    #[test]
    fn test_empty_source() {
        let toks = tokens("");
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, TokenKind::Eof);
    }

    #[test]
    fn test_whitespace_is_one_token() {
        assert_eq!(kinds(" \n\t "), vec![ws(" \n\t "), TokenKind::Eof]);
    }

    // =========================================================================
    // Rules and declarations
    // =========================================================================

    #[test]
    fn test_palette_selector() {
        assert_eq!(
            kinds(":root, .nested-palette {"),
            vec![
                TokenKind::Colon,
                word("root"),
                TokenKind::Comma,
                ws(" "),
                word(".nested-palette"),
                ws(" "),
                TokenKind::LBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_custom_property_declaration() {
        assert_eq!(
            kinds("--primary-hue: 250;"),
            vec![
                word("--primary-hue"),
                TokenKind::Colon,
                ws(" "),
                word("250"),
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_function_value() {
        assert_eq!(
            kinds("var(--x)"),
            vec![
                word("var"),
                TokenKind::LParen,
                word("--x"),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_important_is_delim_then_word() {
        assert_eq!(
            kinds("!important"),
            vec![TokenKind::Delim('!'), word("important"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_escaped_selector_stays_one_word() {
        assert_eq!(kinds(".md\\:flex"), vec![word(".md\\:flex"), TokenKind::Eof]);
    }

    #[test]
    fn test_combinators_are_delims() {
        assert_eq!(
            kinds("a>b"),
            vec![word("a"), TokenKind::Delim('>'), word("b"), TokenKind::Eof]
        );
    }

    // =========================================================================
    // At-keywords
    // =========================================================================

    #[test]
    fn test_at_keyword() {
        assert_eq!(
            kinds("@media screen"),
            vec![
                TokenKind::AtKeyword("media".into()),
                ws(" "),
                word("screen"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_bare_at_is_delim() {
        assert_eq!(kinds("@ "), vec![TokenKind::Delim('@'), ws(" "), TokenKind::Eof]);
    }

    // =========================================================================
    // Strings and comments
    // =========================================================================

    #[test]
    fn test_string_keeps_quotes() {
        assert_eq!(
            kinds("\"a;b\""),
            vec![TokenKind::String("\"a;b\"".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_string_with_escaped_quote() {
        assert_eq!(
            kinds("'it\\'s'"),
            vec![TokenKind::String("'it\\'s'".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let err = Scanner::tokenize("a { content: \"oops }").unwrap_err();
        assert_eq!(err.message, "Unterminated string");
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 14);
    }

    #[test]
    fn test_newline_in_string_is_error() {
        assert!(Scanner::tokenize("\"a\nb\"").is_err());
    }

    #[test]
    fn test_comment() {
        assert_eq!(
            kinds("/* hue { } */"),
            vec![TokenKind::Comment(" hue { } ".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_comment_ends_word() {
        assert_eq!(
            kinds("a/* x */"),
            vec![word("a"), TokenKind::Comment(" x ".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_comment() {
        let err = Scanner::tokenize("\n  /* never closed").unwrap_err();
        assert_eq!(err.message, "Unterminated comment");
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 3);
    }

    // =========================================================================
    // Positions and round-trip text
    // =========================================================================

    #[test]
    fn test_line_and_column_tracking() {
        let toks = tokens("a {\n  b: c;\n}");
        let b = toks.iter().find(|t| t.kind == word("b")).unwrap();
        assert_eq!(b.span.line, 2);
        assert_eq!(b.span.column, 3);
        let close = toks.iter().find(|t| t.kind == TokenKind::RBrace).unwrap();
        assert_eq!(close.span.line, 3);
        assert_eq!(close.span.column, 1);
    }

    #[test]
    fn test_token_texts_rebuild_source() {
        let source = "@import \"x.css\";\n/* c */\n:root { --a: calc(1 * var(--b)) !important; }\n";
        let rebuilt: String = tokens(source).iter().map(|t| t.kind.text()).collect();
        assert_eq!(rebuilt, source);
    }
}

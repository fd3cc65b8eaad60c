//! Stylesheet parser.
//!
//! Parses the token stream from `palettegen-lexer` into a `Stylesheet` AST.
//! Structural only: a statement is everything up to `{`, `;` or `}` at
//! bracket depth zero; the terminator decides whether it is a rule or a
//! declaration.
//!
//! Uses recursive descent for nested blocks.

use crate::ast::{AtRule, Comment, Declaration, Node, Position, Rule, Stylesheet};
use crate::ParseError;
use palettegen_lexer::{Span, Token, TokenKind};

/// How a statement prelude ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    /// `{` (not consumed)
    Block,
    /// `;` (not consumed)
    Semicolon,
    /// `}` or end of input (not consumed)
    End,
}

/// Stylesheet parser.
///
/// Converts a flat token stream into a tree of rules, at-rules,
/// declarations and comments.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse source code into a stylesheet.
    pub fn parse(source: &str) -> Result<Stylesheet, ParseError> {
        let tokens = palettegen_lexer::Scanner::tokenize(source).map_err(|e| ParseError {
            message: e.message,
            line: e.line,
            column: e.column,
        })?;

        let mut parser = Parser::new(tokens);
        let sheet = parser.parse_stylesheet()?;
        log::debug!("parsed stylesheet with {} top-level nodes", sheet.nodes.len());
        Ok(sheet)
    }

    fn parse_stylesheet(&mut self) -> Result<Stylesheet, ParseError> {
        let nodes = self.parse_nodes(None)?;
        Ok(Stylesheet { nodes })
    }

    // =========================================================================
    // Node lists
    // =========================================================================

    /// Parse nodes until the end of input (top level) or the `}` closing the
    /// block opened at `open`.
    fn parse_nodes(&mut self, open: Option<Span>) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();

        loop {
            self.skip_whitespace();

            match &self.peek().kind {
                TokenKind::Eof => {
                    if let Some(span) = open {
                        return Err(Self::error_at(&span, "Unclosed block".into()));
                    }
                    break;
                }
                TokenKind::RBrace => {
                    if open.is_none() {
                        return Err(self.error("Unexpected '}'".into()));
                    }
                    self.advance(); // consume }
                    break;
                }
                TokenKind::Semicolon => {
                    // Stray `;` between statements
                    self.advance();
                }
                TokenKind::Comment(text) => {
                    let text = text.clone();
                    let source = Some(self.position());
                    self.advance();
                    nodes.push(Node::Comment(Comment { text, source }));
                }
                TokenKind::AtKeyword(_) => {
                    nodes.push(self.parse_at_rule()?);
                }
                _ => {
                    nodes.push(self.parse_statement()?);
                }
            }
        }

        Ok(nodes)
    }

    /// Parse the children of a block whose `{` is the current token.
    fn parse_block(&mut self) -> Result<Vec<Node>, ParseError> {
        let open = self.peek().span;
        self.advance(); // consume {
        self.parse_nodes(Some(open))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Parse a rule or a declaration.
    fn parse_statement(&mut self) -> Result<Node, ParseError> {
        let start = self.peek().span;
        let source = Some(self.position());
        let (prelude, terminator) = self.collect_prelude()?;

        match terminator {
            Terminator::Block => {
                let selector = join_text(&prelude);
                if selector.is_empty() {
                    return Err(Self::error_at(&start, "Rule without selector".into()));
                }
                let nodes = self.parse_block()?;
                Ok(Node::Rule(Rule {
                    selector,
                    nodes,
                    source,
                }))
            }
            Terminator::Semicolon | Terminator::End => {
                if terminator == Terminator::Semicolon {
                    self.advance(); // consume ;
                }
                let mut decl = parse_declaration(&prelude, &start)?;
                decl.source = source;
                Ok(Node::Declaration(decl))
            }
        }
    }

    /// Parse `@name params;` or `@name params { ... }`.
    fn parse_at_rule(&mut self) -> Result<Node, ParseError> {
        let source = Some(self.position());
        let name = match &self.peek().kind {
            TokenKind::AtKeyword(name) => name.clone(),
            _ => return Err(self.error("Expected at-rule".into())),
        };
        self.advance(); // consume @name

        let (prelude, terminator) = self.collect_prelude()?;
        let params = join_text(&prelude);

        let nodes = match terminator {
            Terminator::Block => Some(self.parse_block()?),
            Terminator::Semicolon => {
                self.advance(); // consume ;
                None
            }
            Terminator::End => None,
        };

        Ok(Node::AtRule(AtRule {
            name,
            params,
            nodes,
            source,
        }))
    }

    /// Collect tokens up to the next `{`, `;` or `}` outside brackets.
    /// The terminator itself is left unconsumed.
    fn collect_prelude(&mut self) -> Result<(Vec<Token>, Terminator), ParseError> {
        let mut prelude = Vec::new();
        let mut depth_stack: Vec<(TokenKind, Span)> = Vec::new();

        loop {
            let token = self.peek().clone();

            if depth_stack.is_empty() {
                match token.kind {
                    TokenKind::LBrace => return Ok((prelude, Terminator::Block)),
                    TokenKind::Semicolon => return Ok((prelude, Terminator::Semicolon)),
                    TokenKind::RBrace | TokenKind::Eof => return Ok((prelude, Terminator::End)),
                    _ => {}
                }
            }

            match &token.kind {
                TokenKind::LParen => depth_stack.push((TokenKind::RParen, token.span)),
                TokenKind::LBracket => depth_stack.push((TokenKind::RBracket, token.span)),
                TokenKind::RParen | TokenKind::RBracket => match depth_stack.pop() {
                    Some((expected, _)) if expected == token.kind => {}
                    _ => {
                        return Err(Self::error_at(
                            &token.span,
                            format!("Unexpected '{}'", token.kind.text()),
                        ))
                    }
                },
                TokenKind::Eof => {
                    let open = depth_stack.last().map_or(token.span, |(_, span)| *span);
                    return Err(Self::error_at(&open, "Unclosed bracket".into()));
                }
                _ => {}
            }

            prelude.push(token);
            self.advance();
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn skip_whitespace(&mut self) {
        while matches!(self.peek().kind, TokenKind::Whitespace(_)) {
            self.advance();
        }
    }

    fn peek(&self) -> &Token {
        // The scanner always ends the stream with Eof.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn position(&self) -> Position {
        let span = self.peek().span;
        Position::new(span.line, span.column)
    }

    fn error(&self, message: String) -> ParseError {
        Self::error_at(&self.peek().span, message)
    }

    fn error_at(span: &Span, message: String) -> ParseError {
        ParseError {
            message,
            line: span.line,
            column: span.column,
        }
    }
}

/// Build a declaration from the tokens of a statement that did not open a block.
fn parse_declaration(tokens: &[Token], start: &Span) -> Result<Declaration, ParseError> {
    let Some(colon) = tokens.iter().position(|t| t.kind == TokenKind::Colon) else {
        let word = join_text(tokens);
        return Err(Parser::error_at(start, format!("Unknown word '{word}'")));
    };

    let prop = join_text(&tokens[..colon]);
    if prop.is_empty() {
        return Err(Parser::error_at(start, "Missing property name".into()));
    }

    let mut value_tokens = &tokens[colon + 1..];
    let important = match important_suffix(value_tokens) {
        Some(cut) => {
            value_tokens = &value_tokens[..cut];
            true
        }
        None => false,
    };

    Ok(Declaration {
        prop,
        value: join_text(value_tokens),
        important,
        source: None,
    })
}

/// If the value ends in `!important`, return the index where the flag starts.
fn important_suffix(tokens: &[Token]) -> Option<usize> {
    let mut idx = tokens.len();
    let skip_ws = |idx: &mut usize| {
        while *idx > 0 && matches!(tokens[*idx - 1].kind, TokenKind::Whitespace(_)) {
            *idx -= 1;
        }
    };

    skip_ws(&mut idx);
    match tokens.get(idx.checked_sub(1)?) {
        Some(Token {
            kind: TokenKind::Word(w),
            ..
        }) if w.eq_ignore_ascii_case("important") => idx -= 1,
        _ => return None,
    }
    skip_ws(&mut idx);
    match tokens.get(idx.checked_sub(1)?) {
        Some(Token {
            kind: TokenKind::Delim('!'),
            ..
        }) => Some(idx - 1),
        _ => None,
    }
}

/// Concatenate token texts and trim the result.
fn join_text(tokens: &[Token]) -> String {
    let text: String = tokens.iter().map(|t| t.kind.text()).collect();
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Stylesheet {
        Parser::parse(source).unwrap()
    }

    fn first_rule(sheet: &Stylesheet) -> &Rule {
        match &sheet.nodes[0] {
            Node::Rule(rule) => rule,
            other => panic!("Expected rule, got {other:?}"),
        }
    }

    fn decl(node: &Node) -> &Declaration {
        match node {
            Node::Declaration(d) => d,
            other => panic!("Expected declaration, got {other:?}"),
        }
    }

    // =========================================================================
    // Empty input
    // =========================================================================

    #[test]
    fn test_empty_stylesheet() {
        assert_eq!(parse(""), Stylesheet { nodes: vec![] });
        assert_eq!(parse("  \n\n ").nodes.len(), 0);
    }

    // =========================================================================
    // Rules
    // =========================================================================

    #[test]
    fn test_simple_rule() {
        let sheet = parse(".btn { color: red; }");
        let rule = first_rule(&sheet);
        assert_eq!(rule.selector, ".btn");
        assert_eq!(rule.nodes.len(), 1);
        assert_eq!(decl(&rule.nodes[0]).prop, "color");
        assert_eq!(decl(&rule.nodes[0]).value, "red");
    }

    #[test]
    fn test_palette_selector_kept_verbatim() {
        let sheet = parse(":root, .nested-palette {\n  --primary-hue: 250;\n}\n");
        let rule = first_rule(&sheet);
        assert_eq!(rule.selector, ":root, .nested-palette");
        assert_eq!(rule.get("--primary-hue").unwrap().value, "250");
    }

    #[test]
    fn test_last_declaration_without_semicolon() {
        let sheet = parse("a { color: red; margin: 0 }");
        let rule = first_rule(&sheet);
        assert_eq!(rule.nodes.len(), 2);
        assert_eq!(decl(&rule.nodes[1]).value, "0");
    }

    #[test]
    fn test_pseudo_class_selector_is_rule_not_declaration() {
        let sheet = parse("a:hover { color: blue }");
        assert_eq!(first_rule(&sheet).selector, "a:hover");
    }

    #[test]
    fn test_nested_rule() {
        let sheet = parse(".card { color: red; &:hover { color: blue; } }");
        let rule = first_rule(&sheet);
        assert_eq!(rule.nodes.len(), 2);
        match &rule.nodes[1] {
            Node::Rule(inner) => {
                assert_eq!(inner.selector, "&:hover");
                assert_eq!(inner.nodes.len(), 1);
            }
            other => panic!("Expected nested rule, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_top_level_rules() {
        let sheet = parse("a { } b { } c { }");
        let selectors: Vec<&str> = sheet.rules().map(|r| r.selector.as_str()).collect();
        assert_eq!(selectors, vec!["a", "b", "c"]);
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    #[test]
    fn test_function_values_with_semicolons_in_parens() {
        let sheet = parse("a { background: url(data:image/png;base64,AAA); }");
        let rule = first_rule(&sheet);
        assert_eq!(rule.nodes.len(), 1);
        assert_eq!(
            decl(&rule.nodes[0]).value,
            "url(data:image/png;base64,AAA)"
        );
    }

    #[test]
    fn test_value_keeps_inner_spacing() {
        let sheet = parse(":root { --l: calc(98% - 88% * sin(0.056 * 6 * 1.5708)); }");
        assert_eq!(
            first_rule(&sheet).get("--l").unwrap().value,
            "calc(98% - 88% * sin(0.056 * 6 * 1.5708))"
        );
    }

    #[test]
    fn test_important() {
        let sheet = parse("a { color: red ! important; margin: 0 !IMPORTANT }");
        let rule = first_rule(&sheet);
        let color = decl(&rule.nodes[0]);
        assert!(color.important);
        assert_eq!(color.value, "red");
        assert!(decl(&rule.nodes[1]).important);
    }

    #[test]
    fn test_string_value_with_braces() {
        let sheet = parse("a::before { content: \"{ ; }\"; }");
        let rule = first_rule(&sheet);
        assert_eq!(decl(&rule.nodes[0]).value, "\"{ ; }\"");
    }

    #[test]
    fn test_declaration_position() {
        let sheet = parse("a {\n  color: red;\n}");
        let rule = first_rule(&sheet);
        assert_eq!(rule.source, Some(Position::new(1, 1)));
        assert_eq!(decl(&rule.nodes[0]).source, Some(Position::new(2, 3)));
    }

    // =========================================================================
    // At-rules and comments
    // =========================================================================

    #[test]
    fn test_import_statement() {
        let sheet = parse("@import \"base.css\";\na { }");
        match &sheet.nodes[0] {
            Node::AtRule(at) => {
                assert_eq!(at.name, "import");
                assert_eq!(at.params, "\"base.css\"");
                assert!(at.nodes.is_none());
            }
            other => panic!("Expected at-rule, got {other:?}"),
        }
        assert_eq!(sheet.nodes.len(), 2);
    }

    #[test]
    fn test_media_block() {
        let sheet = parse("@media (prefers-color-scheme: dark) { :root { --x: 1; } }");
        match &sheet.nodes[0] {
            Node::AtRule(at) => {
                assert_eq!(at.name, "media");
                assert_eq!(at.params, "(prefers-color-scheme: dark)");
                let children = at.nodes.as_ref().unwrap();
                assert_eq!(children.len(), 1);
                assert!(matches!(&children[0], Node::Rule(r) if r.selector == ":root"));
            }
            other => panic!("Expected at-rule, got {other:?}"),
        }
    }

    #[test]
    fn test_comments_are_nodes() {
        let sheet = parse("/* theme */\na { /* inner */ color: red; }");
        assert!(matches!(&sheet.nodes[0], Node::Comment(c) if c.text == " theme "));
        let rule = match &sheet.nodes[1] {
            Node::Rule(r) => r,
            other => panic!("Expected rule, got {other:?}"),
        };
        assert!(matches!(&rule.nodes[0], Node::Comment(c) if c.text == " inner "));
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[test]
    fn test_unclosed_block() {
        let err = Parser::parse("a {\n  color: red;\n").unwrap_err();
        assert_eq!(err.message, "Unclosed block");
        assert_eq!((err.line, err.column), (1, 3));
    }

    #[test]
    fn test_unexpected_close_brace() {
        let err = Parser::parse("a { }\n}").unwrap_err();
        assert_eq!(err.message, "Unexpected '}'");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_unclosed_paren() {
        let err = Parser::parse("a { color: rgb(1, 2, 3; }").unwrap_err();
        assert_eq!(err.message, "Unclosed bracket");
    }

    #[test]
    fn test_mismatched_bracket() {
        let err = Parser::parse("a { color: rgb(1, 2]; }").unwrap_err();
        assert_eq!(err.message, "Unexpected ']'");
    }

    #[test]
    fn test_unknown_word() {
        let err = Parser::parse("a { color red; }").unwrap_err();
        assert_eq!(err.message, "Unknown word 'color red'");
        assert_eq!((err.line, err.column), (1, 5));
    }

    #[test]
    fn test_lexer_error_is_forwarded() {
        let err = Parser::parse("a { content: \"x }").unwrap_err();
        assert_eq!(err.message, "Unterminated string");
    }
}

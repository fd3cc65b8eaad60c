//! Abstract Syntax Tree for stylesheets.
//!
//! A deliberately small node model: rules, at-rules, declarations and
//! comments. Selectors, at-rule params and declaration values are kept as raw
//! text; nothing here interprets them.

/// Where a node started in the source (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A complete stylesheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

/// A node in the stylesheet tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `selector { ... }`
    Rule(Rule),

    /// `@name params;` or `@name params { ... }`
    AtRule(AtRule),

    /// `prop: value` inside a block (or stray at top level).
    Declaration(Declaration),

    /// `/* text */`
    Comment(Comment),
}

impl Node {
    pub fn source(&self) -> Option<Position> {
        match self {
            Node::Rule(rule) => rule.source,
            Node::AtRule(at) => at.source,
            Node::Declaration(decl) => decl.source,
            Node::Comment(comment) => comment.source,
        }
    }
}

/// A style rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selector: String,
    pub nodes: Vec<Node>,
    pub source: Option<Position>,
}

/// An at-rule. `nodes` is `None` for statement at-rules like `@import`.
#[derive(Debug, Clone, PartialEq)]
pub struct AtRule {
    pub name: String,
    pub params: String,
    pub nodes: Option<Vec<Node>>,
    pub source: Option<Position>,
}

/// A single `prop: value` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub prop: String,
    pub value: String,
    pub important: bool,
    pub source: Option<Position>,
}

/// A comment; `text` excludes the delimiters.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub text: String,
    pub source: Option<Position>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the first top-level rule whose selector matches exactly.
    pub fn find_rule(&self, selector: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|node| matches!(node, Node::Rule(rule) if rule.selector == selector))
    }

    pub fn rule_mut(&mut self, index: usize) -> Option<&mut Rule> {
        match self.nodes.get_mut(index) {
            Some(Node::Rule(rule)) => Some(rule),
            _ => None,
        }
    }

    /// The first top-level rule matching `selector`, created at the top of
    /// the stylesheet if there is none.
    pub fn find_or_prepend_rule(&mut self, selector: &str) -> &mut Rule {
        let index = match self.find_rule(selector) {
            Some(index) => index,
            None => {
                self.prepend(Rule::new(selector).into());
                0
            }
        };
        match &mut self.nodes[index] {
            Node::Rule(rule) => rule,
            _ => unreachable!("find_rule only returns rule indices"),
        }
    }

    /// Insert a node before every other node.
    pub fn prepend(&mut self, node: Node) {
        self.nodes.insert(0, node);
    }

    /// Top-level rules, in order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Rule(rule) => Some(rule),
            _ => None,
        })
    }
}

impl Rule {
    /// A rule with no children and no source position.
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            nodes: Vec::new(),
            source: None,
        }
    }

    pub fn append(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Direct child declarations, in order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Declaration(decl) => Some(decl),
            _ => None,
        })
    }

    /// Look up the last direct declaration for `prop` (the one the cascade keeps).
    pub fn get(&self, prop: &str) -> Option<&Declaration> {
        self.declarations().filter(|decl| decl.prop == prop).last()
    }

    /// Remove direct declarations for which `pred` returns true.
    /// Returns how many were removed.
    pub fn remove_declarations(&mut self, mut pred: impl FnMut(&Declaration) -> bool) -> usize {
        let before = self.nodes.len();
        self.nodes
            .retain(|node| !matches!(node, Node::Declaration(decl) if pred(decl)));
        before - self.nodes.len()
    }
}

impl Declaration {
    /// A generated declaration (no source position, not important).
    pub fn new(prop: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prop: prop.into(),
            value: value.into(),
            important: false,
            source: None,
        }
    }
}

impl From<Declaration> for Node {
    fn from(decl: Declaration) -> Self {
        Node::Declaration(decl)
    }
}

impl From<Rule> for Node {
    fn from(rule: Rule) -> Self {
        Node::Rule(rule)
    }
}

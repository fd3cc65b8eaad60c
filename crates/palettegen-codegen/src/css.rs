//! CSS code generator.
//!
//! Serializes a stylesheet tree back into CSS text in a canonical layout:
//! two-space indentation, one declaration per line, a blank line between
//! top-level nodes. Optionally records where each node with a source position
//! landed in the output, for source maps.

use crate::sourcemap::Mapping;
use palettegen_parser::ast::{AtRule, Node, Rule, Stylesheet};

const INDENT: &str = "  ";

/// Generate CSS from a stylesheet.
pub fn generate(sheet: &Stylesheet) -> String {
    let mut printer = Printer::new(false);
    printer.print_sheet(sheet);
    printer.out
}

/// Generate CSS and the mappings from output positions to source positions.
pub fn generate_with_map(sheet: &Stylesheet) -> (String, Vec<Mapping>) {
    let mut printer = Printer::new(true);
    printer.print_sheet(sheet);
    (printer.out, printer.mappings)
}

struct Printer {
    out: String,
    /// 0-based position of the next character written.
    line: usize,
    column: usize,
    record: bool,
    mappings: Vec<Mapping>,
}

impl Printer {
    fn new(record: bool) -> Self {
        Self {
            out: String::new(),
            line: 0,
            column: 0,
            record,
            mappings: Vec::new(),
        }
    }

    fn print_sheet(&mut self, sheet: &Stylesheet) {
        for (i, node) in sheet.nodes.iter().enumerate() {
            if i > 0 {
                self.write("\n");
            }
            self.print_node(node, 0);
        }
    }

    fn print_node(&mut self, node: &Node, depth: usize) {
        self.write(&INDENT.repeat(depth));
        self.mark(node);

        match node {
            Node::Rule(rule) => self.print_rule(rule, depth),
            Node::AtRule(at) => self.print_at_rule(at, depth),
            Node::Declaration(decl) => {
                let important = if decl.important { " !important" } else { "" };
                self.write(&format!("{}: {}{important};\n", decl.prop, decl.value));
            }
            Node::Comment(comment) => {
                self.write(&format!("/*{}*/\n", comment.text));
            }
        }
    }

    fn print_rule(&mut self, rule: &Rule, depth: usize) {
        self.write(&rule.selector);
        self.print_block(&rule.nodes, depth);
    }

    fn print_at_rule(&mut self, at: &AtRule, depth: usize) {
        self.write(&format!("@{}", at.name));
        if !at.params.is_empty() {
            self.write(&format!(" {}", at.params));
        }
        match &at.nodes {
            Some(nodes) => self.print_block(nodes, depth),
            None => self.write(";\n"),
        }
    }

    fn print_block(&mut self, nodes: &[Node], depth: usize) {
        if nodes.is_empty() {
            self.write(" {}\n");
            return;
        }
        self.write(" {\n");
        for child in nodes {
            self.print_node(child, depth + 1);
        }
        self.write(&INDENT.repeat(depth));
        self.write("}\n");
    }

    fn mark(&mut self, node: &Node) {
        if !self.record {
            return;
        }
        if let Some(pos) = node.source() {
            self.mappings.push(Mapping {
                generated_line: self.line,
                generated_column: self.column,
                source_line: pos.line.saturating_sub(1),
                source_column: pos.column.saturating_sub(1),
            });
        }
    }

    fn write(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += c.len_utf16();
            }
        }
        self.out.push_str(text);
    }
}

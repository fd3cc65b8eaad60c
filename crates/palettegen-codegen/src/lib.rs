//! palettegen Code Generator
//!
//! Generates the OKLCH design-token system as CSS custom properties and
//! writes it into the palette rule of a stylesheet.
//!
//! ```text
//! CSS source → Parser::parse() → apply() → css::generate() → CSS text
//! ```
//!
//! Generation runs in a fixed order: lightness formulas, palettes, semantic
//! aliases. Each step returns its own declaration list; `apply` concatenates
//! them into the rule.

pub mod alias;
pub mod config;
pub mod css;
pub mod curve;
pub mod palette;
pub mod sourcemap;
pub mod summary;

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use palettegen_parser::{Declaration, Node, ParseError, Parser, Stylesheet};
use serde::Serialize;

use crate::config::PALETTE_SELECTOR;
use crate::sourcemap::SourceMap;

/// Error from the whole-file transformation.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Source map error: {0}")]
    SourceMap(#[from] serde_json::Error),
}

/// What `apply` did to the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyStats {
    /// The palette rule did not exist and was inserted at the top.
    pub created_rule: bool,
    /// Previously generated declarations removed before re-emission.
    pub replaced: usize,
    /// Declarations appended.
    pub emitted: usize,
}

/// Every generated declaration, in output order.
pub fn generate_declarations() -> Vec<Declaration> {
    let mut decls = curve::lightness_declarations();
    decls.extend(palette::all_palette_declarations());
    decls.extend(alias::alias_declarations());
    decls
}

/// Populate the `:root, .nested-palette` rule of `sheet`.
///
/// Declarations already in the rule under a generated name are dropped first,
/// so applying twice gives the same stylesheet as applying once. Author
/// declarations under other names (hues, brand variables) keep their place
/// ahead of the generated block.
pub fn apply(sheet: &mut Stylesheet) -> ApplyStats {
    let decls = generate_declarations();

    let created_rule = sheet.find_rule(PALETTE_SELECTOR).is_none();
    let rule = sheet.find_or_prepend_rule(PALETTE_SELECTOR);
    let replaced = {
        let names: HashSet<&str> = decls.iter().map(|d| d.prop.as_str()).collect();
        rule.remove_declarations(|d| names.contains(d.prop.as_str()))
    };

    let emitted = decls.len();
    for decl in decls {
        rule.append(decl.into());
    }

    if created_rule {
        log::debug!("created palette rule `{PALETTE_SELECTOR}`");
    }
    if replaced > 0 {
        log::debug!("replaced {replaced} previously generated declarations");
    }
    log::debug!("emitted {emitted} declarations");

    ApplyStats {
        created_rule,
        replaced,
        emitted,
    }
}

/// Options for `process`.
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Source file name, recorded in the source map.
    pub from: Option<String>,
    /// Output file name, recorded in the source map and its annotation.
    pub to: Option<String>,
    /// Build a source map and append a `sourceMappingURL` annotation.
    pub map: bool,
}

/// Result of a whole-file transformation.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub css: String,
    /// Source map JSON, when requested.
    pub map: Option<String>,
    pub stats: ApplyStats,
}

/// Parse `source`, populate the palette rule and serialize the result.
pub fn process(source: &str, options: &ProcessOptions) -> Result<ProcessOutput, CodegenError> {
    let mut sheet = Parser::parse(source)?;
    let stats = apply(&mut sheet);
    if options.map {
        strip_map_annotations(&mut sheet);
    }

    if !options.map {
        return Ok(ProcessOutput {
            css: css::generate(&sheet),
            map: None,
            stats,
        });
    }

    let (mut css, mappings) = css::generate_with_map(&sheet);
    let to = options.to.as_deref().unwrap_or("out.css");
    let from = options.from.as_deref().unwrap_or("<input css>");
    let source_name = relative_to_output(from, to);
    let map = SourceMap::new(file_name(to), &source_name, source, &mappings).to_json()?;
    css.push_str(&format!("\n/*# sourceMappingURL={}.map */\n", file_name(to)));

    Ok(ProcessOutput {
        css,
        map: Some(map),
        stats,
    })
}

/// Text of a `/*# sourceMappingURL=... */` comment, without the delimiters.
const MAP_ANNOTATION: &str = "# sourceMappingURL=";

/// Drop top-level source map annotations left by an earlier run.
fn strip_map_annotations(sheet: &mut Stylesheet) {
    sheet
        .nodes
        .retain(|node| !matches!(node, Node::Comment(c) if c.text.starts_with(MAP_ANNOTATION)));
}

/// `from` as seen from the directory `to` is written into, since the map is
/// saved next to the output.
fn relative_to_output(from: &str, to: &str) -> String {
    let from = Path::new(from);
    let base = Path::new(to).parent().unwrap_or(Path::new(""));
    if from.is_absolute() != base.is_absolute() {
        return from.to_string_lossy().into_owned();
    }

    let from_parts = path_components(from);
    let base_parts = path_components(base);
    let common = from_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &from_parts[common..] {
        relative.push(part.as_os_str());
    }
    relative.to_string_lossy().into_owned()
}

fn path_components(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| *c != Component::CurDir)
        .collect()
}

fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

/// A generated variable as `name`/`value`, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenEntry {
    pub name: String,
    pub value: String,
}

/// The generated variables, in output order.
pub fn tokens() -> Vec<TokenEntry> {
    generate_declarations()
        .into_iter()
        .map(|d| TokenEntry {
            name: d.prop,
            value: d.value,
        })
        .collect()
}

//! Semantic aliases.
//!
//! Usage sites reference `--surface` or `--primary-dark` instead of raw
//! palette levels; each alias is a `var()` indirection to a generated color.

use crate::config::Palette;
use palettegen_parser::Declaration;

/// Gray-backed aliases: `(alias, level)`.
const GRAY_ALIASES: &[(&str, u16)] = &[
    ("--surface-lightest", 0),
    ("--surface-lighter", 50),
    ("--surface-light", 100),
    ("--surface", 200),
    ("--surface-dark", 300),
    ("--text-subtle", 400),
    ("--text-muted", 500),
    ("--text", 900),
    ("--text-strong", 900),
    ("--border-light", 200),
    ("--border", 300),
    ("--border-dark", 400),
];

/// Per-palette aliases: `(suffix, level)`. An empty suffix names the palette itself.
const PALETTE_ALIASES: &[(&str, u16)] = &[
    ("-lightest", 50),
    ("-light", 100),
    ("-lighter", 200),
    ("", 500),
    ("-darker", 700),
    ("-dark", 800),
    ("-darkest", 950),
];

/// One alias and the generated variable it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub name: String,
    pub target: String,
}

impl Alias {
    pub fn to_declaration(&self) -> Declaration {
        Declaration::new(self.name.clone(), format!("var({})", self.target))
    }
}

/// Every alias in output order: gray first, then each chromatic palette.
pub fn aliases() -> Vec<Alias> {
    let gray = GRAY_ALIASES.iter().map(|&(name, level)| Alias {
        name: name.to_string(),
        target: Palette::Gray.color_var(level),
    });

    let chromatic = Palette::CHROMATIC.into_iter().flat_map(|palette| {
        PALETTE_ALIASES.iter().map(move |&(suffix, level)| Alias {
            name: format!("--{}{suffix}", palette.name()),
            target: palette.color_var(level),
        })
    });

    gray.chain(chromatic).collect()
}

pub fn alias_declarations() -> Vec<Declaration> {
    aliases().iter().map(Alias::to_declaration).collect()
}

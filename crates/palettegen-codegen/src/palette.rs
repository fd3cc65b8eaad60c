//! Palette emission.
//!
//! Every palette gets a chroma base, one chroma formula per level and one
//! OKLCH color per level. Hues are never computed here: `--{palette}-hue` is
//! resolved by the browser from the consuming stylesheet, except for gray,
//! which borrows the primary hue.

use crate::config::{lightness_var, Palette, COLOR_LEVELS, STEP_MULTIPLIER};
use crate::curve::chroma_formula;
use palettegen_parser::Declaration;

/// `oklch(var(--lightness-formula-L) var(--P-chroma-formula-L) var(--P-hue))`
pub fn oklch_value(palette: Palette, level: u16) -> String {
    format!(
        "oklch(var({}) var({}) var({}))",
        lightness_var(level),
        palette.chroma_formula_var(level),
        palette.hue_var()
    )
}

/// All declarations for one palette, in output order.
pub fn palette_declarations(palette: Palette) -> Vec<Declaration> {
    let mut decls = Vec::with_capacity(2 + COLOR_LEVELS.len() * 2);

    decls.push(Declaration::new(
        palette.chroma_base_var(),
        palette.default_chroma_base(),
    ));

    if palette == Palette::Gray {
        decls.push(Declaration::new(
            Palette::Gray.hue_var(),
            format!("var({})", Palette::Primary.hue_var()),
        ));
    }

    decls.extend(COLOR_LEVELS.iter().enumerate().map(|(index, &level)| {
        Declaration::new(
            palette.chroma_formula_var(level),
            chroma_formula(index, palette),
        )
    }));

    decls.extend(
        COLOR_LEVELS
            .iter()
            .map(|&level| Declaration::new(palette.color_var(level), oklch_value(palette, level))),
    );

    log::trace!("palette {palette}: {} declarations", decls.len());
    decls
}

/// `--step-multiplier` followed by every palette in order.
pub fn all_palette_declarations() -> Vec<Declaration> {
    let mut decls = vec![Declaration::new("--step-multiplier", STEP_MULTIPLIER)];
    for palette in Palette::ALL {
        decls.extend(palette_declarations(palette));
    }
    decls
}

//! Lightness and chroma curves.
//!
//! Both curves are indexed by a level's position in `COLOR_LEVELS`, not by the
//! level number itself.

use crate::config::{
    lightness_var, ChromaCurve, Palette, COLOR_LEVELS, LIGHTNESS_OVERRIDES, STEP_MULTIPLIER,
};
use palettegen_parser::Declaration;

/// Quarter turn in radians, as written in the generated `sin()` argument.
const QUARTER_TURN: &str = "1.5708";

/// Lightness of one level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lightness {
    /// Literal percentage from the override table.
    Fixed(f64),
    /// `calc(98% - 88% * sin(0.056 * index * 1.5708))`, left for the browser.
    Sine { index: usize },
}

impl Lightness {
    pub fn to_css(self) -> String {
        match self {
            Lightness::Fixed(percent) => format!("{percent}%"),
            Lightness::Sine { index } => {
                format!("calc(98% - 88% * sin({STEP_MULTIPLIER} * {index} * {QUARTER_TURN}))")
            }
        }
    }

    /// Numeric value in percent, as the browser would evaluate it.
    pub fn percent(self) -> f64 {
        match self {
            Lightness::Fixed(percent) => percent,
            Lightness::Sine { index } => {
                98.0 - 88.0 * (0.056 * index as f64 * 1.5708).sin()
            }
        }
    }
}

/// Lightness for `level` at position `index`.
pub fn lightness(level: u16, index: usize) -> Lightness {
    LIGHTNESS_OVERRIDES
        .iter()
        .find(|(l, _)| *l == level)
        .map_or(Lightness::Sine { index }, |(_, percent)| {
            Lightness::Fixed(*percent)
        })
}

/// `--lightness-formula-{level}` for every level, in order.
pub fn lightness_declarations() -> Vec<Declaration> {
    COLOR_LEVELS
        .iter()
        .enumerate()
        .map(|(index, &level)| {
            Declaration::new(lightness_var(level), lightness(level, index).to_css())
        })
        .collect()
}

/// Chroma shape ratio for position `index` among `total` levels, rounded to
/// two decimals.
///
/// Rises linearly from `MIN_RATIO` to `MAX_RATIO` at `total / 2`, then falls
/// back to `MIN_RATIO` at the last level. Requires `total >= 3` and
/// `index < total`.
pub fn chroma_ratio(index: usize, total: usize) -> f64 {
    debug_assert!(
        total >= 3 && index < total,
        "chroma index {index} out of range for {total} levels"
    );
    let peak = total / 2;
    let shape = if index <= peak {
        index as f64 / peak as f64
    } else {
        (total - 1 - index) as f64 / (total - 1 - peak) as f64
    };
    let ratio = shape * ChromaCurve::RANGE + ChromaCurve::MIN_RATIO;
    (ratio * 100.0).round() / 100.0
}

/// `calc({ratio} * var(--{palette}-chroma-base))` for position `index`.
pub fn chroma_formula(index: usize, palette: Palette) -> String {
    let ratio = chroma_ratio(index, COLOR_LEVELS.len());
    format!(
        "calc({ratio:.2} * var({}))",
        palette.chroma_base_var()
    )
}

//! Compile-time configuration for the palette generator.
//!
//! Every table the generator reads lives here. Nothing is configurable at
//! runtime: per-palette chroma and hue are left to the consuming stylesheet
//! through CSS custom properties.

/// Selector of the rule that receives the generated declarations.
pub const PALETTE_SELECTOR: &str = ":root, .nested-palette";

/// Ordered color levels. The order defines the shape of both curves.
pub const COLOR_LEVELS: [u16; 12] = [0, 50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// Step multiplier of the sinusoidal lightness curve.
pub const STEP_MULTIPLIER: &str = "0.056";

/// Literal lightness percentages for the levels where the sine curve
/// under- or overshoots.
pub const LIGHTNESS_OVERRIDES: &[(u16, f64)] = &[
    (0, 99.7),
    (50, 98.5),
    (100, 95.0),
    (200, 88.0),
    (800, 25.0),
    (900, 15.0),
    (950, 8.0),
];

/// Triangular chroma curve parameters.
pub struct ChromaCurve;

impl ChromaCurve {
    /// Ratio at the first and last levels.
    pub const MIN_RATIO: f64 = 0.32;
    /// Ratio at the peak level.
    pub const MAX_RATIO: f64 = 1.00;
    /// `MAX_RATIO - MIN_RATIO`
    pub const RANGE: f64 = 0.68;
}

/// The palettes, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    Gray,
    Primary,
    Secondary,
    Tertiary,
}

impl Palette {
    pub const ALL: [Palette; 4] = [
        Palette::Gray,
        Palette::Primary,
        Palette::Secondary,
        Palette::Tertiary,
    ];

    /// Palettes with their own hue.
    pub const CHROMATIC: [Palette; 3] = [Palette::Primary, Palette::Secondary, Palette::Tertiary];

    pub fn name(self) -> &'static str {
        match self {
            Palette::Gray => "gray",
            Palette::Primary => "primary",
            Palette::Secondary => "secondary",
            Palette::Tertiary => "tertiary",
        }
    }

    /// Default for `--{name}-chroma-base`. Overridable in CSS.
    pub fn default_chroma_base(self) -> &'static str {
        match self {
            Palette::Gray => "0.01",
            _ => "0.15",
        }
    }

    /// `--{name}-{level}`
    pub fn color_var(self, level: u16) -> String {
        format!("--{}-{level}", self.name())
    }

    pub fn chroma_base_var(self) -> String {
        format!("--{}-chroma-base", self.name())
    }

    pub fn chroma_formula_var(self, level: u16) -> String {
        format!("--{}-chroma-formula-{level}", self.name())
    }

    pub fn hue_var(self) -> String {
        format!("--{}-hue", self.name())
    }
}

impl std::fmt::Display for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// `--lightness-formula-{level}`
pub fn lightness_var(level: u16) -> String {
    format!("--lightness-formula-{level}")
}

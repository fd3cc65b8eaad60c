//! Textual report over generated CSS.

/// How many example lines the report shows.
pub const EXAMPLE_LINES: usize = 5;

/// Line and variable counts of a generated stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Number of `\n`-separated lines, counting the empty tail after a final newline.
    pub lines: usize,
    /// Trimmed lines that contain both `--` and `:`.
    pub variable_lines: Vec<String>,
}

impl Summary {
    pub fn from_css(css: &str) -> Self {
        let variable_lines = css
            .split('\n')
            .filter(|line| line.contains("--") && line.contains(':'))
            .map(|line| line.trim().to_string())
            .collect();

        Self {
            lines: css.split('\n').count(),
            variable_lines,
        }
    }

    pub fn variable_count(&self) -> usize {
        self.variable_lines.len()
    }

    /// The first few variable lines.
    pub fn examples(&self) -> &[String] {
        &self.variable_lines[..self.variable_lines.len().min(EXAMPLE_LINES)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_css() {
        let summary = Summary::from_css("");
        assert_eq!(summary.lines, 1);
        assert_eq!(summary.variable_count(), 0);
        assert!(summary.examples().is_empty());
    }

    #[test]
    fn test_counts_variable_lines_only() {
        let css = "a {\n  color: red;\n  --x: 1;\n  --y: var(--x);\n}\n";
        let summary = Summary::from_css(css);
        assert_eq!(summary.lines, 6);
        assert_eq!(summary.variable_lines, vec!["--x: 1;", "--y: var(--x);"]);
    }

    #[test]
    fn test_examples_capped() {
        let css: String = (0..8).map(|i| format!("  --v{i}: {i};\n")).collect();
        let summary = Summary::from_css(&css);
        assert_eq!(summary.variable_count(), 8);
        assert_eq!(summary.examples().len(), EXAMPLE_LINES);
        assert_eq!(summary.examples()[0], "--v0: 0;");
    }
}

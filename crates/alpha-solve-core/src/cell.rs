//! Worksheet cells

/// One worksheet unit holding LaTeX source
///
/// Plug-ins only read cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    #[cfg_attr(feature = "serde", serde(default))]
    pub latex: String,
}

impl Cell {
    pub fn new<S: Into<String>>(latex: S) -> Self {
        Self {
            latex: latex.into(),
        }
    }

    /// LaTeX with surrounding whitespace removed
    pub fn trimmed_latex(&self) -> &str {
        self.latex.trim()
    }
}

impl From<&str> for Cell {
    fn from(latex: &str) -> Self {
        Cell::new(latex)
    }
}

impl From<String> for Cell {
    fn from(latex: String) -> Self {
        Cell::new(latex)
    }
}

//! Analysis configuration.

use super::constants::{LINE_WIDTH, MIN_ORF_LENGTH, REFERENCE_PREFIX};

/// Which grammar the lexer and parser accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageMode {
    /// Declarations and gene definitions, `//` comments, quoted values.
    #[default]
    Structural,
    /// Legacy flat `key = value` files with `#`/`!` comments and raw values.
    Properties,
}

/// Settings shared by parsing, validation and documentation rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub mode: LanguageMode,
    pub reference_prefix: String,
    pub min_orf_length: usize,
    pub line_width: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: LanguageMode::default(),
            reference_prefix: REFERENCE_PREFIX.to_string(),
            min_orf_length: MIN_ORF_LENGTH,
            line_width: LINE_WIDTH,
        }
    }
}

impl AnalysisConfig {
    pub fn with_mode(mut self, mode: LanguageMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_reference_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.reference_prefix = prefix.into();
        self
    }

    pub fn with_min_orf_length(mut self, length: usize) -> Self {
        self.min_orf_length = length;
        self
    }

    /// Set the output line width. A width of zero is treated as one.
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.line_width = width.max(1);
        self
    }
}

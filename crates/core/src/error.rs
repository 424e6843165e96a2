use thiserror::Error;

/// Source location information for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, in code points)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Invalid formatter or analyzer configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    /// The bullet is not one plain-text extraction recognises.
    #[error("invalid bullet {0:?}: must be one of the supported bullet glyphs")]
    InvalidBullet(char),
    /// Density threshold outside 0..=100.
    #[error("density threshold must be a percentage between 0 and 100, got {0}")]
    InvalidDensityThreshold(f64),
    /// A platform limit of zero makes every post too long.
    #[error("platform limit must be greater than zero")]
    ZeroPlatformLimit,
}

/// Non-fatal conditions found while tokenizing. Output is still produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// Code fence opened but never closed; the rest of the input became code.
    UnclosedCodeFence {
        /// Where the fence opened
        location: SourceLocation,
        /// Fence marker character (backtick or tilde)
        marker: char,
    },
    /// An inline opener with no closer, kept as literal text.
    UnpairedMarker {
        /// Where the opener sits
        location: SourceLocation,
        /// The marker as written, e.g. `**` or `` ` ``
        marker: String,
    },
}

impl ParseWarning {
    /// Get the location of this warning
    pub fn location(&self) -> &SourceLocation {
        match self {
            ParseWarning::UnclosedCodeFence { location, .. } => location,
            ParseWarning::UnpairedMarker { location, .. } => location,
        }
    }
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::UnclosedCodeFence { location, marker } => {
                write!(
                    f,
                    "{}: code fence ({}) is never closed; the rest of the text is treated as code",
                    location, marker
                )
            }
            ParseWarning::UnpairedMarker { location, marker } => {
                write!(f, "{}: unpaired `{}` kept as text", location, marker)
            }
        }
    }
}

/// Collection of parse warnings, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseDiagnostics {
    /// List of non-fatal warnings
    pub warnings: Vec<ParseWarning>,
}

impl ParseDiagnostics {
    /// Create a new empty diagnostics collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the diagnostics collection
    pub fn add_warning(&mut self, warning: ParseWarning) {
        log::debug!("{}", warning);
        self.warnings.push(warning);
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Get total count of all diagnostics
    pub fn count(&self) -> usize {
        self.warnings.len()
    }

    /// Sorts warnings by location; inline warnings are collected per block
    /// and may arrive after a later fence warning.
    pub(crate) fn sort(&mut self) {
        self.warnings
            .sort_by_key(|w| (w.location().line, w.location().column));
    }
}

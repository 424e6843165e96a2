//! Rendering and analysis configuration.

use crate::error::OptionsError;
use crate::style::StyleVariant;
use serde::{Deserialize, Serialize};

/// Character limit LinkedIn enforces on a post.
pub const PLATFORM_LIMIT: usize = 3000;

/// Styled-character share (percent) above which screen-reader use suffers.
pub const DENSITY_THRESHOLD: f64 = 30.0;

/// Default bullet for unordered list items.
pub const DEFAULT_BULLET: char = '•';

/// Glyphs allowed as list bullets. Plain-text extraction strips exactly
/// these from the start of a line.
pub const BULLETS: [char; 12] = [
    '•', '◦', '▪', '‣', '→', '▸', '►', '➤', '✓', '✔', '★', '◆',
];

/// Options for `markdown_to_linkedin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOptions {
    /// Character placed before unordered list items.
    pub bullet: char,
    /// Style applied to heading text.
    pub heading_style: StyleVariant,
    /// Append ` (url)` after link labels.
    pub link_urls: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            bullet: DEFAULT_BULLET,
            heading_style: StyleVariant::Bold,
            link_urls: true,
        }
    }
}

impl FormatOptions {
    /// Checks that the options produce unambiguous output.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !BULLETS.contains(&self.bullet) {
            return Err(OptionsError::InvalidBullet(self.bullet));
        }
        Ok(())
    }
}

/// Options for the character count and accessibility reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisOptions {
    /// Maximum post length in code points.
    pub platform_limit: usize,
    /// Warn when the styled share exceeds this percentage.
    pub density_threshold: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            platform_limit: PLATFORM_LIMIT,
            density_threshold: DENSITY_THRESHOLD,
        }
    }
}

impl AnalysisOptions {
    /// Checks limits are usable.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.platform_limit == 0 {
            return Err(OptionsError::ZeroPlatformLimit);
        }
        if !self.density_threshold.is_finite() || !(0.0..=100.0).contains(&self.density_threshold)
        {
            return Err(OptionsError::InvalidDensityThreshold(self.density_threshold));
        }
        Ok(())
    }
}

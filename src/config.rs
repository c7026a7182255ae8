//! Configuration types for Markdown conversion.
//!
//! Each pipeline has one config struct built via its builder, following the
//! same pattern throughout: defaults match the classic distribution layout
//! (US letter, one-inch margins, the slate/gold palette), and callers set
//! only what they care about.
//!
//! There is no configuration *file* — all knobs travel through these
//! structs, set either programmatically or from CLI flags.

use crate::error::Md2PubError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMargins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl PageMargins {
    /// One inch on all sides — the document pipeline's margins.
    pub fn uniform(inches: f64) -> Self {
        Self {
            top: inches,
            right: inches,
            bottom: inches,
            left: inches,
        }
    }

    /// The presentation PDF's margins: one inch except a quarter-inch
    /// bottom, leaving room for slide content to run long.
    pub fn presentation() -> Self {
        Self {
            top: 1.0,
            right: 1.0,
            bottom: 0.25,
            left: 1.0,
        }
    }
}

impl Default for PageMargins {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// Cover-page text for the presentation PDF.
///
/// The cover page carries a product name, a one-line description, and an
/// attribution line. Any field left `None` is simply omitted; a missing
/// title falls back to the first slide's title at render time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoverInfo {
    /// Product or deck name, rendered large and centered.
    pub title: Option<String>,
    /// One-line description under the title.
    pub subtitle: Option<String>,
    /// Attribution line ("Prepared by …").
    pub attribution: Option<String>,
}

/// Configuration for the document (Markdown → PDF) pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocConfig {
    /// Directory containing the TrueType fonts to use. When `None`, common
    /// system font directories are probed for Liberation/DejaVu families.
    pub font_dir: Option<PathBuf>,

    /// Page margins. Default: one inch on all sides.
    pub margins: PageMargins,

    /// Glyph prefixed to bullet-list items. Default: `•` (U+2022).
    pub bullet_glyph: char,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            font_dir: None,
            margins: PageMargins::default(),
            bullet_glyph: '\u{2022}',
        }
    }
}

impl DocConfig {
    /// Create a new builder for `DocConfig`.
    pub fn builder() -> DocConfigBuilder {
        DocConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`DocConfig`].
#[derive(Debug)]
pub struct DocConfigBuilder {
    config: DocConfig,
}

impl DocConfigBuilder {
    pub fn font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.font_dir = Some(dir.into());
        self
    }

    pub fn margins(mut self, margins: PageMargins) -> Self {
        self.config.margins = margins;
        self
    }

    pub fn bullet_glyph(mut self, glyph: char) -> Self {
        self.config.bullet_glyph = glyph;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<DocConfig, Md2PubError> {
        let m = &self.config.margins;
        if [m.top, m.right, m.bottom, m.left]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0 || *v > 4.0)
        {
            return Err(Md2PubError::InvalidConfig(format!(
                "margins must be 0–4 inches, got {:?}",
                m
            )));
        }
        Ok(self.config)
    }
}

/// Configuration for the presentation (Markdown → PPTX + PDF) pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Directory containing the TrueType fonts used for the PDF rendition.
    /// The PPTX rendition names fonts by family and needs no font files.
    pub font_dir: Option<PathBuf>,

    /// Cover-page text for the PDF rendition.
    pub cover: CoverInfo,

    /// Minimum chunk length (after trimming) for a slide candidate.
    /// Shorter chunks are treated as separator artifacts and dropped.
    /// Default: 10.
    pub min_chunk_len: usize,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            font_dir: None,
            cover: CoverInfo::default(),
            min_chunk_len: 10,
        }
    }
}

impl DeckConfig {
    /// Create a new builder for `DeckConfig`.
    pub fn builder() -> DeckConfigBuilder {
        DeckConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`DeckConfig`].
#[derive(Debug)]
pub struct DeckConfigBuilder {
    config: DeckConfig,
}

impl DeckConfigBuilder {
    pub fn font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.font_dir = Some(dir.into());
        self
    }

    pub fn cover(mut self, cover: CoverInfo) -> Self {
        self.config.cover = cover;
        self
    }

    pub fn cover_title(mut self, title: impl Into<String>) -> Self {
        self.config.cover.title = Some(title.into());
        self
    }

    pub fn cover_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.config.cover.subtitle = Some(subtitle.into());
        self
    }

    pub fn cover_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.config.cover.attribution = Some(attribution.into());
        self
    }

    pub fn min_chunk_len(mut self, len: usize) -> Self {
        self.config.min_chunk_len = len;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<DeckConfig, Md2PubError> {
        if self.config.min_chunk_len > 1024 {
            return Err(Md2PubError::InvalidConfig(format!(
                "min_chunk_len must be ≤ 1024, got {}",
                self.config.min_chunk_len
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_margins_are_one_inch() {
        let c = DocConfig::default();
        assert_eq!(c.margins, PageMargins::uniform(1.0));
        assert_eq!(c.bullet_glyph, '\u{2022}');
    }

    #[test]
    fn presentation_margins_have_short_bottom() {
        let m = PageMargins::presentation();
        assert_eq!(m.bottom, 0.25);
        assert_eq!(m.top, 1.0);
    }

    #[test]
    fn builder_rejects_absurd_margins() {
        let r = DocConfig::builder()
            .margins(PageMargins::uniform(9.0))
            .build();
        assert!(matches!(r, Err(Md2PubError::InvalidConfig(_))));
    }

    #[test]
    fn deck_builder_sets_cover_fields() {
        let c = DeckConfig::builder()
            .cover_title("Atlas Enterprise")
            .cover_subtitle("A mapping platform")
            .build()
            .unwrap();
        assert_eq!(c.cover.title.as_deref(), Some("Atlas Enterprise"));
        assert_eq!(c.cover.subtitle.as_deref(), Some("A mapping platform"));
        assert!(c.cover.attribution.is_none());
    }
}

//! Page-layout PDF writer: an ordered block list in, one paged PDF out.
//!
//! This is the single PDF path shared by both pipelines — the document
//! pipeline feeds it classifier output directly, the presentation pipeline
//! prepends cover blocks and page breaks. Styling differences travel in
//! the [`StyleSheet`], not in duplicated writer code.
//!
//! ## Failure tiers
//!
//! * Per block: a text block whose markup fails to parse is skipped with a
//!   warning and counted in the [`PdfReport`]. Best-effort emission —
//!   one bad paragraph never costs the document.
//! * Per file: the final render is all-or-nothing. The document is
//!   composed fully in memory and only written to disk once rendering
//!   succeeded, so a failure leaves no partial output file behind.

use crate::config::PageMargins;
use crate::error::Md2PubError;
use crate::fonts;
use crate::pipeline::classify::{StyledBlock, TextClass};
use crate::pipeline::rich;
use genpdf::elements::{Break, PageBreak, Paragraph};
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Document, Element, Margins, SimplePageDecorator};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const MM_PER_INCH: f64 = 25.4;
const MM_PER_POINT: f64 = 25.4 / 72.0;
/// Body leading of the classic layout; spacers are expressed in inches and
/// genpdf breaks in lines, so this is the conversion base.
const LINE_HEIGHT_PT: f64 = 14.0;

/// Horizontal alignment for a paragraph spec.
///
/// genpdf offers no justified alignment, so `Justify` renders left-aligned.
/// The variant is kept so style sheets still document the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Justify,
}

/// One named paragraph style: explicit size, colour, spacing, alignment.
#[derive(Debug, Clone, Copy)]
pub struct ParagraphSpec {
    pub font_size: u8,
    pub color: (u8, u8, u8),
    /// Space before the paragraph, points.
    pub space_before: f64,
    /// Space after the paragraph, points.
    pub space_after: f64,
    pub align: HAlign,
    /// Left indent, points.
    pub left_indent: f64,
    pub bold: bool,
}

impl ParagraphSpec {
    const fn plain(font_size: u8, color: (u8, u8, u8)) -> Self {
        Self {
            font_size,
            color,
            space_before: 0.0,
            space_after: 0.0,
            align: HAlign::Left,
            left_indent: 0.0,
            bold: false,
        }
    }
}

const SLATE: (u8, u8, u8) = (0x2c, 0x3e, 0x50);
const SLATE_LIGHT: (u8, u8, u8) = (0x34, 0x49, 0x5e);
const INK: (u8, u8, u8) = (0x33, 0x33, 0x33);
const CRIMSON: (u8, u8, u8) = (0xc7, 0x25, 0x4e);
const RULE_GREY: (u8, u8, u8) = (0x80, 0x80, 0x80);

/// The named paragraph styles one PDF rendition uses.
#[derive(Debug, Clone, Copy)]
pub struct StyleSheet {
    pub title: ParagraphSpec,
    pub h1: ParagraphSpec,
    pub h2: ParagraphSpec,
    pub h3: ParagraphSpec,
    pub body: ParagraphSpec,
    pub bullet: ParagraphSpec,
    pub code: ParagraphSpec,
}

impl StyleSheet {
    /// Styles for the document pipeline.
    pub fn document() -> Self {
        Self {
            title: ParagraphSpec {
                font_size: 24,
                space_after: 12.0,
                align: HAlign::Center,
                bold: true,
                ..ParagraphSpec::plain(24, SLATE)
            },
            h1: ParagraphSpec {
                space_before: 20.0,
                space_after: 12.0,
                bold: true,
                ..ParagraphSpec::plain(20, SLATE)
            },
            h2: ParagraphSpec {
                space_before: 16.0,
                space_after: 10.0,
                bold: true,
                ..ParagraphSpec::plain(16, SLATE)
            },
            h3: ParagraphSpec {
                space_before: 12.0,
                space_after: 8.0,
                bold: true,
                ..ParagraphSpec::plain(14, SLATE_LIGHT)
            },
            body: ParagraphSpec {
                space_after: 6.0,
                align: HAlign::Justify,
                ..ParagraphSpec::plain(11, INK)
            },
            bullet: ParagraphSpec {
                space_after: 4.0,
                left_indent: 20.0,
                ..ParagraphSpec::plain(11, INK)
            },
            code: ParagraphSpec {
                space_after: 6.0,
                left_indent: 20.0,
                ..ParagraphSpec::plain(9, CRIMSON)
            },
        }
    }

    /// Styles for the presentation PDF: a large centered cover title,
    /// 18 pt slide titles, indented content.
    pub fn presentation() -> Self {
        let doc = Self::document();
        Self {
            title: ParagraphSpec {
                font_size: 28,
                space_after: 30.0,
                align: HAlign::Center,
                bold: true,
                ..ParagraphSpec::plain(28, SLATE)
            },
            h1: ParagraphSpec {
                space_after: 12.0,
                bold: true,
                ..ParagraphSpec::plain(18, SLATE)
            },
            body: ParagraphSpec {
                space_after: 6.0,
                left_indent: 20.0,
                ..ParagraphSpec::plain(11, INK)
            },
            bullet: ParagraphSpec {
                space_after: 6.0,
                left_indent: 20.0,
                ..ParagraphSpec::plain(11, INK)
            },
            ..doc
        }
    }

    fn spec_for(&self, class: TextClass) -> &ParagraphSpec {
        match class {
            TextClass::Title => &self.title,
            TextClass::H1 => &self.h1,
            TextClass::H2 => &self.h2,
            TextClass::H3 => &self.h3,
            TextClass::Body => &self.body,
            TextClass::Bullet => &self.bullet,
        }
    }
}

/// Everything the writer needs besides the blocks themselves.
#[derive(Debug, Clone)]
pub struct PdfOptions {
    pub margins: PageMargins,
    pub styles: StyleSheet,
    /// Document title metadata.
    pub title: String,
    pub font_dir: Option<PathBuf>,
}

/// Outcome of one successful PDF build.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct PdfReport {
    /// Content blocks emitted into the document.
    pub emitted: usize,
    /// Text blocks dropped because their markup failed to parse.
    pub skipped: usize,
}

/// Compose the block list into a paged document and write it to `path`.
///
/// Terminal operation: either the file is written whole or the error
/// describes why the document was abandoned.
pub fn write_pdf(
    blocks: &[StyledBlock],
    path: &Path,
    opts: &PdfOptions,
) -> Result<PdfReport, Md2PubError> {
    let font_set = fonts::load_fonts(opts.font_dir.as_deref())?;

    let mut doc = Document::new(font_set.sans);
    let mono = doc.add_font_family(font_set.mono);
    doc.set_title(opts.title.clone());
    doc.set_font_size(opts.styles.body.font_size);

    let mut decorator = SimplePageDecorator::new();
    let m = opts.margins;
    decorator.set_margins(Margins::trbl(
        m.top * MM_PER_INCH,
        m.right * MM_PER_INCH,
        m.bottom * MM_PER_INCH,
        m.left * MM_PER_INCH,
    ));
    doc.set_page_decorator(decorator);

    let mut report = PdfReport::default();

    for (idx, block) in blocks.iter().enumerate() {
        match block {
            StyledBlock::Spacer(inches) => {
                doc.push(Break::new(inches * 72.0 / LINE_HEIGHT_PT));
            }
            StyledBlock::PageBreak => {
                doc.push(PageBreak::new());
            }
            StyledBlock::Rule => {
                push_rule(&mut doc);
                report.emitted += 1;
            }
            StyledBlock::Code(code) => {
                push_code(&mut doc, code, &opts.styles.code, &mono);
                report.emitted += 1;
            }
            StyledBlock::Text { markup, class } => {
                let spec = opts.styles.spec_for(*class);
                match rich::parse_spans(markup) {
                    Ok(spans) => {
                        push_text(&mut doc, &spans, spec, &mono);
                        report.emitted += 1;
                    }
                    Err(e) => {
                        warn!("skipping block {}: {}", idx + 1, e);
                        report.skipped += 1;
                    }
                }
            }
        }
    }

    // Render fully in memory first so a failure never leaves a truncated
    // file at the destination.
    let mut buf = Vec::new();
    doc.render(&mut buf)
        .map_err(|e| Md2PubError::RenderFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
    std::fs::write(path, &buf).map_err(|e| Md2PubError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(
        "wrote {} ({} blocks, {} skipped)",
        path.display(),
        report.emitted,
        report.skipped
    );
    Ok(report)
}

fn color(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn span_style(
    span: &rich::Span,
    spec: &ParagraphSpec,
    mono: &genpdf::fonts::FontFamily<genpdf::fonts::Font>,
) -> Style {
    let mut style = Style::new()
        .with_font_size(spec.font_size)
        .with_color(color(spec.color));
    if span.code {
        style.set_font_family(*mono);
    }
    if span.bold || spec.bold {
        style.set_bold();
    }
    if span.italic {
        style.set_italic();
    }
    style
}

fn padding(spec: &ParagraphSpec) -> Margins {
    Margins::trbl(
        spec.space_before * MM_PER_POINT,
        0.0,
        spec.space_after * MM_PER_POINT,
        spec.left_indent * MM_PER_POINT,
    )
}

fn push_text(
    doc: &mut Document,
    spans: &[rich::Span],
    spec: &ParagraphSpec,
    mono: &genpdf::fonts::FontFamily<genpdf::fonts::Font>,
) {
    let mut p = Paragraph::default();
    for span in spans {
        p.push_styled(span.text.clone(), span_style(span, spec, mono));
    }
    if spec.align == HAlign::Center {
        p = p.aligned(Alignment::Center);
    }
    doc.push(p.padded(padding(spec)));
}

fn push_code(
    doc: &mut Document,
    code: &str,
    spec: &ParagraphSpec,
    mono: &genpdf::fonts::FontFamily<genpdf::fonts::Font>,
) {
    let style = Style::new()
        .with_font_family(*mono)
        .with_font_size(spec.font_size)
        .with_color(color(spec.color));
    let pad = Margins::trbl(
        0.0,
        20.0 * MM_PER_POINT,
        spec.space_after * MM_PER_POINT,
        spec.left_indent * MM_PER_POINT,
    );
    // One paragraph per line: genpdf paragraphs do not honour embedded
    // newlines, and code must keep its line structure verbatim.
    for (i, line) in code.lines().enumerate() {
        let text = if line.is_empty() { " " } else { line };
        let p = Paragraph::default().styled_string(text, style);
        let pad = if i + 1 == code.lines().count() {
            pad
        } else {
            Margins::trbl(0.0, 20.0 * MM_PER_POINT, 0.0, spec.left_indent * MM_PER_POINT)
        };
        doc.push(p.padded(pad));
    }
}

/// A thin full-width grey line with breathing room on both sides.
///
/// genpdf has no line primitive at the element level, so the rule is a
/// run of underscores in a small grey style — visually a hairline at the
/// baseline.
fn push_rule(doc: &mut Document) {
    let style = Style::new().with_font_size(8).with_color(color(RULE_GREY));
    let line: String = "_".repeat(78);
    let p = Paragraph::default().styled_string(line, style);
    doc.push(p.padded(Margins::trbl(
        0.2 * MM_PER_INCH,
        0.0,
        0.2 * MM_PER_INCH,
        0.0,
    )));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_styles_match_classic_layout() {
        let s = StyleSheet::document();
        assert_eq!(s.title.font_size, 24);
        assert_eq!(s.title.align, HAlign::Center);
        assert_eq!(s.h1.font_size, 20);
        assert_eq!(s.h2.font_size, 16);
        assert_eq!(s.h3.font_size, 14);
        assert_eq!(s.body.font_size, 11);
        assert_eq!(s.body.align, HAlign::Justify);
        assert_eq!(s.code.font_size, 9);
        assert_eq!(s.bullet.left_indent, 20.0);
    }

    #[test]
    fn presentation_styles_use_large_cover_title() {
        let s = StyleSheet::presentation();
        assert_eq!(s.title.font_size, 28);
        assert_eq!(s.title.space_after, 30.0);
        assert_eq!(s.h1.font_size, 18);
        assert_eq!(s.body.left_indent, 20.0);
    }

    #[test]
    fn spec_lookup_covers_every_class() {
        let s = StyleSheet::document();
        for class in [
            TextClass::Title,
            TextClass::H1,
            TextClass::H2,
            TextClass::H3,
            TextClass::Body,
            TextClass::Bullet,
        ] {
            let _ = s.spec_for(class);
        }
    }
}

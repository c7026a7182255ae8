//! Top-level conversion entry points.
//!
//! Three operations, mirroring the two pipelines:
//!
//! * [`convert_document`] — one Markdown file → one PDF.
//! * [`convert_documents`] — a batch of Markdown files → PDFs in an output
//!   directory. Per-file failures are counted and reported, never
//!   propagated; one unreadable brief must not sink the rest of the batch.
//! * [`convert_presentation`] — one presentation Markdown file → a PPTX
//!   deck plus a cover-paged PDF overview. The two renditions are
//!   independent: a deck failure does not abandon the PDF or vice versa.
//!
//! Each call is a single forward pass over one input; there is no
//! concurrency and no retry logic.

use crate::config::{CoverInfo, DeckConfig, DocConfig};
use crate::error::Md2PubError;
use crate::pipeline::classify::{self, StyledBlock, TextClass};
use crate::pipeline::inline;
use crate::pipeline::slides::{self, Slide};
use crate::render::deck;
use crate::render::pdf::{self, PdfOptions, StyleSheet};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

// ── Reports ──────────────────────────────────────────────────────────────

/// Outcome of one successful document conversion.
#[derive(Debug, Clone, Serialize)]
pub struct DocReport {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Content blocks emitted into the PDF.
    pub emitted: usize,
    /// Text blocks dropped because their inline markup failed to parse.
    pub skipped: usize,
}

/// One failed file in a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub input: PathBuf,
    pub error: String,
}

/// Outcome of a batch document run. Failures live here, not in `Err`.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub converted: Vec<DocReport>,
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.converted.len()
    }

    pub fn failures(&self) -> usize {
        self.failed.len()
    }
}

/// Outcome of one presentation conversion.
///
/// Either rendition may fail independently; a failed rendition leaves its
/// path field `None` and appends to `errors`. The call itself only returns
/// `Err` when nothing could even be attempted (missing input, no slides).
#[derive(Debug, Serialize)]
pub struct PresentationReport {
    /// Slides parsed from the input (the cover slide included).
    pub slides: usize,
    /// The written PPTX deck, when that rendition succeeded.
    pub deck: Option<PathBuf>,
    /// The written PDF overview, when that rendition succeeded.
    pub pdf: Option<PathBuf>,
    /// Text blocks skipped while building the PDF overview.
    pub pdf_skipped: usize,
    /// Rendition failures, in attempt order (deck first).
    pub errors: Vec<String>,
}

// ── Documents ────────────────────────────────────────────────────────────

/// Convert one Markdown document to a PDF at `output`.
pub fn convert_document(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &DocConfig,
) -> Result<DocReport, Md2PubError> {
    let input = input.as_ref();
    let output = output.as_ref();

    let content = read_markdown(input)?;
    let blocks = classify::classify_document(&content, config.bullet_glyph);

    let opts = PdfOptions {
        margins: config.margins,
        styles: StyleSheet::document(),
        title: file_stem(input),
        font_dir: config.font_dir.clone(),
    };
    let report = pdf::write_pdf(&blocks, output, &opts)?;

    info!(
        "{} -> {} ({} blocks)",
        input.display(),
        output.display(),
        report.emitted
    );
    Ok(DocReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        emitted: report.emitted,
        skipped: report.skipped,
    })
}

/// Convert a batch of Markdown documents into `out_dir`, one PDF each.
///
/// Every input is attempted; failures are recorded in the report and
/// logged, and the next file proceeds. Output files are named after the
/// input stem (`OVERVIEW.md` → `OVERVIEW.pdf`).
pub fn convert_documents(
    inputs: &[PathBuf],
    out_dir: impl AsRef<Path>,
    config: &DocConfig,
) -> BatchReport {
    let out_dir = out_dir.as_ref();
    let mut report = BatchReport::default();

    if let Err(e) = std::fs::create_dir_all(out_dir) {
        // Without an output directory nothing can be written: record every
        // input as failed so the caller still sees the full tally.
        error!("cannot create {}: {}", out_dir.display(), e);
        for input in inputs {
            report.failed.push(BatchFailure {
                input: input.clone(),
                error: format!("cannot create {}: {}", out_dir.display(), e),
            });
        }
        return report;
    }

    for input in inputs {
        let output = out_dir.join(format!("{}.pdf", file_stem(input)));
        match convert_document(input, &output, config) {
            Ok(doc) => report.converted.push(doc),
            Err(e) => {
                error!("{}: {}", input.display(), e);
                report.failed.push(BatchFailure {
                    input: input.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    report
}

// ── Presentations ────────────────────────────────────────────────────────

/// Convert one presentation Markdown file into a PPTX deck and a PDF
/// overview, both written into `out_dir`.
///
/// The deck carries every parsed slide; the PDF opens with a cover page
/// built from the config's [`CoverInfo`] (falling back to the first
/// slide's title) followed by one page per remaining slide.
pub fn convert_presentation(
    input: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
    config: &DeckConfig,
) -> Result<PresentationReport, Md2PubError> {
    let input = input.as_ref();
    let out_dir = out_dir.as_ref();

    let content = read_markdown(input)?;
    let slides = slides::split_slides(&content, config.min_chunk_len);
    if slides.is_empty() {
        return Err(Md2PubError::NoSlides {
            path: input.to_path_buf(),
        });
    }

    std::fs::create_dir_all(out_dir).map_err(|e| Md2PubError::OutputWriteFailed {
        path: out_dir.to_path_buf(),
        source: e,
    })?;

    let stem = file_stem(input);
    let deck_path = out_dir.join(format!("{stem}.pptx"));
    let pdf_path = out_dir.join(format!("{stem}.pdf"));

    let mut report = PresentationReport {
        slides: slides.len(),
        deck: None,
        pdf: None,
        pdf_skipped: 0,
        errors: Vec::new(),
    };

    match deck::write_deck(&slides, &deck_path) {
        Ok(d) => {
            info!("{} -> {} ({} slides)", input.display(), deck_path.display(), d.slides);
            report.deck = Some(deck_path);
        }
        Err(e) => {
            error!("{}", e);
            report.errors.push(e.to_string());
        }
    }

    let blocks = overview_blocks(&config.cover, &slides);
    let opts = PdfOptions {
        margins: crate::config::PageMargins::presentation(),
        styles: StyleSheet::presentation(),
        title: cover_title(&config.cover, &slides).to_string(),
        font_dir: config.font_dir.clone(),
    };
    match pdf::write_pdf(&blocks, &pdf_path, &opts) {
        Ok(p) => {
            info!("{} -> {}", input.display(), pdf_path.display());
            report.pdf = Some(pdf_path);
            report.pdf_skipped = p.skipped;
        }
        Err(e) => {
            error!("{}", e);
            report.errors.push(e.to_string());
        }
    }

    Ok(report)
}

fn cover_title<'a>(cover: &'a CoverInfo, slides: &'a [Slide]) -> &'a str {
    match &cover.title {
        Some(t) => t.as_str(),
        None => slides[0].title.as_str(),
    }
}

/// Build the PDF overview's block list: a cover page, then one page per
/// slide after the first (the first slide's content is subsumed by the
/// cover).
fn overview_blocks(cover: &CoverInfo, slides: &[Slide]) -> Vec<StyledBlock> {
    let mut blocks = Vec::new();

    // Cover page.
    blocks.push(StyledBlock::Spacer(2.0));
    blocks.push(StyledBlock::text(
        inline::escape_reserved(cover_title(cover, slides)),
        TextClass::Title,
    ));
    blocks.push(StyledBlock::Spacer(0.3));
    if let Some(subtitle) = &cover.subtitle {
        blocks.push(StyledBlock::text(
            inline::escape_reserved(subtitle),
            TextClass::Body,
        ));
        blocks.push(StyledBlock::Spacer(0.5));
    }
    if let Some(attribution) = &cover.attribution {
        blocks.push(StyledBlock::text(
            inline::escape_reserved(attribution),
            TextClass::Body,
        ));
    }
    blocks.push(StyledBlock::PageBreak);

    // One section per remaining slide, page-broken between them.
    for (i, slide) in slides.iter().skip(1).enumerate() {
        if i > 0 {
            blocks.push(StyledBlock::PageBreak);
        }
        blocks.push(StyledBlock::text(
            inline::escape_reserved(&slide.title),
            TextClass::H1,
        ));
        blocks.push(StyledBlock::Spacer(0.2));
        for line in slide.content.lines() {
            let line = line.trim();
            if line.is_empty() {
                blocks.push(StyledBlock::Spacer(0.1));
                continue;
            }
            // Slide text renders as plain runs, so emphasis markers are
            // stripped here just like in the deck rendition.
            let line = inline::strip_markup(line);
            if line.starts_with(['-', '*', '\u{2022}']) {
                let text = line.trim_start_matches(['-', '*', '\u{2022}', ' ']).trim();
                blocks.push(StyledBlock::text(
                    format!("  \u{2022} {}", inline::escape_reserved(text)),
                    TextClass::Bullet,
                ));
            } else {
                blocks.push(StyledBlock::text(
                    inline::escape_reserved(&line),
                    TextClass::Body,
                ));
            }
        }
        blocks.push(StyledBlock::Spacer(0.3));
    }

    blocks
}

// ── Shared helpers ───────────────────────────────────────────────────────

fn read_markdown(path: &Path) -> Result<String, Md2PubError> {
    if !path.is_file() {
        return Err(Md2PubError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|e| Md2PubError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_slides() -> Vec<Slide> {
        vec![
            Slide {
                title: "Atlas Enterprise".into(),
                content: "A mapping platform".into(),
            },
            Slide {
                title: "Features".into(),
                content: "- Fast\n- Reliable".into(),
            },
            Slide {
                title: "Pricing & Terms".into(),
                content: "Contact sales".into(),
            },
        ]
    }

    #[test]
    fn missing_document_input_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_document(
            dir.path().join("nope.md"),
            dir.path().join("nope.pdf"),
            &DocConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Md2PubError::FileNotFound { .. }));
    }

    #[test]
    fn batch_counts_missing_files_without_propagating() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = vec![dir.path().join("a.md"), dir.path().join("b.md")];
        let report = convert_documents(&inputs, dir.path().join("out"), &DocConfig::default());
        assert_eq!(report.failures(), 2);
        assert_eq!(report.succeeded(), 0);
        assert!(report.failed[0].error.contains("a.md"));
    }

    #[test]
    fn missing_presentation_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_presentation(
            dir.path().join("deck.md"),
            dir.path().join("out"),
            &DeckConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Md2PubError::FileNotFound { .. }));
    }

    #[test]
    fn presentation_without_headings_is_no_slides() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("deck.md");
        std::fs::write(&input, "no headings anywhere\njust text\n").unwrap();
        let err =
            convert_presentation(&input, dir.path().join("out"), &DeckConfig::default())
                .unwrap_err();
        assert!(matches!(err, Md2PubError::NoSlides { .. }));
    }

    #[test]
    fn cover_title_falls_back_to_first_slide() {
        let slides = sample_slides();
        assert_eq!(cover_title(&CoverInfo::default(), &slides), "Atlas Enterprise");

        let cover = CoverInfo {
            title: Some("Override".into()),
            ..CoverInfo::default()
        };
        assert_eq!(cover_title(&cover, &slides), "Override");
    }

    #[test]
    fn overview_opens_with_cover_then_page_break() {
        let cover = CoverInfo {
            title: Some("Atlas".into()),
            subtitle: Some("Maps for teams".into()),
            attribution: Some("Prepared by the Atlas team".into()),
        };
        let blocks = overview_blocks(&cover, &sample_slides());
        assert_eq!(blocks[0], StyledBlock::Spacer(2.0));
        assert_eq!(blocks[1], StyledBlock::text("Atlas", TextClass::Title));
        assert_eq!(blocks[2], StyledBlock::Spacer(0.3));
        assert_eq!(
            blocks[3],
            StyledBlock::text("Maps for teams", TextClass::Body)
        );
        assert_eq!(blocks[4], StyledBlock::Spacer(0.5));
        assert_eq!(
            blocks[5],
            StyledBlock::text("Prepared by the Atlas team", TextClass::Body)
        );
        assert_eq!(blocks[6], StyledBlock::PageBreak);
    }

    #[test]
    fn overview_skips_first_slide_content() {
        let blocks = overview_blocks(&CoverInfo::default(), &sample_slides());
        assert!(!blocks
            .iter()
            .any(|b| matches!(b, StyledBlock::Text { markup, .. } if markup.contains("mapping platform"))));
        assert!(blocks
            .iter()
            .any(|b| *b == StyledBlock::text("Features", TextClass::H1)));
    }

    #[test]
    fn overview_bullets_get_glyph_prefix() {
        let blocks = overview_blocks(&CoverInfo::default(), &sample_slides());
        assert!(blocks
            .iter()
            .any(|b| *b == StyledBlock::text("  \u{2022} Fast", TextClass::Bullet)));
    }

    #[test]
    fn overview_strips_emphasis_markers() {
        let slides = vec![
            Slide {
                title: "Cover".into(),
                content: String::new(),
            },
            Slide {
                title: "Sync".into(),
                content: "- **Fast** sync\n*Offline* ready".into(),
            },
        ];
        let blocks = overview_blocks(&CoverInfo::default(), &slides);
        assert!(blocks
            .iter()
            .any(|b| *b == StyledBlock::text("  \u{2022} Fast sync", TextClass::Bullet)));
        assert!(blocks
            .iter()
            .any(|b| *b == StyledBlock::text("Offline ready", TextClass::Body)));
        let leaked: Vec<_> = blocks
            .iter()
            .filter_map(|b| match b {
                StyledBlock::Text { markup, .. } if markup.contains('*') => Some(markup.clone()),
                _ => None,
            })
            .collect();
        assert!(leaked.is_empty(), "markers reached the PDF writer: {leaked:?}");
    }

    #[test]
    fn overview_escapes_reserved_characters() {
        let blocks = overview_blocks(&CoverInfo::default(), &sample_slides());
        assert!(blocks
            .iter()
            .any(|b| *b == StyledBlock::text("Pricing &amp; Terms", TextClass::H1)));
    }

    #[test]
    fn overview_page_breaks_between_sections_not_after_last() {
        let blocks = overview_blocks(&CoverInfo::default(), &sample_slides());
        let breaks = blocks
            .iter()
            .filter(|b| **b == StyledBlock::PageBreak)
            .count();
        // One after the cover, one between the two content sections.
        assert_eq!(breaks, 2);
        assert_ne!(blocks.last(), Some(&StyledBlock::PageBreak));
    }

    #[test]
    fn deck_rendition_survives_without_fonts() {
        // The PPTX writer needs no font files, so at least the deck half of
        // a presentation conversion must succeed on a bare system.
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pitch.md");
        std::fs::write(
            &input,
            "## Atlas Enterprise\nA mapping platform\n\n---\n\n## Features\n- Fast\n- Reliable\n",
        )
        .unwrap();
        let out = dir.path().join("out");
        let report =
            convert_presentation(&input, &out, &DeckConfig::default()).unwrap();
        assert_eq!(report.slides, 2);
        assert_eq!(report.deck.as_deref(), Some(out.join("pitch.pptx").as_path()));
        assert!(out.join("pitch.pptx").is_file());
    }
}

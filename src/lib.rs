//! # md2pub
//!
//! Convert Markdown documents to distributable PDF and PPTX files.
//!
//! ## Why this crate?
//!
//! Product and documentation teams often keep their source material in
//! Markdown but need to hand out PDFs and slide decks. Full typesetting
//! toolchains (LaTeX, pandoc + a PPTX writer) are heavy dependencies for
//! what is, at heart, a line-by-line conversion. This crate does the small
//! job well: classify each Markdown line, resolve inline emphasis, and
//! emit styled paragraphs into a paged PDF or an OOXML slide deck.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown
//!  │
//!  ├─ docs pipeline ──▶ classify ──▶ styled blocks ──▶ PDF writer ──▶ .pdf
//!  │                    (per line)   (order-preserving)  (genpdf)
//!  │
//!  └─ deck pipeline ──▶ split slides ──▶ Slide{title, content}
//!                        (\n---\n)        ├──▶ deck writer (zip/OOXML) ──▶ .pptx
//!                                         └──▶ cover + sections ──▶ PDF writer ──▶ .pdf
//! ```
//!
//! Conversion is a single forward pass: block order in the output always
//! matches line order in the input. There is no concurrency and no retry
//! logic — each output file is built start-to-finish before the next.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2pub::{convert_document, DocConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DocConfig::default();
//!     let report = convert_document("OVERVIEW.md", "out/OVERVIEW.pdf", &config)?;
//!     eprintln!("{} blocks emitted, {} skipped", report.emitted, report.skipped);
//!     Ok(())
//! }
//! ```
//!
//! ## Error model
//!
//! Two tiers, mirrored in two types:
//!
//! * [`BlockError`] — a single paragraph the renderer rejects (malformed
//!   inline markup). Logged and skipped; the rest of the document is kept.
//! * [`Md2PubError`] — the whole file's conversion failed (missing input,
//!   no usable fonts, final render error). No partial output file is left
//!   behind.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2pub` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod fonts;
pub mod pipeline;
pub mod render;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{CoverInfo, DeckConfig, DeckConfigBuilder, DocConfig, DocConfigBuilder};
pub use convert::{
    convert_document, convert_documents, convert_presentation, BatchReport, DocReport,
    PresentationReport,
};
pub use error::{BlockError, Md2PubError};
pub use pipeline::classify::{StyledBlock, TextClass};
pub use pipeline::slides::Slide;

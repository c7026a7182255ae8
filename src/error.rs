//! Error types for the md2pub library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Md2PubError`] — **Fatal for one file**: the conversion of that file
//!   cannot proceed or its output cannot be written (missing input, no
//!   usable fonts, final render failure). Returned as `Err(Md2PubError)`
//!   from the top-level `convert*` functions. The batch document pipeline
//!   catches these per file and keeps going.
//!
//! * [`BlockError`] — **Non-fatal**: a single styled block failed (the
//!   inline-markup dialect did not parse). The block is dropped, a warning
//!   is logged, and conversion continues with the next line. Counted in
//!   the per-file report so data loss is visible rather than silent.
//!
//! The separation lets callers decide their own tolerance: the CLI treats
//! per-file failures as a counter and still exits 0 for the docs pipeline,
//! while a missing presentation input is fatal to the process.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal (per-file) errors returned by the md2pub library.
///
/// Block-level failures use [`BlockError`] and are reported through the
/// conversion reports rather than propagated here.
#[derive(Debug, Error)]
pub enum Md2PubError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Markdown file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Input file exists but could not be read as UTF-8 text.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Font errors ───────────────────────────────────────────────────────
    /// No usable TrueType font family was found on the system.
    #[error(
        "No usable font family found.\nSearched: {searched:?}\n\
Install the Liberation or DejaVu fonts, or point --font-dir at a directory\n\
containing <Name>-Regular.ttf / -Bold.ttf / -Italic.ttf / -BoldItalic.ttf."
    )]
    FontsNotFound { searched: Vec<PathBuf> },

    // ── Render errors ─────────────────────────────────────────────────────
    /// The page-layout library rejected the assembled document.
    ///
    /// The entire file's output is abandoned; no partial PDF is written.
    #[error("Failed to render PDF '{path}': {detail}")]
    RenderFailed { path: PathBuf, detail: String },

    /// The slide-deck package could not be assembled or written.
    #[error("Failed to build slide deck '{path}': {detail}")]
    DeckBuildFailed { path: PathBuf, detail: String },

    /// The presentation markdown produced no usable slides.
    #[error("No slides found in '{path}': every chunk was empty or had no heading line")]
    NoSlides { path: PathBuf },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create the output directory or write an output file.
    #[error("Failed to write output '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single styled block.
///
/// Produced when the rich-markup parser rejects a block's text. The caller
/// logs it and continues with the next block — the explicit form of the
/// original tool's catch-and-drop policy.
#[derive(Debug, Clone, Error)]
pub enum BlockError {
    /// The inline-markup dialect did not parse (unbalanced or unknown tag).
    #[error("malformed inline markup: {detail}")]
    MalformedMarkup { detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fonts_not_found_display_lists_paths() {
        let e = Md2PubError::FontsNotFound {
            searched: vec![PathBuf::from("/usr/share/fonts")],
        };
        let msg = e.to_string();
        assert!(msg.contains("/usr/share/fonts"), "got: {msg}");
        assert!(msg.contains("--font-dir"));
    }

    #[test]
    fn render_failed_display() {
        let e = Md2PubError::RenderFailed {
            path: PathBuf::from("out/doc.pdf"),
            detail: "page overflow".into(),
        };
        assert!(e.to_string().contains("out/doc.pdf"));
        assert!(e.to_string().contains("page overflow"));
    }

    #[test]
    fn malformed_markup_display_carries_detail() {
        let e = BlockError::MalformedMarkup {
            detail: "unclosed <b>".into(),
        };
        assert!(e.to_string().contains("unclosed <b>"));
    }
}

//! End-to-end pipeline tests: real Markdown files in, real output files out.
//!
//! PDF assertions need the Liberation fonts on disk; those tests skip
//! (with a note) on systems without them instead of failing. The PPTX
//! deck embeds no font files, so the deck tests always run.

use md2pub::{convert_document, convert_documents, convert_presentation, DeckConfig, DocConfig};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Skip the current test when the system fonts the PDF writer needs are
/// not installed.
macro_rules! skip_unless_fonts {
    () => {
        if !md2pub::fonts::fonts_available() {
            eprintln!("skipping: Liberation fonts not installed");
            return;
        }
    };
}

const DOC_MD: &str = "\
# Atlas Enterprise Overview

Atlas is a mapping platform for **field teams**.

## Capabilities

- Offline-first sync
- *Sub-second* tile rendering
1. Install the agent
2. Pair the device

---

### Quick start

```
atlas login
atlas sync --all
```

Questions? Contact sales & support.
";

const DECK_MD: &str = "\
## Atlas Enterprise
A mapping platform for field teams
Built to work offline

---

## Why Atlas

- **Fast**: sub-second tiles
- Reliable sync
- Works offline

---

## Pricing & Terms

Contact sales for a quote
";

#[test]
fn document_conversion_produces_a_pdf() {
    skip_unless_fonts!();

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("OVERVIEW.md");
    std::fs::write(&input, DOC_MD).unwrap();
    let output = dir.path().join("OVERVIEW.pdf");

    let report = convert_document(&input, &output, &DocConfig::default()).unwrap();
    assert!(report.emitted > 0, "expected content blocks, got none");
    assert_eq!(report.skipped, 0, "well-formed input must not drop blocks");

    let mut magic = [0u8; 5];
    File::open(&output).unwrap().read_exact(&mut magic).unwrap();
    assert_eq!(&magic, b"%PDF-", "output is not a PDF");
}

#[test]
fn batch_keeps_going_past_a_missing_file() {
    skip_unless_fonts!();

    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.md");
    std::fs::write(&good, DOC_MD).unwrap();
    let missing = dir.path().join("missing.md");
    let out = dir.path().join("dist");

    let inputs: Vec<PathBuf> = vec![good, missing];
    let report = convert_documents(&inputs, &out, &DocConfig::default());

    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failures(), 1);
    assert!(out.join("good.pdf").is_file());
    assert!(report.failed[0].error.contains("missing.md"));
}

#[test]
fn presentation_always_yields_a_deck() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pitch.md");
    std::fs::write(&input, DECK_MD).unwrap();
    let out = dir.path().join("dist");

    let report = convert_presentation(&input, &out, &DeckConfig::default()).unwrap();
    assert_eq!(report.slides, 3);

    let deck_path = report.deck.as_ref().expect("deck rendition failed");
    let mut archive = zip::ZipArchive::new(File::open(deck_path).unwrap()).unwrap();
    for name in [
        "[Content_Types].xml",
        "_rels/.rels",
        "ppt/presentation.xml",
        "ppt/slideMasters/slideMaster1.xml",
        "ppt/slideLayouts/slideLayout1.xml",
        "ppt/theme/theme1.xml",
        "ppt/slides/slide1.xml",
        "ppt/slides/slide2.xml",
        "ppt/slides/slide3.xml",
    ] {
        assert!(archive.by_name(name).is_ok(), "deck is missing part {name}");
    }

    let mut cover = String::new();
    archive
        .by_name("ppt/slides/slide1.xml")
        .unwrap()
        .read_to_string(&mut cover)
        .unwrap();
    assert!(cover.contains("<a:t>Atlas Enterprise</a:t>"));
    assert!(cover.contains(r#"val="F5F5F5""#), "cover keeps the grey fill");

    let mut features = String::new();
    archive
        .by_name("ppt/slides/slide2.xml")
        .unwrap()
        .read_to_string(&mut features)
        .unwrap();
    assert!(features.contains("<a:t>Fast: sub-second tiles</a:t>"), "emphasis stripped");
    assert!(features.contains(r#"lvl="1""#), "bullets indent one level");
}

#[test]
fn presentation_also_yields_a_pdf_overview() {
    skip_unless_fonts!();

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pitch.md");
    std::fs::write(&input, DECK_MD).unwrap();
    let out = dir.path().join("dist");

    let config = DeckConfig::builder()
        .cover_subtitle("A mapping platform")
        .cover_attribution("Prepared by the Atlas team")
        .build()
        .unwrap();
    let report = convert_presentation(&input, &out, &config).unwrap();

    assert!(report.errors.is_empty(), "renditions failed: {:?}", report.errors);
    let pdf_path = report.pdf.as_ref().expect("pdf rendition failed");

    let mut magic = [0u8; 5];
    File::open(pdf_path).unwrap().read_exact(&mut magic).unwrap();
    assert_eq!(&magic, b"%PDF-", "overview is not a PDF");
}

#[test]
fn malformed_block_is_skipped_and_counted() {
    skip_unless_fonts!();

    use md2pub::config::PageMargins;
    use md2pub::render::pdf::{write_pdf, PdfOptions, StyleSheet};
    use md2pub::{StyledBlock, TextClass};

    // One block with an unclosed tag among well-formed neighbours: the bad
    // block is dropped and counted, the rest of the document still renders.
    let blocks = vec![
        StyledBlock::text("Good <b>opening</b> paragraph", TextClass::Body),
        StyledBlock::text("dangling <b>bold", TextClass::Body),
        StyledBlock::text("\u{2022} closing bullet", TextClass::Bullet),
    ];

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("partial.pdf");
    let opts = PdfOptions {
        margins: PageMargins::default(),
        styles: StyleSheet::document(),
        title: "partial".into(),
        font_dir: None,
    };

    let report = write_pdf(&blocks, &output, &opts).unwrap();
    assert_eq!(report.skipped, 1, "the malformed block must be counted");
    assert_eq!(report.emitted, 2, "well-formed blocks must survive");

    let mut magic = [0u8; 5];
    File::open(&output).unwrap().read_exact(&mut magic).unwrap();
    assert_eq!(&magic, b"%PDF-", "output is not a PDF");
}

#[test]
fn empty_markdown_still_converts() {
    skip_unless_fonts!();

    // A file of nothing but blank lines has no content blocks, but the
    // conversion itself must still succeed and write a valid (empty) PDF.
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.md");
    std::fs::write(&input, "\n\n\n").unwrap();
    let output = dir.path().join("empty.pdf");

    let report = convert_document(&input, &output, &DocConfig::default()).unwrap();
    assert_eq!(report.emitted, 0);
    assert!(output.is_file());
}

#[test]
fn unreadable_utf8_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("binary.md");
    std::fs::write(&input, [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let err = convert_document(
        &input,
        dir.path().join("binary.pdf"),
        &DocConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, md2pub::Md2PubError::ReadFailed { .. }));
}

//! CLI binary for md2pub.
//!
//! A thin shim over the library crate that maps CLI flags to the pipeline
//! configs and prints results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use md2pub::{convert_documents, convert_presentation, DeckConfig, DocConfig};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert documents to PDFs (one per input, named after the input stem)
  md2pub docs OVERVIEW.md PRICING.md -o dist/

  # Convert everything the shell can glob
  md2pub docs docs/*.md -o dist/

  # Build a slide deck (PPTX + PDF overview) from presentation markdown
  md2pub deck pitch.md -o dist/

  # Deck with explicit cover text on the PDF overview
  md2pub deck pitch.md -o dist/ \
      --cover-title "Atlas Enterprise" \
      --cover-subtitle "A mapping platform for field teams" \
      --cover-attribution "Prepared by the Atlas team"

  # Machine-readable summary
  md2pub docs OVERVIEW.md -o dist/ --json

MARKDOWN DIALECT:
  Line-oriented: # / ## / ### headings, - * + bullets, numbered lists,
  ``` code fences, --- rules, and **bold** / *italic* / `code` emphasis.
  The first # heading becomes the document title. Presentation files are
  split into slides on --- separator lines.

FONTS:
  PDF output embeds TrueType fonts. The Liberation family is probed in
  the usual system directories; point --font-dir at a directory holding
  <Name>-Regular.ttf / -Bold.ttf / -Italic.ttf / -BoldItalic.ttf to use
  something else. The PPTX deck names fonts by family and needs no files.

ENVIRONMENT VARIABLES:
  MD2PUB_FONT_DIR   Default for --font-dir
  MD2PUB_OUT_DIR    Default for --out-dir
  RUST_LOG          Override the tracing filter (e.g. md2pub=debug)

EXIT STATUS:
  docs   always exits 0; per-file failures are counted in the summary.
  deck   exits non-zero when the input is unusable or both renditions fail.
"#;

/// Convert Markdown documents to distributable PDF and PPTX files.
#[derive(Parser, Debug)]
#[command(
    name = "md2pub",
    version,
    about = "Convert Markdown documents to distributable PDF and PPTX files",
    long_about = "Convert hand-written Markdown briefs to paged PDFs, and presentation \
Markdown to a PPTX slide deck plus a cover-paged PDF overview. Line-oriented: every \
heading, bullet, fence, and rule sits on its own line.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory containing the TrueType fonts for PDF output.
    #[arg(long, global = true, env = "MD2PUB_FONT_DIR")]
    font_dir: Option<PathBuf>,

    /// Output a JSON summary instead of the human-readable one.
    #[arg(long, global = true, env = "MD2PUB_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "MD2PUB_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "MD2PUB_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert Markdown documents to PDFs, one per input file.
    Docs {
        /// Markdown files to convert.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory the PDFs are written into (created if missing).
        #[arg(short, long, env = "MD2PUB_OUT_DIR", default_value = "dist")]
        out_dir: PathBuf,

        /// Uniform page margin in inches (0–4).
        #[arg(long, default_value_t = 1.0)]
        margin: f64,
    },

    /// Convert presentation Markdown to a PPTX deck plus a PDF overview.
    Deck {
        /// Presentation Markdown file (slides separated by --- lines).
        file: PathBuf,

        /// Directory the deck and overview are written into.
        #[arg(short, long, env = "MD2PUB_OUT_DIR", default_value = "dist")]
        out_dir: PathBuf,

        /// Cover-page title for the PDF overview (default: first slide's title).
        #[arg(long)]
        cover_title: Option<String>,

        /// Cover-page subtitle line.
        #[arg(long)]
        cover_subtitle: Option<String>,

        /// Cover-page attribution line ("Prepared by …").
        #[arg(long)]
        cover_attribution: Option<String>,

        /// Minimum chunk length for a slide candidate; shorter chunks are
        /// treated as separator artifacts and dropped.
        #[arg(long, default_value_t = 10)]
        min_chunk_len: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The CLI prints its own per-file lines, so the default filter only
    // surfaces library warnings (skipped blocks, dropped chunks).
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let opts = GlobalOpts {
        font_dir: cli.font_dir,
        json: cli.json,
        quiet: cli.quiet,
    };

    match cli.command {
        Command::Docs {
            files,
            out_dir,
            margin,
        } => run_docs(&opts, files, out_dir, margin),
        Command::Deck {
            file,
            out_dir,
            cover_title,
            cover_subtitle,
            cover_attribution,
            min_chunk_len,
        } => run_deck(
            &opts,
            file,
            out_dir,
            cover_title,
            cover_subtitle,
            cover_attribution,
            min_chunk_len,
        ),
    }
}

/// The global flags the subcommand handlers need.
struct GlobalOpts {
    font_dir: Option<PathBuf>,
    json: bool,
    quiet: bool,
}

fn run_docs(opts: &GlobalOpts, files: Vec<PathBuf>, out_dir: PathBuf, margin: f64) -> Result<()> {
    let mut builder = DocConfig::builder().margins(md2pub::config::PageMargins::uniform(margin));
    if let Some(dir) = &opts.font_dir {
        builder = builder.font_dir(dir);
    }
    let config = builder.build().context("Invalid configuration")?;

    let report = convert_documents(&files, &out_dir, &config);

    if opts.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise summary")?
        );
        return Ok(());
    }

    if !opts.quiet {
        for doc in &report.converted {
            let detail = if doc.skipped > 0 {
                format!(
                    "{} blocks, {}",
                    doc.emitted,
                    red(&format!("{} skipped", doc.skipped))
                )
            } else {
                format!("{} blocks", doc.emitted)
            };
            eprintln!(
                "  {} {}  →  {}  {}",
                green("✓"),
                doc.input.display(),
                bold(&doc.output.display().to_string()),
                dim(&detail),
            );
        }
        for failure in &report.failed {
            eprintln!(
                "  {} {}  {}",
                red("✗"),
                failure.input.display(),
                red(&failure.error.replace('\n', " ")),
            );
        }

        let failed = report.failures();
        if failed == 0 {
            eprintln!(
                "{} {} document(s) converted",
                green("✔"),
                bold(&report.succeeded().to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} document(s) converted  ({} failed)",
                if report.succeeded() == 0 {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&report.succeeded().to_string()),
                files.len(),
                red(&failed.to_string()),
            );
        }
    }

    // Per-file failures are a counter, not an exit code: a batch where one
    // brief is missing still produced every other PDF.
    Ok(())
}

fn run_deck(
    opts: &GlobalOpts,
    file: PathBuf,
    out_dir: PathBuf,
    cover_title: Option<String>,
    cover_subtitle: Option<String>,
    cover_attribution: Option<String>,
    min_chunk_len: usize,
) -> Result<()> {
    let mut builder = DeckConfig::builder().min_chunk_len(min_chunk_len);
    if let Some(dir) = &opts.font_dir {
        builder = builder.font_dir(dir);
    }
    if let Some(t) = cover_title {
        builder = builder.cover_title(t);
    }
    if let Some(s) = cover_subtitle {
        builder = builder.cover_subtitle(s);
    }
    if let Some(a) = cover_attribution {
        builder = builder.cover_attribution(a);
    }
    let config = builder.build().context("Invalid configuration")?;

    let report = convert_presentation(&file, &out_dir, &config)
        .with_context(|| format!("Failed to convert {}", file.display()))?;

    if opts.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise summary")?
        );
    } else if !opts.quiet {
        eprintln!(
            "{} {} slide(s) parsed from {}",
            cyan("◆"),
            bold(&report.slides.to_string()),
            file.display()
        );
        if let Some(deck) = &report.deck {
            eprintln!("  {} deck      →  {}", green("✓"), bold(&deck.display().to_string()));
        }
        if let Some(pdf) = &report.pdf {
            let detail = if report.pdf_skipped > 0 {
                red(&format!("{} block(s) skipped", report.pdf_skipped))
            } else {
                String::new()
            };
            eprintln!(
                "  {} overview  →  {}  {}",
                green("✓"),
                bold(&pdf.display().to_string()),
                dim(&detail),
            );
        }
        for err in &report.errors {
            eprintln!("  {} {}", red("✗"), red(&err.replace('\n', " ")));
        }
    }

    if report.deck.is_none() && report.pdf.is_none() {
        anyhow::bail!("both renditions failed");
    }
    Ok(())
}

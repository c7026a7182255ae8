//! Font discovery for the PDF writer.
//!
//! genpdf embeds TrueType fonts into the output, so the writer needs real
//! `.ttf` files on disk, named by the `<Family>-<Variant>.ttf` convention
//! (`-Regular`, `-Bold`, `-Italic`, `-BoldItalic`). The Liberation family
//! follows that convention and ships with most Linux distributions; we
//! probe its usual directories and fall back to an explicit `--font-dir`.
//!
//! Text styles need the proportional family; code blocks and inline code
//! need the monospace one. The two may live in different directories
//! (Fedora splits them), so each is searched independently.

use crate::error::Md2PubError;
use genpdf::fonts::{self, FontData, FontFamily};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directories probed for font families, in order.
const SEARCH_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/liberation-fonts",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/liberation-mono",
    "/usr/local/share/fonts/liberation",
];

const SANS_FAMILY: &str = "LiberationSans";
const MONO_FAMILY: &str = "LiberationMono";

/// The two font families every PDF rendition needs.
pub struct FontSet {
    /// Proportional family for titles, headings, and body text.
    pub sans: FontFamily<FontData>,
    /// Monospace family for code blocks and inline code spans.
    pub mono: FontFamily<FontData>,
}

/// Load the sans and mono families, preferring `override_dir` when given.
pub fn load_fonts(override_dir: Option<&Path>) -> Result<FontSet, Md2PubError> {
    let sans_dir = locate_family(override_dir, SANS_FAMILY)?;
    let mono_dir = locate_family(override_dir, MONO_FAMILY)?;
    debug!(
        "fonts: {} from {}, {} from {}",
        SANS_FAMILY,
        sans_dir.display(),
        MONO_FAMILY,
        mono_dir.display()
    );

    let sans = fonts::from_files(&sans_dir, SANS_FAMILY, None)
        .map_err(|e| Md2PubError::Internal(format!("loading {}: {}", SANS_FAMILY, e)))?;
    let mono = fonts::from_files(&mono_dir, MONO_FAMILY, None)
        .map_err(|e| Md2PubError::Internal(format!("loading {}: {}", MONO_FAMILY, e)))?;
    Ok(FontSet { sans, mono })
}

/// True when both families can be found without an override directory.
///
/// Used by integration tests to skip PDF rendering on systems without the
/// Liberation fonts instead of failing.
pub fn fonts_available() -> bool {
    locate_family(None, SANS_FAMILY).is_ok() && locate_family(None, MONO_FAMILY).is_ok()
}

fn locate_family(override_dir: Option<&Path>, family: &str) -> Result<PathBuf, Md2PubError> {
    let regular = format!("{family}-Regular.ttf");

    let mut searched = Vec::new();
    if let Some(dir) = override_dir {
        if dir.join(&regular).exists() {
            return Ok(dir.to_path_buf());
        }
        searched.push(dir.to_path_buf());
    }
    for dir in SEARCH_DIRS {
        let dir = PathBuf::from(dir);
        if dir.join(&regular).exists() {
            return Ok(dir);
        }
        searched.push(dir);
    }

    Err(Md2PubError::FontsNotFound { searched })
}

//! Inline markup transforms: emphasis markers → the renderer's tag dialect.
//!
//! ## The escaping order
//!
//! The output dialect uses `<b>`, `<i>`, `<code>` tags, so raw `&`, `<`,
//! `>` in the source text must be entity-escaped or the span parser would
//! misread them. Order matters: escaping *after* tag insertion would
//! corrupt the just-inserted delimiters. We therefore escape the raw text
//! first and only then run the marker substitutions — the inserted tag
//! delimiters are literal `<`/`>` that are never re-escaped.
//!
//! ## Supported markers
//!
//! `***x***` (bold italic), `**x**` (bold), `*x*` (italic), `` `x` ``
//! (monospace). Matching is non-greedy with a no-delimiter-inside
//! character class, so nested or overlapping markers are not supported.
//! That is a documented limitation of the dialect, not a bug to fix:
//! the character class is what keeps `**a** and **b**` from matching as
//! one giant bold span.

use once_cell::sync::Lazy;
use regex::Regex;

// Order matters within to_markup: the triple-asterisk rule must run before
// the double, and the double before the single, or `***x***` degrades into
// an empty bold wrapping an italic asterisk.
static RE_BOLD_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*\*([^*]+)\*\*\*").unwrap());
static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static RE_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static RE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Escape the characters the tag dialect reserves: `&`, `<`, `>`.
pub fn escape_reserved(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Convert one line of raw Markdown text into the tag dialect consumed by
/// the rich-text span parser.
///
/// Reserved characters in the source text come out entity-escaped; the
/// emphasis tags themselves are the only literal `<`/`>` in the result.
pub fn to_markup(text: &str) -> String {
    let escaped = escape_reserved(text);
    let s = RE_BOLD_ITALIC.replace_all(&escaped, "<b><i>$1</i></b>");
    let s = RE_BOLD.replace_all(&s, "<b>$1</b>");
    let s = RE_ITALIC.replace_all(&s, "<i>$1</i>");
    let s = RE_CODE.replace_all(&s, "<code>$1</code>");
    s.into_owned()
}

/// Remove emphasis markers entirely, keeping the text between them.
///
/// The slide-deck writer uses plain runs with per-box formatting, so
/// `**Key point**` should surface as `Key point`, not as literal asterisks.
pub fn strip_markup(text: &str) -> String {
    let s = RE_BOLD.replace_all(text, "$1");
    let s = RE_ITALIC.replace_all(&s, "$1");
    let s = RE_CODE.replace_all(&s, "$1");
    s.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_becomes_b_tag() {
        assert_eq!(to_markup("a **bold** word"), "a <b>bold</b> word");
    }

    #[test]
    fn italic_becomes_i_tag() {
        assert_eq!(to_markup("an *italic* word"), "an <i>italic</i> word");
    }

    #[test]
    fn bold_italic_nests_tags() {
        assert_eq!(to_markup("***loud***"), "<b><i>loud</i></b>");
    }

    #[test]
    fn inline_code_becomes_code_tag() {
        assert_eq!(to_markup("run `cargo doc` now"), "run <code>cargo doc</code> now");
    }

    #[test]
    fn reserved_chars_inside_emphasis_are_escaped() {
        assert_eq!(to_markup("**a < b & c > d**"), "<b>a &lt; b &amp; c &gt; d</b>");
    }

    #[test]
    fn reserved_chars_outside_emphasis_are_escaped() {
        assert_eq!(to_markup("5 < 6 && 7 > 2"), "5 &lt; 6 &amp;&amp; 7 &gt; 2");
    }

    #[test]
    fn adjacent_bold_spans_stay_separate() {
        // The [^*]+ class prevents greedy matching across the gap.
        assert_eq!(
            to_markup("**a** and **b**"),
            "<b>a</b> and <b>b</b>"
        );
    }

    #[test]
    fn nested_markers_are_not_supported() {
        // Documented limitation: the inner asterisk breaks the outer match.
        let out = to_markup("**outer *inner* outer**");
        assert!(!out.contains("<b>outer <i>inner</i> outer</b>"), "got: {out}");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(to_markup("nothing special here"), "nothing special here");
    }

    #[test]
    fn strip_markup_removes_all_markers() {
        assert_eq!(strip_markup("**Key** *point* `code`"), "Key point code");
    }
}

//! Markdown line classifier: one forward pass, lines in → styled blocks out.
//!
//! The classifier is deliberately line-oriented rather than a real Markdown
//! parser. The documents this tool targets are hand-written briefs where
//! every construct sits on its own line; a full CommonMark AST would buy
//! nothing but indirection.
//!
//! State is minimal and scoped to a single document's conversion:
//!
//! * a fence flag plus an accumulator for pending code lines, and
//! * a two-state title machine ([`TitleState`]) — the first level-1 heading
//!   becomes the document title (larger style, surrounding spacers); every
//!   later `# ` heading is an ordinary section header.
//!
//! Block order in the output exactly matches line order in the input.

use crate::pipeline::inline;
use tracing::warn;

/// Style identifier for a text-carrying block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextClass {
    /// Document title — the first level-1 heading only.
    Title,
    /// Section header (`# ` after the title, or promoted slide titles).
    H1,
    H2,
    H3,
    /// Ordinary paragraph text.
    Body,
    /// Bullet or numbered list item.
    Bullet,
}

/// An emission-ready unit consumed once, in order, by a document writer.
#[derive(Debug, Clone, PartialEq)]
pub enum StyledBlock {
    /// Vertical spacing, height in inches.
    Spacer(f64),
    /// Thin full-width horizontal rule.
    Rule,
    /// Hard page break (used by the presentation PDF).
    PageBreak,
    /// Verbatim fenced code: interior lines joined, no markup resolution.
    Code(String),
    /// Text with inline emphasis resolved to the tag dialect.
    Text { markup: String, class: TextClass },
}

impl StyledBlock {
    /// Convenience constructor for a tagged text block.
    pub fn text(markup: impl Into<String>, class: TextClass) -> Self {
        StyledBlock::Text {
            markup: markup.into(),
            class,
        }
    }
}

/// One-shot title flag, threaded through the loop as an explicit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TitleState {
    AwaitingTitle,
    InBody,
}

/// Classify a Markdown document into an ordered list of styled blocks.
///
/// `bullet_glyph` is prefixed to bullet-list items after their leading
/// marker (`- `, `* `, `+ `) has been stripped.
pub fn classify_document(content: &str, bullet_glyph: char) -> Vec<StyledBlock> {
    let mut blocks = Vec::new();
    let mut title_state = TitleState::AwaitingTitle;
    let mut in_code_block = false;
    let mut code_lines: Vec<&str> = Vec::new();

    for raw in content.lines() {
        let line = raw.trim_end();

        // Blank line outside a fence is vertical spacing; inside a fence it
        // is content and falls through to the accumulator below.
        if line.is_empty() && !in_code_block {
            blocks.push(StyledBlock::Spacer(0.1));
            continue;
        }

        // Fence delimiters toggle; the closing fence flushes the block.
        if line.starts_with("```") {
            if in_code_block {
                let code = code_lines.join("\n");
                if !code.is_empty() {
                    blocks.push(StyledBlock::Code(code));
                }
                code_lines.clear();
                in_code_block = false;
            } else {
                in_code_block = true;
                code_lines.clear();
            }
            continue;
        }

        if in_code_block {
            code_lines.push(line);
            continue;
        }

        // Longest prefix first so `### Foo` never classifies as level 1.
        if let Some(rest) = line.strip_prefix("### ") {
            blocks.push(StyledBlock::text(heading_markup(rest), TextClass::H3));
        } else if let Some(rest) = line.strip_prefix("## ") {
            blocks.push(StyledBlock::text(heading_markup(rest), TextClass::H2));
        } else if let Some(rest) = line.strip_prefix("# ") {
            match title_state {
                TitleState::AwaitingTitle => {
                    blocks.push(StyledBlock::Spacer(0.5));
                    blocks.push(StyledBlock::text(heading_markup(rest), TextClass::Title));
                    blocks.push(StyledBlock::Spacer(0.3));
                    title_state = TitleState::InBody;
                }
                TitleState::InBody => {
                    blocks.push(StyledBlock::text(heading_markup(rest), TextClass::H1));
                }
            }
        } else if line.starts_with("---") {
            blocks.push(StyledBlock::Rule);
        } else if is_bullet_line(line) {
            let text = line
                .trim_start_matches(['-', '*', '+', ' '])
                .trim_end();
            let markup = format!("{} {}", bullet_glyph, inline::to_markup(text));
            blocks.push(StyledBlock::text(markup, TextClass::Bullet));
        } else if is_numbered_line(line) {
            // Digits are kept: "3. step" renders as-is in the bullet style.
            blocks.push(StyledBlock::text(
                inline::to_markup(line.trim()),
                TextClass::Bullet,
            ));
        } else {
            blocks.push(StyledBlock::text(
                inline::to_markup(line.trim()),
                TextClass::Body,
            ));
        }
    }

    if in_code_block && !code_lines.is_empty() {
        warn!(
            "unterminated code fence: {} pending line(s) dropped",
            code_lines.len()
        );
    }

    blocks
}

/// Heading text keeps its characters literal (no emphasis resolution, the
/// original tool never applied it to headings) but still needs reserved
/// characters escaped for the span parser.
fn heading_markup(rest: &str) -> String {
    inline::escape_reserved(rest.trim_start_matches(['#', ' ']).trim())
}

fn is_bullet_line(line: &str) -> bool {
    line.starts_with("- ") || line.starts_with("* ") || line.starts_with("+ ")
}

/// "digits, dot, space" at the start of the line.
fn is_numbered_line(line: &str) -> bool {
    let digits: usize = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return false;
    }
    let rest = &line[digits..];
    rest.starts_with('.') && rest[1..].starts_with(|c: char| c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(content: &str) -> Vec<StyledBlock> {
        classify_document(content, '\u{2022}')
    }

    fn texts(blocks: &[StyledBlock]) -> Vec<(&str, TextClass)> {
        blocks
            .iter()
            .filter_map(|b| match b {
                StyledBlock::Text { markup, class } => Some((markup.as_str(), *class)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn heading_levels_match_longest_prefix_first() {
        let blocks = classify("# One\n## Two\n### Three");
        let t = texts(&blocks);
        assert_eq!(t[0], ("One", TextClass::Title));
        assert_eq!(t[1], ("Two", TextClass::H2));
        assert_eq!(t[2], ("Three", TextClass::H3));
    }

    #[test]
    fn triple_hash_is_never_level_one() {
        let blocks = classify("### Foo");
        assert_eq!(texts(&blocks), vec![("Foo", TextClass::H3)]);
    }

    #[test]
    fn only_first_h1_is_title() {
        let blocks = classify("# First\n# Second\n# Third");
        let t = texts(&blocks);
        assert_eq!(t[0].1, TextClass::Title);
        assert_eq!(t[1].1, TextClass::H1);
        assert_eq!(t[2].1, TextClass::H1);
    }

    #[test]
    fn title_gets_surrounding_spacers() {
        let blocks = classify("# Title");
        assert_eq!(
            blocks,
            vec![
                StyledBlock::Spacer(0.5),
                StyledBlock::text("Title", TextClass::Title),
                StyledBlock::Spacer(0.3),
            ]
        );
    }

    #[test]
    fn fenced_code_is_verbatim_single_block() {
        let blocks = classify("```\nlet x = **not bold**;\n  indented\n```");
        assert_eq!(
            blocks,
            vec![StyledBlock::Code(
                "let x = **not bold**;\n  indented".into()
            )]
        );
    }

    #[test]
    fn empty_fence_emits_no_block() {
        let blocks = classify("```\n```");
        assert!(blocks.is_empty());
    }

    #[test]
    fn blank_lines_inside_fence_are_content() {
        let blocks = classify("```\na\n\nb\n```");
        assert_eq!(blocks, vec![StyledBlock::Code("a\n\nb".into())]);
    }

    #[test]
    fn bullet_markers_all_normalize() {
        for marker in ["- ", "* ", "+ "] {
            let blocks = classify(&format!("{marker}item text"));
            assert_eq!(
                texts(&blocks),
                vec![("\u{2022} item text", TextClass::Bullet)],
                "marker {marker:?}"
            );
        }
    }

    #[test]
    fn numbered_line_keeps_digits() {
        let blocks = classify("12. twelfth step");
        assert_eq!(texts(&blocks), vec![("12. twelfth step", TextClass::Bullet)]);
    }

    #[test]
    fn version_number_is_not_a_numbered_item() {
        let blocks = classify("1.2 release notes");
        assert_eq!(texts(&blocks)[0].1, TextClass::Body);
    }

    #[test]
    fn dashes_make_a_rule() {
        let blocks = classify("---");
        assert_eq!(blocks, vec![StyledBlock::Rule]);
    }

    #[test]
    fn blank_line_is_spacer() {
        let blocks = classify("a\n\nb");
        assert_eq!(blocks[1], StyledBlock::Spacer(0.1));
    }

    #[test]
    fn body_text_gets_inline_transform() {
        let blocks = classify("Some **bold** text.");
        assert_eq!(
            texts(&blocks),
            vec![("Some <b>bold</b> text.", TextClass::Body)]
        );
    }

    #[test]
    fn end_to_end_scenario_block_order() {
        let blocks = classify("# Title\n\nSome **bold** text.\n\n- point one\n- point two");
        assert_eq!(
            blocks,
            vec![
                StyledBlock::Spacer(0.5),
                StyledBlock::text("Title", TextClass::Title),
                StyledBlock::Spacer(0.3),
                StyledBlock::Spacer(0.1),
                StyledBlock::text("Some <b>bold</b> text.", TextClass::Body),
                StyledBlock::Spacer(0.1),
                StyledBlock::text("\u{2022} point one", TextClass::Bullet),
                StyledBlock::text("\u{2022} point two", TextClass::Bullet),
            ]
        );
    }

    #[test]
    fn unterminated_fence_drops_pending_lines() {
        let blocks = classify("before\n```\ndangling");
        assert_eq!(texts(&blocks), vec![("before", TextClass::Body)]);
    }
}

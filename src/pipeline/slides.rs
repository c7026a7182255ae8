//! Slide splitter: presentation Markdown → `Slide { title, content }`.
//!
//! Slides are separated by the exact pattern `\n---\n`. Within each chunk
//! the scan is top-to-bottom: slide-numbering comment lines (`<!-- … -->`)
//! are skipped, the last heading seen sets the title, everything else
//! non-blank accumulates as content in original order.
//!
//! A chunk that never produces a title is dropped whole. That can lose
//! content, so it is logged as a warning rather than silently swallowed,
//! but the drop itself is long-standing behavior that downstream decks
//! depend on (stray preamble above the first separator never becomes a
//! phantom slide).

use tracing::warn;

/// One parsed slide: a title plus the raw multi-line body under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub title: String,
    /// Body lines joined with `\n`, markers and emphasis still in place;
    /// the writers decide how to render them.
    pub content: String,
}

/// Split presentation Markdown into slides.
///
/// N internal separators always yield N+1 chunks before filtering. Chunks
/// shorter than `min_chunk_len` after trimming are treated as separator
/// artifacts (stray `---` fragments) and discarded — that threshold guards
/// against artifacts, it is not content validation.
pub fn split_slides(content: &str, min_chunk_len: usize) -> Vec<Slide> {
    let mut slides = Vec::new();

    for (idx, chunk) in content.split("\n---\n").enumerate() {
        let chunk = chunk.trim();
        if chunk.is_empty() || chunk.len() < min_chunk_len {
            continue;
        }

        let mut title = String::new();
        let mut body: Vec<&str> = Vec::new();

        for line in chunk.lines() {
            if line.starts_with("<!--") {
                // Slide-numbering marker comment, not content.
                continue;
            } else if let Some(rest) = line.strip_prefix("##") {
                title = rest.trim_start_matches('#').trim().to_string();
            } else if let Some(rest) = line.strip_prefix('#') {
                title = rest.trim().to_string();
            } else if !line.trim().is_empty() {
                body.push(line);
            }
        }

        if title.is_empty() {
            warn!(
                "chunk {} has no heading line; dropping it ({} content line(s) lost)",
                idx + 1,
                body.len()
            );
            continue;
        }

        slides.push(Slide {
            title,
            content: body.join("\n"),
        });
    }

    slides
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(content: &str) -> Vec<Slide> {
        split_slides(content, 10)
    }

    #[test]
    fn two_slides_from_one_separator() {
        let md = "## Slide 1\nIntro text\n\n---\n\n## Slide 2\n- A\n- B";
        let slides = split(md);
        assert_eq!(
            slides,
            vec![
                Slide {
                    title: "Slide 1".into(),
                    content: "Intro text".into()
                },
                Slide {
                    title: "Slide 2".into(),
                    content: "- A\n- B".into()
                },
            ]
        );
    }

    #[test]
    fn n_separators_give_n_plus_one_chunks() {
        let md = "## A\naaaaaaaa\n---\n## B\nbbbbbbbb\n---\n## C\ncccccccc";
        assert_eq!(split(md).len(), 3);
    }

    #[test]
    fn dashes_without_their_own_line_do_not_split() {
        let md = "## T\nan em --- dash aside, one slide";
        assert_eq!(split(md).len(), 1);
    }

    #[test]
    fn short_chunks_are_discarded() {
        let md = "## A\nlong enough body\n---\nx\n---\n## B\nanother body";
        let slides = split(md);
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].title, "A");
        assert_eq!(slides[1].title, "B");
    }

    #[test]
    fn titleless_chunk_is_dropped() {
        let md = "just some text\nwith no heading at all";
        assert!(split(md).is_empty());
    }

    #[test]
    fn level_one_heading_titles_a_chunk() {
        let slides = split("# Big Title\nbody line here");
        assert_eq!(slides[0].title, "Big Title");
    }

    #[test]
    fn later_heading_wins() {
        let slides = split("## First\n## Second\nbody body body");
        assert_eq!(slides[0].title, "Second");
    }

    #[test]
    fn blank_lines_are_not_content() {
        let slides = split("## T\n\na\n\nb\n");
        assert_eq!(slides[0].content, "a\nb");
    }

    #[test]
    fn numbering_comment_lines_are_ignored() {
        let slides = split("<!-- slide 3 -->\n## Real Title\ncontent line");
        assert_eq!(slides[0].title, "Real Title");
        assert_eq!(slides[0].content, "content line");
    }
}

//! Rich-text span parser: the tag dialect → styled spans.
//!
//! The page-layout library takes styled spans, not tagged strings, so this
//! is where "the renderer rejects malformed markup" actually happens. The
//! parser is strict on purpose: an unbalanced or unknown tag returns
//! [`BlockError::MalformedMarkup`], and the caller applies the
//! skip-and-continue policy (drop the block, log a warning, keep going).
//! Making the failure an explicit `Result` keeps the best-effort data loss
//! visible instead of hiding it in a broad catch.
//!
//! The dialect is tiny: `<b>`, `<i>`, `<code>` with matching closers, plus
//! the three entities `&amp;`, `&lt;`, `&gt;` produced by the inline
//! transformer. Tags may nest across kinds but not within one kind.

use crate::error::BlockError;

/// One run of text with a uniform style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Rendered in the monospace font family.
    pub code: bool,
}

/// Parse a tagged markup string into styled spans.
///
/// Adjacent characters with the same active style collapse into one span;
/// empty spans are never emitted.
pub fn parse_spans(markup: &str) -> Result<Vec<Span>, BlockError> {
    let mut spans: Vec<Span> = Vec::new();
    let mut current = String::new();
    let (mut bold, mut italic, mut code) = (false, false, false);

    let mut flush = |text: &mut String, bold: bool, italic: bool, code: bool| {
        if !text.is_empty() {
            spans.push(Span {
                text: std::mem::take(text),
                bold,
                italic,
                code,
            });
        }
    };

    let mut chars = markup.char_indices();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '<' => {
                let rest = &markup[idx + 1..];
                let end = rest.find('>').ok_or_else(|| malformed("unterminated tag"))?;
                let tag = &rest[..end];
                flush(&mut current, bold, italic, code);
                match tag {
                    "b" | "i" | "code" => {
                        let flag = flag_for(tag, &mut bold, &mut italic, &mut code);
                        if *flag {
                            return Err(malformed(&format!("tag <{tag}> opened twice")));
                        }
                        *flag = true;
                    }
                    "/b" | "/i" | "/code" => {
                        let name = &tag[1..];
                        let flag = flag_for(name, &mut bold, &mut italic, &mut code);
                        if !*flag {
                            return Err(malformed(&format!("closing </{name}> without opener")));
                        }
                        *flag = false;
                    }
                    other => return Err(malformed(&format!("unknown tag <{other}>"))),
                }
                // Skip the tag body and the closing '>'.
                for _ in 0..end + 1 {
                    chars.next();
                }
            }
            '>' => return Err(malformed("stray '>' outside a tag")),
            '&' => {
                let rest = &markup[idx..];
                if let Some((entity, decoded)) = decode_entity(rest) {
                    current.push(decoded);
                    for _ in 0..entity - 1 {
                        chars.next();
                    }
                } else {
                    // A bare ampersand the transformer did not produce;
                    // keep it literal rather than failing the block.
                    current.push('&');
                }
            }
            c => current.push(c),
        }
    }

    if bold || italic || code {
        return Err(malformed("unclosed tag at end of text"));
    }
    flush(&mut current, bold, italic, code);
    Ok(spans)
}

fn malformed(detail: &str) -> BlockError {
    BlockError::MalformedMarkup {
        detail: detail.to_string(),
    }
}

fn flag_for<'a>(
    tag: &str,
    bold: &'a mut bool,
    italic: &'a mut bool,
    code: &'a mut bool,
) -> &'a mut bool {
    match tag {
        "b" => bold,
        "i" => italic,
        _ => code,
    }
}

/// Decode a leading entity, returning (consumed byte length, character).
fn decode_entity(rest: &str) -> Option<(usize, char)> {
    for (entity, decoded) in [("&amp;", '&'), ("&lt;", '<'), ("&gt;", '>')] {
        if rest.starts_with(entity) {
            return Some((entity.len(), decoded));
        }
    }
    None
}

//! Pipeline stages for Markdown conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets the
//! two conversion paths (documents and presentations) share the parts they
//! have in common instead of duplicating them.
//!
//! ## Data Flow
//!
//! ```text
//! documents:      inline ──▶ classify ──▶ rich ──▶ render::pdf
//!                 (markup)   (blocks)    (spans)
//!
//! presentations:  slides ──▶ render::deck        (PPTX)
//!                        └─▶ classify-style blocks ──▶ render::pdf
//! ```
//!
//! 1. [`inline`]   — resolve `**bold**` / `*italic*` / `` `code` `` markers
//!    into the tag dialect, escaping reserved characters first
//! 2. [`classify`] — one forward pass over the lines, producing the ordered
//!    [`classify::StyledBlock`] list (order always matches input order)
//! 3. [`rich`]     — parse the tag dialect into styled spans; the explicit
//!    failure point for malformed markup (skip-and-continue policy)
//! 4. [`slides`]   — split presentation markdown on `\n---\n` and extract
//!    per-slide titles and content

pub mod classify;
pub mod inline;
pub mod rich;
pub mod slides;

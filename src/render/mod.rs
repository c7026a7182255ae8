//! Document writers: styled blocks → PDF, slides → PPTX.
//!
//! Both writers are pure consumers of their composition libraries'
//! primitives — [`pdf`] drives genpdf paragraphs and styles, [`deck`]
//! writes the OOXML parts of a PPTX package through the `zip` crate.
//! Neither reimplements layout: pagination, word wrap, and shape
//! placement belong to the libraries and to PowerPoint itself.

pub mod deck;
pub mod pdf;

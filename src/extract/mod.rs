//! Reference extraction
//!
//! Turns the text of one source file into [`ReferenceEdge`](crate::graph::ReferenceEdge)
//! values. Each rule is an independent pattern scan over the whole text; a
//! file may produce any number of edges per rule, including none.

mod extractor;
mod structured;

pub use extractor::{has_media_extension, is_path_specifier, ReferenceExtractor};

//! In-memory document host for the `sticky` controller.
//!
//! [`Document`] implements [`sticky::StickyHost`] over an element arena with
//! class lists, inline styles and hand-set layout boxes. It records every
//! style and class write in a journal so callers can assert exactly what a
//! controller changed.

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

pub mod document;
pub mod printing;
pub mod selector;

pub use document::{Document, ElementData, LayoutBox, Mutation};
pub use selector::Selector;

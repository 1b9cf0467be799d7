//! # Mailcraft HTML Compiler
//!
//! Deterministic serializer from the template document model to
//! nested-table markup compatible with email rendering engines.
//!
//! Compilation is a pure function of the tree: identical document content
//! always yields byte-identical markup. Inline styles are emitted by
//! explicit, ordered builder functions, never by iterating a hash map.

mod compiler;
mod context;
mod escape;
mod parts;
mod styles;

pub use compiler::{compile_document, compile_part, DocumentMarkup};

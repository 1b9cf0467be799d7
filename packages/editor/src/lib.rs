//! # Mailcraft Editor
//!
//! Editing layer over the template document model.
//!
//! All structural and style edits flow through the typed [`Mutation`]
//! enum applied to a [`Document`] handle. Mutations validate before they
//! write, so a rejected edit never leaves a half-applied tree, and the
//! handle keeps every part's compiled-markup cache in step with the model.

pub mod document;
pub mod errors;
pub mod migrate;
pub mod mutations;

pub use document::{Document, DocumentStorage};
pub use errors::EditorError;
pub use migrate::migrate;
pub use mutations::{Mutation, MutationError};

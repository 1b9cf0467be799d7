//! # Mailcraft Model
//!
//! Typed document tree for the template composer.
//!
//! A template is a [`Document`] holding two [`Variant`]s (desktop and
//! mobile), each with a body-wide [`RootStyle`] and an ordered list of
//! [`Part`]s. Parts are polymorphic content blocks; a `Columns` part owns
//! up to four width-constrained [`Slot`]s which may hold nested parts.
//!
//! The model is the source of truth: compiled markup and drop geometry are
//! derived views. All structural edits go through `mailcraft-editor`
//! mutations; this crate only provides the tree, the style cascade, and
//! the column-grid arithmetic those mutations rely on.

pub mod cascade;
pub mod document;
pub mod grid;
pub mod id;
pub mod part;
pub mod style;

pub use cascade::{resolve, EffectiveStyle};
pub use document::{Document, Locator, Variant, VariantKind};
pub use grid::{adjust_boundary, set_slot_count, BoundaryShift, GridError};
pub use id::IdGenerator;
pub use part::{
    Part, PartBody, PartId, PartKind, RichText, Slot, SlotContent, SocialLayout, SocialNetwork,
};
pub use style::{BodyType, RootStyle, StyleOverrides, StyleValue, CURRENT_SCHEMA_VERSION};

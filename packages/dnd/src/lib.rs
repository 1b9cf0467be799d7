//! # Mailcraft Drag-and-Drop
//!
//! Pure positional drop resolution for the composer's drag interactions.
//!
//! The rendering surface snapshots where every part currently sits
//! ([`RenderLayout`]); [`resolve`] maps a pointer position over that
//! snapshot to the tree position a drop would insert at. The result feeds
//! the editor's insert/move mutations; nothing here touches the document.

pub mod geometry;
pub mod resolver;

pub use geometry::{Band, Point, Rect};
pub use resolver::{
    resolve, DragPayload, DropTarget, OccupantGeometry, PartGeometry, RenderLayout, SlotTarget,
};

//! # Document Mutations
//!
//! High-level semantic operations on template documents.
//!
//! Every mutation validates its structural constraints before touching the
//! tree. A rejected mutation leaves the document byte-identical; there is
//! no partial application to roll back.
//!
//! Structural invariants enforced here:
//! - Columns parts never nest inside a slot.
//! - The footer pair (trailing footer part plus its preceding Invisible
//!   marker) stays at the end of the top-level list. Inserts clamp above
//!   it, moves of either member are rejected, removing the footer removes
//!   the marker with it.
//! - Slot widths change only through the grid engine.

use mailcraft_model::style::StyleError;
use mailcraft_model::{
    cascade, grid, BoundaryShift, Document, GridError, IdGenerator, Locator, Part, PartBody,
    PartId, StyleValue, Variant, VariantKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations over one variant of a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a part into the top-level list at `index`
    InsertPart {
        variant: VariantKind,
        index: usize,
        part: Part,
    },

    /// Insert a part into a slot of a Columns part
    InsertIntoSlot {
        variant: VariantKind,
        columns_id: PartId,
        slot: usize,
        index: usize,
        part: Part,
    },

    /// Relocate a part between any two positions
    MovePart {
        variant: VariantKind,
        source: Locator,
        dest: Locator,
    },

    /// Remove a part; emptied slots revert to `Empty`
    RemovePart {
        variant: VariantKind,
        locator: Locator,
    },

    /// Deep-clone a part with fresh ids, inserted right after the source
    DuplicatePart {
        variant: VariantKind,
        locator: Locator,
    },

    /// Set one style property on a part (sparse-override discipline)
    SetStyle {
        variant: VariantKind,
        part_id: PartId,
        property: String,
        value: StyleValue,
    },

    /// Set one body-wide style property
    SetRootStyle {
        variant: VariantKind,
        property: String,
        value: StyleValue,
    },

    /// Resize a Columns part to `count` slots
    SetSlotCount {
        variant: VariantKind,
        columns_id: PartId,
        count: usize,
    },

    /// Move one grid unit across a slot boundary
    AdjustBoundary {
        variant: VariantKind,
        columns_id: PartId,
        boundary: usize,
        shift: BoundaryShift,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("part not found: {0}")]
    PartNotFound(String),

    #[error("no part at {0:?}")]
    NoPartAt(Locator),

    #[error("index {index} out of bounds for length {len}")]
    BadIndex { index: usize, len: usize },

    #[error("slot {slot} out of bounds for {count} slots")]
    BadSlot { slot: usize, count: usize },

    #[error("part {0} is not a Columns part")]
    NotColumns(String),

    #[error("Columns parts cannot nest inside a slot")]
    NestedColumns,

    #[error("the footer pair cannot be moved or split")]
    FooterImmovable,

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Style(#[from] StyleError),
}

impl Mutation {
    /// The variant this mutation targets
    pub fn variant(&self) -> VariantKind {
        match self {
            Mutation::InsertPart { variant, .. }
            | Mutation::InsertIntoSlot { variant, .. }
            | Mutation::MovePart { variant, .. }
            | Mutation::RemovePart { variant, .. }
            | Mutation::DuplicatePart { variant, .. }
            | Mutation::SetStyle { variant, .. }
            | Mutation::SetRootStyle { variant, .. }
            | Mutation::SetSlotCount { variant, .. }
            | Mutation::AdjustBoundary { variant, .. } => *variant,
        }
    }

    /// Validate and apply this mutation to `doc`
    pub fn apply(
        &self,
        doc: &mut Document,
        ids: &mut IdGenerator,
    ) -> Result<VariantKind, MutationError> {
        let kind = self.variant();
        let variant = doc.variant_mut(kind);

        match self {
            Mutation::InsertPart { index, part, .. } => {
                if *index > variant.parts.len() {
                    return Err(MutationError::BadIndex {
                        index: *index,
                        len: variant.parts.len(),
                    });
                }
                let index = clamp_top_index(variant, *index);
                variant.parts.insert(index, part.clone());
            }

            Mutation::InsertIntoSlot {
                columns_id,
                slot,
                index,
                part,
                ..
            } => {
                if part.is_columns() {
                    return Err(MutationError::NestedColumns);
                }
                let columns = top_index_of(variant, columns_id)?;
                check_slot_insert(variant, columns, *slot, *index)?;

                let container = &mut variant.parts[columns];
                container.html = None;
                if let Some(slots) = container.slots_mut() {
                    slots[*slot].content.insert_at(*index, part.clone());
                }
            }

            Mutation::MovePart { source, dest, .. } => {
                apply_move(variant, source, dest)?;
            }

            Mutation::RemovePart { locator, .. } => {
                apply_remove(variant, locator)?;
            }

            Mutation::DuplicatePart { locator, .. } => {
                let part = variant
                    .part_at(locator)
                    .ok_or_else(|| MutationError::NoPartAt(*locator))?;
                let mut clone = part.duplicate(ids);
                clone.footer = false;

                match locator {
                    Locator::Top { index } => {
                        let at = clamp_top_index(variant, index + 1);
                        variant.parts.insert(at, clone);
                    }
                    Locator::Slot {
                        columns,
                        slot,
                        index,
                    } => {
                        let container = &mut variant.parts[*columns];
                        container.html = None;
                        if let Some(slots) = container.slots_mut() {
                            slots[*slot].content.insert_at(index + 1, clone);
                        }
                    }
                }
            }

            Mutation::SetStyle {
                part_id,
                property,
                value,
                ..
            } => {
                let inherited = cascade::inherited_value(&variant.root, property);
                let part = variant
                    .find_part_mut(part_id)
                    .ok_or_else(|| MutationError::PartNotFound(part_id.clone()))?;

                // Sparse overrides: a value equal to the inherited one is
                // noise in the cascade, so delete instead of storing it
                if inherited.as_ref() == Some(value) {
                    part.overrides.remove(property);
                } else {
                    part.overrides.insert(property.clone(), value.clone());
                }
                part.html = None;
            }

            Mutation::SetRootStyle {
                property, value, ..
            } => {
                variant.root.set(property, value)?;
                for part in &mut variant.parts {
                    part.walk_mut(&mut |p| p.html = None);
                }
            }

            Mutation::SetSlotCount {
                columns_id, count, ..
            } => {
                let columns = top_index_of(variant, columns_id)?;
                let container = &mut variant.parts[columns];
                match container.slots_mut() {
                    Some(slots) => grid::set_slot_count(slots, *count)?,
                    None => return Err(MutationError::NotColumns(columns_id.clone())),
                }
                container.html = None;
            }

            Mutation::AdjustBoundary {
                columns_id,
                boundary,
                shift,
                ..
            } => {
                let columns = top_index_of(variant, columns_id)?;
                let container = &mut variant.parts[columns];
                match container.slots_mut() {
                    Some(slots) => grid::adjust_boundary(slots, *boundary, *shift)?,
                    None => return Err(MutationError::NotColumns(columns_id.clone())),
                }
                container.html = None;
            }
        }

        Ok(kind)
    }
}

/// Top-level insertion index, clamped above the footer pair
fn clamp_top_index(variant: &Variant, index: usize) -> usize {
    let limit = if variant.has_footer() {
        variant.parts.len().saturating_sub(2)
    } else {
        variant.parts.len()
    };
    index.min(limit)
}

fn top_index_of(variant: &Variant, id: &str) -> Result<usize, MutationError> {
    variant
        .parts
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| MutationError::PartNotFound(id.to_string()))
}

/// Bounds checks for inserting into a slot of the Columns at `columns`
fn check_slot_insert(
    variant: &Variant,
    columns: usize,
    slot: usize,
    index: usize,
) -> Result<(), MutationError> {
    let container = variant.parts.get(columns).ok_or(MutationError::BadIndex {
        index: columns,
        len: variant.parts.len(),
    })?;
    let slots = container
        .slots()
        .ok_or_else(|| MutationError::NotColumns(container.id.clone()))?;
    let target = slots.get(slot).ok_or(MutationError::BadSlot {
        slot,
        count: slots.len(),
    })?;
    if index > target.content.len() {
        return Err(MutationError::BadIndex {
            index,
            len: target.content.len(),
        });
    }
    Ok(())
}

/// Whether the part at top-level `index` is a member of the footer pair
fn is_footer_pair(variant: &Variant, index: usize) -> bool {
    if !variant.has_footer() {
        return false;
    }
    let len = variant.parts.len();
    if index + 1 == len {
        return true;
    }
    index + 2 == len && matches!(variant.parts[index].body, PartBody::Invisible)
}

fn apply_move(variant: &mut Variant, source: &Locator, dest: &Locator) -> Result<(), MutationError> {
    let moving = variant
        .part_at(source)
        .ok_or_else(|| MutationError::NoPartAt(*source))?;
    let moving_is_columns = moving.is_columns();

    if let Locator::Top { index } = source {
        if is_footer_pair(variant, *index) {
            return Err(MutationError::FooterImmovable);
        }
    }
    if matches!(dest, Locator::Slot { .. }) && moving_is_columns {
        return Err(MutationError::NestedColumns);
    }

    // Validate the destination against the pre-removal tree; the locator
    // indexes are interpreted pre-removal and adjusted below
    if let Locator::Slot {
        columns,
        slot,
        index,
    } = dest
    {
        check_slot_insert(variant, *columns, *slot, *index)?;
    }

    let dest = adjusted_dest(source, dest);

    let part = take_at(variant, source).ok_or_else(|| MutationError::NoPartAt(*source))?;

    match dest {
        Locator::Top { index } => {
            let at = clamp_top_index(variant, index);
            variant.parts.insert(at, part);
        }
        Locator::Slot {
            columns,
            slot,
            index,
        } => {
            let container = &mut variant.parts[columns];
            container.html = None;
            if let Some(slots) = container.slots_mut() {
                slots[slot].content.insert_at(index, part);
            }
        }
    }
    Ok(())
}

/// Re-express a pre-removal destination locator in post-removal indexes
fn adjusted_dest(source: &Locator, dest: &Locator) -> Locator {
    match (source, dest) {
        (Locator::Top { index: s }, Locator::Top { index }) if s < index => {
            Locator::Top { index: index - 1 }
        }
        (Locator::Top { index: s }, Locator::Slot { columns, slot, index }) if s < columns => {
            Locator::Slot {
                columns: columns - 1,
                slot: *slot,
                index: *index,
            }
        }
        (
            Locator::Slot {
                columns: sc,
                slot: ss,
                index: si,
            },
            Locator::Slot {
                columns,
                slot,
                index,
            },
        ) if sc == columns && ss == slot && si < index => Locator::Slot {
            columns: *columns,
            slot: *slot,
            index: index - 1,
        },
        _ => *dest,
    }
}

/// Detach the part at `loc`, shifting later siblings down
fn take_at(variant: &mut Variant, loc: &Locator) -> Option<Part> {
    match loc {
        Locator::Top { index } => {
            (*index < variant.parts.len()).then(|| variant.parts.remove(*index))
        }
        Locator::Slot {
            columns,
            slot,
            index,
        } => {
            let container = variant.parts.get_mut(*columns)?;
            container.html = None;
            let slots = container.slots_mut()?;
            slots.get_mut(*slot)?.content.remove_at(*index)
        }
    }
}

fn apply_remove(variant: &mut Variant, locator: &Locator) -> Result<(), MutationError> {
    match locator {
        Locator::Top { index } => {
            if *index >= variant.parts.len() {
                return Err(MutationError::NoPartAt(*locator));
            }
            let was_footer = variant.parts[*index].footer;
            // The pair goes together or not at all: removing the footer
            // takes its marker with it, removing the marker alone would
            // orphan the footer
            if !was_footer && is_footer_pair(variant, *index) {
                return Err(MutationError::FooterImmovable);
            }
            variant.parts.remove(*index);
            // The footer's Invisible marker has no life of its own
            if was_footer
                && *index > 0
                && matches!(variant.parts[index - 1].body, PartBody::Invisible)
            {
                variant.parts.remove(index - 1);
            }
        }
        Locator::Slot { .. } => {
            take_at(variant, locator).ok_or_else(|| MutationError::NoPartAt(*locator))?;
        }
    }
    Ok(())
}

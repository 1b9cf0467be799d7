//! Geometry to insertion-point resolution
//!
//! Pointer-move events call [`resolve`] repeatedly during a drag; only the
//! terminal drop feeds the result into an editor mutation. The resolver
//! never mutates anything, so a cancelled drag leaves the document
//! byte-for-byte unchanged.
//!
//! Index convention: emitted indexes are positions in the tree as it is
//! currently rendered. When the drop relocates an existing part, the
//! editor's move mutation owns the removed-then-respliced index
//! adjustment; the resolver only excludes the moving part's own bands
//! from matching.

use mailcraft_model::{PartId, PartKind};
use serde::{Deserialize, Serialize};

use crate::geometry::{Band, Point, Rect};

/// Rendered extent of one occupant inside a Columns slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupantGeometry {
    pub id: PartId,
    pub rect: Rect,
}

/// Rendered extent of one top-level part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartGeometry {
    pub id: PartId,
    pub kind: PartKind,
    pub band: Band,
    /// Occupant boxes per slot; populated only for Columns parts
    #[serde(default)]
    pub slots: Vec<Vec<OccupantGeometry>>,
}

/// Snapshot of the rendering surface at one pointer event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderLayout {
    /// Top-level parts in tree order, footer pair included
    pub parts: Vec<PartGeometry>,
    /// Whether the trailing Invisible/footer pair is present
    pub footer: bool,
}

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragPayload {
    pub kind: PartKind,
    /// Set when relocating an existing part rather than placing a new one
    pub moving: Option<PartId>,
}

/// Slot-level landing position inside a Columns part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotTarget {
    pub slot: usize,
    pub index: usize,
}

/// Resolved insertion point
///
/// `index` is the top-level insertion index, or the Columns part's own
/// index when `slot` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTarget {
    pub index: usize,
    pub slot: Option<SlotTarget>,
}

impl DropTarget {
    fn top(index: usize) -> Self {
        Self { index, slot: None }
    }
}

/// Map a pointer position to the insertion point a drop would target
pub fn resolve(layout: &RenderLayout, payload: &DragPayload, point: Point) -> DropTarget {
    let moving = payload.moving.as_deref();

    for (i, part) in layout.parts.iter().enumerate() {
        if Some(part.id.as_str()) == moving {
            continue;
        }
        if !part.band.contains(point.y) {
            continue;
        }

        // Columns may only land at the top level, so a dragged Columns
        // never descends into slots
        if part.kind == PartKind::Columns && payload.kind != PartKind::Columns {
            if let Some(target) = resolve_in_slots(part, moving, point) {
                return DropTarget {
                    index: i,
                    slot: Some(target),
                };
            }
        }

        let candidate = if part.band.lower_half(point.y) {
            i + 1
        } else {
            i
        };
        return DropTarget::top(clamp_index(layout, candidate));
    }

    // Below (or beside) all content: append at the end
    DropTarget::top(clamp_index(layout, layout.parts.len()))
}

/// Half-band test against every occupant box of a Columns part
///
/// `None` when the pointer misses every occupant; the caller then falls
/// back to top-level placement around the Columns part itself. A slot
/// with no occupants catches any pointer inside the Columns band whose X
/// falls between the slot's horizontal guides only if the surface reports
/// an empty-slot box for it; surfaces that do report one use a synthetic
/// occupant with an empty id.
fn resolve_in_slots(part: &PartGeometry, moving: Option<&str>, point: Point) -> Option<SlotTarget> {
    for (slot, occupants) in part.slots.iter().enumerate() {
        for (index, occupant) in occupants.iter().enumerate() {
            if Some(occupant.id.as_str()) == moving {
                continue;
            }
            if !occupant.rect.contains(point) {
                continue;
            }
            let index = if occupant.rect.band().lower_half(point.y) {
                index + 1
            } else {
                index
            };
            return Some(SlotTarget { slot, index });
        }
    }
    None
}

/// Keep a top-level index from splitting the Invisible/footer pair
fn clamp_index(layout: &RenderLayout, index: usize) -> usize {
    let limit = if layout.footer {
        layout.parts.len().saturating_sub(2)
    } else {
        layout.parts.len()
    };
    index.min(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom(id: &str, kind: PartKind, top: f64, height: f64) -> PartGeometry {
        PartGeometry {
            id: id.to_string(),
            kind,
            band: Band { top, height },
            slots: Vec::new(),
        }
    }

    fn occupant(id: &str, x: f64, y: f64, width: f64, height: f64) -> OccupantGeometry {
        OccupantGeometry {
            id: id.to_string(),
            rect: Rect {
                x,
                y,
                width,
                height,
            },
        }
    }

    fn insertion(kind: PartKind) -> DragPayload {
        DragPayload { kind, moving: None }
    }

    fn at(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// Headline (0-100), Image (100-200), Button (200-300)
    fn simple_layout() -> RenderLayout {
        RenderLayout {
            parts: vec![
                geom("a", PartKind::Headline, 0.0, 100.0),
                geom("b", PartKind::Image, 100.0, 100.0),
                geom("c", PartKind::Button, 200.0, 100.0),
            ],
            footer: false,
        }
    }

    #[test]
    fn test_lower_half_targets_after_the_part() {
        let layout = simple_layout();
        let target = resolve(&layout, &insertion(PartKind::Text), at(10.0, 180.0));
        assert_eq!(target, DropTarget { index: 2, slot: None });
    }

    #[test]
    fn test_upper_half_targets_before_the_part() {
        let layout = simple_layout();
        let target = resolve(&layout, &insertion(PartKind::Text), at(10.0, 120.0));
        assert_eq!(target, DropTarget { index: 1, slot: None });
    }

    #[test]
    fn test_miss_appends_at_end() {
        let layout = simple_layout();
        let target = resolve(&layout, &insertion(PartKind::Text), at(10.0, 900.0));
        assert_eq!(target, DropTarget { index: 3, slot: None });
    }

    #[test]
    fn test_footer_clamps_the_index() {
        let mut layout = simple_layout();
        layout.parts.push(geom("marker", PartKind::Invisible, 300.0, 10.0));
        layout.parts.push(geom("footer", PartKind::Text, 310.0, 80.0));
        layout.footer = true;

        // Over the footer band itself
        let target = resolve(&layout, &insertion(PartKind::Text), at(10.0, 350.0));
        assert_eq!(target.index, 3);

        // Below everything
        let target = resolve(&layout, &insertion(PartKind::Text), at(10.0, 900.0));
        assert_eq!(target.index, 3);

        // Lower half of the last content part bumps, then clamps
        let target = resolve(&layout, &insertion(PartKind::Text), at(10.0, 290.0));
        assert_eq!(target.index, 3);
    }

    fn columns_layout() -> RenderLayout {
        let mut columns = geom("cols", PartKind::Columns, 100.0, 200.0);
        columns.slots = vec![
            vec![
                occupant("s0a", 0.0, 100.0, 300.0, 100.0),
                occupant("s0b", 0.0, 200.0, 300.0, 100.0),
            ],
            vec![occupant("s1a", 300.0, 100.0, 300.0, 80.0)],
        ];
        RenderLayout {
            parts: vec![geom("a", PartKind::Headline, 0.0, 100.0), columns],
            footer: false,
        }
    }

    #[test]
    fn test_descends_into_slot_occupants() {
        let layout = columns_layout();

        // Upper half of the first occupant in slot 0
        let target = resolve(&layout, &insertion(PartKind::Text), at(50.0, 120.0));
        assert_eq!(
            target,
            DropTarget {
                index: 1,
                slot: Some(SlotTarget { slot: 0, index: 0 })
            }
        );

        // Lower half of the second occupant in slot 0
        let target = resolve(&layout, &insertion(PartKind::Text), at(50.0, 280.0));
        assert_eq!(
            target,
            DropTarget {
                index: 1,
                slot: Some(SlotTarget { slot: 0, index: 2 })
            }
        );

        // Slot 1's occupant
        let target = resolve(&layout, &insertion(PartKind::Text), at(400.0, 110.0));
        assert_eq!(
            target,
            DropTarget {
                index: 1,
                slot: Some(SlotTarget { slot: 1, index: 0 })
            }
        );
    }

    #[test]
    fn test_columns_payload_never_descends() {
        let layout = columns_layout();
        let target = resolve(&layout, &insertion(PartKind::Columns), at(50.0, 120.0));
        assert_eq!(target, DropTarget { index: 1, slot: None });
    }

    #[test]
    fn test_inside_band_but_outside_occupants_falls_back_to_top_level() {
        let layout = columns_layout();

        // Inside the Columns band, right of slot 1's occupant height
        let target = resolve(&layout, &insertion(PartKind::Text), at(400.0, 250.0));
        assert_eq!(target, DropTarget { index: 2, slot: None });
    }

    #[test]
    fn test_moving_part_skips_its_own_band() {
        let layout = simple_layout();
        let payload = DragPayload {
            kind: PartKind::Image,
            moving: Some("b".to_string()),
        };

        // Pointer over the moving part's own band matches nothing else,
        // so the drop falls through to append-at-end
        let target = resolve(&layout, &payload, at(10.0, 150.0));
        assert_eq!(target, DropTarget { index: 3, slot: None });

        // Other bands still match normally
        let target = resolve(&layout, &payload, at(10.0, 280.0));
        assert_eq!(target, DropTarget { index: 3, slot: None });
        let target = resolve(&layout, &payload, at(10.0, 20.0));
        assert_eq!(target, DropTarget { index: 0, slot: None });
    }

    #[test]
    fn test_moving_occupant_skips_its_own_rect() {
        let layout = columns_layout();
        let payload = DragPayload {
            kind: PartKind::Text,
            moving: Some("s0a".to_string()),
        };

        // Over its own rect: no occupant matches, falls back to the
        // Columns band's top half
        let target = resolve(&layout, &payload, at(50.0, 120.0));
        assert_eq!(target, DropTarget { index: 1, slot: None });

        // Over the sibling below, upper half
        let target = resolve(&layout, &payload, at(50.0, 210.0));
        assert_eq!(
            target,
            DropTarget {
                index: 1,
                slot: Some(SlotTarget { slot: 0, index: 1 })
            }
        );
    }

    #[test]
    fn test_resolver_reads_layout_only() {
        let layout = columns_layout();
        let snapshot = layout.clone();
        for y in [0, 50, 120, 180, 250, 400] {
            resolve(&layout, &insertion(PartKind::Text), at(50.0, y as f64));
        }
        assert_eq!(layout, snapshot);
    }
}

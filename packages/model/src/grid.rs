//! 12-unit column grid
//!
//! Multi-column layouts size their slots on a fixed-sum grid:
//! `sum(slot.width) == 12` always, and no slot drops below 2 units.
//! These two functions are the only legal mutators of slot widths.

use crate::part::Slot;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GRID_UNITS: u8 = 12;
pub const MIN_SLOT_WIDTH: u8 = 2;
pub const MAX_SLOTS: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("slot count {0} outside 1..={MAX_SLOTS}")]
    BadSlotCount(usize),

    #[error("cannot drop occupied slot {0}")]
    OccupiedSlot(usize),

    #[error("no boundary {0} with {1} slots")]
    BadBoundary(usize, usize),

    #[error("width shift would drop a slot below {MIN_SLOT_WIDTH}")]
    MinWidth,
}

/// Direction the boundary between two adjacent slots moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryShift {
    /// Left slot shrinks, right slot grows
    Left,
    /// Left slot grows, right slot shrinks
    Right,
}

/// Grow or shrink the slot list to `n`, redistributing widths evenly
///
/// Growing appends empty slots. Shrinking drops trailing slots and is a
/// caller error if any of them is occupied; the drop resolver must have
/// evacuated occupants first. Redistribution gives every slot `12/n`, with
/// the integer remainder assigned to the last slot so the fixed sum holds
/// for counts that do not divide 12.
pub fn set_slot_count(slots: &mut Vec<Slot>, n: usize) -> Result<(), GridError> {
    if n == 0 || n > MAX_SLOTS {
        return Err(GridError::BadSlotCount(n));
    }
    if n == slots.len() {
        return Ok(());
    }

    if n < slots.len() {
        for (i, slot) in slots.iter().enumerate().skip(n) {
            if !slot.content.is_empty() {
                return Err(GridError::OccupiedSlot(i));
            }
        }
        slots.truncate(n);
    } else {
        while slots.len() < n {
            slots.push(Slot::empty(0));
        }
    }

    let base = GRID_UNITS / n as u8;
    for slot in slots.iter_mut() {
        slot.width = base;
    }
    if let Some(last) = slots.last_mut() {
        last.width = base + GRID_UNITS % n as u8;
    }

    Ok(())
}

/// Move one width unit across the boundary between slots `b` and `b + 1`
///
/// Refuses when the shrinking slot would drop below the minimum width;
/// the widths are left exactly as they were.
pub fn adjust_boundary(slots: &mut [Slot], boundary: usize, shift: BoundaryShift) -> Result<(), GridError> {
    if slots.len() < 2 || boundary + 1 >= slots.len() {
        return Err(GridError::BadBoundary(boundary, slots.len()));
    }

    let (shrinking, growing) = match shift {
        BoundaryShift::Left => (boundary, boundary + 1),
        BoundaryShift::Right => (boundary + 1, boundary),
    };

    if slots[shrinking].width <= MIN_SLOT_WIDTH {
        return Err(GridError::MinWidth);
    }

    slots[shrinking].width -= 1;
    slots[growing].width += 1;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdGenerator;
    use crate::part::{Part, PartKind, SlotContent};

    fn widths(slots: &[Slot]) -> Vec<u8> {
        slots.iter().map(|s| s.width).collect()
    }

    fn sum(slots: &[Slot]) -> u8 {
        slots.iter().map(|s| s.width).sum()
    }

    #[test]
    fn test_set_slot_count_redistributes_evenly() {
        let mut slots = vec![Slot::empty(6), Slot::empty(6)];

        set_slot_count(&mut slots, 3).unwrap();
        assert_eq!(widths(&slots), vec![4, 4, 4]);

        set_slot_count(&mut slots, 4).unwrap();
        assert_eq!(widths(&slots), vec![3, 3, 3, 3]);

        set_slot_count(&mut slots, 1).unwrap();
        assert_eq!(widths(&slots), vec![12]);
    }

    #[test]
    fn test_remainder_goes_to_last_slot() {
        // 12/5 would need 5 slots; the grid caps at 4, so exercise the
        // remainder with 4 -> widths stay exact, then with a synthetic
        // uneven case via direct arithmetic expectations
        let mut slots = vec![Slot::empty(12)];
        set_slot_count(&mut slots, 4).unwrap();
        assert_eq!(sum(&slots), GRID_UNITS);

        // Every legal count keeps the fixed sum
        for n in 1..=MAX_SLOTS {
            let mut slots = vec![Slot::empty(12)];
            set_slot_count(&mut slots, n).unwrap();
            assert_eq!(sum(&slots), GRID_UNITS, "count {n}");
            assert!(slots.iter().all(|s| s.width >= MIN_SLOT_WIDTH));
        }
    }

    #[test]
    fn test_shrink_refuses_occupied_trailing_slot() {
        let mut ids = IdGenerator::new("grid");
        let occupant = Part::new(PartKind::Text, false, true, &mut ids);

        let mut slots = vec![Slot::empty(4), Slot::empty(4), Slot::empty(4)];
        slots[2].content = SlotContent::Single(Box::new(occupant));

        let err = set_slot_count(&mut slots, 2).unwrap_err();
        assert_eq!(err, GridError::OccupiedSlot(2));
        assert_eq!(widths(&slots), vec![4, 4, 4]);
    }

    #[test]
    fn test_set_slot_count_bounds() {
        let mut slots = vec![Slot::empty(12)];
        assert!(matches!(
            set_slot_count(&mut slots, 0),
            Err(GridError::BadSlotCount(0))
        ));
        assert!(matches!(
            set_slot_count(&mut slots, 5),
            Err(GridError::BadSlotCount(5))
        ));
    }

    #[test]
    fn test_adjust_boundary_walks_until_minimum() {
        let mut slots = vec![Slot::empty(6), Slot::empty(6)];

        adjust_boundary(&mut slots, 0, BoundaryShift::Right).unwrap();
        adjust_boundary(&mut slots, 0, BoundaryShift::Right).unwrap();
        assert_eq!(widths(&slots), vec![8, 4]);

        adjust_boundary(&mut slots, 0, BoundaryShift::Right).unwrap();
        assert_eq!(widths(&slots), vec![9, 3]);

        adjust_boundary(&mut slots, 0, BoundaryShift::Right).unwrap();
        assert_eq!(widths(&slots), vec![10, 2]);

        // Next shift would drop the right slot below the minimum
        let err = adjust_boundary(&mut slots, 0, BoundaryShift::Right).unwrap_err();
        assert_eq!(err, GridError::MinWidth);
        assert_eq!(widths(&slots), vec![10, 2]);
        assert_eq!(sum(&slots), GRID_UNITS);
    }

    #[test]
    fn test_adjust_boundary_left() {
        let mut slots = vec![Slot::empty(6), Slot::empty(6)];
        adjust_boundary(&mut slots, 0, BoundaryShift::Left).unwrap();
        assert_eq!(widths(&slots), vec![5, 7]);
    }

    #[test]
    fn test_adjust_boundary_bad_index() {
        let mut slots = vec![Slot::empty(6), Slot::empty(6)];
        assert!(matches!(
            adjust_boundary(&mut slots, 1, BoundaryShift::Left),
            Err(GridError::BadBoundary(1, 2))
        ));
    }
}

//! Pointer and bounding-box primitives
//!
//! The rendering surface reports where each part currently sits; the
//! resolver only ever reads these values. All coordinates share the
//! surface's own space, whatever that is.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Vertical extent of a rendered part
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub top: f64,
    pub height: f64,
}

impl Band {
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }

    /// Whether `y` sits in the lower half of the band
    pub fn lower_half(&self, y: f64) -> bool {
        y >= self.top + self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    pub fn band(&self) -> Band {
        Band {
            top: self.y,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_halves() {
        let band = Band {
            top: 100.0,
            height: 40.0,
        };
        assert!(band.contains(100.0));
        assert!(band.contains(139.0));
        assert!(!band.contains(140.0));

        assert!(!band.lower_half(119.0));
        assert!(band.lower_half(120.0));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect {
            x: 10.0,
            y: 20.0,
            width: 100.0,
            height: 50.0,
        };
        assert!(rect.contains(Point { x: 10.0, y: 20.0 }));
        assert!(!rect.contains(Point { x: 110.0, y: 30.0 }));
        assert!(!rect.contains(Point { x: 50.0, y: 70.0 }));
    }
}

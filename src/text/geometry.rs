//! Rectangles in block space

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle. `x`/`y` are the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Frame {
            x,
            y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// The same rectangle moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Frame {
        Frame {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Frame) -> Frame {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Frame {
            x,
            y,
            width: self.max_x().max(other.max_x()) - x,
            height: self.max_y().max(other.max_y()) - y,
        }
    }

    /// Bounding box of a set of frames, `None` when the set is empty.
    pub fn bounding<'a>(frames: impl IntoIterator<Item = &'a Frame>) -> Option<Frame> {
        frames
            .into_iter()
            .fold(None, |acc: Option<Frame>, frame| match acc {
                Some(bounds) => Some(bounds.union(frame)),
                None => Some(*frame),
            })
    }
}

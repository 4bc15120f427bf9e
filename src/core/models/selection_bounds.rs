use serde::{Deserialize, Serialize};

/// Axis-aligned selection rectangle in screen pixel coordinates. A missing
/// rectangle (`Option::None` at call sites) means "the whole screen".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl SelectionBounds {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn has_positive_extent(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

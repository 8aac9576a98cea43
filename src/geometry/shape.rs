use egui::{Pos2, Vec2};

/// Extent of a shape dragged out from an anchor point.
///
/// Rectangles use `anchor` as a corner; ellipses use it as their center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeExtent {
    pub anchor: Pos2,
    /// Signed width and height of the drag
    pub size: Vec2,
}

impl ShapeExtent {
    /// Extent from the gesture anchor to the current pointer position.
    ///
    /// With `constrain` set, both sides take the smaller magnitude, keeping
    /// the sign of each axis, which yields a square or a circle.
    pub fn from_drag(anchor: Pos2, current: Pos2, constrain: bool) -> Self {
        let mut size = current - anchor;
        if constrain {
            let side = size.x.abs().min(size.y.abs());
            size.x = if size.x > 0.0 { side } else { -side };
            size.y = if size.y > 0.0 { side } else { -side };
        }
        Self { anchor, size }
    }

    pub fn ellipse_radii(&self) -> Vec2 {
        self.size.abs()
    }

    pub fn is_empty(&self) -> bool {
        self.size.x == 0.0 || self.size.y == 0.0
    }
}

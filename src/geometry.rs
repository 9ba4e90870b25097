//! Small geometry helpers shared by the cannon, bullets and collision test.

/// Unit direction for an angle in degrees, in screen space.
///
/// 0° points right and 90° straight up; the y component is negated because
/// screen y grows downward.
#[inline]
pub fn heading(angle_deg: f32) -> (f32, f32) {
    let rad = angle_deg.to_radians();
    (rad.cos(), -rad.sin())
}

/// Point reached by travelling `distance` from `(x, y)` along `angle_deg`.
#[inline]
pub fn project(x: f32, y: f32, angle_deg: f32, distance: f32) -> (f32, f32) {
    let (dx, dy) = heading(angle_deg);
    (x + dx * distance, y + dy * distance)
}

/// Axis-aligned rectangle with its origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// True iff the point lies strictly inside; edges do not count.
    pub fn contains_strict(&self, px: f32, py: f32) -> bool {
        px > self.x && px < self.x + self.width && py > self.y && py < self.y + self.height
    }
}

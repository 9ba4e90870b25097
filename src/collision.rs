//! Bullet ↔ target hit test.
//!
//! A bullet is treated as a point (its centre); targets are axis-aligned
//! rectangles.  Touching an edge is a miss.

use crate::entities::{Aircraft, Bullet, Parachute};
use crate::geometry::Rect;

/// Anything a bullet can shoot down.
pub trait Target {
    fn bounds(&self) -> Rect;
}

impl Target for Aircraft {
    fn bounds(&self) -> Rect {
        Aircraft::bounds(self)
    }
}

impl Target for Parachute {
    fn bounds(&self) -> Rect {
        Parachute::bounds(self)
    }
}

/// True iff the bullet's centre lies strictly inside the target's rectangle.
pub fn collides<T: Target + ?Sized>(bullet: &Bullet, target: &T) -> bool {
    target.bounds().contains_strict(bullet.x, bullet.y)
}

/// Index of the first target in `targets` hit by `bullet`, skipping indices
/// already marked in `taken`.
pub fn first_hit<T: Target>(bullet: &Bullet, targets: &[T], taken: &[bool]) -> Option<usize> {
    targets
        .iter()
        .enumerate()
        .find(|(i, t)| !taken[*i] && collides(bullet, *t))
        .map(|(i, _)| i)
}

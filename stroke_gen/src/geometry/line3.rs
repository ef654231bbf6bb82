//! Basic 3D line types used throughout the crate.

use super::{distance3, lerp3, Point3};

/// Representation of a 3D line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3 {
    pub start: Point3,
    pub end: Point3,
}

impl Line3 {
    /// Creates a new line segment.
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Returns the length of the line segment.
    pub fn length(&self) -> f64 {
        distance3(self.start, self.end)
    }

    /// Returns the point at `fraction` of the way from start to end.
    pub fn point_at(&self, fraction: f64) -> Point3 {
        lerp3(self.start, self.end, fraction)
    }

    /// Unit vector in the horizontal plane perpendicular to the segment.
    ///
    /// The horizontal direction `(dx, dz)` is turned a quarter turn clockwise.
    /// A segment without horizontal extent yields the zero vector.
    pub fn horizontal_normal(&self) -> Point3 {
        let dx = self.end.x - self.start.x;
        let dz = self.end.z - self.start.z;
        let len = dx.hypot(dz);
        if len == 0.0 {
            Point3::ORIGIN
        } else {
            Point3::new(dz / len, -dx / len, 0.0)
        }
    }
}

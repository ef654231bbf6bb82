//! Basic geometry primitives for stroke generation.

pub mod line3;
pub mod point3;

pub use line3::Line3;
pub use point3::{Axis, Point3};

/// Calculates the Euclidean distance between two 3D points.
pub fn distance3(a: Point3, b: Point3) -> f64 {
    (b - a).norm()
}

/// Linear interpolation `a * (1 - t) + b * t`.
pub fn lerp3(a: Point3, b: Point3, t: f64) -> Point3 {
    a * (1.0 - t) + b * t
}

/// Concatenates several point sequences into one.
pub fn concatenate_points<I>(sequences: I) -> Vec<Point3>
where
    I: IntoIterator<Item = Vec<Point3>>,
{
    sequences.into_iter().flatten().collect()
}

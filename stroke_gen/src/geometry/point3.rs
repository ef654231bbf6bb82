//! Basic 3D point type used throughout the crate.
//!
//! Coordinates are stored in `x, z, y` order and `y` is the vertical axis.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// One of the three coordinate axes, indexed in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Z,
    /// Vertical axis.
    Y,
}

impl Axis {
    /// Storage index of the axis inside a point row.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Z => 1,
            Axis::Y => 2,
        }
    }

    /// The two remaining axes in storage order.
    pub fn orthogonal(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Z, Axis::Y),
            Axis::Z => (Axis::X, Axis::Y),
            Axis::Y => (Axis::X, Axis::Z),
        }
    }
}

/// Representation of a 3D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub z: f64,
    pub y: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 {
        x: 0.0,
        z: 0.0,
        y: 0.0,
    };

    /// Creates a point from coordinates given in storage order.
    pub fn new(x: f64, z: f64, y: f64) -> Self {
        Self { x, z, y }
    }

    pub fn from_array(values: [f64; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.z, self.y]
    }

    /// Returns the coordinate along `axis`.
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Z => self.z,
            Axis::Y => self.y,
        }
    }

    /// Sets the coordinate along `axis`.
    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Z => self.z = value,
            Axis::Y => self.y = value,
        }
    }

    /// Euclidean length of the point seen as a vector.
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.z * self.z + self.y * self.y).sqrt()
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.z + rhs.z, self.y + rhs.y)
    }
}

impl AddAssign for Point3 {
    fn add_assign(&mut self, rhs: Point3) {
        self.x += rhs.x;
        self.z += rhs.z;
        self.y += rhs.y;
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.z - rhs.z, self.y - rhs.y)
    }
}

impl Mul<f64> for Point3 {
    type Output = Point3;

    fn mul(self, rhs: f64) -> Point3 {
        Point3::new(self.x * rhs, self.z * rhs, self.y * rhs)
    }
}

impl Neg for Point3 {
    type Output = Point3;

    fn neg(self) -> Point3 {
        Point3::new(-self.x, -self.z, -self.y)
    }
}

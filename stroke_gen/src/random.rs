//! Random point primitives: range sampling, spherical jitter and equinox points.
//!
//! Every function takes the random source explicitly so a seeded generator
//! reproduces the same geometry.

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geometry::{lerp3, Point3};

/// Inclusive `[low, high]` range of reals, written as a two element array in
/// configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct ValueRange {
    pub low: f64,
    pub high: f64,
}

impl ValueRange {
    /// The degenerate `(0, 0)` range.
    pub const ZERO: ValueRange = ValueRange::new(0.0, 0.0);
    /// The `(0, 1)` range used for interpolation fractions.
    pub const UNIT: ValueRange = ValueRange::new(0.0, 1.0);

    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// A range that always samples `value`.
    pub const fn constant(value: f64) -> Self {
        Self::new(value, value)
    }

    pub fn is_degenerate(&self) -> bool {
        self.low == self.high
    }

    /// Draws a uniform value between `low` and `high`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u: f64 = rng.random();
        self.low + (self.high - self.low) * u
    }
}

impl From<(f64, f64)> for ValueRange {
    fn from((low, high): (f64, f64)) -> Self {
        Self::new(low, high)
    }
}

impl From<ValueRange> for (f64, f64) {
    fn from(range: ValueRange) -> Self {
        (range.low, range.high)
    }
}

/// Inclusive integer range used for element counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct CountRange {
    pub low: usize,
    pub high: usize,
}

impl CountRange {
    pub const fn new(low: usize, high: usize) -> Self {
        Self { low, high }
    }

    /// Draws an integer in `min(low, high)..=max(low, high)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let (lo, hi) = (self.low.min(self.high), self.low.max(self.high));
        rng.random_range(lo..=hi)
    }
}

impl From<(usize, usize)> for CountRange {
    fn from((low, high): (usize, usize)) -> Self {
        Self::new(low, high)
    }
}

impl From<CountRange> for (usize, usize) {
    fn from(range: CountRange) -> Self {
        (range.low, range.high)
    }
}

/// Angle range expressed in either unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleRange {
    Degrees(ValueRange),
    Radians(ValueRange),
}

impl AngleRange {
    pub const ZERO: AngleRange = AngleRange::Radians(ValueRange::ZERO);

    /// The range converted to radians.
    pub fn radians(&self) -> ValueRange {
        match *self {
            AngleRange::Degrees(r) => ValueRange::new(r.low.to_radians(), r.high.to_radians()),
            AngleRange::Radians(r) => r,
        }
    }

    /// Draws an angle in radians.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.radians().sample(rng)
    }
}

/// Returns `fixed` when given, otherwise a uniform sample from `range`.
pub fn sample_value<R: Rng + ?Sized>(rng: &mut R, fixed: Option<f64>, range: ValueRange) -> f64 {
    match fixed {
        Some(value) => value,
        None => range.sample(rng),
    }
}

/// Maps spherical coordinates onto the storage axes and offsets by `base`.
pub fn spherical_to_cartesian(r: f64, theta: f64, phi: f64, base: Point3) -> Point3 {
    Point3::new(
        r * phi.cos() * theta.cos(),
        r * phi.cos() * theta.sin(),
        r * phi.sin(),
    ) + base
}

/// Per-axis description of a random point: fixed values win over ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSampler {
    pub x: Option<f64>,
    pub z: Option<f64>,
    pub y: Option<f64>,
    pub x_range: ValueRange,
    pub z_range: ValueRange,
    pub y_range: ValueRange,
    pub dithering: ValueRange,
}

impl Default for PointSampler {
    fn default() -> Self {
        Self {
            x: None,
            z: None,
            y: None,
            x_range: ValueRange::ZERO,
            z_range: ValueRange::ZERO,
            y_range: ValueRange::ZERO,
            dithering: ValueRange::ZERO,
        }
    }
}

impl PointSampler {
    /// A sampler pinned to `point`, optionally dithered.
    pub fn fixed(point: Point3, dithering: ValueRange) -> Self {
        Self {
            x: Some(point.x),
            z: Some(point.z),
            y: Some(point.y),
            dithering,
            ..Self::default()
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point3 {
        make_point3d(rng, self)
    }
}

/// Samples every axis independently, then dithers the result.
pub fn make_point3d<R: Rng + ?Sized>(rng: &mut R, sampler: &PointSampler) -> Point3 {
    let point = Point3::new(
        sample_value(rng, sampler.x, sampler.x_range),
        sample_value(rng, sampler.z, sampler.z_range),
        sample_value(rng, sampler.y, sampler.y_range),
    );
    dither(rng, point, sampler.dithering)
}

/// Adds a spherical offset with radius drawn from `radius_range`.
pub fn dither<R: Rng + ?Sized>(rng: &mut R, point: Point3, radius_range: ValueRange) -> Point3 {
    let r = radius_range.sample(rng);
    let theta = rng.random::<f64>() * TAU;
    let phi = rng.random::<f64>() * TAU;
    point + spherical_to_cartesian(r, theta, phi, Point3::ORIGIN)
}

/// Dithers each point independently.
pub fn dither_all<R: Rng + ?Sized>(
    rng: &mut R,
    points: &[Point3],
    radius_range: ValueRange,
) -> Vec<Point3> {
    points
        .iter()
        .map(|&p| dither(rng, p, radius_range))
        .collect()
}

/// Point at a fraction of the way from `a` to `b`, then dithered.
pub fn equinox_point<R: Rng + ?Sized>(
    rng: &mut R,
    a: Point3,
    b: Point3,
    fraction: Option<f64>,
    fraction_range: ValueRange,
    dithering: ValueRange,
) -> Point3 {
    let f = sample_value(rng, fraction, fraction_range);
    dither(rng, lerp3(a, b, f), dithering)
}

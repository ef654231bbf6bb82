use std::f64::consts::PI;

use rand::Rng;

use crate::geometry::Point3;
use crate::random::{dither_all, sample_value, AngleRange, ValueRange};

/// Parameters of a circular arc standing in a vertical plane.
///
/// Fixed values take precedence over their ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    pub density: f64,
    pub radius: Option<f64>,
    pub radius_range: ValueRange,
    /// Angular span of the arc.
    pub theta: Option<f64>,
    pub theta_range: AngleRange,
    /// Rotation of the arc plane about the vertical axis.
    pub rotation: Option<f64>,
    pub rotation_range: AngleRange,
    /// Height of the chord.
    pub y: Option<f64>,
    pub y_range: ValueRange,
    pub base: Point3,
    pub point_dithering: ValueRange,
}

impl Default for ArcParams {
    fn default() -> Self {
        Self {
            density: 1.0,
            radius: None,
            radius_range: ValueRange::constant(1.0),
            theta: None,
            theta_range: AngleRange::Degrees(ValueRange::constant(90.0)),
            rotation: None,
            rotation_range: AngleRange::ZERO,
            y: None,
            y_range: ValueRange::ZERO,
            base: Point3::ORIGIN,
            point_dithering: ValueRange::ZERO,
        }
    }
}

/// Samples `floor(r·θ / density)` points along a circular arc of span `θ`.
///
/// The arc is symmetric about the vertical, its chord sits at height `y`, and
/// the whole arc is turned about the vertical axis by the rotation angle and
/// offset by `base`.
pub fn vertical_arc<R: Rng + ?Sized>(rng: &mut R, params: &ArcParams) -> Vec<Point3> {
    let r = sample_value(rng, params.radius, params.radius_range);
    let theta = sample_value(rng, params.theta, params.theta_range.radians());
    let rot = sample_value(rng, params.rotation, params.rotation_range.radians());
    let y = sample_value(rng, params.y, params.y_range);

    let n = (r * theta / params.density).floor();
    let count = if n.is_finite() && n > 0.0 { n as usize } else { 0 };
    let start = (PI - theta) / 2.0;
    let center = Point3::new(0.0, 0.0, -r * start.sin());

    let points: Vec<Point3> = (0..count)
        .map(|i| {
            let phi = i as f64 / count as f64 * theta + start;
            Point3::new(
                r * phi.cos() * rot.sin(),
                r * phi.cos() * rot.cos(),
                r * phi.sin() + y,
            ) + center
                + params.base
        })
        .collect();
    dither_all(rng, &points, params.point_dithering)
}

//! Curve generators: bowed open curves, ellipses and vertical arcs.
//!
//! A "line" between two points is always slightly bowed. The bend comes from
//! three random interior control points placed between the endpoints.

pub mod arc;
pub mod bezier;

pub use arc::{vertical_arc, ArcParams};
pub use bezier::{arclength_to_parameter, bezier_arclength, bezier_curve, bezier_speed};

use std::cmp::Ordering;
use std::f64::consts::TAU;

use log::warn;
use rand::Rng;

use crate::geometry::{distance3, Axis, Point3};
use crate::random::{dither_all, equinox_point, ValueRange};

/// Sort priority x, z, y.
pub const XZY: [Axis; 3] = [Axis::X, Axis::Z, Axis::Y];
/// Sort priority z, x, y.
pub const ZXY: [Axis; 3] = [Axis::Z, Axis::X, Axis::Y];
/// Sort priority y, z, x; keeps dropped lines vertically monotone.
pub const YZX: [Axis; 3] = [Axis::Y, Axis::Z, Axis::X];

/// Sampling parameters shared by every open curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveStyle {
    /// Distance between consecutive samples.
    pub density: f64,
    /// Fraction range for the interior control points.
    pub equinox_range: ValueRange,
    /// Dithering of the interior control points.
    pub endpoint_dithering: ValueRange,
    /// Dithering of every produced point.
    pub point_dithering: ValueRange,
    pub uniform_velocity: bool,
}

impl Default for CurveStyle {
    fn default() -> Self {
        Self {
            density: 1.0,
            equinox_range: ValueRange::UNIT,
            endpoint_dithering: ValueRange::ZERO,
            point_dithering: ValueRange::ZERO,
            uniform_velocity: false,
        }
    }
}

impl CurveStyle {
    pub fn with_endpoint_dithering(self, endpoint_dithering: ValueRange) -> Self {
        Self {
            endpoint_dithering,
            ..self
        }
    }
}

/// Sorts `points` by a composite key over `priority`.
///
/// The key of an axis is negated when its storage-order flag in `reverse` is
/// set.
pub fn sort_points(points: &mut [Point3], priority: [Axis; 3], reverse: [bool; 3]) {
    let key = |p: &Point3, axis: Axis| {
        let v = p.get(axis);
        if reverse[axis.index()] {
            -v
        } else {
            v
        }
    };
    points.sort_by(|a, b| {
        priority
            .iter()
            .map(|&axis| key(a, axis).total_cmp(&key(b, axis)))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
}

/// `count` evenly spaced values from 0 to 1 inclusive.
pub fn linspace(count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        n => (0..n).map(|i| i as f64 / (n - 1) as f64).collect(),
    }
}

/// Number of samples for a curve of `length` at `density`.
pub fn sample_count(length: f64, density: f64) -> usize {
    let n = (length / density).round();
    if n.is_finite() && n > 0.0 {
        n as usize
    } else {
        0
    }
}

/// Bowed curve from `a` to `b` through three random interior control points.
///
/// The interior points are sorted along `priority` in the direction running
/// from `a` to `b` so the control polygon does not fold back on itself.
pub fn open_curve<R: Rng + ?Sized>(
    rng: &mut R,
    a: Point3,
    b: Point3,
    priority: [Axis; 3],
    style: &CurveStyle,
) -> Vec<Point3> {
    let mut interior: Vec<Point3> = (0..3)
        .map(|_| equinox_point(rng, a, b, None, style.equinox_range, style.endpoint_dithering))
        .collect();
    let delta = a - b;
    let reverse = [delta.x > 0.0, delta.z > 0.0, delta.y > 0.0];
    sort_points(&mut interior, priority, reverse);

    let mut control = Vec::with_capacity(5);
    control.push(a);
    control.extend(interior);
    control.push(b);

    let t_values = linspace(sample_count(distance3(a, b), style.density));
    bezier_curve(rng, &control, &t_values, style.point_dithering, style.uniform_velocity)
}

/// Same as [`open_curve`]; lines in generated geometry are never perfectly straight.
pub fn straight_line3d<R: Rng + ?Sized>(
    rng: &mut R,
    a: Point3,
    b: Point3,
    priority: [Axis; 3],
    style: &CurveStyle,
) -> Vec<Point3> {
    open_curve(rng, a, b, priority, style)
}

/// Closed ellipse `x = a cos θ, z = b sin θ` at height `y`.
///
/// Produces `floor(2πb + 4(a − b) / density)` angularly uniform points, each
/// dithered on its own.
pub fn ellipse_curve<R: Rng + ?Sized>(
    rng: &mut R,
    a: f64,
    b: f64,
    y: f64,
    density: f64,
    dithering: ValueRange,
) -> Vec<Point3> {
    let n = (TAU * b + 4.0 * (a - b) / density).floor();
    let count = if n.is_finite() && n > 0.0 { n as usize } else { 0 };
    let points: Vec<Point3> = (0..count)
        .map(|i| {
            let th = i as f64 / count as f64 * TAU;
            Point3::new(a * th.cos(), b * th.sin(), y)
        })
        .collect();
    dither_all(rng, &points, dithering)
}

/// Joins a random point of `first` to a random point of `second`.
pub fn connecting_line<R: Rng + ?Sized>(
    rng: &mut R,
    first: &[Point3],
    second: &[Point3],
    priority: [Axis; 3],
    style: &CurveStyle,
) -> Vec<Point3> {
    if first.is_empty() || second.is_empty() {
        warn!("connecting line skipped: one of the curves has no points");
        return Vec::new();
    }
    let a = first[rng.random_range(0..first.len())];
    let b = second[rng.random_range(0..second.len())];
    open_curve(rng, a, b, priority, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sort_respects_priority_and_reverse() {
        let mut pts = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        sort_points(&mut pts, XZY, [false; 3]);
        assert_eq!(pts[0], Point3::new(0.0, 1.0, 0.0));
        assert_eq!(pts[2], Point3::new(1.0, 0.0, 0.0));

        sort_points(&mut pts, XZY, [true, false, false]);
        assert_eq!(pts[0], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(pts[1], Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn linspace_includes_both_ends() {
        assert!(linspace(0).is_empty());
        assert_eq!(linspace(1), vec![0.0]);
        assert_eq!(linspace(3), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn sample_count_rounds() {
        assert_eq!(sample_count(10f64.sqrt(), 1.0), 3);
        assert_eq!(sample_count(2.6, 1.0), 3);
        assert_eq!(sample_count(1.0, 0.0), 0);
    }

    #[test]
    fn open_curve_runs_between_endpoints() {
        let mut rng = StdRng::seed_from_u64(21);
        let a = Point3::new(-2.0, 1.0, 0.0);
        let b = Point3::new(3.0, -1.0, 2.0);
        let style = CurveStyle {
            density: 0.25,
            ..CurveStyle::default()
        };
        let curve = open_curve(&mut rng, a, b, XZY, &style);
        assert_eq!(curve.len(), sample_count(distance3(a, b), 0.25));
        assert_eq!(curve[0], a);
        assert!((curve[curve.len() - 1] - b).norm() < 1e-9);
        assert!(curve.iter().all(|p| p.x >= -2.0 - 1e-9 && p.x <= 3.0 + 1e-9));
    }

    #[test]
    fn fixed_equinox_gives_straight_segment() {
        let mut rng = StdRng::seed_from_u64(8);
        let style = CurveStyle {
            equinox_range: ValueRange::constant(0.5),
            ..CurveStyle::default()
        };
        let a = Point3::new(1.0, 0.0, 0.0);
        let b = Point3::new(0.0, 0.0, 3.0);
        let curve = straight_line3d(&mut rng, a, b, YZX, &style);
        assert_eq!(curve.len(), 3);
        assert!(curve.iter().all(|p| p.z == 0.0));
        assert!((curve[1] - Point3::new(0.5, 0.0, 1.5)).norm() < 1e-12);
    }

    #[test]
    fn ellipse_count_and_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let pts = ellipse_curve(&mut rng, 2.0, 1.0, 0.0, 0.5, ValueRange::ZERO);
        assert_eq!(pts.len(), 14);
        for p in &pts {
            assert!(((p.x / 2.0).powi(2) + p.z.powi(2) - 1.0).abs() < 1e-9);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn connecting_line_needs_both_curves() {
        let mut rng = StdRng::seed_from_u64(2);
        let a = vec![Point3::new(0.0, 0.0, 0.0)];
        let style = CurveStyle::default();
        assert!(connecting_line(&mut rng, &a, &[], XZY, &style).is_empty());
        let b = vec![Point3::new(5.0, 0.0, 0.0)];
        let line = connecting_line(&mut rng, &a, &b, XZY, &style);
        assert_eq!(line.len(), 5);
        assert_eq!(line[0], a[0]);
    }
}

//! Vertical "drop" lines hanging from points, segments and curves.
//!
//! Every variant picks a top point, samples a bottom height below it and
//! then leans the line by a random dip angle along a horizontal normal.

use log::warn;
use nalgebra::{DMatrix, DVector, SVD};
use rand::Rng;

use crate::curve::{open_curve, CurveStyle, YZX};
use crate::geometry::{Line3, Point3};
use crate::random::{dither, equinox_point, make_point3d, AngleRange, PointSampler, ValueRange};

/// Parameters shared by the drop line variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropStyle {
    pub density: f64,
    pub equinox_range: ValueRange,
    /// Fraction range of the top point along a segment.
    pub endpoint_equinox_range: ValueRange,
    /// Dithering of the top and bottom points.
    pub endpoint_dithering: ValueRange,
    pub point_dithering: ValueRange,
    pub uniform_velocity: bool,
    pub bottom_y: Option<f64>,
    pub bottom_y_range: ValueRange,
    pub dip: AngleRange,
}

impl Default for DropStyle {
    fn default() -> Self {
        Self {
            density: 1.0,
            equinox_range: ValueRange::UNIT,
            endpoint_equinox_range: ValueRange::UNIT,
            endpoint_dithering: ValueRange::ZERO,
            point_dithering: ValueRange::ZERO,
            uniform_velocity: false,
            bottom_y: None,
            bottom_y_range: ValueRange::ZERO,
            dip: AngleRange::ZERO,
        }
    }
}

impl DropStyle {
    fn curve_style(&self) -> CurveStyle {
        CurveStyle {
            density: self.density,
            equinox_range: self.equinox_range,
            endpoint_dithering: ValueRange::ZERO,
            point_dithering: self.point_dithering,
            uniform_velocity: self.uniform_velocity,
        }
    }

    fn bottom_below<R: Rng + ?Sized>(&self, rng: &mut R, top: Point3) -> Point3 {
        let sampler = PointSampler {
            x: Some(top.x),
            z: Some(top.z),
            y: self.bottom_y,
            y_range: self.bottom_y_range,
            dithering: self.endpoint_dithering,
            ..PointSampler::default()
        };
        make_point3d(rng, &sampler)
    }
}

/// Draws the line from `top` to `bottom` shifted along `normal`.
///
/// The shift is `tan(dip) · (top.y − bottom.y)` with `dip` drawn from
/// `dip`.
pub fn drop_line_by_normal<R: Rng + ?Sized>(
    rng: &mut R,
    top: Point3,
    bottom: Point3,
    normal: Point3,
    dip: AngleRange,
    style: &CurveStyle,
) -> Vec<Point3> {
    let angle = dip.sample(rng);
    let bottom = bottom + normal * (angle.tan() * (top.y - bottom.y));
    let style = style.with_endpoint_dithering(ValueRange::ZERO);
    open_curve(rng, top, bottom, YZX, &style)
}

/// Plumb line below `point`.
pub fn drop_line_from_point<R: Rng + ?Sized>(
    rng: &mut R,
    point: Point3,
    style: &DropStyle,
) -> Vec<Point3> {
    let top = dither(rng, point, style.endpoint_dithering);
    let bottom = style.bottom_below(rng, top);
    drop_line_by_normal(rng, top, bottom, Point3::ORIGIN, AngleRange::ZERO, &style.curve_style())
}

/// Line hanging from a random point of `segment`, leaning across it.
pub fn drop_line_from_segment<R: Rng + ?Sized>(
    rng: &mut R,
    segment: Line3,
    style: &DropStyle,
) -> Vec<Point3> {
    let top = equinox_point(
        rng,
        segment.start,
        segment.end,
        None,
        style.endpoint_equinox_range,
        style.endpoint_dithering,
    );
    let bottom = style.bottom_below(rng, top);
    let normal = segment.horizontal_normal();
    drop_line_by_normal(rng, top, bottom, normal, style.dip, &style.curve_style())
}

/// Line hanging from a random point of `curve`, leaning along the local normal.
///
/// Neighbours wrap around the ends of the curve. An empty curve yields no
/// points.
pub fn drop_line_from_curve<R: Rng + ?Sized>(
    rng: &mut R,
    curve: &[Point3],
    style: &DropStyle,
) -> Vec<Point3> {
    let len = curve.len();
    if len == 0 {
        warn!("drop line skipped: curve has no points");
        return Vec::new();
    }
    let i = rng.random_range(0..len);
    let top = dither(rng, curve[i], style.endpoint_dithering);
    let bottom = style.bottom_below(rng, top);
    let normal = curve_normal([curve[(i + len - 1) % len], curve[i], curve[(i + 1) % len]]);
    drop_line_by_normal(rng, top, bottom, normal, style.dip, &style.curve_style())
}

fn pseudoinverse(m: &DMatrix<f64>, tol: f64) -> Option<DMatrix<f64>> {
    let svd = SVD::new(m.clone(), true, true);
    let mut s_inv = svd.singular_values.clone();
    for val in s_inv.iter_mut() {
        *val = if *val > tol { 1.0 / *val } else { 0.0 };
    }
    let u = svd.u?;
    let vt = svd.v_t?;
    Some(vt.transpose() * DMatrix::from_diagonal(&s_inv) * u.transpose())
}

/// Horizontal unit normal at the middle of three consecutive points.
///
/// Fits a parabola through the horizontal coordinates, parameterised by chord
/// distance from the middle point, and turns its tangent a quarter turn.
/// Degenerate fits yield the zero vector.
pub fn curve_normal(points: [Point3; 3]) -> Point3 {
    let [p0, p1, p2] = points;
    let ta = (p1.x - p0.x).hypot(p1.z - p0.z);
    let tb = (p2.x - p1.x).hypot(p2.z - p1.z);
    if ta == 0.0 && tb == 0.0 {
        return Point3::ORIGIN;
    }
    let mat = DMatrix::from_row_slice(3, 3, &[1.0, -ta, ta * ta, 1.0, 0.0, 0.0, 1.0, tb, tb * tb]);
    let Some(pinv) = pseudoinverse(&mat, 1e-12) else {
        return Point3::ORIGIN;
    };
    let a = &pinv * DVector::from_column_slice(&[p0.x, p1.x, p2.x]);
    let b = &pinv * DVector::from_column_slice(&[p0.z, p1.z, p2.z]);
    let norm = a[1].hypot(b[1]);
    if !(norm > 1e-12) || !norm.is_finite() {
        return Point3::ORIGIN;
    }
    Point3::new(b[1] / norm, -a[1] / norm, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn flat_style() -> DropStyle {
        DropStyle {
            bottom_y_range: ValueRange::constant(0.0),
            equinox_range: ValueRange::constant(0.5),
            ..DropStyle::default()
        }
    }

    #[test]
    fn point_drop_is_plumb() {
        let mut rng = StdRng::seed_from_u64(12);
        let line = drop_line_from_point(&mut rng, Point3::new(1.0, 2.0, 4.0), &flat_style());
        assert_eq!(line.len(), 4);
        assert_eq!(line[0], Point3::new(1.0, 2.0, 4.0));
        for p in &line {
            assert!((p.x - 1.0).abs() < 1e-12);
            assert!((p.z - 2.0).abs() < 1e-12);
        }
        assert!(line[line.len() - 1].y.abs() < 1e-12);
    }

    #[test]
    fn segment_drop_leans_across_the_segment() {
        let mut rng = StdRng::seed_from_u64(5);
        let style = DropStyle {
            endpoint_equinox_range: ValueRange::constant(0.5),
            dip: AngleRange::Degrees(ValueRange::constant(45.0)),
            ..flat_style()
        };
        let segment = Line3::new(Point3::new(0.0, 0.0, 3.0), Point3::new(2.0, 0.0, 3.0));
        let line = drop_line_from_segment(&mut rng, segment, &style);
        assert_eq!(line[0], Point3::new(1.0, 0.0, 3.0));
        let bottom = line[line.len() - 1];
        assert!((bottom.x - 1.0).abs() < 1e-9);
        assert!((bottom.z.abs() - 3.0).abs() < 1e-9);
        assert!(bottom.y.abs() < 1e-9);
    }

    #[test]
    fn curve_normal_of_circle_points_outward_or_inward() {
        let pts = [
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
        ];
        let n = curve_normal(pts);
        assert!((n.norm() - 1.0).abs() < 1e-9);
        assert!(n.x.abs() < 1e-9);
        assert!((n.z.abs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn coincident_points_give_zero_normal() {
        let p = Point3::new(1.0, 1.0, 1.0);
        assert_eq!(curve_normal([p, p, p]), Point3::ORIGIN);
    }

    #[test]
    fn curve_drop_starts_on_the_curve() {
        let mut rng = StdRng::seed_from_u64(30);
        let curve: Vec<Point3> = (0..8)
            .map(|i| {
                let th = i as f64 / 8.0 * std::f64::consts::TAU;
                Point3::new(2.0 * th.cos(), 2.0 * th.sin(), 3.0)
            })
            .collect();
        let style = DropStyle {
            dip: AngleRange::Degrees(ValueRange::new(0.0, 10.0)),
            ..flat_style()
        };
        let line = drop_line_from_curve(&mut rng, &curve, &style);
        assert!(!line.is_empty());
        assert!(curve.iter().any(|c| (*c - line[0]).norm() < 1e-12));
        assert!(line[line.len() - 1].y.abs() < 1e-9);
        assert!(drop_line_from_curve(&mut rng, &[], &style).is_empty());
    }
}

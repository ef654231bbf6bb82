//! Bézier evaluation with optional arc-length reparameterisation.

use log::warn;
use rand::Rng;

use crate::geometry::Point3;
use crate::random::{dither_all, ValueRange};

/// Length tolerance of the arc-length bisection.
pub const EPSILON: f64 = 0.001;
/// Iteration cap of the arc-length bisection.
pub const MAX_BISECTION_STEPS: usize = 60;
/// Simpson samples used when evaluating at uniform velocity.
pub const DEFAULT_SUBDIVISIONS: usize = 32;

fn binomial(n: usize, k: usize) -> f64 {
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Bernstein basis polynomial `b_{i,n}(t)`.
pub fn bernstein(i: usize, n: usize, t: f64) -> f64 {
    binomial(n, i) * t.powi(i as i32) * (1.0 - t).powi((n - i) as i32)
}

/// Point of the curve at parameter `t`; `control[0]` is the start.
pub fn bezier_point(control: &[Point3], t: f64) -> Point3 {
    let Some(n) = control.len().checked_sub(1) else {
        return Point3::ORIGIN;
    };
    control
        .iter()
        .enumerate()
        .fold(Point3::ORIGIN, |acc, (i, &p)| acc + p * bernstein(i, n, t))
}

/// Magnitude of the derivative at `t`.
pub fn bezier_speed(control: &[Point3], t: f64) -> f64 {
    let n = control.len();
    if n < 2 {
        return 0.0;
    }
    let degree = n - 1;
    let derivative = control
        .windows(2)
        .enumerate()
        .fold(Point3::ORIGIN, |acc, (i, w)| {
            acc + (w[1] - w[0]) * bernstein(i, degree - 1, t)
        });
    (derivative * degree as f64).norm()
}

/// Arc length from `0` to `t` by composite Simpson's rule.
///
/// `subdivisions` is the number of speed samples, rounded up to an odd count
/// of at least three.
pub fn bezier_arclength(control: &[Point3], t: f64, subdivisions: usize) -> f64 {
    let mut samples = subdivisions.max(3);
    if samples % 2 == 0 {
        samples += 1;
    }
    let intervals = samples - 1;
    let h = t / intervals as f64;
    let mut sum = bezier_speed(control, 0.0) + bezier_speed(control, t);
    for k in 1..intervals {
        let weight = if k % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * bezier_speed(control, k as f64 * h);
    }
    sum * h / 3.0
}

/// Finds the parameter whose arc length from the start is `target_length`.
///
/// Bisects `[0, 1]` until the length error is within [`EPSILON`]. Targets
/// outside `[0, total]` are clamped. Hitting the iteration cap logs a warning
/// and returns the best estimate.
pub fn arclength_to_parameter(control: &[Point3], target_length: f64, subdivisions: usize) -> f64 {
    let total = bezier_arclength(control, 1.0, subdivisions);
    parameter_for_length(control, target_length, total, subdivisions)
}

fn parameter_for_length(control: &[Point3], target: f64, total: f64, subdivisions: usize) -> f64 {
    if !(total > 0.0) || target <= 0.0 {
        return 0.0;
    }
    if target >= total {
        return 1.0;
    }
    let (mut low, mut high) = (0.0, 1.0);
    let mut mid = 0.5;
    for _ in 0..MAX_BISECTION_STEPS {
        mid = 0.5 * (low + high);
        let error = bezier_arclength(control, mid, subdivisions) - target;
        if error.abs() <= EPSILON {
            return mid;
        }
        if error > 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }
    warn!(
        "arc length bisection did not converge for target {target:.6} of {total:.6}, using t = {mid:.6}"
    );
    mid
}

/// Evaluates the curve at each of `t_values`, then dithers every point.
///
/// With `uniform_velocity` the values are read as fractions of the total arc
/// length, so the produced points are evenly spaced along the curve.
pub fn bezier_curve<R: Rng + ?Sized>(
    rng: &mut R,
    control: &[Point3],
    t_values: &[f64],
    dithering: ValueRange,
    uniform_velocity: bool,
) -> Vec<Point3> {
    let points: Vec<Point3> = if uniform_velocity {
        let total = bezier_arclength(control, 1.0, DEFAULT_SUBDIVISIONS);
        t_values
            .iter()
            .map(|&s| {
                let t = parameter_for_length(control, s * total, total, DEFAULT_SUBDIVISIONS);
                bezier_point(control, t)
            })
            .collect()
    } else {
        t_values.iter().map(|&t| bezier_point(control, t)).collect()
    };
    dither_all(rng, &points, dithering)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn straight() -> Vec<Point3> {
        (0..5)
            .map(|i| Point3::new(i as f64, 0.0, 0.0))
            .collect()
    }

    fn bowed() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.5, 0.0, 2.0),
            Point3::new(1.5, 1.0, 3.0),
            Point3::new(3.0, 0.0, 2.0),
            Point3::new(4.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn bernstein_partition_of_unity() {
        for &t in &[0.0, 0.2, 0.5, 0.9, 1.0] {
            let sum: f64 = (0..=4).map(|i| bernstein(i, 4, t)).sum();
            assert!((sum - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn curve_interpolates_endpoints() {
        let cp = bowed();
        assert_eq!(bezier_point(&cp, 0.0), cp[0]);
        let end = bezier_point(&cp, 1.0);
        assert!((end - cp[4]).norm() < 1e-12);
    }

    #[test]
    fn speed_of_evenly_spaced_line_is_constant() {
        let cp = straight();
        for &t in &[0.0, 0.3, 0.7, 1.0] {
            assert!((bezier_speed(&cp, t) - 4.0).abs() < 1e-9);
        }
        assert!((bezier_arclength(&cp, 1.0, 10) - 4.0).abs() < 1e-9);
        assert!((bezier_arclength(&cp, 0.5, 10) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn arclength_round_trip() {
        let cp = bowed();
        let total = bezier_arclength(&cp, 1.0, DEFAULT_SUBDIVISIONS);
        for step in 0..=10 {
            let target = total * step as f64 / 10.0;
            let t = arclength_to_parameter(&cp, target, DEFAULT_SUBDIVISIONS);
            let length = bezier_arclength(&cp, t, DEFAULT_SUBDIVISIONS);
            assert!((length - target).abs() <= EPSILON, "target {target} got {length}");
        }
    }

    #[test]
    fn degenerate_curve_maps_to_start() {
        let cp = vec![Point3::new(1.0, 1.0, 1.0); 5];
        assert_eq!(arclength_to_parameter(&cp, 0.5, 8), 0.0);
    }

    #[test]
    fn uniform_velocity_spaces_points_evenly() {
        let mut rng = StdRng::seed_from_u64(4);
        let cp = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.1, 0.0, 0.0),
            Point3::new(0.2, 0.0, 0.0),
            Point3::new(0.3, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
        ];
        let ts: Vec<f64> = (0..5).map(|i| i as f64 / 4.0).collect();
        let pts = bezier_curve(&mut rng, &cp, &ts, ValueRange::ZERO, true);
        for w in pts.windows(2) {
            assert!(((w[1].x - w[0].x) - 1.0).abs() < 0.01);
        }
        let plain = bezier_curve(&mut rng, &cp, &ts, ValueRange::ZERO, false);
        assert!((plain[1].x - 1.0).abs() > 0.1);
    }
}

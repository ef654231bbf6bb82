use rand::Rng;
use serde::Deserialize;

use super::{corners, CORNER_SIGNS};
use crate::config::BaseConfig;
use crate::curve::{straight_line3d, XZY, YZX};
use crate::error::StrokeResult;
use crate::geometry::Point3;
use crate::random::{dither, make_point3d, PointSampler, ValueRange};
use crate::strokes::Strokes;

/// Ridge end each eave corner is joined to.
const RIDGE_END: [usize; 4] = [0, 1, 1, 0];

/// Hip roof: a ridge line and four hip lines.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HipConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    pub point_bottom_plane_range: ValueRange,
    pub point_top_x_range: ValueRange,
    pub point_top_z_range: ValueRange,
    pub height_range: ValueRange,
    pub bottom_y_range: ValueRange,
    pub endpoint_dithering: ValueRange,
}

impl HipConfig {
    pub fn generate_strokes<R: Rng + ?Sized>(&self, rng: &mut R) -> StrokeResult<Strokes> {
        let bottom_corner = make_point3d(
            rng,
            &PointSampler {
                x_range: self.point_bottom_plane_range,
                z_range: self.point_bottom_plane_range,
                y_range: self.bottom_y_range,
                ..PointSampler::default()
            },
        );
        let ridge_point = make_point3d(
            rng,
            &PointSampler {
                x_range: self.point_top_x_range,
                z_range: self.point_top_z_range,
                y_range: self.height_range,
                ..PointSampler::default()
            },
        );
        let ridge: Vec<Point3> = CORNER_SIGNS[..2]
            .iter()
            .map(|&(sx, sz)| {
                let end = Point3::new(sx * ridge_point.x, sz * ridge_point.z, ridge_point.y);
                dither(rng, end, self.endpoint_dithering)
            })
            .collect();
        let eaves = corners(rng, bottom_corner, self.endpoint_dithering);

        let style = self.base.curve_style(self.endpoint_dithering);
        let mut curves: Vec<_> = (0..4)
            .map(|i| straight_line3d(rng, ridge[RIDGE_END[i]], eaves[i], YZX, &style))
            .collect();
        curves.push(straight_line3d(rng, ridge[0], ridge[1], XZY, &style));

        let mut strokes = Strokes::load_points(curves)?;
        self.base.place(rng, &mut strokes);
        Ok(strokes)
    }
}

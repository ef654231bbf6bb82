use rand::Rng;
use serde::Deserialize;

use super::corners;
use crate::config::BaseConfig;
use crate::curve::{connecting_line, straight_line3d, XZY, YZX};
use crate::error::StrokeResult;
use crate::random::{make_point3d, PointSampler, ValueRange};
use crate::strokes::Strokes;

/// Frustum-like block: four sloped edges, two top edges and a joining line.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PlatformConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    pub point_bottom_plane_range: ValueRange,
    pub point_top_plane_range: ValueRange,
    pub height_range: ValueRange,
    pub bottom_y_range: ValueRange,
    pub endpoint_dithering: ValueRange,
}

impl PlatformConfig {
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
        let top_corner = make_point3d(
            rng,
            &PointSampler {
                x_range: self.point_top_plane_range,
                z_range: self.point_top_plane_range,
                y_range: self.height_range,
                ..PointSampler::default()
            },
        );
        let top = corners(rng, top_corner, self.endpoint_dithering);
        let bottom = corners(rng, bottom_corner, self.endpoint_dithering);

        let style = self.base.curve_style(self.endpoint_dithering);
        let mut curves: Vec<_> = (0..4)
            .map(|i| straight_line3d(rng, top[i], bottom[i], YZX, &style))
            .collect();
        let front = straight_line3d(rng, top[0], top[1], XZY, &style);
        let back = straight_line3d(rng, top[2], top[3], XZY, &style);
        let across = connecting_line(rng, &front, &back, XZY, &style);
        curves.extend([front, back, across]);

        let mut strokes = Strokes::load_points(curves)?;
        self.base.place(rng, &mut strokes);
        Ok(strokes)
    }
}

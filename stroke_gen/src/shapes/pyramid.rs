use rand::Rng;
use serde::Deserialize;

use crate::config::BaseConfig;
use crate::curve::{straight_line3d, YZX};
use crate::error::StrokeResult;
use crate::random::{make_point3d, CountRange, PointSampler, ValueRange};
use crate::strokes::Strokes;

/// Lines from a peak down to a random number of base points.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PyramidConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    pub point_plane_range: ValueRange,
    pub height_range: ValueRange,
    pub bottom_y_range: ValueRange,
    pub endpoint_dithering: ValueRange,
    pub point_num_range: CountRange,
}

impl PyramidConfig {
    pub fn generate_strokes<R: Rng + ?Sized>(&self, rng: &mut R) -> StrokeResult<Strokes> {
        let peak = make_point3d(
            rng,
            &PointSampler {
                x: Some(0.0),
                z: Some(0.0),
                y_range: self.height_range,
                dithering: self.endpoint_dithering,
                ..PointSampler::default()
            },
        );
        let count = self.point_num_range.sample(rng);
        let footing = PointSampler {
            x_range: self.point_plane_range,
            z_range: self.point_plane_range,
            y_range: self.bottom_y_range,
            dithering: self.endpoint_dithering,
            ..PointSampler::default()
        };
        let feet: Vec<_> = (0..count).map(|_| footing.sample(rng)).collect();

        let style = self.base.curve_style(ValueRange::ZERO);
        let lines: Vec<_> = feet
            .iter()
            .map(|&foot| straight_line3d(rng, peak, foot, YZX, &style))
            .collect();

        let mut strokes = Strokes::load_points(lines)?;
        self.base.place(rng, &mut strokes);
        Ok(strokes)
    }
}

use rand::Rng;
use serde::Deserialize;

use crate::config::BaseConfig;
use crate::curve::{straight_line3d, YZX};
use crate::error::StrokeResult;
use crate::random::{make_point3d, PointSampler, ValueRange};
use crate::strokes::Strokes;

/// Two slanted lines meeting at a peak above the origin.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ConeConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    pub radius_range: ValueRange,
    pub height_range: ValueRange,
    pub endpoint_dithering: ValueRange,
}

impl ConeConfig {
    pub fn generate_strokes<R: Rng + ?Sized>(&self, rng: &mut R) -> StrokeResult<Strokes> {
        let foot = make_point3d(
            rng,
            &PointSampler {
                x_range: self.radius_range,
                z: Some(0.0),
                y: Some(0.0),
                ..PointSampler::default()
            },
        );
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

        let style = self.base.curve_style(ValueRange::ZERO);
        let left = straight_line3d(rng, foot, peak, YZX, &style);
        let right = straight_line3d(rng, -foot, peak, YZX, &style);

        let mut strokes = Strokes::load_points([left, right])?;
        self.base.place(rng, &mut strokes);
        Ok(strokes)
    }
}

use rand::Rng;
use serde::Deserialize;

use crate::config::BaseConfig;
use crate::curve::{connecting_line, vertical_arc, ArcParams, XZY};
use crate::error::StrokeResult;
use crate::random::{make_point3d, AngleRange, PointSampler, ValueRange};
use crate::strokes::Strokes;

/// Two facing roof arcs joined by a ridge line.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ShedConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    pub point_x_range: ValueRange,
    pub th_degree_range: ValueRange,
    pub r_range: ValueRange,
    pub bottom_y_range: ValueRange,
    pub arc_rot_degree_range: ValueRange,
    pub endpoint_dithering: ValueRange,
}

impl ShedConfig {
    pub fn generate_strokes<R: Rng + ?Sized>(&self, rng: &mut R) -> StrokeResult<Strokes> {
        let offset = make_point3d(
            rng,
            &PointSampler {
                x_range: self.point_x_range,
                z: Some(0.0),
                y: Some(0.0),
                dithering: self.base.point_dithering,
                ..PointSampler::default()
            },
        );
        let r = self.r_range.sample(rng);
        let theta = AngleRange::Degrees(self.th_degree_range).sample(rng);

        let params = ArcParams {
            density: self.base.density,
            radius: Some(r),
            theta: Some(theta),
            rotation_range: AngleRange::Degrees(self.arc_rot_degree_range),
            y_range: self.bottom_y_range,
            point_dithering: self.base.point_dithering,
            ..ArcParams::default()
        };
        let front = vertical_arc(
            rng,
            &ArcParams {
                base: offset,
                ..params
            },
        );
        let back = vertical_arc(
            rng,
            &ArcParams {
                base: -offset,
                ..params
            },
        );

        let style = self.base.curve_style(self.endpoint_dithering);
        let ridge = connecting_line(rng, &front, &back, XZY, &style);

        let mut strokes = Strokes::load_points([front, back, ridge])?;
        self.base.place(rng, &mut strokes);
        Ok(strokes)
    }
}

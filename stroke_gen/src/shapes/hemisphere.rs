use rand::Rng;
use serde::Deserialize;

use crate::config::BaseConfig;
use crate::curve::{vertical_arc, ArcParams};
use crate::error::StrokeResult;
use crate::random::{AngleRange, ValueRange};
use crate::strokes::Strokes;

/// A single dome arc.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HemisphereConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    pub r_range: ValueRange,
    pub th_degree_range: ValueRange,
    pub bottom_y_range: ValueRange,
}

impl HemisphereConfig {
    pub fn generate_strokes<R: Rng + ?Sized>(&self, rng: &mut R) -> StrokeResult<Strokes> {
        let arc = vertical_arc(
            rng,
            &ArcParams {
                density: self.base.density,
                radius_range: self.r_range,
                theta_range: AngleRange::Degrees(self.th_degree_range),
                y_range: self.bottom_y_range,
                point_dithering: self.base.point_dithering,
                ..ArcParams::default()
            },
        );

        let mut strokes = Strokes::load_points([arc])?;
        self.base.place(rng, &mut strokes);
        Ok(strokes)
    }
}

use rand::Rng;
use serde::Deserialize;

use crate::config::BaseConfig;
use crate::curve::ellipse_curve;
use crate::drop_line::{drop_line_from_curve, DropStyle};
use crate::error::StrokeResult;
use crate::random::{AngleRange, ValueRange};
use crate::strokes::Strokes;

/// Elliptic top rim with one line dropped from it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CylinderConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    pub a_range: ValueRange,
    pub b_range: ValueRange,
    pub height_range: ValueRange,
    pub bottom_y_range: ValueRange,
    pub dip_degree_range: ValueRange,
    pub endpoint_dithering: ValueRange,
}

impl CylinderConfig {
    pub fn generate_strokes<R: Rng + ?Sized>(&self, rng: &mut R) -> StrokeResult<Strokes> {
        let a = self.a_range.sample(rng);
        let b = self.b_range.sample(rng);
        let y = self.height_range.sample(rng);
        let rim = ellipse_curve(rng, a, b, y, self.base.density, self.base.point_dithering);

        let drop = DropStyle {
            density: self.base.density,
            equinox_range: self.base.equinox_range,
            endpoint_dithering: self.endpoint_dithering,
            point_dithering: self.base.point_dithering,
            bottom_y_range: self.bottom_y_range,
            dip: AngleRange::Degrees(self.dip_degree_range),
            ..DropStyle::default()
        };
        let side = drop_line_from_curve(rng, &rim, &drop);

        let mut strokes = Strokes::load_points([rim, side])?;
        self.base.place(rng, &mut strokes);
        Ok(strokes)
    }
}

use rand::Rng;
use serde::Deserialize;

use super::{corners, edge_priority};
use crate::config::BaseConfig;
use crate::curve::straight_line3d;
use crate::drop_line::{drop_line_from_point, drop_line_from_segment, DropStyle};
use crate::error::StrokeResult;
use crate::geometry::{concatenate_points, Line3};
use crate::random::{make_point3d, AngleRange, PointSampler, ValueRange};
use crate::strokes::Strokes;

/// Box top outline plus up to four vertical edges.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CuboidConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    pub point_plane_range: ValueRange,
    pub height_range: ValueRange,
    pub endpoint_equinox_range: ValueRange,
    pub bottom_y_range: ValueRange,
    pub dip_degree_range: ValueRange,
    pub endpoint_dithering: ValueRange,
}

impl CuboidConfig {
    pub fn generate_strokes<R: Rng + ?Sized>(&self, rng: &mut R) -> StrokeResult<Strokes> {
        let corner = make_point3d(
            rng,
            &PointSampler {
                x_range: self.point_plane_range,
                z_range: self.point_plane_range,
                y_range: self.height_range,
                ..PointSampler::default()
            },
        );
        let top = corners(rng, corner, self.endpoint_dithering);

        let style = self.base.curve_style(ValueRange::ZERO);
        let outline = concatenate_points(
            (0..4).map(|i| straight_line3d(rng, top[i], top[(i + 1) % 4], edge_priority(i), &style)),
        );

        let drop = DropStyle {
            density: self.base.density,
            equinox_range: self.base.equinox_range,
            endpoint_equinox_range: self.endpoint_equinox_range,
            endpoint_dithering: self.endpoint_dithering,
            point_dithering: self.base.point_dithering,
            bottom_y_range: self.bottom_y_range,
            dip: AngleRange::Degrees(self.dip_degree_range),
            ..DropStyle::default()
        };
        let vertical_count = rng.random_range(0..=4);
        let verticals: Vec<_> = if vertical_count == 0 {
            let index = rng.random_range(0..4);
            vec![drop_line_from_point(rng, top[index], &drop)]
        } else {
            (0..vertical_count)
                .map(|i| drop_line_from_segment(rng, Line3::new(top[i], top[(i + 1) % 4]), &drop))
                .collect()
        };

        let mut strokes = Strokes::load_points(std::iter::once(outline).chain(verticals))?;
        self.base.place(rng, &mut strokes);
        Ok(strokes)
    }
}

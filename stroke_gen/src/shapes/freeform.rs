use std::ops::Range;

use rand::Rng;
use serde::Deserialize;

use crate::config::BaseConfig;
use crate::curve::{open_curve, XZY};
use crate::drop_line::{drop_line_from_curve, drop_line_from_point, DropStyle};
use crate::error::{StrokeError, StrokeResult};
use crate::geometry::Point3;
use crate::random::{AngleRange, CountRange, PointSampler, ValueRange};
use crate::strokes::{FreeformStrokes, StrokeType, Strokes};

/// Irregular polygon top whose edges are a random mix of curves and lines.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FreeformConfig {
    #[serde(flatten)]
    pub base: BaseConfig,
    pub point_num_range: CountRange,
    pub point_plane_range: ValueRange,
    pub height_range: ValueRange,
    pub bottom_y_range: ValueRange,
    /// Probability that an edge is curved.
    pub curve_poss: f64,
    pub dip_degree_range: ValueRange,
    pub line_endpoint_dithering: ValueRange,
    pub curve_endpoint_dithering: ValueRange,
}

fn tag_segment(len: usize, continuation: StrokeType) -> impl Iterator<Item = StrokeType> {
    (0..len).map(move |j| {
        if j == 0 {
            StrokeType::CurveStart
        } else {
            continuation
        }
    })
}

impl FreeformConfig {
    /// Top vertices at one height, centred and ordered by angle.
    fn vertices<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<Point3> {
        let height = self.height_range.sample(rng);
        let sampler = PointSampler {
            x_range: self.point_plane_range,
            z_range: self.point_plane_range,
            y: Some(height),
            ..PointSampler::default()
        };
        let mut vertices: Vec<Point3> = (0..count).map(|_| sampler.sample(rng)).collect();
        let n = count as f64;
        let mean = Point3::new(
            vertices.iter().map(|p| p.x).sum::<f64>() / n,
            vertices.iter().map(|p| p.z).sum::<f64>() / n,
            0.0,
        );
        for v in &mut vertices {
            *v = *v - mean;
        }
        vertices.sort_by(|a, b| a.z.atan2(a.x).total_cmp(&b.z.atan2(b.x)));
        vertices
    }

    pub fn generate_strokes<R: Rng + ?Sized>(&self, rng: &mut R) -> StrokeResult<FreeformStrokes> {
        let count = self.point_num_range.sample(rng);
        if count == 0 {
            return Err(StrokeError::Configuration(
                "freeform needs at least one vertex".to_string(),
            ));
        }
        let vertices = self.vertices(rng, count);

        let mut boundary = Vec::new();
        let mut types = Vec::new();
        let mut segments: Vec<Range<usize>> = Vec::with_capacity(count);
        for i in 0..count {
            let curved = rng.random::<f64>() <= self.curve_poss;
            let (dithering, continuation) = if curved {
                (self.curve_endpoint_dithering, StrokeType::Curve)
            } else {
                (self.line_endpoint_dithering, StrokeType::Line)
            };
            let style = self.base.curve_style(dithering);
            let edge = open_curve(rng, vertices[i], vertices[(i + 1) % count], XZY, &style);
            let start = boundary.len();
            types.extend(tag_segment(edge.len(), continuation));
            boundary.extend(edge);
            segments.push(start..boundary.len());
        }

        let drop = DropStyle {
            density: self.base.density,
            equinox_range: self.base.equinox_range,
            endpoint_dithering: self.line_endpoint_dithering,
            point_dithering: self.base.point_dithering,
            bottom_y_range: self.bottom_y_range,
            dip: AngleRange::Degrees(self.dip_degree_range),
            ..DropStyle::default()
        };
        let vertical_count = rng.random_range(0..=count);
        let verticals: Vec<Vec<Point3>> = if vertical_count == 0 {
            vec![drop_line_from_point(rng, vertices[0], &drop)]
        } else {
            segments[..vertical_count]
                .iter()
                .enumerate()
                .map(|(i, range)| {
                    let segment = &boundary[range.clone()];
                    if segment.is_empty() {
                        drop_line_from_point(rng, vertices[i], &drop)
                    } else {
                        drop_line_from_curve(rng, segment, &drop)
                    }
                })
                .collect()
        };
        for line in &verticals {
            types.extend(tag_segment(line.len(), StrokeType::Line));
        }

        let mut strokes = Strokes::load_points(std::iter::once(boundary).chain(verticals))?;
        self.base.place(rng, &mut strokes);
        let mut freeform = FreeformStrokes::new(strokes);
        freeform.load_plane_strokes_types(types)?;
        Ok(freeform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{typed_table, GeneratorConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config_with(key: &str, value: toml::Value) -> FreeformConfig {
        let config = GeneratorConfig::builtin().unwrap();
        let mut table = config.geometry_table("freeform").unwrap().clone();
        table.insert(key.to_string(), value);
        typed_table("freeform", &table).unwrap()
    }

    #[test]
    fn zero_vertices_is_a_configuration_error() {
        let zero = toml::Value::Array(vec![toml::Value::Integer(0), toml::Value::Integer(0)]);
        let config = config_with("point_num_range", zero);
        let mut rng = StdRng::seed_from_u64(3);
        let err = config.generate_strokes(&mut rng).unwrap_err();
        assert!(matches!(err, StrokeError::Configuration(_)));
        assert!(err.to_string().contains("at least one vertex"));
    }

    #[test]
    fn types_cover_every_point() {
        let config = config_with("curve_poss", toml::Value::Float(1.0));
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..5 {
            let strokes = config.generate_strokes(&mut rng).unwrap();
            assert_eq!(strokes.types().len(), strokes.len());
            let boundary_is_curved = strokes
                .points()
                .iter()
                .zip(strokes.types())
                .filter(|(p, _)| p.group.0 == 0)
                .all(|(_, t)| *t != StrokeType::Line);
            assert!(boundary_is_curved);
        }
    }
}

use serde::{Deserialize, Serialize};

use rand::Rng;

use super::Strokes;
use crate::error::{StrokeError, StrokeResult};
use crate::geometry::{Axis, Point3};
use crate::random::{AngleRange, ValueRange};

/// Role of a point in a freeform collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum StrokeType {
    /// First point of a segment or vertical line.
    CurveStart = 0,
    /// Continuation of a curved segment.
    Curve = 1,
    /// Continuation of a straight segment or vertical line.
    Line = 2,
}

impl StrokeType {
    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn from_code(code: i64) -> StrokeResult<Self> {
        match code {
            0 => Ok(StrokeType::CurveStart),
            1 => Ok(StrokeType::Curve),
            2 => Ok(StrokeType::Line),
            other => Err(StrokeError::InvalidStrokeType(other)),
        }
    }
}

impl TryFrom<i64> for StrokeType {
    type Error = StrokeError;

    fn try_from(code: i64) -> StrokeResult<Self> {
        Self::from_code(code)
    }
}

impl From<StrokeType> for i64 {
    fn from(ty: StrokeType) -> i64 {
        ty.code()
    }
}

/// [`Strokes`] with one type tag per point.
///
/// Only read access and rigid transforms reach the inner collection, so the
/// tags keep covering every point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FreeformStrokes {
    strokes: Strokes,
    types: Vec<StrokeType>,
}

impl std::ops::Deref for FreeformStrokes {
    type Target = Strokes;
    fn deref(&self) -> &Self::Target {
        &self.strokes
    }
}

impl FreeformStrokes {
    pub fn new(strokes: Strokes) -> Self {
        Self {
            strokes,
            types: Vec::new(),
        }
    }

    /// Builds the collection with one stroke per curve.
    pub fn load_points<I>(curves: I) -> StrokeResult<Self>
    where
        I: IntoIterator<Item = Vec<Point3>>,
    {
        Strokes::load_points(curves).map(Self::new)
    }

    /// Attaches per-point type tags.
    pub fn load_plane_strokes_types(&mut self, types: Vec<StrokeType>) -> StrokeResult<&mut Self> {
        if self.strokes.is_empty() {
            return Err(StrokeError::EmptyStrokes);
        }
        if types.len() != self.strokes.len() {
            return Err(StrokeError::TypeLength {
                types: types.len(),
                points: self.strokes.len(),
            });
        }
        self.types = types;
        Ok(self)
    }

    /// Attaches type tags given as integer codes.
    pub fn load_type_codes(&mut self, codes: &[i64]) -> StrokeResult<&mut Self> {
        let types = codes
            .iter()
            .map(|&c| StrokeType::from_code(c))
            .collect::<StrokeResult<Vec<_>>>()?;
        self.load_plane_strokes_types(types)
    }

    pub fn rotate(&mut self, base: Point3, axis: Axis, angle: f64) -> &mut Self {
        self.strokes.rotate(base, axis, angle);
        self
    }

    pub fn rotate_within<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        base: Point3,
        axis: Axis,
        angle_range: AngleRange,
    ) -> &mut Self {
        self.strokes.rotate_within(rng, base, axis, angle_range);
        self
    }

    pub fn translate(&mut self, vector: Point3) -> &mut Self {
        self.strokes.translate(vector);
        self
    }

    pub fn translate_within<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        dx_range: ValueRange,
        dz_range: ValueRange,
        dy_range: ValueRange,
    ) -> &mut Self {
        self.strokes.translate_within(rng, dx_range, dz_range, dy_range);
        self
    }

    pub fn types(&self) -> &[StrokeType] {
        &self.types
    }

    /// Splits into the plain collection and its tags.
    pub fn into_parts(self) -> (Strokes, Vec<StrokeType>) {
        (self.strokes, self.types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
        ]
    }

    #[test]
    fn types_must_cover_every_point() {
        let mut f = FreeformStrokes::load_points(vec![square()]).unwrap();
        let err = f
            .load_plane_strokes_types(vec![StrokeType::CurveStart])
            .unwrap_err();
        assert!(matches!(err, StrokeError::TypeLength { types: 1, points: 3 }));

        f.load_type_codes(&[0, 1, 2]).unwrap();
        assert_eq!(
            f.types(),
            &[StrokeType::CurveStart, StrokeType::Curve, StrokeType::Line]
        );
        assert_eq!(f.len(), 3);
    }

    #[test]
    fn empty_collection_rejects_types() {
        let mut f = FreeformStrokes::default();
        let err = f.load_plane_strokes_types(Vec::new()).unwrap_err();
        assert!(matches!(err, StrokeError::EmptyStrokes));
    }

    #[test]
    fn unknown_codes_are_rejected() {
        let mut f = FreeformStrokes::load_points(vec![square()]).unwrap();
        let err = f.load_type_codes(&[0, 1, 5]).unwrap_err();
        assert!(matches!(err, StrokeError::InvalidStrokeType(5)));
        assert!(f.types().is_empty());
    }

    #[test]
    fn transforms_reach_the_inner_collection() {
        let mut f = FreeformStrokes::load_points(vec![square()]).unwrap();
        f.load_type_codes(&[0, 2, 2]).unwrap();
        f.translate(Point3::new(0.0, 0.0, 1.0))
            .rotate(Point3::ORIGIN, Axis::Y, std::f64::consts::PI);
        assert!(f.points().iter().all(|p| (p.point.y - 2.0).abs() < 1e-12));
        assert!((f.points()[1].point.x + 1.0).abs() < 1e-12);
        assert_eq!(f.types().len(), f.len());
    }

    #[test]
    fn tags_stay_aligned_after_placement() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(4);
        let mut f = FreeformStrokes::load_points(vec![square(), square()]).unwrap();
        f.load_type_codes(&[0, 1, 1, 0, 2, 2]).unwrap();
        let groups: Vec<u32> = f.points().iter().map(|p| p.group.0).collect();
        f.rotate_within(&mut rng, Point3::ORIGIN, Axis::Y, AngleRange::Degrees(ValueRange::new(0.0, 360.0)))
            .translate_within(&mut rng, ValueRange::new(-1.0, 1.0), ValueRange::new(-1.0, 1.0), ValueRange::ZERO);
        let after: Vec<u32> = f.points().iter().map(|p| p.group.0).collect();
        assert_eq!(groups, after);
        assert_eq!(f.types().len(), f.len());
        assert_eq!(f.types()[3], StrokeType::CurveStart);
    }
}

//! Stroke container: tagged, ordered point store with rigid transforms.

pub mod freeform;

pub use freeform::{FreeformStrokes, StrokeType};

use nalgebra::{Rotation2, Vector2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{StrokeError, StrokeResult};
use crate::geometry::{Axis, Point3};
use crate::random::{AngleRange, ValueRange};

/// Identifier of one stroke inside a [`Strokes`] collection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct GroupId(pub u32);

impl GroupId {
    pub fn next(self) -> GroupId {
        GroupId(self.0 + 1)
    }
}

/// A point together with the stroke it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePoint {
    pub point: Point3,
    pub group: GroupId,
}

impl StrokePoint {
    pub fn new(point: Point3, group: GroupId) -> Self {
        Self { point, group }
    }

    /// Row `[x, z, y, group]`.
    pub fn to_row(&self) -> [f64; 4] {
        let [x, z, y] = self.point.to_array();
        [x, z, y, f64::from(self.group.0)]
    }

    /// Parses a `[x, z, y, group]` row.
    pub fn from_row(row: &[f64]) -> StrokeResult<Self> {
        let [x, z, y, group] = row else {
            return Err(StrokeError::Dimensionality {
                expected: 4,
                found: row.len(),
            });
        };
        // `u32::MAX` is reserved so the next unused id always fits.
        let valid = group.is_finite()
            && *group >= 0.0
            && group.fract() == 0.0
            && *group < f64::from(u32::MAX);
        if !valid {
            return Err(StrokeError::InvalidGroupId(*group));
        }
        Ok(Self::new(Point3::new(*x, *z, *y), GroupId(*group as u32)))
    }
}

/// Parses `[x, z, y]` rows into points.
pub fn points_from_rows(rows: &[Vec<f64>]) -> StrokeResult<Vec<Point3>> {
    rows.iter()
        .map(|row| match row.as_slice() {
            [x, z, y] => Ok(Point3::new(*x, *z, *y)),
            other => Err(StrokeError::Dimensionality {
                expected: 3,
                found: other.len(),
            }),
        })
        .collect()
}

/// Ordered collection of stroke points.
///
/// Points are kept sorted by group id and every group forms one contiguous
/// run. `nums` is the next unused group id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Strokes {
    points: Vec<StrokePoint>,
    nums: u32,
}

impl Strokes {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            nums: 0,
        }
    }

    /// Builds a collection with one stroke per curve.
    pub fn load_points<I>(curves: I) -> StrokeResult<Self>
    where
        I: IntoIterator<Item = Vec<Point3>>,
    {
        let mut curves = curves.into_iter().peekable();
        if curves.peek().is_none() {
            return Err(StrokeError::EmptyStrokes);
        }
        let mut strokes = Self::new();
        strokes.append_points(curves);
        Ok(strokes)
    }

    /// Tags each curve with the next unused group id and appends it.
    pub fn append_points<I>(&mut self, curves: I) -> &mut Self
    where
        I: IntoIterator<Item = Vec<Point3>>,
    {
        for curve in curves {
            let group = GroupId(self.nums);
            self.points
                .extend(curve.into_iter().map(|p| StrokePoint::new(p, group)));
            self.nums += 1;
        }
        self
    }

    /// Appends curves given as raw `[x, z, y]` rows.
    ///
    /// Every row is checked before anything is appended.
    pub fn append_point_rows(&mut self, curves: &[Vec<Vec<f64>>]) -> StrokeResult<&mut Self> {
        let parsed = curves
            .iter()
            .map(|rows| points_from_rows(rows))
            .collect::<StrokeResult<Vec<_>>>()?;
        Ok(self.append_points(parsed))
    }

    /// Builds a collection from already tagged batches.
    ///
    /// The first batch keeps its ids; later batches are renumbered.
    pub fn load_strokes<I>(batches: I) -> StrokeResult<Self>
    where
        I: IntoIterator<Item = Vec<StrokePoint>>,
    {
        let mut batches = batches.into_iter();
        let first = batches.next().ok_or(StrokeError::EmptyStrokes)?;
        let mut strokes = Self::new();
        strokes.points = first;
        strokes.points.sort_by_key(|p| p.group);
        strokes.nums = match strokes.points.last() {
            Some(p) => p
                .group
                .0
                .checked_add(1)
                .ok_or(StrokeError::InvalidGroupId(f64::from(p.group.0)))?,
            None => 0,
        };
        strokes.append_strokes(batches);
        Ok(strokes)
    }

    /// Appends tagged batches, giving each run of equal incoming ids a
    /// fresh id so nothing collides with the groups already present.
    pub fn append_strokes<I>(&mut self, batches: I) -> &mut Self
    where
        I: IntoIterator<Item = Vec<StrokePoint>>,
    {
        for mut batch in batches {
            let Some(first) = batch.first() else {
                continue;
            };
            let mut current = first.group;
            for p in &mut batch {
                if p.group != current {
                    self.nums += 1;
                    current = p.group;
                }
                p.group = GroupId(self.nums);
            }
            self.nums += 1;
            self.points.append(&mut batch);
        }
        self.points.sort_by_key(|p| p.group);
        self
    }

    /// Rebuilds a collection from `[x, z, y, group]` rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> StrokeResult<Self> {
        let points = rows
            .iter()
            .map(|row| StrokePoint::from_row(row))
            .collect::<StrokeResult<Vec<_>>>()?;
        Self::load_strokes([points])
    }

    /// Rotates every point by `angle` radians about `base`, within the plane
    /// orthogonal to `axis`.
    pub fn rotate(&mut self, base: Point3, axis: Axis, angle: f64) -> &mut Self {
        let (u, v) = axis.orthogonal();
        let rotation = Rotation2::new(angle);
        let center = Vector2::new(base.get(u), base.get(v));
        for sp in &mut self.points {
            let local = Vector2::new(sp.point.get(u), sp.point.get(v)) - center;
            let turned = rotation * local + center;
            sp.point.set(u, turned.x);
            sp.point.set(v, turned.y);
        }
        self
    }

    /// Rotates the whole collection by one angle drawn from `angle_range`.
    pub fn rotate_within<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        base: Point3,
        axis: Axis,
        angle_range: AngleRange,
    ) -> &mut Self {
        let angle = angle_range.sample(rng);
        self.rotate(base, axis, angle)
    }

    /// Adds `vector` to every point.
    pub fn translate(&mut self, vector: Point3) -> &mut Self {
        for sp in &mut self.points {
            sp.point += vector;
        }
        self
    }

    /// Translates the whole collection by one vector drawn per axis.
    pub fn translate_within<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        dx_range: ValueRange,
        dz_range: ValueRange,
        dy_range: ValueRange,
    ) -> &mut Self {
        let dx = dx_range.sample(rng);
        let dz = dz_range.sample(rng);
        let dy = dy_range.sample(rng);
        self.translate(Point3::new(dx, dz, dy))
    }

    /// The sorted point store.
    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    /// The point store as `[x, z, y, group]` rows.
    pub fn to_rows(&self) -> Vec<[f64; 4]> {
        self.points.iter().map(StrokePoint::to_row).collect()
    }

    /// Next unused group id.
    pub fn nums(&self) -> u32 {
        self.nums
    }

    /// Number of distinct strokes holding at least one point.
    pub fn stroke_count(&self) -> usize {
        let mut groups: Vec<GroupId> = self.points.iter().map(|p| p.group).collect();
        groups.dedup();
        groups.len()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Output of one geometry handler.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedStrokes {
    Plain(Strokes),
    Freeform(FreeformStrokes),
}

impl GeneratedStrokes {
    pub fn strokes(&self) -> &Strokes {
        match self {
            GeneratedStrokes::Plain(s) => s,
            GeneratedStrokes::Freeform(f) => &**f,
        }
    }

    /// Per-point type tags, for freeform results only.
    pub fn types(&self) -> Option<&[StrokeType]> {
        match self {
            GeneratedStrokes::Plain(_) => None,
            GeneratedStrokes::Freeform(f) => Some(f.types()),
        }
    }
}

impl From<Strokes> for GeneratedStrokes {
    fn from(strokes: Strokes) -> Self {
        GeneratedStrokes::Plain(strokes)
    }
}

impl From<FreeformStrokes> for GeneratedStrokes {
    fn from(strokes: FreeformStrokes) -> Self {
        GeneratedStrokes::Freeform(strokes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(n: usize, y: f64) -> Vec<Point3> {
        (0..n).map(|i| Point3::new(i as f64, 0.0, y)).collect()
    }

    fn groups(strokes: &Strokes) -> Vec<u32> {
        strokes.points().iter().map(|p| p.group.0).collect()
    }

    #[test]
    fn load_points_tags_each_curve() {
        let strokes = Strokes::load_points(vec![curve(2, 0.0), curve(3, 1.0)]).unwrap();
        assert_eq!(groups(&strokes), vec![0, 0, 1, 1, 1]);
        assert_eq!(strokes.nums(), 2);
        assert_eq!(strokes.stroke_count(), 2);
    }

    #[test]
    fn load_points_requires_a_curve() {
        let err = Strokes::load_points(Vec::<Vec<Point3>>::new()).unwrap_err();
        assert!(matches!(err, StrokeError::EmptyStrokes));
    }

    #[test]
    fn point_rows_are_checked() {
        let mut strokes = Strokes::new();
        let bad = vec![vec![vec![0.0, 1.0, 2.0], vec![0.0, 1.0]]];
        let err = strokes.append_point_rows(&bad).unwrap_err();
        assert!(matches!(
            err,
            StrokeError::Dimensionality {
                expected: 3,
                found: 2
            }
        ));
        assert!(strokes.is_empty());

        let good = vec![vec![vec![0.0, 1.0, 2.0]]];
        strokes.append_point_rows(&good).unwrap();
        assert_eq!(strokes.to_rows(), vec![[0.0, 1.0, 2.0, 0.0]]);
    }

    #[test]
    fn append_strokes_renumbers_batches() {
        let mut strokes = Strokes::load_points(vec![curve(2, 0.0)]).unwrap();
        let batch = vec![
            StrokePoint::new(Point3::ORIGIN, GroupId(0)),
            StrokePoint::new(Point3::ORIGIN, GroupId(0)),
            StrokePoint::new(Point3::ORIGIN, GroupId(7)),
        ];
        strokes.append_strokes(vec![batch.clone(), batch]);
        assert_eq!(groups(&strokes), vec![0, 0, 1, 1, 2, 3, 3, 4]);
        assert_eq!(strokes.nums(), 5);
    }

    #[test]
    fn load_strokes_sorts_first_batch() {
        let batch = vec![
            StrokePoint::new(Point3::new(1.0, 0.0, 0.0), GroupId(2)),
            StrokePoint::new(Point3::new(2.0, 0.0, 0.0), GroupId(0)),
            StrokePoint::new(Point3::new(3.0, 0.0, 0.0), GroupId(2)),
        ];
        let strokes = Strokes::load_strokes([batch]).unwrap();
        assert_eq!(groups(&strokes), vec![0, 2, 2]);
        assert_eq!(strokes.points()[1].point.x, 1.0);
        assert_eq!(strokes.nums(), 3);
    }

    #[test]
    fn stroke_rows_are_checked() {
        let err = Strokes::from_rows(&[vec![0.0, 0.0, 0.0]]).unwrap_err();
        assert!(matches!(err, StrokeError::Dimensionality { expected: 4, .. }));
        let err = Strokes::from_rows(&[vec![0.0, 0.0, 0.0, 1.5]]).unwrap_err();
        assert!(matches!(err, StrokeError::InvalidGroupId(_)));
        let strokes = Strokes::from_rows(&[vec![1.0, 2.0, 3.0, 4.0]]).unwrap();
        assert_eq!(strokes.to_rows(), vec![[1.0, 2.0, 3.0, 4.0]]);
    }

    #[test]
    fn largest_group_id_is_reserved() {
        let max = f64::from(u32::MAX);
        let err = Strokes::from_rows(&[vec![0.0, 0.0, 0.0, max]]).unwrap_err();
        assert!(matches!(err, StrokeError::InvalidGroupId(g) if g == max));

        let batch = vec![StrokePoint::new(Point3::ORIGIN, GroupId(u32::MAX))];
        let err = Strokes::load_strokes([batch]).unwrap_err();
        assert!(matches!(err, StrokeError::InvalidGroupId(_)));

        let strokes = Strokes::from_rows(&[vec![0.0, 0.0, 0.0, max - 1.0]]).unwrap();
        assert_eq!(strokes.nums(), u32::MAX);
    }

    #[test]
    fn rotate_quarter_turn_about_vertical() {
        let mut strokes = Strokes::load_points(vec![vec![Point3::new(1.0, 0.0, 5.0)]]).unwrap();
        strokes.rotate(Point3::ORIGIN, Axis::Y, std::f64::consts::FRAC_PI_2);
        let p = strokes.points()[0].point;
        assert!(p.x.abs() < 1e-12);
        assert!((p.z - 1.0).abs() < 1e-12);
        assert_eq!(p.y, 5.0);
    }

    #[test]
    fn rotate_about_base_point() {
        let mut strokes = Strokes::load_points(vec![vec![Point3::new(2.0, 0.0, 1.0)]]).unwrap();
        strokes.rotate(Point3::new(1.0, 0.0, 1.0), Axis::Z, std::f64::consts::PI);
        let p = strokes.points()[0].point;
        assert!(p.x.abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn translate_keeps_groups() {
        let mut strokes = Strokes::load_points(vec![curve(2, 0.0), curve(1, 0.0)]).unwrap();
        strokes.translate(Point3::new(1.0, 2.0, 3.0));
        assert_eq!(
            strokes.to_rows(),
            vec![
                [1.0, 2.0, 3.0, 0.0],
                [2.0, 2.0, 3.0, 0.0],
                [1.0, 2.0, 3.0, 1.0]
            ]
        );
    }
}

//! Built-in geometry handlers.
//!
//! Each handler is a fixed recipe of curve and drop line calls. The result is
//! rotated about the vertical axis and moved by its base configuration.

pub mod cone;
pub mod cuboid;
pub mod cylinder;
pub mod freeform;
pub mod hemisphere;
pub mod hip;
pub mod platform;
pub mod pyramid;
pub mod shed;

pub use cone::ConeConfig;
pub use cuboid::CuboidConfig;
pub use cylinder::CylinderConfig;
pub use freeform::FreeformConfig;
pub use hemisphere::HemisphereConfig;
pub use hip::HipConfig;
pub use platform::PlatformConfig;
pub use pyramid::PyramidConfig;
pub use shed::ShedConfig;

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::config::typed_table;
use crate::curve::{XZY, ZXY};
use crate::error::{StrokeError, StrokeResult};
use crate::geometry::{Axis, Point3};
use crate::random::{dither, ValueRange};
use crate::strokes::GeneratedStrokes;

/// Sign of `(x, z)` for the four corners of a rectangle, counter-clockwise.
pub const CORNER_SIGNS: [(f64, f64); 4] = [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)];

/// Mirrors `corner` into the four quadrants, dithering each copy.
pub(crate) fn corners<R: Rng + ?Sized>(
    rng: &mut R,
    corner: Point3,
    dithering: ValueRange,
) -> [Point3; 4] {
    CORNER_SIGNS.map(|(sx, sz)| {
        dither(
            rng,
            Point3::new(sx * corner.x, sz * corner.z, corner.y),
            dithering,
        )
    })
}

/// Sort priority of rectangle edge `i`; alternates with edge direction.
pub(crate) fn edge_priority(i: usize) -> [Axis; 3] {
    if i % 2 == 0 {
        XZY
    } else {
        ZXY
    }
}

/// Names of the supported primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuiltinGeometry {
    Cone,
    Cuboid,
    Cylinder,
    Hemisphere,
    Pyramid,
    Shed,
    Platform,
    Hip,
    Freeform,
}

impl BuiltinGeometry {
    /// Every primitive in registration order.
    pub const ALL: [BuiltinGeometry; 9] = [
        BuiltinGeometry::Cone,
        BuiltinGeometry::Cuboid,
        BuiltinGeometry::Cylinder,
        BuiltinGeometry::Hemisphere,
        BuiltinGeometry::Pyramid,
        BuiltinGeometry::Shed,
        BuiltinGeometry::Platform,
        BuiltinGeometry::Hip,
        BuiltinGeometry::Freeform,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BuiltinGeometry::Cone => "cone",
            BuiltinGeometry::Cuboid => "cuboid",
            BuiltinGeometry::Cylinder => "cylinder",
            BuiltinGeometry::Hemisphere => "hemisphere",
            BuiltinGeometry::Pyramid => "pyramid",
            BuiltinGeometry::Shed => "shed",
            BuiltinGeometry::Platform => "platform",
            BuiltinGeometry::Hip => "hip",
            BuiltinGeometry::Freeform => "freeform",
        }
    }
}

impl fmt::Display for BuiltinGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinGeometry {
    type Err = StrokeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuiltinGeometry::ALL
            .into_iter()
            .find(|g| g.name() == s)
            .ok_or_else(|| StrokeError::UnknownGeometry(s.to_string()))
    }
}

/// A configured geometry handler.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Cone(ConeConfig),
    Cuboid(CuboidConfig),
    Cylinder(CylinderConfig),
    Hemisphere(HemisphereConfig),
    Pyramid(PyramidConfig),
    Shed(ShedConfig),
    Platform(PlatformConfig),
    Hip(HipConfig),
    Freeform(FreeformConfig),
}

impl Geometry {
    /// Builds the handler of `kind` from its configuration table.
    pub fn from_table(kind: BuiltinGeometry, table: &toml::Table) -> StrokeResult<Self> {
        let name = kind.name();
        Ok(match kind {
            BuiltinGeometry::Cone => Geometry::Cone(typed_table(name, table)?),
            BuiltinGeometry::Cuboid => Geometry::Cuboid(typed_table(name, table)?),
            BuiltinGeometry::Cylinder => Geometry::Cylinder(typed_table(name, table)?),
            BuiltinGeometry::Hemisphere => Geometry::Hemisphere(typed_table(name, table)?),
            BuiltinGeometry::Pyramid => Geometry::Pyramid(typed_table(name, table)?),
            BuiltinGeometry::Shed => Geometry::Shed(typed_table(name, table)?),
            BuiltinGeometry::Platform => Geometry::Platform(typed_table(name, table)?),
            BuiltinGeometry::Hip => Geometry::Hip(typed_table(name, table)?),
            BuiltinGeometry::Freeform => Geometry::Freeform(typed_table(name, table)?),
        })
    }

    pub fn kind(&self) -> BuiltinGeometry {
        match self {
            Geometry::Cone(_) => BuiltinGeometry::Cone,
            Geometry::Cuboid(_) => BuiltinGeometry::Cuboid,
            Geometry::Cylinder(_) => BuiltinGeometry::Cylinder,
            Geometry::Hemisphere(_) => BuiltinGeometry::Hemisphere,
            Geometry::Pyramid(_) => BuiltinGeometry::Pyramid,
            Geometry::Shed(_) => BuiltinGeometry::Shed,
            Geometry::Platform(_) => BuiltinGeometry::Platform,
            Geometry::Hip(_) => BuiltinGeometry::Hip,
            Geometry::Freeform(_) => BuiltinGeometry::Freeform,
        }
    }

    /// Runs the handler once.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> StrokeResult<GeneratedStrokes> {
        Ok(match self {
            Geometry::Cone(c) => c.generate_strokes(rng)?.into(),
            Geometry::Cuboid(c) => c.generate_strokes(rng)?.into(),
            Geometry::Cylinder(c) => c.generate_strokes(rng)?.into(),
            Geometry::Hemisphere(c) => c.generate_strokes(rng)?.into(),
            Geometry::Pyramid(c) => c.generate_strokes(rng)?.into(),
            Geometry::Shed(c) => c.generate_strokes(rng)?.into(),
            Geometry::Platform(c) => c.generate_strokes(rng)?.into(),
            Geometry::Hip(c) => c.generate_strokes(rng)?.into(),
            Geometry::Freeform(c) => c.generate_strokes(rng)?.into(),
        })
    }
}

//! Core library for procedural stroke generation.
//!
//! Builds 3D point strokes for architectural primitives: bowed lines, arcs,
//! ellipses and dropped vertical lines, assembled into tagged collections.

pub mod config;
pub mod curve;
pub mod drop_line;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod io;
pub mod random;
pub mod shapes;
pub mod strokes;

pub use error::{StrokeError, StrokeResult};
pub use generator::StrokesGenerator;
pub use geometry::{Axis, Point3};
pub use shapes::{BuiltinGeometry, Geometry};
pub use strokes::{FreeformStrokes, GeneratedStrokes, GroupId, StrokePoint, StrokeType, Strokes};

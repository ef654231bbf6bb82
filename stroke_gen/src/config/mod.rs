//! Generator configuration (`config.toml`) and its validation rules.

pub mod rules;

pub use rules::{RuleType, Rules, BUILTIN_RULES};

use std::path::Path;

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::curve::CurveStyle;
use crate::error::{StrokeError, StrokeResult};
use crate::geometry::{Axis, Point3};
use crate::random::{AngleRange, ValueRange};
use crate::strokes::Strokes;

/// Text of the configuration shipped with the library.
pub const BUILTIN_CONFIG: &str = include_str!("../../config.toml");

/// Parsed generator configuration: one table per geometry name.
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    tables: toml::Table,
}

impl GeneratorConfig {
    /// The configuration shipped with the library.
    pub fn builtin() -> StrokeResult<Self> {
        Self::from_str(BUILTIN_CONFIG, Path::new("config.toml"))
    }

    /// Load a configuration file; the name must end in `.toml`.
    pub fn from_file(path: &Path) -> StrokeResult<Self> {
        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            return Err(StrokeError::Configuration(format!(
                "extension of config file name '{}' is not 'toml'",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content, path)
    }

    /// Parse a configuration from a string.
    pub fn from_str(content: &str, path: &Path) -> StrokeResult<Self> {
        let tables = toml::from_str(content).map_err(|e| StrokeError::Parse {
            path: path.to_owned(),
            source: e,
        })?;
        Ok(Self { tables })
    }

    /// The table of one geometry.
    pub fn geometry_table(&self, name: &str) -> StrokeResult<&toml::Table> {
        match self.tables.get(name) {
            Some(toml::Value::Table(table)) => Ok(table),
            Some(_) => Err(StrokeError::Configuration(format!(
                "geometry '{name}' config is not a table"
            ))),
            None => Err(StrokeError::Configuration(format!(
                "can not find geometry config of '{name}'"
            ))),
        }
    }
}

/// Deserialises a validated geometry table into its typed config.
pub fn typed_table<T: DeserializeOwned>(name: &str, table: &toml::Table) -> StrokeResult<T> {
    toml::Value::Table(table.clone())
        .try_into()
        .map_err(|e| StrokeError::Configuration(format!("geometry '{name}' config: {e}")))
}

/// Keys every geometry table carries.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BaseConfig {
    pub density: f64,
    pub equinox_range: ValueRange,
    pub point_dithering: ValueRange,
    pub move_plane_range: ValueRange,
    pub move_y_range: ValueRange,
    pub plane_rotate_degree_range: ValueRange,
}

impl BaseConfig {
    /// Curve sampling with the given control point dithering.
    pub fn curve_style(&self, endpoint_dithering: ValueRange) -> CurveStyle {
        CurveStyle {
            density: self.density,
            equinox_range: self.equinox_range,
            endpoint_dithering,
            point_dithering: self.point_dithering,
            uniform_velocity: false,
        }
    }

    /// Turns the assembly about the vertical axis and moves it.
    pub fn place<R: Rng + ?Sized>(&self, rng: &mut R, strokes: &mut Strokes) {
        strokes
            .rotate_within(
                rng,
                Point3::ORIGIN,
                Axis::Y,
                AngleRange::Degrees(self.plane_rotate_degree_range),
            )
            .translate_within(
                rng,
                self.move_plane_range,
                self.move_plane_range,
                self.move_y_range,
            );
    }
}

//! Driver that loads every geometry and runs the handlers.

use std::collections::BTreeMap;
use std::path::Path;

use log::{debug, info};
use rand::Rng;

use crate::config::{GeneratorConfig, Rules};
use crate::error::{StrokeError, StrokeResult};
use crate::io;
use crate::shapes::{BuiltinGeometry, Geometry};
use crate::strokes::GeneratedStrokes;

/// Validated set of geometry handlers.
#[derive(Debug, Clone)]
pub struct StrokesGenerator {
    geometries: Vec<Geometry>,
}

impl StrokesGenerator {
    /// Validates each built-in geometry table against `rules` and loads it.
    pub fn new(rules: &Rules, config: &GeneratorConfig) -> StrokeResult<Self> {
        let mut geometries = Vec::with_capacity(BuiltinGeometry::ALL.len());
        for kind in BuiltinGeometry::ALL {
            let name = kind.name();
            let table = config.geometry_table(name)?;
            rules.validate(name, table)?;
            geometries.push(Geometry::from_table(kind, table)?);
            info!("loaded geometry: {name}");
        }
        Ok(Self { geometries })
    }

    /// Generator over the shipped rules and configuration.
    pub fn builtin() -> StrokeResult<Self> {
        Self::new(&Rules::builtin()?, &GeneratorConfig::builtin()?)
    }

    /// Registered geometry names.
    pub fn list_geometries(&self) -> Vec<&'static str> {
        self.geometries.iter().map(|g| g.kind().name()).collect()
    }

    pub fn geometry(&self, kind: BuiltinGeometry) -> Option<&Geometry> {
        self.geometries.iter().find(|g| g.kind() == kind)
    }

    /// Generates one result of the geometry called `name`.
    pub fn generate<R: Rng + ?Sized>(&self, name: &str, rng: &mut R) -> StrokeResult<GeneratedStrokes> {
        let geometry = name
            .parse()
            .ok()
            .and_then(|kind| self.geometry(kind))
            .ok_or_else(|| StrokeError::UnknownGeometry(name.to_string()))?;
        let result = geometry.generate(rng)?;
        info!("generated geometry: {name}");
        let strokes = result.strokes();
        debug!(
            "{name}: {} strokes, {} points",
            strokes.stroke_count(),
            strokes.len()
        );
        Ok(result)
    }

    /// Runs `rounds` rounds over every geometry.
    pub fn generate_all<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        rounds: usize,
    ) -> StrokeResult<BTreeMap<BuiltinGeometry, Vec<GeneratedStrokes>>> {
        let mut results: BTreeMap<BuiltinGeometry, Vec<GeneratedStrokes>> = BTreeMap::new();
        for round in 0..rounds {
            for geometry in &self.geometries {
                let kind = geometry.kind();
                results
                    .entry(kind)
                    .or_default()
                    .push(geometry.generate(rng)?);
            }
            info!("generated round {} of {rounds}", round + 1);
        }
        Ok(results)
    }

    pub fn save(&self, result: &GeneratedStrokes, path: &Path) -> StrokeResult<()> {
        io::save_strokes(result, path)?;
        info!("saved strokes to {}", path.display());
        Ok(())
    }

    pub fn save_all(
        &self,
        results: &BTreeMap<BuiltinGeometry, Vec<GeneratedStrokes>>,
        directory: &Path,
    ) -> StrokeResult<usize> {
        Ok(io::save_all(directory, results)?)
    }
}

//! File input and output helpers for generated strokes.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::StrokeResult;
use crate::shapes::BuiltinGeometry;
use crate::strokes::{FreeformStrokes, GeneratedStrokes, Strokes};

/// Reads a file to string.
pub fn read_to_string(path: &Path) -> io::Result<String> {
    let mut buffer = String::new();
    File::open(path)?.read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Writes a string to a file, replacing any existing content.
pub fn write_string(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())
}

/// On-disk form of one result: `value` rows are `[x, z, y, group]` and
/// `types` holds the freeform tag codes.
///
/// Both datasets are stored in one plain JSON document, not a compressed
/// columnar container; readers expecting HDF5 `value`/`types` datasets need a
/// conversion step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeFile {
    pub value: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<i64>>,
}

impl From<&GeneratedStrokes> for StrokeFile {
    fn from(result: &GeneratedStrokes) -> Self {
        let value = result
            .strokes()
            .to_rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect();
        let types = result
            .types()
            .map(|types| types.iter().map(|t| t.code()).collect());
        Self { value, types }
    }
}

impl StrokeFile {
    /// Rebuilds the container, checking every row.
    pub fn into_strokes(self) -> StrokeResult<GeneratedStrokes> {
        let strokes = Strokes::from_rows(&self.value)?;
        match self.types {
            None => Ok(GeneratedStrokes::Plain(strokes)),
            Some(codes) => {
                let mut freeform = FreeformStrokes::new(strokes);
                freeform.load_type_codes(&codes)?;
                Ok(GeneratedStrokes::Freeform(freeform))
            }
        }
    }
}

/// Checks that `path` names a `.json` file in an existing directory.
pub fn validate_file_path(path: &Path) -> io::Result<()> {
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("file path '{}' does not have the .json extension", path.display()),
        ));
    }
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("could not find the directory '{}'", dir.display()),
        )),
        _ => Ok(()),
    }
}

pub fn write_stroke_file(path: &Path, file: &StrokeFile) -> io::Result<()> {
    validate_file_path(path)?;
    let json = serde_json::to_string(file).map_err(io::Error::other)?;
    write_string(path, &json)
}

pub fn read_stroke_file(path: &Path) -> io::Result<StrokeFile> {
    let contents = read_to_string(path)?;
    let file: StrokeFile = serde_json::from_str(&contents)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(file)
}

/// Writes one result to `path`.
pub fn save_strokes(result: &GeneratedStrokes, path: &Path) -> io::Result<()> {
    write_stroke_file(path, &StrokeFile::from(result))
}

/// Writes `results` as `1.json`, `2.json`, ... inside `directory`, creating
/// it when needed. Returns the written paths.
pub fn save_files(directory: &Path, results: &[GeneratedStrokes]) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(directory)?;
    let mut written = Vec::with_capacity(results.len());
    for (i, result) in results.iter().enumerate() {
        let path = directory.join(format!("{}.json", i + 1));
        save_strokes(result, &path)?;
        written.push(path);
    }
    Ok(written)
}

/// Writes every geometry's results under `<directory>/<geometry>/`.
pub fn save_all(
    directory: &Path,
    results: &BTreeMap<BuiltinGeometry, Vec<GeneratedStrokes>>,
) -> io::Result<usize> {
    let mut total = 0;
    for (geometry, batch) in results {
        let written = save_files(&directory.join(geometry.name()), batch)?;
        total += written.len();
    }
    info!("saved {total} stroke files to {}", directory.display());
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point3;
    use crate::strokes::StrokeType;

    fn sample() -> GeneratedStrokes {
        let strokes = Strokes::load_points(vec![
            vec![Point3::new(0.0, 0.0, 1.0), Point3::new(1.0, 0.0, 1.0)],
            vec![Point3::new(1.0, 0.0, 0.0)],
        ])
        .unwrap();
        GeneratedStrokes::Plain(strokes)
    }

    #[test]
    fn file_rows_follow_storage_order() {
        let file = StrokeFile::from(&sample());
        assert_eq!(file.value[1], vec![1.0, 0.0, 1.0, 0.0]);
        assert_eq!(file.value[2], vec![1.0, 0.0, 0.0, 1.0]);
        assert!(file.types.is_none());
        let json = serde_json::to_string(&file).unwrap();
        assert!(!json.contains("types"));
    }

    #[test]
    fn json_document_names_its_datasets() {
        let mut freeform = FreeformStrokes::load_points(vec![vec![
            Point3::new(0.5, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
        ]])
        .unwrap();
        freeform.load_type_codes(&[0, 1]).unwrap();
        let file = StrokeFile::from(&GeneratedStrokes::Freeform(freeform));
        let json: serde_json::Value = serde_json::to_value(&file).unwrap();
        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["types", "value"]);
        assert_eq!(json["value"][0], serde_json::json!([0.5, 0.0, 1.0, 0.0]));
        assert_eq!(json["types"], serde_json::json!([0, 1]));
    }

    #[test]
    fn path_validation() {
        assert!(validate_file_path(Path::new("out.json")).is_ok());
        let err = validate_file_path(Path::new("out.hdf5")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        let err = validate_file_path(Path::new("/no/such/dir/out.json")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn freeform_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut freeform = FreeformStrokes::load_points(vec![vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
        ]])
        .unwrap();
        freeform
            .load_plane_strokes_types(vec![StrokeType::CurveStart, StrokeType::Line])
            .unwrap();
        let result = GeneratedStrokes::Freeform(freeform);

        let path = dir.path().join("freeform.json");
        save_strokes(&result, &path).unwrap();
        let loaded = read_stroke_file(&path).unwrap().into_strokes().unwrap();
        assert_eq!(loaded, result);
    }

    #[test]
    fn malformed_rows_are_rejected() {
        let file = StrokeFile {
            value: vec![vec![0.0, 1.0]],
            types: None,
        };
        assert!(file.into_strokes().is_err());
    }
}

//! Declarative key/type schema for geometry configuration tables.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::error::{StrokeError, StrokeResult};

/// Value type a configuration key must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleType {
    Int,
    /// A float; integers are accepted too.
    Float,
    /// A `[low, high]` pair of numbers.
    Tuple,
}

impl RuleType {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "int" => Some(RuleType::Int),
            "float" => Some(RuleType::Float),
            "tuple" => Some(RuleType::Tuple),
            _ => None,
        }
    }

    /// Whether `value` has this type.
    pub fn matches(self, value: &toml::Value) -> bool {
        use toml::Value;
        let is_number = |v: &Value| matches!(v, Value::Integer(_) | Value::Float(_));
        match self {
            RuleType::Int => matches!(value, Value::Integer(_)),
            RuleType::Float => is_number(value),
            RuleType::Tuple => match value {
                Value::Array(items) => items.len() == 2 && items.iter().all(is_number),
                _ => false,
            },
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleType::Int => "int",
            RuleType::Float => "float",
            RuleType::Tuple => "tuple",
        };
        f.write_str(name)
    }
}

/// Text of the rules shipped with the library.
pub const BUILTIN_RULES: &str = include_str!("../../rules.toml");

/// Rules of every geometry, keyed by geometry name.
#[derive(Debug, Clone, Default)]
pub struct Rules {
    geometries: BTreeMap<String, BTreeMap<String, RuleType>>,
}

impl Rules {
    /// The rules shipped with the library.
    pub fn builtin() -> StrokeResult<Self> {
        Self::from_str(BUILTIN_RULES, Path::new("rules.toml"))
    }

    /// Load rules from a file path.
    pub fn from_file(path: &Path) -> StrokeResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content, path)
    }

    /// Parse rules from a string.
    pub fn from_str(content: &str, path: &Path) -> StrokeResult<Self> {
        let document: toml::Table = toml::from_str(content).map_err(|e| StrokeError::Parse {
            path: path.to_owned(),
            source: e,
        })?;

        let mut geometries = BTreeMap::new();
        for (name, table) in document {
            let toml::Value::Table(table) = table else {
                return Err(StrokeError::Configuration(format!(
                    "geometry rules of '{name}' is not a table"
                )));
            };
            let mut rules = BTreeMap::new();
            for (key, value) in table {
                let ty = value.as_str().and_then(RuleType::parse).ok_or_else(|| {
                    StrokeError::Configuration(format!(
                        "geometry rule '{key}' has not support the type: {value}"
                    ))
                })?;
                rules.insert(key, ty);
            }
            geometries.insert(name, rules);
        }
        Ok(Self { geometries })
    }

    /// Rules of one geometry.
    pub fn for_geometry(&self, name: &str) -> StrokeResult<&BTreeMap<String, RuleType>> {
        self.geometries.get(name).ok_or_else(|| {
            StrokeError::Configuration(format!("geometry rules of '{name}' is not exist"))
        })
    }

    /// Checks that `table` carries every key of `name`'s rules with the
    /// declared type.
    pub fn validate(&self, name: &str, table: &toml::Table) -> StrokeResult<()> {
        if table.is_empty() {
            return Err(StrokeError::Configuration(format!(
                "geometry '{name}' config can not be blank"
            )));
        }
        for (key, ty) in self.for_geometry(name)? {
            let value = table.get(key).ok_or_else(|| {
                StrokeError::Configuration(format!(
                    "'{key}' is not exist in geometry '{name}' config"
                ))
            })?;
            if !ty.matches(value) {
                return Err(StrokeError::Configuration(format!(
                    "'{key}' of geometry '{name}' config is not the type: '{ty}'"
                )));
            }
        }
        Ok(())
    }

    /// Names of the geometries that have rules.
    pub fn geometry_names(&self) -> impl Iterator<Item = &str> {
        self.geometries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Rules {
        let content = r#"
            [cone]
            density = "float"
            count = "int"
            radius_range = "tuple"
        "#;
        Rules::from_str(content, Path::new("test/rules.toml")).unwrap()
    }

    fn table(content: &str) -> toml::Table {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn builtin_rules_cover_every_geometry() {
        let rules = Rules::builtin().unwrap();
        let names: Vec<&str> = rules.geometry_names().collect();
        assert_eq!(names.len(), 9);
        assert!(rules.for_geometry("freeform").unwrap().contains_key("curve_poss"));
    }

    #[test]
    fn unsupported_rule_type_is_rejected() {
        let err = Rules::from_str("[cone]\ndensity = \"string\"\n", Path::new("r.toml")).unwrap_err();
        assert!(err.to_string().contains("density"));
    }

    #[test]
    fn malformed_rules_report_the_path() {
        let err = Rules::from_str("[cone", Path::new("bad/rules.toml")).unwrap_err();
        assert!(matches!(err, StrokeError::Parse { .. }));
        assert!(err.to_string().contains("bad/rules.toml"));
    }

    #[test]
    fn validate_accepts_matching_table() {
        let t = table("density = 1\ncount = 3\nradius_range = [1, 2.5]\nextra = true\n");
        rules().validate("cone", &t).unwrap();
    }

    #[test]
    fn validate_names_missing_key() {
        let t = table("density = 1.0\ncount = 3\n");
        let err = rules().validate("cone", &t).unwrap_err();
        assert!(err.to_string().contains("'radius_range' is not exist"));
    }

    #[test]
    fn validate_checks_types() {
        let t = table("density = 1.0\ncount = 3.0\nradius_range = [1, 2]\n");
        let err = rules().validate("cone", &t).unwrap_err();
        assert!(err.to_string().contains("'count'"));

        let t = table("density = 1.0\ncount = 3\nradius_range = [1, 2, 3]\n");
        assert!(rules().validate("cone", &t).is_err());
    }

    #[test]
    fn unknown_geometry_has_no_rules() {
        let err = rules().validate("dome", &table("density = 1.0\n")).unwrap_err();
        assert!(err.to_string().contains("dome"));
    }
}

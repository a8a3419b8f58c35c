//! Population means for the clinical features the form does not collect.

use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::path::Path;

use crate::artifacts::read_json;
use crate::error::{ArtifactKind, LoadError};

/// Column name to mean value. Unknown columns read as `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultMeans {
    values: HashMap<String, f64>,
}

impl DefaultMeans {
    pub fn new(values: HashMap<String, f64>) -> Self {
        Self { values }
    }

    /// Read a JSON object of column means. Non-numeric entries are skipped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw: JsonValue = read_json(ArtifactKind::DefaultMeans, path)?;
        let JsonValue::Object(map) = raw else {
            return Err(LoadError::corrupt(
                ArtifactKind::DefaultMeans,
                path,
                "expected a JSON object of column means",
            ));
        };

        let mut values = HashMap::with_capacity(map.len());
        for (name, value) in map {
            match value.as_f64() {
                Some(v) => {
                    values.insert(name, v);
                }
                None => log::warn!("ignoring non-numeric mean for column {name:?}: {value}"),
            }
        }
        Ok(Self { values })
    }

    pub fn get(&self, column: &str) -> f64 {
        self.values.get(column).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }
}

impl FromIterator<(String, f64)> for DefaultMeans {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

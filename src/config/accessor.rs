//! Typed access to YAML mappings.
//!
//! [`ConvertToMapAccessor`] turns an arbitrary [`Value`] into a [`MapAccessor`]
//! or reports a caller-supplied error. Each call site supplies its own error
//! so diagnostics name the offending location in the document.

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// A required collaborator was missing at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Precondition violated: {0} must not be absent")]
pub struct PreconditionViolation(pub &'static str);

/// A lookup path was not of the form `/segment[/segment...]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid path '{0}'")]
pub struct PathError(pub String);

/// Converts values into [`MapAccessor`]s, producing the supplier's error on mismatch.
#[derive(Clone)]
pub struct ConvertToMapAccessor<F> {
    supplier: F,
}

impl<F, E> ConvertToMapAccessor<F>
where
    F: Fn() -> E,
{
    pub fn new(supplier: F) -> Self {
        Self { supplier }
    }

    /// Construct from an optional supplier, failing if it is absent.
    pub fn try_new(supplier: Option<F>) -> Result<Self, PreconditionViolation> {
        supplier
            .map(Self::new)
            .ok_or(PreconditionViolation("supplier"))
    }

    /// View `value` as a mapping.
    ///
    /// The supplier runs exactly once when `value` is not a mapping, and its
    /// error is returned untouched.
    pub fn apply<'a>(&self, value: &'a Value) -> Result<MapAccessor<'a>, E> {
        match value {
            Value::Mapping(map) => Ok(MapAccessor::new(map)),
            _ => Err((self.supplier)()),
        }
    }
}

/// Read-only, path-based lookups over a borrowed YAML mapping.
#[derive(Debug, Clone, Copy)]
pub struct MapAccessor<'a> {
    map: &'a Mapping,
}

impl<'a> MapAccessor<'a> {
    pub fn new(map: &'a Mapping) -> Self {
        Self { map }
    }

    /// The wrapped mapping.
    pub fn mapping(&self) -> &'a Mapping {
        self.map
    }

    /// Whether `path` names an existing entry.
    pub fn contains_path(&self, path: &str) -> Result<bool, PathError> {
        Ok(self.get(path)?.is_some())
    }

    /// Look up a `/`-separated path such as `/httpServer/authentication`.
    ///
    /// Returns `None` when a segment is missing or an intermediate value is not a mapping.
    pub fn get(&self, path: &str) -> Result<Option<&'a Value>, PathError> {
        let segments = split_path(path)?;

        let mut current = self.map;
        let mut found = None;
        for (i, segment) in segments.iter().enumerate() {
            let Some(value) = current.get(*segment) else {
                return Ok(None);
            };
            if i + 1 == segments.len() {
                found = Some(value);
            } else {
                match value {
                    Value::Mapping(map) => current = map,
                    _ => return Ok(None),
                }
            }
        }
        Ok(found)
    }

    /// Like [`get`](Self::get), falling back to `default` for a missing entry.
    pub fn get_or_else(&self, path: &str, default: &'a Value) -> Result<&'a Value, PathError> {
        Ok(self.get(path)?.unwrap_or(default))
    }

    /// Like [`get`](Self::get), producing the supplier's error for a missing entry.
    pub fn get_or_err<E, F>(&self, path: &str, supplier: F) -> Result<&'a Value, E>
    where
        F: FnOnce() -> E,
        E: From<PathError>,
    {
        self.get(path)?.ok_or_else(supplier)
    }

    /// Deserialize the value at `path` into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, GetAsError> {
        match self.get(path)? {
            Some(value) => serde_yaml::from_value(value.clone())
                .map(Some)
                .map_err(|source| GetAsError::Type {
                    path: path.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }
}

/// Failure of [`MapAccessor::get_as`].
#[derive(Debug, Error)]
pub enum GetAsError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("Invalid value at {path}: {source}")]
    Type {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

fn split_path(path: &str) -> Result<Vec<&str>, PathError> {
    let rest = path
        .strip_prefix('/')
        .ok_or_else(|| PathError(path.to_string()))?;
    let segments: Vec<&str> = rest.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(PathError(path.to_string()));
    }
    Ok(segments)
}

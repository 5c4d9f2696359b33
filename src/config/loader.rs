//! Configuration loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::config::accessor::{ConvertToMapAccessor, GetAsError, MapAccessor, PathError};
use crate::config::schema::{BasicAuthConfig, ExporterConfig, HttpServerConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{0}")]
    Invalid(String),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

impl ConfigError {
    /// A supplier producing [`ConfigError::Invalid`] with `message`, for use
    /// with [`ConvertToMapAccessor`] and [`MapAccessor::get_or_err`].
    pub fn supplier(message: impl Into<String>) -> impl Fn() -> ConfigError + Clone {
        let message = message.into();
        move || ConfigError::Invalid(message.clone())
    }
}

impl From<PathError> for ConfigError {
    fn from(err: PathError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<ExporterConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content)?;

    tracing::info!(
        path = %path.display(),
        start_delay_seconds = config.start_delay_seconds,
        authentication = config.http_server.authentication.is_some(),
        "Configuration loaded"
    );
    Ok(config)
}

/// Parse and validate configuration from YAML text.
///
/// An empty document is treated as an empty map.
pub fn parse_config(content: &str) -> Result<ExporterConfig, ConfigError> {
    let mut document: Value = serde_yaml::from_str(content)?;
    if document.is_null() {
        document = Value::Mapping(Mapping::new());
    }

    let root = ConvertToMapAccessor::new(ConfigError::supplier(
        "Invalid configuration: root must be a map",
    ))
    .apply(&document)?;

    let start_delay_seconds =
        typed::<u64>(&root, "/startDelaySeconds", "/startDelaySeconds", "an integer")?.unwrap_or(0);

    let http_server = match root.get("/httpServer")? {
        Some(value) => parse_http_server(value)?,
        None => HttpServerConfig::default(),
    };

    let config = ExporterConfig {
        start_delay_seconds,
        http_server,
    };
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn parse_http_server(value: &Value) -> Result<HttpServerConfig, ConfigError> {
    let server = ConvertToMapAccessor::new(ConfigError::supplier(
        "Invalid configuration for /httpServer must be a map",
    ))
    .apply(value)?;

    let request_timeout_secs = typed::<u64>(
        &server,
        "/requestTimeoutSeconds",
        "/httpServer/requestTimeoutSeconds",
        "an integer",
    )?
    .unwrap_or(HttpServerConfig::DEFAULT_REQUEST_TIMEOUT_SECS);

    let authentication = match server.get("/authentication")? {
        Some(value) => Some(parse_authentication(value)?),
        None => None,
    };

    Ok(HttpServerConfig {
        authentication,
        request_timeout_secs,
    })
}

fn parse_authentication(value: &Value) -> Result<BasicAuthConfig, ConfigError> {
    let authentication = ConvertToMapAccessor::new(ConfigError::supplier(
        "Invalid configuration for /httpServer/authentication must be a map",
    ))
    .apply(value)?;

    let basic = authentication.get_or_err(
        "/basic",
        ConfigError::supplier("/httpServer/authentication/basic configuration is required"),
    )?;
    let basic = ConvertToMapAccessor::new(ConfigError::supplier(
        "Invalid configuration for /httpServer/authentication/basic must be a map",
    ))
    .apply(basic)?;

    Ok(BasicAuthConfig {
        username: required_string(
            &basic,
            "/username",
            "/httpServer/authentication/basic/username",
        )?,
        password: required_string(
            &basic,
            "/password",
            "/httpServer/authentication/basic/password",
        )?,
    })
}

fn required_string(
    map: &MapAccessor<'_>,
    key: &str,
    full_path: &str,
) -> Result<String, ConfigError> {
    typed::<String>(map, key, full_path, "a string")?.ok_or_else(|| {
        ConfigError::Invalid(format!("{full_path} is a required string"))
    })
}

fn typed<T: DeserializeOwned>(
    map: &MapAccessor<'_>,
    key: &str,
    full_path: &str,
    expected: &str,
) -> Result<Option<T>, ConfigError> {
    map.get_as::<T>(key).map_err(|err| match err {
        GetAsError::Path(err) => err.into(),
        GetAsError::Type { .. } => ConfigError::Invalid(format!(
            "Invalid configuration for {full_path} must be {expected}"
        )),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_message(content: &str) -> String {
        match parse_config(content) {
            Err(ConfigError::Invalid(message)) => message,
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), ExporterConfig::default());
        assert_eq!(parse_config("# only a comment\n").unwrap(), ExporterConfig::default());
    }

    #[test]
    fn test_unrelated_keys_are_ignored() {
        let config =
            parse_config("lowercaseOutputName: true\nrules:\n  - pattern: \".*\"\n").unwrap();
        assert_eq!(config, ExporterConfig::default());
    }

    #[test]
    fn test_full_document() {
        let config = parse_config(
            r#"
startDelaySeconds: 2
httpServer:
  requestTimeoutSeconds: 5
  authentication:
    basic:
      username: prometheus
      password: secret
"#,
        )
        .unwrap();

        assert_eq!(config.start_delay_seconds, 2);
        assert_eq!(config.http_server.request_timeout_secs, 5);
        let basic = config.http_server.authentication.unwrap();
        assert_eq!(basic.username, "prometheus");
        assert_eq!(basic.password, "secret");
    }

    #[test]
    fn test_root_must_be_a_map() {
        assert_eq!(invalid_message("- a\n- b\n"), "Invalid configuration: root must be a map");
        assert_eq!(invalid_message("hello"), "Invalid configuration: root must be a map");
    }

    #[test]
    fn test_nested_sections_report_their_path() {
        assert_eq!(
            invalid_message("httpServer: 8080\n"),
            "Invalid configuration for /httpServer must be a map"
        );
        assert_eq!(
            invalid_message("httpServer:\n  authentication: basic\n"),
            "Invalid configuration for /httpServer/authentication must be a map"
        );
        assert_eq!(
            invalid_message("httpServer:\n  authentication:\n    basic: [a]\n"),
            "Invalid configuration for /httpServer/authentication/basic must be a map"
        );
        assert_eq!(
            invalid_message("httpServer:\n  authentication: {}\n"),
            "/httpServer/authentication/basic configuration is required"
        );
    }

    #[test]
    fn test_typed_values() {
        assert_eq!(
            invalid_message("startDelaySeconds: soon\n"),
            "Invalid configuration for /startDelaySeconds must be an integer"
        );
        assert_eq!(
            invalid_message(concat!(
                "httpServer:\n  authentication:\n",
                "    basic:\n      username: prometheus\n",
            )),
            "/httpServer/authentication/basic/password is a required string"
        );
    }

    #[test]
    fn test_validation_errors_surface() {
        let err = parse_config(concat!(
            "httpServer:\n  authentication:\n    basic:\n",
            "      username: \"\"\n      password: secret\n",
        ))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().starts_with("Validation failed: "));
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(parse_config("a: [1, 2\n"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/exporter.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/exporter.yaml"));
    }
}

//! Config validation: schema checks with user-friendly error messages.

use crate::schema::VoxConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &VoxConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_destinations(config, &mut report);
    report
}

fn validate_server(config: &VoxConfig, report: &mut ValidationReport) {
    let server = &config.server;
    if server.port < 1024 && server.port != 80 && server.port != 443 {
        report.warn(
            "server.port",
            format!(
                "Port {} requires elevated privileges; consider using a port >= 1024",
                server.port
            ),
        );
    }
    if server.allowed_extensions.is_empty() {
        report.warn(
            "server.allowed_extensions",
            "No allowed extensions; every upload will be rejected",
        );
    }
}

/// Validate the destination registry. At least one destination is required;
/// the first one doubles as the routing fallback.
fn validate_destinations(config: &VoxConfig, report: &mut ValidationReport) {
    if config.destinations.is_empty() {
        report.error("destinations", "At least one destination must be configured");
        return;
    }
    for (i, dest) in config.destinations.iter().enumerate() {
        let path = format!("destinations[{i}]");
        if dest.name.trim().is_empty() {
            report.warn(format!("{path}.name"), "Destination name is empty");
        }
        if dest.db_id.trim().is_empty() {
            report.error(format!("{path}.db_id"), "db_id cannot be empty");
        }
        if dest.language.trim().is_empty() {
            report.error(format!("{path}.language"), "language cannot be empty");
        }
        if dest.keywords.is_empty() && i > 0 {
            report.warn(
                format!("{path}.keywords"),
                "Destination has no keywords and is not the fallback; it is unreachable",
            );
        }
        if dest.fields.is_empty() {
            report.warn(
                format!("{path}.fields"),
                "Destination has no fields; rows will be empty",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Destination;

    fn destination(name: &str, keywords: &[&str]) -> Destination {
        Destination {
            name: name.to_string(),
            db_id: format!("db-{name}"),
            language: "english".to_string(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            fields: vec!["Title".to_string()],
        }
    }

    #[test]
    fn test_empty_destinations_is_error() {
        let config = VoxConfig::default();
        let report = validate(&config);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "destinations");
    }

    #[test]
    fn test_valid_config_passes() {
        let config = VoxConfig {
            destinations: vec![destination("ideas", &["idea"])],
            ..Default::default()
        };
        let report = validate(&config);
        assert!(report.is_valid());
    }

    #[test]
    fn test_missing_db_id_is_error() {
        let mut dest = destination("ideas", &["idea"]);
        dest.db_id = String::new();
        let config = VoxConfig {
            destinations: vec![dest],
            ..Default::default()
        };
        let report = validate(&config);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_keywordless_non_fallback_warns() {
        let config = VoxConfig {
            destinations: vec![destination("ideas", &["idea"]), destination("dead", &[])],
            ..Default::default()
        };
        let report = validate(&config);
        assert!(report.is_valid());
        assert!(report
            .warnings
            .iter()
            .any(|w| w.path == "destinations[1].keywords"));
    }
}

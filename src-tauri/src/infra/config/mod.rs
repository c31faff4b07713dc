use crate::core::motion::geometry::MotionConfig;
use crate::domain::errors::MotionError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_ENV: &str = "CAT_ENTERTAINER_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub motion: MotionConfig,
}

/// Reads the file named by `CAT_ENTERTAINER_CONFIG`, or returns defaults
/// when the variable is unset.
pub fn load_config_from_env() -> Result<AppConfig, MotionError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => load_config(Path::new(&path)),
        None => Ok(AppConfig::default()),
    }
}

pub fn load_config(path: &Path) -> Result<AppConfig, MotionError> {
    let config_error = |message: String| MotionError::Config {
        path: path.display().to_string(),
        message,
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|error| config_error(format!("failed to read config: {error}")))?;
    let config = serde_json::from_str::<AppConfig>(&raw)
        .map_err(|error| config_error(format!("failed to parse config: {error}")))?;
    config.motion.validate().map_err(config_error)?;
    tracing::info!("loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::{load_config, AppConfig};
    use crate::domain::errors::MotionError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(raw: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(raw.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config(r#"{ "motion": { "tickIntervalMs": 500, "marginX": 20.0 } }"#);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.motion.tick_interval_ms, 500);
        assert_eq!(config.motion.margin_x, 20.0);
        assert_eq!(config.motion.margin_y, 150.0);
        assert_eq!(config.motion.base_transition_secs, 2.0);
    }

    #[test]
    fn empty_object_is_default() {
        let file = write_config("{}");
        assert_eq!(load_config(file.path()).unwrap(), AppConfig::default());
    }

    #[test]
    fn speed_keys_are_not_configurable() {
        let file = write_config(r#"{ "motion": { "defaultSpeed": 1.5, "maxSpeed": 3.0 } }"#);
        assert_eq!(load_config(file.path()).unwrap(), AppConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let file = write_config(r#"{ "motion": { "tickIntervalMs": 0 } }"#);
        let result = load_config(file.path());
        assert!(matches!(result, Err(MotionError::Config { message, .. }) if message.contains("tickIntervalMs")));
    }

    #[test]
    fn malformed_json_is_reported() {
        let file = write_config("{ motion: ");
        assert!(matches!(
            load_config(file.path()),
            Err(MotionError::Config { .. })
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(MotionError::Config { message, .. }) if message.contains("read")));
    }
}

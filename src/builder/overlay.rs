//! JSON file overlay applied on top of the current config value.

use crate::ConfigError;
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Overlay the JSON document at `path` onto `config`.
///
/// Only keys present in the document change; absent fields keep whatever
/// value they had. Unknown keys in the document are ignored.
pub(super) fn overlay_from_file<T>(config: &mut T, path: &Path) -> Result<(), ConfigError>
where
    T: Serialize + DeserializeOwned,
{
    debug!("loading config file (path={})", path.display());
    let contents = fs::read_to_string(path)?;
    let overlay: Value = serde_json::from_str(&contents).map_err(ConfigError::ParseFailed)?;

    let mut base = serde_json::to_value(&*config).map_err(ConfigError::DecodeFailed)?;
    merge_json_values(&mut base, &overlay);
    *config = serde_json::from_value(base).map_err(ConfigError::DecodeFailed)?;
    Ok(())
}

/// Merge overlay values into the base, recursively overriding objects.
fn merge_json_values(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => merge_json_values(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base_slot, overlay_value) => {
            *base_slot = overlay_value.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        port: u16,
        tags: Vec<String>,
        nested: Nested,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Nested {
        value: String,
        count: u32,
    }

    fn sample() -> Sample {
        Sample {
            name: "default".to_string(),
            port: 8080,
            tags: vec!["default".to_string()],
            nested: Nested {
                value: "inner".to_string(),
                count: 3,
            },
        }
    }

    fn write_overlay(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.json");
        fs::write(&path, contents).expect("write");
        path
    }

    #[test]
    fn only_present_keys_change() {
        let temp = TempDir::new().expect("tmp");
        let path = write_overlay(&temp, r#"{ "port": 9090, "nested": { "count": 7 } }"#);

        let mut config = sample();
        overlay_from_file(&mut config, &path).expect("overlay");

        assert_eq!(config.port, 9090);
        assert_eq!(config.nested.count, 7);
        // Everything absent from the document keeps its default.
        assert_eq!(config.name, "default");
        assert_eq!(config.tags, vec!["default"]);
        assert_eq!(config.nested.value, "inner");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let temp = TempDir::new().expect("tmp");
        let path = write_overlay(&temp, r#"{ "name": "from-file", "unexpected": true }"#);

        let mut config = sample();
        overlay_from_file(&mut config, &path).expect("overlay");
        assert_eq!(config.name, "from-file");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let temp = TempDir::new().expect("tmp");
        let path = write_overlay(&temp, "{invalid json}");

        let mut config = sample();
        let err = overlay_from_file(&mut config, &path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseFailed(_)), "{err}");
        assert!(err.to_string().contains("failed to parse config file"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let mut config = sample();
        let err =
            overlay_from_file(&mut config, Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed(_)), "{err}");
        assert!(err.to_string().contains("failed to read config file"));
    }
}

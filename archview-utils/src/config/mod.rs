//! Configuration file loading
//!
//! Files are parsed by extension (`.toml`, `.json`, `.yml`/`.yaml`) and
//! deserialised into the caller's config type.

use serde::Deserialize;
use std::path::Path;

use crate::{Result, UtilError};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Detect the format from a path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yml" | "yaml" => Ok(Self::Yaml),
            _ => Err(UtilError::Config(format!(
                "Unsupported config format: '{}' ({})",
                extension,
                path.display()
            ))),
        }
    }

    fn parse_value(self, content: &str) -> Result<serde_json::Value> {
        match self {
            Self::Toml => {
                let toml_value: toml::Value = toml::from_str(content)
                    .map_err(|e| UtilError::Config(format!("TOML parse error: {e}")))?;
                serde_json::to_value(toml_value)
                    .map_err(|e| UtilError::Config(format!("TOML conversion error: {e}")))
            }
            Self::Json => serde_json::from_str(content)
                .map_err(|e| UtilError::Config(format!("JSON parse error: {e}"))),
            Self::Yaml => serde_yaml::from_str(content)
                .map_err(|e| UtilError::Config(format!("YAML parse error: {e}"))),
        }
    }
}

/// Load a configuration file into `T`
pub fn load_config<T>(path: &Path) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let format = ConfigFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    let value = format.parse_value(&content)?;

    serde_json::from_value(value)
        .map_err(|e| UtilError::Config(format!("{}: {e}", path.display())))
}

/// Load a configuration file, falling back to `T::default()` when the file does not exist
pub fn load_config_or_default<T>(path: &Path) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(T::default());
    }
    load_config(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::io::Write;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Sample {
        name: String,
        level: Option<String>,
        nested: Nested,
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Nested {
        enabled: bool,
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_toml_json_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = write_file(&dir, "a.toml", "name = \"demo\"\n[nested]\nenabled = true\n");
        let json_path = write_file(&dir, "b.json", r#"{"name": "demo", "nested": {"enabled": true}}"#);
        let yaml_path = write_file(&dir, "c.yaml", "name: demo\nnested:\n  enabled: true\n");

        let expected = Sample {
            name: "demo".to_string(),
            level: None,
            nested: Nested { enabled: true },
        };
        assert_eq!(load_config::<Sample>(&toml_path).unwrap(), expected);
        assert_eq!(load_config::<Sample>(&json_path).unwrap(), expected);
        assert_eq!(load_config::<Sample>(&yaml_path).unwrap(), expected);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "a.ini", "name=demo");
        assert!(matches!(load_config::<Sample>(&path), Err(UtilError::Config(_))));
    }

    #[test]
    fn test_missing_file_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let config: Sample = load_config_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Sample::default());
    }
}

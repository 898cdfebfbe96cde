mod schema;
mod validation;

pub use schema::{Config, DEFAULT_PATTERN};
pub use validation::validate_config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/ref-tally/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("ref-tally"))
}

/// Get the default config file path (~/.config/ref-tally/config.yaml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   (~/.config/ref-tally/config.yaml) and falls back to defaults when that
///   file doesn't exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            path
        }
        None => match get_config_path() {
            Some(default_path) if default_path.exists() => default_path,
            _ => return Ok(Config::default()),
        },
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!("Failed to parse config: invalid YAML in {}", config_path.display())
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_explicit_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "input_dir: /srv/exports\npattern: \"page*.json\"\n").unwrap();

        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.input_dir(), PathBuf::from("/srv/exports"));
        assert_eq!(config.pattern(), "page*.json");
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(Some(dir.path().join("nope.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "pattern: [unclosed\n").unwrap();
        assert!(load_config(Some(path)).is_err());
    }

    #[test]
    fn test_config_path_layout() {
        if let Some(path) = get_config_path() {
            assert!(path.ends_with(".config/ref-tally/config.yaml"));
        }
    }
}

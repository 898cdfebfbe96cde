use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::reconcile::{default_division_aliases, DivisionAliases};

pub const DEFAULT_PATTERN: &str = "games*.json";

/// Tool configuration.
///
/// Every field is optional; anything left out falls back to its default.
///
/// Example YAML:
/// ```yaml
/// input_dir: ~/Downloads/area-5c
/// pattern: "games*.json"
/// division_aliases:
///   U8C: 08UC
///   U10G: 10UG
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the exported game pages (default: current directory)
    #[serde(default)]
    pub input_dir: Option<PathBuf>,

    /// File name pattern for exported pages (default: "games*.json")
    #[serde(default)]
    pub pattern: Option<String>,

    /// Irregular division codes and their canonical spelling.
    /// Merged over the built-in table (U8C -> 08UC); an entry with the same
    /// code overrides the built-in one.
    #[serde(default)]
    pub division_aliases: Option<BTreeMap<String, String>>,
}

impl Config {
    /// Input directory with a leading "~/" expanded
    pub fn input_dir(&self) -> PathBuf {
        let dir = self
            .input_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        match (dir.strip_prefix("~"), dirs::home_dir()) {
            (Ok(rest), Some(home)) => home.join(rest),
            _ => dir,
        }
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_deref().unwrap_or(DEFAULT_PATTERN)
    }

    pub fn division_aliases(&self) -> DivisionAliases {
        let mut aliases = default_division_aliases();
        if let Some(configured) = &self.division_aliases {
            aliases.extend(configured.clone());
        }
        aliases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input_dir(), PathBuf::from("."));
        assert_eq!(config.pattern(), "games*.json");
        assert_eq!(
            config.division_aliases().get("U8C").map(String::as_str),
            Some("08UC")
        );
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut aliases = BTreeMap::new();
        aliases.insert("U8C".to_string(), "08UC".to_string());
        let config = Config {
            input_dir: Some(PathBuf::from("/data/exports")),
            pattern: Some("page*.json".to_string()),
            division_aliases: Some(aliases),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config_parse() {
        let yaml = r#"
pattern: "export-*.json"
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.pattern(), "export-*.json");
        assert!(config.input_dir.is_none());
        assert!(config.division_aliases.is_none());
    }

    #[test]
    fn test_aliases_extend_defaults() {
        let yaml = r#"
division_aliases:
  U10G: "10UG"
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let aliases = config.division_aliases();
        assert_eq!(aliases.len(), 2);
        assert_eq!(aliases.get("U10G").map(String::as_str), Some("10UG"));
        assert_eq!(aliases.get("U8C").map(String::as_str), Some("08UC"));
    }

    #[test]
    fn test_configured_alias_overrides_default() {
        let yaml = r#"
division_aliases:
  U8C: "08UG"
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        let aliases = config.division_aliases();
        assert_eq!(aliases.len(), 1);
        assert_eq!(aliases.get("U8C").map(String::as_str), Some("08UG"));
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "queries: []\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_home_expansion() {
        let config = Config {
            input_dir: Some(PathBuf::from("~/exports")),
            ..Config::default()
        };
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.input_dir(), home.join("exports"));
        }
    }
}

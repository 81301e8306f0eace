//! CLI configuration handling.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{CliError, CliResult};

/// Default config file name (looked up in the current directory)
pub const CONFIG_FILE_NAME: &str = "flightlink.toml";

/// Flightlink CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Profile used when `--profile` is not given
    pub default_profile: Option<String>,

    /// Named connection profiles
    pub profiles: BTreeMap<String, Profile>,
}

/// A named URL plus connection properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Connection URL
    pub url: Option<String>,

    /// Connection properties, merged under `-p` flags
    pub properties: BTreeMap<String, String>,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> CliResult<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load from an explicit path, or from `./flightlink.toml` when it exists.
    pub fn discover(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::load(path)
            }
            None => {
                let default = std::env::current_dir()?.join(CONFIG_FILE_NAME);
                if default.exists() {
                    Self::load(&default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Select a profile by name, falling back to `default_profile`.
    pub fn profile(&self, name: Option<&str>) -> CliResult<Option<&Profile>> {
        let Some(name) = name.or(self.default_profile.as_deref()) else {
            return Ok(None);
        };
        self.profiles
            .get(name)
            .map(Some)
            .ok_or_else(|| CliError::Config(format!("Profile not found: {}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        default_profile = "local"

        [profiles.local]
        url = "jdbc:arrow-flight-sql://localhost:32010"

        [profiles.local.properties]
        user = "admin"
        useEncryption = "false"

        [profiles.prod]
        url = "jdbc:arrow-flight-sql://flight.example.com:443"
    "#;

    #[test]
    fn test_parse_profiles() {
        let config = Config::from_toml(SAMPLE).unwrap();
        assert_eq!(config.profiles.len(), 2);
        let local = &config.profiles["local"];
        assert_eq!(local.properties.get("user").map(String::as_str), Some("admin"));
        assert!(config.profiles["prod"].properties.is_empty());
    }

    #[test]
    fn test_default_profile() {
        let config = Config::from_toml(SAMPLE).unwrap();
        let profile = config.profile(None).unwrap().unwrap();
        assert_eq!(
            profile.url.as_deref(),
            Some("jdbc:arrow-flight-sql://localhost:32010")
        );
    }

    #[test]
    fn test_unknown_profile() {
        let config = Config::from_toml(SAMPLE).unwrap();
        assert!(matches!(config.profile(Some("staging")), Err(CliError::Config(_))));
    }

    #[test]
    fn test_empty_config_has_no_profile() {
        let config = Config::default();
        assert!(config.profile(None).unwrap().is_none());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::from_toml("profiles = 3"),
            Err(CliError::Config(_))
        ));
    }
}

//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the JSON data file.
    pub data_path: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_path", &self.data_path)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_path: data_dir.join("loadshed.json"),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Merge order: defaults, then the default config location, then the
    /// given file, then `SHED_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("SHED_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for shed.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("shed"))
}

/// Returns the platform-specific data directory for shed.
///
/// On Linux: `~/.local/share/shed`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("shed"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirs_data_path_returns_some() {
        assert!(dirs_data_path().is_some());
    }

    #[test]
    fn dirs_data_path_ends_with_shed() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "shed");
    }

    #[test]
    fn default_config_uses_data_dir_for_data_file() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.data_path, data_dir.join("loadshed.json"));
    }
}

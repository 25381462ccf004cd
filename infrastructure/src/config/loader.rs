//! Configuration file loader with multi-source merging

use std::path::PathBuf;

use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};

use super::file_config::FileConfig;

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./gavel.toml` or `./.gavel.toml`
    /// 3. Global: `$XDG_CONFIG_HOME/gavel/config.toml` (or the platform
    ///    equivalent)
    /// 4. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        for filename in &["gavel.toml", ".gavel.toml"] {
            let path = PathBuf::from(filename);
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
                break;
            }
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("gavel").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("gavel"));
    }

    #[test]
    fn test_explicit_path_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("override.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[panel]\nseats = 5\n\n[judge]\ngreen_threshold = 90.0"
        )
        .unwrap();

        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config.panel.seats, 5);
        assert_eq!(config.judge.green_threshold, 90.0);
        // Untouched sections stay at defaults
        assert_eq!(config.proof, FileConfig::default().proof);
    }

    #[test]
    fn test_missing_explicit_path_keeps_defaults() {
        let path = PathBuf::from("/nonexistent/gavel-test-config.toml");
        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config, FileConfig::default());
    }
}

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dummyjson::DEFAULT_BASE_URL;
use crate::error::{Result, ShelfError};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    /// Time each carousel slide stays on screen.
    pub carousel_interval_ms: u64,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            carousel_interval_ms: 2000,
            tick_rate_ms: 250,
        }
    }
}

fn config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("shelf").join("config.toml"))
}

impl Config {
    /// Load from `path`, or from `~/.config/shelf/config.toml` when no path
    /// is given. A missing default file yields the defaults; an explicit
    /// path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match config_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Config::default()),
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|e| {
            ShelfError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| ShelfError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn carousel_interval(&self) -> Duration {
        Duration::from_millis(self.carousel_interval_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
base_url = "http://localhost:8080"
carousel_interval_ms = 500
tick_rate_ms = 100
"#;
        let config = Config::parse(toml_str).unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.carousel_interval(), Duration::from_millis(500));
        assert_eq!(config.tick_rate(), Duration::from_millis(100));
    }

    #[test]
    fn missing_keys_use_defaults() {
        let config = Config::parse("carousel_interval_ms = 3000").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.carousel_interval_ms, 3000);
        assert_eq!(config.tick_rate_ms, 250);
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn zero_tick_rate_is_clamped() {
        let config = Config::parse("tick_rate_ms = 0").unwrap();
        assert_eq!(config.tick_rate(), Duration::from_millis(1));
    }

    #[test]
    fn load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"http://127.0.0.1:9\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9");
    }

    #[test]
    fn load_malformed_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = 42").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ShelfError::Config(_)));
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = Config::load(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, ShelfError::Config(_)));
    }
}

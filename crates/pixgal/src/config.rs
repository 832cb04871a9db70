//! User configuration (`~/.config/pixgal/config.toml`)

use anyhow::{Context, Result};
use pixgal_api::{get_api_base_url, ImageType, Orientation, PixabayClient, SearchOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "PIXABAY_API_KEY";

const DEFAULT_SCROLL_MARGIN: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API host; `PIXGAL_API_URL` overrides it
    pub api_url: Option<String>,
    /// Pixabay API key; `PIXABAY_API_KEY` overrides it
    pub api_key: Option<String>,
    pub image_type: ImageType,
    pub orientation: Orientation,
    pub safesearch: bool,
    /// How close (in cards) the selection may get to the end of the gallery
    /// before the next page loads
    pub scroll_margin: u32,
}

impl Default for Config {
    fn default() -> Self {
        let options = SearchOptions::default();
        Self {
            api_url: None,
            api_key: None,
            image_type: options.image_type,
            orientation: options.orientation,
            safesearch: options.safesearch,
            scroll_margin: DEFAULT_SCROLL_MARGIN,
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pixgal").join("config.toml"))
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            image_type: self.image_type,
            orientation: self.orientation,
            safesearch: self.safesearch,
        }
    }

    pub fn api_url(&self) -> String {
        get_api_base_url(self.api_url.as_deref())
    }

    /// API key from the environment, then the config file
    pub fn api_key(&self) -> Result<String> {
        let from_env = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());

        from_env
            .or_else(|| self.api_key.clone().filter(|key| !key.trim().is_empty()))
            .with_context(|| {
                let location = default_config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "the config file".to_string());
                format!(
                    "No Pixabay API key configured. Set {} or add `api_key` to {}",
                    API_KEY_ENV, location
                )
            })
    }

    pub fn client(&self) -> Result<PixabayClient> {
        let api_key = self.api_key()?;
        PixabayClient::new(self.api_url(), api_key, self.search_options())
            .context("Failed to set up the search client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let file = write_config("api_key = \"abc\"\norientation = \"vertical\"\n");
        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.orientation, Orientation::Vertical);
        assert_eq!(config.image_type, ImageType::Photo);
        assert!(config.safesearch);
        assert_eq!(config.scroll_margin, 3);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn bad_value_names_the_file() {
        let file = write_config("image_type = \"sculpture\"\n");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn options_come_from_config() {
        let config = Config {
            image_type: ImageType::Vector,
            safesearch: false,
            ..Config::default()
        };
        let options = config.search_options();
        assert_eq!(options.image_type, ImageType::Vector);
        assert_eq!(options.orientation, Orientation::Horizontal);
        assert!(!options.safesearch);
    }

    #[test]
    #[serial]
    fn env_key_wins_over_file() {
        let config = Config {
            api_key: Some("from-file".into()),
            ..Config::default()
        };

        unsafe { std::env::set_var(API_KEY_ENV, "from-env") };
        let key = config.api_key();
        unsafe { std::env::remove_var(API_KEY_ENV) };

        assert_eq!(key.unwrap(), "from-env");
        assert_eq!(config.api_key().unwrap(), "from-file");
    }

    #[test]
    #[serial]
    fn missing_key_is_reported() {
        unsafe { std::env::remove_var(API_KEY_ENV) };
        let config = Config {
            api_key: Some("   ".into()),
            ..Config::default()
        };
        let err = config.api_key().unwrap_err();
        assert!(err.to_string().contains("No Pixabay API key configured"));
    }

    #[test]
    #[serial]
    fn api_url_env_override() {
        let config = Config {
            api_url: Some("http://localhost:9000".into()),
            ..Config::default()
        };

        unsafe { std::env::remove_var("PIXGAL_API_URL") };
        assert_eq!(config.api_url(), "http://localhost:9000");

        unsafe { std::env::set_var("PIXGAL_API_URL", "http://127.0.0.1:1") };
        let overridden = config.api_url();
        unsafe { std::env::remove_var("PIXGAL_API_URL") };
        assert_eq!(overridden, "http://127.0.0.1:1");

        assert_eq!(Config::default().api_url(), "https://pixabay.com");
    }
}

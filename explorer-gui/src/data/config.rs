use std::{
    env::{self, VarError},
    fs::File,
    io::Read,
    path::PathBuf,
    time::Duration,
};

use druid::{Data, Lens};
use platform_dirs::AppDirs;
use serde::Deserialize;

use explorer_core::photo::{ImageSource, DEFAULT_BASE_URL};

use crate::error::Error;

const APP_NAME: &str = "City Explorer";
const CONFIG_FILENAME: &str = "config.json";
const PROXY_ENV_VAR: &str = "HTTPS_PROXY";

#[derive(Clone, Debug, Data, Lens, Deserialize)]
#[serde(default)]
pub struct Config {
    pub image_base_url: String,
    pub image_timeout_secs: Option<u64>,
    pub window_width: f64,
    pub window_height: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_base_url: DEFAULT_BASE_URL.to_string(),
            image_timeout_secs: None,
            window_width: 480.0,
            window_height: 640.0,
        }
    }
}

impl Config {
    fn app_dirs() -> Option<AppDirs> {
        const USE_XDG_ON_MACOS: bool = false;

        AppDirs::new(Some(APP_NAME), USE_XDG_ON_MACOS)
    }

    pub fn config_dir() -> Option<PathBuf> {
        Self::app_dirs().map(|dirs| dirs.config_dir)
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILENAME))
    }

    pub fn load() -> Option<Config> {
        let path = Self::config_path()?;
        let file = File::open(&path).ok()?;
        log::info!("loading config: {:?}", &path);
        match Self::from_reader(file) {
            Ok(config) => Some(config),
            Err(err) => {
                log::error!("failed to read config: {err}");
                None
            }
        }
    }

    pub fn from_reader(reader: impl Read) -> Result<Config, Error> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn image_source(&self) -> ImageSource {
        ImageSource::parse(&self.image_base_url).unwrap_or_else(|err| {
            log::error!("invalid image base URL {:?}: {err}", self.image_base_url);
            ImageSource::default()
        })
    }

    pub fn image_timeout(&self) -> Option<Duration> {
        self.image_timeout_secs.map(Duration::from_secs)
    }

    pub fn proxy() -> Option<String> {
        env::var(PROXY_ENV_VAR).map_or_else(
            |err| match err {
                VarError::NotPresent => None,
                VarError::NotUnicode(_) => {
                    log::error!("proxy URL is not a valid unicode");
                    None
                }
            },
            Some,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = Config::from_reader("{}".as_bytes()).unwrap();
        assert_eq!(config.image_base_url, "https://example.com/");
        assert_eq!(config.image_timeout(), None);
        assert_eq!(config.window_width, 480.0);
        assert_eq!(config.window_height, 640.0);
    }

    #[test]
    fn partial_config_overrides_fields() {
        let json = r#"{ "image_base_url": "https://img.example.net/c/", "image_timeout_secs": 3 }"#;
        let config = Config::from_reader(json.as_bytes()).unwrap();
        assert_eq!(config.image_timeout(), Some(Duration::from_secs(3)));
        assert_eq!(
            config.image_source().base().as_str(),
            "https://img.example.net/c/"
        );
        assert_eq!(config.window_width, 480.0);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(matches!(
            Config::from_reader("{ nope".as_bytes()),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn invalid_base_url_falls_back_to_default() {
        let config = Config {
            image_base_url: "::".to_string(),
            ..Config::default()
        };
        assert_eq!(config.image_source(), ImageSource::default());
    }
}

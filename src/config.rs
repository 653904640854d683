//! Application-level configuration loading: presentation settings and the
//! remote sources games are retrieved from.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::retrieve::SourceConfig;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "JPARTY_BACK_CONFIG_PATH";
const DEFAULT_THEME: &str = "Default";
const DEFAULT_EARLY_BUZZ_TIMEOUT_MS: u64 = 500;

/// How clues carrying an image are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum ImageDisplay {
    #[default]
    #[serde(rename = "Show both")]
    ShowBoth,
    #[serde(rename = "Only show image")]
    ImageOnly,
    #[serde(rename = "Only show text")]
    TextOnly,
}

impl ImageDisplay {
    /// Whether clue images are served at all.
    pub fn shows_images(self) -> bool {
        !matches!(self, ImageDisplay::TextOnly)
    }
}

/// Presentation settings loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub theme: String,
    pub show_text_with_images: ImageDisplay,
    pub early_buzz_timeout_ms: u64,
    pub allow_negative: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.into(),
            show_text_with_images: ImageDisplay::default(),
            early_buzz_timeout_ms: DEFAULT_EARLY_BUZZ_TIMEOUT_MS,
            allow_negative: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    settings: Settings,
    sources: SourceConfig,
}

impl AppConfig {
    /// Build a configuration from explicit parts.
    pub fn new(settings: Settings, sources: SourceConfig) -> Self {
        Self { settings, sources }
    }

    /// Load the application configuration from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(app_config) => {
                    info!(
                        path = %path.display(),
                        theme = %app_config.settings.theme,
                        "loaded config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse the JSON configuration format.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    /// Presentation settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Remote source endpoints.
    pub fn sources(&self) -> &SourceConfig {
        &self.sources
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    settings: RawSettings,
    sources: SourceConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawSettings {
    theme: String,
    showtextwithimages: ImageDisplay,
    earlybuzztimeout: u64,
    allownegative: RawFlag,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.into(),
            showtextwithimages: ImageDisplay::default(),
            earlybuzztimeout: DEFAULT_EARLY_BUZZ_TIMEOUT_MS,
            allownegative: RawFlag::Bool(true),
        }
    }
}

/// Boolean flag written either as a JSON bool or as `"True"`/`"False"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Text(String),
}

impl RawFlag {
    fn as_bool(&self) -> bool {
        match self {
            RawFlag::Bool(value) => *value,
            RawFlag::Text(text) => !text.trim().eq_ignore_ascii_case("false"),
        }
    }
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let RawConfig { settings, sources } = value;
        Self {
            settings: Settings {
                allow_negative: settings.allownegative.as_bool(),
                theme: settings.theme,
                show_text_with_images: settings.showtextwithimages,
                early_buzz_timeout_ms: settings.earlybuzztimeout,
            },
            sources,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::PitwallError;
use crate::model::Season;

const CONFIG_DIR_NAME: &str = "pitwall";
const CONFIG_FILE_NAME: &str = "config.json";
const YEAR_PLACEHOLDER: &str = "{year}";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT_S: u64 = 30;

/// Deployment environment the client talks to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    #[default]
    Local,
    Staging,
    Production,
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Staging => write!(f, "staging"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Endpoint paths relative to the API base URL.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Endpoints {
    pub champions: String,
    /// Path template, `{year}` is replaced with the season
    pub races_for_year: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            champions: "champions".to_string(),
            races_for_year: format!("races/{YEAR_PLACEHOLDER}"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub api_base_url: String,
    pub endpoints: Endpoints,
    pub request_timeout_s: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            endpoints: Endpoints::default(),
            request_timeout_s: DEFAULT_REQUEST_TIMEOUT_S,
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn champions_url(&self) -> String {
        join_url(&self.api_base_url, &self.endpoints.champions)
    }

    pub fn races_url(&self, season: Season) -> String {
        let path = self
            .endpoints
            .races_for_year
            .replace(YEAR_PLACEHOLDER, &season.to_string());
        join_url(&self.api_base_url, &path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WindowPosition {
    pub x: f32,
    pub y: f32,
}

impl Default for WindowPosition {
    fn default() -> Self {
        Self { x: 100., y: 100. }
    }
}

impl From<WindowPosition> for egui::Pos2 {
    fn from(value: WindowPosition) -> Self {
        egui::Pos2::new(value.x, value.y)
    }
}

impl From<egui::Pos2> for WindowPosition {
    fn from(value: egui::Pos2) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct AppConfig {
    pub active_profile: Profile,
    pub profiles: HashMap<Profile, ApiConfig>,
    pub window_position: WindowPosition,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            active_profile: Profile::Local,
            profiles: HashMap::from([(Profile::Local, ApiConfig::default())]),
            window_position: WindowPosition::default(),
            window_width: 720.,
            window_height: 800.,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Result<PathBuf, PitwallError> {
        Ok(dirs::config_dir()
            .ok_or(PitwallError::NoConfigDir)?
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME))
    }

    /// Reads the config from the platform config directory. Returns `None`
    /// when there is no file yet or it cannot be parsed.
    pub fn from_local_file() -> Option<Self> {
        let config_path = Self::default_path().ok()?;
        match Self::from_path(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config file {:?}: {}", config_path, e);
                None
            }
        }
    }

    pub fn from_path(config_path: &Path) -> Result<Option<Self>, PitwallError> {
        if !config_path.exists() {
            debug!("No config file at {:?}", config_path);
            return Ok(None);
        }
        let file = std::fs::File::open(config_path)
            .map_err(|e| PitwallError::ConfigIOError { source: e })?;
        serde_json::from_reader(file)
            .map(Some)
            .map_err(|e| PitwallError::ConfigSerializeError { source: e })
    }

    pub fn save(&self) -> Result<(), PitwallError> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), PitwallError> {
        if let Some(parent) = config_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| PitwallError::ConfigIOError { source: e })?;
            }
        }

        let file = std::fs::File::create(config_path)
            .map_err(|e| PitwallError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| PitwallError::ConfigSerializeError { source: e })
    }

    /// API settings for `profile`. Only the local profile has built-in
    /// defaults, the others must be present in the config file.
    pub fn api_for(&self, profile: Profile) -> Result<ApiConfig, PitwallError> {
        match (self.profiles.get(&profile), profile) {
            (Some(api), _) => Ok(api.clone()),
            (None, Profile::Local) => Ok(ApiConfig::default()),
            (None, _) => Err(PitwallError::MissingProfile {
                profile: profile.to_string(),
            }),
        }
    }

    pub fn active_api(&self) -> Result<ApiConfig, PitwallError> {
        self.api_for(self.active_profile)
    }
}

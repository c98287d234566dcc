use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reindex_client::{ControllerSettings, ControllerVariant, HttpSettings, PollSettings};
use reindex_core::UpdateConfig;
use reindex_logging::{LogDestination, DEFAULT_LOG_FILE};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "reindex.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("could not serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("{0:?} already exists")]
    Exists(PathBuf),
    #[error("could not write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogTarget {
    #[default]
    Terminal,
    File,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub controller_url: String,
    pub search_url: Option<String>,
    pub variant: ControllerVariant,
    pub poll_interval_secs: u64,
    pub stop_polling_when_idle: bool,
    pub min_workers: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_destination: LogTarget,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            controller_url: "http://localhost:8080/lucenesearchmanager".to_string(),
            search_url: None,
            variant: ControllerVariant::Extended,
            poll_interval_secs: 5,
            stop_polling_when_idle: true,
            min_workers: 1,
            connect_timeout_secs: 5,
            request_timeout_secs: 30,
            log_destination: LogTarget::Terminal,
            log_file: None,
        }
    }
}

impl AppConfig {
    fn http(&self) -> HttpSettings {
        HttpSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            base_url: self.controller_url.clone(),
            variant: self.variant,
            http: self.http(),
        }
    }

    pub fn search_settings(&self) -> Option<(String, HttpSettings)> {
        self.search_url.clone().map(|url| (url, self.http()))
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            // One second is the floor.
            interval: Duration::from_secs(self.poll_interval_secs.max(1)),
            stop_when_idle: self.stop_polling_when_idle,
        }
    }

    pub fn update_config(&self) -> UpdateConfig {
        UpdateConfig {
            min_workers: self.min_workers.max(1),
        }
    }

    pub fn log_destination(&self) -> LogDestination {
        let file = self
            .log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
        match self.log_destination {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File(file),
            LogTarget::Both => LogDestination::Both(file),
        }
    }
}

/// How the effective config was obtained. Reported once logging is up.
#[derive(Debug)]
pub enum ConfigOrigin {
    File(PathBuf),
    Defaults(PathBuf),
    Fallback(ConfigError),
}

/// Loads the config file, falling back to defaults when it is missing or
/// broken.
pub fn load(path: &Path) -> (AppConfig, ConfigOrigin) {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return (AppConfig::default(), ConfigOrigin::Defaults(path.to_path_buf()));
        }
        Err(source) => {
            let err = ConfigError::Read {
                path: path.to_path_buf(),
                source,
            };
            return (AppConfig::default(), ConfigOrigin::Fallback(err));
        }
    };

    match ron::from_str::<AppConfig>(&content) {
        Ok(config) => (config, ConfigOrigin::File(path.to_path_buf())),
        Err(source) => {
            let err = ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            };
            (AppConfig::default(), ConfigOrigin::Fallback(err))
        }
    }
}

/// Writes the default config to `path`.
pub fn write_default(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::Exists(path.to_path_buf()));
    }
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(&AppConfig::default(), pretty)?;
    fs::write(path, content).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

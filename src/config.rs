use anyhow::Result;
use config::{Config, File};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "cubetimer";
pub const DEFAULT_HISTORY_FILE: &str = "times.txt";
pub const DEFAULT_SETTINGS_FILE: &str = "config.json";
pub const DEFAULT_TICK_MS: u64 = 10;
pub const LOG_FILE: &str = "cubetimer.log";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// where history, settings and the log live
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    pub history_file: String,
    pub settings_file: String,
    /// refresh cadence of the running clock
    pub tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            history_file: DEFAULT_HISTORY_FILE.to_string(),
            settings_file: DEFAULT_SETTINGS_FILE.to_string(),
            tick_ms: DEFAULT_TICK_MS,
        }
    }
}

/// Resolved locations of every file the app touches.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPaths {
    pub dir: PathBuf,
    pub history: PathBuf,
    pub settings: PathBuf,
}

impl DataPaths {
    pub fn in_dir(dir: &Path, history_file: &str, settings_file: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            history: dir.join(history_file),
            settings: dir.join(settings_file),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

pub fn config_file_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(format!("{}.toml", APP_NAME)))
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(config_file_path().as_deref())
    }

    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("history_file", DEFAULT_HISTORY_FILE)?
            .set_default("settings_file", DEFAULT_SETTINGS_FILE)?
            .set_default("tick_ms", DEFAULT_TICK_MS)?;

        if let Some(config_path) = path {
            if config_path.exists() {
                builder = builder.add_source(File::from(config_path.to_path_buf()));
            }
        }

        let cfg = builder.build()?;
        let app_config: AppConfig = cfg.try_deserialize()?;
        Ok(app_config)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.clamp(1, 1000))
    }

    /// `--data-dir` wins over the config file, which wins over the platform default.
    pub fn data_paths(&self, override_dir: Option<PathBuf>) -> DataPaths {
        let dir = override_dir
            .or_else(|| self.data_dir.clone())
            .or_else(|| project_dirs().map(|d| d.data_local_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));
        DataPaths::in_dir(&dir, &self.history_file, &self.settings_file)
    }
}

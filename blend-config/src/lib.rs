use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "blend65.toml";

/// Callback functions may end up in hardware vector tables, which pass at most this many
/// arguments.
pub const DEFAULT_MAX_CALLBACK_PARAMS: usize = 4;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub max_callback_params: usize,
    /// Allows a callback parameter declared `word` to accept a slot typed `byte`. Off by default
    /// since an indirect call site cannot see the widening.
    pub callback_widening: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub filter: String,
    pub dir: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_callback_params: DEFAULT_MAX_CALLBACK_PARAMS,
            callback_widening: false,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".into(),
            dir: None,
        }
    }
}

impl From<RawConfig> for Config {
    fn from(raw_config: RawConfig) -> Self {
        let analysis = raw_config.analysis.unwrap_or_default();
        let log = raw_config.log.unwrap_or_default();

        Self {
            analysis: AnalysisConfig {
                max_callback_params: analysis
                    .max_callback_params
                    .unwrap_or(DEFAULT_MAX_CALLBACK_PARAMS),
                callback_widening: analysis.callback_widening.unwrap_or_default(),
            },
            log: LogConfig {
                filter: log.filter.unwrap_or("info".into()),
                dir: log.dir.map(Into::into),
            },
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawConfig {
    analysis: Option<RawAnalysisConfig>,
    log: Option<RawLogConfig>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawAnalysisConfig {
    max_callback_params: Option<usize>,
    callback_widening: Option<bool>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawLogConfig {
    filter: Option<String>,
    dir: Option<String>,
}

fn load_project_config<P: AsRef<Path>>(root_dir: P) -> Option<Config> {
    let config_path = root_dir.as_ref().join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return None;
    };

    let config = std::fs::read_to_string(&config_path).ok()?;

    convert_from_toml(&config)
}

fn convert_from_toml(config: &str) -> Option<Config> {
    match toml::from_str::<RawConfig>(config) {
        Ok(raw_config) => Some(raw_config.into()),
        Err(error) => {
            tracing::warn!("ignoring invalid {CONFIG_FILE_NAME}: {error}");
            None
        }
    }
}

pub fn load_config<P: AsRef<Path>>(root_dir: Option<P>) -> Config {
    match root_dir {
        Some(root_dir) => load_project_config(root_dir).unwrap_or_default(),
        None => Config::default(),
    }
}

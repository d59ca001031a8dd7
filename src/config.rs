use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const MIN_SIZE: usize = 5;
pub const MAX_SIZE: usize = 15;
pub const DEFAULT_SIZE: usize = 8;

const WINS_FILE: &str = "wins.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a whole number, got {value:?}")]
    NotANumber { var: &'static str, value: String },
    #[error("could not determine a data directory, set BUNNY_MAZE_DATA_DIR")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub maze_size: usize,
    pub min_size: usize,
    pub max_size: usize,
    /// time between two hops during playback
    pub step_interval: Duration,
    /// pause after the last hop before the board resets
    pub settle_delay: Duration,
    /// fixed generator seed, fresh entropy when unset
    pub seed: Option<u64>,
    pub data_dir: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            maze_size: DEFAULT_SIZE,
            min_size: MIN_SIZE,
            max_size: MAX_SIZE,
            step_interval: Duration::from_millis(500),
            settle_delay: Duration::from_secs(2),
            seed: None,
            data_dir: None,
        }
    }
}

impl GameConfig {
    /// Defaults overridden by `BUNNY_MAZE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let number = |var: &'static str| -> Result<Option<u64>, ConfigError> {
            match lookup(var) {
                None => Ok(None),
                Some(value) => value
                    .trim()
                    .parse()
                    .map(Some)
                    .map_err(|_| ConfigError::NotANumber { var, value }),
            }
        };

        let mut config = Self::default();
        if let Some(size) = number("BUNNY_MAZE_SIZE")? {
            config.maze_size = config.clamp_size(size as usize);
        }
        if let Some(ms) = number("BUNNY_MAZE_STEP_MS")? {
            config.step_interval = Duration::from_millis(ms);
        }
        config.seed = number("BUNNY_MAZE_SEED")?;
        config.data_dir = lookup("BUNNY_MAZE_DATA_DIR").map(PathBuf::from);

        Ok(config)
    }

    pub fn clamp_size(&self, size: usize) -> usize {
        size.max(self.min_size).min(self.max_size)
    }

    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|base| base.join("bunny-maze"))
                .ok_or(ConfigError::NoDataDir),
        }
    }

    pub fn wins_file(&self) -> Result<PathBuf, ConfigError> {
        Ok(self.data_dir()?.join(WINS_FILE))
    }
}

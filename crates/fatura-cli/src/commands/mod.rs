//! Subcommand implementations and shared command state.

pub mod config;
pub mod export;
pub mod query;
pub mod rules;
pub mod run;
pub mod table;

use std::path::{Path, PathBuf};

use fatura_core::{FaturaConfig, PatternStore, Session};

/// Resolved application state for one invocation: configuration plus
/// the data directory holding the pattern store and the session table.
pub struct Context {
    pub config: FaturaConfig,
    data_dir: PathBuf,
}

impl Context {
    /// Load configuration and resolve the data directory. Precedence
    /// for the data directory: `--data-dir` flag, then the config
    /// file's `data_dir`, then the platform data directory.
    pub fn new(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = load_config(config_path)?;

        let data_dir = data_dir
            .or_else(|| config.data_dir.clone())
            .unwrap_or_else(default_data_dir);

        Ok(Self { config, data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The pattern store backed by `patterns.json` in the data dir.
    pub fn store(&self) -> PatternStore {
        PatternStore::new(self.data_dir.join("patterns.json"))
    }

    /// The session backed by `records.json` in the data dir.
    pub fn open_session(&self) -> anyhow::Result<Session> {
        Ok(Session::load(self.data_dir.join("records.json"))?)
    }
}

fn load_config(config_path: Option<&Path>) -> anyhow::Result<FaturaConfig> {
    match config_path {
        Some(path) => Ok(FaturaConfig::from_file(path)?),
        None => {
            let path = default_config_path();
            if path.exists() {
                Ok(FaturaConfig::from_file(&path)?)
            } else {
                Ok(FaturaConfig::default())
            }
        }
    }
}

pub(crate) fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fatura")
        .join("config.json")
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fatura")
}

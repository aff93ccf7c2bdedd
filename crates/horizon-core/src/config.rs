//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::limits::ExtractionLimits;

/// Default maximum accepted input text, in characters.
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 100_000;
/// Default minimum text length for note generation.
pub const DEFAULT_MIN_NOTES_LENGTH: usize = 100;
/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 5000;

/// Paths to all Horizon data directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Quiz database directory (`data/db/`).
    pub db: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            db: root.join("db"),
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.db)?;
        Ok(())
    }
}

/// Top-level Horizon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizonConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Input longer than this is rejected before extraction.
    pub max_text_length: usize,
    /// Input shorter than this is rejected for note generation.
    pub min_notes_length: usize,
    /// Classifier bounds and caps.
    pub limits: ExtractionLimits,
}

impl HorizonConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let port = env_parse("PORT").unwrap_or(DEFAULT_PORT);
        let max_text_length =
            env_parse("HORIZON_MAX_TEXT_LENGTH").unwrap_or(DEFAULT_MAX_TEXT_LENGTH);
        let min_notes_length =
            env_parse("HORIZON_MIN_NOTES_LENGTH").unwrap_or(DEFAULT_MIN_NOTES_LENGTH);

        let data_paths = DataPaths::new(data_dir)?;

        Ok(Self {
            port,
            data_paths,
            max_text_length,
            min_notes_length,
            limits: ExtractionLimits::default(),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

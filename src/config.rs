use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::export::ExportFormat;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "ipu-predictor.json";

/// Application settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Admissions table loaded at startup.
    pub data_path: PathBuf,
    /// Directory the save dialog opens in.
    pub export_dir: Option<PathBuf>,
    /// Format used by the primary download button.
    pub export_format: ExportFormat,
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/ipudata.json"),
            export_dir: None,
            export_format: ExportFormat::Pdf,
            window_size: [1200.0, 800.0],
        }
    }
}

impl AppConfig {
    /// Read a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Settings from [`CONFIG_FILE`] if it exists, defaults otherwise.
    /// A broken file is reported and ignored.
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Using settings from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Ignoring config: {e:#}");
                Self::default()
            }
        }
    }
}

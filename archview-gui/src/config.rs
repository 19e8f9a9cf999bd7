use std::path::{Path, PathBuf};

use archview_core::ViewerDefaults;
use archview_utils::{load_config, load_config_or_default, LoggerConfig};
use serde::{Deserialize, Serialize};

use crate::GuiResult;

pub const DEFAULT_CONFIG_FILE: &str = "archview.toml";

/// `[project]` table of the application config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    /// JSON project dump produced by the analysis backend
    pub path: Option<PathBuf>,
}

/// Application configuration, `archview.toml` by default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggerConfig,
    pub project: ProjectSection,
    pub viewer: ViewerDefaults,
}

impl AppConfig {
    /// Load an explicitly named config file, or `archview.toml` in the working
    /// directory when it exists.
    pub fn load(path: Option<&Path>) -> GuiResult<Self> {
        match path {
            Some(path) => Ok(load_config(path)?),
            None => Ok(load_config_or_default(Path::new(DEFAULT_CONFIG_FILE))?),
        }
    }
}

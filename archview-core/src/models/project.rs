//! Project configuration and status as reported by the analysis backend.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration of the analysed project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: Option<String>,
    pub root_dir: Option<PathBuf>,
    pub ts_config: Option<PathBuf>,
    pub source_dirs: Vec<PathBuf>,
}

/// A project config is unusable when it is missing or lacks a root directory
/// or a tsconfig. The shell shows its welcome page in that case.
pub fn is_invalid_project_config(config: Option<&ProjectConfig>) -> bool {
    config.map_or(true, |config| {
        let blank = |path: &Option<PathBuf>| {
            path.as_ref()
                .map_or(true, |p| p.as_os_str().is_empty())
        };
        blank(&config.root_dir) || blank(&config.ts_config)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Normal,
    Initializing,
    Updating,
    Failed,
}

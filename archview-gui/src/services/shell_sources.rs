//! Sources the root shell listens to: project status, backend connectivity
//! and the project configuration.

use archview_core::{ProjectConfig, ProjectStatus};
use serde_json::Value;

use crate::subscription::Signal;
use crate::GuiResult;

/// Owner of the project status.
pub struct CenterController {
    status: Signal<ProjectStatus>,
}

impl CenterController {
    pub fn new() -> Self {
        Self {
            status: Signal::with_value(ProjectStatus::Normal),
        }
    }

    pub const fn project_status(&self) -> &Signal<ProjectStatus> {
        &self.status
    }

    pub fn set_status(&self, status: ProjectStatus) -> GuiResult<()> {
        tracing::debug!(?status, "project status changed");
        self.status.emit(status)
    }
}

impl Default for CenterController {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketTask {
    OnOpen,
    OnError,
}

/// Connectivity events of the analysis backend.
pub struct SocketHandler {
    opened: Signal<Value>,
    error: Signal<Value>,
}

impl SocketHandler {
    pub fn new() -> Self {
        Self {
            opened: Signal::new(),
            error: Signal::new(),
        }
    }

    pub const fn listen(&self, task: SocketTask) -> &Signal<Value> {
        match task {
            SocketTask::OnOpen => &self.opened,
            SocketTask::OnError => &self.error,
        }
    }

    pub fn notify_open(&self, payload: Value) -> GuiResult<()> {
        tracing::info!("backend connection opened");
        self.opened.emit(payload)
    }

    pub fn notify_error(&self, payload: Value) -> GuiResult<()> {
        tracing::warn!(%payload, "backend connection error");
        self.error.emit(payload)
    }
}

impl Default for SocketHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration of the project being viewed, `None` until one is loaded.
pub struct ProjectProfileService {
    config: Signal<Option<ProjectConfig>>,
}

impl ProjectProfileService {
    pub fn new() -> Self {
        Self {
            config: Signal::with_value(None),
        }
    }

    pub const fn project_config(&self) -> &Signal<Option<ProjectConfig>> {
        &self.config
    }

    pub fn set_project_config(&self, config: Option<ProjectConfig>) -> GuiResult<()> {
        self.config.emit(config)
    }
}

impl Default for ProjectProfileService {
    fn default() -> Self {
        Self::new()
    }
}

//! Root shell: page-level flags driven by project status, backend
//! connectivity and project configuration. Each source only enqueues its own
//! event; none of them waits on another.

use std::sync::Arc;

use archview_core::{is_invalid_project_config, ArchViewerHierarchy, ProjectStatus};
use serde::{Deserialize, Serialize};

use crate::services::{CenterController, ProjectProfileService, SocketHandler, SocketTask};
use crate::signals::{ShellEvent, SignalBus};
use crate::subscription::{DisposeBag, Signal};
use crate::GuiResult;

/// Entry of the navigation side bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub id: String,
    pub name: String,
    /// Hierarchy the viewer opened by this item is fixed to.
    pub hierarchy: Option<ArchViewerHierarchy>,
}

impl NavigationItem {
    pub fn new(id: &str, name: &str, hierarchy: Option<ArchViewerHierarchy>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            hierarchy,
        }
    }

    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("architecture", "Architecture", None),
            Self::new(
                "routing",
                "Routing",
                Some(ArchViewerHierarchy::RoutingHierarchy),
            ),
            Self::new(
                "components",
                "Components",
                Some(ArchViewerHierarchy::ComponentHierarchy),
            ),
        ]
    }
}

/// Independent page flags; several can be true at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellState {
    pub opened: bool,
    pub selected_feature: Option<NavigationItem>,
    pub use_overlay: bool,
    pub has_welcome_page: bool,
    pub is_server_error: bool,
    pub has_dashboard: bool,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            opened: true,
            selected_feature: None,
            use_overlay: false,
            has_welcome_page: true,
            is_server_error: false,
            has_dashboard: false,
        }
    }
}

impl ShellState {
    pub fn apply(&mut self, event: &ShellEvent) {
        match event {
            ShellEvent::ProjectStatusChanged(status) => {
                if *status == ProjectStatus::Updating {
                    self.use_overlay = true;
                }
            }
            ShellEvent::ConnectionError(_) => {
                self.is_server_error = true;
                self.has_welcome_page = true;
            }
            ShellEvent::ConnectionOpened(_) => {
                self.is_server_error = false;
            }
            ShellEvent::ProjectConfigChanged(config) => {
                self.has_welcome_page = is_invalid_project_config(config.as_ref());
            }
        }
    }
}

/// Progress of a reload requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReloadPhase {
    Idle,
    /// Waiting for the `Updating` status of this reload.
    Requested,
    Reloading,
    /// The project settled; the host refreshes its viewer once.
    Done,
}

impl ReloadPhase {
    const fn advance(self, status: ProjectStatus) -> Self {
        match (self, status) {
            (Self::Requested, ProjectStatus::Updating) => Self::Reloading,
            (Self::Reloading, ProjectStatus::Normal | ProjectStatus::Failed) => Self::Done,
            (phase, _) => phase,
        }
    }
}

pub struct RootShellController {
    center: Arc<CenterController>,
    socket: Arc<SocketHandler>,
    profile: Arc<ProjectProfileService>,
    bus: SignalBus<ShellEvent>,
    subscriptions: DisposeBag,
    state: ShellState,
    reload: ReloadPhase,
    initialized: bool,
}

impl RootShellController {
    pub fn new(
        center: Arc<CenterController>,
        socket: Arc<SocketHandler>,
        profile: Arc<ProjectProfileService>,
    ) -> Self {
        Self {
            center,
            socket,
            profile,
            bus: SignalBus::new(),
            subscriptions: DisposeBag::new(),
            state: ShellState::default(),
            reload: ReloadPhase::Idle,
            initialized: false,
        }
    }

    pub fn init(&mut self) -> GuiResult<()> {
        if self.initialized || self.subscriptions.is_disposed() {
            return Ok(());
        }

        let center = Arc::clone(&self.center);
        let socket = Arc::clone(&self.socket);
        let profile = Arc::clone(&self.profile);
        self.forward(center.project_status(), ShellEvent::ProjectStatusChanged)?;
        self.forward(socket.listen(SocketTask::OnError), ShellEvent::ConnectionError)?;
        self.forward(socket.listen(SocketTask::OnOpen), ShellEvent::ConnectionOpened)?;
        self.forward(profile.project_config(), ShellEvent::ProjectConfigChanged)?;

        self.initialized = true;
        Ok(())
    }

    fn forward<T>(
        &mut self,
        signal: &Signal<T>,
        to_event: impl Fn(T) -> ShellEvent + Send + Sync + 'static,
    ) -> GuiResult<()>
    where
        T: Clone + Send + 'static,
    {
        let emitter = self.bus.emitter();
        let connection = signal.connect(move |value| {
            let _ = emitter.send(to_event(value));
        })?;
        self.subscriptions.add_connection(connection);
        Ok(())
    }

    /// Apply every queued event in arrival order. Returns how many were applied.
    pub fn process_pending(&mut self) -> usize {
        if self.subscriptions.is_disposed() {
            return 0;
        }

        let events = self.bus.drain();
        for event in &events {
            tracing::trace!(?event, "shell event");
            self.state.apply(event);
            if let ShellEvent::ProjectStatusChanged(status) = event {
                self.reload = self.reload.advance(*status);
            }
        }
        events.len()
    }

    pub fn close_overlay(&mut self) {
        self.state.use_overlay = false;
    }

    pub fn toggle_sidebar(&mut self) {
        self.state.opened = !self.state.opened;
    }

    /// Record the selected navigation item; the host re-creates the viewer.
    pub fn select_feature(&mut self, item: NavigationItem) {
        tracing::debug!(feature = %item.id, "feature selected");
        self.state.selected_feature = Some(item);
    }

    /// Start tracking a reload. Statuses already queued do not count; the
    /// reload is done once `Updating` is followed by `Normal` or `Failed`.
    pub fn await_reload(&mut self) {
        self.reload = ReloadPhase::Requested;
    }

    /// True once per finished reload.
    pub fn take_reload_done(&mut self) -> bool {
        if self.reload == ReloadPhase::Done {
            self.reload = ReloadPhase::Idle;
            true
        } else {
            false
        }
    }

    pub fn toggle_dashboard(&mut self) {
        self.state.has_dashboard = !self.state.has_dashboard;
    }

    pub fn dispose(&mut self) {
        let released = self.subscriptions.dispose();
        if released > 0 {
            tracing::debug!(released, "root shell disposed");
        }
    }

    pub const fn state(&self) -> &ShellState {
        &self.state
    }
}

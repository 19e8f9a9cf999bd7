use crate::{GuiError, GuiResult};
use archview_core::{
    ArchTree, ArchViewerExtraContent, ArchViewerHierarchy, ArchViewerNodeType, ArchViewerType,
    Orientation, ProjectConfig, ProjectStatus,
};
use archview_viz::{DiagramNode, PonentActionItem};
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Everything the arch viewer controller reacts to.
#[derive(Debug, Clone)]
pub enum ViewerEvent {
    HierarchyChanged(ArchViewerHierarchy),
    OrientationChanged(Orientation),
    NodeTypeChanged(ArchViewerNodeType),
    ViewerTypeChanged(ArchViewerType),
    ExtraContentChanged(ArchViewerExtraContent),
    TreeLoaded {
        generation: u64,
        hierarchy: ArchViewerHierarchy,
        tree: Option<ArchTree>,
    },
    NodeDoubleClicked(DiagramNode),
    ActionClicked(PonentActionItem),
}

/// Everything the root shell controller reacts to.
#[derive(Debug, Clone)]
pub enum ShellEvent {
    ProjectStatusChanged(ProjectStatus),
    ConnectionOpened(serde_json::Value),
    ConnectionError(serde_json::Value),
    ProjectConfigChanged(Option<ProjectConfig>),
}

/// Multi-producer queue owned by one controller.
///
/// Sources push typed events from any thread through an emitter; the owner
/// drains them on the UI thread.
pub struct SignalBus<E> {
    sender: Sender<E>,
    receiver: Receiver<E>,
}

impl<E> SignalBus<E> {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    pub fn emitter(&self) -> Sender<E> {
        self.sender.clone()
    }

    pub fn emit(&self, event: E) -> GuiResult<()> {
        self.sender
            .send(event)
            .map_err(|e| GuiError::State(format!("Failed to emit event: {e}")))
    }

    /// Take every queued event, oldest first.
    pub fn drain(&self) -> Vec<E> {
        self.receiver.try_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<E> Default for SignalBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

//! Navigation requests leaving the viewer: open a node on top, open a window
//! for a node action, show the explanation panel.

use std::sync::Mutex;

use archview_core::{ArchViewerHierarchy, ViewerType};
use archview_viz::{DiagramNode, PonentActionItem, PonentActionPurpose, PonentActionScope};
use serde::{Deserialize, Serialize};

/// What the explanation panel should explain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplanationTopic {
    Hierarchy(ArchViewerHierarchy),
    Viewer(ViewerType),
}

impl ExplanationTopic {
    pub fn title(self) -> &'static str {
        match self {
            Self::Hierarchy(hierarchy) => hierarchy.display_name(),
            Self::Viewer(_) => "Architecture View",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Hierarchy(ArchViewerHierarchy::InjectorHierarchy) => {
                "Each injector with the providers it registers. Double-click a provider to open its dependency diagram."
            }
            Self::Hierarchy(ArchViewerHierarchy::DependencyDiagram) => {
                "Services and the services they inject."
            }
            Self::Hierarchy(ArchViewerHierarchy::ComponentHierarchy) => {
                "Components nested by template usage, starting from the bootstrap component."
            }
            Self::Hierarchy(ArchViewerHierarchy::RoutingHierarchy) => {
                "Routes and lazy-loaded modules as the router sees them."
            }
            Self::Hierarchy(ArchViewerHierarchy::FullView) => {
                "The injector hierarchy and the dependency diagram drawn together."
            }
            Self::Viewer(_) => {
                "Modules, components, routes and injectors of the application. Use the side panel to switch hierarchies and layout."
            }
        }
    }
}

/// Host-side navigation used by a viewer.
pub trait ViewerNavigator: Send + Sync {
    /// Hierarchy fixed for the viewer being opened, if any.
    fn content_hierarchy(&self) -> Option<ArchViewerHierarchy>;

    fn open_ponent_on_top(
        &self,
        node: &DiagramNode,
        purpose: PonentActionPurpose,
        viewer_type: ViewerType,
    );

    fn open_window_by_ponent_action(&self, item: &PonentActionItem, viewer_type: ViewerType);

    fn open_viewer_explanation_panel(&self, topic: ExplanationTopic);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigatorRequest {
    OpenOnTop {
        node_id: String,
        label: String,
        purpose: PonentActionPurpose,
        viewer_type: ViewerType,
    },
    OpenWindow {
        node_id: String,
        scope: PonentActionScope,
        purpose: PonentActionPurpose,
        viewer_type: ViewerType,
    },
    Explanation(ExplanationTopic),
}

/// Navigator that queues requests for the host to pick up each frame.
#[derive(Debug, Default)]
pub struct QueuedNavigator {
    content_hierarchy: Option<ArchViewerHierarchy>,
    requests: Mutex<Vec<NavigatorRequest>>,
}

impl QueuedNavigator {
    pub fn new(content_hierarchy: Option<ArchViewerHierarchy>) -> Self {
        Self {
            content_hierarchy,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn take_requests(&self) -> Vec<NavigatorRequest> {
        self.requests
            .lock()
            .map(|mut requests| std::mem::take(&mut *requests))
            .unwrap_or_default()
    }

    fn push(&self, request: NavigatorRequest) {
        tracing::debug!(?request, "navigation requested");
        match self.requests.lock() {
            Ok(mut requests) => requests.push(request),
            Err(e) => tracing::error!("Failed to queue navigation request: {}", e),
        }
    }
}

impl ViewerNavigator for QueuedNavigator {
    fn content_hierarchy(&self) -> Option<ArchViewerHierarchy> {
        self.content_hierarchy
    }

    fn open_ponent_on_top(
        &self,
        node: &DiagramNode,
        purpose: PonentActionPurpose,
        viewer_type: ViewerType,
    ) {
        self.push(NavigatorRequest::OpenOnTop {
            node_id: node.id().to_string(),
            label: node.label().to_string(),
            purpose,
            viewer_type,
        });
    }

    fn open_window_by_ponent_action(&self, item: &PonentActionItem, viewer_type: ViewerType) {
        self.push(NavigatorRequest::OpenWindow {
            node_id: item.node.id().to_string(),
            scope: item.scope,
            purpose: item.purpose,
            viewer_type,
        });
    }

    fn open_viewer_explanation_panel(&self, topic: ExplanationTopic) {
        self.push(NavigatorRequest::Explanation(topic));
    }
}

//! User interactions reported by a rendered diagram.

use serde::{Deserialize, Serialize};

use crate::diagram_tree::DiagramNode;

/// Interaction kinds a handler can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramElementFeature {
    DblClick,
    ActionClick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PonentActionPurpose {
    ArchitectureView,
    DependencyDiagram,
    ToggleCollapseChildren,
    ViewSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PonentActionScope {
    /// Handled inside the diagram
    NodeAction,
    /// Opens something outside the diagram
    ComponentAction,
}

/// An action button clicked on a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PonentActionItem {
    pub scope: PonentActionScope,
    pub purpose: PonentActionPurpose,
    pub node: DiagramNode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    DoubleClick(DiagramNode),
    ActionClick(PonentActionItem),
}

impl Interaction {
    pub const fn feature(&self) -> DiagramElementFeature {
        match self {
            Self::DoubleClick(_) => DiagramElementFeature::DblClick,
            Self::ActionClick(_) => DiagramElementFeature::ActionClick,
        }
    }
}

pub type InteractionHandler = Box<dyn Fn(Interaction) + Send + Sync>;

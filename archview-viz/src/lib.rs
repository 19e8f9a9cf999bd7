//! ArchView Visualization
//!
//! The renderer side of the viewer. [`DiagramOrganizer`] is the seam the
//! composition controller draws through; [`DotOrganizer`] is the bundled
//! implementation that renders Graphviz DOT.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

pub mod annotation;
pub mod diagram_tree;
pub mod dot;
pub mod interaction;
pub mod layout;
pub mod organizer;

pub use annotation::map_diagram_tree_node;
pub use diagram_tree::{DiagramNode, DiagramTreeContext, DiagramTreeNode, InjectorTreeNode};
pub use dot::DotOrganizer;
pub use interaction::{
    DiagramElementFeature, Interaction, InteractionHandler, PonentActionItem, PonentActionPurpose,
    PonentActionScope,
};
pub use layout::{LayoutFeature, LayoutOptions, NodeInfoLevel};
pub use organizer::{DiagramOrganizer, NodeMapper, TraversalHook};

pub type VizResult<T> = Result<T, VizError>;

#[derive(Debug, thiserror::Error)]
pub enum VizError {
    #[error("Node not found in diagram: {0}")]
    NodeNotFound(String),

    #[error("Nothing is drawn")]
    NothingDrawn,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

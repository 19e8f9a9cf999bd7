use archview_core::ArchTree;

use crate::diagram_tree::{DiagramTreeContext, DiagramTreeNode};
use crate::interaction::{DiagramElementFeature, InteractionHandler};
use crate::layout::LayoutOptions;
use crate::VizResult;

/// Annotates a single node before drawing.
pub type NodeMapper = fn(&mut DiagramTreeNode);

/// Reshapes the whole tree (filtering, collapsing) before annotation.
pub type TraversalHook<'a> = &'a dyn Fn(&mut DiagramTreeContext);

/// Lays out and renders architecture trees.
///
/// Every `draw_arch_tree_with_layout` starts from scratch; callers `clear`
/// first and never rely on incremental updates.
pub trait DiagramOrganizer {
    /// Register a handler fired when the given interaction happens on a node.
    fn add_feature(&mut self, feature: DiagramElementFeature, handler: InteractionHandler);

    fn clear(&mut self);

    fn draw_arch_tree_with_layout(
        &mut self,
        tree: &ArchTree,
        traverse: Option<TraversalHook<'_>>,
        map_node: NodeMapper,
        layout: &LayoutOptions,
    ) -> VizResult<()>;

    /// Toggle collapse of the children of `node_id` that contain no routes.
    fn toggle_collapsed_children(&mut self, node_id: &str) -> VizResult<()>;
}

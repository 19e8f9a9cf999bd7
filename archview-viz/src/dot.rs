//! Graphviz DOT rendering of architecture trees
//!
//! Renders the annotated diagram tree with top/bottom lines in node labels,
//! per-kind fill colors and, for injector views, a dashed cluster holding the
//! injector layer.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use archview_core::{ArchTree, NgPonentType, Orientation};

use crate::diagram_tree::{DiagramNode, DiagramTreeContext, DiagramTreeNode, InjectorTreeNode};
use crate::interaction::{
    DiagramElementFeature, Interaction, InteractionHandler, PonentActionItem, PonentActionPurpose,
    PonentActionScope,
};
use crate::layout::{LayoutFeature, LayoutOptions, NodeInfoLevel};
use crate::organizer::{DiagramOrganizer, NodeMapper, TraversalHook};
use crate::{VizError, VizResult};

/// Diagram organizer producing DOT text
pub struct DotOrganizer {
    handlers: HashMap<DiagramElementFeature, Vec<InteractionHandler>>,
    context: Option<DiagramTreeContext>,
    layout: LayoutOptions,
    output: Option<String>,
    /// Label edges with the relationship that produced the child
    pub show_edge_labels: bool,
    draw_count: usize,
}

impl DotOrganizer {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            context: None,
            layout: LayoutOptions::default(),
            output: None,
            show_edge_labels: false,
            draw_count: 0,
        }
    }

    /// Builder pattern: enable/disable edge labels
    #[must_use]
    pub const fn with_edge_labels(mut self, enabled: bool) -> Self {
        self.show_edge_labels = enabled;
        self
    }

    /// DOT text of the current drawing, `None` after `clear`.
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub const fn context(&self) -> Option<&DiagramTreeContext> {
        self.context.as_ref()
    }

    pub const fn layout(&self) -> &LayoutOptions {
        &self.layout
    }

    pub const fn draw_count(&self) -> usize {
        self.draw_count
    }

    /// Nodes currently drawn with their depth, pre-order, skipping children
    /// of collapsed nodes.
    pub fn visible_nodes(&self) -> Vec<(usize, &DiagramTreeNode)> {
        fn collect<'a>(
            node: &'a DiagramTreeNode,
            depth: usize,
            out: &mut Vec<(usize, &'a DiagramTreeNode)>,
        ) {
            out.push((depth, node));
            if !node.collapsed {
                for child in &node.children {
                    collect(child, depth + 1, out);
                }
            }
        }

        let mut nodes = Vec::new();
        if let Some(context) = &self.context {
            collect(&context.root, 0, &mut nodes);
        }
        nodes
    }

    /// The interaction payload for a drawn node.
    pub fn diagram_node(&self, node_id: &str) -> Option<DiagramNode> {
        let node = self.context.as_ref()?.find(node_id)?;
        let injector_layer = self.layout.has_feature(LayoutFeature::SecondaryLayerForInjector)
            && node.ponent.is_injector_layer();

        Some(if injector_layer {
            DiagramNode::Injector(InjectorTreeNode::from_diagram_node(node))
        } else {
            DiagramNode::Diagram(node.clone())
        })
    }

    /// Report a double click on a drawn node to the registered handlers.
    pub fn double_click(&self, node_id: &str) -> VizResult<()> {
        let node = self
            .diagram_node(node_id)
            .ok_or_else(|| VizError::NodeNotFound(node_id.to_string()))?;
        self.fire(&Interaction::DoubleClick(node));
        Ok(())
    }

    /// Report a click on one of a node's action buttons.
    pub fn action_click(
        &self,
        node_id: &str,
        scope: PonentActionScope,
        purpose: PonentActionPurpose,
    ) -> VizResult<()> {
        let node = self
            .diagram_node(node_id)
            .ok_or_else(|| VizError::NodeNotFound(node_id.to_string()))?;
        self.fire(&Interaction::ActionClick(PonentActionItem {
            scope,
            purpose,
            node,
        }));
        Ok(())
    }

    fn fire(&self, interaction: &Interaction) {
        let Some(handlers) = self.handlers.get(&interaction.feature()) else {
            tracing::trace!(feature = ?interaction.feature(), "no handler registered");
            return;
        };
        for handler in handlers {
            handler(interaction.clone());
        }
    }

    /// Write the current drawing to a `.dot` file
    pub fn export_to_file(&self, path: &Path) -> VizResult<()> {
        let output = self.output.as_deref().ok_or(VizError::NothingDrawn)?;
        std::fs::write(path, output)?;
        tracing::info!(path = %path.display(), "exported diagram");
        Ok(())
    }

    fn render(&self) -> Option<String> {
        let context = self.context.as_ref()?;
        let mut dot = format!("digraph \"{}\" {{\n", escape_dot_label(&context.name));

        let rankdir = match self.layout.orientation {
            Orientation::TopToBottom => "TB",
            Orientation::LeftToRight => "LR",
        };
        let _ = writeln!(dot, "  rankdir={rankdir};");
        dot.push_str("  node [shape=box, style=\"filled,rounded\", fontname=\"Helvetica\"];\n");
        dot.push_str("  edge [fontname=\"Helvetica\", fontsize=10];\n\n");

        let mut injector_layer = Vec::new();
        self.write_subtree(&context.root, &mut dot, &mut injector_layer);

        if self.layout.has_feature(LayoutFeature::SecondaryLayerForInjector)
            && !injector_layer.is_empty()
        {
            dot.push_str("\n  subgraph cluster_injector_layer {\n");
            dot.push_str("    label=\"Injectors\";\n");
            dot.push_str("    style=dashed;\n");
            dot.push_str("    color=gray;\n");
            for id in injector_layer {
                let _ = writeln!(dot, "    \"{}\";", escape_dot_label(id));
            }
            dot.push_str("  }\n");
        }

        dot.push_str("}\n");
        Some(dot)
    }

    fn write_subtree<'a>(
        &self,
        node: &'a DiagramTreeNode,
        dot: &mut String,
        injector_layer: &mut Vec<&'a str>,
    ) {
        let mut lines = Vec::with_capacity(3);
        if let Some(top) = &node.top_line {
            lines.push(escape_dot_label(top));
        }
        let mut label = escape_dot_label(&node.label);
        if self.layout.info_level == NodeInfoLevel::Detail {
            let _ = write!(label, "\\n<{}>", node.ponent_type());
        }
        if node.collapsed && !node.children.is_empty() {
            let _ = write!(label, " (+{})", node.children.len());
        }
        lines.push(label);
        if let Some(bottom) = &node.bottom_line {
            lines.push(escape_dot_label(bottom));
        }

        let style = if node.collapsed {
            ", style=\"filled,rounded,dashed\""
        } else {
            ""
        };
        let _ = writeln!(
            dot,
            "  \"{}\" [label=\"{}\", fillcolor=\"{}\"{}];",
            escape_dot_label(&node.id),
            lines.join("\\n"),
            node_color(node.ponent_type()),
            style
        );

        if node.ponent.is_injector_layer() {
            injector_layer.push(&node.id);
        }
        if node.collapsed {
            return;
        }

        for child in &node.children {
            let edge_label = match (self.show_edge_labels, child.related_from_label()) {
                (true, Some(relation)) => format!(" [label=\"{relation}\"]"),
                _ => String::new(),
            };
            let _ = writeln!(
                dot,
                "  \"{}\" -> \"{}\"{};",
                escape_dot_label(&node.id),
                escape_dot_label(&child.id),
                edge_label
            );
            self.write_subtree(child, dot, injector_layer);
        }
    }
}

impl Default for DotOrganizer {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramOrganizer for DotOrganizer {
    fn add_feature(&mut self, feature: DiagramElementFeature, handler: InteractionHandler) {
        self.handlers.entry(feature).or_default().push(handler);
    }

    fn clear(&mut self) {
        self.context = None;
        self.output = None;
    }

    fn draw_arch_tree_with_layout(
        &mut self,
        tree: &ArchTree,
        traverse: Option<TraversalHook<'_>>,
        map_node: NodeMapper,
        layout: &LayoutOptions,
    ) -> VizResult<()> {
        let Some(mut context) = DiagramTreeContext::from_arch_tree(tree) else {
            tracing::debug!(tree = %tree.name, "tree has no root, nothing to draw");
            return Ok(());
        };

        if let Some(traverse) = traverse {
            traverse(&mut context);
        }
        context.for_each_mut(&mut |node| map_node(node));

        self.layout = layout.clone();
        self.context = Some(context);
        self.output = self.render();
        self.draw_count += 1;

        tracing::debug!(
            tree = %tree.name,
            nodes = tree.node_count(),
            orientation = ?layout.orientation,
            "drew diagram"
        );
        Ok(())
    }

    fn toggle_collapsed_children(&mut self, node_id: &str) -> VizResult<()> {
        let node = self
            .context
            .as_mut()
            .and_then(|context| context.find_mut(node_id))
            .ok_or_else(|| VizError::NodeNotFound(node_id.to_string()))?;

        let toggled = node.toggle_collapsed_children_which_no_routes();
        tracing::debug!(node = node_id, toggled, "toggled collapsed children");

        self.output = self.render();
        Ok(())
    }
}

const fn node_color(ponent_type: NgPonentType) -> &'static str {
    match ponent_type {
        NgPonentType::Module => "lightblue",
        NgPonentType::Component => "lightgreen",
        NgPonentType::Directive | NgPonentType::Pipe => "khaki",
        NgPonentType::Injectable | NgPonentType::Provider => "lightsalmon",
        NgPonentType::Route => "plum",
        NgPonentType::Injector => "lightgray",
    }
}

/// Escape special characters for DOT labels
fn escape_dot_label(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

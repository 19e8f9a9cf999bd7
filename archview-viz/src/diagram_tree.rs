//! Display-side tree built fresh from an [`ArchTree`] for every draw pass.
//!
//! Annotations (`top_line`, `bottom_line`) and collapse state live here, never
//! on the architecture tree itself, so one render cannot leak into the next.

use archview_core::{ArchNode, ArchPonent, ArchTree, NgPonentType, NodeId, RelatedFrom};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramTreeNode {
    pub id: NodeId,
    pub label: String,
    pub ponent: ArchPonent,
    pub related_from: Option<RelatedFrom>,
    pub top_line: Option<String>,
    pub bottom_line: Option<String>,
    /// Children of a collapsed node are not drawn.
    pub collapsed: bool,
    pub children: Vec<DiagramTreeNode>,
}

impl DiagramTreeNode {
    pub fn from_arch_node(node: &ArchNode) -> Self {
        Self {
            id: node.id.clone(),
            label: node.ponent.name().to_string(),
            ponent: node.ponent.clone(),
            related_from: node.related_from,
            top_line: None,
            bottom_line: None,
            collapsed: false,
            children: node.children.iter().map(Self::from_arch_node).collect(),
        }
    }

    pub fn related_from_label(&self) -> Option<&'static str> {
        self.related_from.map(RelatedFrom::label)
    }

    pub const fn ponent_type(&self) -> NgPonentType {
        self.ponent.ponent_type()
    }

    pub fn contains_routes(&self) -> bool {
        matches!(self.ponent, ArchPonent::Route(_)) || self.children.iter().any(Self::contains_routes)
    }

    /// Flip the collapse state of every child whose subtree has no route.
    /// Returns how many children were toggled.
    pub fn toggle_collapsed_children_which_no_routes(&mut self) -> usize {
        let mut toggled = 0;
        for child in self.children.iter_mut().filter(|child| !child.contains_routes()) {
            child.collapsed = !child.collapsed;
            toggled += 1;
        }
        toggled
    }

    pub fn for_each_mut(&mut self, visit: &mut impl FnMut(&mut Self)) {
        visit(self);
        for child in &mut self.children {
            child.for_each_mut(visit);
        }
    }

    pub fn find(&self, id: &str) -> Option<&Self> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Self> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }
}

/// Root plus name of the tree being drawn; what traversal hooks operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramTreeContext {
    pub name: String,
    pub root: DiagramTreeNode,
}

impl DiagramTreeContext {
    /// `None` when the tree has no root.
    pub fn from_arch_tree(tree: &ArchTree) -> Option<Self> {
        tree.root.as_ref().map(|root| Self {
            name: tree.name.clone(),
            root: DiagramTreeNode::from_arch_node(root),
        })
    }

    pub fn for_each_mut(&mut self, visit: &mut impl FnMut(&mut DiagramTreeNode)) {
        self.root.for_each_mut(visit);
    }

    pub fn find(&self, id: &str) -> Option<&DiagramTreeNode> {
        self.root.find(id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut DiagramTreeNode> {
        self.root.find_mut(id)
    }
}

/// Node of the injector layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectorTreeNode {
    pub id: NodeId,
    pub label: String,
    pub is_provider_node: bool,
}

impl InjectorTreeNode {
    pub fn from_diagram_node(node: &DiagramTreeNode) -> Self {
        Self {
            id: node.id.clone(),
            label: node.label.clone(),
            is_provider_node: matches!(node.ponent, ArchPonent::Provider { .. }),
        }
    }
}

/// A rendered node as reported back by an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramNode {
    Diagram(DiagramTreeNode),
    Injector(InjectorTreeNode),
}

impl DiagramNode {
    pub fn id(&self) -> &str {
        match self {
            Self::Diagram(node) => &node.id,
            Self::Injector(node) => &node.id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Diagram(node) => &node.label,
            Self::Injector(node) => &node.label,
        }
    }
}

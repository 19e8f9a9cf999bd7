//! Architecture tree: the hierarchical view of a target application's
//! modules, components, routes, injectors and providers.

use serde::{Deserialize, Serialize};
use std::fmt;

pub type NodeId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NgPonentType {
    Module,
    Component,
    Directive,
    Pipe,
    Injectable,
    Route,
    Injector,
    Provider,
}

impl fmt::Display for NgPonentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Module => "module",
            Self::Component => "component",
            Self::Directive => "directive",
            Self::Pipe => "pipe",
            Self::Injectable => "injectable",
            Self::Route => "route",
            Self::Injector => "injector",
            Self::Provider => "provider",
        };
        write!(f, "{name}")
    }
}

/// A route definition of the target application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ArchRoute {
    pub path: String,
    pub component: Option<String>,
    pub redirect_to: Option<String>,
    pub load_children: Option<String>,
    pub has_children: bool,
}

impl ArchRoute {
    /// One-line description shown under the route's node.
    pub fn short_description(&self) -> String {
        let path = format!("/{}", self.path.trim_start_matches('/'));
        if let Some(redirect) = &self.redirect_to {
            format!("{path} -> /{}", redirect.trim_start_matches('/'))
        } else if self.load_children.is_some() {
            format!("{path} (lazy)")
        } else {
            path
        }
    }

    pub const fn has_component(&self) -> bool {
        self.component.is_some()
    }
}

/// The architectural element behind a tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArchPonent {
    Module {
        name: String,
    },
    Component {
        name: String,
        #[serde(default)]
        selector: Option<String>,
    },
    Directive {
        name: String,
    },
    Pipe {
        name: String,
    },
    Injectable {
        name: String,
    },
    Route(ArchRoute),
    Injector {
        name: String,
    },
    Provider {
        token: String,
    },
}

impl ArchPonent {
    pub fn name(&self) -> &str {
        match self {
            Self::Module { name }
            | Self::Component { name, .. }
            | Self::Directive { name }
            | Self::Pipe { name }
            | Self::Injectable { name }
            | Self::Injector { name } => name,
            Self::Route(route) => &route.path,
            Self::Provider { token } => token,
        }
    }

    pub const fn ponent_type(&self) -> NgPonentType {
        match self {
            Self::Module { .. } => NgPonentType::Module,
            Self::Component { .. } => NgPonentType::Component,
            Self::Directive { .. } => NgPonentType::Directive,
            Self::Pipe { .. } => NgPonentType::Pipe,
            Self::Injectable { .. } => NgPonentType::Injectable,
            Self::Route(_) => NgPonentType::Route,
            Self::Injector { .. } => NgPonentType::Injector,
            Self::Provider { .. } => NgPonentType::Provider,
        }
    }

    pub const fn as_route(&self) -> Option<&ArchRoute> {
        match self {
            Self::Route(route) => Some(route),
            _ => None,
        }
    }

    /// Injectors and providers belong to the injector layer of a diagram.
    pub const fn is_injector_layer(&self) -> bool {
        matches!(self, Self::Injector { .. } | Self::Provider { .. })
    }
}

/// Relationship through which a node was reached from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelatedFrom {
    Imports,
    Exports,
    Declarations,
    Bootstrap,
    Providers,
    Routes,
    Children,
    LoadChildren,
    Injects,
    ParentInjector,
}

impl RelatedFrom {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Imports => "imports",
            Self::Exports => "exports",
            Self::Declarations => "declarations",
            Self::Bootstrap => "bootstrap",
            Self::Providers => "providers",
            Self::Routes => "routes",
            Self::Children => "children",
            Self::LoadChildren => "loadChildren",
            Self::Injects => "injects",
            Self::ParentInjector => "parent injector",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchNode {
    pub id: NodeId,
    pub ponent: ArchPonent,
    #[serde(default)]
    pub related_from: Option<RelatedFrom>,
    #[serde(default)]
    pub children: Vec<ArchNode>,
}

impl ArchNode {
    pub fn new(id: impl Into<NodeId>, ponent: ArchPonent) -> Self {
        Self {
            id: id.into(),
            ponent,
            related_from: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn related_from(mut self, relation: RelatedFrom) -> Self {
        self.related_from = Some(relation);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// Label of the relationship that produced this node, if any.
    pub fn related_from_label(&self) -> Option<&'static str> {
        self.related_from.map(RelatedFrom::label)
    }

    pub const fn is_route(&self) -> bool {
        matches!(self.ponent, ArchPonent::Route(_))
    }

    /// True when this node or any descendant is a route.
    pub fn contains_routes(&self) -> bool {
        self.is_route() || self.children.iter().any(Self::contains_routes)
    }

    /// Depth-first pre-order visit.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    pub fn find(&self, id: &str) -> Option<&Self> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}

/// A named tree; `root` is absent when the project has nothing to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchTree {
    pub name: String,
    #[serde(default)]
    pub root: Option<ArchNode>,
}

impl ArchTree {
    pub fn new(name: impl Into<String>, root: Option<ArchNode>) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, ArchNode::node_count)
    }

    pub fn find(&self, id: &str) -> Option<&ArchNode> {
        self.root.as_ref().and_then(|root| root.find(id))
    }
}

//! Viewer definitions shared by the option panel, the composition controller
//! and the diagram renderer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which structural relationship is being visualized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ArchViewerHierarchy {
    InjectorHierarchy,
    DependencyDiagram,
    ComponentHierarchy,
    RoutingHierarchy,
    /// Injector hierarchy and dependency diagram combined
    FullView,
}

impl ArchViewerHierarchy {
    pub fn all() -> Vec<Self> {
        vec![
            Self::InjectorHierarchy,
            Self::DependencyDiagram,
            Self::ComponentHierarchy,
            Self::RoutingHierarchy,
            Self::FullView,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InjectorHierarchy => "injector_hierarchy",
            Self::DependencyDiagram => "dependency_diagram",
            Self::ComponentHierarchy => "component_hierarchy",
            Self::RoutingHierarchy => "routing_hierarchy",
            Self::FullView => "full_view",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::InjectorHierarchy => "Injector Hierarchy",
            Self::DependencyDiagram => "Dependency Diagram",
            Self::ComponentHierarchy => "Component Hierarchy",
            Self::RoutingHierarchy => "Routing Hierarchy",
            Self::FullView => "Injector + Dependency",
        }
    }

    /// Hierarchies that get their own page: no hierarchy toggles, dedicated title.
    pub fn is_specific(self) -> bool {
        matches!(self, Self::ComponentHierarchy | Self::RoutingHierarchy)
    }

    /// Header title for a specific hierarchy page.
    pub fn specific_title(self) -> Option<&'static str> {
        self.is_specific().then(|| self.display_name())
    }
}

impl fmt::Display for ArchViewerHierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ArchViewerHierarchy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('-', "_");
        Self::all()
            .into_iter()
            .find(|h| h.as_str() == normalized)
            .ok_or_else(|| format!("Unknown viewer hierarchy: '{s}'"))
    }
}

/// Key understood by the tree data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchTreeType {
    Injector,
    ServiceDependency,
    Component,
    Routing,
    Full,
}

impl ArchTreeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Injector => "injector",
            Self::ServiceDependency => "service_dependency",
            Self::Component => "component",
            Self::Routing => "routing",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for ArchTreeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pure lookup from the viewed hierarchy to the tree that backs it.
pub const fn map_viewer_hierarchy_to_arch_tree(hierarchy: ArchViewerHierarchy) -> ArchTreeType {
    match hierarchy {
        ArchViewerHierarchy::InjectorHierarchy => ArchTreeType::Injector,
        ArchViewerHierarchy::DependencyDiagram => ArchTreeType::ServiceDependency,
        ArchViewerHierarchy::ComponentHierarchy => ArchTreeType::Component,
        ArchViewerHierarchy::RoutingHierarchy => ArchTreeType::Routing,
        ArchViewerHierarchy::FullView => ArchTreeType::Full,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Orientation {
    #[default]
    TopToBottom,
    LeftToRight,
}

impl Orientation {
    pub fn all() -> Vec<Self> {
        vec![Self::TopToBottom, Self::LeftToRight]
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::TopToBottom => "Top to bottom",
            Self::LeftToRight => "Left to right",
        }
    }
}

/// Node detail level: whether route elements are part of the drawn tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArchViewerNodeType {
    #[default]
    IncludeRoutes,
    ExcludeRoutes,
}

impl ArchViewerNodeType {
    pub fn all() -> Vec<Self> {
        vec![Self::IncludeRoutes, Self::ExcludeRoutes]
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::IncludeRoutes => "Include routes",
            Self::ExcludeRoutes => "Exclude routes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArchViewerType {
    #[default]
    Full,
    Compact,
}

impl ArchViewerType {
    pub fn all() -> Vec<Self> {
        vec![Self::Full, Self::Compact]
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::Compact => "Compact",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArchViewerExtraContent {
    #[default]
    None,
    /// Draw the service-provider layer under each injector
    LayerServiceProvider,
}

impl ArchViewerExtraContent {
    pub fn all() -> Vec<Self> {
        vec![Self::None, Self::LayerServiceProvider]
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::LayerServiceProvider => "Service provider layer",
        }
    }
}

/// Viewer that originated a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ViewerType {
    AppArchViewer,
}

/// Initial option values, read from the `[viewer]` table of the app config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerDefaults {
    pub hierarchy: ArchViewerHierarchy,
    pub orientation: Orientation,
    pub node_type: ArchViewerNodeType,
    pub viewer_type: ArchViewerType,
    pub extra_content: ArchViewerExtraContent,
}

impl Default for ViewerDefaults {
    fn default() -> Self {
        Self {
            hierarchy: ArchViewerHierarchy::InjectorHierarchy,
            orientation: Orientation::TopToBottom,
            node_type: ArchViewerNodeType::IncludeRoutes,
            viewer_type: ArchViewerType::Full,
            extra_content: ArchViewerExtraContent::None,
        }
    }
}

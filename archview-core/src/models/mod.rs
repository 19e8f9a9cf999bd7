//! Core data models for the architecture viewer.

pub mod arch_tree;
pub mod project;
pub mod viewer_definition;

pub use arch_tree::{ArchNode, ArchPonent, ArchRoute, ArchTree, NgPonentType, NodeId, RelatedFrom};
pub use project::{is_invalid_project_config, ProjectConfig, ProjectStatus};
pub use viewer_definition::{
    map_viewer_hierarchy_to_arch_tree, ArchTreeType, ArchViewerExtraContent, ArchViewerHierarchy,
    ArchViewerNodeType, ArchViewerType, Orientation, ViewerDefaults, ViewerType,
};

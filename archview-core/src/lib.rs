//! ArchView Core - Architecture Tree Model and Data Providers
//!
//! This crate provides the data side of the architecture viewer:
//! - Viewer definitions (hierarchies, orientation, node/viewer types, extra content)
//! - The architecture tree and its elements (modules, components, routes, injectors)
//! - Project configuration, project status and the validity predicate
//! - The tree data provider seam and a JSON project-dump provider

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]

pub mod models;
pub mod provider;

pub use models::{
    arch_tree::{ArchNode, ArchPonent, ArchRoute, ArchTree, NgPonentType, NodeId, RelatedFrom},
    project::{is_invalid_project_config, ProjectConfig, ProjectStatus},
    viewer_definition::{
        map_viewer_hierarchy_to_arch_tree, ArchTreeType, ArchViewerExtraContent,
        ArchViewerHierarchy, ArchViewerNodeType, ArchViewerType, Orientation, ViewerDefaults,
        ViewerType,
    },
};
pub use provider::{JsonTreeProvider, ProjectDump, StaticTreeProvider, TreeDataProvider};

/// Result type used throughout ArchView core
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ArchView core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Project dump could not be used
    #[error("Invalid project dump {path}: {message}")]
    InvalidProject { path: String, message: String },

    /// Failure reported by a tree provider backed by something other than a
    /// project dump, e.g. a live analysis backend
    #[error("Tree provider error: {0}")]
    Provider(String),
}

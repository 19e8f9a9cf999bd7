pub mod arch_viewer_controller;
pub mod composition;
pub mod root_shell_controller;

pub use arch_viewer_controller::ArchViewerController;
pub use composition::{compose, layout_options, resolve_hierarchy, resolve_tree, RenderConfiguration};
pub use root_shell_controller::{NavigationItem, RootShellController, ShellState};

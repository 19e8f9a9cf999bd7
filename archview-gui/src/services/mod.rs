pub mod navigator;
pub mod shell_sources;

pub use navigator::{ExplanationTopic, NavigatorRequest, QueuedNavigator, ViewerNavigator};
pub use shell_sources::{CenterController, ProjectProfileService, SocketHandler, SocketTask};

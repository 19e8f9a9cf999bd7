//! ArchView GUI
//!
//! Controllers that turn option streams, tree fetches and shell signals into
//! renderer calls and UI flags, plus the egui host that drives them once per
//! frame.

pub mod app;
pub mod config;
pub mod controllers;
pub mod options;
pub mod services;
pub mod signals;
pub mod subscription;
pub mod views;

pub use app::ArchViewApp;
pub use config::AppConfig;
pub use controllers::{
    compose, resolve_hierarchy, resolve_tree, ArchViewerController, NavigationItem,
    RenderConfiguration, RootShellController, ShellState,
};
pub use options::{ArchViewerOptionsService, OptionChange, UiElementData};
pub use signals::{ShellEvent, SignalBus, ViewerEvent};
pub use subscription::{Connection, DisposeBag, Signal};
pub use views::GuiView;

pub type GuiResult<T> = Result<T, GuiError>;

#[derive(Debug, thiserror::Error)]
pub enum GuiError {
    #[error("Diagram error: {0}")]
    Viz(#[from] archview_viz::VizError),

    #[error("Utility error: {0}")]
    Util(#[from] archview_utils::UtilError),

    #[error("UI error: {0}")]
    Ui(String),

    #[error("State error: {0}")]
    State(String),
}

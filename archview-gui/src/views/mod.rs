pub mod arch_viewer_view;

pub use arch_viewer_view::ArchViewerView;

use crate::GuiResult;
use egui::{Context, Ui};

/// A page hosted in the central panel.
pub trait GuiView {
    fn render(&mut self, ui: &mut Ui, ctx: &Context) -> GuiResult<()>;

    fn title(&self) -> String;

    /// Called once when the view is replaced or the window closes.
    fn on_close(&mut self) {}
}

//! Arch Viewer GUI
//!
//! Hosts one [`ArchViewerController`] over a [`DotOrganizer`]: option panel,
//! header, node tree with click handling and the generated DOT source.

use std::sync::Arc;

use archview_core::{ArchViewerHierarchy, TreeDataProvider};
use archview_viz::{DotOrganizer, PonentActionPurpose, PonentActionScope};
use egui::{Context, RichText, Sense, Ui};
use tokio::runtime::Handle;

use crate::controllers::ArchViewerController;
use crate::options::{ArchViewerOptionsService, OptionChange};
use crate::services::{ExplanationTopic, NavigatorRequest, QueuedNavigator, ViewerNavigator};
use crate::views::GuiView;
use crate::GuiResult;

const INDENT_PER_LEVEL: f32 = 18.0;

pub struct ArchViewerView {
    controller: ArchViewerController<DotOrganizer>,
    navigator: Arc<QueuedNavigator>,
    explanation: Option<ExplanationTopic>,
    last_navigation: Option<String>,
}

impl ArchViewerView {
    pub fn new(
        content_hierarchy: Option<ArchViewerHierarchy>,
        options: Arc<ArchViewerOptionsService>,
        provider: Arc<dyn TreeDataProvider>,
        runtime: Handle,
    ) -> GuiResult<Self> {
        let navigator = Arc::new(QueuedNavigator::new(content_hierarchy));
        let viewer_navigator: Arc<dyn ViewerNavigator> = navigator.clone();
        let mut controller = ArchViewerController::new(
            DotOrganizer::new().with_edge_labels(true),
            options,
            provider,
            viewer_navigator,
            runtime,
        );
        controller.init()?;

        Ok(Self {
            controller,
            navigator,
            explanation: None,
            last_navigation: None,
        })
    }

    pub const fn controller(&self) -> &ArchViewerController<DotOrganizer> {
        &self.controller
    }

    /// Option panel for the side bar.
    pub fn render_options(&mut self, ui: &mut Ui) -> GuiResult<()> {
        let sections = self.controller.option_data().clone();
        let mut clicked = None;

        for section in &sections {
            ui.strong(section.title.as_str());
            for category in &section.categories {
                ui.label(category.title.as_str());
                ui.horizontal_wrapped(|ui| {
                    for option in &category.options {
                        let response = ui.add_enabled(
                            !option.disabled,
                            egui::SelectableLabel::new(option.selected, option.label.as_str()),
                        );
                        if response.clicked() {
                            clicked = Some(OptionChange {
                                section: section.kind,
                                category: category.kind,
                                option: option.value,
                            });
                        }
                    }
                });
            }
            ui.separator();
        }

        if let Some(change) = clicked {
            self.controller.change_option(change)?;
        }
        Ok(())
    }

    fn render_header(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading(self.controller.header_title());
            if let Some(name) = self.controller.tree_name() {
                ui.label(RichText::new(name).monospace());
            }
            if ui.small_button("?").on_hover_text("About this view").clicked() {
                self.controller.open_viewer_explanation();
            }
            if let Some(message) = &self.last_navigation {
                ui.weak(message.as_str());
            }
        });
    }

    fn render_diagram(&self, ui: &mut Ui) -> GuiResult<()> {
        let organizer = self.controller.organizer();
        let Some(output) = organizer.output() else {
            let message = if self.controller.is_loading() {
                "Loading architecture tree..."
            } else {
                "Nothing to display"
            };
            ui.label(message);
            return Ok(());
        };

        let mut interactions = Vec::new();
        egui::ScrollArea::vertical()
            .id_source("arch_viewer_nodes")
            .max_height(ui.available_height() * 0.7)
            .show(ui, |ui| {
                for (depth, node) in organizer.visible_nodes() {
                    ui.horizontal(|ui| {
                        ui.add_space(depth as f32 * INDENT_PER_LEVEL);
                        if let Some(top) = &node.top_line {
                            ui.weak(top.as_str());
                        }

                        let text = if node.collapsed && !node.children.is_empty() {
                            format!("{} (+{})", node.label, node.children.len())
                        } else {
                            node.label.clone()
                        };
                        let response = ui
                            .add(egui::Label::new(RichText::new(text).strong()).sense(Sense::click()))
                            .on_hover_text(node.ponent_type().to_string());
                        if response.double_clicked() {
                            interactions.push((node.id.clone(), None));
                        }

                        if let Some(bottom) = &node.bottom_line {
                            ui.weak(bottom.as_str());
                        }
                        if !node.children.is_empty()
                            && ui
                                .small_button("⊟")
                                .on_hover_text("Collapse children without routes")
                                .clicked()
                        {
                            interactions.push((
                                node.id.clone(),
                                Some((
                                    PonentActionScope::NodeAction,
                                    PonentActionPurpose::ToggleCollapseChildren,
                                )),
                            ));
                        }
                        if ui.small_button("↗").on_hover_text("Open in a window").clicked() {
                            interactions.push((
                                node.id.clone(),
                                Some((
                                    PonentActionScope::ComponentAction,
                                    PonentActionPurpose::ArchitectureView,
                                )),
                            ));
                        }
                    });
                }
            });

        ui.collapsing("DOT source", |ui| {
            let mut text = output;
            ui.add(
                egui::TextEdit::multiline(&mut text)
                    .code_editor()
                    .desired_width(f32::INFINITY),
            );
        });

        for (node_id, action) in interactions {
            match action {
                None => organizer.double_click(&node_id)?,
                Some((scope, purpose)) => organizer.action_click(&node_id, scope, purpose)?,
            }
        }
        Ok(())
    }

    fn handle_navigation(&mut self) {
        for request in self.navigator.take_requests() {
            match request {
                NavigatorRequest::Explanation(topic) => self.explanation = Some(topic),
                NavigatorRequest::OpenOnTop { label, purpose, .. } => {
                    self.last_navigation = Some(format!("Opened {label} ({purpose:?})"));
                }
                NavigatorRequest::OpenWindow {
                    node_id, purpose, ..
                } => {
                    self.last_navigation = Some(format!("Opened window for {node_id} ({purpose:?})"));
                }
            }
        }
    }

    fn render_explanation(&mut self, ctx: &Context) {
        let Some(topic) = self.explanation else {
            return;
        };
        let mut open = true;
        egui::Window::new(topic.title())
            .open(&mut open)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label(topic.description());
            });
        if !open {
            self.explanation = None;
        }
    }
}

impl GuiView for ArchViewerView {
    fn render(&mut self, ui: &mut Ui, ctx: &Context) -> GuiResult<()> {
        self.controller.process_pending()?;
        self.handle_navigation();

        self.render_header(ui);
        ui.separator();
        self.render_diagram(ui)?;
        self.render_explanation(ctx);
        Ok(())
    }

    fn title(&self) -> String {
        self.controller.header_title().to_string()
    }

    fn on_close(&mut self) {
        self.controller.dispose();
    }
}

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use archview_core::{ArchViewerHierarchy, JsonTreeProvider, ProjectStatus, TreeDataProvider};
use egui::{Color32, Context};
use serde_json::json;
use tokio::runtime::Handle;

use crate::config::AppConfig;
use crate::controllers::{NavigationItem, RootShellController};
use crate::options::ArchViewerOptionsService;
use crate::services::{CenterController, ProjectProfileService, SocketHandler};
use crate::views::{ArchViewerView, GuiView};
use crate::GuiResult;

const REPAINT_INTERVAL: Duration = Duration::from_millis(200);

pub struct ArchViewApp {
    runtime: Handle,
    project: Arc<JsonTreeProvider>,
    options: Arc<ArchViewerOptionsService>,
    center: Arc<CenterController>,
    socket: Arc<SocketHandler>,
    profile: Arc<ProjectProfileService>,
    shell: RootShellController,
    navigation: Vec<NavigationItem>,
    viewer: Option<ArchViewerView>,
}

impl ArchViewApp {
    pub fn new(
        config: &AppConfig,
        project: Arc<JsonTreeProvider>,
        content_hierarchy: Option<ArchViewerHierarchy>,
        runtime: Handle,
    ) -> GuiResult<Self> {
        let center = Arc::new(CenterController::new());
        let socket = Arc::new(SocketHandler::new());
        let profile = Arc::new(ProjectProfileService::new());

        let mut shell =
            RootShellController::new(Arc::clone(&center), Arc::clone(&socket), Arc::clone(&profile));
        shell.init()?;

        let navigation = NavigationItem::defaults();
        let initial = navigation
            .iter()
            .find(|item| item.hierarchy == content_hierarchy)
            .cloned()
            .unwrap_or_else(|| NavigationItem::new("custom", "Custom", content_hierarchy));

        let mut app = Self {
            runtime,
            project,
            options: Arc::new(ArchViewerOptionsService::new(config.viewer)),
            center,
            socket,
            profile,
            shell,
            navigation,
            viewer: None,
        };
        app.select_feature(initial)?;
        app.load_project(ProjectStatus::Initializing)?;
        Ok(app)
    }

    /// Record the selection and replace the viewer with one fixed to the
    /// item's hierarchy.
    fn select_feature(&mut self, item: NavigationItem) -> GuiResult<()> {
        if let Some(mut previous) = self.viewer.take() {
            previous.on_close();
        }

        let provider: Arc<dyn TreeDataProvider> = self.project.clone();
        self.viewer = Some(ArchViewerView::new(
            item.hierarchy,
            Arc::clone(&self.options),
            provider,
            self.runtime.clone(),
        )?);
        self.shell.select_feature(item);
        Ok(())
    }

    /// Read the project dump in the background and report the outcome through
    /// the shell sources.
    fn load_project(&self, status: ProjectStatus) -> GuiResult<()> {
        self.center.set_status(status)?;

        let project = Arc::clone(&self.project);
        let center = Arc::clone(&self.center);
        let socket = Arc::clone(&self.socket);
        let profile = Arc::clone(&self.profile);
        self.runtime.spawn(async move {
            let outcome = match project.reload().await {
                Ok(dump) => {
                    tracing::info!(project = %dump.name, trees = dump.trees.len(), "project loaded");
                    profile
                        .set_project_config(dump.config.clone())
                        .and_then(|()| socket.notify_open(json!({ "project": dump.name })))
                        .and_then(|()| center.set_status(ProjectStatus::Normal))
                }
                Err(e) => {
                    tracing::error!("Failed to load project {}: {}", project.path().display(), e);
                    socket
                        .notify_error(json!({ "message": e.to_string() }))
                        .and_then(|()| center.set_status(ProjectStatus::Failed))
                }
            };
            if let Err(e) = outcome {
                tracing::error!("Failed to publish project state: {}", e);
            }
        });
        Ok(())
    }

    /// The viewer is re-created once the reload has finished, so its first
    /// fetch reads the fresh dump.
    fn reload_project(&mut self) -> GuiResult<()> {
        self.shell.await_reload();
        self.load_project(ProjectStatus::Updating)
    }

    fn refresh_after_reload(&mut self) -> GuiResult<()> {
        if !self.shell.take_reload_done() {
            return Ok(());
        }
        match self.shell.state().selected_feature.clone() {
            Some(item) => self.select_feature(item),
            None => Ok(()),
        }
    }

    fn render_header(&mut self, ctx: &Context) -> GuiResult<()> {
        let mut selected = None;
        let mut reload = false;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("☰").on_hover_text("Toggle side bar").clicked() {
                    self.shell.toggle_sidebar();
                }
                ui.heading("ArchView");
                ui.separator();

                let current = self.shell.state().selected_feature.clone();
                for item in &self.navigation {
                    let active = current.as_ref().is_some_and(|c| c.id == item.id);
                    if ui.selectable_label(active, item.name.as_str()).clicked() && !active {
                        selected = Some(item.clone());
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Reload project").clicked() {
                        reload = true;
                    }
                    let dashboard = self.shell.state().has_dashboard;
                    if ui.selectable_label(dashboard, "Dashboard").clicked() {
                        self.shell.toggle_dashboard();
                    }
                });
            });
        });

        if let Some(item) = selected {
            self.select_feature(item)?;
        }
        if reload {
            self.reload_project()?;
        }
        Ok(())
    }

    fn render_error_banner(ctx: &Context) {
        egui::TopBottomPanel::top("error_banner").show(ctx, |ui| {
            ui.colored_label(
                Color32::from_rgb(200, 60, 60),
                "Cannot reach the analysis backend. Showing the welcome page until it is back.",
            );
        });
    }

    fn render_welcome(ui: &mut egui::Ui, project_path: &Path) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("Welcome to ArchView");
            ui.label("No valid project is loaded.");
            ui.label(format!(
                "Expected a project dump with a root directory and a tsconfig at {}",
                project_path.display()
            ));
        });
    }

    fn render_dashboard(ui: &mut egui::Ui, profile: &ProjectProfileService) {
        ui.heading("Dashboard");
        let config = profile.project_config().value().ok().flatten().flatten();
        match config {
            Some(config) => {
                egui::Grid::new("dashboard_grid").striped(true).show(ui, |ui| {
                    ui.label("Name");
                    ui.label(config.name.unwrap_or_default());
                    ui.end_row();
                    ui.label("Root");
                    ui.label(
                        config
                            .root_dir
                            .map(|p| p.display().to_string())
                            .unwrap_or_default(),
                    );
                    ui.end_row();
                    ui.label("Source dirs");
                    ui.label(config.source_dirs.len().to_string());
                    ui.end_row();
                });
            }
            None => {
                ui.label("No project configuration.");
            }
        }
    }

    fn render_overlay(&mut self, ctx: &Context) {
        let mut close = false;
        egui::Window::new("Project updating")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("The project is being re-analysed. Diagrams refresh when it is done.");
                if ui.button("Close").clicked() {
                    close = true;
                }
            });
        if close {
            self.shell.close_overlay();
        }
    }

    fn render(&mut self, ctx: &Context) -> GuiResult<()> {
        self.shell.process_pending();
        self.refresh_after_reload()?;
        self.render_header(ctx)?;

        let state = self.shell.state().clone();
        if state.is_server_error {
            Self::render_error_banner(ctx);
        }

        if state.opened && !state.has_welcome_page {
            let mut result = Ok(());
            egui::SidePanel::left("viewer_options")
                .resizable(true)
                .default_width(220.0)
                .show(ctx, |ui| {
                    if let Some(viewer) = self.viewer.as_mut() {
                        result = viewer.render_options(ui);
                    }
                });
            result?;
        }

        let mut result = Ok(());
        egui::CentralPanel::default().show(ctx, |ui| {
            if state.has_welcome_page {
                Self::render_welcome(ui, self.project.path());
            } else if state.has_dashboard {
                Self::render_dashboard(ui, &self.profile);
            } else if let Some(viewer) = self.viewer.as_mut() {
                result = viewer.render(ui, ctx);
            }
        });
        result?;

        if state.use_overlay {
            self.render_overlay(ctx);
        }
        Ok(())
    }
}

impl eframe::App for ArchViewApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if let Err(e) = self.render(ctx) {
            tracing::error!("Error rendering frame: {}", e);
        }

        // Fetches and shell sources complete off the UI thread.
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(mut viewer) = self.viewer.take() {
            viewer.on_close();
        }
        self.shell.dispose();
    }
}

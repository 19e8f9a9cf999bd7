use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use archview_core::{ArchViewerHierarchy, JsonTreeProvider, TreeDataProvider};
use archview_gui::services::{QueuedNavigator, ViewerNavigator};
use archview_gui::{AppConfig, ArchViewApp, ArchViewerController, ArchViewerOptionsService};
use archview_utils::init_logging;
use archview_viz::DotOrganizer;
use clap::Parser;
use eframe::egui::ViewportBuilder;
use tokio::runtime::Handle;

const DEFAULT_PROJECT_FILE: &str = "archview-project.json";

#[derive(Parser, Debug)]
#[command(name = "archview")]
#[command(about = "Architecture viewer for analysed Angular projects")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./archview.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project dump produced by the analysis backend
    #[arg(short, long)]
    project: Option<PathBuf>,

    /// Fix the viewer to one hierarchy
    #[arg(long, value_enum)]
    hierarchy: Option<ArchViewerHierarchy>,

    /// Render the diagram to a DOT file and exit without opening a window
    #[arg(long, value_name = "FILE")]
    export_dot: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load config")?;
    if let Some(project) = cli.project {
        config.project.path = Some(project);
    }
    init_logging(&config.logging).context("failed to initialise logging")?;

    let project_path = config
        .project
        .path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT_FILE));
    let project = Arc::new(JsonTreeProvider::new(project_path));

    if let Some(output) = cli.export_dot {
        return export_dot(&config, project, cli.hierarchy, &output).await;
    }

    run_gui(&config, project, cli.hierarchy)
}

async fn export_dot(
    config: &AppConfig,
    project: Arc<JsonTreeProvider>,
    hierarchy: Option<ArchViewerHierarchy>,
    output: &Path,
) -> anyhow::Result<()> {
    // Fail early on an unreadable dump instead of exporting an empty board.
    project
        .project()
        .await
        .with_context(|| format!("failed to read {}", project.path().display()))?;

    let options = Arc::new(ArchViewerOptionsService::new(config.viewer));
    let navigator: Arc<dyn ViewerNavigator> = Arc::new(QueuedNavigator::new(hierarchy));
    let provider: Arc<dyn TreeDataProvider> = project;

    let mut controller = ArchViewerController::new(
        DotOrganizer::new().with_edge_labels(true),
        options,
        provider,
        navigator,
        Handle::current(),
    );
    controller.init()?;
    controller.settle().await?;

    controller
        .organizer()
        .export_to_file(output)
        .with_context(|| format!("nothing to export for {}", controller.header_title()))?;
    tracing::info!(
        output = %output.display(),
        tree = ?controller.tree_name(),
        "exported diagram"
    );
    controller.dispose();
    Ok(())
}

fn run_gui(
    config: &AppConfig,
    project: Arc<JsonTreeProvider>,
    hierarchy: Option<ArchViewerHierarchy>,
) -> anyhow::Result<()> {
    let app = ArchViewApp::new(config, project, hierarchy, Handle::current())?;

    let native_options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("ArchView"),
        ..Default::default()
    };

    eframe::run_native(
        "ArchView",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("application failed: {e}"))
}

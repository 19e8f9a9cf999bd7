//! Arch Viewer Controller
//!
//! Combines the five option signals and the tree fetch into one render
//! configuration and pushes it into the diagram organizer. Sources only
//! enqueue events; `process_pending` reduces everything queued, keeping the
//! latest value per source, and redraws at most once.

use std::sync::Arc;

use archview_core::{
    ArchTree, ArchViewerExtraContent, ArchViewerHierarchy, ArchViewerNodeType, ArchViewerType,
    Orientation, TreeDataProvider, ViewerType,
};
use archview_viz::{
    map_diagram_tree_node, DiagramElementFeature, DiagramNode, DiagramOrganizer, Interaction,
    PonentActionItem, PonentActionPurpose, PonentActionScope,
};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::composition::{compose, resolve_hierarchy, resolve_tree, RenderConfiguration};
use crate::options::{
    derive_option_data, is_option_disabled, mark_selected, ArchViewerOptionsService,
    OptionChange, OptionValue, SectionKind, UiElementData,
};
use crate::services::{ExplanationTopic, ViewerNavigator};
use crate::signals::{SignalBus, ViewerEvent};
use crate::subscription::{DisposeBag, Signal};
use crate::GuiResult;

const DEFAULT_HEADER_TITLE: &str = "Architecture View";

/// Tree delivered by the latest fetch, paired with the hierarchy it was
/// fetched for.
#[derive(Debug, Clone)]
struct LoadedTree {
    generation: u64,
    hierarchy: ArchViewerHierarchy,
    tree: Option<ArchTree>,
}

/// Latest value per source.
#[derive(Debug, Default)]
struct ViewerInputs {
    hierarchy: Option<ArchViewerHierarchy>,
    orientation: Option<Orientation>,
    node_type: Option<ArchViewerNodeType>,
    viewer_type: Option<ArchViewerType>,
    extra_content: Option<ArchViewerExtraContent>,
    tree: Option<LoadedTree>,
}

pub struct ArchViewerController<O: DiagramOrganizer> {
    organizer: O,
    options: Arc<ArchViewerOptionsService>,
    provider: Arc<dyn TreeDataProvider>,
    navigator: Arc<dyn ViewerNavigator>,
    runtime: Handle,
    bus: SignalBus<ViewerEvent>,
    subscriptions: DisposeBag,

    viewer_type: ViewerType,
    content_hierarchy: Option<ArchViewerHierarchy>,
    header_title: String,
    base_option_data: UiElementData,
    option_data: UiElementData,

    inputs: ViewerInputs,
    requested_hierarchy: Option<ArchViewerHierarchy>,
    generation: u64,
    fetch_task: Option<JoinHandle<()>>,

    tree_name: Option<String>,
    last_config: Option<RenderConfiguration>,
    render_count: usize,
    initialized: bool,
    disposed: bool,
}

impl<O: DiagramOrganizer> ArchViewerController<O> {
    /// Create the controller and register its interaction handlers on the
    /// organizer. Nothing is subscribed until `init`.
    pub fn new(
        mut organizer: O,
        options: Arc<ArchViewerOptionsService>,
        provider: Arc<dyn TreeDataProvider>,
        navigator: Arc<dyn ViewerNavigator>,
        runtime: Handle,
    ) -> Self {
        let bus = SignalBus::new();

        let emitter = bus.emitter();
        organizer.add_feature(
            DiagramElementFeature::DblClick,
            Box::new(move |interaction| {
                if let Interaction::DoubleClick(node) = interaction {
                    let _ = emitter.send(ViewerEvent::NodeDoubleClicked(node));
                }
            }),
        );
        let emitter = bus.emitter();
        organizer.add_feature(
            DiagramElementFeature::ActionClick,
            Box::new(move |interaction| {
                if let Interaction::ActionClick(item) = interaction {
                    let _ = emitter.send(ViewerEvent::ActionClicked(item));
                }
            }),
        );

        Self {
            organizer,
            options,
            provider,
            navigator,
            runtime,
            bus,
            subscriptions: DisposeBag::new(),
            viewer_type: ViewerType::AppArchViewer,
            content_hierarchy: None,
            header_title: DEFAULT_HEADER_TITLE.to_string(),
            base_option_data: Vec::new(),
            option_data: Vec::new(),
            inputs: ViewerInputs::default(),
            requested_hierarchy: None,
            generation: 0,
            fetch_task: None,
            tree_name: None,
            last_config: None,
            render_count: 0,
            initialized: false,
            disposed: false,
        }
    }

    /// Read the content hierarchy, build the option list and subscribe to
    /// every option source.
    pub fn init(&mut self) -> GuiResult<()> {
        if self.initialized || self.disposed {
            return Ok(());
        }

        self.content_hierarchy = self.navigator.content_hierarchy();
        let specific = self
            .content_hierarchy
            .is_some_and(ArchViewerHierarchy::is_specific);
        self.header_title = self
            .content_hierarchy
            .and_then(ArchViewerHierarchy::specific_title)
            .unwrap_or(DEFAULT_HEADER_TITLE)
            .to_string();

        let mut option_data = self.options.option_data_for_runtime_structure()?;
        if specific {
            option_data.retain(|section| section.kind != SectionKind::Hierarchies);
        }
        self.base_option_data = option_data.clone();
        self.option_data = option_data;

        let options = Arc::clone(&self.options);
        self.forward(options.viewer_hierarchy(), ViewerEvent::HierarchyChanged)?;
        self.forward(options.viewer_orientation(), ViewerEvent::OrientationChanged)?;
        self.forward(options.viewer_node_type(), ViewerEvent::NodeTypeChanged)?;
        self.forward(options.viewer_type(), ViewerEvent::ViewerTypeChanged)?;
        self.forward(options.viewer_extra_content(), ViewerEvent::ExtraContentChanged)?;

        self.initialized = true;
        tracing::debug!(
            content_hierarchy = ?self.content_hierarchy,
            title = %self.header_title,
            "arch viewer initialised"
        );
        Ok(())
    }

    fn forward<T>(
        &mut self,
        signal: &Signal<T>,
        to_event: impl Fn(T) -> ViewerEvent + Send + Sync + 'static,
    ) -> GuiResult<()>
    where
        T: Clone + Send + 'static,
    {
        let emitter = self.bus.emitter();
        let connection = signal.connect(move |value| {
            let _ = emitter.send(to_event(value));
        })?;
        self.subscriptions.add_connection(connection);
        Ok(())
    }

    /// Reduce every queued event, then recompose once if any render input
    /// changed. Returns whether the organizer was redrawn.
    pub fn process_pending(&mut self) -> GuiResult<bool> {
        if self.disposed || !self.initialized {
            return Ok(false);
        }

        let events = self.bus.drain();
        if events.is_empty() {
            return Ok(false);
        }

        let mut dirty = false;
        for event in events {
            dirty |= self.apply(event);
        }
        self.refresh_option_data();

        if dirty {
            self.recompose()
        } else {
            Ok(false)
        }
    }

    /// Process events until no tree fetch is in flight.
    pub async fn settle(&mut self) -> GuiResult<()> {
        loop {
            self.process_pending()?;
            let Some(task) = self.fetch_task.take() else {
                return Ok(());
            };
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    tracing::warn!(error = %e, "tree fetch task failed");
                }
            }
        }
    }

    fn apply(&mut self, event: ViewerEvent) -> bool {
        match event {
            ViewerEvent::HierarchyChanged(selected) => {
                self.inputs.hierarchy = Some(selected);
                let (hierarchy, _) = resolve_hierarchy(self.content_hierarchy, selected);
                if self.requested_hierarchy != Some(hierarchy) {
                    self.start_fetch(selected);
                }
                false
            }
            ViewerEvent::OrientationChanged(orientation) => {
                self.inputs.orientation = Some(orientation);
                true
            }
            ViewerEvent::NodeTypeChanged(node_type) => {
                self.inputs.node_type = Some(node_type);
                true
            }
            ViewerEvent::ViewerTypeChanged(viewer_type) => {
                self.inputs.viewer_type = Some(viewer_type);
                true
            }
            ViewerEvent::ExtraContentChanged(extra_content) => {
                self.inputs.extra_content = Some(extra_content);
                true
            }
            ViewerEvent::TreeLoaded {
                generation,
                hierarchy,
                tree,
            } => {
                if generation != self.generation {
                    tracing::warn!(
                        generation,
                        current = self.generation,
                        %hierarchy,
                        "dropping stale tree"
                    );
                    return false;
                }
                self.inputs.tree = Some(LoadedTree {
                    generation,
                    hierarchy,
                    tree,
                });
                true
            }
            ViewerEvent::NodeDoubleClicked(node) => {
                self.on_double_click(&node);
                false
            }
            ViewerEvent::ActionClicked(item) => {
                self.on_action_click(&item);
                false
            }
        }
    }

    fn start_fetch(&mut self, selected: ArchViewerHierarchy) {
        let (hierarchy, tree_type) = resolve_hierarchy(self.content_hierarchy, selected);
        self.generation += 1;
        self.requested_hierarchy = Some(hierarchy);
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }

        tracing::debug!(
            %hierarchy,
            %tree_type,
            generation = self.generation,
            "fetching architecture tree"
        );

        let generation = self.generation;
        let content_hierarchy = self.content_hierarchy;
        let provider = Arc::clone(&self.provider);
        let emitter = self.bus.emitter();
        self.fetch_task = Some(self.runtime.spawn(async move {
            let (hierarchy, tree) =
                resolve_tree(provider.as_ref(), content_hierarchy, selected).await;
            let _ = emitter.send(ViewerEvent::TreeLoaded {
                generation,
                hierarchy,
                tree,
            });
        }));
    }

    fn refresh_option_data(&mut self) {
        let (Some(hierarchy), Some(orientation), Some(extra_content)) = (
            self.requested_hierarchy,
            self.inputs.orientation,
            self.inputs.extra_content,
        ) else {
            return;
        };

        let mut option_data =
            derive_option_data(&self.base_option_data, hierarchy, orientation, extra_content);
        let selected: Vec<OptionValue> = [
            self.inputs.hierarchy.map(OptionValue::Hierarchy),
            self.inputs.orientation.map(OptionValue::Orientation),
            self.inputs.node_type.map(OptionValue::NodeType),
            self.inputs.viewer_type.map(OptionValue::ViewerType),
            self.inputs.extra_content.map(OptionValue::ExtraContent),
        ]
        .into_iter()
        .flatten()
        .collect();
        mark_selected(&mut option_data, &selected);
        self.option_data = option_data;
    }

    fn recompose(&mut self) -> GuiResult<bool> {
        let (Some(loaded), Some(orientation), Some(node_type), Some(viewer_type), Some(extra)) = (
            self.inputs.tree.as_ref(),
            self.inputs.orientation,
            self.inputs.node_type,
            self.inputs.viewer_type,
            self.inputs.extra_content,
        ) else {
            tracing::trace!("waiting for every viewer input");
            return Ok(false);
        };

        let config = compose(
            loaded.hierarchy,
            loaded.tree.as_ref(),
            orientation,
            node_type,
            viewer_type,
            extra,
        );

        self.organizer.clear();
        if config.draw {
            if let Some(tree) = &loaded.tree {
                self.organizer.draw_arch_tree_with_layout(
                    tree,
                    None,
                    map_diagram_tree_node,
                    &config.layout,
                )?;
            }
        }

        tracing::debug!(
            hierarchy = %config.hierarchy,
            tree = ?config.tree_name,
            draw = config.draw,
            "recomposed arch viewer"
        );
        self.tree_name.clone_from(&config.tree_name);
        self.last_config = Some(config);
        self.render_count += 1;
        Ok(true)
    }

    fn on_double_click(&self, node: &DiagramNode) {
        match node {
            DiagramNode::Diagram(_) => self.navigator.open_ponent_on_top(
                node,
                PonentActionPurpose::ArchitectureView,
                self.viewer_type,
            ),
            DiagramNode::Injector(injector) if injector.is_provider_node => {
                self.navigator.open_ponent_on_top(
                    node,
                    PonentActionPurpose::DependencyDiagram,
                    self.viewer_type,
                );
            }
            DiagramNode::Injector(_) => {}
        }
    }

    fn on_action_click(&mut self, item: &PonentActionItem) {
        if item.purpose == PonentActionPurpose::ToggleCollapseChildren {
            if let Err(e) = self.organizer.toggle_collapsed_children(item.node.id()) {
                tracing::warn!(node = item.node.id(), error = %e, "cannot toggle children");
            }
        }

        if item.scope == PonentActionScope::ComponentAction {
            self.navigator
                .open_window_by_ponent_action(item, self.viewer_type);
        }
    }

    /// Forward a click on the option panel. Options the current list greys
    /// out are rejected.
    pub fn change_option(&self, change: OptionChange) -> GuiResult<bool> {
        if self.disposed {
            return Ok(false);
        }
        if is_option_disabled(&self.option_data, change.option) {
            tracing::warn!(option = ?change.option, "ignoring change to a disabled option");
            return Ok(false);
        }

        self.options
            .change_option(change.section, change.category, change.option)?;
        Ok(true)
    }

    pub fn open_viewer_explanation(&self) {
        let topic = self
            .content_hierarchy
            .map_or(ExplanationTopic::Viewer(self.viewer_type), ExplanationTopic::Hierarchy);
        self.navigator.open_viewer_explanation_panel(topic);
    }

    /// Release every subscription, abort the fetch and drop queued events.
    /// Later calls do nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        let released = self.subscriptions.dispose();
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
        let dropped = self.bus.drain().len();
        tracing::debug!(released, dropped, "arch viewer disposed");
    }

    pub const fn organizer(&self) -> &O {
        &self.organizer
    }

    pub fn organizer_mut(&mut self) -> &mut O {
        &mut self.organizer
    }

    pub fn option_data(&self) -> &UiElementData {
        &self.option_data
    }

    pub fn header_title(&self) -> &str {
        &self.header_title
    }

    pub fn tree_name(&self) -> Option<&str> {
        self.tree_name.as_deref()
    }

    pub const fn content_hierarchy(&self) -> Option<ArchViewerHierarchy> {
        self.content_hierarchy
    }

    /// Whether the hierarchy toggles are offered.
    pub fn shows_hierarchies(&self) -> bool {
        self.option_data
            .iter()
            .any(|section| section.kind == SectionKind::Hierarchies)
    }

    pub const fn last_config(&self) -> Option<&RenderConfiguration> {
        self.last_config.as_ref()
    }

    pub const fn render_count(&self) -> usize {
        self.render_count
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a fetch is in flight whose tree has not arrived yet.
    pub fn is_loading(&self) -> bool {
        self.fetch_task.is_some()
            && self
                .inputs
                .tree
                .as_ref()
                .map_or(true, |loaded| loaded.generation != self.generation)
    }

    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl<O: DiagramOrganizer> Drop for ArchViewerController<O> {
    fn drop(&mut self) {
        self.dispose();
    }
}

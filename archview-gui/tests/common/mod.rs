#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use archview_core::{
    ArchNode, ArchPonent, ArchRoute, ArchTree, ArchTreeType, ArchViewerHierarchy, Error,
    ProjectConfig, ProjectDump, RelatedFrom, StaticTreeProvider, TreeDataProvider,
};
use archview_gui::services::QueuedNavigator;
use archview_gui::{ArchViewerController, ArchViewerOptionsService};
use archview_viz::{
    DiagramElementFeature, DiagramOrganizer, DotOrganizer, InteractionHandler, LayoutOptions,
    NodeMapper, TraversalHook, VizResult,
};
use async_trait::async_trait;
use tokio::runtime::Handle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizerCall {
    Clear,
    Draw { tree: String, layout: LayoutOptions },
    Toggle(String),
}

/// Dot organizer that records every call made through the organizer seam.
#[derive(Default)]
pub struct RecordingOrganizer {
    inner: DotOrganizer,
    calls: Vec<OrganizerCall>,
}

impl RecordingOrganizer {
    pub fn calls(&self) -> &[OrganizerCall] {
        &self.calls
    }

    pub fn draws(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                OrganizerCall::Draw { tree, .. } => Some(tree.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn inner(&self) -> &DotOrganizer {
        &self.inner
    }
}

impl DiagramOrganizer for RecordingOrganizer {
    fn add_feature(&mut self, feature: DiagramElementFeature, handler: InteractionHandler) {
        self.inner.add_feature(feature, handler);
    }

    fn clear(&mut self) {
        self.calls.push(OrganizerCall::Clear);
        self.inner.clear();
    }

    fn draw_arch_tree_with_layout(
        &mut self,
        tree: &ArchTree,
        traverse: Option<TraversalHook<'_>>,
        map_node: NodeMapper,
        layout: &LayoutOptions,
    ) -> VizResult<()> {
        self.calls.push(OrganizerCall::Draw {
            tree: tree.name.clone(),
            layout: layout.clone(),
        });
        self.inner
            .draw_arch_tree_with_layout(tree, traverse, map_node, layout)
    }

    fn toggle_collapsed_children(&mut self, node_id: &str) -> VizResult<()> {
        self.calls.push(OrganizerCall::Toggle(node_id.to_string()));
        self.inner.toggle_collapsed_children(node_id)
    }
}

/// Provider whose backend is down.
pub struct FailingProvider;

#[async_trait]
impl TreeDataProvider for FailingProvider {
    async fn get_arch_tree_by_type(&self, _tree_type: ArchTreeType) -> archview_core::Result<Option<ArchTree>> {
        Err(Error::Provider("connection refused".to_string()))
    }
}

fn module(id: &str, name: &str) -> ArchNode {
    ArchNode::new(
        id,
        ArchPonent::Module {
            name: name.to_string(),
        },
    )
}

pub fn injector_tree() -> ArchTree {
    let root = ArchNode::new(
        "root-injector",
        ArchPonent::Injector {
            name: "AppModule".to_string(),
        },
    )
    .with_children(vec![ArchNode::new(
        "api",
        ArchPonent::Provider {
            token: "ApiService".to_string(),
        },
    )
    .related_from(RelatedFrom::Providers)]);
    ArchTree::new("Injectors", Some(root))
}

pub fn dependency_tree() -> ArchTree {
    let root = ArchNode::new(
        "api-service",
        ArchPonent::Provider {
            token: "ApiService".to_string(),
        },
    );
    ArchTree::new("Dependencies", Some(root))
}

pub fn routing_tree() -> ArchTree {
    let root = module("app", "AppModule").with_children(vec![
        ArchNode::new(
            "home",
            ArchPonent::Route(ArchRoute {
                path: "home".to_string(),
                component: Some("HomeComponent".to_string()),
                ..ArchRoute::default()
            }),
        )
        .related_from(RelatedFrom::Routes),
        module("shared", "SharedModule")
            .related_from(RelatedFrom::Imports)
            .with_children(vec![ArchNode::new(
                "button",
                ArchPonent::Component {
                    name: "ButtonComponent".to_string(),
                    selector: Some("app-button".to_string()),
                },
            )
            .related_from(RelatedFrom::Declarations)]),
    ]);
    ArchTree::new("Routes", Some(root))
}

pub fn component_tree() -> ArchTree {
    let root = ArchNode::new(
        "app-root",
        ArchPonent::Component {
            name: "AppComponent".to_string(),
            selector: Some("app-root".to_string()),
        },
    );
    ArchTree::new("Components", Some(root))
}

pub fn valid_config() -> ProjectConfig {
    ProjectConfig {
        name: Some("demo".to_string()),
        root_dir: Some("/work/demo".into()),
        ts_config: Some("/work/demo/tsconfig.json".into()),
        source_dirs: vec!["src".into()],
    }
}

/// Every tree type except `Full`, which is present but rootless.
pub fn demo_dump() -> ProjectDump {
    let mut trees = BTreeMap::new();
    trees.insert(ArchTreeType::Injector, injector_tree());
    trees.insert(ArchTreeType::ServiceDependency, dependency_tree());
    trees.insert(ArchTreeType::Routing, routing_tree());
    trees.insert(ArchTreeType::Component, component_tree());
    trees.insert(ArchTreeType::Full, ArchTree::new("Full", None));
    ProjectDump {
        name: "demo".to_string(),
        config: Some(valid_config()),
        trees,
    }
}

pub fn demo_provider() -> Arc<dyn TreeDataProvider> {
    Arc::new(StaticTreeProvider::new(demo_dump()))
}

pub struct Harness {
    pub controller: ArchViewerController<RecordingOrganizer>,
    pub options: Arc<ArchViewerOptionsService>,
    pub navigator: Arc<QueuedNavigator>,
}

pub fn harness_with(
    content_hierarchy: Option<ArchViewerHierarchy>,
    provider: Arc<dyn TreeDataProvider>,
) -> Harness {
    let options = Arc::new(ArchViewerOptionsService::default());
    let navigator = Arc::new(QueuedNavigator::new(content_hierarchy));
    let controller = ArchViewerController::new(
        RecordingOrganizer::default(),
        Arc::clone(&options),
        provider,
        navigator.clone(),
        Handle::current(),
    );
    Harness {
        controller,
        options,
        navigator,
    }
}

pub fn harness(content_hierarchy: Option<ArchViewerHierarchy>) -> Harness {
    harness_with(content_hierarchy, demo_provider())
}

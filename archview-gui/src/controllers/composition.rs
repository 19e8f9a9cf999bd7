//! Pure pieces of the arch viewer: which tree to fetch and what to draw.

use archview_core::{
    map_viewer_hierarchy_to_arch_tree, ArchTree, ArchTreeType, ArchViewerExtraContent,
    ArchViewerHierarchy, ArchViewerNodeType, ArchViewerType, Orientation, TreeDataProvider,
};
use archview_viz::{LayoutFeature, LayoutOptions, NodeInfoLevel};
use serde::{Deserialize, Serialize};

/// Everything one draw pass needs, recomputed from scratch on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfiguration {
    pub hierarchy: ArchViewerHierarchy,
    pub tree_name: Option<String>,
    pub orientation: Orientation,
    pub node_type: ArchViewerNodeType,
    pub viewer_type: ArchViewerType,
    pub extra_content: ArchViewerExtraContent,
    pub layout: LayoutOptions,
    /// `false` when the tree is absent or has no root: clear only.
    pub draw: bool,
}

pub fn layout_options(
    hierarchy: ArchViewerHierarchy,
    orientation: Orientation,
    extra_content: ArchViewerExtraContent,
) -> LayoutOptions {
    let feature = if hierarchy == ArchViewerHierarchy::InjectorHierarchy {
        LayoutFeature::SecondaryLayerForInjector
    } else {
        LayoutFeature::None
    };
    let info_level = if extra_content == ArchViewerExtraContent::LayerServiceProvider {
        NodeInfoLevel::Detail
    } else {
        NodeInfoLevel::Basic
    };

    LayoutOptions {
        orientation,
        features: vec![feature],
        info_level,
    }
}

pub fn compose(
    hierarchy: ArchViewerHierarchy,
    tree: Option<&ArchTree>,
    orientation: Orientation,
    node_type: ArchViewerNodeType,
    viewer_type: ArchViewerType,
    extra_content: ArchViewerExtraContent,
) -> RenderConfiguration {
    RenderConfiguration {
        hierarchy,
        tree_name: tree.map(|tree| tree.name.clone()),
        orientation,
        node_type,
        viewer_type,
        extra_content,
        layout: layout_options(hierarchy, orientation, extra_content),
        draw: tree.is_some_and(|tree| !tree.is_empty()),
    }
}

/// A hierarchy fixed for the viewer wins over the selected one.
pub const fn resolve_hierarchy(
    content_hierarchy: Option<ArchViewerHierarchy>,
    selected: ArchViewerHierarchy,
) -> (ArchViewerHierarchy, ArchTreeType) {
    let hierarchy = match content_hierarchy {
        Some(hierarchy) => hierarchy,
        None => selected,
    };
    (hierarchy, map_viewer_hierarchy_to_arch_tree(hierarchy))
}

/// Resolve the hierarchy and fetch its tree.
///
/// A provider failure is logged and yields no tree.
pub async fn resolve_tree(
    provider: &dyn TreeDataProvider,
    content_hierarchy: Option<ArchViewerHierarchy>,
    selected: ArchViewerHierarchy,
) -> (ArchViewerHierarchy, Option<ArchTree>) {
    let (hierarchy, tree_type) = resolve_hierarchy(content_hierarchy, selected);

    match provider.get_arch_tree_by_type(tree_type).await {
        Ok(tree) => (hierarchy, tree),
        Err(e) => {
            tracing::warn!(%hierarchy, %tree_type, error = %e, "tree fetch failed");
            (hierarchy, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archview_core::{ArchNode, ArchPonent, ProjectDump, StaticTreeProvider};
    use proptest::prelude::*;
    use proptest::sample::select;

    fn tree() -> ArchTree {
        ArchTree::new(
            "AppModule",
            Some(ArchNode::new(
                "app",
                ArchPonent::Module {
                    name: "AppModule".to_string(),
                },
            )),
        )
    }

    #[test]
    fn test_layout_for_injector_hierarchy() {
        let layout = layout_options(
            ArchViewerHierarchy::InjectorHierarchy,
            Orientation::TopToBottom,
            ArchViewerExtraContent::None,
        );
        assert_eq!(layout.features, vec![LayoutFeature::SecondaryLayerForInjector]);
        assert_eq!(layout.info_level, NodeInfoLevel::Basic);

        let layout = layout_options(
            ArchViewerHierarchy::DependencyDiagram,
            Orientation::LeftToRight,
            ArchViewerExtraContent::LayerServiceProvider,
        );
        assert_eq!(layout.features, vec![LayoutFeature::None]);
        assert_eq!(layout.info_level, NodeInfoLevel::Detail);
        assert_eq!(layout.orientation, Orientation::LeftToRight);
    }

    #[test]
    fn test_absent_or_rootless_tree_is_not_drawn() {
        let args = (
            ArchViewerHierarchy::RoutingHierarchy,
            Orientation::TopToBottom,
            ArchViewerNodeType::IncludeRoutes,
            ArchViewerType::Full,
            ArchViewerExtraContent::None,
        );
        let absent = compose(args.0, None, args.1, args.2, args.3, args.4);
        assert!(!absent.draw);
        assert_eq!(absent.tree_name, None);

        let rootless = ArchTree::new("Routes", None);
        let rootless = compose(args.0, Some(&rootless), args.1, args.2, args.3, args.4);
        assert!(!rootless.draw);
        assert_eq!(rootless.tree_name.as_deref(), Some("Routes"));

        let drawn = compose(args.0, Some(&tree()), args.1, args.2, args.3, args.4);
        assert!(drawn.draw);
    }

    #[test]
    fn test_content_hierarchy_overrides_selection() {
        assert_eq!(
            resolve_hierarchy(
                Some(ArchViewerHierarchy::RoutingHierarchy),
                ArchViewerHierarchy::InjectorHierarchy
            ),
            (ArchViewerHierarchy::RoutingHierarchy, ArchTreeType::Routing)
        );
        assert_eq!(
            resolve_hierarchy(None, ArchViewerHierarchy::DependencyDiagram),
            (
                ArchViewerHierarchy::DependencyDiagram,
                ArchTreeType::ServiceDependency
            )
        );
    }

    #[tokio::test]
    async fn test_resolve_tree_fetches_mapped_type() {
        let mut dump = ProjectDump {
            name: "demo".to_string(),
            config: None,
            trees: Default::default(),
        };
        dump.trees.insert(ArchTreeType::Component, tree());
        let provider = StaticTreeProvider::new(dump);

        let (hierarchy, fetched) = resolve_tree(
            &provider,
            Some(ArchViewerHierarchy::ComponentHierarchy),
            ArchViewerHierarchy::InjectorHierarchy,
        )
        .await;
        assert_eq!(hierarchy, ArchViewerHierarchy::ComponentHierarchy);
        assert_eq!(fetched, Some(tree()));

        let (_, missing) =
            resolve_tree(&provider, None, ArchViewerHierarchy::InjectorHierarchy).await;
        assert!(missing.is_none());
    }

    proptest! {
        #[test]
        fn prop_compose_is_pure(
            hierarchy in select(ArchViewerHierarchy::all()),
            orientation in select(Orientation::all()),
            node_type in select(ArchViewerNodeType::all()),
            viewer_type in select(ArchViewerType::all()),
            extra_content in select(ArchViewerExtraContent::all()),
            with_tree in any::<bool>(),
        ) {
            let tree = tree();
            let tree = with_tree.then_some(&tree);
            let first = compose(hierarchy, tree, orientation, node_type, viewer_type, extra_content);
            let second = compose(hierarchy, tree, orientation, node_type, viewer_type, extra_content);
            prop_assert_eq!(first, second);
        }
    }
}

use std::sync::{Arc, Mutex};

use archview_core::{ArchNode, ArchPonent, ArchRoute, ArchTree, Orientation, RelatedFrom};
use archview_viz::{
    map_diagram_tree_node, DiagramElementFeature, DiagramNode, DiagramOrganizer,
    DiagramTreeContext, DotOrganizer, Interaction, LayoutFeature, LayoutOptions, NodeInfoLevel,
    PonentActionPurpose, PonentActionScope, VizError,
};

fn routing_tree() -> ArchTree {
    let root = ArchNode::new(
        "app",
        ArchPonent::Module {
            name: "AppModule".to_string(),
        },
    )
    .with_children(vec![
        ArchNode::new(
            "home",
            ArchPonent::Route(ArchRoute {
                path: "home".to_string(),
                component: Some("HomeComponent".to_string()),
                ..ArchRoute::default()
            }),
        )
        .related_from(RelatedFrom::Routes),
        ArchNode::new(
            "shared",
            ArchPonent::Module {
                name: "SharedModule".to_string(),
            },
        )
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
    ArchTree::new("AppModule", Some(root))
}

fn injector_tree() -> ArchTree {
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

fn injector_layout() -> LayoutOptions {
    LayoutOptions {
        orientation: Orientation::TopToBottom,
        features: vec![LayoutFeature::SecondaryLayerForInjector],
        info_level: NodeInfoLevel::Basic,
    }
}

fn recorder(organizer: &mut DotOrganizer) -> Arc<Mutex<Vec<Interaction>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    for feature in [DiagramElementFeature::DblClick, DiagramElementFeature::ActionClick] {
        let sink = Arc::clone(&seen);
        organizer.add_feature(
            feature,
            Box::new(move |interaction| sink.lock().unwrap().push(interaction)),
        );
    }
    seen
}

#[test]
fn test_draw_renders_annotated_labels() {
    let mut organizer = DotOrganizer::new();
    organizer
        .draw_arch_tree_with_layout(
            &routing_tree(),
            None,
            map_diagram_tree_node,
            &LayoutOptions::default(),
        )
        .unwrap();

    let dot = organizer.output().unwrap();
    assert!(dot.starts_with("digraph \"AppModule\" {"));
    assert!(dot.contains("rankdir=TB;"));
    assert!(dot.contains("\"home\" [label=\"routes\\nhome\\n/home\""));
    assert!(dot.contains("\"app\" -> \"shared\";"));
    assert!(dot.contains("\"shared\" -> \"button\";"));
    assert!(!dot.contains("cluster_injector_layer"));
    assert_eq!(organizer.draw_count(), 1);
}

#[test]
fn test_layout_orientation_and_detail_level() {
    let mut organizer = DotOrganizer::new();
    let layout = LayoutOptions {
        orientation: Orientation::LeftToRight,
        features: vec![LayoutFeature::None],
        info_level: NodeInfoLevel::Detail,
    };
    organizer
        .draw_arch_tree_with_layout(&routing_tree(), None, map_diagram_tree_node, &layout)
        .unwrap();

    let dot = organizer.output().unwrap();
    assert!(dot.contains("rankdir=LR;"));
    assert!(dot.contains("AppModule\\n<module>"));
    assert_eq!(organizer.layout(), &layout);
}

#[test]
fn test_empty_tree_draws_nothing() {
    let mut organizer = DotOrganizer::new();
    organizer
        .draw_arch_tree_with_layout(
            &ArchTree::new("empty", None),
            None,
            map_diagram_tree_node,
            &LayoutOptions::default(),
        )
        .unwrap();

    assert!(organizer.output().is_none());
    assert_eq!(organizer.draw_count(), 0);
}

#[test]
fn test_clear_drops_previous_drawing() {
    let mut organizer = DotOrganizer::new();
    organizer
        .draw_arch_tree_with_layout(
            &routing_tree(),
            None,
            map_diagram_tree_node,
            &LayoutOptions::default(),
        )
        .unwrap();
    organizer.clear();

    assert!(organizer.output().is_none());
    assert!(organizer.context().is_none());
}

#[test]
fn test_traversal_hook_runs_before_annotation() {
    let mut organizer = DotOrganizer::new();
    let prune = |context: &mut DiagramTreeContext| {
        context.root.children.retain(|child| child.id != "shared");
    };
    organizer
        .draw_arch_tree_with_layout(
            &routing_tree(),
            Some(&prune),
            map_diagram_tree_node,
            &LayoutOptions::default(),
        )
        .unwrap();

    let ids: Vec<_> = organizer
        .visible_nodes()
        .into_iter()
        .map(|(depth, node)| (depth, node.id.as_str()))
        .collect();
    assert_eq!(ids, vec![(0, "app"), (1, "home")]);
    assert_eq!(
        organizer.context().unwrap().find("home").unwrap().top_line.as_deref(),
        Some("routes")
    );
}

#[test]
fn test_toggle_collapsed_children_hides_subtrees_without_routes() {
    let mut organizer = DotOrganizer::new();
    organizer
        .draw_arch_tree_with_layout(
            &routing_tree(),
            None,
            map_diagram_tree_node,
            &LayoutOptions::default(),
        )
        .unwrap();

    organizer.toggle_collapsed_children("app").unwrap();
    let dot = organizer.output().unwrap();
    assert!(!dot.contains("\"shared\" -> \"button\";"));
    assert!(dot.contains("SharedModule (+1)"));
    assert!(dot.contains("\"app\" -> \"home\";"));

    organizer.toggle_collapsed_children("app").unwrap();
    assert!(organizer.output().unwrap().contains("\"shared\" -> \"button\";"));

    assert!(matches!(
        organizer.toggle_collapsed_children("missing"),
        Err(VizError::NodeNotFound(_))
    ));
}

#[test]
fn test_injector_layer_cluster() {
    let mut organizer = DotOrganizer::new();
    organizer
        .draw_arch_tree_with_layout(&injector_tree(), None, map_diagram_tree_node, &injector_layout())
        .unwrap();

    let dot = organizer.output().unwrap();
    assert!(dot.contains("subgraph cluster_injector_layer {"));
    assert!(dot.contains("    \"api\";"));
    assert!(dot.contains("    \"root-injector\";"));
}

#[test]
fn test_double_click_reports_tagged_nodes() {
    let mut organizer = DotOrganizer::new();
    let seen = recorder(&mut organizer);
    organizer
        .draw_arch_tree_with_layout(&injector_tree(), None, map_diagram_tree_node, &injector_layout())
        .unwrap();

    organizer.double_click("api").unwrap();
    organizer.double_click("root-injector").unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    match &seen[0] {
        Interaction::DoubleClick(DiagramNode::Injector(node)) => {
            assert!(node.is_provider_node);
            assert_eq!(node.label, "ApiService");
        }
        other => panic!("unexpected interaction: {other:?}"),
    }
    match &seen[1] {
        Interaction::DoubleClick(DiagramNode::Injector(node)) => assert!(!node.is_provider_node),
        other => panic!("unexpected interaction: {other:?}"),
    }
}

#[test]
fn test_double_click_without_injector_layer_reports_diagram_node() {
    let mut organizer = DotOrganizer::new();
    let seen = recorder(&mut organizer);
    organizer
        .draw_arch_tree_with_layout(
            &injector_tree(),
            None,
            map_diagram_tree_node,
            &LayoutOptions::default(),
        )
        .unwrap();

    organizer.double_click("api").unwrap();
    assert!(matches!(
        seen.lock().unwrap()[0],
        Interaction::DoubleClick(DiagramNode::Diagram(_))
    ));
    assert!(matches!(
        organizer.double_click("nope"),
        Err(VizError::NodeNotFound(_))
    ));
}

#[test]
fn test_action_click_carries_scope_and_purpose() {
    let mut organizer = DotOrganizer::new();
    let seen = recorder(&mut organizer);
    organizer
        .draw_arch_tree_with_layout(
            &routing_tree(),
            None,
            map_diagram_tree_node,
            &LayoutOptions::default(),
        )
        .unwrap();

    organizer
        .action_click(
            "shared",
            PonentActionScope::NodeAction,
            PonentActionPurpose::ToggleCollapseChildren,
        )
        .unwrap();

    let seen = seen.lock().unwrap();
    match &seen[0] {
        Interaction::ActionClick(item) => {
            assert_eq!(item.scope, PonentActionScope::NodeAction);
            assert_eq!(item.purpose, PonentActionPurpose::ToggleCollapseChildren);
            assert_eq!(item.node.id(), "shared");
        }
        other => panic!("unexpected interaction: {other:?}"),
    }
}

#[test]
fn test_export_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.dot");

    let mut organizer = DotOrganizer::new().with_edge_labels(true);
    organizer
        .draw_arch_tree_with_layout(
            &routing_tree(),
            None,
            map_diagram_tree_node,
            &LayoutOptions::default(),
        )
        .unwrap();
    organizer.export_to_file(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"app\" -> \"shared\" [label=\"imports\"];"));
    assert_eq!(written, organizer.output().unwrap());
}

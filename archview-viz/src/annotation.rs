//! Per-node display annotations applied before a tree is drawn.

use archview_core::ArchPonent;

use crate::diagram_tree::DiagramTreeNode;

/// Annotate one diagram node.
///
/// A route node shows its short description as the bottom line. Every node
/// shows the relationship it was reached through as the top line.
pub fn map_diagram_tree_node(node: &mut DiagramTreeNode) {
    if let ArchPonent::Route(route) = &node.ponent {
        node.bottom_line = Some(route.short_description());
    }

    node.top_line = node.related_from_label().map(str::to_string);
}

#[cfg(test)]
mod tests {
    use super::*;
    use archview_core::{ArchNode, ArchRoute, RelatedFrom};
    use proptest::prelude::*;

    fn arb_ponent() -> impl Strategy<Value = ArchPonent> {
        prop_oneof![
            "[A-Z][a-z]{1,8}Module".prop_map(|name| ArchPonent::Module { name }),
            "[A-Z][a-z]{1,8}Component".prop_map(|name| ArchPonent::Component {
                name,
                selector: None
            }),
            ("[a-z]{0,6}", proptest::option::of("[a-z]{1,6}")).prop_map(|(path, redirect_to)| {
                ArchPonent::Route(ArchRoute {
                    path,
                    redirect_to,
                    ..ArchRoute::default()
                })
            }),
            "[A-Z][a-z]{1,8}Service".prop_map(|token| ArchPonent::Provider { token }),
        ]
    }

    fn arb_relation() -> impl Strategy<Value = Option<RelatedFrom>> {
        proptest::option::of(prop_oneof![
            Just(RelatedFrom::Imports),
            Just(RelatedFrom::Declarations),
            Just(RelatedFrom::Routes),
            Just(RelatedFrom::Children),
            Just(RelatedFrom::Providers),
        ])
    }

    fn arb_arch_node() -> impl Strategy<Value = ArchNode> {
        let leaf = ("[a-z]{1,6}", arb_ponent(), arb_relation()).prop_map(|(id, ponent, rel)| {
            let mut node = ArchNode::new(id, ponent);
            node.related_from = rel;
            node
        });
        leaf.prop_recursive(3, 24, 4, |inner| {
            ("[a-z]{1,6}", arb_ponent(), arb_relation(), prop::collection::vec(inner, 0..4))
                .prop_map(|(id, ponent, rel, children)| {
                    let mut node = ArchNode::new(id, ponent).with_children(children);
                    node.related_from = rel;
                    node
                })
        })
    }

    fn annotate(node: &mut DiagramTreeNode) {
        node.for_each_mut(&mut map_diagram_tree_node);
    }

    #[test]
    fn test_route_gets_bottom_line() {
        let arch = ArchNode::new(
            "home",
            ArchPonent::Route(ArchRoute {
                path: "home".to_string(),
                ..ArchRoute::default()
            }),
        )
        .related_from(RelatedFrom::Routes);
        let mut node = DiagramTreeNode::from_arch_node(&arch);

        map_diagram_tree_node(&mut node);
        assert_eq!(node.bottom_line.as_deref(), Some("/home"));
        assert_eq!(node.top_line.as_deref(), Some("routes"));
    }

    #[test]
    fn test_non_route_has_no_bottom_line() {
        let arch = ArchNode::new(
            "shared",
            ArchPonent::Module {
                name: "SharedModule".to_string(),
            },
        );
        let mut node = DiagramTreeNode::from_arch_node(&arch);

        map_diagram_tree_node(&mut node);
        assert_eq!(node.bottom_line, None);
        assert_eq!(node.top_line, None);
    }

    proptest! {
        #[test]
        fn prop_annotation_is_idempotent(arch in arb_arch_node()) {
            let mut once = DiagramTreeNode::from_arch_node(&arch);
            annotate(&mut once);

            let mut twice = once.clone();
            annotate(&mut twice);

            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_annotation_leaves_structure_alone(arch in arb_arch_node()) {
            let pristine = DiagramTreeNode::from_arch_node(&arch);
            let mut annotated = pristine.clone();
            annotate(&mut annotated);

            let mut stripped = annotated;
            stripped.for_each_mut(&mut |node| {
                node.top_line = None;
                node.bottom_line = None;
            });
            prop_assert_eq!(stripped, pristine);
        }
    }
}

//! Property tests: determinism, clean self-comparison, symmetry, path shape.

mod common;

use proptest::prelude::*;

use objdelta_core::{DiffNode, MemberRecord, NodeState, ObjectDiffer, Value};

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::from),
        (-100i64..100).prop_map(Value::from),
        "[a-z]{1,6}".prop_map(Value::text),
    ]
}

/// Arbitrary acyclic value trees over all categories.
fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::sequence),
            prop::collection::btree_map("[a-z]{1,4}", inner.clone(), 0..4).prop_map(|entries| {
                Value::map(
                    entries
                        .into_iter()
                        .map(|(k, v)| (Value::text(k), v))
                        .collect(),
                )
            }),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4).prop_map(|members| {
                Value::composite(
                    "Gen",
                    members
                        .into_iter()
                        .map(|(name, value)| MemberRecord::new(name, value))
                        .collect(),
                )
            }),
        ]
    })
}

/// Value trees whose sequences hold only scalars.
///
/// A structurally paired sequence element is addressed by the base side's
/// representation, so trees with aggregates inside sequences are not
/// path-symmetric under working/base swap; everything else is.
fn arb_symmetric_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        arb_scalar(),
        prop::collection::vec(arb_scalar(), 0..4).prop_map(Value::sequence),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::btree_map("[a-z]{1,4}", inner.clone(), 0..4).prop_map(|entries| {
                Value::map(
                    entries
                        .into_iter()
                        .map(|(k, v)| (Value::text(k), v))
                        .collect(),
                )
            }),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..4).prop_map(|members| {
                Value::composite(
                    "Gen",
                    members
                        .into_iter()
                        .map(|(name, value)| MemberRecord::new(name, value))
                        .collect(),
                )
            }),
        ]
    })
}

fn flip(state: NodeState) -> NodeState {
    match state {
        NodeState::Added => NodeState::Removed,
        NodeState::Removed => NodeState::Added,
        other => other,
    }
}

fn collect_shape(node: &DiffNode, into: &mut Vec<(String, NodeState)>) {
    into.push((node.path.to_string(), node.state));
    for child in &node.children {
        collect_shape(child, into);
    }
}

fn assert_child_paths_extend(node: &DiffNode) {
    for child in &node.children {
        assert!(child.path.starts_with(&node.path));
        assert!(child.path.len() > node.path.len());
        assert_child_paths_extend(child);
    }
}

proptest! {
    #[test]
    fn prop_comparison_is_deterministic(working in arb_value(), base in arb_value()) {
        let differ = ObjectDiffer::new();
        let first = differ.compare(&working, &base).unwrap();
        let second = differ.compare(&working, &base).unwrap();

        prop_assert_eq!(&first, &second);
        // serialized form is identical too
        let a = serde_json::to_string(&first).unwrap();
        let b = serde_json::to_string(&second).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_self_comparison_is_clean(value in arb_value()) {
        let copy = common::deep_clone(&value);
        let node = ObjectDiffer::new().compare(&value, &copy).unwrap();

        prop_assert_eq!(node.state, NodeState::Untouched);
        prop_assert!(!node.has_changes());
        prop_assert!(node.nodes_with_state(NodeState::Added).is_empty());
        prop_assert!(node.nodes_with_state(NodeState::Removed).is_empty());
        prop_assert!(node.nodes_with_state(NodeState::Changed).is_empty());
    }

    #[test]
    fn prop_aliased_self_comparison_is_clean(value in arb_value()) {
        let node = ObjectDiffer::new().compare(&value, &value).unwrap();
        prop_assert_eq!(node.state, NodeState::Untouched);
        prop_assert!(!node.has_changes());
    }

    #[test]
    fn prop_swapping_sides_flips_added_and_removed(
        working in arb_symmetric_value(),
        base in arb_symmetric_value(),
    ) {
        let differ = ObjectDiffer::new();
        let forward = differ.compare(&working, &base).unwrap();
        let backward = differ.compare(&base, &working).unwrap();

        let mut forward_shape = Vec::new();
        collect_shape(&forward, &mut forward_shape);
        forward_shape.sort();

        let mut backward_shape: Vec<(String, NodeState)> = Vec::new();
        collect_shape(&backward, &mut backward_shape);
        for entry in &mut backward_shape {
            entry.1 = flip(entry.1);
        }
        backward_shape.sort();

        prop_assert_eq!(forward_shape, backward_shape);
    }

    #[test]
    fn prop_child_paths_extend_parent_paths(working in arb_value(), base in arb_value()) {
        let node = ObjectDiffer::new().compare(&working, &base).unwrap();
        assert_child_paths_extend(&node);
    }

    #[test]
    fn prop_rendered_paths_round_trip(working in arb_value(), base in arb_value()) {
        let node = ObjectDiffer::new().compare(&working, &base).unwrap();
        let mut shape = Vec::new();
        collect_shape(&node, &mut shape);
        for (rendered, _) in shape {
            let parsed = objdelta_core::NodePath::parse(&rendered).unwrap();
            prop_assert_eq!(parsed.to_string(), rendered);
        }
    }
}

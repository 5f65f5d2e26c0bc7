//! Composite member comparison tests, including introspector failure recovery.

mod common;

use std::sync::Arc;

use common::{location, person};
use objdelta_core::{
    FieldIntrospector, InspectionPolicy, IntrospectError, Introspector, MemberRecord, NodeState,
    ObjectDiffer, Value,
};

#[test]
fn test_changed_member_is_reported_at_member_path() {
    let working = person("a", vec![]);
    let base = person("b", vec![]);

    let node = ObjectDiffer::new().compare(&working, &base).unwrap();

    assert_eq!(node.state, NodeState::Untouched);
    assert!(node.has_changes());
    let changed = node.nodes_with_state(NodeState::Changed);
    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].path.to_string(), "/name");
    assert_eq!(changed[0].value_type, "text");
}

#[test]
fn test_member_present_on_one_side_only() {
    let working = Value::composite(
        "Person",
        vec![
            MemberRecord::new("name", Value::text("a")),
            MemberRecord::new("nickname", Value::text("al")),
        ],
    );
    let base = Value::composite("Person", vec![MemberRecord::new("name", Value::text("a"))]);

    let node = ObjectDiffer::new().compare(&working, &base).unwrap();
    assert_eq!(node.children.len(), 1);
    assert_eq!(node.children[0].path.to_string(), "/nickname");
    assert_eq!(node.children[0].state, NodeState::Added);

    let node = ObjectDiffer::new().compare(&base, &working).unwrap();
    assert_eq!(node.children[0].state, NodeState::Removed);
}

#[test]
fn test_one_side_absent_composite_is_not_descended_by_default() {
    let working = person("a", vec![location("x")]);

    let node = ObjectDiffer::new().compare(&working, &Value::Absent).unwrap();
    assert_eq!(node.state, NodeState::Added);
    assert!(node.children.is_empty());
    assert_eq!(node.value_type, "Person");
}

#[test]
fn test_descend_into_added_expands_members() {
    let working = Value::composite(
        "Person",
        vec![MemberRecord::new("name", Value::text("a"))],
    );

    let policy = InspectionPolicy::builder().descend_into_added(true).build();
    let node = ObjectDiffer::with_policy(policy)
        .compare(&working, &Value::Absent)
        .unwrap();

    assert_eq!(node.state, NodeState::Added);
    assert_eq!(node.children.len(), 1);
    assert_eq!(node.children[0].path.to_string(), "/name");
    assert_eq!(node.children[0].state, NodeState::Added);
}

#[test]
fn test_ignored_member_is_dropped_by_default() {
    let working = Value::composite(
        "Person",
        vec![
            MemberRecord::new("name", Value::text("a")),
            MemberRecord::new("cache", Value::text("x")).ignored(),
        ],
    );
    let base = Value::composite(
        "Person",
        vec![
            MemberRecord::new("name", Value::text("a")),
            MemberRecord::new("cache", Value::text("y")).ignored(),
        ],
    );

    let node = ObjectDiffer::new().compare(&working, &base).unwrap();
    assert!(!node.has_changes());
    assert!(node.node_at(&node.path.field("cache")).is_none());
}

#[test]
fn test_ignored_member_is_kept_on_request_without_descent() {
    let working = Value::composite(
        "Person",
        vec![MemberRecord::new("cache", Value::text("x")).ignored()],
    );
    let base = Value::composite(
        "Person",
        vec![MemberRecord::new("cache", Value::text("y")).ignored()],
    );

    let policy = InspectionPolicy::builder().return_ignored_nodes(true).build();
    let node = ObjectDiffer::with_policy(policy).compare(&working, &base).unwrap();

    assert_eq!(node.children.len(), 1);
    let ignored = &node.children[0];
    assert_eq!(ignored.state, NodeState::Ignored);
    assert!(ignored.children.is_empty());
    // an ignored node is never a change
    assert!(!node.has_changes());
}

/// Introspector that fails for one composite type and delegates otherwise.
struct FailingFor {
    type_name: String,
}

impl Introspector for FailingFor {
    fn introspect(&self, value: &Value) -> Result<Vec<MemberRecord>, IntrospectError> {
        if value.type_name() == self.type_name {
            return Err(IntrospectError::new(format!(
                "members of '{}' are not accessible",
                self.type_name
            )));
        }
        FieldIntrospector.introspect(value)
    }
}

#[test]
fn test_inaccessible_member_does_not_abort_siblings() {
    let vault = |token: &str| {
        Value::composite(
            "Vault",
            vec![MemberRecord::new("token", Value::text(token))],
        )
    };
    let working = Value::composite(
        "Account",
        vec![
            MemberRecord::new("name", Value::text("a")),
            MemberRecord::new("vault", vault("t1")),
        ],
    );
    let base = Value::composite(
        "Account",
        vec![
            MemberRecord::new("name", Value::text("b")),
            MemberRecord::new("vault", vault("t2")),
        ],
    );

    let differ = ObjectDiffer::with_parts(
        InspectionPolicy::default(),
        Arc::new(FailingFor {
            type_name: "Vault".to_string(),
        }),
    );
    let node = differ.compare(&working, &base).unwrap();

    // the vault is surfaced as inaccessible, the sibling change still lands
    let inaccessible = node.nodes_with_state(NodeState::Inaccessible);
    assert_eq!(inaccessible.len(), 1);
    assert_eq!(inaccessible[0].path.to_string(), "/vault");
    assert!(inaccessible[0].children.is_empty());

    let changed = node.nodes_with_state(NodeState::Changed);
    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].path.to_string(), "/name");
}

#[test]
fn test_equal_composites_produce_clean_tree() {
    let working = person("a", vec![location("x")]);
    let base = common::deep_clone(&working);

    let node = ObjectDiffer::new().compare(&working, &base).unwrap();
    assert_eq!(node.state, NodeState::Untouched);
    assert!(!node.has_changes());
    assert!(node.children.is_empty());
}

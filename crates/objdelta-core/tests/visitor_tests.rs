//! Visitor tests: pre-order traversal, transient value resolution, reports.

mod common;

use common::{printed_diff, text_map, texts};
use objdelta_core::visit::resolve_path;
use objdelta_core::{
    ChangeCollector, MemberRecord, NodePath, NodeState, ObjectDiffer, PrintingVisitor, Value,
};

#[test]
fn test_printed_added_line_is_bit_exact() {
    assert_eq!(
        printed_diff(&texts(&["a", "b", "c"]), &texts(&["a", "b"])),
        "Property at path '/[c]' has been added => [ c ]\n"
    );
}

#[test]
fn test_printed_removed_line() {
    assert_eq!(
        printed_diff(&texts(&["a"]), &texts(&["a", "x"])),
        "Property at path '/[x]' has been removed => [ x ]\n"
    );
}

#[test]
fn test_printed_changed_line() {
    let working = text_map(&[("a", Value::text("a"))]);
    let base = text_map(&[("a", Value::text("b"))]);
    assert_eq!(
        printed_diff(&working, &base),
        "Property at path '/{a}' has changed from [ b ] to [ a ]\n"
    );
}

#[test]
fn test_printed_report_for_identical_values() {
    let value = texts(&["a"]);
    assert_eq!(
        printed_diff(&value, &common::deep_clone(&value)),
        "Nothing has changed\n"
    );
}

#[test]
fn test_change_collector_gathers_paths_and_states() {
    let working = text_map(&[("kept", Value::text("v")), ("added", Value::text("x"))]);
    let base = text_map(&[("kept", Value::text("v")), ("dropped", Value::text("y"))]);

    let node = ObjectDiffer::new().compare(&working, &base).unwrap();
    let mut collector = ChangeCollector::new();
    node.visit(&mut collector);

    assert_eq!(collector.changes().len(), 2);
    assert_eq!(collector.state_at("/{added}"), Some(NodeState::Added));
    assert_eq!(collector.state_at("/{dropped}"), Some(NodeState::Removed));
    assert_eq!(collector.state_at("/{kept}"), None);
}

#[test]
fn test_visit_is_pre_order() {
    let working = Value::composite(
        "Person",
        vec![MemberRecord::new(
            "home",
            Value::composite(
                "Location",
                vec![MemberRecord::new("street", Value::text("s1"))],
            ),
        )],
    );
    let base = common::deep_clone(&working);
    if let Value::Composite(composite) = &base {
        if let Some(home) = composite.member("home") {
            if let Value::Composite(location) = &home.value {
                location.set_member(MemberRecord::new("street", Value::text("s2")));
            }
        }
    }

    let node = ObjectDiffer::new().compare(&working, &base).unwrap();

    struct Order(Vec<String>);
    impl objdelta_core::NodeVisitor for Order {
        fn node(&mut self, node: &objdelta_core::DiffNode, _: Option<&Value>, _: Option<&Value>) {
            self.0.push(node.path.to_string());
        }
    }
    let mut order = Order(Vec::new());
    node.visit(&mut order);

    assert_eq!(order.0, vec!["/", "/home", "/home/street"]);
}

#[test]
fn test_visitor_receives_resolved_values() {
    let working = text_map(&[("a", Value::text("new"))]);
    let base = text_map(&[("a", Value::text("old"))]);
    let node = ObjectDiffer::new().compare(&working, &base).unwrap();

    struct Capture(Vec<(String, Option<Value>, Option<Value>)>);
    impl objdelta_core::NodeVisitor for Capture {
        fn node(
            &mut self,
            node: &objdelta_core::DiffNode,
            working: Option<&Value>,
            base: Option<&Value>,
        ) {
            self.0
                .push((node.path.to_string(), working.cloned(), base.cloned()));
        }
    }
    let mut capture = Capture(Vec::new());
    node.visit_with_values(&working, &base, &mut capture);

    let entry = capture
        .0
        .iter()
        .find(|(path, _, _)| path == "/{a}")
        .expect("entry node visited");
    assert_eq!(entry.1, Some(Value::text("new")));
    assert_eq!(entry.2, Some(Value::text("old")));
}

#[test]
fn test_resolution_walks_composites_sequences_and_maps() {
    let root = Value::composite(
        "Person",
        vec![MemberRecord::new(
            "addresses",
            Value::sequence(vec![text_map(&[("city", Value::text("berlin"))])]),
        )],
    );

    let path = NodePath::root()
        .field("addresses")
        .item("{city=berlin}")
        .key("city");
    assert_eq!(resolve_path(&root, &path), Some(Value::text("berlin")));

    let missing = NodePath::root().field("addresses").item("{city=paris}");
    // single-element fallback still resolves the only element
    assert!(resolve_path(&root, &missing).is_some());
}

#[test]
fn test_unresolvable_value_renders_as_placeholder() {
    // visiting without roots yields no values; differences render with '?'
    let node = ObjectDiffer::new()
        .compare(&texts(&["a", "c"]), &texts(&["a"]))
        .unwrap();
    let mut visitor = PrintingVisitor::new();
    node.visit(&mut visitor);
    assert_eq!(
        visitor.output(),
        "Property at path '/[c]' has been added => [ ? ]\n"
    );
}

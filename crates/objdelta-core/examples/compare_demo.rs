//! Comparison API Demonstration
//!
//! This example demonstrates the ObjectDiffer entry point and the most common
//! policy configurations.
#![allow(clippy::unwrap_used, clippy::expect_used)]
//!
//! Key concepts illustrated:
//! 1. Building comparable value graphs
//! 2. Default comparison and the printed report
//! 3. Identity-based sequence reconciliation
//! 4. Policy configuration (exclusion, equals-only, primitive defaults)

use std::sync::Arc;

use objdelta_core::{
    InspectionPolicy, KeyedIdentity, MemberRecord, NodePath, ObjectDiffer, PrintingVisitor, Value,
};

fn person(name: &str, addresses: Vec<Value>) -> Value {
    Value::composite(
        "Person",
        vec![
            MemberRecord::new("name", Value::text(name)),
            MemberRecord::new("addresses", Value::sequence(addresses)),
        ],
    )
}

fn address(city: &str, street: &str) -> Value {
    Value::composite(
        "Address",
        vec![
            MemberRecord::new("city", Value::text(city)),
            MemberRecord::new("street", Value::text(street)),
        ],
    )
}

fn print_report(title: &str, working: &Value, base: &Value, differ: &ObjectDiffer) {
    let node = differ.compare(working, base).expect("comparison succeeds");
    let mut visitor = PrintingVisitor::new();
    node.visit_with_values(working, base, &mut visitor);
    println!("## {}\n", title);
    print!("{}", visitor.output());
    println!();
}

fn main() {
    println!("=== objdelta Compare Demo ===\n");

    // ===== Part 1: Default comparison =====
    let working = person("alice", vec![address("berlin", "unter den linden")]);
    let base = person("alice", vec![address("berlin", "friedrichstrasse")]);

    print_report(
        "Part 1: Default comparison",
        &working,
        &base,
        &ObjectDiffer::new(),
    );

    // ===== Part 2: Identity-based sequence reconciliation =====
    // Addresses are matched by city, so a street change is a local edit
    // instead of a remove/add pair.
    let policy = InspectionPolicy::builder()
        .with_identity_at(
            NodePath::root().field("addresses"),
            Arc::new(KeyedIdentity::new("city")),
        )
        .build();

    let working = person(
        "alice",
        vec![
            address("berlin", "unter den linden"),
            address("paris", "rue de rivoli"),
        ],
    );
    let base = person(
        "alice",
        vec![
            address("paris", "rue de rivoli"),
            address("berlin", "friedrichstrasse"),
        ],
    );

    print_report(
        "Part 2: Addresses matched by city",
        &working,
        &base,
        &ObjectDiffer::with_policy(policy),
    );

    // ===== Part 3: Excluding a subtree =====
    let policy = InspectionPolicy::builder()
        .without_path(NodePath::root().field("addresses"))
        .build();

    let working = person("alice", vec![address("berlin", "a")]);
    let base = person("bob", vec![address("berlin", "b")]);

    print_report(
        "Part 3: Address changes excluded",
        &working,
        &base,
        &ObjectDiffer::with_policy(policy),
    );

    // ===== Part 4: Equals-only collapse =====
    let policy = InspectionPolicy::builder()
        .with_equals_only_type("Address")
        .build();

    let working = person("alice", vec![address("berlin", "a")]);
    let base = person("alice", vec![address("berlin", "b")]);

    print_report(
        "Part 4: Addresses compared as atoms",
        &working,
        &base,
        &ObjectDiffer::with_policy(policy),
    );
}

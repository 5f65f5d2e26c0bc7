use objdelta_core::{MemberRecord, ObjectDiffer, PrintingVisitor, Value};

/// Build a Location composite with the given address
#[allow(dead_code)]
pub fn location(address: &str) -> Value {
    Value::composite(
        "Location",
        vec![MemberRecord::new("address", Value::text(address))],
    )
}

/// Build a Person composite with a name and a list of locations
#[allow(dead_code)]
pub fn person(name: &str, locations: Vec<Value>) -> Value {
    Value::composite(
        "Person",
        vec![
            MemberRecord::new("name", Value::text(name)),
            MemberRecord::new("locations", Value::sequence(locations)),
        ],
    )
}

/// Build a sequence of text values
#[allow(dead_code)]
pub fn texts(items: &[&str]) -> Value {
    Value::sequence(items.iter().map(|s| Value::text(*s)).collect())
}

/// Build a map with text keys
#[allow(dead_code)]
pub fn text_map(entries: &[(&str, Value)]) -> Value {
    Value::map(
        entries
            .iter()
            .map(|(k, v)| (Value::text(*k), v.clone()))
            .collect(),
    )
}

/// Compare with the default engine and render the printed report
#[allow(dead_code)]
pub fn printed_diff(working: &Value, base: &Value) -> String {
    let differ = ObjectDiffer::new();
    let node = differ.compare(working, base).expect("comparison succeeds");
    let mut visitor = PrintingVisitor::new();
    node.visit_with_values(working, base, &mut visitor);
    visitor.output()
}

/// Rebuild a value tree with fresh aggregate allocations (same structure,
/// distinct identities). Only safe for acyclic values.
#[allow(dead_code)]
pub fn deep_clone(value: &Value) -> Value {
    match value {
        Value::Sequence(seq) => {
            Value::sequence(seq.elements().iter().map(deep_clone).collect())
        }
        Value::Map(map) => Value::map(
            map.entries()
                .iter()
                .map(|(k, v)| (deep_clone(k), deep_clone(v)))
                .collect(),
        ),
        Value::Composite(composite) => Value::composite(
            composite.type_name(),
            composite
                .members()
                .into_iter()
                .map(|mut member| {
                    member.value = deep_clone(&member.value);
                    member
                })
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

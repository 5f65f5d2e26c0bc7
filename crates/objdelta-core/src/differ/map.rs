//! Map differ: key-exact reconciliation over the union of both key sets
//!
//! Keys are compared by exact value equality, never by identity strategy — a
//! renamed key is one `Removed` plus one `Added`, never a `Changed`. Identity
//! strategies remain path-scoped, so they apply to collections nested inside
//! map values.

use crate::errors::Result;
use crate::model::member::MemberMeta;
use crate::model::Value;
use crate::node::{DiffNode, NodeState};
use crate::path::NodePath;

use super::DifferDispatcher;

fn entries_of(value: &Value) -> Vec<(Value, Value)> {
    match value {
        Value::Map(map) => map.entries(),
        _ => Vec::new(),
    }
}

/// Compare two maps (an absent side reads as empty).
///
/// Children are emitted for working entries in entry order, then base-only
/// entries in base order, each at path `{key}`.
pub(crate) fn compare_maps(
    dispatcher: &DifferDispatcher<'_>,
    path: NodePath,
    working: &Value,
    base: &Value,
    meta: &MemberMeta,
) -> Result<DiffNode> {
    let value_type = if working.is_absent() {
        base.type_name()
    } else {
        working.type_name()
    };
    let working_entries = entries_of(working);
    let base_entries = entries_of(base);

    let mut node = DiffNode::new(path.clone(), value_type, NodeState::Untouched);
    let child_meta = MemberMeta::inherited(meta.categories.clone());

    for (key, working_value) in &working_entries {
        let child_path = path.key(key.canonical_repr());
        let base_value = base_entries
            .iter()
            .find(|(base_key, _)| base_key == key)
            .map(|(_, v)| v.clone())
            .unwrap_or(Value::Absent);
        let child = dispatcher.dispatch(child_path, working_value, &base_value, &child_meta)?;
        if dispatcher.policy().is_returnable(&child) {
            node.children.push(child);
        }
    }

    for (key, base_value) in &base_entries {
        if working_entries.iter().any(|(wk, _)| wk == key) {
            continue;
        }
        let child_path = path.key(key.canonical_repr());
        let child = dispatcher.dispatch(child_path, &Value::Absent, base_value, &child_meta)?;
        if dispatcher.policy().is_returnable(&child) {
            node.children.push(child);
        }
    }

    Ok(node)
}

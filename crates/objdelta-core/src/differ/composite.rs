//! Composite differ: member-wise comparison through the introspector
//!
//! Members are compared in working-side declaration order, then base-only
//! members; a member missing on one side compares as absent. Member metadata
//! (categories, ignored/equals-only markers, primitive flag, identity
//! override) flows into the child node's policy decisions.

use crate::errors::Result;
use crate::model::member::MemberMeta;
use crate::model::{MemberRecord, Value};
use crate::node::{DiffNode, NodeState};
use crate::path::NodePath;

use super::DifferDispatcher;

/// Compare two composites (an absent side reads as empty).
///
/// If the introspector cannot enumerate either side's members, the node is
/// reported `Inaccessible` and comparison continues for its siblings.
pub(crate) fn compare_composites(
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

    let working_members = match members_of(dispatcher, working) {
        Ok(members) => members,
        Err(node) => return Ok(node.finish(path, value_type)),
    };
    let base_members = match members_of(dispatcher, base) {
        Ok(members) => members,
        Err(node) => return Ok(node.finish(path, value_type)),
    };

    let mut node = DiffNode::new(path.clone(), value_type, NodeState::Untouched);

    for member in &working_members {
        let base_value = base_members
            .iter()
            .find(|m| m.name == member.name)
            .map(|m| m.value.clone())
            .unwrap_or(Value::Absent);
        let child_path = path.field(&member.name);
        let child_meta = member.meta().inherit_categories(&meta.categories);
        let child = dispatcher.dispatch(child_path, &member.value, &base_value, &child_meta)?;
        if dispatcher.policy().is_returnable(&child) {
            node.children.push(child);
        }
    }

    for member in &base_members {
        if working_members.iter().any(|m| m.name == member.name) {
            continue;
        }
        let child_path = path.field(&member.name);
        let child_meta = member.meta().inherit_categories(&meta.categories);
        let child = dispatcher.dispatch(child_path, &Value::Absent, &member.value, &child_meta)?;
        if dispatcher.policy().is_returnable(&child) {
            node.children.push(child);
        }
    }

    Ok(node)
}

/// Marker for a failed introspection, turned into an `Inaccessible` node.
struct Inaccessible;

impl Inaccessible {
    fn finish(self, path: NodePath, value_type: String) -> DiffNode {
        DiffNode::new(path, value_type, NodeState::Inaccessible)
    }
}

fn members_of(
    dispatcher: &DifferDispatcher<'_>,
    value: &Value,
) -> std::result::Result<Vec<MemberRecord>, Inaccessible> {
    if value.is_absent() {
        return Ok(Vec::new());
    }
    match dispatcher.introspector().introspect(value) {
        Ok(members) => Ok(members),
        Err(err) => {
            tracing::warn!(
                component = module_path!(),
                value_type = %value.type_name(),
                reason = %err.message,
                "introspection failed; reporting node as inaccessible"
            );
            Err(Inaccessible)
        }
    }
}

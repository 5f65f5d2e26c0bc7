//! Value differ: atomic comparison via the equality strategy

use crate::errors::{DiffError, Result};
use crate::model::member::MemberMeta;
use crate::model::Value;
use crate::node::{DiffNode, NodeState};
use crate::path::NodePath;
use crate::policy::PrimitiveDefaultMode;

use super::DifferDispatcher;

/// Compare an atomic pair (both sides present).
///
/// Unequal primitive members honor the primitive-default mode: in
/// `Unassigned` mode a zero-default base reads as "previously unset" and the
/// transition is reported `Added` (and symmetrically `Removed`), because the
/// source of such a member cannot distinguish "never set" from "set to the
/// default".
pub(crate) fn compare_values(
    dispatcher: &DifferDispatcher<'_>,
    path: NodePath,
    working: &Value,
    base: &Value,
    meta: &MemberMeta,
) -> Result<DiffNode> {
    let equal = dispatcher
        .policy()
        .equality()
        .equal(working, base)
        .map_err(|e| DiffError::EqualityStrategyFailed {
            path: path.clone(),
            reason: e.message,
        })?;

    let state = if equal {
        NodeState::Untouched
    } else if meta.primitive
        && dispatcher.policy().primitive_default_mode() == PrimitiveDefaultMode::Unassigned
    {
        if base.is_zero_default() {
            NodeState::Added
        } else if working.is_zero_default() {
            NodeState::Removed
        } else {
            NodeState::Changed
        }
    } else {
        NodeState::Changed
    };

    Ok(DiffNode::new(path, working.type_name(), state))
}

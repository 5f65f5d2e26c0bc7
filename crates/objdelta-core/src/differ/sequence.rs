//! Sequence differ: identity-based reconciliation, not positional comparison
//!
//! Two elements at different indices are "the same" element when the
//! applicable identity strategy says so. Matching is greedy: each working
//! element takes the first unmatched base element that satisfies the
//! strategy. Child nodes are keyed by element content, so rendered paths are
//! stable across reorderings.

use std::collections::HashSet;

use crate::errors::{DiffError, Result};
use crate::model::member::MemberMeta;
use crate::model::{Category, Value};
use crate::node::{DiffNode, NodeState};
use crate::path::NodePath;

use super::DifferDispatcher;

fn elements_of(value: &Value) -> Vec<Value> {
    match value {
        Value::Sequence(seq) => seq.elements(),
        _ => Vec::new(),
    }
}

/// Compare two sequences (an absent side reads as empty).
///
/// Pass 1 pairs elements via the identity strategy. Pass 2 runs only under
/// the default equality identity: a leftover working aggregate pairs with the
/// first leftover base aggregate of the same category and is recursed into,
/// so a nested difference is localized instead of surfacing as a whole
/// add/remove pair. A custom identity's verdict is final and skips pass 2.
///
/// Emission order: matched pairs in working order, added elements in working
/// order, removed elements in base order. A matched pair's path element uses
/// the base element's canonical representation (the reference snapshot).
pub(crate) fn compare_sequences(
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
    let working_elements = elements_of(working);
    let base_elements = elements_of(base);

    let mut base_matched = vec![false; base_elements.len()];
    let mut pairs: Vec<(usize, usize)> = Vec::new();

    // pass 1: identity matching, first unmatched base element wins
    for (wi, w) in working_elements.iter().enumerate() {
        let identity = dispatcher
            .policy()
            .identity_for(&path, meta.identity.as_ref(), w);
        for (bi, b) in base_elements.iter().enumerate() {
            if base_matched[bi] {
                continue;
            }
            let matched =
                identity
                    .matches(w, b)
                    .map_err(|e| DiffError::IdentityStrategyFailed {
                        path: path.clone(),
                        reason: e.message,
                    })?;
            if matched {
                base_matched[bi] = true;
                pairs.push((wi, bi));
                break;
            }
        }
    }

    // pass 2: structural pairing of leftover aggregates (default identity only)
    let mut working_matched: HashSet<usize> = pairs.iter().map(|(wi, _)| *wi).collect();
    for (wi, w) in working_elements.iter().enumerate() {
        if working_matched.contains(&wi) {
            continue;
        }
        let w_category = Category::of(w);
        if !w_category.is_aggregate() {
            continue;
        }
        let identity = dispatcher
            .policy()
            .identity_for(&path, meta.identity.as_ref(), w);
        if !dispatcher.policy().is_default_identity(&identity) {
            continue;
        }
        for (bi, b) in base_elements.iter().enumerate() {
            if base_matched[bi] {
                continue;
            }
            if Category::of(b) == w_category {
                base_matched[bi] = true;
                working_matched.insert(wi);
                pairs.push((wi, bi));
                break;
            }
        }
    }

    pairs.sort_by_key(|(wi, _)| *wi);

    let mut node = DiffNode::new(path.clone(), value_type, NodeState::Untouched);
    let child_meta = MemberMeta::inherited(meta.categories.clone());

    // matched pairs, in working order
    for (wi, bi) in &pairs {
        let w = &working_elements[*wi];
        let b = &base_elements[*bi];
        let child_path = path.item(b.canonical_repr());
        let child = dispatcher.dispatch(child_path, w, b, &child_meta)?;
        if dispatcher.policy().is_returnable(&child) {
            node.children.push(child);
        }
    }

    // added working elements, in working order
    for (wi, w) in working_elements.iter().enumerate() {
        if working_matched.contains(&wi) {
            continue;
        }
        let child_path = path.item(w.canonical_repr());
        let child = dispatcher.dispatch(child_path, w, &Value::Absent, &child_meta)?;
        if dispatcher.policy().is_returnable(&child) {
            node.children.push(child);
        }
    }

    // removed base elements, in base order
    for (bi, b) in base_elements.iter().enumerate() {
        if base_matched[bi] {
            continue;
        }
        let child_path = path.item(b.canonical_repr());
        let child = dispatcher.dispatch(child_path, &Value::Absent, b, &child_meta)?;
        if dispatcher.policy().is_returnable(&child) {
            node.children.push(child);
        }
    }

    Ok(node)
}

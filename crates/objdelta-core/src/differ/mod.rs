//! Differ dispatch: the recursive comparison algorithm
//!
//! [`ObjectDiffer`] is the comparison entry point. Internally a
//! [`DifferDispatcher`] resolves each working/base pair's category, consults
//! the circularity tracker and the inspection policy, and delegates to the
//! category differ (value, sequence, map, composite), which builds a node and
//! recurses for children back through the dispatcher.

mod composite;
mod map;
mod sequence;
mod value;

use std::sync::Arc;
use std::time::Instant;

use objdelta_core_types::ComparisonId;

use crate::circularity::CircularityTracker;
use crate::errors::{DiffError, Result};
use crate::introspect::{FieldIntrospector, Introspector};
use crate::model::member::MemberMeta;
use crate::model::{Category, Value};
use crate::node::{DiffNode, NodeState};
use crate::path::NodePath;
use crate::policy::InspectionPolicy;
use crate::{log_op_end, log_op_error, log_op_start};

/// The comparison engine.
///
/// Holds a read-only policy and an introspector; both are shareable across
/// comparisons. Each `compare` call gets its own circularity tracker, so one
/// engine may serve concurrent comparisons.
pub struct ObjectDiffer {
    policy: InspectionPolicy,
    introspector: Arc<dyn Introspector>,
}

impl ObjectDiffer {
    /// Create an engine with the default policy and field introspector.
    pub fn new() -> Self {
        Self::with_policy(InspectionPolicy::default())
    }

    /// Create an engine with the given policy and the field introspector.
    pub fn with_policy(policy: InspectionPolicy) -> Self {
        Self {
            policy,
            introspector: Arc::new(FieldIntrospector),
        }
    }

    /// Create an engine with the given policy and introspector.
    pub fn with_parts(policy: InspectionPolicy, introspector: Arc<dyn Introspector>) -> Self {
        Self {
            policy,
            introspector,
        }
    }

    /// The engine's inspection policy.
    pub fn policy(&self) -> &InspectionPolicy {
        &self.policy
    }

    /// Compare `working` against `base`, rooted at the empty path.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::IdentityStrategyFailed`] or
    /// [`DiffError::EqualityStrategyFailed`] if a user-supplied strategy
    /// fails; no partial tree is returned in that case.
    pub fn compare(&self, working: &Value, base: &Value) -> Result<DiffNode> {
        self.compare_at(NodePath::root(), working, base)
    }

    /// Compare `working` against `base`, rooted at the given path.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ObjectDiffer::compare`].
    pub fn compare_at(&self, root: NodePath, working: &Value, base: &Value) -> Result<DiffNode> {
        let comparison_id = ComparisonId::new();
        log_op_start!("compare", comparison_id = %comparison_id, path = %root);
        let started = Instant::now();

        let dispatcher = DifferDispatcher {
            policy: &self.policy,
            introspector: self.introspector.as_ref(),
            tracker: CircularityTracker::new(),
        };
        let outcome = dispatcher.dispatch(root, working, base, &MemberMeta::default());
        let duration_ms = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(node) => {
                log_op_end!(
                    "compare",
                    duration_ms = duration_ms,
                    comparison_id = %comparison_id,
                    node_count = node.node_count()
                );
                Ok(node)
            }
            Err(err) => {
                log_op_error!(
                    "compare",
                    err,
                    duration_ms = duration_ms,
                    comparison_id = %comparison_id
                );
                Err(err)
            }
        }
    }
}

impl Default for ObjectDiffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-comparison dispatch state: policy, introspector and the circularity
/// tracker scoped to one top-level `compare` call.
pub(crate) struct DifferDispatcher<'a> {
    policy: &'a InspectionPolicy,
    introspector: &'a dyn Introspector,
    tracker: CircularityTracker,
}

impl DifferDispatcher<'_> {
    pub(crate) fn policy(&self) -> &InspectionPolicy {
        self.policy
    }

    pub(crate) fn introspector(&self) -> &dyn Introspector {
        self.introspector
    }

    /// Compare one working/base pair and build its subtree.
    pub(crate) fn dispatch(
        &self,
        path: NodePath,
        working: &Value,
        base: &Value,
        meta: &MemberMeta,
    ) -> Result<DiffNode> {
        let category = Category::of_pair(working, base);
        let value_type = if working.is_absent() {
            base.type_name()
        } else {
            working.type_name()
        };

        // both sides missing: nothing to compare
        if category == Category::Absent {
            let mut node = DiffNode::new(path, value_type, NodeState::Untouched);
            node.categories = meta.categories.clone();
            return Ok(node);
        }

        // hidden nodes are classified but never descended
        if self.policy.is_ignored(&path, meta) {
            let mut node = DiffNode::new(path, value_type, NodeState::Ignored);
            node.categories = meta.categories.clone();
            return Ok(node);
        }

        // cycle detection; the guard releases both identities on every exit
        let Some(_guard) = self.tracker.enter(working.object_id(), base.object_id()) else {
            tracing::debug!(
                component = module_path!(),
                path = %path,
                "circular reference detected"
            );
            let mut node = DiffNode::new(path, value_type, NodeState::Circular);
            node.categories = meta.categories.clone();
            return Ok(node);
        };

        let equals_only = self.policy.is_equals_only(&path, &value_type, meta, category);

        // one side missing: Added/Removed, expanded only on request
        if working.is_absent() != base.is_absent() {
            let state = if base.is_absent() {
                NodeState::Added
            } else {
                NodeState::Removed
            };
            let mut node =
                if category.is_aggregate() && self.policy.is_introspectible(state, equals_only) {
                    let mut expanded = self.structural_compare(category, path, working, base, meta)?;
                    expanded.state = state;
                    expanded
                } else {
                    DiffNode::new(path, value_type, state)
                };
            node.equals_only = equals_only;
            node.categories = meta.categories.clone();
            return Ok(node);
        }

        // both present
        let mut node = if category == Category::Value {
            value::compare_values(self, path, working, base, meta)?
        } else if equals_only {
            self.compare_equals_only(path, working, base, value_type)?
        } else if Category::of(working) != Category::of(base) {
            // structurally different categories are a wholesale replacement,
            // not something the category differs can descend into
            DiffNode::new(path, value_type, NodeState::Changed)
        } else {
            self.structural_compare(category, path, working, base, meta)?
        };
        node.equals_only = equals_only;
        node.categories = meta.categories.clone();
        Ok(node)
    }

    fn structural_compare(
        &self,
        category: Category,
        path: NodePath,
        working: &Value,
        base: &Value,
        meta: &MemberMeta,
    ) -> Result<DiffNode> {
        match category {
            Category::Sequence => sequence::compare_sequences(self, path, working, base, meta),
            Category::Map => map::compare_maps(self, path, working, base, meta),
            Category::Composite => composite::compare_composites(self, path, working, base, meta),
            // scalar and absent pairs never reach structural comparison
            Category::Value | Category::Absent => {
                value::compare_values(self, path, working, base, meta)
            }
        }
    }

    /// Equality-only short-circuit for a structurally descendable pair.
    fn compare_equals_only(
        &self,
        path: NodePath,
        working: &Value,
        base: &Value,
        value_type: String,
    ) -> Result<DiffNode> {
        let equal = self
            .policy
            .equality()
            .equal(working, base)
            .map_err(|e| DiffError::EqualityStrategyFailed {
                path: path.clone(),
                reason: e.message,
            })?;
        let state = if equal {
            NodeState::Untouched
        } else {
            NodeState::Changed
        };
        Ok(DiffNode::new(path, value_type, state))
    }
}

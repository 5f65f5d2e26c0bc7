//! Inspection policy: the filter/override surface consulted at every node
//!
//! The policy decides which parts of the value graph are compared, descended
//! into, or reported. It is constructed once through
//! [`InspectionPolicyBuilder`] and frozen at `build()`, so a policy instance
//! is read-only during comparison and can be shared across concurrent
//! comparisons (each comparison holds its own circularity tracker).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::model::member::MemberMeta;
use crate::model::{Category, Value};
use crate::node::{DiffNode, NodeState};
use crate::path::NodePath;
use crate::strategy::{EqualityStrategy, EqualsIdentity, IdentityStrategy, ValueEquality};

/// How zero-like defaults of primitive members are treated.
///
/// Languages without an "unset" notion for primitive fields cannot
/// distinguish "never set" from "set to the default", so `Unassigned`
/// approximates "unset" with "default value": a default→other transition is
/// reported `Added` and the reverse `Removed`. This heuristic misclassifies a
/// legitimately-set default value, which is why it is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveDefaultMode {
    /// Defaults are ordinary values: any primitive difference is `Changed`
    Assigned,
    /// Defaults read as "unset": default↔other transitions are `Added`/`Removed`
    Unassigned,
}

/// Read-only inspection policy; build via [`InspectionPolicy::builder`].
#[derive(Clone)]
pub struct InspectionPolicy {
    included_categories: BTreeSet<String>,
    excluded_categories: BTreeSet<String>,
    included_paths: HashSet<NodePath>,
    excluded_paths: HashSet<NodePath>,
    equals_only_paths: HashSet<NodePath>,
    equals_only_types: BTreeSet<String>,
    identity_by_path: HashMap<NodePath, Arc<dyn IdentityStrategy>>,
    identity_by_type: HashMap<String, Arc<dyn IdentityStrategy>>,
    equality: Arc<dyn EqualityStrategy>,
    default_identity: Arc<dyn IdentityStrategy>,
    return_ignored: bool,
    return_circular: bool,
    return_untouched: bool,
    descend_into_added: bool,
    descend_into_removed: bool,
    primitive_default_mode: PrimitiveDefaultMode,
}

impl InspectionPolicy {
    /// Start building a policy.
    pub fn builder() -> InspectionPolicyBuilder {
        InspectionPolicyBuilder::default()
    }

    /// True if the node passes the inclusion filters.
    ///
    /// The root is always included; with no inclusion filters configured,
    /// everything is. Otherwise a node is included when its categories
    /// intersect the included set, or its path is related to an included path
    /// by the prefix relation in either direction (ancestors of an included
    /// path stay included so descent can reach it).
    pub fn is_included(&self, path: &NodePath, categories: &BTreeSet<String>) -> bool {
        if path.is_root() {
            return true;
        }
        if self.included_categories.is_empty() && self.included_paths.is_empty() {
            return true;
        }
        if categories.iter().any(|c| self.included_categories.contains(c)) {
            return true;
        }
        self.included_paths
            .iter()
            .any(|included| path.starts_with(included) || included.starts_with(path))
    }

    /// True if the node's path or categories intersect the exclusion sets.
    pub fn is_excluded(&self, path: &NodePath, categories: &BTreeSet<String>) -> bool {
        if categories.iter().any(|c| self.excluded_categories.contains(c)) {
            return true;
        }
        self.excluded_paths
            .iter()
            .any(|excluded| path.starts_with(excluded))
    }

    /// True if the node is hidden: explicitly marked, not included, or excluded.
    pub fn is_ignored(&self, path: &NodePath, meta: &MemberMeta) -> bool {
        meta.ignored
            || !self.is_included(path, &meta.categories)
            || self.is_excluded(path, &meta.categories)
    }

    /// True if this node's subtree is short-circuited to an equality test.
    pub fn is_equals_only(
        &self,
        path: &NodePath,
        type_name: &str,
        meta: &MemberMeta,
        category: Category,
    ) -> bool {
        if self.equals_only_types.contains(type_name) {
            return true;
        }
        if category == Category::Value {
            // atomic types are inherently compared by equality
            return true;
        }
        if meta.equals_only {
            return true;
        }
        self.equals_only_paths.contains(path)
    }

    /// Whether a node in the given state may be descended into.
    pub fn is_introspectible(&self, state: NodeState, equals_only: bool) -> bool {
        if equals_only {
            return false;
        }
        match state {
            NodeState::Added => self.descend_into_added,
            NodeState::Removed => self.descend_into_removed,
            _ => true,
        }
    }

    /// Whether a built node survives into the tree presented to callers.
    ///
    /// Untouched nodes with differing descendants or preserved children are
    /// always returned; bare untouched nodes only on request.
    pub fn is_returnable(&self, node: &DiffNode) -> bool {
        match node.state {
            NodeState::Ignored => self.return_ignored,
            NodeState::Circular => self.return_circular,
            NodeState::Untouched => {
                node.has_changes() || node.has_children() || self.return_untouched
            }
            _ => true,
        }
    }

    /// Resolve the identity strategy for elements of the collection at `path`.
    ///
    /// Precedence: member-level override, per-path override, per-element-type
    /// override, then the default (deep equality).
    pub fn identity_for(
        &self,
        path: &NodePath,
        member_override: Option<&Arc<dyn IdentityStrategy>>,
        element: &Value,
    ) -> Arc<dyn IdentityStrategy> {
        if let Some(identity) = member_override {
            return identity.clone();
        }
        if let Some(identity) = self.identity_by_path.get(path) {
            return identity.clone();
        }
        if let Some(identity) = self.identity_by_type.get(&element.type_name()) {
            return identity.clone();
        }
        self.default_identity.clone()
    }

    /// True if `identity` is the built-in default (deep equality) rather than
    /// a caller-supplied override. The sequence differ only structurally pairs
    /// leftover aggregates under the default identity; a custom identity's
    /// verdict is final.
    pub fn is_default_identity(&self, identity: &Arc<dyn IdentityStrategy>) -> bool {
        Arc::ptr_eq(identity, &self.default_identity)
    }

    /// The equality strategy used for atomic and equals-only comparison.
    pub fn equality(&self) -> &Arc<dyn EqualityStrategy> {
        &self.equality
    }

    /// The configured primitive-default treatment.
    pub fn primitive_default_mode(&self) -> PrimitiveDefaultMode {
        self.primitive_default_mode
    }
}

impl Default for InspectionPolicy {
    fn default() -> Self {
        InspectionPolicyBuilder::default().build()
    }
}

impl fmt::Debug for InspectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InspectionPolicy")
            .field("included_categories", &self.included_categories)
            .field("excluded_categories", &self.excluded_categories)
            .field("included_paths", &self.included_paths.len())
            .field("excluded_paths", &self.excluded_paths.len())
            .field("equals_only_paths", &self.equals_only_paths.len())
            .field("equals_only_types", &self.equals_only_types)
            .field("identity_by_path", &self.identity_by_path.len())
            .field("identity_by_type", &self.identity_by_type.len())
            .field("return_ignored", &self.return_ignored)
            .field("return_circular", &self.return_circular)
            .field("return_untouched", &self.return_untouched)
            .field("descend_into_added", &self.descend_into_added)
            .field("descend_into_removed", &self.descend_into_removed)
            .field("primitive_default_mode", &self.primitive_default_mode)
            .finish()
    }
}

/// Fluent builder for [`InspectionPolicy`]; the built policy is immutable.
pub struct InspectionPolicyBuilder {
    policy: InspectionPolicy,
}

impl Default for InspectionPolicyBuilder {
    fn default() -> Self {
        Self {
            policy: InspectionPolicy {
                included_categories: BTreeSet::new(),
                excluded_categories: BTreeSet::new(),
                included_paths: HashSet::new(),
                excluded_paths: HashSet::new(),
                equals_only_paths: HashSet::new(),
                equals_only_types: BTreeSet::new(),
                identity_by_path: HashMap::new(),
                identity_by_type: HashMap::new(),
                equality: Arc::new(ValueEquality),
                default_identity: Arc::new(EqualsIdentity),
                return_ignored: false,
                return_circular: true,
                return_untouched: false,
                descend_into_added: false,
                descend_into_removed: false,
                primitive_default_mode: PrimitiveDefaultMode::Unassigned,
            },
        }
    }
}

impl InspectionPolicyBuilder {
    /// Restrict comparison to nodes carrying this category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.policy.included_categories.insert(category.into());
        self
    }

    /// Exclude nodes carrying this category.
    pub fn without_category(mut self, category: impl Into<String>) -> Self {
        self.policy.excluded_categories.insert(category.into());
        self
    }

    /// Restrict comparison to this path and its subtree.
    pub fn with_path(mut self, path: NodePath) -> Self {
        self.policy.included_paths.insert(path);
        self
    }

    /// Exclude this path and its subtree.
    pub fn without_path(mut self, path: NodePath) -> Self {
        self.policy.excluded_paths.insert(path);
        self
    }

    /// Compare the node at this path by equality only, without descent.
    pub fn with_equals_only_path(mut self, path: NodePath) -> Self {
        self.policy.equals_only_paths.insert(path);
        self
    }

    /// Compare all values of this type by equality only, without descent.
    pub fn with_equals_only_type(mut self, type_name: impl Into<String>) -> Self {
        self.policy.equals_only_types.insert(type_name.into());
        self
    }

    /// Reconcile elements of the collection at `path` via the given identity.
    pub fn with_identity_at(
        mut self,
        path: NodePath,
        identity: Arc<dyn IdentityStrategy>,
    ) -> Self {
        self.policy.identity_by_path.insert(path, identity);
        self
    }

    /// Reconcile all elements of the given type via the given identity.
    pub fn with_identity_for_type(
        mut self,
        type_name: impl Into<String>,
        identity: Arc<dyn IdentityStrategy>,
    ) -> Self {
        self.policy
            .identity_by_type
            .insert(type_name.into(), identity);
        self
    }

    /// Replace the equality strategy used for atomic comparison.
    pub fn with_equality(mut self, equality: Arc<dyn EqualityStrategy>) -> Self {
        self.policy.equality = equality;
        self
    }

    /// Keep ignored nodes in the returned tree.
    pub fn return_ignored_nodes(mut self, enabled: bool) -> Self {
        self.policy.return_ignored = enabled;
        self
    }

    /// Keep circular nodes in the returned tree (default on).
    pub fn return_circular_nodes(mut self, enabled: bool) -> Self {
        self.policy.return_circular = enabled;
        self
    }

    /// Keep untouched leaf nodes in the returned tree.
    pub fn return_untouched_nodes(mut self, enabled: bool) -> Self {
        self.policy.return_untouched = enabled;
        self
    }

    /// Expand added subtrees into per-member children instead of one node.
    pub fn descend_into_added(mut self, enabled: bool) -> Self {
        self.policy.descend_into_added = enabled;
        self
    }

    /// Expand removed subtrees into per-member children instead of one node.
    pub fn descend_into_removed(mut self, enabled: bool) -> Self {
        self.policy.descend_into_removed = enabled;
        self
    }

    /// Select the primitive-default treatment.
    pub fn treat_primitive_defaults_as(mut self, mode: PrimitiveDefaultMode) -> Self {
        self.policy.primitive_default_mode = mode;
        self
    }

    /// Freeze the configuration into an immutable policy.
    pub fn build(self) -> InspectionPolicy {
        self.policy
    }
}

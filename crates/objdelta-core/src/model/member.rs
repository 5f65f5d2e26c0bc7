//! Member records produced by introspection
//!
//! A [`MemberRecord`] is one named structural member of a composite value,
//! together with the override metadata the Inspection Policy consults:
//! category tags, ignored/equals-only markers, the primitive flag that enables
//! primitive-default handling, and an optional per-member identity strategy.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::strategy::IdentityStrategy;

use super::value::Value;

/// One named member of a composite value, with override metadata.
#[derive(Clone)]
pub struct MemberRecord {
    /// Member name, unique within its composite
    pub name: String,
    /// Current member value
    pub value: Value,
    /// Declared type name of the member
    pub type_name: String,
    /// Free-form category tags consulted by inclusion/exclusion filters
    pub categories: BTreeSet<String>,
    /// Member explicitly marked as ignored
    pub ignored: bool,
    /// Member explicitly marked equals-only (compared, never descended)
    pub equals_only: bool,
    /// Member holds a primitive scalar subject to primitive-default handling
    pub primitive: bool,
    /// Member-scoped identity strategy for sequence/map reconciliation
    pub identity: Option<Arc<dyn IdentityStrategy>>,
}

impl MemberRecord {
    /// Create a member record with metadata derived from the value.
    ///
    /// `type_name` follows the value's runtime type and `primitive` is set for
    /// bool/int/float members, matching how a reflective introspector would
    /// classify primitive fields.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        let primitive = matches!(value, Value::Bool(_) | Value::Int(_) | Value::Float(_));
        let type_name = value.type_name();
        Self {
            name: name.into(),
            value,
            type_name,
            categories: BTreeSet::new(),
            ignored: false,
            equals_only: false,
            primitive,
            identity: None,
        }
    }

    /// Attach a category tag.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    /// Mark this member as ignored.
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Mark this member as equals-only.
    pub fn equals_only(mut self) -> Self {
        self.equals_only = true;
        self
    }

    /// Override the primitive flag (e.g. to model boxed/wrapper scalars).
    pub fn with_primitive(mut self, primitive: bool) -> Self {
        self.primitive = primitive;
        self
    }

    /// Attach a member-scoped identity strategy.
    pub fn with_identity(mut self, identity: Arc<dyn IdentityStrategy>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Extract the policy-relevant metadata for this member's node.
    pub fn meta(&self) -> MemberMeta {
        MemberMeta {
            categories: self.categories.clone(),
            ignored: self.ignored,
            equals_only: self.equals_only,
            primitive: self.primitive,
            identity: self.identity.clone(),
        }
    }
}

impl fmt::Debug for MemberRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberRecord")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("type_name", &self.type_name)
            .field("categories", &self.categories)
            .field("ignored", &self.ignored)
            .field("equals_only", &self.equals_only)
            .field("primitive", &self.primitive)
            .field("identity", &self.identity.is_some())
            .finish()
    }
}

/// Policy-relevant metadata flowing from a member record into its node.
///
/// Nodes not backed by a member (the root, sequence elements, map entries)
/// carry the default meta.
#[derive(Clone, Default)]
pub struct MemberMeta {
    pub categories: BTreeSet<String>,
    pub ignored: bool,
    pub equals_only: bool,
    pub primitive: bool,
    pub identity: Option<Arc<dyn IdentityStrategy>>,
}

impl MemberMeta {
    /// Meta for a node without a backing member (sequence elements, map
    /// entries), inheriting only the parent's category tags.
    pub fn inherited(categories: BTreeSet<String>) -> Self {
        Self {
            categories,
            ..Self::default()
        }
    }

    /// Merge the parent node's category tags into this meta (categories
    /// propagate down the tree; other flags do not).
    pub fn inherit_categories(mut self, parent: &BTreeSet<String>) -> Self {
        self.categories.extend(parent.iter().cloned());
        self
    }
}

impl fmt::Debug for MemberMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberMeta")
            .field("categories", &self.categories)
            .field("ignored", &self.ignored)
            .field("equals_only", &self.equals_only)
            .field("primitive", &self.primitive)
            .field("identity", &self.identity.is_some())
            .finish()
    }
}

//! objdelta Core - Structural differencing engine
//!
//! This crate computes the structural difference between two instances of the
//! same shape ("working" vs "base") and represents the result as a navigable
//! tree of change records, including:
//! - A dynamic value model (scalars, sequences, maps, composites) with
//!   identity-preserving aggregates
//! - Path addressing with stable, round-trippable textual rendering
//! - Identity-based reconciliation for sequences and key-exact reconciliation
//!   for maps
//! - Circular-reference detection scoped to one comparison
//! - A configurable inspection policy (category/path filters, equals-only
//!   designation, returnability, primitive-default treatment)
//! - Visitors for traversing the result with transiently resolved values

pub mod circularity;
pub mod differ;
pub mod errors;
pub mod introspect;
pub mod logging_facility;
pub mod model;
pub mod node;
pub mod path;
pub mod policy;
pub mod strategy;
pub mod visit;

// Re-export commonly used types
pub use differ::ObjectDiffer;
pub use errors::{DiffError, DiffErrorKind, Result};
pub use introspect::{FieldIntrospector, IntrospectError, Introspector};
pub use model::{Category, CompositeValue, MapValue, MemberRecord, SequenceValue, Value};
pub use node::{DiffNode, NodeState};
pub use path::{NodePath, PathElement};
pub use policy::{InspectionPolicy, InspectionPolicyBuilder, PrimitiveDefaultMode};
pub use strategy::{
    EqualityStrategy, EqualsIdentity, IdentityStrategy, KeyedIdentity, StrategyError,
    ValueEquality,
};
pub use visit::{ChangeCollector, NodeVisitor, PrintingVisitor};

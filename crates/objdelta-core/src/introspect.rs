//! Introspector: the member-enumeration capability consumed by the engine
//!
//! The engine never inspects composite values directly; it asks an
//! [`Introspector`] for the ordered member list. The default
//! [`FieldIntrospector`] reads the schema registered on [`CompositeValue`]s,
//! but any other mechanism (generated accessors, external schemas) can be
//! substituted without touching the comparison algorithm.

use thiserror::Error;

use crate::model::{MemberRecord, Value};

/// Failure to enumerate a value's members.
///
/// Introspection failures are recovered locally: the affected node is
/// reported as `Inaccessible` and comparison continues for its siblings.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct IntrospectError {
    pub message: String,
}

impl IntrospectError {
    /// Create an introspection failure with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Capability to enumerate a composite value's structural members.
pub trait Introspector: Send + Sync {
    /// Return the ordered member list of `value`.
    ///
    /// # Errors
    ///
    /// Returns [`IntrospectError`] if the value's members cannot be
    /// enumerated; the engine reports the node as `Inaccessible`.
    fn introspect(&self, value: &Value) -> Result<Vec<MemberRecord>, IntrospectError>;
}

/// Default introspector reading the members registered on composite values.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldIntrospector;

impl Introspector for FieldIntrospector {
    fn introspect(&self, value: &Value) -> Result<Vec<MemberRecord>, IntrospectError> {
        match value {
            Value::Composite(composite) => Ok(composite.members()),
            other => Err(IntrospectError::new(format!(
                "cannot introspect non-composite value of type '{}'",
                other.type_name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_introspector_enumerates_members() {
        let person = Value::composite(
            "Person",
            vec![
                MemberRecord::new("name", Value::text("a")),
                MemberRecord::new("age", Value::from(3i64)),
            ],
        );
        let members = FieldIntrospector.introspect(&person).unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name, "name");
        assert_eq!(members[1].name, "age");
    }

    #[test]
    fn test_field_introspector_rejects_scalars() {
        let err = FieldIntrospector.introspect(&Value::text("a")).unwrap_err();
        assert!(err.message.contains("text"));
    }
}

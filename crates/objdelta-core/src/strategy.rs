//! Identity and equality strategies
//!
//! An [`IdentityStrategy`] declares whether two elements occupying possibly
//! different positions in two sequence snapshots represent the same logical
//! element — the basis of identity-based (rather than positional)
//! reconciliation. An [`EqualityStrategy`] declares whether two values are
//! equal, used for atomic comparison and equals-only short-circuits.
//!
//! Both are correctness-critical pure functions: a failing strategy aborts the
//! enclosing comparison rather than being guessed around.

use thiserror::Error;

use crate::model::Value;

/// Failure raised by a user-supplied strategy.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct StrategyError {
    pub message: String,
}

impl StrategyError {
    /// Create a strategy failure with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Pluggable "same element" predicate for sequence reconciliation.
pub trait IdentityStrategy: Send + Sync {
    /// Decide whether `working` and `base` represent the same logical element.
    ///
    /// # Errors
    ///
    /// Implementations may fail; the engine aborts the enclosing comparison
    /// with the failure wrapped in path context.
    fn matches(&self, working: &Value, base: &Value) -> Result<bool, StrategyError>;
}

/// Pluggable "equal value" predicate for atomic comparison.
pub trait EqualityStrategy: Send + Sync {
    /// Decide whether `working` and `base` are equal.
    ///
    /// # Errors
    ///
    /// Implementations may fail; the engine aborts the enclosing comparison
    /// with the failure wrapped in path context.
    fn equal(&self, working: &Value, base: &Value) -> Result<bool, StrategyError>;
}

/// Default identity: two elements are the same iff they are deeply equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualsIdentity;

impl IdentityStrategy for EqualsIdentity {
    fn matches(&self, working: &Value, base: &Value) -> Result<bool, StrategyError> {
        Ok(working == base)
    }
}

/// Default equality: deep value equality.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueEquality;

impl EqualityStrategy for ValueEquality {
    fn equal(&self, working: &Value, base: &Value) -> Result<bool, StrategyError> {
        Ok(working == base)
    }
}

/// Identity by a single discriminating member.
///
/// Matches two composites by one member's value, or two maps by the value
/// stored under one text key. Elements missing the member on both sides
/// match each other; a member present on only one side does not match.
#[derive(Debug, Clone)]
pub struct KeyedIdentity {
    member: String,
}

impl KeyedIdentity {
    /// Match elements by the named member/key.
    pub fn new(member: impl Into<String>) -> Self {
        Self {
            member: member.into(),
        }
    }

    fn discriminant(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Composite(composite) => composite.member(&self.member).map(|m| m.value),
            Value::Map(map) => map.get(&Value::text(self.member.clone())),
            _ => None,
        }
    }
}

impl IdentityStrategy for KeyedIdentity {
    fn matches(&self, working: &Value, base: &Value) -> Result<bool, StrategyError> {
        match (self.discriminant(working), self.discriminant(base)) {
            (Some(w), Some(b)) => Ok(w == b),
            (None, None) => Ok(working == base),
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemberRecord;

    #[test]
    fn test_equals_identity_matches_equal_values() {
        let identity = EqualsIdentity;
        assert!(identity
            .matches(&Value::text("a"), &Value::text("a"))
            .unwrap());
        assert!(!identity
            .matches(&Value::text("a"), &Value::text("b"))
            .unwrap());
    }

    #[test]
    fn test_keyed_identity_on_composites() {
        let identity = KeyedIdentity::new("city");
        let a = Value::composite(
            "Location",
            vec![
                MemberRecord::new("street", Value::text("street1")),
                MemberRecord::new("city", Value::text("city")),
            ],
        );
        let b = Value::composite(
            "Location",
            vec![
                MemberRecord::new("street", Value::text("street2")),
                MemberRecord::new("city", Value::text("city")),
            ],
        );
        assert!(identity.matches(&a, &b).unwrap());

        let c = Value::composite(
            "Location",
            vec![MemberRecord::new("city", Value::text("elsewhere"))],
        );
        assert!(!identity.matches(&a, &c).unwrap());
    }

    #[test]
    fn test_keyed_identity_on_maps() {
        let identity = KeyedIdentity::new("city");
        let a = Value::map(vec![
            (Value::text("street"), Value::text("street1")),
            (Value::text("city"), Value::text("city")),
        ]);
        let b = Value::map(vec![
            (Value::text("street"), Value::text("street2")),
            (Value::text("city"), Value::text("city")),
        ]);
        assert!(identity.matches(&a, &b).unwrap());
    }

    #[test]
    fn test_keyed_identity_falls_back_to_equality_without_member() {
        let identity = KeyedIdentity::new("city");
        assert!(identity
            .matches(&Value::text("a"), &Value::text("a"))
            .unwrap());
        assert!(!identity
            .matches(&Value::text("a"), &Value::text("b"))
            .unwrap());
    }
}

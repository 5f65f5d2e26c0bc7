//! Error facility for the differencing engine
//!
//! Errors carry a stable kind/code classification for programmatic handling
//! and structured logging. Only failures that make the comparison result
//! meaningless are surfaced here: a failing user-supplied strategy aborts the
//! enclosing `compare` call atomically (no partial tree is returned), and a
//! malformed path expression rejects configuration up front. Introspection
//! failures are *not* errors at this level — they are locally recovered as
//! `Inaccessible` nodes so sibling members still get compared.

use thiserror::Error;

use crate::path::NodePath;

/// Result type alias using DiffError
pub type Result<T> = std::result::Result<T, DiffError>;

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable in tests, logs and external
/// tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffErrorKind {
    /// A user-supplied identity strategy failed during reconciliation
    IdentityStrategyFailed,
    /// A user-supplied equality strategy failed during comparison
    EqualityStrategyFailed,
    /// A textual path expression could not be parsed
    InvalidPath,
}

impl DiffErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            DiffErrorKind::IdentityStrategyFailed => "ERR_IDENTITY_STRATEGY_FAILED",
            DiffErrorKind::EqualityStrategyFailed => "ERR_EQUALITY_STRATEGY_FAILED",
            DiffErrorKind::InvalidPath => "ERR_INVALID_PATH",
        }
    }
}

/// Error taxonomy for comparison operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiffError {
    /// Identity strategy failed while reconciling collection elements
    #[error("Identity strategy failed at '{path}': {reason}")]
    IdentityStrategyFailed { path: NodePath, reason: String },

    /// Equality strategy failed while comparing values
    #[error("Equality strategy failed at '{path}': {reason}")]
    EqualityStrategyFailed { path: NodePath, reason: String },

    /// A path expression does not follow the rendered-path grammar
    #[error("Invalid path expression '{expression}': {reason}")]
    InvalidPath { expression: String, reason: String },
}

impl DiffError {
    /// Get the error kind
    pub fn kind(&self) -> DiffErrorKind {
        match self {
            DiffError::IdentityStrategyFailed { .. } => DiffErrorKind::IdentityStrategyFailed,
            DiffError::EqualityStrategyFailed { .. } => DiffErrorKind::EqualityStrategyFailed,
            DiffError::InvalidPath { .. } => DiffErrorKind::InvalidPath,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// The node path at which the failure occurred, if any
    pub fn path(&self) -> Option<&NodePath> {
        match self {
            DiffError::IdentityStrategyFailed { path, .. }
            | DiffError::EqualityStrategyFailed { path, .. } => Some(path),
            DiffError::InvalidPath { .. } => None,
        }
    }
}

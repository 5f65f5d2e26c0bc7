//! Core types shared across objdelta facilities
//!
//! This crate provides foundational types used by both the error handling
//! and logging facilities:
//!
//! - **Correlation types**: ComparisonId, TraceId, DiffContext
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{ComparisonId, DiffContext, TraceId};

//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_COMPARISON_ID: &str = "comparison_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Comparison context
pub const FIELD_PATH: &str = "path";
pub const FIELD_NODE_STATE: &str = "node_state";
pub const FIELD_VALUE_TYPE: &str = "value_type";

// Tree sizes
pub const FIELD_NODE_COUNT: &str = "node_count";
pub const FIELD_CHILD_COUNT: &str = "child_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

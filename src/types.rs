//! Common types used throughout paginated-http
//!
//! Shared type aliases and wire-level constants.

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// Wire Conventions
// ============================================================================

/// Query parameter used to hint the page size
pub const DEFAULT_PAGE_SIZE_PARAM: &str = "per_page";

/// Page size requested when the caller did not pick one
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Link relation followed between pages
pub const NEXT_REL: &str = "next";

/// The only media type that is ever paginated
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Name of a JSON value's variant, for error messages
pub fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

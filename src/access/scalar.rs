//! Scalar accessors: int, long, string, boolean, and hex-encoded bytes.

use serde_json::Value;

use crate::access::member;
use crate::error::{FieldError, FieldKind, Result, ScalarKind};

/// Required int field: an integral number representable as `i32`.
pub fn get_int(field: &str, node: &Value) -> Result<i32> {
    let child = member(field, node).ok_or_else(|| FieldError::missing(FieldKind::Int, field))?;
    int_value(field, child)
}

/// Optional int field: absent or null reads as `None`.
pub fn get_int_or_null(field: &str, node: &Value) -> Result<Option<i32>> {
    match member(field, node) {
        None | Some(Value::Null) => Ok(None),
        Some(child) => int_value(field, child).map(Some),
    }
}

/// Required long field: an integral number representable as `i64`.
pub fn get_long(field: &str, node: &Value) -> Result<i64> {
    let child = member(field, node).ok_or_else(|| FieldError::missing(FieldKind::Long, field))?;
    long_value(field, child)
}

/// Optional long field.
pub fn get_long_or_null(field: &str, node: &Value) -> Result<Option<i64>> {
    match member(field, node) {
        None | Some(Value::Null) => Ok(None),
        Some(child) => long_value(field, child).map(Some),
    }
}

/// Required string field.
pub fn get_string(field: &str, node: &Value) -> Result<String> {
    let child = member(field, node).ok_or_else(|| FieldError::missing(FieldKind::String, field))?;
    string_value(field, child)
}

/// Optional string field.
pub fn get_string_or_null(field: &str, node: &Value) -> Result<Option<String>> {
    match member(field, node) {
        None | Some(Value::Null) => Ok(None),
        Some(child) => string_value(field, child).map(Some),
    }
}

/// Required boolean field. The strings `"true"` and `"false"` do not count.
pub fn get_bool(field: &str, node: &Value) -> Result<bool> {
    let child = member(field, node).ok_or_else(|| FieldError::missing(FieldKind::Boolean, field))?;
    bool_value(field, child)
}

/// Optional boolean field.
pub fn get_bool_or_null(field: &str, node: &Value) -> Result<Option<bool>> {
    match member(field, node) {
        None | Some(Value::Null) => Ok(None),
        Some(child) => bool_value(field, child).map(Some),
    }
}

/// Optional byte-sequence field, hex-decoded from a string node.
///
/// The text is case-insensitive hex, two digits per byte, no delimiters.
/// Only the or-null form exists.
pub fn get_bytes_or_null(field: &str, node: &Value) -> Result<Option<Vec<u8>>> {
    let Some(child) = member(field, node) else {
        return Ok(None);
    };
    if child.is_null() {
        return Ok(None);
    }
    let Some(text) = child.as_str() else {
        return Err(FieldError::not_text(field, child));
    };
    hex::decode(text)
        .map(Some)
        .map_err(|source| FieldError::invalid_hex(field, source))
}

// --------------------------- Value converters ----------------------------- //

fn int_value(field: &str, child: &Value) -> Result<i32> {
    child
        .as_i64()
        .and_then(|wide| i32::try_from(wide).ok())
        .ok_or_else(|| FieldError::mismatch(ScalarKind::Integer, field, child))
}

fn long_value(field: &str, child: &Value) -> Result<i64> {
    child
        .as_i64()
        .ok_or_else(|| FieldError::mismatch(ScalarKind::Long, field, child))
}

/// Shared with the string-map accessors, which key the failure by the inner
/// map key rather than the outer field.
pub(crate) fn string_value(field: &str, child: &Value) -> Result<String> {
    child
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| FieldError::mismatch(ScalarKind::String, field, child))
}

fn bool_value(field: &str, child: &Value) -> Result<bool> {
    child
        .as_bool()
        .ok_or_else(|| FieldError::mismatch(ScalarKind::Boolean, field, child))
}

// ------------------------------- Tests ------------------------------------ //

//! Typed field access over parsed JSON trees.
//!
//! Every accessor takes `(field, node)`, looks the field up on the object
//! node, and requires an exact node kind: integers are never read from
//! decimals or strings, booleans never from the text `"true"`, and so on.
//! Failures carry fully formed messages quoting the field and the offending
//! value's JSON text; callers surface them unchanged.
//!
//! Absence and explicit null are distinct states. Required accessors report
//! them separately, or-null accessors fold both into `None`; the generic
//! [`get`] is the one deliberate exception and folds them into a single
//! missing-field failure.

pub mod collect;
pub mod scalar;

use serde_json::Value;

use crate::error::{FieldError, FieldKind, Result};

/// Child node for `field`. A parent that is not an object has no members, so
/// the lookup reads as absent.
pub(crate) fn member<'a>(field: &str, node: &'a Value) -> Option<&'a Value> {
    node.as_object().and_then(|object| object.get(field))
}

/// Fetch a field without typing it.
///
/// Absent and explicit null collapse to the same failure here; the raw child
/// node is returned otherwise, for the caller to feed into further accessors.
pub fn get<'a>(field: &str, node: &'a Value) -> Result<&'a Value> {
    match member(field, node) {
        Some(child) if !child.is_null() => Ok(child),
        _ => Err(FieldError::missing(FieldKind::Field, field)),
    }
}

// ------------------------------- Tests ------------------------------------ //

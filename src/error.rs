//! Validation failures raised by the field accessors.
//!
//! Message text is the observable contract: callers match on it, so every
//! template here is exact. `<value>` slots always carry the canonical JSON
//! rendering of the offending node (strings keep their quotes, decimals keep
//! their fraction, null is the `null` literal).

use serde_json::Value;
use thiserror::Error;

pub type Result<T, E = FieldError> = std::result::Result<T, E>;

/// A field did not conform to its declared shape.
///
/// There is no transient sub-kind: every variant means the caller handed this
/// layer a document that does not match, and is surfaced as-is.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Required field absent from the enclosing object (or, for the generic
    /// accessor, absent-or-null).
    #[error("Cannot parse missing {kind}: {field}")]
    Missing { kind: FieldKind, field: String },

    /// Present scalar of the wrong kind, including an explicit null.
    #[error("Cannot parse to {kind} value: {field}: {value}")]
    TypeMismatch {
        kind: ScalarKind,
        field: String,
        value: String,
    },

    /// Present collection field that is not a JSON array.
    #[error("Cannot parse JSON array from non-array value: {field}: {value}")]
    NotAnArray { field: String, value: String },

    /// Present map field that is not a JSON object.
    #[error("Cannot parse string map from non-object value: {field}: {value}")]
    NotAnObject { field: String, value: String },

    /// Array element of the wrong kind; validation stops at the first one.
    #[error("Cannot parse {} from non-{} value in {field}: {value}", .kind.expected(), .kind.found())]
    ElementMismatch {
        kind: ElementKind,
        field: String,
        value: String,
    },

    /// Byte-sequence field whose node is not a string.
    #[error("Cannot parse byte buffer from non-text value: {field}: {value}")]
    NotText { field: String, value: String },

    /// Byte-sequence field whose string is not valid hex.
    #[error("Cannot parse byte buffer from hex string: {field}: {source}")]
    InvalidHex {
        field: String,
        source: hex::FromHexError,
    },

    /// Document text rejected by the JSON parser before any field was read.
    #[error("Failed to parse JSON string: {json}")]
    InvalidJson {
        json: String,
        source: serde_json::Error,
    },
}

impl FieldError {
    pub(crate) fn missing(kind: FieldKind, field: &str) -> Self {
        Self::Missing {
            kind,
            field: field.to_string(),
        }
    }

    pub(crate) fn mismatch(kind: ScalarKind, field: &str, value: &Value) -> Self {
        Self::TypeMismatch {
            kind,
            field: field.to_string(),
            value: render(value),
        }
    }

    pub(crate) fn not_an_array(field: &str, value: &Value) -> Self {
        Self::NotAnArray {
            field: field.to_string(),
            value: render(value),
        }
    }

    pub(crate) fn not_an_object(field: &str, value: &Value) -> Self {
        Self::NotAnObject {
            field: field.to_string(),
            value: render(value),
        }
    }

    pub(crate) fn element_mismatch(kind: ElementKind, field: &str, value: &Value) -> Self {
        Self::ElementMismatch {
            kind,
            field: field.to_string(),
            value: render(value),
        }
    }

    pub(crate) fn not_text(field: &str, value: &Value) -> Self {
        Self::NotText {
            field: field.to_string(),
            value: render(value),
        }
    }

    pub(crate) fn invalid_hex(field: &str, source: hex::FromHexError) -> Self {
        Self::InvalidHex {
            field: field.to_string(),
            source,
        }
    }

    pub(crate) fn invalid_json(json: &str, source: serde_json::Error) -> Self {
        Self::InvalidJson {
            json: json.to_string(),
            source,
        }
    }
}

/// Canonical JSON text of a node as quoted in failure messages.
pub(crate) fn render(value: &Value) -> String {
    value.to_string()
}

// ------------------------------ Kind labels ------------------------------- //

/// Noun used in missing-field messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Field,
    Int,
    Long,
    String,
    Boolean,
    List,
    Set,
    Map,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Int => "int",
            Self::Long => "long",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar kind as phrased in type-mismatch messages, article included
/// ("Cannot parse to an integer value: ...").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Integer,
    Long,
    String,
    Boolean,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "an integer",
            Self::Long => "a long",
            Self::String => "a string",
            Self::Boolean => "a boolean",
        }
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element kind for array validation. The expected/found wording pair is
/// fixed per kind ("integer from non-int", "long from non-long",
/// "string from non-text").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Int,
    Long,
    String,
}

impl ElementKind {
    /// What the element was supposed to be.
    pub fn expected(self) -> &'static str {
        match self {
            Self::Int => "integer",
            Self::Long => "long",
            Self::String => "string",
        }
    }

    /// Node-kind word in the "non-..." clause.
    pub fn found(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Long => "long",
            Self::String => "text",
        }
    }
}

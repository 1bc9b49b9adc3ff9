//! Process-wide JSON codec configuration.
//!
//! One immutable configuration object, built lazily on first use and shared
//! for unsynchronized concurrent reads afterwards. It is the only
//! process-wide state in the crate: accessors and writers are otherwise pure
//! functions over caller-owned values.

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::error::{FieldError, Result};
use crate::write::JsonGenerator;

static CODEC: Lazy<JsonCodec> = Lazy::new(JsonCodec::new);

/// Parser/generator configuration. No mutation is exposed after construction.
pub struct JsonCodec {
    pretty_indent: &'static [u8],
}

impl JsonCodec {
    fn new() -> Self {
        Self {
            pretty_indent: b"  ",
        }
    }

    /// Parse JSON text into a tree.
    pub fn parse(&self, text: &str) -> serde_json::Result<Value> {
        serde_json::from_str(text)
    }

    /// Bind a fresh generator to `out`, compact or indented.
    pub fn generator<'out>(&self, out: &'out mut Vec<u8>, pretty: bool) -> JsonGenerator<'out> {
        if pretty {
            JsonGenerator::pretty(out, self.pretty_indent)
        } else {
            JsonGenerator::compact(out)
        }
    }
}

/// Shared codec instance.
pub fn codec() -> &'static JsonCodec {
    &CODEC
}

/// Parse `json` and convert the resulting tree with `from_json`.
///
/// A syntactically invalid document fails before the converter runs;
/// converter failures propagate unchanged.
pub fn parse<T, F>(json: &str, from_json: F) -> Result<T>
where
    F: FnOnce(&Value) -> Result<T>,
{
    let node = codec()
        .parse(json)
        .map_err(|source| FieldError::invalid_json(json, source))?;
    from_json(&node)
}

// ------------------------------- Tests ------------------------------------ //

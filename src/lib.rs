//! Strict typed-field access over parsed JSON trees.
//!
//! Given a parsed `serde_json` tree and a field name, read the field as one
//! exact kind (int, long, string, boolean, hex bytes, list, set, string map,
//! or a caller-converted object list) with no implicit coercion and
//! deterministic, fully formed failure messages when the field is absent,
//! null, or the wrong kind. The write side mirrors the read side: field
//! writers for scalar arrays and string maps over a small token generator,
//! and a [`generate`] entry point that drives a caller callback against a
//! fresh buffer, compact or pretty.
//!
//! ```
//! use json_field::{get_int, get_string_list, parse};
//!
//! let count = parse("{\"count\": 23}", |node| get_int("count", node)).unwrap();
//! assert_eq!(count, 23);
//!
//! let err = parse("{\"tags\": [\"a\", 7]}", |node| get_string_list("tags", node)).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "Cannot parse string from non-text value in tags: 7"
//! );
//! ```

pub mod access;
pub mod codec;
pub mod error;
pub mod write;

pub use access::collect::{
    get_int_array_or_null, get_integer_list, get_integer_list_or_null, get_integer_set,
    get_integer_set_or_null, get_long_list, get_long_list_or_null, get_long_set,
    get_long_set_or_null, get_object_list, get_object_list_or_null, get_string_list,
    get_string_list_or_null, get_string_map, get_string_map_nullable_values,
    get_string_map_or_null, get_string_set, get_string_set_or_null,
};
pub use access::get;
pub use access::scalar::{
    get_bool, get_bool_or_null, get_bytes_or_null, get_int, get_int_or_null, get_long,
    get_long_or_null, get_string, get_string_or_null,
};
pub use codec::{JsonCodec, codec, parse};
pub use error::{ElementKind, FieldError, FieldKind, Result, ScalarKind};
pub use write::{
    JsonGenerator, generate, write_integer_array, write_integer_field_if, write_long_array,
    write_long_field_if, write_string_array, write_string_map,
};

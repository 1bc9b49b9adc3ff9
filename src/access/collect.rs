//! Collection accessors: lists, sets, string maps, and object lists.
//!
//! Lists preserve source order; sets dedupe while keeping first-seen order.
//! Element validation applies the same exact-kind rules as the scalar
//! accessors and stops at the first offending element.

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};

use crate::access::member;
use crate::access::scalar::string_value;
use crate::error::{ElementKind, FieldError, FieldKind, Result};

// ------------------------------ Array lookup ------------------------------ //

fn array_field<'a>(kind: FieldKind, field: &str, node: &'a Value) -> Result<&'a [Value]> {
    let child = member(field, node).ok_or_else(|| FieldError::missing(kind, field))?;
    child
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| FieldError::not_an_array(field, child))
}

/// Or-null lookup: absent and explicit null both read as `None`; any other
/// non-array child is still a mismatch.
fn array_field_or_null<'a>(field: &str, node: &'a Value) -> Result<Option<&'a [Value]>> {
    match member(field, node) {
        None | Some(Value::Null) => Ok(None),
        Some(child) => child
            .as_array()
            .map(|items| Some(items.as_slice()))
            .ok_or_else(|| FieldError::not_an_array(field, child)),
    }
}

fn int_element(field: &str, element: &Value) -> Result<i32> {
    element
        .as_i64()
        .and_then(|wide| i32::try_from(wide).ok())
        .ok_or_else(|| FieldError::element_mismatch(ElementKind::Int, field, element))
}

fn long_element(field: &str, element: &Value) -> Result<i64> {
    element
        .as_i64()
        .ok_or_else(|| FieldError::element_mismatch(ElementKind::Long, field, element))
}

fn string_element(field: &str, element: &Value) -> Result<String> {
    element
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| FieldError::element_mismatch(ElementKind::String, field, element))
}

// ------------------------------ Lists and sets ---------------------------- //

/// Required list of ints, in source order.
pub fn get_integer_list(field: &str, node: &Value) -> Result<Vec<i32>> {
    array_field(FieldKind::List, field, node)?
        .iter()
        .map(|element| int_element(field, element))
        .collect()
}

/// Optional list of ints.
pub fn get_integer_list_or_null(field: &str, node: &Value) -> Result<Option<Vec<i32>>> {
    match array_field_or_null(field, node)? {
        None => Ok(None),
        Some(items) => items
            .iter()
            .map(|element| int_element(field, element))
            .collect::<Result<Vec<_>>>()
            .map(Some),
    }
}

/// Optional dense int array: the fixed-width cousin of
/// [`get_integer_list_or_null`] with identical semantics.
pub fn get_int_array_or_null(field: &str, node: &Value) -> Result<Option<Box<[i32]>>> {
    match array_field_or_null(field, node)? {
        None => Ok(None),
        Some(items) => items
            .iter()
            .map(|element| int_element(field, element))
            .collect::<Result<Box<[i32]>>>()
            .map(Some),
    }
}

/// Required set of ints, deduped, first-seen order.
pub fn get_integer_set(field: &str, node: &Value) -> Result<IndexSet<i32>> {
    array_field(FieldKind::Set, field, node)?
        .iter()
        .map(|element| int_element(field, element))
        .collect()
}

/// Optional set of ints.
pub fn get_integer_set_or_null(field: &str, node: &Value) -> Result<Option<IndexSet<i32>>> {
    match array_field_or_null(field, node)? {
        None => Ok(None),
        Some(items) => items
            .iter()
            .map(|element| int_element(field, element))
            .collect::<Result<IndexSet<_>>>()
            .map(Some),
    }
}

/// Required list of longs, in source order.
pub fn get_long_list(field: &str, node: &Value) -> Result<Vec<i64>> {
    array_field(FieldKind::List, field, node)?
        .iter()
        .map(|element| long_element(field, element))
        .collect()
}

/// Optional list of longs.
pub fn get_long_list_or_null(field: &str, node: &Value) -> Result<Option<Vec<i64>>> {
    match array_field_or_null(field, node)? {
        None => Ok(None),
        Some(items) => items
            .iter()
            .map(|element| long_element(field, element))
            .collect::<Result<Vec<_>>>()
            .map(Some),
    }
}

/// Required set of longs.
pub fn get_long_set(field: &str, node: &Value) -> Result<IndexSet<i64>> {
    array_field(FieldKind::Set, field, node)?
        .iter()
        .map(|element| long_element(field, element))
        .collect()
}

/// Optional set of longs.
pub fn get_long_set_or_null(field: &str, node: &Value) -> Result<Option<IndexSet<i64>>> {
    match array_field_or_null(field, node)? {
        None => Ok(None),
        Some(items) => items
            .iter()
            .map(|element| long_element(field, element))
            .collect::<Result<IndexSet<_>>>()
            .map(Some),
    }
}

/// Required list of strings, in source order.
pub fn get_string_list(field: &str, node: &Value) -> Result<Vec<String>> {
    array_field(FieldKind::List, field, node)?
        .iter()
        .map(|element| string_element(field, element))
        .collect()
}

/// Optional list of strings.
pub fn get_string_list_or_null(field: &str, node: &Value) -> Result<Option<Vec<String>>> {
    match array_field_or_null(field, node)? {
        None => Ok(None),
        Some(items) => items
            .iter()
            .map(|element| string_element(field, element))
            .collect::<Result<Vec<_>>>()
            .map(Some),
    }
}

/// Required set of strings.
pub fn get_string_set(field: &str, node: &Value) -> Result<IndexSet<String>> {
    array_field(FieldKind::Set, field, node)?
        .iter()
        .map(|element| string_element(field, element))
        .collect()
}

/// Optional set of strings.
pub fn get_string_set_or_null(field: &str, node: &Value) -> Result<Option<IndexSet<String>>> {
    match array_field_or_null(field, node)? {
        None => Ok(None),
        Some(items) => items
            .iter()
            .map(|element| string_element(field, element))
            .collect::<Result<IndexSet<_>>>()
            .map(Some),
    }
}

// ------------------------------ String maps ------------------------------- //

fn map_field<'a>(field: &str, node: &'a Value) -> Result<&'a Map<String, Value>> {
    let child = member(field, node).ok_or_else(|| FieldError::missing(FieldKind::Map, field))?;
    child
        .as_object()
        .ok_or_else(|| FieldError::not_an_object(field, child))
}

/// Required string-keyed map of strings. Entry failures are keyed by the
/// inner key, not the outer field.
pub fn get_string_map(field: &str, node: &Value) -> Result<IndexMap<String, String>> {
    map_field(field, node)?
        .iter()
        .map(|(key, value)| Ok((key.clone(), string_value(key, value)?)))
        .collect()
}

/// Optional string map: absent or null reads as `None`.
pub fn get_string_map_or_null(field: &str, node: &Value) -> Result<Option<IndexMap<String, String>>> {
    match member(field, node) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => get_string_map(field, node).map(Some),
    }
}

/// Required string map whose entry values may be explicit nulls. A null value
/// is preserved as `None`; any other non-string value still fails.
pub fn get_string_map_nullable_values(
    field: &str,
    node: &Value,
) -> Result<IndexMap<String, Option<String>>> {
    map_field(field, node)?
        .iter()
        .map(|(key, value)| {
            let text = if value.is_null() {
                None
            } else {
                Some(string_value(key, value)?)
            };
            Ok((key.clone(), text))
        })
        .collect()
}

// ------------------------------ Object lists ------------------------------ //

/// Required list of objects, each converted by `convert` in source order.
///
/// Beyond requiring an array, no validation happens here: converter failures
/// propagate unchanged.
pub fn get_object_list<T, F>(field: &str, node: &Value, mut convert: F) -> Result<Vec<T>>
where
    F: FnMut(&Value) -> Result<T>,
{
    array_field(FieldKind::List, field, node)?
        .iter()
        .map(|element| convert(element))
        .collect()
}

/// Optional list of objects: absent or null reads as `None`.
pub fn get_object_list_or_null<T, F>(field: &str, node: &Value, mut convert: F) -> Result<Option<Vec<T>>>
where
    F: FnMut(&Value) -> Result<T>,
{
    match array_field_or_null(field, node)? {
        None => Ok(None),
        Some(items) => items
            .iter()
            .map(|element| convert(element))
            .collect::<Result<Vec<_>>>()
            .map(Some),
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::scalar::get_long;
    use crate::codec::codec;
    use crate::write::{
        generate, write_integer_array, write_long_array, write_string_array, write_string_map,
    };

    fn tree(src: &str) -> Value {
        codec().parse(src).expect("fixture parses")
    }

    fn message_of<T: std::fmt::Debug>(result: Result<T>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn get_int_array_or_null() {
        assert_eq!(
            super::get_int_array_or_null("items", &tree("{}")).unwrap(),
            None
        );
        assert_eq!(
            super::get_int_array_or_null("items", &tree("{\"items\": null}")).unwrap(),
            None
        );
        assert_eq!(
            message_of(super::get_int_array_or_null(
                "items",
                &tree("{\"items\": [13, \"23\"]}")
            )),
            "Cannot parse integer from non-int value in items: \"23\""
        );
        assert_eq!(
            super::get_int_array_or_null("items", &tree("{\"items\": [23, 45]}")).unwrap(),
            Some(vec![23, 45].into_boxed_slice())
        );
    }

    #[test]
    fn get_integer_list() {
        assert_eq!(
            message_of(super::get_integer_list("items", &tree("{}"))),
            "Cannot parse missing list: items"
        );
        assert_eq!(
            message_of(super::get_integer_list("items", &tree("{\"items\": null}"))),
            "Cannot parse JSON array from non-array value: items: null"
        );
        assert_eq!(
            message_of(super::get_integer_list(
                "items",
                &tree("{\"items\": [13, \"23\"]}")
            )),
            "Cannot parse integer from non-int value in items: \"23\""
        );

        let items = vec![23, 45];
        assert_eq!(
            super::get_integer_list("items", &tree("{\"items\": [23, 45]}")).unwrap(),
            items
        );

        let json = generate(
            |generator| {
                generator.write_start_object()?;
                write_integer_array("items", items.iter().copied(), generator)?;
                generator.write_end_object()
            },
            false,
        )
        .unwrap();
        assert_eq!(super::get_integer_list("items", &tree(&json)).unwrap(), items);
    }

    #[test]
    fn get_integer_list_or_null() {
        assert_eq!(
            super::get_integer_list_or_null("items", &tree("{}")).unwrap(),
            None
        );
        assert_eq!(
            super::get_integer_list_or_null("items", &tree("{\"items\": null}")).unwrap(),
            None
        );
        assert_eq!(
            message_of(super::get_integer_list_or_null(
                "items",
                &tree("{\"items\": \"23\"}")
            )),
            "Cannot parse JSON array from non-array value: items: \"23\""
        );
        assert_eq!(
            super::get_integer_list_or_null("items", &tree("{\"items\": [23, 45]}")).unwrap(),
            Some(vec![23, 45])
        );
    }

    #[test]
    fn get_integer_set() {
        assert_eq!(
            message_of(super::get_integer_set("items", &tree("{}"))),
            "Cannot parse missing set: items"
        );
        assert_eq!(
            message_of(super::get_integer_set("items", &tree("{\"items\": null}"))),
            "Cannot parse JSON array from non-array value: items: null"
        );
        assert_eq!(
            message_of(super::get_integer_set(
                "items",
                &tree("{\"items\": [13, \"23\"]}")
            )),
            "Cannot parse integer from non-int value in items: \"23\""
        );

        let set = super::get_integer_set("items", &tree("{\"items\": [23, 45]}")).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![23, 45]);
    }

    #[test]
    fn get_integer_set_dedupes_in_first_seen_order() {
        let set = super::get_integer_set("items", &tree("{\"items\": [45, 23, 45, 23]}")).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![45, 23]);
    }

    #[test]
    fn get_integer_set_or_null() {
        assert_eq!(
            super::get_integer_set_or_null("items", &tree("{}")).unwrap(),
            None
        );
        assert_eq!(
            super::get_integer_set_or_null("items", &tree("{\"items\": null}")).unwrap(),
            None
        );
        assert_eq!(
            message_of(super::get_integer_set_or_null(
                "items",
                &tree("{\"items\": [13, \"23\"]}")
            )),
            "Cannot parse integer from non-int value in items: \"23\""
        );
        let set = super::get_integer_set_or_null("items", &tree("{\"items\": [23, 45]}"))
            .unwrap()
            .unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![23, 45]);
    }

    #[test]
    fn get_long_list() {
        assert_eq!(
            message_of(super::get_long_list("items", &tree("{}"))),
            "Cannot parse missing list: items"
        );
        assert_eq!(
            message_of(super::get_long_list("items", &tree("{\"items\": null}"))),
            "Cannot parse JSON array from non-array value: items: null"
        );
        assert_eq!(
            message_of(super::get_long_list(
                "items",
                &tree("{\"items\": [13, \"23\"]}")
            )),
            "Cannot parse long from non-long value in items: \"23\""
        );

        let items = vec![23_i64, 45];
        assert_eq!(
            super::get_long_list("items", &tree("{\"items\": [23, 45]}")).unwrap(),
            items
        );

        let json = generate(
            |generator| {
                generator.write_start_object()?;
                write_long_array("items", items.iter().copied(), generator)?;
                generator.write_end_object()
            },
            false,
        )
        .unwrap();
        assert_eq!(super::get_long_list("items", &tree(&json)).unwrap(), items);
    }

    #[test]
    fn get_long_list_or_null() {
        assert_eq!(
            super::get_long_list_or_null("items", &tree("{}")).unwrap(),
            None
        );
        assert_eq!(
            super::get_long_list_or_null("items", &tree("{\"items\": null}")).unwrap(),
            None
        );
        assert_eq!(
            message_of(super::get_long_list_or_null(
                "items",
                &tree("{\"items\": [13, \"23\"]}")
            )),
            "Cannot parse long from non-long value in items: \"23\""
        );
        assert_eq!(
            super::get_long_list_or_null("items", &tree("{\"items\": [23, 45]}")).unwrap(),
            Some(vec![23, 45])
        );
    }

    #[test]
    fn get_long_set() {
        assert_eq!(
            message_of(super::get_long_set("items", &tree("{}"))),
            "Cannot parse missing set: items"
        );
        assert_eq!(
            message_of(super::get_long_set("items", &tree("{\"items\": null}"))),
            "Cannot parse JSON array from non-array value: items: null"
        );
        assert_eq!(
            message_of(super::get_long_set(
                "items",
                &tree("{\"items\": [13, \"23\"]}")
            )),
            "Cannot parse long from non-long value in items: \"23\""
        );
        let set = super::get_long_set("items", &tree("{\"items\": [23, 45]}")).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![23, 45]);
    }

    #[test]
    fn get_long_set_or_null() {
        assert_eq!(
            super::get_long_set_or_null("items", &tree("{}")).unwrap(),
            None
        );
        assert_eq!(
            super::get_long_set_or_null("items", &tree("{\"items\": null}")).unwrap(),
            None
        );
        assert_eq!(
            message_of(super::get_long_set_or_null(
                "items",
                &tree("{\"items\": [13, \"23\"]}")
            )),
            "Cannot parse long from non-long value in items: \"23\""
        );
        let set = super::get_long_set_or_null("items", &tree("{\"items\": [23, 45]}"))
            .unwrap()
            .unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![23, 45]);
    }

    #[test]
    fn get_string_list() {
        assert_eq!(
            message_of(super::get_string_list("items", &tree("{}"))),
            "Cannot parse missing list: items"
        );
        assert_eq!(
            message_of(super::get_string_list("items", &tree("{\"items\": null}"))),
            "Cannot parse JSON array from non-array value: items: null"
        );
        assert_eq!(
            message_of(super::get_string_list(
                "items",
                &tree("{\"items\": [\"23\", 45]}")
            )),
            "Cannot parse string from non-text value in items: 45"
        );

        let items = vec!["23".to_string(), "45".to_string()];
        assert_eq!(
            super::get_string_list("items", &tree("{\"items\": [\"23\", \"45\"]}")).unwrap(),
            items
        );

        let json = generate(
            |generator| {
                generator.write_start_object()?;
                write_string_array("items", &items, generator)?;
                generator.write_end_object()
            },
            false,
        )
        .unwrap();
        assert_eq!(super::get_string_list("items", &tree(&json)).unwrap(), items);
    }

    #[test]
    fn get_string_list_or_null() {
        assert_eq!(
            super::get_string_list_or_null("items", &tree("{}")).unwrap(),
            None
        );
        assert_eq!(
            super::get_string_list_or_null("items", &tree("{\"items\": null}")).unwrap(),
            None
        );
        assert_eq!(
            message_of(super::get_string_list_or_null(
                "items",
                &tree("{\"items\": [\"23\", 45]}")
            )),
            "Cannot parse string from non-text value in items: 45"
        );
        assert_eq!(
            super::get_string_list_or_null("items", &tree("{\"items\": [\"23\", \"45\"]}"))
                .unwrap(),
            Some(vec!["23".to_string(), "45".to_string()])
        );
    }

    #[test]
    fn get_string_set() {
        assert_eq!(
            message_of(super::get_string_set("items", &tree("{}"))),
            "Cannot parse missing set: items"
        );
        assert_eq!(
            message_of(super::get_string_set("items", &tree("{\"items\": null}"))),
            "Cannot parse JSON array from non-array value: items: null"
        );
        assert_eq!(
            message_of(super::get_string_set(
                "items",
                &tree("{\"items\": [\"23\", 45]}")
            )),
            "Cannot parse string from non-text value in items: 45"
        );
        let set = super::get_string_set("items", &tree("{\"items\": [\"23\", \"45\"]}")).unwrap();
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec!["23".to_string(), "45".to_string()]
        );
    }

    #[test]
    fn get_string_set_or_null() {
        assert_eq!(
            super::get_string_set_or_null("items", &tree("{}")).unwrap(),
            None
        );
        assert_eq!(
            super::get_string_set_or_null("items", &tree("{\"items\": null}")).unwrap(),
            None
        );
        let set = super::get_string_set_or_null("items", &tree("{\"items\": [\"23\", \"45\"]}"))
            .unwrap()
            .unwrap();
        assert_eq!(
            set.into_iter().collect::<Vec<_>>(),
            vec!["23".to_string(), "45".to_string()]
        );
    }

    #[test]
    fn get_string_map() {
        assert_eq!(
            message_of(super::get_string_map("items", &tree("{}"))),
            "Cannot parse missing map: items"
        );
        assert_eq!(
            message_of(super::get_string_map("items", &tree("{\"items\": null}"))),
            "Cannot parse string map from non-object value: items: null"
        );
        assert_eq!(
            message_of(super::get_string_map(
                "items",
                &tree("{\"items\": {\"a\":\"23\", \"b\":45}}")
            )),
            "Cannot parse to a string value: b: 45"
        );

        let items: IndexMap<String, String> = [("a", "23"), ("b", "45")]
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        assert_eq!(
            super::get_string_map("items", &tree("{\"items\": {\"a\":\"23\", \"b\":\"45\"}}"))
                .unwrap(),
            items
        );

        let json = generate(
            |generator| {
                generator.write_start_object()?;
                write_string_map("items", items.iter().map(|(k, v)| (k, Some(v))), generator)?;
                generator.write_end_object()
            },
            false,
        )
        .unwrap();
        assert_eq!(super::get_string_map("items", &tree(&json)).unwrap(), items);
    }

    #[test]
    fn get_string_map_or_null() {
        let node = tree("{\"test\": {\"property\": \"value\"}}");
        let map = super::get_string_map_or_null("test", &node).unwrap().unwrap();
        assert_eq!(
            map,
            IndexMap::from([("property".to_string(), "value".to_string())])
        );

        assert_eq!(super::get_string_map_or_null("missing", &node).unwrap(), None);
        assert_eq!(
            super::get_string_map_or_null("items", &tree("{\"items\": null}")).unwrap(),
            None
        );
        assert_eq!(
            message_of(super::get_string_map_or_null(
                "items",
                &tree("{\"items\": [1]}")
            )),
            "Cannot parse string map from non-object value: items: [1]"
        );
    }

    #[test]
    fn get_string_map_nullable_values() {
        assert_eq!(
            message_of(super::get_string_map_nullable_values("items", &tree("{}"))),
            "Cannot parse missing map: items"
        );
        assert_eq!(
            message_of(super::get_string_map_nullable_values(
                "items",
                &tree("{\"items\": null}")
            )),
            "Cannot parse string map from non-object value: items: null"
        );
        assert_eq!(
            message_of(super::get_string_map_nullable_values(
                "items",
                &tree("{\"items\": {\"a\":\"23\", \"b\":45}}")
            )),
            "Cannot parse to a string value: b: 45"
        );

        let mut items: IndexMap<String, Option<String>> = IndexMap::new();
        items.insert("a".to_string(), None);
        items.insert("b".to_string(), None);
        items.insert("c".to_string(), Some("23".to_string()));
        assert_eq!(
            super::get_string_map_nullable_values(
                "items",
                &tree("{\"items\": {\"a\": null, \"b\": null, \"c\": \"23\"}}")
            )
            .unwrap(),
            items
        );

        let json = generate(
            |generator| {
                generator.write_start_object()?;
                write_string_map("items", items.iter().map(|(k, v)| (k, v.as_ref())), generator)?;
                generator.write_end_object()
            },
            false,
        )
        .unwrap();
        assert_eq!(
            super::get_string_map_nullable_values("items", &tree(&json)).unwrap(),
            items
        );
    }

    #[test]
    fn get_object_list() {
        let node = tree("{\"test\": [{\"id\": 1}, {\"id\": 2}], \"not-a-list\": \"value\"}");

        let list =
            super::get_object_list("test", &node, |element| get_long("id", element)).unwrap();
        assert_eq!(list, vec![1, 2]);

        assert_eq!(
            message_of(super::get_object_list("missing", &node, |element| {
                get_long("id", element)
            })),
            "Cannot parse missing list: missing"
        );
        assert_eq!(
            message_of(super::get_object_list("not-a-list", &node, |element| {
                get_long("id", element)
            })),
            "Cannot parse JSON array from non-array value: not-a-list: \"value\""
        );
    }

    #[test]
    fn get_object_list_converter_failure_propagates_unchanged() {
        let node = tree("{\"test\": [{\"id\": 1}, {\"id\": \"2\"}]}");
        assert_eq!(
            message_of(super::get_object_list("test", &node, |element| {
                get_long("id", element)
            })),
            "Cannot parse to a long value: id: \"2\""
        );
    }

    #[test]
    fn get_object_list_or_null() {
        let node = tree("{\"test\": [{\"id\": 1}, {\"id\": 2}], \"not-a-list\": \"value\"}");

        let list = super::get_object_list_or_null("test", &node, |element| get_long("id", element))
            .unwrap();
        assert_eq!(list, Some(vec![1, 2]));

        assert_eq!(
            super::get_object_list_or_null("missing", &node, |element| get_long("id", element))
                .unwrap(),
            None
        );
        assert_eq!(
            super::get_object_list_or_null("gone", &tree("{\"gone\": null}"), |element| {
                get_long("id", element)
            })
            .unwrap(),
            None
        );
        assert_eq!(
            message_of(super::get_object_list_or_null("not-a-list", &node, |element| {
                get_long("id", element)
            })),
            "Cannot parse JSON array from non-array value: not-a-list: \"value\""
        );
    }

    #[test]
    fn element_validation_is_fail_fast() {
        let err = message_of(super::get_integer_list(
            "items",
            &tree("{\"items\": [1, \"two\", 3.0]}"),
        ));
        assert_eq!(err, "Cannot parse integer from non-int value in items: \"two\"");
    }
}

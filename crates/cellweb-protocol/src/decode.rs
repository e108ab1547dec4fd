//! Plain-value decoder for client edits.
//!
//! Only text content can be turned back into a storable value; every other
//! envelope is rejected. Anything without a string `$type` is already plain.

use serde_json::Value;
use tracing::debug;

use crate::error::{CodecError, CodecResult};
use crate::types::{ATTR_BINARY, ATTR_TEXT, VALUE_TYPE_ATTR, VALUE_TYPE_CONTENT};

/// Converts a submitted web value into a plain value for storage.
pub fn make_plain_value(value: Value) -> CodecResult<Value> {
    let mut map = match value {
        Value::Object(map) => map,
        other => return Ok(other),
    };
    let value_type = match map.get(VALUE_TYPE_ATTR) {
        Some(Value::String(value_type)) => value_type.clone(),
        _ => return Ok(Value::Object(map)),
    };

    if value_type != VALUE_TYPE_CONTENT {
        debug!(value_type = %value_type, "rejecting edit");
        return Err(CodecError::unsupported_type(value_type));
    }
    if map.get(ATTR_BINARY).is_some_and(|binary| !binary.is_null()) {
        return Err(CodecError::unsupported_binary());
    }
    Ok(map.remove(ATTR_TEXT).unwrap_or(Value::Null))
}

/// Decodes a batch of submitted values, stopping at the first rejected one.
pub fn decode_row(values: Vec<Value>) -> CodecResult<Vec<Value>> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| make_plain_value(value).map_err(|e| e.at_index(index)))
        .collect()
}

#[cfg(test)]
mod tests {
    use cellweb_core::memory::MemoryContent;
    use cellweb_core::{CellValue, ProgressMonitor, TypeDescriptor};
    use serde_json::json;

    use super::*;
    use crate::encode::CellEncoder;
    use crate::error::EditSubject;

    #[test]
    fn plain_values_pass_through() {
        for value in [
            Value::Null,
            json!(5),
            json!("abc"),
            json!([1, {"$type": "map"}]),
            json!({"a": 1}),
            json!({"$type": 5, "text": "x"}),
            json!({"$type": null}),
        ] {
            assert_eq!(make_plain_value(value.clone()).unwrap(), value);
        }
    }

    #[test]
    fn text_content_unwraps() {
        let value = json!({"$type": "content", "text": "hello", "contentLength": 5});
        assert_eq!(make_plain_value(value).unwrap(), json!("hello"));
    }

    #[test]
    fn content_without_text_is_null() {
        assert_eq!(make_plain_value(json!({"$type": "content"})).unwrap(), Value::Null);
        assert_eq!(
            make_plain_value(json!({"$type": "content", "binary": null, "text": null})).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn binary_content_is_rejected() {
        for binary in [json!(true), json!("AAEC"), json!(false)] {
            let err = make_plain_value(json!({"$type": "content", "binary": binary, "text": "x"}))
                .unwrap_err();
            assert!(matches!(err, CodecError::UnsupportedEdit(EditSubject::BinaryContent)));
        }
    }

    #[test]
    fn other_envelopes_are_rejected() {
        for value_type in ["collection", "map", "document", "geometry", "bogus"] {
            let err = make_plain_value(json!({"$type": value_type, "value": []})).unwrap_err();
            match err {
                CodecError::UnsupportedEdit(EditSubject::Type(t)) => assert_eq!(t, value_type),
                other => panic!("expected unsupported edit, got {:?}", other),
            }
        }
    }

    #[test]
    fn encoded_text_content_round_trips() {
        let encoded = CellEncoder::new()
            .encode(
                &ProgressMonitor::new(),
                &TypeDescriptor::unknown(),
                &CellValue::driver(MemoryContent::text("hello")),
            )
            .unwrap()
            .to_json()
            .unwrap();
        assert_eq!(make_plain_value(encoded).unwrap(), json!("hello"));
    }

    #[test]
    fn encoded_binary_content_is_rejected() {
        let encoded = CellEncoder::new()
            .encode(
                &ProgressMonitor::new(),
                &TypeDescriptor::unknown(),
                &CellValue::driver(MemoryContent::binary(vec![0u8, 1, 2])),
            )
            .unwrap()
            .to_json()
            .unwrap();
        assert!(matches!(
            make_plain_value(encoded),
            Err(CodecError::UnsupportedEdit(EditSubject::BinaryContent))
        ));
    }

    #[test]
    fn decode_row_reports_failing_index() {
        let values = vec![json!(1), json!({"$type": "content", "text": "t"}), json!(null)];
        assert_eq!(decode_row(values).unwrap(), vec![json!(1), json!("t"), json!(null)]);

        let values = vec![json!(1), json!("x"), json!({"$type": "geometry", "srid": 4326})];
        let err = decode_row(values).unwrap_err();
        assert_eq!(err.to_string(), "cell 2: type 'geometry' edit is not supported yet");
    }
}

//! Conversions between stored BSON documents and the JSON the HTTP layer speaks.
//!
//! ObjectIds are rendered as plain hex strings and dates as RFC 3339, which is
//! what browser clients of this API expect for `_id` and timestamps.

use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use serde_json::{Map, Value};

use crate::errors::ModelError;

/// Parse a path id into an ObjectId. Anything that is not 24 hex chars is `None`.
pub fn parse_object_id(raw: &str) -> Option<ObjectId> {
    ObjectId::parse_str(raw.trim()).ok()
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Value::from(dt.timestamp_millis()),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::String(s) => Value::String(s),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        Bson::Double(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Bson::Null | Bson::Undefined => Value::Null,
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(doc: Document) -> Value {
    let map: Map<String, Value> = doc
        .into_iter()
        .map(|(k, v)| (k, bson_to_json(v)))
        .collect();
    Value::Object(map)
}

pub fn json_object_to_document(map: &Map<String, Value>) -> Result<Document, ModelError> {
    bson::to_document(map).map_err(|e| ModelError::Validation(format!("unsupported document: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use serde_json::json;

    #[test]
    fn object_id_renders_as_hex() {
        let oid = ObjectId::parse_str("65a1b2c3d4e5f60718293a4b").unwrap();
        let v = document_to_json(doc! { "_id": oid, "title": "Oil change", "price": 20.5 });
        assert_eq!(v, json!({"_id": "65a1b2c3d4e5f60718293a4b", "title": "Oil change", "price": 20.5}));
    }

    #[test]
    fn nested_values_are_converted() {
        let v = document_to_json(doc! {
            "tags": ["a", 1_i32, 2_i64],
            "meta": { "done": true, "none": Bson::Null },
        });
        assert_eq!(v, json!({"tags": ["a", 1, 2], "meta": {"done": true, "none": null}}));
    }

    #[test]
    fn invalid_ids_do_not_parse() {
        assert!(parse_object_id("nope").is_none());
        assert!(parse_object_id("65a1b2c3d4e5f60718293a4").is_none());
        assert!(parse_object_id("65a1b2c3d4e5f60718293a4b").is_some());
    }

    #[test]
    fn json_object_converts_to_document() {
        let value = json!({"email": "x@y.com", "service": "oil-change", "price": 30});
        let map = value.as_object().unwrap();
        let doc = json_object_to_document(map).unwrap();
        assert_eq!(doc.get_str("email").unwrap(), "x@y.com");
        assert_eq!(doc.get_str("service").unwrap(), "oil-change");
    }
}

use mongodb::bson::Document;
use serde_json::Value;

use crate::document::json_object_to_document;
use crate::errors::ModelError;

/// A checkout submission that passed validation and is ready to insert.
///
/// The body is otherwise free-form: whatever booking fields the client sends
/// are stored as-is. Only the parts the API relies on are checked.
#[derive(Debug, Clone)]
pub struct NewBooking {
    doc: Document,
}

impl NewBooking {
    pub fn from_json(body: Value) -> Result<Self, ModelError> {
        let Value::Object(map) = body else {
            return Err(ModelError::Validation("booking body must be a JSON object".into()));
        };
        if map.contains_key("_id") {
            return Err(ModelError::Validation("_id is assigned by the store".into()));
        }
        match map.get("email") {
            None | Some(Value::String(_)) => {}
            Some(_) => return Err(ModelError::Validation("email must be a string".into())),
        }
        if let Some(key) = map.keys().find(|k| k.starts_with('$')) {
            return Err(ModelError::Validation(format!("field name {key} is not allowed")));
        }
        let doc = json_object_to_document(&map)?;
        Ok(Self { doc })
    }

    pub fn email(&self) -> Option<&str> {
        self.doc.get_str("email").ok()
    }

    pub fn into_document(self) -> Document {
        self.doc
    }
}

/// Body of `PATCH /bookings/:id`; only `status` is ever written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: String,
}

impl StatusUpdate {
    pub fn from_json(body: &Value) -> Result<Self, ModelError> {
        let obj = body
            .as_object()
            .ok_or_else(|| ModelError::Validation("update body must be a JSON object".into()))?;
        match obj.get("status") {
            Some(Value::String(s)) => Ok(Self { status: s.clone() }),
            Some(_) => Err(ModelError::Validation("status must be a string".into())),
            None => Err(ModelError::Validation("status is required".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_free_form_booking() {
        let b = NewBooking::from_json(json!({
            "email": "x@y.com",
            "service": "oil-change",
            "date": "2024-01-02",
            "price": 30,
        }))
        .unwrap();
        assert_eq!(b.email(), Some("x@y.com"));
        let doc = b.into_document();
        assert_eq!(doc.get_str("service").unwrap(), "oil-change");
    }

    #[test]
    fn rejects_non_objects_and_client_ids() {
        assert!(NewBooking::from_json(json!([1, 2])).is_err());
        assert!(NewBooking::from_json(json!("booking")).is_err());
        assert!(NewBooking::from_json(json!({"_id": "abc", "email": "a@b.com"})).is_err());
        assert!(NewBooking::from_json(json!({"email": 42})).is_err());
        assert!(NewBooking::from_json(json!({"$set": {"x": 1}})).is_err());
    }

    #[test]
    fn status_update_requires_string_status() {
        assert_eq!(
            StatusUpdate::from_json(&json!({"status": "confirmed", "ignored": 1})).unwrap(),
            StatusUpdate { status: "confirmed".into() }
        );
        assert!(StatusUpdate::from_json(&json!({})).is_err());
        assert!(StatusUpdate::from_json(&json!({"status": true})).is_err());
        assert!(StatusUpdate::from_json(&json!(null)).is_err());
    }
}

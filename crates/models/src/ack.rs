//! Write acknowledgments, shaped like the driver results clients already consume.

use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde::Serialize;
use serde_json::Value;

use crate::document::bson_to_json;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl UpdateAck {
    pub fn new(matched_count: u64, modified_count: u64) -> Self {
        Self { acknowledged: true, matched_count, modified_count, upserted_count: 0, upserted_id: None }
    }

    /// Result for an id that cannot match anything.
    pub fn no_match() -> Self {
        Self::new(0, 0)
    }
}

impl DeleteAck {
    pub fn new(deleted_count: u64) -> Self {
        Self { acknowledged: true, deleted_count }
    }

    pub fn no_match() -> Self {
        Self::new(0)
    }
}

impl From<InsertOneResult> for InsertAck {
    fn from(r: InsertOneResult) -> Self {
        Self { acknowledged: true, inserted_id: bson_to_json(r.inserted_id) }
    }
}

impl From<UpdateResult> for UpdateAck {
    fn from(r: UpdateResult) -> Self {
        let upserted_count = u64::from(r.upserted_id.is_some());
        Self {
            acknowledged: true,
            matched_count: r.matched_count,
            modified_count: r.modified_count,
            upserted_count,
            upserted_id: r.upserted_id.map(bson_to_json),
        }
    }
}

impl From<DeleteResult> for DeleteAck {
    fn from(r: DeleteResult) -> Self {
        Self::new(r.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_ack_uses_driver_field_names() {
        let v = serde_json::to_value(UpdateAck::new(1, 1)).unwrap();
        assert_eq!(
            v,
            json!({"acknowledged": true, "matchedCount": 1, "modifiedCount": 1, "upsertedCount": 0, "upsertedId": null})
        );
    }

    #[test]
    fn no_match_delete_is_zero() {
        let v = serde_json::to_value(DeleteAck::no_match()).unwrap();
        assert_eq!(v, json!({"acknowledged": true, "deletedCount": 0}));
    }
}

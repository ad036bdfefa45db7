use async_trait::async_trait;
use futures::TryStreamExt;
use models::ack::{DeleteAck, InsertAck, UpdateAck};
use models::bson::{doc, oid::ObjectId, Document};
use mongodb::Collection;

use crate::errors::ServiceError;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// All bookings, or only those whose `email` equals the filter.
    async fn list(&self, email: Option<&str>) -> Result<Vec<Document>, ServiceError>;
    async fn insert(&self, booking: Document) -> Result<InsertAck, ServiceError>;
    /// Overwrite `status` and nothing else.
    async fn set_status(&self, id: ObjectId, status: &str) -> Result<UpdateAck, ServiceError>;
    async fn delete(&self, id: ObjectId) -> Result<DeleteAck, ServiceError>;
}

/// MongoDB-backed repository implementation.
pub struct MongoBookingRepository {
    pub collection: Collection<Document>,
}

#[async_trait]
impl BookingRepository for MongoBookingRepository {
    async fn list(&self, email: Option<&str>) -> Result<Vec<Document>, ServiceError> {
        let filter = email.map(|e| doc! { "email": e }).unwrap_or_default();
        let cursor = self.collection.find(filter, None).await.map_err(ServiceError::db)?;
        cursor.try_collect().await.map_err(ServiceError::db)
    }

    async fn insert(&self, booking: Document) -> Result<InsertAck, ServiceError> {
        let result = self.collection.insert_one(booking, None).await.map_err(ServiceError::db)?;
        Ok(result.into())
    }

    async fn set_status(&self, id: ObjectId, status: &str) -> Result<UpdateAck, ServiceError> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": { "status": status } }, None)
            .await
            .map_err(ServiceError::db)?;
        Ok(result.into())
    }

    async fn delete(&self, id: ObjectId) -> Result<DeleteAck, ServiceError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(ServiceError::db)?;
        Ok(result.into())
    }
}

/// In-memory repository for tests and local runs without a deployment.
pub mod mock {
    use super::*;
    use models::bson::Bson;
    use models::document::bson_to_json;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct InMemoryBookingRepository {
        docs: RwLock<Vec<Document>>,
    }

    fn id_of(d: &Document) -> Option<ObjectId> {
        d.get_object_id("_id").ok()
    }

    #[async_trait]
    impl BookingRepository for InMemoryBookingRepository {
        async fn list(&self, email: Option<&str>) -> Result<Vec<Document>, ServiceError> {
            let docs = self.docs.read().await;
            Ok(docs
                .iter()
                .filter(|d| email.map_or(true, |e| d.get_str("email").ok() == Some(e)))
                .cloned()
                .collect())
        }

        async fn insert(&self, booking: Document) -> Result<InsertAck, ServiceError> {
            let id = ObjectId::new();
            let mut stored = doc! { "_id": id };
            for (key, value) in booking {
                stored.insert(key, value);
            }
            self.docs.write().await.push(stored);
            Ok(InsertAck { acknowledged: true, inserted_id: bson_to_json(Bson::ObjectId(id)) })
        }

        async fn set_status(&self, id: ObjectId, status: &str) -> Result<UpdateAck, ServiceError> {
            let mut docs = self.docs.write().await;
            let Some(booking) = docs.iter_mut().find(|d| id_of(d) == Some(id)) else {
                return Ok(UpdateAck::no_match());
            };
            if booking.get_str("status").ok() == Some(status) {
                return Ok(UpdateAck::new(1, 0));
            }
            booking.insert("status", status);
            Ok(UpdateAck::new(1, 1))
        }

        async fn delete(&self, id: ObjectId) -> Result<DeleteAck, ServiceError> {
            let mut docs = self.docs.write().await;
            let before = docs.len();
            docs.retain(|d| id_of(d) != Some(id));
            Ok(DeleteAck::new((before - docs.len()) as u64))
        }
    }
}

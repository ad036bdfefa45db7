use std::sync::Arc;

use models::ack::{DeleteAck, InsertAck, UpdateAck};
use models::booking::{NewBooking, StatusUpdate};
use models::bson::Document;
use models::document::parse_object_id;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::repository::BookingRepository;
use crate::errors::ServiceError;

/// Application service encapsulating booking rules: body validation and the
/// "unknown id is a zero-effect write" policy.
pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(repo: Arc<dyn BookingRepository>) -> Self { Self { repo } }

    /// Bookings for `email`, or all of them when no (or an empty) email is given.
    pub async fn list(&self, email: Option<&str>) -> Result<Vec<Document>, ServiceError> {
        let email = email.filter(|e| !e.is_empty());
        let items = self.repo.list(email).await?;
        debug!(count = items.len(), filtered = email.is_some(), "bookings listed");
        Ok(items)
    }

    #[instrument(skip(self, body))]
    pub async fn create(&self, body: Value) -> Result<InsertAck, ServiceError> {
        let booking = NewBooking::from_json(body)?;
        let email = booking.email().map(str::to_owned);
        let ack = self.repo.insert(booking.into_document()).await?;
        info!(inserted_id = %ack.inserted_id, email = ?email, "booking_created");
        Ok(ack)
    }

    #[instrument(skip(self, body))]
    pub async fn update_status(&self, raw_id: &str, body: &Value) -> Result<UpdateAck, ServiceError> {
        let update = StatusUpdate::from_json(body)?;
        let Some(id) = parse_object_id(raw_id) else {
            return Ok(UpdateAck::no_match());
        };
        let ack = self.repo.set_status(id, &update.status).await?;
        info!(%id, status = %update.status, matched = ack.matched_count, modified = ack.modified_count, "booking_status_updated");
        Ok(ack)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, raw_id: &str) -> Result<DeleteAck, ServiceError> {
        let Some(id) = parse_object_id(raw_id) else {
            return Ok(DeleteAck::no_match());
        };
        let ack = self.repo.delete(id).await?;
        info!(%id, deleted = ack.deleted_count, "booking_deleted");
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::repository::mock::InMemoryBookingRepository;
    use models::bson::oid::ObjectId;
    use serde_json::json;

    fn svc() -> BookingService {
        BookingService::new(Arc::new(InMemoryBookingRepository::default()))
    }

    fn inserted_id(ack: &InsertAck) -> String {
        ack.inserted_id.as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn create_then_list_by_email() {
        let s = svc();
        let ack = s.create(json!({"email": "x@y.com", "service": "oil-change"})).await.unwrap();
        s.create(json!({"email": "other@y.com", "service": "brakes"})).await.unwrap();
        assert!(ack.acknowledged);

        let mine = s.list(Some("x@y.com")).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].get_object_id("_id").unwrap().to_hex(), inserted_id(&ack));
        assert_eq!(s.list(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn empty_email_lists_everything() {
        let s = svc();
        s.create(json!({"email": "x@y.com", "service": "oil-change"})).await.unwrap();
        s.create(json!({"service": "brakes"})).await.unwrap();
        assert_eq!(s.list(Some("")).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn status_update_touches_only_status() {
        let s = svc();
        let ack = s
            .create(json!({"email": "x@y.com", "service": "oil-change", "price": 40, "status": "pending"}))
            .await
            .unwrap();
        let before = s.list(Some("x@y.com")).await.unwrap().remove(0);

        let upd = s.update_status(&inserted_id(&ack), &json!({"status": "confirmed"})).await.unwrap();
        assert_eq!((upd.matched_count, upd.modified_count), (1, 1));

        let after = s.list(Some("x@y.com")).await.unwrap().remove(0);
        assert_eq!(after.get_str("status").unwrap(), "confirmed");
        let mut expected = before.clone();
        expected.insert("status", "confirmed");
        assert_eq!(after, expected);
    }

    #[tokio::test]
    async fn writes_to_unknown_ids_have_no_effect() {
        let s = svc();
        let missing = ObjectId::new().to_hex();
        assert_eq!(s.delete(&missing).await.unwrap().deleted_count, 0);
        assert_eq!(s.delete("garbage").await.unwrap().deleted_count, 0);
        let upd = s.update_status("garbage", &json!({"status": "done"})).await.unwrap();
        assert_eq!(upd.matched_count, 0);
    }

    #[tokio::test]
    async fn delete_removes_document() {
        let s = svc();
        let ack = s.create(json!({"email": "x@y.com"})).await.unwrap();
        assert_eq!(s.delete(&inserted_id(&ack)).await.unwrap().deleted_count, 1);
        assert!(s.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_bodies_are_validation_errors() {
        let s = svc();
        assert!(matches!(s.create(json!(["x"])).await, Err(ServiceError::Validation(_))));
        assert!(matches!(
            s.update_status(&ObjectId::new().to_hex(), &json!({})).await,
            Err(ServiceError::Validation(_))
        ));
    }
}
